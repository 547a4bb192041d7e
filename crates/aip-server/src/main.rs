#![forbid(unsafe_code)]

use aip_server::{
    build_router, AppState, CaseStoreBackend, DocumentService, FakeCaseStore, FakeDocumentService,
    HttpCaseStore, HttpDocumentService, RetryPolicy, ServerConfig, StaticTokenProvider,
};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_u64(name, default_ms))
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("AIP_LOG_JSON", true) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env::var("AIP_BIND").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = ServerConfig {
        session_ttl: env_duration_ms("AIP_SESSION_TTL_MS", 20 * 60 * 1000),
        max_file_size_mb: env_u64("AIP_MAX_FILE_SIZE_MB", 100),
        dev_user_id: env::var("AIP_DEV_USER_ID").unwrap_or_else(|_| "dev-user".to_string()),
    };
    let retry = RetryPolicy {
        max_attempts: env_usize("AIP_RETRY_ATTEMPTS", 4),
        base_backoff_ms: env_u64("AIP_RETRY_BASE_MS", 120),
    };

    let tokens = Arc::new(StaticTokenProvider::new(
        &env::var("AIP_USER_TOKEN").unwrap_or_default(),
        &env::var("AIP_SERVICE_TOKEN").unwrap_or_default(),
    ));
    let store: Arc<dyn CaseStoreBackend> = if env_bool("AIP_FAKE_STORE", false) {
        Arc::new(FakeCaseStore::default())
    } else {
        let base_url = env::var("AIP_CASE_STORE_URL")
            .map_err(|_| "AIP_CASE_STORE_URL is required unless AIP_FAKE_STORE=1".to_string())?;
        Arc::new(HttpCaseStore::new(base_url, retry.clone()))
    };
    let documents: Arc<dyn DocumentService> = if env_bool("AIP_FAKE_STORE", false) {
        Arc::new(FakeDocumentService::default())
    } else {
        let base_url = env::var("AIP_DOC_STORE_URL")
            .map_err(|_| "AIP_DOC_STORE_URL is required unless AIP_FAKE_STORE=1".to_string())?;
        Arc::new(HttpDocumentService::new(base_url, retry))
    };

    let state = AppState::new(store, documents, tokens, config);
    let app = build_router(state.clone());
    info!(case_store = state.store.backend_tag(), "starting");

    let addr: std::net::SocketAddr = bind_addr
        .parse()
        .map_err(|e| format!("invalid bind addr {bind_addr}: {e}"))?;
    let socket = if addr.is_ipv4() {
        tokio::net::TcpSocket::new_v4().map_err(|e| format!("socket v4 failed: {e}"))?
    } else {
        tokio::net::TcpSocket::new_v6().map_err(|e| format!("socket v6 failed: {e}"))?
    };
    socket
        .set_reuseaddr(true)
        .map_err(|e| format!("set_reuseaddr failed: {e}"))?;
    socket.bind(addr).map_err(|e| format!("bind failed: {e}"))?;
    let listener: TcpListener = socket
        .listen(1024)
        .map_err(|e| format!("listen failed: {e}"))?;
    info!("aip-server listening on {bind_addr}");
    let accepting = state.accepting_requests.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            // Fail readiness first, then hold the drain window open.
            accepting.store(false, std::sync::atomic::Ordering::Relaxed);
            let drain_ms = env_u64("AIP_SHUTDOWN_DRAIN_MS", 5000);
            tokio::time::sleep(Duration::from_millis(drain_ms)).await;
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
