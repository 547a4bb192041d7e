// SPDX-License-Identifier: Apache-2.0

use aip_model::DocumentRef;
use rand::RngCore;

/// Opaque file-id to document-store-url map.
///
/// Store urls never leave the server: decode assigns each url a random key
/// and pages address documents by key; encode resolves keys back. Keys are
/// stable for the lifetime of the session appeal they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMap {
    entries: Vec<DocumentRef>,
}

impl DocumentMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_entries(entries: Vec<DocumentRef>) -> Self {
        Self { entries }
    }

    /// Returns the key for `url`, minting one if the url is new.
    pub fn register(&mut self, url: &str) -> String {
        if let Some(existing) = self.entries.iter().find(|e| e.url == url) {
            return existing.id.clone();
        }
        let id = new_document_key();
        self.entries.push(DocumentRef {
            id: id.clone(),
            url: url.to_string(),
        });
        id
    }

    #[must_use]
    pub fn resolve(&self, file_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id == file_id)
            .map(|e| e.url.as_str())
    }

    #[must_use]
    pub fn entries(&self) -> &[DocumentRef] {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<DocumentRef> {
        self.entries
    }
}

/// 128 random bits in the canonical 8-4-4-4-12 hex layout.
fn new_document_key() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registering_the_same_url_reuses_the_key() {
        let mut map = DocumentMap::new();
        let a = map.register("http://dm-store/documents/1");
        let b = map.register("http://dm-store/documents/1");
        let c = map.register("http://dm-store/documents/2");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(map.entries().len(), 2);
    }

    #[test]
    fn resolve_round_trips_and_rejects_unknown_keys() {
        let mut map = DocumentMap::new();
        let id = map.register("http://dm-store/documents/9");
        assert_eq!(map.resolve(&id), Some("http://dm-store/documents/9"));
        assert_eq!(map.resolve("missing"), None);
    }

    #[test]
    fn keys_use_the_canonical_hex_layout() {
        let key = new_document_key();
        let groups: Vec<&str> = key.split('-').collect();
        assert_eq!(
            groups.iter().map(|g| g.len()).collect::<Vec<_>>(),
            vec![8, 4, 4, 4, 12]
        );
        assert!(key
            .chars()
            .all(|c| c.is_ascii_hexdigit() || c == '-'));
    }
}
