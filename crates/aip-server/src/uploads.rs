// SPDX-License-Identifier: Apache-2.0

//! Upload validation: extension allow-list and configured size cap.
//! Violations surface as a page-level error message, never a 500.

pub const SUPPORTED_FORMATS: &[&str] = &[
    ".jpg", ".jpeg", ".bmp", ".tif", ".tiff", ".png", ".pdf", ".txt", ".doc", ".dot", ".docx",
    ".dotx", ".xls", ".xlt", ".xla", ".xlsx", ".xltx", ".xlsb", ".ppt", ".pot", ".pps", ".ppa",
    ".pptx", ".potx", ".ppsx", ".rtf", ".csv",
];

pub fn validate_upload(filename: &str, size_bytes: usize, max_mb: u64) -> Result<(), String> {
    let lowered = filename.to_lowercase();
    let supported = lowered
        .rfind('.')
        .map(|idx| &lowered[idx..])
        .is_some_and(|ext| SUPPORTED_FORMATS.contains(&ext));
    if !supported {
        return Err(format!(
            "The selected file must be a file of type: {}",
            SUPPORTED_FORMATS.join(", ")
        ));
    }
    let max_bytes = (max_mb as usize).saturating_mul(1024 * 1024);
    if size_bytes > max_bytes {
        return Err(format!("The selected file must be smaller than {max_mb}MB"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_supported_extensions_case_insensitively() {
        for name in ["photo.png", "Scan.PDF", "notes.DocX", "export.csv"] {
            assert!(validate_upload(name, 1024, 100).is_ok(), "{name}");
        }
    }

    #[test]
    fn rejects_unsupported_or_missing_extensions() {
        for name in ["malware.exe", "archive.zip", "noextension", ".gitignore"] {
            assert!(validate_upload(name, 1024, 100).is_err(), "{name}");
        }
    }

    #[test]
    fn rejects_files_over_the_size_cap() {
        let err = validate_upload("big.png", 2 * 1024 * 1024, 1).unwrap_err();
        assert!(err.contains("smaller than 1MB"));
        assert!(validate_upload("ok.png", 1024 * 1024, 1).is_ok());
    }
}
