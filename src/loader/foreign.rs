//! Loading of foreign capture/export files

use super::load_json_file;
use crate::error::Result;
use crate::models::eolinker::ExportEntry;
use crate::models::har::HarFile;
use std::path::Path;

/// Load a HAR capture
pub fn load_har<P: AsRef<Path>>(path: P) -> Result<HarFile> {
    let har: HarFile = load_json_file(&path)?;
    tracing::debug!(
        entries = har.log.entries.len(),
        "loaded HAR file {}",
        path.as_ref().display()
    );
    Ok(har)
}

/// Load an eolinker API export (a JSON array of API entries)
pub fn load_export<P: AsRef<Path>>(path: P) -> Result<Vec<ExportEntry>> {
    let entries: Vec<ExportEntry> = load_json_file(&path)?;
    tracing::debug!(
        entries = entries.len(),
        "loaded export file {}",
        path.as_ref().display()
    );
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiCaseError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_har() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"log": {"entries": [{"request": {"method": "POST", "url": "http://a.test/x",
                "postData": {"mimeType": "text/plain;charset=UTF-8", "text": "{}"}}}]}}"#,
        )
        .unwrap();

        let har = load_har(file.path()).unwrap();
        assert_eq!(har.log.entries.len(), 1);
        let post = har.log.entries[0].request.post_data.as_ref().unwrap();
        assert_eq!(post.mime_type, "text/plain;charset=UTF-8");
    }

    #[test]
    fn test_load_har_with_wrong_shape() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"entries": []}"#).unwrap();

        let result = load_har(file.path());
        assert!(matches!(result, Err(ApiCaseError::ParseError { .. })));
    }

    #[test]
    fn test_load_export() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"[{"baseInfo": {"apiRequestType": 0, "apiURI": "/a"}}]"#)
            .unwrap();

        let entries = load_export(file.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_active());
    }
}
