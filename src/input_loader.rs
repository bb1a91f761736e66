use std::fs;
use std::path::Path;

use log::{debug, info};
use url::Url;

use crate::error::RunError;

/// One URL to import, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub url: String,
    pub ordinal: usize,
}

/// Reads the newline-delimited URL list. Blank lines and lines that are
/// not absolute http(s) URLs are dropped without complaint; an unreadable
/// file is fatal.
pub fn load_items<P: AsRef<Path>>(path: P) -> Result<Vec<WorkItem>, RunError> {
    let path_ref = path.as_ref();
    let content = fs::read_to_string(path_ref).map_err(|e| RunError::SourceUnreadable {
        path: path_ref.to_path_buf(),
        source: e,
    })?;

    let mut items = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match Url::parse(line) {
            Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {
                items.push(WorkItem {
                    url: line.to_string(),
                    ordinal: items.len(),
                });
            }
            _ => {
                debug!("Skipping line that is not an absolute http(s) URL: {}", line);
            }
        }
    }

    info!("Loaded {} URLs from {:?}", items.len(), path_ref);
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_list(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_urls_in_order_with_ordinals() {
        let file = write_list("https://a.example/one\nhttps://b.example/two\n");
        let items = load_items(file.path()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].url, "https://a.example/one");
        assert_eq!(items[0].ordinal, 0);
        assert_eq!(items[1].ordinal, 1);
    }

    #[test]
    fn drops_blank_and_malformed_lines() {
        let file = write_list("\nhttps://a.example/one\n\nnot a url\nftp://a.example/file\n  https://b.example/two  \n");
        let items = load_items(file.path()).unwrap();
        let urls: Vec<&str> = items.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.example/one", "https://b.example/two"]);
        // ordinals are assigned after filtering, so they stay contiguous
        assert_eq!(items[1].ordinal, 1);
    }

    #[test]
    fn missing_file_is_source_unreadable() {
        let err = load_items("/nonexistent/urls.txt").unwrap_err();
        assert!(matches!(err, RunError::SourceUnreadable { .. }));
    }

    #[test]
    fn duplicates_are_kept_as_independent_items() {
        let file = write_list("https://a.example/one\nhttps://a.example/one\n");
        let items = load_items(file.path()).unwrap();
        assert_eq!(items.len(), 2);
        assert_ne!(items[0].ordinal, items[1].ordinal);
    }
}
