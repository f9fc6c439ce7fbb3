// src/utils/text_debug.rs
use std::fs;
use std::path::Path;

use crate::extractors::BrokerExtractor;
use crate::utils::error::StorageError;

const MATCH_OPEN: &str = "[[";
const MATCH_CLOSE: &str = "]]";

/// Wraps every match of `extractor`'s pattern in `[[...]]`.
pub fn annotate_matches(text: &str, extractor: &dyn BrokerExtractor) -> String {
    let mut annotated = String::with_capacity(text.len());
    let mut last_pos = 0;

    for mat in extractor.pattern().find_iter(text) {
        annotated.push_str(&text[last_pos..mat.start()]);
        annotated.push_str(MATCH_OPEN);
        annotated.push_str(mat.as_str());
        annotated.push_str(MATCH_CLOSE);
        last_pos = mat.end();
    }
    annotated.push_str(&text[last_pos..]);

    annotated
}

/// Saves a document's page text, as the extractor sees it, with matches marked.
pub fn save_debug_text(
    pages: &[Option<String>],
    extractor: &dyn BrokerExtractor,
    path: &Path,
) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut dump = format!("# Layout: {}\n", extractor.broker_name());
    for (index, page) in pages.iter().enumerate() {
        dump.push_str(&format!("\n=== Page {} ===\n", index + 1));
        match page {
            Some(text) => dump.push_str(&annotate_matches(&extractor.prepare(text), extractor)),
            None => dump.push_str("(no text)"),
        }
        dump.push('\n');
    }

    fs::write(path, dump)?;
    tracing::info!("Saved debug text to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::arihant::ArihantExtractor;
    use crate::extractors::zerodha::ZerodhaExtractor;

    #[test]
    fn test_annotate_marks_each_match() {
        let text = "header\n11:05:09 3301 HDFC BANK LTD S 20 1650.25 0.10 1650.15 33003.00\nfooter";
        assert_eq!(
            annotate_matches(text, &ArihantExtractor),
            "header\n[[11:05:09 3301 HDFC BANK LTD S 20 1650.25 0.10 1650.15 33003.00]]\nfooter"
        );
    }

    #[test]
    fn test_dump_uses_joined_text_for_wrapped_layouts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zerodha.txt");
        let pages = vec![
            Some(
                "1300000002 11:00:00 55502 11:00:01 IDEA CELLULAR /\n\
                 INE669E01016 B 100 60.15 6015.00"
                    .to_string(),
            ),
            None,
        ];

        save_debug_text(&pages, &ZerodhaExtractor, &path).unwrap();

        let dump = fs::read_to_string(&path).unwrap();
        assert!(dump.starts_with("# Layout: Zerodha"));
        assert!(dump.contains(
            "[[1300000002 11:00:00 55502 11:00:01 IDEA CELLULAR / \
             INE669E01016 B 100 60.15 6015.00]]"
        ));
        assert!(dump.contains("=== Page 2 ===\n(no text)"));
    }
}
