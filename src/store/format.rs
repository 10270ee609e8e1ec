// Lockbox: Backing source line format
//
// One entry per line, `key:value`, split on the first colon. Keys are taken
// verbatim and may not contain a colon; values may. Values are trimmed on
// read, so surrounding whitespace does not survive a round trip.

use std::collections::BTreeMap;

use super::StoreError;

const SEPARATOR: char = ':';

/// Parse backing source text into a mapping. Blank lines are skipped and the
/// last occurrence of a duplicated key wins.
pub fn parse(text: &str) -> Result<BTreeMap<String, String>, StoreError> {
    let mut entries = BTreeMap::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (key, value) = line
            .split_once(SEPARATOR)
            .ok_or(StoreError::MalformedEntry { line: index + 1 })?;
        entries.insert(key.to_string(), value.trim().to_string());
    }

    Ok(entries)
}

/// Render a mapping as `key:value` lines, each newline-terminated.
pub fn serialize(entries: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (key, value) in entries {
        out.push_str(key);
        out.push(SEPARATOR);
        out.push_str(value);
        out.push('\n');
    }
    out
}

/// Reject entries that would not read back as the same key.
pub fn validate_entry(key: &str, value: &str) -> Result<(), StoreError> {
    if key.contains(SEPARATOR) {
        return Err(StoreError::InvalidEntry(format!(
            "key {:?} contains '{}'",
            key, SEPARATOR
        )));
    }
    if key.contains(['\n', '\r']) {
        return Err(StoreError::InvalidEntry(format!(
            "key {:?} contains a line break",
            key
        )));
    }
    // Never echo the value itself.
    if value.contains(['\n', '\r']) {
        return Err(StoreError::InvalidEntry(format!(
            "value for key {:?} contains a line break",
            key
        )));
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_lines() {
        let entries = parse("a:1\nb:2\n").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries["a"], "1");
        assert_eq!(entries["b"], "2");
    }

    #[test]
    fn test_parse_splits_on_first_colon_only() {
        let entries = parse("url:http://localhost:8080\n").unwrap();
        assert_eq!(entries["url"], "http://localhost:8080");
    }

    #[test]
    fn test_parse_trims_values_but_not_keys() {
        let entries = parse(" spaced :  value \r\n").unwrap();
        assert_eq!(entries[" spaced "], "value");
    }

    #[test]
    fn test_parse_last_duplicate_wins() {
        let entries = parse("a:1\na:2\na:3").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["a"], "3");
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let entries = parse("\na:1\n   \n\nb:2").unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_parse_empty_text_is_empty_mapping() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_reports_line_of_malformed_entry() {
        let err = parse("a:1\n\nno separator here\n").unwrap_err();
        match err {
            StoreError::MalformedEntry { line } => assert_eq!(line, 3),
            other => panic!("Expected MalformedEntry, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_allows_empty_value() {
        let entries = parse("flag:\n").unwrap();
        assert_eq!(entries["flag"], "");
    }

    #[test]
    fn test_serialize_is_readable_by_parse() {
        let mut entries = BTreeMap::new();
        entries.insert("b".to_string(), "2".to_string());
        entries.insert("a".to_string(), "with:colon".to_string());

        let text = serialize(&entries);
        assert_eq!(text, "a:with:colon\nb:2\n", "Entries are written in key order");
        assert_eq!(parse(&text).unwrap(), entries);
    }

    #[test]
    fn test_serialize_empty_mapping_is_empty_text() {
        assert_eq!(serialize(&BTreeMap::new()), "");
    }

    #[test]
    fn test_validate_rejects_colon_in_key() {
        assert!(matches!(
            validate_entry("a:b", "1"),
            Err(StoreError::InvalidEntry(_))
        ));
    }

    #[test]
    fn test_validate_rejects_line_breaks() {
        assert!(validate_entry("a\nb", "1").is_err());
        assert!(validate_entry("a", "1\n2").is_err());
        assert!(validate_entry("a", "1\r").is_err());
    }

    #[test]
    fn test_validate_error_does_not_echo_value() {
        let err = validate_entry("token", "hunter2\nhunter3").unwrap_err();
        assert!(!err.to_string().contains("hunter2"));
    }

    #[test]
    fn test_validate_accepts_colon_in_value() {
        assert!(validate_entry("url", "http://host:1").is_ok());
    }
}
