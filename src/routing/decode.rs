//! YAML and JSON record-list decoders.
//!
//! Both formats carry a list of `{ path, url }` records:
//!
//! ```text
//! - path: /urlshort
//!   url: https://github.com/gophercises/urlshort
//!
//! [{"path": "/g", "url": "https://google.com"}]
//! ```

use thiserror::Error;

use crate::routing::table::PathRecord;

/// Errors produced while decoding a record list.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Malformed YAML or a record with the wrong shape.
    #[error("invalid YAML path list: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Malformed JSON or a record with the wrong shape.
    #[error("invalid JSON path list: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode a YAML sequence of records.
///
/// An empty, whitespace-only or null (`~`) document decodes to an empty list.
pub fn decode_yaml(bytes: &[u8]) -> Result<Vec<PathRecord>, DecodeError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let records: Option<Vec<PathRecord>> = serde_yaml::from_slice(bytes)?;
    Ok(records.unwrap_or_default())
}

/// Decode a JSON array of records.
pub fn decode_json(bytes: &[u8]) -> Result<Vec<PathRecord>, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_single_record() {
        let records = decode_yaml(b"- path: /a\n  url: https://x.example\n").unwrap();
        assert_eq!(records, vec![PathRecord::new("/a", "https://x.example")]);
    }

    #[test]
    fn test_yaml_preserves_order_and_duplicates() {
        let yaml = b"
- path: /urlshort
  url: https://github.com/gophercises/urlshort
- path: /urlshort
  url: https://github.com/gophercises/urlshort/tree/solution
";
        let records = decode_yaml(yaml).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[1].destination,
            "https://github.com/gophercises/urlshort/tree/solution"
        );
    }

    #[test]
    fn test_yaml_empty() {
        assert!(decode_yaml(b"[]").unwrap().is_empty());
        assert!(decode_yaml(b"").unwrap().is_empty());
        assert!(decode_yaml(b"~").unwrap().is_empty());
        assert!(decode_yaml(b"null\n").unwrap().is_empty());
        assert!(decode_yaml(b"  \n\n").unwrap().is_empty());
    }

    #[test]
    fn test_yaml_missing_value_with_wrong_type() {
        let yaml = b"- path: /a\n  url:\n- path:\n    nested: true\n  url: https://x.example\n";
        let err = decode_yaml(yaml).unwrap_err();
        assert!(matches!(err, DecodeError::Yaml(_)));
    }

    #[test]
    fn test_yaml_wrong_shape() {
        assert!(decode_yaml(b"path: /a\nurl: https://x.example\n").is_err());
        assert!(decode_yaml(b"- path: [1, 2]\n  url: https://x.example\n").is_err());
        assert!(decode_yaml(b"- path: /a\n  url: [\n").is_err());
    }

    #[test]
    fn test_yaml_extra_keys_ignored() {
        let records = decode_yaml(b"- path: /a\n  url: https://x.example\n  note: hi\n").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_json_records() {
        let records = decode_json(br#"[{"path":"/g","url":"https://google.com"}]"#).unwrap();
        assert_eq!(records, vec![PathRecord::new("/g", "https://google.com")]);
    }

    #[test]
    fn test_json_empty_array() {
        assert!(decode_json(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_json_failures() {
        // truncated
        assert!(matches!(
            decode_json(br#"[{"path":"/g","url":"https://goo"#),
            Err(DecodeError::Json(_))
        ));
        // type mismatch
        assert!(decode_json(br#"[{"path":"/g","url":42}]"#).is_err());
        // object instead of array
        assert!(decode_json(br#"{"path":"/g","url":"https://google.com"}"#).is_err());
        // missing field
        assert!(decode_json(br#"[{"path":"/g"}]"#).is_err());
        // empty payload
        assert!(decode_json(b"").is_err());
    }

    #[test]
    fn test_error_display_carries_diagnostic() {
        let err = decode_json(b"[").unwrap_err();
        assert!(err.to_string().starts_with("invalid JSON path list:"));
    }
}
