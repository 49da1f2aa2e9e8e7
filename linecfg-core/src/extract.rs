//! Scalar field extraction from a captured region.

use thiserror::Error;

/// Errors returned when a field value cannot be extracted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// The field keyword does not appear in the region.
    #[error("field '{0}' not found in section")]
    NotFound(String),
}

/// Extract the scalar value following `field` in a region's text.
///
/// The value grammar is the dump's only one: the keyword, one space, then the
/// rest of the line with any surrounding double quotes removed. Values can
/// contain spaces (`dname "My App Name"`), dots (addresses), and trailing
/// sibling data after a `/` when the keyword is itself a containment path;
/// callers truncate the latter.
///
/// The first occurrence anywhere in the region wins, so callers extracting a
/// non-identity field must have verified the keyword's presence belongs to
/// the element they mean.
pub fn extract_field(text: &str, field: &str) -> Result<String, FieldError> {
    let needle = format!("{field} ");
    let pos = text
        .find(&needle)
        .ok_or_else(|| FieldError::NotFound(field.to_string()))?;
    let rest = &text[pos + needle.len()..];
    let line = rest.split('\n').next().unwrap_or(rest);
    let value: String = line.chars().filter(|c| *c != '"').collect();
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(FieldError::NotFound(field.to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{extract_field, FieldError};

    #[test]
    fn extracts_dotted_address_value() {
        let text = "/c/slb/virt 1\n\tvip 10.0.0.1\n";
        assert_eq!(extract_field(text, "vip").as_deref(), Ok("10.0.0.1"));
    }

    #[test]
    fn strips_quotes_and_keeps_inner_spaces() {
        let text = "/c/slb/virt 1\n\tdname \"My App Name\"\n";
        assert_eq!(extract_field(text, "dname").as_deref(), Ok("My App Name"));
    }

    #[test]
    fn keeps_trailing_sibling_data_for_path_keywords() {
        let text = "/c/slb/virt 72/service 38081/pbind cookie insert\n";
        assert_eq!(
            extract_field(text, "/c/slb/virt 72/service").as_deref(),
            Ok("38081/pbind cookie insert")
        );
    }

    #[test]
    fn reports_missing_field() {
        let err = extract_field("/c/slb/real 1\n\trip 192.0.2.1\n", "name").unwrap_err();
        assert_eq!(err, FieldError::NotFound("name".to_string()));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let err = extract_field("\tname \"\"\n", "name").unwrap_err();
        assert_eq!(err, FieldError::NotFound("name".to_string()));
    }
}
