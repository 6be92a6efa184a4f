//! Metric name validation.
//!
//! A registrable name is either a bare identifier (`requests_total`) or an
//! identifier followed by a brace-enclosed label set
//! (`requests_total{path="/",method="GET"}`). Identifiers start with an ASCII
//! letter or underscore and continue with letters, digits, and underscores.
//! Label values are double-quoted and may be empty.
//!
//! The registry takes the validator as a plain function value (see
//! [`Registry::with_validator`](crate::Registry::with_validator)), so a
//! stricter or looser grammar can be swapped in without touching registry
//! logic. [`validate_metric_name`] is the default.

/// Signature of a pluggable name validator.
///
/// The `Err` string is a human-readable reason; the registry wraps it into
/// [`RegistryError::InvalidName`](crate::RegistryError::InvalidName).
pub type NameValidator = fn(&str) -> Result<(), String>;

/// Validates a metric name against the default grammar.
///
/// # Examples
///
/// ```rust
/// use registro::validate::validate_metric_name;
///
/// assert!(validate_metric_name("foo").is_ok());
/// assert!(validate_metric_name(r#"foo{bar="baz"}"#).is_ok());
/// assert!(validate_metric_name(r#"foo{bar="baz",aaa="b"}"#).is_ok());
///
/// assert!(validate_metric_name("").is_err());
/// assert!(validate_metric_name("bad name!").is_err());
/// assert!(validate_metric_name("1starts_with_digit").is_err());
/// ```
pub fn validate_metric_name(name: &str) -> Result<(), String> {
    let bytes = name.as_bytes();

    let mut pos = ident_end(bytes, 0);
    if pos == 0 {
        return Err("must start with an ASCII letter or '_'".to_string());
    }
    if pos == bytes.len() {
        return Ok(());
    }
    if bytes[pos] != b'{' {
        return Err(format!(
            "unexpected character after identifier at position {pos}"
        ));
    }
    pos += 1;

    // One or more `label="value"` pairs, comma-separated, up to the
    // closing brace. An empty label set is rejected.
    loop {
        let end = ident_end(bytes, pos);
        if end == pos {
            return Err(format!("expected a label name at position {pos}"));
        }
        pos = end;

        if bytes.get(pos) != Some(&b'=') {
            return Err(format!("expected '=' after label name at position {pos}"));
        }
        pos += 1;

        if bytes.get(pos) != Some(&b'"') {
            return Err(format!(
                "label value must be double-quoted at position {pos}"
            ));
        }
        pos += 1;
        match bytes[pos..].iter().position(|&b| b == b'"') {
            Some(len) => pos += len + 1,
            None => return Err(format!("unterminated label value at position {pos}")),
        }

        match bytes.get(pos) {
            Some(b',') => pos += 1,
            Some(b'}') => {
                pos += 1;
                break;
            }
            Some(_) => {
                return Err(format!(
                    "expected ',' or '}}' after label value at position {pos}"
                ))
            }
            None => return Err("missing closing '}'".to_string()),
        }
    }

    if pos != bytes.len() {
        return Err(format!("trailing characters after '}}' at position {pos}"));
    }
    Ok(())
}

/// Scans an identifier starting at `start` and returns the offset one past its
/// last byte. Returns `start` itself when no identifier is present, including
/// when the first byte is a digit.
fn ident_end(bytes: &[u8], start: usize) -> usize {
    let mut pos = start;
    while pos < bytes.len() {
        let b = bytes[pos];
        let valid = b == b'_'
            || b.is_ascii_alphabetic()
            || (pos > start && b.is_ascii_digit());
        if !valid {
            break;
        }
        pos += 1;
    }
    pos
}
