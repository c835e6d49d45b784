//! Free-text cleanup for values copied into the joined table.

/// Replace every CRLF pair with a space and trim surrounding whitespace.
///
/// Lone `\r` or `\n` characters inside the text are kept.
///
/// ```
/// use pudo_core::normalize_text;
///
/// assert_eq!(normalize_text("São Paulo\r\nBrasil"), "São Paulo Brasil");
/// ```
pub fn normalize_text(value: &str) -> String {
    value.replace("\r\n", " ").trim().to_string()
}

/// [`normalize_text`] over an optional value; `None` passes through.
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value.map(normalize_text)
}
