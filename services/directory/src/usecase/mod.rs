pub mod division;
pub mod employee;
pub mod password;
pub mod session;

/// Trimmed value, or `None` when missing or blank.
pub(crate) fn filled(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}
