//! Masking of secret credential values before they reach a terminal or a log.

/// Replacement shown in place of a secret value
pub const REDACTED: &str = "***REDACTED***";

// Matched case-insensitively as substrings of the field name.
const SECRET_MARKERS: &[&str] = &["password", "secret", "token", "private", "passphrase"];

/// Whether a credentials field holds a secret, going by its name.
#[must_use]
pub fn is_secret_field(field: &str) -> bool {
    let field = field.to_ascii_lowercase();
    SECRET_MARKERS.iter().any(|marker| field.contains(marker)) || field == "pass" || field == "pwd"
}

/// Mask a secret. Empty values stay empty so that "set but blank" remains
/// visible.
#[must_use]
pub fn mask_secret(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        REDACTED.to_string()
    }
}
