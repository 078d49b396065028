//! ID prefixes and generation helpers.
//!
//! IDs look like `wl-a3f8b2c1` (random) or `msg-0007` (session sequence).

/// Prefix for watchlist items.
pub const PREFIX_WATCHLIST: &str = "wl";

/// Prefix for conversation messages.
pub const PREFIX_MESSAGE: &str = "msg";

/// Prefix for conversation sessions.
pub const PREFIX_SESSION: &str = "ses";

/// Generate a prefixed random ID with an 8-char lowercase hex suffix.
///
/// Falls back to the low 32 bits of the current timestamp if the OS random
/// source is unavailable.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    let mut bytes = [0u8; 4];
    if getrandom::fill(&mut bytes).is_err() {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let low = nanos as u32;
        bytes = low.to_be_bytes();
    }
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("{prefix}-{hex}")
}

/// Format a sequential ID, zero-padded to four digits.
#[must_use]
pub fn sequence_id(prefix: &str, seq: u64) -> String {
    format!("{prefix}-{seq:04}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_id_correct_format() {
        let id = generate_id(PREFIX_WATCHLIST);
        assert!(id.starts_with("wl-"));
        let suffix = &id[3..];
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn generate_id_uniqueness() {
        let ids: std::collections::HashSet<String> =
            (0..64).map(|_| generate_id(PREFIX_WATCHLIST)).collect();
        assert!(ids.len() > 60);
    }

    #[test]
    fn sequence_id_pads() {
        assert_eq!(sequence_id(PREFIX_MESSAGE, 7), "msg-0007");
        assert_eq!(sequence_id(PREFIX_MESSAGE, 12345), "msg-12345");
    }
}
