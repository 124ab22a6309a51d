use thiserror::Error;

/// Why a well-formed provider response still produced nothing to export.
///
/// These are expected outcomes (delisted symbols, weekend-only ranges, ...) and are
/// reported as skips rather than failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NoDataReason {
    /// The body has no `results` key at all.
    #[error("'results' key not found in data: {body}")]
    MissingResults { body: String },

    /// `results` is present but null or empty.
    #[error("no historical data available")]
    EmptyResults,

    /// At least one row has no `t` (timestamp) field.
    #[error("timestamp column not found in data (row {row})")]
    MissingTimestamp { row: usize },

    /// A row's `t` value cannot be represented as a datetime.
    #[error("timestamp {timestamp_ms} in row {row} is out of range")]
    InvalidTimestamp { row: usize, timestamp_ms: i64 },
}

/// Longest response excerpt carried in log messages.
pub(crate) const BODY_EXCERPT_LEN: usize = 512;

/// Cuts a response body down for logging, on a char boundary.
pub(crate) fn excerpt(body: &str) -> String {
    if body.len() <= BODY_EXCERPT_LEN {
        return body.to_string();
    }
    let mut end = BODY_EXCERPT_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_keeps_short_bodies() {
        assert_eq!(excerpt(r#"{"status":"OK"}"#), r#"{"status":"OK"}"#);
    }

    #[test]
    fn excerpt_truncates_on_char_boundary() {
        let body = "é".repeat(BODY_EXCERPT_LEN);
        let out = excerpt(&body);
        assert!(out.ends_with("..."));
        assert!(out.len() <= BODY_EXCERPT_LEN + 3);
    }
}
