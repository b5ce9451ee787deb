//! Error taxonomy for decoding and validating service data.

/// Errors produced by the pure core: field extraction, payload
/// decoding, and service result interpretation.
///
/// The variants are deliberately distinguishable so callers can tell a
/// data defect (`MissingField`, `MalformedField`, `PayloadDecode`) from
/// a business failure (`ServiceResult`) and choose to retry or abort;
/// the core itself never retries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A mandatory record field was absent from the payload.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// A record field was present but failed its format or range check.
    #[error("malformed field `{field}`: {reason}")]
    MalformedField {
        field: &'static str,
        reason: String,
    },

    /// The payload was structurally invalid and no envelope could be
    /// recovered from it.
    #[error("failed to decode payload: {0}")]
    PayloadDecode(String),

    /// The service answered with a non-success result code.
    #[error("service result {code}: {message}")]
    ServiceResult { code: String, message: String },
}
