/// Client error taxonomy: the core's decode/service kinds plus the two
/// kinds only the shell can produce.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Field, decode, or service-result failure from the core.
    #[error(transparent)]
    Core(#[from] lunisol_core::Error),

    /// Failure inside the transport collaborator, propagated unchanged.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A single-date query answered with anything but one record.
    #[error("expected exactly one calendar record, found {0}")]
    UnexpectedCount(usize),
}

/// Opaque transport failure.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self(err.to_string())
    }
}
