//! Error types for the login client.

use thiserror::Error;

/// Errors produced by the login client.
///
/// Every operation is a single blocking network call; failures split into
/// the transport failing outright and the remote side answering in a shape
/// the handshake cannot use.
#[derive(Debug, Error)]
pub enum QrLoginError {
    /// The HTTP request itself failed (connect, TLS, timeout, transport).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The remote endpoint answered, but not in the shape the handshake
    /// requires: unexpected status, missing cookie, missing payload.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl From<ureq::Error> for QrLoginError {
    fn from(e: ureq::Error) -> Self {
        QrLoginError::Http(e.to_string())
    }
}
