use std::fmt;

use crate::download::DownloadHandle;

/// Success reply of the generate endpoint, in either of the two
/// contracts the service speaks: raw PDF bytes, or a JSON descriptor
/// naming the issued identity and the stored file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateReply {
    Pdf { bytes: Vec<u8> },
    Descriptor { user_id: String, file: String },
}

/// Outcome of a full generation cycle, with the PDF already saved
/// locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPdf {
    pub download: DownloadHandle,
    pub issued_identity: Option<String>,
}

/// Completion events polled by the app loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    GenerateCompleted {
        result: Result<GeneratedPdf, BackendError>,
    },
    HistoryCompleted {
        result: Result<Vec<String>, BackendError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    pub kind: FailureKind,
    pub message: String,
}

impl BackendError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    MalformedBody,
    Storage,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::Storage => write!(f, "local storage error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
