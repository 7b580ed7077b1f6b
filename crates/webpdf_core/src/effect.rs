use crate::DownloadRef;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the backend to render `url` as a PDF, on behalf of
    /// `identity` when one is known.
    StartGenerate {
        url: String,
        identity: Option<String>,
    },
    /// Fetch the ordered URL history for `identity`.
    FetchHistory { identity: String },
    /// Write the identity token to local persistence.
    PersistIdentity { token: String },
    /// Delete a superseded or orphaned download file.
    ReleaseDownload { download: DownloadRef },
}
