//! webpdf backend: HTTP client, local download store, and the
//! command/event bridge the app polls.
mod client;
mod download;
mod filename;
mod handle;
mod types;

pub use client::{ClientSettings, PdfBackend, ReqwestBackend};
pub use download::{ensure_download_dir, DownloadError, DownloadHandle, DownloadStore};
pub use filename::{descriptor_filename, pdf_filename};
pub use handle::BackendHandle;
pub use types::{BackendError, ClientEvent, FailureKind, GenerateReply, GeneratedPdf};
