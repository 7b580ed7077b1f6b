use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use client_logging::{client_info, client_warn};

use crate::client::{ClientSettings, PdfBackend, ReqwestBackend};
use crate::download::{DownloadHandle, DownloadStore};
use crate::filename::{descriptor_filename, pdf_filename};
use crate::types::{BackendError, ClientEvent, FailureKind, GenerateReply, GeneratedPdf};

enum BackendCommand {
    Generate {
        url: String,
        identity: Option<String>,
    },
    FetchHistory {
        identity: String,
    },
}

#[derive(Clone)]
pub struct BackendHandle {
    cmd_tx: mpsc::Sender<BackendCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<ClientEvent>>>,
}

impl BackendHandle {
    pub fn new(settings: ClientSettings, store: DownloadStore) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let backend = Arc::new(ReqwestBackend::new(settings));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let store = store.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), &store, command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn generate(&self, url: impl Into<String>, identity: Option<String>) {
        let _ = self.cmd_tx.send(BackendCommand::Generate {
            url: url.into(),
            identity,
        });
    }

    pub fn fetch_history(&self, identity: impl Into<String>) {
        let _ = self.cmd_tx.send(BackendCommand::FetchHistory {
            identity: identity.into(),
        });
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    backend: &dyn PdfBackend,
    store: &DownloadStore,
    command: BackendCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    match command {
        BackendCommand::Generate { url, identity } => {
            let result = run_generate(backend, store, &url, identity.as_deref()).await;
            if let Err(err) = &result {
                client_warn!("Generation for {} failed: {}", url, err);
            }
            let _ = event_tx.send(ClientEvent::GenerateCompleted { result });
        }
        BackendCommand::FetchHistory { identity } => {
            let result = backend.history(&identity).await;
            let _ = event_tx.send(ClientEvent::HistoryCompleted { result });
        }
    }
}

/// One full generation cycle: the generate request, the follow-up
/// file download when the reply is a descriptor, then the local save.
async fn run_generate(
    backend: &dyn PdfBackend,
    store: &DownloadStore,
    url: &str,
    identity: Option<&str>,
) -> Result<GeneratedPdf, BackendError> {
    match backend.generate(url, identity).await? {
        GenerateReply::Pdf { bytes } => {
            let download = save(store, &pdf_filename(url), &bytes)?;
            client_info!("Saved {} bytes to {:?}", download.byte_len, download.path);
            Ok(GeneratedPdf {
                download,
                issued_identity: None,
            })
        }
        GenerateReply::Descriptor { user_id, file } => {
            let bytes = backend.download(&file).await?;
            let download = save(store, &descriptor_filename(&file), &bytes)?;
            client_info!("Saved {} bytes to {:?}", download.byte_len, download.path);
            Ok(GeneratedPdf {
                download,
                issued_identity: Some(user_id),
            })
        }
    }
}

fn save(
    store: &DownloadStore,
    filename: &str,
    bytes: &[u8],
) -> Result<DownloadHandle, BackendError> {
    store
        .save(filename, bytes)
        .map_err(|err| BackendError::new(FailureKind::Storage, err.to_string()))
}
