use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use client_logging::{client_info, client_warn};
use webpdf_backend::{BackendHandle, ClientEvent, ClientSettings, DownloadStore};
use webpdf_core::{DownloadRef, Effect, GenerateOutcome, Msg};

use crate::persistence;

pub struct EffectRunner {
    handle: BackendHandle,
    store: DownloadStore,
    state_dir: PathBuf,
}

impl EffectRunner {
    pub fn new(
        msg_tx: mpsc::Sender<Msg>,
        settings: ClientSettings,
        download_dir: PathBuf,
        state_dir: PathBuf,
    ) -> Self {
        let store = DownloadStore::new(download_dir);
        let handle = BackendHandle::new(settings, store.clone());
        let runner = Self {
            handle,
            store,
            state_dir,
        };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartGenerate { url, identity } => {
                    client_info!(
                        "StartGenerate url={} identity_known={}",
                        url,
                        identity.is_some()
                    );
                    self.handle.generate(url, identity);
                }
                Effect::FetchHistory { identity } => {
                    self.handle.fetch_history(identity);
                }
                Effect::PersistIdentity { token } => {
                    persistence::save_identity(&self.state_dir, &token);
                }
                Effect::ReleaseDownload { download } => {
                    if let Err(err) = self.store.release(Path::new(&download.path)) {
                        client_warn!("Failed to release {}: {}", download.path, err);
                    }
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let handle = self.handle.clone();
        thread::spawn(move || loop {
            if let Some(event) = handle.try_recv() {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::GenerateCompleted { result } => Msg::GenerateDone {
            result: result
                .map(|generated| GenerateOutcome {
                    download: DownloadRef {
                        path: generated.download.path.to_string_lossy().into_owned(),
                        byte_len: generated.download.byte_len,
                    },
                    issued_identity: generated.issued_identity,
                })
                .map_err(|err| err.to_string()),
        },
        ClientEvent::HistoryCompleted { result } => match result {
            Ok(urls) => Msg::HistoryLoaded(urls),
            Err(err) => {
                client_warn!("History fetch failed: {}", err);
                Msg::HistoryFailed(err.to_string())
            }
        },
    }
}
