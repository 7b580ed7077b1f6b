use crate::view_model::AppViewModel;

/// Local handle to a generated PDF saved on disk, ready for the user
/// to open or copy. Exactly one of these is live at a time; the
/// previous one is released before a replacement is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRef {
    pub path: String,
    pub byte_len: u64,
}

/// Payload of a successful generation cycle.
///
/// `issued_identity` is set when the backend assigned a user id in its
/// response; the core adopts it only if it holds none yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    pub download: DownloadRef,
    pub issued_identity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    busy: bool,
    download: Option<DownloadRef>,
    error: Option<String>,
    history: Vec<String>,
    history_error: Option<String>,
    history_loading: bool,
    history_refresh_queued: bool,
    identity: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            input: self.input.clone(),
            busy: self.busy,
            download: self.download.clone(),
            error: self.error.clone(),
            history: self.history.clone(),
            history_error: self.history_error.clone(),
            history_loading: self.history_loading,
            identity: self.identity.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.busy
    }

    pub(crate) fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub(crate) fn history_item(&self, index: usize) -> Option<&str> {
        self.history.get(index).map(String::as_str)
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.dirty = true;
        }
    }

    /// Enters the Submitting state. Clears the prior error and takes
    /// the prior download so the caller can release it.
    pub(crate) fn begin_submission(&mut self) -> Option<DownloadRef> {
        self.busy = true;
        self.error = None;
        self.dirty = true;
        self.download.take()
    }

    pub(crate) fn finish_success(&mut self, download: DownloadRef) {
        self.busy = false;
        self.error = None;
        self.download = Some(download);
        self.dirty = true;
    }

    pub(crate) fn finish_failure(&mut self, message: String) {
        self.busy = false;
        self.error = Some(message);
        self.dirty = true;
    }

    /// Adopts a server-issued identity. Returns false if one is
    /// already held; an existing identity is never reassigned.
    pub(crate) fn adopt_identity(&mut self, token: String) -> bool {
        if self.identity.is_some() || token.is_empty() {
            return false;
        }
        self.identity = Some(token);
        self.dirty = true;
        true
    }

    /// Marks a history fetch in flight. Returns false if one already
    /// is, so overlapping fetches collapse to one.
    pub(crate) fn begin_history_fetch(&mut self) -> bool {
        if self.history_loading {
            return false;
        }
        self.history_loading = true;
        self.dirty = true;
        true
    }

    /// Remembers that a refresh is wanted once the in-flight history
    /// fetch completes, so a generation finishing mid-fetch still
    /// shows up.
    pub(crate) fn queue_history_refresh(&mut self) {
        self.history_refresh_queued = true;
    }

    pub(crate) fn take_history_refresh(&mut self) -> bool {
        std::mem::take(&mut self.history_refresh_queued)
    }

    /// Wholesale replacement of the cached history; never a merge.
    pub(crate) fn apply_history(&mut self, urls: Vec<String>) {
        self.history = urls;
        self.history_error = None;
        self.history_loading = false;
        self.dirty = true;
    }

    pub(crate) fn apply_history_failure(&mut self, message: String) {
        self.history_error = Some(message);
        self.history_loading = false;
        self.dirty = true;
    }
}
