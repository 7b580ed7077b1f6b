use crate::DownloadRef;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub busy: bool,
    pub download: Option<DownloadRef>,
    pub error: Option<String>,
    pub history: Vec<String>,
    pub history_error: Option<String>,
    pub history_loading: bool,
    pub identity: Option<String>,
    pub dirty: bool,
}
