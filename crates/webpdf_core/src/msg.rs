#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User submitted the current input for PDF generation.
    SubmitClicked,
    /// Backend finished a generation cycle.
    GenerateDone {
        result: Result<crate::GenerateOutcome, String>,
    },
    /// User asked to see their request history.
    ShowHistoryClicked,
    /// Backend returned the ordered history list for our identity.
    HistoryLoaded(Vec<String>),
    /// History fetch failed; surfaced separately from generation errors.
    HistoryFailed(String),
    /// User clicked the history entry at this index.
    HistoryItemSelected(usize),
    /// Identity token loaded from local persistence at startup.
    IdentityRestored(String),
    /// Fallback for placeholder wiring.
    NoOp,
}
