use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            let url = state.input().trim().to_string();
            // Empty input never submits; busy blocks resubmission
            // until the in-flight cycle completes.
            if url.is_empty() || state.is_busy() {
                return (state, Vec::new());
            }

            let mut effects = Vec::with_capacity(2);
            if let Some(download) = state.begin_submission() {
                effects.push(Effect::ReleaseDownload { download });
            }
            effects.push(Effect::StartGenerate {
                url,
                identity: state.identity().map(ToOwned::to_owned),
            });
            effects
        }
        Msg::GenerateDone { result } => {
            if !state.is_busy() {
                // Stale completion: drop it, but release the file a
                // successful payload carries so nothing leaks on disk.
                let effects = match result {
                    Ok(outcome) => vec![Effect::ReleaseDownload {
                        download: outcome.download,
                    }],
                    Err(_) => Vec::new(),
                };
                return (state, effects);
            }

            match result {
                Ok(outcome) => {
                    let mut effects = Vec::new();
                    if let Some(token) = outcome.issued_identity {
                        if state.adopt_identity(token.clone()) {
                            effects.push(Effect::PersistIdentity { token });
                        }
                    }
                    state.finish_success(outcome.download);
                    // Successful generation refreshes the history for
                    // whichever identity is active now.
                    let identity = state.identity().map(ToOwned::to_owned);
                    if let Some(identity) = identity {
                        if state.begin_history_fetch() {
                            effects.push(Effect::FetchHistory { identity });
                        } else {
                            // A fetch is already in flight; refresh
                            // again once it completes so the new URL
                            // shows up.
                            state.queue_history_refresh();
                        }
                    }
                    effects
                }
                Err(message) => {
                    state.finish_failure(message);
                    Vec::new()
                }
            }
        }
        Msg::ShowHistoryClicked => {
            // No identity means no history to fetch; silently skip.
            let Some(identity) = state.identity().map(ToOwned::to_owned) else {
                return (state, Vec::new());
            };
            if state.begin_history_fetch() {
                vec![Effect::FetchHistory { identity }]
            } else {
                Vec::new()
            }
        }
        Msg::HistoryLoaded(urls) => {
            state.apply_history(urls);
            follow_up_history_fetch(&mut state)
        }
        Msg::HistoryFailed(message) => {
            state.apply_history_failure(message);
            follow_up_history_fetch(&mut state)
        }
        Msg::HistoryItemSelected(index) => {
            if let Some(item) = state.history_item(index).map(ToOwned::to_owned) {
                state.set_input(item);
            }
            Vec::new()
        }
        Msg::IdentityRestored(token) => {
            state.adopt_identity(token);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Emits the single queued refresh, if any, once a history fetch
/// completes. At most one is queued per generation, so this cannot
/// loop on persistent failures.
fn follow_up_history_fetch(state: &mut AppState) -> Vec<Effect> {
    if !state.take_history_refresh() {
        return Vec::new();
    }
    let Some(identity) = state.identity().map(ToOwned::to_owned) else {
        return Vec::new();
    };
    if state.begin_history_fetch() {
        vec![Effect::FetchHistory { identity }]
    } else {
        Vec::new()
    }
}
