use std::sync::Once;

use webpdf_core::{update, AppState, Effect, Msg};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn with_identity() -> AppState {
    let (state, _) = update(AppState::new(), Msg::IdentityRestored("abc".to_string()));
    state
}

#[test]
fn history_fetch_without_identity_is_a_silent_noop() {
    init_logging();
    let state = AppState::new();
    let before = state.view();

    let (next, effects) = update(state, Msg::ShowHistoryClicked);

    assert_eq!(next.view(), before);
    assert!(effects.is_empty());
}

#[test]
fn history_fetch_with_identity_emits_effect() {
    init_logging();
    let (next, effects) = update(with_identity(), Msg::ShowHistoryClicked);

    assert!(next.view().history_loading);
    assert_eq!(
        effects,
        vec![Effect::FetchHistory {
            identity: "abc".to_string(),
        }]
    );
}

#[test]
fn overlapping_history_fetches_collapse_to_one() {
    init_logging();
    let (state, _) = update(with_identity(), Msg::ShowHistoryClicked);
    let (next, effects) = update(state, Msg::ShowHistoryClicked);

    assert!(next.view().history_loading);
    assert!(effects.is_empty());
}

#[test]
fn loaded_history_replaces_cache_wholesale() {
    init_logging();
    let (state, _) = update(
        with_identity(),
        Msg::HistoryLoaded(vec![
            "https://a.example.com".to_string(),
            "https://b.example.com".to_string(),
        ]),
    );
    assert_eq!(state.view().history.len(), 2);

    // An empty response empties the cache too; never a merge.
    let (next, effects) = update(state, Msg::HistoryLoaded(Vec::new()));
    assert!(next.view().history.is_empty());
    assert!(!next.view().history_loading);
    assert!(effects.is_empty());
}

#[test]
fn history_failure_is_surfaced_and_cache_kept() {
    init_logging();
    let (state, _) = update(
        with_identity(),
        Msg::HistoryLoaded(vec!["https://a.example.com".to_string()]),
    );

    let (next, _) = update(state, Msg::HistoryFailed("http status 502".to_string()));
    let view = next.view();

    assert_eq!(view.history_error.as_deref(), Some("http status 502"));
    assert_eq!(view.history, vec!["https://a.example.com".to_string()]);
    assert!(!view.history_loading);
}

#[test]
fn loaded_history_clears_a_prior_history_error() {
    init_logging();
    let (state, _) = update(with_identity(), Msg::HistoryFailed("timeout".to_string()));
    let (next, _) = update(state, Msg::HistoryLoaded(Vec::new()));

    assert!(next.view().history_error.is_none());
}

#[test]
fn generation_finishing_mid_fetch_refreshes_once_more() {
    init_logging();
    let (state, _) = update(with_identity(), Msg::ShowHistoryClicked);

    // A generation completes while the manual fetch is in flight; its
    // refresh cannot start yet.
    let (state, _) = update(state, Msg::InputChanged("https://new.example.com".to_string()));
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, effects) = update(
        state,
        Msg::GenerateDone {
            result: Ok(webpdf_core::GenerateOutcome {
                download: webpdf_core::DownloadRef {
                    path: "out/new.pdf".to_string(),
                    byte_len: 512,
                },
                issued_identity: None,
            }),
        },
    );
    assert!(effects.is_empty());

    // The in-flight fetch completing triggers the queued refresh, so
    // the new URL is picked up without another manual fetch.
    let (next, effects) = update(
        state,
        Msg::HistoryLoaded(vec!["https://old.example.com".to_string()]),
    );
    assert!(next.view().history_loading);
    assert_eq!(
        effects,
        vec![Effect::FetchHistory {
            identity: "abc".to_string(),
        }]
    );

    // The follow-up fires once; the next completion is quiet.
    let (_, effects) = update(
        next,
        Msg::HistoryLoaded(vec![
            "https://new.example.com".to_string(),
            "https://old.example.com".to_string(),
        ]),
    );
    assert!(effects.is_empty());
}

#[test]
fn selecting_a_history_item_copies_it_into_the_input() {
    init_logging();
    let (state, _) = update(
        with_identity(),
        Msg::HistoryLoaded(vec![
            "https://a.example.com".to_string(),
            "https://b.example.com".to_string(),
        ]),
    );

    let (next, effects) = update(state, Msg::HistoryItemSelected(1));

    assert_eq!(next.view().input, "https://b.example.com");
    assert!(effects.is_empty());
}

#[test]
fn selecting_out_of_range_is_a_noop() {
    init_logging();
    let (state, _) = update(
        with_identity(),
        Msg::HistoryLoaded(vec!["https://a.example.com".to_string()]),
    );
    let before = state.view();

    let (next, effects) = update(state, Msg::HistoryItemSelected(5));

    assert_eq!(next.view().input, before.input);
    assert!(effects.is_empty());
}
