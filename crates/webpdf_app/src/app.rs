use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use webpdf_backend::ClientSettings;
use webpdf_core::{update, AppState, Msg};

use crate::effects::EffectRunner;
use crate::logging::{self, LogDestination};
use crate::persistence;
use crate::render;

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);

    let state_dir = std::env::current_dir().context("resolve working directory")?;
    let download_dir = state_dir.join("downloads");

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(
        msg_tx.clone(),
        ClientSettings::default(),
        download_dir,
        state_dir.clone(),
    );

    let identity = persistence::load_or_create_identity(&state_dir);
    let _ = msg_tx.send(Msg::IdentityRestored(identity));

    let quitting = Arc::new(AtomicBool::new(false));
    spawn_input_reader(msg_tx, quitting.clone());

    println!("webpdf: enter a URL to generate a PDF of that page.");
    println!("Commands: history, pick <n>, quit.");

    let mut state = AppState::new();
    while !quitting.load(Ordering::Relaxed) {
        let Ok(msg) = msg_rx.recv() else { break };
        let (next, effects) = update(std::mem::take(&mut state), msg);
        state = next;
        runner.enqueue(effects);
        if state.consume_dirty() {
            render::render(&state.view());
        }
    }

    Ok(())
}

enum Command {
    Quit,
    ShowHistory,
    Pick(usize),
    Submit(String),
}

/// Turns stdin lines into messages on a dedicated thread so the main
/// loop can block on its message channel.
fn spawn_input_reader(msg_tx: mpsc::Sender<Msg>, quitting: Arc<AtomicBool>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let msg = match parse_command(trimmed) {
                Command::Quit => break,
                Command::ShowHistory => Msg::ShowHistoryClicked,
                Command::Pick(index) => Msg::HistoryItemSelected(index),
                Command::Submit(url) => {
                    if msg_tx.send(Msg::InputChanged(url)).is_err() {
                        break;
                    }
                    Msg::SubmitClicked
                }
            };
            if msg_tx.send(msg).is_err() {
                break;
            }
        }
        // Wake the main loop so it notices the flag.
        quitting.store(true, Ordering::Relaxed);
        let _ = msg_tx.send(Msg::NoOp);
    });
}

fn parse_command(line: &str) -> Command {
    if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
        return Command::Quit;
    }
    if line.eq_ignore_ascii_case("history") {
        return Command::ShowHistory;
    }
    if let Some(rest) = line.strip_prefix("pick ") {
        if let Ok(number) = rest.trim().parse::<usize>() {
            // History entries are presented 1-based.
            return Command::Pick(number.saturating_sub(1));
        }
    }
    Command::Submit(line.to_string())
}
