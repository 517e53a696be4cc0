use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use stargazer_core::{update, AppOptions, AppState, Msg};
use stargazer_engine::{FetchHandle, FileStorage, StarredStore};
use stargazer_logging::{sg_info, sg_warn};

use crate::commands::{parse_command, Command, HELP};
use crate::config::{load_config, DEFAULT_CONFIG_FILENAME};
use crate::effects::{spawn_event_forwarder, EffectRunner};
use crate::logging::{self, LogDestination};
use crate::render::render;
use crate::session;

/// Browse the most starred GitHub repositories and keep a local starred list.
#[derive(Debug, Parser)]
#[command(name = "stargazer", version)]
pub struct Args {
    /// Page to open on (defaults to the last page viewed, then 1).
    #[arg(long)]
    pub page: Option<String>,
    /// Initial language filter, matched exactly.
    #[arg(long)]
    pub language: Option<String>,
    /// Path of the RON configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILENAME)]
    pub config: PathBuf,
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log_to: LogDestination,
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

pub enum AppEvent {
    Msg(Msg),
    Help,
    Invalid(String),
    Quit,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    logging::initialize(args.log_to, args.log_level);
    let config = load_config(&args.config);
    let data_dir = config.data_dir.clone();

    let store = StarredStore::new(FileStorage::new(&data_dir));
    let starred = store.load();
    let options = AppOptions {
        initial_page: session::initial_page(args.page.as_deref(), &data_dir),
        page_size: config.page_size(),
        language_filter: args.language.unwrap_or_default(),
    };
    sg_info!(
        "Starting on page {} with page size {}",
        options.initial_page,
        options.page_size
    );

    let (fetcher, events) = FetchHandle::spawn(config.search_settings())
        .context("failed to start the fetch worker")?;
    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_event_forwarder(events, tx.clone());
    spawn_input_reader(tx);

    let runner = EffectRunner::new(fetcher, store, data_dir);
    let (mut state, effects) = update(AppState::new(options, starred), Msg::Started);
    runner.run(effects);
    redraw(&mut state)?;

    while let Ok(event) = rx.recv() {
        match event {
            AppEvent::Msg(msg) => {
                let (next, effects) = update(state, msg);
                state = next;
                runner.run(effects);
                redraw(&mut state)?;
            }
            AppEvent::Help => println!("{HELP}"),
            AppEvent::Invalid(message) => println!("{message} (type 'help' for commands)"),
            AppEvent::Quit => break,
        }
    }

    sg_info!("Exiting");
    Ok(())
}

fn redraw(state: &mut AppState) -> io::Result<()> {
    if !state.consume_dirty() {
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", render(&state.view()))?;
    write!(stdout, "> ")?;
    stdout.flush()
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    sg_warn!("Failed to read input: {}", err);
                    break;
                }
            };
            let event = match parse_command(&line) {
                Ok(Some(Command::Dispatch(msg))) => AppEvent::Msg(msg),
                Ok(Some(Command::Help)) => AppEvent::Help,
                Ok(Some(Command::Quit)) => AppEvent::Quit,
                Ok(None) => continue,
                Err(message) => AppEvent::Invalid(message),
            };
            if tx.send(event).is_err() {
                return;
            }
        }
        let _ = tx.send(AppEvent::Quit);
    });
}
