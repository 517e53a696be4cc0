use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use stargazer_core::{Effect, Msg};
use stargazer_engine::{FetchEvent, FetchEvents, FetchHandle, FileStorage, StarredStore};
use stargazer_logging::{sg_debug, sg_error, sg_info};

use crate::app::AppEvent;
use crate::session;

/// Executes core effects against the engine and local storage.
pub struct EffectRunner {
    fetcher: FetchHandle,
    store: StarredStore<FileStorage>,
    data_dir: PathBuf,
}

impl EffectRunner {
    pub fn new(fetcher: FetchHandle, store: StarredStore<FileStorage>, data_dir: PathBuf) -> Self {
        Self {
            fetcher,
            store,
            data_dir,
        }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchRemote { request, query } => {
                    sg_info!(
                        "FetchRemote request={} page={} language={:?}",
                        request,
                        query.page,
                        query.language
                    );
                    self.fetcher.start(request, query);
                }
                Effect::CancelFetch { request } => {
                    sg_debug!("CancelFetch request={}", request);
                    self.fetcher.cancel(request);
                }
                Effect::PersistStarred(repos) => {
                    if let Err(err) = self.store.save_repos(&repos) {
                        sg_error!("{} ({:?})", err, self.store.storage().path());
                    }
                }
                Effect::PageChanged(page) => session::save_page(&self.data_dir, page),
            }
        }
    }
}

/// Forwards engine completions into the app's event channel.
pub fn spawn_event_forwarder(events: FetchEvents, tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            let FetchEvent::Completed { request, result } = event;
            let msg = Msg::RemoteLoaded {
                request,
                result: result.map_err(|err| err.message),
            };
            if tx.send(AppEvent::Msg(msg)).is_err() {
                break;
            }
        }
    });
}
