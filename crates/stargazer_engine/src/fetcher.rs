use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use stargazer_core::{RemoteQuery, RequestId};
use stargazer_logging::{sg_debug, sg_warn};
use tokio_util::sync::CancellationToken;

use crate::search::{ReqwestSearch, SearchSettings};
use crate::{FetchEvent, RepoSearch, StartError};

enum FetchCommand {
    Start { request: RequestId, query: RemoteQuery },
    Cancel { request: RequestId },
    Shutdown,
}

/// Sends search requests to a background runtime.
///
/// Starting a request cancels the previous one. A request whose token was
/// cancelled never delivers an event, so only the most recently started
/// live request can reach [`FetchEvents`]. Dropping the handle cancels
/// whatever is outstanding.
pub struct FetchHandle {
    cmd_tx: mpsc::Sender<FetchCommand>,
}

/// Receiving side for completed requests.
pub struct FetchEvents {
    event_rx: mpsc::Receiver<FetchEvent>,
}

impl FetchHandle {
    /// Starts a worker backed by the HTTP search client.
    pub fn spawn(settings: SearchSettings) -> Result<(Self, FetchEvents), StartError> {
        let search = ReqwestSearch::new(settings).map_err(StartError::Client)?;
        Ok(Self::with_search(Arc::new(search))?)
    }

    /// Starts a worker backed by any search implementation.
    pub fn with_search(search: Arc<dyn RepoSearch>) -> io::Result<(Self, FetchEvents)> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::Builder::new()
            .name("stargazer-fetch".into())
            .spawn(move || run_worker(runtime, search, cmd_rx, event_tx))?;

        Ok((Self { cmd_tx }, FetchEvents { event_rx }))
    }

    pub fn start(&self, request: RequestId, query: RemoteQuery) {
        let _ = self.cmd_tx.send(FetchCommand::Start { request, query });
    }

    pub fn cancel(&self, request: RequestId) {
        let _ = self.cmd_tx.send(FetchCommand::Cancel { request });
    }
}

impl Drop for FetchHandle {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(FetchCommand::Shutdown);
    }
}

impl FetchEvents {
    /// Blocks until the next event; `None` once the worker has stopped.
    pub fn recv(&self) -> Option<FetchEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn run_worker(
    runtime: tokio::runtime::Runtime,
    search: Arc<dyn RepoSearch>,
    cmd_rx: mpsc::Receiver<FetchCommand>,
    event_tx: mpsc::Sender<FetchEvent>,
) {
    let mut live: Option<(RequestId, CancellationToken)> = None;

    while let Ok(command) = cmd_rx.recv() {
        match command {
            FetchCommand::Start { request, query } => {
                if let Some((previous, token)) = live.take() {
                    sg_debug!("request {} superseded by {}", previous, request);
                    token.cancel();
                }
                sg_debug!(
                    "request {} start page={} per_page={} language={:?}",
                    request,
                    query.page,
                    query.page_size,
                    query.language
                );
                let token = CancellationToken::new();
                live = Some((request, token.clone()));
                let search = search.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    run_request(search.as_ref(), request, query, token, event_tx).await;
                });
            }
            FetchCommand::Cancel { request } => {
                if live.as_ref().is_some_and(|(id, _)| *id == request) {
                    if let Some((_, token)) = live.take() {
                        sg_debug!("request {} cancelled", request);
                        token.cancel();
                    }
                }
            }
            FetchCommand::Shutdown => break,
        }
    }

    if let Some((request, token)) = live.take() {
        sg_debug!("request {} cancelled on shutdown", request);
        token.cancel();
    }
    runtime.shutdown_background();
}

async fn run_request(
    search: &dyn RepoSearch,
    request: RequestId,
    query: RemoteQuery,
    token: CancellationToken,
    event_tx: mpsc::Sender<FetchEvent>,
) {
    let result = search.search(&query).await;
    if token.is_cancelled() {
        sg_debug!("request {} finished after cancellation; result discarded", request);
        return;
    }
    if let Err(err) = &result {
        sg_warn!("request {} failed ({}): {}", request, err.kind, err.message);
    }
    let _ = event_tx.send(FetchEvent::Completed { request, result });
}
