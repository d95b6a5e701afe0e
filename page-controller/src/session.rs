use crate::poller::{PollSettings, Poller};
use crate::surface::PageSurface;
use crate::view::SharedView;
use std::sync::Arc;
use task_client::TaskApi;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

/// One run's status loop.
///
/// The session owns the loop's cancellation token; dropping or cancelling
/// the session stops the loop, including any delayed panel or result reveal
/// it still has pending.
#[derive(Debug)]
pub struct PollingSession {
    run_id: Uuid,
    cancel: CancellationToken,
    finished: CancellationToken,
    handle: JoinHandle<()>,
}

impl PollingSession {
    pub fn start<A, S>(
        run_id: Uuid,
        api: Arc<A>,
        view: SharedView<S>,
        settings: PollSettings,
    ) -> Self
    where
        A: TaskApi + 'static,
        S: PageSurface,
    {
        let cancel = CancellationToken::new();
        let finished = CancellationToken::new();

        let poller = Poller::new(run_id, api, view, settings);
        let loop_cancel = cancel.clone();
        let done = finished.clone().drop_guard();
        let handle = tokio::spawn(async move {
            let _done = done;
            poller.run(loop_cancel).await;
        });

        debug!(%run_id, "Polling session started");
        Self {
            run_id,
            cancel,
            finished,
            handle,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn cancel(&self) {
        if !self.cancel.is_cancelled() {
            debug!(run_id = %self.run_id, "Cancelling polling session");
        }
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_cancelled() || self.handle.is_finished()
    }

    /// Token that fires once the loop and its result reveal are done.
    pub fn finished(&self) -> CancellationToken {
        self.finished.clone()
    }
}

impl Drop for PollingSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
