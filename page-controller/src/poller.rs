use crate::surface::PageSurface;
use crate::view::SharedView;
use insight_core::{ClientConfig, ErrorExt, TaskStatus};
use std::sync::Arc;
use std::time::Duration;
use task_client::TaskApi;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub result_reveal_delay: Duration,
    pub panel_reveal_delay: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl PollSettings {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            interval: config.poll_interval(),
            result_reveal_delay: config.result_reveal_delay(),
            panel_reveal_delay: config.panel_reveal_delay(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Complete { report_url: Option<String> },
}

/// Status loop for one run.
pub struct Poller<A: TaskApi, S: PageSurface> {
    run_id: Uuid,
    api: Arc<A>,
    view: SharedView<S>,
    settings: PollSettings,
    recommendations_shown: bool,
}

impl<A: TaskApi + 'static, S: PageSurface> Poller<A, S> {
    pub fn new(run_id: Uuid, api: Arc<A>, view: SharedView<S>, settings: PollSettings) -> Self {
        Self {
            run_id,
            api,
            view,
            settings,
            recommendations_shown: false,
        }
    }

    pub fn recommendations_shown(&self) -> bool {
        self.recommendations_shown
    }

    /// Applies one status snapshot to the page.
    ///
    /// Returns whether a panel reveal was started alongside the outcome, so
    /// the caller can schedule the second reveal phase.
    pub async fn apply_status(&mut self, status: &TaskStatus) -> (TickOutcome, bool) {
        let mut view = self.view.lock().await;
        view.update_progress(&status.status, status.progress);

        let mut reveal_started = false;
        if !self.recommendations_shown {
            if let Some(recommendations) = status.recommendations() {
                if view.show_recommendations(recommendations) {
                    self.recommendations_shown = true;
                    reveal_started = true;
                }
            }
        }

        if status.is_complete() {
            view.prepare_report(status.report_url());
            let outcome = TickOutcome::Complete {
                report_url: status.report_url().map(str::to_string),
            };
            return (outcome, reveal_started);
        }

        (TickOutcome::Continue, reveal_started)
    }

    /// Polls until the task completes, a query fails, or `cancel` fires.
    pub async fn run(mut self, cancel: CancellationToken) {
        let period = self.settings.interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        debug!(run_id = %self.run_id, "Polling every {:?}", period);

        let report_url = loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(run_id = %self.run_id, "Polling cancelled");
                    return;
                }
                _ = ticker.tick() => {}
            }

            // A response that lands after cancellation belongs to a dead run.
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(run_id = %self.run_id, "Polling cancelled with a query in flight");
                    return;
                }
                result = self.api.task_status() => result,
            };

            let status = match result {
                Ok(status) => status,
                Err(e) => {
                    e.log_warn();
                    warn!(run_id = %self.run_id, "Status query failed, polling stopped");
                    let mut view = self.view.lock().await;
                    let message = view.messages().poll_failed.clone();
                    view.set_status_text(&message);
                    return;
                }
            };

            let (outcome, reveal_started) = self.apply_status(&status).await;
            if reveal_started {
                tokio::spawn(complete_panel_reveal(
                    self.view.clone(),
                    self.settings.panel_reveal_delay,
                    cancel.child_token(),
                ));
            }

            if let TickOutcome::Complete { report_url } = outcome {
                break report_url;
            }
        };

        info!(
            run_id = %self.run_id,
            report = report_url.as_deref().unwrap_or("<none>"),
            "Task finished, polling stopped"
        );

        tokio::select! {
            _ = cancel.cancelled() => {
                debug!(run_id = %self.run_id, "Result reveal cancelled");
            }
            _ = sleep(self.settings.result_reveal_delay) => {
                if let Err(e) = self.view.lock().await.reveal_result() {
                    e.log_warn();
                }
            }
        }
    }
}

async fn complete_panel_reveal<S: PageSurface>(
    view: SharedView<S>,
    delay: Duration,
    cancel: CancellationToken,
) {
    tokio::select! {
        _ = cancel.cancelled() => {}
        _ = sleep(delay) => {
            view.lock().await.complete_panel_reveal();
        }
    }
}
