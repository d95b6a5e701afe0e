//! Fakes shared by the controller tests.

use crate::surface::{BlocklistTag, PageSurface, PageUpdate, PanelState, Region, ReportLink};
use async_trait::async_trait;
use insight_core::{
    CoreError, SubredditRecommendation, TaskAck, TaskApiError, TaskRequest, TaskStatus,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use task_client::TaskApi;
use tokio::sync::Notify;

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    updates: Arc<Mutex<Vec<PageUpdate>>>,
}

impl PageSurface for RecordingSurface {
    fn apply(&mut self, update: PageUpdate) {
        self.updates.lock().unwrap().push(update);
    }
}

impl RecordingSurface {
    pub fn updates(&self) -> Vec<PageUpdate> {
        self.updates.lock().unwrap().clone()
    }

    pub fn visible_regions(&self) -> Vec<Region> {
        let mut visible = [false; 3];
        for update in self.updates() {
            if let PageUpdate::Region { region, visible: on } = update {
                let index = Region::ALL.iter().position(|r| *r == region).unwrap();
                visible[index] = on;
            }
        }
        Region::ALL
            .iter()
            .zip(visible)
            .filter(|(_, on)| *on)
            .map(|(region, _)| *region)
            .collect()
    }

    pub fn recommendation_lists(&self) -> Vec<Vec<String>> {
        self.updates()
            .into_iter()
            .filter_map(|update| match update {
                PageUpdate::Recommendations(entries) => Some(entries),
                _ => None,
            })
            .collect()
    }

    pub fn panel_history(&self) -> Vec<PanelState> {
        self.updates()
            .into_iter()
            .filter_map(|update| match update {
                PageUpdate::Panel(panel) => Some(panel),
                _ => None,
            })
            .collect()
    }

    pub fn last_panel(&self) -> Option<PanelState> {
        self.panel_history().pop()
    }

    pub fn last_report_link(&self) -> Option<ReportLink> {
        self.updates().into_iter().rev().find_map(|update| match update {
            PageUpdate::ReportLink(link) => Some(link),
            _ => None,
        })
    }

    pub fn last_progress(&self) -> Option<u8> {
        self.updates().into_iter().rev().find_map(|update| match update {
            PageUpdate::ProgressWidth(width) => Some(width),
            _ => None,
        })
    }

    pub fn last_status_text(&self) -> Option<String> {
        self.updates().into_iter().rev().find_map(|update| match update {
            PageUpdate::StatusText(text) => Some(text),
            _ => None,
        })
    }

    pub fn last_tags(&self) -> Option<Vec<BlocklistTag>> {
        self.updates().into_iter().rev().find_map(|update| match update {
            PageUpdate::BlocklistTags(tags) => Some(tags),
            _ => None,
        })
    }

    pub fn last_timeframe_enabled(&self) -> Option<bool> {
        self.updates().into_iter().rev().find_map(|update| match update {
            PageUpdate::TimeframeEnabled(enabled) => Some(enabled),
            _ => None,
        })
    }

    pub fn alerts(&self) -> Vec<String> {
        self.updates()
            .into_iter()
            .filter_map(|update| match update {
                PageUpdate::Alert(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&PageUpdate) -> bool) -> usize {
        self.updates().iter().filter(|update| predicate(update)).count()
    }
}

#[derive(Debug, Clone)]
pub enum ScriptedPoll {
    Status(TaskStatus),
    Fail,
}

pub fn status(progress: u8) -> TaskStatus {
    TaskStatus {
        status: format!("working {}%", progress),
        progress,
        ai_subreddits: None,
        report_url: None,
    }
}

pub fn with_recommendations(mut status: TaskStatus) -> TaskStatus {
    status.ai_subreddits = Some(vec![
        SubredditRecommendation {
            name: "HomeImprovement".to_string(),
            translation: "家装".to_string(),
        },
        SubredditRecommendation {
            name: "InteriorDesign".to_string(),
            translation: "室内设计".to_string(),
        },
    ]);
    status
}

pub fn with_report(mut status: TaskStatus, url: &str) -> TaskStatus {
    status.report_url = Some(url.to_string());
    status
}

/// In-memory backend. Once the poll script runs dry it keeps reporting an
/// unfinished task.
/// Outcome of one `start_task` call, consumed in call order.
pub struct ScriptedStart {
    pub gate: Option<Arc<Notify>>,
    pub fail: bool,
}

#[derive(Default)]
pub struct ScriptedApi {
    starts: Mutex<VecDeque<ScriptedStart>>,
    start_failures: Mutex<VecDeque<bool>>,
    polls: Mutex<VecDeque<ScriptedPoll>>,
    requests: Mutex<Vec<TaskRequest>>,
    start_gate: Option<Arc<Notify>>,
    start_calls: AtomicUsize,
    status_calls: AtomicUsize,
}

impl ScriptedApi {
    pub fn new(polls: Vec<ScriptedPoll>) -> Self {
        Self {
            polls: Mutex::new(polls.into()),
            ..Self::default()
        }
    }

    /// `start_task` waits for the gate before answering.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.start_gate = Some(gate);
        self
    }

    pub fn failing_start(self) -> Self {
        self.start_failures.lock().unwrap().push_back(true);
        self
    }

    /// Queues the outcome of the next unscripted `start_task` call, with its
    /// own gate.
    pub fn then_start(self, gate: Option<Arc<Notify>>, fail: bool) -> Self {
        self.starts
            .lock()
            .unwrap()
            .push_back(ScriptedStart { gate, fail });
        self
    }

    pub fn push_polls(&self, polls: Vec<ScriptedPoll>) {
        self.polls.lock().unwrap().extend(polls);
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<TaskRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskApi for ScriptedApi {
    async fn start_task(&self, request: &TaskRequest) -> Result<TaskAck, CoreError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let scripted = self.starts.lock().unwrap().pop_front();
        let fail = match scripted {
            Some(ScriptedStart { gate, fail }) => {
                if let Some(gate) = gate {
                    gate.notified().await;
                }
                fail
            }
            None => {
                if let Some(gate) = &self.start_gate {
                    gate.notified().await;
                }
                self.start_failures.lock().unwrap().pop_front().unwrap_or(false)
            }
        };
        if fail {
            return Err(CoreError::TaskApi(TaskApiError::StartRejected {
                status_code: 500,
            }));
        }
        Ok(TaskAck {
            message: "任务已成功启动".to_string(),
        })
    }

    async fn task_status(&self) -> Result<TaskStatus, CoreError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.polls.lock().unwrap().pop_front();
        match next {
            Some(ScriptedPoll::Status(status)) => Ok(status),
            Some(ScriptedPoll::Fail) => Err(CoreError::TaskApi(TaskApiError::StatusUnavailable {
                status_code: 502,
            })),
            None => Ok(status(50)),
        }
    }
}
