use crate::blocklist::BlocklistStore;
use insight_core::{CoreError, SortOrder, TaskRequest, Timeframe};

/// Current values of the research form inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub keyword: String,
    pub timeframe: Timeframe,
    pub sort_order: SortOrder,
    pub subreddits: String,
    pub limit: String,
    pub analysis_mode: Option<String>,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            timeframe: Timeframe::default(),
            sort_order: SortOrder::default(),
            subreddits: "smart".to_string(),
            limit: "10".to_string(),
            analysis_mode: Some("pain_points".to_string()),
        }
    }
}

impl TaskForm {
    /// The timeframe input is only meaningful for orderings that honour it.
    pub fn timeframe_enabled(&self) -> bool {
        self.sort_order.uses_timeframe()
    }

    /// Snapshots the form and blocklist into a request body.
    pub fn to_request(&self, blocklist: &BlocklistStore) -> Result<TaskRequest, CoreError> {
        let keyword = self.keyword.trim();
        if keyword.is_empty() {
            return Err(CoreError::InvalidInput {
                message: "keyword must not be empty".to_string(),
            });
        }

        Ok(TaskRequest {
            keyword: keyword.to_string(),
            timeframe: self.timeframe,
            sort_order: self.sort_order,
            subreddits: self.subreddits.clone(),
            limit: self.limit.clone(),
            analysis_mode: self.analysis_mode.clone(),
            blocked_keywords: Some(blocklist.snapshot()),
        })
    }
}
