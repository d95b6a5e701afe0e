use crate::error::CoreError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Progress value at which a run is finished.
pub const PROGRESS_COMPLETE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Hour,
    Day,
    Week,
    Month,
    #[default]
    Year,
    All,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Hour => "hour",
            Timeframe::Day => "day",
            Timeframe::Week => "week",
            Timeframe::Month => "month",
            Timeframe::Year => "year",
            Timeframe::All => "all",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hour" => Ok(Timeframe::Hour),
            "day" => Ok(Timeframe::Day),
            "week" => Ok(Timeframe::Week),
            "month" => Ok(Timeframe::Month),
            "year" => Ok(Timeframe::Year),
            "all" => Ok(Timeframe::All),
            other => Err(CoreError::InvalidInput {
                message: format!("unknown timeframe '{}'", other),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Relevance,
    Hot,
    Top,
    New,
    Comments,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::Hot => "hot",
            SortOrder::Top => "top",
            SortOrder::New => "new",
            SortOrder::Comments => "comments",
        }
    }

    /// Whether the backend honours a timeframe for this ordering.
    /// `hot` and `new` listings are always "now".
    pub fn uses_timeframe(&self) -> bool {
        !matches!(self, SortOrder::Hot | SortOrder::New)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relevance" => Ok(SortOrder::Relevance),
            "hot" => Ok(SortOrder::Hot),
            "top" => Ok(SortOrder::Top),
            "new" => Ok(SortOrder::New),
            "comments" => Ok(SortOrder::Comments),
            other => Err(CoreError::InvalidInput {
                message: format!("unknown sort order '{}'", other),
            }),
        }
    }
}

/// Body of `POST /start-task`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRequest {
    pub keyword: String,
    pub timeframe: Timeframe,
    pub sort_order: SortOrder,
    pub subreddits: String,
    pub limit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_keywords: Option<Vec<String>>,
}

/// Acknowledgement returned by `POST /start-task`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskAck {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubredditRecommendation {
    pub name: String,
    #[serde(default)]
    pub translation: String,
}

impl SubredditRecommendation {
    pub fn display_label(&self) -> String {
        format!("r/{} ({})", self.name, self.translation)
    }
}

/// Snapshot returned by `GET /task-status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "deserialize_progress")]
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_subreddits: Option<Vec<SubredditRecommendation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_url: Option<String>,
}

impl TaskStatus {
    pub fn is_complete(&self) -> bool {
        self.progress >= PROGRESS_COMPLETE
    }

    /// Report location, treating an empty string the same as a missing one.
    pub fn report_url(&self) -> Option<&str> {
        self.report_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Recommendations worth rendering; an empty list counts as none.
    pub fn recommendations(&self) -> Option<&[SubredditRecommendation]> {
        self.ai_subreddits
            .as_deref()
            .filter(|list| !list.is_empty())
    }
}

fn deserialize_progress<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if raw.is_nan() {
        return Ok(0);
    }
    Ok(raw.round().clamp(0.0, PROGRESS_COMPLETE as f64) as u8)
}
