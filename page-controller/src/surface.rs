//! The page template the controller drives.
//!
//! The controller never touches markup itself. Every visible change is a
//! [`PageUpdate`] handed to a [`PageSurface`], which owns the actual
//! elements (form, progress and result containers, the recommendation
//! panel, the report link, the blocklist widgets).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Form,
    Progress,
    Result,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Form, Region::Progress, Region::Result];
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Form => f.write_str("form"),
            Region::Progress => f.write_str("progress"),
            Region::Result => f.write_str("result"),
        }
    }
}

/// Recommendation panel visibility.
///
/// `Revealing` is the unhidden-but-not-yet-styled phase that lets a CSS
/// transition animate the panel in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Hidden,
    Revealing,
    Visible,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReportLink {
    /// Default styling, no target yet.
    #[default]
    Pending,
    Live { href: String, label: String, new_context: bool },
    Disabled { label: String },
}

impl ReportLink {
    pub fn is_live(&self) -> bool {
        matches!(self, ReportLink::Live { .. })
    }
}

/// A blocklist tag; `remove_word` is what its removal control dispatches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlocklistTag {
    pub label: String,
    pub remove_word: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageUpdate {
    Region { region: Region, visible: bool },
    Panel(PanelState),
    StatusText(String),
    ProgressWidth(u8),
    ReportLink(ReportLink),
    Recommendations(Vec<String>),
    /// Full replacement of the tag container.
    BlocklistTags(Vec<BlocklistTag>),
    ClearBlockwordInput,
    TimeframeEnabled(bool),
    Alert(String),
}

pub trait PageSurface: Send + 'static {
    fn apply(&mut self, update: PageUpdate);
}
