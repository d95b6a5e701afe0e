use crate::surface::{BlocklistTag, PageSurface, PageUpdate, PanelState, Region, ReportLink};
use insight_core::{CoreError, Messages, SubredditRecommendation, ViewError};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub type SharedView<S> = Arc<Mutex<ViewController<S>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Form,
    InProgress,
    Result,
}

impl ViewState {
    pub fn region(&self) -> Region {
        match self {
            ViewState::Form => Region::Form,
            ViewState::InProgress => Region::Progress,
            ViewState::Result => Region::Result,
        }
    }

    pub fn can_transition_to(&self, next: ViewState) -> bool {
        matches!(
            (self, next),
            (_, ViewState::InProgress)
                | (ViewState::Form, ViewState::Form)
                | (ViewState::InProgress, ViewState::Form)
                | (ViewState::InProgress, ViewState::Result)
                | (ViewState::Result, ViewState::Form)
        )
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::Form => f.write_str("form"),
            ViewState::InProgress => f.write_str("in-progress"),
            ViewState::Result => f.write_str("result"),
        }
    }
}

/// Sole writer to the page surface.
///
/// Exactly one of the form, progress and result regions is visible at any
/// time; the recommendation panel is an overlay that can only be visible
/// while a run is in progress.
pub struct ViewController<S: PageSurface> {
    surface: S,
    state: ViewState,
    panel: PanelState,
    report_link: ReportLink,
    messages: Messages,
}

impl<S: PageSurface> ViewController<S> {
    pub fn new(surface: S, messages: Messages) -> Self {
        let mut view = Self {
            surface,
            state: ViewState::Form,
            panel: PanelState::Hidden,
            report_link: ReportLink::Pending,
            messages,
        };
        view.show_only(ViewState::Form);
        view.set_panel(PanelState::Hidden);
        view
    }

    pub fn into_shared(self) -> SharedView<S> {
        Arc::new(Mutex::new(self))
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    pub fn report_link(&self) -> &ReportLink {
        &self.report_link
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The single place where the visible region changes.
    pub fn transition(&mut self, next: ViewState) -> Result<(), CoreError> {
        if !self.state.can_transition_to(next) {
            warn!("Rejected view transition {} -> {}", self.state, next);
            return Err(CoreError::View(ViewError::InvalidTransition {
                from: self.state.to_string(),
                to: next.to_string(),
            }));
        }

        debug!("View transition {} -> {}", self.state, next);
        self.state = next;
        self.show_only(next);
        if next != ViewState::InProgress {
            self.set_panel(PanelState::Hidden);
        }
        Ok(())
    }

    pub fn enter_progress(&mut self) -> Result<(), CoreError> {
        self.transition(ViewState::InProgress)?;
        self.set_report_link(ReportLink::Pending);
        self.set_panel(PanelState::Hidden);
        self.surface.apply(PageUpdate::ProgressWidth(0));
        Ok(())
    }

    pub fn update_progress(&mut self, status_text: &str, progress: u8) {
        self.surface.apply(PageUpdate::ProgressWidth(progress.min(100)));
        self.set_status_text(status_text);
    }

    pub fn set_status_text(&mut self, text: &str) {
        self.surface.apply(PageUpdate::StatusText(text.to_string()));
    }

    /// First phase of the panel reveal: fill the list and unhide it.
    /// Returns `false` when no run is on screen to attach it to.
    pub fn show_recommendations(&mut self, recommendations: &[SubredditRecommendation]) -> bool {
        if self.state != ViewState::InProgress {
            debug!("Dropping recommendations outside of a run");
            return false;
        }

        let entries = recommendations
            .iter()
            .map(SubredditRecommendation::display_label)
            .collect::<Vec<_>>();
        info!("Showing {} recommended subreddits", entries.len());
        self.surface.apply(PageUpdate::Recommendations(entries));
        self.set_panel(PanelState::Revealing);
        true
    }

    /// Second phase of the panel reveal: apply the visible style hook.
    pub fn complete_panel_reveal(&mut self) -> bool {
        if self.state != ViewState::InProgress || self.panel != PanelState::Revealing {
            return false;
        }
        self.set_panel(PanelState::Visible);
        true
    }

    /// Points the report control at the finished report, or disables it.
    pub fn prepare_report(&mut self, report_url: Option<&str>) {
        let link = match report_url {
            Some(href) => ReportLink::Live {
                href: href.to_string(),
                label: self.messages.report_ready.clone(),
                new_context: true,
            },
            None => ReportLink::Disabled {
                label: self.messages.report_failed.clone(),
            },
        };
        self.set_report_link(link);
    }

    pub fn reveal_result(&mut self) -> Result<(), CoreError> {
        self.transition(ViewState::Result)
    }

    pub fn return_to_form(&mut self) -> Result<(), CoreError> {
        self.transition(ViewState::Form)
    }

    pub fn render_blocklist(&mut self, tags: Vec<BlocklistTag>) {
        self.surface.apply(PageUpdate::BlocklistTags(tags));
    }

    pub fn clear_blockword_input(&mut self) {
        self.surface.apply(PageUpdate::ClearBlockwordInput);
    }

    pub fn set_timeframe_enabled(&mut self, enabled: bool) {
        self.surface.apply(PageUpdate::TimeframeEnabled(enabled));
    }

    pub fn alert(&mut self, message: &str) {
        self.surface.apply(PageUpdate::Alert(message.to_string()));
    }

    fn show_only(&mut self, state: ViewState) {
        let visible = state.region();
        for region in Region::ALL {
            self.surface.apply(PageUpdate::Region {
                region,
                visible: region == visible,
            });
        }
    }

    fn set_panel(&mut self, panel: PanelState) {
        self.panel = panel;
        self.surface.apply(PageUpdate::Panel(panel));
    }

    fn set_report_link(&mut self, link: ReportLink) {
        self.report_link = link.clone();
        self.surface.apply(PageUpdate::ReportLink(link));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSurface;

    fn view() -> (ViewController<RecordingSurface>, RecordingSurface) {
        let surface = RecordingSurface::default();
        (ViewController::new(surface.clone(), Messages::default()), surface)
    }

    fn recs() -> Vec<SubredditRecommendation> {
        vec![SubredditRecommendation {
            name: "BuyItForLife".to_string(),
            translation: "耐用好物".to_string(),
        }]
    }

    #[test]
    fn test_starts_on_form() {
        let (view, surface) = view();
        assert_eq!(view.state(), ViewState::Form);
        assert_eq!(surface.visible_regions(), vec![Region::Form]);
        assert_eq!(view.panel(), PanelState::Hidden);
    }

    #[test]
    fn test_exactly_one_region_visible_through_a_run() {
        let (mut view, surface) = view();

        view.enter_progress().unwrap();
        assert_eq!(surface.visible_regions(), vec![Region::Progress]);

        view.reveal_result().unwrap();
        assert_eq!(surface.visible_regions(), vec![Region::Result]);

        view.return_to_form().unwrap();
        assert_eq!(surface.visible_regions(), vec![Region::Form]);
    }

    #[test]
    fn test_rejects_result_without_a_run() {
        let (mut view, surface) = view();

        let result = view.reveal_result();
        assert!(matches!(
            result,
            Err(CoreError::View(ViewError::InvalidTransition { .. }))
        ));
        assert_eq!(view.state(), ViewState::Form);
        assert_eq!(surface.visible_regions(), vec![Region::Form]);
    }

    #[test]
    fn test_panel_reveal_is_two_phase() {
        let (mut view, surface) = view();
        view.enter_progress().unwrap();

        assert!(view.show_recommendations(&recs()));
        assert_eq!(view.panel(), PanelState::Revealing);
        assert_eq!(
            surface.recommendation_lists(),
            vec![vec!["r/BuyItForLife (耐用好物)".to_string()]]
        );

        assert!(view.complete_panel_reveal());
        assert_eq!(view.panel(), PanelState::Visible);
        assert!(!view.complete_panel_reveal());
    }

    #[test]
    fn test_recommendations_ignored_outside_a_run() {
        let (mut view, surface) = view();
        assert!(!view.show_recommendations(&recs()));
        assert!(surface.recommendation_lists().is_empty());
    }

    #[test]
    fn test_result_hides_panel() {
        let (mut view, surface) = view();
        view.enter_progress().unwrap();
        view.show_recommendations(&recs());
        view.complete_panel_reveal();

        view.reveal_result().unwrap();
        assert_eq!(view.panel(), PanelState::Hidden);
        assert_eq!(surface.last_panel(), Some(PanelState::Hidden));
        assert!(!view.complete_panel_reveal());
    }

    #[test]
    fn test_enter_progress_resets_previous_run() {
        let (mut view, surface) = view();
        view.enter_progress().unwrap();
        view.show_recommendations(&recs());
        view.prepare_report(None);
        view.reveal_result().unwrap();

        view.enter_progress().unwrap();
        assert_eq!(view.report_link(), &ReportLink::Pending);
        assert_eq!(view.panel(), PanelState::Hidden);
        assert_eq!(surface.last_report_link(), Some(ReportLink::Pending));
        assert_eq!(surface.last_progress(), Some(0));
    }

    #[test]
    fn test_report_link_styles() {
        let (mut view, _surface) = view();
        view.enter_progress().unwrap();

        view.prepare_report(Some("/static/report.html"));
        assert_eq!(
            view.report_link(),
            &ReportLink::Live {
                href: "/static/report.html".to_string(),
                label: Messages::default().report_ready,
                new_context: true,
            }
        );

        view.prepare_report(None);
        assert_eq!(
            view.report_link(),
            &ReportLink::Disabled {
                label: Messages::default().report_failed,
            }
        );
    }

    #[test]
    fn test_progress_width_is_capped() {
        let (mut view, surface) = view();
        view.enter_progress().unwrap();
        view.update_progress("working", 250);
        assert_eq!(surface.last_progress(), Some(100));
        assert_eq!(surface.last_status_text().as_deref(), Some("working"));
    }
}
