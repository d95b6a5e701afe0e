use page_controller::{PageSurface, PageUpdate, PanelState, ReportLink};
use tracing::debug;

/// Renders page updates as terminal lines.
#[derive(Debug, Default)]
pub struct ConsoleSurface {
    last_status: Option<String>,
    last_progress: u8,
}

impl PageSurface for ConsoleSurface {
    fn apply(&mut self, update: PageUpdate) {
        match update {
            PageUpdate::StatusText(text) => {
                if self.last_status.as_deref() != Some(text.as_str()) {
                    println!("[{:>3}%] {}", self.last_progress, text);
                    self.last_status = Some(text);
                }
            }
            PageUpdate::ProgressWidth(width) => {
                self.last_progress = width;
            }
            PageUpdate::Recommendations(entries) => {
                println!("Recommended communities:");
                for entry in entries {
                    println!("  - {}", entry);
                }
            }
            PageUpdate::ReportLink(ReportLink::Live { href, label, .. }) => {
                println!("{}: {}", label, href);
            }
            PageUpdate::ReportLink(ReportLink::Disabled { label }) => {
                println!("{}", label);
            }
            PageUpdate::Alert(message) => {
                eprintln!("! {}", message);
            }
            PageUpdate::BlocklistTags(tags) => {
                let words = tags
                    .iter()
                    .map(|tag| tag.label.as_str())
                    .collect::<Vec<_>>();
                debug!("Blocklist: {}", words.join(", "));
            }
            PageUpdate::Panel(PanelState::Visible) => {
                debug!("Recommendation panel visible");
            }
            other => {
                debug!("Page update: {:?}", other);
            }
        }
    }
}
