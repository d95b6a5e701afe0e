pub mod blocklist;
pub mod controller;
pub mod form;
pub mod poller;
pub mod session;
pub mod surface;
pub mod view;

#[cfg(test)]
mod testing;

pub use blocklist::{normalize_keyword, BlocklistStore};
pub use controller::PageController;
pub use form::TaskForm;
pub use poller::{PollSettings, Poller, TickOutcome};
pub use session::PollingSession;
pub use surface::{BlocklistTag, PageSurface, PageUpdate, PanelState, Region, ReportLink};
pub use view::{SharedView, ViewController, ViewState};
