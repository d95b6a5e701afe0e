use crate::blocklist::BlocklistStore;
use crate::form::TaskForm;
use crate::poller::PollSettings;
use crate::session::PollingSession;
use crate::surface::PageSurface;
use crate::view::{SharedView, ViewController, ViewState};
use insight_core::{ClientConfig, CoreError, ErrorExt, Messages, SortOrder, TaskRequest};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use task_client::TaskApi;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Page state and handlers for the keyword-research page.
///
/// Cloning yields another handle onto the same page.
pub struct PageController<A: TaskApi, S: PageSurface> {
    api: Arc<A>,
    view: SharedView<S>,
    blocklist: Arc<Mutex<BlocklistStore>>,
    form: Arc<Mutex<TaskForm>>,
    session: Arc<Mutex<Option<PollingSession>>>,
    /// Bumped by every launch and reset; a launch only touches the page
    /// while it is still the latest.
    generation: Arc<AtomicU64>,
    settings: PollSettings,
    messages: Messages,
}

impl<A: TaskApi, S: PageSurface> Clone for PageController<A, S> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            view: Arc::clone(&self.view),
            blocklist: Arc::clone(&self.blocklist),
            form: Arc::clone(&self.form),
            session: Arc::clone(&self.session),
            generation: Arc::clone(&self.generation),
            settings: self.settings,
            messages: self.messages.clone(),
        }
    }
}

impl<A: TaskApi + 'static, S: PageSurface> PageController<A, S> {
    pub fn new(api: A, surface: S, config: &ClientConfig) -> Self {
        let blocklist = BlocklistStore::new(&config.default_blocked_keywords);
        let form = TaskForm::default();

        let mut view = ViewController::new(surface, config.messages.clone());
        view.render_blocklist(blocklist.tags());
        view.set_timeframe_enabled(form.timeframe_enabled());

        Self {
            api: Arc::new(api),
            view: view.into_shared(),
            blocklist: Arc::new(Mutex::new(blocklist)),
            form: Arc::new(Mutex::new(form)),
            session: Arc::new(Mutex::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
            settings: PollSettings::from_config(config),
            messages: config.messages.clone(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> SharedView<S> {
        Arc::clone(&self.view)
    }

    pub async fn view_state(&self) -> ViewState {
        self.view.lock().await.state()
    }

    pub async fn add_blockword(&self, raw: &str) -> bool {
        let mut blocklist = self.blocklist.lock().await;
        let added = blocklist.add(raw);
        let mut view = self.view.lock().await;
        if added {
            view.render_blocklist(blocklist.tags());
        }
        view.clear_blockword_input();
        added
    }

    /// Key handler for the blocklist input; only Enter submits.
    pub async fn blockword_key(&self, key: &str, raw: &str) -> bool {
        if key != "Enter" {
            return false;
        }
        self.add_blockword(raw).await
    }

    pub async fn remove_blockword(&self, word: &str) -> bool {
        let mut blocklist = self.blocklist.lock().await;
        let removed = blocklist.remove(word);
        if !removed {
            debug!("'{}' was not on the blocklist", word);
        }
        self.view.lock().await.render_blocklist(blocklist.tags());
        removed
    }

    pub async fn blocked_keywords(&self) -> Vec<String> {
        self.blocklist.lock().await.snapshot()
    }

    pub async fn form(&self) -> TaskForm {
        self.form.lock().await.clone()
    }

    /// Edits the form fields, keeping the timeframe input in step with the
    /// chosen ordering.
    pub async fn edit_form(&self, edit: impl FnOnce(&mut TaskForm)) {
        let mut form = self.form.lock().await;
        let before = form.sort_order;
        edit(&mut form);
        if form.sort_order != before {
            self.view
                .lock()
                .await
                .set_timeframe_enabled(form.timeframe_enabled());
        }
    }

    pub async fn set_sort_order(&self, sort_order: SortOrder) {
        self.edit_form(|form| form.sort_order = sort_order).await;
    }

    /// Starts a research run from the current form and blocklist.
    pub async fn launch(&self) -> Result<(), CoreError> {
        let request = self.build_request().await;
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                e.log_warn();
                self.view.lock().await.alert(&self.messages.missing_keyword);
                return Err(e);
            }
        };

        // The previous run ends as soon as a new one is requested.
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.cancel_session().await;

        let run_id = Uuid::new_v4();
        info!(%run_id, keyword = %request.keyword, "Launching research task");
        self.view.lock().await.enter_progress()?;

        let outcome = self.api.start_task(&request).await;

        // Slot before view, and the generation is read under the slot lock so
        // a newer launch cannot slip in between the check and the update.
        let mut slot = self.session.lock().await;
        if !self.is_latest(generation) {
            match &outcome {
                Ok(_) => info!(%run_id, "Superseded by a newer launch; not polling"),
                Err(e) => {
                    e.log_warn();
                }
            }
            return outcome.map(|_| ());
        }

        match outcome {
            Ok(ack) => {
                debug!(%run_id, "Backend acknowledged: {}", ack.message);
                if let Some(previous) = slot.take() {
                    previous.cancel();
                }
                *slot = Some(PollingSession::start(
                    run_id,
                    Arc::clone(&self.api),
                    Arc::clone(&self.view),
                    self.settings,
                ));
                Ok(())
            }
            Err(e) => {
                e.log_error();
                if let Some(previous) = slot.take() {
                    previous.cancel();
                }
                let mut view = self.view.lock().await;
                view.set_status_text(&self.messages.launch_failed);
                view.alert(&self.messages.launch_failed);
                if let Err(view_error) = view.return_to_form() {
                    view_error.log_warn();
                }
                Err(e)
            }
        }
    }

    /// Leaves a finished or failed run and shows the form again.
    pub async fn reset_to_form(&self) -> Result<(), CoreError> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cancel_session().await;
        self.view.lock().await.return_to_form()
    }

    pub async fn is_polling(&self) -> bool {
        self.session
            .lock()
            .await
            .as_ref()
            .is_some_and(|session| !session.is_finished())
    }

    /// Resolves once the active session (if any) has fully finished.
    pub async fn wait_for_session(&self) {
        let finished = self
            .session
            .lock()
            .await
            .as_ref()
            .map(PollingSession::finished);
        if let Some(finished) = finished {
            finished.cancelled().await;
        }
    }

    async fn build_request(&self) -> Result<TaskRequest, CoreError> {
        let form = self.form.lock().await;
        let blocklist = self.blocklist.lock().await;
        form.to_request(&blocklist)
    }

    fn is_latest(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    async fn cancel_session(&self) {
        if let Some(session) = self.session.lock().await.take() {
            if !session.is_finished() {
                warn!(run_id = %session.run_id(), "Cancelling active polling session");
            }
            session.cancel();
        }
    }
}
