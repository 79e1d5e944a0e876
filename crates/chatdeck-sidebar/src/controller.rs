//! Session List Controller
//!
//! Turns sidebar input into store requests:
//! - drop → `move_session`, unless the drop resolves to no move
//! - click → `select_session` + open the chat view
//! - delete → `delete_session`, after a yes on compact displays

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use chatdeck_navigation::{Navigator, Route};
use chatdeck_session::{ChatStore, SessionSummary};

use crate::confirm::{Confirmer, DELETE_CHAT_PROMPT};
use crate::display::{DeletePolicy, DisplayMode, DisplaySignal};
use crate::gesture::{DragGesture, DropResult};
use crate::item::SessionItemView;
use crate::scroll::ScrollTracker;
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarOptions {
    /// Skip the mask picker and open a blank conversation on "add new"
    pub dont_show_mask_splash_screen: bool,
}

/// Options shared between the app and every controller it hands out
pub type SharedOptions = Arc<RwLock<SidebarOptions>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: usize, to: usize },
    /// Dropped outside the list
    Cancelled,
    /// Dropped back where it started
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(SessionSummary),
    Declined,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Created(SessionSummary),
    /// Sent to the mask picker; the store is untouched
    MaskPicker,
}

pub struct SessionListController {
    store: ChatStore,
    navigator: Arc<dyn Navigator>,
    confirmer: Arc<dyn Confirmer>,
    display: Arc<dyn DisplaySignal>,
    options: SharedOptions,
    scroll: Mutex<ScrollTracker>,
}

impl SessionListController {
    pub fn new(
        store: ChatStore,
        navigator: Arc<dyn Navigator>,
        confirmer: Arc<dyn Confirmer>,
        display: Arc<dyn DisplaySignal>,
    ) -> Self {
        Self {
            store,
            navigator,
            confirmer,
            display,
            options: SharedOptions::default(),
            scroll: Mutex::new(ScrollTracker::new()),
        }
    }

    pub fn with_options(mut self, options: SharedOptions) -> Self {
        self.options = options;
        self
    }

    pub fn store(&self) -> &ChatStore {
        &self.store
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display.mode()
    }

    /// Rows to draw, read fresh from the store
    pub fn items(&self) -> Vec<SessionItemView> {
        let snapshot = self.store.snapshot();
        let selected = snapshot.selected;
        let route = self.navigator.current();

        snapshot
            .sessions
            .iter()
            .enumerate()
            .map(|(index, session)| {
                SessionItemView::new(index, session, selected == Some(index), route)
            })
            .collect()
    }

    /// Pointer down on row `index`; the gesture is sized to the current list
    pub fn start_drag(&self, index: usize) -> Result<DragGesture> {
        let mut gesture = DragGesture::new(self.store.len());
        gesture.press(index)?;
        Ok(gesture)
    }

    /// Apply a finished drag
    pub fn on_drag_end(&self, result: DropResult) -> Result<MoveOutcome> {
        let Some(to) = result.moves_to() else {
            if result.destination.is_none() {
                tracing::debug!(source = result.source, "Drop outside list ignored");
                return Ok(MoveOutcome::Cancelled);
            }
            return Ok(MoveOutcome::Unchanged);
        };

        self.store.move_session(result.source, to)?;

        Ok(MoveOutcome::Moved {
            from: result.source,
            to,
        })
    }

    pub fn move_item(&self, source: usize, destination: Option<usize>) -> Result<MoveOutcome> {
        self.on_drag_end(DropResult {
            source,
            destination,
        })
    }

    /// Open the conversation at `index`
    pub fn select_item(&self, index: usize) -> Result<()> {
        self.store.select_session(index)?;
        self.navigator.navigate(Route::Chat);
        Ok(())
    }

    /// Delete the conversation at `index`, asking first on compact displays
    pub async fn delete_item(&self, index: usize) -> Result<DeleteOutcome> {
        let policy = DeletePolicy::for_mode(self.display_mode());

        if policy == DeletePolicy::Confirm && !self.confirmer.confirm(DELETE_CHAT_PROMPT).await {
            tracing::debug!(index, "Delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        let removed = self.store.delete_session(index)?;
        Ok(DeleteOutcome::Deleted(removed))
    }

    /// Bring back the conversation removed by the last delete
    pub fn undo_delete(&self) -> Result<()> {
        Ok(self.store.restore_last_deleted()?)
    }

    /// The "add new" button in the header
    pub fn add_new(&self) -> Result<AddOutcome> {
        let skip_picker = self.options.read().dont_show_mask_splash_screen;

        if skip_picker {
            let session = self.store.create_new_session()?;
            self.navigator.navigate(Route::Chat);
            Ok(AddOutcome::Created(session))
        } else {
            self.navigator.navigate(Route::NewChat);
            Ok(AddOutcome::MaskPicker)
        }
    }

    /// A click on the list's empty area
    pub fn click_background(&self) {
        self.navigator.navigate(Route::Home);
    }

    /// Id of the row that just became selected and should be scrolled to.
    ///
    /// Compares against the previous call only, so the host calls this
    /// after every [`StoreEvent::Selected`] or `Created` it receives;
    /// a selection that leaves and comes back between two calls is not seen.
    ///
    /// [`StoreEvent::Selected`]: chatdeck_session::StoreEvent::Selected
    pub fn take_scroll_request(&self) -> Option<String> {
        let selected = self.store.selected_session();
        self.scroll
            .lock()
            .observe(selected.as_ref().map(|s| s.id.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatdeck_storage::Database;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingNavigator {
        visited: Mutex<Vec<Route>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: Route) {
            self.visited.lock().push(route);
        }

        fn current(&self) -> Route {
            self.visited.lock().last().copied().unwrap_or_default()
        }
    }

    struct ScriptedConfirmer {
        answer: bool,
        asked: AtomicUsize,
    }

    impl ScriptedConfirmer {
        fn new(answer: bool) -> Arc<Self> {
            Arc::new(Self {
                answer,
                asked: AtomicUsize::new(0),
            })
        }

        fn asked(&self) -> usize {
            self.asked.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl Confirmer for ScriptedConfirmer {
        async fn confirm(&self, _prompt: &str) -> bool {
            self.asked.fetch_add(1, Ordering::SeqCst);
            self.answer
        }
    }

    struct FixedDisplay(bool);

    impl DisplaySignal for FixedDisplay {
        fn is_compact(&self) -> bool {
            self.0
        }
    }

    struct Harness {
        controller: SessionListController,
        navigator: Arc<RecordingNavigator>,
        confirmer: Arc<ScriptedConfirmer>,
    }

    /// Controller over sessions titled A, B, C, D
    fn harness(compact: bool, answer: bool) -> Harness {
        let store = ChatStore::new(Database::open_in_memory().unwrap());
        store.initialize().unwrap();
        store.rename_session(0, "D".to_string()).unwrap();
        for title in ["C", "B", "A"] {
            store.create_new_session().unwrap();
            store.rename_session(0, title.to_string()).unwrap();
        }

        let navigator = Arc::new(RecordingNavigator::default());
        let confirmer = ScriptedConfirmer::new(answer);
        let controller = SessionListController::new(
            store,
            navigator.clone(),
            confirmer.clone(),
            Arc::new(FixedDisplay(compact)),
        );

        Harness {
            controller,
            navigator,
            confirmer,
        }
    }

    fn titles(controller: &SessionListController) -> Vec<String> {
        controller.items().into_iter().map(|i| i.title).collect()
    }

    #[test]
    fn test_drag_scenarios() {
        let h = harness(false, true);
        assert_eq!(
            h.controller.move_item(0, Some(2)).unwrap(),
            MoveOutcome::Moved { from: 0, to: 2 }
        );
        assert_eq!(titles(&h.controller), vec!["B", "C", "A", "D"]);

        let h = harness(false, true);
        h.controller
            .on_drag_end(DropResult {
                source: 3,
                destination: Some(0),
            })
            .unwrap();
        assert_eq!(titles(&h.controller), vec!["D", "A", "B", "C"]);
    }

    #[test]
    fn test_noop_drops_issue_no_request() {
        let h = harness(false, true);
        let mut rx = h.controller.store().subscribe();

        assert_eq!(
            h.controller.move_item(1, None).unwrap(),
            MoveOutcome::Cancelled
        );
        assert_eq!(
            h.controller.move_item(2, Some(2)).unwrap(),
            MoveOutcome::Unchanged
        );

        assert_eq!(titles(&h.controller), vec!["A", "B", "C", "D"]);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_out_of_range_move_is_rejected() {
        let h = harness(false, true);
        assert!(h.controller.move_item(0, Some(9)).is_err());
        assert_eq!(titles(&h.controller), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_select_navigates_to_chat() {
        let h = harness(false, true);
        h.controller.select_item(2).unwrap();
        h.controller.select_item(2).unwrap();

        assert_eq!(h.controller.store().selected_index(), Some(2));
        assert_eq!(*h.navigator.visited.lock(), vec![Route::Chat, Route::Chat]);

        let items = h.controller.items();
        assert!(items[2].selected && items[2].highlighted);
        assert!(!items[0].selected);
    }

    #[test]
    fn test_selection_not_highlighted_outside_chat_views() {
        let h = harness(false, true);
        h.controller.select_item(1).unwrap();
        h.navigator.navigate(Route::Settings);

        let items = h.controller.items();
        assert!(items[1].selected);
        assert!(!items[1].highlighted);
    }

    #[tokio::test]
    async fn test_compact_delete_declined() {
        let h = harness(true, false);

        let outcome = h.controller.delete_item(1).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(h.confirmer.asked(), 1);
        assert_eq!(titles(&h.controller), vec!["A", "B", "C", "D"]);
    }

    #[tokio::test]
    async fn test_compact_delete_accepted() {
        let h = harness(true, true);

        let outcome = h.controller.delete_item(1).await.unwrap();
        assert!(matches!(outcome, DeleteOutcome::Deleted(ref s) if s.title == "B"));
        assert_eq!(h.confirmer.asked(), 1);
        assert_eq!(titles(&h.controller), vec!["A", "C", "D"]);
    }

    #[tokio::test]
    async fn test_wide_delete_skips_prompt() {
        let h = harness(false, false);

        let outcome = h.controller.delete_item(1).await.unwrap();
        assert!(matches!(outcome, DeleteOutcome::Deleted(_)));
        assert_eq!(h.confirmer.asked(), 0);
        assert_eq!(titles(&h.controller), vec!["A", "C", "D"]);
    }

    #[tokio::test]
    async fn test_undo_delete() {
        let h = harness(false, true);
        h.controller.delete_item(0).await.unwrap();
        h.controller.undo_delete().unwrap();
        assert_eq!(titles(&h.controller), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_add_new_opens_mask_picker_by_default() {
        let h = harness(false, true);

        assert_eq!(h.controller.add_new().unwrap(), AddOutcome::MaskPicker);
        assert_eq!(h.controller.store().len(), 4);
        assert_eq!(h.navigator.current(), Route::NewChat);
    }

    #[test]
    fn test_add_new_skips_mask_picker_when_configured() {
        let h = harness(false, true);
        let options = SharedOptions::default();
        options.write().dont_show_mask_splash_screen = true;
        let controller = h.controller.with_options(options);

        let AddOutcome::Created(session) = controller.add_new().unwrap() else {
            panic!("expected a new session");
        };
        assert_eq!(controller.store().sessions()[0].id, session.id);
        assert_eq!(controller.store().selected_index(), Some(0));
        assert_eq!(h.navigator.current(), Route::Chat);
    }

    #[test]
    fn test_click_background_goes_home() {
        let h = harness(false, true);
        h.controller.select_item(0).unwrap();
        h.controller.click_background();
        assert_eq!(h.navigator.current(), Route::Home);
    }

    #[test]
    fn test_scroll_request_once_per_selection() {
        let h = harness(false, true);
        let first = h.controller.store().sessions()[0].id.clone();
        assert_eq!(h.controller.take_scroll_request(), Some(first.clone()));
        assert_eq!(h.controller.take_scroll_request(), None);

        // Moving the selected row keeps it selected; no new request
        h.controller.move_item(0, Some(3)).unwrap();
        assert_eq!(h.controller.take_scroll_request(), None);

        h.controller.select_item(0).unwrap();
        let now_selected = h.controller.store().sessions()[0].id.clone();
        assert_eq!(h.controller.take_scroll_request(), Some(now_selected));
    }

    #[test]
    fn test_start_drag_follows_list_length() {
        let h = harness(false, true);
        assert!(h.controller.start_drag(4).is_err());

        h.controller.store().create_new_session().unwrap();
        let mut gesture = h.controller.start_drag(4).unwrap();
        gesture.motion(Some(0)).unwrap();
        let drop = gesture.release().unwrap().unwrap();

        assert_eq!(
            h.controller.on_drag_end(drop).unwrap(),
            MoveOutcome::Moved { from: 4, to: 0 }
        );
        assert_eq!(h.controller.store().sessions()[0].title, "D");
    }

    #[test]
    fn test_items_highlight_row_moved_by_another_handle() {
        let h = harness(false, true);
        h.controller.select_item(1).unwrap(); // B

        let other = h.controller.store().clone();
        other.move_session(1, 3).unwrap();

        let items = h.controller.items();
        let highlighted: Vec<_> = items.iter().filter(|i| i.highlighted).collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].title, "B");
        assert_eq!(highlighted[0].index, 3);
    }

    #[tokio::test]
    async fn test_scroll_request_after_each_selection_event() {
        let h = harness(false, true);
        let ids: Vec<String> = h
            .controller
            .store()
            .sessions()
            .into_iter()
            .map(|s| s.id)
            .collect();
        h.controller.take_scroll_request();
        let mut events = h.controller.store().subscribe();

        for index in [1, 0] {
            h.controller.select_item(index).unwrap();
            assert_eq!(
                events.recv().await.unwrap(),
                chatdeck_session::StoreEvent::Selected { index }
            );
            assert_eq!(h.controller.take_scroll_request(), Some(ids[index].clone()));
        }
    }
}
