use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;
use tracing::debug;

use sidenav_core::{NavSignal, NavTree};

use crate::input::Action;
use crate::theme::Theme;

/// UI state: a cursor over the navigation links plus the shared tree
/// the scroller service operates on
pub struct App {
    tree: Arc<Mutex<NavTree>>,
    /// Cursor position in document-order link index
    pub cursor: usize,
    pub should_quit: bool,
    nav_tx: Option<mpsc::UnboundedSender<NavSignal>>,
    pub theme: Theme,
}

impl App {
    pub fn new(tree: NavTree) -> Self {
        let cursor = tree.active_index().unwrap_or(0);
        Self {
            tree: Arc::new(Mutex::new(tree)),
            cursor,
            should_quit: false,
            nav_tx: None,
            theme: Theme::default(),
        }
    }

    /// Wire the navigation-completion hook consumed by the scroller
    /// service
    pub fn with_nav_sender(mut self, tx: mpsc::UnboundedSender<NavSignal>) -> Self {
        self.nav_tx = Some(tx);
        self
    }

    /// Shared handle for the scroller service
    pub fn tree(&self) -> Arc<Mutex<NavTree>> {
        Arc::clone(&self.tree)
    }

    pub fn lock_tree(&self) -> MutexGuard<'_, NavTree> {
        self.tree.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn link_count(&self) -> usize {
        self.lock_tree().link_paths().len()
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveDown => self.move_down(),
            Action::MoveUp => self.move_up(),
            Action::JumpToTop => self.cursor = 0,
            Action::JumpToBottom => self.cursor = self.link_count().saturating_sub(1),
            Action::Select => self.select(),
            Action::None => {}
        }
    }

    pub fn move_down(&mut self) {
        let last = self.link_count().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(last);
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Navigate to the link under the cursor: mark it active and notify
    /// the scroller that a navigation completed
    pub fn select(&mut self) {
        let marked = self.lock_tree().set_active(self.cursor);
        if !marked {
            return;
        }
        debug!(cursor = self.cursor, "navigated to link");
        if let Some(ref tx) = self.nav_tx {
            let _ = tx.send(NavSignal::NavigationCompleted);
        }
    }

    /// Propagate a terminal resize to the sidebar scroll container
    pub fn resize(&mut self, viewport_height: u16) {
        let mut tree = self.lock_tree();
        if let Some(path) = tree.first_container_path() {
            if let Some(section) = tree.section_at_mut(&path) {
                if let Some(state) = section.scroll.as_mut() {
                    state.viewport_height = viewport_height;
                }
            }
        }
    }
}
