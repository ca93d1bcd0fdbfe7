use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use matching_game_core::{HideTicket, HideTimer};

use super::app::handle_hide_elapsed;
use super::state::AppState;

/// Runs the mismatch hide on the glib main loop.
pub struct GlibHideTimer {
    state: Weak<RefCell<AppState>>,
}

impl GlibHideTimer {
    pub fn new(state: &Rc<RefCell<AppState>>) -> Self {
        Self {
            state: Rc::downgrade(state),
        }
    }
}

impl HideTimer for GlibHideTimer {
    type Handle = glib::SourceId;

    fn schedule(&mut self, ticket: HideTicket, delay: Duration) -> glib::SourceId {
        let state = self.state.clone();
        glib::timeout_add_local_once(delay, move || {
            if let Some(state) = state.upgrade() {
                handle_hide_elapsed(&state, ticket);
            }
        })
    }

    fn cancel(&mut self, handle: glib::SourceId) {
        handle.remove();
    }
}
