use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use libadwaita as adw;
use matching_game_core::GameSummary;

use adw::prelude::*;

use super::scene::show_menu;
use super::state::AppState;

pub const SIZE_RULES: &str = "Rules:\n\
- Both dimensions must be between 2 and 10\n\
- At least one dimension must be an even number\n\
- The board can hold at most 36 pairs";

pub fn show_instructions_dialog(app: &adw::Application) -> adw::AlertDialog {
    let dialog = adw::AlertDialog::new(
        Some("Instructions"),
        Some(
            "Reveal two tiles at a time to find pairs with the same symbol and color.\n\
Matched pairs stay face-up. A wrong pair hides again after a moment,\n\
or as soon as you pick another tile.\n\
Clear the board in as few attempts as you can.",
        ),
    );
    dialog.add_response("ok", "Got it");
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(app.active_window().as_ref());
    dialog
}

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("Matching Game")
        .application_icon("io.github.matchinggame.MatchingGame")
        .version(env!("CARGO_PKG_VERSION"))
        .comments("Find every pair of symbols on the board.")
        .license_type(gtk::License::MitX11)
        .build();
    dialog.present(app.active_window().as_ref());
    dialog
}

/// Announces a solved board. Closing the dialog returns to size selection.
pub fn show_victory_dialog(state: &Rc<RefCell<AppState>>, summary: GameSummary) {
    let window = state.borrow().window.clone();
    let body = format!("Congratulations!\n\n{summary}");
    let dialog = adw::AlertDialog::new(Some("Game Over"), Some(body.as_str()));
    dialog.add_response("ok", "Play Again");
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.set_response_appearance("ok", adw::ResponseAppearance::Suggested);
    dialog.connect_response(None, {
        let state = state.clone();
        move |_, _| show_menu(&state)
    });
    dialog.present(window.as_ref());
}

pub fn show_error_dialog(state: &Rc<RefCell<AppState>>, heading: &str, body: &str) {
    let window = state.borrow().window.clone();
    let dialog = adw::AlertDialog::new(Some(heading), Some(body));
    dialog.add_response("ok", "OK");
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(window.as_ref());
}
