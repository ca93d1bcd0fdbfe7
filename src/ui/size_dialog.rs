use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use libadwaita as adw;
use matching_game_core::GridSize;
use matching_game_core::types::{MAX_DIMENSION, MIN_DIMENSION};

use adw::prelude::*;

use super::app::start_game;
use super::dialogs::{SIZE_RULES, show_error_dialog};
use super::state::AppState;

fn dimension_row(content: &gtk::Box, label: &str, initial: usize) -> gtk::SpinButton {
    let row = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    let caption = gtk::Label::new(Some(label));
    caption.set_hexpand(true);
    caption.set_halign(gtk::Align::Start);

    let spin = gtk::SpinButton::with_range(MIN_DIMENSION as f64, MAX_DIMENSION as f64, 1.0);
    spin.set_value(initial as f64);
    spin.set_numeric(true);

    row.append(&caption);
    row.append(&spin);
    content.append(&row);
    spin
}

pub fn show_size_dialog(state: &Rc<RefCell<AppState>>) {
    let (parent_window, current) = {
        let st = state.borrow();
        (st.window.clone(), st.grid_size)
    };
    let dialog = adw::Dialog::new();
    dialog.set_can_close(true);

    let title = gtk::Label::new(Some("Custom size"));
    title.add_css_class("dialog-header-title");
    title.set_halign(gtk::Align::Center);

    let header = adw::HeaderBar::new();
    header.set_title_widget(Some(&title));
    header.set_show_end_title_buttons(true);
    header.add_css_class("flat");

    let content = gtk::Box::new(gtk::Orientation::Vertical, 10);
    content.add_css_class("size-dialog-content");
    content.set_hexpand(true);
    content.set_margin_top(16);
    content.set_margin_bottom(16);
    content.set_margin_start(16);
    content.set_margin_end(16);

    let rows_spin = dimension_row(&content, "Rows", current.rows());
    let cols_spin = dimension_row(&content, "Columns", current.cols());

    let start_button = gtk::Button::with_label("Start");
    start_button.set_hexpand(true);
    start_button.set_size_request(-1, 42);
    start_button.add_css_class("suggested-action");
    start_button.add_css_class("size-dialog-button");
    start_button.connect_clicked({
        let state = state.clone();
        let dialog = dialog.clone();
        move |_| {
            let rows = rows_spin.value_as_int() as u8;
            let cols = cols_spin.value_as_int() as u8;
            dialog.close();
            match GridSize::new(rows, cols) {
                Ok(size) => start_game(&state, size),
                Err(err) => {
                    tracing::warn!(rows, cols, error = %err, "rejected custom size");
                    let body = format!("{err}.\n\n{SIZE_RULES}");
                    show_error_dialog(&state, "Invalid size", &body);
                }
            }
        }
    });
    content.append(&start_button);

    let toolbar = adw::ToolbarView::new();
    toolbar.add_top_bar(&header);
    toolbar.set_content(Some(&content));

    dialog.set_child(Some(&toolbar));
    dialog.present(parent_window.as_ref());
}
