use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::pango;
use gtk4::prelude::*;
use matching_game_core::{Phase, TileStatus};

use super::app::handle_tile_click;
use super::state::AppState;

pub const CONTENT_MARGIN: i32 = 12;
pub const TILE_GAP: i32 = 6;

pub fn build_board_grid(state: &Rc<RefCell<AppState>>) -> gtk::Grid {
    let grid = gtk::Grid::new();
    grid.add_css_class("match-board");
    grid.set_row_spacing(TILE_GAP as u32);
    grid.set_column_spacing(TILE_GAP as u32);
    grid.set_halign(gtk::Align::Fill);
    grid.set_valign(gtk::Align::Fill);
    grid.set_hexpand(true);
    grid.set_vexpand(true);

    let (css_provider, grid_size) = {
        let st = state.borrow();
        (st.dynamic_css_provider.clone(), st.grid_size)
    };
    let grid_cols = grid_size.cols() as i32;
    let grid_rows = grid_size.rows() as i32;

    let update_styles = {
        let css_provider = css_provider.clone();
        move |grid: &gtk::Grid| {
            let width = grid.width();
            let height = grid.height();
            if width > 0 && height > 0 {
                let cell_width = (width - (grid_cols - 1) * TILE_GAP) / grid_cols;
                let cell_height = (height - (grid_rows - 1) * TILE_GAP) / grid_rows;
                let min_dim = cell_width.min(cell_height);
                let tile_radius = (min_dim as f64 * 0.15) as i32;

                if let Some(provider) = &css_provider {
                    provider.load_from_data(&format!(
                        ".match-tile {{ border-radius: {tile_radius}px; }}"
                    ));
                }
            }
        }
    };

    let update_styles_clone = update_styles.clone();
    grid.connect_closure(
        "notify::width",
        false,
        glib::closure_local!(move |grid: gtk::Grid, _: glib::ParamSpec| {
            update_styles_clone(&grid);
        }),
    );
    grid.connect_closure(
        "notify::height",
        false,
        glib::closure_local!(move |grid: gtk::Grid, _: glib::ParamSpec| {
            update_styles(&grid);
        }),
    );

    let mut buttons = Vec::with_capacity(grid_size.cell_count());

    for index in 0..grid_size.cell_count() {
        let aspect_frame = gtk::AspectFrame::builder()
            .ratio(1.0)
            .obey_child(false)
            .halign(gtk::Align::Fill)
            .valign(gtk::Align::Fill)
            .hexpand(true)
            .vexpand(true)
            .build();

        let button = gtk::Button::builder()
            .css_classes(vec!["match-tile"])
            .build();
        button.set_hexpand(true);
        button.set_vexpand(true);

        let drawing_area = gtk::DrawingArea::builder()
            .hexpand(true)
            .vexpand(true)
            .build();
        drawing_area.add_css_class("match-tile-label");

        let state_draw = state.clone();
        drawing_area.set_draw_func(move |_, cr, width, height| {
            let st = state_draw.borrow();
            let Some(cell) = st.cell(index) else {
                return;
            };
            // Hidden tiles keep a blank face.
            if !cell.is_revealed() {
                return;
            }

            let min_dim = width.min(height) as f64;
            cr.set_antialias(cairo::Antialias::Best);

            let layout = pangocairo::functions::create_layout(cr);
            let mut font_desc = pango::FontDescription::new();
            font_desc.set_family("Cantarell, Noto Sans, sans");
            font_desc.set_weight(pango::Weight::Bold);
            font_desc.set_size((min_dim * 0.42 * pango::SCALE as f64) as i32);
            layout.set_font_description(Some(&font_desc));
            layout.set_text(&cell.symbol.to_string());

            let (red, green, blue) = cell.color.rgb();
            cr.set_source_rgb(red, green, blue);

            let (text_width, text_height) = layout.pixel_size();
            cr.move_to(
                (width as f64 - text_width as f64) / 2.0,
                (height as f64 - text_height as f64) / 2.0,
            );

            pangocairo::functions::show_layout(cr, &layout);
        });

        button.set_child(Some(&drawing_area));

        let state_clone = state.clone();
        button.connect_clicked(move |_| {
            handle_tile_click(&state_clone, index);
        });

        aspect_frame.set_child(Some(&button));

        let x = (index % grid_size.cols()) as i32;
        let y = (index / grid_size.cols()) as i32;
        grid.attach(&aspect_frame, x, y, 1, 1);
        buttons.push(button);
    }

    let mut st = state.borrow_mut();
    st.grid_buttons = buttons;
    sync_tiles(&st);
    drop(st);

    grid
}

/// Brings every tile's style classes in line with the board and redraws it.
pub fn sync_tiles(st: &AppState) {
    let mismatched = match st.game.as_ref().map(|game| game.phase()) {
        Some(Phase::ResolvingDelay { first, second }) => {
            let size = st.grid_size;
            [size.index_of(first), size.index_of(second)]
        }
        _ => [None, None],
    };

    for (index, button) in st.grid_buttons.iter().enumerate() {
        let status = st.cell(index).map(|cell| cell.status).unwrap_or_default();
        button.remove_css_class("active");
        button.remove_css_class("matched");
        button.remove_css_class("mismatch");
        match status {
            TileStatus::Matched => button.add_css_class("matched"),
            TileStatus::Flipped => button.add_css_class("active"),
            TileStatus::Hidden => (),
        }
        if mismatched.contains(&Some(index)) {
            button.add_css_class("mismatch");
        }
        if let Some(child) = button.child() {
            child.queue_draw();
        }
    }
}
