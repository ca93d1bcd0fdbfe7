use std::cell::RefCell;
use std::rc::Rc;
use std::sync::OnceLock;
use std::time::Instant;

use gio::SimpleAction;
use gtk4 as gtk;
use gtk4::gdk;
use gtk4::glib;
use gtk4::prelude::*;
use libadwaita as adw;
use matching_game_core::{
    Board, ClickOutcome, Game, GameConfig, GameSummary, GridSize, HideTicket,
};

use adw::prelude::*;

use super::board::{CONTENT_MARGIN, sync_tiles};
use super::dialogs::{
    SIZE_RULES, show_about_dialog, show_error_dialog, show_instructions_dialog,
    show_victory_dialog,
};
use super::hud::{set_header_menu, start_timer, stop_timer, update_subtitle};
use super::scene::{rebuild_board, show_game_view, show_menu};
use super::size_dialog::show_size_dialog;
use super::state::AppState;
use super::timer::GlibHideTimer;

const APP_ID: &str = "io.github.matchinggame.MatchingGame";
const RESOURCE_PREFIX: &str = "/io/github/matchinggame/MatchingGame";

pub fn run() -> glib::ExitCode {
    glib::set_prgname(Some(APP_ID));
    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        load_css();

        let config = GameConfig::from_env().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "invalid config, falling back to defaults");
            GameConfig::default()
        });
        let state = Rc::new(RefCell::new(AppState::new(config)));

        let instructions_action = SimpleAction::new("instructions", None);
        instructions_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_instructions_dialog(&app);
            }
        });
        app.add_action(&instructions_action);

        let about_action = SimpleAction::new("about", None);
        about_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_about_dialog(&app);
            }
        });
        app.add_action(&about_action);

        let quit_action = SimpleAction::new("quit", None);
        quit_action.connect_activate({
            let app = app.clone();
            move |_, _| app.quit()
        });
        app.add_action(&quit_action);

        let dynamic_css_provider = gtk::CssProvider::new();
        if let Some(display) = gdk::Display::default() {
            gtk::style_context_add_provider_for_display(
                &display,
                &dynamic_css_provider,
                gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
            );
        }

        let title_menu = gtk::Label::new(None);
        title_menu.set_markup("<b>Matching Game</b>");
        title_menu.set_halign(gtk::Align::Center);

        let title_game_box = gtk::Box::new(gtk::Orientation::Vertical, 0);
        title_game_box.set_valign(gtk::Align::Center);
        title_game_box.set_halign(gtk::Align::Center);
        title_game_box.set_hexpand(true);

        let title_game_main = gtk::Label::builder()
            .label("Matching Game")
            .halign(gtk::Align::Center)
            .css_classes(vec!["game-title-main"])
            .build();

        let title_game_subtitle = gtk::Label::builder()
            .label("")
            .halign(gtk::Align::Center)
            .css_classes(vec!["game-title-subtitle", "caption"])
            .build();

        title_game_box.append(&title_game_main);
        title_game_box.append(&title_game_subtitle);

        let header = adw::HeaderBar::builder()
            .title_widget(&title_menu)
            .build();
        header.add_css_class("app-header");
        header.add_css_class("flat");

        let back_button = gtk::Button::builder()
            .icon_name("go-previous-symbolic")
            .build();
        back_button.set_tooltip_text(Some("Back"));
        back_button.connect_clicked({
            let state = state.clone();
            move |_| {
                show_menu(&state);
            }
        });
        header.pack_start(&back_button);

        let menu_model = gio::Menu::new();
        menu_model.append(Some("Instructions"), Some("app.instructions"));
        menu_model.append(Some("About Matching Game"), Some("app.about"));
        menu_model.append(Some("Quit"), Some("app.quit"));
        let menu_button = gtk::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .menu_model(&menu_model)
            .build();

        let restart_button = gtk::Button::builder()
            .icon_name("view-refresh-symbolic")
            .build();
        restart_button.set_tooltip_text(Some("New Game"));
        restart_button.connect_clicked({
            let state = state.clone();
            move |_| {
                restart_game(&state);
            }
        });
        let end_box = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        end_box.append(&restart_button);
        end_box.append(&menu_button);
        header.pack_end(&end_box);

        let view_stack = gtk::Stack::new();
        view_stack.set_hexpand(true);
        view_stack.set_vexpand(true);
        view_stack.set_hhomogeneous(false);
        view_stack.set_vhomogeneous(false);
        view_stack.set_interpolate_size(false);
        view_stack.set_transition_type(gtk::StackTransitionType::SlideLeft);
        view_stack.set_transition_duration(300);

        let game_view = build_game_view(&state);
        view_stack.add_named(&game_view, Some("game"));

        let menu_view = build_menu_view(&state, app);
        view_stack.add_named(&menu_view, Some("menu"));

        view_stack.set_visible_child_name("menu");
        let toolbar = adw::ToolbarView::new();
        toolbar.set_hexpand(true);
        toolbar.set_vexpand(true);
        toolbar.add_top_bar(&header);
        toolbar.set_content(Some(&view_stack));

        let win = adw::ApplicationWindow::builder()
            .application(app)
            .title("Matching Game")
            .icon_name(APP_ID)
            .default_width(720)
            .default_height(760)
            .content(&toolbar)
            .build();
        win.set_size_request(360, 480);
        win.add_css_class("app-window");

        {
            let mut st = state.borrow_mut();
            st.window = Some(win.clone().upcast::<gtk::Window>());
            st.view_stack = Some(view_stack.clone());
            st.header = Some(header.clone());
            st.back_button = Some(back_button);
            st.restart_button = Some(restart_button);
            st.title_menu = Some(title_menu);
            st.title_game = Some(title_game_box.upcast::<gtk::Widget>());
            st.title_game_subtitle = Some(title_game_subtitle);
            st.dynamic_css_provider = Some(dynamic_css_provider);
        }

        let global_key = gtk::EventControllerKey::new();
        global_key.set_propagation_phase(gtk::PropagationPhase::Capture);
        global_key.connect_key_pressed({
            let state = state.clone();
            move |_, key, _, _| {
                if key == gdk::Key::Escape && state.borrow().in_game_view() {
                    show_menu(&state);
                    return glib::Propagation::Stop;
                }
                glib::Propagation::Proceed
            }
        });
        win.add_controller(global_key);

        set_header_menu(&state);
        win.present();
    });

    app.run()
}

fn load_css() {
    static RESOURCES_REGISTERED: OnceLock<bool> = OnceLock::new();
    let registered = *RESOURCES_REGISTERED.get_or_init(|| {
        match gio::resources_register_include!("matching-game.gresource") {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "failed to register embedded resources");
                false
            }
        }
    });
    if !registered {
        return;
    }

    let Some(display) = gdk::Display::default() else {
        return;
    };

    let provider = gtk::CssProvider::new();
    provider.load_from_resource(&format!("{RESOURCE_PREFIX}/style.css"));
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

fn build_menu_view(state: &Rc<RefCell<AppState>>, app: &adw::Application) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("main-menu-root");

    let center = gtk::CenterBox::new();
    center.set_hexpand(true);
    center.set_vexpand(true);

    let content = gtk::Box::new(gtk::Orientation::Vertical, 6);
    content.set_halign(gtk::Align::Center);
    content.set_valign(gtk::Align::Center);
    content.add_css_class("main-menu-content");

    let title = gtk::Label::new(Some("Matching Game"));
    title.add_css_class("main-menu-title");
    title.add_css_class("title-1");

    let prompt = gtk::Label::new(Some("Select Grid Size:"));
    prompt.add_css_class("main-menu-prompt");

    let buttons_box = gtk::Box::new(gtk::Orientation::Vertical, 10);
    buttons_box.set_halign(gtk::Align::Center);

    let presets = state.borrow().config.preset_sizes().unwrap_or_default();
    for size in presets {
        let button = gtk::Button::with_label(&size.to_string());
        button.add_css_class("main-menu-button");
        button.set_size_request(164, 40);
        button.connect_clicked({
            let state = state.clone();
            move |_| start_game(&state, size)
        });
        buttons_box.append(&button);
    }

    let custom_button = gtk::Button::with_label("Custom…");
    custom_button.add_css_class("main-menu-button");
    custom_button.set_size_request(164, 40);
    custom_button.connect_clicked({
        let state = state.clone();
        move |_| show_size_dialog(&state)
    });
    buttons_box.append(&custom_button);

    let exit_button = gtk::Button::with_label("Exit");
    exit_button.add_css_class("main-menu-button");
    exit_button.add_css_class("main-menu-exit");
    exit_button.set_size_request(164, 40);
    exit_button.connect_clicked({
        let app = app.clone();
        move |_| app.quit()
    });
    buttons_box.append(&exit_button);

    content.append(&title);
    content.append(&prompt);
    content.append(&buttons_box);

    center.set_center_widget(Some(&content));
    root.append(&center);

    root
}

fn build_game_view(state: &Rc<RefCell<AppState>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("game-root");

    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_hexpand(true);
    content.set_vexpand(true);
    content.set_halign(gtk::Align::Fill);
    content.set_valign(gtk::Align::Fill);
    content.set_margin_top(CONTENT_MARGIN);
    content.set_margin_bottom(CONTENT_MARGIN);
    content.set_margin_start(CONTENT_MARGIN);
    content.set_margin_end(CONTENT_MARGIN);

    let board_frame = gtk::AspectFrame::new(0.5, 0.5, 1.0, false);
    board_frame.set_halign(gtk::Align::Fill);
    board_frame.set_valign(gtk::Align::Fill);
    board_frame.set_hexpand(true);
    board_frame.set_vexpand(true);

    let board_card = gtk::Box::new(gtk::Orientation::Vertical, 0);
    board_card.set_halign(gtk::Align::Fill);
    board_card.set_valign(gtk::Align::Fill);
    board_card.set_hexpand(true);
    board_card.set_vexpand(true);
    board_card.add_css_class("match-board-container");

    board_frame.set_child(Some(&board_card));
    content.append(&board_frame);
    root.append(&content);

    state.borrow_mut().board_container = Some(board_card);

    root
}

/// Deals a fresh board of `size` and shows it. The previous game, if any, is
/// dropped along with its pending hide.
pub(super) fn start_game(state: &Rc<RefCell<AppState>>, size: GridSize) {
    let board = {
        let st = state.borrow();
        Board::random(size, &st.config.palette)
    };
    let board = match board {
        Ok(board) => board,
        Err(err) => {
            tracing::warn!(%size, error = %err, "cannot deal board");
            show_error_dialog(state, "Cannot start game", &format!("{err}.\n\n{SIZE_RULES}"));
            return;
        }
    };

    {
        let mut st = state.borrow_mut();
        stop_timer(&mut st);
        st.game_id = st.game_id.wrapping_add(1);
        st.grid_size = size;
        let hide_delay = st.config.hide_delay();
        st.game = Some(Game::new(board, hide_delay, GlibHideTimer::new(state)));
    }
    tracing::info!(%size, "new game");

    rebuild_board(state);
    show_game_view(state);
}

fn restart_game(state: &Rc<RefCell<AppState>>) {
    let size = state.borrow().grid_size;
    start_game(state, size);
}

pub fn handle_tile_click(state: &Rc<RefCell<AppState>>, index: usize) {
    let mut st = state.borrow_mut();
    let Some(pos) = st.grid_size.position_of(index) else {
        return;
    };
    let Some(game) = st.game.as_mut() else {
        return;
    };

    let outcome = game.click(pos, Instant::now());
    let game_id = st.game_id;
    let needs_clock = st.timer_handle.is_none();
    let victory = match outcome {
        ClickOutcome::Ignored => return,
        ClickOutcome::Won { summary, .. } => {
            stop_timer(&mut st);
            Some(summary)
        }
        ClickOutcome::FirstPick { .. }
        | ClickOutcome::Matched { .. }
        | ClickOutcome::Mismatched { .. } => None,
    };

    sync_tiles(&st);
    update_subtitle(&st);
    drop(st);

    match victory {
        Some(summary) => schedule_victory_dialog(state, game_id, summary),
        None if needs_clock => start_timer(state),
        None => {}
    }
}

pub(super) fn handle_hide_elapsed(state: &Rc<RefCell<AppState>>, ticket: HideTicket) {
    let mut st = state.borrow_mut();
    let Some(game) = st.game.as_mut() else {
        return;
    };
    if game.hide_elapsed(ticket).is_some() {
        sync_tiles(&st);
    }
}

fn schedule_victory_dialog(state: &Rc<RefCell<AppState>>, game_id: u64, summary: GameSummary) {
    let delay = state.borrow().config.victory_delay();
    let state_victory = state.clone();
    glib::timeout_add_local_once(delay, move || {
        if state_victory.borrow().game_id != game_id {
            return;
        }
        show_victory_dialog(&state_victory, summary);
    });
}
