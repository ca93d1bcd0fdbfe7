use gtk4 as gtk;
use libadwaita as adw;
use matching_game_core::{Cell, Game, GameConfig, GridSize};

use super::timer::GlibHideTimer;

pub struct AppState {
    pub config: GameConfig,

    pub window: Option<gtk::Window>,
    pub view_stack: Option<gtk::Stack>,
    pub header: Option<adw::HeaderBar>,
    pub back_button: Option<gtk::Button>,
    pub restart_button: Option<gtk::Button>,
    pub title_menu: Option<gtk::Label>,
    pub title_game: Option<gtk::Widget>,
    pub title_game_subtitle: Option<gtk::Label>,
    pub board_container: Option<gtk::Box>,
    pub dynamic_css_provider: Option<gtk::CssProvider>,
    pub grid_buttons: Vec<gtk::Button>,

    // Game state
    pub grid_size: GridSize,
    pub game: Option<Game<GlibHideTimer>>,
    pub game_id: u64,
    pub timer_handle: Option<glib::SourceId>,
}

impl AppState {
    pub fn new(config: GameConfig) -> Self {
        let grid_size = config
            .preset_sizes()
            .ok()
            .and_then(|sizes| sizes.first().copied())
            .unwrap_or_default();
        AppState {
            config,
            window: None,
            view_stack: None,
            header: None,
            back_button: None,
            restart_button: None,
            title_menu: None,
            title_game: None,
            title_game_subtitle: None,
            board_container: None,
            dynamic_css_provider: None,
            grid_buttons: Vec::new(),
            grid_size,
            game: None,
            game_id: 0,
            timer_handle: None,
        }
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.game
            .as_ref()
            .and_then(|game| game.board().cells().get(index))
    }

    pub fn in_game_view(&self) -> bool {
        self.view_stack
            .as_ref()
            .and_then(|stack| stack.visible_child_name())
            .as_deref()
            == Some("game")
    }
}
