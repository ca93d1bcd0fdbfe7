pub mod app;
mod board;
mod dialogs;
mod hud;
mod scene;
mod size_dialog;
mod state;
mod timer;
