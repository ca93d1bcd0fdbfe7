mod logging;
mod ui;

fn main() -> glib::ExitCode {
    logging::init_tracing();
    ui::app::run()
}
