use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_problem) = settings::load_settings();
    let log_path = settings::log_file_path(&settings.storage);
    settings::init_logging(&settings.log, log_path.as_deref());
    if let Some(problem) = config_problem {
        warn!("{problem}");
    }

    let storage = startup::open_storage(&settings.storage);
    let mut app = startup::build_app(&settings, storage);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new();
        event_loop::run(&mut terminal, &settings, &mut app, &mut state)
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("session ended with {} tracks", app.tracks().len());
    run_result
}
