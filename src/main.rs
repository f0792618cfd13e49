use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use global_explorer::{
    App, AppConfig, FeedbackPort, FetchSources, SilentFeedback, SoundToggle, TonePlayer, draw,
    handle_key, logger, spawn_fetch_worker,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

const IDLE_POLL: Duration = Duration::from_millis(100);

fn main() -> io::Result<()> {
    logger::init();
    tracing::info!("Global Explorer starting");

    let config = AppConfig::from_env();

    let player: Arc<dyn FeedbackPort> = match TonePlayer::spawn() {
        Ok(player) => Arc::new(player),
        Err(e) => {
            tracing::warn!("Failed to start audio thread: {}", e);
            Arc::new(SilentFeedback)
        }
    };
    let sound = SoundToggle::new(player, config.sound_enabled);

    let (request_tx, request_rx) = crossbeam_channel::unbounded();
    let (response_tx, response_rx) = crossbeam_channel::unbounded();
    let _worker = spawn_fetch_worker(response_tx, request_rx, FetchSources::from_config(&config))?;

    let mut app = App::new(config.quiz_config(), sound, request_tx);
    app.request_countries();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &response_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("Exited with error: {}", e);
    }
    tracing::info!("Global Explorer exiting");
    result
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    responses: &crossbeam_channel::Receiver<global_explorer::FetchResponse>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        // Wake up in time for the next auto-advance
        let now = Instant::now();
        let timeout = app
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now).min(IDLE_POLL))
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            handle_key(app, key, Instant::now());
        }

        app.tick(Instant::now());

        while let Ok(response) = responses.try_recv() {
            app.handle_response(response);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
