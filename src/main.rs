mod api;
mod app;
mod config;
mod logging;
mod pipeline;
mod ui;
mod view;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;

use api::PipelineClient;
use app::{App, ViewState};
use config::{AppConfig, Overrides};

#[derive(Parser, Debug)]
#[command(name = "genodash")]
#[command(version)]
#[command(about = "Terminal dashboard for genomics pipeline inputs, outputs and stage status")]
struct Args {
    /// Pipeline data URL (overrides the config file)
    #[arg(short, long)]
    url: Option<String>,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Fetch once, print the dashboard as plain text and exit
    #[arg(short, long)]
    print: bool,

    /// Read this config file instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    logging::init(&logging::LogTarget::for_mode(!args.print));

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load().unwrap_or_default(),
    }
    .apply(Overrides {
        endpoint: args.url.clone(),
        request_timeout_secs: args.timeout,
    });

    let endpoint = config.endpoint_url()?;
    let client = PipelineClient::new(endpoint, config.request_timeout());

    if args.print {
        return print_dashboard(client).await;
    }

    run_tui(client).await
}

async fn print_dashboard(client: PipelineClient) -> Result<()> {
    let text = app::render_once(client).await?;
    print!("{}", text);
    Ok(())
}

async fn run_tui(client: PipelineClient) -> Result<()> {
    // Restore the terminal if anything panics while it is in raw mode
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(client);
    app.activate();

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let ViewState::Failed(reason) = &app.state {
        eprintln!("Error: could not load pipeline data from {}: {}", app.endpoint(), reason);
    }

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick();
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
