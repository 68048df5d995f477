//! Sarufi TUI Entry Point
//!
//! Launches the terminal chat client for Sarufi bots.
//!
//! Usage:
//!   SARUFI_API_KEY=<key> sarufi-tui [OPTIONS]
//!
//! Options:
//!   --base-url <URL>         Sarufi API root
//!   --wrap-width <COLUMNS>   Transcript wrap width (default: 50)
//!   --tick-ms <MS>           Spinner tick interval (default: 100)
//!   -c, --config <FILE>      Configuration file

use std::io;
use std::panic;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sarufi_chat_core::{ClientConfig, ConfigError, RemoteBotGateway, SarufiGateway};
use sarufi_tui::cli::Args;
use sarufi_tui::App;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so they never mix with the UI on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = match args.load_config() {
        Ok(config) => config,
        Err(e @ ConfigError::MissingCredential { .. }) => {
            println!("{e}");
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e.into()),
    };
    tracing::debug!(?config, source = %config.source(), "Configuration loaded");

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: sarufi-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  • Running in a non-interactive environment (CI, container)");
        eprintln!("  • SSH without -t flag");
        eprintln!("  • Piped stdin/stdout");
        return Ok(ExitCode::FAILURE);
    }

    let gateway: Arc<dyn RemoteBotGateway> = Arc::new(SarufiGateway::from_config(&config)?);

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, gateway, &config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Propagate any errors
    result.map(|()| ExitCode::SUCCESS)
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    gateway: Arc<dyn RemoteBotGateway>,
    config: &ClientConfig,
) -> anyhow::Result<()> {
    tracing::info!(gateway = gateway.name(), base_url = %config.base_url, "Connecting");
    let mut app = App::new(gateway, config);
    app.run(terminal).await
}
