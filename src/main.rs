//! # dlogview CLI Entry Point
//!
//! Lists the containers known to the local Docker daemon and follows the logs
//! of whichever one is selected.
//!
//! ## Usage
//!
//! ```bash
//! # Running containers, full history
//! dlogview
//!
//! # Include stopped containers, last 200 lines, with timestamps
//! dlogview --all --tail 200 --timestamps
//!
//! # Print the containers that would be listed and exit
//! dlogview --list
//! ```
//!
//! ## Key Bindings
//!
//! ### Container List (left panel)
//! - `j` / `Down` - Select next container (wraps)
//! - `k` / `Up` - Select previous container (wraps)
//! - `Tab` - Focus the log view
//! - `q` / `Ctrl+q` - Quit
//!
//! ### Log View (right panel)
//! - `j` / `k` - Scroll down/up by line
//! - `PageDown` / `PageUp`, `Ctrl+d` / `Ctrl+u` - Scroll by page
//! - `g` / `G` - Jump to top/bottom
//! - `Tab` - Focus the container list
//! - `Ctrl+q` - Quit

use dlogview::logging;
use dlogview::runtime::{Container, ContainerLister, DockerRuntime, LogSource};
use dlogview::ui;
use dlogview::ui::config::Config;
use dlogview::ui::theme::Theme;
use dlogview::ui::App;
use dlogview::ViewerError;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// How long the input loop waits for a key before redrawing streamed output.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Trait for reading terminal events (allows dependency injection for testing)
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Production event reader that uses crossterm's event polling + read
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read keyboard event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// dlogview - follow the logs of the selected Docker container
#[derive(Parser, Debug)]
#[command(name = "dlogview")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Follow the logs of the selected Docker container", long_about = None)]
struct Args {
    /// Include stopped containers
    #[arg(short, long)]
    all: bool,

    /// Lines of history to replay when a stream opens ("all" or a number)
    #[arg(long, value_name = "N")]
    tail: Option<String>,

    /// Prefix each log line with its timestamp
    #[arg(short, long)]
    timestamps: bool,

    /// Color theme name
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Directory for the diagnostic log file
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Print the containers that would be listed and exit
    #[arg(long)]
    list: bool,

    /// Persist the effective settings to the config file
    #[arg(long)]
    save_config: bool,
}

impl Args {
    /// Apply command-line overrides on top of the loaded config.
    fn apply(&self, config: &mut Config) {
        if self.all {
            config.all = true;
        }
        if let Some(tail) = &self.tail {
            config.tail.clone_from(tail);
        }
        if self.timestamps {
            config.timestamps = true;
        }
        if let Some(theme) = &self.theme {
            config.theme.clone_from(theme);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_application(args).await;

    let _ = panic::take_hook();

    result
}

async fn run_application(args: Args) -> Result<()> {
    let mut config = Config::load();
    args.apply(&mut config);
    validate_tail(&config.tail)?;

    if args.save_config {
        config.save().context("Failed to save config")?;
    }

    let log_dir = match args.log_dir.clone() {
        Some(dir) => dir,
        None => Config::default_log_dir()?,
    };
    let _log_guard = match logging::init(&config.log_level, &log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Could not initialize logging: {:#}", e);
            None
        }
    };

    let runtime = DockerRuntime::connect(config.all, config.log_options())
        .await
        .context("Failed to connect to the Docker daemon")?;
    let containers = runtime.list().await.context("Failed to list containers")?;
    info!(count = containers.len(), all = config.all, "enumerated containers");

    if args.list {
        print_containers(&containers);
        return Ok(());
    }

    if containers.is_empty() {
        eprintln!("Error: No containers found");
        if !config.all {
            eprintln!("\nOnly running containers are listed. Use --all to include stopped ones.");
        }
        return Err(ViewerError::EmptyCollection.into());
    }

    let theme = Theme::resolve(&config.theme);
    let mut app = App::new(containers, Arc::new(runtime), theme)?;

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut event_reader = CrosstermEventReader;
    app.start().await;
    let run_result = run_app(&mut terminal, &mut app, &mut event_reader).await;

    app.shutdown().await;

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = cleanup_terminal(&mut terminal);

    run_result?;
    cleanup_result?;

    Ok(())
}

fn validate_tail(tail: &str) -> Result<()> {
    if tail == "all" || tail.parse::<u64>().is_ok() {
        Ok(())
    } else {
        anyhow::bail!("Invalid --tail value '{}': expected \"all\" or a number", tail)
    }
}

fn print_containers(containers: &[Container]) {
    for (i, container) in containers.iter().enumerate() {
        println!(
            "{:>3}  {:<30} {:<40} {}",
            i, container.display_name, container.image, container.state
        );
    }
    println!("\nTotal: {} containers", containers.len());
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

async fn run_app<L: LogSource>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<L>,
    event_reader: &mut dyn EventReader,
) -> Result<()> {
    loop {
        let size = terminal.size().context("Failed to read terminal size")?;
        let log_area = ui::render::log_inner_area(Rect::new(0, 0, size.width, size.height));
        app.resize_log_view(log_area.height, log_area.width);

        terminal
            .draw(|f| ui::render(f, app))
            .context("Failed to draw terminal UI")?;

        // Redraw on timeout so streamed output shows up without input.
        if let Some(event) = event_reader.read_event(POLL_INTERVAL)? {
            process_event(app, event).await;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

async fn process_event<L: LogSource>(app: &mut App<L>, event: Event) {
    if let Event::Key(key) = event {
        if key.kind == KeyEventKind::Press {
            app.handle_key(key).await;
        }
    }
}
