mod config;
mod logging;
mod menu;
mod order;
mod shortcut;
mod tui;

use anyhow::Result;
use clap::{Command, CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};
use config::{Config, ConfigError, KEYS};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use menu::catalog::Catalog;
use menu::models::FoodCategory;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use shortcut::bridge::ShortcutBridge;
use shortcut::intent::ShortcutIntent;
use shortcut::listener::{self, ShortcutListener};
use std::io;
use std::time::Duration;
use tui::{app::App, ui};
use url::Url;

const TICK: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(name = "foodorder")]
#[command(about = "A terminal food-ordering demo with external shortcuts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Configuration management")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    #[command(about = "Generate shell completion scripts")]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
    #[command(about = "Send a shortcut to a running instance")]
    Shortcut {
        #[command(subcommand)]
        action: ShortcutAction,
    },
    #[command(about = "Send a deep link to a running instance")]
    OpenUrl {
        #[arg(help = "Deep link, e.g. shortcuts://openBasket")]
        url: Url,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    #[command(about = "Set a configuration value")]
    Set {
        #[arg(help = "Configuration key (shortcut_addr, pricing, log_file)")]
        key: String,
        #[arg(help = "Configuration value")]
        value: String,
    },
    #[command(about = "Get a configuration value")]
    Get {
        #[arg(help = "Configuration key")]
        key: String,
    },
    #[command(about = "List all configuration values")]
    List,
}

#[derive(Subcommand)]
enum ShortcutAction {
    #[command(about = "Show the basket")]
    OpenBasket,
    #[command(about = "Filter the catalog by health tags")]
    FilterHealthTag {
        #[arg(help = "Health tag keys, e.g. vegan glutenFree", required = true)]
        tags: Vec<String>,
    },
    #[command(about = "Filter the catalog by category")]
    FilterCategory {
        #[arg(help = "Category key, e.g. mainCourse")]
        category: FoodCategory,
    },
}

impl ShortcutAction {
    fn into_intent(self) -> ShortcutIntent {
        match self {
            Self::OpenBasket => ShortcutIntent::OpenBasket,
            Self::FilterHealthTag { tags } => {
                ShortcutIntent::FilterByHealthTag(tags.into_iter().map(Some).collect())
            }
            Self::FilterCategory { category } => ShortcutIntent::FilterByCategory(category),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { action }) => {
            if let Err(e) = handle_config_command(action) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            print_completions(shell, &mut cmd);
        }
        Some(Commands::Shortcut { action }) => {
            let line = action.into_intent().to_string();
            exit_on_error(send_line(&line));
        }
        Some(Commands::OpenUrl { url }) => {
            let line = ShortcutIntent::OpenUrl(url).to_string();
            exit_on_error(send_line(&line));
        }
        None => exit_on_error(run_main_app()),
    }
}

fn exit_on_error(result: Result<()>) {
    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn handle_config_command(action: ConfigAction) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_or_default()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("Configuration saved successfully.");
        }
        ConfigAction::Get { key } => {
            let config = Config::load_or_default()?;
            println!("{}", config.get(&key)?);
        }
        ConfigAction::List => {
            let config = Config::load_or_default()?;
            for key in KEYS {
                println!("{} = {}", key, config.get(key)?);
            }
        }
    }
    Ok(())
}

fn send_line(line: &str) -> Result<()> {
    let config = Config::load_or_default()?;
    let reply = listener::send(&config.shortcut_addr, line)?;

    match reply.as_str() {
        "ok" => Ok(()),
        "no-handler" => {
            println!("The running instance has no screen attached yet; shortcut ignored.");
            Ok(())
        }
        other => anyhow::bail!("{}", other.trim_start_matches("error: ")),
    }
}

fn run_main_app() -> Result<()> {
    let config = Config::load_or_default()
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    if let Some(path) = logging::resolve_log_path(config.log_file.as_deref()) {
        logging::init_logging(&path)?;
    }

    let bridge = ShortcutBridge::shared();
    match ShortcutListener::spawn(&config.shortcut_addr, bridge) {
        Ok(listener) => {
            tracing::debug!(addr = %listener.local_addr(), "shortcut listener ready")
        }
        Err(e) => tracing::warn!(
            addr = %config.shortcut_addr,
            "shortcuts disabled, could not bind: {}", e
        ),
    }

    let mut app = App::new(Catalog::seeded(), config.pricing);
    tracing::info!(
        pricing = %config.pricing,
        shortcuts_attached = bridge.is_attached(),
        "starting"
    );

    run_tui(&mut app)?;
    bridge.unregister();

    Ok(())
}

fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.sync_external_actions();
        terminal.draw(|f| ui::draw(f, app))?;

        // Poll so shortcuts arriving from the listener show up without a key press
        if !event::poll(TICK)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key_event(key)?;
            if app.should_quit {
                break;
            }
        }
    }
    Ok(())
}

fn print_completions<G: Generator>(generator: G, cmd: &mut Command) {
    generate(generator, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
