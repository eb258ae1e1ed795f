mod app;
mod clock;
mod domain;
mod error;
mod input;
mod logging;
mod persistence;
mod presenter;
mod todo_list;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{Filter, TaskId};
use error::TodoError;
use persistence::{ensure_data_dir, init_local_dir, log_file, FileStore};
use presenter::{PlainPresenter, ViewCache};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use todo_list::TodoList;
use tracing::warn;

/// How long to wait for input before advancing countdowns
const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "countdo")]
#[command(about = "A terminal task list with live per-task countdowns", long_about = None)]
struct Cli {
    /// Data directory. Defaults to the nearest .countdo directory, then ~/.countdo
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .countdo directory in the current directory
    Init,
    /// Add a task
    Add {
        /// Task text
        text: String,
        /// Due date and time (YYYY-MM-DDTHH:MM local time, or RFC 3339)
        #[arg(short, long)]
        due: String,
    },
    /// List tasks
    List {
        /// all, active or completed
        #[arg(short, long, default_value = "all")]
        filter: Filter,
    },
    /// Toggle a task between active and completed
    Toggle { id: TaskId },
    /// Delete a task
    Delete { id: TaskId },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let dir = cli.dir.as_deref();

    let Some(command) = cli.command else {
        return run_tui(dir);
    };

    logging::init_stderr();
    match command {
        Commands::Init => {
            let data_dir = init_local_dir()?;
            println!("Initialized countdo directory: {}", data_dir.display());
            println!();
            println!("countdo will now use this local directory for task storage.");
            Ok(())
        }
        Commands::Add { text, due } => {
            let mut list = open_list(dir)?;
            let id = list.add_raw(&text, &due)?;
            println!("Added task {}", id);
            finish(list)
        }
        Commands::List { filter } => {
            let mut list = open_list(dir)?;
            list.set_filter(filter);
            Ok(())
        }
        Commands::Toggle { id } => {
            let mut list = open_list(dir)?;
            if !list.toggle(id) {
                return Err(TodoError::NotFound(id).into());
            }
            finish(list)
        }
        Commands::Delete { id } => {
            let mut list = open_list(dir)?;
            if !list.delete(id) {
                return Err(TodoError::NotFound(id).into());
            }
            finish(list)
        }
    }
}

type CliList = TodoList<FileStore, PlainPresenter<io::Stdout>>;

/// Open the stored tasks for a one-shot command
fn open_list(dir: Option<&Path>) -> Result<CliList> {
    let data_dir = ensure_data_dir(dir)?;
    let mut list = TodoList::new(FileStore::new(&data_dir), PlainPresenter::new(io::stdout()));
    list.load();
    Ok(list)
}

/// Make sure the last change reached the store
fn finish(mut list: CliList) -> Result<()> {
    list.flush().context("Failed to save tasks")?;
    Ok(())
}

fn run_tui(dir: Option<&Path>) -> Result<()> {
    let data_dir = ensure_data_dir(dir)?;
    logging::init_file(&log_file(&data_dir))?;
    let store = FileStore::new(&data_dir);
    eprintln!("Using countdo directory: {}", store.dir().display());

    let list = TodoList::new(store, ViewCache::new());
    let mut app = AppState::new(list);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = app.save() {
        eprintln!("Error saving tasks: {}", e);
    }

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState<FileStore>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick();

        if app.list.needs_save() {
            if let Err(e) = app.save() {
                warn!("Tasks still unsaved: {:#}", e);
                app.status = Some(format!("Unsaved changes: {}", e));
            }
        }
    }
}
