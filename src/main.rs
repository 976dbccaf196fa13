mod calendar;
mod config;
mod error;
mod logging;
mod models;
mod progress;
mod storage;
mod transfer;
mod ui;

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::prelude::*;

use crate::config::Config;
use crate::error::AppError;
use crate::progress::{WeekStats, week_dates};
use crate::storage::{FileStore, load_data, save_data};
use crate::transfer::{export_data, import_file};
use crate::ui::{App, render};

#[derive(Parser)]
#[command(name = "zenplan")]
#[command(about = "Plan your week: tasks, habits and daily focus in the terminal")]
#[command(version)]
struct Cli {
    /// Data directory (default: ~/.local/share/zenplan)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default: ~/.config/zenplan/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a JSON backup named zenplan-backup-<date>.json
    Export {
        /// Target directory (default: configured export dir, then Downloads)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Replace all data with the contents of a backup file
    Import {
        /// Backup file to import
        file: PathBuf,
    },

    /// Print this week's progress
    Progress,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = match cli.config.or_else(Config::default_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    let data_dir = cli
        .data_dir
        .or_else(|| config.resolve_data_dir())
        .ok_or(AppError::NoDirectory("data"))?;

    let _logger = logging::init_logging(&config.log_level, &data_dir.join("logs"))?;

    let store = FileStore::new(&data_dir);
    let today = Local::now().date_naive();

    match cli.command {
        None => cmd_tui(&config, store, &data_dir, today),
        Some(Commands::Export { out }) => {
            let dir = out.unwrap_or_else(|| config.resolve_export_dir(&data_dir));
            cmd_export(&config, &store, &dir, today)
        }
        Some(Commands::Import { file }) => cmd_import(store, &file),
        Some(Commands::Progress) => cmd_progress(&config, &store, today),
    }
}

fn cmd_export(config: &Config, store: &FileStore, dir: &Path, today: NaiveDate) -> Result<(), AppError> {
    let data = load_data(store, config.seed_default_habits)?;
    let path = export_data(&data, dir, today)?;
    println!("{}", path.display());
    Ok(())
}

fn cmd_import(mut store: FileStore, file: &Path) -> Result<(), AppError> {
    let data = import_file(file).inspect_err(|e| eprintln!("{}", e.user_message()))?;
    save_data(&mut store, &data)?;
    println!(
        "Data successfully imported! ({} tasks, {} habits)",
        data.tasks.len(),
        data.habits.len()
    );
    Ok(())
}

fn cmd_progress(config: &Config, store: &FileStore, today: NaiveDate) -> Result<(), AppError> {
    let data = load_data(store, config.seed_default_habits)?;
    let week = week_dates(today);
    let stats = WeekStats::compute(&week, &data.tasks, &data.habits);
    println!(
        "Week {} to {}: {:.1}%  (tasks {}/{}, habits {}/{})",
        week[0],
        week[6],
        stats.percent(),
        stats.tasks_done,
        stats.tasks_total,
        stats.habits_done,
        stats.habit_slots
    );
    Ok(())
}

fn cmd_tui(config: &Config, store: FileStore, data_dir: &Path, today: NaiveDate) -> Result<(), AppError> {
    let data = load_data(&store, config.seed_default_habits)?;
    let export_dir = config.resolve_export_dir(data_dir);
    let mut app = App::new(data, Box::new(store), today, export_dir);

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("event=app_exit tasks={} habits={}", app.data.tasks.len(), app.data.habits.len());
    println!("Data stored in {}", data_dir.display());

    result.map_err(AppError::from)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.set_today(Local::now().date_naive());
            if ui::handle_key_event(app, key.code) {
                break;
            }
        }
    }
    Ok(())
}
