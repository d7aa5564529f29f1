//! Command-line front end for the study planner.
//!
//! # Responsibility
//! - Map subcommands onto board operations; no persistence logic lives here.
//! - Open one board per invocation, matching one screen activation.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::error;
use planner_core::db::open_db;
use planner_core::{
    format_iso_date, init_logging, parse_iso_date, today_local, Goal, GoalBoard, PlannerConfig,
    Priority, Screen, SqliteKeyValueStore, Subject, Task, TaskBoard,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Study planner: daily tasks and progress goals stored on this device.
#[derive(Parser, Debug)]
#[command(name = "study-planner")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "STUDY_PLANNER_DB")]
    db: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "STUDY_PLANNER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for log files; logging is off when unset
    #[arg(long, global = true, env = "STUDY_PLANNER_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show today's tasks and completion progress
    Today,
    /// List tasks for a date (defaults to today)
    Tasks {
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Add a task
    AddTask {
        title: String,
        /// Subject label or alias (math, english, korean, science, social, other)
        #[arg(long)]
        subject: String,
        #[arg(long, value_parser = parse_priority_arg, default_value = "medium")]
        priority: Priority,
        /// Scheduled date (defaults to today)
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Toggle a task's completion
    Toggle { id: String },
    /// Delete a task
    DeleteTask { id: String },
    /// List goals with progress
    Goals,
    /// Add a goal
    AddGoal {
        title: String,
        #[arg(long)]
        target: i64,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, value_parser = parse_date_arg)]
        deadline: Option<NaiveDate>,
    },
    /// Move a goal's progress by DELTA (clamped to 0..=target)
    Progress {
        id: String,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Delete a goal
    DeleteGoal { id: String },
    /// List selectable subjects
    Subjects,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = PlannerConfig::with_overrides(cli.db, cli.log_level, cli.log_dir);

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, &log_dir.to_string_lossy()) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    match run(&config, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &PlannerConfig, command: Command) -> Result<(), Box<dyn Error>> {
    let conn = open_db(&config.db_path)?;
    let store = SqliteKeyValueStore::try_new(&conn)?;

    match command {
        Command::Today => {
            let board = TaskBoard::open(&store, Screen::Today)?;
            let today = today_local();
            let summary = board.day_summary(today);
            println!("{} progress {}%", format_iso_date(today), summary.percent);
            println!(
                "total {} / completed {} / remaining {}",
                summary.total, summary.completed, summary.remaining
            );
            print_tasks(&board.today());
        }
        Command::Tasks { date } => {
            let board = TaskBoard::open(&store, Screen::Planner)?;
            let date = date.unwrap_or_else(today_local);
            println!("{}", format_iso_date(date));
            print_tasks(&board.filter_by_date(date));
        }
        Command::AddTask {
            title,
            subject,
            priority,
            date,
        } => {
            let mut board = TaskBoard::open(&store, Screen::Planner)?;
            let task = board.add_task(&title, &subject, priority, date.unwrap_or_else(today_local))?;
            println!("added {}", task.id);
        }
        Command::Toggle { id } => {
            let mut board = TaskBoard::open(&store, Screen::Today)?;
            match board.toggle_task(&id)? {
                Some(task) => println!("{} completed={}", task.id, task.completed),
                None => println!("no task with id {id}"),
            }
        }
        Command::DeleteTask { id } => {
            let mut board = TaskBoard::open(&store, Screen::Planner)?;
            if board.delete_task(&id)? {
                println!("deleted {id}");
            } else {
                println!("no task with id {id}");
            }
        }
        Command::Goals => {
            let board = GoalBoard::open(&store)?;
            if board.goals().is_empty() {
                println!("no goals yet");
            }
            for goal in board.goals() {
                print_goal(goal);
            }
        }
        Command::AddGoal {
            title,
            target,
            description,
            deadline,
        } => {
            let mut board = GoalBoard::open(&store)?;
            let goal = board.add_goal(&title, &description, target, deadline)?;
            println!("added {}", goal.id);
        }
        Command::Progress { id, delta } => {
            let mut board = GoalBoard::open(&store)?;
            match board.adjust_progress(&id, delta)? {
                Some(goal) => print_goal(&goal),
                None => println!("no goal with id {id}"),
            }
        }
        Command::DeleteGoal { id } => {
            let mut board = GoalBoard::open(&store)?;
            if board.delete_goal(&id)? {
                println!("deleted {id}");
            } else {
                println!("no goal with id {id}");
            }
        }
        Command::Subjects => {
            for subject in Subject::ALL {
                println!("{}\t{}", subject.alias(), subject.label());
            }
        }
    }

    Ok(())
}

fn print_tasks(tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("no tasks for this date");
        return;
    }
    for task in tasks {
        let mark = if task.completed { "x" } else { " " };
        println!(
            "[{mark}] {}  {}  ({}, {})",
            task.id,
            task.title,
            task.subject,
            task.priority.label()
        );
    }
}

fn print_goal(goal: &Goal) {
    println!(
        "{}  {}  {} / {} ({}%){}",
        goal.id,
        goal.title,
        goal.current,
        goal.target,
        goal.progress_percent(),
        if goal.is_achieved() { "  achieved" } else { "" }
    );
    if let Some(description) = &goal.description {
        println!("    {description}");
    }
    if let Some(deadline) = goal.deadline {
        println!("    deadline {}", format_iso_date(deadline));
    }
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_iso_date(value).map_err(|err| err.to_string())
}

fn parse_priority_arg(value: &str) -> Result<Priority, String> {
    Priority::parse(value).map_err(|err| err.to_string())
}
