use anyhow::{Context, Result};
use chrono::Local;
use shared::{AddRecordRequest, Record};
use training_log_backend::{AppError, DbConnection, KeyValueStorage, TrainingLog};

use crate::cli::{AddRecordArgs, Command, ExportArgs, ImportArgs, MenuCommand, RecordCommand};
use crate::config::Config;

pub async fn run(command: Command, config: &Config) -> Result<()> {
    let db = DbConnection::open(config.database_path())
        .await
        .with_context(|| format!("open database in {}", config.data_dir().display()))?;
    let mut log = TrainingLog::open(db).await?;

    match command {
        Command::Menu(command) => run_menu(&mut log, command).await,
        Command::Record(command) => run_record(&mut log, command).await,
        Command::Export(args) => run_export(&log, &args),
        Command::Import(args) => run_import(&mut log, &args).await,
    }
}

async fn run_menu<S: KeyValueStorage>(log: &mut TrainingLog<S>, command: MenuCommand) -> Result<()> {
    match command {
        MenuCommand::List => {}
        MenuCommand::Add { name } => log.add_menu(&name).await?,
        MenuCommand::Remove { name } => log.remove_menu(&name).await?,
    }
    print_menus(log.menus(), log.active_menu());
    Ok(())
}

async fn run_record<S: KeyValueStorage>(log: &mut TrainingLog<S>, command: RecordCommand) -> Result<()> {
    match command {
        RecordCommand::List => print_records(&log.sorted_records()),
        RecordCommand::Add(args) => {
            let record = log.add_record(add_request(args)).await?;
            println!("Logged {}", format_record(&record));
        }
        RecordCommand::Remove { id } => {
            if log.remove_record(&id).await? {
                println!("Removed record {id}");
            } else {
                println!("No record with id {id}");
            }
        }
    }
    Ok(())
}

fn run_export<S: KeyValueStorage>(log: &TrainingLog<S>, args: &ExportArgs) -> Result<()> {
    let file = log.export(Local::now().date_naive())?;
    if args.stdout {
        println!("{}", file.content);
        return Ok(());
    }

    let response = log
        .export_service()
        .export_to_path(&file, args.out.as_deref())?;
    println!(
        "Exported {} menus and {} records to {}",
        response.menu_count, response.record_count, response.file_path
    );
    Ok(())
}

async fn run_import<S: KeyValueStorage>(log: &mut TrainingLog<S>, args: &ImportArgs) -> Result<()> {
    let summary = log.import_file(&args.file).await?;
    println!(
        "Imported {} menus and {} records",
        summary.menu_count, summary.record_count
    );
    if summary.discarded_records > 0 {
        println!("Skipped {} invalid records", summary.discarded_records);
    }
    Ok(())
}

/// The record form: a missing date means today, a missing menu means the active one
fn add_request(args: AddRecordArgs) -> AddRecordRequest {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    AddRecordRequest {
        date: date.format("%Y-%m-%d").to_string(),
        menu: args.menu.unwrap_or_default(),
        weight: args.weight,
        reps: args.reps,
    }
}

fn print_menus(menus: &[String], active_menu: &str) {
    for menu in menus {
        let marker = if menu == active_menu { "*" } else { " " };
        println!("{marker} {menu}");
    }
}

fn print_records(records: &[Record]) {
    if records.is_empty() {
        println!("No records yet");
        return;
    }
    for record in records {
        println!("{}", format_record(record));
    }
}

pub fn format_record(record: &Record) -> String {
    format!(
        "{}  {}  {} x {}  [{}]",
        record.date, record.menu, record.weight, record.reps, record.id
    )
}

/// Print an error for the user. Validation failures get one line per message.
pub fn report_error(error: &anyhow::Error) {
    match error.downcast_ref::<AppError>() {
        Some(AppError::Validation(errors)) => {
            for message in errors.messages() {
                eprintln!("error: {message}");
            }
        }
        _ => eprintln!("error: {error:#}"),
    }
}
