// Meeting Timeline
// Command line entry point

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};

use meeting_timeline::services::settings::{load_config, SettingsService};
use meeting_timeline::services::timeline::validate_fields;
use meeting_timeline::utils::date::parse_local;
use meeting_timeline::{FillOutcome, FormEvent, ScheduleAutofill, TimelineConfig, TimelinePoint};

#[derive(Parser)]
#[command(name = "meeting-timeline")]
#[command(about = "Derive and check the deadlines of a multi-stage meeting")]
struct Cli {
    /// Config file with timeline offsets (default: platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fill the meeting dates from the stage 2 closing time
    Derive {
        /// Stage 2 closing time, e.g. 2025-06-30T18:00
        #[arg(long)]
        anchor: String,

        /// Overwrite dates given with --set
        #[arg(long)]
        force: bool,

        /// Skip the overwrite confirmation when forcing
        #[arg(short, long)]
        yes: bool,

        /// Existing field value, as point=value (repeatable)
        #[arg(long = "set", value_parser = parse_assignment)]
        fields: Vec<(TimelinePoint, String)>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check a full schedule for ordering and minimum durations
    Validate {
        /// Reference time for the "opens in the future" check (default: now)
        #[arg(long)]
        now: Option<String>,

        /// Field value, as point=value (repeatable)
        #[arg(long = "set", value_parser = parse_assignment)]
        fields: Vec<(TimelinePoint, String)>,
    },

    /// Print the effective timeline offsets as TOML
    Config,
}

fn parse_assignment(raw: &str) -> Result<(TimelinePoint, String), String> {
    let (point, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected point=value, got {:?}", raw))?;
    Ok((point.parse()?, value.to_string()))
}

fn load(path: Option<&Path>) -> Result<TimelineConfig> {
    match path {
        Some(path) => load_config(path),
        None => SettingsService::with_default_path()?.get(),
    }
}

fn confirm_overwrite() -> Result<bool> {
    eprint!("{} [y/N] ", FormEvent::CONFIRM_PROMPT);
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(answer.trim().to_ascii_lowercase().starts_with('y'))
}

/// Pick the form event for a derive run. An unusable anchor yields `None`
/// before the overwrite prompt is shown.
fn derive_event(
    anchor: &str,
    force: bool,
    yes: bool,
    confirm: impl FnOnce() -> Result<bool>,
) -> Result<Option<FormEvent>> {
    if parse_local(anchor).is_none() {
        log::debug!("Skipping derive: {:?} is not a valid date/time", anchor);
        return Ok(None);
    }

    if !force {
        return Ok(Some(FormEvent::AnchorChanged));
    }

    let confirmed = yes || confirm()?;
    Ok(Some(FormEvent::AutoPopulate { confirmed }))
}

fn run_derive(
    config: TimelineConfig,
    anchor: String,
    force: bool,
    yes: bool,
    fields: Vec<(TimelinePoint, String)>,
    json: bool,
) -> Result<ExitCode> {
    let Some(event) = derive_event(&anchor, force, yes, confirm_overwrite)? else {
        return Ok(ExitCode::SUCCESS);
    };

    let mut form: BTreeMap<TimelinePoint, String> = fields.into_iter().collect();
    form.insert(TimelinePoint::ANCHOR, anchor);

    let autofill = ScheduleAutofill::new(config);
    let written = match autofill.handle(event, &mut form) {
        FillOutcome::Skipped => return Ok(ExitCode::SUCCESS),
        FillOutcome::Filled { written } => written,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&form)?);
        return Ok(ExitCode::SUCCESS);
    }

    for point in TimelinePoint::ALL {
        let value = form.get(&point).map(String::as_str).unwrap_or("");
        let marker = if written.contains(&point) { "*" } else { " " };
        println!("{} {:<18} {}", marker, point.label(), value);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_validate(
    config: TimelineConfig,
    now: Option<String>,
    fields: Vec<(TimelinePoint, String)>,
) -> Result<ExitCode> {
    let now = match now {
        Some(raw) => parse_local(&raw).with_context(|| format!("Invalid --now value {:?}", raw))?,
        None => Local::now().naive_local(),
    };
    let form: BTreeMap<TimelinePoint, String> = fields.into_iter().collect();

    let issues = validate_fields(&form, &config, now);
    if issues.is_empty() {
        println!("Schedule is valid");
        return Ok(ExitCode::SUCCESS);
    }

    for issue in &issues {
        println!("{}", issue);
    }
    Ok(ExitCode::FAILURE)
}

fn main() -> Result<ExitCode> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    let config = load(cli.config.as_deref())?;
    log::debug!("Using timeline config {:?}", config);

    match cli.command {
        Command::Derive {
            anchor,
            force,
            yes,
            fields,
            json,
        } => run_derive(config, anchor, force, yes, fields, json),
        Command::Validate { now, fields } => run_validate(config, now, fields),
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
