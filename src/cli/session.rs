//! The interactive planning session: open or create a bills file, add
//! bills, show the work-hours summary, and save a dated backup.

use std::{
    env,
    path::{Path, PathBuf},
};

use chrono::Local;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::{
    cli::output,
    config::{Config, ConfigManager},
    errors::CliError,
    ledger::{Bill, BillTotals, Frequency, Ledger, NO_FREQUENCY},
    solver, storage, timesource,
};

const MENU_LOAD: &str = "Load an existing bills file";
const MENU_NEW: &str = "Start a new bills file";

/// Entry point for the binary: no arguments runs the interactive
/// session; `summary <file> <hourly-rate>` prints the same figures
/// without prompting or writing anything.
pub fn run_cli() -> Result<(), CliError> {
    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("summary") => run_summary(&args[1..]),
        Some(other) => Err(CliError::Command(format!(
            "unknown command `{other}`; run without arguments for the interactive session"
        ))),
        None => run_session(),
    }
}

fn run_session() -> Result<(), CliError> {
    let theme = ColorfulTheme::default();
    let config = load_or_seed_config();

    output::section("Bill Planner");

    let working_dir = env::current_dir().map_err(|err| CliError::Command(err.to_string()))?;
    let (mut ledger, modifying) = open_ledger(&theme, &working_dir)?;

    collect_bills(&theme, &config, &mut ledger)?;

    let totals = ledger.partition_totals();
    report_excluded(&totals);

    let hourly_rate: f64 = Input::with_theme(&theme)
        .with_prompt("Enter your hourly rate (in dollars)")
        .validate_with(|rate: &f64| {
            if rate.is_finite() && *rate > 0.0 {
                Ok(())
            } else {
                Err("hourly rate must be a positive number")
            }
        })
        .interact_text()?;
    solver::validate_rates(hourly_rate, config.tax_rate)?;

    let weekly_hours =
        solver::compute_weekly_hours(hourly_rate, totals.monthly_total(), config.tax_rate);
    print_summary(&totals, weekly_hours);

    let path = storage::next_backup_path(&working_dir, Local::now().date_naive(), modifying);
    match storage::save_bills(ledger.bills(), &path) {
        Ok(()) => output::success(format!("Bills saved to {}", path.display())),
        Err(err) => output::warning(format!("Bills were not saved: {err}")),
    }
    Ok(())
}

/// Loads a CSV selected from the working directory, or starts fresh.
///
/// The returned flag records whether the session began from an
/// existing file; in that case today's backup name is reused instead
/// of probing for a free `_vN` variant.
fn open_ledger(theme: &ColorfulTheme, dir: &Path) -> Result<(Ledger, bool), CliError> {
    let choice = Select::with_theme(theme)
        .with_prompt("Welcome to the Bill Planner! What would you like to do?")
        .items(&[MENU_LOAD, MENU_NEW])
        .default(0)
        .interact()?;
    if choice == 1 {
        output::info("Creating a new bills file.");
        return Ok((Ledger::new(), false));
    }

    let files = match storage::list_csv_files(dir) {
        Ok(files) => files,
        Err(err) => {
            output::warning(format!("Could not list CSV files: {err}"));
            Vec::new()
        }
    };
    if files.is_empty() {
        output::info("No CSV files found in the current directory; starting fresh.");
        return Ok((Ledger::new(), false));
    }

    let labels: Vec<String> = files
        .iter()
        .map(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string())
        })
        .collect();
    let index = Select::with_theme(theme)
        .with_prompt("Select the file to load")
        .items(&labels)
        .default(0)
        .interact()?;

    match storage::load_bills(&files[index]) {
        Ok(bills) if !bills.is_empty() => {
            output::info(format!("Loaded {} bills from {}.", bills.len(), labels[index]));
            Ok((Ledger::from_bills(bills), true))
        }
        Ok(_) => {
            output::info("No bills loaded. Starting with an empty list.");
            Ok((Ledger::new(), true))
        }
        Err(err) => {
            output::warning(format!("{err}"));
            output::info("Starting with an empty list.");
            Ok((Ledger::new(), true))
        }
    }
}

fn collect_bills(
    theme: &ColorfulTheme,
    config: &Config,
    ledger: &mut Ledger,
) -> Result<(), CliError> {
    loop {
        let add = Confirm::with_theme(theme)
            .with_prompt("Would you like to add a new bill?")
            .default(true)
            .interact()?;
        if !add {
            break;
        }

        let name: String = Input::with_theme(theme)
            .with_prompt("Bill name")
            .validate_with(|input: &String| {
                let trimmed = input.trim();
                if trimmed.is_empty() {
                    Err("bill name cannot be empty")
                } else if trimmed.contains(',') {
                    // The CSV form does not escape delimiters.
                    Err("bill name cannot contain a comma")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        let cost: f64 = Input::with_theme(theme)
            .with_prompt("Bill cost (in dollars)")
            .validate_with(|cost: &f64| {
                if cost.is_finite() && *cost >= 0.0 {
                    Ok(())
                } else {
                    Err("cost must be a non-negative number")
                }
            })
            .interact_text()?;
        let recurring = Confirm::with_theme(theme)
            .with_prompt("Is this a recurring bill?")
            .default(false)
            .interact()?;
        let frequency = if recurring {
            let cadences = [Frequency::Monthly, Frequency::Yearly];
            let labels = ["Monthly", "Yearly"];
            let index = Select::with_theme(theme)
                .with_prompt("Is it monthly or yearly?")
                .items(&labels)
                .default(0)
                .interact()?;
            cadences[index].as_token().to_string()
        } else {
            NO_FREQUENCY.to_string()
        };

        let date = timesource::fetch_current_timestamp(&config.timezone);
        ledger.add(Bill::new(date, name.trim(), cost, recurring, frequency));
    }
    Ok(())
}

/// Non-interactive mode: `summary <file> <hourly-rate>` loads a bills
/// file and prints the session summary without writing anything.
fn run_summary(args: &[String]) -> Result<(), CliError> {
    let (file, rate) = match args {
        [file, rate] => (PathBuf::from(file), rate),
        _ => {
            return Err(CliError::Input(
                "usage: bill_planner_cli summary <file> <hourly-rate>".into(),
            ))
        }
    };
    let hourly_rate: f64 = rate
        .parse()
        .map_err(|_| CliError::Input(format!("invalid hourly rate `{rate}`")))?;

    let config = load_or_seed_config();
    solver::validate_rates(hourly_rate, config.tax_rate)?;

    let bills = storage::load_bills(&file)?;
    let ledger = Ledger::from_bills(bills);
    let totals = ledger.partition_totals();
    report_excluded(&totals);

    let weekly_hours =
        solver::compute_weekly_hours(hourly_rate, totals.monthly_total(), config.tax_rate);
    print_summary(&totals, weekly_hours);
    Ok(())
}

fn load_or_seed_config() -> Config {
    let manager = match ConfigManager::new() {
        Ok(manager) => manager,
        Err(err) => {
            output::warning(format!("Using default settings: {err}"));
            return Config::default();
        }
    };
    let existed = manager.path().exists();
    match manager.load() {
        Ok(config) => {
            if !existed {
                if let Err(err) = manager.save(&config) {
                    tracing::debug!(%err, "could not seed the default config file");
                }
            }
            config
        }
        Err(err) => {
            output::warning(format!("Using default settings: {err}"));
            Config::default()
        }
    }
}

fn report_excluded(totals: &BillTotals) {
    for bill in &totals.excluded {
        output::warning(format!(
            "`{}` has frequency `{}`; expected monthly or yearly, so it is left out of the totals",
            bill.name, bill.frequency
        ));
    }
}

fn print_summary(totals: &BillTotals, weekly_hours: f64) {
    output::section("Bill Summary");
    output::info(format!(
        "Total Monthly Bill Cost: ${:.2}",
        totals.monthly_total()
    ));
    output::info(format!("Recurring Bills Total: ${:.2}", totals.recurring));
    output::info(format!(
        "Non-Recurring Bills Total: ${:.2}",
        totals.non_recurring
    ));
    output::info(format!(
        "To cover these bills after taxes, you need to work approximately {:.2} hours per week.",
        weekly_hours
    ));
}
