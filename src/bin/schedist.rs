use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use schedule_distribution::{
    parser, schedule, DistributionError, Instance, RecurrencePattern, ScheduleDescriptor,
    ScheduleSpec,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "schedist",
    about = "Expand recurring schedules into concrete instances",
    version
)]
struct Cli {
    /// Print a human-readable description of the schedule instead of its instances
    #[arg(long, global = true)]
    describe: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Every N days
    Daily {
        start_date: String,
        end_date: String,
        daily_steps: u32,
        timezone: String,
        start_time: String,
        end_time: Option<String>,
    },
    /// Given weekdays of every N-th week
    Weekly {
        start_date: String,
        end_date: String,
        weekly_steps: u32,
        /// Comma-separated weekday names, e.g. "Monday,Friday"
        weekdays: String,
        timezone: String,
        start_time: String,
        end_time: Option<String>,
    },
    /// A day of every N-th month
    MonthlyDays {
        start_date: String,
        end_date: String,
        timezone: String,
        day_of_month: u32,
        monthly_steps: u32,
        start_time: String,
        end_time: Option<String>,
    },
    /// An ordinal weekday (First..Fourth, Last) of every N-th month
    MonthlyWeeks {
        start_date: String,
        end_date: String,
        timezone: String,
        week_ordinal: String,
        weekday: String,
        monthly_steps: u32,
        start_time: String,
        end_time: Option<String>,
    },
    /// A JSON schedule descriptor file
    Pattern { config_file: PathBuf },
}

fn build_spec(command: &Command) -> Result<ScheduleSpec, DistributionError> {
    match command {
        Command::Daily {
            start_date,
            end_date,
            daily_steps,
            timezone,
            start_time,
            end_time,
        } => ScheduleSpec::from_strings(
            RecurrencePattern::Daily {
                every_n_days: *daily_steps,
            },
            start_date,
            end_date,
            timezone,
            start_time,
            end_time.as_deref(),
        ),
        Command::Weekly {
            start_date,
            end_date,
            weekly_steps,
            weekdays,
            timezone,
            start_time,
            end_time,
        } => {
            let names: Vec<&str> = weekdays.split(',').map(str::trim).collect();
            ScheduleSpec::from_strings(
                RecurrencePattern::Weekly {
                    every_n_weeks: *weekly_steps,
                    weekdays: parser::parse_weekdays(&names)?,
                },
                start_date,
                end_date,
                timezone,
                start_time,
                end_time.as_deref(),
            )
        }
        Command::MonthlyDays {
            start_date,
            end_date,
            timezone,
            day_of_month,
            monthly_steps,
            start_time,
            end_time,
        } => {
            ScheduleSpec::from_strings(
                RecurrencePattern::MonthlyByDay {
                    day_of_month: schedule::day_of_month(*day_of_month)?,
                    every_n_months: *monthly_steps,
                },
                start_date,
                end_date,
                timezone,
                start_time,
                end_time.as_deref(),
            )
        }
        Command::MonthlyWeeks {
            start_date,
            end_date,
            timezone,
            week_ordinal,
            weekday,
            monthly_steps,
            start_time,
            end_time,
        } => ScheduleSpec::from_strings(
            RecurrencePattern::MonthlyByWeek {
                ordinal: parser::parse_ordinal(week_ordinal)?,
                weekday: parser::parse_weekday(weekday)?,
                every_n_months: *monthly_steps,
            },
            start_date,
            end_date,
            timezone,
            start_time,
            end_time.as_deref(),
        ),
        Command::Pattern { config_file } => ScheduleDescriptor::from_file(config_file)?.to_spec(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let spec = match build_spec(&cli.command) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e.display_rich());
            process::exit(1);
        }
    };

    if cli.describe {
        println!("{spec}");
        process::exit(0);
    }

    let instances: Vec<Instance> = match spec.distributions() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e.display_rich());
            process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&instances) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: failed to serialize: {e}");
            process::exit(1);
        }
    }
}
