//! Sun-avoidance visibility for CHEOPS and JWST targets
//!
//! Usage:
//!   visibility                               - run the demonstration scenarios
//!   visibility check <target> <date> [-m M]  - visibility on one date
//!   visibility window <target> [-m M]        - visibility ranges over a year
//!   visibility max-angle <target>            - maximum Sun separation over a year
//!
//! Missions: A/CHEOPS, B/JWST, BOTH. Set `RUST_LOG=debug` for query details.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::error::Error as StdError;
use std::path::PathBuf;
use std::process::ExitCode;

use sun_avoidance::utils::time_utils::{parse_date, reference_year_days};
use sun_avoidance::{EphemerisSource, Mission, Settings, VisibilityChecker};

/// Command line arguments for the visibility estimator
#[derive(Parser, Debug)]
#[command(
    name = "visibility",
    version,
    about = "Sun-avoidance visibility estimator for CHEOPS and JWST"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Resolve names from the local catalog only
    #[arg(long, global = true)]
    offline: bool,

    /// Additional JSON catalog of targets
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Solar ephemeris source (analytic, horizons)
    #[arg(long, global = true)]
    ephemeris: Option<EphemerisSource>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Is the target visible on a given date?
    Check {
        /// Target name, e.g. "55 Cnc"
        target: String,
        /// Date as YYYY-MM-DD
        date: String,
        /// Mission (A/CHEOPS, B/JWST, BOTH)
        #[arg(short, long, default_value_t = Mission::Cheops)]
        mission: Mission,
    },
    /// When during the year is the target visible?
    Window {
        target: String,
        /// Mission (A/CHEOPS, B/JWST, BOTH)
        #[arg(short, long, default_value_t = Mission::Cheops)]
        mission: Mission,
    },
    /// Maximum angular distance between the target and the Sun over a year
    MaxAngle { target: String },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn settings_from_cli(cli: &Cli) -> Settings {
    let mut settings = Settings::from_env();
    if cli.offline {
        settings.offline = true;
    }
    if let Some(path) = &cli.catalog {
        settings.catalog_path = path.clone();
    }
    if let Some(source) = cli.ephemeris {
        settings.ephemeris = source;
    }
    settings
}

/// First and last day of the reference year scan
fn reference_span() -> Result<(NaiveDate, NaiveDate), Box<dyn StdError>> {
    let days = reference_year_days();
    match (days.first(), days.last()) {
        (Some(&first), Some(&last)) => Ok((first, last)),
        _ => Err("empty reference year".into()),
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn StdError>> {
    let settings = settings_from_cli(&cli);
    log::debug!("Settings: {settings:?}");

    match &cli.command {
        Some(Commands::Check {
            target,
            date,
            mission,
        }) => {
            let day = parse_date(date)?;
            let checker = VisibilityChecker::from_settings(&settings, day, day)?;
            let position = checker.resolve(target)?;
            let separation = checker.solar_separation(&position, day)?;
            let visible = mission.allows(separation);
            let violations = mission.violations(separation);
            if cli.json {
                let output = json!({
                    "target": target,
                    "position": position,
                    "date": day,
                    "mission": mission,
                    "separation_deg": separation,
                    "visible": visible,
                    "zones": mission.zone_names(),
                    "violations": violations,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{target} ({position}) on {day}: Sun separation {separation:.2}°");
                println!("Visible to {mission}: {visible}");
                for violation in &violations {
                    println!("  {violation}");
                }
            }
        }
        Some(Commands::Window { target, mission }) => {
            let (first, last) = reference_span()?;
            let checker = VisibilityChecker::from_settings(&settings, first, last)?;
            let report = checker.annual_visibility(target, *mission)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{report}");
            }
        }
        Some(Commands::MaxAngle { target }) => {
            let (first, last) = reference_span()?;
            let checker = VisibilityChecker::from_settings(&settings, first, last)?;
            let max = checker.max_solar_angle(target)?;
            if cli.json {
                let output = json!({ "target": target, "max_separation_deg": max });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{max:.2}");
            }
        }
        None => run_demos(&settings)?,
    }

    Ok(())
}

/// The five example questions
fn run_demos(settings: &Settings) -> Result<(), Box<dyn StdError>> {
    let demo_date = "2022-11-21";
    let (first, _) = reference_span()?;
    let checker = VisibilityChecker::from_settings(settings, first, parse_date(demo_date)?)?;

    println!("Is 55 Cnc visible to JWST on {demo_date} ?");
    let b = checker.jwst_visible("55 Cnc", demo_date)?;
    println!("Answer is {b}");

    println!("Is 55 Cnc visible to CHEOPS on {demo_date} ?");
    let b = checker.cheops_visible("55 Cnc", demo_date)?;
    println!("Answer is {b}");

    println!("When during the year is WASP-12 visible to both CHEOPS and JWST?");
    println!("{}", checker.annual_visibility("WASP-12", Mission::Both)?);

    println!("When during the year is TOI-500 visible to CHEOPS?");
    println!("{}", checker.annual_visibility("TOI-500", Mission::Cheops)?);

    println!("What is the maximum angular distance between beta Pic and the Sun?");
    println!("{:.2}", checker.max_solar_angle("beta Pic")?);

    Ok(())
}
