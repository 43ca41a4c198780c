use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rosterforge::{
    explain_roster, init_logging, score_roster, HardMediumSoftScore, Result, Roster,
    RosterConstraintConfiguration, RosterExplanation, RosterForgeError,
};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "rosterforge")]
#[command(version)]
#[command(about = "Scores employee rosters", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scores a roster snapshot
    Score {
        /// Roster snapshot (JSON)
        roster: PathBuf,

        /// Constraint configuration replacing the roster's own (TOML or YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Prints every matching constraint with its match count and total
        #[arg(short, long)]
        explain: bool,

        /// Prints the N most penalised facts
        #[arg(short, long, value_name = "N")]
        indictments: Option<usize>,
    },
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Score {
            roster,
            config,
            explain,
            indictments,
        } => score(&roster, config.as_deref(), explain, indictments),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(event = "score_failed", error = %err);
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn load_roster(path: &Path, config: Option<&Path>) -> Result<Roster> {
    let json = fs::read_to_string(path).map_err(|e| {
        RosterForgeError::InvalidSnapshot(format!("cannot read {}: {e}", path.display()))
    })?;
    let mut roster = Roster::from_json_str(&json)?;
    if let Some(config) = config {
        roster.configuration = RosterConstraintConfiguration::load(config)?;
    }
    info!(
        event = "roster_loaded",
        path = %path.display(),
        employees = roster.employees.len(),
        shifts = roster.shifts.len(),
        availabilities = roster.availabilities.len(),
    );
    Ok(roster)
}

fn score(
    path: &Path,
    config: Option<&Path>,
    explain: bool,
    indictments: Option<usize>,
) -> Result<()> {
    let roster = load_roster(path, config)?;

    if !explain && indictments.is_none() {
        println!("score: {}", score_roster(&roster)?);
        return Ok(());
    }

    let explanation = explain_roster(&roster)?;
    println!("score: {}", explanation.score());
    if explain {
        print_constraints(&explanation);
    }
    if let Some(n) = indictments {
        print_indictments(&explanation, n);
    }
    Ok(())
}

fn print_constraints(explanation: &RosterExplanation) {
    println!();
    println!("constraints:");
    for analysis in &explanation.explanation.constraint_analyses {
        if analysis.match_count() == 0 {
            continue;
        }
        println!(
            "  {:<60} {:>6} matches  {}",
            analysis.name(),
            analysis.match_count(),
            analysis.score
        );
    }
}

fn print_indictments(explanation: &RosterExplanation, n: usize) {
    println!();
    println!("indictments:");
    for indictment in explanation.indictments.worst_n(n) {
        if indictment.score >= HardMediumSoftScore::ZERO {
            break;
        }
        println!(
            "  {:<20} {:>6} matches  {}",
            indictment.entity.short_type_name(),
            indictment.match_count(),
            indictment.score
        );
        println!("    {}", indictment.entity.display);
    }
}
