//! roll-call CLI - call on a student, fairly.
//!
//! Loads the roster, builds the selection and either runs the decision
//! chain or moves the selected students' points by one.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use roll_call::decision::{adjust_scores, Decision, DecisionConfig, DecisionEngine, Priority};
use roll_call::roster::{Adjustment, Roster, Score};
use roll_call::selection::{parse_selection, usage_hint, SelectionMap};
use std::path::PathBuf;

/// roll-call: pick a student to answer
///
/// Chooses among the selected students by closeness to a preferred
/// score, seminar group, repeating status and seating row.
#[derive(Parser)]
#[command(name = "roll-call")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Roster file with `name,group,points` lines
    #[arg(short, long, global = true, env = "ROLL_CALL_ROSTER", default_value = "students.csv")]
    file: PathBuf,

    /// Seminar group taught in this session
    #[arg(short, long, global = true, aliases = ["semgroup", "semGroup", "seminar"])]
    group: Option<String>,

    /// Selected students: `name,name,...` or `name:row,...` with --row
    #[arg(short, long, global = true, alias = "students")]
    selection: Option<String>,

    /// Each selected student carries a seating row
    #[arg(short, long, global = true)]
    row: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose one of the selected students
    #[command(visible_alias = "pick")]
    Decide {
        /// Preferred number of points
        #[arg(short, long, default_value_t = 0)]
        points: Score,

        /// Priority bonus for the target group
        #[arg(long, default_value_t = 2)]
        group_weight: Priority,

        /// Priority bonus for repeating students
        #[arg(long, default_value_t = 1)]
        repeat_weight: Priority,

        /// Seed for a reproducible tie-break
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Give each selected student one point
    #[command(visible_alias = "++", alias = "inc")]
    Add,

    /// Take one point from each selected student
    #[command(alias = "dec")]
    Sub,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let selection = build_selection(&cli)?;
    let mut roster = Roster::load(&cli.file)
        .with_context(|| format!("Failed to load roster: {}", cli.file.display()))?;

    match cli.command {
        Commands::Decide {
            points,
            group_weight,
            repeat_weight,
            seed,
        } => {
            let mut config = DecisionConfig::default()
                .with_preferred_score(points)
                .with_group_weight(group_weight)
                .with_repeat_weight(repeat_weight)
                .with_verbose(cli.verbose);
            if let Some(group) = cli.group {
                config = config.with_target_group(group);
            }
            config.seed = seed;
            decide(&roster, config, &selection)
        }
        Commands::Add => adjust(&mut roster, &selection, Adjustment::Increment, cli.verbose),
        Commands::Sub => adjust(&mut roster, &selection, Adjustment::Decrement, cli.verbose),
    }
}

fn build_selection(cli: &Cli) -> Result<SelectionMap> {
    let Some(expr) = cli.selection.as_deref() else {
        bail!("Selection of students is missing.");
    };
    parse_selection(expr, cli.row)
        .with_context(|| format!("Selection argument is not valid. {}", usage_hint(cli.row)))
}

fn decide(roster: &Roster, config: DecisionConfig, selection: &SelectionMap) -> Result<()> {
    let engine = DecisionEngine::new(roster, config, selection)?;
    let result = engine.decide()?;
    match result.decision {
        Decision::Chosen(name) => {
            println!("The chosen student is: \t{name}");
            Ok(())
        }
        Decision::NoValidSelection => bail!(roll_call::Error::EmptySelection),
    }
}

fn adjust(roster: &mut Roster, selection: &SelectionMap, adjustment: Adjustment, verbose: bool) -> Result<()> {
    let changes = adjust_scores(roster, selection, adjustment, verbose)?;
    roster.persist()?;
    for (name, score) in changes {
        println!("{name} has now {score} points");
    }
    Ok(())
}
