use std::process::ExitCode;

use clap::Parser;
use group_stage::arena::competition::{GroupStage, GroupStageBuilder};
use rand::{SeedableRng, rngs::StdRng};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "group_stage")]
#[command(about = "Generate and play a football group stage")]
struct Cli {
    /// Seed for the random number generator
    #[arg(default_value_t = 420)]
    seed: u64,

    /// Play every pairing a second time with home and away swapped
    #[arg(short, long)]
    reverse: bool,

    /// Print the played group stage as JSON
    #[arg(short, long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut rng = StdRng::seed_from_u64(cli.seed);
    let mut stage = match GroupStageBuilder::default()
        .reverse_fixtures(cli.reverse)
        .build(&mut rng)
    {
        Ok(stage) => stage,
        Err(e) => {
            eprintln!("Unable to set up the group stage: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = stage.simulate_all(&mut rng) {
        eprintln!("Unable to play the group stage: {e}");
        return ExitCode::FAILURE;
    }

    if cli.json {
        return print_json(&stage);
    }

    println!("Teams");
    for team in stage.teams() {
        println!(
            "  {:<20} {} power {}",
            team.name,
            team.formation,
            team.power()
        );
    }

    println!("\nFixtures");
    for game in stage.fixtures() {
        let name = |id| stage.team(id).map(|t| t.name.as_str()).unwrap_or("?");
        println!(
            "  {:>20} {} - {} {}",
            name(game.home),
            game.goals_home,
            game.goals_away,
            name(game.away)
        );
    }

    println!("\nStandings");
    println!("     {:<20} {:>2} {:>3} {:>3} {:>4} {:>3}", "", "P", "GF", "GA", "GD", "Pts");
    for (place, team) in stage.standings().iter().enumerate() {
        let record = team.record();
        println!(
            "  {}. {:<20} {:>2} {:>3} {:>3} {:>4} {:>3}",
            place + 1,
            team.name,
            record.played,
            record.goals_for,
            record.goals_against,
            record.goal_difference(),
            record.points
        );
    }

    println!("\nTop scorers");
    for (team, player) in stage.top_scorers(5) {
        println!("  {:<20} {:<20} {}", player.full_name(), team.name, player.goals());
    }

    ExitCode::SUCCESS
}

#[cfg(feature = "serde")]
fn print_json(stage: &GroupStage) -> ExitCode {
    match stage.to_json() {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Unable to export the group stage: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "serde"))]
fn print_json(_stage: &GroupStage) -> ExitCode {
    eprintln!("JSON export needs the serde feature");
    ExitCode::FAILURE
}
