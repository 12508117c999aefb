use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use siege_control::{apply_directive, DirectiveSource, Steward};
use siege_core::{
    actions, deduct_pre_simulation_costs, mission_odds, simulate_day, tomorrow_incident_warning,
    CausalityCategory, CausalityLog, ColonyState, MissionId, SimulationContext,
};
use siege_world::{default_content, load_state, new_run, save_state, validate_content};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "siege_cli", about = "Siege survival day-simulation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a steward-driven siege for up to a fixed number of days.
    Run {
        #[arg(long, default_value_t = 40)]
        days: u32,
        /// Start a new run with this seed. Mutually exclusive with --state.
        #[arg(long, conflicts_with = "state_file")]
        seed: Option<u64>,
        /// Resume from a saved ColonyState JSON file. Mutually exclusive with --seed.
        #[arg(long = "state", conflicts_with = "seed")]
        state_file: Option<PathBuf>,
        /// Print a full day report every N days (other days get one line).
        #[arg(long, default_value_t = 1)]
        print_every: u32,
        /// Write the final state as JSON when the run ends.
        #[arg(long = "save-state")]
        save_state_file: Option<PathBuf>,
        /// Suppress per-day reports entirely.
        #[arg(long)]
        quiet: bool,
    },
    /// Print mission outcome odds for the starting colony at a given fuel level.
    Odds {
        #[arg(long, default_value_t = 240)]
        fuel: i32,
        #[arg(long, default_value_t = 1)]
        siege: i32,
    },
}

// ---------------------------------------------------------------------------
// Run loop
// ---------------------------------------------------------------------------

fn run(
    days: u32,
    seed: Option<u64>,
    state_file: Option<PathBuf>,
    print_every: u32,
    save_state_file: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let content = default_content();
    validate_content(&content);

    let (mut state, mut rng) = if let Some(path) = state_file {
        let loaded = load_state(&path)?;
        let rng = ChaCha8Rng::seed_from_u64(loaded.meta.seed);
        tracing::info!(day = loaded.meta.day, seed = loaded.meta.seed, "resumed saved run");
        (loaded, rng)
    } else {
        let resolved_seed = seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(resolved_seed);
        let state = new_run(&content, resolved_seed, &mut rng);
        tracing::info!(seed = resolved_seed, "new run");
        (state, rng)
    };

    println!(
        "Siege begins: day={} seed={} profile={:?} population={}",
        state.meta.day,
        state.meta.seed,
        state.active_profile,
        state.total_population(),
    );
    println!("{}", "-".repeat(78));

    let mut steward = Steward;
    let mut log = CausalityLog::new();

    for _ in 0..days {
        if state.is_game_over || state.is_victory {
            break;
        }

        for directive in steward.plan_day(&state, &content) {
            apply_directive(&mut state, &content, &directive, &mut log);
        }
        if let Some(warning) = tomorrow_incident_warning(&state, &content) {
            if !quiet {
                println!("{warning}");
            }
        }

        let day = state.meta.day;
        actions::execute_scheduled_action(&mut state, &content, &mut log);
        deduct_pre_simulation_costs(&mut state, &mut log);
        let ctx = simulate_day(&mut state, &content, &mut log, &mut rng);

        if !quiet {
            if print_every > 0 && day % print_every == 0 {
                print_day_report(day, &state, &ctx, &log);
            } else {
                print_status_line(day, &state);
            }
        }
    }

    println!("{}", "-".repeat(78));
    if state.is_victory {
        println!("VICTORY — the siege is lifted after day {}.", state.meta.day - 1);
    } else if let Some(reason) = state.game_over_reason {
        println!("DEFEAT on day {} — {reason}.", state.meta.day);
    } else {
        println!("Run paused at day {}.", state.meta.day);
    }
    print_status_line(state.meta.day, &state);

    if let Some(path) = save_state_file {
        save_state(&path, &state)?;
        println!("State saved to {}", path.display());
    }

    Ok(())
}

fn print_status_line(day: u32, state: &ColonyState) {
    println!(
        "[day {day:2}] food={food:4} water={water:4} fuel={fuel:4} med={med:3} mat={mat:3}  \
         morale={morale:3} unrest={unrest:3} sick={sick:3} siege={siege}  pop={pop} \
         (H:{h} G:{g} S:{s} E:{e})",
        food = state.food,
        water = state.water,
        fuel = state.fuel,
        med = state.medicine,
        mat = state.materials,
        morale = state.morale,
        unrest = state.unrest,
        sick = state.sickness,
        siege = state.siege_intensity,
        pop = state.total_population(),
        h = state.healthy_workers,
        g = state.guards,
        s = state.sick,
        e = state.elderly,
    );
}

fn print_day_report(day: u32, state: &ColonyState, ctx: &SimulationContext, log: &CausalityLog) {
    print_status_line(day, state);
    println!(
        "        produced: food +{} water +{} materials +{} fuel +{}  consumed: food -{} water -{} fuel -{}",
        ctx.food_produced,
        ctx.water_produced,
        ctx.materials_produced,
        ctx.fuel_produced,
        ctx.food_consumed,
        ctx.water_consumed,
        ctx.fuel_consumed,
    );
    for entry in log.by_category(CausalityCategory::Event) {
        println!("        ! {}", entry.description);
    }
    for entry in log.by_category(CausalityCategory::Mission) {
        println!("        » {}", entry.description);
    }
    for entry in log.by_category(CausalityCategory::Death) {
        println!("        † {}", entry.description);
    }
}

fn print_odds(fuel: i32, siege: i32) {
    let content = default_content();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut state = new_run(&content, 0, &mut rng);
    state.fuel = fuel;
    state.siege_intensity = siege.clamp(0, 6);

    for mission in [
        MissionId::ForageBeyondWalls,
        MissionId::NightRaid,
        MissionId::SearchAbandonedHomes,
        MissionId::NegotiateBlackMarket,
    ] {
        let def_name = content
            .mission(mission)
            .map_or_else(|| format!("{mission:?}"), |m| m.name.clone());
        let odds = mission_odds(mission, &state);
        println!("{def_name}:");
        for (probability, label) in odds.probabilities.iter().zip(odds.labels.iter()) {
            println!("  {:>5.1}%  {label}", probability * 100.0);
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            days,
            seed,
            state_file,
            print_every,
            save_state_file,
            quiet,
        } => run(days, seed, state_file, print_every, save_state_file, quiet)
            .context("running the siege")?,
        Commands::Odds { fuel, siege } => print_odds(fuel, siege),
    }
    Ok(())
}
