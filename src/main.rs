use std::io;
use std::time::Duration;

use battleship_sim::{
    deploy::deploy_both, init_logging, strategy_rng, summary_line, GameDisplay, Match, MatchEvent,
    Session, SessionConfig, Side, SideId, StrategyKind, TextDisplay,
};
use clap::Parser;
use rand::Rng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Deploy both fleets in separate workers and play one AI vs AI match.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Seed for side B (defaults to seed + 1)")]
        seed_b: Option<u64>,
        #[arg(long, value_enum, default_value_t = StrategyKind::Hunt)]
        strategy: StrategyKind,
        #[arg(long, default_value_t = 0, help = "Pause after every shot, in milliseconds")]
        delay_ms: u64,
        #[arg(long, help = "Draw unhit ships as water")]
        hide_ships: bool,
    },
    /// Interactive menu: start matches, view boards, redeploy ships.
    Menu {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = StrategyKind::Hunt)]
        strategy: StrategyKind,
    },
    /// Run the two deployment workers and print the grids they send back.
    Deploy {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            s
        }
        None => rand::rng().random(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            seed,
            seed_b,
            strategy,
            delay_ms,
            hide_ships,
        } => {
            let seed_a = resolve_seed(seed);
            let seed_b = seed_b.unwrap_or(seed_a.wrapping_add(1));
            let (grid_a, grid_b) = deploy_both(seed_a, seed_b).await?;

            let side_a = Side::new(grid_a, strategy.build(), strategy_rng(seed_a));
            let side_b = Side::new(grid_b, strategy.build(), strategy_rng(seed_b));
            let mut game = Match::new(side_a, side_b).with_reveal(!hide_ships);
            let mut display =
                TextDisplay::stdout().with_delay(Duration::from_millis(delay_ms));
            let report = game.play(&mut display).map_err(|e| anyhow::anyhow!(e))?;
            display.finish()?;
            println!("{}", summary_line(&report));
        }
        Commands::Menu { seed, strategy } => {
            let seed = resolve_seed(seed);
            let mut config = SessionConfig::from_seed(seed);
            config.strategy = strategy;
            let mut session = Session::new(config);
            session.redeploy()?;
            let mut display = TextDisplay::stdout();
            let stdin = io::stdin();
            session.run_menu(stdin.lock(), &mut io::stdout(), &mut display)?;
            display.finish()?;
        }
        Commands::Deploy { seed } => {
            let seed_a = resolve_seed(seed);
            let (grid_a, grid_b) = deploy_both(seed_a, seed_a.wrapping_add(1)).await?;
            let mut display = TextDisplay::stdout();
            for (side, grid) in [(SideId::A, grid_a), (SideId::B, grid_b)] {
                display.announce(&MatchEvent::Board { side });
                display.render(&grid, true);
            }
            display.finish()?;
        }
    }
    Ok(())
}
