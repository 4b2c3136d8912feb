use battleship_sim::{
    deploy::deploy_both, strategy_rng, HuntStrategy, Match, NullDisplay, Side, SideId, SideStats,
};
use serde_json::json;

fn side_json(stats: &SideStats) -> serde_json::Value {
    json!({
        "shots": stats.shots,
        "hits": stats.hits,
        "ship_cells_remaining": stats.ship_cells_remaining,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed_a> <seed_b>", args[0]);
        std::process::exit(1);
    }
    let seed_a: u64 = args[1].parse()?;
    let seed_b: u64 = args[2].parse()?;

    let (grid_a, grid_b) = deploy_both(seed_a, seed_b).await?;
    let side_a = Side::new(
        grid_a,
        Box::new(HuntStrategy::new()),
        strategy_rng(seed_a),
    );
    let side_b = Side::new(
        grid_b,
        Box::new(HuntStrategy::new()),
        strategy_rng(seed_b),
    );
    let mut game = Match::new(side_a, side_b);
    let report = game
        .play(&mut NullDisplay)
        .map_err(|e| anyhow::anyhow!(e))?;

    let winner = match report.winner {
        SideId::A => "side_a",
        SideId::B => "side_b",
    };
    let result = json!({
        "winner": winner,
        "rounds": report.rounds,
        "side_a": side_json(&report.side_a),
        "side_b": side_json(&report.side_b),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
