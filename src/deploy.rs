#![cfg(feature = "std")]

//! Deployment workers.
//!
//! Each side places its fleet in its own task with its own seed, then sends
//! the finished grid to the orchestrator as a single [`Message::Deployed`]
//! frame. After that exchange the match runs entirely in-process.

use anyhow::{anyhow, bail};
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::{
    config::{fleet_cells, FLEET},
    game::SideId,
    grid::{Grid, GridSnapshot},
    placement::deploy_fleet,
    protocol::{Message, PROTOCOL_VERSION},
    transport::{pipe::PipeTransport, Transport},
};

/// Place a fleet for `side` from `seed` and report the result over `transport`.
pub async fn deployment_worker<T: Transport>(
    side: SideId,
    seed: u64,
    mut transport: T,
) -> anyhow::Result<()> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut grid = Grid::new();
    let msg = match deploy_fleet(&mut grid, &FLEET, &mut rng) {
        Ok(runs) => {
            info!(
                "{} deployed {} ships over {} cells (seed {})",
                side,
                runs.len(),
                fleet_cells(&FLEET),
                seed
            );
            Message::Deployed {
                version: PROTOCOL_VERSION,
                side,
                grid: GridSnapshot::from(&grid),
            }
        }
        Err(e) => Message::DeployFailed {
            version: PROTOCOL_VERSION,
            side,
            reason: e.to_string(),
        },
    };
    transport.send(msg).await
}

/// Wait for `expected`'s deployment and rebuild its grid.
pub async fn receive_deployment<T: Transport>(
    expected: SideId,
    transport: &mut T,
) -> anyhow::Result<Grid> {
    let msg = transport.recv().await?;
    if msg.version() != PROTOCOL_VERSION {
        bail!(
            "Protocol version mismatch: expected {}, got {}",
            PROTOCOL_VERSION,
            msg.version()
        );
    }
    if msg.side() != expected {
        bail!("Expected deployment from {}, got {}", expected, msg.side());
    }
    match msg {
        Message::Deployed { grid, .. } => Grid::try_from(grid).map_err(|e| anyhow!(e)),
        Message::DeployFailed { side, reason, .. } => {
            bail!("{} failed to deploy: {}", side, reason)
        }
    }
}

/// Run one deployment worker per side and collect both grids.
pub async fn deploy_both(seed_a: u64, seed_b: u64) -> anyhow::Result<(Grid, Grid)> {
    let (worker_a, mut pipe_a) = PipeTransport::pair();
    let (worker_b, mut pipe_b) = PipeTransport::pair();

    let task_a = tokio::spawn(deployment_worker(SideId::A, seed_a, worker_a));
    let task_b = tokio::spawn(deployment_worker(SideId::B, seed_b, worker_b));

    let (grid_a, grid_b) = tokio::try_join!(
        receive_deployment(SideId::A, &mut pipe_a),
        receive_deployment(SideId::B, &mut pipe_b),
    )?;
    task_a.await??;
    task_b.await??;
    Ok((grid_a, grid_b))
}
