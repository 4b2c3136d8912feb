use battleship_sim::deploy::{deploy_both, deployment_worker, receive_deployment};
use battleship_sim::protocol::{Message, PROTOCOL_VERSION};
use battleship_sim::transport::pipe::MAX_FRAME_SIZE;
use battleship_sim::transport::Transport;
use battleship_sim::{
    deploy_fleet, Cell, Grid, GridSnapshot, PipeTransport, SideId, FLEET, TOTAL_SHIP_CELLS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::io::{duplex, AsyncWriteExt};
use tokio::time::Duration;

fn deployed_grid(seed: u64) -> Grid {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut grid = Grid::new();
    deploy_fleet(&mut grid, &FLEET, &mut rng).unwrap();
    grid
}

#[tokio::test]
async fn test_snapshot_survives_the_pipe() -> anyhow::Result<()> {
    let (mut tx, mut rx) = PipeTransport::pair();
    let mut grid = deployed_grid(3);
    grid.fire(0, 0).unwrap();

    let msg = Message::Deployed {
        version: PROTOCOL_VERSION,
        side: SideId::B,
        grid: GridSnapshot::from(&grid),
    };
    tx.send(msg.clone()).await?;
    let received = rx.recv().await?;
    assert_eq!(received, msg);

    match received {
        Message::Deployed { grid: snapshot, .. } => assert_eq!(Grid::try_from(snapshot).unwrap(), grid),
        other => panic!("unexpected message: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_oversized_length_prefix_is_rejected() -> anyhow::Result<()> {
    let (mut raw, end) = duplex(64);
    let mut transport = PipeTransport::from_stream(end);

    raw.write_all(&(MAX_FRAME_SIZE + 1).to_be_bytes()).await?;
    raw.flush().await?;

    let err = transport.recv().await.unwrap_err().to_string();
    assert!(err.contains("too large"), "{}", err);
    Ok(())
}

#[tokio::test]
async fn test_zero_length_frame_is_rejected() -> anyhow::Result<()> {
    let (mut raw, end) = duplex(64);
    let mut transport = PipeTransport::from_stream(end);

    raw.write_all(&[0, 0, 0, 0]).await?;
    raw.flush().await?;

    let err = transport.recv().await.unwrap_err().to_string();
    assert!(err.contains("length: 0"), "{}", err);
    Ok(())
}

#[tokio::test]
async fn test_garbage_payload_is_rejected() -> anyhow::Result<()> {
    let (mut raw, end) = duplex(64);
    let mut transport = PipeTransport::from_stream(end);

    raw.write_all(&4u32.to_be_bytes()).await?;
    raw.write_all(&[0xFF, 0xFF, 0xFF, 0xFF]).await?;
    raw.flush().await?;

    let err = transport.recv().await.unwrap_err().to_string();
    assert!(err.contains("Deserialization"), "{}", err);
    Ok(())
}

#[tokio::test]
async fn test_closed_peer_is_reported() -> anyhow::Result<()> {
    let (tx, mut rx) = PipeTransport::pair();
    drop(tx);
    let err = rx.recv().await.unwrap_err().to_string();
    assert!(err.contains("closed"), "{}", err);
    Ok(())
}

#[tokio::test]
async fn test_silent_peer_times_out() -> anyhow::Result<()> {
    let (_tx, rx) = PipeTransport::pair();
    let mut rx = rx.with_timeout(Duration::from_millis(50));
    let err = rx.recv().await.unwrap_err().to_string();
    assert!(err.contains("timeout"), "{}", err);
    Ok(())
}

#[tokio::test]
async fn test_worker_delivers_a_full_fleet() -> anyhow::Result<()> {
    let (worker, mut orchestrator) = PipeTransport::pair();
    let task = tokio::spawn(deployment_worker(SideId::A, 42, worker));
    let grid = receive_deployment(SideId::A, &mut orchestrator).await?;
    task.await??;

    assert_eq!(grid.ship_cells_remaining(), TOTAL_SHIP_CELLS);
    assert_eq!(grid.hits().count_ones(), 0);
    assert_eq!(grid.misses().count_ones(), 0);
    // the worker uses the same placement as a local deployment with that seed
    assert_eq!(grid, deployed_grid(42));
    Ok(())
}

#[tokio::test]
async fn test_wrong_side_is_rejected() -> anyhow::Result<()> {
    let (worker, mut orchestrator) = PipeTransport::pair();
    let task = tokio::spawn(deployment_worker(SideId::B, 1, worker));
    let err = receive_deployment(SideId::A, &mut orchestrator)
        .await
        .unwrap_err()
        .to_string();
    assert!(err.contains("Expected deployment from Side A"), "{}", err);
    task.await??;
    Ok(())
}

#[tokio::test]
async fn test_version_mismatch_is_rejected() -> anyhow::Result<()> {
    let (mut tx, mut rx) = PipeTransport::pair();
    tx.send(Message::Deployed {
        version: PROTOCOL_VERSION + 1,
        side: SideId::A,
        grid: GridSnapshot::from(&Grid::new()),
    })
    .await?;
    let err = receive_deployment(SideId::A, &mut rx).await.unwrap_err().to_string();
    assert!(err.contains("version mismatch"), "{}", err);
    Ok(())
}

#[tokio::test]
async fn test_deploy_failure_is_propagated() -> anyhow::Result<()> {
    let (mut tx, mut rx) = PipeTransport::pair();
    tx.send(Message::DeployFailed {
        version: PROTOCOL_VERSION,
        side: SideId::B,
        reason: "no room".to_string(),
    })
    .await?;
    let err = receive_deployment(SideId::B, &mut rx).await.unwrap_err().to_string();
    assert!(err.contains("Side B failed to deploy: no room"), "{}", err);
    Ok(())
}

#[tokio::test]
async fn test_inconsistent_snapshot_is_rejected() -> anyhow::Result<()> {
    let (mut tx, mut rx) = PipeTransport::pair();
    tx.send(Message::Deployed {
        version: PROTOCOL_VERSION,
        side: SideId::A,
        grid: GridSnapshot {
            ship_map: 0,
            hits: 1,
            misses: 0,
        },
    })
    .await?;
    assert!(receive_deployment(SideId::A, &mut rx).await.is_err());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_deploy_both_is_deterministic() -> anyhow::Result<()> {
    let (a1, b1) = deploy_both(10, 11).await?;
    let (a2, b2) = deploy_both(10, 11).await?;
    assert_eq!(a1, a2);
    assert_eq!(b1, b2);
    assert_eq!(a1, deployed_grid(10));
    assert_eq!(b1, deployed_grid(11));
    assert_ne!(a1, b1);
    for r in 0..8 {
        for c in 0..8 {
            assert_ne!(a1.cell_at(r, c).unwrap(), Cell::Hit);
        }
    }
    Ok(())
}
