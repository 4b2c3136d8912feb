use battleship_sim::{
    deploy_fleet, strategy_rng, Cell, GameDisplay, Grid, GridMask, HuntStrategy, Match,
    MatchError, MatchEvent, Mode, NullDisplay, RandomStrategy, ShotOutcome, Side, SideId,
    Strategy, Target, FLEET, GRID_SIZE, TOTAL_SHIP_CELLS,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn deployed_grid(seed: u64) -> Grid {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut grid = Grid::new();
    deploy_fleet(&mut grid, &FLEET, &mut rng).unwrap();
    grid
}

fn hunt_side(seed: u64) -> Side {
    Side::new(
        deployed_grid(seed),
        Box::new(HuntStrategy::new()),
        strategy_rng(seed),
    )
}

/// Records every event it is shown.
#[derive(Default)]
struct Recorder {
    events: Vec<MatchEvent>,
    renders: usize,
}

impl GameDisplay for Recorder {
    fn render(&mut self, _grid: &Grid, _reveal: bool) {
        self.renders += 1;
    }
    fn announce(&mut self, event: &MatchEvent) {
        self.events.push(*event);
    }
}

#[test]
fn test_hunt_vs_hunt_game() {
    let mut game = Match::new(hunt_side(123), hunt_side(456));
    let mut recorder = Recorder::default();
    let report = game.play(&mut recorder).unwrap();

    let loser = report.winner.opponent();
    assert!(game.grid(loser).all_ships_sunk());
    assert!(!game.grid(report.winner).all_ships_sunk());

    let winner_stats = match report.winner {
        SideId::A => report.side_a,
        SideId::B => report.side_b,
    };
    assert_eq!(winner_stats.hits, TOTAL_SHIP_CELLS);
    assert!(winner_stats.shots <= GRID_SIZE * GRID_SIZE);

    // side A fires first, so it never trails B by a shot
    assert!(report.side_a.shots == report.side_b.shots || report.side_a.shots == report.side_b.shots + 1);

    assert_eq!(recorder.events.first(), Some(&MatchEvent::Started));
    assert!(matches!(
        recorder.events.last(),
        Some(MatchEvent::Won { winner, .. }) if *winner == report.winner
    ));
    // the final boards are shown right before the result
    let n = recorder.events.len();
    assert_eq!(recorder.events[n - 2], MatchEvent::Board { side: SideId::B });
    assert_eq!(recorder.events[n - 3], MatchEvent::Board { side: SideId::A });
    assert!(matches!(recorder.events[n - 4], MatchEvent::Shot { .. }));
    let shots = recorder
        .events
        .iter()
        .filter(|e| matches!(e, MatchEvent::Shot { .. }))
        .count();
    assert_eq!(shots, report.side_a.shots + report.side_b.shots);
    assert!(recorder.renders >= 4);
}

#[test]
fn test_turns_alternate_starting_with_a() {
    let mut game = Match::new(hunt_side(1), hunt_side(2));
    let mut recorder = Recorder::default();
    game.play(&mut recorder).unwrap();

    let attackers: Vec<_> = recorder
        .events
        .iter()
        .filter_map(|e| match e {
            MatchEvent::Shot { attacker, .. } => Some(*attacker),
            _ => None,
        })
        .collect();
    for (i, attacker) in attackers.iter().enumerate() {
        let expected = if i % 2 == 0 { SideId::A } else { SideId::B };
        assert_eq!(*attacker, expected);
    }
}

#[test]
fn test_match_is_reproducible() {
    let mut g1 = Match::new(hunt_side(10), hunt_side(20));
    let mut g2 = Match::new(hunt_side(10), hunt_side(20));
    let r1 = g1.play(&mut NullDisplay).unwrap();
    let r2 = g2.play(&mut NullDisplay).unwrap();
    assert_eq!(r1, r2);
    assert_eq!(g1.grid(SideId::A), g2.grid(SideId::A));
    assert_eq!(g1.grid(SideId::B), g2.grid(SideId::B));
}

#[test]
fn test_step_stops_after_winner() {
    let mut game = Match::new(hunt_side(5), hunt_side(6));
    let mut winner = None;
    for _ in 0..2 * GRID_SIZE * GRID_SIZE {
        winner = game.step(&mut NullDisplay).unwrap();
        if winner.is_some() {
            break;
        }
    }
    let winner = winner.expect("match must finish within 128 shots");
    assert_eq!(game.winner(), Some(winner));
    let frozen = *game.grid(winner.opponent());
    assert_eq!(game.step(&mut NullDisplay).unwrap(), Some(winner));
    assert_eq!(*game.grid(winner.opponent()), frozen);
}

#[test]
fn test_rematch_restores_deployment() {
    let side_a = hunt_side(30);
    let side_b = hunt_side(31);
    let deployed_a = *side_a.grid();
    let deployed_b = *side_b.grid();

    let mut game = Match::new(side_a, side_b);
    game.play(&mut NullDisplay).unwrap();
    game.rematch();

    assert_eq!(*game.grid(SideId::A), deployed_a);
    assert_eq!(*game.grid(SideId::B), deployed_b);
    assert_eq!(game.winner(), None);
    assert_eq!(game.next_to_fire(), SideId::A);
    assert_eq!(game.side(SideId::A).strategy().mode(), Mode::Search);

    let report = game.play(&mut NullDisplay).unwrap();
    assert!(game.grid(report.winner.opponent()).all_ships_sunk());
}

#[test]
fn test_hunting_beats_random_on_average() {
    let mut hunt_total = 0;
    let mut random_total = 0;
    for seed in 0..20u64 {
        // the defender only ever misses, so side A always wins
        let target = deployed_grid(seed);
        let mut empty = Grid::new();
        empty.set(0, 0, Cell::Ship).unwrap();

        for (strategy, total) in [
            (Box::new(HuntStrategy::new()) as Box<dyn Strategy>, &mut hunt_total),
            (Box::new(RandomStrategy::new()) as Box<dyn Strategy>, &mut random_total),
        ] {
            let attacker = Side::new(empty, strategy, SmallRng::seed_from_u64(seed));
            let idle = Side::new(target, Box::new(Idle), SmallRng::seed_from_u64(0));
            let mut game = Match::new(attacker, idle);
            let report = game.play(&mut NullDisplay).unwrap();
            assert_eq!(report.winner, SideId::A);
            *total += report.side_a.shots;
        }
    }
    assert!(hunt_total < random_total);
}

/// Sweeps the grid in order but never touches (0, 0), so it can never win
/// against a grid whose only ship sits there.
struct Idle;

impl Strategy for Idle {
    fn select_target(&mut self, _rng: &mut SmallRng, hits: &GridMask, misses: &GridMask) -> Option<Target> {
        // skip the one ship cell of the decoy grid
        let open = !(*hits | *misses) & !GridMask::from_cells([(0, 0)]).unwrap();
        open.nth_set_bit(0).map(|(row, col)| Target { row, col, mode: Mode::Search })
    }
}

/// Fires at the same cell forever.
struct Stubborn;

impl Strategy for Stubborn {
    fn select_target(&mut self, _rng: &mut SmallRng, _hits: &GridMask, _misses: &GridMask) -> Option<Target> {
        Some(Target { row: 0, col: 0, mode: Mode::Search })
    }
}

/// Never has an answer.
struct Mute;

impl Strategy for Mute {
    fn select_target(&mut self, _rng: &mut SmallRng, _hits: &GridMask, _misses: &GridMask) -> Option<Target> {
        None
    }
}

#[test]
fn test_repeat_shot_is_reported_as_error() {
    let a = Side::new(deployed_grid(1), Box::new(Stubborn), SmallRng::seed_from_u64(1));
    let b = Side::new(deployed_grid(2), Box::new(Stubborn), SmallRng::seed_from_u64(2));
    let mut game = Match::new(a, b);
    let first = game.step(&mut NullDisplay).unwrap();
    assert_eq!(first, None);
    game.step(&mut NullDisplay).unwrap();
    let err = game.step(&mut NullDisplay).unwrap_err();
    assert!(matches!(err, MatchError::Grid(_)));
}

#[test]
fn test_missing_target_is_reported() {
    let a = Side::new(deployed_grid(1), Box::new(Mute), SmallRng::seed_from_u64(1));
    let b = hunt_side(2);
    let mut game = Match::new(a, b);
    assert_eq!(
        game.step(&mut NullDisplay).unwrap_err(),
        MatchError::NoTarget { side: SideId::A }
    );
}

#[test]
fn test_shot_events_report_outcomes_consistently() {
    let mut game = Match::new(hunt_side(77), hunt_side(78));
    let mut recorder = Recorder::default();
    let report = game.play(&mut recorder).unwrap();
    let hits_a = recorder
        .events
        .iter()
        .filter(|e| {
            matches!(e, MatchEvent::Shot { attacker: SideId::A, outcome: ShotOutcome::Hit, .. })
        })
        .count();
    assert_eq!(hits_a, report.side_a.hits);
}

#[test]
fn test_strategy_stream_is_separate_from_placement() {
    let mut placement = SmallRng::seed_from_u64(9);
    let mut targeting = strategy_rng(9);
    let a: Vec<u64> = (0..8).map(|_| placement.random()).collect();
    let b: Vec<u64> = (0..8).map(|_| targeting.random()).collect();
    assert_ne!(a, b);

    let mut again = strategy_rng(9);
    let c: Vec<u64> = (0..8).map(|_| again.random()).collect();
    assert_eq!(b, c);
}
