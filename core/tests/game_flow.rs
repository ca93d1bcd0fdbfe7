use std::collections::HashMap;
use std::time::{Duration, Instant};

use matching_game_core::{
    Board, ClickOutcome, Game, GameConfig, GridSize, ManualTimer, Phase, Position, Symbol,
    TileColor, TileStatus,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn seeded_board(size: u8, seed: u64) -> Board {
    let mut rng = StdRng::seed_from_u64(seed);
    Board::generate(GridSize::square(size).unwrap(), &TileColor::ALL, &mut rng).unwrap()
}

fn new_game(board: Board) -> Game<ManualTimer> {
    Game::new(board, GameConfig::default().hide_delay(), ManualTimer::new())
}

/// Both positions of every symbol on the board.
fn pairs_of(board: &Board) -> Vec<(Position, Position)> {
    let mut seen: HashMap<Symbol, Position> = HashMap::new();
    let mut pairs = Vec::new();
    for cell in board.cells() {
        if let Some(first) = seen.remove(&cell.symbol) {
            pairs.push((first, cell.position));
        } else {
            seen.insert(cell.symbol, cell.position);
        }
    }
    pairs
}

/// Two hidden cells that do not form a pair.
fn mismatch_of(board: &Board) -> (Position, Position) {
    let pairs = pairs_of(board);
    (pairs[0].0, pairs[1].0)
}

#[test]
fn every_preset_board_holds_same_colored_pairs() {
    for size in [4u8, 6, 8] {
        for seed in 0..20 {
            let board = seeded_board(size, seed);
            let mut counts: HashMap<Symbol, Vec<TileColor>> = HashMap::new();
            for cell in board.cells() {
                counts.entry(cell.symbol).or_default().push(cell.color);
            }
            assert_eq!(counts.len(), board.pair_count());
            for (symbol, colors) in counts {
                assert_eq!(colors.len(), 2, "symbol {symbol} on {size}x{size}");
                assert_eq!(colors[0], colors[1], "symbol {symbol} on {size}x{size}");
            }
        }
    }
}

#[test]
fn random_board_uses_configured_palette() {
    let palette = [TileColor::Orange, TileColor::Brown];
    let board = Board::random(GridSize::square(8).unwrap(), &palette).unwrap();
    assert!(board.cells().iter().all(|c| palette.contains(&c.color)));
}

#[test]
fn matching_first_pair_on_4x4() {
    let board = seeded_board(4, 42);
    let (a, b) = pairs_of(&board)[0];
    let mut game = new_game(board);
    let now = Instant::now();

    game.click(a, now);
    let outcome = game.click(b, now);

    assert_eq!(outcome, ClickOutcome::Matched { first: a, second: b });
    assert_eq!(game.matches_found(), 1);
    assert_eq!(game.attempts(), 1);
    assert_eq!(game.phase(), Phase::AwaitingFirstClick);
    assert_eq!(game.board().cell(a).unwrap().status, TileStatus::Matched);
    assert_eq!(game.board().cell(b).unwrap().status, TileStatus::Matched);
    assert!(game.timer().scheduled().is_empty());
}

#[test]
fn third_click_during_delay_cancels_hide() {
    let board = seeded_board(4, 5);
    let (a, b) = mismatch_of(&board);
    let third = pairs_of(&board)[2].0;
    let mut game = new_game(board);
    let now = Instant::now();

    game.click(a, now);
    let outcome = game.click(b, now);
    let ClickOutcome::Mismatched { ticket, .. } = outcome else {
        panic!("expected mismatch, got {outcome:?}");
    };
    assert_eq!(game.phase(), Phase::ResolvingDelay { first: a, second: b });

    let outcome = game.click(third, now + Duration::from_millis(300));

    assert_eq!(
        outcome,
        ClickOutcome::FirstPick {
            position: third,
            hidden: Some([a, b])
        }
    );
    assert_eq!(game.timer().cancelled(), &[ticket]);
    assert_eq!(game.board().cell(a).unwrap().status, TileStatus::Hidden);
    assert_eq!(game.board().cell(b).unwrap().status, TileStatus::Hidden);
    assert_eq!(game.phase(), Phase::AwaitingSecondClick { first: third });
    assert_eq!(game.attempts(), 1);

    // The cancelled task firing late must not touch the board.
    assert_eq!(game.hide_elapsed(ticket), None);
    assert_eq!(game.board().cell(third).unwrap().status, TileStatus::Flipped);
}

#[test]
fn hide_fires_without_intervening_click() {
    let board = seeded_board(6, 9);
    let (a, b) = mismatch_of(&board);
    let mut game = new_game(board);
    let now = Instant::now();

    game.click(a, now);
    game.click(b, now);
    let (ticket, delay) = game.timer().scheduled()[0];
    assert_eq!(delay, Duration::from_secs(2));

    assert_eq!(game.hide_elapsed(ticket), Some([a, b]));
    assert_eq!(game.phase(), Phase::AwaitingFirstClick);
    assert_eq!(game.board().revealed_count(), 0);
    assert!(game.timer().cancelled().is_empty());
}

#[test]
fn attempts_count_only_second_clicks() {
    let board = seeded_board(4, 77);
    let (a, b) = mismatch_of(&board);
    let (c, d) = pairs_of(&board)[3];
    let mut game = new_game(board);
    let now = Instant::now();

    game.click(a, now);
    assert_eq!(game.attempts(), 0);
    game.click(a, now);
    assert_eq!(game.attempts(), 0);
    game.click(Position::new(9, 9), now);
    assert_eq!(game.attempts(), 0);
    game.click(b, now);
    assert_eq!(game.attempts(), 1);
    game.click(c, now);
    assert_eq!(game.attempts(), 1);
    game.click(d, now);
    assert_eq!(game.attempts(), 2);
}

#[test]
fn clicking_revealed_cell_twice_changes_nothing() {
    let board = seeded_board(4, 3);
    let (a, b) = pairs_of(&board)[0];
    let mut game = new_game(board);
    let now = Instant::now();
    game.click(a, now);
    game.click(b, now);

    let before_board = game.board().clone();
    let before_phase = game.phase();
    for _ in 0..2 {
        assert_eq!(game.click(a, now), ClickOutcome::Ignored);
    }
    assert_eq!(game.board(), &before_board);
    assert_eq!(game.phase(), before_phase);
    assert_eq!(game.attempts(), 1);
    assert_eq!(game.matches_found(), 1);
}

#[test]
fn solving_board_reports_summary() {
    let board = seeded_board(8, 2024);
    let pairs = pairs_of(&board);
    let cell_count = board.cells().len();
    let (x, y) = mismatch_of(&board);
    let mut game = new_game(board);
    let start = Instant::now();

    // One wrong guess first, resolved by the timer.
    game.click(x, start);
    game.click(y, start);
    let ticket = game.timer().last_scheduled().unwrap();
    game.hide_elapsed(ticket);

    let mut last = ClickOutcome::Ignored;
    for (i, &(a, b)) in pairs.iter().enumerate() {
        let t = start + Duration::from_secs(2 * (i as u64 + 1));
        game.click(a, t);
        last = game.click(b, t);
    }

    let ClickOutcome::Won { summary, .. } = last else {
        panic!("expected win, got {last:?}");
    };
    assert_eq!(summary.attempts, pairs.len() as u32 + 1);
    assert_eq!(summary.elapsed, Duration::from_secs(2 * pairs.len() as u64));
    assert_eq!(game.phase(), Phase::Won(summary));
    assert_eq!(game.matches_found(), game.total_pairs());
    assert_eq!(game.board().revealed_count(), cell_count);
    assert!(game.board().is_solved());
    assert_eq!(game.click(pairs[0].0, start), ClickOutcome::Ignored);
}

#[test]
fn custom_rectangular_board_is_playable() {
    let size = GridSize::new(3, 4).unwrap();
    let mut rng = StdRng::seed_from_u64(8);
    let board = Board::generate(size, &TileColor::ALL, &mut rng).unwrap();
    let pairs = pairs_of(&board);
    assert_eq!(pairs.len(), 6);

    let mut game = new_game(board);
    let now = Instant::now();
    for &(a, b) in &pairs {
        game.click(a, now);
        game.click(b, now);
    }
    assert!(game.phase().is_won());
}
