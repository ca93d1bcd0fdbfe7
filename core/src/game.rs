use std::fmt;
use std::time::{Duration, Instant};

use crate::board::Board;
use crate::timer::{HideTicket, HideTimer};
use crate::types::{GridSize, Position, TileStatus};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameSummary {
    pub size: GridSize,
    pub elapsed: Duration,
    pub attempts: u32,
}

impl GameSummary {
    pub fn minutes(&self) -> u64 {
        self.elapsed.as_secs() / 60
    }

    pub fn seconds(&self) -> u64 {
        self.elapsed.as_secs() % 60
    }
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You completed the game in {}m {}s\nNumber of attempts: {}",
            self.minutes(),
            self.seconds(),
            self.attempts
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingFirstClick,
    AwaitingSecondClick { first: Position },
    ResolvingDelay { first: Position, second: Position },
    Won(GameSummary),
}

impl Phase {
    pub const fn is_won(&self) -> bool {
        matches!(self, Self::Won(_))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Out of range, already face-up, or the board is solved.
    Ignored,
    /// First cell of a new attempt. `hidden` holds the mismatched pair that
    /// this click flipped back early.
    FirstPick {
        position: Position,
        hidden: Option<[Position; 2]>,
    },
    Matched { first: Position, second: Position },
    Mismatched {
        first: Position,
        second: Position,
        ticket: HideTicket,
    },
    Won {
        first: Position,
        second: Position,
        summary: GameSummary,
    },
}

#[derive(Debug)]
struct PendingHide<H> {
    ticket: HideTicket,
    positions: [Position; 2],
    handle: H,
}

/// Click sequencing for one board. A new board means a new `Game`; dropping a
/// game cancels its pending hide.
pub struct Game<T: HideTimer> {
    board: Board,
    phase: Phase,
    attempts: u32,
    matches_found: usize,
    started_at: Option<Instant>,
    hide_delay: Duration,
    pending_hide: Option<PendingHide<T::Handle>>,
    next_ticket: u64,
    timer: T,
}

impl<T: HideTimer> Game<T> {
    pub fn new(board: Board, hide_delay: Duration, timer: T) -> Self {
        Self {
            board,
            phase: Phase::AwaitingFirstClick,
            attempts: 0,
            matches_found: 0,
            started_at: None,
            hide_delay,
            pending_hide: None,
            next_ticket: 1,
            timer,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn matches_found(&self) -> usize {
        self.matches_found
    }

    pub fn total_pairs(&self) -> usize {
        self.board.pair_count()
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn pending_hide(&self) -> Option<(HideTicket, [Position; 2])> {
        self.pending_hide
            .as_ref()
            .map(|pending| (pending.ticket, pending.positions))
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.phase {
            Phase::Won(summary) => summary.elapsed,
            _ => self
                .started_at
                .map(|start| now.saturating_duration_since(start))
                .unwrap_or_default(),
        }
    }

    pub fn click(&mut self, pos: Position, now: Instant) -> ClickOutcome {
        if self.phase.is_won() {
            return ClickOutcome::Ignored;
        }
        match self.board.cell(pos) {
            Some(cell) if !cell.is_revealed() => {}
            Some(_) => {
                tracing::trace!(%pos, "click on revealed cell ignored");
                return ClickOutcome::Ignored;
            }
            None => {
                tracing::trace!(%pos, "click outside board ignored");
                return ClickOutcome::Ignored;
            }
        }

        let hidden = if let Phase::ResolvingDelay { first, second } = self.phase {
            self.cancel_pending_hide();
            self.board.set_status(first, TileStatus::Hidden);
            self.board.set_status(second, TileStatus::Hidden);
            self.phase = Phase::AwaitingFirstClick;
            tracing::debug!(%first, %second, "mismatch hidden early by new click");
            Some([first, second])
        } else {
            None
        };

        match self.phase {
            Phase::AwaitingFirstClick => {
                self.started_at.get_or_insert(now);
                self.board.set_status(pos, TileStatus::Flipped);
                self.phase = Phase::AwaitingSecondClick { first: pos };
                ClickOutcome::FirstPick {
                    position: pos,
                    hidden,
                }
            }
            Phase::AwaitingSecondClick { first } => self.resolve_second_pick(first, pos, now),
            Phase::ResolvingDelay { .. } | Phase::Won(_) => ClickOutcome::Ignored,
        }
    }

    fn resolve_second_pick(
        &mut self,
        first: Position,
        second: Position,
        now: Instant,
    ) -> ClickOutcome {
        self.board.set_status(second, TileStatus::Flipped);
        self.attempts += 1;

        let is_pair = match (self.board.cell(first), self.board.cell(second)) {
            (Some(a), Some(b)) => a.pairs_with(b),
            _ => false,
        };

        if !is_pair {
            let ticket = HideTicket(self.next_ticket);
            self.next_ticket += 1;
            let handle = self.timer.schedule(ticket, self.hide_delay);
            self.pending_hide = Some(PendingHide {
                ticket,
                positions: [first, second],
                handle,
            });
            self.phase = Phase::ResolvingDelay { first, second };
            tracing::debug!(%first, %second, attempts = self.attempts, "mismatch");
            return ClickOutcome::Mismatched {
                first,
                second,
                ticket,
            };
        }

        self.board.set_status(first, TileStatus::Matched);
        self.board.set_status(second, TileStatus::Matched);
        self.matches_found += 1;
        tracing::debug!(%first, %second, matches = self.matches_found, "pair matched");

        if self.matches_found == self.total_pairs() {
            let summary = GameSummary {
                size: self.board.size(),
                elapsed: self.elapsed(now),
                attempts: self.attempts,
            };
            self.phase = Phase::Won(summary);
            tracing::info!(
                size = %summary.size,
                elapsed_secs = summary.elapsed.as_secs(),
                attempts = summary.attempts,
                "board solved"
            );
            ClickOutcome::Won {
                first,
                second,
                summary,
            }
        } else {
            self.phase = Phase::AwaitingFirstClick;
            ClickOutcome::Matched { first, second }
        }
    }

    /// Called by the driver when the hide scheduled under `ticket` fires.
    /// Returns the cells that were turned back, or `None` for a stale ticket.
    pub fn hide_elapsed(&mut self, ticket: HideTicket) -> Option<[Position; 2]> {
        if self.pending_hide.as_ref().map(|p| p.ticket) != Some(ticket) {
            tracing::debug!(ticket = ticket.0, "stale hide ignored");
            return None;
        }
        // The task already ran, so its handle is released without cancelling.
        let pending = self.pending_hide.take()?;
        let [first, second] = pending.positions;
        self.board.set_status(first, TileStatus::Hidden);
        self.board.set_status(second, TileStatus::Hidden);
        self.phase = Phase::AwaitingFirstClick;
        Some(pending.positions)
    }

    fn cancel_pending_hide(&mut self) {
        if let Some(pending) = self.pending_hide.take() {
            self.timer.cancel(pending.handle);
        }
    }
}

impl<T: HideTimer> Drop for Game<T> {
    fn drop(&mut self) {
        self.cancel_pending_hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualTimer;
    use crate::types::{Symbol, TileColor};

    const DELAY: Duration = Duration::from_millis(2000);

    /// 2x2 board laid out as
    /// ```text
    /// A B
    /// B A
    /// ```
    fn small_game() -> Game<ManualTimer> {
        small_game_with(ManualTimer::new())
    }

    fn small_game_with<T: HideTimer>(timer: T) -> Game<T> {
        let a = Symbol::new('A').unwrap();
        let b = Symbol::new('B').unwrap();
        let layout = vec![
            (a, TileColor::Red),
            (b, TileColor::Blue),
            (b, TileColor::Blue),
            (a, TileColor::Red),
        ];
        let board = Board::from_pairs(GridSize::new(2, 2).unwrap(), layout).unwrap();
        Game::new(board, DELAY, timer)
    }

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn first_click_flips_and_starts_clock() {
        let mut game = small_game();
        let t0 = Instant::now();
        assert!(!game.has_started());

        let outcome = game.click(p(0, 0), t0);

        assert_eq!(
            outcome,
            ClickOutcome::FirstPick {
                position: p(0, 0),
                hidden: None
            }
        );
        assert_eq!(game.phase(), Phase::AwaitingSecondClick { first: p(0, 0) });
        assert_eq!(game.board().cell(p(0, 0)).unwrap().status, TileStatus::Flipped);
        assert_eq!(game.attempts(), 0);
        assert_eq!(game.elapsed(t0 + Duration::from_secs(3)), Duration::from_secs(3));
    }

    #[test]
    fn mismatch_schedules_hide_with_configured_delay() {
        let mut game = small_game();
        let t0 = Instant::now();
        game.click(p(0, 0), t0);
        let outcome = game.click(p(0, 1), t0);

        let ClickOutcome::Mismatched { ticket, .. } = outcome else {
            panic!("expected mismatch, got {outcome:?}");
        };
        assert_eq!(game.timer().scheduled(), &[(ticket, DELAY)]);
        assert_eq!(game.pending_hide(), Some((ticket, [p(0, 0), p(0, 1)])));
        assert_eq!(
            game.phase(),
            Phase::ResolvingDelay {
                first: p(0, 0),
                second: p(0, 1)
            }
        );
    }

    #[test]
    fn hide_elapsed_turns_cells_back() {
        let mut game = small_game();
        let t0 = Instant::now();
        game.click(p(0, 0), t0);
        game.click(p(0, 1), t0);
        let ticket = game.timer().last_scheduled().unwrap();

        assert_eq!(game.hide_elapsed(ticket), Some([p(0, 0), p(0, 1)]));
        assert_eq!(game.phase(), Phase::AwaitingFirstClick);
        assert_eq!(game.board().revealed_count(), 0);
        assert!(game.timer().cancelled().is_empty());
        assert_eq!(game.pending_hide(), None);
    }

    #[test]
    fn stale_ticket_does_not_hide_later_pair() {
        let mut game = small_game();
        let t0 = Instant::now();
        game.click(p(0, 0), t0);
        game.click(p(0, 1), t0);
        let stale = game.timer().last_scheduled().unwrap();

        // Supersede, then mismatch again.
        game.click(p(1, 0), t0);
        game.click(p(1, 1), t0);
        assert!(game.hide_elapsed(stale).is_none());
        assert_eq!(game.board().revealed_count(), 2);
    }

    #[test]
    fn clicking_mismatched_cell_during_delay_is_ignored() {
        let mut game = small_game();
        let t0 = Instant::now();
        game.click(p(0, 0), t0);
        game.click(p(0, 1), t0);

        assert_eq!(game.click(p(0, 1), t0), ClickOutcome::Ignored);
        assert!(game.pending_hide().is_some());
        assert!(game.timer().cancelled().is_empty());
    }

    #[test]
    fn dropping_game_cancels_pending_hide() {
        let mut timer = ManualTimer::new();
        let ticket = {
            let mut game = small_game_with(&mut timer);
            let t0 = Instant::now();
            game.click(p(0, 0), t0);
            game.click(p(0, 1), t0);
            game.timer().last_scheduled().unwrap()
        };

        assert_eq!(timer.cancelled(), &[ticket]);
        assert_eq!(timer.live().count(), 0);
    }

    #[test]
    fn win_freezes_elapsed_and_ignores_clicks() {
        let mut game = small_game();
        let t0 = Instant::now();
        game.click(p(0, 0), t0);
        game.click(p(1, 1), t0 + Duration::from_secs(1));
        game.click(p(0, 1), t0 + Duration::from_secs(2));
        let outcome = game.click(p(1, 0), t0 + Duration::from_secs(65));

        let ClickOutcome::Won { summary, .. } = outcome else {
            panic!("expected win, got {outcome:?}");
        };
        assert_eq!(summary.attempts, 2);
        assert_eq!(summary.elapsed, Duration::from_secs(65));
        assert_eq!(
            summary.to_string(),
            "You completed the game in 1m 5s\nNumber of attempts: 2"
        );
        assert_eq!(game.elapsed(t0 + Duration::from_secs(500)), Duration::from_secs(65));
        assert_eq!(game.click(p(0, 0), t0), ClickOutcome::Ignored);
        assert!(game.board().is_solved());
    }
}
