use super::{AnimationConfig, DropAnimation};
use crate::game::{MoveRecord, Piece};

/// Row that drained pieces fall to: one below the bottom of the board.
pub const BELOW_BOARD: f64 = -1.0;

/// Turns the engine's move history into falling pieces.
///
/// The animator remembers how much of the history it has already seen, so
/// handing it the same history every tick only animates new drops.
#[derive(Debug, Clone)]
pub struct DropAnimator {
    animations: Vec<DropAnimation>,
    observed: usize,
    spawn_row: f64,
    config: AnimationConfig,
}

impl DropAnimator {
    /// Pieces enter from one row above a board of `board_height` rows.
    pub fn new(board_height: usize, config: AnimationConfig) -> Self {
        DropAnimator {
            animations: Vec::new(),
            observed: 0,
            spawn_row: board_height as f64,
            config,
        }
    }

    /// Start an animation for every move past the ones already observed.
    /// Returns how many were started.
    pub fn observe(&mut self, history: &[MoveRecord]) -> usize {
        if history.len() < self.observed {
            // The game was reset without draining
            self.observed = 0;
        }

        let new_moves = &history[self.observed..];
        for record in new_moves {
            self.animations.push(DropAnimation::new(
                record.piece,
                record.column,
                self.spawn_row,
                record.row as f64,
                self.config.bounce,
                self.config.restitution,
            ));
        }
        self.observed = history.len();
        new_moves.len()
    }

    /// Advance every animation, dropping the ones that resolved. Returns true
    /// if any animation resolved during this step.
    pub fn advance(&mut self, delta: f64) -> bool {
        let before = self.animations.len();
        self.animations.retain_mut(|anim| !anim.advance(delta));
        self.animations.len() != before
    }

    /// `(piece, column, row)` of every piece in flight.
    pub fn active_animations(&self) -> impl Iterator<Item = (Piece, usize, f64)> + '_ {
        self.animations
            .iter()
            .map(|anim| (anim.piece(), anim.column(), anim.row()))
    }

    pub fn animations(&self) -> &[DropAnimation] {
        &self.animations
    }

    pub fn is_animating(&self) -> bool {
        !self.animations.is_empty()
    }

    /// True if a piece in flight will come to rest at `(column, row)`.
    pub fn has_animation_landing_at(&self, column: usize, row: usize) -> bool {
        self.animations
            .iter()
            .any(|anim| anim.column() == column && anim.final_row() == row as f64)
    }

    /// Drain the board below [`BELOW_BOARD`]. See [`Self::discard_all_downward_to`].
    pub fn discard_all_downward(&mut self, history: &[MoveRecord]) {
        self.discard_all_downward_to(history, BELOW_BOARD);
    }

    /// Make every piece in `history` fall from where it rests to `final_row`,
    /// without bouncing.
    ///
    /// A piece still in flight towards its resting cell is redirected instead
    /// of being duplicated. Call this with the history of the game that is
    /// about to be reset; the next game's history is observed from its start.
    pub fn discard_all_downward_to(&mut self, history: &[MoveRecord], final_row: f64) {
        let in_flight = self.animations.len();

        for record in history {
            let existing = self.animations[..in_flight].iter().position(|anim| {
                anim.column() == record.column && anim.final_row() == record.row as f64
            });

            match existing {
                Some(index) => self.animations[index].redirect(final_row),
                None => self.animations.push(DropAnimation::new(
                    record.piece,
                    record.column,
                    record.row as f64,
                    final_row,
                    false,
                    self.config.restitution,
                )),
            }
        }

        self.observed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;

    fn animator(height: usize) -> DropAnimator {
        DropAnimator::new(height, AnimationConfig::default())
    }

    #[test]
    fn test_observe_spawns_above_board() {
        let mut state = GameState::new(4, 7, 6).unwrap();
        let mut animator = animator(6);
        state.drop_current(2).unwrap();

        assert_eq!(animator.observe(state.history()), 1);
        let anim = &animator.animations()[0];
        assert_eq!(anim.column(), 2);
        assert_eq!(anim.initial_row(), 6.0);
        assert_eq!(anim.final_row(), 0.0);
        assert!(animator.has_animation_landing_at(2, 0));
    }

    #[test]
    fn test_observe_is_idempotent() {
        let mut state = GameState::new(4, 7, 6).unwrap();
        let mut animator = animator(6);
        state.drop_current(0).unwrap();
        state.drop_current(1).unwrap();

        animator.observe(state.history());
        assert_eq!(animator.observe(state.history()), 0);
        assert_eq!(animator.animations().len(), 2);

        state.drop_current(2).unwrap();
        assert_eq!(animator.observe(state.history()), 1);
        assert_eq!(animator.animations().len(), 3);
    }

    #[test]
    fn test_advance_removes_resolved() {
        let mut state = GameState::new(4, 7, 6).unwrap();
        let mut animator = animator(6);
        state.drop_current(0).unwrap();
        animator.observe(state.history());

        let mut steps = 0;
        while animator.is_animating() {
            animator.advance(0.1);
            steps += 1;
            assert!(steps < 1_000);
        }
        assert_eq!(animator.active_animations().count(), 0);
    }

    #[test]
    fn test_discard_drains_resting_pieces() {
        let mut state = GameState::new(4, 7, 6).unwrap();
        let mut animator = animator(6);
        for column in [0, 0, 3] {
            state.drop_current(column).unwrap();
        }
        animator.observe(state.history());
        while animator.is_animating() {
            animator.advance(0.1);
        }

        animator.discard_all_downward(state.history());
        state.reset();

        assert_eq!(animator.animations().len(), 3);
        for anim in animator.animations() {
            assert_eq!(anim.final_row(), BELOW_BOARD);
        }
        let rows: Vec<f64> = animator.animations().iter().map(|a| a.initial_row()).collect();
        assert_eq!(rows, vec![0.0, 1.0, 0.0]);

        // The fresh history is observed from the start
        state.drop_current(5).unwrap();
        assert_eq!(animator.observe(state.history()), 1);
    }

    #[test]
    fn test_discard_redirects_in_flight_piece() {
        let mut state = GameState::new(4, 7, 6).unwrap();
        let mut animator = animator(6);
        state.drop_current(4).unwrap();
        animator.observe(state.history());
        animator.advance(0.5);

        animator.discard_all_downward(state.history());

        assert_eq!(animator.animations().len(), 1);
        let anim = &animator.animations()[0];
        assert_eq!(anim.final_row(), BELOW_BOARD);
        assert_eq!(anim.initial_row(), 6.0);
    }

    #[test]
    fn test_observe_after_reset_without_drain() {
        let mut state = GameState::new(4, 7, 6).unwrap();
        let mut animator = animator(6);
        state.drop_current(0).unwrap();
        state.drop_current(1).unwrap();
        animator.observe(state.history());

        state.reset();
        state.drop_current(6).unwrap();
        assert_eq!(animator.observe(state.history()), 1);
    }
}
