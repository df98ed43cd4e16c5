use crate::game::Piece;

/// Fraction of speed a piece keeps when it bounces off the piece below it.
pub const DEFAULT_RESTITUTION: f64 = 0.3;

/// Which closed-form parabola the piece is currently following.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Falling,
    Bouncing,
}

/// One piece falling down a column.
///
/// Position is a closed-form function of elapsed time, so the motion does not
/// depend on the size of the steps it is advanced by. Before the first contact
/// at `t1 = sqrt(initial_row - final_row)` the row follows
/// `initial_row - t^2`. When bouncing, after `t1` it follows
/// `-t^2 + c1 * t + c2`, which meets the first parabola at `t1` and leaves it
/// with `-restitution` times the incoming velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct DropAnimation {
    piece: Piece,
    column: usize,
    row: f64,
    initial_row: f64,
    final_row: f64,
    time: f64,
    bounce: bool,
    prevent_new_bounce: bool,
    phase: Phase,
    bounce_time: f64,
    c1: f64,
    c2: f64,
}

impl DropAnimation {
    pub fn new(
        piece: Piece,
        column: usize,
        initial_row: f64,
        final_row: f64,
        bounce: bool,
        restitution: f64,
    ) -> Self {
        let dy = (initial_row - final_row).max(0.0);
        let r = restitution;

        DropAnimation {
            piece,
            column,
            row: initial_row,
            initial_row,
            final_row,
            time: 0.0,
            bounce,
            prevent_new_bounce: false,
            phase: Phase::Falling,
            bounce_time: dy.sqrt(),
            c1: 2.0 * dy.sqrt() * (1.0 + r),
            c2: final_row - dy - 2.0 * dy * r,
        }
    }

    pub fn piece(&self) -> Piece {
        self.piece
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Current (continuous) row of the piece.
    pub fn row(&self) -> f64 {
        self.row
    }

    pub fn initial_row(&self) -> f64 {
        self.initial_row
    }

    pub fn final_row(&self) -> f64 {
        self.final_row
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Time of first contact with `final_row` as planned at creation.
    pub fn bounce_time(&self) -> f64 {
        self.bounce_time
    }

    pub fn is_bouncing(&self) -> bool {
        self.phase == Phase::Bouncing
    }

    /// Keep the piece from bouncing if its bounce has not started yet.
    pub fn prevent_new_bounce(&mut self) {
        self.prevent_new_bounce = true;
    }

    /// Send the piece somewhere else, without a new bounce. The bounce
    /// parameters planned at creation are kept.
    pub fn redirect(&mut self, final_row: f64) {
        self.final_row = final_row;
        self.prevent_new_bounce();
    }

    fn follows_fall(&self, time: f64) -> bool {
        !self.bounce
            || time <= self.bounce_time
            || (self.phase == Phase::Falling && self.prevent_new_bounce)
    }

    /// Row along the trajectory at `time`, given the current phase.
    pub fn row_at(&self, time: f64) -> f64 {
        if self.follows_fall(time) {
            self.initial_row - time * time
        } else {
            -time * time + self.c1 * time + self.c2
        }
    }

    /// Advance the animation by `delta` time units.
    ///
    /// Returns true once the animation has resolved, with the row clamped to
    /// `final_row`.
    pub fn advance(&mut self, delta: f64) -> bool {
        self.time += delta;
        if !self.follows_fall(self.time) {
            self.phase = Phase::Bouncing;
        }
        self.row = self.row_at(self.time);

        if self.is_finished() {
            self.row = self.final_row;
            true
        } else {
            false
        }
    }

    fn is_finished(&self) -> bool {
        self.row <= self.final_row && (!self.is_bouncing() || self.time >= self.bounce_time)
    }
}
