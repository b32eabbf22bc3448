use crate::chess_boards::chess_board::{ChessResult, Move, State, DEFAULT_DEPTH};

pub mod engine_alpha_beta;
pub mod engine_minmax;

pub const MIN_EVALUATION: i32 = i32::MIN + 1; // +1 is important because -MIN is not a i32 number
pub const MAX_EVALUATION: i32 = i32::MAX;
pub const WIN: i32 = 10_000_000;
pub const LOSS: i32 = -10_000_000;
pub const DRAW: i32 = 0;

/// Search settings. `depth` is the horizon of the root states a game builds,
/// `random` shuffles the root actions, `seed` makes the shuffle repeatable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: usize,
    pub random: bool,
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            random: false,
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(depth: usize) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}

pub trait SearchEngine {
    fn name(&self) -> &str;
    /// Best action for the side to move in `root`, its score from that
    /// side's view and the number of visited nodes.
    fn search(&mut self, root: &State) -> ChessResult<(Move, i32, u64)>;
}

/// Score of a state without legal actions, seen from the maximizing side.
/// Quicker mates score further from zero.
fn terminal_value(state: &State, ply: usize, maximizing: bool) -> i32 {
    let ply = ply as i32;
    match (state.player_in_check(), maximizing) {
        (true, true) => LOSS + ply,
        (true, false) => WIN - ply,
        (false, _) => DRAW,
    }
}

/// Static score at the horizon, seen from the maximizing side.
fn cutoff_value(state: &State, maximizing: bool) -> i32 {
    if maximizing {
        state.evaluate()
    } else {
        -state.evaluate()
    }
}
