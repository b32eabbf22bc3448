use crate::chess_boards::chess_board::{ChessError, ChessResult, Move, State};
use crate::engines::{cutoff_value, terminal_value, SearchEngine, MAX_EVALUATION, MIN_EVALUATION};
use tracing::debug;

/// Full-width minimax without pruning. Scores leaves exactly like
/// `AlphaBetaEngine`, so both agree on every position.
#[derive(Debug, Default)]
pub struct MinimaxEngine {
    node_count: u64,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> u64 {
        self.node_count
    }

    pub fn find_best_move(&mut self, root: &State) -> ChessResult<(Move, i32, u64)> {
        self.node_count = 1;

        let mut best_move = None;
        let mut best_score = MIN_EVALUATION;
        for mv in root.actions() {
            let score = self.min_value(&root.result(mv), 1);
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
        }

        let best_move = best_move.ok_or(ChessError::NoLegalMoves)?;
        debug!(depth = root.depth(), score = best_score, nodes = self.node_count, best_move = %best_move, "minimax search finished");
        Ok((best_move, best_score, self.node_count))
    }

    fn max_value(&mut self, state: &State, ply: usize) -> i32 {
        self.node_count += 1;
        if state.at_cutoff(ply) {
            return cutoff_value(state, true);
        }
        let actions = state.actions();
        if actions.is_empty() {
            return terminal_value(state, ply, true);
        }
        actions
            .into_iter()
            .map(|mv| self.min_value(&state.result(mv), ply + 1))
            .fold(MIN_EVALUATION, i32::max)
    }

    fn min_value(&mut self, state: &State, ply: usize) -> i32 {
        self.node_count += 1;
        if state.at_cutoff(ply) {
            return cutoff_value(state, false);
        }
        let actions = state.actions();
        if actions.is_empty() {
            return terminal_value(state, ply, false);
        }
        actions
            .into_iter()
            .map(|mv| self.max_value(&state.result(mv), ply + 1))
            .fold(MAX_EVALUATION, i32::min)
    }
}

impl SearchEngine for MinimaxEngine {
    fn name(&self) -> &str {
        "minimax"
    }

    fn search(&mut self, root: &State) -> ChessResult<(Move, i32, u64)> {
        self.find_best_move(root)
    }
}
