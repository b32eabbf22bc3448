use crate::chess_boards::chess_board::{ChessError, ChessResult, Move, State};
use crate::engines::{cutoff_value, terminal_value, SearchConfig, SearchEngine, MAX_EVALUATION, MIN_EVALUATION};
use rand::prelude::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use tracing::debug;

/// Depth-limited minimax with alpha-beta pruning. The side to move at the
/// root maximizes; the horizon is the depth carried by the root state.
pub struct AlphaBetaEngine {
    config: SearchConfig,
    rng: Pcg64,
    node_count: u64,
}

impl AlphaBetaEngine {
    pub fn new(config: SearchConfig) -> Self {
        AlphaBetaEngine {
            config,
            rng: Pcg64::seed_from_u64(config.seed.unwrap_or_else(rand::random)),
            node_count: 0,
        }
    }

    pub(crate) fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Nodes visited by the last search.
    pub fn node_count(&self) -> u64 {
        self.node_count
    }

    /// Selects the move for the side to move in `root`. A root without legal
    /// actions is reported as `NoLegalMoves`, never as a scored result.
    pub fn ab_search(&mut self, root: &State) -> ChessResult<(Move, i32, u64)> {
        self.node_count = 1;

        let mut actions = root.actions();
        if actions.is_empty() {
            return Err(ChessError::NoLegalMoves);
        }
        if self.config.random {
            actions.shuffle(&mut self.rng);
        }

        let (score, best_move) = self.maximize(root, actions, MIN_EVALUATION, MAX_EVALUATION, 0);
        let best_move = best_move.ok_or(ChessError::NoLegalMoves)?;
        debug!(
            depth = root.depth(),
            score,
            nodes = self.node_count,
            best_move = %best_move,
            "alpha-beta search finished"
        );
        Ok((best_move, score, self.node_count))
    }

    pub fn max_value(&mut self, state: &State, alpha: i32, beta: i32, ply: usize) -> (i32, Option<Move>) {
        self.node_count += 1;
        if state.at_cutoff(ply) {
            return (cutoff_value(state, true), None);
        }
        let actions = state.actions();
        if actions.is_empty() {
            return (terminal_value(state, ply, true), None);
        }
        self.maximize(state, actions, alpha, beta, ply)
    }

    pub fn min_value(&mut self, state: &State, alpha: i32, beta: i32, ply: usize) -> (i32, Option<Move>) {
        self.node_count += 1;
        if state.at_cutoff(ply) {
            return (cutoff_value(state, false), None);
        }
        let actions = state.actions();
        if actions.is_empty() {
            return (terminal_value(state, ply, false), None);
        }

        let mut beta = beta;
        let mut best = (MAX_EVALUATION, None);
        for action in actions {
            let (value, _) = self.max_value(&state.result(action), alpha, beta, ply + 1);
            if value < best.0 {
                best = (value, Some(action));
                beta = beta.min(value);
            }
            if best.0 <= alpha {
                // Alpha cutoff
                return best;
            }
        }
        best
    }

    fn maximize(&mut self, state: &State, actions: Vec<Move>, alpha: i32, beta: i32, ply: usize) -> (i32, Option<Move>) {
        let mut alpha = alpha;
        let mut best = (MIN_EVALUATION, None);
        for action in actions {
            let (value, _) = self.min_value(&state.result(action), alpha, beta, ply + 1);
            if value > best.0 {
                best = (value, Some(action));
                alpha = alpha.max(value);
            }
            if best.0 >= beta {
                // Beta cutoff
                return best;
            }
        }
        best
    }
}

impl SearchEngine for AlphaBetaEngine {
    fn name(&self) -> &str {
        "alpha-beta"
    }

    fn search(&mut self, root: &State) -> ChessResult<(Move, i32, u64)> {
        self.ab_search(root)
    }
}
