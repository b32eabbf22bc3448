use crate::chess_boards::chess_board::{Move, State};

pub fn perft(state: &State, depth: u8) -> u64 {
    let mut node_count = 0u64;

    if depth == 0 {
        return 1u64;
    }

    for mv in state.actions() {
        node_count += perft(&state.result(mv), depth - 1);
    }
    node_count
}

/// Leaf counts below each root action, sorted by move.
pub fn divide(state: &State, depth: u8) -> Vec<(Move, u64)> {
    let mut result_moves: Vec<(Move, u64)> = state
        .actions()
        .into_iter()
        .map(|mv| (mv, perft(&state.result(mv), depth.saturating_sub(1))))
        .collect();
    result_moves.sort_by_key(|(mv, _)| mv.as_algebraic());
    result_moves
}
