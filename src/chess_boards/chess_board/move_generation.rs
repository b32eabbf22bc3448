use super::{ChessResult, Move, State};
use tracing::trace;

impl State {
    /// Every legal action of the side to move. Each piece's direction vectors
    /// are scaled across the board and every candidate goes through the piece
    /// rules and the own-king check; rejected candidates are dropped.
    pub fn actions(&self) -> Vec<Move> {
        let forward = self.player.forward();
        let mut actions = Vec::with_capacity(64);

        for piece in self.player.piece_set() {
            for (dr, dc) in piece.kind.directions(forward) {
                for scale in 1..=piece.kind.range() {
                    let Some(to) = piece.field.offset(dr * scale, dc * scale) else {
                        break;
                    };
                    let mv = Move::new(piece.field, to);
                    match piece.validate(mv, &self.board, forward) {
                        Ok(()) if !self.board.leaves_king_exposed(mv, &self.player, &self.opponent) => {
                            actions.push(mv)
                        }
                        Ok(()) => trace!(%mv, "candidate leaves the king in check"),
                        Err(error) => trace!(%mv, %error, "candidate rejected"),
                    }
                    // nothing slides through an occupied square
                    if self.board.occupied(to) {
                        break;
                    }
                }
            }
        }
        actions
    }

    /// Runs the full legality pipeline for `action` on this state.
    pub fn validate(&self, action: Move) -> ChessResult<()> {
        self.board.validate_move(action, &self.player, &self.opponent)
    }

    /// The state after `action`, which must be legal here. The board is copied,
    /// the capture goes to the mover, both rosters are re-read from the new
    /// board and the other side is to move. The horizon is carried unchanged.
    pub fn result(&self, action: Move) -> State {
        debug_assert!(
            self.validate(action).is_ok(),
            "transition on an illegal action {}: {:?}",
            action,
            self.validate(action)
        );

        let mut board = self.board.clone();
        let mut mover = self.player.clone();
        let mut waiting = self.opponent.clone();

        if let Some(captured) = board.move_piece(action.from, action.to) {
            mover.claim(captured);
        }
        mover.rebuild(&board);
        waiting.rebuild(&board);

        State {
            board,
            player: waiting,
            opponent: mover,
            depth: self.depth,
        }
    }

    /// Validates `action` and, if legal, transitions on it.
    pub fn apply(&self, action: Move) -> ChessResult<State> {
        self.validate(action)?;
        Ok(self.result(action))
    }
}

#[cfg(test)]
mod tests {
    use super::super::fen::INITIAL_POSITION;
    use super::super::state::DEFAULT_DEPTH;
    use super::super::test_utils::assert_moves;
    use super::super::{ChessError, ChessField, Color, PawnRule, PieceType};
    use super::*;

    fn mv(s: &str) -> Move {
        Move::from_algebraic(s).unwrap()
    }

    fn moves_from(state: &State, square: &str) -> Vec<Move> {
        let from = ChessField::from_algebraic(square).unwrap();
        state.actions().into_iter().filter(|m| m.from == from).collect()
    }

    #[test]
    fn test_initial_actions() {
        let state = State::from_fen(INITIAL_POSITION, DEFAULT_DEPTH).unwrap();
        assert_eq!(state.actions().len(), 20);
        assert_moves(moves_from(&state, "b1"), &["b1a3", "b1c3"]);
        assert_moves(moves_from(&state, "e2"), &["e2e3", "e2e4"]);
        assert!(moves_from(&state, "a1").is_empty());

        let state = State::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b", DEFAULT_DEPTH).unwrap();
        assert_moves(moves_from(&state, "g8"), &["g8f6", "g8h6"]);
        assert_moves(moves_from(&state, "d7"), &["d7d6", "d7d5"]);
    }

    #[test]
    fn test_friendly_fire_is_excluded() {
        let state = State::from_fen("8/8/8/8/8/8/8/RN6 w", DEFAULT_DEPTH).unwrap();
        assert_eq!(
            state.validate(mv("a1b1")),
            Err(ChessError::FriendlyFire(ChessField::from_algebraic("b1").unwrap()))
        );
        assert!(!state.actions().contains(&mv("a1b1")));
        assert!(!state.actions().contains(&mv("a1c1")));
        assert_moves(
            moves_from(&state, "a1"),
            &["a1a2", "a1a3", "a1a4", "a1a5", "a1a6", "a1a7", "a1a8"],
        );
    }

    #[test]
    fn test_sliding_actions_stop_at_capture() {
        let state = State::from_fen("8/8/8/8/3p4/8/1B6/8 w", DEFAULT_DEPTH).unwrap();
        assert_moves(moves_from(&state, "b2"), &["b2a1", "b2c1", "b2a3", "b2c3", "b2d4"]);
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        let state = State::from_fen("4r3/8/8/8/8/8/4B3/4K3 w", DEFAULT_DEPTH).unwrap();
        assert!(moves_from(&state, "e2").is_empty());
        assert_eq!(state.validate(mv("e2d3")), Err(ChessError::LeavesKingInCheck));
    }

    #[test]
    fn test_result_transitions() {
        let state = State::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w", DEFAULT_DEPTH).unwrap();
        let next = state.result(mv("e4d5"));

        assert_eq!(next.player().team, Color::Black);
        assert_eq!(next.opponent().team, Color::White);
        assert_eq!(next.depth(), state.depth());
        assert_eq!(next.opponent().pieces_won().len(), 1);
        assert_eq!(next.opponent().pieces_won()[0].kind, PieceType::Pawn);
        assert_eq!(next.player().count(PieceType::Pawn), 0);
        assert_eq!(next.evaluate(), -1_000);

        // the parent snapshot is untouched
        assert_eq!(state.board().occupied_count(), 4);
        assert_eq!(state.player().team, Color::White);
        assert!(state.player().pieces_won().is_empty());
    }

    #[test]
    fn test_pawn_double_step_only_once() {
        let state = State::from_fen("4k3/8/8/8/8/8/4P3/4K3 w", DEFAULT_DEPTH).unwrap();
        assert!(state.actions().contains(&mv("e2e4")));
        let state = state.result(mv("e2e3")).result(mv("e8d8"));
        assert!(!state.actions().contains(&mv("e3e5")));
        assert_eq!(
            state.validate(mv("e3e5")),
            Err(ChessError::PawnRuleViolation(PawnRule::RepeatedOpening))
        );
        assert!(state.actions().contains(&mv("e3e4")));
    }

    #[test]
    fn test_apply_rejects_illegal_moves() {
        let state = State::from_fen(INITIAL_POSITION, DEFAULT_DEPTH).unwrap();
        assert_eq!(state.apply(mv("e2e2")), Err(ChessError::SameSquareMove(mv("e2e4").from)));
        assert_eq!(state.apply(mv("e4e5")), Err(ChessError::EmptySourceMove(mv("e4e5").from)));
        assert_eq!(state.apply(mv("e7e5")), Err(ChessError::OpponentPieceMove(mv("e7e5").from)));
        assert!(matches!(state.apply(mv("a1a3")), Err(ChessError::PathBlocked { .. })));
        assert_eq!(state.apply(mv("e2e5")).map(|_| ()), Err(ChessError::UnreachableSquare {
            kind: PieceType::Pawn,
            from: mv("e2e5").from,
            to: mv("e2e5").to,
        }));
        assert!(state.apply(mv("g1f3")).is_ok());
    }

    fn assert_roster_consistent(state: &State, depth: u8) {
        if depth == 0 {
            return;
        }
        for action in state.actions() {
            let next = state.result(action);
            assert_eq!(
                next.board().occupied_count(),
                next.player().piece_count() + next.opponent().piece_count(),
                "after {}",
                action
            );
            for piece in next.player().piece_set().chain(next.opponent().piece_set()) {
                assert_eq!(next.board().get(piece.field), Some(piece));
            }
            assert_roster_consistent(&next, depth - 1);
        }
    }

    #[test]
    fn test_roster_consistency() {
        let state = State::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w", DEFAULT_DEPTH).unwrap();
        assert_roster_consistent(&state, 2);

        let state = State::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w", DEFAULT_DEPTH).unwrap();
        assert_roster_consistent(&state, 3);
    }
}
