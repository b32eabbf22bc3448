use super::{ChessBoard, ChessError, ChessField, ChessResult, Color, Move, PawnRule, Piece, PieceType, Player};

impl Piece {
    /// Checks `mv` against this piece's movement rules, then refuses a
    /// destination held by a piece of the same team. `forward` is the row step
    /// of this piece's side.
    pub fn validate(&self, mv: Move, board: &ChessBoard, forward: i8) -> ChessResult<()> {
        self.check_pattern(mv, board, forward)?;
        match board.get(mv.to) {
            Some(target) if target.color == self.color => Err(ChessError::FriendlyFire(mv.to)),
            _ => Ok(()),
        }
    }

    /// True if this piece attacks `target`, whatever stands there.
    pub fn attacks(&self, target: ChessField, board: &ChessBoard, forward: i8) -> bool {
        let mv = Move::new(self.field, target);
        match self.kind {
            PieceType::Pawn => {
                let (dr, dc) = mv.delta();
                dr * forward == 1 && dc.abs() == 1
            }
            _ => self.check_pattern(mv, board, forward).is_ok(),
        }
    }

    fn check_pattern(&self, mv: Move, board: &ChessBoard, forward: i8) -> ChessResult<()> {
        match self.kind {
            PieceType::Pawn => self.check_pawn(mv, board, forward),
            PieceType::Knight | PieceType::King => self.check_step(mv, forward),
            PieceType::Bishop | PieceType::Rook | PieceType::Queen => self.check_slide(mv, board, forward),
        }
    }

    fn unreachable(&self, mv: Move) -> ChessError {
        ChessError::UnreachableSquare {
            kind: self.kind,
            from: mv.from,
            to: mv.to,
        }
    }

    /// Knights and kings: the displacement has to be one of the offsets.
    fn check_step(&self, mv: Move, forward: i8) -> ChessResult<()> {
        if self.kind.directions(forward).contains(&mv.delta()) {
            Ok(())
        } else {
            Err(self.unreachable(mv))
        }
    }

    /// Rooks, bishops and queens: a straight line along one of the directions
    /// with every square strictly in between empty.
    fn check_slide(&self, mv: Move, board: &ChessBoard, forward: i8) -> ChessResult<()> {
        let (dr, dc) = mv.delta();
        let straight = dr == 0 || dc == 0 || dr.abs() == dc.abs();
        let unit = (dr.signum(), dc.signum());
        if !straight || !self.kind.directions(forward).contains(&unit) {
            return Err(self.unreachable(mv));
        }

        let distance = dr.abs().max(dc.abs());
        for step in 1..distance {
            if let Some(between) = mv.from.offset(unit.0 * step, unit.1 * step) {
                if board.occupied(between) {
                    return Err(ChessError::PathBlocked {
                        kind: self.kind,
                        at: between,
                    });
                }
            }
        }
        Ok(())
    }

    fn check_pawn(&self, mv: Move, board: &ChessBoard, forward: i8) -> ChessResult<()> {
        let (dr, dc) = mv.delta();
        let advance = dr * forward;
        if advance < 0 {
            return Err(ChessError::PawnRuleViolation(PawnRule::Retreat));
        }

        match (advance, dc.abs()) {
            (1, 0) => {
                if board.occupied(mv.to) {
                    return Err(ChessError::PawnRuleViolation(PawnRule::ForwardCapture));
                }
            }
            (2, 0) => {
                if self.active {
                    return Err(ChessError::PawnRuleViolation(PawnRule::RepeatedOpening));
                }
                if let Some(skipped) = mv.from.offset(forward, 0) {
                    if board.occupied(skipped) {
                        return Err(ChessError::PathBlocked {
                            kind: self.kind,
                            at: skipped,
                        });
                    }
                }
                if board.occupied(mv.to) {
                    return Err(ChessError::PawnRuleViolation(PawnRule::ForwardCapture));
                }
            }
            (1, 1) => {
                if !board.occupied(mv.to) {
                    return Err(ChessError::PawnRuleViolation(PawnRule::EmptyDiagonal));
                }
            }
            _ => return Err(self.unreachable(mv)),
        }
        Ok(())
    }
}

impl ChessBoard {
    /// True if a piece of `color`, whose pawns advance by `forward`, attacks
    /// `target`. Only squares within two steps can hold a short-range attacker.
    pub fn is_square_attacked_by_color(&self, target: ChessField, color: Color, forward: i8) -> bool {
        let short_range = self
            .neighborhood(target, 2)
            .filter_map(|field| self.get(field))
            .filter(|piece| !piece.kind.is_sliding());
        let sliding = self.pieces().filter(|piece| piece.kind.is_sliding());

        short_range
            .chain(sliding)
            .filter(|piece| piece.color == color && piece.field != target)
            .any(|piece| piece.attacks(target, self, forward))
    }

    pub fn find_king_position(&self, color: Color) -> Option<ChessField> {
        self.pieces_of(color).find(|p| p.kind == PieceType::King).map(|p| p.field)
    }

    /// True if playing `mv` would leave the king of `mover` attacked by
    /// `opponent`. A side without a king is never exposed.
    pub fn leaves_king_exposed(&self, mv: Move, mover: &Player, opponent: &Player) -> bool {
        let mut board = self.clone();
        board.move_piece(mv.from, mv.to);
        match board.find_king_position(mover.team) {
            Some(king) => board.is_square_attacked_by_color(king, opponent.team, opponent.forward()),
            None => false,
        }
    }

    /// The full legality pipeline for a move proposed by `mover`.
    pub fn validate_move(&self, mv: Move, mover: &Player, opponent: &Player) -> ChessResult<()> {
        if mv.from == mv.to {
            return Err(ChessError::SameSquareMove(mv.from));
        }
        let piece = self.get(mv.from).ok_or(ChessError::EmptySourceMove(mv.from))?;
        if piece.color != mover.team {
            return Err(ChessError::OpponentPieceMove(mv.from));
        }
        piece.validate(mv, self, mover.forward())?;
        if self.leaves_king_exposed(mv, mover, opponent) {
            return Err(ChessError::LeavesKingInCheck);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> ChessBoard {
        ChessBoard::from_fen(fen).unwrap().0
    }

    fn mv(s: &str) -> Move {
        Move::from_algebraic(s).unwrap()
    }

    fn validate(board: &ChessBoard, s: &str) -> ChessResult<()> {
        let mv = mv(s);
        let piece = board.get(mv.from).unwrap();
        let forward = if piece.color == Color::White { 1 } else { -1 };
        piece.validate(mv, board, forward)
    }

    #[test]
    fn test_rook_occlusion() {
        let board = board("8/8/8/8/3p4/8/8/R2N3R w");
        assert_eq!(validate(&board, "a1a8"), Ok(()));
        assert_eq!(validate(&board, "a1c1"), Ok(()));
        assert!(matches!(
            validate(&board, "a1e1"),
            Err(ChessError::PathBlocked { kind: PieceType::Rook, .. })
        ));
        assert!(matches!(validate(&board, "a1b2"), Err(ChessError::UnreachableSquare { .. })));
        assert_eq!(validate(&board, "a1d1"), Err(ChessError::FriendlyFire(ChessField::from_algebraic("d1").unwrap())));
        assert_eq!(validate(&board, "h1h8"), Ok(()));
    }

    #[test]
    fn test_bishop_occlusion() {
        let board = board("8/6p1/8/8/3P4/8/1B6/8 w");
        assert_eq!(validate(&board, "b2c3"), Ok(()));
        assert_eq!(validate(&board, "b2a3"), Ok(()));
        assert_eq!(
            validate(&board, "b2e5"),
            Err(ChessError::PathBlocked {
                kind: PieceType::Bishop,
                at: ChessField::from_algebraic("d4").unwrap()
            })
        );
        assert!(matches!(validate(&board, "b2b4"), Err(ChessError::UnreachableSquare { .. })));
        assert!(matches!(validate(&board, "b2d3"), Err(ChessError::UnreachableSquare { .. })));
    }

    #[test]
    fn test_queen_combines_rook_and_bishop() {
        let board = board("8/8/8/8/8/2p5/1P6/Q6r w");
        assert_eq!(validate(&board, "a1h1"), Ok(()));
        assert_eq!(validate(&board, "a1a8"), Ok(()));
        assert!(matches!(validate(&board, "a1c3"), Err(ChessError::PathBlocked { .. })));
        assert!(matches!(validate(&board, "a1b3"), Err(ChessError::UnreachableSquare { .. })));
    }

    #[test]
    fn test_knight_ignores_occupancy_in_between() {
        let board = board("8/8/8/8/8/PPP5/PNP5/PPPP4 w");
        assert_eq!(validate(&board, "b2d3"), Ok(()));
        assert_eq!(validate(&board, "b2c4"), Ok(()));
        assert_eq!(validate(&board, "b2a4"), Ok(()));
        assert!(matches!(validate(&board, "b2d1"), Err(ChessError::FriendlyFire(_))));
        assert!(matches!(validate(&board, "b2a3"), Err(ChessError::UnreachableSquare { .. })));
        assert!(matches!(validate(&board, "b2b4"), Err(ChessError::UnreachableSquare { .. })));
    }

    #[test]
    fn test_king_single_steps() {
        let board = board("8/8/8/8/3n4/3K4/8/8 w");
        assert_eq!(validate(&board, "d3d4"), Ok(()));
        assert_eq!(validate(&board, "d3c2"), Ok(()));
        assert!(matches!(validate(&board, "d3d5"), Err(ChessError::UnreachableSquare { .. })));
    }

    #[test]
    fn test_pawn_rules() {
        let board = board("8/8/8/8/3p4/1p6/P1P1P3/8 w");
        assert_eq!(validate(&board, "a2a4"), Ok(()));
        assert_eq!(validate(&board, "a2a3"), Ok(()));
        assert_eq!(validate(&board, "a2b3"), Ok(()));
        assert_eq!(validate(&board, "c2c3"), Ok(()));
        assert_eq!(validate(&board, "c2d3"), Err(ChessError::PawnRuleViolation(PawnRule::EmptyDiagonal)));
        assert_eq!(validate(&board, "e2e4"), Ok(()));
        assert!(matches!(validate(&board, "e2e5"), Err(ChessError::UnreachableSquare { .. })));
        assert!(matches!(validate(&board, "e2f2"), Err(ChessError::UnreachableSquare { .. })));
        assert_eq!(validate(&board, "e2e1"), Err(ChessError::PawnRuleViolation(PawnRule::Retreat)));
        // black pawns advance toward rank 1
        assert_eq!(validate(&board, "d4d3"), Ok(()));
        assert_eq!(validate(&board, "b3c2"), Ok(()));
        assert_eq!(validate(&board, "b3b4"), Err(ChessError::PawnRuleViolation(PawnRule::Retreat)));
    }

    #[test]
    fn test_pawn_cannot_capture_forward() {
        let board = board("8/8/8/8/8/4p3/4P3/8 w");
        assert_eq!(validate(&board, "e2e3"), Err(ChessError::PawnRuleViolation(PawnRule::ForwardCapture)));
        assert!(matches!(validate(&board, "e2e4"), Err(ChessError::PathBlocked { .. })));

        let board = self::board("8/8/8/8/4p3/8/4P3/8 w");
        assert_eq!(validate(&board, "e2e4"), Err(ChessError::PawnRuleViolation(PawnRule::ForwardCapture)));
    }

    #[test]
    fn test_pawn_opening_only_once() {
        let mut board = board("8/8/8/8/8/8/4P3/8 w");
        assert_eq!(validate(&board, "e2e4"), Ok(()));
        board.move_piece(mv("e2e4").from, mv("e2e4").to);
        assert!(board.get(mv("e4e6").from).unwrap().active);
        assert_eq!(validate(&board, "e4e6"), Err(ChessError::PawnRuleViolation(PawnRule::RepeatedOpening)));
        assert_eq!(validate(&board, "e4e5"), Ok(()));

        // a single step also opens the pawn
        let mut board = self::board("8/8/8/8/8/8/4P3/8 w");
        board.move_piece(mv("e2e3").from, mv("e2e3").to);
        assert_eq!(validate(&board, "e3e5"), Err(ChessError::PawnRuleViolation(PawnRule::RepeatedOpening)));
    }

    #[test]
    fn test_attacks() {
        let board = board("8/8/8/3k4/8/2P5/8/R3K3 w");
        let target = ChessField::from_algebraic("d4").unwrap();
        assert!(board.is_square_attacked_by_color(target, Color::White, 1));
        assert!(!board.is_square_attacked_by_color(ChessField::from_algebraic("d5").unwrap(), Color::White, 1));
        assert!(board.is_square_attacked_by_color(ChessField::from_algebraic("a8").unwrap(), Color::White, 1));
        assert!(board.is_square_attacked_by_color(ChessField::from_algebraic("e4").unwrap(), Color::Black, -1));
        // a pawn never attacks straight ahead
        assert!(!board.is_square_attacked_by_color(ChessField::from_algebraic("c4").unwrap(), Color::White, 1));
    }

    #[test]
    fn test_validate_move_pipeline() {
        let board = board("4k3/8/8/8/8/8/4r3/R3K3 w");
        let white = Player::from_board(Color::White, &board);
        let black = Player::from_board(Color::Black, &board);

        assert_eq!(board.validate_move(mv("a1a1"), &white, &black), Err(ChessError::SameSquareMove(mv("a1a2").from)));
        assert_eq!(board.validate_move(mv("b1b2"), &white, &black), Err(ChessError::EmptySourceMove(mv("b1b2").from)));
        assert_eq!(board.validate_move(mv("e2e3"), &white, &black), Err(ChessError::OpponentPieceMove(mv("e2e3").from)));
        assert_eq!(board.validate_move(mv("e1e2"), &white, &black), Ok(()));
        assert_eq!(board.validate_move(mv("e1d2"), &white, &black), Err(ChessError::LeavesKingInCheck));
        assert_eq!(board.validate_move(mv("a1a2"), &white, &black), Err(ChessError::LeavesKingInCheck));
        assert_eq!(board.validate_move(mv("e1d1"), &white, &black), Ok(()));
        assert_eq!(board.validate_move(mv("e1f1"), &white, &black), Ok(()));
    }
}
