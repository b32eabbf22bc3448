use super::{ChessField, Color, PieceType};
use std::fmt;

/// The pawn-specific ways a move can be refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PawnRule {
    Retreat,
    ForwardCapture,
    RepeatedOpening,
    EmptyDiagonal,
}

impl fmt::Display for PawnRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PawnRule::Retreat => write!(f, "pawns cannot retreat"),
            PawnRule::ForwardCapture => write!(f, "pawns cannot attack forward"),
            PawnRule::RepeatedOpening => write!(f, "pawns cannot repeat the opening double step"),
            PawnRule::EmptyDiagonal => write!(f, "pawns cannot attack an empty square"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("cannot move to the same square {0}")]
    SameSquareMove(ChessField),

    #[error("cannot move from the empty square {0}")]
    EmptySourceMove(ChessField),

    #[error("cannot move the opposing piece on {0}")]
    OpponentPieceMove(ChessField),

    #[error("cannot attack your own piece on {0}")]
    FriendlyFire(ChessField),

    #[error("path of the {kind:?} is blocked on {at}")]
    PathBlocked { kind: PieceType, at: ChessField },

    #[error("{0}")]
    PawnRuleViolation(PawnRule),

    #[error("a {kind:?} cannot move from {from} to {to}")]
    UnreachableSquare {
        kind: PieceType,
        from: ChessField,
        to: ChessField,
    },

    #[error("the move would leave the king in check")]
    LeavesKingInCheck,

    #[error("it is not {0}'s turn")]
    OutOfTurn(Color),

    #[error("invalid placement string: {0}")]
    InvalidPlacement(String),

    #[error("no legal moves available")]
    NoLegalMoves,
}

pub type ChessResult<T> = Result<T, ChessError>;
