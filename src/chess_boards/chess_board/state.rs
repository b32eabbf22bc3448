use super::{ChessBoard, ChessResult, Color, PieceType, Player};
use std::fmt;

/// Search horizon used when none is configured.
pub const DEFAULT_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            Outcome::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// A snapshot of one ply: its own board, the side to move, the side waiting,
/// and the search horizon. A state is never changed once built; transitions
/// produce new states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub(super) board: ChessBoard,
    pub(super) player: Player,
    pub(super) opponent: Player,
    pub(super) depth: usize,
}

impl State {
    /// A root state. The rosters are re-read from `board`, so they always match it.
    pub fn new(board: ChessBoard, mut player: Player, mut opponent: Player, depth: usize) -> Self {
        player.rebuild(&board);
        opponent.rebuild(&board);
        Self {
            board,
            player,
            opponent,
            depth,
        }
    }

    pub fn from_board(board: ChessBoard, to_move: Color, depth: usize) -> Self {
        Self::new(board, Player::new(to_move), Player::new(to_move.opposite()), depth)
    }

    pub fn from_fen(fen: &str, depth: usize) -> ChessResult<Self> {
        let (board, to_move) = ChessBoard::from_fen(fen)?;
        Ok(Self::from_board(board, to_move, depth))
    }

    pub fn board(&self) -> &ChessBoard {
        &self.board
    }

    /// The side to move.
    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn opponent(&self) -> &Player {
        &self.opponent
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Material balance seen from the side to move.
    pub fn evaluate(&self) -> i32 {
        PieceType::ALL
            .iter()
            .map(|kind| kind.weight() * (self.player.count(*kind) as i32 - self.opponent.count(*kind) as i32))
            .sum()
    }

    fn king_attacked(&self, defender: &Player, attacker: &Player) -> bool {
        defender
            .king()
            .map(|king| self.board.is_square_attacked_by_color(king.field, attacker.team, attacker.forward()))
            .unwrap_or(false)
    }

    /// True if the side to move has its king attacked.
    pub fn player_in_check(&self) -> bool {
        self.king_attacked(&self.player, &self.opponent)
    }

    /// True if either king is attacked.
    pub fn in_check(&self) -> bool {
        self.player_in_check() || self.king_attacked(&self.opponent, &self.player)
    }

    pub fn in_stalemate(&self) -> bool {
        !self.player_in_check() && self.actions().is_empty()
    }

    pub fn is_checkmate(&self) -> bool {
        self.player_in_check() && self.actions().is_empty()
    }

    /// True once the search has descended `ply` half-moves to the horizon.
    pub fn at_cutoff(&self, ply: usize) -> bool {
        ply >= self.depth
    }

    /// True when the side to move has no legal action: checkmate or stalemate.
    pub fn at_terminal(&self) -> bool {
        self.actions().is_empty()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if !self.actions().is_empty() {
            return None;
        }
        if self.player_in_check() {
            Some(Outcome::Checkmate {
                winner: self.opponent.team,
            })
        } else {
            Some(Outcome::Stalemate)
        }
    }
}
