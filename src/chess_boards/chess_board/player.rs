use super::{ChessBoard, Color, Piece, PieceType};
use std::collections::BTreeMap;
use std::fmt;

/// One side of the game: its roster bucketed by piece type, the opposing
/// pieces it has taken, and which way its pawns advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub team: Color,
    /// True for the side that starts on ranks 1 and 2 and advances toward rank 8.
    pub near: bool,
    pieces: BTreeMap<PieceType, Vec<Piece>>,
    pieces_won: Vec<Piece>,
}

impl Player {
    pub fn new(team: Color) -> Self {
        Self {
            team,
            near: team == Color::White,
            pieces: BTreeMap::new(),
            pieces_won: Vec::new(),
        }
    }

    /// A player whose roster is read off `board`.
    pub fn from_board(team: Color, board: &ChessBoard) -> Self {
        let mut player = Self::new(team);
        player.rebuild(board);
        player
    }

    /// Row step of this side's pawns.
    pub fn forward(&self) -> i8 {
        if self.near {
            1
        } else {
            -1
        }
    }

    /// Replaces the roster with a full rescan of the board.
    pub fn rebuild(&mut self, board: &ChessBoard) {
        self.pieces.clear();
        for piece in board.pieces_of(self.team) {
            self.pieces.entry(piece.kind).or_default().push(*piece);
        }
    }

    pub fn pieces(&self, kind: PieceType) -> &[Piece] {
        self.pieces.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every piece this side still has on the board.
    pub fn piece_set(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values().flatten()
    }

    pub fn count(&self, kind: PieceType) -> usize {
        self.pieces(kind).len()
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.values().map(Vec::len).sum()
    }

    pub fn king(&self) -> Option<&Piece> {
        self.pieces(PieceType::King).first()
    }

    pub fn material(&self) -> i32 {
        self.piece_set().map(Piece::weight).sum()
    }

    pub fn pieces_won(&self) -> &[Piece] {
        &self.pieces_won
    }

    /// Records an opposing piece taken by this side.
    pub fn claim(&mut self, captured: Piece) {
        self.pieces_won.push(captured);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} pieces, material {}, {} won",
            self.team,
            self.piece_count(),
            self.material(),
            self.pieces_won.len()
        )
    }
}
