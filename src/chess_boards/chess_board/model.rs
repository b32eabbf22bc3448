use super::{ChessError, ChessResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

const ORTHOGONAL: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ALL_DIRECTIONS: [(i8, i8); 8] = [(-1, -1), (-1, 1), (1, -1), (1, 1), (0, -1), (0, 1), (-1, 0), (1, 0)];
const KNIGHT_JUMPS: [(i8, i8); 8] = [(-2, -1), (-1, -2), (1, -2), (2, -1), (2, 1), (1, 2), (-1, 2), (-2, 1)];
/// Pawn offsets for a side moving toward higher ranks; flipped by `forward`.
const PAWN_STEPS: [(i8, i8); 3] = [(1, 0), (1, -1), (1, 1)];

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Material weight used by the evaluation.
    pub fn weight(&self) -> i32 {
        match self {
            PieceType::Pawn => 1_000,
            PieceType::Knight => 3_000,
            PieceType::Bishop => 3_000,
            PieceType::Rook => 5_000,
            PieceType::Queen => 9_000,
            PieceType::King => 0,
        }
    }

    /// Relative (row, col) direction vectors. `forward` is +1 for a side that
    /// advances toward rank 8 and -1 otherwise; only pawns depend on it.
    pub fn directions(&self, forward: i8) -> Vec<(i8, i8)> {
        match self {
            PieceType::Pawn => PAWN_STEPS.iter().map(|&(dr, dc)| (dr * forward, dc)).collect(),
            PieceType::Knight => KNIGHT_JUMPS.to_vec(),
            PieceType::Bishop => DIAGONAL.to_vec(),
            PieceType::Rook => ORTHOGONAL.to_vec(),
            PieceType::Queen | PieceType::King => ALL_DIRECTIONS.to_vec(),
        }
    }

    /// How many times a direction vector may be scaled.
    pub fn range(&self) -> i8 {
        match self {
            PieceType::Pawn => 2,
            PieceType::Knight | PieceType::King => 1,
            PieceType::Bishop | PieceType::Rook | PieceType::Queen => 7,
        }
    }

    pub fn is_sliding(&self) -> bool {
        matches!(self, PieceType::Bishop | PieceType::Rook | PieceType::Queen)
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceType::Pawn => write!(f, "P"),
            PieceType::Knight => write!(f, "N"),
            PieceType::Bishop => write!(f, "B"),
            PieceType::Rook => write!(f, "R"),
            PieceType::Queen => write!(f, "Q"),
            PieceType::King => write!(f, "K"),
        }
    }
}

/// A square on the board. Always within bounds; row 0 is rank 1, col 0 is file a.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct ChessField {
    row: u8,
    col: u8,
}

impl ChessField {
    pub fn new(row: u8, col: u8) -> ChessResult<Self> {
        Self::try_new(row as isize, col as isize)
    }

    pub fn try_new(row: isize, col: isize) -> ChessResult<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Ok(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(ChessError::InvalidCoordinate(format!("({}, {})", row, col)))
        }
    }

    pub fn from_algebraic(algebraic: &str) -> ChessResult<Self> {
        let mut chars = algebraic.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => {
                let file = file.to_ascii_lowercase();
                if ('a'..='h').contains(&file) && ('1'..='8').contains(&rank) {
                    Ok(Self {
                        row: rank as u8 - b'1',
                        col: file as u8 - b'a',
                    })
                } else {
                    Err(ChessError::InvalidCoordinate(algebraic.to_string()))
                }
            }
            _ => Err(ChessError::InvalidCoordinate(algebraic.to_string())),
        }
    }

    pub fn row(&self) -> usize {
        self.row as usize
    }

    pub fn col(&self) -> usize {
        self.col as usize
    }

    /// Rank in `1..=8`.
    pub fn rank(&self) -> u8 {
        self.row + 1
    }

    /// File in `'a'..='h'`.
    pub fn file(&self) -> char {
        (b'a' + self.col) as char
    }

    pub fn offset(&self, dr: i8, dc: i8) -> Option<ChessField> {
        ChessField::try_new(self.row as isize + dr as isize, self.col as isize + dc as isize).ok()
    }

    /// Chebyshev distance: the number of king steps between two squares.
    pub fn distance(&self, other: ChessField) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }

    /// All 64 squares, rank by rank starting at a1.
    pub fn all() -> impl Iterator<Item = ChessField> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| ChessField { row, col }))
    }

    pub fn as_algebraic(&self) -> String {
        format!("{}{}", self.file(), self.rank())
    }
}

impl fmt::Display for ChessField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
    pub field: ChessField,
    /// Set once the piece has moved; disables the pawn double step.
    pub active: bool,
}

impl Piece {
    pub fn new(color: Color, kind: PieceType, field: ChessField) -> Self {
        Self {
            color,
            kind,
            field,
            active: false,
        }
    }

    pub fn weight(&self) -> i32 {
        self.kind.weight()
    }

    pub fn to_char(&self) -> char {
        let c = match self.kind {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        };
        if self.color == Color::White {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} on {}", self.color, self.kind, self.field)
    }
}

/// An action: the piece on `from` goes to `to`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct Move {
    pub from: ChessField,
    pub to: ChessField,
}

impl Move {
    pub fn new(from: ChessField, to: ChessField) -> Self {
        Self { from, to }
    }

    /// Row and column displacement.
    pub fn delta(&self) -> (i8, i8) {
        (
            self.to.row() as i8 - self.from.row() as i8,
            self.to.col() as i8 - self.from.col() as i8,
        )
    }

    pub fn as_algebraic(&self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Parses `e2e4`, `e2 e4` or `e2-e4`.
    pub fn from_algebraic(algebraic: &str) -> ChessResult<Self> {
        let squares: String = algebraic.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        if squares.len() != 4 {
            return Err(ChessError::InvalidCoordinate(algebraic.to_string()));
        }
        let from = ChessField::from_algebraic(&squares[0..2])?;
        let to = ChessField::from_algebraic(&squares[2..4])?;
        Ok(Self { from, to })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
