use super::{fen, ChessField, ChessResult, Color, Piece, PieceType};

/// The 8x8 occupancy grid. Every stored piece records the square it sits on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessBoard {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessBoard {
    /// Creates an empty chess board
    pub fn new() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard 16-vs-16 starting layout.
    pub fn standard() -> Self {
        const BACK_RANK: [PieceType; 8] = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        let mut board = Self::new();
        for field in ChessField::all() {
            let placement = match field.row() {
                0 => Some((Color::White, BACK_RANK[field.col()])),
                1 => Some((Color::White, PieceType::Pawn)),
                6 => Some((Color::Black, PieceType::Pawn)),
                7 => Some((Color::Black, BACK_RANK[field.col()])),
                _ => None,
            };
            if let Some((color, kind)) = placement {
                board.set(field, Piece::new(color, kind, field));
            }
        }
        board
    }

    /// Delegates placement parsing to the `fen` module.
    pub fn from_fen(fen: &str) -> ChessResult<(Self, Color)> {
        fen::from_fen(fen)
    }

    pub fn to_fen(&self, active_color: Color) -> String {
        fen::to_fen(self, active_color)
    }
}

impl ChessBoard {
    pub fn get(&self, field: ChessField) -> Option<&Piece> {
        self.squares[field.row()][field.col()].as_ref()
    }

    /// Places `piece` on `field`, updating the coordinate the piece records.
    pub fn set(&mut self, field: ChessField, mut piece: Piece) {
        piece.field = field;
        self.squares[field.row()][field.col()] = Some(piece);
    }

    /// Empties `field`, returning its previous occupant.
    pub fn clear(&mut self, field: ChessField) -> Option<Piece> {
        self.squares[field.row()][field.col()].take()
    }

    /// Relocates whatever stands on `src` to `dest` and returns what stood on
    /// `dest`. Legality has to be checked by the caller.
    pub fn move_piece(&mut self, src: ChessField, dest: ChessField) -> Option<Piece> {
        let moving = self.clear(src);
        let captured = self.clear(dest);
        if let Some(mut piece) = moving {
            piece.active = true;
            self.set(dest, piece);
        }
        captured
    }

    pub fn occupied(&self, field: ChessField) -> bool {
        self.get(field).is_some()
    }

    /// Occupied squares within `proximity` king steps of `center`, the center
    /// included.
    pub fn neighborhood(&self, center: ChessField, proximity: u8) -> impl Iterator<Item = ChessField> + '_ {
        ChessField::all().filter(move |&field| field.distance(center) <= proximity && self.occupied(field))
    }

    /// Every piece on the board, rank by rank starting at a1.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.iter().flatten().flatten()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |p| p.color == color)
    }

    pub fn occupied_count(&self) -> usize {
        self.pieces().count()
    }

    pub fn render_to_string(&self) -> String {
        let mut board_representation = String::new();
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");
        board_representation.push_str("  ┌───┬───┬───┬───┬───┬───┬───┬───┐\n");

        for row in (0..8).rev() {
            // Render rows from top (8) to bottom (1)
            board_representation.push_str(&format!("{} │", row + 1));
            for col in 0..8 {
                let square = match &self.squares[row][col] {
                    None => ' ',
                    Some(piece) => piece.to_char(),
                };
                board_representation.push_str(&format!(" {} │", square));
            }
            board_representation.push_str(&format!(" {}\n", row + 1));

            if row > 0 {
                board_representation.push_str("  ├───┼───┼───┼───┼───┼───┼───┼───┤\n");
            }
        }

        board_representation.push_str("  └───┴───┴───┴───┴───┴───┴───┴───┘\n");
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");

        board_representation
    }
}
