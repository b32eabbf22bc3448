use super::ChessBoard;
use super::{ChessError, ChessField, ChessResult, Color, Piece, PieceType};

pub const INITIAL_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

/// Parses the placement and side-to-move fields of a FEN string. Castling,
/// en passant and the clocks are accepted but ignored. The side defaults to
/// white when omitted.
pub fn from_fen(fen: &str) -> ChessResult<(ChessBoard, Color)> {
    let mut board = ChessBoard::new();
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.is_empty() {
        return Err(ChessError::InvalidPlacement(String::from("empty string")));
    }

    let rows: Vec<&str> = parts[0].split('/').collect();
    if rows.len() != 8 {
        return Err(ChessError::InvalidPlacement(String::from("expected 8 rows")));
    }

    for (row_index, row) in rows.iter().enumerate() {
        let rank = 7 - row_index;
        let mut col_index = 0;

        for c in row.chars() {
            if col_index > 7 {
                return Err(ChessError::InvalidPlacement(format!("too many squares in row {}", row_index)));
            }
            if let Some(skip) = c.to_digit(10) {
                col_index += skip as usize;
                continue;
            }
            let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
            let kind = match c.to_ascii_lowercase() {
                'p' => PieceType::Pawn,
                'r' => PieceType::Rook,
                'n' => PieceType::Knight,
                'b' => PieceType::Bishop,
                'q' => PieceType::Queen,
                'k' => PieceType::King,
                _ => return Err(ChessError::InvalidPlacement(format!("invalid piece character {}", c))),
            };
            let field = ChessField::new(rank as u8, col_index as u8)?;
            let mut piece = Piece::new(color, kind, field);
            // A pawn away from its starting rank has already opened.
            if kind == PieceType::Pawn {
                let start_rank = if color == Color::White { 1 } else { 6 };
                piece.active = rank != start_rank;
            }
            board.set(field, piece);
            col_index += 1;
        }
        if col_index != 8 {
            return Err(ChessError::InvalidPlacement(format!("row {} does not cover 8 squares", row_index)));
        }
    }

    let active_color = match parts.get(1) {
        None | Some(&"w") => Color::White,
        Some(&"b") => Color::Black,
        Some(other) => return Err(ChessError::InvalidPlacement(format!("invalid active color {}", other))),
    };

    Ok((board, active_color))
}

pub fn to_fen(board: &ChessBoard, active_color: Color) -> String {
    let mut placement = String::new();

    let fields: Vec<ChessField> = ChessField::all().collect();
    for (index, rank) in fields.chunks(8).rev().enumerate() {
        let mut empty_count = 0;
        for &field in rank {
            match board.get(field) {
                Some(piece) => {
                    if empty_count > 0 {
                        placement.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    placement.push(piece.to_char());
                }
                None => empty_count += 1,
            }
        }
        if empty_count > 0 {
            placement.push_str(&empty_count.to_string());
        }
        if index < 7 {
            placement.push('/');
        }
    }

    let side = match active_color {
        Color::White => "w",
        Color::Black => "b",
    };
    format!("{} {}", placement, side)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_position() {
        let (board, color) = from_fen(INITIAL_POSITION).unwrap();
        assert_eq!(color, Color::White);
        assert_eq!(board.occupied_count(), 32);
        assert!(board.pieces().filter(|p| p.kind == PieceType::Pawn).all(|p| !p.active));
        assert_eq!(to_fen(&board, color), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w");
    }

    #[test]
    fn test_advanced_pawns_are_active() {
        let (board, color) = from_fen("4k3/8/8/3p4/4P3/8/1P6/4K3 b").unwrap();
        assert_eq!(color, Color::Black);
        let pawn = |s: &str| *board.get(ChessField::from_algebraic(s).unwrap()).unwrap();
        assert!(pawn("e4").active);
        assert!(pawn("d5").active);
        assert!(!pawn("b2").active);
    }

    #[test]
    fn test_rejects_malformed_placements() {
        assert!(matches!(from_fen(""), Err(ChessError::InvalidPlacement(_))));
        assert!(matches!(from_fen("8/8/8/8/8/8/8 w"), Err(ChessError::InvalidPlacement(_))));
        assert!(matches!(from_fen("8/8/8/8/8/8/8/7x w"), Err(ChessError::InvalidPlacement(_))));
        assert!(matches!(from_fen("8/8/8/8/8/8/8/9 w"), Err(ChessError::InvalidPlacement(_))));
        assert!(matches!(from_fen("8/8/8/8/8/8/8/7 w"), Err(ChessError::InvalidPlacement(_))));
        assert!(matches!(from_fen("8/8/8/8/8/8/8/8 x"), Err(ChessError::InvalidPlacement(_))));
    }
}
