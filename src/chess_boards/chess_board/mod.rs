pub mod error;
pub use error::{ChessError, ChessResult, PawnRule};
pub mod fen;
pub mod model;
pub use model::{ChessField, Color, Move, Piece, PieceType};

mod chess_board;
mod move_generation;
mod piece_rules;
mod player;
mod state;
#[cfg(test)]
pub mod test_utils;
pub use chess_board::ChessBoard;
pub use player::Player;
pub use state::{Outcome, State, DEFAULT_DEPTH};
