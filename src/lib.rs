pub mod chess_boards;
pub mod console;
pub mod engines;
pub mod game;
