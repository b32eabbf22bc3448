use crate::chess_boards::chess_board::{ChessBoard, ChessError, ChessResult, Color, Move, Outcome, Player, State};
use crate::engines::engine_alpha_beta::AlphaBetaEngine;
use crate::engines::SearchConfig;
use tracing::info;

/// A running game between a human and the computer. Owns the only live
/// board; the search works on snapshots of it.
pub struct Game {
    board: ChessBoard,
    human: Player,
    computer: Player,
    to_move: Color,
    engine: AlphaBetaEngine,
}

impl Game {
    /// Standard starting position, the human plays white.
    pub fn new(config: SearchConfig) -> Self {
        Self::with_board(ChessBoard::standard(), Color::White, config)
    }

    pub fn from_fen(fen: &str, config: SearchConfig) -> ChessResult<Self> {
        let (board, to_move) = ChessBoard::from_fen(fen)?;
        Ok(Self::with_board(board, to_move, config))
    }

    fn with_board(board: ChessBoard, to_move: Color, config: SearchConfig) -> Self {
        Game {
            human: Player::from_board(Color::White, &board),
            computer: Player::from_board(Color::Black, &board),
            board,
            to_move,
            engine: AlphaBetaEngine::new(config),
        }
    }

    pub fn board(&self) -> &ChessBoard {
        &self.board
    }

    pub fn human(&self) -> &Player {
        &self.human
    }

    pub fn computer(&self) -> &Player {
        &self.computer
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn is_human_turn(&self) -> bool {
        self.to_move == self.human.team
    }

    fn sides(&self, team: Color) -> (&Player, &Player) {
        if team == self.human.team {
            (&self.human, &self.computer)
        } else {
            (&self.computer, &self.human)
        }
    }

    /// Root state for the side to move: a copy of the live board and both
    /// rosters, with the configured horizon.
    pub fn snapshot(&self) -> State {
        let (player, opponent) = self.sides(self.to_move);
        State::new(self.board.clone(), player.clone(), opponent.clone(), self.engine.config().depth)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.snapshot().actions()
    }

    /// Checks `mv` for `team` without playing it.
    pub fn validate(&self, mv: Move, team: Color) -> ChessResult<()> {
        let (mover, opponent) = self.sides(team);
        self.board.validate_move(mv, mover, opponent)
    }

    /// Plays `mv` for `team` on the live board after full validation.
    /// Captured pieces go to `team`, and the other side moves next.
    pub fn claim(&mut self, mv: Move, team: Color) -> ChessResult<()> {
        if team != self.to_move {
            return Err(ChessError::OutOfTurn(team));
        }
        self.validate(mv, team)?;

        let captured = self.board.move_piece(mv.from, mv.to);
        let (mover, other) = if team == self.human.team {
            (&mut self.human, &mut self.computer)
        } else {
            (&mut self.computer, &mut self.human)
        };
        if let Some(captured) = captured {
            info!(%team, %mv, captured = %captured, "piece captured");
            mover.claim(captured);
        }
        mover.rebuild(&self.board);
        other.rebuild(&self.board);
        self.to_move = team.opposite();

        info!(%team, %mv, "move played");
        Ok(())
    }

    /// Searches a snapshot for the computer and plays the chosen move.
    /// A searched move that fails validation is an internal fault and panics.
    pub fn computer_move(&mut self) -> ChessResult<(Move, i32, u64)> {
        let root = self.snapshot();
        let (mv, score, nodes) = self.engine.ab_search(&root)?;
        if let Err(e) = root.validate(mv) {
            panic!("search chose {} which the rules reject: {}", mv, e);
        }
        let team = self.computer.team;
        self.claim(mv, team)?;
        Ok((mv, score, nodes))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.snapshot().outcome()
    }
}
