use crate::chess_boards::chess_board::Move;
use crate::game::Game;
use std::io::{self, BufRead, Write};
use tracing::info;

/// Line-oriented game loop. The human enters moves as `e2e4`, `e2 e4` or
/// `move e2e4`; illegal input is reported and prompted again. `moves` lists
/// the legal moves, `d` draws the board, `fen` prints the position and
/// `quit` leaves. Returns when the game is over or the input ends.
pub fn run_console<R: BufRead, W: Write>(game: &mut Game, input: R, output: &mut W) -> io::Result<()> {
    if !game.is_human_turn() && !computer_turn(game, output)? {
        return Ok(());
    }
    if game_over(game, output)? {
        return Ok(());
    }
    writeln!(output, "{}", game.board().render_to_string())?;
    prompt(output)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            prompt(output)?;
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens[0] {
            "quit" | "exit" => return Ok(()),
            "d" => {
                writeln!(output, "{}", game.board().render_to_string())?;
                writeln!(output, "{}\n{}", game.human(), game.computer())?;
            }
            "fen" => {
                writeln!(output, "{}", game.board().to_fen(game.to_move()))?;
            }
            "moves" => {
                let moves = game.legal_moves().iter().map(Move::as_algebraic).collect::<Vec<_>>();
                writeln!(output, "{}", moves.join(" "))?;
            }
            _ => {
                let text = if tokens[0] == "move" { tokens[1..].join(" ") } else { line.to_string() };
                let human = game.human().team;
                match Move::from_algebraic(&text).and_then(|mv| game.claim(mv, human)) {
                    Err(e) => {
                        writeln!(output, "Illegal move: {}", e)?;
                    }
                    Ok(()) => {
                        if !computer_turn(game, output)? {
                            return Ok(());
                        }
                        writeln!(output, "{}", game.board().render_to_string())?;
                    }
                }
            }
        }
        prompt(output)?;
    }
    Ok(())
}

/// Lets the computer answer. Returns false once the game is over.
fn computer_turn<W: Write>(game: &mut Game, output: &mut W) -> io::Result<bool> {
    if game_over(game, output)? {
        return Ok(false);
    }
    match game.computer_move() {
        Ok((mv, score, nodes)) => {
            writeln!(output, "Computer plays {} (score {}, {} nodes)", mv, score, nodes)?;
        }
        Err(e) => {
            writeln!(output, "Computer cannot move: {}", e)?;
            return Ok(false);
        }
    }
    Ok(!game_over(game, output)?)
}

/// Reports the outcome if the side to move has no legal action.
fn game_over<W: Write>(game: &Game, output: &mut W) -> io::Result<bool> {
    let Some(outcome) = game.outcome() else {
        return Ok(false);
    };
    info!(%outcome, "game over");
    writeln!(output, "{}", game.board().render_to_string())?;
    writeln!(output, "Game over: {}", outcome)?;
    Ok(true)
}

fn prompt<W: Write>(output: &mut W) -> io::Result<()> {
    write!(output, "> ")?;
    output.flush()
}
