use chic_duel::chess_boards::chess_board::fen::INITIAL_POSITION;
use chic_duel::chess_boards::chess_board::{Move, State};
use chic_duel::chess_boards::perft::divide;
use chic_duel::console::run_console;
use chic_duel::engines::engine_alpha_beta::AlphaBetaEngine;
use chic_duel::engines::engine_minmax::MinimaxEngine;
use chic_duel::engines::{SearchConfig, SearchEngine};
use chic_duel::game::Game;
use std::io::{stdin, stdout};
use std::time::Instant;

use anyhow::Context;
use clap::arg;
use clap::command;
use clap::ArgMatches;
use clap::Command;

use tabled::settings::Style;
use tabled::Table;
use tabled::Tabled;
use tracing_subscriber::EnvFilter;

const BENCHMARK_POSITION: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w - - 4 4";

fn fen_arg() -> clap::Arg {
    arg!(
    -f --fen <FEN> "Board position"
            )
    .default_value(INITIAL_POSITION)
}

fn depth_arg(default: &'static str) -> clap::Arg {
    arg!(
    -x --depth <d> "depth"
            )
    .default_value(default)
    .value_parser(clap::value_parser!(usize))
}

fn main() -> anyhow::Result<()> {
    let matches = command!()
        .version("v0.1.0")
        .propagate_version(true)
        .arg(arg!(
            -d --debug "Turn debugging information on"
        ))
        .subcommand(
            Command::new("play")
                .about("Play a game against the computer")
                .arg(fen_arg())
                .arg(depth_arg("3"))
                .arg(arg!(-r --random "Shuffle the computer's candidate moves"))
                .arg(arg!(-s --seed <seed> "Seed for the shuffle").value_parser(clap::value_parser!(u64))),
        )
        .subcommand(
            Command::new("benchmark")
                .about("Compares alpha-beta with plain minimax")
                .arg(fen_arg().default_value(BENCHMARK_POSITION))
                .arg(depth_arg("3")),
        )
        .subcommand(
            Command::new("perft")
                .about("Run Perft test")
                .arg(fen_arg())
                .arg(depth_arg("3"))
                .arg(
                    arg!(
                    -m --moves <moves> "List of moves"
                            )
                    .num_args(1..)
                    .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("best")
                .about("Prints the move the computer would play")
                .arg(fen_arg())
                .arg(depth_arg("3")),
        )
        .get_matches();

    init_tracing(matches.get_flag("debug"));

    match matches.subcommand() {
        Some(("play", arg_matches)) => play(arg_matches),
        Some(("benchmark", arg_matches)) => benchmark(fen(arg_matches), depth(arg_matches)),
        Some(("perft", arg_matches)) => {
            let moves = arg_matches
                .get_many::<String>("moves")
                .unwrap_or_default()
                .filter(|&v| !v.is_empty())
                .collect::<Vec<_>>();
            perft(fen(arg_matches), moves, depth(arg_matches))
        }
        Some(("best", arg_matches)) => best(fen(arg_matches), depth(arg_matches)),
        None => {
            let mut game = Game::new(SearchConfig::default());
            run_console(&mut game, stdin().lock(), &mut stdout())?;
            Ok(())
        }
        _ => unreachable!("Exhausted list of subcommands"),
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fen(arg_matches: &ArgMatches) -> &str {
    arg_matches.get_one::<String>("fen").map(String::as_str).unwrap_or(INITIAL_POSITION)
}

fn depth(arg_matches: &ArgMatches) -> usize {
    arg_matches.get_one::<usize>("depth").copied().unwrap_or(3)
}

fn play(arg_matches: &ArgMatches) -> anyhow::Result<()> {
    let config = SearchConfig {
        depth: depth(arg_matches),
        random: arg_matches.get_flag("random"),
        seed: arg_matches.get_one::<u64>("seed").copied(),
    };
    let mut game = Game::from_fen(fen(arg_matches), config).context("Invalid FEN string")?;
    run_console(&mut game, stdin().lock(), &mut stdout())?;
    Ok(())
}

#[derive(Tabled)]
struct BenchmarkRow {
    ply: usize,
    score: i32,
    alpha_beta_nodes: u64,
    minimax_nodes: u64,
    alpha_beta_time: f32,
    minimax_time: f32,
    best_move: String,
}

fn benchmark(fen: &str, max_depth: usize) -> anyhow::Result<()> {
    let mut table_rows = Vec::new();
    let mut alpha_beta = AlphaBetaEngine::new(SearchConfig::default());
    let mut minimax = MinimaxEngine::new();
    println!("{} vs {} on {}", alpha_beta.name(), minimax.name(), fen);
    for d in 1..=max_depth {
        let root = State::from_fen(fen, d).context("Invalid FEN string")?;

        let start_time = Instant::now();
        let (m, score, _) = alpha_beta.search(&root)?;
        let alpha_beta_time = start_time.elapsed();

        let start_time = Instant::now();
        let (_, minimax_score, _) = minimax.search(&root)?;
        let minimax_time = start_time.elapsed();
        anyhow::ensure!(
            score == minimax_score,
            "{} and {} disagree at depth {}",
            alpha_beta.name(),
            minimax.name(),
            d
        );

        table_rows.push(BenchmarkRow {
            ply: d,
            score,
            alpha_beta_nodes: alpha_beta.node_count(),
            minimax_nodes: minimax.node_count(),
            alpha_beta_time: alpha_beta_time.as_secs_f32(),
            minimax_time: minimax_time.as_secs_f32(),
            best_move: m.as_algebraic(),
        });
        if minimax_time.as_secs() > 10 {
            break;
        }
    }
    println!("{}", Table::new(table_rows).with(Style::modern()));
    Ok(())
}

fn perft(fen: &str, moves: Vec<&String>, depth: usize) -> anyhow::Result<()> {
    println!("Perft test for {} moves {:?} with depth {}", fen, moves, depth);
    let mut state = State::from_fen(fen, depth).context("Invalid FEN string")?;
    for m in moves {
        let mv = Move::from_algebraic(m)?;
        state = state.apply(mv).with_context(|| format!("Invalid move: {}", m))?;
    }

    let mut num_nodes = 0;
    for (m, c) in divide(&state, u8::try_from(depth)?) {
        println!("{}: {}", m, c);
        num_nodes += c;
    }
    println!("\nNodes searched: {}", num_nodes);
    Ok(())
}

fn best(fen: &str, depth: usize) -> anyhow::Result<()> {
    let root = State::from_fen(fen, depth).context("Invalid FEN string")?;
    let (mv, score, nodes) = AlphaBetaEngine::new(SearchConfig::with_depth(depth)).ab_search(&root)?;
    println!("bestmove {} score {} nodes {}", mv, score, nodes);
    Ok(())
}
