use std::io::BufRead;

use anyhow::Result;
use clap::Parser;
use sodium::{SodiumCtx, StreamSink};
use tracing::info;

use tictactoe::{
    setup::{self, LogArgs},
    Error, GameState, Input, Mark, TicTacToe,
};

/// Two-player tic-tac-toe on the console.
///
/// Enter "<row> <col>" (0-based) to mark a square, "reset" to start over and
/// "quit" to leave.
#[derive(Parser, Debug)]
#[command(name = "tictactoe", version)]
struct Cli {
    #[command(flatten)]
    log: LogArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup::init_tracing(&cli.log)?;

    let ctx = SodiumCtx::new();

    let (kb_input, game, _listeners) = ctx.transaction(|| {
        let mut listeners = Vec::new();
        let kb_input: StreamSink<String> = ctx.new_stream_sink();

        let (input, parse_err_stream) = kb_input
            .stream()
            .map(|line: &String| line.parse::<Input>())
            .split_res();

        let game = TicTacToe::new(&ctx, &input);

        listeners.push(parse_err_stream.listen(|err: &Error| println!("{}", err)));

        listeners.push(game.moves.listen(|(row, col, mark): &(usize, usize, Mark)| {
            println!("\n{}s took square ({}, {}):", mark, row, col)
        }));

        listeners.push(
            game.winner
                .listen(|mark: &Mark| println!("{} has won the game!\n", mark)),
        );

        listeners.push(
            game.resets
                .listen(|_: &()| println!("\nBoard reset, X plays first.\n")),
        );

        listeners.push(
            game.state
                .updates()
                .listen(|state: &GameState| println!("{}", state.view())),
        );

        (kb_input, game, listeners)
    });

    println!("Welcome to Tic Tac Toe!\n");
    println!("Mark a square with \"<row> <col>\", start over with \"reset\", leave with \"quit\".\n");
    println!("{}", game.state.sample().view());

    let stdin = std::io::stdin().lock();
    for line in stdin.lines() {
        let line = line?;
        if matches!(line.trim(), "q" | "quit" | "exit") {
            break;
        }
        kb_input.send(line);
    }

    info!("goodbye");
    Ok(())
}
