//! The FRP network that drives a game from input events.

use std::sync::{Arc, Mutex};

use sodium::{SodiumCtx, StreamSink};
use tictactoe::{Error, GameState, Input, Mark, TicTacToe};

fn setup() -> (SodiumCtx, StreamSink<Input>, TicTacToe) {
    let ctx = SodiumCtx::new();
    let (input, game) = ctx.transaction(|| {
        let input: StreamSink<Input> = ctx.new_stream_sink();
        let game = TicTacToe::new(&ctx, &input.stream());
        (input, game)
    });
    (ctx, input, game)
}

fn click(row: usize, col: usize) -> Input {
    Input::Click { row, col }
}

#[test]
fn starts_in_the_initial_state() {
    let (_ctx, _input, game) = setup();
    assert_eq!(game.state.sample(), GameState::new());
}

#[test]
fn clicks_update_the_state() {
    let (_ctx, input, game) = setup();
    input.send(click(1, 1));
    input.send(click(0, 2));

    let state = game.state.sample();
    assert_eq!(state.board().get(1, 1), Some(Some(Mark::X)));
    assert_eq!(state.board().get(0, 2), Some(Some(Mark::O)));
    assert_eq!(state.turn(), Mark::X);
}

#[test]
fn moves_report_the_placed_mark() {
    let (_ctx, input, game) = setup();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let _listener = game.moves.listen({
        let seen = seen.clone();
        move |m: &(usize, usize, Mark)| seen.lock().unwrap().push(*m)
    });

    input.send(click(0, 0));
    input.send(click(0, 0));
    input.send(click(2, 1));
    input.send(Input::Reset);
    input.send(click(2, 1));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![(0, 0, Mark::X), (2, 1, Mark::O), (2, 1, Mark::X)]
    );
}

#[test]
fn ignored_clicks_explain_why() {
    let (_ctx, input, game) = setup();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let _listener = game.ignored.listen({
        let seen = seen.clone();
        move |err: &Error| seen.lock().unwrap().push(err.clone())
    });

    input.send(click(0, 0));
    input.send(click(0, 0));
    input.send(click(4, 0));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            Error::Occupied { row: 0, col: 0 },
            Error::OutOfBounds { row: 4, col: 0 },
        ]
    );
    assert_eq!(game.state.sample().turn(), Mark::O);
}

#[test]
fn winner_fires_once_and_input_freezes() {
    let (_ctx, input, game) = setup();
    let winners = Arc::new(Mutex::new(Vec::new()));
    let ignored = Arc::new(Mutex::new(Vec::new()));
    let _winner_listener = game.winner.listen({
        let winners = winners.clone();
        move |mark: &Mark| winners.lock().unwrap().push(*mark)
    });
    let _ignored_listener = game.ignored.listen({
        let ignored = ignored.clone();
        move |err: &Error| ignored.lock().unwrap().push(err.clone())
    });

    for input_event in [click(0, 0), click(1, 1), click(0, 1), click(2, 2), click(0, 2)] {
        input.send(input_event);
    }
    let won = game.state.sample();
    assert!(won.is_game_over());
    assert_eq!(won.winner(), Some(Mark::X));

    input.send(click(2, 0));
    assert_eq!(game.state.sample(), won);
    assert_eq!(*winners.lock().unwrap(), vec![Mark::X]);
    assert_eq!(*ignored.lock().unwrap(), vec![Error::GameOver]);
}

#[test]
fn reset_restarts_the_game() {
    let (_ctx, input, game) = setup();
    let resets = Arc::new(Mutex::new(0));
    let _listener = game.resets.listen({
        let resets = resets.clone();
        move |_: &()| *resets.lock().unwrap() += 1
    });

    for input_event in [click(0, 0), click(1, 0), click(1, 1), click(2, 0), click(2, 2)] {
        input.send(input_event);
    }
    assert!(game.state.sample().is_game_over());

    input.send(Input::Reset);
    assert_eq!(game.state.sample(), GameState::new());
    assert_eq!(*resets.lock().unwrap(), 1);

    input.send(click(1, 1));
    assert_eq!(game.state.sample().board().get(1, 1), Some(Some(Mark::X)));
}
