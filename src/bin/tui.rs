use std::io;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use sodium as na;
use tictactoe::{
    setup::{self, LogArgs},
    Error, GameState, Input, Mark, TicTacToe, SIZE,
};
use tracing::{debug, info};
use tui::{
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame, Terminal,
};

/// Tic-tac-toe on a clickable terminal grid.
///
/// Click a square (or move with the arrow keys and press Enter) to mark it,
/// click "Reset Board" (or press r) to start over, q or Esc to quit.
#[derive(Parser, Debug)]
#[command(name = "ttt-tui", version)]
struct Cli {
    #[command(flatten)]
    log: LogArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // Logging to stderr would draw over the alternate screen.
    if cli.log.log_file.is_some() {
        setup::init_tracing(&cli.log)?;
    }

    let ctx = na::SodiumCtx::new();

    let (input, mut ui) = ctx.transaction(|| {
        let input: na::StreamSink<Input> = ctx.new_stream_sink();

        let TicTacToe {
            state,
            moves,
            winner,
            resets,
            ignored,
        } = TicTacToe::new(&ctx, &input.stream());

        let status = winner
            .map(|mark: &Mark| format!("{} has won the game!", mark))
            .or_else(&moves.map(|(row, col, mark): &(usize, usize, Mark)| {
                format!("{}s took square ({}, {})", mark, row, col)
            }))
            .or_else(&ignored.map(|err: &Error| err.to_string()))
            .or_else(&resets.map(|_: &()| String::from("Board reset, X plays first")))
            .hold(String::from("X plays first"));

        let ui = Ui {
            state,
            status,
            cursor: (0, 0),
        };
        (input, ui)
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut ui, &input);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    ui: &mut Ui,
    input: &na::StreamSink<Input>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui.draw(f))?;
        let areas = Areas::new(terminal.size()?);

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    info!("quitting");
                    return Ok(());
                }
                KeyCode::Char('r') => input.send(Input::Reset),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let (row, col) = ui.cursor;
                    input.send(Input::Click { row, col });
                }
                code => ui.cursor = move_cursor(ui.cursor, code),
            },
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                if let Some(clicked) = areas.hit(column, row) {
                    debug!(?clicked, column, row, "mouse click");
                    if let Input::Click { row, col } = clicked {
                        ui.cursor = (row, col);
                    }
                    input.send(clicked);
                }
            }
            _ => {}
        }
    }
}

fn move_cursor((row, col): (usize, usize), key: KeyCode) -> (usize, usize) {
    match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(SIZE - 1), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(SIZE - 1)),
        _ => (row, col),
    }
}

/// Screen regions, computed the same way for drawing and for mouse hits.
struct Areas {
    board: Rect,
    squares: [[Rect; SIZE]; SIZE],
    info: Rect,
    reset: Rect,
}

impl Areas {
    fn new(size: Rect) -> Areas {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .margin(2)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
            .split(size);
        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(7), Constraint::Length(3)].as_ref())
            .split(chunks[1]);

        let board = chunks[0];
        let thirds = [
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ];
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(thirds.as_ref())
            .split(board);

        let mut squares = [[Rect::default(); SIZE]; SIZE];
        for (row_rects, row_area) in squares.iter_mut().zip(rows) {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(thirds.as_ref())
                .split(row_area);
            for (rect, col_area) in row_rects.iter_mut().zip(cols) {
                *rect = col_area;
            }
        }

        Areas {
            board,
            squares,
            info: side[0],
            reset: side[1],
        }
    }

    fn hit(&self, column: u16, row: u16) -> Option<Input> {
        if contains(self.reset, column, row) {
            return Some(Input::Reset);
        }
        self.squares.iter().enumerate().find_map(|(r, rects)| {
            rects
                .iter()
                .position(|rect| contains(*rect, column, row))
                .map(|c| Input::Click { row: r, col: c })
        })
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    (rect.left()..rect.right()).contains(&column) && (rect.top()..rect.bottom()).contains(&row)
}

struct Ui {
    state: na::Cell<GameState>,
    status: na::Cell<String>,
    cursor: (usize, usize),
}

impl Ui {
    fn draw<B: Backend>(&self, f: &mut Frame<B>) {
        let areas = Areas::new(f.size());
        let state = self.state.sample();

        let block = Block::default().title("Board").borders(Borders::ALL);
        f.render_widget(block, areas.board);
        self.draw_board(f, &areas, &state);

        self.draw_info(f, areas.info, &state);

        let reset = Paragraph::new("Reset Board")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(reset, areas.reset);
    }

    fn draw_board<B: Backend>(&self, f: &mut Frame<B>, areas: &Areas, state: &GameState) {
        let board = state.board();
        for (r, rects) in areas.squares.iter().enumerate() {
            for (c, rect) in rects.iter().enumerate() {
                let mut block = Block::default().borders(Borders::ALL);
                if self.cursor == (r, c) && !state.is_game_over() {
                    block = block.border_style(Style::default().fg(Color::Yellow));
                }
                let mark = board.get(r, c).flatten();
                f.render_widget(RenderMark(mark), block.inner(*rect));
                f.render_widget(block, *rect);
            }
        }
    }

    fn draw_info<B: Backend>(&self, f: &mut Frame<B>, area: Rect, state: &GameState) {
        let view = state.view();
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let mut text = vec![
            Spans::from(vec![
                Span::raw("Winning Player: "),
                Span::styled(view.winner, bold),
            ]),
            Spans::from(vec![
                Span::raw("Game over?: "),
                Span::styled(view.game_over, bold),
            ]),
            Spans::from(""),
        ];
        if !state.is_game_over() {
            text.push(Spans::from(format!("{} to play", state.turn())));
        }
        text.push(Spans::from(self.status.sample()));

        let info = Paragraph::new(text)
            .block(Block::default().title("Game Info").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(info, area);
    }
}

struct RenderMark(Option<Mark>);

impl Widget for RenderMark {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(mark) = self.0 else {
            return;
        };
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = match mark {
            Mark::X => Style::default().fg(Color::Red),
            Mark::O => Style::default().fg(Color::Blue),
        };
        let x = area.x + area.width / 2;
        let y = area.y + area.height / 2;
        buf.set_string(x, y, mark.symbol(), style.add_modifier(Modifier::BOLD));
    }
}
