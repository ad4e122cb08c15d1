//! Interactive two-player Gobblet Gobblers match on the terminal.
//!
//! Thin shell around [`gobblers_core::Game`]: renders the board,
//! shows the mover's remaining pieces, reads one token per line
//! ("a5" = large piece on cell 5, "u" = undo, "q" = quit), and relays
//! the engine's verdicts. All game logic lives in the core crate.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use gobblers_core::{Game, Player, Size};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so the board stays clean; enable with RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut game = Game::new();
    let mut show_board = true;

    loop {
        if show_board {
            print_board(&game);
            print_menu(&game);
        }

        println!("It is {}'s turn.", game.turn().name());
        print!("Choose action and location, for example a2: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let input = line?;
        let input = input.trim();
        show_board = true;

        match input {
            "q" => break,
            "u" => {
                if !game.undo() {
                    println!("Cannot undo.");
                    show_board = false;
                }
            }
            token => {
                if !game.attempt_move(token) {
                    println!("Invalid move. Try again.");
                    show_board = false;
                } else if game.check_win() {
                    print_board(&game);
                    println!("{} wins!", winner_name(game.turn()));
                    break;
                } else {
                    game.switch_turn();
                    if game.check_tie() {
                        print_board(&game);
                        println!("Tie game.");
                        break;
                    }
                }
            }
        }
    }

    debug!("session over");
    Ok(())
}

fn winner_name(player: Player) -> &'static str {
    match player {
        Player::Yellow => "Yellow",
        Player::Red => "Red",
    }
}

/// Print the 3x3 grid with the classic margins and separators.
fn print_board(game: &Game) {
    let cells = game.board().display_cells();
    println!();
    for row in 0..3 {
        let line = cells[row * 3..row * 3 + 3].join("|");
        println!("          {}", line);
        if row != 2 {
            println!("          --------");
        }
    }
    println!();
}

/// Print the mover's piece menu: token letter, symbol, and count.
fn print_menu(game: &Game) {
    let mover = game.turn();
    for (letter, size) in [('a', Size::Large), ('b', Size::Medium), ('c', Size::Small)] {
        println!(
            "{}. {:<4}{} remain.",
            letter,
            piece_symbol(mover, size),
            game.remaining(mover, size)
        );
    }
    println!("q to exit.");
    println!();
}

/// The symbol a piece of this size would show on the board: "YY" for
/// a large, "Y" for a medium, "y" for a small (likewise "R"/"r").
fn piece_symbol(player: Player, size: Size) -> String {
    let c = player.initial();
    match size {
        Size::Large => format!("{}{}", c, c),
        Size::Medium => c.to_string(),
        Size::Small => c.to_ascii_lowercase().to_string(),
    }
}
