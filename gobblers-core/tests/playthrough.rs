//! Full-game scenarios driven through the public engine API, the way
//! a front end would: attempt a move, check the win for the mover,
//! switch turns, check the tie.

use gobblers_core::{Game, Player, Pos, Size};

/// Apply one token for the player to move, assert it succeeds and
/// does not win, then hand the turn over.
fn play(game: &mut Game, token: &str) {
    assert!(game.attempt_move(token), "move {} should be legal", token);
    assert!(!game.check_win(), "move {} should not win yet", token);
    game.switch_turn();
    assert!(!game.check_tie(), "no tie before the final piece");
}

#[test]
fn test_top_row_win() {
    let mut game = Game::new();

    // Yellow claims the top row. The third piece is a medium because
    // each reserve holds only two larges.
    for token in ["a1", "a4", "a2", "a5"] {
        assert!(game.attempt_move(token));
        assert!(!game.check_win());
        game.switch_turn();
    }
    assert!(game.attempt_move("b3"));

    assert_eq!(game.turn(), Player::Yellow);
    assert!(game.check_win());
    let cells = game.board().display_cells();
    assert_eq!(cells[0], "YY");
    assert_eq!(cells[1], "YY");
    assert_eq!(cells[2], "Y3");
}

#[test]
fn test_tie_game_exhausts_both_reserves() {
    let mut game = Game::new();

    // Twelve placements, no three-in-a-row of visible tops at any
    // point. Smalls get buried under mediums, mediums under larges.
    let tokens = [
        "c5", "c1", "b1", "b5", "a5", "a1", "c9", "c3", "b3", "b9", "a2",
    ];
    for token in tokens {
        play(&mut game, token);
    }

    // Red's last piece ends the game.
    assert!(game.attempt_move("a4"));
    assert!(!game.check_win());
    game.switch_turn();
    assert!(game.check_tie());

    for player in [Player::Yellow, Player::Red] {
        for size in Size::all() {
            assert_eq!(game.remaining(player, size), 0);
        }
    }
}

#[test]
fn test_rejection_is_idempotent() {
    let mut game = Game::new();
    play(&mut game, "a5");

    let before = game.clone();
    // Illegal twice over: Red has larges, but cell 5 holds one.
    assert!(!game.attempt_move("a5"));
    assert_eq!(game, before);
    assert!(!game.attempt_move("a5"));
    assert_eq!(game, before);
}

#[test]
fn test_large_locks_a_cell_for_good() {
    let mut game = Game::new();
    play(&mut game, "a5");

    // Once a large sits on cell 5, every size from either player is
    // rejected there for the rest of the game.
    for _ in 0..2 {
        for token in ["a5", "b5", "c5"] {
            let before = game.clone();
            assert!(!game.attempt_move(token));
            assert_eq!(game, before);
        }
        game.switch_turn();
    }
}

#[test]
fn test_double_undo_after_single_move() {
    let mut game = Game::new();
    assert!(game.attempt_move("c2"));

    assert!(game.undo());
    assert_eq!(game.history_len(), 0);

    let drained = game.clone();
    assert!(!game.undo());
    assert_eq!(game, drained);
}

#[test]
fn test_undo_walks_back_a_whole_game() {
    let mut game = Game::new();
    let fresh = game.clone();

    let mut checkpoints = Vec::new();
    for token in ["c5", "c1", "b1", "b5", "a5"] {
        checkpoints.push(game.clone());
        play(&mut game, token);
    }

    // Snapshots restore the turn marker too, so undoing past a
    // switch_turn lands exactly on the pre-move states.
    for checkpoint in checkpoints.iter().rev() {
        assert!(game.undo());
        assert_eq!(&game, checkpoint);
    }
    assert!(!game.undo());
    assert_eq!(game, fresh);
}

#[test]
fn test_state_serde_round_trip() {
    let mut game = Game::new();
    for token in ["c5", "c1", "b1"] {
        play(&mut game, token);
    }

    let json = serde_json::to_string(&game).expect("serialize");
    let mut restored: Game = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, game);

    // The restored engine is fully operational: its history survived,
    // so undo walks back the same way.
    assert!(restored.undo());
    assert!(game.undo());
    assert_eq!(restored, game);
    assert_eq!(
        restored.board().cell(Pos(0)).display(),
        game.board().cell(Pos(0)).display()
    );
}

#[test]
fn test_random_play_invariants() {
    use rand::prelude::*;

    let mut rng = rand::rng();
    let letters = ['a', 'b', 'c'];

    for _ in 0..200 {
        let mut game = Game::new();

        for _ in 0..40 {
            let digit: u8 = rng.random_range(1..=9);
            let token = format!("{}{}", letters[rng.random_range(0..3)], digit);

            let before = game.clone();
            let moved = game.attempt_move(&token);

            if moved {
                let after = game.clone();
                assert!(game.undo(), "undo must succeed after a placement");
                assert_eq!(game, before, "undo must restore the pre-move state");
                assert!(
                    game.attempt_move(&token),
                    "replaying an undone token must succeed"
                );
                assert_eq!(game, after, "replay must reproduce the post-move state");
            } else {
                assert_eq!(game, before, "a rejected token must not mutate state");
            }

            for player in [Player::Yellow, Player::Red] {
                for size in Size::all() {
                    assert!(game.remaining(player, size) <= 2);
                }
            }

            if moved {
                if game.check_win() {
                    break;
                }
                game.switch_turn();
                if game.check_tie() {
                    break;
                }
            }
        }
    }
}
