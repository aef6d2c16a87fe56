//! Integration tests for the TRIAD rules engine
//!
//! Covers construction, legality, scoring, termination and the
//! no-mutation-on-rejection guarantee, using seeded random move streams.

use std::sync::{Arc, Mutex};
use std::thread;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use triad_core::{
    GameConfig, GameOutcome, GameStatus, Piece, PieceType, Player, Pos, Rejection, RulesEngine,
    ScoreRule,
};
use triad_core::PieceType::{Shield, Soldier, Sword};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn all_remaining(game: &RulesEngine) -> Vec<u32> {
    Player::ALL
        .iter()
        .flat_map(|&p| PieceType::ALL.iter().map(move |&t| game.remaining(p, t)))
        .collect()
}

fn random_piece(rng: &mut ChaCha8Rng) -> PieceType {
    PieceType::ALL[rng.gen_range(0..3)]
}

/// White completes a triad on a 2x2 board and wins 3-0
fn white_triad_game() -> RulesEngine {
    let mut game = RulesEngine::with_size(2, 1).unwrap();
    let moves = [
        (0, 0, Sword),   // White
        (1, 1, Soldier), // Black
        (0, 0, Shield),  // White
        (1, 0, Sword),   // Black
        (0, 0, Soldier), // White: triad
        (1, 1, Shield),  // Black
    ];
    for (x, y, pt) in moves {
        assert!(game.try_place(x, y, pt), "move ({}, {}) {:?} rejected", x, y, pt);
    }
    game
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_fresh_engine_for_many_sizes() {
    for n in 0..=6usize {
        for k in [0u32, 1, (n * n) as u32, (n * n) as u32 + 1, 7] {
            let game = RulesEngine::with_size(n, k).unwrap();
            for player in Player::ALL {
                assert_eq!(game.score(player), 0);
                for pt in PieceType::ALL {
                    assert_eq!(game.remaining(player, pt), k);
                }
            }
            for y in 0..n as i32 {
                for x in 0..n as i32 {
                    assert!(game.pieces_at(x, y).unwrap().is_empty());
                }
            }
            let expected = if k == 0 {
                GameStatus::Ended(GameOutcome::Draw)
            } else {
                GameStatus::InProgress
            };
            assert_eq!(game.status(), expected);
            assert_eq!(game.current_player(), Player::White);
        }
    }
}

#[test]
fn test_config_tie_break_is_used() {
    let config = GameConfig::default().with_tie_break(Player::Black);
    let mut game = RulesEngine::new(config).unwrap();
    // White {Sword, Shield} vs Black {Shield, Soldier} at (0,0): 2-2 tie
    assert!(game.try_place(0, 0, Sword));
    assert!(game.try_place(0, 0, Shield));
    assert!(game.try_place(0, 0, Shield));
    let outcome = game.place(0, 0, Soldier).unwrap();
    let award = outcome.award.unwrap();
    assert_eq!(award.rule, ScoreRule::Mixed);
    assert_eq!(award.player, Player::Black);
    assert_eq!(game.score(Player::Black), 1);
}

#[test]
fn test_supply_larger_than_board() {
    // 7 Soldiers each cannot all fit on 4 cells; the engine still plays
    let mut game = RulesEngine::with_size(2, 7).unwrap();
    assert!(!game.config().is_completable());
    for y in 0..2 {
        for x in 0..2 {
            assert!(game.try_place(x, y, Soldier)); // White
            assert!(game.try_place(x, y, Soldier)); // Black
        }
    }
    assert!(matches!(
        game.place(0, 0, Soldier),
        Err(Rejection::DuplicatePiece { .. })
    ));
    assert_eq!(game.remaining(Player::White, Soldier), 3);
    assert!(game.has_legal_placement());
    assert_eq!(game.status(), GameStatus::InProgress);
}

#[test]
fn test_oversized_board_is_refused() {
    let config = GameConfig::new(triad_core::MAX_BOARD_SIZE + 1, 1);
    assert!(RulesEngine::new(config).is_err());
    assert!(RulesEngine::with_size(usize::MAX, 0).is_err());
}

// ============================================================================
// LEGALITY
// ============================================================================

#[test]
fn test_first_move_anywhere() {
    for pt in PieceType::ALL {
        for y in 0..5 {
            for x in 0..5 {
                let mut game = RulesEngine::default();
                assert!(game.try_place(x, y, pt));
            }
        }
    }
}

#[test]
fn test_shield_after_sword() {
    let mut game = RulesEngine::default();
    assert!(game.try_place(2, 2, Sword));

    let mut diagonal = game.clone();
    assert_eq!(
        diagonal.place(3, 3, Shield),
        Err(Rejection::AdjacencyViolation { pos: Pos::new(3, 3), anchor: Pos::new(2, 2) })
    );
    assert_eq!(diagonal, game);

    assert!(game.try_place(2, 4, Shield));
    assert_eq!(game.pieces_at(2, 4).unwrap(), &[Piece::new(Shield, Player::Black)]);
}

#[test]
fn test_shield_reach_limits() {
    let mut game = RulesEngine::with_size(7, 3).unwrap();
    assert!(game.try_place(3, 3, Sword));
    for (x, y) in [(0, 3), (6, 3), (3, 0), (3, 6)] {
        assert!(game.check_placement(x, y, Shield).is_err(), "({}, {})", x, y);
    }
    for (x, y) in [(1, 3), (5, 3), (3, 1), (3, 5), (3, 3), (4, 3)] {
        assert!(game.check_placement(x, y, Shield).is_ok(), "({}, {})", x, y);
    }
}

#[test]
fn test_duplicate_always_rejected() {
    let mut game = RulesEngine::default();
    assert!(game.try_place(3, 1, Soldier)); // White
    assert!(game.try_place(0, 0, Soldier)); // Black
    let before = game.clone();
    assert!(matches!(
        game.place(3, 1, Soldier),
        Err(Rejection::DuplicatePiece { player: Player::White, .. })
    ));
    assert_eq!(game, before);
}

// ============================================================================
// SCORING
// ============================================================================

#[test]
fn test_mixed_scoring_example() {
    let mut game = RulesEngine::default();
    assert!(game.try_place(0, 0, Sword));
    assert!(game.try_place(0, 0, Shield));
    assert!(game.try_place(0, 0, Soldier));
    assert_eq!(game.score(Player::White), 1);
    assert_eq!(game.score(Player::Black), 0);
    assert_eq!(game.pieces_at(0, 0).unwrap().len(), 3);
}

#[test]
fn test_triad_gives_three_and_no_mixed() {
    let game = white_triad_game();
    assert_eq!(game.score(Player::White), 3);
    assert_eq!(game.score(Player::Black), 0);

    let awards: Vec<_> = game.history().iter().filter_map(|r| r.award).collect();
    assert_eq!(awards.len(), 1);
    assert_eq!(awards[0].rule, ScoreRule::Triad);
}

// ============================================================================
// TERMINATION
// ============================================================================

#[test]
fn test_game_ends_with_winner() {
    let mut game = white_triad_game();
    assert!(all_remaining(&game).iter().all(|&c| c == 0));
    assert_eq!(game.status(), GameStatus::Ended(GameOutcome::Win(Player::White)));
    assert_eq!(game.status().winner(), Some(Player::White));

    let before = game.clone();
    for pt in PieceType::ALL {
        for (x, y) in [(0, 0), (1, 1), (5, 5)] {
            assert!(!game.try_place(x, y, pt));
        }
    }
    assert_eq!(game, before);
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[test]
fn test_random_attempts_respect_invariants() {
    for seed in 0..40u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let n = rng.gen_range(1..=5usize);
        let k = rng.gen_range(1..=(n * n).min(4)) as u32;
        let mut game = RulesEngine::with_size(n, k).unwrap();

        for _ in 0..2000 {
            if game.status().is_over() {
                break;
            }
            let x = rng.gen_range(-1..=n as i32);
            let y = rng.gen_range(-1..=n as i32);
            let pt = random_piece(&mut rng);
            let before = game.clone();

            match game.place(x, y, pt) {
                Err(_) => assert_eq!(game, before, "seed {}", seed),
                Ok(outcome) => {
                    let mover = before.current_player();
                    assert_eq!(outcome.piece, Piece::new(pt, mover));
                    assert_eq!(game.remaining(mover, pt), before.remaining(mover, pt) - 1);
                    assert_eq!(game.current_player(), mover.opponent());
                    assert_eq!(game.history().len(), before.history().len() + 1);
                    for player in Player::ALL {
                        assert!(game.score(player) >= before.score(player));
                    }
                    let gained: u32 = Player::ALL
                        .iter()
                        .map(|&p| game.score(p) - before.score(p))
                        .sum();
                    assert_eq!(gained, outcome.award.map(|a| a.points).unwrap_or(0));
                    assert_eq!(outcome.status, game.status());
                }
            }
        }

        // No cell ever holds the same (type, owner) twice
        for (_, stack) in game.board().stacks() {
            for (i, a) in stack.iter().enumerate() {
                assert!(stack[i + 1..].iter().all(|b| b != a), "seed {}", seed);
            }
        }
    }
}

#[test]
fn test_random_legal_playouts_finish() {
    let mut finished = 0;
    for seed in 0..20u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut game = RulesEngine::default();

        while !game.status().is_over() {
            let options: Vec<(Pos, PieceType)> = PieceType::ALL
                .iter()
                .flat_map(|&pt| game.legal_placements(pt).into_iter().map(move |p| (p, pt)))
                .collect();
            if options.is_empty() {
                break;
            }
            let (pos, pt) = options[rng.gen_range(0..options.len())];
            assert!(game.try_place(pos.x, pos.y, pt));
        }

        if let GameStatus::Ended(outcome) = game.status() {
            finished += 1;
            assert_eq!(game.history().len(), 2 * 3 * 7);
            let (white, black) = (game.score(Player::White), game.score(Player::Black));
            let expected = match white.cmp(&black) {
                std::cmp::Ordering::Greater => GameOutcome::Win(Player::White),
                std::cmp::Ordering::Less => GameOutcome::Win(Player::Black),
                std::cmp::Ordering::Equal => GameOutcome::Draw,
            };
            assert_eq!(outcome, expected);
        }
    }
    assert!(finished > 0);
}

#[test]
fn test_queries_are_idempotent() {
    let mut game = RulesEngine::default();
    assert!(game.try_place(1, 1, Sword));
    assert!(game.try_place(1, 2, Shield));

    let first = game.snapshot();
    for _ in 0..3 {
        assert_eq!(game.snapshot(), first);
        assert_eq!(game.pieces_at(1, 1).unwrap(), game.pieces_at(1, 1).unwrap());
        assert_eq!(game.remaining(Player::Black, Shield), 6);
        assert_eq!(game.score(Player::White), 0);
        assert_eq!(game.current_player(), Player::White);
        assert_eq!(game.status(), GameStatus::InProgress);
    }
}

// ============================================================================
// SHARED ACCESS
// ============================================================================

#[test]
fn test_serialized_access_through_mutex() {
    let game = Arc::new(Mutex::new(RulesEngine::default()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let game = Arc::clone(&game);
            thread::spawn(move || {
                let mut accepted = 0u32;
                for x in 0..5 {
                    let mut guard = game.lock().unwrap();
                    if guard.try_place(x, i, Soldier) {
                        accepted += 1;
                    }
                }
                accepted
            })
        })
        .collect();

    let accepted: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    let game = game.lock().unwrap();
    assert_eq!(game.history().len() as u32, accepted);
    let used: u32 = Player::ALL
        .iter()
        .map(|&p| 7 - game.remaining(p, Soldier))
        .sum();
    assert_eq!(used, accepted);
}
