//! Tests for the minimax decision engine.

use arcade_tictactoe::{
    Board, DecisionEngine, Difficulty, EnginePolicy, FULL_DEPTH, Mark, Position, SearchMode,
    WIN_SCORE, best_move, check_outcome, minimax, score,
};
use strum::IntoEnumIterator;

mod common;

fn board(s: &str) -> Board {
    Board::parse(s).expect("valid board")
}

fn engine() -> DecisionEngine {
    DecisionEngine::with_seed(EnginePolicy::default(), false, 42)
}

#[test]
fn test_terminal_scores() {
    assert_eq!(score(&board("OOO XX. X..")), WIN_SCORE);
    assert_eq!(score(&board("XXX OO. ...")), -WIN_SCORE);
    assert_eq!(score(&board("XOX XOO OXX")), 0);
    assert_eq!(score(&Board::new()), 0);
}

#[test]
fn test_empty_board_is_a_draw_with_perfect_play() {
    assert_eq!(minimax(&Board::new(), FULL_DEPTH, false), 0);
}

#[test]
fn test_minimax_sees_forced_loss() {
    // X to move with an open line at 2
    let b = board("XX. OO. ...");
    assert_eq!(minimax(&b, FULL_DEPTH, false), -WIN_SCORE);
    // Depth zero only scores the board as it stands
    assert_eq!(minimax(&b, 0, false), 0);
}

#[test]
fn test_hard_takes_lowest_winning_index() {
    // Both 2 and 5 lead to an O win; ties go to the lowest index
    let b = board("XX. OO. ...");
    assert_eq!(engine().choose_move(&b, Difficulty::Hard), Some(Position::TopRight));
}

#[test]
fn test_depth_discount_prefers_immediate_win() {
    let b = board("XX. OO. ...");
    let mut engine = DecisionEngine::with_seed(EnginePolicy::default(), true, 42);
    assert_eq!(engine.choose_move(&b, Difficulty::Hard), Some(Position::MiddleRight));
}

#[test]
fn test_takes_immediate_win() {
    let b = board("OO. XX. X..");
    for difficulty in Difficulty::iter() {
        assert_eq!(
            engine().choose_move(&b, difficulty),
            Some(Position::TopRight),
            "difficulty {}",
            difficulty
        );
    }
}

#[test]
fn test_blocks_player_line() {
    let b = board("XX. .O. ...");
    assert_eq!(engine().choose_move(&b, Difficulty::Hard), Some(Position::TopRight));
    assert_eq!(engine().choose_move(&b, Difficulty::Medium), Some(Position::TopRight));
}

#[test]
fn test_easy_only_sees_one_ply() {
    // No immediate win: every move scores 0 and the lowest index is taken
    let b = board("XX. .O. ...");
    assert_eq!(engine().choose_move(&b, Difficulty::Easy), Some(Position::TopRight));
    let b = board("X.. ... ...");
    assert_eq!(engine().choose_move(&b, Difficulty::Easy), Some(Position::TopCenter));
}

#[test]
fn test_full_board_has_no_move() {
    let b = board("XOX XOO OXX");
    assert_eq!(engine().choose_move(&b, Difficulty::Hard), None);
    assert_eq!(best_move(&b, FULL_DEPTH), None);
}

#[test]
fn test_choose_move_leaves_board_untouched() {
    let b = board("X.. .O. ..X");
    let copy = b;
    engine().choose_move(&b, Difficulty::Hard);
    assert_eq!(b, copy);
}

#[test]
fn test_moves_always_legal() {
    let random = EnginePolicy::new(SearchMode::Random, SearchMode::Random, SearchMode::Random);
    let mut engines = [
        engine(),
        DecisionEngine::with_seed(EnginePolicy::default(), true, 42),
        DecisionEngine::with_seed(random, false, 7),
    ];
    let in_progress: Vec<Board> = common::reachable_boards()
        .into_iter()
        .filter(|b| !check_outcome(b).is_terminal())
        .collect();

    for engine in engines.iter_mut() {
        for b in &in_progress {
            for difficulty in Difficulty::iter() {
                let pos = engine.choose_move(b, difficulty).expect("a move");
                assert!(b.is_empty(pos), "{} on\n{}", pos, b.display());
            }
        }
    }
}

#[test]
fn test_random_mode_is_reproducible() {
    let policy = EnginePolicy::new(SearchMode::Random, SearchMode::Random, SearchMode::Random);
    let mut a = DecisionEngine::with_seed(policy, false, 99);
    let mut b = DecisionEngine::with_seed(policy, false, 99);
    for _ in 0..20 {
        assert_eq!(
            a.choose_move(&Board::new(), Difficulty::Hard),
            b.choose_move(&Board::new(), Difficulty::Hard)
        );
    }
}

#[test]
fn test_hard_never_loses_against_any_reply() {
    // The player tries every legal sequence; the engine must never lose
    fn explore(b: Board, engine: &mut DecisionEngine) {
        if check_outcome(&b).is_terminal() {
            assert_ne!(check_outcome(&b).winner(), Some(Mark::PLAYER), "{}", b.display());
            return;
        }
        for pos in b.empty_positions().collect::<Vec<_>>() {
            let mut next = b;
            next.place(pos, Mark::PLAYER).unwrap();
            if !check_outcome(&next).is_terminal() {
                let reply = engine.choose_move(&next, Difficulty::Hard).expect("a reply");
                next.place(reply, Mark::OPPONENT).unwrap();
            }
            explore(next, engine);
        }
    }
    explore(Board::new(), &mut engine());
}

#[test]
fn test_default_policy_depths() {
    let policy = EnginePolicy::default();
    assert_eq!(policy.mode(Difficulty::Easy), SearchMode::Minimax { depth: 1 });
    assert_eq!(policy.mode(Difficulty::Medium), SearchMode::Minimax { depth: 3 });
    assert_eq!(policy.mode(Difficulty::Hard), SearchMode::Minimax { depth: FULL_DEPTH });
}

#[test]
fn test_difficulty_parses_case_insensitively() {
    assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
    assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
    assert!("impossible".parse::<Difficulty>().is_err());
}
