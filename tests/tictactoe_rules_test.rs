//! Tests for board rules and rounds.

use arcade_tictactoe::{
    Board, BoardError, InvariantSet, Mark, Outcome, Position, Round, RoundInvariants, Turn,
    check_outcome, check_winner, is_draw, is_full,
};

mod common;

fn board(s: &str) -> Board {
    Board::parse(s).expect("valid board")
}

#[test]
fn test_empty_board_in_progress() {
    assert_eq!(check_outcome(&Board::new()), Outcome::InProgress);
}

#[test]
fn test_every_line_wins() {
    for line in arcade_tictactoe::LINES {
        let mut b = Board::new();
        for pos in line {
            b.place(pos, Mark::O).unwrap();
        }
        assert_eq!(check_winner(&b), Some(Mark::O));
        assert_eq!(check_outcome(&b), Outcome::OpponentWin);
    }
}

#[test]
fn test_outcomes_exclusive() {
    let cases = [
        ("XXX OO. ...", Outcome::PlayerWin),
        ("OOO XX. X..", Outcome::OpponentWin),
        ("XOX XOO OXX", Outcome::Draw),
        ("XO. ... ...", Outcome::InProgress),
    ];
    for (s, expected) in cases {
        let b = board(s);
        let outcome = check_outcome(&b);
        assert_eq!(outcome, expected, "board {}", s);

        // A winner rules out a draw, and a draw needs a full board
        assert_eq!(check_winner(&b).is_some(), outcome.winner().is_some());
        assert_eq!(is_draw(&b), outcome == Outcome::Draw);
        if is_draw(&b) {
            assert!(is_full(&b));
        }
    }
}

#[test]
fn test_every_reachable_board_has_one_outcome() {
    let boards = common::reachable_boards();
    assert_eq!(boards.len(), 5478);

    for b in boards {
        let outcome = check_outcome(&b);
        let won = check_winner(&b).is_some();
        assert!(!(won && is_draw(&b)), "win and draw at once:\n{}", b.display());
        assert_eq!(outcome.winner().is_some(), won, "{}", b.display());
        assert_eq!(outcome == Outcome::Draw, is_draw(&b), "{}", b.display());
        assert_eq!(outcome == Outcome::InProgress, !won && !is_full(&b));
        assert_eq!(check_outcome(&b), outcome);
    }
}

#[test]
fn test_full_board_with_line_is_a_win() {
    let b = board("XXX OOX OXO");
    assert!(is_full(&b));
    assert!(!is_draw(&b));
    assert_eq!(check_outcome(&b), Outcome::PlayerWin);
}

#[test]
fn test_check_outcome_idempotent() {
    let b = board("XOX .O. ...");
    let first = check_outcome(&b);
    assert_eq!(check_outcome(&b), first);
    assert_eq!(b, board("XOX .O. ..."));
}

#[test]
fn test_place_rejects_occupied() {
    let mut b = Board::new();
    b.place(Position::Center, Mark::X).unwrap();
    let result = b.place(Position::Center, Mark::O);
    assert_eq!(result, Err(BoardError::SquareOccupied(Position::Center)));
    assert_eq!(b.count(Mark::O), 0);
}

#[test]
fn test_parse_rejects_bad_input() {
    assert!(Board::parse("XXOO").is_none());
    assert!(Board::parse("XXXOOO...X").is_none());
    assert!(Board::parse("XXOO?....").is_none());
    assert!(Board::parse("X|O|.\n.|.|.\n.|.|.").is_some());
}

#[test]
fn test_round_alternates_turns() {
    let mut round = Round::new();
    assert_eq!(round.turn(), Turn::Player);

    round.play(Position::Center).unwrap();
    assert_eq!(round.turn(), Turn::Opponent);
    assert_eq!(round.board().get(Position::Center), arcade_tictactoe::Square::Occupied(Mark::X));

    round.play(Position::TopLeft).unwrap();
    assert_eq!(round.turn(), Turn::Player);
    assert_eq!(round.history().len(), 2);
    assert!(RoundInvariants::check_all(&round).is_ok());
}

#[test]
fn test_round_frozen_after_win() {
    let mut round = Round::new();
    // X: 0, 4, 8 / O: 1, 2
    for index in [0, 1, 4, 2] {
        round.play(Position::from_index(index).unwrap()).unwrap();
    }
    let outcome = round.play(Position::BottomRight).unwrap();
    assert_eq!(outcome, Outcome::PlayerWin);

    let before = *round.board();
    assert_eq!(round.play(Position::BottomLeft), Err(BoardError::GameOver));
    assert_eq!(*round.board(), before);
    assert_eq!(round.outcome(), Outcome::PlayerWin);
}

#[test]
fn test_round_rejects_occupied_without_side_effects() {
    let mut round = Round::new();
    round.play(Position::Center).unwrap();
    let result = round.play(Position::Center);
    assert!(matches!(result, Err(BoardError::SquareOccupied(Position::Center))));
    assert_eq!(round.turn(), Turn::Opponent);
    assert_eq!(round.history().len(), 1);
}
