//! End-to-end games played by the lookahead agent.

use rand::{SeedableRng, rngs::StdRng};
use tilecrush::{Board, Direction, GoalSpec, Move, MovePolicy, SearchAgent};

fn budgeted_board(rows: usize, cols: usize, move_budget: u32, seed: u64) -> (Board, StdRng) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new(rows, cols, GoalSpec::ScoreTarget {
        target: 1_000_000,
        move_budget,
    })
    .unwrap();
    board.start(&mut rng);
    (board, rng)
}

#[test]
fn agent_finishes_exactly_at_the_move_budget() {
    let (mut board, mut rng) = budgeted_board(7, 7, 5, 211);
    let mut agent = SearchAgent::new(2, 9).unwrap();
    while !board.is_finished() {
        agent.play_move(&mut board, &mut rng).unwrap();
    }
    assert_eq!(board.move_count(), 5);
    assert!(board.score() > 0);
}

#[test]
fn greedy_degenerate_case_keeps_one_child_per_move() {
    let (mut board, mut rng) = budgeted_board(6, 6, 4, 223);
    let mut agent = SearchAgent::new(1, 1).unwrap();
    while !board.is_finished() {
        agent.play_move(&mut board, &mut rng).unwrap();
    }
    assert_eq!(board.move_count(), 4);
    assert_eq!(agent.children_generated(), 4);
}

#[test]
fn greedy_agent_commits_the_highest_valued_candidate() {
    // With a one-move budget every candidate is valued at its raw score.
    // The wrapped pair at (1,1)/(2,1) clears nearly the whole board for at
    // least 27 points (2 for the endpoints, 24 cleared cells, 1 for the
    // exploding survivor); every other legal move is a wrapped+plain combo
    // or a plain 3-run worth single digits. The greedy agent must take the
    // pair, generated as the downward swap from (1,1).
    let mut board = Board::from_layout(
        "C G Y O B\n\
         G C O B G\n\
         Y C B G P\n\
         Y O B G Y\n\
         O B G Y O",
        GoalSpec::ScoreTarget {
            target: 1_000_000,
            move_budget: 1,
        },
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(241);
    let mut agent = SearchAgent::new(1, 1).unwrap();
    agent.play_move(&mut board, &mut rng).unwrap();
    assert_eq!(board.last_move(), Some(Move::new(1, 1, Direction::Down)));
    assert!(board.score() >= 27, "score {}", board.score());
    assert!(board.is_finished());
}

#[test]
fn games_are_reproducible_from_the_seed() {
    let play = |seed| {
        let (mut board, mut rng) = budgeted_board(6, 6, 4, seed);
        let mut agent = SearchAgent::new(2, 4).unwrap();
        while !board.is_finished() {
            agent.play_move(&mut board, &mut rng).unwrap();
        }
        (board.score(), board.fingerprint())
    };
    assert_eq!(play(227), play(227));
    // Different seeds almost surely take different paths; verify the seed
    // actually matters rather than everything collapsing to one trace.
    assert_ne!(play(227).1, play(229).1);
}

#[test]
fn cached_and_uncached_agents_both_finish_their_games() {
    let (mut board, mut rng) = budgeted_board(6, 6, 3, 233);
    let mut cached = SearchAgent::new(2, 4).unwrap().with_cache();
    while !board.is_finished() {
        cached.play_move(&mut board, &mut rng).unwrap();
    }
    assert_eq!(board.move_count(), 3);

    let (mut board, mut rng) = budgeted_board(6, 6, 3, 233);
    let mut plain = SearchAgent::new(2, 4).unwrap();
    while !board.is_finished() {
        plain.play_move(&mut board, &mut rng).unwrap();
    }
    assert_eq!(board.move_count(), 3);
}

#[test]
fn deep_agent_on_a_one_move_budget_stops_after_one_move() {
    let (mut board, mut rng) = budgeted_board(5, 5, 1, 239);
    let mut agent = SearchAgent::new(4, 9).unwrap();
    agent.play_move(&mut board, &mut rng).unwrap();
    assert!(board.is_finished());
    assert_eq!(board.move_count(), 1);
}
