use serde::Deserialize;

use chess_core::board::SearchLimits;
use chess_core::Engine;

#[derive(Deserialize)]
struct ProblemSet {
    problems: Vec<Problem>,
}

#[derive(Deserialize)]
struct Problem {
    name: String,
    fen: String,
    /// Expected move when the mate is unique
    mate: Option<String>,
}

#[test]
fn mate_in_one_suite() {
    let data = include_str!("data/mates.json");
    let set: ProblemSet = serde_json::from_str(data).expect("invalid mates.json");
    assert!(!set.problems.is_empty());

    let mut engine = Engine::new();
    for problem in &set.problems {
        engine
            .set_position(&problem.fen, &[])
            .unwrap_or_else(|e| panic!("{}: {e}", problem.name));
        let result = engine.find_best_move(&SearchLimits::depth(3));

        let best = result
            .best_move
            .unwrap_or_else(|| panic!("{}: no move", problem.name));
        assert_eq!(result.mate_in(), Some(1), "{}", problem.name);
        if let Some(expected) = &problem.mate {
            assert_eq!(&best.to_string(), expected, "{}", problem.name);
        }

        let text = best.to_string();
        engine.set_position(&problem.fen, &[text.as_str()]).unwrap();
        assert!(
            engine.board_mut().is_checkmate(),
            "{}: {best} does not mate",
            problem.name
        );
    }
}

#[test]
fn mate_is_found_with_every_heuristic_disabled() {
    let data = include_str!("data/mates.json");
    let set: ProblemSet = serde_json::from_str(data).expect("invalid mates.json");

    let mut engine = Engine::new();
    for (name, value) in [("UseHash", "false"), ("Killers", "off"), ("History", "0")] {
        engine.set_option(name, value).unwrap();
    }
    for problem in &set.problems {
        engine.set_position(&problem.fen, &[]).unwrap();
        let result = engine.find_best_move(&SearchLimits::depth(2));
        assert_eq!(result.mate_in(), Some(1), "{}", problem.name);
    }
}
