#![no_main]

//! Full game turn fuzzer.
//!
//! This fuzz target drives complete sessions on the bundled data:
//! 1. Start a session from a fuzzer seed
//! 2. Take turns in fuzzer-chosen directions
//! 3. Answer every prompt from the fuzzer's answer stream, valid or not
//! 4. Check invariants after every turn
//!
//! Invalid answers exercise the re-prompt loop; the stream falls back to the
//! first valid choice once exhausted so every prompt terminates.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use zimp::GameData;
use zimp::game::{
    DecisionProvider, Direction, DisplaySink, Prompt, Session, SessionConfig, check_invariants,
};

/// Structured input for full game turn fuzzing.
#[derive(Arbitrary, Debug)]
struct GameTurnInput {
    /// Session seed.
    seed: u64,
    /// Moves as direction indices.
    moves: Vec<u8>,
    /// Raw answers, used in order.
    answers: Vec<String>,
}

/// Replays fuzzer answers, then the first choice forever.
struct FuzzFrontend {
    answers: std::vec::IntoIter<String>,
}

impl DecisionProvider for FuzzFrontend {
    fn decide(&mut self, _prompt: &Prompt, choices: &[String]) -> String {
        self.answers
            .next()
            .or_else(|| choices.first().cloned())
            .unwrap_or_default()
    }
}

impl DisplaySink for FuzzFrontend {
    fn show(&mut self, _line: &str) {}
}

fuzz_target!(|input: GameTurnInput| {
    let Ok(data) = GameData::builtin() else {
        return;
    };
    let Ok(mut session) = Session::new(data, SessionConfig::with_seed(input.seed)) else {
        return;
    };
    let answers: Vec<String> = input.answers.into_iter().take(500).collect();
    let mut frontend = FuzzFrontend {
        answers: answers.into_iter(),
    };

    for (turn, raw) in input.moves.into_iter().take(100).enumerate() {
        if session.is_over() {
            break;
        }
        let Some(direction) = Direction::from_index(usize::from(raw % 4)) else {
            continue;
        };
        let deck_before = session.deck().remaining();
        let hour_before = session.clock().hour();
        let blocked = session.take_turn(direction, &mut frontend).is_err();

        if blocked {
            // A rejected move costs nothing beyond a pending reshuffle.
            assert!(
                session.deck().remaining() == deck_before
                    || session.clock().hour() == hour_before + 1
            );
        }

        let violations = check_invariants(&session);
        assert!(
            violations.is_empty(),
            "Invariants violated after turn {}: {:?}",
            turn,
            violations
        );
    }
});
