//! Snapshot file tests.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use tempfile::{NamedTempFile, tempdir};

use zimp::game::{
    DecisionProvider, Direction, DisplaySink, Prompt, Session, SessionConfig, Snapshot,
};
use zimp::{GameData, SnapshotError};

struct FirstChoice;

impl DecisionProvider for FirstChoice {
    fn decide(&mut self, _prompt: &Prompt, choices: &[String]) -> String {
        choices[0].clone()
    }
}

impl DisplaySink for FirstChoice {
    fn show(&mut self, _line: &str) {}
}

fn played_session() -> Session {
    let mut session =
        Session::new(GameData::builtin().unwrap(), SessionConfig::with_seed(21)).unwrap();
    for direction in [Direction::Up, Direction::Up, Direction::Left, Direction::Right] {
        if session.is_over() {
            break;
        }
        let _ = session.take_turn(direction, &mut FirstChoice);
    }
    session
}

#[test]
fn test_snapshot_save_load_roundtrip() {
    let session = played_session();
    let snapshot = session.snapshot();

    let temp_file = NamedTempFile::new().expect("create temp file");
    snapshot.write(temp_file.path()).expect("save snapshot");
    let loaded = Snapshot::read(temp_file.path()).expect("load snapshot");

    assert_eq!(loaded, snapshot);
    assert_eq!(loaded.time, session.clock().hour());
    assert_eq!(loaded.grid.len(), session.grid().len());
    assert_eq!(loaded.player.health, session.player().health);
}

#[test]
fn test_snapshot_is_pretty_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("save.json");
    played_session().snapshot().write(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains('\n'));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(value["player"]["current_tile"].is_string());
    assert_eq!(value["grid"]["(0, 0)"], "Foyer");
}

#[test]
fn test_snapshot_overwrites() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("save.json");
    let fresh =
        Session::new(GameData::builtin().unwrap(), SessionConfig::with_seed(21)).unwrap();
    fresh.snapshot().write(&path).unwrap();
    let played = played_session();
    played.snapshot().write(&path).unwrap();

    assert_eq!(Snapshot::read(&path).unwrap(), played.snapshot());
}

#[test]
fn test_read_errors() {
    let dir = tempdir().unwrap();
    let missing = Snapshot::read(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(missing, SnapshotError::Io(_)));

    let garbage = dir.path().join("garbage.json");
    std::fs::write(&garbage, "{ not json").unwrap();
    let bad = Snapshot::read(&garbage).unwrap_err();
    assert!(matches!(bad, SnapshotError::Json(_)));
}
