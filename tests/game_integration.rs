//! Integration tests for complete game scenarios.
//!
//! These drive sessions through the public API with scripted answers.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use zimp::GameData;
use zimp::game::{
    BlockedMove, DevCard, Direction, Environment, GameClock, LossCause, Outcome, Position,
    Prompt, RitualStage, ScriptedFrontend, Session, SessionConfig, Tile, Wall, check_invariants,
};

fn card(id: u32, events: [&str; 3], item: &str, attack_points: i32) -> DevCard {
    DevCard {
        id,
        events: events.map(str::to_string),
        item: item.to_string(),
        attack_points,
    }
}

fn quiet_cards(n: u32) -> Vec<DevCard> {
    (1..=n)
        .map(|id| card(id, ["Quiet night", "Quiet night", "Quiet night"], "Oil", 0))
        .collect()
}

fn data(indoor: Vec<Tile>, outdoor: Vec<Tile>, cards: Vec<DevCard>) -> GameData {
    GameData {
        indoor,
        outdoor,
        cards,
    }
}

fn foyer() -> Tile {
    Tile::from_bits(1, "Foyer", Environment::Indoor, [1, 0, 1, 1])
}

fn patio() -> Tile {
    Tile::from_bits(2, "Patio", Environment::Outdoor, [1, 0, 0, 0])
}

fn graveyard() -> Tile {
    Tile::from_bits(3, "Graveyard", Environment::Outdoor, [1, 0, 0, 0])
}

/// A session standing on the Graveyard with the totem at the given hour.
fn at_graveyard(cards: Vec<DevCard>, hour: u8) -> Session {
    let mut session = Session::new(
        data(vec![foyer()], vec![patio()], cards),
        SessionConfig::with_seed(17),
    )
    .unwrap();
    session.grid_mut().place(Position::new(0, 1), graveyard()).unwrap();
    let player = session.player_mut();
    player.position = Position::new(0, 1);
    player.has_totem = true;
    *session.clock_mut() = GameClock::at(hour);
    session
}

#[test]
fn test_run_from_zombies_costs_one_health() {
    let mut session = Session::new(
        data(
            vec![foyer(), Tile::from_bits(4, "Kitchen", Environment::Indoor, [0; 4])],
            vec![patio()],
            quiet_cards(9),
        ),
        SessionConfig::with_seed(1),
    )
    .unwrap();
    let mut io = ScriptedFrontend::default();
    session.take_turn(Direction::Up, &mut io).unwrap();
    assert_eq!(session.player().health, 6);

    let mut io = ScriptedFrontend::new(["run", "1"]);
    let zombies = card(20, ["3 Zombies", "", ""], "Oil", 0);
    session.resolve_card(&zombies, &mut io);

    assert_eq!(session.player().health, 5);
    assert!(matches!(io.asked[1], Prompt::RunAwayTo { .. }));
    assert_eq!(session.player().position, Position::new(0, 1));
}

#[test]
fn test_run_with_nowhere_to_go() {
    let mut session = Session::new(
        data(vec![foyer()], vec![patio()], quiet_cards(9)),
        SessionConfig::with_seed(1),
    )
    .unwrap();
    let mut io = ScriptedFrontend::new(["RUN"]);
    session.resolve_card(&card(20, ["3 Zombies", "", ""], "Oil", 0), &mut io);
    assert_eq!(session.player().health, 5);
    assert!(io.saw("nowhere to run"));
}

#[test]
fn test_candybar_heals() {
    let mut session = Session::new(
        data(vec![foyer()], vec![patio()], quiet_cards(9)),
        SessionConfig::with_seed(2),
    )
    .unwrap();
    let mut io = ScriptedFrontend::default();
    let candy = card(20, ["Candybar in your pocket. +1 HEALTH", "", ""], "Oil", 0);
    session.resolve_card(&candy, &mut io);
    assert_eq!(session.player().health, 7);
}

#[test]
fn test_ritual_wins_in_time() {
    let mut session = at_graveyard(quiet_cards(9), 11);
    let mut io = ScriptedFrontend::new(["y"]);
    session.attempt_ritual(&mut io);

    assert_eq!(session.outcome(), Some(Outcome::Won));
    assert_eq!(session.clock().hour(), 11);
    assert!(io.saw("You win"));
}

#[test]
fn test_ritual_lost_when_second_draw_strikes_midnight() {
    // Three cards with two discarded leaves one draw before the reshuffle.
    let mut session = at_graveyard(quiet_cards(3), 11);
    assert_eq!(session.deck().remaining(), 1);
    let mut io = ScriptedFrontend::new(["y"]);
    session.attempt_ritual(&mut io);

    assert_eq!(session.clock().hour(), 12);
    assert!(session.player().health > 0);
    assert_eq!(
        session.outcome(),
        Some(Outcome::Lost(LossCause::RitualFailed(RitualStage::Second)))
    );
}

#[test]
fn test_ritual_lost_when_first_draw_kills() {
    let cards = (1..=9)
        .map(|id| card(id, ["9 Zombies", "9 Zombies", "9 Zombies"], "Oil", 0))
        .collect();
    let mut session = at_graveyard(cards, 9);
    let mut io = ScriptedFrontend::new(["y", "fight"]);
    session.attempt_ritual(&mut io);
    assert_eq!(
        session.outcome(),
        Some(Outcome::Lost(LossCause::RitualFailed(RitualStage::First)))
    );
}

#[test]
fn test_ritual_can_be_postponed() {
    let mut session = at_graveyard(quiet_cards(9), 10);
    let mut io = ScriptedFrontend::new(["n"]);
    session.attempt_ritual(&mut io);
    assert!(!session.is_over());
    assert_eq!(session.deck().remaining(), 7);
}

#[test]
fn test_full_game_to_victory() {
    let mut session = Session::new(
        data(vec![foyer()], vec![patio(), graveyard()], quiet_cards(9)),
        SessionConfig::with_seed(5),
    )
    .unwrap();
    let grid = session.grid_mut();
    grid.place(
        Position::new(0, 1),
        Tile::from_bits(50, "Evil Temple", Environment::Indoor, [0; 4]),
    )
    .unwrap();
    grid.place(
        Position::new(1, 1),
        Tile::from_bits(51, "Dining Room", Environment::Indoor, [0; 4]),
    )
    .unwrap();

    let mut io = ScriptedFrontend::new(["y", "y"]);
    assert_eq!(session.take_turn(Direction::Up, &mut io), Ok(None));
    assert!(session.player().has_totem);

    assert_eq!(session.take_turn(Direction::Right, &mut io), Ok(None));
    assert_eq!(
        session.grid().get(Position::new(1, 2)).map(|t| t.name.as_str()),
        Some("Patio")
    );

    assert_eq!(session.take_turn(Direction::Up, &mut io), Ok(None));
    assert_eq!(session.player().position, Position::new(1, 2));

    assert_eq!(session.take_turn(Direction::Up, &mut io), Ok(Some(Outcome::Won)));
    assert_eq!(
        session.current_tile().map(|t| t.name.as_str()),
        Some("Graveyard")
    );
    assert_eq!(io.pending(), 0);
    assert!(check_invariants(&session).is_empty());
}

#[test]
fn test_outdoors_blocked_without_totem() {
    let mut session = Session::new(
        data(vec![foyer()], vec![patio()], quiet_cards(9)),
        SessionConfig::with_seed(5),
    )
    .unwrap();
    session
        .grid_mut()
        .place(
            Position::new(0, 1),
            Tile::from_bits(60, "Garden", Environment::Outdoor, [0; 4]),
        )
        .unwrap();
    let mut io = ScriptedFrontend::default();
    assert_eq!(
        session.take_turn(Direction::Up, &mut io),
        Err(BlockedMove::Environment)
    );
    assert_eq!(session.deck().remaining(), 7);
}

#[test]
fn test_exhausted_pool_blocks_without_cost() {
    let mut session = Session::new(
        data(vec![foyer()], vec![patio()], quiet_cards(9)),
        SessionConfig::with_seed(5),
    )
    .unwrap();
    let mut io = ScriptedFrontend::default();
    assert_eq!(
        session.take_turn(Direction::Up, &mut io),
        Err(BlockedMove::PoolExhausted)
    );
    assert_eq!(session.clock().hour(), 9);
    assert!(session.player().visited.is_empty());
}

#[test]
fn test_deck_exhaustion_advances_time_across_turns() {
    let indoor: Vec<Tile> = std::iter::once(foyer())
        .chain((10..20).map(|id| Tile::from_bits(id, "Hall", Environment::Indoor, [0; 4])))
        .collect();
    let mut session = Session::new(
        data(indoor, vec![patio()], quiet_cards(9)),
        SessionConfig::with_seed(9),
    )
    .unwrap();
    let mut io = ScriptedFrontend::default();
    for _ in 0..7 {
        session.take_turn(Direction::Up, &mut io).unwrap();
    }
    assert_eq!(session.clock().hour(), 9);
    session.take_turn(Direction::Up, &mut io).unwrap();
    assert_eq!(session.clock().hour(), 10);
    assert!(io.saw("It is now 10:00"));
}

#[test]
fn test_zombie_door_breaks_wall() {
    // The Foyer opens only upward, into a closet with no other exit.
    let mut session = Session::new(
        data(
            vec![
                foyer(),
                Tile::from_bits(7, "Closet", Environment::Indoor, [1, 1, 1, 0]),
            ],
            vec![patio()],
            quiet_cards(9),
        ),
        SessionConfig::with_seed(3),
    )
    .unwrap();
    let mut io = ScriptedFrontend::new(["y", "2"]);
    session.take_turn(Direction::Up, &mut io).unwrap();

    let closet = session.grid().get(Position::new(0, 1)).unwrap();
    assert!(closet.is_open(Direction::Up));
    assert_eq!(session.player().health, 4);
    assert!(io.asked.contains(&Prompt::ZombieDoor));
}

/// A session with `room` already placed above the Foyer.
fn with_room_above(room: Tile, cards: Vec<DevCard>) -> Session {
    let mut session = Session::new(
        data(vec![foyer()], vec![patio()], cards),
        SessionConfig::with_seed(11),
    )
    .unwrap();
    session.grid_mut().place(Position::new(0, 1), room).unwrap();
    session
}

#[test]
fn test_kitchen_heals_on_entry() {
    let kitchen = Tile::from_bits(30, "Kitchen", Environment::Indoor, [0; 4])
        .with_special("+1 Health if end turn here.");
    let mut session = with_room_above(kitchen, quiet_cards(9));
    let mut io = ScriptedFrontend::default();
    session.take_turn(Direction::Up, &mut io).unwrap();

    assert_eq!(session.player().health, 7);
    assert!(io.asked.is_empty());
}

#[test]
fn test_storage_search_is_single_use() {
    let storage = Tile::from_bits(31, "Storage", Environment::Indoor, [0; 4])
        .with_special("May draw a new card to find an item.");
    let cards = (1..=9)
        .map(|id| card(id, ["Quiet night", "Quiet night", "Quiet night"], "Machete", 2))
        .collect();
    let mut session = with_room_above(storage, cards);

    let mut io = ScriptedFrontend::new(["y"]);
    session.take_turn(Direction::Up, &mut io).unwrap();
    assert_eq!(io.asked, vec![Prompt::DrawItem]);
    assert_eq!(session.player().items, vec!["Machete".to_string()]);
    assert_eq!(session.player().attack, 3);
    assert_eq!(session.current_tile().unwrap().special, None);

    let mut io = ScriptedFrontend::default();
    session.take_turn(Direction::Down, &mut io).unwrap();
    session.take_turn(Direction::Up, &mut io).unwrap();
    assert!(io.asked.is_empty());
    assert_eq!(session.player().items.len(), 1);
}

#[test]
fn test_dining_room_reblocks_up_on_reentry() {
    let dining = Tile::from_bits(40, "Dining Room", Environment::Indoor, [0; 4]);
    let mut session = with_room_above(dining, quiet_cards(9));
    session.player_mut().has_totem = true;

    let mut io = ScriptedFrontend::new(["y"]);
    session.take_turn(Direction::Up, &mut io).unwrap();
    let room = session.grid().get(Position::new(0, 1)).unwrap();
    assert_eq!(room.wall(Direction::Up), Wall::Open);

    let mut io = ScriptedFrontend::default();
    session.take_turn(Direction::Down, &mut io).unwrap();
    session.take_turn(Direction::Up, &mut io).unwrap();

    let room = session.grid().get(Position::new(0, 1)).unwrap();
    assert_eq!(room.wall(Direction::Up), Wall::Blocked);
    assert_eq!(
        session.grid().get(Position::new(0, 2)).map(|t| t.name.as_str()),
        Some("Patio")
    );
    assert!(io.asked.is_empty());
}

#[test]
fn test_patio_slot_occupied_changes_nothing() {
    let dining = Tile::from_bits(40, "Dining Room", Environment::Indoor, [0; 4]);
    let mut session = with_room_above(dining, quiet_cards(9));
    session
        .grid_mut()
        .place(
            Position::new(0, 2),
            Tile::from_bits(41, "Hall", Environment::Indoor, [0; 4]),
        )
        .unwrap();
    session.player_mut().has_totem = true;

    let mut io = ScriptedFrontend::new(["y"]);
    session.take_turn(Direction::Up, &mut io).unwrap();

    assert!(io.saw("Something already stands where the Patio would go."));
    assert!(session.pool().reserved().is_some());
    let room = session.grid().get(Position::new(0, 1)).unwrap();
    assert_eq!(room.wall(Direction::Up), Wall::Blocked);
    assert_eq!(
        session.grid().get(Position::new(0, 2)).map(|t| t.name.as_str()),
        Some("Hall")
    );
}

#[test]
fn test_declined_item_draw_changes_nothing() {
    let mut session = Session::new(
        data(vec![foyer()], vec![patio()], quiet_cards(9)),
        SessionConfig::with_seed(4),
    )
    .unwrap();
    let mut io = ScriptedFrontend::new(["n"]);
    session.resolve_card(&card(20, ["ITEM", "", ""], "Machete", 2), &mut io);

    assert_eq!(io.asked, vec![Prompt::DrawItem]);
    assert!(session.player().items.is_empty());
    assert_eq!(session.player().attack, 1);
    assert_eq!(session.player().health, 6);
    assert_eq!(session.deck().remaining(), 7);
}
