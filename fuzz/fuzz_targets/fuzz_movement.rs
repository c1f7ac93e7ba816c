#![no_main]

//! Movement fuzzer.
//!
//! Builds a pool from fuzzer-chosen wall layouts and walks it with raw
//! `move_player` calls, checking that placed tiles are never replaced and
//! that a rejected move leaves the player where it was.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::StdRng;
use zimp::game::{Direction, Environment, Grid, Player, Position, Tile, TilePool, move_player};

/// Structured input for movement fuzzing.
#[derive(Arbitrary, Debug)]
struct MovementInput {
    /// Wall bits for the indoor tiles (bit i set means wall i is blocked).
    indoor: Vec<u8>,
    /// Wall bits for the outdoor tiles.
    outdoor: Vec<u8>,
    /// Moves as direction indices.
    moves: Vec<u8>,
    /// Whether the player holds the totem.
    has_totem: bool,
    /// Shuffle seed.
    seed: u64,
}

fn bits(mask: u8) -> [u8; 4] {
    [mask & 1, (mask >> 1) & 1, (mask >> 2) & 1, (mask >> 3) & 1]
}

fuzz_target!(|input: MovementInput| {
    let mut indoor = vec![Tile::from_bits(0, "Foyer", Environment::Indoor, [1, 0, 1, 1])];
    let mut next_id = 1;
    for mask in input.indoor.into_iter().take(32) {
        indoor.push(Tile::from_bits(next_id, "Room", Environment::Indoor, bits(mask)));
        next_id += 1;
    }
    let mut outdoor = vec![Tile::from_bits(next_id, "Patio", Environment::Outdoor, [1, 0, 0, 0])];
    next_id += 1;
    for mask in input.outdoor.into_iter().take(32) {
        outdoor.push(Tile::from_bits(next_id, "Yard", Environment::Outdoor, bits(mask)));
        next_id += 1;
    }

    let mut rng = StdRng::seed_from_u64(input.seed);
    let Ok((mut pool, start)) = TilePool::build(indoor, outdoor, &mut rng) else {
        return;
    };
    let mut grid = Grid::new();
    if grid.place(Position::ORIGIN, start).is_err() {
        return;
    }
    if let Some(patio) = pool.take_reserved() {
        let _ = grid.place(Position::new(0, 1), patio);
    }

    let mut player = Player::new(6, 1);
    player.has_totem = input.has_totem;

    for raw in input.moves.into_iter().take(200) {
        let Some(direction) = Direction::from_index(usize::from(raw % 4)) else {
            continue;
        };
        let before: Vec<(Position, u32)> = grid.iter().map(|(p, t)| (p, t.id)).collect();
        let from = player.position;

        match move_player(&mut grid, &mut pool, &mut player, direction) {
            Ok(step) => {
                assert_eq!(step.from, from);
                assert_eq!(player.position, from.step(direction));
                assert!(grid.contains(player.position));
            }
            Err(_) => assert_eq!(player.position, from),
        }

        for (position, id) in before {
            assert_eq!(grid.get(position).map(|t| t.id), Some(id));
        }
    }
});
