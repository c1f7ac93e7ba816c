//! A single game session and its turn pipeline.
//!
//! The session owns every piece of mutable state (grid, tile pool, deck,
//! clock, player) and is threaded explicitly through each call. Choices are
//! requested from a [`Frontend`]; invalid answers are re-requested until a
//! valid one arrives.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::data::GameData;
use crate::error::ConfigError;
use crate::game::{
    BlockedMove, CHAINSAW, DEFAULT_RESHUFFLE_DISCARD, DevCard, DevCardDeck, Direction, EventKind,
    Frontend, GASOLINE, GameClock, Grid, ItemCombo, Player, Prompt, RESERVING_TILE, RITUAL_TILE,
    Step, TOTEM_TILE, Tile, TileFeature, TilePool, Wall, classify, is_dead_end, move_player,
    resolve_combat, tally,
};

/// Health at or below which the player may cower instead of facing an event.
pub const LOW_HEALTH: i32 = 2;
/// Health regained by cowering.
pub const COWER_HEAL: i32 = 3;
/// Health lost when running from zombies.
pub const RUN_PENALTY: i32 = 1;
/// Zombies that pour through a broken wall.
pub const ZOMBIE_DOOR_HORDE: u32 = 3;

/// Tunable rules for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Seed for every shuffle in the session.
    pub seed: u64,
    /// Health at the start.
    pub starting_health: i32,
    /// Attack points with no items.
    pub base_attack: i32,
    /// Chainsaw uses before it breaks.
    pub chainsaw_uses: u32,
    /// Card ids dropped at each reshuffle.
    pub reshuffle_discard: usize,
    /// Item whose possession restores health on every attack recount.
    pub health_item: String,
    /// Health restored per health item.
    pub health_item_bonus: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            starting_health: 6,
            base_attack: 1,
            chainsaw_uses: 2,
            reshuffle_discard: DEFAULT_RESHUFFLE_DISCARD,
            health_item: "Can of Soda".to_string(),
            health_item_bonus: 2,
        }
    }
}

impl SessionConfig {
    /// Default rules with the given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

/// Stage of the burial ritual that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RitualStage {
    /// The player died on the first card.
    First,
    /// The player died, or time ran out, on the second card.
    Second,
}

/// Why the session was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossCause {
    /// Health reached zero.
    Died,
    /// The clock passed eleven.
    OutOfTime,
    /// The burial ritual failed.
    RitualFailed(RitualStage),
}

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The totem was buried in time.
    Won,
    /// The session was lost.
    Lost(LossCause),
}

impl Outcome {
    /// Whether the player won.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Outcome::Won)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Won => f.write_str("You buried the totem before midnight. You win!"),
            Outcome::Lost(LossCause::Died) => f.write_str("You have died. Game over."),
            Outcome::Lost(LossCause::OutOfTime) => {
                f.write_str("Midnight strikes and the dead overrun the house. Game over.")
            }
            Outcome::Lost(LossCause::RitualFailed(RitualStage::First)) => {
                f.write_str("You fell before the ritual could begin. Game over.")
            }
            Outcome::Lost(LossCause::RitualFailed(RitualStage::Second)) => {
                f.write_str("The ritual was never finished. Game over.")
            }
        }
    }
}

/// One game from start to finish.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    grid: Grid,
    pool: TilePool,
    deck: DevCardDeck,
    clock: GameClock,
    player: Player,
    chainsaw_uses: u32,
    outcome: Option<Outcome>,
}

impl Session {
    /// Start a new session: shuffle the tiles and the deck and place the
    /// starting tile at the origin.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the data does not satisfy the rules.
    pub fn new(data: GameData, config: SessionConfig) -> Result<Self, ConfigError> {
        data.validate(config.reshuffle_discard)?;
        let GameData {
            indoor,
            outdoor,
            cards,
        } = data;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let (pool, start) = TilePool::build(indoor, outdoor, &mut rng)?;
        let deck = DevCardDeck::new(cards, rng.r#gen(), config.reshuffle_discard);

        let grid = Grid::with_start(start);
        let player = Player::new(config.starting_health, config.base_attack);
        let chainsaw_uses = config.chainsaw_uses;
        info!(seed = config.seed, "session started");
        Ok(Self {
            config,
            grid,
            pool,
            deck,
            clock: GameClock::default(),
            player,
            chainsaw_uses,
            outcome: None,
        })
    }

    /// Rules in effect.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Placed tiles.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Placed tiles, for setting up scenarios. Placement never overwrites.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Tiles not placed yet.
    #[must_use]
    pub fn pool(&self) -> &TilePool {
        &self.pool
    }

    /// The development deck.
    #[must_use]
    pub fn deck(&self) -> &DevCardDeck {
        &self.deck
    }

    /// The clock.
    #[must_use]
    pub fn clock(&self) -> GameClock {
        self.clock
    }

    /// The clock, for setting up scenarios.
    pub fn clock_mut(&mut self) -> &mut GameClock {
        &mut self.clock
    }

    /// The player.
    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The player, for setting up scenarios.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Chainsaw uses left.
    #[must_use]
    pub const fn chainsaw_uses(&self) -> u32 {
        self.chainsaw_uses
    }

    /// How the session ended, if it has.
    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Whether the session has reached a terminal state.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Tile under the player.
    #[must_use]
    pub fn current_tile(&self) -> Option<&Tile> {
        self.grid.get(self.player.position)
    }

    /// Tile the player stood on before the last move.
    #[must_use]
    pub fn previous_tile(&self) -> Option<&Tile> {
        self.grid.get(self.player.previous?)
    }

    /// Open sides of the current tile.
    #[must_use]
    pub fn exits(&self) -> Vec<Direction> {
        self.current_tile()
            .map(|t| t.exits().collect())
            .unwrap_or_default()
    }

    /// Play one turn in `direction`.
    ///
    /// Returns the outcome once the session is over, `None` while it goes on.
    ///
    /// # Errors
    ///
    /// A rejected move returns its [`BlockedMove`] cause. Nothing changes and
    /// the turn is not consumed.
    pub fn take_turn<F: Frontend + ?Sized>(
        &mut self,
        direction: Direction,
        io: &mut F,
    ) -> Result<Option<Outcome>, BlockedMove> {
        if self.outcome.is_some() {
            return Ok(self.outcome);
        }

        if self.deck.refill_if_empty(&mut self.clock) {
            self.announce_hour(io);
        }
        if self.clock.is_overrun() {
            self.finish(Outcome::Lost(LossCause::OutOfTime), io);
            return Ok(self.outcome);
        }

        let step = match move_player(&mut self.grid, &mut self.pool, &mut self.player, direction)
        {
            Ok(step) => step,
            Err(cause) => {
                io.show(&format!("You cannot go {direction}: {cause}."));
                return Err(cause);
            }
        };
        self.announce_step(step, io);

        self.handle_tile_feature(io);
        if self.settle(io) {
            return Ok(self.outcome);
        }

        self.check_dead_end(io);
        if self.settle(io) {
            return Ok(self.outcome);
        }

        if let Some(card) = self.draw_card(io) {
            self.resolve_card(&card, io);
        }
        if self.settle(io) {
            return Ok(self.outcome);
        }

        self.seek_totem(io);
        if self.settle(io) {
            return Ok(self.outcome);
        }

        self.offer_patio(io);
        self.attempt_ritual(io);
        self.settle(io);
        Ok(self.outcome)
    }

    /// Resolve the event of `card` for the current hour.
    ///
    /// Hour twelve has no events. A badly hurt player may cower first, which
    /// heals, burns a card and skips the event.
    pub fn resolve_card<F: Frontend + ?Sized>(&mut self, card: &DevCard, io: &mut F) {
        let hour = self.clock.hour();
        let Some(event) = card.event_at(hour) else {
            return;
        };
        io.show(&format!("{hour}:00 - {event}"));

        if self.player.health <= LOW_HEALTH
            && ask(io, &Prompt::CowerOrContinue, &["cower", "continue"]) == "cower"
        {
            self.cower(io);
            return;
        }

        match classify(event) {
            EventKind::Combat { zombies } => self.zombie_attack(zombies, io),
            EventKind::HealthDelta(delta) => {
                let health = self.player.modify_health(delta);
                io.show(&format!("Your health is now {health}."));
            }
            EventKind::ItemDraw => self.offer_item_draw(io),
            EventKind::Generic => {}
        }
    }

    /// Bury the totem if standing on the ritual tile with it.
    ///
    /// The ritual draws and resolves one card, then a second if the player
    /// survived. It wins only if the player is alive and time remains.
    pub fn attempt_ritual<F: Frontend + ?Sized>(&mut self, io: &mut F) {
        if self.outcome.is_some() || !self.player.has_totem || !self.on_tile(RITUAL_TILE) {
            return;
        }
        if ask(io, &Prompt::BuryTotem, &["y", "n"]) != "y" {
            io.show("You hold on to the totem for now.");
            return;
        }

        io.show("You start digging...");
        if let Some(card) = self.draw_card(io) {
            self.resolve_card(&card, io);
        }
        if self.player.is_dead() {
            self.finish(Outcome::Lost(LossCause::RitualFailed(RitualStage::First)), io);
            return;
        }

        if let Some(card) = self.draw_card(io) {
            self.resolve_card(&card, io);
        }
        if self.player.is_dead() || self.clock.is_overrun() {
            self.finish(Outcome::Lost(LossCause::RitualFailed(RitualStage::Second)), io);
        } else {
            self.finish(Outcome::Won, io);
        }
    }

    /// Multi-line status: time, health, attack, tiles, items and the map.
    #[must_use]
    pub fn status(&self) -> String {
        let mut out = format!(
            "Time: {}:00 | Health: {} | Attack: {}\n",
            self.clock.hour(),
            self.player.health,
            self.player.attack
        );
        if let Some(tile) = self.current_tile() {
            out.push_str(&format!("Current tile: {}\n", tile.name));
        }
        if let Some(tile) = self.previous_tile() {
            out.push_str(&format!("Previous tile: {}\n", tile.name));
        }
        if !self.player.items.is_empty() {
            out.push_str(&format!("Items: {}\n", self.player.items.join(", ")));
        }
        out.push_str(&self.grid.render());
        out
    }

    fn on_tile(&self, name: &str) -> bool {
        self.current_tile().is_some_and(|t| t.is_named(name))
    }

    /// Check the terminal conditions. Returns whether the session is over.
    fn settle<F: Frontend + ?Sized>(&mut self, io: &mut F) -> bool {
        if self.outcome.is_some() {
            return true;
        }
        if self.player.is_dead() {
            self.finish(Outcome::Lost(LossCause::Died), io);
        } else if self.clock.is_overrun() {
            self.finish(Outcome::Lost(LossCause::OutOfTime), io);
        }
        self.outcome.is_some()
    }

    fn finish<F: Frontend + ?Sized>(&mut self, outcome: Outcome, io: &mut F) {
        info!(?outcome, hour = self.clock.hour(), health = self.player.health, "session over");
        self.outcome = Some(outcome);
        io.show(&outcome.to_string());
    }

    fn announce_hour<F: Frontend + ?Sized>(&self, io: &mut F) {
        io.show(&format!(
            "The deck runs out and is reshuffled. It is now {}:00.",
            self.clock.hour()
        ));
    }

    fn announce_step<F: Frontend + ?Sized>(&self, step: Step, io: &mut F) {
        let Some(tile) = self.current_tile() else {
            return;
        };
        if step.drew_tile {
            io.show(&format!("You discover the {}.", tile.name));
        } else {
            io.show(&format!("You enter the {}.", tile.name));
        }
        let exits: Vec<&str> = tile.exits().map(Direction::name).collect();
        io.show(&format!("Exits: {}", exits.join(", ")));
    }

    fn draw_card<F: Frontend + ?Sized>(&mut self, io: &mut F) -> Option<DevCard> {
        let hour = self.clock.hour();
        let card = self.deck.draw(&mut self.clock).cloned();
        if self.clock.hour() != hour {
            self.announce_hour(io);
        }
        card
    }

    fn cower<F: Frontend + ?Sized>(&mut self, io: &mut F) {
        let health = self.player.modify_health(COWER_HEAL);
        io.show(&format!("You cower in fear and recover. Health: {health}."));
        let hour = self.clock.hour();
        self.deck.skip(&mut self.clock);
        if self.clock.hour() == hour {
            io.show("Time passes while you hide.");
        } else {
            self.announce_hour(io);
        }
    }

    fn zombie_attack<F: Frontend + ?Sized>(&mut self, zombies: u32, io: &mut F) {
        if ask(io, &Prompt::FightOrRun { zombies }, &["fight", "run"]) == "run" {
            self.run_away(io);
            let health = self.player.modify_health(-RUN_PENALTY);
            io.show(&format!("You lose {RUN_PENALTY} health escaping. Health: {health}."));
            return;
        }

        self.use_items(io);
        let report = resolve_combat(&mut self.player, zombies);
        match report.combo {
            Some(combo) => {
                let [a, b] = combo.items();
                io.show(&format!("The {a} and {b} set the horde ablaze. No damage taken."));
            }
            None if report.damage > 0 => io.show(&format!(
                "You take {} damage. Health: {}.",
                report.damage, self.player.health
            )),
            None => io.show("You fight them off without a scratch."),
        }
        self.refresh_attack();
    }

    fn run_away<F: Frontend + ?Sized>(&mut self, io: &mut F) {
        if self.player.visited.is_empty() {
            io.show("There is nowhere to run to.");
            return;
        }
        let tiles: Vec<String> = self
            .player
            .visited
            .iter()
            .map(|p| self.grid.get(*p).map_or_else(|| p.to_string(), |t| t.name.clone()))
            .collect();
        let choices: Vec<String> = (1..=tiles.len()).map(|i| i.to_string()).collect();
        let choice_refs: Vec<&str> = choices.iter().map(String::as_str).collect();
        let answer = ask(io, &Prompt::RunAwayTo { tiles }, &choice_refs);

        let target = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.player.visited.get(i).copied());
        if let Some(target) = target {
            self.player.retreat_to(target);
            let name = self.current_tile().map_or("somewhere", |t| t.name.as_str());
            io.show(&format!("You flee to the {name}."));
        }
    }

    /// Offer item usage before a fight.
    fn use_items<F: Frontend + ?Sized>(&mut self, io: &mut F) {
        if self.player.holds(GASOLINE) && self.player.holds(CHAINSAW) {
            if ask(io, &Prompt::FuelChainsaw, &["y", "n"]) == "y" {
                self.chainsaw_uses += 2;
                self.player.remove_item(GASOLINE);
                io.show(&format!(
                    "The Chainsaw roars. Uses left: {}.",
                    self.chainsaw_uses
                ));
                return;
            }
        } else if let Some(combo) = ItemCombo::available(&self.player)
            && ask(io, &Prompt::ConfirmCombo(combo), &["y", "n"]) == "y"
        {
            return;
        }

        match self.player.items.as_slice() {
            [item] => {
                let prompt = Prompt::UseItem { item: item.clone() };
                if ask(io, &prompt, &["y", "n"]) == "y" {
                    self.use_item(0, io);
                } else {
                    io.show("You fight bare-handed.");
                }
            }
            [first, second] => {
                let prompt = Prompt::ChooseItem {
                    first: first.clone(),
                    second: second.clone(),
                };
                match ask(io, &prompt, &["1", "2", "none"]).as_str() {
                    "1" => self.use_item(0, io),
                    "2" => self.use_item(1, io),
                    _ => io.show("You fight bare-handed."),
                }
            }
            _ => {}
        }
    }

    fn use_item<F: Frontend + ?Sized>(&mut self, index: usize, io: &mut F) {
        let Some(item) = self.player.items.get(index).cloned() else {
            return;
        };
        if item == CHAINSAW {
            self.chainsaw_uses = self.chainsaw_uses.saturating_sub(1);
            io.show(&format!(
                "You swing the Chainsaw. Uses left: {}.",
                self.chainsaw_uses
            ));
            if self.chainsaw_uses == 0 {
                self.player.remove_item(CHAINSAW);
                io.show("The Chainsaw sputters out for good.");
            }
        } else {
            self.player.items.remove(index);
            io.show(&format!("You use the {item}."));
        }
    }

    fn offer_item_draw<F: Frontend + ?Sized>(&mut self, io: &mut F) {
        if ask(io, &Prompt::DrawItem, &["y", "n"]) != "y" {
            io.show("You leave it.");
            return;
        }
        if let Some(card) = self.draw_card(io) {
            io.show(&format!(
                "You find: {} (+{} attack).",
                card.item, card.attack_points
            ));
            self.acquire_item(card.item, io);
        }
    }

    /// Add an item, forcing a replacement at three, then recount attack.
    ///
    /// The recount also applies the health-item bonus for every such item
    /// held.
    fn acquire_item<F: Frontend + ?Sized>(&mut self, item: String, io: &mut F) {
        self.player.items.push(item);
        if let [first, second, new] = self.player.items.as_slice() {
            let prompt = Prompt::ReplaceItem {
                first: first.clone(),
                second: second.clone(),
                new: new.clone(),
            };
            let drop_index = match ask(io, &prompt, &["1", "2", "3"]).as_str() {
                "1" => 0,
                "2" => 1,
                _ => 2,
            };
            let dropped = self.player.items.remove(drop_index);
            io.show(&format!("You leave the {dropped} behind."));
        }

        let tally = tally(
            &self.player.items,
            self.deck.cards(),
            self.config.base_attack,
            &self.config.health_item,
        );
        for item in &tally.unknown {
            warn!(%item, "held item is not granted by any card");
            io.show(&format!("{item} is not a known item."));
        }
        if tally.health_items > 0 {
            let bonus = self
                .config
                .health_item_bonus
                .saturating_mul(i32::try_from(tally.health_items).unwrap_or(i32::MAX));
            let health = self.player.modify_health(bonus);
            io.show(&format!("The {} refreshes you. Health: {health}.", self.config.health_item));
        }
        self.player.attack = tally.attack;
        io.show(&format!("Attack points: {}.", self.player.attack));
    }

    /// Recount attack from held items without side effects.
    fn refresh_attack(&mut self) {
        self.player.attack = tally(
            &self.player.items,
            self.deck.cards(),
            self.config.base_attack,
            &self.config.health_item,
        )
        .attack;
    }

    fn handle_tile_feature<F: Frontend + ?Sized>(&mut self, io: &mut F) {
        let Some(tile) = self.current_tile() else {
            return;
        };
        let (feature, special) = (tile.feature(), tile.special.clone());
        match feature {
            Some(TileFeature::HealOnTurnEnd) => {
                let health = self.player.modify_health(1);
                io.show(&format!("The room steadies you. Health: {health}."));
            }
            Some(TileFeature::ItemSearch) => {
                io.show("Something might be hidden here.");
                self.offer_item_draw(io);
                if let Some(tile) = self.grid.get_mut(self.player.position) {
                    tile.special = None;
                }
            }
            Some(TileFeature::Flavor) => {
                if let Some(text) = special {
                    io.show(&text);
                }
            }
            None => {}
        }
    }

    fn check_dead_end<F: Frontend + ?Sized>(&mut self, io: &mut F) {
        if !is_dead_end(&self.grid, self.player.position) {
            return;
        }
        if ask(io, &Prompt::ZombieDoor, &["y", "n"]) == "y" {
            self.break_wall(io);
        } else {
            io.show("You stay put and listen to the scratching.");
        }
    }

    fn break_wall<F: Frontend + ?Sized>(&mut self, io: &mut F) {
        let blocked: Vec<Direction> = self
            .current_tile()
            .map(|t| {
                Direction::ALL
                    .into_iter()
                    .filter(|d| !t.is_open(*d))
                    .collect()
            })
            .unwrap_or_default();
        if blocked.is_empty() {
            io.show("There is no wall left to break.");
            return;
        }

        let choices: Vec<String> = blocked.iter().map(|d| (d.index() + 1).to_string()).collect();
        let choice_refs: Vec<&str> = choices.iter().map(String::as_str).collect();
        let answer = ask(io, &Prompt::BreakWall, &choice_refs);
        let side = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(Direction::from_index);
        let (Some(side), Some(tile)) = (side, self.grid.get_mut(self.player.position)) else {
            return;
        };
        tile.set_wall(side, Wall::Open);
        io.show(&format!("Zombies smash through the {side} wall!"));

        let report = resolve_combat(&mut self.player, ZOMBIE_DOOR_HORDE);
        if report.damage > 0 {
            io.show(&format!(
                "You take {} damage. Health: {}.",
                report.damage, self.player.health
            ));
        }
        self.refresh_attack();
    }

    fn seek_totem<F: Frontend + ?Sized>(&mut self, io: &mut F) {
        if self.player.has_totem || !self.on_tile(TOTEM_TILE) {
            return;
        }
        io.show("You search the temple for the totem...");
        if let Some(card) = self.draw_card(io) {
            self.resolve_card(&card, io);
        }
        if !self.player.is_dead() {
            self.player.take_totem();
            io.show("You found the totem!");
        }
    }

    fn offer_patio<F: Frontend + ?Sized>(&mut self, io: &mut F) {
        if !self.player.has_totem || !self.on_tile(RESERVING_TILE) || self.pool.reserved().is_none()
        {
            return;
        }
        if ask(io, &Prompt::PlacePatio, &["y", "n"]) != "y" {
            io.show("You leave the way outside closed.");
            return;
        }

        let target = self.player.position.step(Direction::Up);
        if self.grid.contains(target) {
            warn!(%target, "connector slot already occupied");
            io.show("Something already stands where the Patio would go.");
            return;
        }
        let Some(patio) = self.pool.take_reserved() else {
            return;
        };
        if let Err(patio) = self.grid.place(target, patio) {
            self.pool.restore_reserved(patio);
            return;
        }
        if let Some(room) = self.grid.get_mut(self.player.position) {
            room.set_wall(Direction::Up, Wall::Open);
        }
        io.show("You open the way to the Patio.");
    }
}

/// Ask until the answer (trimmed, lowercased) is one of `choices`.
fn ask<F: Frontend + ?Sized>(io: &mut F, prompt: &Prompt, choices: &[&str]) -> String {
    let owned: Vec<String> = choices.iter().map(|c| (*c).to_string()).collect();
    loop {
        let answer = io.decide(prompt, &owned).trim().to_lowercase();
        if owned.contains(&answer) {
            return answer;
        }
        io.show(&format!("Please answer one of: {}.", owned.join(", ")));
    }
}
