//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::World;
use tracing::{debug, info, warn};

use rampart_core::commands::PlayerCommand;
use rampart_core::components::Tower;
use rampart_core::config::GameConfig;
use rampart_core::constants::MAX_TIME_SCALE;
use rampart_core::enums::{GamePhase, SpellKind, TowerKind};
use rampart_core::error::ConfigError;
use rampart_core::events::GameEvent;
use rampart_core::level::LevelDefinition;
use rampart_core::state::*;
use rampart_core::types::{CellCoord, Path, SimTime};

use crate::economy::{self, Economy};
use crate::placement::PlacementMap;
use crate::scenario;
use crate::spellbook::SpellBook;
use crate::systems;
use crate::systems::castle::CastleZone;
use crate::systems::visibility::Lighting;
use crate::systems::wave_spawner::WaveState;
use crate::systems::waves::WaveOutcome;
use crate::world_setup;

/// How the engine turns host frames into simulation steps.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Run fixed steps of this length from an accumulator. `None` runs one
    /// step per `update` call with the caller's `dt`.
    pub fixed_step_secs: Option<f64>,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_step_secs: None,
            time_scale: 1.0,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: GameConfig,
    level: LevelDefinition,
    path: Path,
    placement: PlacementMap,
    time: SimTime,
    phase: GamePhase,
    paused: bool,
    time_scale: f64,
    fixed_step_secs: Option<f64>,
    accumulator: f64,
    economy: Economy,
    spells: SpellBook,
    wave: WaveState,
    cursor: Option<DVec2>,
    next_enemy_id: u32,
    next_tower_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create an engine for `level`. Fails if the config or level is invalid.
    pub fn new(
        config: GameConfig,
        level: LevelDefinition,
        sim: SimConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let path = level.validate(config.grid.columns, config.grid.rows)?;
        if let Some(step) = sim.fixed_step_secs {
            if !step.is_finite() || step <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "fixed_step_secs".to_string(),
                    reason: format!("{step} must be finite and positive"),
                });
            }
        }

        let placement = PlacementMap::new(
            &path,
            &level.safe_zone,
            config.grid.tile_size,
            config.grid.columns,
            config.grid.rows,
        );
        let economy = Economy::new(&config.economy, &config.towers);
        let wave = WaveState::new(level.max_wave());

        info!(
            level = %level.name,
            waves = wave.max_wave,
            path_length = path.total_length(),
            "level loaded"
        );

        Ok(Self {
            world: World::new(),
            config,
            level,
            path,
            placement,
            time: SimTime::default(),
            phase: GamePhase::default(),
            paused: false,
            time_scale: sim.time_scale.clamp(0.0, MAX_TIME_SCALE),
            fixed_step_secs: sim.fixed_step_secs,
            accumulator: 0.0,
            economy,
            spells: SpellBook::default(),
            wave,
            cursor: None,
            next_enemy_id: 0,
            next_tower_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Engine on the built-in level.
    pub fn with_default_level(config: GameConfig, sim: SimConfig) -> Result<Self, ConfigError> {
        Self::new(config, scenario::default_level(), sim)
    }

    /// Queue a player command for processing at the next update.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds of host time.
    ///
    /// Negative or non-finite `dt` is treated as zero. Queued commands are
    /// applied first, even when no time passes.
    pub fn update(&mut self, dt: f64) {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!(dt, "ignoring invalid frame step");
            0.0
        };

        self.process_commands();

        if self.paused || self.phase.is_over() {
            return;
        }

        let scaled = dt * self.time_scale;
        match self.fixed_step_secs {
            None => self.step(scaled),
            Some(step) => {
                self.accumulator += scaled;
                while self.accumulator >= step && !self.phase.is_over() {
                    self.accumulator -= step;
                    self.step(step);
                }
            }
        }
    }

    /// Update, then return the snapshot and drain the frame's events.
    pub fn tick(&mut self, dt: f64) -> GameStateSnapshot {
        self.update(dt);
        let mut snapshot = self.snapshot();
        snapshot.events = self.drain_events();
        snapshot
    }

    /// Full read-only view of the game. Pending events are included but
    /// not drained.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.path,
            &self.time,
            self.phase,
            self.paused,
            &self.economy,
            self.wave_view(),
            self.spell_view(),
            self.events.clone(),
        )
    }

    /// Take the events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ---- Accessors ----

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn gold(&self) -> u32 {
        self.economy.gold
    }

    pub fn lives(&self) -> u32 {
        self.economy.lives
    }

    /// Last launched wave, 0 before the first launch.
    pub fn wave_number(&self) -> u32 {
        self.wave.number
    }

    pub fn max_wave(&self) -> u32 {
        self.wave.max_wave
    }

    pub fn wave_resolved(&self) -> bool {
        systems::waves::is_resolved(&self.world, self.wave.number)
    }

    pub fn is_victory(&self) -> bool {
        self.phase == GamePhase::Victory
    }

    pub fn is_defeat(&self) -> bool {
        self.phase == GamePhase::Defeat
    }

    pub fn enemies(&self) -> Vec<EnemyView> {
        systems::snapshot::build_enemies(&self.world, &self.path)
    }

    pub fn towers(&self) -> Vec<TowerView> {
        systems::snapshot::build_towers(&self.world)
    }

    pub fn projectiles(&self) -> Vec<ProjectileView> {
        systems::snapshot::build_projectiles(&self.world)
    }

    pub fn explosions(&self) -> Vec<ExplosionView> {
        systems::snapshot::build_explosions(&self.world)
    }

    /// Current shop price of a tower kind.
    pub fn tower_price(&self, kind: TowerKind) -> u32 {
        self.economy.price_of(kind)
    }

    pub fn vision_level(&self) -> u32 {
        self.spells.vision_level
    }

    pub fn fairy_active(&self) -> bool {
        self.spells
            .fairy_active(self.time.elapsed_secs, &self.config.spells)
    }

    pub fn cursor(&self) -> Option<DVec2> {
        self.cursor
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Cells no tower may stand on, sorted.
    pub fn banned_cells(&self) -> Vec<CellCoord> {
        self.placement.banned_cells()
    }

    /// Cells that are neither banned nor occupied, sorted.
    pub fn free_cells(&self) -> Vec<CellCoord> {
        self.placement.free_cells()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    // ---- Player actions ----

    /// Move the cursor; `None` when it leaves the board.
    pub fn set_cursor(&mut self, cursor: Option<DVec2>) {
        self.cursor = cursor.filter(|c| c.is_finite());
    }

    /// Buy a tower and place it on `cell`. No state changes on rejection.
    pub fn try_place_tower(&mut self, cell: CellCoord, kind: TowerKind) -> bool {
        if self.phase.is_over() {
            debug!(?cell, ?kind, "placement rejected: game over");
            return false;
        }
        let price = self.economy.price_of(kind);
        if let Err(reason) = self.placement.check(cell, price, self.economy.gold) {
            debug!(?cell, ?kind, %reason, "placement rejected");
            return false;
        }
        if !self.economy.spend(price) {
            return false;
        }

        let id = self.next_tower_id;
        self.next_tower_id += 1;
        let tower = world_setup::spawn_tower(
            &mut self.world,
            id,
            kind,
            cell,
            self.config.towers.get(kind),
            self.config.grid.tile_size,
            price,
        );
        self.placement.occupy(cell, tower);
        self.economy.record_purchase(kind, &self.config.towers);
        self.events.push(GameEvent::TowerPlaced {
            tower_id: id,
            kind,
            cell,
            price,
        });
        true
    }

    /// Sell the tower on `cell`. Returns the refund, 0 if there was none.
    pub fn try_sell_tower(&mut self, cell: CellCoord) -> u32 {
        if self.phase.is_over() {
            return 0;
        }
        let Some(entity) = self.placement.tower_at(cell) else {
            debug!(?cell, "sale rejected: no tower on cell");
            return 0;
        };
        let (id, kind, price_paid) = match self.world.get::<&Tower>(entity) {
            Ok(tower) => (tower.id, tower.kind, tower.price_paid),
            Err(_) => {
                self.placement.vacate(cell);
                return 0;
            }
        };

        self.placement.vacate(cell);
        let _ = self.world.despawn(entity);
        let refund = economy::refund_for(price_paid);
        self.economy.earn(refund);
        self.economy.record_sale(kind, &self.config.towers);
        self.events.push(GameEvent::TowerSold {
            tower_id: id,
            kind,
            refund,
        });
        refund
    }

    /// Pick a spell in the shop. Lightning arms targeting when affordable;
    /// vision and fairy are bought on the spot.
    pub fn try_select_spell(&mut self, kind: SpellKind) -> bool {
        match kind {
            SpellKind::Lightning => {
                let armed = !self.phase.is_over()
                    && self.economy.can_afford(self.config.spells.lightning_price);
                self.spells.lightning_armed = armed;
                armed
            }
            SpellKind::Vision | SpellKind::Fairy => self.try_purchase_spell_level(kind),
        }
    }

    /// Upgrade vision or start the fairy. Lightning has no levels.
    pub fn try_purchase_spell_level(&mut self, kind: SpellKind) -> bool {
        if self.phase.is_over() {
            return false;
        }
        let now = self.time.elapsed_secs;
        let spells = &self.config.spells;

        let price = match kind {
            SpellKind::Vision => match self.spells.vision_upgrade_price(spells) {
                Some(price) => price,
                None => {
                    debug!("vision already at max level");
                    return false;
                }
            },
            SpellKind::Fairy => {
                if self.spells.fairy_active(now, spells) {
                    debug!("fairy already active");
                    return false;
                }
                spells.fairy_price
            }
            SpellKind::Lightning => return false,
        };

        if !self.economy.spend(price) {
            debug!(?kind, price, gold = self.economy.gold, "spell rejected: not enough gold");
            return false;
        }
        match kind {
            SpellKind::Vision => self.spells.vision_level += 1,
            SpellKind::Fairy => self.spells.start_fairy(now),
            SpellKind::Lightning => {}
        }
        self.events.push(GameEvent::SpellPurchased { kind, price });
        true
    }

    /// Cast a targeted spell on `cell`. Only lightning is targeted.
    pub fn try_activate_spell_on_cell(&mut self, kind: SpellKind, cell: CellCoord) -> bool {
        if kind != SpellKind::Lightning || self.phase.is_over() {
            return false;
        }
        let now = self.time.elapsed_secs;
        let spells = &self.config.spells;

        if !self.placement.is_lightning_target(cell) {
            debug!(?cell, "lightning rejected: not a path cell");
            return false;
        }
        if self.spells.strike_active(cell, now, spells) {
            debug!(?cell, "lightning rejected: strike still active on cell");
            return false;
        }
        if !self.economy.spend(spells.lightning_price) {
            debug!(?cell, "lightning rejected: not enough gold");
            return false;
        }

        let hits = systems::spells::lightning_strike(
            &mut self.world,
            cell,
            self.config.grid.tile_size,
            spells.lightning_damage,
        );
        self.spells.record_strike(cell, now);
        self.spells.lightning_armed = false;
        self.events.push(GameEvent::LightningStrike {
            cell,
            enemies_hit: hits,
        });
        true
    }

    /// Launch the next wave. Only allowed once the current wave is resolved
    /// and more waves remain.
    pub fn launch_wave(&mut self) -> bool {
        if self.phase.is_over() {
            return false;
        }
        if !self.wave.has_next() {
            debug!(wave = self.wave.number, "launch rejected: no waves left");
            return false;
        }
        if !self.wave_resolved() {
            debug!(wave = self.wave.number, "launch rejected: wave still running");
            return false;
        }

        let number = self.wave.number + 1;
        let entries = self.level.wave(number);
        let spawned = systems::wave_spawner::populate(
            &mut self.world,
            number,
            &entries,
            &self.config.enemies,
            &self.path,
            &mut self.next_enemy_id,
        );

        self.wave.number = number;
        self.wave.started_at_secs = self.time.elapsed_secs;
        self.wave.reward_paid = false;
        self.wave.night = true;
        self.phase = GamePhase::WaveInProgress;

        info!(wave = number, enemies = spawned, "wave launched");
        self.events.push(GameEvent::WaveLaunched {
            wave: number,
            enemies: spawned,
        });
        true
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::PlaceTower { cell, kind } => {
                self.try_place_tower(cell, kind);
            }
            PlayerCommand::SellTower { cell } => {
                self.try_sell_tower(cell);
            }
            PlayerCommand::SelectSpell { kind } => {
                self.try_select_spell(kind);
            }
            PlayerCommand::CastSpell { kind, cell } => {
                self.try_activate_spell_on_cell(kind, cell);
            }
            PlayerCommand::PurchaseSpell { kind } => {
                self.try_purchase_spell_level(kind);
            }
            PlayerCommand::LaunchWave => {
                self.launch_wave();
            }
            PlayerCommand::MoveCursor { x, y } => {
                self.set_cursor(Some(DVec2::new(x, y)));
            }
            PlayerCommand::ClearCursor => {
                self.set_cursor(None);
            }
            PlayerCommand::Pause => {
                self.paused = true;
            }
            PlayerCommand::Resume => {
                self.paused = false;
            }
            PlayerCommand::SetTimeScale { scale } => {
                if scale.is_finite() {
                    self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
                }
            }
        }
    }

    /// One simulation step of `dt` seconds.
    fn step(&mut self, dt: f64) {
        self.time.advance(dt);
        self.run_systems(dt);
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let now = self.time.elapsed_secs;

        // 1. Wave spawning
        systems::wave_spawner::run(&mut self.world, &self.wave, now);
        // 2. Timers (caster cooldowns, block reactions, explosions)
        systems::timers::run(&mut self.world, dt);
        // 3. Enemy movement
        systems::movement::run(&mut self.world, &self.path, dt);
        // 4. Castle damage (arrivals and castle cells)
        let zone = CastleZone {
            cells: &self.level.castle_cells,
            tile_size: self.config.grid.tile_size,
            columns: self.config.grid.columns,
            rows: self.config.grid.rows,
        };
        systems::castle::run(&mut self.world, &zone, &mut self.economy, &mut self.events);
        // 5. Visibility
        let lighting = Lighting {
            cursor: self.cursor,
            cursor_radius: self.config.vision_radius(self.spells.vision_level),
            reveal_all: self.spells.fairy_active(now, &self.config.spells),
        };
        systems::visibility::run(&mut self.world, &lighting);
        // 6. Fire control (tower attack cycles, interception)
        systems::fire_control::run(
            &mut self.world,
            &self.path,
            &self.config,
            dt,
            &mut self.events,
        );
        // 7. Projectile kinematics
        systems::projectile_kinematics::run(&mut self.world, dt);
        // 8. Impacts and damage
        systems::impact::run(&mut self.world, &self.config, &mut self.events);
        // 9. Spell timers
        systems::spells::run(&mut self.spells, now, &self.config.spells);
        // 10. Bounties
        systems::rewards::run(&mut self.world, &mut self.economy, &mut self.events);
        // 11. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        // 12. Wave resolution, victory and defeat
        let outcome = systems::waves::run(
            &self.world,
            &mut self.wave,
            &mut self.economy,
            &self.config.economy,
            &mut self.events,
        );
        self.update_phase(outcome);
    }

    fn update_phase(&mut self, outcome: WaveOutcome) {
        if self.economy.lives == 0 {
            self.phase = GamePhase::Defeat;
            info!(wave = self.wave.number, "defeat");
            self.events.push(GameEvent::Defeat);
            return;
        }
        match outcome {
            WaveOutcome::Running => {}
            WaveOutcome::Resolved => self.phase = GamePhase::Building,
            WaveOutcome::Victory => {
                self.phase = GamePhase::Victory;
                info!(
                    wave = self.wave.number,
                    gold = self.economy.gold,
                    lives = self.economy.lives,
                    "victory"
                );
                self.events.push(GameEvent::Victory);
            }
        }
    }

    fn wave_view(&self) -> WaveView {
        WaveView {
            number: self.wave.number,
            max_wave: self.wave.max_wave,
            resolved: self.wave_resolved(),
            elapsed_secs: self.wave.elapsed(self.time.elapsed_secs),
            night: self.wave.night,
        }
    }

    fn spell_view(&self) -> SpellView {
        let now = self.time.elapsed_secs;
        let spells = &self.config.spells;
        SpellView {
            vision_level: self.spells.vision_level,
            vision_radius: self.config.vision_radius(self.spells.vision_level),
            vision_upgrade_price: self.spells.vision_upgrade_price(spells),
            fairy_active: self.spells.fairy_active(now, spells),
            fairy_remaining_secs: self.spells.fairy_remaining(now, spells),
            lightning_armed: self.spells.lightning_armed,
            lightning_cells: self
                .spells
                .strikes()
                .iter()
                .filter(|s| now - s.started_at_secs < spells.lightning_effect_secs)
                .map(|s| s.cell)
                .collect(),
        }
    }
}
