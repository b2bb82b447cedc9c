//! Game engine — the core of the gallery.
//!
//! `GameEngine` owns the hecs ECS world of live targets, processes player
//! commands, runs all systems, and produces `GameStateSnapshot`s.
//! Completely headless (no renderer or audio dependency), enabling
//! deterministic testing.

use std::collections::VecDeque;

use glam::DVec3;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use deadeye_core::catalog::{Catalog, LevelDefinition, WeaponDefinition};
use deadeye_core::commands::PlayerCommand;
use deadeye_core::components::TargetInfo;
use deadeye_core::constants::{CHAIN_RESPAWN_DELAY_SECS, LEVEL_END_GRACE_SECS, RAYCAST_MAX_RANGE};
use deadeye_core::enums::{GamePhase, SpawnPolicy, TargetFate, UiScreen};
use deadeye_core::events::{AudioEvent, SceneEvent};
use deadeye_core::state::{GameStateSnapshot, LevelResultView, UiView};
use deadeye_core::types::{Position, SimTime};

use crate::hit_test;
use crate::scoring::ScoringState;
use crate::spawner::TargetSpawner;
use crate::systems;
use crate::timer::{secs_to_ticks, TimerQueue, TimerTask};

/// Configuration for starting a new game session.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same session.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The game engine. Owns the ECS world and all session state.
pub struct GameEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    catalog: Catalog,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    audio_events: Vec<AudioEvent>,
    scene_events: Vec<SceneEvent>,
    timers: TimerQueue,

    // --- Attempt state ---
    spawner: Option<TargetSpawner>,
    scoring: ScoringState,
    current_level: Option<u32>,
    unlocked_level: u32,
    next_target_id: u32,
    /// Tick of the last accepted shot, for the fire-rate cooldown.
    last_shot_tick: Option<u64>,
    /// Cooldown of the equipped weapon, in ticks.
    cooldown_ticks: u64,
    /// Level id of the background track currently alive, if any.
    music: Option<u32>,
    ui: UiView,
    result: Option<LevelResultView>,
}

impl GameEngine {
    /// Create a new engine with the stock level catalog.
    pub fn new(config: SimConfig) -> Self {
        Self::with_catalog(config, Catalog::default())
    }

    /// Create a new engine with a custom level catalog.
    pub fn with_catalog(config: SimConfig, catalog: Catalog) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            catalog,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
            scene_events: Vec::new(),
            timers: TimerQueue::default(),
            spawner: None,
            scoring: ScoringState::default(),
            current_level: None,
            unlocked_level: 1,
            next_target_id: 0,
            last_shot_tick: None,
            cooldown_ticks: 0,
            music: None,
            ui: UiView::default(),
            result: None,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the game by one tick and return the resulting snapshot.
    /// Sim time only moves while Playing; menus and pauses are frozen.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Playing {
            self.run_systems();
            self.time.advance();
        }

        let audio_events = std::mem::take(&mut self.audio_events);
        let scene_events = std::mem::take(&mut self.scene_events);
        let targets_total = self
            .current_level
            .and_then(|id| self.catalog.get(id).ok())
            .map(|def| def.target_count)
            .unwrap_or(0);

        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.current_level,
            self.unlocked_level,
            self.catalog.len() as u32,
            targets_total,
            &self.scoring,
            self.ui,
            self.result.clone(),
            audio_events,
            scene_events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Highest selectable level id.
    pub fn unlocked_level(&self) -> u32 {
        self.unlocked_level
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a read-only reference to the scoring counters.
    #[cfg(test)]
    pub fn scoring(&self) -> &ScoringState {
        &self.scoring
    }

    /// Teleport a target (for tests exercising bounds/race behavior).
    #[cfg(test)]
    pub fn set_target_position(&mut self, target_id: u32, position: Position) {
        for (_entity, (pos, info)) in self.world.query_mut::<(&mut Position, &TargetInfo)>() {
            if info.target_id == target_id {
                *pos = position;
            }
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Commands illegal for the current
    /// phase are ignored.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => {
                if self.phase == GamePhase::MainMenu {
                    self.phase = GamePhase::LevelSelect;
                    self.ui = UiView {
                        screen: UiScreen::LevelSelect,
                        ..UiView::default()
                    };
                    log::info!("entering level select");
                }
            }
            PlayerCommand::SelectLevel { level_id } => {
                if self.phase == GamePhase::LevelSelect {
                    self.try_start_level(level_id);
                }
            }
            PlayerCommand::Fire { origin, direction } => {
                if self.phase == GamePhase::Playing {
                    self.handle_fire(origin, direction);
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Playing {
                    self.phase = GamePhase::Paused;
                    if self.music.is_some() {
                        self.audio_events.push(AudioEvent::MusicPaused);
                    }
                    self.ui.screen = UiScreen::PauseMenu;
                    self.ui.cursor_locked = false;
                    log::info!("paused");
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Playing;
                    if self.music.is_some() {
                        self.audio_events.push(AudioEvent::MusicResumed);
                    }
                    self.ui.screen = UiScreen::Hud;
                    self.ui.cursor_locked = true;
                    log::info!("resumed");
                }
            }
            PlayerCommand::AdvanceToNext => {
                if self.phase == GamePhase::LevelResult {
                    let next = match &self.result {
                        Some(result) if result.passed && !result.final_level => {
                            Some(result.level_id + 1)
                        }
                        _ => None,
                    };
                    if let Some(level_id) = next {
                        self.result = None;
                        self.try_start_level(level_id);
                    }
                }
            }
            PlayerCommand::RetryLevel => {
                if self.phase == GamePhase::LevelResult {
                    if let Some(level_id) = self.current_level {
                        self.result = None;
                        self.try_start_level(level_id);
                    }
                }
            }
            PlayerCommand::BackToLevelSelect => {
                if self.phase == GamePhase::LevelResult {
                    self.stop_music();
                    self.teardown_attempt();
                    self.phase = GamePhase::LevelSelect;
                    self.ui = UiView {
                        screen: UiScreen::LevelSelect,
                        ..UiView::default()
                    };
                }
            }
            PlayerCommand::QuitToMenu => {
                if self.phase != GamePhase::MainMenu {
                    self.stop_music();
                    self.teardown_attempt();
                    self.phase = GamePhase::MainMenu;
                    self.ui = UiView::default();
                    log::info!("quit to main menu");
                }
            }
        }
    }

    /// Validate a level start request; blocked requests are logged and
    /// ignored rather than failing the session.
    fn try_start_level(&mut self, level_id: u32) {
        let def = match self.catalog.get(level_id) {
            Ok(def) => def.clone(),
            Err(err) => {
                log::warn!("blocked level start: {err}");
                return;
            }
        };
        if level_id > self.unlocked_level {
            log::warn!(
                "blocked level start: level {level_id} is locked (unlocked up to {})",
                self.unlocked_level
            );
            return;
        }
        let Ok(weapon) = self.catalog.weapon(level_id).cloned() else {
            return;
        };
        self.start_level(def, weapon);
    }

    /// Begin a fresh attempt: reset scoring, clear stale targets, swap
    /// the background track, arm the spawner, and enter Playing. The
    /// weapon/crosshair/HUD flags and cursor lock change only here and
    /// on the matching exits.
    fn start_level(&mut self, def: LevelDefinition, weapon: WeaponDefinition) {
        self.world.clear();
        self.despawn_buffer.clear();
        self.timers.clear();
        self.scoring.reset();
        self.result = None;
        self.last_shot_tick = None;
        self.cooldown_ticks = secs_to_ticks(weapon.fire_cooldown_secs);

        self.stop_music();
        self.audio_events.push(AudioEvent::MusicStarted { level_id: def.id });
        self.music = Some(def.id);
        self.audio_events.push(AudioEvent::LevelStart { level_id: def.id });

        let (spawner, due_ticks) =
            TargetSpawner::begin_level(def.clone(), &mut self.rng, self.time.tick);
        for due in due_ticks {
            self.timers.schedule(due, TimerTask::SpawnTarget);
        }
        self.spawner = Some(spawner);
        self.current_level = Some(def.id);
        self.phase = GamePhase::Playing;
        self.ui = UiView {
            screen: UiScreen::Hud,
            hud_visible: true,
            weapon_visible: true,
            crosshair_visible: true,
            cursor_locked: true,
        };
        log::info!(
            "starting level {} ({:?}, {} targets, goal {:.0}%)",
            def.id,
            weapon.class,
            def.target_count,
            def.accuracy_goal
        );
    }

    /// Handle a Fire command: cooldown gate, shot bookkeeping, ray test,
    /// hit resolution.
    fn handle_fire(&mut self, origin: Position, direction: DVec3) {
        if let Some(last) = self.last_shot_tick {
            if self.time.tick.saturating_sub(last) < self.cooldown_ticks {
                // Inside the cooldown window: dropped without a trace.
                return;
            }
        }
        self.last_shot_tick = Some(self.time.tick);
        self.scoring.record_shot();
        self.audio_events.push(AudioEvent::GunShot);
        self.scene_events.push(SceneEvent::WeaponRecoil);

        let direction = direction.normalize_or_zero();
        if direction == DVec3::ZERO {
            return;
        }
        if let Some(hit) = hit_test::cast(&self.world, origin, direction, RAYCAST_MAX_RANGE) {
            self.resolve_target(hit.entity, TargetFate::Hit);
        }
    }

    /// Resolve a target exactly once. Re-resolving (a hit and a bounds
    /// exit racing on the same frame, or a stale entity handle) is a
    /// no-op.
    fn resolve_target(&mut self, entity: hecs::Entity, fate: TargetFate) {
        let (position, target_id, scale) =
            match self.world.query_one_mut::<(&Position, &mut TargetInfo)>(entity) {
                Ok((pos, info)) => {
                    if info.resolved {
                        return;
                    }
                    info.resolved = true;
                    (*pos, info.target_id, info.scale)
                }
                Err(_) => return,
            };

        self.despawn_buffer.push(entity);
        self.scene_events
            .push(SceneEvent::TargetDestroyed { target_id, fate });
        if fate == TargetFate::Hit {
            self.scoring.record_hit();
            self.audio_events.push(AudioEvent::TargetHit { target_id });
            self.scene_events.push(SceneEvent::ImpactFlash { position, scale });
            log::debug!(
                "target {target_id} hit ({}/{} shots on target)",
                self.scoring.hits,
                self.scoring.shots_fired
            );
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Fire due timers (spawns, level-end evaluation)
        for task in self.timers.poll(self.time.tick) {
            match task {
                TimerTask::SpawnTarget => self.spawn_next_target(),
                TimerTask::EvaluateLevelEnd => self.evaluate_level_end(),
            }
        }
        if self.phase != GamePhase::Playing {
            // The level ended this tick.
            return;
        }
        // 2. Kinematic integration
        systems::movement::run(&mut self.world);
        // 3. Bounds exits resolve as escapes
        systems::bounds::run(&mut self.world, &mut self.scene_events, &mut self.despawn_buffer);
        // 4. Despawn resolved targets
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }
        // 5. Decide the next step: chained respawn or level-end evaluation
        self.schedule_level_progress();
    }

    fn spawn_next_target(&mut self) {
        if let Some(spawner) = self.spawner.as_mut() {
            spawner.spawn_next(
                &mut self.world,
                &mut self.rng,
                &mut self.scoring,
                &mut self.next_target_id,
                &mut self.scene_events,
            );
        }
    }

    /// Schedule the next spawn (Chained policy) or, once the spawn budget
    /// is exhausted and the field is clear, the level-end evaluation
    /// after the grace period.
    fn schedule_level_progress(&mut self) {
        let Some((exhausted, policy)) = self
            .spawner
            .as_ref()
            .map(|s| (s.budget_exhausted(&self.scoring), s.policy()))
        else {
            return;
        };
        let live = self.live_target_count();

        if exhausted {
            if live == 0 && !self.timers.has(TimerTask::EvaluateLevelEnd) {
                self.timers.schedule(
                    self.time.tick + secs_to_ticks(LEVEL_END_GRACE_SECS),
                    TimerTask::EvaluateLevelEnd,
                );
                log::debug!("spawn budget exhausted, scheduling level-end evaluation");
            }
        } else if policy == SpawnPolicy::Chained
            && live == 0
            && !self.timers.has(TimerTask::SpawnTarget)
        {
            self.timers.schedule(
                self.time.tick + secs_to_ticks(CHAIN_RESPAWN_DELAY_SECS),
                TimerTask::SpawnTarget,
            );
        }
    }

    /// Grace period elapsed: re-check the end condition and finish.
    fn evaluate_level_end(&mut self) {
        let exhausted = self
            .spawner
            .as_ref()
            .map_or(false, |s| s.budget_exhausted(&self.scoring));
        if !exhausted || self.live_target_count() > 0 {
            return;
        }
        self.finish_level();
    }

    /// Close out the attempt: compute accuracy, unlock on a pass, and put
    /// up the result panel.
    fn finish_level(&mut self) {
        let Some(level_id) = self.current_level else {
            return;
        };
        let Ok(def) = self.catalog.get(level_id) else {
            return;
        };
        let accuracy_goal = def.accuracy_goal;
        let target_count = def.target_count;

        let accuracy = self.scoring.accuracy();
        let passed = accuracy >= accuracy_goal;
        let final_level = level_id >= self.catalog.max_level();
        if passed {
            self.unlocked_level = self
                .unlocked_level
                .max((level_id + 1).min(self.catalog.max_level()));
        }

        self.result = Some(LevelResultView {
            level_id,
            accuracy,
            accuracy_goal,
            hits: self.scoring.hits,
            shots_fired: self.scoring.shots_fired,
            target_count,
            passed,
            final_level,
        });
        self.phase = GamePhase::LevelResult;
        self.timers.clear();
        self.ui.screen = UiScreen::ResultPanel;
        self.ui.hud_visible = false;
        self.ui.crosshair_visible = false;
        self.ui.cursor_locked = false;
        log::info!(
            "level {level_id} finished: accuracy {accuracy:.1}% (goal {accuracy_goal:.0}%), {}",
            if passed { "passed" } else { "failed" }
        );
    }

    /// Stop and discard the background track, if one is alive.
    fn stop_music(&mut self) {
        if self.music.take().is_some() {
            self.audio_events.push(AudioEvent::MusicStopped);
        }
    }

    /// Tear down everything belonging to the current attempt.
    fn teardown_attempt(&mut self) {
        self.world.clear();
        self.despawn_buffer.clear();
        self.timers.clear();
        self.spawner = None;
        self.result = None;
        self.current_level = None;
        self.last_shot_tick = None;
    }

    fn live_target_count(&self) -> usize {
        let mut query = self.world.query::<&TargetInfo>();
        query.iter().filter(|(_, info)| !info.resolved).count()
    }
}
