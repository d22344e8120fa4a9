//! World ownership and the per-tick pipeline
//!
//! Order within one tick:
//! 1. parallax layers scroll
//! 2. wiring sub-machine advances
//! 3. queued contact events reach the player
//! 4. player, spawner and obstacles update
//! 5. the manager handles menu/restart input and scoring
//! 6. physics steps and queues contact events for the next tick

use std::collections::BTreeSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::context::SimContext;
use super::difficulty::DifficultyLevel;
use super::manager::{Bindings, GameManager, ManagerRequest, Wiring};
use super::obstacle::{Obstacle, ObstacleStatus};
use super::parallax::{ParallaxScroller, build_layers};
use super::physics::{Collider, ContactEvent, ContactQueue, ContactTracker, Ground};
use super::player::PlayerController;
use super::spawner::{SpawnPlan, Spawner};
use super::state::{GamePhase, GameSession, LoseReason};
use crate::assets::{SpriteCatalog, SpriteHandle, SpriteProvider, SpriteRequest};
use crate::hud::Hud;
use crate::persistence::{MemoryStore, ScoreStore};
use crate::settings::RunnerConfig;

/// Input for a single tick. One-shot fields are edge-triggered.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Difficulty digit pressed (menu only)
    pub select: Option<DifficultyLevel>,
    /// Jump pressed this tick
    pub jump: bool,
    /// Restart pressed this tick (game over only)
    pub restart: bool,
    /// Demo mode - the world plays itself
    pub autopilot: bool,
}

/// Everything in the running game
pub struct World {
    config: RunnerConfig,
    manager: GameManager,
    bindings: Bindings,
    ground: Ground,
    ground_sprite: SpriteHandle,
    obstacles: Vec<Obstacle>,
    layers: Vec<ParallaxScroller>,
    contacts: ContactQueue,
    tracker: ContactTracker,
    rng: Pcg32,
    sprites: SpriteCatalog,
    store: Box<dyn ScoreStore>,
    next_id: u32,
    time: f32,
}

impl World {
    /// Build a fully wired world; it starts in the menu
    pub fn new(config: RunnerConfig, store: Box<dyn ScoreStore>) -> Self {
        let mut world = Self::assemble(config, store);
        world.bindings = world.standard_bindings();
        world.start();
        world
    }

    /// Build a world with caller-supplied (possibly incomplete) bindings
    pub fn with_bindings(config: RunnerConfig, store: Box<dyn ScoreStore>, bindings: Bindings) -> Self {
        let mut world = Self::assemble(config, store);
        world.bindings = bindings;
        world.start();
        world
    }

    fn assemble(config: RunnerConfig, store: Box<dyn ScoreStore>) -> Self {
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let mut sprites = SpriteCatalog::new();
        let layers = build_layers(&config.hills, &config.stars, &mut rng, &mut sprites);
        let ground_sprite = sprites.sprite(SpriteRequest::Ground);

        Self {
            ground: Ground::new(config.ground_center, config.ground_size),
            ground_sprite,
            config,
            manager: GameManager::new(),
            bindings: Bindings::default(),
            obstacles: Vec::new(),
            layers,
            contacts: ContactQueue::default(),
            tracker: ContactTracker::default(),
            rng,
            sprites,
            store,
            next_id: 1,
            time: 0.0,
        }
    }

    fn start(&mut self) {
        self.manager.start(&mut self.bindings, self.store.as_ref());
    }

    /// Spawner, player and HUD laid out from the config
    pub fn standard_bindings(&mut self) -> Bindings {
        let player_sprite = self.sprites.sprite(SpriteRequest::Player);
        Bindings {
            spawner: Some(Spawner::new(self.config.spawn_x, self.config.lane_y)),
            player: Some(PlayerController::new(
                self.config.player_start,
                self.config.player_scale,
                self.config.jump_impulse,
                self.config.visual_lerp,
                player_sprite,
            )),
            hud: Hud::standard(),
        }
    }

    /// Replace the bindings and try to initialize with them
    pub fn bind(&mut self, bindings: Bindings) -> bool {
        self.bindings = bindings;
        self.manager.configure(&mut self.bindings)
    }

    pub fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn manager(&self) -> &GameManager {
        &self.manager
    }

    pub fn session(&self) -> &GameSession {
        self.manager.session()
    }

    pub fn phase(&self) -> GamePhase {
        self.manager.phase()
    }

    pub fn hud(&self) -> &Hud {
        &self.bindings.hud
    }

    pub fn player(&self) -> Option<&PlayerController> {
        self.bindings.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerController> {
        self.bindings.player.as_mut()
    }

    pub fn spawner(&self) -> Option<&Spawner> {
        self.bindings.spawner.as_ref()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn obstacles_mut(&mut self) -> &mut Vec<Obstacle> {
        &mut self.obstacles
    }

    pub fn layers(&self) -> &[ParallaxScroller] {
        &self.layers
    }

    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    pub fn ground_sprite(&self) -> SpriteHandle {
        self.ground_sprite
    }

    pub fn sprites(&self) -> &SpriteCatalog {
        &self.sprites
    }

    pub fn store(&self) -> &dyn ScoreStore {
        self.store.as_ref()
    }

    /// Simulated seconds since this world was built
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Queue a contact event for the next tick (physics or tests)
    pub fn push_contact(&mut self, event: ContactEvent) {
        self.contacts.push(event);
    }

    /// Advance the world by one frame
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        let mut input = input.clone();
        if input.autopilot {
            self.autopilot(&mut input);
        }
        let input = &input;
        self.time += dt;

        {
            let ctx = SimContext::new(self.manager.session(), input, dt);
            for layer in &mut self.layers {
                layer.update(&ctx);
            }
        }

        self.manager.advance_wiring(&mut self.bindings);
        if self.manager.wiring() != Wiring::Ready {
            return;
        }

        for event in self.contacts.drain() {
            let loss = self
                .bindings
                .player
                .as_mut()
                .and_then(|player| player.on_contact(event));
            if let Some(reason) = loss {
                self.lose(reason);
            }
        }

        let loss = {
            let ctx = SimContext::new(self.manager.session(), input, dt);
            self.bindings
                .player
                .as_mut()
                .and_then(|player| player.update(&ctx))
        };
        if let Some(reason) = loss {
            self.lose(reason);
        }

        let plan = {
            let ctx = SimContext::new(self.manager.session(), input, dt);
            let rng = &mut self.rng;
            self.bindings
                .spawner
                .as_mut()
                .and_then(|spawner| spawner.update(&ctx, rng))
        };
        if let Some(plan) = plan {
            self.spawn(plan);
        }

        {
            let ctx = SimContext::new(self.manager.session(), input, dt);
            self.obstacles.retain_mut(|obstacle| match obstacle.advance(&ctx) {
                ObstacleStatus::Alive => true,
                ObstacleStatus::Despawned => {
                    log::debug!("Obstacle {} despawned", obstacle.id);
                    false
                }
            });
        }

        if let Some(ManagerRequest::Restart) = self.manager.update(input, dt, &mut self.bindings) {
            self.restart();
            return;
        }

        self.step_physics(dt);
    }

    fn lose(&mut self, reason: LoseReason) {
        self.manager
            .lose(reason, &mut self.bindings, self.store.as_mut());
    }

    fn spawn(&mut self, plan: SpawnPlan) {
        let id = self.next_id;
        self.next_id += 1;
        let sprite = self.sprites.sprite(SpriteRequest::Obstacle(plan.shape));
        self.obstacles.push(Obstacle {
            id,
            pos: plan.pos,
            kind: plan.kind,
            shape: plan.shape,
            sprite,
        });
    }

    fn step_physics(&mut self, dt: f32) {
        let Some(player) = self.bindings.player.as_mut() else {
            return;
        };

        let on_ground = player.body.step(&self.ground, self.config.gravity, dt);
        let bounds = player.body.bounds();

        let mut touching = BTreeSet::new();
        if on_ground {
            touching.insert(Collider::Ground);
        }
        for obstacle in &self.obstacles {
            if obstacle.bounds().overlaps(&bounds) {
                touching.insert(Collider::Obstacle(obstacle.id));
            }
        }
        self.tracker.update(touching, &mut self.contacts);
    }

    /// Full reset: rebuild from config, keeping the persistent store
    fn restart(&mut self) {
        let store = std::mem::replace(&mut self.store, Box::new(MemoryStore::new()));
        let mut config = self.config.clone();
        config.seed = self.rng.random();
        log::info!("Restarting with seed {}", config.seed);
        *self = World::new(config, store);
    }

    /// Pick a difficulty from the menu and jump so the apex lines up with the next obstacle
    fn autopilot(&self, input: &mut TickInput) {
        match self.phase() {
            GamePhase::Menu => {
                input.select = Some(self.config.autopilot_difficulty);
            }
            GamePhase::Playing => {
                let Some(player) = self.player() else {
                    return;
                };
                let speed = self.manager.world_speed();
                let apex_time = self.config.jump_impulse / -self.config.gravity;
                let px = player.pos().x;

                let nearest = self
                    .obstacles
                    .iter()
                    .map(|o| o.pos.x - px)
                    .filter(|dx| *dx > 0.0)
                    .fold(f32::INFINITY, f32::min);

                if nearest <= speed * apex_time {
                    input.jump = true;
                }
            }
            GamePhase::Uninitialized | GamePhase::GameOver => {}
        }
    }
}
