//! Game manager: the run state machine
//!
//! Uninitialized -> Menu -> Playing -> GameOver, with restart handled by the
//! world as a full rebuild. All session writes go through here.

use serde::{Deserialize, Serialize};

use super::difficulty::{DifficultyLevel, DifficultySettings};
use super::player::PlayerController;
use super::spawner::Spawner;
use super::state::{GamePhase, GameSession, LoseReason};
use super::tick::TickInput;
use crate::consts::SCORE_RATE;
use crate::highscores::HighScore;
use crate::hud::{self, Hud};
use crate::persistence::ScoreStore;

/// Collaborators the manager drives
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    pub spawner: Option<Spawner>,
    pub player: Option<PlayerController>,
    pub hud: Hud,
}

impl Bindings {
    pub fn is_complete(&self) -> bool {
        self.spawner.is_some() && self.player.is_some() && self.hud.is_complete()
    }

    fn set_active(&mut self, active: bool) {
        if let Some(spawner) = &mut self.spawner {
            spawner.set_enabled(active);
        }
        if let Some(player) = &mut self.player {
            player.set_enabled(active);
        }
    }
}

/// Initialization sub-machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wiring {
    /// Bindings were incomplete at start; one retry pending
    AwaitingWiring,
    Ready,
    /// Retry failed; the manager does nothing until configured
    Inert,
}

/// Requests the manager hands back to the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerRequest {
    Restart,
}

#[derive(Debug, Clone)]
pub struct GameManager {
    session: GameSession,
    wiring: Wiring,
    high_score: HighScore,
}

impl Default for GameManager {
    fn default() -> Self {
        Self::new()
    }
}

impl GameManager {
    pub fn new() -> Self {
        Self {
            session: GameSession::default(),
            wiring: Wiring::AwaitingWiring,
            high_score: HighScore::default(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn wiring(&self) -> Wiring {
        self.wiring
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_playing()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    /// Active tuning. Only meaningful while playing.
    pub fn settings(&self) -> Option<DifficultySettings> {
        self.session.settings()
    }

    /// Same scroll speed the components see through `SimContext`
    pub fn world_speed(&self) -> f32 {
        self.session.world_speed()
    }

    pub fn spawn_interval(&self) -> f32 {
        self.settings().map_or(0.0, |s| s.spawn_interval)
    }

    /// Read the stored high score and enter the menu if everything is bound
    pub fn start(&mut self, bindings: &mut Bindings, store: &dyn ScoreStore) {
        self.high_score = HighScore::load(store);
        self.session.high_score = self.high_score.best();

        if self.try_init(bindings) {
            self.show_menu(bindings);
        } else {
            log::debug!("Bindings incomplete, deferring init by one tick");
            self.wiring = Wiring::AwaitingWiring;
        }
    }

    /// Advance the wiring sub-machine once per tick
    pub fn advance_wiring(&mut self, bindings: &mut Bindings) {
        if self.wiring != Wiring::AwaitingWiring {
            return;
        }

        if self.try_init(bindings) {
            self.show_menu(bindings);
        } else {
            self.wiring = Wiring::Inert;
            log::warn!(
                "Game manager is missing required bindings (spawner: {}, player: {}, hud: {}); staying inert",
                bindings.spawner.is_some(),
                bindings.player.is_some(),
                bindings.hud.is_complete()
            );
        }
    }

    /// Explicitly bind collaborators. Returns true once the manager is ready.
    pub fn configure(&mut self, bindings: &mut Bindings) -> bool {
        if self.wiring == Wiring::Ready {
            return true;
        }
        if self.try_init(bindings) {
            self.show_menu(bindings);
            return true;
        }
        false
    }

    fn try_init(&mut self, bindings: &mut Bindings) -> bool {
        if !bindings.is_complete() {
            return false;
        }
        bindings.set_active(false);
        self.wiring = Wiring::Ready;
        true
    }

    fn show_menu(&mut self, bindings: &mut Bindings) {
        self.session.phase = GamePhase::Menu;
        self.session.difficulty = None;
        self.session.score = 0.0;
        self.session.lose_reason = None;

        bindings.hud.set_score(0);
        bindings.hud.set_high_score(self.high_score.best());
        bindings.hud.set_difficulty(None);
        bindings.hud.show_banner(hud::MENU_BANNER);
        log::info!("Menu ready (high score {})", self.high_score.best());
    }

    /// Menu -> Playing
    pub fn start_run(&mut self, level: DifficultyLevel, bindings: &mut Bindings) {
        if self.wiring != Wiring::Ready || self.session.phase != GamePhase::Menu {
            return;
        }

        self.session.difficulty = Some(level);
        self.session.phase = GamePhase::Playing;
        self.session.score = 0.0;
        self.session.lose_reason = None;

        bindings.hud.hide_banner();
        bindings.hud.set_difficulty(Some(level));
        bindings.hud.set_score(0);
        bindings.set_active(true);
        log::info!("Run started on {}", level.label());
    }

    /// Playing -> GameOver. Later calls in the same run are ignored.
    pub fn lose(&mut self, reason: LoseReason, bindings: &mut Bindings, store: &mut dyn ScoreStore) {
        if self.wiring != Wiring::Ready || self.session.phase != GamePhase::Playing {
            return;
        }

        self.session.phase = GamePhase::GameOver;
        self.session.lose_reason = Some(reason);

        let final_score = self.session.score_int();
        if let Err(e) = self.high_score.submit(final_score, store) {
            log::error!("Failed to save high score {}: {}", final_score, e);
        }
        self.session.high_score = self.high_score.best();

        bindings.hud.set_high_score(self.high_score.best());
        bindings.hud.show_banner(hud::game_over_text(reason, final_score));
        bindings.set_active(false);
        log::info!("Game over: {} (score {})", reason, final_score);
    }

    /// Per-tick input handling and scoring
    pub fn update(&mut self, input: &TickInput, dt: f32, bindings: &mut Bindings) -> Option<ManagerRequest> {
        if self.wiring != Wiring::Ready {
            return None;
        }

        match self.session.phase {
            GamePhase::Uninitialized => None,
            GamePhase::Menu => {
                if let Some(level) = input.select {
                    self.start_run(level, bindings);
                }
                None
            }
            GamePhase::Playing => {
                let multiplier = self.settings().map_or(0.0, |s| s.score_multiplier);
                debug_assert!(self.session.difficulty.is_some(), "playing without a difficulty");
                self.session.score += dt * multiplier * SCORE_RATE;
                bindings.hud.set_score(self.session.score_int());
                None
            }
            GamePhase::GameOver => input.restart.then_some(ManagerRequest::Restart),
        }
    }
}
