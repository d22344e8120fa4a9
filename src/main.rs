//! Pixel Runner entry point
//!
//! Runs a headless autopilot session on the fixed-step loop and logs the HUD.
//!
//! Usage: `pixel-runner [config.json] [easy|medium|hard]` or `pixel-runner <easy|medium|hard>`

use pixel_runner::consts::{MAX_SUBSTEPS, SIM_DT};
use pixel_runner::persistence::{JsonFileStore, MemoryStore, ScoreStore};
use pixel_runner::sim::{DifficultyLevel, GamePhase, TickInput, World};
use pixel_runner::RunnerConfig;

/// Where the high score lives between runs
const SCORE_FILE: &str = "pixel_runner_scores.json";
/// Simulated frame time fed to the loop (30 fps display)
const FRAME_DT: f32 = 1.0 / 30.0;
/// Stop the demo after this many simulated seconds
const MAX_SECONDS: f32 = 180.0;

/// Driver state around the world
struct Game {
    world: World,
    accumulator: f32,
    input: TickInput,
    last_hud: Vec<String>,
}

impl Game {
    fn new(world: World) -> Self {
        Self {
            world,
            accumulator: 0.0,
            input: TickInput {
                autopilot: true,
                ..Default::default()
            },
            last_hud: Vec::new(),
        }
    }

    /// Run simulation ticks for one frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.world.tick(&self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.select = None;
            self.input.jump = false;
            self.input.restart = false;
        }
    }

    /// Log HUD sinks that changed since the last frame
    fn report_hud(&mut self) {
        let hud = self.world.hud();
        let current: Vec<String> = [&hud.score, &hud.high_score, &hud.difficulty, &hud.center]
            .into_iter()
            .flatten()
            .filter(|sink| sink.visible)
            .map(|sink| sink.text.replace('\n', " | "))
            .collect();

        if current != self.last_hud {
            // Score changes every tick; keep it at debug
            let banner_changed = current.last() != self.last_hud.last();
            if banner_changed {
                log::info!("HUD: {}", current.join("  "));
            } else {
                log::debug!("HUD: {}", current.join("  "));
            }
            self.last_hud = current;
        }
    }
}

/// Positional arguments
#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<String>,
    difficulty: Option<String>,
}

impl Args {
    /// A lone argument naming a difficulty is taken as one, not as a config path
    fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut args = args.into_iter();
        match (args.next(), args.next()) {
            (Some(only), None) if DifficultyLevel::from_str(&only).is_some() => Self {
                config: None,
                difficulty: Some(only),
            },
            (config, difficulty) => Self { config, difficulty },
        }
    }
}

fn open_store() -> Box<dyn ScoreStore> {
    match JsonFileStore::open(SCORE_FILE) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("High score store unavailable ({}), scores will not persist", e);
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pixel Runner (headless) starting...");

    let args = Args::parse(std::env::args().skip(1));
    let mut config = match args.config {
        Some(path) => RunnerConfig::load_or_default(path),
        None => RunnerConfig::default(),
    };
    if let Some(name) = args.difficulty {
        match DifficultyLevel::from_str(&name) {
            Some(level) => config.autopilot_difficulty = level,
            None => log::warn!("Unknown difficulty '{}', using {}", name, config.autopilot_difficulty.label()),
        }
    }

    let mut game = Game::new(World::new(config, open_store()));

    while game.world.time() < MAX_SECONDS {
        game.update(FRAME_DT);
        game.report_hud();
        if game.world.phase() == GamePhase::GameOver {
            break;
        }
    }

    let session = game.world.session();
    println!(
        "Final score: {}  High score: {}  Time: {:.1}s",
        session.score_int(),
        session.high_score,
        game.world.time()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {}
