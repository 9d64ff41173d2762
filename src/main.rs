//! Brick Breaker headless runner
//!
//! Plays an autopilot session against the simulation core and prints a
//! summary. Useful for replaying a seed and inspecting the final state.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;

    use brick_breaker::platform::Intent;
    use brick_breaker::sim::{GameEvent, GamePhase};
    use brick_breaker::{Game, GameConfig, LogAudio};

    /// Simulated display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Paddle holds still when the ball is this close to its centre
    const DEAD_ZONE: f32 = 8.0;

    #[derive(Parser, Debug)]
    #[command(author, version, about = "Run a headless brick-breaker session", long_about = None)]
    struct Args {
        /// RNG seed
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Number of frames to simulate
        #[arg(long, default_value_t = 3_600)]
        frames: u32,
        /// JSON config file (defaults when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the final snapshot as JSON
        #[arg(long)]
        snapshot: bool,
    }

    #[derive(Debug, Default)]
    struct Tally {
        bricks: u32,
        power_ups: u32,
        levels: u32,
    }

    pub fn run() -> ExitCode {
        env_logger::init();
        let args = Args::parse();

        let config = match &args.config {
            Some(path) => match GameConfig::load(path) {
                Ok(config) => config,
                Err(err) => {
                    log::error!("{err}");
                    return ExitCode::FAILURE;
                }
            },
            None => GameConfig::default(),
        };

        log::info!("Brick Breaker (headless) seed {} for {} frames", args.seed, args.frames);
        let mut game = Game::new(config, args.seed);
        let mut audio = LogAudio;
        let mut tally = Tally::default();

        let mut frames_run = 0;
        for frame in 0..args.frames {
            autopilot(&mut game);
            let events = game.frame(f64::from(frame) * FRAME_MS, &mut audio);
            frames_run = frame + 1;
            for event in &events {
                match event {
                    GameEvent::BrickDestroyed { .. } => tally.bricks += 1,
                    GameEvent::PowerUpCollected(_) => tally.power_ups += 1,
                    GameEvent::LevelCleared { .. } => tally.levels += 1,
                    _ => {}
                }
            }
            if game.phase() == GamePhase::GameOver {
                break;
            }
        }

        let state = game.state();
        println!("frames:    {frames_run}");
        println!("phase:     {:?}", state.phase);
        println!("level:     {}", state.level);
        println!("score:     {}", state.score);
        println!("lives:     {}", state.lives);
        println!("bricks:    {} destroyed, {} left", tally.bricks, state.bricks.len());
        println!("power-ups: {}", tally.power_ups);
        println!("cleared:   {}", tally.levels);

        if args.snapshot {
            match serde_json::to_string_pretty(&game.snapshot()) {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    log::error!("Failed to serialize snapshot: {err}");
                    return ExitCode::FAILURE;
                }
            }
        }
        ExitCode::SUCCESS
    }

    /// Press action every frame and chase the lowest free ball
    fn autopilot(game: &mut Game) {
        game.handle_intent(Intent::Action);

        let state = game.state();
        let paddle_center = state.paddle.pos.x + state.paddle.width / 2.0;
        let target = state
            .balls
            .iter()
            .filter(|b| !b.stuck)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|b| b.pos.x);

        let intent = match target {
            Some(x) if x > paddle_center + DEAD_ZONE => Intent::MoveRightStart,
            Some(x) if x < paddle_center - DEAD_ZONE => Intent::MoveLeftStart,
            _ => {
                game.handle_intent(Intent::MoveLeftStop);
                Intent::MoveRightStop
            }
        };
        game.handle_intent(intent);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web; hosts drive `Game` directly
}
