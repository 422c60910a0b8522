//! Dino Run headless driver
//!
//! Runs the simulation natively with a simple autopilot, for soak testing
//! and tuning. Browser hosts use the `DinoGame` wasm handle instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dino_run::consts::{DINO_X, FRAME_MS};
    use dino_run::persistence::FileStore;
    use dino_run::sim::Engine;
    use dino_run::tuning::Tuning;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(20_000);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random);
    let tuning = match std::env::var("DINO_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(t) => t,
            Err(e) => {
                log::error!("Bad tuning file {}: {}", path, e);
                std::process::exit(2);
            }
        },
        Err(_) => Tuning::default(),
    };

    let store = FileStore::new(std::env::temp_dir().join("dino-run-highscore.json"));
    log::info!("High score file: {}", store.path().display());
    let mut engine = Engine::new(tuning, Box::new(store), seed);
    log::info!("Dino Run (headless) starting: {} ticks, seed {}", ticks, seed);

    let mut now = 0.0_f64;
    let mut runs = 0u32;
    let mut best = 0u32;
    engine.start();
    for _ in 0..ticks {
        // Jump when the nearest obstacle ahead is inside a speed-scaled window
        let window = engine.game_speed() * 9.0;
        let threat = engine.obstacles().iter().any(|o| {
            let ahead = o.pos.x - (DINO_X + engine.player().size.x);
            (0.0..window).contains(&ahead)
        });
        if threat {
            engine.jump();
        }

        engine.update(now);
        now += f64::from(FRAME_MS);

        if engine.is_game_over() {
            runs += 1;
            best = best.max(engine.score());
            log::info!("Run {} ended at score {}", runs, engine.score());
            engine.reset();
            engine.start();
        }
    }

    best = best.max(engine.score());
    println!(
        "runs: {}  best: {}  high score: {}  playtime: {}s",
        runs,
        best,
        engine.high_score(),
        engine.snapshot().score.total_time
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the DinoGame handle, this is just to satisfy the compiler
}
