//! Send 'Em To Zero entry point
//!
//! The native build runs a headless demo: the autopilot plays for a stretch of
//! game time and the final state is printed as JSON.
//!
//! Usage: `send-em-to-zero [seed] [easy|medium|hard] [seconds] [tuning.json]`

/// Frame length of the demo loop (~60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const FRAME_MS: u32 = 16;
/// Frames between autopilot decisions, roughly human reaction time
#[cfg(not(target_arch = "wasm32"))]
const DECISION_FRAMES: u32 = 6;

/// Number of demo frames covering `seconds` of game time
#[cfg(not(target_arch = "wasm32"))]
fn demo_frames(seconds: u32) -> u32 {
    seconds.saturating_mul(1000) / FRAME_MS
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use send_em_to_zero::sim::{Difficulty, autopilot};
    use send_em_to_zero::{Engine, Tuning};

    env_logger::init();
    log::info!("Send 'Em To Zero (native demo) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed: u64 = args.first().and_then(|s| s.parse().ok()).unwrap_or(42);
    let difficulty = args
        .get(1)
        .and_then(|s| Difficulty::from_str(s))
        .unwrap_or(Difficulty::Medium);
    let seconds: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(60);
    let tuning = match args.get(3) {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::error!("Bad tuning file {}: {}", path, e);
                Tuning::default()
            }),
            Err(e) => {
                log::error!("Can't read tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let mut engine = Engine::with_tuning(seed, tuning);
    if let Err(e) = engine
        .select_difficulty(difficulty)
        .and_then(|_| engine.start())
    {
        log::error!("Could not start demo: {}", e);
        return;
    }
    log::info!("Demo seed {} on {}", seed, difficulty.as_str());

    let frames = demo_frames(seconds);
    for frame in 0..frames {
        engine.advance(FRAME_MS);
        if engine.is_over() {
            log::info!("Run ended after {}ms", frame * FRAME_MS);
            break;
        }
        if frame % DECISION_FRAMES != 0 {
            continue;
        }
        if let Some(intent) = autopilot::decide(engine.state()) {
            if let Err(e) = engine.apply(intent) {
                log::debug!("Autopilot {:?} rejected: {}", intent, e);
            }
        }
    }

    match serde_json::to_string_pretty(&engine.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web builds embed the engine from JS; nothing to run here
}
