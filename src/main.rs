//! Barrage headless runner
//!
//! Plays a run with the autopilot and prints the final snapshot as JSON.
//!
//! Usage: `barrage [--seed N] [--frames N] [--mode levels|endless] [--level N] [--tuning FILE]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use barrage::session::autopilot;
    use barrage::sim::GameEvent;
    use barrage::{GameMode, Session, SessionStatus, Tuning};

    env_logger::init();
    log::info!("Barrage (headless) starting...");

    let mut seed: u64 = 12345;
    let mut frames: u64 = 60 * 60;
    let mut mode = GameMode::Levels;
    let mut level: u32 = 1;
    let mut tuning_path: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let value = args.next();
        match (arg.as_str(), value.as_deref()) {
            ("--seed", Some(v)) => match v.parse() {
                Ok(n) => seed = n,
                Err(e) => log::warn!("Ignoring seed '{}': {}", v, e),
            },
            ("--frames", Some(v)) => match v.parse() {
                Ok(n) => frames = n,
                Err(e) => log::warn!("Ignoring frame count '{}': {}", v, e),
            },
            ("--level", Some(v)) => match v.parse() {
                Ok(n) => level = n,
                Err(e) => log::warn!("Ignoring level '{}': {}", v, e),
            },
            ("--mode", Some(v)) => match GameMode::parse(v) {
                Some(m) => mode = m,
                None => log::warn!("Unknown mode '{}', using {:?}", v, mode),
            },
            ("--tuning", Some(v)) => tuning_path = Some(PathBuf::from(v)),
            _ => log::warn!("Ignoring argument '{}'", arg),
        }
    }

    let tuning = match tuning_path {
        Some(path) => Tuning::load(&path),
        None => Tuning::default(),
    };

    let mut session = Session::starting_at(mode, seed, tuning, level);
    for _ in 0..frames {
        let input = autopilot(&session.state);
        let status = session.step(&input);

        for event in &session.state.events {
            match event {
                GameEvent::EnemyDestroyed { .. } => log::trace!("{:?}", event),
                _ => log::debug!("frame {}: {:?}", session.state.elapsed_frames(), event),
            }
        }

        match status {
            SessionStatus::Running => {}
            SessionStatus::LevelCleared { level } => log::info!("Advanced to level {}", level),
            SessionStatus::BossReplaced { kind } => log::info!("Next boss: {:?}", kind),
            SessionStatus::GameOver { score } => {
                log::info!(
                    "Game over at frame {} with score {}",
                    session.state.elapsed_frames(),
                    score
                );
                break;
            }
        }
    }

    match serde_json::to_string_pretty(&session.state.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the embedding renderer on the web
}
