//! Asterfall entry point
//!
//! Headless demo runner: plays the game with the built-in autopilot and
//! reports the result. A renderer frontend drives the same `tick` loop with
//! real input instead.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use asterfall::audio::{self, NullAudio};
use asterfall::persistence::FileStore;
use asterfall::sim::{GamePhase, GameState, TickInput, tick};
use asterfall::{ScoreLedger, Settings};

struct Args {
    seed: u64,
    ticks: u64,
    realtime: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        seed: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
            ^ std::process::id() as u64,
        ticks: 3600,
        realtime: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                if let Some(value) = iter.next().and_then(|v| v.parse().ok()) {
                    args.seed = value;
                }
            }
            "--ticks" => {
                if let Some(value) = iter.next().and_then(|v| v.parse().ok()) {
                    args.ticks = value;
                }
            }
            "--realtime" => args.realtime = true,
            other => {
                eprintln!("unknown argument: {other}");
                eprintln!("usage: asterfall [--seed N] [--ticks N] [--realtime]");
                std::process::exit(2);
            }
        }
    }
    args
}

fn main() {
    env_logger::init();
    let args = parse_args();

    let settings = Settings::load(&Settings::default_path());
    let mut ledger = ScoreLedger::new(Box::new(FileStore::default_location()));
    let mut state = GameState::new(args.seed);
    let mut sink = NullAudio;

    log::info!(
        "Asterfall demo starting: seed {}, {} ticks, high score {}",
        args.seed,
        args.ticks,
        ledger.high_score()
    );

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut runs = 1u32;
    let mut best_run = 0u64;

    for _ in 0..args.ticks {
        tick(&mut state, &mut ledger, &input, 1.0);
        audio::play_events(
            &mut sink,
            &mut state.rng,
            &state.events,
            settings.effective_sfx_volume(),
        );
        if state.phase == GamePhase::GameOver {
            best_run = best_run.max(ledger.score());
            runs += 1;
        }
        if args.realtime {
            std::thread::sleep(Duration::from_micros(16_667));
        }
    }
    best_run = best_run.max(ledger.score());

    println!("seed:        {}", args.seed);
    println!("runs played: {runs}");
    println!("best run:    {best_run}");
    println!("high score:  {}", ledger.high_score());
}
