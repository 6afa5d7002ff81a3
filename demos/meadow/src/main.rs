//! meadow — a small swarm drifting across a 600 × 400 meadow.
//!
//! Three leaders start in distinct moods, each with a ring of followers.
//! Every frame the host jitters positions a little, the engine spreads moods
//! through proximity, and halfway through a calming wave is pushed at every
//! agent.  Prints a per-kind event tally and the final roster.
//!
//! ```text
//! cargo run -p meadow                      # defaults
//! cargo run -p meadow -- meadow.json       # EngineConfig from JSON
//! RUST_LOG=sw_transition=debug cargo run -p meadow
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sw_agent::{AgentSpec, Role};
use sw_contagion::Impulse;
use sw_core::{EngineConfig, Point, SimRng, Tick};
use sw_engine::{SwarmBuilder, SwarmObserver, TickReport};
use sw_events::EventKind;
use sw_intent::{EmotionalState, Intent};

// ── Constants ─────────────────────────────────────────────────────────────────

const WIDTH:         f32 = 600.0;
const HEIGHT:        f32 = 400.0;
const FOLLOWERS:     usize = 6;
const TICKS:         u64 = 300;
const WAVE_AT_TICK:  u64 = TICKS / 2;
const JITTER:        f32 = 1.5;

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Totals {
    influences: usize,
    requested:  usize,
    rejected:   usize,
    completed:  usize,
}

impl SwarmObserver for Totals {
    fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
        self.influences += report.influences;
        self.requested += report.transitions_requested;
        self.rejected += report.transitions_rejected;
        self.completed += report.completed;
        if tick.0 % 60 == 0 {
            info!(%tick, influences = report.influences, requested = report.transitions_requested, "frame");
        }
    }

    fn on_cleanup(&mut self, cancelled: usize) {
        info!(cancelled, "meadow closed");
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config() -> Result<EngineConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
        }
        None => Ok(EngineConfig::default()),
    }
}

fn mood(label: EmotionalState, activity: f32) -> Intent {
    Intent::default()
        .with_emotion(label)
        .with_activity(activity)
        .with_purpose("graze")
}

/// Three leaders with a ring of followers each.
fn roster(rng: &mut SimRng) -> Vec<AgentSpec> {
    let leaders = [
        (Point::new(120.0, 120.0), mood(EmotionalState::Excited, 0.8)),
        (Point::new(450.0, 110.0), mood(EmotionalState::Focused, 0.4)),
        (Point::new(300.0, 300.0), mood(EmotionalState::Dancing, 0.7)),
    ];
    let follower_roles = [Role::Worker, Role::Scout, Role::Guard, Role::Documenter, Role::Debugger];

    let mut specs = Vec::new();
    for (center, intent) in leaders {
        specs.push(AgentSpec::new(Role::Leader, center).intent(intent));
        for i in 0..FOLLOWERS {
            let angle = i as f32 / FOLLOWERS as f32 * std::f32::consts::TAU;
            let r: f32 = rng.gen_range(60.0..140.0);
            let p = Point::new(center.x + r * angle.cos(), center.y + r * angle.sin());
            let role = *rng.choose(&follower_roles).unwrap_or(&Role::Worker);
            specs.push(AgentSpec::new(role, p));
        }
    }
    specs
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let config = load_config()?;
    let mut rng = SimRng::new(config.seed);
    println!("=== meadow: rust_swarm behavior engine ===");
    println!("Seed: {}  |  Frames: {TICKS} × {} ms", config.seed, config.frame_interval_ms);
    println!();

    // 1. Build the swarm.
    let mut builder = SwarmBuilder::new(config);
    for spec in roster(&mut rng) {
        builder = builder.agent(spec);
    }
    let mut swarm = builder.build()?;

    // 2. Tally every event kind.
    let tally: Arc<Mutex<BTreeMap<&'static str, usize>>> = Arc::default();
    let sink = tally.clone();
    swarm.subscribe_all(move |event| {
        let mut t = sink.lock().map_err(|_| "tally lock poisoned")?;
        *t.entry(event.kind().as_str()).or_default() += 1;
        Ok(())
    });
    swarm.subscribe(EventKind::Rejected, |event| {
        tracing::warn!(agent = %event.agent(), "contagion produced a rejected jump");
        Ok(())
    });

    // 3. Run: the host moves agents, the engine does the rest.
    let mut totals = Totals::default();
    let ids: Vec<_> = swarm.registry().ids().collect();
    let t0 = Instant::now();
    for tick in 0..TICKS {
        for &id in &ids {
            if let Some(agent) = swarm.agent(id) {
                let p = agent.position;
                let next = Point::new(
                    (p.x + rng.gen_range(-JITTER..JITTER)).clamp(0.0, WIDTH),
                    (p.y + rng.gen_range(-JITTER..JITTER)).clamp(0.0, HEIGHT),
                );
                swarm.update_position(id, next)?;
            }
        }

        if tick == WAVE_AT_TICK {
            let now = swarm.clock().now();
            let calm = Impulse::new(mood(EmotionalState::Calm, 0.3)).weight(0.6);
            for &id in &ids {
                swarm.inject_wave(id, calm.clone(), now)?;
            }
            info!(%now, "calming wave injected");
        }

        swarm.run_ticks(1, &mut totals);
    }
    let elapsed = t0.elapsed();
    swarm.shutdown(&mut totals);

    // 4. Summary.
    println!("Ran {TICKS} frames in {:.3} s", elapsed.as_secs_f64());
    println!(
        "  influences {}  |  requested {}  |  rejected {}  |  completed {}",
        totals.influences, totals.requested, totals.rejected, totals.completed
    );
    if let Ok(t) = tally.lock() {
        for (kind, n) in t.iter() {
            println!("  {kind:<10} {n}");
        }
    }
    println!("  {}", swarm.status());
    println!();

    println!("{:<12} {:<12} {:<14} {:>8} {:>8}", "Agent", "Role", "Mood", "Activity", "Focus");
    println!("{}", "-".repeat(58));
    for agent in swarm.registry().iter() {
        let i = &agent.current_intent;
        println!(
            "{:<12} {:<12} {:<14} {:>8.3} {:>8.3}",
            agent.id.to_string(),
            agent.role.to_string(),
            i.emotional_state.as_str(),
            i.activity_level,
            i.focus_intensity,
        );
    }

    Ok(())
}
