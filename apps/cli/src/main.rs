#![deny(warnings)]

//! Headless CLI driver: starts a seeded game and auto-plays it week by week
//! with a simple policy, printing status lines. The engine is the product;
//! this shell only exercises it.

use anyhow::Result;
use campaign_core::{Difficulty, GamePhase, PolicyPlatform, Stats};
use campaign_engine::{
    apply_action, get_debate_schedule, get_status, list_available_actions, start_game, Action,
    EngineConfig, FundraiseKind, PlayerSetup,
};
use rust_decimal::Decimal;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

struct Args {
    seed: u64,
    difficulty: Difficulty,
    dump_state: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        seed: 42,
        difficulty: Difficulty::Normal,
        dump_state: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--seed" => {
                if let Some(v) = it.next().and_then(|s| s.parse().ok()) {
                    args.seed = v;
                }
            }
            "--difficulty" => {
                args.difficulty = match it.next().as_deref() {
                    Some("easy") => Difficulty::Easy,
                    Some("hard") => Difficulty::Hard,
                    _ => Difficulty::Normal,
                };
            }
            "--dump-state" => args.dump_state = true,
            _ => {}
        }
    }
    args
}

/// One-line weekly policy: rest when ragged, prep before a debate, refill
/// the war chest when it runs low, otherwise knock doors.
fn pick_action(status_fatigue: f32, funds: Decimal, week: u32, schedule: &[u32]) -> Action {
    if status_fatigue > 6.0 {
        Action::Rest
    } else if schedule.first() == Some(&(week + 1)) {
        Action::DebatePrep
    } else if funds < Decimal::from(10) {
        Action::Fundraise(FundraiseKind::Grassroots)
    } else {
        Action::Canvass
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let args = parse_args();
    info!(seed = args.seed, difficulty = ?args.difficulty, "starting campaign");

    let setup = PlayerSetup {
        name: "Alex Candidate".to_string(),
        party: "Ind".to_string(),
        stats: Stats::new(55, 55, 50, 50),
        platform: PolicyPlatform::centrist(),
    };
    let config = EngineConfig {
        rng_seed: args.seed,
        ..EngineConfig::default()
    };
    let mut game = start_game(args.difficulty, setup, config)?;
    println!(
        "District: {} (lean {:+.2}, volatility {:.2})",
        game.district.name, game.district.partisan_lean, game.district.volatility
    );
    println!(
        "Primary opponent: {} ({}, skill {})",
        game.opponent.name, game.opponent.archetype, game.opponent.skill
    );

    // Hard stop well past the longest possible campaign.
    for _ in 0..64 {
        let status = get_status(&game);
        if status.phase == GamePhase::Concluded {
            break;
        }
        let schedule = get_debate_schedule(&game);
        let action = pick_action(status.fatigue, status.funds, status.week, &schedule);
        debug_assert!(list_available_actions(&game).contains(&action.kind()));
        let result = apply_action(&mut game, &action)?;
        println!(
            "[{} w{:>2}] support {:>5.1}% | funds ${:>4}k | momentum {:+.2} | {}",
            status.phase,
            status.week,
            result.aggregate,
            get_status(&game).funds,
            get_status(&game).momentum,
            result.summary.lines().next().unwrap_or("")
        );
    }

    let status = get_status(&game);
    match status.outcome {
        Some(outcome) => println!("Campaign over: {outcome:?}"),
        None => println!("Campaign still running after the hard stop."),
    }
    if args.dump_state {
        println!("{}", serde_json::to_string_pretty(&game)?);
    }
    Ok(())
}
