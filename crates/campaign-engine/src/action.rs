//! Action kinds, availability predicates and resolvers.
//!
//! One resolver per action kind. Every resolver validates before it mutates,
//! so a failed action leaves the game exactly as it was (all-or-nothing per
//! action).

use crate::state::GameState;
use campaign_core::{Demographic, EngineError, GamePhase, PolicyAxis};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Where the money comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundraiseKind {
    /// Most cash; the grassroots notice.
    Corporate,
    /// Less cash; builds enthusiasm and the base.
    Grassroots,
    /// Middle of the road, fewer side effects.
    Mixed,
}

/// A concrete weekly action with its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Fundraise(FundraiseKind),
    Canvass,
    AdjustPlatform { axis: PolicyAxis, step: f32 },
    DebatePrep,
    Rest,
    PollingMemo,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Fundraise(_) => ActionKind::Fundraise,
            Action::Canvass => ActionKind::Canvass,
            Action::AdjustPlatform { .. } => ActionKind::AdjustPlatform,
            Action::DebatePrep => ActionKind::DebatePrep,
            Action::Rest => ActionKind::Rest,
            Action::PollingMemo => ActionKind::PollingMemo,
        }
    }
}

/// Action kind without parameters, for availability listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionKind {
    Fundraise,
    Canvass,
    AdjustPlatform,
    DebatePrep,
    Rest,
    PollingMemo,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::Fundraise,
        ActionKind::Canvass,
        ActionKind::AdjustPlatform,
        ActionKind::DebatePrep,
        ActionKind::Rest,
        ActionKind::PollingMemo,
    ];

    /// Explicit legality predicate over game state. The shell and the tests
    /// query this instead of duplicating scattered conditionals.
    pub fn is_available(self, state: &GameState) -> bool {
        if state.phase == GamePhase::Concluded {
            return false;
        }
        match self {
            // Prep only pays off while a debate is still ahead this phase.
            ActionKind::DebatePrep => !state.debate_schedule().is_empty(),
            _ => true,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::Fundraise => "fundraise",
            ActionKind::Canvass => "canvass",
            ActionKind::AdjustPlatform => "adjust-platform",
            ActionKind::DebatePrep => "debate-prep",
            ActionKind::Rest => "rest",
            ActionKind::PollingMemo => "polling-memo",
        };
        f.write_str(s)
    }
}

/// Resolve a (non-polling) action against the candidate. Returns the result
/// summary; the caller refreshes support and advances the week.
pub fn resolve(state: &mut GameState, action: &Action) -> Result<String, EngineError> {
    let t = state.config.tunables;
    match *action {
        Action::Fundraise(kind) => {
            let c = &state.candidate;
            let base = t.fundraise_base
                + c.stats.discipline as f32 * t.fundraise_discipline
                + c.name_recognition * t.fundraise_name_recognition;
            let summary = match kind {
                FundraiseKind::Corporate => {
                    let raised = draw_funds(state, base + t.corporate_bonus, t.corporate_sigma);
                    state.candidate.funds += raised;
                    state.candidate.momentum -= 0.4;
                    state.candidate.enthusiasm -= 0.03;
                    let erosion = -t.ground_game_step * 0.5;
                    state.candidate.add_ground_game(Demographic::Working, erosion);
                    state.candidate.add_ground_game(Demographic::Youth, erosion);
                    state.candidate.scandal_pressure += t.corporate_scandal_pressure;
                    format!("Fundraising (corporate): +${raised}k; the base grumbles.")
                }
                FundraiseKind::Grassroots => {
                    let raised = draw_funds(state, base - t.grassroots_malus, t.grassroots_sigma);
                    state.candidate.funds += raised;
                    state.candidate.momentum += 0.3;
                    state.candidate.enthusiasm += 0.03;
                    state
                        .candidate
                        .add_ground_game(Demographic::Working, t.ground_game_step);
                    state
                        .candidate
                        .add_ground_game(Demographic::Youth, t.ground_game_step);
                    format!("Fundraising (grassroots): +${raised}k; enthusiasm up.")
                }
                FundraiseKind::Mixed => {
                    let raised = draw_funds(state, base, t.mixed_sigma);
                    state.candidate.funds += raised;
                    format!("Fundraising (mixed): +${raised}k.")
                }
            };
            state.candidate.fatigue += t.fundraise_fatigue;
            state.candidate.clamp();
            Ok(summary)
        }
        Action::Canvass => {
            let cost = Decimal::from(t.canvass_cost_k);
            if state.candidate.funds < cost {
                return Err(EngineError::InsufficientResources {
                    needed: cost,
                    available: state.candidate.funds,
                });
            }
            state.candidate.funds -= cost;
            let c = &state.candidate;
            // Field work lands hardest where the district actually lives:
            // the top two composition demographics, split 60/40.
            let gain = (0.4 + c.enthusiasm * 0.6)
                * (1.0 + c.stats.empathy as f32 / 140.0)
                * (1.0 + c.stats.discipline as f32 / 250.0);
            let targets = state.district.by_share();
            let (first, second) = (targets[0].0, targets[1].0);
            state.candidate.add_ground_game(first, gain * 0.6);
            state.candidate.add_ground_game(second, gain * 0.4);
            state.candidate.name_recognition += 0.015;
            state.candidate.enthusiasm += 0.02;
            state.candidate.momentum += 0.2;
            state.candidate.fatigue += t.canvass_fatigue;
            state.candidate.clamp();
            debug!(%first, %second, gain, "canvass");
            Ok(format!(
                "Canvassing (-${}k): ground game builds with {first} and {second}.",
                t.canvass_cost_k
            ))
        }
        Action::AdjustPlatform { axis, step } => {
            if !step.is_finite() || step.abs() > t.adjust_max_step {
                return Err(EngineError::InvalidPlatformAdjustment {
                    axis,
                    current: state.candidate.platform.axis(axis),
                    step,
                });
            }
            let old = state.candidate.platform.axis(axis);
            state.candidate.platform.shift(axis, step)?;
            state.candidate.momentum += 0.15;
            state.candidate.fatigue += t.adjust_fatigue;
            state.candidate.clamp();
            Ok(format!(
                "Policy shift on {axis}: {old:.0} -> {:.0}.",
                state.candidate.platform.axis(axis)
            ))
        }
        Action::DebatePrep => {
            let c = &mut state.candidate;
            c.prep_bonus =
                (c.prep_bonus + t.prep_base + c.stats.discipline as f32 * t.prep_discipline)
                    .min(t.prep_cap);
            c.momentum += 0.1;
            c.fatigue += t.prep_fatigue;
            c.clamp();
            Ok("Debate prep: message drills, oppo research, rehearsed pivots.".to_string())
        }
        Action::Rest => {
            let c = &mut state.candidate;
            c.fatigue -= t.rest_recovery;
            c.momentum += 0.05;
            c.clamp();
            Ok("You rest and reset.".to_string())
        }
        // Handled by the caller; it must not reach a mutating resolver.
        Action::PollingMemo => Ok(polling_memo(state)),
    }
}

/// Render the polling memo from current support. Pure read.
pub fn polling_memo(state: &GameState) -> String {
    let mut memo = format!(
        "POLLING MEMO ({}) — overall support {:.1}%\n",
        state.phase,
        state.aggregate()
    );
    for (demo, share) in state.district.by_share() {
        let sup = state.support.get(demo);
        memo.push_str(&format!(
            "  {demo:<10} district {:>5.1}% | support {:>5.1}% | contribution {:>5.2}\n",
            share * 100.0,
            sup,
            share * sup
        ));
    }
    memo
}

fn draw_funds(state: &mut GameState, mu: f32, sigma: f32) -> Decimal {
    let raised = state.rng.gauss(mu, sigma).max(0.0).round() as i64;
    Decimal::from(raised)
}
