#![deny(warnings)]

//! Campaign simulation engine: the weekly state-update loop, action
//! resolvers, debate engine and phase/election resolver.
//!
//! The shell (menu/CLI layer) is an external collaborator: it asks for the
//! legal actions and the current status, applies one action per week, and
//! reads back a result summary. All state lives in an explicit [`GameState`]
//! owned by the caller; all randomness flows through one seedable service.

pub mod action;
pub mod config;
pub mod debate;
pub mod gen;
pub mod phase;
pub mod rng;
pub mod state;

pub use action::{Action, ActionKind, FundraiseKind};
pub use campaign_core::{
    CandidateState, Debate, DebateOutcome, Demographic, DemographicSupport, Difficulty, District,
    EngineError, Event, EventKind, GameOutcome, GamePhase, Opponent, PolicyAxis, PolicyPlatform,
    Stats, ValidationError,
};
pub use config::{DebateWeights, EngineConfig, Tunables};
pub use state::{GameState, PlayerSetup, StatusReport};

use campaign_core::GamePhase as Phase;
use serde::Serialize;

/// Result of one applied action.
#[derive(Clone, Debug, Serialize)]
pub struct ActionResult {
    pub summary: String,
    /// Whether the action consumed the week (polling memos may not).
    pub consumed_week: bool,
    pub week: u32,
    pub phase: GamePhase,
    pub support: DemographicSupport,
    pub aggregate: f32,
    pub outcome: Option<GameOutcome>,
}

/// Start a new game from player choices and configuration.
pub fn start_game(
    difficulty: Difficulty,
    setup: PlayerSetup,
    config: EngineConfig,
) -> Result<GameState, ValidationError> {
    GameState::new(difficulty, setup, config)
}

/// Actions that are legal this week, in canonical order.
pub fn list_available_actions(state: &GameState) -> Vec<ActionKind> {
    ActionKind::ALL
        .into_iter()
        .filter(|k| k.is_available(state))
        .collect()
}

/// Apply one action. Errors are rejected synchronously before any state
/// mutation; on success the week advances unless the action was free.
pub fn apply_action(state: &mut GameState, action: &Action) -> Result<ActionResult, EngineError> {
    if state.phase == Phase::Concluded {
        return Err(EngineError::GameOver);
    }
    let kind = action.kind();
    if !kind.is_available(state) {
        return Err(EngineError::InvalidAction(kind.to_string()));
    }

    // Polling is a pure read: no mutation at all unless configured to
    // consume the week.
    if matches!(action, Action::PollingMemo) {
        let summary = action::polling_memo(state);
        let consumed = state.config.polling_consumes_week;
        if consumed {
            phase::advance_week(state);
        }
        return Ok(result(state, summary, consumed));
    }

    let summary = action::resolve(state, action)?;
    state.log.push(summary.clone());
    state.refresh_support();
    phase::advance_week(state);
    Ok(result(state, summary, true))
}

/// Snapshot of everything the shell renders.
pub fn get_status(state: &GameState) -> StatusReport {
    state.status()
}

/// Upcoming debate weeks in the current phase, soonest first.
pub fn get_debate_schedule(state: &GameState) -> Vec<u32> {
    state.debate_schedule()
}

fn result(state: &GameState, summary: String, consumed_week: bool) -> ActionResult {
    ActionResult {
        summary,
        consumed_week,
        week: state.week,
        phase: state.phase,
        support: state.support.clone(),
        aggregate: state.aggregate(),
        outcome: state.outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    fn setup() -> PlayerSetup {
        PlayerSetup {
            name: "Alex Candidate".to_string(),
            party: "Ind".to_string(),
            stats: Stats::new(50, 50, 50, 50),
            platform: PolicyPlatform::centrist(),
        }
    }

    fn quiet_config(seed: u64) -> EngineConfig {
        // Scandal rolls and the weekly ad buy off, so scenario assertions
        // isolate the action under test; constants are tunables, not
        // invariants.
        let mut config = EngineConfig {
            rng_seed: seed,
            ..EngineConfig::default()
        };
        config.tunables.scandal_base_rate = 0.0;
        config.tunables.scandal_fatigue_rate = 0.0;
        config.tunables.stumble_base_rate = 0.0;
        config.tunables.ad_budget_cap_k = 0;
        config
    }

    /// The fixed district from the spec scenarios: Working 0.4, College 0.2,
    /// Rural 0.2, Urban 0.1, Seniors 0.05, Youth 0.05.
    fn working_class_district() -> District {
        let composition: BTreeMap<Demographic, f32> = [
            (Demographic::Working, 0.4),
            (Demographic::College, 0.2),
            (Demographic::Rural, 0.2),
            (Demographic::Urban, 0.1),
            (Demographic::Seniors, 0.05),
            (Demographic::Youth, 0.05),
        ]
        .into_iter()
        .collect();
        District {
            name: "PA-08 Keystone North".to_string(),
            partisan_lean: 0.0,
            media_intensity: 1.0,
            volatility: 1.0,
            turnout_base: 0.55,
            composition,
        }
    }

    fn game_in(district: District, seed: u64) -> GameState {
        let mut state = start_game(Difficulty::Normal, setup(), quiet_config(seed)).unwrap();
        state.district = district;
        state.refresh_support();
        state
    }

    #[test]
    fn grassroots_fundraise_lifts_working_support_and_funds() {
        let mut state = game_in(working_class_district(), 11);
        let baseline = state.support.clone();
        let funds_before = state.candidate.funds;

        let result =
            apply_action(&mut state, &Action::Fundraise(FundraiseKind::Grassroots)).unwrap();

        assert!(state.candidate.funds > funds_before);
        assert!(result.consumed_week);
        assert!(state.support.get(Demographic::Working) > baseline.get(Demographic::Working));
        for d in Demographic::ALL {
            assert!(state.support.get(d) >= baseline.get(d));
        }
    }

    #[test]
    fn week_three_debate_resolves_exactly_once_on_entry() {
        let mut state = game_in(working_class_district(), 12);
        apply_action(&mut state, &Action::Rest).unwrap();
        assert_eq!(state.week, 2);
        assert!(!state.debates[0].resolved);

        apply_action(&mut state, &Action::Rest).unwrap();
        assert_eq!(state.week, 3);
        let debate = &state.debates[0];
        assert!(debate.resolved);
        let outcome = debate.outcome.expect("non-null outcome");
        assert!(outcome.performance.is_finite());
        assert!(outcome.virality >= 0.0);

        // Staying in or re-entering the week adds nothing.
        let resolved_count = |s: &GameState| s.debates.iter().filter(|d| d.resolved).count();
        assert_eq!(resolved_count(&state), 1);
        debate::resolve_due_debate(&mut state);
        assert_eq!(resolved_count(&state), 1);
    }

    #[test]
    fn insufficient_funds_rejects_without_any_mutation() {
        let mut state = game_in(working_class_district(), 13);
        state.candidate.funds = Decimal::from(3);
        state.refresh_support();
        let before = serde_json::to_string(&state).unwrap();

        let err = apply_action(&mut state, &Action::Canvass).unwrap_err();
        assert_eq!(
            err,
            EngineError::InsufficientResources {
                needed: Decimal::from(8),
                available: Decimal::from(3),
            }
        );
        // Funds, momentum, fatigue, support: all exactly as they were.
        assert_eq!(serde_json::to_string(&state).unwrap(), before);
        assert_eq!(state.week, 1);
    }

    #[test]
    fn polling_memo_is_free_and_side_effect_free_by_default() {
        let mut state = game_in(working_class_district(), 14);
        let before = serde_json::to_string(&state).unwrap();
        let a = apply_action(&mut state, &Action::PollingMemo).unwrap();
        let b = apply_action(&mut state, &Action::PollingMemo).unwrap();
        assert!(!a.consumed_week);
        assert_eq!(a.summary, b.summary);
        assert_eq!(serde_json::to_string(&state).unwrap(), before);
    }

    #[test]
    fn polling_memo_can_be_configured_to_consume_the_week() {
        let mut config = quiet_config(15);
        config.polling_consumes_week = true;
        let mut state = start_game(Difficulty::Normal, setup(), config).unwrap();
        let result = apply_action(&mut state, &Action::PollingMemo).unwrap();
        assert!(result.consumed_week);
        assert_eq!(state.week, 2);
    }

    #[test]
    fn concluded_games_reject_everything() {
        let mut state = game_in(working_class_district(), 16);
        state.phase = GamePhase::Concluded;
        state.outcome = Some(GameOutcome::LostPrimary);
        assert!(list_available_actions(&state).is_empty());
        assert_eq!(
            apply_action(&mut state, &Action::Rest).unwrap_err(),
            EngineError::GameOver
        );
        assert_eq!(
            apply_action(&mut state, &Action::PollingMemo).unwrap_err(),
            EngineError::GameOver
        );
    }

    #[test]
    fn availability_tracks_the_debate_schedule() {
        let mut state = game_in(working_class_district(), 17);
        assert!(list_available_actions(&state).contains(&ActionKind::DebatePrep));
        for d in &mut state.debates {
            d.resolved = true;
        }
        let available = list_available_actions(&state);
        assert!(!available.contains(&ActionKind::DebatePrep));
        assert!(available.contains(&ActionKind::PollingMemo));
        assert_eq!(
            apply_action(&mut state, &Action::DebatePrep).unwrap_err(),
            EngineError::InvalidAction("debate-prep".to_string())
        );
    }

    #[test]
    fn identical_seeds_play_identical_campaigns() {
        let script = [
            Action::Fundraise(FundraiseKind::Grassroots),
            Action::Canvass,
            Action::DebatePrep,
            Action::Rest,
            Action::Fundraise(FundraiseKind::Mixed),
            Action::Canvass,
        ];
        let mut a = start_game(Difficulty::Normal, setup(), quiet_config(99)).unwrap();
        let mut b = start_game(Difficulty::Normal, setup(), quiet_config(99)).unwrap();
        for action in &script {
            let ra = apply_action(&mut a, action);
            let rb = apply_action(&mut b, action);
            match (ra, rb) {
                (Ok(x), Ok(y)) => {
                    assert_eq!(x.summary, y.summary);
                    assert_eq!(x.support, y.support);
                }
                (Err(x), Err(y)) => assert_eq!(x, y),
                _ => panic!("runs diverged"),
            }
            if a.phase == GamePhase::Concluded {
                break;
            }
        }
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn a_full_game_played_through_the_api_concludes() {
        let mut state = start_game(Difficulty::Easy, setup(), quiet_config(21)).unwrap();
        for _ in 0..40 {
            if state.phase == GamePhase::Concluded {
                break;
            }
            let schedule = get_debate_schedule(&state);
            let action = if state.candidate.fatigue > 6.0 {
                Action::Rest
            } else if schedule.first() == Some(&(state.week + 1)) {
                Action::DebatePrep
            } else if state.candidate.funds < Decimal::from(10) {
                Action::Fundraise(FundraiseKind::Grassroots)
            } else {
                Action::Canvass
            };
            apply_action(&mut state, &action).unwrap();
        }
        assert_eq!(state.phase, GamePhase::Concluded);
        let status = get_status(&state);
        assert!(status.outcome.is_some());
        assert!((0.0..=100.0).contains(&status.aggregate));
    }
}
