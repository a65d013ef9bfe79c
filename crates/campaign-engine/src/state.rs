//! The single owned value holding one game.
//!
//! Everything a campaign touches lives here: no process-wide state, so
//! multiple games (or property tests) can run side by side.

use crate::config::EngineConfig;
use crate::debate;
use crate::gen;
use crate::rng::RngService;
use campaign_core::{
    validate_district, validate_platform, CandidateState, Debate, DemographicSupport, Difficulty,
    District, Event, GameOutcome, GamePhase, Opponent, PolicyPlatform, Stats, ValidationError,
};
use campaign_support::{aggregate_support, compute_support, SupportInputs};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Weeks in the primary phase.
pub const PRIMARY_WEEKS: u32 = 6;
/// Weeks in the general phase.
pub const GENERAL_WEEKS: u32 = 8;

/// Player choices made at game start.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub name: String,
    pub party: String,
    pub stats: Stats,
    pub platform: PolicyPlatform,
}

/// Full state of one running game, owned by the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub config: EngineConfig,
    pub rng: RngService,
    pub district: District,
    pub candidate: CandidateState,
    pub opponent: Opponent,
    pub phase: GamePhase,
    /// 1-based week within the current phase.
    pub week: u32,
    pub weeks_in_phase: u32,
    pub debates: Vec<Debate>,
    pub events: Vec<Event>,
    /// Cached per-demographic support; recomputed from its inputs after
    /// every state-affecting change, never patched incrementally.
    pub support: DemographicSupport,
    pub outcome: Option<GameOutcome>,
    /// Human-readable campaign diary, newest last.
    pub log: Vec<String>,
}

impl GameState {
    /// Start a new game from player choices. Generates the district and the
    /// primary opponent from the configured seed.
    pub fn new(
        difficulty: Difficulty,
        setup: PlayerSetup,
        config: EngineConfig,
    ) -> Result<Self, ValidationError> {
        validate_platform(&setup.platform)?;
        let mut rng = RngService::from_seed(config.rng_seed);
        let district = gen::gen_district(difficulty, &mut rng);
        validate_district(&district)?;
        let opponent = gen::gen_opponent(GamePhase::Primary, &mut rng);
        let candidate =
            CandidateState::new(&setup.name, &setup.party, setup.stats, setup.platform);

        let mut state = Self {
            config,
            rng,
            support: compute_support(
                &SupportInputs::for_candidate(&candidate),
                &district,
                &[],
                &config.tunables.support,
            ),
            district,
            candidate,
            opponent,
            phase: GamePhase::Primary,
            week: 1,
            weeks_in_phase: PRIMARY_WEEKS,
            debates: debate::schedule(GamePhase::Primary, PRIMARY_WEEKS),
            events: Vec::new(),
            outcome: None,
            log: Vec::new(),
        };
        info!(district = %state.district.name, opponent = %state.opponent.name, "new game");
        state.log.push(format!(
            "Primary opponent: {} ({}, skill {})",
            state.opponent.name, state.opponent.archetype, state.opponent.skill
        ));
        Ok(state)
    }

    /// Recompute per-demographic support from current inputs.
    pub fn refresh_support(&mut self) {
        self.support = compute_support(
            &SupportInputs::for_candidate(&self.candidate),
            &self.district,
            &self.events,
            &self.config.tunables.support,
        );
    }

    /// Aggregate win estimate in [0, 100]. Always re-derived.
    pub fn aggregate(&self) -> f32 {
        aggregate_support(&self.district, &self.support)
    }

    /// Upcoming debate weeks in the current phase, soonest first.
    pub fn debate_schedule(&self) -> Vec<u32> {
        let mut weeks: Vec<u32> = self
            .debates
            .iter()
            .filter(|d| d.phase == self.phase && !d.resolved && d.week >= self.week)
            .map(|d| d.week)
            .collect();
        weeks.sort_unstable();
        weeks
    }

    /// Snapshot of everything the shell renders.
    pub fn status(&self) -> StatusReport {
        StatusReport {
            week: self.week,
            weeks_in_phase: self.weeks_in_phase,
            phase: self.phase,
            funds: self.candidate.funds,
            media_capital: self.candidate.media_capital,
            momentum: self.candidate.momentum,
            fatigue: self.candidate.fatigue,
            enthusiasm: self.candidate.enthusiasm,
            name_recognition: self.candidate.name_recognition,
            platform: self.candidate.platform,
            support: self.support.clone(),
            aggregate: self.aggregate(),
            outcome: self.outcome,
        }
    }
}

/// Read-only status summary for the shell.
#[derive(Clone, Debug, Serialize)]
pub struct StatusReport {
    pub week: u32,
    pub weeks_in_phase: u32,
    pub phase: GamePhase,
    pub funds: Decimal,
    pub media_capital: f32,
    pub momentum: f32,
    pub fatigue: f32,
    pub enthusiasm: f32,
    pub name_recognition: f32,
    pub platform: PolicyPlatform,
    pub support: DemographicSupport,
    pub aggregate: f32,
    pub outcome: Option<GameOutcome>,
}
