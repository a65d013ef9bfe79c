//! Engine configuration.
//!
//! Balance constants are explicitly provisional, so every one of them lives
//! here as a tuning knob rather than a hard-coded literal. Defaults
//! reproduce the prototype balance.

use campaign_support::SupportWeights;
use serde::{Deserialize, Serialize};

/// Simulation configuration parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for deterministic RNG.
    pub rng_seed: u64,
    /// Whether a polling memo consumes the week. The source design left this
    /// open, so it is a switch rather than a fixed choice.
    pub polling_consumes_week: bool,
    pub tunables: Tunables,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rng_seed: 42,
            polling_consumes_week: false,
            tunables: Tunables::default(),
        }
    }
}

/// Balance knobs for the weekly loop, actions, scandals and debates.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Tunables {
    pub support: SupportWeights,
    pub debate: DebateWeights,

    // Weekly drift.
    /// Momentum multiplier per week; in (0, 1) so decay never flips sign.
    pub momentum_decay: f32,
    /// Media-capital multiplier per week.
    pub media_decay: f32,
    /// Enthusiasm lost per week.
    pub enthusiasm_drift: f32,
    /// Fatigue accrued per week on top of action costs.
    pub passive_fatigue: f32,

    // Fundraising ($k).
    pub fundraise_base: f32,
    pub fundraise_discipline: f32,
    pub fundraise_name_recognition: f32,
    pub corporate_bonus: f32,
    pub corporate_sigma: f32,
    pub grassroots_malus: f32,
    pub grassroots_sigma: f32,
    pub mixed_sigma: f32,
    pub fundraise_fatigue: f32,
    /// Ground-game points grassroots money builds with Working/Youth
    /// (corporate money erodes half of this).
    pub ground_game_step: f32,

    // Canvassing.
    pub canvass_cost_k: u32,
    pub canvass_fatigue: f32,

    // Weekly ad buy.
    /// Ad spend cap per week in $k; 0 disables the buy entirely.
    pub ad_budget_cap_k: u32,
    /// Persuasion points per ad week before spend scaling.
    pub ad_base_points: f32,
    /// Extra persuasion points per $k actually spent.
    pub ad_points_per_k: f32,
    /// Name-recognition amplification of the ad bump.
    pub ad_name_recognition: f32,

    // Platform adjustment.
    /// Largest axis step a single action may request.
    pub adjust_max_step: f32,
    pub adjust_fatigue: f32,

    // Debate prep.
    pub prep_base: f32,
    pub prep_discipline: f32,
    pub prep_cap: f32,
    pub prep_fatigue: f32,

    // Rest.
    pub rest_recovery: f32,

    // Scandals and stumbles.
    pub scandal_base_rate: f32,
    pub scandal_fatigue_rate: f32,
    /// Scandal pressure added per corporate fundraise.
    pub corporate_scandal_pressure: f32,
    /// Weekly multiplier on accumulated scandal pressure; in (0, 1).
    pub scandal_pressure_decay: f32,
    pub stumble_base_rate: f32,
    /// Duration of transient events, in weeks.
    pub event_weeks: u8,

    // Debates.
    pub debate_fatigue: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            support: SupportWeights::default(),
            debate: DebateWeights::default(),
            momentum_decay: 0.85,
            media_decay: 0.35,
            enthusiasm_drift: 0.01,
            passive_fatigue: 0.5,
            fundraise_base: 12.0,
            fundraise_discipline: 0.25,
            fundraise_name_recognition: 20.0,
            corporate_bonus: 15.0,
            corporate_sigma: 6.0,
            grassroots_malus: 3.0,
            grassroots_sigma: 5.0,
            mixed_sigma: 5.0,
            fundraise_fatigue: 1.0,
            ground_game_step: 0.8,
            canvass_cost_k: 8,
            canvass_fatigue: 1.2,
            ad_budget_cap_k: 20,
            ad_base_points: 0.4,
            ad_points_per_k: 0.02,
            ad_name_recognition: 0.4,
            adjust_max_step: 8.0,
            adjust_fatigue: 0.8,
            prep_base: 4.0,
            prep_discipline: 0.04,
            prep_cap: 12.0,
            prep_fatigue: 0.9,
            rest_recovery: 2.5,
            scandal_base_rate: 0.03,
            scandal_fatigue_rate: 0.01,
            corporate_scandal_pressure: 0.04,
            scandal_pressure_decay: 0.6,
            stumble_base_rate: 0.02,
            event_weeks: 2,
            debate_fatigue: 1.5,
        }
    }
}

/// Weights of the debate resolution formulas. Like [`SupportWeights`], the
/// defaults reproduce the prototype balance; nothing here is an invariant.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DebateWeights {
    // Stage power per stat point, plus the momentum carry-over.
    pub charisma_weight: f32,
    pub discipline_weight: f32,
    pub empathy_weight: f32,
    pub momentum_weight: f32,
    /// Fatigue drag per point, before stamina relief.
    pub stamina_drag_base: f32,
    /// Drag shaved off per stamina point.
    pub stamina_drag_relief: f32,
    pub stamina_drag_floor: f32,

    // Noise around both podiums.
    pub opponent_sigma: f32,
    pub performance_sigma: f32,

    // Performance tiers and their momentum/news effects. Losses mirror the
    // win-side values with flipped sign.
    pub blowout_margin: f32,
    pub win_margin: f32,
    pub blowout_severity: f32,
    pub win_severity: f32,
    pub blowout_momentum: f32,
    pub win_momentum: f32,
    pub wash_momentum: f32,

    // Zingers: gated below a floor performance, then a chance draw.
    pub zinger_floor: f32,
    pub zinger_base: f32,
    pub zinger_charisma: f32,
    pub zinger_tone: f32,
    pub zinger_media: f32,
    pub zinger_min: f32,
    pub zinger_max: f32,

    // Virality of a landed zinger.
    pub virality_base: f32,
    pub virality_tone: f32,
    pub virality_media: f32,
    pub virality_min: f32,
    pub virality_max: f32,

    // Backlash counter-roll: tone raises it, empathy softens it.
    pub backlash_base: f32,
    pub backlash_tone: f32,
    pub backlash_empathy: f32,
    pub backlash_min: f32,
    pub backlash_max: f32,

    // How a zinger or its backlash bends the news cycle and the base.
    pub zinger_severity_boost: f32,
    pub backlash_severity_dent: f32,
    pub zinger_enthusiasm: f32,
    pub backlash_enthusiasm: f32,
    /// Earned-media event severity per unit of virality.
    pub earned_media_gain: f32,
    pub earned_media_dent: f32,
}

impl Default for DebateWeights {
    fn default() -> Self {
        Self {
            charisma_weight: 0.45,
            discipline_weight: 0.35,
            empathy_weight: 0.20,
            momentum_weight: 6.0,
            stamina_drag_base: 4.5,
            stamina_drag_relief: 1.0 / 25.0,
            stamina_drag_floor: 1.0,
            opponent_sigma: 6.0,
            performance_sigma: 8.0,
            blowout_margin: 18.0,
            win_margin: 6.0,
            blowout_severity: 2.0,
            win_severity: 1.0,
            blowout_momentum: 1.3,
            win_momentum: 0.7,
            wash_momentum: 0.1,
            zinger_floor: -8.0,
            zinger_base: 0.10,
            zinger_charisma: 1.0 / 200.0,
            zinger_tone: 1.0 / 250.0,
            zinger_media: 0.08,
            zinger_min: 0.05,
            zinger_max: 0.60,
            virality_base: 0.12,
            virality_tone: 1.0 / 300.0,
            virality_media: 0.15,
            virality_min: 0.08,
            virality_max: 0.40,
            backlash_base: 0.08,
            backlash_tone: 1.0 / 220.0,
            backlash_empathy: 1.0 / 260.0,
            backlash_min: 0.02,
            backlash_max: 0.35,
            zinger_severity_boost: 0.8,
            backlash_severity_dent: 0.6,
            zinger_enthusiasm: 0.02,
            backlash_enthusiasm: 0.03,
            earned_media_gain: 8.0,
            earned_media_dent: 4.0,
        }
    }
}
