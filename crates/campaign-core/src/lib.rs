#![deny(warnings)]

//! Core domain models and invariants for the campaign simulation.
//!
//! This crate defines serializable types used across the engine with
//! validation helpers to guarantee basic invariants: platform axes stay in
//! range, district composition shares sum to 1.0, support values stay in
//! [0, 100].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Lower bound of every policy axis.
pub const AXIS_MIN: f32 = 0.0;
/// Upper bound of every policy axis.
pub const AXIS_MAX: f32 = 100.0;

/// Momentum is clamped to [-MOMENTUM_CAP, MOMENTUM_CAP].
pub const MOMENTUM_CAP: f32 = 10.0;
/// Fatigue is clamped to [0, FATIGUE_CAP].
pub const FATIGUE_CAP: f32 = 10.0;
/// Enthusiasm never leaves [ENTHUSIASM_FLOOR, ENTHUSIASM_CEILING].
pub const ENTHUSIASM_FLOOR: f32 = 0.2;
/// See [`ENTHUSIASM_FLOOR`].
pub const ENTHUSIASM_CEILING: f32 = 0.9;
/// Accumulated ground-game affinity per demographic is capped to +/- this.
pub const GROUND_GAME_CAP: f32 = 10.0;
/// Media capital (earned-media stock) is capped here.
pub const MEDIA_CAPITAL_CAP: f32 = 0.7;
/// Accumulated scandal pressure (extra weekly scandal probability) is
/// capped here.
pub const SCANDAL_PRESSURE_CAP: f32 = 0.25;

/// The six voter segments tracked independently.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Demographic {
    Working,
    College,
    Rural,
    Urban,
    Seniors,
    Youth,
}

impl Demographic {
    /// All segments, in canonical order.
    pub const ALL: [Demographic; 6] = [
        Demographic::Working,
        Demographic::College,
        Demographic::Rural,
        Demographic::Urban,
        Demographic::Seniors,
        Demographic::Youth,
    ];

    /// How strongly this segment reacts to platform fit.
    pub fn sensitivity(self) -> f32 {
        match self {
            Demographic::Working => 1.00,
            Demographic::College => 1.10,
            Demographic::Rural => 1.00,
            Demographic::Urban => 1.05,
            Demographic::Seniors => 0.95,
            Demographic::Youth => 1.10,
        }
    }

    /// Ideal policy stances for this segment. Balancing knobs, not a claim
    /// about real-world voters.
    pub fn ideal_stances(self) -> PolicyPlatform {
        match self {
            Demographic::Working => PolicyPlatform::new(35.0, 55.0, 65.0, 65.0),
            Demographic::College => PolicyPlatform::new(45.0, 20.0, 40.0, 25.0),
            Demographic::Rural => PolicyPlatform::new(55.0, 70.0, 60.0, 70.0),
            Demographic::Urban => PolicyPlatform::new(40.0, 15.0, 45.0, 35.0),
            Demographic::Seniors => PolicyPlatform::new(50.0, 60.0, 70.0, 30.0),
            Demographic::Youth => PolicyPlatform::new(30.0, 10.0, 35.0, 60.0),
        }
    }
}

impl fmt::Display for Demographic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Demographic::Working => "working",
            Demographic::College => "college",
            Demographic::Rural => "rural",
            Demographic::Urban => "urban",
            Demographic::Seniors => "seniors",
            Demographic::Youth => "youth",
        };
        f.pad(s)
    }
}

/// Policy axes of a platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyAxis {
    /// Socialist (0) to capitalist (100).
    Econ,
    /// Liberal (0) to conservative (100).
    Social,
    /// Legislative-first (0) to executive-first (100).
    Governance,
    /// Message-driven (0) to partisan attack (100).
    Tone,
}

impl PolicyAxis {
    /// All axes, in canonical order.
    pub const ALL: [PolicyAxis; 4] = [
        PolicyAxis::Econ,
        PolicyAxis::Social,
        PolicyAxis::Governance,
        PolicyAxis::Tone,
    ];
}

impl fmt::Display for PolicyAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PolicyAxis::Econ => "econ",
            PolicyAxis::Social => "social",
            PolicyAxis::Governance => "governance",
            PolicyAxis::Tone => "tone",
        };
        f.pad(s)
    }
}

/// Four scalar policy axes, each in [AXIS_MIN, AXIS_MAX].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyPlatform {
    pub econ: f32,
    pub social: f32,
    pub governance: f32,
    pub tone: f32,
}

impl PolicyPlatform {
    /// Build a platform, clamping each axis into its legal range.
    pub fn new(econ: f32, social: f32, governance: f32, tone: f32) -> Self {
        Self {
            econ: econ.clamp(AXIS_MIN, AXIS_MAX),
            social: social.clamp(AXIS_MIN, AXIS_MAX),
            governance: governance.clamp(AXIS_MIN, AXIS_MAX),
            tone: tone.clamp(AXIS_MIN, AXIS_MAX),
        }
    }

    /// The dead-center platform (all axes 50).
    pub fn centrist() -> Self {
        Self::new(50.0, 50.0, 50.0, 50.0)
    }

    pub fn axis(&self, axis: PolicyAxis) -> f32 {
        match axis {
            PolicyAxis::Econ => self.econ,
            PolicyAxis::Social => self.social,
            PolicyAxis::Governance => self.governance,
            PolicyAxis::Tone => self.tone,
        }
    }

    /// Apply an incremental shift to one axis. Fails if the step would push
    /// the axis out of its legal range; on failure nothing changes.
    pub fn shift(&mut self, axis: PolicyAxis, step: f32) -> Result<(), EngineError> {
        let current = self.axis(axis);
        let target = current + step;
        if !target.is_finite() || !(AXIS_MIN..=AXIS_MAX).contains(&target) {
            return Err(EngineError::InvalidPlatformAdjustment {
                axis,
                current,
                step,
            });
        }
        match axis {
            PolicyAxis::Econ => self.econ = target,
            PolicyAxis::Social => self.social = target,
            PolicyAxis::Governance => self.governance = target,
            PolicyAxis::Tone => self.tone = target,
        }
        Ok(())
    }

    /// Mean absolute axis distance to another platform, in [0, 100].
    pub fn distance(&self, other: &PolicyPlatform) -> f32 {
        ((self.econ - other.econ).abs()
            + (self.social - other.social).abs()
            + (self.governance - other.governance).abs()
            + (self.tone - other.tone).abs())
            / 4.0
    }
}

impl Default for PolicyPlatform {
    fn default() -> Self {
        Self::centrist()
    }
}

/// Fixed candidate stats, set at game start. 0..=100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub charisma: u8,
    pub discipline: u8,
    pub empathy: u8,
    pub stamina: u8,
}

impl Stats {
    pub fn new(charisma: u8, discipline: u8, empathy: u8, stamina: u8) -> Self {
        Self {
            charisma: charisma.min(100),
            discipline: discipline.min(100),
            empathy: empathy.min(100),
            stamina: stamina.min(100),
        }
    }
}

/// The player's candidate: stats, platform, resources, dynamic modifiers.
///
/// Created once at game start; mutated every week by exactly one action
/// resolver plus any debate/scandal effects; replaced only at a new game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CandidateState {
    pub name: String,
    pub party: String,
    pub stats: Stats,
    pub platform: PolicyPlatform,
    /// Campaign funds in thousands of USD.
    pub funds: Decimal,
    /// Earned-media stock in [0, MEDIA_CAPITAL_CAP]; decays weekly.
    pub media_capital: f32,
    /// Signed short-term modifier; decays toward zero each week.
    pub momentum: f32,
    /// Accumulated cost of high-intensity weeks; rested off.
    pub fatigue: f32,
    /// Extra weekly scandal probability from how the money was raised, in
    /// [0, SCANDAL_PRESSURE_CAP]; decays weekly.
    pub scandal_pressure: f32,
    /// Turnout-weighting modifier in [ENTHUSIASM_FLOOR, ENTHUSIASM_CEILING].
    pub enthusiasm: f32,
    /// Name recognition in [0, 1]; feeds fundraising.
    pub name_recognition: f32,
    /// Transient debate-prep bonus, consumed by the next resolved debate.
    pub prep_bonus: f32,
    /// Persistent per-demographic affinity built by field work, each value
    /// in [-GROUND_GAME_CAP, GROUND_GAME_CAP] support points.
    pub ground_game: BTreeMap<Demographic, f32>,
}

impl CandidateState {
    /// A fresh candidate with starting resources.
    pub fn new(name: &str, party: &str, stats: Stats, platform: PolicyPlatform) -> Self {
        Self {
            name: name.to_string(),
            party: party.to_string(),
            stats,
            platform,
            funds: Decimal::from(50),
            media_capital: 0.0,
            momentum: 0.0,
            fatigue: 0.0,
            scandal_pressure: 0.0,
            enthusiasm: 0.5,
            name_recognition: 0.2,
            prep_bonus: 0.0,
            ground_game: BTreeMap::new(),
        }
    }

    /// Re-clamp every dynamic modifier into its legal range.
    pub fn clamp(&mut self) {
        if self.funds < Decimal::ZERO {
            self.funds = Decimal::ZERO;
        }
        self.media_capital = self.media_capital.clamp(0.0, MEDIA_CAPITAL_CAP);
        self.momentum = self.momentum.clamp(-MOMENTUM_CAP, MOMENTUM_CAP);
        self.fatigue = self.fatigue.clamp(0.0, FATIGUE_CAP);
        self.scandal_pressure = self.scandal_pressure.clamp(0.0, SCANDAL_PRESSURE_CAP);
        self.enthusiasm = self.enthusiasm.clamp(ENTHUSIASM_FLOOR, ENTHUSIASM_CEILING);
        self.name_recognition = self.name_recognition.clamp(0.0, 1.0);
        self.prep_bonus = self.prep_bonus.max(0.0);
        for v in self.ground_game.values_mut() {
            *v = v.clamp(-GROUND_GAME_CAP, GROUND_GAME_CAP);
        }
    }

    /// Add to one demographic's accumulated ground-game affinity.
    pub fn add_ground_game(&mut self, demo: Demographic, delta: f32) {
        let v = self.ground_game.entry(demo).or_insert(0.0);
        *v = (*v + delta).clamp(-GROUND_GAME_CAP, GROUND_GAME_CAP);
    }
}

/// A generated opposing candidate. Carries a full platform and stats so
/// election resolution can run the support model symmetrically.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Opponent {
    pub name: String,
    pub archetype: String,
    /// Overall campaign skill, roughly 30..=80.
    pub skill: u8,
    /// Probability weight of self-inflicted scandals, in [0, 1].
    pub scandal_risk: f32,
    pub stats: Stats,
    pub platform: PolicyPlatform,
}

/// Static per-district demographic composition and environment modifiers.
/// Immutable after generation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct District {
    pub name: String,
    /// Positive favors the player, negative the opponent. Roughly +/- 0.25.
    pub partisan_lean: f32,
    /// Press appetite; scales scandal pressure and virality. 0.8..1.3.
    pub media_intensity: f32,
    /// Difficulty modifier: scales the swing of every event. 0.8..1.3.
    pub volatility: f32,
    /// Baseline turnout fraction. 0.45..0.65.
    pub turnout_base: f32,
    /// Demographic shares, summing to 1.0.
    pub composition: BTreeMap<Demographic, f32>,
}

impl District {
    /// Demographics ordered by district share, largest first.
    pub fn by_share(&self) -> Vec<(Demographic, f32)> {
        let mut rows: Vec<(Demographic, f32)> = Demographic::ALL
            .iter()
            .map(|d| (*d, self.composition.get(d).copied().unwrap_or(0.0)))
            .collect();
        rows.sort_by(|a, b| b.1.total_cmp(&a.1));
        rows
    }
}

/// Per-demographic support in [0, 100]. Always defined for all six
/// demographics; recomputed from its inputs, never patched incrementally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DemographicSupport(BTreeMap<Demographic, f32>);

impl DemographicSupport {
    /// Build support by evaluating `f` for every demographic, clamping each
    /// value into [0, 100].
    pub fn from_fn(mut f: impl FnMut(Demographic) -> f32) -> Self {
        let mut map = BTreeMap::new();
        for d in Demographic::ALL {
            map.insert(d, f(d).clamp(0.0, 100.0));
        }
        Self(map)
    }

    pub fn get(&self, demo: Demographic) -> f32 {
        self.0.get(&demo).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Demographic, f32)> + '_ {
        self.0.iter().map(|(d, v)| (*d, *v))
    }
}

/// What kind of transient event is in effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// A scandal hitting the player.
    Scandal,
    /// The opponent stepped on a rake.
    OpponentStumble,
    /// Post-debate coverage, good or bad.
    NewsCycle,
    /// A viral debate moment. Non-stacking: a new one replaces an old one.
    EarnedMedia,
}

/// A transient support modifier with a severity, affected demographics and
/// a duration in weeks. Owned by the engine's active-events list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    /// Headline support shift in points; sign carries direction. The
    /// per-demographic delta is `severity * weight * district volatility`.
    pub severity: f32,
    /// Per-demographic weights, summing to ~1.0.
    pub weights: BTreeMap<Demographic, f32>,
    pub weeks_remaining: u8,
}

impl Event {
    /// An event spread evenly over all demographics.
    pub fn uniform(kind: EventKind, severity: f32, weeks: u8) -> Self {
        let share = 1.0 / Demographic::ALL.len() as f32;
        let weights = Demographic::ALL.iter().map(|d| (*d, share)).collect();
        Self {
            kind,
            severity,
            weights,
            weeks_remaining: weeks,
        }
    }

    /// An event with explicit demographic weights.
    pub fn weighted(
        kind: EventKind,
        severity: f32,
        weights: &[(Demographic, f32)],
        weeks: u8,
    ) -> Self {
        Self {
            kind,
            severity,
            weights: weights.iter().copied().collect(),
            weeks_remaining: weeks,
        }
    }

    pub fn expired(&self) -> bool {
        self.weeks_remaining == 0
    }
}

/// Outcome of one resolved debate.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DebateOutcome {
    /// Performance score relative to the opponent; positive is a win.
    pub performance: f32,
    pub zinger: bool,
    /// Earned-media magnitude when a zinger landed, else 0.
    pub virality: f32,
    pub backlash: bool,
}

/// A scheduled debate. Resolved exactly once at its scheduled week.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Debate {
    pub week: u32,
    pub phase: GamePhase,
    pub resolved: bool,
    pub outcome: Option<DebateOutcome>,
}

impl Debate {
    pub fn scheduled(week: u32, phase: GamePhase) -> Self {
        Self {
            week,
            phase,
            resolved: false,
            outcome: None,
        }
    }
}

/// Current election stage. Transitions are one-directional:
/// Primary -> General -> Concluded, or Primary -> Concluded on a loss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Primary,
    General,
    Concluded,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GamePhase::Primary => "primary",
            GamePhase::General => "general",
            GamePhase::Concluded => "concluded",
        };
        f.pad(s)
    }
}

/// How a concluded game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    LostPrimary,
    LostGeneral,
    WonGeneral,
}

/// District generation difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

/// Errors returned by engine operations. All are rejected before any state
/// mutation; a failed call leaves the game exactly as it was.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    /// The action is not legal in the current phase/week.
    #[error("action `{0}` is not available this week")]
    InvalidAction(String),
    /// The action needs resources the candidate does not have.
    #[error("insufficient funds: need ${needed}k, have ${available}k")]
    InsufficientResources { needed: Decimal, available: Decimal },
    /// Any mutating call after the game concluded.
    #[error("the campaign is over")]
    GameOver,
    /// A platform step would push an axis out of its legal range.
    #[error("cannot shift {axis} by {step} from {current}: axis range is [0, 100]")]
    InvalidPlatformAdjustment {
        axis: PolicyAxis,
        current: f32,
        step: f32,
    },
}

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("composition shares sum to {0}, expected 1.0")]
    CompositionNotNormalized(f32),
    #[error("missing composition share for {0}")]
    MissingDemographic(Demographic),
    #[error("non-finite numeric value encountered")]
    NonFinite,
    #[error("value out of range: {0}")]
    OutOfRange(&'static str),
}

/// Tolerance for composition-share normalization checks.
pub const SHARE_TOLERANCE: f32 = 1e-3;

/// Validate a district: shares present for all six demographics, each
/// non-negative and finite, summing to 1.0 within tolerance.
pub fn validate_district(district: &District) -> Result<(), ValidationError> {
    if !(district.partisan_lean.is_finite()
        && district.media_intensity.is_finite()
        && district.volatility.is_finite()
        && district.turnout_base.is_finite())
    {
        return Err(ValidationError::NonFinite);
    }
    if district.media_intensity <= 0.0 || district.volatility <= 0.0 {
        return Err(ValidationError::OutOfRange("district modifiers must be > 0"));
    }
    if !(0.0..=1.0).contains(&district.turnout_base) {
        return Err(ValidationError::OutOfRange("turnout_base must be in [0, 1]"));
    }
    let mut sum = 0.0;
    for d in Demographic::ALL {
        let share = *district
            .composition
            .get(&d)
            .ok_or(ValidationError::MissingDemographic(d))?;
        if !share.is_finite() || share < 0.0 {
            return Err(ValidationError::NonFinite);
        }
        sum += share;
    }
    if (sum - 1.0).abs() > SHARE_TOLERANCE {
        return Err(ValidationError::CompositionNotNormalized(sum));
    }
    Ok(())
}

/// Validate a platform: all axes finite and within bounds.
pub fn validate_platform(platform: &PolicyPlatform) -> Result<(), ValidationError> {
    for axis in PolicyAxis::ALL {
        let v = platform.axis(axis);
        if !v.is_finite() {
            return Err(ValidationError::NonFinite);
        }
        if !(AXIS_MIN..=AXIS_MAX).contains(&v) {
            return Err(ValidationError::OutOfRange("platform axis out of [0, 100]"));
        }
    }
    Ok(())
}

/// Validate a candidate's dynamic fields.
pub fn validate_candidate(candidate: &CandidateState) -> Result<(), ValidationError> {
    validate_platform(&candidate.platform)?;
    if candidate.funds < Decimal::ZERO {
        return Err(ValidationError::OutOfRange("funds must be >= 0"));
    }
    let finite = candidate.momentum.is_finite()
        && candidate.fatigue.is_finite()
        && candidate.scandal_pressure.is_finite()
        && candidate.enthusiasm.is_finite()
        && candidate.media_capital.is_finite()
        && candidate.name_recognition.is_finite()
        && candidate.prep_bonus.is_finite();
    if !finite {
        return Err(ValidationError::NonFinite);
    }
    if candidate.fatigue < 0.0
        || candidate.prep_bonus < 0.0
        || candidate.media_capital < 0.0
        || candidate.scandal_pressure < 0.0
    {
        return Err(ValidationError::OutOfRange("modifier must be >= 0"));
    }
    if !(ENTHUSIASM_FLOOR..=ENTHUSIASM_CEILING).contains(&candidate.enthusiasm) {
        return Err(ValidationError::OutOfRange("enthusiasm out of bounds"));
    }
    Ok(())
}
