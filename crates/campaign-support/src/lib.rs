#![deny(warnings)]

//! Support model: maps candidate state + district + active events to
//! per-demographic support, and aggregates it to a weighted estimate.
//!
//! Everything here is deterministic. All randomness happens upstream in
//! actions, debates and scandal rolls, and arrives as plain inputs (momentum,
//! events), so repeated calls with unchanged state give identical results.

use campaign_core::{
    CandidateState, Demographic, DemographicSupport, District, Event, Opponent, PolicyPlatform,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weights and caps of the support computation. Defaults reproduce the
/// prototype balance; every constant is a tuning knob, not an invariant.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SupportWeights {
    /// Support baseline in points, before any modifier.
    pub baseline: f32,
    /// Points of baseline shift per unit of partisan lean.
    pub lean_weight: f32,
    /// Points of swing per unit of platform fit (fit is in [-1, 1]).
    pub fit_weight: f32,
    /// Points per momentum point, capped at `momentum_cap`.
    pub momentum_weight: f32,
    pub momentum_cap: f32,
    /// Penalty points per fatigue point, capped at `fatigue_cap`.
    pub fatigue_weight: f32,
    pub fatigue_cap: f32,
    /// Tailwind points per unit of media capital, capped at `media_cap`.
    pub media_weight: f32,
    pub media_cap: f32,
}

impl Default for SupportWeights {
    fn default() -> Self {
        Self {
            baseline: 47.0,
            lean_weight: 35.0,
            fit_weight: 6.0,
            momentum_weight: 1.2,
            momentum_cap: 6.0,
            fatigue_weight: 0.15,
            fatigue_cap: 3.0,
            media_weight: 4.0,
            media_cap: 3.0,
        }
    }
}

/// The slice of candidate state the support model reads. Both the player
/// and the generated opponent can produce one, which is what lets election
/// resolution run the same model symmetrically.
#[derive(Clone, Copy, Debug)]
pub struct SupportInputs<'a> {
    pub platform: &'a PolicyPlatform,
    pub momentum: f32,
    pub fatigue: f32,
    pub media_capital: f32,
    pub ground_game: Option<&'a BTreeMap<Demographic, f32>>,
    /// +1.0 when the district's partisan lean favors this candidate,
    /// -1.0 when it favors the other side.
    pub lean_alignment: f32,
}

impl<'a> SupportInputs<'a> {
    pub fn for_candidate(candidate: &'a CandidateState) -> Self {
        Self {
            platform: &candidate.platform,
            momentum: candidate.momentum,
            fatigue: candidate.fatigue,
            media_capital: candidate.media_capital,
            ground_game: Some(&candidate.ground_game),
            lean_alignment: 1.0,
        }
    }

    /// Opponent view: neutral dynamics, mirrored lean, no ground game model.
    pub fn for_opponent(opponent: &'a Opponent) -> Self {
        Self {
            platform: &opponent.platform,
            momentum: 0.0,
            fatigue: 0.0,
            media_capital: 0.0,
            ground_game: None,
            lean_alignment: -1.0,
        }
    }
}

/// Platform fit against a demographic's ideal stances, in [-1, +1].
/// +1 is a perfect match; a monotonically decreasing function of the mean
/// absolute axis distance.
pub fn platform_fit(platform: &PolicyPlatform, demo: Demographic) -> f32 {
    let mismatch = platform.distance(&demo.ideal_stances()) / 100.0;
    (1.0 - mismatch) * 2.0 - 1.0
}

/// Compute per-demographic support from candidate inputs, the district and
/// the active events. Pure; output is always within [0, 100] per segment.
///
/// District volatility scales the swing contributed by events, never the
/// baseline. Enthusiasm deliberately does not appear here: it weights
/// turnout at election resolution, not raw support.
pub fn compute_support(
    inputs: &SupportInputs<'_>,
    district: &District,
    events: &[Event],
    weights: &SupportWeights,
) -> DemographicSupport {
    let momentum_term = (inputs.momentum * weights.momentum_weight)
        .clamp(-weights.momentum_cap, weights.momentum_cap);
    let fatigue_term = (inputs.fatigue * weights.fatigue_weight).min(weights.fatigue_cap);
    let media_term = (inputs.media_capital * weights.media_weight).min(weights.media_cap);
    let base = weights.baseline
        + inputs.lean_alignment * district.partisan_lean * weights.lean_weight
        + momentum_term
        - fatigue_term
        + media_term;

    DemographicSupport::from_fn(|demo| {
        let fit = platform_fit(inputs.platform, demo) * demo.sensitivity();
        let ground = inputs
            .ground_game
            .and_then(|g| g.get(&demo))
            .copied()
            .unwrap_or(0.0);
        let event_swing: f32 = events
            .iter()
            .map(|e| {
                let w = e.weights.get(&demo).copied().unwrap_or(0.0);
                e.severity * w * district.volatility
            })
            .sum();
        base + fit * weights.fit_weight + ground + event_swing
    })
}

/// Aggregate win estimate: the convex combination of per-demographic support
/// and district composition shares. Read-only output, always re-derived.
pub fn aggregate_support(district: &District, support: &DemographicSupport) -> f32 {
    Demographic::ALL
        .iter()
        .map(|d| district.composition.get(d).copied().unwrap_or(0.0) * support.get(*d))
        .sum()
}

/// Expected turnout fraction given district baseline and enthusiasm. The
/// election-day noise term is applied upstream by the resolver.
pub fn turnout_factor(turnout_base: f32, enthusiasm: f32) -> f32 {
    (turnout_base + (enthusiasm - 0.5) * 0.10).clamp(0.35, 0.75)
}

/// Two-way vote share from both candidates' turnout-weighted aggregates.
/// Returns 0.5 when both sides are exactly level or nothing turns out.
pub fn two_way_share(
    you_aggregate: f32,
    you_turnout: f32,
    opp_aggregate: f32,
    opp_turnout: f32,
) -> f32 {
    let yours = (you_aggregate * you_turnout).max(0.0);
    let theirs = (opp_aggregate * opp_turnout).max(0.0);
    let total = yours + theirs;
    if total <= f32::EPSILON {
        return 0.5;
    }
    yours / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_core::{EventKind, Stats};
    use proptest::prelude::*;

    fn district(lean: f32, volatility: f32) -> District {
        let mut composition = BTreeMap::new();
        composition.insert(Demographic::Working, 0.4);
        composition.insert(Demographic::College, 0.2);
        composition.insert(Demographic::Rural, 0.2);
        composition.insert(Demographic::Urban, 0.1);
        composition.insert(Demographic::Seniors, 0.05);
        composition.insert(Demographic::Youth, 0.05);
        District {
            name: "OH-07 Riverbend".to_string(),
            partisan_lean: lean,
            media_intensity: 1.0,
            volatility,
            turnout_base: 0.55,
            composition,
        }
    }

    fn candidate() -> CandidateState {
        CandidateState::new(
            "Alex",
            "Ind",
            Stats::new(50, 50, 50, 50),
            PolicyPlatform::centrist(),
        )
    }

    #[test]
    fn fit_is_perfect_on_the_ideal_platform() {
        for d in Demographic::ALL {
            let ideal = d.ideal_stances();
            assert!((platform_fit(&ideal, d) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn fit_decreases_with_distance() {
        let demo = Demographic::Working;
        let ideal = demo.ideal_stances();
        let near = PolicyPlatform::new(ideal.econ + 5.0, ideal.social, ideal.governance, ideal.tone);
        let far = PolicyPlatform::new(ideal.econ + 40.0, ideal.social, ideal.governance, ideal.tone);
        assert!(platform_fit(&near, demo) > platform_fit(&far, demo));
    }

    #[test]
    fn compute_support_is_pure() {
        let c = candidate();
        let d = district(0.1, 1.0);
        let events = vec![Event::uniform(EventKind::Scandal, -1.0, 2)];
        let w = SupportWeights::default();
        let a = compute_support(&SupportInputs::for_candidate(&c), &d, &events, &w);
        let b = compute_support(&SupportInputs::for_candidate(&c), &d, &events, &w);
        assert_eq!(a, b);
    }

    #[test]
    fn momentum_raises_and_fatigue_lowers_every_segment() {
        let d = district(0.0, 1.0);
        let w = SupportWeights::default();
        let base = candidate();
        let mut hot = base.clone();
        hot.momentum = 2.0;
        let mut tired = base.clone();
        tired.fatigue = 8.0;
        let s0 = compute_support(&SupportInputs::for_candidate(&base), &d, &[], &w);
        let s1 = compute_support(&SupportInputs::for_candidate(&hot), &d, &[], &w);
        let s2 = compute_support(&SupportInputs::for_candidate(&tired), &d, &[], &w);
        for demo in Demographic::ALL {
            assert!(s1.get(demo) > s0.get(demo));
            assert!(s2.get(demo) < s0.get(demo));
        }
    }

    #[test]
    fn volatility_scales_event_swing_not_baseline() {
        let calm = district(0.0, 0.8);
        let wild = district(0.0, 1.3);
        let c = candidate();
        let w = SupportWeights::default();
        let inputs = SupportInputs::for_candidate(&c);
        let quiet_calm = compute_support(&inputs, &calm, &[], &w);
        let quiet_wild = compute_support(&inputs, &wild, &[], &w);
        assert_eq!(quiet_calm, quiet_wild);

        let scandal = [Event::uniform(EventKind::Scandal, -6.0, 2)];
        let hit_calm = compute_support(&inputs, &calm, &scandal, &w);
        let hit_wild = compute_support(&inputs, &wild, &scandal, &w);
        for demo in Demographic::ALL {
            let drop_calm = quiet_calm.get(demo) - hit_calm.get(demo);
            let drop_wild = quiet_wild.get(demo) - hit_wild.get(demo);
            assert!(drop_wild > drop_calm);
        }
    }

    #[test]
    fn events_only_move_their_targets() {
        let d = district(0.0, 1.0);
        let c = candidate();
        let w = SupportWeights::default();
        let inputs = SupportInputs::for_candidate(&c);
        let targeted = [Event::weighted(
            EventKind::EarnedMedia,
            3.0,
            &[(Demographic::Youth, 0.7), (Demographic::Urban, 0.3)],
            2,
        )];
        let before = compute_support(&inputs, &d, &[], &w);
        let after = compute_support(&inputs, &d, &targeted, &w);
        assert!(after.get(Demographic::Youth) > before.get(Demographic::Youth));
        assert!(after.get(Demographic::Urban) > before.get(Demographic::Urban));
        assert_eq!(after.get(Demographic::Rural), before.get(Demographic::Rural));
    }

    #[test]
    fn opponent_inputs_mirror_the_lean() {
        let d = district(0.15, 1.0);
        let c = candidate();
        let opp = Opponent {
            name: "Casey Trent".to_string(),
            archetype: "Local Insider".to_string(),
            skill: 45,
            scandal_risk: 0.25,
            stats: Stats::new(45, 45, 45, 45),
            platform: PolicyPlatform::centrist(),
        };
        let w = SupportWeights::default();
        let yours = compute_support(&SupportInputs::for_candidate(&c), &d, &[], &w);
        let theirs = compute_support(&SupportInputs::for_opponent(&opp), &d, &[], &w);
        // Same platform, same district: the lean is the only difference.
        for demo in Demographic::ALL {
            assert!(yours.get(demo) > theirs.get(demo));
        }
    }

    proptest! {
        #[test]
        fn support_stays_in_bounds(
            momentum in -10.0f32..10.0,
            fatigue in 0.0f32..10.0,
            media in 0.0f32..0.7,
            lean in -0.25f32..0.25,
            severity in -50.0f32..50.0,
        ) {
            let mut c = candidate();
            c.momentum = momentum;
            c.fatigue = fatigue;
            c.media_capital = media;
            let d = district(lean, 1.3);
            let events = vec![Event::uniform(EventKind::NewsCycle, severity, 2)];
            let sup = compute_support(
                &SupportInputs::for_candidate(&c),
                &d,
                &events,
                &SupportWeights::default(),
            );
            for demo in Demographic::ALL {
                prop_assert!((0.0..=100.0).contains(&sup.get(demo)));
            }
        }

        #[test]
        fn aggregate_is_a_convex_combination(values in proptest::collection::vec(0.0f32..100.0, 6)) {
            let d = district(0.0, 1.0);
            let mut i = 0;
            let sup = DemographicSupport::from_fn(|_| {
                let v = values[i % 6];
                i += 1;
                v
            });
            let agg = aggregate_support(&d, &sup);
            let lo = Demographic::ALL.iter().map(|d| sup.get(*d)).fold(f32::MAX, f32::min);
            let hi = Demographic::ALL.iter().map(|d| sup.get(*d)).fold(f32::MIN, f32::max);
            prop_assert!(agg >= lo - 1e-3 && agg <= hi + 1e-3);
        }

        #[test]
        fn two_way_share_is_a_probability(a in 0.0f32..100.0, b in 0.0f32..100.0) {
            let share = two_way_share(a, 0.55, b, 0.55);
            prop_assert!((0.0..=1.0).contains(&share));
        }
    }
}
