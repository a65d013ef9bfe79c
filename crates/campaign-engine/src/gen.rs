//! District and opponent generators.

use crate::rng::RngService;
use campaign_core::{
    Demographic, Difficulty, District, GamePhase, Opponent, PolicyPlatform, Stats,
};
use std::collections::BTreeMap;

const DISTRICT_NAMES: [&str; 5] = [
    "IL-10 Lakeshore",
    "OH-07 Riverbend",
    "TX-21 Hill Country",
    "PA-08 Keystone North",
    "CA-46 Harborline",
];

const OPPONENT_NAMES: [&str; 5] = [
    "Casey Trent",
    "Morgan Vale",
    "Jordan Pike",
    "Riley Hart",
    "Avery Sloan",
];

/// Archetype table: name, skill, scandal risk, platform center.
type Archetype = (&'static str, u8, f32, PolicyPlatform);

fn archetypes(phase: GamePhase) -> [Archetype; 3] {
    match phase {
        // Primary opponents are usually weaker than the general's.
        GamePhase::Primary | GamePhase::Concluded => [
            ("Local Insider", 45, 0.25, PolicyPlatform::new(50.0, 55.0, 55.0, 45.0)),
            ("Firebrand", 50, 0.45, PolicyPlatform::new(40.0, 45.0, 60.0, 80.0)),
            ("Wealthy Self-Funder", 55, 0.30, PolicyPlatform::new(70.0, 50.0, 55.0, 50.0)),
        ],
        GamePhase::General => [
            ("Seasoned Moderate", 62, 0.20, PolicyPlatform::new(55.0, 50.0, 50.0, 35.0)),
            ("Hardline Ideologue", 65, 0.35, PolicyPlatform::new(65.0, 75.0, 70.0, 65.0)),
            ("Media-Savvy Populist", 68, 0.45, PolicyPlatform::new(45.0, 40.0, 60.0, 75.0)),
        ],
    }
}

/// Generate a district. Difficulty adjusts partisan lean, volatility, media
/// intensity and baseline turnout; composition shares always sum to 1.0.
pub fn gen_district(difficulty: Difficulty, rng: &mut RngService) -> District {
    let (partisan_lean, media_intensity, volatility, turnout_base) = match difficulty {
        Difficulty::Easy => (
            rng.range(0.05, 0.20),
            rng.range(0.85, 1.10),
            rng.range(0.85, 1.10),
            rng.range(0.52, 0.65),
        ),
        Difficulty::Normal => (
            rng.range(-0.05, 0.05),
            rng.range(0.90, 1.20),
            rng.range(0.90, 1.20),
            rng.range(0.48, 0.62),
        ),
        Difficulty::Hard => (
            rng.range(-0.20, -0.05),
            rng.range(1.05, 1.30),
            rng.range(1.05, 1.30),
            rng.range(0.45, 0.58),
        ),
    };

    let raw: Vec<f32> = Demographic::ALL.iter().map(|_| rng.range(0.05, 1.0)).collect();
    let total: f32 = raw.iter().sum();
    let composition: BTreeMap<Demographic, f32> = Demographic::ALL
        .iter()
        .zip(raw)
        .map(|(d, w)| (*d, w / total))
        .collect();

    let name = DISTRICT_NAMES[rng.pick_index(DISTRICT_NAMES.len())].to_string();
    District {
        name,
        partisan_lean,
        media_intensity,
        volatility,
        turnout_base,
        composition,
    }
}

/// Generate an opponent for the given phase, with a full platform and stats
/// so election resolution can run the support model for both sides.
pub fn gen_opponent(phase: GamePhase, rng: &mut RngService) -> Opponent {
    let pool = archetypes(phase);
    let (archetype, skill, scandal_risk, center) = pool[rng.pick_index(pool.len())];
    let name = OPPONENT_NAMES[rng.pick_index(OPPONENT_NAMES.len())].to_string();

    let jitter = |rng: &mut RngService, axis: f32| axis + rng.gauss(0.0, 5.0);
    let platform = PolicyPlatform::new(
        jitter(rng, center.econ),
        jitter(rng, center.social),
        jitter(rng, center.governance),
        jitter(rng, center.tone),
    );
    let stat = |rng: &mut RngService| (skill as f32 + rng.gauss(0.0, 6.0)).clamp(20.0, 90.0) as u8;
    let stats = Stats::new(stat(rng), stat(rng), stat(rng), stat(rng));

    Opponent {
        name,
        archetype: archetype.to_string(),
        skill,
        scandal_risk,
        stats,
        platform,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_core::validate_district;

    #[test]
    fn generated_districts_validate() {
        let mut rng = RngService::from_seed(1);
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            for _ in 0..20 {
                let d = gen_district(difficulty, &mut rng);
                validate_district(&d).unwrap();
            }
        }
    }

    #[test]
    fn difficulty_sets_the_lean_sign() {
        let mut rng = RngService::from_seed(2);
        for _ in 0..10 {
            assert!(gen_district(Difficulty::Easy, &mut rng).partisan_lean > 0.0);
            assert!(gen_district(Difficulty::Hard, &mut rng).partisan_lean < 0.0);
        }
    }

    #[test]
    fn general_opponents_outclass_primary_ones() {
        let mut rng = RngService::from_seed(3);
        let p = gen_opponent(GamePhase::Primary, &mut rng);
        let g = gen_opponent(GamePhase::General, &mut rng);
        assert!(p.skill <= 55);
        assert!(g.skill >= 62);
        campaign_core::validate_platform(&p.platform).unwrap();
        campaign_core::validate_platform(&g.platform).unwrap();
    }
}
