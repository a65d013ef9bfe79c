//! Debate scheduling and resolution.
//!
//! A debate is {Scheduled} -> {Resolved}, resolved exactly once when the
//! week counter reaches its scheduled week (before that week's action).
//! Re-entering the week after resolution is a no-op.

use crate::state::GameState;
use campaign_core::{Debate, DebateOutcome, Demographic, Event, EventKind, GamePhase};
use tracing::{debug, info};

/// Demographics that move on debate coverage, weights summing to 1.
const NEWS_WEIGHTS: [(Demographic, f32); 6] = [
    (Demographic::Youth, 0.35),
    (Demographic::Urban, 0.30),
    (Demographic::College, 0.25),
    (Demographic::Working, 0.05),
    (Demographic::Rural, 0.03),
    (Demographic::Seniors, 0.02),
];

/// Scheduled debate weeks for a phase.
pub fn debate_weeks(phase: GamePhase) -> &'static [u32] {
    match phase {
        GamePhase::Primary => &[3, 5],
        GamePhase::General => &[3, 6, 8],
        GamePhase::Concluded => &[],
    }
}

/// Build the debate schedule for a phase, dropping any week past its end.
pub fn schedule(phase: GamePhase, weeks_in_phase: u32) -> Vec<Debate> {
    debate_weeks(phase)
        .iter()
        .filter(|w| (1..=weeks_in_phase).contains(*w))
        .map(|w| Debate::scheduled(*w, phase))
        .collect()
}

/// Resolve the debate scheduled for the current week, if any. Exactly-once:
/// the resolved flag never reverts, and a second call finds nothing to do.
pub fn resolve_due_debate(state: &mut GameState) {
    let Some(idx) = state
        .debates
        .iter()
        .position(|d| d.phase == state.phase && d.week == state.week && !d.resolved)
    else {
        return;
    };

    let t = state.config.tunables;
    let w = t.debate;
    let c = &state.candidate;

    // Performance: stats plus momentum and prep, dragged down by fatigue.
    // Stamina softens how hard fatigue bites on stage.
    let drag_per_point = (w.stamina_drag_base - c.stats.stamina as f32 * w.stamina_drag_relief)
        .max(w.stamina_drag_floor);
    let power = w.charisma_weight * c.stats.charisma as f32
        + w.discipline_weight * c.stats.discipline as f32
        + w.empathy_weight * c.stats.empathy as f32
        + w.momentum_weight * c.momentum
        - drag_per_point * c.fatigue
        + c.prep_bonus;
    let opp_power = state.opponent.skill as f32 + state.rng.gauss(0.0, w.opponent_sigma);
    let performance = state.rng.gauss(power - opp_power, w.performance_sigma);

    let (mut news_severity, momentum_delta, headline) = if performance > w.blowout_margin {
        (w.blowout_severity, w.blowout_momentum, "You dominated the debate.")
    } else if performance > w.win_margin {
        (w.win_severity, w.win_momentum, "You won the debate.")
    } else if performance > -w.win_margin {
        (0.0, w.wash_momentum, "It was a wash.")
    } else if performance > -w.blowout_margin {
        (-w.win_severity, -w.win_momentum, "You lost the debate.")
    } else {
        (-w.blowout_severity, -w.blowout_momentum, "You faceplanted on stage.")
    };

    // Zingers need charisma and a sharp tone, and even then not after a
    // total faceplant.
    let c = &state.candidate;
    let zinger_chance = (w.zinger_base
        + c.stats.charisma as f32 * w.zinger_charisma
        + c.platform.tone * w.zinger_tone
        + w.zinger_media * (state.district.media_intensity - 1.0))
        .clamp(w.zinger_min, w.zinger_max);
    let zinger = performance > w.zinger_floor && state.rng.chance(zinger_chance);

    let mut virality = 0.0;
    let mut backlash = false;
    if zinger {
        virality = (w.virality_base
            + c.platform.tone * w.virality_tone
            + (state.district.media_intensity - 1.0) * w.virality_media)
            .clamp(w.virality_min, w.virality_max);
        let backlash_chance = (w.backlash_base + c.platform.tone * w.backlash_tone
            - c.stats.empathy as f32 * w.backlash_empathy)
            .clamp(w.backlash_min, w.backlash_max);
        backlash = state.rng.chance(backlash_chance);

        state.candidate.media_capital += virality;
        if backlash {
            news_severity -= w.backlash_severity_dent;
            state.candidate.enthusiasm -= w.backlash_enthusiasm;
            state
                .log
                .push("Your zinger goes viral, but people also call it mean.".to_string());
        } else {
            news_severity += w.zinger_severity_boost;
            state.candidate.enthusiasm += w.zinger_enthusiasm;
            state
                .log
                .push("You land a zinger that becomes a clip machine.".to_string());
        }

        // A new viral moment replaces an unexpired one; it never stacks.
        state.events.retain(|e| e.kind != EventKind::EarnedMedia);
        let media_severity = if backlash {
            -virality * w.earned_media_dent
        } else {
            virality * w.earned_media_gain
        };
        state.events.push(Event::weighted(
            EventKind::EarnedMedia,
            media_severity,
            &NEWS_WEIGHTS,
            t.event_weeks,
        ));
    }

    if news_severity != 0.0 {
        state.events.push(Event::weighted(
            EventKind::NewsCycle,
            news_severity,
            &NEWS_WEIGHTS,
            t.event_weeks,
        ));
    }

    state.candidate.momentum += momentum_delta;
    state.candidate.fatigue += t.debate_fatigue;
    // Prep is spent whether or not it helped.
    state.candidate.prep_bonus = 0.0;
    state.candidate.clamp();

    let outcome = DebateOutcome {
        performance,
        zinger,
        virality,
        backlash,
    };
    state.debates[idx].resolved = true;
    state.debates[idx].outcome = Some(outcome);
    state
        .log
        .push(format!("Debate night, week {}: {}", state.week, headline));
    info!(week = state.week, performance, zinger, backlash, "debate resolved");
    debug!(?outcome, "debate outcome");
}
