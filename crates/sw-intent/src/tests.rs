//! Unit tests for sw-intent.

use crate::{CollaborationMode, EmotionalState, Intent};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn low() -> Intent {
    Intent::new(0.0, 0.1, 0.2, CollaborationMode::Individual, "rest", EmotionalState::Calm)
}

fn high() -> Intent {
    Intent::new(1.0, 0.9, 0.8, CollaborationMode::Collective, "build", EmotionalState::Excited)
}

// ── Intent ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod intent_tests {
    use super::*;
    use crate::BoundedField;

    #[test]
    fn constructor_clamps_numeric_fields() {
        let i = Intent::new(1.7, -0.2, f32::NAN, CollaborationMode::Individual, "x", EmotionalState::Calm);
        assert_eq!(i.activity_level, 1.0);
        assert_eq!(i.focus_intensity, 0.0);
        assert_eq!(i.social_alignment, 0.0);
        assert!(i.is_bounded());
    }

    #[test]
    fn builder_helpers_clamp() {
        let i = Intent::default().with_activity(2.0).with_social(-1.0);
        assert_eq!(i.activity_level, 1.0);
        assert_eq!(i.social_alignment, 0.0);
    }

    #[test]
    fn distance_is_max_field_delta() {
        let a = low();
        let b = high();
        assert!((a.distance(&b) - 1.0).abs() < 1e-6);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn differs_from_detects_discrete_changes() {
        let a = Intent::default();
        assert!(!a.differs_from(&a.clone(), 1e-3));
        assert!(a.differs_from(&a.clone().with_emotion(EmotionalState::Dancing), 1e-3));
        assert!(a.differs_from(&a.clone().with_purpose("scout"), 1e-3));
        assert!(a.differs_from(&a.clone().with_mode(CollaborationMode::Collective), 1e-3));
        assert!(!a.differs_from(&a.clone().with_activity(a.activity_level + 1e-4), 1e-3));
    }

    #[test]
    fn bounded_field_get_set_roundtrip() {
        let mut i = Intent::default();
        BoundedField::FocusIntensity.set(&mut i, 0.75);
        assert_eq!(BoundedField::FocusIntensity.get(&i), 0.75);
        BoundedField::FocusIntensity.set(&mut i, 3.0);
        assert_eq!(i.focus_intensity, 1.0);
    }
}

// ── EmotionalState ────────────────────────────────────────────────────────────

#[cfg(test)]
mod emotion_tests {
    use super::*;

    #[test]
    fn ordinals_follow_declaration_order() {
        for (i, label) in EmotionalState::ALL.iter().enumerate() {
            assert_eq!(label.ordinal(), i);
        }
    }

    #[test]
    fn dominant_picks_heaviest() {
        let mut votes = [0.0; EmotionalState::COUNT];
        votes[EmotionalState::Focused.ordinal()] = 0.4;
        votes[EmotionalState::Dancing.ordinal()] = 0.9;
        assert_eq!(EmotionalState::dominant(&votes), Some(EmotionalState::Dancing));
    }

    #[test]
    fn dominant_tie_goes_to_lowest_ordinal() {
        let mut votes = [0.0; EmotionalState::COUNT];
        votes[EmotionalState::Protective.ordinal()] = 0.5;
        votes[EmotionalState::Excited.ordinal()] = 0.5;
        assert_eq!(EmotionalState::dominant(&votes), Some(EmotionalState::Excited));
    }

    #[test]
    fn dominant_none_without_votes() {
        let votes = [0.0; EmotionalState::COUNT];
        assert_eq!(EmotionalState::dominant(&votes), None);
    }

    #[test]
    fn transcendent_mode_flag() {
        assert!(CollaborationMode::Transcendent.is_transcendent());
        assert!(!CollaborationMode::Collective.is_transcendent());
    }
}

// ── Easing ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod easing_tests {
    use crate::{Easing, PHI};

    const CURVES: [Easing; 3] = [Easing::Linear, Easing::EaseOut, Easing::Smooth];

    #[test]
    fn endpoints_fixed() {
        for e in CURVES {
            assert_eq!(e.apply(0.0), 0.0, "{e}");
            assert_eq!(e.apply(1.0), 1.0, "{e}");
        }
    }

    #[test]
    fn input_clamped() {
        for e in CURVES {
            assert_eq!(e.apply(-3.0), 0.0);
            assert_eq!(e.apply(7.0), 1.0);
            assert_eq!(e.apply(f32::NAN), 0.0);
        }
    }

    #[test]
    fn monotonic() {
        for e in CURVES {
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = e.apply(i as f32 / 100.0);
                assert!(v >= prev, "{e} not monotonic at {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn smooth_starts_slower_than_quadratic_ease_out() {
        assert!(Easing::Smooth.apply(0.5) < Easing::Linear.apply(0.5));
        assert!(Easing::EaseOut.apply(0.5) > Easing::Linear.apply(0.5));
        assert!((Easing::Smooth.apply(0.5) - 0.5f32.powf(PHI)).abs() < 1e-6);
        assert!((Easing::EaseOut.apply(0.5) - 0.75).abs() < 1e-6);
    }
}

// ── Interpolation ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod interpolate_tests {
    use super::*;
    use crate::{interpolate, Easing};

    #[test]
    fn endpoints_reproduce_inputs() {
        let (a, b) = (low(), high());
        assert_eq!(interpolate(&a, &b, 0.0), a);
        assert_eq!(interpolate(&a, &b, 1.0), b);
    }

    #[test]
    fn discrete_fields_snap_at_staggered_thresholds() {
        let (a, b) = (low(), high());

        let at_029 = interpolate(&a, &b, 0.29);
        assert_eq!(at_029.purpose, "rest");
        assert_eq!(at_029.emotional_state, EmotionalState::Calm);

        let at_030 = interpolate(&a, &b, 0.30);
        assert_eq!(at_030.purpose, "build");
        assert_eq!(at_030.collaboration_mode, CollaborationMode::Individual);
        assert_eq!(at_030.emotional_state, EmotionalState::Calm);

        let at_050 = interpolate(&a, &b, 0.50);
        assert_eq!(at_050.collaboration_mode, CollaborationMode::Collective);
        assert_eq!(at_050.emotional_state, EmotionalState::Excited);
    }

    #[test]
    fn numeric_fields_blend_linearly_in_eased_space() {
        let (a, b) = (low(), high());
        let mid = interpolate(&a, &b, 0.5);
        assert!((mid.activity_level - 0.5).abs() < 1e-6);
        assert!((mid.focus_intensity - 0.5).abs() < 1e-6);
        assert!((mid.social_alignment - 0.5).abs() < 1e-6);
    }

    #[test]
    fn bounded_at_every_sampled_progress() {
        let pairs = [(low(), high()), (high(), low()), (Intent::default(), high())];
        for easing in [Easing::Linear, Easing::EaseOut, Easing::Smooth] {
            for (from, to) in &pairs {
                for i in 0..=200 {
                    let raw = i as f32 / 200.0;
                    let out = interpolate(from, to, easing.apply(raw));
                    assert!(out.is_bounded(), "{easing} at {raw}: {out}");
                    // Never overshoots the target.
                    for (x, lo, hi) in [
                        (out.activity_level, from.activity_level, to.activity_level),
                        (out.focus_intensity, from.focus_intensity, to.focus_intensity),
                        (out.social_alignment, from.social_alignment, to.social_alignment),
                    ] {
                        assert!(x >= lo.min(hi) && x <= lo.max(hi));
                    }
                }
            }
        }
    }
}
