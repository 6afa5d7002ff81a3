//! Blend two intents at an eased progress value.
//!
//! Numeric fields interpolate linearly in eased space.  Discrete fields cannot
//! blend, so each snaps from the old to the new value at its own threshold;
//! staggering the snaps avoids one jarring jump where everything changes at
//! once.

use crate::intent::clamp_unit;
use crate::{BoundedField, Intent};

/// Eased progress at which `purpose` switches to the target value.
pub const PURPOSE_SWITCH_AT: f32 = 0.3;

/// Eased progress at which `collaboration_mode` switches.
pub const MODE_SWITCH_AT: f32 = 0.5;

/// Eased progress at which `emotional_state` switches.
pub const EMOTION_SWITCH_AT: f32 = 0.5;

/// Interpolated intent between `from` and `to` at eased progress `eased`.
///
/// `eased` is clamped to `[0, 1]`.  Each numeric result lies between its two
/// endpoints (inclusive), so bounded inputs always give a bounded output.
pub fn interpolate(from: &Intent, to: &Intent, eased: f32) -> Intent {
    let t = clamp_unit(eased);

    let mut out = Intent {
        activity_level:     0.0,
        focus_intensity:    0.0,
        social_alignment:   0.0,
        collaboration_mode: if t >= MODE_SWITCH_AT { to.collaboration_mode } else { from.collaboration_mode },
        purpose:            if t >= PURPOSE_SWITCH_AT { to.purpose.clone() } else { from.purpose.clone() },
        emotional_state:    if t >= EMOTION_SWITCH_AT { to.emotional_state } else { from.emotional_state },
    };

    for field in BoundedField::ALL {
        field.set(&mut out, lerp(field.get(from), field.get(to), t));
    }
    out
}

/// Linear interpolation that never leaves `[min(a, b), max(a, b)]`.
#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    if t >= 1.0 {
        return b;
    }
    let v = a + (b - a) * t;
    v.clamp(a.min(b), a.max(b))
}
