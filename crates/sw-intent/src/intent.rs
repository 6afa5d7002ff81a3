//! Intent — what an agent is doing, how hard, with whom, and how it feels.

use std::fmt;

// ── CollaborationMode ─────────────────────────────────────────────────────────

/// How an agent relates to the rest of the swarm.  Ordered from the least to
/// the most elevated tier.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollaborationMode {
    #[default]
    Individual,
    Collective,
    Transcendent,
}

impl CollaborationMode {
    /// `true` for the most elevated tier, which unlocks larger behavioral
    /// leaps during validation.
    #[inline]
    pub fn is_transcendent(self) -> bool {
        matches!(self, CollaborationMode::Transcendent)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CollaborationMode::Individual   => "individual",
            CollaborationMode::Collective   => "collective",
            CollaborationMode::Transcendent => "transcendent",
        }
    }
}

impl fmt::Display for CollaborationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── EmotionalState ────────────────────────────────────────────────────────────

/// Emotional label carried by an agent.
///
/// Declaration order is the ordinal used to break voting ties: the label with
/// the lowest ordinal wins.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EmotionalState {
    #[default]
    Calm,
    Excited,
    Focused,
    Protective,
    Transcendent,
    Dancing,
}

impl EmotionalState {
    /// Every label, in ordinal order.
    pub const ALL: [EmotionalState; 6] = [
        EmotionalState::Calm,
        EmotionalState::Excited,
        EmotionalState::Focused,
        EmotionalState::Protective,
        EmotionalState::Transcendent,
        EmotionalState::Dancing,
    ];

    /// Number of labels; sizes per-label vote arrays.
    pub const COUNT: usize = Self::ALL.len();

    /// Position in [`ALL`](Self::ALL).
    #[inline]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EmotionalState::Calm         => "calm",
            EmotionalState::Excited      => "excited",
            EmotionalState::Focused      => "focused",
            EmotionalState::Protective   => "protective",
            EmotionalState::Transcendent => "transcendent",
            EmotionalState::Dancing      => "dancing",
        }
    }

    /// Pick the label with the largest weight from a per-ordinal vote array.
    ///
    /// Ties go to the lowest ordinal.  Returns `None` when no label received
    /// a positive weight.
    pub fn dominant(votes: &[f32; Self::COUNT]) -> Option<EmotionalState> {
        let mut best: Option<(EmotionalState, f32)> = None;
        for label in Self::ALL {
            let weight = votes[label.ordinal()];
            if !(weight > 0.0) {
                continue;
            }
            match best {
                Some((_, w)) if w >= weight => {}
                _ => best = Some((label, weight)),
            }
        }
        best.map(|(label, _)| label)
    }
}

impl fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── BoundedField ──────────────────────────────────────────────────────────────

/// The numeric intent fields that must stay within `[0, 1]`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundedField {
    ActivityLevel,
    FocusIntensity,
    SocialAlignment,
}

impl BoundedField {
    pub const ALL: [BoundedField; 3] = [
        BoundedField::ActivityLevel,
        BoundedField::FocusIntensity,
        BoundedField::SocialAlignment,
    ];

    #[inline]
    pub fn get(self, intent: &Intent) -> f32 {
        match self {
            BoundedField::ActivityLevel   => intent.activity_level,
            BoundedField::FocusIntensity  => intent.focus_intensity,
            BoundedField::SocialAlignment => intent.social_alignment,
        }
    }

    /// Write `value` (clamped to `[0, 1]`) into `intent`.
    #[inline]
    pub fn set(self, intent: &mut Intent, value: f32) {
        let value = clamp_unit(value);
        match self {
            BoundedField::ActivityLevel   => intent.activity_level = value,
            BoundedField::FocusIntensity  => intent.focus_intensity = value,
            BoundedField::SocialAlignment => intent.social_alignment = value,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BoundedField::ActivityLevel   => "activity_level",
            BoundedField::FocusIntensity  => "focus_intensity",
            BoundedField::SocialAlignment => "social_alignment",
        }
    }
}

impl fmt::Display for BoundedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clamp into `[0, 1]`, mapping NaN to 0.
#[inline]
pub(crate) fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

// ── Intent ────────────────────────────────────────────────────────────────────

/// An agent's behavioral descriptor at one instant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intent {
    /// How busy the agent is, in `[0, 1]`.
    pub activity_level: f32,
    /// How concentrated the agent is, in `[0, 1]`.
    pub focus_intensity: f32,
    /// How aligned with its neighbors the agent is, in `[0, 1]`.
    pub social_alignment: f32,
    pub collaboration_mode: CollaborationMode,
    /// Free-form task orientation tag (e.g. "patrol", "document").
    pub purpose: String,
    pub emotional_state: EmotionalState,
}

impl Default for Intent {
    fn default() -> Self {
        Self {
            activity_level:     0.3,
            focus_intensity:    0.5,
            social_alignment:   0.5,
            collaboration_mode: CollaborationMode::Individual,
            purpose:            String::from("idle"),
            emotional_state:    EmotionalState::Calm,
        }
    }
}

impl Intent {
    /// Build an intent; numeric fields are clamped to `[0, 1]`.
    pub fn new(
        activity_level:     f32,
        focus_intensity:    f32,
        social_alignment:   f32,
        collaboration_mode: CollaborationMode,
        purpose:            impl Into<String>,
        emotional_state:    EmotionalState,
    ) -> Self {
        Self {
            activity_level:   clamp_unit(activity_level),
            focus_intensity:  clamp_unit(focus_intensity),
            social_alignment: clamp_unit(social_alignment),
            collaboration_mode,
            purpose: purpose.into(),
            emotional_state,
        }
    }

    // ── Builder-style helpers ─────────────────────────────────────────────

    pub fn with_activity(mut self, v: f32) -> Self {
        self.activity_level = clamp_unit(v);
        self
    }

    pub fn with_focus(mut self, v: f32) -> Self {
        self.focus_intensity = clamp_unit(v);
        self
    }

    pub fn with_social(mut self, v: f32) -> Self {
        self.social_alignment = clamp_unit(v);
        self
    }

    pub fn with_mode(mut self, mode: CollaborationMode) -> Self {
        self.collaboration_mode = mode;
        self
    }

    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into();
        self
    }

    pub fn with_emotion(mut self, emotion: EmotionalState) -> Self {
        self.emotional_state = emotion;
        self
    }

    // ── Comparison ────────────────────────────────────────────────────────

    /// Largest absolute difference across the bounded numeric fields.
    pub fn distance(&self, other: &Intent) -> f32 {
        BoundedField::ALL
            .iter()
            .map(|f| (f.get(self) - f.get(other)).abs())
            .fold(0.0, f32::max)
    }

    /// `true` if any numeric field moved by more than `epsilon` or any
    /// discrete field differs.
    pub fn differs_from(&self, other: &Intent, epsilon: f32) -> bool {
        self.distance(other) > epsilon
            || self.collaboration_mode != other.collaboration_mode
            || self.emotional_state != other.emotional_state
            || self.purpose != other.purpose
    }

    /// `true` if every bounded field is inside `[0, 1]`.
    pub fn is_bounded(&self) -> bool {
        BoundedField::ALL
            .iter()
            .all(|f| (0.0..=1.0).contains(&f.get(self)))
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {} (a={:.2} f={:.2} s={:.2})",
            self.emotional_state,
            self.collaboration_mode,
            self.purpose,
            self.activity_level,
            self.focus_intensity,
            self.social_alignment,
        )
    }
}
