use sw_core::{AgentId, Millis, Tick, TransitionId};
use sw_intent::{Easing, Intent};

/// Per-request knobs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionOptions {
    /// `None` uses the engine's `default_duration_ms`.
    pub duration_ms: Option<u64>,
    pub easing:      Easing,
    /// Apply the max-jump rule.  Turning this off is for administrative resets.
    pub validate:    bool,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self { duration_ms: None, easing: Easing::default(), validate: true }
    }
}

impl TransitionOptions {
    pub fn duration(mut self, ms: u64) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn unvalidated(mut self) -> Self {
        self.validate = false;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransitionRequest {
    pub agent:   AgentId,
    /// Explicit starting intent.  `None` starts from the agent's live intent;
    /// ignored while another transition is running, since the replacement
    /// always continues from where the agent currently is.
    pub from:    Option<Intent>,
    pub to:      Intent,
    pub options: TransitionOptions,
}

impl TransitionRequest {
    pub fn new(agent: AgentId, to: Intent) -> Self {
        Self { agent, from: None, to, options: TransitionOptions::default() }
    }

    pub fn from(mut self, from: Intent) -> Self {
        self.from = Some(from);
        self
    }

    pub fn options(mut self, options: TransitionOptions) -> Self {
        self.options = options;
        self
    }
}

/// One running interpolation.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub id:          TransitionId,
    pub agent:       AgentId,
    pub from:        Intent,
    pub to:          Intent,
    pub duration_ms: u64,
    pub easing:      Easing,
    pub started_at:  Millis,
    /// Raw progress at the last step, in `[0, 1]`.
    pub progress:    f32,
    /// `true` when the max-jump rule was checked and passed; `false` when the
    /// request waived it.
    pub valid:       bool,
    /// Intent written to the agent at the last step.
    pub live:        Intent,
    /// Frame this transition is waiting for.
    pub frame:       Tick,
}

impl Transition {
    /// Raw progress at `now`: `clamp(elapsed / duration, 0, 1)`.
    /// A zero duration is complete immediately.
    pub fn raw_progress(&self, now: Millis) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let r = now.since(self.started_at) as f64 / self.duration_ms as f64;
        r.clamp(0.0, 1.0) as f32
    }
}
