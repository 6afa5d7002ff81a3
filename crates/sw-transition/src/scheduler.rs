//! Frame scheduling — the engine's stand-in for an animation-frame callback.
//!
//! A running transition asks to be stepped on the next frame; each tick the
//! manager drains only the agents due on that frame, so idle agents cost
//! nothing.  Hosts that drive frames from a real display loop can supply their
//! own [`FrameScheduler`].

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use sw_core::{AgentId, Tick};

/// Per-agent frame callbacks.  An agent holds at most one pending frame;
/// requesting again moves it.
pub trait FrameScheduler {
    /// Schedule `agent` to be stepped on `frame`.
    fn request_frame(&mut self, frame: Tick, agent: AgentId);

    /// Release `agent`'s pending frame.  Returns `false` if none was pending.
    fn cancel_frame(&mut self, agent: AgentId) -> bool;

    /// Remove and return every agent due on or before `frame`, in ascending
    /// id order.
    fn drain_due(&mut self, frame: Tick) -> Vec<AgentId>;

    /// Number of agents with a pending frame.
    fn pending(&self) -> usize;

    fn clear(&mut self);
}

/// Sparse frame → agents queue.
///
/// `BTreeMap` gives ordered draining by frame; the side index makes
/// `cancel_frame` and re-requests O(log F) instead of a full scan.
#[derive(Debug, Default)]
pub struct FrameQueue {
    inner:     BTreeMap<Tick, Vec<AgentId>>,
    scheduled: FxHashMap<AgentId, Tick>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The earliest frame with at least one queued agent.
    pub fn next_frame(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// Frame `agent` is waiting for, if any.
    pub fn frame_of(&self, agent: AgentId) -> Option<Tick> {
        self.scheduled.get(&agent).copied()
    }

    fn detach(&mut self, agent: AgentId, frame: Tick) {
        if let Some(agents) = self.inner.get_mut(&frame) {
            agents.retain(|&a| a != agent);
            if agents.is_empty() {
                self.inner.remove(&frame);
            }
        }
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self, frame: Tick, agent: AgentId) {
        if let Some(prev) = self.scheduled.insert(agent, frame) {
            if prev == frame {
                return;
            }
            self.detach(agent, prev);
        }
        self.inner.entry(frame).or_default().push(agent);
    }

    fn cancel_frame(&mut self, agent: AgentId) -> bool {
        match self.scheduled.remove(&agent) {
            Some(frame) => {
                self.detach(agent, frame);
                true
            }
            None => false,
        }
    }

    fn drain_due(&mut self, frame: Tick) -> Vec<AgentId> {
        let later = self.inner.split_off(&frame.offset(1));
        let due = std::mem::replace(&mut self.inner, later);

        let mut agents: Vec<AgentId> = due.into_values().flatten().collect();
        for agent in &agents {
            self.scheduled.remove(agent);
        }
        agents.sort_unstable();
        agents
    }

    fn pending(&self) -> usize {
        self.scheduled.len()
    }

    fn clear(&mut self) {
        self.inner.clear();
        self.scheduled.clear();
    }
}
