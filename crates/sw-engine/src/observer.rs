//! Observer trait for progress reporting and data collection.

use sw_core::Tick;

use crate::TickReport;

/// Callbacks invoked by [`Swarm::run_ticks`][crate::Swarm::run_ticks] and
/// [`Swarm::shutdown`][crate::Swarm::shutdown].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SwarmObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {} influences", report.influences);
///         }
///     }
/// }
/// ```
pub trait SwarmObserver {
    /// Called before any processing in a tick.
    fn on_tick_start(&mut self, _tick: Tick) {}

    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}

    /// Called once after teardown with the number of transitions cancelled.
    fn on_cleanup(&mut self, _cancelled: usize) {}
}

/// A [`SwarmObserver`] that does nothing.
pub struct NoopObserver;

impl SwarmObserver for NoopObserver {}
