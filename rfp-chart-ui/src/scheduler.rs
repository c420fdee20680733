//! `setTimeout`-backed [`Scheduler`] for the reveal.

use gloo::timers::callback::Timeout;
use rfp_chart::Scheduler;

/// Schedules tasks on the browser event loop. Dropping the returned
/// [`Timeout`] clears it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}
