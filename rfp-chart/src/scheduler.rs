//! One-shot timers with drop-to-cancel handles.
//!
//! The browser implementation wraps `setTimeout` (see `rfp-chart-ui`).
//! [`ManualScheduler`] runs the same tasks against a virtual clock that only
//! moves when told to, which makes reveal sequences deterministic in tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Runs a task once after a delay.
pub trait Scheduler {
    /// Dropping the handle cancels the task if it has not run yet.
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

struct Entry {
    due: u64,
    seq: u64,
    cancelled: Rc<Cell<bool>>,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: u64,
    seq: u64,
    queue: Vec<Entry>,
}

/// Scheduler driven by explicit [`advance`](ManualScheduler::advance) calls.
///
/// Cheaply cloneable; clones share one clock and queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

/// Handle returned by [`ManualScheduler`].
pub struct ManualHandle {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualHandle {
        let cancelled = Rc::new(Cell::new(false));
        let mut clock = self.clock.borrow_mut();
        let entry = Entry {
            due: clock.now + u64::from(delay_ms),
            seq: clock.seq,
            cancelled: cancelled.clone(),
            task,
        };
        clock.seq += 1;
        clock.queue.push(entry);
        ManualHandle { cancelled }
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    /// Number of tasks still waiting to run.
    pub fn pending(&self) -> usize {
        self.clock
            .borrow()
            .queue
            .iter()
            .filter(|e| !e.cancelled.get())
            .count()
    }

    /// Move the clock forward by `ms`, running every task that falls due, in
    /// due-time order. Tasks scheduled by running tasks are picked up if they
    /// fall due within the same window. Returns the number of tasks run.
    pub fn advance(&self, ms: u64) -> usize {
        let target = self.now() + ms;
        let mut ran = 0;
        while let Some(task) = self.pop_due(target) {
            task();
            ran += 1;
        }
        self.clock.borrow_mut().now = target;
        ran
    }

    /// Run tasks until none remain. Returns the number of tasks run.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.pop_due(u64::MAX) {
            task();
            ran += 1;
        }
        ran
    }

    fn pop_due(&self, limit: u64) -> Option<Box<dyn FnOnce()>> {
        let mut clock = self.clock.borrow_mut();
        clock.queue.retain(|e| !e.cancelled.get());
        let next = clock
            .queue
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= limit)
            .min_by_key(|(_, e)| (e.due, e.seq))
            .map(|(i, _)| i)?;
        let entry = clock.queue.swap_remove(next);
        clock.now = clock.now.max(entry.due);
        Some(entry.task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnOnce()>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let make = move |name: &'static str| {
            let sink = sink.clone();
            Box::new(move || sink.borrow_mut().push(name)) as Box<dyn FnOnce()>
        };
        (log, make)
    }

    #[test]
    fn runs_tasks_in_due_order() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        let _b = scheduler.schedule(20, task("b"));
        let _a = scheduler.schedule(10, task("a"));
        let _c = scheduler.schedule(20, task("c"));

        assert_eq!(scheduler.advance(15), 1);
        assert_eq!(*log.borrow(), vec!["a"]);
        assert_eq!(scheduler.now(), 15);

        assert_eq!(scheduler.advance(5), 2);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn dropping_handle_cancels() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        let handle = scheduler.schedule(10, task("cancelled"));
        let _kept = scheduler.schedule(10, task("kept"));
        drop(handle);
        assert_eq!(scheduler.pending(), 1);
        scheduler.advance(10);
        assert_eq!(*log.borrow(), vec!["kept"]);
    }

    #[test]
    fn tasks_scheduled_while_running_are_picked_up() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let inner_handle: Rc<RefCell<Option<ManualHandle>>> = Rc::new(RefCell::new(None));

        let (s, l, h) = (scheduler.clone(), log.clone(), inner_handle.clone());
        let _outer = scheduler.schedule(
            5,
            Box::new(move || {
                l.borrow_mut().push(s.now());
                let l2 = l.clone();
                let s2 = s.clone();
                *h.borrow_mut() = Some(s.schedule(5, Box::new(move || l2.borrow_mut().push(s2.now()))));
            }),
        );

        assert_eq!(scheduler.advance(10), 2);
        assert_eq!(*log.borrow(), vec![5, 10]);
    }

    #[test]
    fn run_until_idle_drains_queue() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        let _a = scheduler.schedule(1000, task("late"));
        assert_eq!(scheduler.run_until_idle(), 1);
        assert_eq!(*log.borrow(), vec!["late"]);
        assert_eq!(scheduler.now(), 1000);
    }
}
