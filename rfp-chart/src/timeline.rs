//! Timeline chart controller.
//!
//! [`TimelineChart`] owns one chart engine and plays the staged reveal over
//! it. Its lifecycle is a small state machine:
//!
//! ```text
//! Uninitialized            construction failed; every operation is a no-op
//! Ready ──play──▶ Animating ──last step──▶ Ready
//!   any ──destroy──▶ Destroyed
//! ```
//!
//! A scroll-triggered play only starts the first reveal. An explicit replay
//! cancels whatever step is pending and starts over from zero points.
//!
//! The controller is cheaply cloneable (via `Rc`) so that event listeners and
//! timer callbacks can share it on a single thread.

use crate::engine::{ChartBackend, ChartEngine, ChartSetup, Series};
use crate::labels::inflation_axis_title;
use crate::reveal::{RevealPlan, RevealStep};
use crate::scheduler::Scheduler;
use rfp_core::chart_data::{ChartData, TimePoint};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartState {
    Uninitialized,
    Ready,
    Animating,
    Destroyed,
}

/// Which data-point series is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartView {
    #[default]
    Nominal,
    InflationAdjusted,
}

/// Snapshot taken when a reveal starts.
struct Reveal {
    points: Vec<TimePoint>,
    trend: Vec<TimePoint>,
    plan: RevealPlan,
}

struct Inner<E> {
    state: ChartState,
    engine: Option<E>,
    data: ChartData,
    view: ChartView,
    has_played: bool,
    reveal: Option<Reveal>,
}

impl<E> Inner<E> {
    fn active_points(&self) -> &[TimePoint] {
        match self.view {
            ChartView::Nominal => &self.data.data,
            ChartView::InflationAdjusted => self
                .data
                .inflation_points()
                .map(|inflation| inflation.data.as_slice())
                .unwrap_or(&self.data.data),
        }
    }

    fn is_live(&self) -> bool {
        matches!(self.state, ChartState::Ready | ChartState::Animating)
    }
}

struct Shared<E, S: Scheduler> {
    scheduler: S,
    inner: RefCell<Inner<E>>,
    /// Handle of the next reveal step; dropping it cancels the step.
    pending: RefCell<Option<S::Handle>>,
}

pub struct TimelineChart<E, S: Scheduler> {
    shared: Rc<Shared<E, S>>,
}

impl<E, S: Scheduler> Clone for TimelineChart<E, S> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<E, S> TimelineChart<E, S>
where
    E: ChartEngine + 'static,
    S: Scheduler + 'static,
    S::Handle: 'static,
{
    /// Build the chart on `canvas_id` showing the full data.
    ///
    /// Construction failures are logged and leave the controller
    /// `Uninitialized`; they are never returned to the caller.
    pub fn new<B>(backend: &B, canvas_id: &str, data: ChartData, scheduler: S) -> Self
    where
        B: ChartBackend<Engine = E>,
    {
        let created = {
            let setup = ChartSetup {
                title: &data.title,
                y_axis_title: &data.y_axis_title,
                points: &data.data,
                trend: data.trend_points().unwrap_or(&[]),
            };
            backend.create(canvas_id, &setup)
        };
        let (state, engine) = match created {
            Ok(engine) => {
                log::info!(
                    "timeline: chart ready on '{}' with {} points",
                    canvas_id,
                    data.data.len()
                );
                (ChartState::Ready, Some(engine))
            }
            Err(e) => {
                log::error!("timeline: {}", e);
                (ChartState::Uninitialized, None)
            }
        };

        Self {
            shared: Rc::new(Shared {
                scheduler,
                inner: RefCell::new(Inner {
                    state,
                    engine,
                    data,
                    view: ChartView::Nominal,
                    has_played: false,
                    reveal: None,
                }),
                pending: RefCell::new(None),
            }),
        }
    }

    pub fn state(&self) -> ChartState {
        self.shared.inner.borrow().state
    }

    pub fn view(&self) -> ChartView {
        self.shared.inner.borrow().view
    }

    pub fn has_played(&self) -> bool {
        self.shared.inner.borrow().has_played
    }

    pub fn has_inflation_data(&self) -> bool {
        self.shared.inner.borrow().data.inflation_points().is_some()
    }

    /// The chart scrolled into view. Starts the reveal only if the chart is
    /// `Ready` and has never played; returns whether a reveal started.
    pub fn on_visible(&self) -> bool {
        let start = {
            let inner = self.shared.inner.borrow();
            inner.state == ChartState::Ready && !inner.has_played
        };
        if start {
            self.start_reveal();
        }
        start
    }

    /// Restart the reveal from zero points, cancelling any reveal in flight.
    /// Returns `false` if the chart is not live.
    pub fn replay(&self) -> bool {
        if !self.shared.inner.borrow().is_live() {
            return false;
        }
        self.cancel_pending();
        {
            let mut inner = self.shared.inner.borrow_mut();
            inner.has_played = false;
            inner.reveal = None;
        }
        self.start_reveal();
        true
    }

    /// Switch the displayed data-point series.
    ///
    /// The trend line always stays the nominal fit. Switching to the
    /// inflation-adjusted view without inflation data changes nothing and
    /// returns `false`. A reveal in flight is completed immediately.
    pub fn set_view(&self, view: ChartView) -> bool {
        let was_animating = {
            let mut inner = self.shared.inner.borrow_mut();
            if !inner.is_live() {
                return false;
            }
            let (series, title) = match view {
                ChartView::Nominal => (inner.data.data.clone(), inner.data.y_axis_title.clone()),
                ChartView::InflationAdjusted => match inner.data.inflation_points() {
                    Some(inflation) => (inflation.data.clone(), inflation_axis_title(inflation)),
                    None => {
                        log::warn!("timeline: no inflation data, keeping nominal view");
                        return false;
                    }
                },
            };
            let trend = inner.data.trend_points().map(<[TimePoint]>::to_vec);

            let was_animating = inner.state == ChartState::Animating;
            inner.view = view;
            inner.reveal = None;
            inner.state = ChartState::Ready;

            if let Some(engine) = inner.engine.as_mut() {
                engine.set_series(Series::Points, &series);
                if was_animating {
                    engine.set_series(Series::Trend, trend.as_deref().unwrap_or(&[]));
                }
                engine.set_y_axis_title(&title);
                engine.update();
            }
            was_animating
        };
        if was_animating {
            self.cancel_pending();
        }
        log::info!("timeline: switched to {:?} view", view);
        true
    }

    /// Release the chart engine. The controller does nothing afterwards.
    pub fn destroy(&self) {
        self.cancel_pending();
        let mut inner = self.shared.inner.borrow_mut();
        inner.reveal = None;
        if let Some(mut engine) = inner.engine.take() {
            engine.destroy();
        }
        inner.state = ChartState::Destroyed;
        log::info!("timeline: chart destroyed");
    }

    fn cancel_pending(&self) {
        let cancelled = self.shared.pending.borrow_mut().take();
        drop(cancelled);
    }

    fn start_reveal(&self) {
        {
            let mut inner = self.shared.inner.borrow_mut();
            let points = inner.active_points().to_vec();
            let trend = inner
                .data
                .trend_points()
                .map(<[TimePoint]>::to_vec)
                .unwrap_or_default();
            let plan = RevealPlan::new(points.len(), trend.len(), &inner.data.animation);

            if let Some(engine) = inner.engine.as_mut() {
                engine.set_series(Series::Points, &[]);
                engine.set_series(Series::Trend, &[]);
                engine.update();
            }
            log::debug!("timeline: reveal of {} steps started", plan.len());
            inner.has_played = true;
            inner.state = ChartState::Animating;
            inner.reveal = Some(Reveal {
                points,
                trend,
                plan,
            });
        }
        Self::queue_next(&self.shared);
    }

    /// Schedule the next step of the current reveal, or finish it.
    fn queue_next(shared: &Rc<Shared<E, S>>) {
        let next = {
            let mut inner = shared.inner.borrow_mut();
            inner.reveal.as_mut().and_then(|reveal| reveal.plan.next())
        };
        match next {
            Some((delay, step)) => {
                let weak = Rc::downgrade(shared);
                let handle = shared.scheduler.schedule(
                    delay,
                    Box::new(move || {
                        if let Some(shared) = weak.upgrade() {
                            Self::apply_step(&shared, step);
                        }
                    }),
                );
                *shared.pending.borrow_mut() = Some(handle);
            }
            None => Self::finish(shared),
        }
    }

    fn apply_step(shared: &Rc<Shared<E, S>>, step: RevealStep) {
        {
            let mut inner = shared.inner.borrow_mut();
            if inner.state != ChartState::Animating {
                return;
            }
            let Inner { engine, reveal, .. } = &mut *inner;
            if let (Some(engine), Some(reveal)) = (engine.as_mut(), reveal.as_ref()) {
                match step {
                    RevealStep::Point(index) => {
                        if let Some(point) = reveal.points.get(index) {
                            engine.push_point(Series::Points, point);
                        }
                    }
                    RevealStep::Trend(count) => {
                        let count = count.min(reveal.trend.len());
                        engine.set_series(Series::Trend, &reveal.trend[..count]);
                    }
                }
                engine.update();
            }
        }
        Self::queue_next(shared);
    }

    fn finish(shared: &Rc<Shared<E, S>>) {
        {
            let mut inner = shared.inner.borrow_mut();
            inner.reveal = None;
            if inner.state == ChartState::Animating {
                inner.state = ChartState::Ready;
            }
        }
        let finished = shared.pending.borrow_mut().take();
        drop(finished);
        log::debug!("timeline: reveal complete");
    }
}
