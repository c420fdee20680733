//! The staged reveal as an explicit sequence of steps.
//!
//! A reveal first adds data points one at a time, then grows the trend line
//! over a fixed number of steps. [`RevealPlan`] yields each step together with
//! the delay that precedes it; the controller applies a step, then schedules
//! the next one.

use rfp_core::chart_data::AnimationConfig;

/// Number of steps the trend line is revealed in.
pub const TREND_STEPS: usize = 50;

/// One discrete change to the live chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    /// Append the data point at this index.
    Point(usize),
    /// Show the first `n` trend points.
    Trend(usize),
}

/// Iterator over `(delay_ms, step)` pairs for one reveal.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealPlan {
    point_count: usize,
    trend_count: usize,
    point_delay: u32,
    trend_step_delay: u32,
    next_point: usize,
    next_trend_step: usize,
}

impl RevealPlan {
    /// Plan a reveal of `point_count` data points followed by `trend_count`
    /// trend points. With no trend points the plan ends after the data.
    pub fn new(point_count: usize, trend_count: usize, animation: &AnimationConfig) -> Self {
        Self {
            point_count,
            trend_count,
            point_delay: animation.point_delay,
            trend_step_delay: animation.trend_line_speed / TREND_STEPS as u32,
            next_point: 0,
            next_trend_step: 1,
        }
    }

    /// Total number of steps in the plan.
    pub fn len(&self) -> usize {
        self.point_count + if self.trend_count > 0 { TREND_STEPS } else { 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total duration of the plan in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        let points = self.point_count as u64 * u64::from(self.point_delay);
        let trend = if self.trend_count > 0 {
            TREND_STEPS as u64 * u64::from(self.trend_step_delay)
        } else {
            0
        };
        points + trend
    }
}

/// Trend points visible after `step` of [`TREND_STEPS`]:
/// `floor(trend_count * step / TREND_STEPS)`.
pub fn trend_prefix(trend_count: usize, step: usize) -> usize {
    trend_count * step / TREND_STEPS
}

impl Iterator for RevealPlan {
    type Item = (u32, RevealStep);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_point < self.point_count {
            let index = self.next_point;
            self.next_point += 1;
            return Some((self.point_delay, RevealStep::Point(index)));
        }
        if self.trend_count == 0 || self.next_trend_step > TREND_STEPS {
            return None;
        }
        let step = self.next_trend_step;
        self.next_trend_step += 1;
        Some((
            self.trend_step_delay,
            RevealStep::Trend(trend_prefix(self.trend_count, step)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_then_trend_with_default_timing() {
        let plan = RevealPlan::new(3, 10, &AnimationConfig::default());
        assert_eq!(plan.len(), 53);
        assert_eq!(plan.duration_ms(), 3 * 10 + 50 * 30);

        let steps: Vec<(u32, RevealStep)> = plan.collect();
        assert_eq!(steps.len(), 53);
        assert_eq!(steps[0], (10, RevealStep::Point(0)));
        assert_eq!(steps[2], (10, RevealStep::Point(2)));
        assert_eq!(steps[3], (30, RevealStep::Trend(0)));
        assert_eq!(steps[7], (30, RevealStep::Trend(1)));
        assert_eq!(steps[52], (30, RevealStep::Trend(10)));
    }

    #[test]
    fn trend_prefix_never_decreases_and_ends_full() {
        for count in [1usize, 7, 10, 100, 123] {
            let prefixes: Vec<usize> = (1..=TREND_STEPS).map(|s| trend_prefix(count, s)).collect();
            assert!(prefixes.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(*prefixes.last().unwrap(), count);
        }
    }

    #[test]
    fn no_trend_stops_after_points() {
        let plan = RevealPlan::new(4, 0, &AnimationConfig::default());
        let steps: Vec<_> = plan.collect();
        assert_eq!(steps.len(), 4);
        assert!(steps.iter().all(|(_, s)| matches!(s, RevealStep::Point(_))));
    }

    #[test]
    fn empty_plan() {
        let plan = RevealPlan::new(0, 0, &AnimationConfig::default());
        assert!(plan.is_empty());
        assert_eq!(plan.duration_ms(), 0);
        assert_eq!(plan.count(), 0);
    }

    #[test]
    fn custom_timing() {
        let animation = AnimationConfig {
            point_delay: 25,
            trend_line_speed: 500,
        };
        let plan = RevealPlan::new(2, 5, &animation);
        assert_eq!(plan.duration_ms(), 2 * 25 + 50 * 10);
    }
}
