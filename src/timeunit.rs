//! Display units for elapsed time on a chart axis.

use std::fmt;

/// Elapsed-time display unit, ordered from finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    /// Pick the unit for a run whose largest elapsed time is `max_secs`.
    pub fn for_duration(max_secs: f64) -> Self {
        if max_secs < 1.0 {
            TimeUnit::Milliseconds
        } else if max_secs < 60.0 {
            TimeUnit::Seconds
        } else if max_secs < 3600.0 {
            TimeUnit::Minutes
        } else {
            TimeUnit::Hours
        }
    }

    /// Seconds per unit.
    pub fn divisor(self) -> f64 {
        match self {
            TimeUnit::Milliseconds => 0.001,
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 3600.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeUnit::Milliseconds => "milliseconds",
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
        }
    }

    /// Convert second values to this unit in place.
    pub fn rescale(self, values: &mut [f64]) {
        let divisor = self.divisor();
        for v in values.iter_mut() {
            *v /= divisor;
        }
    }

    /// Merge with a unit chosen elsewhere for the same axis; the coarser wins.
    pub fn widen(self, other: TimeUnit) -> TimeUnit {
        self.max(other)
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unit for an axis shared by several runs, given each run's largest
/// elapsed time. `None` when there are no runs.
pub fn shared_unit<I>(max_elapsed: I) -> Option<TimeUnit>
where
    I: IntoIterator<Item = f64>,
{
    max_elapsed
        .into_iter()
        .map(TimeUnit::for_duration)
        .reduce(TimeUnit::widen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_pick_the_expected_bands() {
        assert_eq!(TimeUnit::for_duration(0.0), TimeUnit::Milliseconds);
        assert_eq!(TimeUnit::for_duration(0.999), TimeUnit::Milliseconds);
        assert_eq!(TimeUnit::for_duration(1.0), TimeUnit::Seconds);
        assert_eq!(TimeUnit::for_duration(59.9), TimeUnit::Seconds);
        assert_eq!(TimeUnit::for_duration(60.0), TimeUnit::Minutes);
        assert_eq!(TimeUnit::for_duration(3599.0), TimeUnit::Minutes);
        assert_eq!(TimeUnit::for_duration(3600.0), TimeUnit::Hours);
        assert_eq!(TimeUnit::for_duration(1e9), TimeUnit::Hours);
    }

    #[test]
    fn units_are_ordered_by_granularity() {
        assert!(TimeUnit::Milliseconds < TimeUnit::Seconds);
        assert!(TimeUnit::Seconds < TimeUnit::Minutes);
        assert!(TimeUnit::Minutes < TimeUnit::Hours);
    }

    #[test]
    fn coarsest_unit_wins_regardless_of_order() {
        assert_eq!(shared_unit([0.5, 120.0]), Some(TimeUnit::Minutes));
        assert_eq!(shared_unit([120.0, 0.5]), Some(TimeUnit::Minutes));
        assert_eq!(shared_unit([0.5, 30.0, 0.1]), Some(TimeUnit::Seconds));
        assert_eq!(shared_unit(std::iter::empty()), None);
    }

    #[test]
    fn widening_never_downgrades() {
        assert_eq!(TimeUnit::Hours.widen(TimeUnit::Seconds), TimeUnit::Hours);
        assert_eq!(TimeUnit::Seconds.widen(TimeUnit::Hours), TimeUnit::Hours);
    }

    #[test]
    fn rescale_divides_by_seconds_per_unit() {
        let mut values = vec![0.0, 90.0, 180.0];
        TimeUnit::Minutes.rescale(&mut values);
        assert_eq!(values, vec![0.0, 1.5, 3.0]);

        let mut values = vec![0.25];
        TimeUnit::Milliseconds.rescale(&mut values);
        assert!((values[0] - 250.0).abs() < 1e-9);
    }
}
