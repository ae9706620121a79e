use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Continuous linear mapping from a value domain to a pixel range.
///
/// Scales are immutable; a selection change builds a new one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        let (range_start, range_end) = range;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Round-number tick values inside the domain, ascending.
    ///
    /// Steps are 1, 2 or 5 times a power of ten, picked so roughly
    /// `tick_count` ticks land inside the domain.
    #[must_use]
    pub fn ticks(self, tick_count: usize) -> Vec<f64> {
        let (low, high) = self.sorted_domain();
        let Some(spec) = TickSpec::resolve(low, high, tick_count as f64) else {
            return Vec::new();
        };
        if spec.last < spec.first {
            return Vec::new();
        }

        (spec.first..=spec.last)
            .map(|index| {
                let index = index as f64;
                if spec.increment < 0.0 {
                    index / -spec.increment
                } else {
                    index * spec.increment
                }
            })
            .collect()
    }

    /// Distance between consecutive values returned by `ticks`.
    #[must_use]
    pub fn tick_step(self, tick_count: usize) -> Option<f64> {
        let (low, high) = self.sorted_domain();
        TickSpec::resolve(low, high, tick_count as f64).map(|spec| {
            if spec.increment < 0.0 {
                1.0 / -spec.increment
            } else {
                spec.increment
            }
        })
    }

    fn sorted_domain(self) -> (f64, f64) {
        if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        }
    }
}

/// Integer tick indices plus an increment; a negative increment encodes a
/// fractional step as its reciprocal so tick values stay exact.
#[derive(Debug, Clone, Copy)]
struct TickSpec {
    first: i64,
    last: i64,
    increment: f64,
}

impl TickSpec {
    fn resolve(start: f64, stop: f64, count: f64) -> Option<Self> {
        if !(count > 0.0) || !start.is_finite() || !stop.is_finite() || start >= stop {
            return None;
        }

        let step = (stop - start) / count;
        let power = step.log10().floor();
        let error = step / 10f64.powf(power);
        let factor = if error >= E10 {
            10.0
        } else if error >= E5 {
            5.0
        } else if error >= E2 {
            2.0
        } else {
            1.0
        };

        let spec = if power < 0.0 {
            let increment = 10f64.powf(-power) / factor;
            let mut first = (start * increment).round();
            let mut last = (stop * increment).round();
            if first / increment < start {
                first += 1.0;
            }
            if last / increment > stop {
                last -= 1.0;
            }
            Self {
                first: first as i64,
                last: last as i64,
                increment: -increment,
            }
        } else {
            let increment = 10f64.powf(power) * factor;
            let mut first = (start / increment).round();
            let mut last = (stop / increment).round();
            if first * increment < start {
                first += 1.0;
            }
            if last * increment > stop {
                last -= 1.0;
            }
            Self {
                first: first as i64,
                last: last as i64,
                increment,
            }
        };

        if spec.last < spec.first && (0.5..2.0).contains(&count) {
            return Self::resolve(start, stop, count * 2.0);
        }
        Some(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_onto_inverted_range() {
        let scale = LinearScale::new((0.0, 10.0), (400.0, 0.0)).expect("scale");
        assert_eq!(scale.map(0.0), 400.0);
        assert_eq!(scale.map(10.0), 0.0);
        assert_eq!(scale.map(5.0), 200.0);
        assert_eq!(scale.invert(200.0), 5.0);
    }

    #[test]
    fn ticks_use_round_steps_inside_domain() {
        let scale = LinearScale::new((9.2, 31.5), (0.0, 575.0)).expect("scale");
        let ticks = scale.ticks(10);
        assert_eq!(ticks, vec![10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0, 26.0, 28.0, 30.0]);
        assert_eq!(scale.tick_step(10), Some(2.0));
    }

    #[test]
    fn fractional_ticks_stay_exact() {
        let scale = LinearScale::new((0.0, 1.0), (0.0, 100.0)).expect("scale");
        let ticks = scale.ticks(5);
        assert_eq!(ticks, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn degenerate_domain_is_rejected() {
        assert!(LinearScale::new((3.0, 3.0), (0.0, 1.0)).is_err());
        assert!(LinearScale::new((f64::NAN, 3.0), (0.0, 1.0)).is_err());
    }
}
