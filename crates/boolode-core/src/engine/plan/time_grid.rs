use super::PlanError;
use serde::Serialize;

/// Upper bound on the number of output time points of one job.
pub const MAX_TIME_POINTS: usize = 10_000_000;

/// Evenly spaced output times `linspace(0, end, n_points)`.
///
/// The number of points is `trunc(end / step)`, so the spacing between points is
/// slightly larger than the integration step whenever `end` is not a multiple of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeGrid {
    end: f64,
    step: f64,
    n_points: usize,
}

impl TimeGrid {
    pub fn new(simulation_time: f64, step: f64) -> Result<Self, PlanError> {
        if !simulation_time.is_finite() || simulation_time <= 0.0 {
            return Err(PlanError::InvalidSimulationTime(simulation_time));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(PlanError::InvalidStepSize(step));
        }

        let n_points = (simulation_time / step).trunc();
        if n_points > MAX_TIME_POINTS as f64 {
            return Err(PlanError::TooManyTimePoints {
                simulation_time,
                step,
                max: MAX_TIME_POINTS,
            });
        }
        if n_points < 2.0 {
            return Err(PlanError::TooFewTimePoints {
                simulation_time,
                step,
                n_points: n_points as usize,
            });
        }

        Ok(Self {
            end: simulation_time,
            step,
            n_points: n_points as usize,
        })
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Number of intervals between consecutive points.
    pub fn steps(&self) -> usize {
        self.n_points - 1
    }

    pub fn spacing(&self) -> f64 {
        self.end / self.steps() as f64
    }

    pub fn time_at(&self, index: usize) -> Option<f64> {
        match index {
            i if i >= self.n_points => None,
            i if i == self.steps() => Some(self.end),
            i => Some(i as f64 * self.spacing()),
        }
    }

    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.n_points).filter_map(|i| self.time_at(i))
    }
}
