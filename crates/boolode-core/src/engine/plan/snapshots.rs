use super::PlanError;
use rand::Rng;
use serde::Serialize;

/// A half-open range `[start, end)` of time indices from which one snapshot is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapshotWindow {
    pub start: usize,
    pub end: usize,
}

impl SnapshotWindow {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..self.end).contains(&index)
    }
}

/// Splits `[0, steps)` into `n_snapshots` consecutive windows.
///
/// Boundaries are `round(i * steps / n_snapshots)` with ties to even, the last one
/// being `steps` itself. Zero snapshots gives no windows.
pub fn snapshot_windows(steps: usize, n_snapshots: u32) -> Result<Vec<SnapshotWindow>, PlanError> {
    if n_snapshots == 0 {
        return Ok(Vec::new());
    }

    let k = n_snapshots as usize;
    let stride = steps as f64 / k as f64;
    let limits: Vec<usize> = (0..=k)
        .map(|i| {
            if i == k {
                steps
            } else {
                (i as f64 * stride).round_ties_even() as usize
            }
        })
        .collect();

    limits
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let window = SnapshotWindow {
                start: pair[0],
                end: pair[1],
            };
            if window.is_empty() {
                Err(PlanError::EmptySnapshotWindow {
                    index,
                    n_snapshots,
                    steps,
                })
            } else {
                Ok(window)
            }
        })
        .collect()
}

/// Draws one time index uniformly from each window.
pub fn draw_snapshot_indices(windows: &[SnapshotWindow], rng: &mut impl Rng) -> Vec<usize> {
    windows
        .iter()
        .map(|w| rng.gen_range(w.start..w.end))
        .collect()
}
