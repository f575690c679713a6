//! Progress events emitted by the workflows.
//!
//! Workflows run in named phases. Inside a phase, a task loop over jobs reports its
//! length up front and one increment per job. Free-form messages and plan warnings
//! are forwarded as they occur, so a front end can print them above its progress bar.

#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    Message(String),
    /// A non-fatal problem found while planning, prefixed with the job it concerns.
    Warning(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `f` inside a named phase. `PhaseFinish` is reported whatever `f` returns.
    pub fn phase<T>(&self, name: &'static str, f: impl FnOnce() -> T) -> T {
        self.report(Progress::PhaseStart { name });
        let result = f();
        self.report(Progress::PhaseFinish);
        result
    }

    /// Runs `f` once per item as a counted task, reporting one increment per item.
    pub fn task<I, E>(
        &self,
        items: I,
        mut f: impl FnMut(I::Item) -> Result<(), E>,
    ) -> Result<(), E>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator,
    {
        let items = items.into_iter();
        self.report(Progress::TaskStart {
            total_steps: items.len() as u64,
        });
        for item in items {
            f(item)?;
            self.report(Progress::TaskIncrement);
        }
        self.report(Progress::TaskFinish);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording(seen: &Mutex<Vec<Progress>>) -> ProgressReporter<'_> {
        ProgressReporter::with_callback(Box::new(move |event| {
            seen.lock().unwrap().push(event);
        }))
    }

    #[test]
    fn reporter_without_callback_is_silent() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::TaskIncrement);
        assert_eq!(reporter.phase("Planning", || 3), 3);
    }

    #[test]
    fn phase_wraps_the_closure_even_on_error() {
        let seen = Mutex::new(Vec::new());
        let reporter = recording(&seen);

        let result: Result<(), &str> = reporter.phase("Validation", || {
            reporter.report(Progress::Warning("mCAD: clustering is skipped".to_string()));
            Err("invalid")
        });
        drop(reporter);

        assert_eq!(result, Err("invalid"));
        assert_eq!(
            seen.into_inner().unwrap(),
            vec![
                Progress::PhaseStart { name: "Validation" },
                Progress::Warning("mCAD: clustering is skipped".to_string()),
                Progress::PhaseFinish,
            ]
        );
    }

    #[test]
    fn task_counts_items_and_stops_at_first_error() {
        let seen = Mutex::new(Vec::new());
        let reporter = recording(&seen);

        let result = reporter.task(["a", "b", "c"], |job| {
            if job == "c" { Err(job) } else { Ok(()) }
        });
        drop(reporter);

        assert_eq!(result, Err("c"));
        assert_eq!(
            seen.into_inner().unwrap(),
            vec![
                Progress::TaskStart { total_steps: 3 },
                Progress::TaskIncrement,
                Progress::TaskIncrement,
            ]
        );
    }
}
