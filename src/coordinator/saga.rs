use log::{debug, error};

use super::coordinator_errors::CoordinatorError;

type CompensationFn = Box<dyn FnOnce() -> Result<(), CoordinatorError> + Send>;

/// A synchronous saga: every completed persistence step registers a named
/// compensating action, and a failure later in the operation runs the
/// registered compensations in strict reverse order. Compensations are
/// best-effort; one failing does not stop the rest, but it is surfaced as a
/// distinct `CompensationFailed` condition in the log so the reconciliation
/// job can detect and repair the drift.
pub(crate) struct Saga {
    operation: &'static str,
    compensations: Vec<(&'static str, CompensationFn)>,
}

impl Saga {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            compensations: Vec::new(),
        }
    }

    /// Registers the inverse of a step that is about to run (or just ran).
    pub fn register<F>(&mut self, step: &'static str, undo: F)
    where
        F: FnOnce() -> Result<(), CoordinatorError> + Send + 'static,
    {
        self.compensations.push((step, Box::new(undo)));
    }

    /// The operation reached its final state; discard the compensations.
    pub fn commit(mut self) {
        debug!("{}: committed", self.operation);
        self.compensations.clear();
    }

    /// Undoes every registered step in reverse order after a failure at
    /// `failed_step`. The caller reports the original error regardless of
    /// whether the rollback itself succeeded.
    pub fn rollback(mut self, failed_step: &'static str) {
        debug!(
            "{}: rolling back {} step(s) after failure at '{}'",
            self.operation,
            self.compensations.len(),
            failed_step
        );

        let mut completed: Vec<&'static str> = Vec::new();
        while let Some((step, undo)) = self.compensations.pop() {
            match undo() {
                Ok(()) => completed.push(step),
                Err(e) => {
                    let condition = CoordinatorError::CompensationFailed {
                        operation: self.operation.to_string(),
                        step: step.to_string(),
                        detail: e.to_string(),
                    };
                    error!(
                        "{} (failed step: '{}', compensations completed: [{}])",
                        condition,
                        failed_step,
                        completed.join(", ")
                    );
                }
            }
        }
    }
}
