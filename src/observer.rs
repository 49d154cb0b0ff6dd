//! Step observer trait for monitoring simulation progress.

/// Trait for observing the three-phase sub-step sweep.
///
/// Implement this trait to monitor driver progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after every object's pre-step (forces accumulated).
    fn on_pre_step(&mut self, _sub_step: usize) {}

    /// Called after every object has integrated.
    fn on_integrate(&mut self, _sub_step: usize) {}

    /// Called once a frame's sub-steps are all complete.
    fn on_step_complete(&mut self, _sub_steps: usize) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Forwards observer callbacks to `tracing` at trace level.
pub struct TracingStepObserver;

impl StepObserver for TracingStepObserver {
    fn on_pre_step(&mut self, sub_step: usize) {
        tracing::trace!(sub_step, "forces accumulated");
    }

    fn on_integrate(&mut self, sub_step: usize) {
        tracing::trace!(sub_step, "bodies integrated");
    }

    fn on_step_complete(&mut self, sub_steps: usize) {
        tracing::trace!(sub_steps, "frame complete");
    }
}
