//! Per-generation observation hook.

use crate::schema::TargetImage;

use super::chromosome::Chromosome;

/// Receives the best chromosome once per completed generation.
///
/// Observers only get shared references and cannot influence the run.
/// Any rendering or pacing delay is the observer's own concern.
pub trait Observer {
    fn observe(&mut self, best: &Chromosome, target: &TargetImage);
}

impl<F> Observer for F
where
    F: FnMut(&Chromosome, &TargetImage),
{
    fn observe(&mut self, best: &Chromosome, target: &TargetImage) {
        self(best, target)
    }
}

/// Observer that ignores every generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn observe(&mut self, _best: &Chromosome, _target: &TargetImage) {}
}
