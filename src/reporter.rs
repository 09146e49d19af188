//! The observational reporter contract (§6). All calls are informational;
//! return values are ignored and the engine never branches on them.

use crate::provider::Provider;
use crate::state::State;

pub trait Reporter<P: Provider> {
    fn starting(&mut self) {}

    fn starting_round(&mut self, _round_index: usize) {}

    fn ending_round(&mut self, _round_index: usize, _state: &State<P>) {}

    fn ending(&mut self, _state: &State<P>) {}
}

/// A [`Reporter`] that does nothing, for callers with no interest in
/// progress observation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl<P: Provider> Reporter<P> for NoopReporter {}
