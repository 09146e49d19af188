//! Error types surfaced by the resolver.
//!
//! Two families, per the engine's error design: an internal-only conflict
//! signal that never leaves this crate (see [`crate::criterion::Conflict`]),
//! and the externally-visible [`ResolverError`] below.

/// A failure to find any pinning that satisfies every active requirement,
/// either because the roots themselves conflict or because backtracking
/// exhausted every alternative.
///
/// The payload is the set of requirements that demonstrate the conflict: for
/// a root conflict this is the requirements of the offending criterion plus
/// the newly added root requirement; for an exhausted backtrack chain it is
/// the accumulated requirements of the criterion that triggered the final,
/// unresolvable backtrack (see `SPEC_FULL.md`'s supplemented-features
/// note 1 — this is not necessarily the same as the requirements of the
/// *original* conflict).
#[derive(Debug, thiserror::Error)]
#[error("resolution impossible: no candidate satisfies all of {} requirement(s)", .requirements.len())]
pub struct ResolutionImpossible<R> {
    pub requirements: Vec<R>,
}

/// The round budget (`max_rounds`) was exhausted before the engine reached a
/// fixed point. Usually indicates a cycle or pathological fan-out in the
/// provider's dependency graph.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("resolution too deep: exceeded {round_count} round(s)")]
pub struct ResolutionTooDeep {
    pub round_count: usize,
}

/// The externally-visible error type for [`crate::Resolver::resolve`].
///
/// Both variants extend the same base so callers can match uniformly or
/// just propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError<R> {
    #[error(transparent)]
    Impossible(#[from] ResolutionImpossible<R>),
    #[error(transparent)]
    TooDeep(#[from] ResolutionTooDeep),
}
