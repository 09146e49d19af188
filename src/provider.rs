//! The caller-supplied collaborator contracts the engine depends on.
//!
//! Requirements and candidates are opaque to the engine (§3): it never
//! constructs, parses, or compares them itself beyond what the provider
//! tells it. `Provider` bundles the five calls the engine makes into
//! associated types and methods, the same shape `std::iter::Iterator`
//! bundles its item type — a caller implements one trait rather than
//! juggling five loose generic parameters.

use std::hash::Hash;

/// Everything the resolution engine needs to know about one problem
/// instance: how to name things, how to rank them, and how to expand them.
pub trait Provider {
    /// An opaque constraint. Never constructed or inspected by the engine.
    type Requirement: Clone;

    /// An opaque concrete choice. Compared for value equality (to drop
    /// excluded candidates and to check incompatibilities) but never
    /// hashed or ordered by the engine itself.
    type Candidate: Clone + PartialEq;

    /// The key identifying which requirements and candidates compete for
    /// the same pinning slot.
    type Identifier: Clone + Eq + Hash;

    /// A total order over candidates for a single pending criterion; lower
    /// is preferred. Typically a tuple or integer, never compared across
    /// different identifiers.
    type Preference: Ord;

    /// The key a requirement is grouped under.
    fn identify_requirement(&self, requirement: &Self::Requirement) -> Self::Identifier;

    /// The key a candidate is grouped under.
    fn identify_candidate(&self, candidate: &Self::Candidate) -> Self::Identifier;

    /// Rank a pending criterion for selection this round. Called once per
    /// pending criterion, every round. `pinned` is the candidate currently
    /// pinned for this identifier, if any (it failed to satisfy every
    /// requirement, which is why the criterion is pending).
    fn get_preference(
        &self,
        pinned: Option<&Self::Candidate>,
        candidates: &[&Self::Candidate],
        information: &[crate::criterion::RequirementInformation<Self>],
    ) -> Self::Preference;

    /// All candidates matching `requirement`, ordered by descending
    /// preference. Finite; may be empty.
    fn find_matches(&self, requirement: &Self::Requirement) -> Vec<Self::Candidate>;

    /// A pure predicate: does `candidate` satisfy `requirement`?
    fn is_satisfied_by(&self, requirement: &Self::Requirement, candidate: &Self::Candidate)
    -> bool;

    /// The sub-requirements `candidate` imposes, in the order they should
    /// be processed (the first conflict among them aborts the rest).
    fn get_dependencies(&self, candidate: &Self::Candidate) -> Vec<Self::Requirement>;
}
