//! [`Criterion`]: the aggregated constraint state for one identifier (§3,
//! §4.1).

use std::rc::Rc;

use crate::provider::Provider;

/// Either the root marker (an unparented requirement supplied directly to
/// [`crate::Resolver::resolve`]) or the candidate whose dependency list
/// produced a requirement.
///
/// Candidates are kept behind `Rc` so the result builder can recover "is
/// this the same candidate object" (§9, "Candidate identity vs equality")
/// without requiring `Candidate: Hash`.
pub enum Parent<P: Provider> {
    Root,
    Candidate(Rc<P::Candidate>),
}

impl<P: Provider> Clone for Parent<P> {
    fn clone(&self) -> Self {
        match self {
            Parent::Root => Parent::Root,
            Parent::Candidate(c) => Parent::Candidate(Rc::clone(c)),
        }
    }
}

impl<P: Provider> Parent<P> {
    /// A stable, comparable handle for this parent's identity: `None` for
    /// the root marker, `Some(ptr)` for a candidate, where `ptr` is the
    /// `Rc`'s address. Two clones of the same `Rc` produce the same
    /// handle; two value-equal but independently produced candidates do
    /// not.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Parent::Root => None,
            Parent::Candidate(c) => Some(Rc::as_ptr(c) as *const () as usize),
        }
    }
}

/// One requirement contributing to a criterion, paired with the parent that
/// produced it.
pub struct RequirementInformation<P: Provider> {
    pub requirement: P::Requirement,
    pub parent: Parent<P>,
}

impl<P: Provider> Clone for RequirementInformation<P> {
    fn clone(&self) -> Self {
        RequirementInformation {
            requirement: self.requirement.clone(),
            parent: self.parent.clone(),
        }
    }
}

/// Raised by [`Criterion::from_requirement`], [`Criterion::merged_with`],
/// and [`Criterion::excluded_of`] when narrowing would leave no admissible
/// candidate. Caught inside this crate only (§7); never surfaced to
/// callers.
pub struct Conflict<P: Provider> {
    pub criterion: Criterion<P>,
}

/// The aggregated constraint state for one identifier.
///
/// Logically immutable: every operation below consumes `self` by value and
/// produces a new `Criterion` rather than mutating in place, so older
/// `State`s on the stack keep seeing their own (still-valid) snapshot.
pub struct Criterion<P: Provider> {
    candidates: Vec<Rc<P::Candidate>>,
    information: Vec<RequirementInformation<P>>,
    incompatibilities: Vec<Rc<P::Candidate>>,
}

impl<P: Provider> Clone for Criterion<P> {
    fn clone(&self) -> Self {
        Criterion {
            candidates: self.candidates.clone(),
            information: self.information.clone(),
            incompatibilities: self.incompatibilities.clone(),
        }
    }
}

impl<P: Provider> Criterion<P> {
    pub fn candidates(&self) -> &[Rc<P::Candidate>] {
        &self.candidates
    }

    pub fn information(&self) -> &[RequirementInformation<P>] {
        &self.information
    }

    pub fn incompatibilities(&self) -> &[Rc<P::Candidate>] {
        &self.incompatibilities
    }

    pub fn requirements(&self) -> impl Iterator<Item = &P::Requirement> {
        self.information.iter().map(|i| &i.requirement)
    }

    pub fn parents(&self) -> impl Iterator<Item = &Parent<P>> {
        self.information.iter().map(|i| &i.parent)
    }

    /// Construct the initial criterion for a newly-seen identifier.
    ///
    /// Fails if `provider.find_matches(requirement)` returns no candidates:
    /// `find_matches` is defined to return matches of `requirement`, so an
    /// empty result is itself the conflict.
    pub fn from_requirement(
        provider: &P,
        requirement: P::Requirement,
        parent: Parent<P>,
    ) -> Result<Self, Conflict<P>> {
        let candidates: Vec<Rc<P::Candidate>> = provider
            .find_matches(&requirement)
            .into_iter()
            .map(Rc::new)
            .collect();
        let criterion = Criterion {
            candidates,
            information: vec![RequirementInformation { requirement, parent }],
            incompatibilities: Vec::new(),
        };
        if criterion.candidates.is_empty() {
            Err(Conflict { criterion })
        } else {
            Ok(criterion)
        }
    }

    /// Fold in another requirement for the same identifier, narrowing
    /// `candidates` to those that still satisfy it.
    pub fn merged_with(
        self,
        provider: &P,
        requirement: P::Requirement,
        parent: Parent<P>,
    ) -> Result<Self, Conflict<P>> {
        let candidates: Vec<Rc<P::Candidate>> = self
            .candidates
            .iter()
            .filter(|c| provider.is_satisfied_by(&requirement, c))
            .cloned()
            .collect();
        let mut information = self.information;
        information.push(RequirementInformation { requirement, parent });
        let criterion = Criterion {
            candidates,
            information,
            incompatibilities: self.incompatibilities,
        };
        if criterion.candidates.is_empty() {
            Err(Conflict { criterion })
        } else {
            Ok(criterion)
        }
    }

    /// Mark `candidate` as non-viable, dropping every occurrence of it (by
    /// value equality) from `candidates`.
    pub fn excluded_of(self, candidate: &Rc<P::Candidate>) -> Result<Self, Conflict<P>> {
        let candidates: Vec<Rc<P::Candidate>> = self
            .candidates
            .iter()
            .filter(|c| c.as_ref() != candidate.as_ref())
            .cloned()
            .collect();
        let mut incompatibilities = self.incompatibilities;
        incompatibilities.push(Rc::clone(candidate));
        let criterion = Criterion {
            candidates,
            information: self.information,
            incompatibilities,
        };
        if criterion.candidates.is_empty() {
            Err(Conflict { criterion })
        } else {
            Ok(criterion)
        }
    }
}
