//! The resolution engine: round loop, backtracking, and the operations
//! that drive them (§4.3–§4.7).

use std::rc::Rc;

use indexmap::map::Entry;
use tracing::{debug, trace};

use crate::config::ResolverConfig;
use crate::criterion::{Conflict, Criterion, Parent};
use crate::error::{ResolutionImpossible, ResolutionTooDeep, ResolverError};
use crate::provider::Provider;
use crate::reporter::{NoopReporter, Reporter};
use crate::result::{Resolution, build_resolution};
use crate::state::{State, StateStack};

/// The thing that performs the actual resolution work.
///
/// `Resolver` is a one-off object (§3, "Lifecycles"): `resolve` may be
/// called at most once per instance, matching the Python original's
/// `RuntimeError("already resolved")` guard.
pub struct Resolver<P: Provider, Rp: Reporter<P> = NoopReporter> {
    provider: P,
    reporter: Rp,
    config: ResolverConfig,
    resolved: bool,
}

impl<P: Provider> Resolver<P, NoopReporter> {
    pub fn new(provider: P) -> Self {
        Self::with_reporter(provider, NoopReporter)
    }
}

impl<P: Provider, Rp: Reporter<P>> Resolver<P, Rp> {
    pub fn with_reporter(provider: P, reporter: Rp) -> Self {
        Resolver {
            provider,
            reporter,
            config: ResolverConfig::default(),
            resolved: false,
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Take a collection of root requirements, spit out the resolution
    /// result (§6's public entry point).
    #[tracing::instrument(skip_all)]
    pub fn resolve(
        &mut self,
        requirements: Vec<P::Requirement>,
    ) -> Result<Resolution<P>, ResolverError<P::Requirement>> {
        assert!(!self.resolved, "already resolved");
        self.resolved = true;

        let mut states: StateStack<P> = StateStack::new();
        states.push_new();

        for requirement in requirements {
            let key = self.provider.identify_requirement(&requirement);
            if let Err(conflict) =
                contribute_to_criteria(states.current_mut(), &self.provider, key, requirement.clone(), Parent::Root)
            {
                let mut reqs: Vec<P::Requirement> = conflict.criterion.requirements().cloned().collect();
                reqs.push(requirement);
                return Err(ResolutionImpossible { requirements: reqs }.into());
            }
        }

        self.reporter.starting();

        for round_index in 0..self.config.max_rounds() {
            self.reporter.starting_round(round_index);
            trace!(round_index, "starting round");

            states.push_new();

            let pending: Vec<P::Identifier> = states
                .current()
                .criteria
                .keys()
                .filter(|key| !is_current_pin_satisfying(states.current(), &self.provider, key))
                .cloned()
                .collect();

            if pending.is_empty() {
                states.pop();
                debug!(round_index, "resolution complete");
                self.reporter.ending(states.current());
                return Ok(build_resolution(states.current()));
            }

            let chosen = pending
                .into_iter()
                .min_by_key(|key| {
                    let criterion = &states.current().criteria[key];
                    let pinned = states.current().mapping.get(key).map(|c| c.as_ref());
                    let candidates: Vec<&P::Candidate> =
                        criterion.candidates().iter().map(|c| c.as_ref()).collect();
                    self.provider.get_preference(pinned, &candidates, criterion.information())
                })
                .expect("checked non-empty above");

            let criterion = states.current().criteria[&chosen].clone();
            let success = pin_criterion(states.current_mut(), &self.provider, &chosen, &criterion);

            if !success {
                backtrack(&mut states, criterion)?;
            }

            self.reporter.ending_round(round_index, states.current());
        }

        Err(ResolutionTooDeep {
            round_count: self.config.max_rounds(),
        }
        .into())
    }
}

fn is_current_pin_satisfying<P: Provider>(state: &State<P>, provider: &P, key: &P::Identifier) -> bool {
    let Some(pin) = state.mapping.get(key) else {
        return false;
    };
    state.criteria[key]
        .requirements()
        .all(|r| provider.is_satisfied_by(r, pin))
}

/// `contribute_to_criteria` (§4.3): turn one requirement into constraint
/// tightening, creating a fresh criterion the first time an identifier is
/// seen and narrowing it on every subsequent contribution.
///
/// Updates an existing entry in place rather than remove-then-reinsert, the
/// same way the Python original's plain `self.state.criteria[name] = crit`
/// dict assignment leaves an existing key's position untouched and only
/// appends genuinely new keys — §4.7 step c's iteration-order stability
/// depends on this.
fn contribute_to_criteria<P: Provider>(
    state: &mut State<P>,
    provider: &P,
    key: P::Identifier,
    requirement: P::Requirement,
    parent: Parent<P>,
) -> Result<(), Conflict<P>> {
    match state.criteria.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(Criterion::from_requirement(provider, requirement, parent)?);
        }
        Entry::Occupied(mut slot) => {
            let merged = slot.get().clone().merged_with(provider, requirement, parent)?;
            *slot.get_mut() = merged;
        }
    }
    Ok(())
}

/// `check_pinnability` (§4.4): try to admit `candidate` by folding its
/// sub-dependencies into the criteria map, rolling back bit-for-bit on the
/// first conflict.
fn check_pinnability<P: Provider>(state: &mut State<P>, provider: &P, candidate: &Rc<P::Candidate>) -> bool {
    let snapshot = state.criteria.clone();
    for subdep in provider.get_dependencies(candidate) {
        let key = provider.identify_requirement(&subdep);
        if contribute_to_criteria(state, provider, key, subdep, Parent::Candidate(Rc::clone(candidate))).is_err() {
            state.criteria = snapshot;
            return false;
        }
    }
    true
}

/// `pin_criterion` (§4.5): try candidates in preference order (most
/// preferred first — `candidates` is maintained in the descending order
/// `find_matches` originally returned), pinning the first one that
/// survives [`check_pinnability`].
///
/// §4.5 describes this as a reverse traversal that keeps re-pinning until
/// the last (most preferred) success wins; forward iteration with a
/// first-success return is the explicitly sanctioned equivalent (§4.5's
/// closing parenthetical, §9's open question) and is what the worked
/// example in §8 scenario 3 actually exercises ("first pin of A tries
/// A@2", the most-preferred candidate, not the least). See `DESIGN.md`.
fn pin_criterion<P: Provider>(state: &mut State<P>, provider: &P, key: &P::Identifier, criterion: &Criterion<P>) -> bool {
    let candidate_count = criterion.candidates().len();
    for (index, candidate) in criterion.candidates().iter().enumerate() {
        trace!(index, candidate_count, "attempting to pin candidate");
        if !check_pinnability(state, provider, candidate) {
            continue;
        }
        state.mapping.shift_remove(key);
        state.mapping.insert(key.clone(), Rc::clone(candidate));
        debug!(index, candidate_count, "pinned candidate");
        return true;
    }
    debug!(candidate_count, "no candidate could be pinned");
    false
}

/// `backtrack` (§4.6): pop frames and mark the undone pin incompatible
/// until forward progress becomes possible again, or the stack empties.
fn backtrack<P: Provider>(
    states: &mut StateStack<P>,
    mut trigger: Criterion<P>,
) -> Result<(), ResolutionImpossible<P::Requirement>> {
    loop {
        states.pop();
        trace!(remaining_states = states.len(), "backtrack: popped a frame");
        if states.is_empty() {
            debug!("backtrack: state stack exhausted, resolution impossible");
            return Err(ResolutionImpossible {
                requirements: trigger.requirements().cloned().collect(),
            });
        }
        let Some((key, candidate)) = states.current_mut().mapping.pop() else {
            // Nothing was pinned this round; keep unwinding.
            trace!("backtrack: no pin to undo this frame, unwinding further");
            continue;
        };
        // Updated in place (not shift_remove-then-insert) so a successful
        // exclusion doesn't reorder `criteria`, for the same reason
        // `contribute_to_criteria` updates in place.
        let existing = states.current().criteria.get(&key).expect("pinned key has a criterion").clone();
        match existing.excluded_of(&candidate) {
            Ok(narrowed) => {
                debug!("backtrack: excluded a candidate, resuming forward progress");
                if let Some(slot) = states.current_mut().criteria.get_mut(&key) {
                    *slot = narrowed;
                }
                return Ok(());
            }
            Err(conflict) => {
                trace!("backtrack: exclusion itself conflicted, unwinding further");
                trigger = conflict.criterion;
                continue;
            }
        }
    }
}
