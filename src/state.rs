//! [`State`] and the state stack (§3, §4.2).

use std::rc::Rc;

use indexmap::IndexMap;

use crate::criterion::Criterion;
use crate::provider::Provider;

/// A snapshot of the resolution in progress: the current pinning and the
/// full set of active constraints.
///
/// `mapping` is insertion-ordered so the engine can recover (and remove)
/// the most-recently-pinned identifier during backtracking without an
/// auxiliary stack of keys.
pub struct State<P: Provider> {
    pub mapping: IndexMap<P::Identifier, Rc<P::Candidate>>,
    pub criteria: IndexMap<P::Identifier, Criterion<P>>,
}

impl<P: Provider> Clone for State<P> {
    fn clone(&self) -> Self {
        State {
            mapping: self.mapping.clone(),
            criteria: self.criteria.clone(),
        }
    }
}

impl<P: Provider> State<P> {
    fn empty() -> Self {
        State {
            mapping: IndexMap::new(),
            criteria: IndexMap::new(),
        }
    }
}

/// The history of `State`s visited this resolution, used for backtracking.
/// The last element is always "current".
pub struct StateStack<P: Provider> {
    states: Vec<State<P>>,
}

impl<P: Provider> StateStack<P> {
    pub fn new() -> Self {
        StateStack { states: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Push a fresh frame: an empty state if the stack is empty, otherwise
    /// a shallow, independent copy of the current frame. Cheap — the two
    /// maps are cloned, but `Criterion` values and candidates are shared by
    /// `Rc`/immutable-value semantics underneath.
    pub fn push_new(&mut self) {
        let state = match self.states.last() {
            Some(top) => top.clone(),
            None => State::empty(),
        };
        self.states.push(state);
    }

    /// The top of the stack. Accessing an empty stack is a programmer
    /// error, matching the Python original's `AttributeError` on an empty
    /// `_states`.
    pub fn current(&self) -> &State<P> {
        self.states.last().expect("state stack must not be empty")
    }

    pub fn current_mut(&mut self) -> &mut State<P> {
        self.states.last_mut().expect("state stack must not be empty")
    }

    /// Drop the top frame, undoing everything decided during the round
    /// that pushed it.
    pub fn pop(&mut self) {
        self.states.pop();
    }
}
