//! Reachability pruning and the final [`Resolution`] (§4.8).

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use indexmap::IndexMap;

use crate::criterion::Criterion;
use crate::graph::DirectedGraph;
use crate::provider::Provider;
use crate::state::State;

/// The final, pruned outcome of a successful resolution.
///
/// `mapping` and `graph` are restricted to identifiers reachable from the
/// root; `criteria` is the full, unfiltered map, kept for diagnostics.
pub struct Resolution<P: Provider> {
    pub mapping: IndexMap<P::Identifier, Rc<P::Candidate>>,
    pub graph: DirectedGraph<Option<P::Identifier>>,
    pub criteria: IndexMap<P::Identifier, Criterion<P>>,
}

/// `true` if `key` has a route to the root marker: one of its criterion's
/// parents *is* the root marker, is already known-connected, or recursively
/// has a route itself.
///
/// `connected` accumulates positive results only (§9's memoization note);
/// `visiting` guards against revisiting a key already on the current
/// recursion path, so a dependency cycle with no path to root terminates
/// instead of recursing forever.
fn has_route_to_root<P: Provider>(
    criteria: &IndexMap<P::Identifier, Criterion<P>>,
    key: &P::Identifier,
    by_identity: &HashMap<usize, P::Identifier>,
    connected: &mut HashSet<P::Identifier>,
    visiting: &mut HashSet<P::Identifier>,
) -> bool {
    if connected.contains(key) {
        return true;
    }
    let Some(criterion) = criteria.get(key) else {
        return false;
    };
    if !visiting.insert(key.clone()) {
        return false;
    }
    for parent in criterion.parents() {
        let reaches = match parent.identity() {
            None => true, // the root marker
            Some(ptr) => match by_identity.get(&ptr) {
                None => continue,
                Some(pkey) => {
                    connected.contains(pkey)
                        || has_route_to_root(criteria, pkey, by_identity, connected, visiting)
                }
            },
        };
        if reaches {
            visiting.remove(key);
            connected.insert(key.clone());
            return true;
        }
    }
    visiting.remove(key);
    false
}

/// Build the final [`Resolution`] from the engine's terminal state.
pub fn build_resolution<P: Provider>(state: &State<P>) -> Resolution<P> {
    let by_identity: HashMap<usize, P::Identifier> = state
        .mapping
        .iter()
        .map(|(k, c)| (Rc::as_ptr(c) as *const () as usize, k.clone()))
        .collect();

    let mut graph: DirectedGraph<Option<P::Identifier>> = DirectedGraph::new();
    graph.add(None);

    let mut connected: HashSet<P::Identifier> = HashSet::new();
    for key in state.criteria.keys() {
        let mut visiting = HashSet::new();
        if !has_route_to_root(&state.criteria, key, &by_identity, &mut connected, &mut visiting) {
            continue;
        }
        if !graph.contains(&Some(key.clone())) {
            graph.add(Some(key.clone()));
        }
        for parent in state.criteria[key].parents() {
            let pkey: Option<P::Identifier> = match parent.identity() {
                None => None, // the root marker
                Some(ptr) => match by_identity.get(&ptr) {
                    Some(pkey) => Some(pkey.clone()),
                    None => continue,
                },
            };
            if !graph.contains(&pkey) {
                graph.add(pkey.clone());
            }
            graph.connect(pkey, Some(key.clone()));
        }
    }

    let mapping = state
        .mapping
        .iter()
        .filter(|(k, _)| connected.contains(*k))
        .map(|(k, c)| (k.clone(), Rc::clone(c)))
        .collect();

    Resolution {
        mapping,
        graph,
        criteria: state.criteria.clone(),
    }
}
