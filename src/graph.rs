//! A minimal directed graph used to record *why* each identifier was pulled
//! into a resolution: vertices are identifiers (plus a single root vertex),
//! edges point from a requirement's contributing parent to the identifier it
//! produced.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::Hash;

/// A simple multi-vertex DAG with `add`/`connect`/`contains`.
///
/// Edges are deduplicated (`connect` is idempotent) and unordered on output;
/// callers that need stable iteration order should sort the returned slices
/// themselves, which is what the result builder does.
#[derive(Clone, Debug)]
pub struct DirectedGraph<V> {
    vertices: HashSet<V>,
    edges: HashMap<V, BTreeSet<usize>>,
    index: HashMap<V, usize>,
    by_index: Vec<V>,
}

impl<V> Default for DirectedGraph<V>
where
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        DirectedGraph {
            vertices: HashSet::new(),
            edges: HashMap::new(),
            index: HashMap::new(),
            by_index: Vec::new(),
        }
    }
}

impl<V> DirectedGraph<V>
where
    V: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex. Does nothing if it is already present.
    pub fn add(&mut self, v: V) {
        if self.vertices.insert(v.clone()) {
            let idx = self.by_index.len();
            self.by_index.push(v.clone());
            self.index.insert(v, idx);
        }
    }

    pub fn contains(&self, v: &V) -> bool {
        self.vertices.contains(v)
    }

    /// Adds a directed edge `from -> to`. Both endpoints must already be
    /// vertices (callers add vertices first, matching how the result
    /// builder uses this type). Idempotent.
    pub fn connect(&mut self, from: V, to: V) {
        let Some(&to_idx) = self.index.get(&to) else {
            return;
        };
        self.edges.entry(from).or_default().insert(to_idx);
    }

    /// Vertices reachable from `from` via a single edge, in ascending
    /// insertion order.
    pub fn successors(&self, from: &V) -> impl Iterator<Item = &V> {
        self.edges
            .get(from)
            .into_iter()
            .flat_map(|s| s.iter())
            .map(move |&idx| &self.by_index[idx])
    }

    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.by_index.iter()
    }

    pub fn vertex_count(&self) -> usize {
        self.by_index.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(|s| s.len()).sum()
    }
}
