//! A minimal in-memory provider for exercising the engine, adapted from
//! `crates/resolver-tests`'s `registry()`/`pkg!()`/`resolve()` helper shape
//! but generalized: no package/feature model, just named packages with
//! integer versions and `>=`/`<` range requirements.

#![allow(dead_code)]

use std::collections::HashMap;

use resolvekit::Provider;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pkg {
    pub name: &'static str,
    pub version: u32,
    pub deps: Vec<Req>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Req {
    pub name: &'static str,
    pub min: u32,
    pub max: Option<u32>, // exclusive upper bound; None = unbounded
}

/// `name>=min`
pub fn dep(name: &'static str, min: u32) -> Req {
    Req { name, min, max: None }
}

/// `name>=min,<max`
pub fn dep_range(name: &'static str, min: u32, max: u32) -> Req {
    Req { name, min, max: Some(max) }
}

pub fn pkg(name: &'static str, version: u32, deps: Vec<Req>) -> Pkg {
    Pkg { name, version, deps }
}

/// Builds a registry: every package version offered for resolution,
/// keyed by name, newest version first (descending preference).
pub struct Registry {
    packages: HashMap<&'static str, Vec<Pkg>>,
}

pub fn registry(pkgs: Vec<Pkg>) -> Registry {
    let mut packages: HashMap<&'static str, Vec<Pkg>> = HashMap::new();
    for p in pkgs {
        packages.entry(p.name).or_default().push(p);
    }
    for versions in packages.values_mut() {
        versions.sort_by(|a, b| b.version.cmp(&a.version));
    }
    Registry { packages }
}

pub struct TestProvider {
    registry: Registry,
}

pub fn provider(registry: Registry) -> TestProvider {
    TestProvider { registry }
}

impl Provider for TestProvider {
    type Requirement = Req;
    type Candidate = Pkg;
    type Identifier = &'static str;
    type Preference = usize;

    fn identify_requirement(&self, requirement: &Req) -> &'static str {
        requirement.name
    }

    fn identify_candidate(&self, candidate: &Pkg) -> &'static str {
        candidate.name
    }

    fn get_preference(
        &self,
        _pinned: Option<&Pkg>,
        candidates: &[&Pkg],
        _information: &[resolvekit::RequirementInformation<Self>],
    ) -> usize {
        // Fewer remaining candidates is resolved first, the same
        // "cheapest constraint first" heuristic cargo's own
        // `RegistryQueryer::build_deps` applies when sorting dependency
        // lists before expansion.
        candidates.len()
    }

    fn find_matches(&self, requirement: &Req) -> Vec<Pkg> {
        self.registry
            .packages
            .get(requirement.name)
            .into_iter()
            .flatten()
            .filter(|p| self.is_satisfied_by(requirement, p))
            .cloned()
            .collect()
    }

    fn is_satisfied_by(&self, requirement: &Req, candidate: &Pkg) -> bool {
        candidate.version >= requirement.min
            && requirement.max.is_none_or(|max| candidate.version < max)
    }

    fn get_dependencies(&self, candidate: &Pkg) -> Vec<Req> {
        candidate.deps.clone()
    }
}
