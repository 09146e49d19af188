mod support;

use std::cell::Cell;

use resolvekit::{Provider, ResolverError};
use support::{Req, dep, dep_range, pkg, provider, registry};

fn names(resolution: &resolvekit::Resolution<support::TestProvider>) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = resolution.mapping.keys().copied().collect();
    names.sort_unstable();
    names
}

#[test]
fn test_single_root_single_version() {
    let reg = registry(vec![pkg("A", 1, vec![])]);
    let mut resolver = resolvekit::Resolver::new(provider(reg));
    let res = resolver.resolve(vec![dep("A", 1)]).unwrap();

    assert_eq!(names(&res), vec!["A"]);
    assert_eq!(res.mapping["A"].version, 1);
    assert!(res.graph.contains(&None));
    assert_eq!(res.graph.successors(&None).collect::<Vec<_>>(), vec![&Some("A")]);
}

#[test]
fn test_chain() {
    let reg = registry(vec![pkg("A", 1, vec![dep("B", 1)]), pkg("B", 1, vec![])]);
    let mut resolver = resolvekit::Resolver::new(provider(reg));
    let res = resolver.resolve(vec![dep("A", 1)]).unwrap();

    assert_eq!(names(&res), vec!["A", "B"]);
    assert_eq!(res.graph.successors(&None).collect::<Vec<_>>(), vec![&Some("A")]);
    assert_eq!(res.graph.successors(&Some("A")).collect::<Vec<_>>(), vec![&Some("B")]);
}

#[test]
fn test_backtrack_on_conflict() {
    // A@2 depends on C>=2; A@1 depends on C>=1; B@1 depends on C<2.
    // Pinning A@2 first forces C>=2, which then conflicts with B's C<2,
    // so the engine backtracks, excludes A@2, and retries with A@1 (§8
    // scenario 3).
    let reg = registry(vec![
        pkg("A", 2, vec![dep("C", 2)]),
        pkg("A", 1, vec![dep("C", 1)]),
        pkg("B", 1, vec![dep_range("C", 0, 2)]),
        pkg("C", 2, vec![]),
        pkg("C", 1, vec![]),
    ]);
    let mut resolver = resolvekit::Resolver::new(provider(reg));
    let res = resolver.resolve(vec![dep("A", 1), dep("B", 1)]).unwrap();

    assert_eq!(names(&res), vec!["A", "B", "C"]);
    assert_eq!(res.mapping["A"].version, 1);
    assert_eq!(res.mapping["B"].version, 1);
    assert_eq!(res.mapping["C"].version, 1);
}

#[test]
fn test_impossible_root_conflict() {
    let reg = registry(vec![pkg("A", 1, vec![])]);
    let mut resolver = resolvekit::Resolver::new(provider(reg));
    let err = resolver.resolve(vec![dep("A", 1), dep_range("A", 0, 1)]).unwrap_err();

    match err {
        ResolverError::Impossible(impossible) => {
            assert_eq!(impossible.requirements.len(), 2);
        }
        ResolverError::TooDeep(_) => panic!("expected a root conflict, not a round-budget failure"),
    }
}

#[test]
fn test_cycle_respected() {
    let reg = registry(vec![pkg("A", 1, vec![dep("B", 1)]), pkg("B", 1, vec![dep("A", 1)])]);
    let mut resolver = resolvekit::Resolver::new(provider(reg));
    let res = resolver.resolve(vec![dep("A", 1)]).unwrap();

    assert_eq!(names(&res), vec!["A", "B"]);
    // Both the root and B point at A; the cycle doesn't stop A or B from
    // being reachable.
    assert!(res.graph.successors(&None).any(|v| *v == Some("A")));
    assert!(res.graph.successors(&Some("B")).any(|v| *v == Some("A")));
}

#[test]
fn test_too_deep() {
    struct InfiniteProvider {
        next: Cell<u32>,
    }

    impl Provider for InfiniteProvider {
        type Requirement = u32;
        type Candidate = u32;
        type Identifier = u32;
        type Preference = u32;

        fn identify_requirement(&self, r: &u32) -> u32 {
            *r
        }

        fn identify_candidate(&self, c: &u32) -> u32 {
            *c
        }

        fn get_preference(
            &self,
            _pinned: Option<&u32>,
            _candidates: &[&u32],
            _information: &[resolvekit::RequirementInformation<Self>],
        ) -> u32 {
            0
        }

        fn find_matches(&self, r: &u32) -> Vec<u32> {
            vec![*r]
        }

        fn is_satisfied_by(&self, r: &u32, c: &u32) -> bool {
            r == c
        }

        fn get_dependencies(&self, _c: &u32) -> Vec<u32> {
            let fresh = self.next.get();
            self.next.set(fresh + 1);
            vec![fresh]
        }
    }

    let mut resolver = resolvekit::Resolver::new(InfiniteProvider { next: Cell::new(1) })
        .with_config(resolvekit::ResolverConfig::new().with_max_rounds(10));
    let err = resolver.resolve(vec![0]).unwrap_err();

    match err {
        ResolverError::TooDeep(too_deep) => assert_eq!(too_deep.round_count, 10),
        ResolverError::Impossible(_) => panic!("expected the round budget to be exhausted"),
    }
}

#[test]
#[should_panic(expected = "already resolved")]
fn test_cannot_resolve_twice() {
    let reg = registry(vec![pkg("A", 1, vec![])]);
    let mut resolver = resolvekit::Resolver::new(provider(reg));
    resolver.resolve(vec![dep("A", 1)]).unwrap();
    let _ = resolver.resolve(Vec::<Req>::new());
}

#[test]
fn test_soundness_of_pinning() {
    let reg = registry(vec![
        pkg("A", 2, vec![dep("C", 2)]),
        pkg("A", 1, vec![dep("C", 1)]),
        pkg("B", 1, vec![dep_range("C", 0, 2)]),
        pkg("C", 2, vec![]),
        pkg("C", 1, vec![]),
    ]);
    let p = provider(reg);
    let mut resolver = resolvekit::Resolver::new(p);
    let res = resolver.resolve(vec![dep("A", 1), dep("B", 1)]).unwrap();

    for (name, criterion) in res.criteria.iter() {
        if let Some(pin) = res.mapping.get(name) {
            for req in criterion.requirements() {
                assert!(
                    pin.version >= req.min && req.max.is_none_or(|m| pin.version < m),
                    "pin for {name} does not satisfy all contributing requirements"
                );
            }
            assert!(!criterion.incompatibilities().iter().any(|c| c.as_ref() == pin.as_ref()));
        }
    }
}

#[test]
fn test_tracing_emits_round_and_backtrack_spans() {
    use tracing_subscriber::EnvFilter;

    // Scoped rather than global (`set_default`, not `init`), so this runs
    // alongside the rest of the suite without fighting over a global
    // subscriber. Exercises a resolution that backtracks, so both the
    // round-loop and backtrack tracing get driven at least once.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("trace"))
        .with_test_writer()
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let reg = registry(vec![
        pkg("A", 2, vec![dep("C", 2)]),
        pkg("A", 1, vec![dep("C", 1)]),
        pkg("B", 1, vec![dep_range("C", 0, 2)]),
        pkg("C", 2, vec![]),
        pkg("C", 1, vec![]),
    ]);
    let mut resolver = resolvekit::Resolver::new(provider(reg));
    let res = resolver.resolve(vec![dep("A", 1), dep("B", 1)]).unwrap();

    assert_eq!(res.mapping["A"].version, 1);
}
