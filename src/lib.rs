//! A generic, provider-driven dependency resolution engine.
//!
//! Given a set of root requirements and a pluggable [`Provider`] that knows
//! how to enumerate candidates and inspect their sub-dependencies, this
//! crate computes a consistent pinning — one concrete candidate per
//! identifier — that simultaneously satisfies every active requirement, or
//! reports that no such pinning exists.
//!
//! Requirements and candidates are opaque values owned entirely by the
//! `Provider` implementation; this crate has no opinion on their syntax,
//! does no network or filesystem I/O, and performs no caching beyond what
//! the internal criterion structures naturally retain. It is also strictly
//! sequential: there is no parallelism and no notion of an "optimal"
//! pinning beyond "the first one the search finds, subject to the
//! provider's declared preferences."
//!
//! ```ignore
//! use resolvekit::{Provider, Resolver};
//!
//! struct MyProvider { /* ... */ }
//!
//! impl Provider for MyProvider {
//!     type Requirement = MyRequirement;
//!     type Candidate = MyCandidate;
//!     type Identifier = String;
//!     type Preference = usize;
//!     // ...
//! }
//!
//! let mut resolver = Resolver::new(MyProvider { /* ... */ });
//! let resolution = resolver.resolve(vec![/* root requirements */])?;
//! for (id, candidate) in &resolution.mapping {
//!     println!("{id}: pinned");
//! }
//! # Ok::<(), resolvekit::ResolverError<MyRequirement>>(())
//! ```

mod config;
mod criterion;
mod error;
mod graph;
mod provider;
mod reporter;
mod resolver;
mod result;
mod state;

pub use config::ResolverConfig;
pub use criterion::{Criterion, Parent, RequirementInformation};
pub use error::{ResolutionImpossible, ResolutionTooDeep, ResolverError};
pub use graph::DirectedGraph;
pub use provider::Provider;
pub use reporter::{NoopReporter, Reporter};
pub use resolver::Resolver;
pub use result::Resolution;
pub use state::State;
