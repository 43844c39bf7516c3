//! Decides whether two RDF graphs are equal under blank-node renaming, and
//! reports how they differ when they are not.
//!
//! A match attempt runs through fixed stages:
//!
//! 1. Ground triples (no blank node in subject or object) must match
//!    set-for-set; any divergence decides the comparison without search.
//! 2. Each blank node gets a structural signature via bounded partition
//!    refinement over its triples, run as an explicit worklist with an
//!    iteration cap so cyclic blank-node structures terminate.
//! 3. Signatures induce a candidate set per blank node: the nodes of the
//!    other graph with the same signature. An empty candidate set proves
//!    non-isomorphism immediately.
//! 4. A backtracking generator enumerates the total mappings consistent with
//!    the candidate sets; the first mapping carrying every blank-containing
//!    triple of one graph onto the other proves equality.
//!
//! The search space is the product of the candidate-set sizes, so the worst
//! case is exponential. Practical graphs keep blank-node counts small
//! relative to ground triples, and the candidate pre-filtering keeps the
//! product close to one; this is a documented scalability boundary, not
//! something the matcher hides. Callers that need a hard bound can give the
//! matcher a step budget.

mod diff;
mod mapping;
mod matcher;
mod msg;
mod signature;

pub use diff::{GraphDiff, GraphDiffReport};
pub use mapping::{generate_mappings, CandidateMap, Mapping, MappingIter};
pub use matcher::GraphMatcher;
