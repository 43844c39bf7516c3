use crate::mapping::{generate_mappings, CandidateMap, Mapping};
use crate::signature::{blank_node_signatures, object_blank, subject_blank, SignatureMap};
use rdf_reckon_model::{BlankNode, Graph, Subject, Term, Triple};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// Default cap on signature refinement rounds. Information travels one hop
/// per round, so this covers chains of blank nodes well past what occurs in
/// practice while bounding the work on adversarial cyclic inputs.
const DEFAULT_REFINEMENT_ROUNDS: usize = 8;

/// Decides graph equality under blank-node renaming.
///
/// "Not equal" is a normal outcome, never an error. The matcher is
/// stateless between calls; configuration is fixed at construction.
#[derive(Debug, Clone)]
pub struct GraphMatcher {
    step_budget: Option<usize>,
    refinement_rounds: usize,
}

impl Default for GraphMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            step_budget: None,
            refinement_rounds: DEFAULT_REFINEMENT_ROUNDS,
        }
    }

    /// Bounds how many candidate mappings a match attempt may test before
    /// giving up and reporting non-equality.
    ///
    /// The search space is the product of the candidate-set sizes, which is
    /// exponential in the worst case; the default (no budget) reproduces the
    /// classical unbounded behavior.
    #[must_use]
    pub fn with_step_budget(mut self, budget: usize) -> Self {
        self.step_budget = Some(budget);
        self
    }

    /// Overrides the signature refinement round cap.
    #[must_use]
    pub fn with_refinement_rounds(mut self, rounds: usize) -> Self {
        self.refinement_rounds = rounds;
        self
    }

    /// Whether the two graphs are equal under some blank-node renaming.
    #[must_use]
    pub fn are_equal(&self, g: &Graph, h: &Graph) -> bool {
        self.find_mapping(g, h).is_some()
    }

    /// Finds a blank-node mapping proving the graphs equal, if one exists.
    ///
    /// Ground-only equal graphs yield an empty mapping. `None` means the
    /// graphs are not equal (or the step budget ran out).
    #[must_use]
    pub fn find_mapping(&self, g: &Graph, h: &Graph) -> Option<Mapping> {
        if g.len() != h.len() {
            debug!("differing number of triples between graphs");
            return None;
        }

        let (g_ground, g_blank) = partition(g);
        let (h_ground, h_blank) = partition(h);
        if g_ground.len() != h_ground.len()
            || !g_ground.iter().all(|triple| h_ground.contains(triple))
        {
            debug!("ground triples do not match between graphs");
            return None;
        }
        debug!(
            "validated {} ground triples present in both graphs",
            g_ground.len()
        );
        if g_blank.is_empty() {
            return Some(Mapping::default());
        }

        let g_degrees = occurrence_counts(&g_blank);
        let h_degrees = occurrence_counts(&h_blank);
        if g_degrees.len() != h_degrees.len() {
            debug!("differing number of unique blank nodes between graphs");
            return None;
        }
        if degree_histogram(&g_degrees) != degree_histogram(&h_degrees) {
            debug!("degree classification rules out an equality mapping");
            return None;
        }

        let h_blank_set: FxHashSet<Triple> = h_blank.iter().cloned().collect();

        // Trivial mapping first: both graphs may use identical labels.
        if g_degrees.keys().all(|node| h_degrees.contains_key(node)) {
            let identity: Mapping = g_degrees
                .keys()
                .map(|node| (node.clone(), node.clone()))
                .collect();
            if mapping_carries(&g_blank, &h_blank_set, &identity) {
                debug!("trivial mapping over identical blank node ids holds");
                return Some(identity);
            }
        }

        let g_signatures = blank_node_signatures(&g_blank, self.refinement_rounds);
        let h_signatures = blank_node_signatures(&h_blank, self.refinement_rounds);
        if signature_histogram(&g_signatures) != signature_histogram(&h_signatures) {
            debug!("signature classes do not align between graphs");
            return None;
        }

        let mut candidates = CandidateMap::default();
        for (node, signature) in &g_signatures {
            let options: Vec<BlankNode> = h_signatures
                .iter()
                .filter(|(_, candidate)| *candidate == signature)
                .map(|(candidate, _)| candidate.clone())
                .collect();
            if options.is_empty() {
                debug!("blank node without any structurally compatible candidate");
                return None;
            }
            candidates.insert(node.clone(), options);
        }

        let mut tested = 0usize;
        for mapping in generate_mappings(&Mapping::default(), &candidates) {
            if self.step_budget.is_some_and(|budget| tested >= budget) {
                debug!("step budget of {tested} mappings exhausted, giving up");
                return None;
            }
            tested += 1;
            if mapping_carries(&g_blank, &h_blank_set, &mapping) {
                debug!("found an equality mapping after testing {tested} candidates");
                return Some(mapping);
            }
        }
        debug!("mapping space exhausted after {tested} candidates, graphs are not equal");
        None
    }

    /// Whether every triple of `sub` occurs in `parent` under some injective
    /// blank-node mapping.
    #[must_use]
    pub fn is_subgraph(&self, sub: &Graph, parent: &Graph) -> bool {
        if sub.len() > parent.len() {
            return false;
        }

        let (sub_ground, sub_blank) = partition(sub);
        let (parent_ground, parent_blank) = partition(parent);
        if !sub_ground.iter().all(|triple| parent_ground.contains(triple)) {
            debug!("subgraph contains a ground triple missing from the parent");
            return false;
        }
        if sub_blank.is_empty() {
            return true;
        }

        let sub_degrees = occurrence_counts(&sub_blank);
        let parent_degrees = occurrence_counts(&parent_blank);
        if sub_degrees.len() > parent_degrees.len() {
            debug!("subgraph has more blank nodes than the parent");
            return false;
        }

        let parent_blank_set: FxHashSet<Triple> = parent_blank.iter().cloned().collect();

        // A parent node can only cover a sub node of equal or lesser degree.
        let mut candidates = CandidateMap::default();
        for (node, degree) in &sub_degrees {
            let options: Vec<BlankNode> = parent_degrees
                .iter()
                .filter(|(_, parent_degree)| *parent_degree >= degree)
                .map(|(candidate, _)| candidate.clone())
                .collect();
            if options.is_empty() {
                return false;
            }
            candidates.insert(node.clone(), options);
        }

        let mut tested = 0usize;
        for mapping in generate_mappings(&Mapping::default(), &candidates) {
            if self.step_budget.is_some_and(|budget| tested >= budget) {
                debug!("step budget of {tested} mappings exhausted, giving up");
                return false;
            }
            tested += 1;
            if mapping_covered(&sub_blank, &parent_blank_set, &mapping) {
                return true;
            }
        }
        false
    }
}

/// Splits a graph into its ground triples and the triples carrying at least
/// one blank node.
pub(crate) fn partition(graph: &Graph) -> (FxHashSet<Triple>, Vec<Triple>) {
    let mut ground = FxHashSet::default();
    let mut blank = Vec::new();
    for triple in graph.iter() {
        let triple = triple.into_owned();
        if is_ground(&triple) {
            ground.insert(triple);
        } else {
            blank.push(triple);
        }
    }
    (ground, blank)
}

pub(crate) fn is_ground(triple: &Triple) -> bool {
    subject_blank(triple).is_none() && object_blank(triple).is_none()
}

/// How often each blank node occurs across the given triples.
fn occurrence_counts(triples: &[Triple]) -> FxHashMap<BlankNode, usize> {
    let mut counts = FxHashMap::default();
    for triple in triples {
        if let Some(node) = subject_blank(triple) {
            *counts.entry(node.clone()).or_insert(0) += 1;
        }
        if let Some(node) = object_blank(triple) {
            *counts.entry(node.clone()).or_insert(0) += 1;
        }
    }
    counts
}

fn degree_histogram(counts: &FxHashMap<BlankNode, usize>) -> FxHashMap<usize, usize> {
    let mut histogram = FxHashMap::default();
    for degree in counts.values() {
        *histogram.entry(*degree).or_insert(0usize) += 1;
    }
    histogram
}

fn signature_histogram(signatures: &SignatureMap) -> FxHashMap<u64, usize> {
    let mut histogram = FxHashMap::default();
    for signature in signatures.values() {
        *histogram.entry(*signature).or_insert(0usize) += 1;
    }
    histogram
}

/// Whether the mapping is injective and carries every triple of `from`
/// exactly onto the triple set `onto`.
fn mapping_carries(from: &[Triple], onto: &FxHashSet<Triple>, mapping: &Mapping) -> bool {
    if !is_injective(mapping) {
        return false;
    }
    let mut remaining = onto.clone();
    from.iter()
        .all(|triple| remaining.remove(&map_triple(triple, mapping)))
        && remaining.is_empty()
}

/// Whether the mapping is injective and maps every triple of `from` into
/// (not necessarily onto) the triple set `within`.
fn mapping_covered(from: &[Triple], within: &FxHashSet<Triple>, mapping: &Mapping) -> bool {
    is_injective(mapping)
        && from
            .iter()
            .all(|triple| within.contains(&map_triple(triple, mapping)))
}

fn is_injective(mapping: &Mapping) -> bool {
    let mut targets = FxHashSet::default();
    mapping.values().all(|target| targets.insert(target))
}

/// Rewrites the blank nodes of a triple through the mapping; unmapped nodes
/// stay as they are.
pub(crate) fn map_triple(triple: &Triple, mapping: &Mapping) -> Triple {
    let subject = match &triple.subject {
        Subject::BlankNode(node) => match mapping.get(node) {
            Some(target) => Subject::BlankNode(target.clone()),
            None => triple.subject.clone(),
        },
        other => other.clone(),
    };
    let object = match &triple.object {
        Term::BlankNode(node) => match mapping.get(node) {
            Some(target) => Term::BlankNode(target.clone()),
            None => triple.object.clone(),
        },
        other => other.clone(),
    };
    Triple::new(subject, triple.predicate.clone(), object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_reckon_model::NamedNode;

    fn iri(suffix: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{suffix}"))
    }

    fn bnode(label: &str) -> BlankNode {
        BlankNode::new_unchecked(label)
    }

    #[test]
    fn partitions_ground_and_blank_triples() {
        let mut graph = Graph::default();
        graph.insert(&Triple::new(iri("s"), iri("p"), Term::from(iri("o"))));
        graph.insert(&Triple::new(bnode("a"), iri("p"), Term::from(iri("o"))));
        let (ground, blank) = partition(&graph);
        assert_eq!(ground.len(), 1);
        assert_eq!(blank.len(), 1);
    }

    #[test]
    fn differing_blank_degrees_rule_out_equality() {
        let mut g = Graph::default();
        g.insert(&Triple::new(bnode("a"), iri("p"), Term::from(iri("o1"))));
        g.insert(&Triple::new(bnode("a"), iri("p"), Term::from(iri("o2"))));

        let mut h = Graph::default();
        h.insert(&Triple::new(bnode("x"), iri("p"), Term::from(iri("o1"))));
        h.insert(&Triple::new(bnode("y"), iri("p"), Term::from(iri("o2"))));

        assert!(!GraphMatcher::new().are_equal(&g, &h));
    }

    #[test]
    fn map_triple_rewrites_both_positions() {
        let triple = Triple::new(bnode("a"), iri("p"), Term::from(bnode("b")));
        let mapping: Mapping = [(bnode("a"), bnode("x")), (bnode("b"), bnode("y"))]
            .into_iter()
            .collect();
        let mapped = map_triple(&triple, &mapping);
        assert_eq!(
            mapped,
            Triple::new(bnode("x"), iri("p"), Term::from(bnode("y")))
        );
    }

    #[test]
    fn non_injective_mappings_are_rejected() {
        let from = vec![
            Triple::new(bnode("a"), iri("p"), Term::from(iri("o"))),
            Triple::new(bnode("b"), iri("p"), Term::from(iri("o"))),
        ];
        let onto: FxHashSet<Triple> = from.iter().cloned().collect();
        let squashing: Mapping = [(bnode("a"), bnode("a")), (bnode("b"), bnode("a"))]
            .into_iter()
            .collect();
        assert!(!mapping_carries(&from, &onto, &squashing));
    }
}
