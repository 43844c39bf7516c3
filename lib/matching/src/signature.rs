use rdf_reckon_model::{BlankNode, Subject, Term, TermRef, Triple};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Structural signature per blank node.
pub(crate) type SignatureMap = FxHashMap<BlankNode, u64>;

/// Computes a structural signature for every blank node occurring in the
/// given triples, by partition refinement.
///
/// The initial signature of a node hashes its ground neighborhood: the
/// multiset of (predicate, object) pairs where it is subject and
/// (subject, predicate) pairs where it is object, with blank neighbors
/// contributing only their presence, plus the node's degree. Each
/// refinement round folds the neighbors' previous signatures in, so
/// information propagates one hop per round.
///
/// Refinement runs as a worklist with an iteration cap (`rounds`), never by
/// recursion, so cyclic blank-node structures terminate; once the partition
/// stops splitting the fixpoint is reached early. Nodes that are genuinely
/// interchangeable (automorphic) keep equal signatures forever, which is
/// what makes the signature safe as a candidate filter: it never separates
/// nodes an isomorphism could map onto each other.
pub(crate) fn blank_node_signatures(triples: &[Triple], rounds: usize) -> SignatureMap {
    let nodes = blank_nodes_of(triples);
    let mut signatures: SignatureMap = nodes
        .iter()
        .map(|node| (node.clone(), initial_signature(node, triples)))
        .collect();

    let mut classes = distinct_count(&signatures);
    for _ in 0..rounds {
        let refined: SignatureMap = nodes
            .iter()
            .map(|node| (node.clone(), refined_signature(node, triples, &signatures)))
            .collect();
        let refined_classes = distinct_count(&refined);
        signatures = refined;
        if refined_classes == classes {
            // Partition stable: further rounds cannot split any class.
            break;
        }
        classes = refined_classes;
    }
    signatures
}

fn blank_nodes_of(triples: &[Triple]) -> Vec<BlankNode> {
    let mut seen = FxHashSet::default();
    let mut nodes = Vec::new();
    for triple in triples {
        if let Some(node) = subject_blank(triple) {
            if seen.insert(node.clone()) {
                nodes.push(node.clone());
            }
        }
        if let Some(node) = object_blank(triple) {
            if seen.insert(node.clone()) {
                nodes.push(node.clone());
            }
        }
    }
    nodes
}

pub(crate) fn subject_blank(triple: &Triple) -> Option<&BlankNode> {
    match &triple.subject {
        Subject::BlankNode(node) => Some(node),
        _ => None,
    }
}

pub(crate) fn object_blank(triple: &Triple) -> Option<&BlankNode> {
    match &triple.object {
        Term::BlankNode(node) => Some(node),
        _ => None,
    }
}

fn initial_signature(node: &BlankNode, triples: &[Triple]) -> u64 {
    feature_signature(node, triples, |_| 0)
}

fn refined_signature(node: &BlankNode, triples: &[Triple], previous: &SignatureMap) -> u64 {
    let own = previous.get(node).copied().unwrap_or(0);
    let features = feature_signature(node, triples, |neighbor| {
        previous.get(neighbor).copied().unwrap_or(0)
    });
    hash_pair(own, features)
}

/// Hashes the sorted feature multiset of a node. `neighbor_color` abstracts
/// how a blank neighbor contributes: nothing in round zero, its previous
/// signature afterwards.
fn feature_signature(
    node: &BlankNode,
    triples: &[Triple],
    neighbor_color: impl Fn(&BlankNode) -> u64,
) -> u64 {
    let mut features = Vec::new();
    for triple in triples {
        if subject_blank(triple) == Some(node) {
            let object = match object_blank(triple) {
                Some(neighbor) => hash_pair(1, neighbor_color(neighbor)),
                None => hash_pair(2, term_fingerprint(triple.object.as_ref())),
            };
            features.push(hash_triple(0, predicate_fingerprint(triple), object));
        }
        if object_blank(triple) == Some(node) {
            let subject = match subject_blank(triple) {
                Some(neighbor) => hash_pair(1, neighbor_color(neighbor)),
                None => hash_pair(2, subject_fingerprint(triple)),
            };
            features.push(hash_triple(1, predicate_fingerprint(triple), subject));
        }
    }
    features.sort_unstable();

    let mut hasher = DefaultHasher::new();
    features.len().hash(&mut hasher);
    for feature in features {
        feature.hash(&mut hasher);
    }
    hasher.finish()
}

fn predicate_fingerprint(triple: &Triple) -> u64 {
    let mut hasher = DefaultHasher::new();
    triple.predicate.as_str().hash(&mut hasher);
    hasher.finish()
}

fn subject_fingerprint(triple: &Triple) -> u64 {
    let mut hasher = DefaultHasher::new();
    triple.subject.to_string().hash(&mut hasher);
    hasher.finish()
}

fn term_fingerprint(term: TermRef<'_>) -> u64 {
    let mut hasher = DefaultHasher::new();
    term.to_string().hash(&mut hasher);
    hasher.finish()
}

fn hash_pair(tag: u64, value: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    tag.hash(&mut hasher);
    value.hash(&mut hasher);
    hasher.finish()
}

fn hash_triple(tag: u64, first: u64, second: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    tag.hash(&mut hasher);
    first.hash(&mut hasher);
    second.hash(&mut hasher);
    hasher.finish()
}

fn distinct_count(signatures: &SignatureMap) -> usize {
    signatures.values().collect::<FxHashSet<_>>().len()
}
