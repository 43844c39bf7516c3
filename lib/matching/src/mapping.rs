use rdf_reckon_model::BlankNode;
use rustc_hash::FxHashMap;

/// A partial function from one graph's blank nodes to another's.
///
/// The matcher requires a mapping to be injective once total; the generator
/// itself does not enforce that, it only enumerates candidate combinations.
pub type Mapping = FxHashMap<BlankNode, BlankNode>;

/// The structurally compatible counterparts of each blank node.
pub type CandidateMap = FxHashMap<BlankNode, Vec<BlankNode>>;

/// Enumerates every total mapping that extends `base` by choosing, for each
/// key of `candidates` not already fixed in `base`, one of its candidates.
///
/// The sequence is the full cartesian product over the unresolved keys: no
/// cross-node pruning happens here; keeping candidate sets small is the
/// caller's job. Keys and candidate lists are visited in sorted label order,
/// so the enumeration order is deterministic. A node with a single candidate
/// contributes no branching. Any node with an empty candidate set makes the
/// sequence empty.
///
/// The iterator is lazy: callers stop the (potentially exponential)
/// enumeration by simply not advancing it further.
pub fn generate_mappings(base: &Mapping, candidates: &CandidateMap) -> MappingIter {
    let mut unresolved: Vec<(&BlankNode, &Vec<BlankNode>)> = candidates
        .iter()
        .filter(|(node, _)| !base.contains_key(*node))
        .collect();
    unresolved.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));

    let keys: Vec<BlankNode> = unresolved.iter().map(|(node, _)| (*node).clone()).collect();
    let candidates: Vec<Vec<BlankNode>> = unresolved
        .iter()
        .map(|(_, options)| {
            let mut options = (*options).clone();
            options.sort_by(|a, b| a.as_str().cmp(b.as_str()));
            options
        })
        .collect();

    let exhausted = candidates.iter().any(Vec::is_empty);
    let positions = vec![0; keys.len()];
    MappingIter {
        base: base.clone(),
        keys,
        candidates,
        positions,
        exhausted,
    }
}

/// Lazy enumeration state of [`generate_mappings`].
///
/// Strict progress: each step either advances the odometer over the
/// unresolved keys or exhausts it, so the sequence always terminates after
/// exactly the product of the candidate-set sizes.
pub struct MappingIter {
    base: Mapping,
    keys: Vec<BlankNode>,
    candidates: Vec<Vec<BlankNode>>,
    positions: Vec<usize>,
    exhausted: bool,
}

impl Iterator for MappingIter {
    type Item = Mapping;

    fn next(&mut self) -> Option<Mapping> {
        if self.exhausted {
            return None;
        }

        let mut mapping = self.base.clone();
        for (index, key) in self.keys.iter().enumerate() {
            mapping.insert(
                key.clone(),
                self.candidates[index][self.positions[index]].clone(),
            );
        }

        // Advance the rightmost position, carrying leftwards; running out of
        // carries means the product is exhausted.
        let mut index = self.keys.len();
        loop {
            if index == 0 {
                self.exhausted = true;
                break;
            }
            index -= 1;
            self.positions[index] += 1;
            if self.positions[index] < self.candidates[index].len() {
                break;
            }
            self.positions[index] = 0;
        }

        Some(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(label: &str) -> BlankNode {
        BlankNode::new_unchecked(label)
    }

    fn candidates_of(entries: &[(&str, &[&str])]) -> CandidateMap {
        entries
            .iter()
            .map(|(key, options)| {
                (
                    node(key),
                    options.iter().map(|option| node(option)).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn enumerates_the_cartesian_product() {
        let candidates = candidates_of(&[("a", &["b1", "b2"]), ("c", &["b1", "b2"])]);
        let mappings: Vec<_> = generate_mappings(&Mapping::default(), &candidates).collect();
        assert_eq!(mappings.len(), 4);
        for mapping in &mappings {
            assert_eq!(mapping.len(), 2);
            assert!(mapping.contains_key(&node("a")));
            assert!(mapping.contains_key(&node("c")));
        }
    }

    #[test]
    fn base_entries_are_fixed() {
        let candidates = candidates_of(&[("a", &["b1", "b2"]), ("c", &["b1", "b2"])]);
        let base: Mapping = [(node("a"), node("b1"))].into_iter().collect();
        let mappings: Vec<_> = generate_mappings(&base, &candidates).collect();
        assert_eq!(mappings.len(), 2);
        for mapping in &mappings {
            assert_eq!(mapping[&node("a")], node("b1"));
        }
    }

    #[test]
    fn single_candidates_do_not_branch() {
        let candidates = candidates_of(&[("a", &["b1"]), ("c", &["b1", "b2", "b3"])]);
        let mappings: Vec<_> = generate_mappings(&Mapping::default(), &candidates).collect();
        assert_eq!(mappings.len(), 3);
    }

    #[test]
    fn empty_candidate_sets_end_the_enumeration() {
        let candidates = candidates_of(&[("a", &["b1"]), ("c", &[])]);
        assert_eq!(
            generate_mappings(&Mapping::default(), &candidates).count(),
            0
        );
    }

    #[test]
    fn no_unresolved_keys_yields_the_base_once() {
        let candidates = candidates_of(&[("a", &["b1", "b2"])]);
        let base: Mapping = [(node("a"), node("b2"))].into_iter().collect();
        let mappings: Vec<_> = generate_mappings(&base, &candidates).collect();
        assert_eq!(mappings, vec![base]);
    }

    #[test]
    fn enumeration_order_is_deterministic() {
        let candidates = candidates_of(&[("a", &["b2", "b1"])]);
        let first: Vec<_> = generate_mappings(&Mapping::default(), &candidates).collect();
        let second: Vec<_> = generate_mappings(&Mapping::default(), &candidates).collect();
        assert_eq!(first, second);
        assert_eq!(first[0][&node("a")], node("b1"));
    }
}
