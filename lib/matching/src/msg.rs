use crate::signature::{object_blank, subject_blank};
use rdf_reckon_model::{BlankNode, Graph, Triple};
use rustc_hash::FxHashMap;

/// Splits blank-node-containing triples into minimal subgraphs: the
/// connected components under "shares a blank node".
///
/// Each component is the smallest set of triples needed to describe its
/// blank nodes, which is what a diff reports when no mapping exists for
/// them. Implemented as an explicit worklist over triple indices.
pub(crate) fn compute_msgs(triples: &[Triple]) -> Vec<Graph> {
    let mut triples_of_node: FxHashMap<&BlankNode, Vec<usize>> = FxHashMap::default();
    for (index, triple) in triples.iter().enumerate() {
        for node in blank_nodes(triple) {
            triples_of_node.entry(node).or_default().push(index);
        }
    }

    let mut visited = vec![false; triples.len()];
    let mut components = Vec::new();
    for start in 0..triples.len() {
        if visited[start] {
            continue;
        }
        let mut component = Graph::default();
        let mut worklist = vec![start];
        visited[start] = true;
        while let Some(index) = worklist.pop() {
            let triple = &triples[index];
            component.insert(triple);
            for node in blank_nodes(triple) {
                for &neighbor in &triples_of_node[node] {
                    if !visited[neighbor] {
                        visited[neighbor] = true;
                        worklist.push(neighbor);
                    }
                }
            }
        }
        components.push(component);
    }
    components
}

fn blank_nodes(triple: &Triple) -> impl Iterator<Item = &BlankNode> {
    subject_blank(triple).into_iter().chain(object_blank(triple))
}
