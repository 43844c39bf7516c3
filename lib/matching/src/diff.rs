use crate::matcher::{partition, GraphMatcher};
use crate::msg::compute_msgs;
use rdf_reckon_model::{Graph, Triple};
use tracing::debug;

/// The outcome of comparing two graphs.
///
/// Ground triples present on only one side are listed directly; blank nodes
/// that could not be matched are reported as their minimal subgraphs.
/// "Removed" is what only the first graph has, "added" what only the second
/// has. Immutable once produced.
#[derive(Debug, Default)]
pub struct GraphDiffReport {
    are_equal: bool,
    added_triples: Vec<Triple>,
    removed_triples: Vec<Triple>,
    added_msgs: Vec<Graph>,
    removed_msgs: Vec<Graph>,
}

impl GraphDiffReport {
    #[must_use]
    pub fn are_equal(&self) -> bool {
        self.are_equal
    }

    /// Ground triples present only in the second graph.
    #[must_use]
    pub fn added_triples(&self) -> &[Triple] {
        &self.added_triples
    }

    /// Ground triples present only in the first graph.
    #[must_use]
    pub fn removed_triples(&self) -> &[Triple] {
        &self.removed_triples
    }

    /// Minimal subgraphs of the second graph whose blank nodes found no
    /// counterpart in the first.
    #[must_use]
    pub fn added_msgs(&self) -> &[Graph] {
        &self.added_msgs
    }

    /// Minimal subgraphs of the first graph whose blank nodes found no
    /// counterpart in the second.
    #[must_use]
    pub fn removed_msgs(&self) -> &[Graph] {
        &self.removed_msgs
    }

    fn equal() -> Self {
        Self {
            are_equal: true,
            ..Self::default()
        }
    }
}

/// Produces [`GraphDiffReport`]s.
///
/// Graphs are optional here: an absent graph compared against a populated
/// one is strictly unequal, with all of the other graph's content reported
/// as added or removed. That outcome is defined, not an error.
#[derive(Debug, Default)]
pub struct GraphDiff {
    matcher: GraphMatcher,
}

impl GraphDiff {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a pre-configured matcher (step budget, refinement rounds) for
    /// the equality decisions inside the diff.
    #[must_use]
    pub fn with_matcher(matcher: GraphMatcher) -> Self {
        Self { matcher }
    }

    #[must_use]
    pub fn difference(&self, g: Option<&Graph>, h: Option<&Graph>) -> GraphDiffReport {
        match (g, h) {
            (None, None) => GraphDiffReport::equal(),
            (None, Some(h)) => {
                let (ground, blank) = partition(h);
                if ground.is_empty() && blank.is_empty() {
                    return GraphDiffReport::equal();
                }
                GraphDiffReport {
                    are_equal: false,
                    added_triples: ground.into_iter().collect(),
                    added_msgs: compute_msgs(&blank),
                    ..GraphDiffReport::default()
                }
            }
            (Some(g), None) => {
                let (ground, blank) = partition(g);
                if ground.is_empty() && blank.is_empty() {
                    return GraphDiffReport::equal();
                }
                GraphDiffReport {
                    are_equal: false,
                    removed_triples: ground.into_iter().collect(),
                    removed_msgs: compute_msgs(&blank),
                    ..GraphDiffReport::default()
                }
            }
            (Some(g), Some(h)) => self.compare(g, h),
        }
    }

    fn compare(&self, g: &Graph, h: &Graph) -> GraphDiffReport {
        if self.matcher.are_equal(g, h) {
            return GraphDiffReport::equal();
        }
        debug!("graphs differ, computing the diff report");

        let (g_ground, g_blank) = partition(g);
        let (h_ground, h_blank) = partition(h);

        let removed_triples: Vec<Triple> = g_ground
            .iter()
            .filter(|triple| !h_ground.contains(*triple))
            .cloned()
            .collect();
        let added_triples: Vec<Triple> = h_ground
            .iter()
            .filter(|triple| !g_ground.contains(*triple))
            .cloned()
            .collect();

        // Match the minimal subgraphs pairwise; whatever finds no isomorphic
        // counterpart is reported. The pairing is greedy, which suffices for
        // a diagnostic report; the equality decision above did the real work.
        let g_msgs = compute_msgs(&g_blank);
        let mut h_msgs = compute_msgs(&h_blank);
        let mut removed_msgs = Vec::new();
        for msg in g_msgs {
            let matched = h_msgs
                .iter()
                .position(|candidate| self.matcher.are_equal(&msg, candidate));
            match matched {
                Some(index) => {
                    h_msgs.swap_remove(index);
                }
                None => removed_msgs.push(msg),
            }
        }

        GraphDiffReport {
            are_equal: false,
            added_triples,
            removed_triples,
            added_msgs: h_msgs,
            removed_msgs,
        }
    }
}
