//! Helpers shared by the normalization passes.

use crate::graphlib::{EdgeKey, Graph};
use crate::{EdgeLabel, Error, GraphLabel, NodeLabel, Result};

/// Hands out node ids `prefix`, `prefix1`, `prefix2`, ... skipping ids already in the graph.
/// The suffix cursor only moves forward.
#[derive(Debug, Clone)]
pub struct DummyIds {
    prefix: String,
    next: usize,
}

impl DummyIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    pub fn next_free<N, E, G>(&mut self, g: &Graph<N, E, G>) -> String
    where
        N: Default + 'static,
        E: Default + 'static,
        G: Default,
    {
        loop {
            let id = if self.next == 0 {
                self.prefix.clone()
            } else {
                format!("{}{}", self.prefix, self.next)
            };
            self.next += 1;
            if !g.has_node(&id) {
                return id;
            }
        }
    }
}

/// Inserts `label` under the next free id and returns that id.
pub fn add_dummy_node(
    g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>,
    ids: &mut DummyIds,
    label: NodeLabel,
) -> String {
    let v = ids.next_free(g);
    g.set_node(v.clone(), label);
    v
}

/// Rank of `node`, an endpoint of `edge`.
pub fn endpoint_rank(
    g: &Graph<NodeLabel, EdgeLabel, GraphLabel>,
    edge: &EdgeKey,
    node: &str,
) -> Result<i32> {
    let label = g.node(node).ok_or_else(|| Error::MissingNode {
        edge: edge.clone(),
        node: node.to_string(),
    })?;
    label.rank.ok_or_else(|| Error::MissingRank {
        edge: edge.clone(),
        node: node.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphlib::GraphOptions;

    #[test]
    fn dummy_ids_skip_taken_ids() {
        let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions::default());
        g.set_node("_d", NodeLabel::default());
        g.set_node("_d2", NodeLabel::default());

        let mut ids = DummyIds::new("_d");
        let a = add_dummy_node(&mut g, &mut ids, NodeLabel::default());
        let b = add_dummy_node(&mut g, &mut ids, NodeLabel::default());

        assert_eq!(a, "_d1");
        assert_eq!(b, "_d3");
    }

    #[test]
    fn endpoint_rank_reports_the_offending_node() {
        let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions::default());
        g.set_node("a", NodeLabel::with_rank(0));
        g.set_node("b", NodeLabel::default());
        let e = EdgeKey::new("a", "b", None::<String>);

        assert_eq!(endpoint_rank(&g, &e, "a"), Ok(0));
        assert_eq!(
            endpoint_rank(&g, &e, "b"),
            Err(Error::MissingRank {
                edge: e.clone(),
                node: "b".to_string(),
            })
        );
        assert_eq!(
            endpoint_rank(&g, &e, "c"),
            Err(Error::MissingNode {
                edge: e.clone(),
                node: "c".to_string(),
            })
        );
    }
}
