//! Normalize long edges by inserting dummy nodes.
//!
//! [`run`] replaces every edge spanning more than one rank with a chain of `"edge"` dummy
//! nodes, one per intermediate rank, so ordering and positioning only ever see rank-adjacent
//! edges. [`undo`] walks each chain after coordinates were assigned, folds it back into the
//! original edge and records the dummy coordinates as the edge's `points`.
//!
//! Both passes validate the whole graph before touching it: on error the graph is unchanged.

use crate::graphlib::{EdgeKey, Graph};
use crate::util::{DummyIds, add_dummy_node, endpoint_rank};
use crate::{Dummy, EdgeLabel, Error, GraphLabel, NodeLabel, Point, Result};
use tracing::{debug, trace};

/// A long edge scheduled for splitting.
struct Split {
    edge: EdgeKey,
    tail_rank: i32,
    head_rank: i32,
}

pub fn run(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Result<()> {
    let splits = plan_splits(g)?;
    if splits.is_empty() {
        debug!(edges = g.edge_count(), "normalize: no long edges");
        return Ok(());
    }

    let keys: Vec<EdgeKey> = splits.iter().map(|s| s.edge.clone()).collect();
    let labels = g.take_edges(&keys);

    let mut ids = DummyIds::new(g.graph().dummy_prefix.clone());
    let mut dummies = 0usize;
    for (split, label) in splits.iter().zip(labels) {
        if let Some(label) = label {
            dummies += normalize_edge(g, &mut ids, split, label);
        }
    }

    debug!(
        long_edges = splits.len(),
        dummies, "normalize: split long edges into dummy chains"
    );
    Ok(())
}

fn plan_splits(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Result<Vec<Split>> {
    let mut splits = Vec::new();
    for e in g.edges() {
        let tail_rank = endpoint_rank(g, e, &e.v)?;
        let head_rank = endpoint_rank(g, e, &e.w)?;
        // Wide enough for any pair of `i32` ranks.
        let span = i64::from(head_rank) - i64::from(tail_rank);

        if span < -1 {
            return Err(Error::ReversedEdge {
                edge: e.clone(),
                tail_rank,
                head_rank,
            });
        }
        if span <= 1 {
            continue;
        }

        let label_rank = g.edge_by_key(e).and_then(|l| l.label_rank);
        if let Some(label_rank) = label_rank {
            if label_rank <= tail_rank || label_rank >= head_rank {
                return Err(Error::LabelRankOutOfRange {
                    edge: e.clone(),
                    label_rank,
                    tail_rank,
                    head_rank,
                });
            }
        }

        splits.push(Split {
            edge: e.clone(),
            tail_rank,
            head_rank,
        });
    }
    Ok(splits)
}

/// Builds the chain for one long edge, already removed from the graph, and returns the number
/// of dummies created.
fn normalize_edge(
    g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>,
    ids: &mut DummyIds,
    split: &Split,
    mut edge_label: EdgeLabel,
) -> usize {
    let e = &split.edge;
    edge_label.points.clear();

    let weight = edge_label.weight;
    let segment = || EdgeLabel {
        weight,
        ..Default::default()
    };

    let mut prev = e.v.clone();
    let mut created = 0usize;
    for rank in split.tail_rank + 1..split.head_rank {
        let mut node = NodeLabel {
            width: 0.0,
            height: 0.0,
            rank: Some(rank),
            dummy: Some(Dummy::Edge),
            ..Default::default()
        };
        if edge_label.label_rank == Some(rank) {
            node.width = edge_label.width;
            node.height = edge_label.height;
            node.labelpos = Some(edge_label.labelpos);
        }
        if created == 0 {
            node.edge_label = Some(edge_label.clone());
            node.edge_obj = Some(e.clone());
        }

        let dummy = add_dummy_node(g, ids, node);
        if created == 0 {
            g.graph_mut().dummy_chains.push(dummy.clone());
        }
        g.set_edge_named(prev, dummy.clone(), e.name.clone(), Some(segment()));
        prev = dummy;
        created += 1;
    }
    g.set_edge_named(prev, e.w.clone(), e.name.clone(), Some(segment()));

    trace!(
        v = %e.v,
        w = %e.w,
        name = ?e.name,
        span = i64::from(split.head_rank) - i64::from(split.tail_rank),
        "normalize: split edge"
    );
    created
}

/// A chain ready to be folded back into its original edge.
struct Collapse {
    edge: EdgeKey,
    label: EdgeLabel,
    dummies: Vec<String>,
}

pub fn undo(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) -> Result<()> {
    let chains = g.graph().dummy_chains.clone();
    let collapses = chains
        .iter()
        .map(|start| trace_chain(g, start))
        .collect::<Result<Vec<_>>>()?;

    let removed = g.remove_nodes(
        collapses
            .iter()
            .flat_map(|c| c.dummies.iter().map(String::as_str)),
    );
    for collapse in collapses {
        trace!(
            v = %collapse.edge.v,
            w = %collapse.edge.w,
            name = ?collapse.edge.name,
            points = collapse.label.points.len(),
            "normalize: restored edge"
        );
        g.set_edge_key(collapse.edge, collapse.label);
    }
    g.graph_mut().dummy_chains.clear();

    debug!(
        chains = chains.len(),
        dummies = removed,
        "normalize: collapsed dummy chains"
    );
    Ok(())
}

fn malformed(node: &str, reason: impl Into<String>) -> Error {
    Error::MalformedChain {
        node: node.to_string(),
        reason: reason.into(),
    }
}

/// Walks the chain starting at `start` without mutating the graph.
fn trace_chain(g: &Graph<NodeLabel, EdgeLabel, GraphLabel>, start: &str) -> Result<Collapse> {
    let node = g
        .node(start)
        .ok_or_else(|| malformed(start, "chain start is missing from the graph"))?;
    if !node.is_dummy() {
        return Err(malformed(start, "chain start is not a dummy node"));
    }
    let (Some(mut label), Some(edge)) = (node.edge_label.clone(), node.edge_obj.clone()) else {
        return Err(malformed(start, "chain start does not reference its original edge"));
    };

    let mut dummies: Vec<String> = Vec::new();
    let mut v = start;
    loop {
        let Some(node) = g.node(v) else {
            return Err(malformed(v, "chain node is missing from the graph"));
        };
        if !node.is_dummy() {
            break;
        }
        // A chain never holds more dummies than the graph has nodes; more means a cycle.
        if dummies.len() >= g.node_count() {
            return Err(malformed(v, "chain does not terminate"));
        }

        let (Some(x), Some(y)) = (node.x, node.y) else {
            return Err(Error::MissingCoordinates {
                node: v.to_string(),
            });
        };
        label.points.push(Point { x, y });
        if label.has_label() && node.rank == label.label_rank {
            label.x = Some(x);
            label.y = Some(y);
            label.width = node.width;
            label.height = node.height;
        }
        dummies.push(v.to_string());

        v = match g.successors(v).as_slice() {
            [w] => *w,
            [] => return Err(malformed(v, "dummy node has no successor")),
            many => {
                return Err(malformed(
                    v,
                    format!("dummy node has {} successors", many.len()),
                ));
            }
        };
    }

    if v != edge.w {
        return Err(malformed(
            v,
            format!("chain for edge {edge} ends at `{v}` instead of `{}`", edge.w),
        ));
    }

    Ok(Collapse {
        edge,
        label,
        dummies,
    })
}
