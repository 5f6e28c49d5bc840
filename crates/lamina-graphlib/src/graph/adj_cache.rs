//! Adjacency cache used by [`Graph`](super::Graph).
//!
//! Out/in edge indices per node in CSR form. Rebuilt lazily after any structural mutation.

use super::entries::EdgeEntry;

#[derive(Debug, Clone)]
pub(in crate::graph) struct DirectedAdjCache {
    pub(in crate::graph) generation: u64,
    out_offsets: Vec<usize>,
    out_edges: Vec<usize>,
    in_offsets: Vec<usize>,
    in_edges: Vec<usize>,
}

impl DirectedAdjCache {
    /// Builds the cache from edges whose endpoints were already resolved to node indices.
    pub(in crate::graph) fn build<E>(
        generation: u64,
        node_count: usize,
        edges: &[EdgeEntry<E>],
        resolve: impl Fn(&str) -> Option<usize>,
    ) -> Self {
        let mut endpoints: Vec<(usize, usize, usize)> = Vec::with_capacity(edges.len());
        for (edge_ix, e) in edges.iter().enumerate() {
            let (Some(v_ix), Some(w_ix)) = (resolve(&e.key.v), resolve(&e.key.w)) else {
                continue;
            };
            endpoints.push((edge_ix, v_ix, w_ix));
        }

        let mut out_offsets = vec![0usize; node_count + 1];
        let mut in_offsets = vec![0usize; node_count + 1];
        for &(_, v_ix, w_ix) in &endpoints {
            out_offsets[v_ix + 1] += 1;
            in_offsets[w_ix + 1] += 1;
        }
        for i in 0..node_count {
            out_offsets[i + 1] += out_offsets[i];
            in_offsets[i + 1] += in_offsets[i];
        }

        let mut out_cursor = out_offsets.clone();
        let mut in_cursor = in_offsets.clone();
        let mut out_edges = vec![0usize; endpoints.len()];
        let mut in_edges = vec![0usize; endpoints.len()];
        // Edge indices are visited in ascending order, so each slice keeps insertion order.
        for &(edge_ix, v_ix, w_ix) in &endpoints {
            out_edges[out_cursor[v_ix]] = edge_ix;
            out_cursor[v_ix] += 1;
            in_edges[in_cursor[w_ix]] = edge_ix;
            in_cursor[w_ix] += 1;
        }

        Self {
            generation,
            out_offsets,
            out_edges,
            in_offsets,
            in_edges,
        }
    }

    pub(in crate::graph) fn out_edges(&self, v_ix: usize) -> &[usize] {
        let start = self.out_offsets[v_ix];
        let end = self.out_offsets[v_ix + 1];
        &self.out_edges[start..end]
    }

    pub(in crate::graph) fn in_edges(&self, v_ix: usize) -> &[usize] {
        let start = self.in_offsets[v_ix];
        let end = self.in_offsets[v_ix + 1];
        &self.in_edges[start..end]
    }
}
