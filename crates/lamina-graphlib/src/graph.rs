//! The `Graph` container.
//!
//! A directed graph with string node ids, optional parallel edges (multigraph) and per-node,
//! per-edge and per-graph labels. Layout passes own the graph exclusively while they run and
//! mutate it in place.

mod adj_cache;
mod edge_key;
mod entries;
mod options;

pub use edge_key::EdgeKey;
pub use options::GraphOptions;

use adj_cache::DirectedAdjCache;
use edge_key::EdgeKeyView;
use entries::{EdgeEntry, NodeEntry};
use rustc_hash::FxBuildHasher;
use std::cell::{Ref, RefCell};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

pub struct Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    options: GraphOptions,

    graph_label: G,
    default_node_label: Box<dyn Fn() -> N + Send + Sync>,
    default_edge_label: Box<dyn Fn() -> E + Send + Sync>,

    nodes: Vec<NodeEntry<N>>,
    node_index: HashMap<String, usize>,

    edges: Vec<EdgeEntry<E>>,
    edge_index: HashMap<EdgeKey, usize>,

    // Rebuilt lazily; `generation` is bumped by every structural mutation.
    adj_generation: u64,
    adj_cache: RefCell<Option<DirectedAdjCache>>,
}

impl<N, E, G> Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            graph_label: G::default(),
            default_node_label: Box::new(N::default),
            default_edge_label: Box::new(E::default),
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
            adj_generation: 0,
            adj_cache: RefCell::new(None),
        }
    }

    fn invalidate_adj(&mut self) {
        self.adj_generation = self.adj_generation.wrapping_add(1);
        *self.adj_cache.get_mut() = None;
    }

    fn adj(&self) -> Ref<'_, DirectedAdjCache> {
        let generation = self.adj_generation;
        let stale = self
            .adj_cache
            .borrow()
            .as_ref()
            .is_none_or(|c| c.generation != generation);
        if stale {
            let cache = DirectedAdjCache::build(
                generation,
                self.nodes.len(),
                &self.edges,
                |id| self.node_index.get(id).copied(),
            );
            *self.adj_cache.borrow_mut() = Some(cache);
        }
        Ref::map(self.adj_cache.borrow(), |c| {
            c.as_ref()
                .expect("adjacency cache is populated right above")
        })
    }

    fn edge_key_view<'a>(&self, v: &'a str, w: &'a str, name: Option<&'a str>) -> EdgeKeyView<'a> {
        let name = if self.options.multigraph { name } else { None };
        EdgeKeyView { v, w, name }
    }

    fn edge_index_of(&self, view: EdgeKeyView<'_>) -> Option<usize> {
        let view = self.edge_key_view(view.v, view.w, view.name);
        self.edge_index.get(&view).copied()
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn is_multigraph(&self) -> bool {
        self.options.multigraph
    }

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.graph_label = label;
        self
    }

    pub fn graph(&self) -> &G {
        &self.graph_label
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph_label
    }

    pub fn set_default_node_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> N + Send + Sync + 'static,
    {
        self.default_node_label = Box::new(f);
        self
    }

    pub fn set_default_edge_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> E + Send + Sync + 'static,
    {
        self.default_edge_label = Box::new(f);
        self
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut Self {
        let id = id.into();
        if let Some(&idx) = self.node_index.get(&id) {
            self.nodes[idx].label = label;
            return self;
        }
        self.invalidate_adj();
        let idx = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            label,
        });
        self.node_index.insert(id, idx);
        self
    }

    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.node_index.contains_key(&id) {
            return self;
        }
        let label = (self.default_node_label)();
        self.set_node(id, label)
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx].label)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        self.node_index
            .get(id)
            .copied()
            .map(move |idx| &mut self.nodes[idx].label)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.iter().map(|e| &e.key)
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges.iter().map(|e| e.key.clone()).collect()
    }

    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        self.set_edge_named(v, w, None::<String>, None)
    }

    pub fn set_edge_with_label(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        label: E,
    ) -> &mut Self {
        self.set_edge_named(v, w, None::<String>, Some(label))
    }

    /// Creates or updates the edge `(v, w, name)`, creating missing endpoints with the default
    /// node label. An existing edge keeps its label when `label` is `None`.
    pub fn set_edge_named(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        name: Option<impl Into<String>>,
        label: Option<E>,
    ) -> &mut Self {
        let v = v.into();
        let w = w.into();
        self.ensure_node(v.clone());
        self.ensure_node(w.clone());

        let name = if self.options.multigraph {
            name.map(Into::into)
        } else {
            None
        };
        let key = EdgeKey { v, w, name };

        if let Some(&idx) = self.edge_index.get(&key) {
            if let Some(label) = label {
                self.edges[idx].label = label;
            }
            return self;
        }

        self.invalidate_adj();
        let idx = self.edges.len();
        self.edges.push(EdgeEntry {
            key: key.clone(),
            label: label.unwrap_or_else(|| (self.default_edge_label)()),
        });
        self.edge_index.insert(key, idx);
        self
    }

    pub fn set_edge_key(&mut self, key: EdgeKey, label: E) -> &mut Self {
        self.set_edge_named(key.v, key.w, key.name, Some(label))
    }

    pub fn set_path(&mut self, nodes: &[&str]) -> &mut Self {
        for pair in nodes.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }

    pub fn has_edge(&self, v: &str, w: &str, name: Option<&str>) -> bool {
        self.edge_index_of(EdgeKeyView { v, w, name }).is_some()
    }

    pub fn edge(&self, v: &str, w: &str, name: Option<&str>) -> Option<&E> {
        let idx = self.edge_index_of(EdgeKeyView { v, w, name })?;
        Some(&self.edges[idx].label)
    }

    pub fn edge_mut(&mut self, v: &str, w: &str, name: Option<&str>) -> Option<&mut E> {
        let idx = self.edge_index_of(EdgeKeyView { v, w, name })?;
        Some(&mut self.edges[idx].label)
    }

    pub fn edge_by_key(&self, key: &EdgeKey) -> Option<&E> {
        let idx = self.edge_index_of(key.view())?;
        Some(&self.edges[idx].label)
    }

    pub fn edge_mut_by_key(&mut self, key: &EdgeKey) -> Option<&mut E> {
        let idx = self.edge_index_of(key.view())?;
        Some(&mut self.edges[idx].label)
    }

    fn remove_edge_at_index(&mut self, idx: usize) -> E {
        self.invalidate_adj();
        let entry = self.edges.remove(idx);
        self.edge_index.remove(&entry.key);
        for i in idx..self.edges.len() {
            if let Some(slot) = self.edge_index.get_mut(&self.edges[i].key) {
                *slot = i;
            }
        }
        entry.label
    }

    /// Removes the edge and hands its label back to the caller.
    pub fn take_edge(&mut self, key: &EdgeKey) -> Option<E> {
        let idx = self.edge_index_of(key.view())?;
        Some(self.remove_edge_at_index(idx))
    }

    pub fn remove_edge_key(&mut self, key: &EdgeKey) -> bool {
        self.take_edge(key).is_some()
    }

    pub fn remove_edge(&mut self, v: &str, w: &str, name: Option<&str>) -> bool {
        let Some(idx) = self.edge_index_of(EdgeKeyView { v, w, name }) else {
            return false;
        };
        self.remove_edge_at_index(idx);
        true
    }

    /// Removes a node together with all of its incident edges.
    pub fn remove_node(&mut self, id: &str) -> bool {
        self.remove_nodes([id]) == 1
    }

    /// Removes every listed node and all of their incident edges in a single pass over the
    /// graph. Unknown ids are ignored; returns the number of nodes removed.
    pub fn remove_nodes<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) -> usize {
        let doomed: HashSet<&str> = ids
            .into_iter()
            .filter(|id| self.node_index.contains_key(*id))
            .collect();
        if doomed.is_empty() {
            return 0;
        }

        self.invalidate_adj();
        self.nodes.retain(|n| !doomed.contains(n.id.as_str()));
        self.rebuild_node_index();

        let before = self.edges.len();
        self.edges.retain(|e| {
            !doomed.contains(e.key.v.as_str()) && !doomed.contains(e.key.w.as_str())
        });
        if self.edges.len() != before {
            self.rebuild_edge_index();
        }

        doomed.len()
    }

    /// Removes every listed edge in a single pass and returns their labels, positionally
    /// matching `keys`. Missing or repeated keys yield `None`.
    pub fn take_edges(&mut self, keys: &[EdgeKey]) -> Vec<Option<E>> {
        let mut out: Vec<Option<E>> = keys.iter().map(|_| None).collect();
        let mut slots: HashMap<usize, usize> = HashMap::default();
        for (pos, key) in keys.iter().enumerate() {
            if let Some(idx) = self.edge_index_of(key.view()) {
                slots.entry(idx).or_insert(pos);
            }
        }
        if slots.is_empty() {
            return out;
        }

        self.invalidate_adj();
        let edges = std::mem::take(&mut self.edges);
        self.edges.reserve(edges.len() - slots.len());
        for (idx, entry) in edges.into_iter().enumerate() {
            match slots.get(&idx) {
                Some(&pos) => out[pos] = Some(entry.label),
                None => self.edges.push(entry),
            }
        }
        self.rebuild_edge_index();
        out
    }

    fn rebuild_node_index(&mut self) {
        self.node_index.clear();
        for (i, n) in self.nodes.iter().enumerate() {
            self.node_index.insert(n.id.clone(), i);
        }
    }

    fn rebuild_edge_index(&mut self) {
        self.edge_index.clear();
        for (i, e) in self.edges.iter().enumerate() {
            self.edge_index.insert(e.key.clone(), i);
        }
    }

    pub fn successors(&self, v: &str) -> Vec<&str> {
        let Some(&v_ix) = self.node_index.get(v) else {
            return Vec::new();
        };
        let cache = self.adj();
        cache
            .out_edges(v_ix)
            .iter()
            .map(|&edge_ix| self.edges[edge_ix].key.w.as_str())
            .collect()
    }

    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        let Some(&v_ix) = self.node_index.get(v) else {
            return Vec::new();
        };
        let cache = self.adj();
        cache
            .in_edges(v_ix)
            .iter()
            .map(|&edge_ix| self.edges[edge_ix].key.v.as_str())
            .collect()
    }

    pub fn first_successor<'a>(&'a self, v: &str) -> Option<&'a str> {
        let &v_ix = self.node_index.get(v)?;
        let cache = self.adj();
        let &edge_ix = cache.out_edges(v_ix).first()?;
        Some(self.edges[edge_ix].key.w.as_str())
    }

    /// Successors first, then predecessors, without duplicates.
    pub fn neighbors(&self, v: &str) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for u in self.successors(v).into_iter().chain(self.predecessors(v)) {
            if !out.contains(&u) {
                out.push(u);
            }
        }
        out
    }

    pub fn out_edges(&self, v: &str, w: Option<&str>) -> Vec<EdgeKey> {
        let Some(&v_ix) = self.node_index.get(v) else {
            return Vec::new();
        };
        let cache = self.adj();
        cache
            .out_edges(v_ix)
            .iter()
            .map(|&edge_ix| &self.edges[edge_ix].key)
            .filter(|k| w.is_none_or(|w| k.w == w))
            .cloned()
            .collect()
    }

    pub fn in_edges(&self, v: &str, w: Option<&str>) -> Vec<EdgeKey> {
        let Some(&v_ix) = self.node_index.get(v) else {
            return Vec::new();
        };
        let cache = self.adj();
        cache
            .in_edges(v_ix)
            .iter()
            .map(|&edge_ix| &self.edges[edge_ix].key)
            .filter(|k| w.is_none_or(|w| k.v == w))
            .cloned()
            .collect()
    }

    pub fn node_edges(&self, v: &str) -> Vec<EdgeKey> {
        let mut out: Vec<EdgeKey> = Vec::new();
        let mut seen: HashSet<&EdgeKey> = HashSet::default();
        for e in &self.edges {
            if (e.key.v == v || e.key.w == v) && seen.insert(&e.key) {
                out.push(e.key.clone());
            }
        }
        out
    }
}
