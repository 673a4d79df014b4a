use std::collections::{HashMap, VecDeque};
use std::fmt::Display;
use std::hash::Hash;

/// Bounds shared by every node identifier.
pub trait NodeId: Clone + Eq + Hash + Display {}

impl<T: Clone + Eq + Hash + Display> NodeId for T {}

/// A signed edge between two nodes, referenced by insertion index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignedEdge {
    pub u: usize,
    pub v: usize,
    pub weight: f64,
}

/// An undirected graph whose edges carry a real-valued weight.
///
/// Nodes and edges enumerate in insertion order. Re-adding an edge between
/// the same unordered pair overwrites its weight.
#[derive(Debug, Clone)]
pub struct SignedGraph<N: NodeId = String> {
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    edges: Vec<SignedEdge>,
    edge_index: HashMap<(usize, usize), usize>,
}

impl<N: NodeId> Default for SignedGraph<N> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            edge_index: HashMap::new(),
        }
    }
}

impl<N: NodeId> SignedGraph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `node` if absent and returns its index.
    pub fn add_node(&mut self, node: N) -> usize {
        if let Some(&idx) = self.index.get(&node) {
            return idx;
        }
        let idx = self.nodes.len();
        self.index.insert(node.clone(), idx);
        self.nodes.push(node);
        idx
    }

    /// Adds an undirected edge, inserting missing endpoints.
    pub fn add_edge(&mut self, u: N, v: N, weight: f64) {
        let a = self.add_node(u);
        let b = self.add_node(v);
        let key = if a <= b { (a, b) } else { (b, a) };

        match self.edge_index.get(&key) {
            Some(&existing) => self.edges[existing].weight = weight,
            None => {
                self.edge_index.insert(key, self.edges.len());
                self.edges.push(SignedEdge { u: a, v: b, weight });
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    /// Iterates `(u, v, weight)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N, f64)> {
        self.edges
            .iter()
            .map(|e| (&self.nodes[e.u], &self.nodes[e.v], e.weight))
    }

    /// Edges with endpoint indices into [`SignedGraph::nodes`] order.
    pub fn signed_edges(&self) -> &[SignedEdge] {
        &self.edges
    }

    /// Weight of the edge between `u` and `v`, in either orientation.
    pub fn weight(&self, u: &N, v: &N) -> Option<f64> {
        let a = *self.index.get(u)?;
        let b = *self.index.get(v)?;
        let key = if a <= b { (a, b) } else { (b, a) };
        self.edge_index.get(&key).map(|&i| self.edges[i].weight)
    }

    /// Drops weights, keeping only which pairs are connected.
    pub fn unsigned_projection(&self) -> Topology<N> {
        let mut adjacency = vec![Vec::new(); self.nodes.len()];
        for edge in &self.edges {
            if edge.u == edge.v {
                continue;
            }
            adjacency[edge.u].push(edge.v);
            adjacency[edge.v].push(edge.u);
        }
        Topology {
            nodes: self.nodes.clone(),
            adjacency,
        }
    }
}

impl<N: NodeId> FromIterator<(N, N, f64)> for SignedGraph<N> {
    fn from_iter<I: IntoIterator<Item = (N, N, f64)>>(iter: I) -> Self {
        let mut graph = Self::new();
        for (u, v, w) in iter {
            graph.add_edge(u, v, w);
        }
        graph
    }
}

/// Unsigned projection of a [`SignedGraph`]: nodes plus adjacency lists.
///
/// Self-loops are dropped since they carry no distance information.
#[derive(Debug, Clone)]
pub struct Topology<N: NodeId = String> {
    nodes: Vec<N>,
    adjacency: Vec<Vec<usize>>,
}

impl<N: NodeId> Topology<N> {
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn neighbors(&self, idx: usize) -> &[usize] {
        &self.adjacency[idx]
    }

    /// Hop counts from `source`; `None` for unreachable nodes.
    pub fn bfs_distances(&self, source: usize) -> Vec<Option<usize>> {
        let mut dist = vec![None; self.nodes.len()];
        let mut queue = VecDeque::from([source]);
        dist[source] = Some(0);

        while let Some(current) = queue.pop_front() {
            let next = dist[current].map_or(0, |d| d + 1);
            for &neighbor in &self.adjacency[current] {
                if dist[neighbor].is_none() {
                    dist[neighbor] = Some(next);
                    queue.push_back(neighbor);
                }
            }
        }
        dist
    }

    /// Connected components as node indices, ordered by their first node.
    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        let mut seen = vec![false; self.nodes.len()];
        let mut components = Vec::new();

        for start in 0..self.nodes.len() {
            if seen[start] {
                continue;
            }
            let mut component = Vec::new();
            let mut queue = VecDeque::from([start]);
            seen[start] = true;
            while let Some(current) = queue.pop_front() {
                component.push(current);
                for &neighbor in &self.adjacency[current] {
                    if !seen[neighbor] {
                        seen[neighbor] = true;
                        queue.push_back(neighbor);
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }
        components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_adding_an_edge_replaces_weight_in_either_orientation() {
        let mut graph = SignedGraph::new();
        graph.add_edge("A", "B", 1.0);
        graph.add_edge("B", "A", -3.0);

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight(&"A", &"B"), Some(-3.0));
    }

    #[test]
    fn enumeration_follows_insertion_order() {
        let graph: SignedGraph<&str> =
            [("C", "A", 1.0), ("A", "B", -1.0)].into_iter().collect();

        let nodes: Vec<_> = graph.nodes().copied().collect();
        assert_eq!(nodes, vec!["C", "A", "B"]);

        let edges: Vec<_> = graph.edges().map(|(u, v, _)| (*u, *v)).collect();
        assert_eq!(edges, vec![("C", "A"), ("A", "B")]);

        let indexed: Vec<_> = graph.signed_edges().iter().map(|e| (e.u, e.v)).collect();
        assert_eq!(indexed, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn projection_drops_self_loops_and_keeps_isolated_nodes() {
        let mut graph = SignedGraph::new();
        graph.add_edge(1, 1, 5.0);
        graph.add_edge(1, 2, -1.0);
        graph.add_node(3);

        let topology = graph.unsigned_projection();
        assert_eq!(topology.len(), 3);
        assert_eq!(topology.neighbors(0), &[1]);
        assert!(topology.neighbors(2).is_empty());
    }

    #[test]
    fn components_and_distances() {
        let graph: SignedGraph<&str> = [("a", "b", 1.0), ("b", "c", -1.0), ("x", "y", 1.0)]
            .into_iter()
            .collect();
        let topology = graph.unsigned_projection();

        assert_eq!(topology.connected_components(), vec![vec![0, 1, 2], vec![3, 4]]);
        assert_eq!(
            topology.bfs_distances(0),
            vec![Some(0), Some(1), Some(2), None, None]
        );
    }
}
