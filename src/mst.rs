//! Stage 6b: Kruskal minimum spanning tree over the Delaunay edge set, plus
//! optional loop edges re-added from the discarded cycle-forming edges.
//!
//! Grounded on `original_source/.../Core/PathGeneration/MinimumSpanningTree.cpp`:
//! a union-find (rank + path compression) walks the length-sorted edge list,
//! keeping an edge when its endpoints are still in separate components and
//! setting it aside otherwise; `aisle_complexity` then reintroduces a
//! shuffled slice of the set-aside edges as non-tree loop edges.

use crate::delaunay::GraphEdge;
use crate::random::Random;

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn same(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        if self.rank[ra] > self.rank[rb] {
            self.parent[rb] = ra;
        } else {
            self.parent[ra] = rb;
            if self.rank[ra] == self.rank[rb] {
                self.rank[rb] += 1;
            }
        }
    }
}

/// A graph edge tagged with whether it is a spanning-tree edge or an extra
/// loop edge added back on top of the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MstEdge {
    pub a: usize,
    pub b: usize,
    pub length: f32,
    pub is_loop: bool,
}

/// Run Kruskal over `edges`, then re-add up to `k` of the rejected
/// cycle-forming edges as loop edges when `aisle_complexity > 0`.
pub fn build_mst(mut edges: Vec<GraphEdge>, vertex_count: usize, aisle_complexity: u8, rng: &mut Random) -> Vec<MstEdge> {
    edges.sort_by(|a, b| a.length.partial_cmp(&b.length).unwrap());

    let mut uf = UnionFind::new(vertex_count.max(1));
    let mut tree: Vec<MstEdge> = Vec::new();
    let mut set_aside: Vec<GraphEdge> = Vec::new();

    for edge in edges {
        if uf.same(edge.a, edge.b) {
            set_aside.push(edge);
        } else {
            uf.union(edge.a, edge.b);
            tree.push(MstEdge {
                a: edge.a,
                b: edge.b,
                length: edge.length,
                is_loop: false,
            });
        }
    }

    if aisle_complexity > 0 && !tree.is_empty() {
        let k = ((tree.len() as f32 * 0.05 * aisle_complexity as f32).round() as usize)
            .clamp(1, (tree.len() / 2).max(1));

        rng.shuffle(&mut set_aside);

        for edge in set_aside.into_iter().take(k) {
            tree.push(MstEdge {
                a: edge.a,
                b: edge.b,
                length: edge.length,
                is_loop: true,
            });
        }
    }

    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(a: usize, b: usize, length: f32) -> GraphEdge {
        GraphEdge { a, b, length }
    }

    #[test]
    fn spanning_tree_has_n_minus_one_tree_edges() {
        let edges = vec![
            edge(0, 1, 1.0),
            edge(1, 2, 1.0),
            edge(2, 3, 1.0),
            edge(0, 2, 1.5),
            edge(1, 3, 1.5),
        ];
        let (mut rng, _) = Random::new(1);
        let mst = build_mst(edges, 4, 0, &mut rng);
        assert_eq!(mst.iter().filter(|e| !e.is_loop).count(), 3);
        assert!(mst.iter().all(|e| !e.is_loop));
    }

    #[test]
    fn aisle_complexity_adds_loop_edges() {
        let edges = vec![
            edge(0, 1, 1.0),
            edge(1, 2, 1.0),
            edge(2, 3, 1.0),
            edge(3, 4, 1.0),
            edge(0, 2, 1.2),
            edge(1, 3, 1.3),
            edge(2, 4, 1.4),
            edge(0, 4, 1.5),
        ];
        let (mut rng, _) = Random::new(5);
        let mst = build_mst(edges, 5, 10, &mut rng);
        let loops = mst.iter().filter(|e| e.is_loop).count();
        assert!(loops >= 1);
        assert!(loops <= mst.iter().filter(|e| !e.is_loop).count());
    }

    #[test]
    fn no_loop_edges_when_complexity_zero() {
        let edges = vec![edge(0, 1, 1.0), edge(1, 2, 1.0), edge(0, 2, 1.5)];
        let (mut rng, _) = Random::new(2);
        let mst = build_mst(edges, 3, 0, &mut rng);
        assert!(mst.iter().all(|e| !e.is_loop));
    }
}
