//! Stage 6a: 3D Delaunay tetrahedralization over room centers via
//! incremental Bowyer-Watson.
//!
//! Grounded on `original_source/.../Core/PathGeneration/DelaunayTriangulation3D.{h,cpp}`:
//! insert points one at a time, replace every tetrahedron whose circumsphere
//! contains the new point with the tetrahedra formed from its boundary
//! faces and the new point, then once every point is inserted, keep only
//! tetrahedra whose four corners are all real rooms (not the bounding
//! super-tetrahedron) and emit their face edges.

use crate::math::Vec3;
use std::collections::HashMap;

type Tetra = [usize; 4];
type Face = [usize; 3];

/// Undirected edge between two room indices, with its Euclidean length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphEdge {
    pub a: usize,
    pub b: usize,
    pub length: f32,
}

/// Build the Delaunay edge graph over `points`. Falls back to a simple
/// polygon (a cycle through the points in input order) when there are
/// fewer than 4 points, since a tetrahedralization needs at least 4.
pub fn delaunay_edges(points: &[Vec3]) -> Vec<GraphEdge> {
    let n = points.len();
    if n < 4 {
        return simple_polygon(points);
    }

    let tetras = bowyer_watson(points);

    let mut edge_lengths: HashMap<(usize, usize), f32> = HashMap::new();
    for tetra in &tetras {
        if tetra.iter().any(|&v| v >= n) {
            continue; // touches a super-tetrahedron vertex
        }
        for face in faces_of(tetra) {
            for &(i, j) in &[(face[0], face[1]), (face[1], face[2]), (face[0], face[2])] {
                let key = (i.min(j), i.max(j));
                edge_lengths.entry(key).or_insert_with(|| points[i].distance(points[j]));
            }
        }
    }

    edge_lengths
        .into_iter()
        .map(|((a, b), length)| GraphEdge { a, b, length })
        .collect()
}

fn simple_polygon(points: &[Vec3]) -> Vec<GraphEdge> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }
    let mut edges = Vec::new();
    for i in 0..n {
        let j = (i + 1) % n;
        if n == 2 && j == i {
            break;
        }
        edges.push(GraphEdge {
            a: i,
            b: j,
            length: points[i].distance(points[j]),
        });
        if n == 2 {
            break;
        }
    }
    edges
}

fn bowyer_watson(points: &[Vec3]) -> Vec<Tetra> {
    let n = points.len();
    let mut all_points: Vec<Vec3> = points.to_vec();

    let (center, radius) = bounding_sphere(points);
    let scale = radius.max(1.0) * 20.0;
    let super_vertices = [
        Vec3::new(center.x + scale, center.y + scale, center.z + scale),
        Vec3::new(center.x + scale, center.y - scale, center.z - scale),
        Vec3::new(center.x - scale, center.y + scale, center.z - scale),
        Vec3::new(center.x - scale, center.y - scale, center.z + scale),
    ];
    all_points.extend_from_slice(&super_vertices);

    let mut tetras: Vec<Tetra> = vec![[n, n + 1, n + 2, n + 3]];

    for point_index in 0..n {
        let point = all_points[point_index];

        let mut bad: Vec<Tetra> = Vec::new();
        let mut good: Vec<Tetra> = Vec::new();
        for &tetra in &tetras {
            if point_in_circumsphere(&all_points, tetra, point) {
                bad.push(tetra);
            } else {
                good.push(tetra);
            }
        }

        let boundary = boundary_faces(&bad);

        let mut next = good;
        for face in boundary {
            next.push([face[0], face[1], face[2], point_index]);
        }
        tetras = next;
    }

    tetras
}

fn faces_of(tetra: &Tetra) -> [Face; 4] {
    [
        [tetra[0], tetra[1], tetra[2]],
        [tetra[0], tetra[1], tetra[3]],
        [tetra[0], tetra[2], tetra[3]],
        [tetra[1], tetra[2], tetra[3]],
    ]
}

fn sorted_face(face: Face) -> Face {
    let mut f = face;
    f.sort_unstable();
    f
}

/// Faces that appear exactly once across `tetras` — the boundary of their
/// union (a face shared by two bad tetrahedra is interior and discarded).
fn boundary_faces(tetras: &[Tetra]) -> Vec<Face> {
    let mut counts: HashMap<Face, (u32, Face)> = HashMap::new();
    for tetra in tetras {
        for face in faces_of(tetra) {
            let key = sorted_face(face);
            let entry = counts.entry(key).or_insert((0, face));
            entry.0 += 1;
        }
    }
    counts
        .into_values()
        .filter(|(count, _)| *count == 1)
        .map(|(_, original_order)| original_order)
        .collect()
}

fn bounding_sphere(points: &[Vec3]) -> (Vec3, f32) {
    let n = points.len().max(1) as f32;
    let sum = points.iter().fold(Vec3::ZERO, |acc, p| Vec3::new(acc.x + p.x, acc.y + p.y, acc.z + p.z));
    let center = Vec3::new(sum.x / n, sum.y / n, sum.z / n);
    let radius = points.iter().map(|p| p.distance(center)).fold(1.0_f32, f32::max);
    (center, radius)
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(a.y * b.z - a.z * b.y, a.z * b.x - a.x * b.z, a.x * b.y - a.y * b.x)
}

fn dot(a: Vec3, b: Vec3) -> f32 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

/// Circumsphere center/radius of a tetrahedron via the vector method.
fn circumsphere(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Option<(Vec3, f32)> {
    let a = p1.sub(p0);
    let b = p2.sub(p0);
    let c = p3.sub(p0);

    let denom = 2.0 * dot(a, cross(b, c));
    if denom.abs() < 1e-9 {
        return None; // degenerate (coplanar) tetrahedron
    }

    let la = dot(a, a);
    let lb = dot(b, b);
    let lc = dot(c, c);

    let bc = cross(b, c);
    let ca = cross(c, a);
    let ab = cross(a, b);

    let offset = Vec3::new(
        la * bc.x + lb * ca.x + lc * ab.x,
        la * bc.y + lb * ca.y + lc * ab.y,
        la * bc.z + lb * ca.z + lc * ab.z,
    );
    let offset = Vec3::new(offset.x / denom, offset.y / denom, offset.z / denom);

    let center = Vec3::new(p0.x + offset.x, p0.y + offset.y, p0.z + offset.z);
    let radius = center.distance(p0);
    Some((center, radius))
}

fn point_in_circumsphere(points: &[Vec3], tetra: Tetra, point: Vec3) -> bool {
    let [a, b, c, d] = tetra;
    match circumsphere(points[a], points[b], points[c], points[d]) {
        Some((center, radius)) => center.distance(point) <= radius * (1.0 + 1e-5),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fewer_than_four_points_forms_polygon() {
        let points = vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];
        let edges = delaunay_edges(&points);
        assert_eq!(edges.len(), 3);
    }

    #[test]
    fn tetrahedralization_connects_all_points() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(5.0, 5.0, 5.0),
        ];
        let edges = delaunay_edges(&points);
        assert!(!edges.is_empty());

        let mut seen = std::collections::HashSet::new();
        for e in &edges {
            seen.insert(e.a);
            seen.insert(e.b);
        }
        assert_eq!(seen.len(), points.len());
    }

    #[test]
    fn grid_of_points_produces_a_connected_graph() {
        let mut points = Vec::new();
        for x in 0..4 {
            for y in 0..4 {
                points.push(Vec3::new(x as f32 * 3.0, y as f32 * 3.0, 0.0));
            }
        }
        let edges = delaunay_edges(&points);
        assert!(edges.len() >= points.len() - 1);

        // connectivity check via BFS
        let mut adj = vec![Vec::new(); points.len()];
        for e in &edges {
            adj[e.a].push(e.b);
            adj[e.b].push(e.a);
        }
        let mut visited = vec![false; points.len()];
        let mut stack = vec![0usize];
        visited[0] = true;
        let mut count = 1;
        while let Some(node) = stack.pop() {
            for &next in &adj[node] {
                if !visited[next] {
                    visited[next] = true;
                    count += 1;
                    stack.push(next);
                }
            }
        }
        assert_eq!(count, points.len());
    }
}
