//! A static K-D tree over 6-D coverage vectors.
//!
//! Built once per atlas and never mutated. Nearest-neighbor queries break
//! ties by insertion order so lookup is deterministic for any charset.

const DIMS: usize = 6;

#[derive(Debug)]
struct Node {
    point: [f32; DIMS],
    /// Index into the original insertion order.
    index: usize,
    axis: usize,
    left: Option<usize>,
    right: Option<usize>,
}

/// A static nearest-neighbor index over `[f32; 6]` points.
#[derive(Debug)]
pub(crate) struct KdTree {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl KdTree {
    /// Builds the tree from points in insertion order.
    pub(crate) fn build(points: &[[f32; DIMS]]) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(points.len()),
            root: None,
        };
        let mut items: Vec<(usize, [f32; DIMS])> =
            points.iter().copied().enumerate().collect();
        tree.root = tree.build_recursive(&mut items, 0);
        tree
    }

    fn build_recursive(
        &mut self,
        items: &mut [(usize, [f32; DIMS])],
        depth: usize,
    ) -> Option<usize> {
        if items.is_empty() {
            return None;
        }
        let axis = depth % DIMS;
        items.sort_by(|a, b| {
            a.1[axis]
                .partial_cmp(&b.1[axis])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        let mid = items.len() / 2;
        let (index, point) = items[mid];

        let node_id = self.nodes.len();
        self.nodes.push(Node {
            point,
            index,
            axis,
            left: None,
            right: None,
        });

        // Split around the median; the borrow checker wants the halves
        // produced before the recursive calls.
        let (lo, rest) = items.split_at_mut(mid);
        let hi = &mut rest[1..];
        let left = self.build_recursive(lo, depth + 1);
        let right = self.build_recursive(hi, depth + 1);
        self.nodes[node_id].left = left;
        self.nodes[node_id].right = right;

        Some(node_id)
    }

    /// Returns the insertion index of the nearest point to `query`.
    ///
    /// Ties resolve to the lowest insertion index. Returns `None` only for
    /// an empty tree.
    pub(crate) fn nearest(&self, query: &[f32; DIMS]) -> Option<usize> {
        let root = self.root?;
        let mut best = (f32::INFINITY, usize::MAX);
        self.search(root, query, &mut best);
        Some(best.1)
    }

    fn search(&self, node_id: usize, query: &[f32; DIMS], best: &mut (f32, usize)) {
        let node = &self.nodes[node_id];
        let d = dist2(&node.point, query);
        if d < best.0 || (d == best.0 && node.index < best.1) {
            *best = (d, node.index);
        }

        let delta = query[node.axis] - node.point[node.axis];
        let (near, far) = if delta < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(n) = near {
            self.search(n, query, best);
        }
        // The far side can only win when the splitting plane is closer
        // than the current best (<= keeps exact ties reachable so the
        // lowest-index rule holds).
        if let Some(f) = far {
            if delta * delta <= best.0 {
                self.search(f, query, best);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}

fn dist2(a: &[f32; DIMS], b: &[f32; DIMS]) -> f32 {
    let mut sum = 0.0;
    for i in 0..DIMS {
        let d = a[i] - b[i];
        sum += d * d;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(points: &[[f32; DIMS]], q: &[f32; DIMS]) -> usize {
        let mut best = (f32::INFINITY, usize::MAX);
        for (i, p) in points.iter().enumerate() {
            let d = dist2(p, q);
            if d < best.0 {
                best = (d, i);
            }
        }
        best.1
    }

    fn pseudo_random_points(n: usize) -> Vec<[f32; DIMS]> {
        // Deterministic LCG; no external RNG needed for structural tests.
        let mut seed = 0x2545F491_u64;
        let mut next = move || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((seed >> 33) as f32) / (u32::MAX >> 1) as f32
        };
        (0..n)
            .map(|_| {
                let mut p = [0.0; DIMS];
                for v in &mut p {
                    *v = next();
                }
                p
            })
            .collect()
    }

    #[test]
    fn matches_brute_force() {
        let points = pseudo_random_points(200);
        let queries = pseudo_random_points(50);
        let tree = KdTree::build(&points);
        assert_eq!(tree.len(), 200);
        for q in &queries {
            assert_eq!(tree.nearest(q), Some(brute_force(&points, q)));
        }
    }

    #[test]
    fn exact_ties_pick_lowest_insertion_index() {
        let p = [0.25; DIMS];
        let points = vec![p, [0.9; DIMS], p];
        let tree = KdTree::build(&points);
        assert_eq!(tree.nearest(&[0.2; DIMS]), Some(0));
    }

    #[test]
    fn empty_tree_returns_none() {
        let tree = KdTree::build(&[]);
        assert_eq!(tree.nearest(&[0.0; DIMS]), None);
    }

    #[test]
    fn single_point() {
        let tree = KdTree::build(&[[0.5; DIMS]]);
        assert_eq!(tree.nearest(&[1.0; DIMS]), Some(0));
    }
}
