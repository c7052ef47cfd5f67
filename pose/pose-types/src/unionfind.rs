//! Disjoint-set structure over vertex ids.

/// Union-find over a dense id range, with path compression and union by
/// rank. Parents live in a plain index arena; no pointer structure.
///
/// Built once over a mesh's full edge list so two vertices share a root
/// iff they are connected by some edge path, independent of slicing.
///
/// # Example
///
/// ```
/// use pose_types::UnionFind;
///
/// let mut uf = UnionFind::new(4);
/// uf.union(0, 1);
/// uf.union(2, 3);
/// assert!(uf.same_set(0, 1));
/// assert!(!uf.same_set(1, 2));
/// ```
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<u32>,
    rank: Vec<u8>,
}

impl UnionFind {
    /// Create a structure with `len` singleton sets.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: vertex ids are u32, meshes with >4B vertices unsupported
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len as u32).collect(),
            rank: vec![0; len],
        }
    }

    /// Number of elements (not sets).
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// True if the structure holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Root of the set containing `x`, compressing the walked path.
    ///
    /// Iterative two-pass find: walk to the root, then repoint every
    /// node on the path at it.
    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        let mut cur = x;
        while self.parent[cur as usize] != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }
        root
    }

    /// Merge the sets containing `a` and `b` (union by rank).
    pub fn union(&mut self, a: u32, b: u32) {
        let mut ra = self.find(a);
        let mut rb = self.find(b);
        if ra == rb {
            return;
        }
        if self.rank[ra as usize] < self.rank[rb as usize] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb as usize] = ra;
        if self.rank[ra as usize] == self.rank[rb as usize] {
            self.rank[ra as usize] += 1;
        }
    }

    /// True if `a` and `b` are in the same set.
    pub fn same_set(&mut self, a: u32, b: u32) -> bool {
        self.find(a) == self.find(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singletons_are_disjoint() {
        let mut uf = UnionFind::new(3);
        assert_eq!(uf.len(), 3);
        assert!(!uf.same_set(0, 1));
        assert!(!uf.same_set(1, 2));
    }

    #[test]
    fn union_links_transitively() {
        let mut uf = UnionFind::new(5);
        uf.union(0, 1);
        uf.union(1, 2);
        uf.union(3, 4);

        assert!(uf.same_set(0, 2));
        assert!(uf.same_set(3, 4));
        assert!(!uf.same_set(2, 3));
    }

    #[test]
    fn path_compression_flattens() {
        let mut uf = UnionFind::new(64);
        // Build a long chain
        for i in 0..63 {
            uf.union(i, i + 1);
        }
        let root = uf.find(0);
        for i in 0..64 {
            assert_eq!(uf.find(i), root);
        }
    }

    #[test]
    fn union_is_idempotent() {
        let mut uf = UnionFind::new(2);
        uf.union(0, 1);
        uf.union(0, 1);
        assert!(uf.same_set(0, 1));
    }

    #[test]
    fn empty_structure() {
        let uf = UnionFind::new(0);
        assert!(uf.is_empty());
    }
}
