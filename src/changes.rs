/// Cells whose state differs from what was last painted.
///
/// Entries are unique and kept in insertion order. `marked` mirrors the grid
/// row-major so a repeat mark is a single lookup instead of a scan.
#[derive(Debug, Clone)]
pub struct ChangeTracker {
    width: usize,
    marked: Vec<bool>,
    pending: Vec<(usize, usize)>,
}

impl ChangeTracker {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            marked: vec![false; width * height],
            pending: Vec::new(),
        }
    }

    /// Returns `true` if the cell was not already pending.
    pub fn mark(&mut self, x: usize, y: usize) -> bool {
        let index = y * self.width + x;
        if self.marked[index] {
            return false;
        }
        self.marked[index] = true;
        self.pending.push((x, y));
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pending.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        for &(x, y) in &self.pending {
            self.marked[y * self.width + x] = false;
        }
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_is_unique() {
        let mut changes = ChangeTracker::new(4, 3);
        assert!(changes.mark(1, 2));
        assert!(!changes.mark(1, 2));
        assert!(changes.mark(2, 1));
        assert_eq!(changes.len(), 2);
        assert_eq!(changes.iter().collect::<Vec<_>>(), vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn clear_allows_remarking() {
        let mut changes = ChangeTracker::new(2, 2);
        changes.mark(0, 0);
        changes.mark(1, 1);
        changes.clear();
        assert!(changes.is_empty());
        assert!(changes.mark(1, 1));
        assert_eq!(changes.len(), 1);
    }
}
