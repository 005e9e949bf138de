use crate::changes::ChangeTracker;

/// The logical lamp matrix.
///
/// `current` is what the caller wants on screen, `painted` is what the
/// renderer last put there. Both are flat row-major buffers indexed by
/// `y * width + x`. Between render passes they only differ at cells held in
/// the change tracker.
#[derive(Debug, Clone)]
pub struct LampGrid {
    width: usize,
    height: usize,
    current: Vec<bool>,
    painted: Vec<bool>,
    changes: ChangeTracker,
}

impl LampGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            current: vec![false; width * height],
            painted: vec![false; width * height],
            changes: ChangeTracker::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Writes one lamp. Out-of-range coordinates are ignored.
    ///
    /// The cell only becomes dirty when `state` differs from the stored value.
    pub fn set(&mut self, x: i32, y: i32, state: bool) {
        let Some(index) = self.index(x, y) else {
            return;
        };
        if self.current[index] != state {
            self.changes.mark(x as usize, y as usize);
            self.current[index] = state;
        }
    }

    /// Turns every lamp off. Returns whether anything changed.
    pub fn clear(&mut self) -> bool {
        let mut changed = false;
        for y in 0..self.height {
            for x in 0..self.width {
                let index = y * self.width + x;
                if self.current[index] {
                    self.current[index] = false;
                    self.changes.mark(x, y);
                    changed = true;
                }
            }
        }
        changed
    }

    pub fn get(&self, x: i32, y: i32) -> Option<bool> {
        self.index(x, y).map(|index| self.current[index])
    }

    pub fn painted(&self, x: i32, y: i32) -> Option<bool> {
        self.index(x, y).map(|index| self.painted[index])
    }

    /// Current state of an in-range cell, as produced by the change tracker.
    pub(crate) fn lamp(&self, x: usize, y: usize) -> bool {
        self.current[y * self.width + x]
    }

    pub fn changes(&self) -> &ChangeTracker {
        &self.changes
    }

    /// Records the pending cells as painted and empties the tracker.
    pub(crate) fn commit(&mut self) {
        for (x, y) in self.changes.iter() {
            let index = y * self.width + x;
            self.painted[index] = self.current[index];
        }
        self.changes.clear();
    }

    /// Records the whole grid as painted and empties the tracker.
    pub(crate) fn commit_all(&mut self) {
        self.painted.copy_from_slice(&self.current);
        self.changes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_write_marks_once() {
        let mut grid = LampGrid::new(5, 5);
        grid.set(1, 3, true);
        grid.set(1, 3, true);
        assert_eq!(grid.changes().len(), 1);
        assert_eq!(grid.get(1, 3), Some(true));
    }

    #[test]
    fn writing_the_stored_value_is_not_a_change() {
        let mut grid = LampGrid::new(5, 5);
        grid.set(0, 0, false);
        assert!(grid.changes().is_empty());
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut grid = LampGrid::new(5, 5);
        grid.set(5, 0, true);
        grid.set(0, 5, true);
        grid.set(-1, 2, true);
        grid.set(2, i32::MIN, true);
        assert!(grid.changes().is_empty());
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(grid.get(x, y), Some(false));
            }
        }
        assert_eq!(grid.get(5, 0), None);
    }

    #[test]
    fn clear_on_dark_grid_reports_nothing() {
        let mut grid = LampGrid::new(3, 4);
        assert!(!grid.clear());
        assert!(grid.changes().is_empty());
    }

    #[test]
    fn clear_marks_only_lit_cells() {
        let mut grid = LampGrid::new(3, 3);
        grid.set(0, 0, true);
        grid.set(2, 1, true);
        grid.commit();

        assert!(grid.clear());
        let mut dirty: Vec<_> = grid.changes().iter().collect();
        dirty.sort();
        assert_eq!(dirty, vec![(0, 0), (2, 1)]);
        assert_eq!(grid.get(2, 1), Some(false));
        assert_eq!(grid.painted(2, 1), Some(true));
    }

    #[test]
    fn commit_syncs_painted_state() {
        let mut grid = LampGrid::new(4, 4);
        grid.set(3, 0, true);
        grid.set(1, 2, true);
        grid.set(1, 2, false);
        assert_eq!(grid.painted(3, 0), Some(false));

        grid.commit();
        assert!(grid.changes().is_empty());
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(grid.get(x, y), grid.painted(x, y));
            }
        }
    }
}
