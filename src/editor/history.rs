use super::region::BlurRegion;

/// Linear snapshot history over the region collection. The first entry is
/// always the empty collection a freshly loaded image starts from, and
/// `index` names the snapshot the live collection mirrors.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Vec<BlurRegion>>,
    index: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: vec![Vec::new()],
            index: 0,
        }
    }

    /// Drops any redo tail beyond the current index, then appends the
    /// snapshot and moves the index onto it.
    pub fn commit(&mut self, snapshot: Vec<BlurRegion>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(snapshot);
        self.index = self.entries.len() - 1;
    }

    pub fn undo(&mut self) -> Option<&[BlurRegion]> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.entries[self.index])
    }

    pub fn redo(&mut self) -> Option<&[BlurRegion]> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(&self.entries[self.index])
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
        self.entries.push(Vec::new());
        self.index = 0;
    }

    pub fn current(&self) -> &[BlurRegion] {
        &self.entries[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
