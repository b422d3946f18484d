use crate::drawing::stroke::Stroke;

/// Linear undo/redo log of completed-stroke snapshots.
///
/// The cursor points at the current entry; `None` means "before the first
/// entry", which is a real position (an empty drawing) distinct from having
/// nothing to undo back to.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Vec<Stroke>>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> History {
        History::default()
    }

    /// Drops any redo-able entries past the cursor, appends a snapshot of
    /// `strokes`, and moves the cursor onto it.
    pub fn add_state(&mut self, strokes: &[Stroke]) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push(strokes.to_vec());
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Steps back one entry. Returns the strokes now current (empty when the
    /// cursor moved before the first entry), or `None` when already there.
    pub fn undo(&mut self) -> Option<&[Stroke]> {
        let current = self.cursor?;
        self.cursor = current.checked_sub(1);
        let strokes: &[Stroke] = match self.cursor {
            Some(idx) => &self.entries[idx],
            None => &[],
        };
        Some(strokes)
    }

    /// Steps forward one entry, or `None` when nothing is ahead.
    pub fn redo(&mut self) -> Option<&[Stroke]> {
        if !self.can_redo() {
            return None;
        }
        let next = self.cursor.map_or(0, |c| c + 1);
        self.cursor = Some(next);
        Some(&self.entries[next])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_redo(&self) -> bool {
        let next = self.cursor.map_or(0, |c| c + 1);
        next < self.entries.len()
    }

    /// Cursor in the `-1 ..= len - 1` convention.
    pub fn cursor(&self) -> isize {
        self.cursor.map_or(-1, |c| c as isize)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
