use tracing::trace;

/// A single table column: a stable key used for cell lookup and the
/// header text shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    pub key: String,
    pub label: String,
}

impl ColumnDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        ColumnDescriptor {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// The ordered column sequence. Membership is fixed at construction,
/// only the relative order changes via `reorder`.
#[derive(Debug, Clone)]
pub struct ColumnOrder {
    columns: Vec<ColumnDescriptor>,
}

impl ColumnOrder {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        debug_assert!(
            columns
                .iter()
                .enumerate()
                .all(|(i, c)| columns[..i].iter().all(|o| o.key != c.key)),
            "column keys must be unique"
        );
        ColumnOrder { columns }
    }

    pub fn descriptors(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.key.as_str())
    }

    pub fn key_at(&self, idx: usize) -> Option<&str> {
        self.columns.get(idx).map(|c| c.key.as_str())
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    /// Move the column `source_key` to the slot currently held by
    /// `target_key`, shifting the columns in between by one. A single
    /// element list move, not a swap. Equal or unknown keys leave the
    /// order untouched. Returns true if the order changed.
    pub fn reorder(&mut self, source_key: &str, target_key: &str) -> bool {
        if source_key == target_key {
            return false;
        }
        let (Some(src), Some(dst)) = (self.position(source_key), self.position(target_key)) else {
            trace!("Ignoring reorder with unknown key: {source_key} -> {target_key}");
            return false;
        };
        let moved = self.columns.remove(src);
        self.columns.insert(dst, moved);
        trace!("Moved column \"{source_key}\" from {src} to {dst}");
        true
    }
}

/// The drag gesture over the header row. A gesture is a single bounded
/// interaction: it begins on a header and always ends in either a commit
/// or a no-op, so there is nothing to time out or cancel asynchronously.
#[derive(Debug, Default, PartialEq)]
pub enum DragGesture {
    #[default]
    Idle,
    Dragging {
        active: String,
    },
}

impl DragGesture {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragGesture::Dragging { .. })
    }

    pub fn active(&self) -> Option<&str> {
        match self {
            DragGesture::Idle => None,
            DragGesture::Dragging { active } => Some(active),
        }
    }

    /// Idle -> Dragging, grabbing the header identified by `key`.
    /// Starting a gesture while one is in flight is ignored.
    pub fn begin(&mut self, key: &str) {
        if let DragGesture::Dragging { active } = self {
            trace!("Drag already in flight for \"{active}\", ignoring begin on \"{key}\"");
            return;
        }
        trace!("Drag start on column \"{key}\"");
        *self = DragGesture::Dragging { active: key.to_string() };
    }

    /// Dragging -> Idle. Returns the (active, over) pair to commit, or
    /// None when the gesture was cancelled (`over` absent) or dropped
    /// on its own header.
    pub fn end(&mut self, over: Option<&str>) -> Option<(String, String)> {
        let state = std::mem::take(self);
        let DragGesture::Dragging { active } = state else {
            return None;
        };
        match over {
            Some(over) if over != active => {
                trace!("Drag end: \"{active}\" over \"{over}\"");
                Some((active, over.to_string()))
            }
            Some(_) => {
                trace!("Drag end: \"{active}\" dropped on itself");
                None
            }
            None => {
                trace!("Drag cancelled for \"{active}\"");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(keys: &[&str]) -> ColumnOrder {
        ColumnOrder::new(
            keys.iter()
                .map(|k| ColumnDescriptor::new(*k, k.to_uppercase()))
                .collect(),
        )
    }

    fn keys(order: &ColumnOrder) -> Vec<&str> {
        order.keys().collect()
    }

    #[test]
    fn reorder_moves_forward() {
        let mut cols = order(&["a", "b", "c", "d"]);
        assert!(cols.reorder("a", "c"));
        assert_eq!(keys(&cols), ["b", "c", "a", "d"]);
    }

    #[test]
    fn reorder_moves_backward() {
        let mut cols = order(&["a", "b", "c", "d"]);
        assert!(cols.reorder("d", "b"));
        assert_eq!(keys(&cols), ["a", "d", "b", "c"]);
    }

    #[test]
    fn reorder_is_a_move_not_a_swap() {
        let mut cols = order(&["a", "b", "c", "d", "e"]);
        cols.reorder("e", "a");
        assert_eq!(keys(&cols), ["e", "a", "b", "c", "d"]);
    }

    #[test]
    fn reorder_places_source_at_targets_former_position() {
        let all = ["a", "b", "c", "d", "e"];
        for src in all {
            for dst in all {
                if src == dst {
                    continue;
                }
                let mut cols = order(&all);
                let former = cols.position(dst).unwrap();
                assert!(cols.reorder(src, dst));
                assert_eq!(cols.position(src), Some(former), "{src} -> {dst}");

                // Multiset of keys is preserved
                let mut sorted = keys(&cols);
                sorted.sort();
                assert_eq!(sorted, all);
            }
        }
    }

    #[test]
    fn reorder_on_self_is_a_noop() {
        let mut cols = order(&["a", "b", "c"]);
        assert!(!cols.reorder("b", "b"));
        assert_eq!(keys(&cols), ["a", "b", "c"]);
    }

    #[test]
    fn reorder_with_unknown_key_is_a_noop() {
        let mut cols = order(&["a", "b", "c"]);
        assert!(!cols.reorder("a", "x"));
        assert!(!cols.reorder("x", "a"));
        assert_eq!(keys(&cols), ["a", "b", "c"]);
    }

    #[test]
    fn gesture_commits_on_valid_drop() {
        let mut gesture = DragGesture::default();
        gesture.begin("a");
        assert!(gesture.is_dragging());
        assert_eq!(gesture.active(), Some("a"));
        assert_eq!(
            gesture.end(Some("c")),
            Some(("a".to_string(), "c".to_string()))
        );
        assert_eq!(gesture, DragGesture::Idle);
    }

    #[test]
    fn gesture_cancel_yields_no_commit() {
        let mut gesture = DragGesture::default();
        gesture.begin("a");
        assert_eq!(gesture.end(None), None);
        assert_eq!(gesture, DragGesture::Idle);
    }

    #[test]
    fn gesture_drop_on_self_yields_no_commit() {
        let mut gesture = DragGesture::default();
        gesture.begin("a");
        assert_eq!(gesture.end(Some("a")), None);
        assert_eq!(gesture, DragGesture::Idle);
    }

    #[test]
    fn gesture_end_while_idle_is_a_noop() {
        let mut gesture = DragGesture::default();
        assert_eq!(gesture.end(Some("a")), None);
    }

    #[test]
    fn gesture_begin_while_dragging_keeps_first_grab() {
        let mut gesture = DragGesture::default();
        gesture.begin("a");
        gesture.begin("b");
        assert_eq!(gesture.active(), Some("a"));
    }
}
