//! Vector store: the authoritative collections of vectors on a board.

use crate::document::{Document, DocumentResult};
use crate::draw::DrawCommand;
use crate::geometry::boxes_overlap;
use crate::vectors::{Vector, VectorId};
use crate::view::View;
use kurbo::Rect;

/// Owns every vector on the board and its lifecycle transitions.
///
/// A vector lives in exactly one place at a time: committed, in progress,
/// or on the deleted stack. Selection works on clones: the committed
/// original is hidden while its highlighted clone is edited, and
/// [`deselect`](Self::deselect) either writes the clone back or restores
/// the original untouched.
#[derive(Debug, Default)]
pub struct VectorStore {
    committed: Vec<Vector>,
    in_progress: Option<Vector>,
    selected: Vec<Vector>,
    /// Bottom first; the last entry is the most recent deletion.
    deleted: Vec<Vector>,
}

impl VectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed vectors in drawing order.
    pub fn committed(&self) -> &[Vector] {
        &self.committed
    }

    /// Deleted vectors, most recent last.
    pub fn deleted(&self) -> &[Vector] {
        &self.deleted
    }

    /// Highlighted clones of the selected vectors.
    pub fn selected(&self) -> &[Vector] {
        &self.selected
    }

    /// Selected clones, for gestures that move or restyle them.
    pub fn selected_mut(&mut self) -> &mut [Vector] {
        &mut self.selected
    }

    pub fn in_progress(&self) -> Option<&Vector> {
        self.in_progress.as_ref()
    }

    pub fn in_progress_mut(&mut self) -> Option<&mut Vector> {
        self.in_progress.as_mut()
    }

    /// Committed vector with this id.
    pub fn get(&self, id: VectorId) -> Option<&Vector> {
        self.committed.iter().find(|v| v.id() == id)
    }

    pub fn is_selected(&self, id: VectorId) -> bool {
        self.selected.iter().any(|v| v.id() == id)
    }

    /// Number of committed vectors.
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    /// Begin a gesture's vector.
    ///
    /// # Panics
    ///
    /// Panics if another vector is still in progress; the caller must
    /// finish or cancel it first.
    pub fn start_vector(&mut self, vector: Vector) {
        if let Some(dangling) = &self.in_progress {
            panic!(
                "start_vector called while {:?} vector {} is still in progress",
                dangling.kind(),
                dangling.id()
            );
        }
        log::debug!("Started {:?} vector {}", vector.kind(), vector.id());
        self.in_progress = Some(vector);
    }

    /// Finalize the in-progress vector and commit it.
    pub fn finish_in_progress(&mut self) -> Option<VectorId> {
        let mut vector = self.in_progress.take()?;
        vector.finalize();
        let id = vector.id();
        log::debug!("Committed {:?} vector {}", vector.kind(), id);
        self.committed.push(vector);
        Some(id)
    }

    /// Drop the in-progress vector without committing it.
    pub fn cancel_in_progress(&mut self) -> Option<Vector> {
        let vector = self.in_progress.take()?;
        log::debug!("Cancelled {:?} vector {}", vector.kind(), vector.id());
        Some(vector)
    }

    /// Committed vectors whose bounding box overlaps `bbox`.
    pub fn query_intersecting(&self, bbox: Rect) -> Vec<&Vector> {
        self.committed
            .iter()
            .filter(|v| boxes_overlap(v.bounds(), bbox))
            .collect()
    }

    /// Select committed vectors by id. Returns how many were newly selected.
    pub fn select(&mut self, ids: &[VectorId]) -> usize {
        let mut count = 0;
        for &id in ids {
            if self.is_selected(id) {
                continue;
            }
            let Some(original) = self.committed.iter_mut().find(|v| v.id() == id) else {
                continue;
            };
            let mut clone = original.clone();
            original.set_visible(false);
            clone.set_highlighted(true);
            self.selected.push(clone);
            count += 1;
        }
        count
    }

    /// Drop the selection of `ids`.
    ///
    /// With `commit` the clones' current state replaces the originals,
    /// otherwise the originals reappear unchanged.
    pub fn deselect(&mut self, ids: &[VectorId], commit: bool) {
        for &id in ids {
            let Some(index) = self.selected.iter().position(|v| v.id() == id) else {
                continue;
            };
            let mut clone = self.selected.remove(index);
            let Some(original) = self.committed.iter_mut().find(|v| v.id() == id) else {
                continue;
            };
            if commit {
                clone.set_highlighted(false);
                clone.set_visible(true);
                *original = clone;
            } else {
                original.set_visible(true);
            }
        }
    }

    pub fn deselect_all(&mut self, commit: bool) {
        let ids = self.selected_ids();
        self.deselect(&ids, commit);
    }

    pub fn selected_ids(&self) -> Vec<VectorId> {
        self.selected.iter().map(Vector::id).collect()
    }

    /// Move a committed vector onto the deleted stack.
    ///
    /// A selected vector loses its selection (and any uncommitted edits).
    pub fn delete(&mut self, id: VectorId) -> bool {
        self.deselect(&[id], false);
        let Some(index) = self.committed.iter().position(|v| v.id() == id) else {
            return false;
        };
        let vector = self.committed.remove(index);
        log::debug!("Deleted {:?} vector {}", vector.kind(), id);
        self.deleted.push(vector);
        true
    }

    /// Commit the selection's edits, then delete every selected vector.
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selected_ids();
        self.deselect(&ids, true);
        ids.into_iter().filter(|id| self.delete(*id)).count()
    }

    /// Restore the most recently deleted vector. No-op on an empty stack.
    pub fn undo_delete(&mut self) -> Option<VectorId> {
        let vector = self.deleted.pop()?;
        let id = vector.id();
        log::debug!("Restored {:?} vector {}", vector.kind(), id);
        self.committed.push(vector);
        Some(id)
    }

    /// Remove every committed vector.
    ///
    /// Cleared vectors are not pushed onto the deleted stack, so this
    /// cannot be undone.
    pub fn clear(&mut self) {
        log::info!("Clearing {} committed vectors", self.committed.len());
        self.selected.clear();
        self.committed.clear();
    }

    /// Union of the committed vectors' bounding boxes.
    pub fn bounds(&self) -> Option<Rect> {
        self.committed
            .iter()
            .map(Vector::bounds)
            .reduce(|acc, b| acc.union(b))
    }

    /// Everything that should appear on screen, in drawing order.
    pub fn visible_vectors(&self) -> impl Iterator<Item = &Vector> {
        self.committed
            .iter()
            .filter(|v| v.is_visible())
            .chain(self.selected.iter())
            .chain(self.in_progress.iter())
    }

    /// Project every visible vector through `view` into `out`.
    pub fn display(&mut self, view: &View, out: &mut Vec<DrawCommand>) {
        let visible = self.committed.iter_mut().filter(|v| v.is_visible());
        for vector in visible
            .chain(self.selected.iter_mut())
            .chain(self.in_progress.iter_mut())
        {
            out.extend(vector.project(view));
        }
    }

    /// Stored form of the committed and deleted vectors.
    pub fn to_document(&self) -> DocumentResult<Document> {
        let committed = self
            .committed
            .iter()
            .map(Vector::to_record)
            .collect::<Result<_, _>>()?;
        let deleted = self
            .deleted
            .iter()
            .map(Vector::to_record)
            .collect::<Result<_, _>>()?;
        Ok(Document(committed, deleted))
    }

    pub fn to_json(&self) -> DocumentResult<String> {
        self.to_document()?.to_json()
    }

    /// Replace committed and deleted vectors with the document's.
    ///
    /// On error nothing changes. The selection is dropped; an in-progress
    /// vector is left to its gesture.
    pub fn load_document(&mut self, document: &Document) -> DocumentResult<()> {
        let (committed, deleted) = document.to_vectors()?;
        log::info!(
            "Loaded {} committed and {} deleted vectors",
            committed.len(),
            deleted.len()
        );
        self.selected.clear();
        self.committed = committed;
        self.deleted = deleted;
        Ok(())
    }

    pub fn load_json(&mut self, json: &str) -> DocumentResult<()> {
        let document = Document::from_json(json)?;
        self.load_document(&document)
    }

    pub fn from_json(json: &str) -> DocumentResult<Self> {
        let mut store = Self::new();
        store.load_json(json)?;
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentError;
    use crate::vectors::{SerializableColor, VectorKind, VectorStyle};
    use kurbo::{Point, Size, Vec2};

    fn draw(store: &mut VectorStore, kind: VectorKind, points: &[Point]) -> VectorId {
        let mut vector = Vector::start(kind, points[0], VectorStyle::default(), 12.0);
        for p in &points[1..] {
            vector.add_point(*p);
        }
        store.start_vector(vector);
        store.finish_in_progress().unwrap()
    }

    fn rect(store: &mut VectorStore, a: (f64, f64), b: (f64, f64)) -> VectorId {
        draw(store, VectorKind::Rectangle, &[Point::new(a.0, a.1), Point::new(b.0, b.1)])
    }

    #[test]
    fn test_finish_commits_and_finalizes() {
        let mut store = VectorStore::new();
        let id = draw(
            &mut store,
            VectorKind::Pencil,
            &[Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)],
        );
        assert!(store.in_progress().is_none());
        assert_eq!(store.len(), 1);
        let vector = store.get(id).unwrap();
        assert!(vector.is_finalized());
        assert_eq!(
            vector.points(),
            &[Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)]
        );
    }

    #[test]
    #[should_panic(expected = "still in progress")]
    fn test_start_while_in_progress_panics() {
        let mut store = VectorStore::new();
        let style = VectorStyle::default();
        store.start_vector(Vector::start(VectorKind::Line, Point::ZERO, style, 12.0));
        store.start_vector(Vector::start(VectorKind::Line, Point::ZERO, style, 12.0));
    }

    #[test]
    fn test_cancel_discards() {
        let mut store = VectorStore::new();
        store.start_vector(Vector::start(
            VectorKind::Circle,
            Point::ZERO,
            VectorStyle::default(),
            12.0,
        ));
        assert!(store.cancel_in_progress().is_some());
        assert!(store.is_empty());
        assert!(store.finish_in_progress().is_none());
    }

    #[test]
    fn test_query_intersecting() {
        let mut store = VectorStore::new();
        let a = rect(&mut store, (0.0, 0.0), (10.0, 10.0));
        let b = rect(&mut store, (20.0, 20.0), (30.0, 30.0));
        let hits: Vec<_> = store
            .query_intersecting(Rect::new(5.0, 5.0, 20.0, 20.0))
            .iter()
            .map(|v| v.id())
            .collect();
        assert_eq!(hits, vec![a, b]);
        assert!(store.query_intersecting(Rect::new(11.0, 11.0, 19.0, 19.0)).is_empty());
    }

    #[test]
    fn test_select_hides_original_and_highlights_clone() {
        let mut store = VectorStore::new();
        let id = rect(&mut store, (0.0, 0.0), (10.0, 10.0));
        assert_eq!(store.select(&[id, id]), 1);
        assert!(!store.get(id).unwrap().is_visible());
        assert!(store.selected()[0].is_highlighted());
        assert_eq!(store.visible_vectors().count(), 1);
    }

    #[test]
    fn test_deselect_without_commit_restores_original() {
        let mut store = VectorStore::new();
        let id = rect(&mut store, (0.0, 0.0), (10.0, 10.0));
        store.select(&[id]);
        store.selected_mut()[0].translate(Vec2::new(100.0, 0.0));
        store.deselect(&[id], false);
        let original = store.get(id).unwrap();
        assert!(original.is_visible());
        assert_eq!(original.points()[0], Point::new(0.0, 0.0));
        assert!(store.selected().is_empty());
    }

    #[test]
    fn test_deselect_with_commit_keeps_edits() {
        let mut store = VectorStore::new();
        let id = rect(&mut store, (0.0, 0.0), (10.0, 10.0));
        store.select(&[id]);
        store.selected_mut()[0].translate(Vec2::new(100.0, 0.0));
        store.deselect_all(true);
        let updated = store.get(id).unwrap();
        assert!(updated.is_visible());
        assert!(!updated.is_highlighted());
        assert_eq!(updated.points()[0], Point::new(100.0, 0.0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_and_undo_restores_same_vector() {
        let mut store = VectorStore::new();
        let id = rect(&mut store, (0.0, 0.0), (10.0, 5.0));
        let before = store.committed().to_vec();

        assert!(store.delete(id));
        assert!(store.is_empty());
        assert_eq!(store.deleted().len(), 1);

        assert_eq!(store.undo_delete(), Some(id));
        assert_eq!(store.committed().len(), 1);
        assert_eq!(store.committed()[0].id(), before[0].id());
        assert_eq!(store.committed()[0], before[0]);
        assert_eq!(store.committed()[0].finalized_at(), before[0].finalized_at());
    }

    #[test]
    fn test_undo_on_empty_stack_is_noop() {
        let mut store = VectorStore::new();
        rect(&mut store, (0.0, 0.0), (1.0, 1.0));
        assert_eq!(store.undo_delete(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_order_is_lifo() {
        let mut store = VectorStore::new();
        let a = rect(&mut store, (0.0, 0.0), (1.0, 1.0));
        let b = rect(&mut store, (2.0, 2.0), (3.0, 3.0));
        store.delete(a);
        store.delete(b);
        assert_eq!(store.undo_delete(), Some(b));
        assert_eq!(store.undo_delete(), Some(a));
    }

    #[test]
    fn test_delete_selected_commits_edits_first() {
        let mut store = VectorStore::new();
        let id = rect(&mut store, (0.0, 0.0), (1.0, 1.0));
        store.select(&[id]);
        store.selected_mut()[0].translate(Vec2::new(5.0, 5.0));
        assert_eq!(store.delete_selected(), 1);
        assert!(store.selected().is_empty());
        assert_eq!(store.deleted()[0].points()[0], Point::new(5.0, 5.0));
    }

    #[test]
    fn test_clear_is_not_undoable() {
        let mut store = VectorStore::new();
        rect(&mut store, (0.0, 0.0), (1.0, 1.0));
        store.clear();
        assert!(store.is_empty());
        assert!(store.deleted().is_empty());
        assert_eq!(store.undo_delete(), None);
    }

    #[test]
    fn test_display_culls_and_includes_in_progress() {
        let mut store = VectorStore::new();
        rect(&mut store, (0.0, 0.0), (10.0, 10.0));
        rect(&mut store, (500.0, 500.0), (510.0, 510.0));
        store.start_vector(Vector::start(
            VectorKind::Line,
            Point::new(1.0, 1.0),
            VectorStyle::default(),
            12.0,
        ));
        let view = View::new(Point::ZERO, 1.0, Size::new(100.0, 100.0));
        let mut out = Vec::new();
        store.display(&view, &mut out);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut store = VectorStore::new();
        let style = VectorStyle::new(SerializableColor::rgb(255, 0, 0), 4);
        for (i, kind) in [
            VectorKind::Pencil,
            VectorKind::Line,
            VectorKind::Circle,
            VectorKind::Rectangle,
        ]
        .into_iter()
        .enumerate()
        {
            let offset = i as f64 * 10.0;
            let mut vector = Vector::start(kind, Point::new(offset, 0.0), style, 12.0);
            vector.add_point(Point::new(offset + 3.0, 4.0));
            store.start_vector(vector);
            store.finish_in_progress();
        }
        let mut label = Vector::start(VectorKind::Text, Point::new(1.0, 1.0), style, 16.0);
        label.as_text_mut().unwrap().text = "note".into();
        store.start_vector(label);
        store.finish_in_progress();

        let first = store.committed()[0].id();
        let second = store.committed()[1].id();
        store.delete(first);
        store.delete(second);

        let json = store.to_json().unwrap();
        let loaded = VectorStore::from_json(&json).unwrap();
        assert_eq!(loaded.committed().len(), 3);
        assert_eq!(loaded.deleted().len(), 2);
        for (a, b) in loaded.committed().iter().zip(store.committed()) {
            assert_eq!(a, b);
        }
        for (a, b) in loaded.deleted().iter().zip(store.deleted()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_failed_load_leaves_state_untouched() {
        let mut store = VectorStore::new();
        let id = rect(&mut store, (0.0, 0.0), (1.0, 1.0));
        let bad = r#"[[{"class": "LineVec", "data": {
            "color": {"r": 0, "g": 0, "b": 0, "a": 255},
            "thickness": 1, "points": [[0, 0]], "timestamp": 1.0}}], []]"#;
        assert!(matches!(
            store.load_json(bad),
            Err(DocumentError::InvalidPoints { .. })
        ));
        assert!(matches!(store.load_json("[[{\"class\": \"X\"}], []]"), Err(DocumentError::Parse(_))));
        assert_eq!(store.len(), 1);
        assert!(store.get(id).is_some());
    }

    #[test]
    fn test_bounds_union() {
        let mut store = VectorStore::new();
        assert!(store.bounds().is_none());
        rect(&mut store, (0.0, 0.0), (1.0, 1.0));
        rect(&mut store, (5.0, -2.0), (6.0, 0.0));
        assert_eq!(store.bounds(), Some(Rect::new(0.0, -2.0, 6.0, 1.0)));
    }
}
