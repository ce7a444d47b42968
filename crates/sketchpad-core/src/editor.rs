//! The editor: one canvas, its history, and the user-invokable actions.

use crate::color::Color;
use crate::config::EditorConfig;
use crate::history::{History, Snapshot};
use crate::redraw::RedrawSlot;
use crate::storage::Storage;
use crate::surface::{Stroke, Surface, SurfaceError};
use crate::tools::{DragEnd, DragUpdate, InvalidWidth, ToolKind, ToolManager, ToolSelection};
use kurbo::Point;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Editor errors.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    InvalidWidth(#[from] InvalidWidth),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// User-visible outcome of save and load.
///
/// Save and load never fail outright; store and codec failures become a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Saved,
    /// The canvas could not be encoded or the store rejected the write.
    SaveFailed,
    Loaded,
    /// Load found nothing under the drawing key.
    NothingToLoad,
    /// The store could not be read, or its data could not be decoded; the canvas is unchanged.
    LoadFailed,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::Saved => "Drawing saved!",
            Notice::SaveFailed => "Drawing could not be saved.",
            Notice::Loaded => "Drawing loaded!",
            Notice::NothingToLoad => "No saved drawing found!",
            Notice::LoadFailed => "Saved drawing could not be read.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A drawing canvas with undo/redo history.
///
/// Pointer events go through [`pointer_down`](Self::pointer_down),
/// [`pointer_move`](Self::pointer_move) and [`pointer_up`](Self::pointer_up);
/// every completed stroke, shape, clear and load commits a snapshot.
pub struct Editor<S: Surface> {
    surface: S,
    tools: ToolManager,
    history: History,
    redraw: RedrawSlot,
    storage: Arc<dyn Storage>,
    config: EditorConfig,
}

impl<S: Surface> Editor<S> {
    /// Create an editor drawing into `surface`, which is sized to the config and cleared.
    pub fn new(mut surface: S, storage: Arc<dyn Storage>, config: EditorConfig) -> Self {
        if surface.width() != config.width || surface.height() != config.height {
            surface.resize(config.width, config.height);
        }
        surface.clear(config.background);

        let selection = ToolSelection::new(config.tool, config.color, config.stroke_width);
        Self {
            surface,
            tools: ToolManager::with_selection(selection),
            history: History::new(),
            redraw: RedrawSlot::new(),
            storage,
            config,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn selection(&self) -> &ToolSelection {
        &self.tools.selection
    }

    pub fn redraw_slot(&self) -> &RedrawSlot {
        &self.redraw
    }

    pub fn is_dragging(&self) -> bool {
        self.tools.is_active()
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        log::debug!("Tool: {tool}");
        self.tools.set_tool(tool);
    }

    pub fn set_color(&mut self, color: Color) {
        self.tools.selection.color = color;
    }

    /// Set the stroke width. Invalid widths are rejected and the old width kept.
    pub fn set_width(&mut self, width: f64) -> EditorResult<()> {
        self.tools.selection.set_width(width)?;
        Ok(())
    }

    fn current_stroke(&self) -> Stroke {
        self.tools.selection.stroke(self.config.background)
    }

    /// Start a drag at `point`.
    pub fn pointer_down(&mut self, point: Point) {
        log::debug!("Drag start at ({}, {}) with {}", point.x, point.y, self.tools.tool());
        self.tools.begin(point);
    }

    /// Extend the active drag. Ignored when no drag is active.
    pub fn pointer_move(&mut self, point: Point) {
        let Some(update) = self.tools.update(point) else {
            return;
        };
        let stroke = self.current_stroke();
        match update {
            DragUpdate::Segment(line) => {
                self.surface.stroke_segment(line.p0, line.p1, &stroke);
            }
            DragUpdate::Preview(shape) => {
                self.redraw();
                self.surface.stroke_shape(&shape, &stroke);
            }
        }
    }

    /// Finish the active drag and commit it. Returns false if no drag was active.
    pub fn pointer_up(&mut self, point: Point) -> bool {
        let Some(end) = self.tools.end(point) else {
            return false;
        };
        if let DragEnd::Shape(shape) = end {
            let stroke = self.current_stroke();
            self.surface.stroke_shape(&shape, &stroke);
        }
        self.commit();
        true
    }

    /// Abort the active drag without committing, discarding anything it drew.
    pub fn cancel(&mut self) -> bool {
        if !self.tools.cancel() {
            return false;
        }
        log::debug!("Drag cancelled");
        self.redraw();
        true
    }

    /// Capture the canvas and push it onto the history.
    ///
    /// If the canvas cannot be encoded the uncommitted change is rolled back,
    /// so the canvas keeps showing the top of the history.
    fn commit(&mut self) -> bool {
        match self.surface.encode() {
            Ok(snapshot) => {
                self.history.commit(snapshot);
                true
            }
            Err(e) => {
                log::error!("Failed to capture snapshot, discarding change: {e}");
                self.redraw();
                false
            }
        }
    }

    /// Show the top of the history, or a blank canvas if it is empty.
    ///
    /// Returns false if the snapshot could not be decoded; the canvas is then left as it was.
    pub fn redraw(&mut self) -> bool {
        let background = self.config.background;
        show(&mut self.surface, &mut self.redraw, self.history.top(), background)
    }

    /// Step back one commit. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo() {
            return false;
        }
        log::debug!("Undo ({} left)", self.history.len());
        self.redraw();
        true
    }

    /// Re-apply the most recently undone commit. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.history.redo() {
            return false;
        }
        log::debug!("Redo ({} left)", self.history.redo_len());
        self.redraw();
        true
    }

    /// Blank the canvas and commit the blank state, so clearing can be undone.
    pub fn clear_canvas(&mut self) {
        self.surface.clear(self.config.background);
        self.commit();
    }

    /// Re-clamp the surface to the configured size and redraw the current state.
    pub fn handle_resize(&mut self) {
        self.surface.resize(self.config.width, self.config.height);
        self.redraw();
    }

    /// Encode what the canvas shows right now.
    pub fn current_snapshot(&self) -> EditorResult<Snapshot> {
        Ok(self.surface.encode()?)
    }

    /// Persist the live canvas under the drawing key, replacing any earlier save.
    pub async fn save(&self) -> Notice {
        let snapshot = match self.surface.encode() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::error!("Save skipped: {e}");
                return Notice::SaveFailed;
            }
        };
        if let Err(e) = self.storage.put(&self.config.storage_key, snapshot.as_bytes()).await {
            log::error!("Failed to save drawing as {:?}: {e}", self.config.storage_key);
            return Notice::SaveFailed;
        }
        log::info!("Saved drawing ({} bytes) as {:?}", snapshot.len(), self.config.storage_key);
        Notice::Saved
    }

    /// Replace the canvas with the saved drawing and commit it.
    ///
    /// If nothing is saved, the store cannot be read, or the saved data cannot
    /// be decoded, the canvas and history are left untouched and the returned
    /// notice says why.
    pub async fn load(&mut self) -> Notice {
        let bytes = match self.storage.get(&self.config.storage_key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                log::info!("No drawing saved under {:?}", self.config.storage_key);
                return Notice::NothingToLoad;
            }
            Err(e) => {
                log::error!("Failed to read drawing {:?}: {e}", self.config.storage_key);
                return Notice::LoadFailed;
            }
        };

        let snapshot = Snapshot::from(bytes);
        let background = self.config.background;
        if !show(&mut self.surface, &mut self.redraw, Some(&snapshot), background) {
            return Notice::LoadFailed;
        }
        if !self.commit() {
            return Notice::LoadFailed;
        }
        log::info!("Loaded drawing ({} bytes)", snapshot.len());
        Notice::Loaded
    }
}

/// Put `snapshot` (or a blank canvas) on the surface through the redraw slot.
fn show<S: Surface>(
    surface: &mut S,
    slot: &mut RedrawSlot,
    snapshot: Option<&Snapshot>,
    background: Color,
) -> bool {
    // Only reachable if a decode is ever left in flight across calls.
    let Some(ticket) = slot.begin() else {
        log::warn!("Redraw requested while another is in flight, skipping");
        return false;
    };

    let result = match snapshot {
        Some(snapshot) => surface.restore(snapshot, background),
        None => {
            surface.clear(background);
            Ok(())
        }
    };
    slot.finish(ticket);

    match result {
        Ok(()) => true,
        Err(e) => {
            log::error!("Skipping redraw: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{BoxFuture, MemoryStorage, StorageError, StorageResult, block_on};
    use crate::surface::testing::RecordingSurface;

    /// A store whose every operation fails.
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn put(&self, _key: &str, _data: &[u8]) -> BoxFuture<'_, StorageResult<()>> {
            Box::pin(async { Err(StorageError::Io("disk full".to_string())) })
        }

        fn get(&self, _key: &str) -> BoxFuture<'_, StorageResult<Option<Vec<u8>>>> {
            Box::pin(async { Err(StorageError::Io("disk unreadable".to_string())) })
        }

        fn delete(&self, _key: &str) -> BoxFuture<'_, StorageResult<()>> {
            Box::pin(async { Err(StorageError::Io("disk full".to_string())) })
        }

        fn exists(&self, _key: &str) -> BoxFuture<'_, StorageResult<bool>> {
            Box::pin(async { Err(StorageError::Io("disk unreadable".to_string())) })
        }
    }

    fn editor() -> Editor<RecordingSurface> {
        editor_with_storage(Arc::new(MemoryStorage::new()))
    }

    fn editor_with_storage(storage: Arc<dyn Storage>) -> Editor<RecordingSurface> {
        Editor::new(RecordingSurface::new(10, 10), storage, EditorConfig::default())
    }

    fn drag(editor: &mut Editor<RecordingSurface>, from: (f64, f64), to: (f64, f64)) {
        editor.pointer_down(Point::new(from.0, from.1));
        editor.pointer_move(Point::new(to.0, to.1));
        editor.pointer_up(Point::new(to.0, to.1));
    }

    fn ops(editor: &Editor<RecordingSurface>) -> Vec<String> {
        editor.surface().ops.clone()
    }

    #[test]
    fn test_new_sizes_and_clears_surface() {
        let editor = editor();
        assert_eq!(editor.surface().width, 900);
        assert_eq!(editor.surface().height, 600);
        assert_eq!(ops(&editor), vec!["clear #ffffff"]);
        assert!(editor.history().is_empty());
    }

    #[test]
    fn test_freehand_renders_each_segment() {
        let mut editor = editor();
        editor.set_color(Color::rgb(255, 0, 0));
        editor.pointer_down(Point::new(0.0, 0.0));
        editor.pointer_move(Point::new(4.0, 0.0));
        editor.set_width(2.0).unwrap();
        editor.pointer_move(Point::new(4.0, 4.0));

        assert_eq!(
            ops(&editor),
            vec![
                "clear #ffffff",
                "segment (0,0)-(4,0) #ff0000 5",
                "segment (4,0)-(4,4) #ff0000 2",
            ]
        );
        assert!(editor.history().is_empty());

        assert!(editor.pointer_up(Point::new(9.0, 9.0)));
        assert_eq!(editor.history().len(), 1);
        assert_eq!(ops(&editor).len(), 3);
    }

    #[test]
    fn test_eraser_paints_background() {
        let mut editor = editor();
        editor.set_tool(ToolKind::Eraser);
        editor.set_color(Color::rgb(0, 0, 255));
        drag(&mut editor, (1.0, 1.0), (2.0, 2.0));

        assert_eq!(ops(&editor)[1], "segment (1,1)-(2,2) #ffffff 5");
    }

    #[test]
    fn test_shape_preview_does_not_accumulate() {
        let mut editor = editor();
        editor.set_tool(ToolKind::Line);
        editor.pointer_down(Point::new(0.0, 0.0));
        editor.pointer_move(Point::new(1.0, 1.0));
        editor.pointer_move(Point::new(2.0, 2.0));
        editor.pointer_move(Point::new(3.0, 3.0));

        assert_eq!(ops(&editor), vec!["clear #ffffff", "line (0,0)-(3,3) #000000 5"]);
        assert!(editor.history().is_empty());
    }

    #[test]
    fn test_shape_preview_restores_last_commit() {
        let mut editor = editor();
        drag(&mut editor, (0.0, 0.0), (1.0, 0.0));

        editor.set_tool(ToolKind::Rectangle);
        editor.pointer_down(Point::new(5.0, 5.0));
        editor.pointer_move(Point::new(8.0, 8.0));
        editor.pointer_move(Point::new(2.0, 3.0));

        assert_eq!(
            ops(&editor),
            vec![
                "clear #ffffff",
                "segment (0,0)-(1,0) #000000 5",
                "rect (2,3)-(5,5) #000000 5",
            ]
        );
    }

    #[test]
    fn test_shape_release_draws_final_and_commits() {
        let mut editor = editor();
        editor.set_tool(ToolKind::Circle);
        editor.pointer_down(Point::new(200.0, 200.0));
        editor.pointer_move(Point::new(210.0, 200.0));
        assert!(editor.pointer_up(Point::new(260.0, 200.0)));

        let committed = editor.history().top().unwrap().clone();
        let text = String::from_utf8(committed.as_bytes().to_vec()).unwrap();
        assert!(text.ends_with("circle (140,140)-(260,260) #000000 5"));
        assert!(!editor.is_dragging());
    }

    #[test]
    fn test_shape_preview_uses_current_selection() {
        let mut editor = editor();
        editor.set_tool(ToolKind::Rectangle);
        editor.pointer_down(Point::new(0.0, 0.0));
        editor.set_color(Color::rgb(255, 0, 0));
        editor.pointer_move(Point::new(4.0, 4.0));
        assert_eq!(ops(&editor), vec!["clear #ffffff", "rect (0,0)-(4,4) #ff0000 5"]);

        editor.set_color(Color::rgb(0, 0, 255));
        editor.set_width(2.0).unwrap();
        editor.pointer_move(Point::new(6.0, 6.0));
        assert_eq!(ops(&editor), vec!["clear #ffffff", "rect (0,0)-(6,6) #0000ff 2"]);

        assert!(editor.pointer_up(Point::new(6.0, 6.0)));
        assert_eq!(ops(&editor).last().unwrap(), "rect (0,0)-(6,6) #0000ff 2");
    }

    #[test]
    fn test_idle_pointer_events_are_ignored() {
        let mut editor = editor();
        editor.pointer_move(Point::new(5.0, 5.0));
        assert!(!editor.pointer_up(Point::new(5.0, 5.0)));

        assert_eq!(ops(&editor), vec!["clear #ffffff"]);
        assert!(editor.history().is_empty());
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut editor = editor();
        for i in 0..5 {
            let x = i as f64;
            drag(&mut editor, (x, 0.0), (x, 9.0));
        }
        let final_state = editor.current_snapshot().unwrap();

        for _ in 0..5 {
            assert!(editor.undo());
        }
        assert_eq!(ops(&editor), vec!["clear #ffffff"]);

        for _ in 0..5 {
            assert!(editor.redo());
        }
        assert_eq!(editor.current_snapshot().unwrap(), final_state);
        assert!(!editor.redo());
    }

    #[test]
    fn test_commit_after_undo_discards_redo() {
        let mut editor = editor();
        drag(&mut editor, (0.0, 0.0), (1.0, 1.0));
        drag(&mut editor, (2.0, 2.0), (3.0, 3.0));
        assert!(editor.undo());
        assert!(editor.undo());

        editor.clear_canvas();
        let after_clear = editor.current_snapshot().unwrap();

        assert!(!editor.redo());
        assert_eq!(editor.current_snapshot().unwrap(), after_clear);
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut editor = editor();
        let before = editor.current_snapshot().unwrap();

        assert!(!editor.undo());
        assert!(!editor.redo());
        assert_eq!(editor.current_snapshot().unwrap(), before);
        assert_eq!(editor.redraw_slot().last_completed(), None);
    }

    #[test]
    fn test_clear_then_line_then_undo_shows_blank() {
        let mut editor = editor();
        editor.clear_canvas();
        let blank = editor.current_snapshot().unwrap();

        editor.set_tool(ToolKind::Line);
        drag(&mut editor, (10.0, 10.0), (90.0, 90.0));
        assert_eq!(editor.history().len(), 2);
        assert_ne!(editor.current_snapshot().unwrap(), blank);

        assert!(editor.undo());
        assert_eq!(editor.current_snapshot().unwrap(), blank);
    }

    #[test]
    fn test_clear_is_undoable() {
        let mut editor = editor();
        drag(&mut editor, (0.0, 0.0), (5.0, 5.0));
        let drawing = editor.current_snapshot().unwrap();

        editor.clear_canvas();
        assert_eq!(ops(&editor), vec!["clear #ffffff"]);

        assert!(editor.undo());
        assert_eq!(editor.current_snapshot().unwrap(), drawing);
    }

    #[test]
    fn test_cancel_restores_committed_state() {
        let mut editor = editor();
        drag(&mut editor, (0.0, 0.0), (1.0, 1.0));
        let committed = editor.current_snapshot().unwrap();

        editor.pointer_down(Point::new(3.0, 3.0));
        editor.pointer_move(Point::new(4.0, 4.0));
        assert!(editor.cancel());

        assert_eq!(editor.current_snapshot().unwrap(), committed);
        assert_eq!(editor.history().len(), 1);
        assert!(!editor.cancel());
    }

    #[test]
    fn test_invalid_width_is_rejected() {
        let mut editor = editor();
        assert!(matches!(editor.set_width(0.0), Err(EditorError::InvalidWidth(_))));
        assert_eq!(editor.selection().width(), 5.0);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut editor = editor();
        drag(&mut editor, (0.0, 0.0), (3.0, 3.0));
        let before = editor.current_snapshot().unwrap();

        assert_eq!(block_on(editor.save()), Notice::Saved);
        assert_eq!(block_on(editor.load()), Notice::Loaded);

        assert_eq!(editor.current_snapshot().unwrap(), before);
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn test_load_without_save_reports_and_keeps_canvas() {
        let mut editor = editor();
        drag(&mut editor, (0.0, 0.0), (3.0, 3.0));
        let before = editor.current_snapshot().unwrap();

        let notice = block_on(editor.load());
        assert_eq!(notice, Notice::NothingToLoad);
        assert_eq!(notice.to_string(), "No saved drawing found!");
        assert_eq!(editor.current_snapshot().unwrap(), before);
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_load_clears_redo() {
        let mut editor = editor();
        drag(&mut editor, (0.0, 0.0), (3.0, 3.0));
        block_on(editor.save());
        drag(&mut editor, (5.0, 5.0), (6.0, 6.0));
        assert!(editor.undo());
        assert!(editor.history().can_redo());

        block_on(editor.load());
        assert!(!editor.history().can_redo());
        assert!(!editor.redo());
    }

    #[test]
    fn test_corrupt_saved_drawing_leaves_canvas() {
        let storage = Arc::new(MemoryStorage::new());
        block_on(storage.put("savedDrawing", &[0xff, 0xfe, 0xfd])).unwrap();

        let mut editor = editor_with_storage(storage);
        drag(&mut editor, (0.0, 0.0), (3.0, 3.0));
        let before = editor.current_snapshot().unwrap();

        assert_eq!(block_on(editor.load()), Notice::LoadFailed);
        assert_eq!(editor.current_snapshot().unwrap(), before);
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_save_failure_is_reported_and_drawing_continues() {
        let mut editor = editor_with_storage(Arc::new(BrokenStorage));
        drag(&mut editor, (0.0, 0.0), (3.0, 3.0));

        let notice = block_on(editor.save());
        assert_eq!(notice, Notice::SaveFailed);
        assert_eq!(notice.to_string(), "Drawing could not be saved.");

        editor.set_tool(ToolKind::Line);
        drag(&mut editor, (10.0, 10.0), (90.0, 90.0));
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn test_unreadable_store_leaves_canvas() {
        let mut editor = editor_with_storage(Arc::new(BrokenStorage));
        drag(&mut editor, (0.0, 0.0), (3.0, 3.0));
        let before = editor.current_snapshot().unwrap();

        assert_eq!(block_on(editor.load()), Notice::LoadFailed);
        assert_eq!(editor.current_snapshot().unwrap(), before);
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_unencodable_stroke_is_rolled_back() {
        let mut editor = Editor::new(
            RecordingSurface::unencodable(10, 10),
            Arc::new(MemoryStorage::new()),
            EditorConfig::default(),
        );
        drag(&mut editor, (0.0, 0.0), (3.0, 3.0));

        assert!(editor.history().is_empty());
        assert_eq!(ops(&editor), vec!["clear #ffffff"]);
        assert_eq!(block_on(editor.save()), Notice::SaveFailed);
    }

    #[test]
    fn test_show_skips_while_slot_is_busy() {
        let mut surface = RecordingSurface::new(10, 10);
        surface.ops.push("segment (0,0)-(1,1) #000000 5".to_string());
        let mut slot = RedrawSlot::new();
        let held = slot.begin().unwrap();

        assert!(!show(&mut surface, &mut slot, None, Color::WHITE));
        assert_eq!(surface.ops.len(), 1);

        assert!(slot.finish(held));
        assert!(show(&mut surface, &mut slot, None, Color::WHITE));
        assert_eq!(surface.ops, vec!["clear #ffffff"]);
    }

    #[test]
    fn test_save_overwrites_previous() {
        let storage = Arc::new(MemoryStorage::new());
        let mut editor = editor_with_storage(storage.clone());
        drag(&mut editor, (0.0, 0.0), (3.0, 3.0));
        block_on(editor.save());
        drag(&mut editor, (4.0, 4.0), (5.0, 5.0));
        block_on(editor.save());

        let stored = block_on(storage.get("savedDrawing")).unwrap().unwrap();
        assert_eq!(Snapshot::from(stored), editor.current_snapshot().unwrap());
    }

    #[test]
    fn test_resize_redraws_top_snapshot() {
        let mut editor = editor();
        drag(&mut editor, (0.0, 0.0), (3.0, 3.0));
        let committed = editor.current_snapshot().unwrap();

        editor.handle_resize();
        assert_eq!(editor.surface().width, 900);
        assert_eq!(editor.current_snapshot().unwrap(), committed);
    }

    #[test]
    fn test_redraws_complete_in_order() {
        let mut editor = editor();
        drag(&mut editor, (0.0, 0.0), (3.0, 3.0));
        drag(&mut editor, (4.0, 4.0), (5.0, 5.0));

        let mut seen = Vec::new();
        for _ in 0..2 {
            editor.undo();
            seen.push(editor.redraw_slot().last_completed().unwrap());
        }
        editor.redo();
        seen.push(editor.redraw_slot().last_completed().unwrap());

        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert!(!editor.redraw_slot().is_busy());
    }
}
