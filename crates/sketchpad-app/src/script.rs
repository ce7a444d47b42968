//! JSON action scripts: recorded UI input replayed against an editor.

use serde::{Deserialize, Serialize};
use sketchpad_core::{Color, Editor, EditorResult, Notice, Point, Surface, ToolKind};

/// One user input, as the page's widgets and pointer would deliver it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    Cancel,
    SetTool { tool: ToolKind },
    SetColor { color: Color },
    SetWidth { width: f64 },
    Undo,
    Redo,
    Save,
    Load,
    Clear,
    Resize,
}

/// Parse a script: a JSON array of actions.
pub fn parse_script(json: &str) -> Result<Vec<Action>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Apply one action. Save and load return the notice to show the user.
pub async fn apply<S: Surface>(editor: &mut Editor<S>, action: &Action) -> EditorResult<Option<Notice>> {
    match *action {
        Action::PointerDown { x, y } => editor.pointer_down(Point::new(x, y)),
        Action::PointerMove { x, y } => editor.pointer_move(Point::new(x, y)),
        Action::PointerUp { x, y } => {
            editor.pointer_up(Point::new(x, y));
        }
        Action::Cancel => {
            editor.cancel();
        }
        Action::SetTool { tool } => editor.set_tool(tool),
        Action::SetColor { color } => editor.set_color(color),
        Action::SetWidth { width } => editor.set_width(width)?,
        Action::Undo => {
            editor.undo();
        }
        Action::Redo => {
            editor.redo();
        }
        Action::Save => return Ok(Some(editor.save().await)),
        Action::Load => return Ok(Some(editor.load().await)),
        Action::Clear => editor.clear_canvas(),
        Action::Resize => editor.handle_resize(),
    }
    Ok(None)
}

/// Apply every action in order, collecting notices.
///
/// A rejected action is logged and skipped, as a slider refusing a bad value
/// would; the rest of the script still runs.
pub async fn replay<S: Surface>(editor: &mut Editor<S>, actions: &[Action]) -> Vec<Notice> {
    let mut notices = Vec::new();
    for (index, action) in actions.iter().enumerate() {
        match apply(editor, action).await {
            Ok(Some(notice)) => notices.push(notice),
            Ok(None) => {}
            Err(e) => log::warn!("Action {index} skipped: {e}"),
        }
    }
    notices
}
