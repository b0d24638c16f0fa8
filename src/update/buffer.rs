//! Text mutations

use crate::commands::Cmd;
use crate::messages::BufferMsg;
use crate::model::AppModel;

/// Handle buffer messages; edits on a read-only view produce no command
pub fn update_buffer(model: &mut AppModel, msg: BufferMsg) -> Option<Cmd> {
    let view = model.text_view_mut();
    let changed = match msg {
        BufferMsg::InsertText(text) => view.insert_text(&text),
        BufferMsg::InsertNewline => view.insert_newline(),
        BufferMsg::InsertTab => view.insert_text("\t"),
        BufferMsg::DeleteBackward => view.delete_backward(),
        BufferMsg::DeleteForward => view.delete_forward(),
        // Programmatic replacement works on read-only views too
        BufferMsg::SetText(text) => {
            view.set_text(&text);
            true
        }
    };

    if !changed {
        return None;
    }

    model.scrolled.clamp_scroll();
    model.scrolled.ensure_cursor_visible();
    Some(Cmd::Redraw)
}
