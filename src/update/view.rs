//! Caret movement and scrolling

use crate::commands::Cmd;
use crate::messages::ViewMsg;
use crate::model::AppModel;

/// Handle caret and viewport messages
pub fn update_view(model: &mut AppModel, msg: ViewMsg) -> Option<Cmd> {
    match msg {
        ViewMsg::MoveCursor(direction) => {
            model.text_view_mut().move_cursor(direction);
        }
        ViewMsg::LineStart => model.text_view_mut().move_line_start(),
        ViewMsg::LineEnd => model.text_view_mut().move_line_end(),
        ViewMsg::DocumentStart => model.text_view_mut().move_document_start(),
        ViewMsg::DocumentEnd => model.text_view_mut().move_document_end(),

        ViewMsg::PageUp => {
            let jump = page_jump(model);
            model.scrolled.scroll_by(-(jump as i32));
            model.text_view_mut().move_lines(-(jump as isize));
        }
        ViewMsg::PageDown => {
            let jump = page_jump(model);
            model.scrolled.scroll_by(jump as i32);
            model.text_view_mut().move_lines(jump as isize);
        }

        ViewMsg::SetCursorPosition { line, column } => {
            model.text_view_mut().set_cursor(line, column);
        }

        // Scrolling leaves the caret where it is
        ViewMsg::Scroll(lines) => {
            let before = model.scrolled.viewport;
            model.scrolled.scroll_by(lines);
            return (model.scrolled.viewport != before).then_some(Cmd::Redraw);
        }
        ViewMsg::ScrollHorizontal(columns) => {
            let before = model.scrolled.viewport;
            model.scrolled.scroll_horizontal_by(columns);
            return (model.scrolled.viewport != before).then_some(Cmd::Redraw);
        }
    }

    model.scrolled.ensure_cursor_visible();
    Some(Cmd::Redraw)
}

/// Lines moved by PageUp/PageDown: a screen minus two lines of overlap
fn page_jump(model: &AppModel) -> usize {
    model
        .scrolled
        .viewport
        .visible_lines
        .saturating_sub(2)
        .max(1)
}
