//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

pub use crate::model::Direction;

/// Text mutations applied at the caret
#[derive(Debug, Clone, PartialEq)]
pub enum BufferMsg {
    /// Insert text (typed characters or pasted text)
    InsertText(String),
    /// Insert a line break
    InsertNewline,
    /// Insert a tab character
    InsertTab,
    /// Delete the char before the caret (Backspace)
    DeleteBackward,
    /// Delete the char after the caret (Delete)
    DeleteForward,
    /// Replace the whole content
    SetText(String),
}

/// Caret movement and viewport scrolling
#[derive(Debug, Clone, PartialEq)]
pub enum ViewMsg {
    MoveCursor(Direction),
    /// Home
    LineStart,
    /// End
    LineEnd,
    /// Ctrl+Home
    DocumentStart,
    /// Ctrl+End
    DocumentEnd,
    PageUp,
    PageDown,
    /// Set caret from a mouse click
    SetCursorPosition { line: usize, column: usize },
    /// Scroll vertically (positive = down, negative = up)
    Scroll(i32),
    /// Scroll horizontally (positive = right, negative = left)
    ScrollHorizontal(i32),
}

/// Window lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum WindowMsg {
    /// New size in physical pixels
    Resize(u32, u32),
    CloseRequested,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Buffer(BufferMsg),
    View(ViewMsg),
    Window(WindowMsg),
}
