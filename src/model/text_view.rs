//! Text view - a caret over a code buffer

use super::buffer::{CodeBuffer, Position};

/// Direction for caret movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The text-display widget: owns its buffer and the caret
#[derive(Debug)]
pub struct TextView {
    buffer: CodeBuffer,
    cursor: Position,
    /// Column remembered across vertical moves through shorter lines
    desired_column: Option<usize>,
    editable: bool,
}

impl TextView {
    pub fn new(buffer: CodeBuffer) -> Self {
        Self {
            buffer,
            cursor: Position::default(),
            desired_column: None,
            editable: true,
        }
    }

    pub fn buffer(&self) -> &CodeBuffer {
        &self.buffer
    }

    /// Mutable buffer access; the caret is re-clamped by the next caret operation
    pub fn buffer_mut(&mut self) -> &mut CodeBuffer {
        &mut self.buffer
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    /// Replace the buffer content and put the caret at the start
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.cursor = Position::default();
        self.desired_column = None;
    }

    /// Move the caret to a position, clamped into the buffer
    pub fn set_cursor(&mut self, line: usize, column: usize) {
        self.cursor = self.buffer.clamp(Position::new(line, column));
        self.desired_column = None;
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        let cursor = self.buffer.clamp(self.cursor);
        match direction {
            Direction::Up | Direction::Down => {
                let target_line = match direction {
                    Direction::Up => cursor.line.checked_sub(1),
                    _ => Some(cursor.line + 1).filter(|&l| l < self.buffer.line_count()),
                };
                let desired = self.desired_column.unwrap_or(cursor.column);
                match target_line {
                    Some(line) => {
                        self.cursor = Position::new(line, desired.min(self.buffer.line_len(line)));
                    }
                    // Past the first/last line: jump to the line edge
                    None if direction == Direction::Up => {
                        self.cursor = Position::new(0, 0);
                    }
                    None => {
                        self.cursor = Position::new(cursor.line, self.buffer.line_len(cursor.line));
                    }
                }
                self.desired_column = Some(desired);
                return;
            }
            Direction::Left => {
                self.cursor = if cursor.column > 0 {
                    Position::new(cursor.line, cursor.column - 1)
                } else if cursor.line > 0 {
                    Position::new(cursor.line - 1, self.buffer.line_len(cursor.line - 1))
                } else {
                    cursor
                };
            }
            Direction::Right => {
                self.cursor = if cursor.column < self.buffer.line_len(cursor.line) {
                    Position::new(cursor.line, cursor.column + 1)
                } else if cursor.line + 1 < self.buffer.line_count() {
                    Position::new(cursor.line + 1, 0)
                } else {
                    cursor
                };
            }
        }
        self.desired_column = None;
    }

    pub fn move_line_start(&mut self) {
        self.set_cursor(self.cursor.line, 0);
    }

    pub fn move_line_end(&mut self) {
        self.set_cursor(self.cursor.line, usize::MAX);
    }

    pub fn move_document_start(&mut self) {
        self.set_cursor(0, 0);
    }

    pub fn move_document_end(&mut self) {
        self.set_cursor(usize::MAX, usize::MAX);
    }

    /// Move the caret by whole lines, keeping the desired column
    pub fn move_lines(&mut self, delta: isize) {
        let direction = if delta < 0 {
            Direction::Up
        } else {
            Direction::Down
        };
        for _ in 0..delta.unsigned_abs() {
            self.move_cursor(direction);
        }
    }

    /// Insert text at the caret. Returns false when the view is read-only.
    pub fn insert_text(&mut self, text: &str) -> bool {
        if !self.editable || text.is_empty() {
            return false;
        }
        self.cursor = self.buffer.insert(self.cursor, text);
        self.desired_column = None;
        true
    }

    pub fn insert_newline(&mut self) -> bool {
        self.insert_text("\n")
    }

    /// Delete the char before the caret, joining lines at column 0
    pub fn delete_backward(&mut self) -> bool {
        if !self.editable {
            return false;
        }
        let cursor = self.buffer.clamp(self.cursor);
        let offset = self.buffer.position_to_offset(cursor);
        if offset == 0 {
            return false;
        }
        let from = if cursor.column == 0 {
            // Previous line end, before its whole line break
            self.buffer
                .position_to_offset(Position::new(cursor.line - 1, usize::MAX))
        } else {
            offset - 1
        };
        if from == offset {
            return false;
        }
        self.buffer.delete_offsets(from, offset);
        self.cursor = self.buffer.offset_to_position(from);
        self.desired_column = None;
        true
    }

    /// Delete the char after the caret, joining lines at line end
    pub fn delete_forward(&mut self) -> bool {
        if !self.editable {
            return false;
        }
        let cursor = self.buffer.clamp(self.cursor);
        let offset = self.buffer.position_to_offset(cursor);
        let to = if cursor.column == self.buffer.line_len(cursor.line) {
            if cursor.line + 1 >= self.buffer.line_count() {
                return false;
            }
            self.buffer
                .position_to_offset(Position::new(cursor.line + 1, 0))
        } else {
            offset + 1
        };
        if to == offset {
            return false;
        }
        self.buffer.delete_offsets(offset, to);
        self.cursor = cursor;
        self.desired_column = None;
        true
    }
}
