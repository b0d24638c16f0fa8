//! Keyboard input mapping
//!
//! Translates winit keys into messages. Ctrl/Cmd chords other than
//! Ctrl+Home/End are ignored.

use winit::keyboard::{Key, ModifiersState, NamedKey};

use codebuffer::messages::{BufferMsg, Direction, Msg, ViewMsg};

/// Map a pressed key to a message
pub fn key_to_msg(key: &Key, modifiers: ModifiersState) -> Option<Msg> {
    let ctrl = modifiers.control_key();
    let logo = modifiers.super_key();

    let msg = match key {
        Key::Named(NamedKey::ArrowUp) => Msg::View(ViewMsg::MoveCursor(Direction::Up)),
        Key::Named(NamedKey::ArrowDown) => Msg::View(ViewMsg::MoveCursor(Direction::Down)),
        Key::Named(NamedKey::ArrowLeft) if logo => Msg::View(ViewMsg::LineStart),
        Key::Named(NamedKey::ArrowRight) if logo => Msg::View(ViewMsg::LineEnd),
        Key::Named(NamedKey::ArrowLeft) => Msg::View(ViewMsg::MoveCursor(Direction::Left)),
        Key::Named(NamedKey::ArrowRight) => Msg::View(ViewMsg::MoveCursor(Direction::Right)),

        Key::Named(NamedKey::Home) if ctrl => Msg::View(ViewMsg::DocumentStart),
        Key::Named(NamedKey::End) if ctrl => Msg::View(ViewMsg::DocumentEnd),
        Key::Named(NamedKey::Home) => Msg::View(ViewMsg::LineStart),
        Key::Named(NamedKey::End) => Msg::View(ViewMsg::LineEnd),
        Key::Named(NamedKey::PageUp) => Msg::View(ViewMsg::PageUp),
        Key::Named(NamedKey::PageDown) => Msg::View(ViewMsg::PageDown),

        _ if ctrl || logo => return None,

        Key::Named(NamedKey::Enter) => Msg::Buffer(BufferMsg::InsertNewline),
        Key::Named(NamedKey::Tab) => Msg::Buffer(BufferMsg::InsertTab),
        Key::Named(NamedKey::Backspace) => Msg::Buffer(BufferMsg::DeleteBackward),
        Key::Named(NamedKey::Delete) => Msg::Buffer(BufferMsg::DeleteForward),
        Key::Named(NamedKey::Space) => Msg::Buffer(BufferMsg::InsertText(" ".to_string())),
        Key::Character(text) if !text.chars().any(char::is_control) => {
            Msg::Buffer(BufferMsg::InsertText(text.to_string()))
        }
        _ => return None,
    };
    Some(msg)
}
