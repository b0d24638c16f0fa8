//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod buffer;
mod view;
mod window;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::ViewSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use buffer::update_buffer;
pub use view::update_view;
pub use window::update_window;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Buffer(m) => buffer::update_buffer(model, m),
        Msg::View(m) => view::update_view(model, m),
        Msg::Window(m) => window::update_window(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Logs the message and any caret, scroll or revision change it caused.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();
    debug!(target: "message", msg = %msg_name, "processing");

    let before = ViewSnapshot::from_model(model);
    let result = update_inner(model, msg);
    let after = ViewSnapshot::from_model(model);

    if let Some(diff) = before.diff(&after) {
        debug!(target: "cursor", "{}", diff);
    }

    let cursor = model.text_view().cursor();
    debug_assert_eq!(
        model.buffer().clamp(cursor),
        cursor,
        "caret left the buffer after {}",
        msg_name
    );

    result
}

/// Get a display name for a message type
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Buffer(m) => format!("Buffer::{:?}", m),
        Msg::View(m) => format!("View::{:?}", m),
        Msg::Window(m) => format!("Window::{:?}", m),
    }
}
