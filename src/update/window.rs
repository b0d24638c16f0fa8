//! Window lifecycle

use crate::commands::Cmd;
use crate::messages::WindowMsg;
use crate::model::AppModel;

pub fn update_window(model: &mut AppModel, msg: WindowMsg) -> Option<Cmd> {
    match msg {
        WindowMsg::Resize(width, height) => {
            if model.window_size == (width, height) {
                return None;
            }
            tracing::debug!("Window resized to {}x{}", width, height);
            model.resize(width, height);
            Some(Cmd::Redraw)
        }
        WindowMsg::CloseRequested => {
            tracing::info!("Close requested, leaving event loop");
            Some(Cmd::Quit)
        }
    }
}
