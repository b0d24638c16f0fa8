//! codebuffer - a syntax-highlighting code buffer shown in a window
//!
//! The crate follows the Elm Architecture: `model` holds state, `messages`
//! describe changes, `update` applies them and returns `commands`, and
//! `view` paints the model.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod messages;
pub mod model;
pub mod sample;
pub mod startup;
pub mod syntax;
pub mod theme;
pub mod tracing;
pub mod update;
pub mod util;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::AppConfig;
pub use messages::Msg;
pub use model::{AppModel, CodeBuffer};
pub use sample::SAMPLE_XML;
pub use syntax::{Grammar, SyntaxError, SyntaxLoader};
pub use theme::Theme;
