//! Utility modules

pub mod text;

pub use text::{
    char_col_to_visual_col, line_content_len, visual_col_to_char_col, visual_width,
    TABULATOR_WIDTH,
};
