//! Small shared helpers.

pub mod markup;

pub use markup::{
    MAX_CAPTION_LEN, MAX_MESSAGE_LEN, chunk_message, ellipsize, escape_html, mention_html,
    truncate_chars,
};
