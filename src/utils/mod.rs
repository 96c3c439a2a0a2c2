//! Shared utility functions.
//!
//! - [`content_length`] - `Content-Length` and `Content-Range` parsing

pub mod content_length;

pub use content_length::{
    get_content_length, get_content_range_start, parse_content_range_start,
    parse_content_range_total,
};
