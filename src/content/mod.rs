//! Content module - post model, file name and title parsing, source discovery

mod filename;
pub mod loader;
mod post;
mod title;

pub use filename::{parse_file_name, PostName};
pub use post::{sort_newest_first, Post};
pub use title::extract_title;
