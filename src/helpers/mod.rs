//! Small formatting helpers shared by the generator and converters

mod date;
mod html;

pub use date::*;
pub use html::*;
