pub mod dto;
pub mod palette;

pub use dto::*;
