//! Output formatting

pub mod json;
pub mod text;
