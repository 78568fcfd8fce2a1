//! Terminal output adapters: plain-text reports and inline images.

pub mod inline_image;
pub mod render;
