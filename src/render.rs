//! Rendering: collaborator traits and the rich-text drawing passes.

pub mod backend;
pub mod text;
