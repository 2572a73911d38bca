//! Scene model, assets, layer caching, and composition passes.

pub mod assets;
pub mod cache;
pub mod compose;
pub mod model;
pub mod region;
