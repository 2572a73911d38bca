//! Shared foundation: error taxonomy and premultiplied raster primitives.

pub mod error;
pub mod raster;
