//! Rich-text segmentation and line layout.
//!
//! The pipeline runs in byte offsets of the source string throughout:
//! [`scan`] walks code points, [`brackets`] finds highlighted delimiter
//! regions, [`segment`] folds brackets and emoji into a covering span
//! sequence, [`wrap`] breaks the text into lines and picks a font size, and
//! [`distribute`] splits the spans across the committed lines.

pub mod brackets;
pub mod distribute;
pub mod scan;
pub mod segment;
pub mod wrap;
