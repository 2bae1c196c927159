//! Core types and geometry for retro-reflective target detection.
//!
//! Frames are borrowed byte buffers and contours are plain integer polygons
//! in `nalgebra` points. Hulls, areas, arc lengths and minimum-area
//! rectangles come from `imageproc::geometry`; this crate adds the
//! conversions and a single, unambiguous rotated-rectangle representation.

mod contour;
mod hull;
mod image;
mod rotated_rect;

pub use contour::{closed_perimeter, polygon_area, BorderKind, BoundingBox, Contour};
pub use hull::{convex_hull, convex_hull_area};
pub use image::{BinaryMask, ChannelOrder, ColorImageView, ImageError};
pub use rotated_rect::{min_area_rect, RotatedRect};
