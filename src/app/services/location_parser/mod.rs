//! Free-text location parsing
//!
//! Inspection records describe measurement points in free text written by many
//! different inspectors over many years. This module turns those fragments into
//! structured geometry that the station key resolver can build keys from.
//!
//! # Components
//!
//! - [`normalize`] - canonical case, whitespace, separators; strips degree and quote marks
//! - [`geometry`] - slice/angle pairs, axial offsets, head clock positions and head names
//!
//! # Ordering
//!
//! [`geometry::parse_axial_position`] must see the raw text: the foot and inch
//! marks it keys on are exactly what [`normalize::normalize`] strips. Every other
//! parser normalizes its input first and is safe to call on either form.
//!
//! All functions are pure and total.

pub mod geometry;
pub mod normalize;

#[cfg(test)]
pub mod tests;

pub use geometry::{
    AxialPosition, AxialUnit, HeadName, HeadPosition, SeamSide, SliceAngle, parse_axial_position,
    parse_head_name, parse_head_position, parse_seam_head_ref, parse_slice_angle,
};
pub use normalize::{normalize, normalize_opt};
