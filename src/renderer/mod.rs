//! SVG renderer for simulation frames
//!
//! This module takes a [`Frame`](crate::simulation::Frame) and produces an
//! SVG string with appropriate CSS classes for styling.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::{render_svg, render_svg_with_stylesheet, SvgBuilder};
