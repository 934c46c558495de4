// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Graphics math: casts and float comparisons are intentional
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::use_self)]
#![allow(clippy::too_many_lines)]

//! Procedural 3D anatomical organ models (brain, heart, lungs) with
//! per-frame physiological animation.
//!
//! Each organ synthesizes its geometry once at construction (parametric
//! displacement fields over base primitives) and thereafter only updates
//! part transforms. The host runtime owns the render loop: it calls
//! [`organs::Organ::advance`] once per frame with the elapsed clock and
//! frame delta, then rasterizes the part hierarchy the organ exposes.
//!
//! # Key entry points
//!
//! - [`organs::Brain`], [`organs::Heart`], [`organs::Lungs`] - the three
//!   organ models
//! - [`scene::PartRegistry`] - named sub-mesh registry with transforms
//! - [`geometry`] - one-shot procedural mesh synthesis
//! - [`options::OrganOptions`] - tessellation detail and smoothing tunables
//!
//! # Architecture
//!
//! Geometry synthesis runs only at construction and fails fast on invalid
//! parameters; nothing on the per-frame path allocates vertex data or
//! blocks. Per-frame motion is a pure function of the elapsed clock plus
//! exponentially smoothed pose-blend state, so a skipped frame recovers on
//! the next call without accumulating error.

pub mod animation;
pub mod error;
pub mod geometry;
pub mod options;
pub mod organs;
pub mod overlay;
pub mod scene;
