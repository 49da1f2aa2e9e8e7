//! Parsing primitives for flat, line-oriented configuration dumps.
//!
//! Legacy network devices often export their configuration as a flat list of
//! lines with no nesting markers: scope is expressed through literal path
//! prefixes such as `/c/slb/virt 12/service 80`. This crate provides the
//! generic pieces needed to work with that shape of text:
//!
//! - [`source`] — line loading and line-ending normalization
//! - [`section`] — carve a contiguous logical region out of the line list by
//!   prefix containment
//! - [`scan`] — enumerate the distinct numeric ids of one element kind
//! - [`extract`] — pull a scalar field value out of a located region
//!
//! The crate carries no device-specific knowledge; callers supply the
//! containment paths and the top-level marker for their dialect.

pub mod extract;
pub mod scan;
pub mod section;
pub mod source;

pub use extract::{extract_field, FieldError};
pub use scan::scan_ids;
pub use section::{locate, Section};
pub use source::{ConfigLines, SourceError};
