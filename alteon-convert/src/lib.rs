//! Alteon SLB configuration conversion toward A10 aXAPI payloads.
//!
//! Legacy Alteon application switches dump their configuration as a flat list
//! of prefix-scoped lines (`/c/slb/virt 3/service 80` followed by indented
//! option lines). This library extracts the SLB objects from such a dump and
//! rebuilds them as the JSON structures the A10 aXAPI 2.1 create calls
//! accept, applying the naming, merging, and classification rules a manual
//! migration would.
//!
//! # Architecture
//!
//! ## Extraction
//!
//! - [`vip`] — Virtual-server extraction, address-based merging, and
//!   source-id consolidation
//! - [`vport`] — Vport transport classification and persistence-template
//!   selection
//! - [`group`] — Service-group extraction and canonical per-port naming
//! - [`server`] — Real-server extraction and address-based identity
//!   resolution
//!
//! ## Accounting
//!
//! - [`reuse`] — Independent service-group reuse accounting over the raw text
//! - [`summary`] — Post-conversion summary and reconciliation of the two
//!   group counts
//!
//! ## Reporting
//!
//! - [`findings`] — Structured warnings and errors collected during a run
//! - [`report`] — Terminal-friendly colored rendering
//!
//! ## Utilities
//!
//! - [`element`] — SLB element kinds and their line prefixes
//! - [`protocol`] — Symbolic service-name normalization
//! - [`naming`] — Canonical destination names
//! - [`limits`] — Configurable id-space scan bounds
//! - [`model`] — The exported A10 object model
//!
//! # Workflow
//!
//! [`convert::convert_config`] runs the whole pipeline over a loaded dump
//! and returns the model, a [`summary::MigrationSummary`], and the findings.

pub mod convert;
pub mod element;
pub mod findings;
pub mod group;
pub mod limits;
pub mod model;
pub mod naming;
pub mod protocol;
pub mod report;
pub mod reuse;
pub mod server;
pub mod summary;
pub mod vip;
pub mod vport;
