//! Bundle construction.
//!
//! This module holds the pieces that turn a notebook directory into a
//! deployable archive, and the two flows that compose them.
//!
//! # Overview
//!
//! A source bundle is built by:
//! 1. Building a source [`Manifest`](crate::bundler::Manifest) from the
//!    [`Environment`](crate::Environment)
//! 2. Checksumming the notebook, the dependency file and any extras
//! 3. Writing the manifest, dependency file, notebook and extras into a [`BundleArchive`]
//! 4. Returning the rewound archive file
//!
//! A static HTML bundle renders the notebook through an injected exporter
//! and packages the output with a `static` manifest.
//!
//! # Module Organization
//!
//! - [`checksum`] - MD5 checksums of files and buffers
//! - [`archive`] - Deterministic gzip+tar assembly
//! - [`orchestrator`] - Source bundles and standalone manifest output
//! - [`html`] - Static HTML bundles

pub mod archive;
pub mod checksum;
mod html;
mod orchestrator;

pub use archive::BundleArchive;
pub use html::{format_modified_date, make_html_bundle};
pub use orchestrator::{ManifestWriteReport, make_source_bundle, write_manifest};
