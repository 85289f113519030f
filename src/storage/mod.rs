//! Storage module for persisting raw page content
//!
//! This module handles everything that touches the save directory:
//! - Classifying links as text, PDF, or spreadsheet
//! - Deriving a deterministic, content-addressed file name per (root, link)
//! - Writing text pages with a provenance header and PDFs as raw bytes

mod naming;
mod persister;

pub use naming::{output_file_name, sanitize_root, ContentKind, FileType};
pub use persister::ContentPersister;
