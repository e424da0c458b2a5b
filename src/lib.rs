/*!
 * # Folio - scene index builder
 *
 * A Rust library for cataloging theatrical scene documents.
 *
 * ## Features
 *
 * - Recursively scan a directory tree for JSON scene documents
 * - Group scenes by play, using an explicit id or a slug of the title
 * - Order scenes by act and scene, accepting digits and Roman numerals
 * - Order plays by title with accent- and case-aware collation
 * - Publish a single pretty-printed `index.json` atomically
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `file_utils`: Directory walking and file publishing
 * - `scene`: Scene document classification and metadata extraction
 * - `ordering`: Act/scene label ranking
 * - `collation`: Play title comparison
 * - `index`: Play grouping and the index document
 * - `app_controller`: One indexing pass from walk to publish
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod scene;
pub mod ordering;
pub mod collation;
pub mod index;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::IndexerConfig;
pub use app_controller::{Controller, IndexSummary};
pub use index::{IndexDocument, PlayGroup, aggregate};
pub use ordering::{Rank, rank_label};
pub use scene::{SceneRecord, extract};
pub use errors::{IndexError, IndexResult};
