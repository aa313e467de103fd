// draftcheck: overlap and style-drift detection for submitted documents.
//
// This is the library root. The core is text, similarity, style and report;
// everything else is the I/O around it (corpus files, result log, model
// files, terminal and HTTP boundaries).

pub mod config;
pub mod corpus;
pub mod db;
pub mod error;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod similarity;
pub mod status;
pub mod style;
pub mod text;

#[cfg(feature = "web")]
pub mod web;

pub use error::CheckError;
