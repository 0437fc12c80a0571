//! Gaze Data Model
//!
//! Samples, per-file series, the multi-file corpus, CSV ingestion, and
//! polygon mask documents.

pub mod ingest;
pub mod masks;
pub mod sample;

pub use ingest::{parse_gaze_csv, ColumnMap};
pub use masks::{parse_mask_document, PolygonMask};
pub use sample::{GazeCorpus, GazeSample, GazeSeries};
