//! Region Analysis
//!
//! Containment of gaze samples inside user-supplied polygon masks.

pub mod containment;

pub use containment::{ContainmentAnalyzer, MaskAnalysis};
