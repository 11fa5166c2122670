//! WebVTT subtitle parsing
//!
//! Parses caption-track files into ordered cue sequences:
//! - Header and block validation
//! - Timing line parsing (timestamps kept as written, never re-encoded)
//! - NOTE/STYLE/REGION block skipping

pub mod parser;

pub use parser::{parse_file, parse_str, Cue};
