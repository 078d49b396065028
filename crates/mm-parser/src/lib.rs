//! # mm-parser
//!
//! Pure text transforms between the model API and the screen:
//! - [`response`]: split a raw answer into display text, chart markup,
//!   instrument reference and suggested actions
//! - [`markdown`]: classify display text line by line into [`markdown::Block`]s
//! - [`chart`]: chart markup cleanup, timeframe detection and toggle prompts
//! - [`prompts`]: every templated prompt the app sends on the user's behalf
//!
//! Nothing here performs I/O or fails; malformed input degrades to literal text.

pub mod chart;
pub mod markdown;
pub mod prompts;
pub mod response;

pub use chart::ChartBlock;
pub use markdown::{Block, Span, parse_blocks};
pub use response::{ParsedResponse, parse_response, suggested_actions_for};
