//! Terminal presentation of conversation state.

pub mod chart;
pub mod markdown;
pub mod reply;
pub mod style;
pub mod welcome;
