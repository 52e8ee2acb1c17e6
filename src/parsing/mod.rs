//! Line-level parsing building blocks.
//!
//! - [`header`] recognizes header lines and extracts their tokens
//! - [`datetime`] resolves date/time tokens into timestamps
//!
//! Both are pure functions of their input; the state machine that strings
//! them together lives in [`assembler`](crate::assembler).

pub mod datetime;
pub mod header;

pub use datetime::{DateTimeFormat, expand_two_digit_year, normalize_timestamp, resolve};
pub use header::{
    GrammarMatcher, HeaderGrammar, HeaderMatcher, HeaderTokens, REQUIRED_GROUPS, compile_grammars,
};
