//! Forgiving token scanner for JSON-like configuration text.
//!
//! The scanner only reports structure; it does not build a document tree.
//! Extraction logic lives in [`crate::extract`].

mod scanner;
mod token;

pub use scanner::{scan, Scanner};
pub use token::{Literal, Token};
