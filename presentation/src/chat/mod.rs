//! Interactive chat module
//!
//! Provides a line-editor chat interface for the product assistant.

mod repl;

pub use repl::ChatRepl;
