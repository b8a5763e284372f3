//! # Painter Lang
//!
//! The textual command language fed to the Painter command loop: a parser
//! that turns script lines into [`painter_core::Operation`]s, and the
//! [`Script`] payload type producers submit.

pub mod parser;
pub mod script;

pub use parser::{parse_line, ParseError, ScriptParser};
pub use script::Script;
