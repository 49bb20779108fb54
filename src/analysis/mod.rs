// Analysis domain: result shapes, reply parsing, and session state.

pub mod parse;
pub mod session;
pub mod types;
