//! Session controller for the contacts console.
//!
//! This crate turns console input into operations on an explicit `Session`
//! and reports results. It depends only on the `PersonRepository` seam, so any
//! store from the infrastructure layer can sit behind it.

pub mod command;
pub mod console;
pub mod input;
pub mod session;

pub use command::Command;
pub use console::Console;
pub use input::{Input, LineSource, ScriptedInput};
pub use session::{SearchResult, Session};
