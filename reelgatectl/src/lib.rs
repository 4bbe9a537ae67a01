//! Library half of the `reelgate` command line tool.
//!
//! [`App`] wires configuration, the persisted provider registry and the
//! metadata client together; the [`commands`] modules implement each
//! subcommand against it and write human-readable (or JSON) output to any
//! [`std::io::Write`].
#![allow(missing_docs)]

pub mod app;
pub mod commands;
pub mod output;

pub use app::App;
pub use output::OutputFormat;
