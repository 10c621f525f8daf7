//! # Interface Module
//!
//! Everything that turns a user's command line into calls against
//! `arena`/`solver` and back into text on STDOUT: argument parsing
//! (`cli`), the `solve` subcommand's execution path (`solving`), and the
//! `info` / `list-partials` subcommands' (`informing`).
//!
//! #### Authorship
//!
//! - Max Fierro, 4/6/2023 (maxfierro@berkeley.edu)

pub mod cli;
pub mod informing;
pub mod solving;
