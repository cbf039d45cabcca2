//! Practices - command-line host for the practice graph engine.
//!
//! The binary (`practices`) loads a practice dataset, builds a
//! [`practice_graph::Graph`] from it, and renders the engine's views as text
//! or JSON. This library half exposes the pieces so they can be tested and
//! reused:
//!
//! - [`config`]: YAML configuration (`practices.yaml`)
//! - [`source`]: where practice records and adoption state come from
//! - [`app`]: the loaded graph plus adoption snapshot for one run
//! - [`cli`]: argument parsing and command dispatch
//! - [`output`]: text and JSON rendering

#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod source;
