//! `cricket-horoscope` library crate.
//!
//! The binary (`horo`) is a thin wrapper around this library so that:
//!
//! - the fetch/rank/assemble pipeline is testable without spawning processes
//! - remote collaborators (sports feed, language model) sit behind traits
//!   that tests can replace with in-memory stubs

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod rating;
pub mod report;
pub mod tui;
