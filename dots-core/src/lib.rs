//! Core library for a cursor-reactive particle field ("hero dots").
//!
//! Main components:
//! - [`particle`] — individual dots and the field that owns them.
//! - [`pointer`] — latest pointer sample and inside-region flag.
//! - [`sim`] — the per-tick attraction / idle motion step.
//! - [`config`] — tunable constants for sizing and motion.
//! - [`types`] — shared geometry types.

pub mod config;
pub mod particle;
pub mod pointer;
pub mod sim;
pub mod types;
