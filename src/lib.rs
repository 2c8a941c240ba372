//! Two small authoring tools built on eframe:
//!
//! - [`hitbox`]: paint rectangular hitboxes over a 100×100 sprite and save
//!   them as a JSON list.
//! - [`grid`]: paint an n×n level grid of cell codes and export it as an
//!   array initializer.
//!
//! The model types in both modules are independent of egui so they can be
//! driven and tested without a window.

pub mod config;
pub mod dialog;
pub mod error;
pub mod grid;
pub mod hitbox;
pub mod notice;

pub use error::{Error, ParseError, Result, Severity};
