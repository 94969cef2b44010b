//! Core logic for the star attractor animation.
//!
//! Main components:
//! - [`layout`] - vertex positions of an N-pointed star.
//! - [`speed`] - speed control to transition duration mapping.
//! - [`animator`] - attractor progress, target selection and interpolation.
//! - [`scheduler`] - frame scheduling seam and a queue-backed scheduler.
//! - [`frame_loop`] - the stopped/running state machine fed by frames.
//! - [`controller`] - application state and control operations.
//! - [`render`] - drawing a scene onto an immediate-mode surface.
//! - [`config`] - tunables, loadable from JSON.
//! - [`theme`] - colours and light/dark palettes.
//! - [`error`] - error type and result alias.
//! - [`types`] - shared type aliases.

pub mod animator;
pub mod config;
pub mod controller;
pub mod error;
pub mod frame_loop;
pub mod layout;
pub mod render;
pub mod scheduler;
pub mod speed;
pub mod theme;
pub mod types;

pub use error::{Result, StarError};
