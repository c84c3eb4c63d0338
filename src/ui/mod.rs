//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready state for one frame
//! - [`renderer`]: top-level rendering entry point
//! - [`components`]: per-widget renderers
//! - [`helpers`]: cursor positioning, truncation, wrapping and highlighting
//! - [`theme`]: color schemes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{Body, FeedView, SettingsView, UIViewModel};
