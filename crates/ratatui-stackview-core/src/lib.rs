//! `ratatui-stackview-core` provides the primitives `ratatui-stackview` builds on.
//!
//! Most users should depend on the facade crate `ratatui-stackview`, which
//! re-exports everything here. Use this crate directly if you only need the
//! primitives for your own components.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - No async runtime: everything runs on the caller's thread.
//! - Backend agnostic: input events are library types; an optional
//!   `crossterm` feature provides the mapping for crossterm apps.
//!
//! Useful entry points:
//! - [`theme::Theme`]: style palette shared by cells and the container.
//! - [`viewport::ViewportState`]: vertical scroll state with clamping.
//! - [`input::InputEvent`]: key + mouse events a container consumes.
//! - [`render::render_scrollbar`] / [`render::set_line_clipped`]: drawing
//!   helpers for custom cells.
//! - [`text::wrap_plain`]: display-width-aware word wrap for text cells.

pub mod theme;

pub mod input;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod render;
pub mod text;
pub mod viewport;
