//! A lightweight, smarter vertical stack for `ratatui` that works in a
//! similar fashion to a table view, adding flexibility without complexity.
//! Ideal when you just need to list a couple of heterogeneous cells but not
//! the whole package (no recycling, no sections, no diffing).
//!
//! A [`stack_view::StackView`] owns an ordered sequence of cells. You hand it
//! data models implementing [`model::StackModel`]; it resolves each model to
//! a cell type, constructs and configures the cell, and manages the sequence
//! (append/insert/remove/set). Mouse taps over a cell are forwarded to a
//! per-container callback.
//!
//! ```no_run
//! use ratatui_stackview::model::CellFactory;
//! use ratatui_stackview::model::StackModel;
//! use ratatui_stackview::stack_view::StackView;
//! # use ratatui_stackview::cell::{CellContext, StackCell, expect_model};
//! # use ratatui_stackview::theme::Theme;
//! # use ratatui::{buffer::Buffer, layout::Rect};
//!
//! struct Note {
//!     text: String,
//! }
//!
//! # #[derive(Default)]
//! # struct NoteCell { text: String }
//! # impl StackCell for NoteCell {
//! #     fn configure(&mut self, model: &dyn StackModel) {
//! #         self.text = expect_model::<Note>(model).text.clone();
//! #     }
//! #     fn height(&self, _width: u16) -> u16 { 1 }
//! #     fn render(&self, _a: Rect, _b: &mut Buffer, _t: &Theme, _c: &CellContext) {}
//! # }
//! impl StackModel for Note {
//!     fn cell_factory(&self) -> CellFactory {
//!         || Box::<NoteCell>::default()
//!     }
//! }
//!
//! let mut stack = StackView::new();
//! stack.append(&Note { text: "My content".into() });
//! stack.on_cell_tapped(|index, _cell| println!("tapped {index}"));
//! ```

pub use ratatui_stackview_core::input;
pub use ratatui_stackview_core::render;
pub use ratatui_stackview_core::text;
pub use ratatui_stackview_core::theme;
pub use ratatui_stackview_core::viewport;

#[cfg(feature = "crossterm")]
pub use ratatui_stackview_core::crossterm_input;

pub mod cell;
pub mod model;
pub mod stack_view;
