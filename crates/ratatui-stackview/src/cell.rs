use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_stackview_core::theme::Theme;

use crate::model::AsAny;
use crate::model::StackModel;

/// Per-render context handed to a cell.
#[derive(Clone, Copy, Debug)]
pub struct CellContext {
    /// Position of the cell in the stack at render time.
    pub index: usize,
    /// Rows scrolled off the top of this cell; the render area covers the
    /// remaining rows only.
    pub clip_top: u16,
}

/// A view populating one slot of a [`StackView`](crate::stack_view::StackView).
///
/// A cell renders exactly one model. `configure` is called once, right after
/// construction; the cell must recognize the model's shape (see
/// [`expect_model`]) or panic, which signals a wiring mistake rather than a
/// runtime condition.
pub trait StackCell: AsAny {
    /// Receives the model this cell was created for. Snapshot what you need;
    /// the model is gone after this call.
    fn configure(&mut self, model: &dyn StackModel);

    /// Number of rows the cell occupies at the given width.
    fn height(&self, width: u16) -> u16;

    /// Draws the visible part of the cell. When scrolled partially out of
    /// view, `ctx.clip_top` rows at the top are hidden and `area` covers the
    /// rest.
    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme, ctx: &CellContext);

    /// Invoked on every tap over this cell, whether or not the owning
    /// container forwards taps to its callback. Override for per-cell
    /// custom handling.
    fn on_tap(&mut self) {}
}

/// Downcasts a model inside [`StackCell::configure`].
///
/// Panics when the model is not an `M`: a cell asked to render a shape it
/// does not recognize is a programmer error and unrecoverable by contract.
pub fn expect_model<M: StackModel + 'static>(model: &dyn StackModel) -> &M {
    match model.as_any().downcast_ref::<M>() {
        Some(m) => m,
        None => panic!(
            "cell cannot render the supplied model (expected {})",
            std::any::type_name::<M>()
        ),
    }
}
