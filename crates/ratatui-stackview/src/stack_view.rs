use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui_stackview_core::input::InputEvent;
use ratatui_stackview_core::input::KeyCode;
use ratatui_stackview_core::input::KeyEvent;
use ratatui_stackview_core::input::MouseButton;
use ratatui_stackview_core::input::MouseEvent;
use ratatui_stackview_core::input::MouseEventKind;
use ratatui_stackview_core::render;
use ratatui_stackview_core::theme::Theme;
use ratatui_stackview_core::viewport::ViewportState;

use crate::cell::CellContext;
use crate::cell::StackCell;
use crate::model::AsAny;
use crate::model::CellFactory;
use crate::model::StackModel;

/// Callback for tapped cells, one per container.
pub type TapCallback = Box<dyn FnMut(usize, &mut dyn StackCell)>;

#[derive(Clone, Debug)]
pub struct StackViewOptions {
    /// Whether taps are forwarded to the container callback automatically or
    /// handled on a per-cell basis by the developer. Defaults to true.
    pub handle_taps: bool,
    /// Blank rows between adjacent cells.
    pub spacing: u16,
    pub show_scrollbar: bool,
    pub style: Style,
    pub scrollbar_style: Style,
}

impl Default for StackViewOptions {
    fn default() -> Self {
        Self {
            handle_taps: true,
            spacing: 0,
            show_scrollbar: true,
            style: Style::default(),
            scrollbar_style: Style::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackViewAction {
    None,
    Redraw,
    /// A tap landed on the cell at this index and was forwarded.
    CellTapped(usize),
}

/// An ordered stack of cells resolved from data models.
///
/// Cells are created one per model at mutation time and owned exclusively by
/// the container until removed. Sequence order is visual order is index
/// order for every query and removal operation.
#[derive(Default)]
pub struct StackView {
    cells: Vec<Box<dyn StackCell>>,
    options: StackViewOptions,
    on_tap: Option<TapCallback>,
    pub state: ViewportState,
    heights: Vec<u16>,
    offsets: Vec<u32>, // len = cells.len() + 1
    cached_width: Option<u16>,
    layout_dirty: bool,
    last_area: Option<Rect>,
}

impl StackView {
    pub fn new() -> Self {
        Self::with_options(StackViewOptions::default())
    }

    pub fn with_options(options: StackViewOptions) -> Self {
        let mut v = Self::default();
        v.options = options;
        v.layout_dirty = true;
        v
    }

    pub fn options(&self) -> &StackViewOptions {
        &self.options
    }

    /// Sets the callback invoked with tapped cells when `handle_taps` is on.
    pub fn on_cell_tapped(&mut self, callback: impl FnMut(usize, &mut dyn StackCell) + 'static) {
        self.on_tap = Some(Box::new(callback));
    }
}

impl StackView {
    /// Appends a cell resolved from its model.
    pub fn append(&mut self, model: &dyn StackModel) {
        self.append_models(&[model], None);
    }

    /// Appends a cell for `model`, overriding cell matching with the
    /// supplied factory. The factory's cell must recognize the model's shape.
    pub fn append_as(&mut self, model: &dyn StackModel, cell: CellFactory) {
        self.append_models(&[model], Some(cell));
    }

    /// Appends one cell per model, in order.
    pub fn append_all(&mut self, models: &[&dyn StackModel]) {
        self.append_models(models, None);
    }

    /// Appends one cell per model, all constructed from the supplied factory.
    pub fn append_all_as(&mut self, models: &[&dyn StackModel], cell: CellFactory) {
        self.append_models(models, Some(cell));
    }

    /// Replaces every existing cell with one resolved from `model`.
    pub fn set(&mut self, model: &dyn StackModel) {
        self.clear();
        self.append_models(&[model], None);
    }

    pub fn set_as(&mut self, model: &dyn StackModel, cell: CellFactory) {
        self.clear();
        self.append_models(&[model], Some(cell));
    }

    /// Replaces every existing cell with cells for `models`. Not
    /// transactional: a panicking `configure` mid-batch leaves the cells
    /// appended so far in place.
    pub fn set_all(&mut self, models: &[&dyn StackModel]) {
        self.clear();
        self.append_models(models, None);
    }

    pub fn set_all_as(&mut self, models: &[&dyn StackModel], cell: CellFactory) {
        self.clear();
        self.append_models(models, Some(cell));
    }

    /// Inserts a cell for `model` at `position`, shifting later cells down.
    ///
    /// The position is clamped: negative values land at the front; values
    /// past the end land BEFORE the current last cell, not after it. Use
    /// [`append`](Self::append) to add at the tail.
    pub fn insert(&mut self, model: &dyn StackModel, position: isize) {
        self.insert_models(&[model], position, None);
    }

    pub fn insert_as(&mut self, model: &dyn StackModel, position: isize, cell: CellFactory) {
        self.insert_models(&[model], position, Some(cell));
    }

    /// Inserts cells at consecutive positions starting at `position`, which
    /// is clamped exactly like [`insert`](Self::insert).
    pub fn insert_all(&mut self, models: &[&dyn StackModel], position: isize) {
        self.insert_models(models, position, None);
    }

    pub fn insert_all_as(
        &mut self,
        models: &[&dyn StackModel],
        position: isize,
        cell: CellFactory,
    ) {
        self.insert_models(models, position, Some(cell));
    }

    /// Removes the cell at `position`, if any.
    pub fn remove(&mut self, position: usize) {
        self.remove_at(&[position]);
    }

    /// Removes every cell whose index is in `positions`; the rest shift to
    /// close the gaps. Out-of-range indexes are ignored.
    pub fn remove_at(&mut self, positions: &[usize]) {
        let mut doomed: Vec<usize> = positions
            .iter()
            .copied()
            .filter(|&i| i < self.cells.len())
            .collect();
        doomed.sort_unstable();
        doomed.dedup();
        for &i in doomed.iter().rev() {
            self.cells.remove(i);
        }
        self.invalidate_layout();
    }

    /// Removes all cells.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.invalidate_layout();
        self.state.to_top();
    }

    fn append_models(&mut self, models: &[&dyn StackModel], cell: Option<CellFactory>) {
        for model in models {
            let cell = make_cell(*model, cell);
            self.cells.push(cell);
        }
        self.invalidate_layout();
    }

    fn insert_models(
        &mut self,
        models: &[&dyn StackModel],
        position: isize,
        cell: Option<CellFactory>,
    ) {
        let start = self.clamp_insert_position(position);
        for (i, model) in models.iter().enumerate() {
            let cell = make_cell(*model, cell);
            self.cells.insert(start + i, cell);
        }
        self.invalidate_layout();
    }

    fn clamp_insert_position(&self, position: isize) -> usize {
        let max = self.cells.len().saturating_sub(1) as isize;
        position.clamp(0, max) as usize
    }
}

impl StackView {
    /// All cells, in order.
    pub fn cells(&self) -> &[Box<dyn StackCell>] {
        &self.cells
    }

    /// All cells of concrete type `T`, order preserved; other cells are
    /// silently skipped.
    pub fn cells_of<T: StackCell + 'static>(&self) -> Vec<&T> {
        self.cells
            .iter()
            .filter_map(|c| c.as_any().downcast_ref::<T>())
            .collect()
    }

    /// The cell at `position`, or `None` when out of range.
    pub fn cell(&self, position: usize) -> Option<&dyn StackCell> {
        self.cells.get(position).map(|c| c.as_ref())
    }

    pub fn cell_mut(&mut self, position: usize) -> Option<&mut (dyn StackCell + 'static)> {
        self.cells.get_mut(position).map(|c| c.as_mut())
    }

    /// The cells at `positions`; out-of-range indexes are dropped.
    pub fn cells_at(&self, positions: &[usize]) -> Vec<&dyn StackCell> {
        positions.iter().filter_map(|&i| self.cell(i)).collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl StackView {
    pub fn handle_event(&mut self, event: InputEvent) -> StackViewAction {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let (content_area, scrollbar_x) = if self.options.show_scrollbar && area.width >= 2 {
            (
                Rect::new(area.x, area.y, area.width - 1, area.height),
                Some(area.x + area.width - 1),
            )
        } else {
            (area, None)
        };

        self.ensure_layout(content_area.width);
        self.state
            .set_viewport(content_area.width, content_area.height);
        self.last_area = Some(content_area);

        let base_style = if self.options.style == Style::default() {
            theme.text_primary
        } else {
            self.options.style
        };
        buf.set_style(content_area, base_style);

        let top = self.state.y;
        let bottom = top.saturating_add(content_area.height as u32);
        for idx in 0..self.cells.len() {
            let start = self.offsets[idx];
            let end = start.saturating_add(self.heights[idx] as u32);
            if end <= top {
                continue;
            }
            if start >= bottom {
                break;
            }

            let clip_top = top.saturating_sub(start) as u16;
            let first_row = start.saturating_sub(top) as u16;
            let visible_h = (end.min(bottom) - start.max(top)) as u16;
            if visible_h == 0 {
                continue;
            }

            let cell_area = Rect::new(
                content_area.x,
                content_area.y + first_row,
                content_area.width,
                visible_h,
            );
            let ctx = CellContext {
                index: idx,
                clip_top,
            };
            self.cells[idx].render(cell_area, buf, theme, &ctx);
        }

        if let Some(sb_x) = scrollbar_x {
            let style = if self.options.scrollbar_style == Style::default() {
                theme.text_muted
            } else {
                self.options.scrollbar_style
            };
            render::render_scrollbar(Rect::new(sb_x, area.y, 1, area.height), buf, &self.state, style);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> StackViewAction {
        if key.modifiers.ctrl {
            let page = self.state.viewport_h.saturating_sub(1) as i32;
            return match key.code {
                KeyCode::Char('d') => {
                    self.state.scroll_by(page);
                    StackViewAction::Redraw
                }
                KeyCode::Char('u') => {
                    self.state.scroll_by(-page);
                    StackViewAction::Redraw
                }
                _ => StackViewAction::None,
            };
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.scroll_by(1);
                StackViewAction::Redraw
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.scroll_by(-1);
                StackViewAction::Redraw
            }
            KeyCode::PageDown => {
                self.state.page_down();
                StackViewAction::Redraw
            }
            KeyCode::PageUp => {
                self.state.page_up();
                StackViewAction::Redraw
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.state.to_top();
                StackViewAction::Redraw
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.state.to_bottom();
                StackViewAction::Redraw
            }
            _ => StackViewAction::None,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> StackViewAction {
        let Some(area) = self.last_area else {
            return StackViewAction::None;
        };
        if !area.contains(Position::new(mouse.x, mouse.y)) {
            return StackViewAction::None;
        }

        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.state.scroll_by(3);
                StackViewAction::Redraw
            }
            MouseEventKind::ScrollUp => {
                self.state.scroll_by(-3);
                StackViewAction::Redraw
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.ensure_layout(area.width);
                let row = self.state.y.saturating_add((mouse.y - area.y) as u32);
                match self.locate(row) {
                    Some(index) => self.tap(index),
                    None => StackViewAction::None,
                }
            }
            _ => StackViewAction::None,
        }
    }

    fn tap(&mut self, index: usize) -> StackViewAction {
        self.cells[index].on_tap();
        if !self.options.handle_taps {
            return StackViewAction::Redraw;
        }
        if let Some(callback) = self.on_tap.as_mut() {
            callback(index, self.cells[index].as_mut());
        }
        StackViewAction::CellTapped(index)
    }

    fn invalidate_layout(&mut self) {
        self.layout_dirty = true;
    }

    fn ensure_layout(&mut self, width: u16) {
        if !self.layout_dirty && self.cached_width == Some(width) {
            return;
        }
        self.cached_width = Some(width);
        self.layout_dirty = false;

        self.heights.clear();
        self.offsets.clear();
        let mut cur: u32 = 0;
        self.offsets.push(cur);
        for (i, cell) in self.cells.iter().enumerate() {
            let h = cell.height(width);
            self.heights.push(h);
            cur = cur.saturating_add(h as u32);
            if i + 1 < self.cells.len() {
                cur = cur.saturating_add(self.options.spacing as u32);
            }
            self.offsets.push(cur);
        }
        self.state.set_content(cur);
    }

    /// Maps a content row to the index of the cell covering it. Spacing rows
    /// and rows past the last cell resolve to nothing.
    fn locate(&self, row: u32) -> Option<usize> {
        if self.cells.is_empty() || row >= self.total_rows() {
            return None;
        }
        let idx = self
            .offsets
            .partition_point(|&o| o <= row)
            .saturating_sub(1)
            .min(self.cells.len() - 1);
        let start = self.offsets[idx];
        let height = self.heights[idx] as u32;
        if row >= start && row < start.saturating_add(height) {
            Some(idx)
        } else {
            None
        }
    }

    fn total_rows(&self) -> u32 {
        self.offsets.last().copied().unwrap_or(0)
    }
}

fn make_cell(model: &dyn StackModel, cell: Option<CellFactory>) -> Box<dyn StackCell> {
    let factory = cell.unwrap_or_else(|| model.cell_factory());
    let mut cell = factory();
    cell.configure(model);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::expect_model;
    use ratatui_stackview_core::input::KeyModifiers;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Label {
        text: &'static str,
    }

    impl StackModel for Label {
        fn cell_factory(&self) -> CellFactory {
            || Box::<LabelCell>::default()
        }
    }

    #[derive(Default)]
    struct LabelCell {
        text: String,
        taps: usize,
    }

    impl StackCell for LabelCell {
        fn configure(&mut self, model: &dyn StackModel) {
            self.text = expect_model::<Label>(model).text.to_string();
        }

        fn height(&self, _width: u16) -> u16 {
            1
        }

        fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme, _ctx: &CellContext) {
            buf.set_stringn(
                area.x,
                area.y,
                &self.text,
                area.width as usize,
                theme.text_primary,
            );
        }

        fn on_tap(&mut self) {
            self.taps += 1;
        }
    }

    struct Badge {
        text: &'static str,
    }

    impl StackModel for Badge {
        fn cell_factory(&self) -> CellFactory {
            || Box::<BadgeCell>::default()
        }
    }

    // Renders both its own model and Label, so it works as an override
    // target for Label models.
    #[derive(Default)]
    struct BadgeCell {
        text: String,
    }

    impl StackCell for BadgeCell {
        fn configure(&mut self, model: &dyn StackModel) {
            if let Some(badge) = model.as_any().downcast_ref::<Badge>() {
                self.text = badge.text.to_string();
            } else {
                self.text = expect_model::<Label>(model).text.to_string();
            }
        }

        fn height(&self, _width: u16) -> u16 {
            2
        }

        fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme, _ctx: &CellContext) {
            buf.set_stringn(area.x, area.y, &self.text, area.width as usize, theme.accent);
        }
    }

    fn label_texts(stack: &StackView) -> Vec<String> {
        stack
            .cells()
            .iter()
            .filter_map(|c| c.as_any().downcast_ref::<LabelCell>())
            .map(|c| c.text.clone())
            .collect()
    }

    fn no_scrollbar() -> StackViewOptions {
        StackViewOptions {
            show_scrollbar: false,
            ..Default::default()
        }
    }

    fn rendered(stack: &mut StackView, w: u16, h: u16) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, w, h));
        stack.render(Rect::new(0, 0, w, h), &mut buf, &Theme::default());
        buf
    }

    fn left_click(x: u16, y: u16) -> InputEvent {
        InputEvent::Mouse(MouseEvent {
            x,
            y,
            kind: MouseEventKind::Down(MouseButton::Left),
            modifiers: KeyModifiers::none(),
        })
    }

    #[test]
    fn append_preserves_order() {
        let mut stack = StackView::new();
        stack.append(&Label { text: "a" });
        stack.append_all(&[&Label { text: "b" }, &Label { text: "c" }]);
        assert_eq!(stack.len(), 3);
        assert_eq!(label_texts(&stack), ["a", "b", "c"]);
    }

    #[test]
    fn set_replaces_all_cells() {
        let mut stack = StackView::new();
        stack.append_all(&[&Label { text: "old1" }, &Label { text: "old2" }]);
        stack.set_all(&[&Label { text: "new" }]);
        assert_eq!(label_texts(&stack), ["new"]);

        stack.set(&Label { text: "newer" });
        assert_eq!(label_texts(&stack), ["newer"]);
    }

    #[test]
    fn insert_clamps_negative_to_front() {
        let mut stack = StackView::new();
        stack.append_all(&[&Label { text: "a" }, &Label { text: "b" }]);
        stack.insert(&Label { text: "x" }, -5);
        assert_eq!(label_texts(&stack), ["x", "a", "b"]);
    }

    #[test]
    fn insert_past_end_lands_before_last_cell() {
        let mut stack = StackView::new();
        stack.append_all(&[
            &Label { text: "a" },
            &Label { text: "b" },
            &Label { text: "c" },
        ]);
        stack.insert(&Label { text: "x" }, 9);
        assert_eq!(label_texts(&stack), ["a", "b", "x", "c"]);
    }

    #[test]
    fn insert_into_empty_stack() {
        let mut stack = StackView::new();
        stack.insert(&Label { text: "only" }, 7);
        assert_eq!(label_texts(&stack), ["only"]);
    }

    #[test]
    fn insert_single_equals_batch_of_one() {
        let mut a = StackView::new();
        let mut b = StackView::new();
        for s in [&mut a, &mut b] {
            s.append_all(&[&Label { text: "1" }, &Label { text: "2" }]);
        }
        a.insert(&Label { text: "x" }, 5);
        b.insert_all(&[&Label { text: "x" }], 5);
        assert_eq!(label_texts(&a), label_texts(&b));
    }

    #[test]
    fn insert_batch_is_consecutive() {
        let mut stack = StackView::new();
        stack.append_all(&[
            &Label { text: "a" },
            &Label { text: "b" },
            &Label { text: "c" },
        ]);
        stack.insert_all(&[&Label { text: "x" }, &Label { text: "y" }], 1);
        assert_eq!(label_texts(&stack), ["a", "x", "y", "b", "c"]);
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut stack = StackView::new();
        stack.append_all(&[
            &Label { text: "a" },
            &Label { text: "b" },
            &Label { text: "c" },
        ]);
        stack.remove_at(&[0, 2]);
        assert_eq!(label_texts(&stack), ["b"]);
    }

    #[test]
    fn remove_single_shrinks_by_one() {
        let mut stack = StackView::new();
        stack.append_all(&[
            &Label { text: "a" },
            &Label { text: "b" },
            &Label { text: "c" },
        ]);
        stack.remove(1);
        assert_eq!(label_texts(&stack), ["a", "c"]);
    }

    #[test]
    fn remove_ignores_out_of_range_and_duplicates() {
        let mut stack = StackView::new();
        stack.append_all(&[&Label { text: "a" }, &Label { text: "b" }]);
        stack.remove_at(&[1, 1, 17]);
        assert_eq!(label_texts(&stack), ["a"]);
        stack.remove_at(&[99]);
        assert_eq!(label_texts(&stack), ["a"]);
    }

    #[test]
    fn clear_empties_the_stack() {
        let mut stack = StackView::new();
        stack.append_all(&[&Label { text: "a" }, &Label { text: "b" }]);
        stack.clear();
        assert!(stack.is_empty());
        assert!(stack.cells().is_empty());
    }

    #[test]
    fn cell_bounds_are_checked() {
        let mut stack = StackView::new();
        assert!(stack.cell(0).is_none());
        stack.append_all(&[&Label { text: "a" }, &Label { text: "b" }]);
        assert!(stack.cell(1).is_some());
        assert!(stack.cell(2).is_none());
        assert!(stack.cell_mut(2).is_none());
    }

    #[test]
    fn cells_at_drops_out_of_range() {
        let mut stack = StackView::new();
        stack.append_all(&[
            &Label { text: "a" },
            &Label { text: "b" },
            &Label { text: "c" },
        ]);
        let picked = stack.cells_at(&[0, 2, 9]);
        assert_eq!(picked.len(), 2);
        let texts: Vec<_> = picked
            .iter()
            .map(|c| {
                c.as_any()
                    .downcast_ref::<LabelCell>()
                    .unwrap()
                    .text
                    .clone()
            })
            .collect();
        assert_eq!(texts, ["a", "c"]);
    }

    #[test]
    fn cells_of_filters_by_concrete_type() {
        let mut stack = StackView::new();
        stack.append(&Label { text: "l1" });
        stack.append(&Badge { text: "b1" });
        stack.append(&Label { text: "l2" });
        let labels = stack.cells_of::<LabelCell>();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].text, "l1");
        assert_eq!(labels[1].text, "l2");
        assert_eq!(stack.cells_of::<BadgeCell>().len(), 1);
    }

    #[test]
    fn override_factory_wins_over_model_matching() {
        let mut stack = StackView::new();
        stack.append_as(&Label { text: "styled" }, || Box::<BadgeCell>::default());
        assert!(stack.cells_of::<LabelCell>().is_empty());
        let badges = stack.cells_of::<BadgeCell>();
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].text, "styled");
    }

    #[test]
    #[should_panic(expected = "cell cannot render the supplied model")]
    fn configure_panics_on_unrecognized_model() {
        let mut stack = StackView::new();
        stack.append_as(&Badge { text: "boom" }, || Box::<LabelCell>::default());
    }

    #[test]
    fn tap_forwards_to_callback() {
        let mut stack = StackView::with_options(no_scrollbar());
        stack.append_all(&[
            &Label { text: "a" },
            &Label { text: "b" },
            &Label { text: "c" },
        ]);
        let tapped = Rc::new(RefCell::new(Vec::new()));
        let sink = tapped.clone();
        stack.on_cell_tapped(move |index, _cell| sink.borrow_mut().push(index));

        let _ = rendered(&mut stack, 10, 5);
        let action = stack.handle_event(left_click(3, 1));
        assert_eq!(action, StackViewAction::CellTapped(1));
        assert_eq!(*tapped.borrow(), vec![1]);
        assert_eq!(stack.cells_of::<LabelCell>()[1].taps, 1);
    }

    #[test]
    fn tap_is_observed_but_not_forwarded_when_disabled() {
        let mut stack = StackView::with_options(StackViewOptions {
            handle_taps: false,
            show_scrollbar: false,
            ..Default::default()
        });
        stack.append(&Label { text: "a" });
        let called = Rc::new(RefCell::new(false));
        let sink = called.clone();
        stack.on_cell_tapped(move |_, _| *sink.borrow_mut() = true);

        let _ = rendered(&mut stack, 10, 5);
        let action = stack.handle_event(left_click(0, 0));
        assert_eq!(action, StackViewAction::Redraw);
        assert!(!*called.borrow());
        assert_eq!(stack.cells_of::<LabelCell>()[0].taps, 1);
    }

    #[test]
    fn tap_on_spacing_row_resolves_to_no_cell() {
        let mut stack = StackView::with_options(StackViewOptions {
            spacing: 1,
            show_scrollbar: false,
            ..Default::default()
        });
        stack.append_all(&[&Label { text: "a" }, &Label { text: "b" }]);

        let _ = rendered(&mut stack, 10, 5);
        assert_eq!(stack.handle_event(left_click(0, 1)), StackViewAction::None);
        assert_eq!(
            stack.handle_event(left_click(0, 2)),
            StackViewAction::CellTapped(1)
        );
    }

    #[test]
    fn tap_accounts_for_scroll_offset() {
        let mut stack = StackView::with_options(no_scrollbar());
        for _ in 0..10 {
            stack.append(&Label { text: "row" });
        }
        let _ = rendered(&mut stack, 10, 4);
        stack.state.scroll_by(5);
        let action = stack.handle_event(left_click(0, 2));
        assert_eq!(action, StackViewAction::CellTapped(7));
    }

    #[test]
    fn tap_outside_rendered_area_is_ignored() {
        let mut stack = StackView::with_options(no_scrollbar());
        stack.append(&Label { text: "a" });
        let _ = rendered(&mut stack, 10, 5);
        assert_eq!(stack.handle_event(left_click(11, 0)), StackViewAction::None);
    }

    #[test]
    fn tap_before_first_render_is_ignored() {
        let mut stack = StackView::new();
        stack.append(&Label { text: "a" });
        assert_eq!(stack.handle_event(left_click(0, 0)), StackViewAction::None);
    }

    #[test]
    fn tap_past_last_cell_is_ignored() {
        let mut stack = StackView::with_options(no_scrollbar());
        stack.append(&Label { text: "a" });
        let _ = rendered(&mut stack, 10, 5);
        assert_eq!(stack.handle_event(left_click(0, 3)), StackViewAction::None);
    }

    #[test]
    fn keys_scroll_the_viewport() {
        let mut stack = StackView::with_options(no_scrollbar());
        for _ in 0..20 {
            stack.append(&Label { text: "row" });
        }
        let _ = rendered(&mut stack, 10, 5);

        let action = stack.handle_event(InputEvent::Key(KeyEvent::new(KeyCode::Down)));
        assert_eq!(action, StackViewAction::Redraw);
        assert_eq!(stack.state.y, 1);

        stack.handle_event(InputEvent::Key(KeyEvent::new(KeyCode::End)));
        assert_eq!(stack.state.y, 15);

        stack.handle_event(InputEvent::Key(KeyEvent::new(KeyCode::Home)));
        assert_eq!(stack.state.y, 0);

        let ctrl_d = KeyEvent::new(KeyCode::Char('d')).with_modifiers(KeyModifiers {
            shift: false,
            ctrl: true,
            alt: false,
        });
        stack.handle_event(InputEvent::Key(ctrl_d));
        assert_eq!(stack.state.y, 4);
    }

    #[test]
    fn wheel_scrolls_three_rows() {
        let mut stack = StackView::with_options(no_scrollbar());
        for _ in 0..20 {
            stack.append(&Label { text: "row" });
        }
        let _ = rendered(&mut stack, 10, 5);
        let wheel = InputEvent::Mouse(MouseEvent {
            x: 0,
            y: 0,
            kind: MouseEventKind::ScrollDown,
            modifiers: KeyModifiers::none(),
        });
        assert_eq!(stack.handle_event(wheel), StackViewAction::Redraw);
        assert_eq!(stack.state.y, 3);
    }

    #[test]
    fn layout_accounts_for_mixed_heights_and_spacing() {
        let mut stack = StackView::with_options(StackViewOptions {
            spacing: 1,
            show_scrollbar: false,
            ..Default::default()
        });
        stack.append(&Label { text: "one" }); // 1 row
        stack.append(&Badge { text: "two" }); // 2 rows
        stack.append(&Label { text: "three" }); // 1 row
        let _ = rendered(&mut stack, 10, 10);
        // rows: 0 label, 1 space, 2-3 badge, 4 space, 5 label
        assert_eq!(stack.state.content_h, 6);
        assert_eq!(
            stack.handle_event(left_click(0, 3)),
            StackViewAction::CellTapped(1)
        );
        assert_eq!(
            stack.handle_event(left_click(0, 5)),
            StackViewAction::CellTapped(2)
        );
    }
}
