use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_stackview::cell::CellContext;
use ratatui_stackview::cell::StackCell;
use ratatui_stackview::cell::expect_model;
use ratatui_stackview::crossterm_input::input_event_from_crossterm;
use ratatui_stackview::input::InputEvent;
use ratatui_stackview::input::KeyCode;
use ratatui_stackview::model::AsAny;
use ratatui_stackview::model::CellFactory;
use ratatui_stackview::model::StackModel;
use ratatui_stackview::render::set_line_clipped;
use ratatui_stackview::stack_view::StackView;
use ratatui_stackview::stack_view::StackViewOptions;
use ratatui_stackview::theme::Theme;
use std::cell::Cell as StdCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

struct Note {
    text: &'static str,
}

impl StackModel for Note {
    fn cell_factory(&self) -> CellFactory {
        || Box::<NoteCell>::default()
    }
}

#[derive(Default)]
struct NoteCell {
    text: String,
    taps: usize,
}

impl StackCell for NoteCell {
    fn configure(&mut self, model: &dyn StackModel) {
        self.text = expect_model::<Note>(model).text.to_string();
    }

    fn height(&self, _width: u16) -> u16 {
        1
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme, _ctx: &CellContext) {
        let line = if self.taps > 0 {
            format!("· {} (tapped {}x)", self.text, self.taps)
        } else {
            format!("· {}", self.text)
        };
        set_line_clipped(area.x, area.y, area.width, buf, &line, theme.text_primary);
    }

    fn on_tap(&mut self) {
        self.taps += 1;
    }
}

struct Banner {
    text: &'static str,
}

impl StackModel for Banner {
    fn cell_factory(&self) -> CellFactory {
        || Box::<BannerCell>::default()
    }
}

/// Accepts its own model and `Note`, so it can be used as a cell-type
/// override for notes that should stand out.
#[derive(Default)]
struct BannerCell {
    text: String,
}

impl StackCell for BannerCell {
    fn configure(&mut self, model: &dyn StackModel) {
        if let Some(banner) = model.as_any().downcast_ref::<Banner>() {
            self.text = banner.text.to_string();
        } else {
            self.text = expect_model::<Note>(model).text.to_string();
        }
    }

    fn height(&self, _width: u16) -> u16 {
        2
    }

    fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme, ctx: &CellContext) {
        let rows = [format!("▌ {}", self.text), "▌".to_string()];
        for (row, line) in rows
            .iter()
            .skip(ctx.clip_top as usize)
            .take(area.height as usize)
            .enumerate()
        {
            set_line_clipped(area.x, area.y + row as u16, area.width, buf, line, theme.accent);
        }
    }
}

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::default();
    let mut stack = StackView::with_options(StackViewOptions {
        spacing: 1,
        ..Default::default()
    });

    // Append a single model.
    stack.append(&Note { text: "My content" });

    // Append models as a batch.
    stack.append_all(&[
        &Note { text: "More content" },
        &Banner { text: "A banner between notes" },
        &Note { text: "Even more content" },
    ]);

    // Append a note, but rendered by the banner cell. BannerCell recognizes
    // the Note shape, so this is a supported override.
    stack.append_as(&Note { text: "Overridden content" }, || {
        Box::<BannerCell>::default()
    });

    // Check taps.
    let last_tapped = Rc::new(StdCell::new(None::<usize>));
    let sink = last_tapped.clone();
    stack.on_cell_tapped(move |index, _cell| sink.set(Some(index)));

    let res = run(&mut terminal, &theme, &mut stack, &last_tapped);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend<Error = io::Error>>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    stack: &mut StackView,
    last_tapped: &Rc<StdCell<Option<usize>>>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| {
            let area = f.area();
            let [main, status] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .areas(area);

            let block = Block::default()
                .title("StackView (click cells, j/k scroll, q quits)")
                .borders(Borders::ALL);
            let inner = block.inner(main);
            f.render_widget(block, main);

            let buf = f.buffer_mut();
            stack.render(inner, buf, theme);

            let tapped = match last_tapped.get() {
                Some(index) => format!("last tap: cell #{index}"),
                None => "last tap: none".to_string(),
            };
            let pct = stack
                .state
                .percent()
                .map(|p| format!("  scroll={p}%"))
                .unwrap_or_default();
            let status_span = Span::styled(format!("{tapped}{pct}"), Style::default());
            buf.set_span(status.x, status.y, &status_span, status.width);
        })?;

        if crossterm::event::poll(Duration::from_millis(50))? {
            let ev = crossterm::event::read()?;
            let Some(ev) = input_event_from_crossterm(ev) else {
                continue;
            };
            if let InputEvent::Key(key) = &ev
                && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
            {
                return Ok(());
            }

            let _ = stack.handle_event(ev);
        }
    }
}
