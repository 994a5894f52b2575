use crate::render::render_result;
use crate::state::ViewState;
use crate::tui::pane::{Pane, Screen, create_block};
use crate::tui::scrollable::ScrollablePane;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};

const MIN_RESULTS_PANE_HEIGHT: u16 = 5;

/// RESULTS pane shows the last successful scan
pub struct ResultsPane {
    title: &'static str,
    scroll_offset: u16,
    wrap_width: u16,
}

impl ResultsPane {
    pub fn new() -> Self {
        Self {
            title: "results",
            scroll_offset: 0,
            wrap_width: 0,
        }
    }

    /// Inner width lines are wrapped at; 0 leaves them unwrapped
    pub fn set_wrap_width(&mut self, width: u16) {
        self.wrap_width = width;
    }

    fn content_lines(&self, view: &ViewState) -> Vec<Line<'static>> {
        let lines = match view.outcome() {
            Some(outcome) => render_result(outcome, view.toggles()),
            None => vec![Line::from(Span::styled(
                "No results yet. Fill in the form and press Enter to scan.",
                Style::default().fg(Color::Gray),
            ))],
        };
        wrap_lines(lines, self.wrap_width as usize)
    }
}

fn char_width(ch: char) -> usize {
    let mut buf = [0u8; 4];
    Span::raw(&*ch.encode_utf8(&mut buf)).width()
}

/// Break lines wider than `width` into rows, keeping every character and its style
fn wrap_lines(lines: Vec<Line<'static>>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return lines;
    }

    let mut rows = Vec::with_capacity(lines.len());
    for line in lines {
        if line.width() <= width {
            rows.push(line);
            continue;
        }

        let mut current: Vec<Span<'static>> = Vec::new();
        let mut used = 0;
        for span in line.spans {
            let style = span.style;
            let mut chunk = String::new();
            for ch in span.content.chars() {
                let w = char_width(ch);
                if used + w > width && used > 0 {
                    if !chunk.is_empty() {
                        current.push(Span::styled(std::mem::take(&mut chunk), style));
                    }
                    rows.push(Line::from(std::mem::take(&mut current)));
                    used = 0;
                }
                chunk.push(ch);
                used += w;
            }
            if !chunk.is_empty() {
                current.push(Span::styled(chunk, style));
            }
        }
        if !current.is_empty() {
            rows.push(Line::from(current));
        }
    }
    rows
}

impl Default for ResultsPane {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollablePane for ResultsPane {
    fn scroll_offset(&self) -> u16 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: u16) {
        self.scroll_offset = offset;
    }

    fn calculate_content_lines(&self, view: &ViewState) -> u16 {
        self.content_lines(view).len().min(u16::MAX as usize) as u16
    }
}

impl Pane for ResultsPane {
    fn render(&self, frame: &mut Frame, area: Rect, screen: &Screen, focused: bool) {
        let block = create_block(self.title(), focused);
        let inner_area = block.inner(area);
        block.render(area, frame.buffer_mut());

        let lines = self.apply_scroll_to_lines(self.content_lines(screen.view), inner_area.height);
        log::trace!("[tui::results] render: area={}x{} offset={} visible_lines={}",
            area.width, area.height, self.scroll_offset, lines.len());

        Paragraph::new(lines).render(inner_area, frame.buffer_mut());
    }

    fn title(&self) -> &'static str {
        self.title
    }

    fn min_size(&self) -> (u16, u16) {
        (40, MIN_RESULTS_PANE_HEIGHT)
    }
}
