use crate::tui::pane::{Pane, Screen, create_block};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};

pub const DISCONNECTED_BANNER: &str = "Connection to the backend is lost. Please check your network.";

/// STATUS pane shows backend reachability and whether a scan is running
pub struct StatusPane {
    title: &'static str,
}

impl StatusPane {
    pub fn new() -> Self {
        Self {
            title: "network scanner",
        }
    }

    pub fn build_line(screen: &Screen) -> Line<'static> {
        let mut spans = if screen.view.connected() {
            vec![
                Span::styled("● ", Style::default().fg(Color::Green)),
                Span::styled(screen.backend_url.to_string(), Style::default().fg(Color::Gray)),
            ]
        } else {
            vec![Span::styled(
                DISCONNECTED_BANNER,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]
        };

        if screen.view.busy() {
            spans.push(Span::styled("  scanning...", Style::default().fg(Color::Yellow)));
        }

        Line::from(spans)
    }
}

impl Default for StatusPane {
    fn default() -> Self {
        Self::new()
    }
}

impl Pane for StatusPane {
    fn render(&self, frame: &mut Frame, area: Rect, screen: &Screen, focused: bool) {
        let block = create_block(self.title(), focused);
        let inner_area = block.inner(area);
        block.render(area, frame.buffer_mut());

        Paragraph::new(Self::build_line(screen))
            .alignment(Alignment::Left)
            .render(inner_area, frame.buffer_mut());
    }

    fn title(&self) -> &'static str {
        self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::line_text;
    use crate::state::{UiEvent, ViewState};
    use crate::tui::form::ScanForm;

    #[test]
    fn test_banner_follows_connectivity() {
        let form = ScanForm::default();
        let view = ViewState::new();
        let screen = Screen { view: &view, form: &form, backend_url: "http://127.0.0.1:8000/api" };
        let text = line_text(&StatusPane::build_line(&screen));
        assert!(!text.contains(DISCONNECTED_BANNER));
        assert!(text.contains("http://127.0.0.1:8000/api"));

        let view = view.apply(UiEvent::Connectivity(false)).apply(UiEvent::ScanStarted);
        let screen = Screen { view: &view, form: &form, backend_url: "http://127.0.0.1:8000/api" };
        let text = line_text(&StatusPane::build_line(&screen));
        assert!(text.starts_with(DISCONNECTED_BANNER));
        assert!(text.ends_with("scanning..."));
    }
}
