use crate::state::ViewState;
use crate::tui::form::ScanForm;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

const DEFAULT_MIN_PANE_WIDTH: u16 = 20;
const DEFAULT_MIN_PANE_HEIGHT: u16 = 3;

/// Everything a pane may look at while drawing
pub struct Screen<'a> {
    pub view: &'a ViewState,
    pub form: &'a ScanForm,
    pub backend_url: &'a str,
}

/// Trait for the stacked TUI panes
pub trait Pane {
    /// Render the pane content to the given area
    fn render(&self, frame: &mut Frame, area: Rect, screen: &Screen, focused: bool);

    /// Get the pane's title for display
    fn title(&self) -> &'static str;

    /// Rows this pane wants, borders included
    fn height(&self, _screen: &Screen) -> u16 {
        DEFAULT_MIN_PANE_HEIGHT
    }

    /// Get the pane's preferred minimum size (width, height)
    fn min_size(&self) -> (u16, u16) {
        (DEFAULT_MIN_PANE_WIDTH, DEFAULT_MIN_PANE_HEIGHT)
    }
}

/// Helper function to create a standard bordered block for panes
pub fn create_block(title: &str, focused: bool) -> Block<'static> {
    log::trace!("[tui::pane] create_block: title={} focused={}", title, focused);

    Block::default()
        .title(title.to_uppercase())
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        })
}
