use crate::state::ViewState;

const SCROLL_STEP: u16 = 1;

/// Trait for panes that support scrolling content
pub trait ScrollablePane {
    /// Get the current scroll offset
    fn scroll_offset(&self) -> u16;

    /// Set the scroll offset
    fn set_scroll_offset(&mut self, offset: u16);

    /// Calculate the total number of content lines for this pane
    fn calculate_content_lines(&self, view: &ViewState) -> u16;

    /// Scroll up by one step
    fn scroll_up(&mut self) {
        let old_offset = self.scroll_offset();
        let new_offset = old_offset.saturating_sub(SCROLL_STEP);
        self.set_scroll_offset(new_offset);
        log::debug!("[tui::scrollable] scroll_up: old_offset={} new_offset={}", old_offset, new_offset);
    }

    /// Scroll down without running past the end of the content
    fn scroll_down_smart(&mut self, view: &ViewState, visible_height: u16) {
        let actual_lines = self.calculate_content_lines(view);
        let old_offset = self.scroll_offset();

        let max_scroll = actual_lines.saturating_sub(visible_height);
        if old_offset < max_scroll {
            self.set_scroll_offset(old_offset + SCROLL_STEP);
        }

        log::debug!("[tui::scrollable] scroll_down_smart: old_offset={} new_offset={} actual_lines={} visible_height={} max_scroll={}",
            old_offset, self.scroll_offset(), actual_lines, visible_height, max_scroll);
    }

    fn page_up(&mut self, visible_height: u16) {
        for _ in 0..visible_height.max(1) {
            self.scroll_up();
        }
    }

    fn page_down(&mut self, view: &ViewState, visible_height: u16) {
        for _ in 0..visible_height.max(1) {
            self.scroll_down_smart(view, visible_height);
        }
    }

    /// Pull the offset back inside the content after it got shorter
    fn clamp_scroll(&mut self, view: &ViewState, visible_height: u16) {
        let old_offset = self.scroll_offset();
        let max_scroll = self.calculate_content_lines(view).saturating_sub(visible_height);
        if old_offset > max_scroll {
            self.set_scroll_offset(max_scroll);
            log::debug!("[tui::scrollable] clamp_scroll: old_offset={} new_offset={}", old_offset, max_scroll);
        }
    }

    /// Reset scroll to top
    fn reset_scroll(&mut self) {
        let old_offset = self.scroll_offset();
        self.set_scroll_offset(0);
        log::debug!("[tui::scrollable] reset_scroll: old_offset={}", old_offset);
    }

    /// Apply scroll offset to a vector of lines, returning only visible lines
    fn apply_scroll_to_lines<T>(&self, lines: Vec<T>, visible_height: u16) -> Vec<T> {
        let total_lines = lines.len().min(u16::MAX as usize) as u16;
        let max_scroll_offset = total_lines.saturating_sub(visible_height);
        let safe_scroll_offset = self.scroll_offset().min(max_scroll_offset);

        log::trace!("[tui::scrollable] apply_scroll: total_lines={} visible_height={} max_scroll={} safe_scroll={}",
            total_lines, visible_height, max_scroll_offset, safe_scroll_offset);

        lines.into_iter().skip(safe_scroll_offset as usize).collect()
    }
}
