pub mod form;
pub mod pane;
pub mod results;
pub mod scrollable;
pub mod status;

pub use form::{FormAction, FormField, FormPane, ScanForm};
pub use pane::{Pane, Screen};
pub use results::ResultsPane;
pub use scrollable::ScrollablePane;
pub use status::StatusPane;

use crate::controller::ScanController;
use crate::monitor::MonitorHandle;
use crate::state::{UiEvent, ViewState};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;

const BORDER_HEIGHT_OFFSET: u16 = 2;
const BORDER_WIDTH_OFFSET: u16 = 2;
const HELP_TEXT: &str = "Tab/Shift-Tab field • ←/→ scan type • Space toggle • Enter scan • F2 JSON • F3 raw • PgUp/PgDn scroll • Esc quit";

/// Main TUI application
pub struct App {
    view: ViewState,
    form: ScanForm,
    status_pane: StatusPane,
    form_pane: FormPane,
    results_pane: ResultsPane,
    controller: ScanController,
    events: UnboundedReceiver<UiEvent>,
    monitor: Option<MonitorHandle>,
    backend_url: String,
    results_height: u16,
    should_quit: bool,
    last_tick: Instant,
    tick_rate: Duration,
}

impl App {
    pub fn new(
        controller: ScanController,
        events: UnboundedReceiver<UiEvent>,
        form: ScanForm,
        backend_url: impl Into<String>,
        tick_rate: Duration,
    ) -> Self {
        Self {
            view: ViewState::new(),
            form,
            status_pane: StatusPane::new(),
            form_pane: FormPane::new(),
            results_pane: ResultsPane::new(),
            controller,
            events,
            monitor: None,
            backend_url: backend_url.into(),
            results_height: 0,
            should_quit: false,
            last_tick: Instant::now(),
            tick_rate,
        }
    }

    /// Tie the health polling task to this app; it stops when the app is dropped
    pub fn with_monitor(mut self, monitor: MonitorHandle) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// Run the TUI application
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.drain_events();

            terminal.draw(|f| self.ui(f))?;

            let timeout = self.tick_rate
                .checked_sub(self.last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            if self.should_quit {
                break;
            }

            if self.last_tick.elapsed() >= self.tick_rate {
                self.last_tick = Instant::now();
            }
        }

        if let Some(monitor) = self.monitor.take() {
            monitor.stop();
        }
        log::info!("[tui] quit");
        Ok(())
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Fold one event into the view state
    pub fn dispatch(&mut self, event: UiEvent) {
        let reset = matches!(event, UiEvent::ScanSucceeded(_));
        let toggled = matches!(event, UiEvent::ToggleJson | UiEvent::ToggleRaw);
        self.view = std::mem::take(&mut self.view).apply(event);

        if reset {
            self.results_pane.reset_scroll();
        } else if toggled {
            self.results_pane.clamp_scroll(&self.view, self.results_height);
        }
    }

    /// Apply everything the monitor and controller sent since the last tick
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.dispatch(event);
        }
    }

    fn submit(&mut self) {
        if self.view.busy() || self.controller.is_busy() {
            log::debug!("[tui] submit_ignored: scan already running");
            return;
        }
        self.controller.spawn_submit(self.form.request());
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::F(2) => self.dispatch(UiEvent::ToggleJson),
            KeyCode::F(3) => self.dispatch(UiEvent::ToggleRaw),
            KeyCode::PageUp => self.results_pane.page_up(self.results_height),
            KeyCode::PageDown => self.results_pane.page_down(&self.view, self.results_height),
            _ => {
                if self.form.handle_key(key) == FormAction::Submit {
                    self.submit();
                }
            }
        }
    }

    /// Draw the UI
    pub fn ui(&mut self, frame: &mut ratatui::Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.status_pane.height(&self.screen())),
                Constraint::Length(self.form_pane.height(&self.screen())),
                Constraint::Min(self.results_pane.min_size().1),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.results_height = chunks[2].height.saturating_sub(BORDER_HEIGHT_OFFSET);
        self.results_pane.set_wrap_width(chunks[2].width.saturating_sub(BORDER_WIDTH_OFFSET));
        self.results_pane.clamp_scroll(&self.view, self.results_height);

        let screen = self.screen();
        self.status_pane.render(frame, chunks[0], &screen, false);
        self.form_pane.render(frame, chunks[1], &screen, true);
        self.results_pane.render(frame, chunks[2], &screen, false);

        let footer = match self.view.last_error() {
            Some(error) => Line::from(Span::styled(format!("Scan failed: {}", error), Style::default().fg(Color::Red))),
            None => Line::from(Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray))),
        };
        Paragraph::new(footer).render(chunks[3], frame.buffer_mut());
    }

    fn screen(&self) -> Screen<'_> {
        Screen {
            view: &self.view,
            form: &self.form,
            backend_url: &self.backend_url,
        }
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal after TUI mode
pub fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::{FakeBackend, sample_outcome};
    use crate::tui::status::DISCONNECTED_BANNER;
    use crate::types::ScanOutcome;
    use ratatui::backend::TestBackend;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn test_app(backend: Arc<FakeBackend>) -> App {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = ScanController::new(backend, tx);
        App::new(controller, rx, ScanForm::default(), "http://127.0.0.1:8000/api", Duration::from_millis(250))
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| app.ui(f)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_app_creation() {
        let mut app = test_app(Arc::new(FakeBackend::default()));
        assert!(!app.should_quit());
        assert!(app.view().connected());
        assert_eq!(app.tick_rate, Duration::from_millis(250));

        let screen = draw(&mut app);
        assert!(screen.contains("┌NETWORK SCANNER"));
        assert!(screen.contains("┌SCAN─"));
        assert!(screen.contains("┌RESULTS─"));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app(Arc::new(FakeBackend::default()));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());

        let mut app = test_app(Arc::new(FakeBackend::default()));
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit());
    }

    #[test]
    fn test_banner_when_disconnected() {
        let mut app = test_app(Arc::new(FakeBackend::default()));
        assert!(!draw(&mut app).contains(DISCONNECTED_BANNER));

        app.dispatch(UiEvent::Connectivity(false));
        assert!(draw(&mut app).contains(DISCONNECTED_BANNER));

        app.dispatch(UiEvent::Connectivity(true));
        assert!(!draw(&mut app).contains(DISCONNECTED_BANNER));
    }

    #[test]
    fn test_json_toggle_keys() {
        let mut app = test_app(Arc::new(FakeBackend::default()));
        app.dispatch(UiEvent::ScanSucceeded(Arc::new(sample_outcome("10.1.1.1"))));
        let before = draw(&mut app);
        assert!(before.contains("Host: 10.1.1.1"));
        assert!(!before.contains("Original JSON:"));

        press(&mut app, KeyCode::F(2));
        assert!(draw(&mut app).contains("Original JSON:"));

        press(&mut app, KeyCode::F(2));
        assert_eq!(draw(&mut app), before);
    }

    #[test]
    fn test_page_up_works_after_hiding_json() {
        let ports: Vec<_> = (1..=60)
            .map(|p| json!({"port": p, "state": "open", "name": "svc"}))
            .collect();
        let outcome = ScanOutcome::from_document(json!({
            "hosts": [{"ip": "10.0.0.1", "state": "up", "protocols": [{"protocol": "tcp", "ports": ports}]}],
            "raw_output": ""
        }))
        .unwrap();

        let mut app = test_app(Arc::new(FakeBackend::default()));
        app.dispatch(UiEvent::ScanSucceeded(Arc::new(outcome)));
        press(&mut app, KeyCode::F(2));
        draw(&mut app);
        for _ in 0..50 {
            press(&mut app, KeyCode::PageDown);
        }

        press(&mut app, KeyCode::F(2));
        let bottom = draw(&mut app);
        let total = app.results_pane.calculate_content_lines(app.view());
        assert_eq!(app.results_pane.scroll_offset(), total - app.results_height);

        press(&mut app, KeyCode::PageUp);
        assert_ne!(draw(&mut app), bottom);
    }

    #[test]
    fn test_failed_scan_shows_error_in_footer() {
        let mut app = test_app(Arc::new(FakeBackend::default()));
        app.dispatch(UiEvent::ScanSucceeded(Arc::new(sample_outcome("10.1.1.1"))));
        app.dispatch(UiEvent::ScanStarted);
        app.dispatch(UiEvent::ScanFailed("Scan failed with 400 Bad Request: Invalid IP range".into()));

        let screen = draw(&mut app);
        assert!(screen.contains("Invalid IP range"));
        assert!(screen.contains("Host: 10.1.1.1"));
        assert!(screen.contains("[ Scan ]"));
    }

    #[tokio::test]
    async fn test_enter_submits_form() {
        let backend = Arc::new(FakeBackend::default());
        let mut app = test_app(backend.clone());

        for c in "172.16.0.0/16".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        // a second Enter while busy is ignored
        press(&mut app, KeyCode::Enter);

        tokio::time::sleep(Duration::from_millis(50)).await;
        app.drain_events();

        assert!(!app.view().busy());
        assert_eq!(app.view().outcome().unwrap().result.hosts[0].ip, "172.16.0.0/16");
        let requests = backend.scan_requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].ip_range, "172.16.0.0/16");
    }
}
