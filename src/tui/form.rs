use crate::tui::pane::{Pane, Screen, create_block};
use crate::types::{ScanRequest, ScanType};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};

const LABEL_WIDTH: usize = 16;
const IP_RANGE_PLACEHOLDER: &str = "e.g. 192.168.1.0/24";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    IpRange,
    ScanType,
    CustomParams,
    Verbose,
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
}

/// Input state of the scan form
#[derive(Debug, Clone)]
pub struct ScanForm {
    pub ip_range: String,
    pub scan_type: ScanType,
    pub custom_params: String,
    pub verbose: bool,
    focus: FormField,
}

impl Default for ScanForm {
    fn default() -> Self {
        Self::from_request(ScanRequest::default())
    }
}

impl ScanForm {
    pub fn from_request(request: ScanRequest) -> Self {
        Self {
            ip_range: request.ip_range,
            scan_type: request.scan_type,
            custom_params: request.custom_params,
            verbose: request.verbose,
            focus: FormField::IpRange,
        }
    }

    /// Fields in tab order; custom params only exist for a custom scan
    pub fn fields(&self) -> Vec<FormField> {
        let mut fields = vec![FormField::IpRange, FormField::ScanType];
        if self.scan_type == ScanType::Custom {
            fields.push(FormField::CustomParams);
        }
        fields.push(FormField::Verbose);
        fields.push(FormField::Submit);
        fields
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    fn move_focus(&mut self, forward: bool) {
        let fields = self.fields();
        let len = fields.len();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward { (current + 1) % len } else { (current + len - 1) % len };
        self.focus = fields[next];
    }

    pub fn focus_next(&mut self) {
        self.move_focus(true);
    }

    pub fn focus_prev(&mut self) {
        self.move_focus(false);
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::IpRange => Some(&mut self.ip_range),
            FormField::CustomParams => Some(&mut self.custom_params),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Enter => return FormAction::Submit,
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Backspace => {
                if let Some(text) = self.focused_text() {
                    text.pop();
                }
            }
            KeyCode::Left if self.focus == FormField::ScanType => {
                self.scan_type = self.scan_type.prev();
            }
            KeyCode::Right if self.focus == FormField::ScanType => {
                self.scan_type = self.scan_type.next();
            }
            KeyCode::Char(' ') if self.focus == FormField::Verbose => {
                self.verbose = !self.verbose;
            }
            KeyCode::Char(' ') if self.focus == FormField::Submit => return FormAction::Submit,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(text) = self.focused_text() {
                    text.push(c);
                }
            }
            _ => {}
        }
        FormAction::None
    }

    /// The request the form currently describes
    pub fn request(&self) -> ScanRequest {
        ScanRequest {
            ip_range: self.ip_range.trim().to_string(),
            scan_type: self.scan_type,
            custom_params: self.custom_params.clone(),
            verbose: self.verbose,
        }
    }
}

/// FORM pane draws the scan form
pub struct FormPane {
    title: &'static str,
}

impl FormPane {
    pub fn new() -> Self {
        Self {
            title: "scan",
        }
    }

    fn field_line(label: &'static str, value: Vec<Span<'static>>, focused: bool) -> Line<'static> {
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(Color::Yellow)),
            Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), label_style),
        ];
        spans.extend(value);
        Line::from(spans)
    }

    fn text_value(text: &str, placeholder: &'static str, focused: bool) -> Vec<Span<'static>> {
        let mut spans = if text.is_empty() && !focused {
            vec![Span::styled(placeholder, Style::default().fg(Color::DarkGray))]
        } else {
            vec![Span::styled(text.to_string(), Style::default().fg(Color::Cyan))]
        };
        if focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
        spans
    }

    pub fn build_lines(form: &ScanForm, busy: bool) -> Vec<Line<'static>> {
        form.fields()
            .into_iter()
            .map(|field| {
                let focused = form.focus() == field;
                match field {
                    FormField::IpRange => Self::field_line(
                        "IP range",
                        Self::text_value(&form.ip_range, IP_RANGE_PLACEHOLDER, focused),
                        focused,
                    ),
                    FormField::ScanType => Self::field_line(
                        "Scan type",
                        vec![Span::styled(
                            format!("‹ {} ›", form.scan_type.label()),
                            Style::default().fg(Color::Cyan),
                        )],
                        focused,
                    ),
                    FormField::CustomParams => Self::field_line(
                        "Nmap params",
                        Self::text_value(&form.custom_params, "e.g. -sV -p 1-1024", focused),
                        focused,
                    ),
                    FormField::Verbose => Self::field_line(
                        "Verbose output",
                        vec![Span::styled(
                            if form.verbose { "[x]" } else { "[ ]" },
                            Style::default().fg(Color::Cyan),
                        )],
                        focused,
                    ),
                    FormField::Submit => {
                        let (text, color) = if busy {
                            ("[ Scanning... ]", Color::DarkGray)
                        } else {
                            ("[ Scan ]", Color::Green)
                        };
                        Self::field_line("", vec![Span::styled(text, Style::default().fg(color))], focused)
                    }
                }
            })
            .collect()
    }
}

impl Default for FormPane {
    fn default() -> Self {
        Self::new()
    }
}

impl Pane for FormPane {
    fn render(&self, frame: &mut Frame, area: Rect, screen: &Screen, focused: bool) {
        log::trace!("[tui::form] render: area={}x{} focus={:?}", area.width, area.height, screen.form.focus());

        let block = create_block(self.title(), focused);
        let inner_area = block.inner(area);
        block.render(area, frame.buffer_mut());

        Paragraph::new(Self::build_lines(screen.form, screen.view.busy()))
            .render(inner_area, frame.buffer_mut());
    }

    fn title(&self) -> &'static str {
        self.title
    }

    fn height(&self, screen: &Screen) -> u16 {
        screen.form.fields().len() as u16 + 2
    }
}
