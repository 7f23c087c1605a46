//! Login and password-reset screens.
//!
//! The unauthenticated side of the app: a login form, a reset-request form,
//! and a reset-completion form. Auth failures surface as one generic
//! message; the backend's field-level detail never reaches the screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use std::time::{Duration, Instant};

/// How long the reset-complete screen lingers before returning to login.
pub const RESET_REDIRECT_DELAY: Duration = Duration::from_secs(3);

const TITLE_COLOR: Color = Color::Rgb(138, 180, 248);
const ACCENT_COLOR: Color = Color::Rgb(186, 139, 255);
const ERROR_COLOR: Color = Color::Rgb(240, 113, 120);
const NOTICE_COLOR: Color = Color::Rgb(129, 199, 132);
const DIM_COLOR: Color = Color::Rgb(110, 110, 110);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScreen {
    Login,
    ResetRequest,
    ResetComplete,
}

/// What the app should do in response to a key the form handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    SubmitLogin {
        username: String,
        password: String,
    },
    RequestReset {
        username: String,
    },
    CompleteReset {
        username: String,
        reset_code: String,
        new_password: String,
    },
}

pub struct AuthFlow {
    pub screen: AuthScreen,
    pub username: String,
    pub password: String,
    pub reset_username: String,
    /// Code issued by the backend, displayed in cleartext. Demo flow only.
    pub issued_code: Option<String>,
    pub code_input: String,
    pub new_password: String,
    pub focus: usize,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub busy: bool,
    redirect_at: Option<Instant>,
}

impl AuthFlow {
    pub fn new() -> Self {
        Self {
            screen: AuthScreen::Login,
            username: String::new(),
            password: String::new(),
            reset_username: String::new(),
            issued_code: None,
            code_input: String::new(),
            new_password: String::new(),
            focus: 0,
            error: None,
            notice: None,
            busy: false,
            redirect_at: None,
        }
    }

    /// Login screen pre-seeded with a notice (used after forced logout).
    pub fn with_notice(notice: impl Into<String>) -> Self {
        let mut flow = Self::new();
        flow.notice = Some(notice.into());
        flow
    }

    fn field_count(&self) -> usize {
        match self.screen {
            AuthScreen::Login => 2,
            AuthScreen::ResetRequest => 1,
            AuthScreen::ResetComplete => 2,
        }
    }

    fn focused_field(&mut self) -> &mut String {
        match (self.screen, self.focus) {
            (AuthScreen::Login, 0) => &mut self.username,
            (AuthScreen::Login, _) => &mut self.password,
            (AuthScreen::ResetRequest, _) => &mut self.reset_username,
            (AuthScreen::ResetComplete, 0) => &mut self.code_input,
            (AuthScreen::ResetComplete, _) => &mut self.new_password,
        }
    }

    fn submit(&mut self) -> Option<AuthAction> {
        match self.screen {
            AuthScreen::Login => {
                if self.username.is_empty() || self.password.is_empty() {
                    self.error = Some("Enter a username and password.".to_string());
                    return None;
                }
                Some(AuthAction::SubmitLogin {
                    username: self.username.clone(),
                    password: self.password.clone(),
                })
            }
            AuthScreen::ResetRequest => {
                if self.reset_username.is_empty() {
                    self.error = Some("Enter a username.".to_string());
                    return None;
                }
                Some(AuthAction::RequestReset {
                    username: self.reset_username.clone(),
                })
            }
            AuthScreen::ResetComplete => {
                if self.code_input.is_empty() || self.new_password.is_empty() {
                    self.error = Some("Enter the reset code and a new password.".to_string());
                    return None;
                }
                Some(AuthAction::CompleteReset {
                    username: self.reset_username.clone(),
                    reset_code: self.code_input.clone(),
                    new_password: self.new_password.clone(),
                })
            }
        }
    }

    /// Handle one key press. Returns an action when the form submitted.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AuthAction> {
        if self.busy {
            return None;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % self.field_count();
            }
            KeyCode::BackTab | KeyCode::Up => {
                let count = self.field_count();
                self.focus = (self.focus + count - 1) % count;
            }
            KeyCode::Enter => {
                self.error = None;
                return self.submit();
            }
            KeyCode::Esc => {
                if self.screen != AuthScreen::Login {
                    self.to_login();
                }
            }
            KeyCode::Backspace => {
                self.focused_field().pop();
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.screen == AuthScreen::Login {
                    self.screen = AuthScreen::ResetRequest;
                    self.reset_username = self.username.clone();
                    self.focus = 0;
                    self.error = None;
                    self.notice = None;
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focused_field().push(c);
            }
            _ => {}
        }
        None
    }

    fn to_login(&mut self) {
        self.screen = AuthScreen::Login;
        self.focus = 0;
        self.error = None;
        self.busy = false;
        self.password.clear();
        self.code_input.clear();
        self.new_password.clear();
        self.issued_code = None;
        self.redirect_at = None;
    }

    /// The backend issued a reset code; move to the completion form and show
    /// the code on screen.
    pub fn on_code_issued(&mut self, code: String) {
        self.busy = false;
        self.screen = AuthScreen::ResetComplete;
        self.issued_code = Some(code);
        self.focus = 0;
        self.error = None;
    }

    /// Password change accepted; linger, then fall back to login.
    pub fn on_reset_complete(&mut self) {
        self.busy = false;
        self.notice = Some("Password updated. Returning to login…".to_string());
        self.redirect_at = Some(Instant::now() + RESET_REDIRECT_DELAY);
    }

    /// Called on every UI tick; performs the delayed return to login.
    pub fn tick(&mut self) {
        if let Some(at) = self.redirect_at {
            if Instant::now() >= at {
                let notice = self.notice.take();
                self.to_login();
                self.notice = notice;
            }
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(area);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(horizontal[1]);
    vertical[1]
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool, mask: bool) -> Line<'a> {
    let shown = if mask {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let style = if focused {
        Style::default().fg(ACCENT_COLOR)
    } else {
        Style::default()
    };
    let cursor = if focused { "▏" } else { "" };
    Line::from(vec![
        Span::styled(format!("{:>13}: ", label), Style::default().fg(DIM_COLOR)),
        Span::styled(format!("{}{}", shown, cursor), style),
    ])
}

pub fn draw(frame: &mut Frame, flow: &AuthFlow) {
    let area = centered(frame.area(), 58, 16);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(DIM_COLOR));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        "Relocate Me",
        Style::default().fg(TITLE_COLOR).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "Your Journey to Peak District Starts Here",
        Style::default().fg(DIM_COLOR),
    )));
    lines.push(Line::from(""));

    match flow.screen {
        AuthScreen::Login => {
            lines.push(field_line("Username", &flow.username, flow.focus == 0, false));
            lines.push(field_line("Password", &flow.password, flow.focus == 1, true));
        }
        AuthScreen::ResetRequest => {
            lines.push(Line::from(Span::styled(
                "Reset password",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(field_line(
                "Username",
                &flow.reset_username,
                flow.focus == 0,
                false,
            ));
        }
        AuthScreen::ResetComplete => {
            lines.push(Line::from(Span::styled(
                "Reset password",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            if let Some(code) = &flow.issued_code {
                lines.push(Line::from(vec![
                    Span::styled("   Reset code: ", Style::default().fg(DIM_COLOR)),
                    Span::styled(code.as_str(), Style::default().fg(NOTICE_COLOR)),
                ]));
            }
            lines.push(field_line("Code", &flow.code_input, flow.focus == 0, false));
            lines.push(field_line(
                "New password",
                &flow.new_password,
                flow.focus == 1,
                true,
            ));
        }
    }

    lines.push(Line::from(""));
    if flow.busy {
        lines.push(Line::from(Span::styled(
            match flow.screen {
                AuthScreen::Login => "Logging in…",
                _ => "Working…",
            },
            Style::default().fg(DIM_COLOR),
        )));
    } else if let Some(error) = &flow.error {
        lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(ERROR_COLOR),
        )));
    } else if let Some(notice) = &flow.notice {
        lines.push(Line::from(Span::styled(
            notice.as_str(),
            Style::default().fg(NOTICE_COLOR),
        )));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Demo credentials: relocate_user / SecurePass2025!",
        Style::default().fg(DIM_COLOR),
    )));
    let hints = match flow.screen {
        AuthScreen::Login => "enter login · tab next field · ctrl+r reset · ctrl+c quit",
        _ => "enter submit · esc back to login · ctrl+c quit",
    };
    lines.push(Line::from(Span::styled(
        hints,
        Style::default().fg(DIM_COLOR),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}
