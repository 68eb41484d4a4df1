//! Terminal presentation surface.
//!
//! The surface is the only place that touches the transcript, the theme,
//! and the confirmation modal. It runs on the main loop task; worker tasks
//! reach it exclusively through [`SurfaceEvent`] messages, so none of this
//! state needs locking.

use std::collections::VecDeque;

use tokio::sync::oneshot;

use deskhand_core::Decision;
use deskhand_tools::help_text;

const UI_RESET: &str = "\x1b[0m";
const UI_ACCENT: &str = "\x1b[38;5;39m";
const UI_INFO: &str = "\x1b[38;5;81m";
const UI_WARN: &str = "\x1b[38;5;214m";

fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn paint(text: &str, style: &str) -> String {
    if use_color() {
        format!("{style}{text}{UI_RESET}")
    } else {
        text.to_string()
    }
}

/// Who a transcript line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    You,
    Assistant,
}

impl Role {
    fn label(self) -> &'static str {
        match self {
            Role::You => "you",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

/// Messages worker tasks send to the surface.
pub enum SurfaceEvent {
    /// Print a transcript line.
    Display { role: Role, text: String },
    /// Ask the user to approve an action. The sender blocks on `reply`.
    Confirm {
        description: String,
        reply: oneshot::Sender<Decision>,
    },
    /// Request a copy of the transcript so far.
    Snapshot { reply: oneshot::Sender<Vec<String>> },
    /// Flip the theme and report the new one.
    ToggleTheme { reply: oneshot::Sender<Theme> },
}

struct PendingConfirm {
    description: String,
    reply: oneshot::Sender<Decision>,
}

/// What the main loop should do with a line the user typed.
#[derive(Debug)]
pub enum InputDisposition {
    /// Hand the text to the dispatcher.
    Submit(String),
    /// The surface consumed the line; print these and keep reading.
    Handled(Vec<String>),
    /// Shut down.
    Exit,
}

pub struct Surface {
    theme: Theme,
    history: Vec<String>,
    modal: Option<PendingConfirm>,
    queue: VecDeque<PendingConfirm>,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    pub fn new() -> Self {
        Self {
            theme: Theme::Dark,
            history: Vec::new(),
            modal: None,
            queue: VecDeque::new(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Apply a worker event. Returns the lines to print.
    pub fn handle_event(&mut self, event: SurfaceEvent) -> Vec<String> {
        match event {
            SurfaceEvent::Display { role, text } => self.display(role, &text),
            SurfaceEvent::Confirm { description, reply } => {
                let pending = PendingConfirm { description, reply };
                if self.modal.is_some() {
                    // Only one modal at a time; later requests wait their turn.
                    self.queue.push_back(pending);
                    Vec::new()
                } else {
                    self.open_modal(pending)
                }
            }
            SurfaceEvent::Snapshot { reply } => {
                let _ = reply.send(self.history.clone());
                Vec::new()
            }
            SurfaceEvent::ToggleTheme { reply } => {
                self.theme = self.theme.toggled();
                let _ = reply.send(self.theme);
                Vec::new()
            }
        }
    }

    /// Route a line the user typed. While a modal is open every line answers
    /// the modal and nothing reaches the dispatcher.
    pub fn handle_input(&mut self, line: &str) -> InputDisposition {
        if self.modal.is_some() {
            return InputDisposition::Handled(self.answer_modal(line));
        }

        let text = line.trim();
        if text.is_empty() {
            return InputDisposition::Handled(Vec::new());
        }
        if text.eq_ignore_ascii_case("exit") || text.eq_ignore_ascii_case("quit") {
            return InputDisposition::Exit;
        }
        if text.eq_ignore_ascii_case("help") {
            return InputDisposition::Handled(vec![help_text()]);
        }

        self.history.push(format!("you: {text}"));
        InputDisposition::Submit(text.to_string())
    }

    fn display(&mut self, role: Role, text: &str) -> Vec<String> {
        self.history.push(format!("{}: {}", role.label(), text));
        let prefix = paint(role.label(), self.role_style(role));
        vec![format!("{prefix}: {text}")]
    }

    fn open_modal(&mut self, pending: PendingConfirm) -> Vec<String> {
        let line = paint(
            &format!("⚠️  {} [y/N]", pending.description),
            UI_WARN,
        );
        self.modal = Some(pending);
        vec![line]
    }

    fn answer_modal(&mut self, line: &str) -> Vec<String> {
        let Some(pending) = self.modal.take() else {
            return Vec::new();
        };
        let decision = if is_affirmative(line) {
            Decision::Approved
        } else {
            Decision::Denied
        };
        // The asking task may have gone away; a dead receiver is fine.
        let _ = pending.reply.send(decision);

        match self.queue.pop_front() {
            Some(next) => self.open_modal(next),
            None => Vec::new(),
        }
    }

    fn role_style(&self, role: Role) -> &'static str {
        match (role, self.theme) {
            (Role::You, _) => UI_ACCENT,
            (Role::Assistant, Theme::Dark) => UI_INFO,
            (Role::Assistant, Theme::Light) => UI_ACCENT,
        }
    }
}

fn is_affirmative(line: &str) -> bool {
    let answer = line.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
