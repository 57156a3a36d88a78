//! Multi-field text entry overlay

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// What the form wants after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Continue,
    Submit,
    Cancel,
}

#[derive(Debug, Clone)]
struct Field {
    label: &'static str,
    value: String,
    required: bool,
}

/// Stack of labelled single-line inputs
#[derive(Debug, Clone)]
pub struct TextForm {
    title: String,
    fields: Vec<Field>,
    focus: usize,
    error: Option<String>,
}

impl TextForm {
    /// `fields` are `(label, required)` pairs
    pub fn new(title: impl Into<String>, fields: &[(&'static str, bool)]) -> Self {
        Self {
            title: title.into(),
            fields: fields
                .iter()
                .map(|&(label, required)| Field {
                    label,
                    value: String::new(),
                    required,
                })
                .collect(),
            focus: 0,
            error: None,
        }
    }

    pub fn with_value(mut self, index: usize, value: impl Into<String>) -> Self {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
        self
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    /// Tab/Enter move forward, Enter on the last field submits
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Tab | KeyCode::Down => self.focus = (self.focus + 1) % self.fields.len().max(1),
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.checked_sub(1).unwrap_or(self.fields.len().saturating_sub(1));
            }
            KeyCode::Enter => {
                if self.focus + 1 < self.fields.len() {
                    self.focus += 1;
                } else {
                    return FormAction::Submit;
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.value.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.value.push(c);
                }
            }
            _ => {}
        }
        FormAction::Continue
    }

    /// Draw the form in `area` with extra status lines under the fields
    pub fn render(&self, frame: &mut Frame, area: Rect, extra: Vec<Line<'static>>) {
        let mut lines = Vec::new();
        for (i, field) in self.fields.iter().enumerate() {
            let focused = i == self.focus;
            let marker = if field.required { " *" } else { "" };
            lines.push(Line::from(Span::styled(
                format!("{}{}", field.label, marker),
                Style::default().fg(Color::DarkGray),
            )));
            let cursor = if focused { "_" } else { "" };
            let style = if focused {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(Span::styled(format!("> {}{}", field.value, cursor), style)));
        }

        if !extra.is_empty() {
            lines.push(Line::from(""));
            lines.extend(extra);
        }
        if let Some(error) = &self.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Tab] Next  [Enter] Next/Save  [Esc] Cancel",
            Style::default().fg(Color::DarkGray),
        )));

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(230, 120, 40)));

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_submit() {
        let mut form = TextForm::new("Step", &[("Behavior", true), ("Notes", false)]);
        for c in "walk".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
        form.handle_key(key(KeyCode::Backspace));
        assert_eq!(form.value(0), "wal");

        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::Continue);
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::Submit);
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormAction::Cancel);
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = TextForm::new("Step", &[("A", true), ("B", true)]);
        form.handle_key(key(KeyCode::BackTab));
        form.handle_key(key(KeyCode::Char('b')));
        assert_eq!(form.value(1), "b");
    }
}
