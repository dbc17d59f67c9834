use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    event::{KeyCode, KeyEvent, KeyModifiers},
    queue,
    style::{Print, PrintStyledContent, Stylize},
};
use std::io::Write;

use super::EventPropagation;

/// A form submission. The form prevents its default action on every submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Single-line input that hands its text to the owner's `add_todo` on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    value: String,
    last_submit: Option<SubmitEvent>,
}

impl TodoForm {
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The event of the most recent submit, if any.
    pub fn last_submit(&self) -> Option<&SubmitEvent> {
        self.last_submit.as_ref()
    }

    pub fn handle_change(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn handle_char(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn handle_backspace(&mut self) {
        self.value.pop();
    }

    pub fn handle_submit(&mut self, event: &mut SubmitEvent, add_todo: &mut dyn FnMut(String)) {
        event.prevent_default();
        let text = std::mem::take(&mut self.value);
        log::debug!("form submitted: {text:?}");
        add_todo(text);
    }

    /// Returns `Propagate` for keys the form does not own.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        add_todo: &mut dyn FnMut(String),
    ) -> EventPropagation {
        match key.code {
            KeyCode::Enter => {
                let mut event = SubmitEvent::new();
                self.handle_submit(&mut event, add_todo);
                self.last_submit = Some(event);
                EventPropagation::ConsumedRender
            }
            KeyCode::Backspace => {
                self.handle_backspace();
                EventPropagation::ConsumedRender
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.handle_char(c);
                EventPropagation::ConsumedRender
            }
            _ => EventPropagation::Propagate,
        }
    }

    pub fn render<W: Write>(&self, out: &mut W, row: u16, width: u16, focused: bool) -> Result<()> {
        queue!(out, MoveTo(0, row))?;
        if focused {
            queue!(out, PrintStyledContent("> ".yellow().bold()))?;
        } else {
            queue!(out, PrintStyledContent("> ".dark_grey()))?;
        }

        if self.value.is_empty() && !focused {
            queue!(out, PrintStyledContent("Add a todo (Tab to focus)".dark_grey()))?;
            return Ok(());
        }

        // Keep the tail visible when the text is wider than the field
        let field_width = width.saturating_sub(3) as usize;
        let chars: Vec<char> = self.value.chars().collect();
        let start = chars.len().saturating_sub(field_width);
        let visible: String = chars[start..].iter().collect();
        queue!(out, Print(visible))?;

        if focused {
            queue!(out, PrintStyledContent("█".white()))?;
        }
        Ok(())
    }
}
