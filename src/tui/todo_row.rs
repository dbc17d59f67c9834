use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    event::{KeyCode, KeyEvent},
    queue,
    style::{Print, PrintStyledContent, Stylize},
};
use std::io::Write;

use super::EventPropagation;
use crate::todos::TodoItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowButton {
    Complete,
    Remove,
}

impl RowButton {
    pub fn label(self) -> &'static str {
        match self {
            RowButton::Complete => "Complete",
            RowButton::Remove => "X",
        }
    }
}

/// Handlers a row reports to, both keyed by the row's position.
pub struct RowCallbacks<'a> {
    pub complete_todo: &'a mut dyn FnMut(usize),
    pub remove_todo: &'a mut dyn FnMut(usize),
}

/// One rendered todo plus its two buttons.
#[derive(Debug, Clone, Copy)]
pub struct TodoRow<'a> {
    pub todo: &'a TodoItem,
    pub index: usize,
}

impl<'a> TodoRow<'a> {
    pub fn new(todo: &'a TodoItem, index: usize) -> Self {
        Self { todo, index }
    }

    /// Buttons in render order.
    pub fn buttons() -> [RowButton; 2] {
        [RowButton::Complete, RowButton::Remove]
    }

    pub fn press(&self, button: RowButton, callbacks: &mut RowCallbacks<'_>) {
        match button {
            RowButton::Complete => (callbacks.complete_todo)(self.index),
            RowButton::Remove => (callbacks.remove_todo)(self.index),
        }
    }

    pub fn handle_key(&self, key: KeyEvent, callbacks: &mut RowCallbacks<'_>) -> EventPropagation {
        let button = match key.code {
            KeyCode::Enter | KeyCode::Char('c' | 'C') => RowButton::Complete,
            KeyCode::Delete | KeyCode::Char('x' | 'X') => RowButton::Remove,
            _ => return EventPropagation::Propagate,
        };
        self.press(button, callbacks);
        EventPropagation::ConsumedRender
    }

    /// Plain text of the row as it appears on screen, without styling.
    pub fn text_content(&self) -> String {
        let buttons: Vec<String> = Self::buttons()
            .iter()
            .map(|b| format!("[{}]", b.label()))
            .collect();
        format!("{} {}", self.todo.text, buttons.join(" "))
    }

    pub fn render<W: Write>(&self, out: &mut W, row: u16, width: u16, selected: bool) -> Result<()> {
        let indicator = if selected { "▶ " } else { "  " };
        let buttons = "  [Complete] [X]";

        let text_width = (width as usize).saturating_sub(indicator.chars().count() + buttons.len());
        let text: String = if self.todo.text.chars().count() > text_width {
            let kept: String = self
                .todo
                .text
                .chars()
                .take(text_width.saturating_sub(3))
                .collect();
            format!("{kept}...")
        } else {
            self.todo.text.clone()
        };

        let mut styled = text.as_str().stylize();
        if self.todo.is_completed {
            styled = styled.crossed_out().dark_grey();
        }
        if selected {
            styled = styled.bold();
        }

        queue!(
            out,
            MoveTo(0, row),
            PrintStyledContent(indicator.yellow().bold()),
            PrintStyledContent(styled),
        )?;

        if selected {
            queue!(
                out,
                Print("  "),
                PrintStyledContent("[Complete]".green()),
                Print(" "),
                PrintStyledContent("[X]".red()),
            )?;
        } else {
            queue!(out, PrintStyledContent(buttons.dark_grey()))?;
        }
        Ok(())
    }
}
