use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{PrintStyledContent, Stylize},
    terminal::{Clear, ClearType},
};
use std::fmt::{self, Display, Formatter};
use std::io::Write;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use super::todo_form::TodoForm;
use super::todo_row::{RowCallbacks, TodoRow};
use super::EventPropagation;
use crate::config::Config;
use crate::todos::Todos;

/// Rows above the list: header, blank, form, blank.
const LIST_TOP: u16 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppSignal {
    AddTodo(String),
    CompleteTodo(usize),
    RemoveTodo(usize),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Form,
    List,
}

pub struct AppState {
    pub todos: Todos,
    pub form: TodoForm,
    pub focus: Focus,
    pub selected_index: usize,
    pub message: Option<String>,
    pub should_quit: bool,
    signal_sender: UnboundedSender<AppSignal>,
    signal_receiver: UnboundedReceiver<AppSignal>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Display for AppState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AppState {{ todos: {} items, selected: {}, focus: {:?} }}",
            self.todos.len(),
            self.selected_index,
            self.focus
        )
    }
}

fn send_signal(sender: &UnboundedSender<AppSignal>, signal: AppSignal) {
    if let Err(e) = sender.send(signal) {
        log::error!("Dropped app signal: {:?}", e.0);
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let (signal_sender, signal_receiver) = unbounded_channel();
        Self {
            todos: Todos::new(config.seed_items.clone()),
            form: TodoForm::default(),
            focus: Focus::default(),
            selected_index: 0,
            message: None,
            should_quit: false,
            signal_sender,
            signal_receiver,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = TodoRow<'_>> {
        self.todos
            .todos()
            .iter()
            .enumerate()
            .map(|(index, todo)| TodoRow::new(todo, index))
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index < self.todos.len().saturating_sub(1) {
            self.selected_index += 1;
        }
    }

    /// Routes a key to the focused component, then applies whatever signals
    /// the component emitted.
    pub fn handle_key(&mut self, key: KeyEvent) -> EventPropagation {
        if key.kind == KeyEventKind::Release {
            return EventPropagation::Consumed;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.apply_signal(AppSignal::Quit);
            return EventPropagation::Consumed;
        }

        let propagation = match self.focus {
            Focus::Form => self.handle_form_key(key),
            Focus::List => self.handle_list_key(key),
        };

        let applied = self.apply_pending_signals();
        if applied > 0 && propagation == EventPropagation::Consumed {
            EventPropagation::ConsumedRender
        } else {
            propagation
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> EventPropagation {
        let sender = &self.signal_sender;
        let propagation = self.form.handle_key(key, &mut |text| {
            send_signal(sender, AppSignal::AddTodo(text));
        });
        if propagation != EventPropagation::Propagate {
            return propagation;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = Focus::List;
                EventPropagation::ConsumedRender
            }
            KeyCode::Esc => {
                send_signal(sender, AppSignal::Quit);
                EventPropagation::Consumed
            }
            _ => EventPropagation::Consumed,
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> EventPropagation {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection_up();
                return EventPropagation::ConsumedRender;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection_down();
                return EventPropagation::ConsumedRender;
            }
            KeyCode::Tab => {
                self.focus = Focus::Form;
                return EventPropagation::ConsumedRender;
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                send_signal(&self.signal_sender, AppSignal::Quit);
                return EventPropagation::Consumed;
            }
            _ => {}
        }

        let Some(todo) = self.todos.todos().get(self.selected_index) else {
            return EventPropagation::Consumed;
        };

        let sender = &self.signal_sender;
        let mut complete_todo = |index| send_signal(sender, AppSignal::CompleteTodo(index));
        let mut remove_todo = |index| send_signal(sender, AppSignal::RemoveTodo(index));
        let mut callbacks = RowCallbacks {
            complete_todo: &mut complete_todo,
            remove_todo: &mut remove_todo,
        };

        match TodoRow::new(todo, self.selected_index).handle_key(key, &mut callbacks) {
            EventPropagation::Propagate => EventPropagation::Consumed,
            handled => handled,
        }
    }

    fn apply_pending_signals(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(signal) = self.signal_receiver.try_recv() {
            self.apply_signal(signal);
            applied += 1;
        }
        applied
    }

    pub fn apply_signal(&mut self, signal: AppSignal) {
        log::debug!("apply {signal:?}");
        match signal {
            AppSignal::AddTodo(text) => {
                self.todos.add_todo(text);
                self.message = None;
            }
            AppSignal::CompleteTodo(index) => match self.todos.complete_todo(index) {
                Ok(()) => self.message = None,
                Err(e) => self.message = Some(e.to_string()),
            },
            AppSignal::RemoveTodo(index) => match self.todos.remove_todo(index) {
                Ok(removed) => {
                    if self.selected_index > 0 && self.selected_index >= self.todos.len() {
                        self.selected_index = self.todos.len().saturating_sub(1);
                    }
                    self.message = Some(format!("Removed \"{}\"", removed.text));
                }
                Err(e) => self.message = Some(e.to_string()),
            },
            AppSignal::Quit => self.should_quit = true,
        }
    }

    pub fn render<W: Write>(&self, out: &mut W, width: u16, height: u16) -> Result<()> {
        queue!(
            out,
            Clear(ClearType::All),
            MoveTo(0, 0),
            PrintStyledContent("Todo List".bold().cyan()),
            PrintStyledContent(format!(" - {} item(s)", self.todos.len()).dark_grey()),
        )?;

        self.form.render(out, 2, width, self.focus == Focus::Form)?;

        let list_focused = self.focus == Focus::List;
        if self.todos.is_empty() {
            queue!(
                out,
                MoveTo(0, LIST_TOP),
                PrintStyledContent("Nothing to do. Type a todo and press Enter.".dark_grey()),
            )?;
        } else {
            let max_visible_rows = height.saturating_sub(LIST_TOP + 3).max(1) as usize;
            let start_index = if list_focused {
                self.selected_index.saturating_sub(max_visible_rows / 2)
            } else {
                self.todos.len().saturating_sub(max_visible_rows)
            };
            let end_index = (start_index + max_visible_rows).min(self.todos.len());

            let mut row = LIST_TOP;
            for todo_row in self.rows().skip(start_index).take(end_index - start_index) {
                let selected = list_focused && todo_row.index == self.selected_index;
                todo_row.render(out, row, width, selected)?;
                row += 1;
            }
        }

        if let Some(message) = &self.message {
            queue!(
                out,
                MoveTo(0, height.saturating_sub(2)),
                PrintStyledContent(message.as_str().green().bold()),
            )?;
        }

        let hints = match self.focus {
            Focus::Form => "Enter: Add | Tab: List | Esc: Exit",
            Focus::List => "c/Enter: Complete | x: Remove | Tab: Form | q/Esc: Exit",
        };
        queue!(
            out,
            MoveTo(0, height.saturating_sub(1)),
            PrintStyledContent(hints.dark_grey()),
        )?;

        out.flush()?;
        Ok(())
    }
}
