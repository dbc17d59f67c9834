use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub text: String,
    #[serde(default)]
    pub is_completed: bool,
}

impl TodoItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_completed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("No todo at position {index} (list has {len} items)")]
    InvalidIndex { index: usize, len: usize },
}

/// The demo list a fresh container starts with.
pub fn demo_seed_items() -> Vec<TodoItem> {
    vec![
        TodoItem::new("Todo 1"),
        TodoItem::new("Todo 2"),
        TodoItem::new("Todo 3"),
    ]
}

/// Owns the todo sequence. Items are addressed by their current position, so
/// an index handed out before a removal may point at a different item after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Todos {
    items: Vec<TodoItem>,
}

impl Default for Todos {
    fn default() -> Self {
        Self::new(demo_seed_items())
    }
}

impl Todos {
    pub fn new(seed_items: Vec<TodoItem>) -> Self {
        Self { items: seed_items }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn todos(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends an incomplete item. Empty text is accepted as-is.
    pub fn add_todo(&mut self, text: impl Into<String>) {
        let item = TodoItem::new(text);
        log::debug!("add_todo at position {}: {:?}", self.items.len(), item.text);
        self.items.push(item);
    }

    pub fn complete_todo(&mut self, index: usize) -> Result<(), TodoError> {
        let len = self.items.len();
        match self.items.get_mut(index) {
            Some(item) => {
                item.is_completed = true;
                log::debug!("complete_todo at position {index}");
                Ok(())
            }
            None => {
                log::warn!("complete_todo rejected: position {index} of {len}");
                Err(TodoError::InvalidIndex { index, len })
            }
        }
    }

    /// Removes the item at `index` and closes the gap.
    pub fn remove_todo(&mut self, index: usize) -> Result<TodoItem, TodoError> {
        let len = self.items.len();
        if index >= len {
            log::warn!("remove_todo rejected: position {index} of {len}");
            return Err(TodoError::InvalidIndex { index, len });
        }

        let removed = self.items.remove(index);
        log::debug!("remove_todo at position {index}: {:?}", removed.text);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(todos: &Todos) -> Vec<&str> {
        todos.todos().iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_default_seed() {
        let todos = Todos::default();
        assert_eq!(texts(&todos), vec!["Todo 1", "Todo 2", "Todo 3"]);
        assert!(todos.todos().iter().all(|t| !t.is_completed));
    }

    #[test]
    fn test_remove_first_seed_item() {
        let mut todos = Todos::default();
        let removed = todos.remove_todo(0).unwrap();

        assert_eq!(removed.text, "Todo 1");
        assert_eq!(
            todos.todos(),
            &[
                TodoItem {
                    text: "Todo 2".to_string(),
                    is_completed: false
                },
                TodoItem {
                    text: "Todo 3".to_string(),
                    is_completed: false
                },
            ]
        );
    }

    #[test]
    fn test_remove_middle_keeps_order() {
        let mut todos = Todos::new(vec![
            TodoItem::new("a"),
            TodoItem::new("b"),
            TodoItem::new("c"),
            TodoItem::new("d"),
        ]);

        todos.remove_todo(1).unwrap();
        assert_eq!(todos.len(), 3);
        assert_eq!(texts(&todos), vec!["a", "c", "d"]);

        todos.remove_todo(2).unwrap();
        assert_eq!(texts(&todos), vec!["a", "c"]);
    }

    #[test]
    fn test_complete_first_seed_item() {
        let mut todos = Todos::default();
        todos.complete_todo(0).unwrap();

        assert_eq!(
            todos.todos()[0],
            TodoItem {
                text: "Todo 1".to_string(),
                is_completed: true
            }
        );
        assert_eq!(todos.todos()[1..], demo_seed_items()[1..]);
    }

    #[test]
    fn test_complete_twice_stays_completed() {
        let mut todos = Todos::default();
        todos.complete_todo(2).unwrap();
        todos.complete_todo(2).unwrap();

        assert_eq!(todos.len(), 3);
        assert!(todos.todos()[2].is_completed);
        assert!(!todos.todos()[0].is_completed);
        assert!(!todos.todos()[1].is_completed);
    }

    #[test]
    fn test_add_to_empty() {
        let mut todos = Todos::empty();
        todos.add_todo("x");
        assert_eq!(todos.todos(), &[TodoItem::new("x")]);
    }

    #[test]
    fn test_add_appends_after_seed() {
        let mut todos = Todos::default();
        todos.add_todo("texto de prueba");

        assert_eq!(todos.len(), 4);
        assert_eq!(todos.todos()[..3], demo_seed_items()[..]);
        assert_eq!(todos.todos()[3], TodoItem::new("texto de prueba"));
    }

    #[test]
    fn test_add_empty_text_is_accepted() {
        let mut todos = Todos::empty();
        todos.add_todo("");
        assert_eq!(todos.len(), 1);
        assert_eq!(todos.todos()[0].text, "");
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut todos = Todos::default();

        assert_eq!(
            todos.complete_todo(3),
            Err(TodoError::InvalidIndex { index: 3, len: 3 })
        );
        assert_eq!(
            todos.remove_todo(10),
            Err(TodoError::InvalidIndex { index: 10, len: 3 })
        );
        assert_eq!(todos, Todos::default());

        let mut empty = Todos::empty();
        assert!(empty.remove_todo(0).is_err());
        assert!(empty.complete_todo(0).is_err());
    }

    #[test]
    fn test_invalid_index_message() {
        let err = TodoError::InvalidIndex { index: 4, len: 2 };
        assert_eq!(err.to_string(), "No todo at position 4 (list has 2 items)");
    }

    #[test]
    fn test_item_json_shape() {
        let item: TodoItem = serde_json::from_str(r#"{"text": "buy milk"}"#).unwrap();
        assert_eq!(item, TodoItem::new("buy milk"));

        let json = serde_json::to_string(&TodoItem {
            text: "done".to_string(),
            is_completed: true,
        })
        .unwrap();
        assert_eq!(json, r#"{"text":"done","isCompleted":true}"#);
    }
}
