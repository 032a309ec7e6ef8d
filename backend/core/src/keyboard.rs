use serde::{Deserialize, Serialize};

/// A single inline button: visible label and opaque callback payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub payload: String,
}

impl Button {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// Transport-neutral inline keyboard, rows of buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// Lay buttons out `per_row` at a time, last row may be short.
    pub fn grid(buttons: Vec<Button>, per_row: usize) -> Self {
        let per_row = per_row.max(1);
        let rows = buttons
            .chunks(per_row)
            .map(|chunk| chunk.to_vec())
            .collect();
        Self { rows }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_splits_rows() {
        let buttons = (0..5).map(|i| Button::new(i.to_string(), i.to_string())).collect();
        let kb = Keyboard::grid(buttons, 2);
        assert_eq!(kb.rows.len(), 3);
        assert_eq!(kb.rows[2].len(), 1);
        assert_eq!(kb.buttons().count(), 5);
    }
}
