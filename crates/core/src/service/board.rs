//! Grouping a year's acts by legal status.

use serde::Serialize;

use crate::models::Act;

/// Label given to acts that arrive without a status.
pub const IN_PREPARATION: &str = "W przygotowaniu";

/// Acts of one year split into status columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub struct Board {
    #[serde(rename = "Obowiazujace")]
    pub active: Vec<Act>,
    #[serde(rename = "Pending")]
    pub pending: Vec<Act>,
    #[serde(rename = "Uchylone")]
    pub repealed: Vec<Act>,
}

impl Board {
    pub fn len(&self) -> usize {
        self.active.len() + self.pending.len() + self.repealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split `acts` into columns, keeping input order within each column.
///
/// Matching is case-insensitive on the trimmed status. Acts with an empty
/// status are relabelled [`IN_PREPARATION`]; any unrecognised status lands in
/// `pending` as is.
pub fn organize_by_status(acts: Vec<Act>) -> Board {
    let mut board = Board::default();

    for mut act in acts {
        let status = act.status.trim().to_lowercase();
        match status.as_str() {
            "obowiązujący" | "obowiazujacy" => board.active.push(act),
            "uchylony" => board.repealed.push(act),
            "" => {
                act.status = IN_PREPARATION.to_string();
                board.pending.push(act);
            }
            _ => board.pending.push(act),
        }
    }

    board
}
