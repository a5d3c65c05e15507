// src/ports/terminal.rs
use std::fmt::Write;

use crate::application::{BoardController, CardRepository, Notice, NoticeLevel};
use crate::domain::{Card, Column};
use crate::util::text::one_line;

const QUESTION_WIDTH: usize = 60;

/// Plain-text views of the board for the command line.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }

    pub fn card_line(&self, card: &Card) -> String {
        let tag = if card.tag.is_empty() {
            String::new()
        } else {
            format!("  #{}", card.tag)
        };
        format!("  [{}] {}{}", card.id, one_line(&card.question, QUESTION_WIDTH), tag)
    }

    /// All four columns in order, each with its filtered cards.
    pub fn board<R: CardRepository>(&self, board: &BoardController<R>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Filter: {}", board.filter());

        for column in Column::ALL {
            let cards = board.cards_in(column);
            let _ = writeln!(out, "\n== {} ({}) ==", column.label(), cards.len());
            if cards.is_empty() {
                let _ = writeln!(out, "  (empty)");
            }
            for card in cards {
                let _ = writeln!(out, "{}", self.card_line(card));
            }
        }
        out
    }

    pub fn tags(&self, tags: &[String]) -> String {
        if tags.is_empty() {
            return "No tags".to_string();
        }
        tags.join("\n")
    }

    pub fn notice(&self, notice: &Notice) -> String {
        let marker = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Danger => "error",
        };
        format!("[{}] {}", marker, notice.message)
    }
}
