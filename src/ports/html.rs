// src/ports/html.rs
use crate::domain::Card;
use html_escape::encode_text;
use tracing::instrument;

#[derive(Debug, Default)]
pub struct HtmlPresenter;

impl HtmlPresenter {
    pub fn new() -> Self {
        Self
    }

    /// Escape card text and keep its line breaks.
    fn process_content(&self, content: &str) -> String {
        encode_text(content).replace('\n', "<br>\n")
    }

    #[instrument(level = "debug", skip(self))]
    pub fn render(&self, card: &Card) -> String {
        let question = self.process_content(&card.question);
        let answer = self.process_content(&card.answer);
        let description = if card.description.trim().is_empty() {
            String::new()
        } else {
            format!(
                r#"<div class="description">{}</div>"#,
                self.process_content(&card.description)
            )
        };
        let tag = if card.tag.is_empty() {
            "No tag".to_string()
        } else {
            format!(r#"<span class="tag">{}</span>"#, encode_text(&card.tag))
        };

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Card {card_id}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 2rem auto;
            padding: 0 1rem;
            background-color: #f5f5f5;
        }}
        .card {{
            background: white;
            border-radius: 8px;
            padding: 2rem;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }}
        .card-front {{
            margin-bottom: 2rem;
            padding-bottom: 1rem;
            border-bottom: 2px solid #eee;
        }}
        .description {{
            margin-top: 1rem;
            color: #555;
            font-style: italic;
        }}
        .card-info {{
            margin-top: 1rem;
            padding-top: 1rem;
            border-top: 1px solid #eee;
            font-size: 0.9em;
            color: #666;
        }}
        .tag {{
            display: inline-block;
            background: #e9ecef;
            padding: 2px 8px;
            border-radius: 4px;
            font-size: 0.8em;
        }}
    </style>
</head>
<body>
    <div class="card">
        <div class="card-front">
            <h2>Question</h2>
            <div>{question}</div>
        </div>
        <div class="card-back">
            <h2>Answer</h2>
            <div>{answer}</div>
            {description}
        </div>
        <div class="card-info">
            <div>Card ID: {card_id}</div>
            <div>Column: {column}</div>
            <div>Tag: {tag}</div>
        </div>
    </div>
</body>
</html>"#,
            card_id = card.id,
            question = question,
            answer = answer,
            description = description,
            column = card.column.label(),
            tag = tag,
        )
    }
}
