//! The results region: normalized cards behind a paginator, or a fallback block.

use crate::core::card::render_cards;
use crate::core::markup::escape_html;
use crate::core::normalizer::{normalize, Normalized};
use crate::core::pagination::Paginator;
use crate::domain::model::ResponseEnvelope;
use chrono::NaiveDateTime;

/// Anchor id of the results container; page changes scroll back to it.
pub const RESULTS_SECTION_ID: &str = "results-section";

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsBody {
    Cards(Paginator),
    Fallback(String),
}

/// One rendered response. Rebuilt from scratch for every response, so a new
/// view always starts on page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    body: ResultsBody,
    generated_at: Option<NaiveDateTime>,
}

impl ResultsView {
    pub fn from_envelope(envelope: &ResponseEnvelope) -> Self {
        let body = match normalize(envelope) {
            Normalized::Records(records) => {
                tracing::info!("Rendering {} roadmap card(s)", records.len());
                ResultsBody::Cards(Paginator::new(render_cards(&records)))
            }
            Normalized::Fallback(html) => {
                tracing::info!("Result has no roadmap list, showing fallback");
                ResultsBody::Fallback(html)
            }
        };
        Self {
            body,
            generated_at: envelope.generated_at(),
        }
    }

    pub fn body(&self) -> &ResultsBody {
        &self.body
    }

    pub fn generated_at(&self) -> Option<NaiveDateTime> {
        self.generated_at
    }

    pub fn card_count(&self) -> usize {
        match &self.body {
            ResultsBody::Cards(pager) => pager.len(),
            ResultsBody::Fallback(_) => 0,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.body, ResultsBody::Fallback(_))
    }

    /// Fallback content is a single page.
    pub fn page_count(&self) -> usize {
        match &self.body {
            ResultsBody::Cards(pager) => pager.page_count(),
            ResultsBody::Fallback(_) => 1,
        }
    }

    pub fn current_page(&self) -> usize {
        match &self.body {
            ResultsBody::Cards(pager) => pager.current_page(),
            ResultsBody::Fallback(_) => 1,
        }
    }

    pub fn next_page(&mut self) -> bool {
        match &mut self.body {
            ResultsBody::Cards(pager) => pager.next(),
            ResultsBody::Fallback(_) => false,
        }
    }

    pub fn prev_page(&mut self) -> bool {
        match &mut self.body {
            ResultsBody::Cards(pager) => pager.prev(),
            ResultsBody::Fallback(_) => false,
        }
    }

    pub fn go_to(&mut self, page: usize) -> usize {
        match &mut self.body {
            ResultsBody::Cards(pager) => pager.go_to(page),
            ResultsBody::Fallback(_) => 1,
        }
    }

    /// Back to the first page, as after start over.
    pub fn rewind(&mut self) {
        if let ResultsBody::Cards(pager) = &mut self.body {
            pager.reset();
        }
    }

    /// The whole results region for the current page.
    pub fn render(&self) -> String {
        let content = match &self.body {
            ResultsBody::Cards(pager) => format!(
                r#"<div class="roadmap-grid">{}</div>{}"#,
                pager.current_cards().concat(),
                pager.render_nav()
            ),
            ResultsBody::Fallback(html) => html.clone(),
        };
        let footer = self
            .generated_at
            .map(|at| {
                format!(
                    r#"<p class="generated-at">Generated {}</p>"#,
                    escape_html(&at.format("%Y-%m-%d %H:%M UTC").to_string())
                )
            })
            .unwrap_or_default();

        format!(
            r#"<section id="{id}" class="results-section"><div class="results-header"><h2>Your Career Roadmaps</h2><button type="button" class="start-over-btn"><i class="fas fa-redo"></i> Start Over</button></div>{content}{footer}</section>"#,
            id = RESULTS_SECTION_ID,
            content = content,
            footer = footer,
        )
    }
}

/// Inline error shown above the form after a failed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub message: String,
}

impl ErrorBanner {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            r#"<div class="error-banner" role="alert"><i class="fas fa-exclamation-circle"></i> {}</div>"#,
            escape_html(&self.message)
        )
    }
}

/// Wraps a fragment in a standalone HTML document.
pub fn render_document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css">
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        body = body,
    )
}
