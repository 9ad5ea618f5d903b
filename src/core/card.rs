//! Renders one [`RoadmapRecord`] as a self-contained HTML card.

use crate::core::markup::{escape_html, text_to_html};
use crate::core::normalizer::flatten_item;
use crate::domain::model::{RoadmapRecord, Timeline};
use serde_json::Value;

pub const COURSES_CAP: usize = 3;
pub const PROJECTS_CAP: usize = 2;
pub const CERTIFICATIONS_CAP: usize = 4;

/// Keys that describe a timeline phase object, in display order.
const PHASE_KEYS: [&str; 7] = [
    "title",
    "name",
    "phase",
    "focus",
    "description",
    "details",
    "duration",
];

pub fn render_card(record: &RoadmapRecord, index: usize) -> String {
    let title = record
        .title
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| format!("Career Path {}", index + 1));

    let mut sections = String::new();

    if let Some(summary) = &record.summary {
        sections.push_str(&format!(
            r#"<p class="card-summary">{}</p>"#,
            text_to_html(summary)
        ));
    }
    if !record.skills.is_empty() {
        sections.push_str(&section("fa-tools", "Skills", &render_tags(&record.skills)));
    }
    if !record.courses.is_empty() {
        sections.push_str(&section(
            "fa-graduation-cap",
            "Courses",
            &render_capped_list(&record.courses, COURSES_CAP),
        ));
    }
    if !record.projects.is_empty() {
        sections.push_str(&section(
            "fa-project-diagram",
            "Projects",
            &render_capped_list(&record.projects, PROJECTS_CAP),
        ));
    }
    if let Some(timeline) = &record.timeline {
        sections.push_str(&section("fa-clock", "Timeline", &render_timeline(timeline)));
    }
    if !record.certifications.is_empty() {
        sections.push_str(&section(
            "fa-certificate",
            "Certifications",
            &render_capped_list(&record.certifications, CERTIFICATIONS_CAP),
        ));
    }

    format!(
        r#"<div class="roadmap-card" data-index="{index}"><div class="card-header"><span class="card-number">{number}</span><h3 class="card-title">{title}</h3></div><div class="card-body">{sections}</div></div>"#,
        index = index,
        number = index + 1,
        title = title,
        sections = sections,
    )
}

pub fn render_cards(records: &[RoadmapRecord]) -> Vec<String> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| render_card(record, index))
        .collect()
}

fn section(icon: &str, heading: &str, body: &str) -> String {
    format!(
        r#"<div class="card-section"><h4><i class="fas {icon}"></i> {heading}</h4>{body}</div>"#
    )
}

fn render_tags(items: &[String]) -> String {
    let tags: String = items
        .iter()
        .map(|item| format!(r#"<span class="skill-tag">{}</span>"#, escape_html(item)))
        .collect();
    format!(r#"<div class="skill-tags">{}</div>"#, tags)
}

fn render_capped_list(items: &[String], cap: usize) -> String {
    let mut list: String = items
        .iter()
        .take(cap)
        .map(|item| format!("<li>{}</li>", escape_html(item)))
        .collect();
    if items.len() > cap {
        list.push_str(&format!(
            r#"<li class="more-items">+{} more</li>"#,
            items.len() - cap
        ));
    }
    format!(r#"<ul class="card-list">{}</ul>"#, list)
}

pub fn render_timeline(timeline: &Timeline) -> String {
    let body = match timeline {
        Timeline::Text(text) => text_to_html(text),
        Timeline::Steps(steps) => steps
            .iter()
            .filter_map(flatten_item)
            .map(|step| escape_html(&step))
            .collect::<Vec<_>>()
            .join("<br>"),
        Timeline::Phases(phases) if phases.iter().all(|(_, v)| is_scalar(v)) => phases
            .iter()
            .map(|(label, value)| labelled(label, &scalar_text(value)))
            .collect::<Vec<_>>()
            .join("<br>"),
        Timeline::Phases(phases) => phases
            .iter()
            .map(|(label, value)| render_phase(label, value))
            .collect::<Vec<_>>()
            .join("<br>"),
    };
    format!(r#"<div class="timeline-block">{}</div>"#, body)
}

fn render_phase(label: &str, value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let entries: String = items
                .iter()
                .filter_map(flatten_item)
                .map(|item| format!("<li>{}</li>", escape_html(&item)))
                .collect();
            format!(
                r#"<strong>{}</strong><ul class="timeline-sublist">{}</ul>"#,
                escape_html(label),
                entries
            )
        }
        Value::Object(map) => {
            let parts: Vec<String> = PHASE_KEYS
                .iter()
                .filter_map(|key| map.get(*key))
                .filter_map(flatten_item)
                .collect();
            let text = if parts.is_empty() {
                flatten_item(value).unwrap_or_default()
            } else {
                parts.join(" - ")
            };
            labelled(label, &text)
        }
        scalar => labelled(label, &scalar_text(scalar)),
    }
}

fn labelled(label: &str, text: &str) -> String {
    format!("<strong>{}</strong>: {}", escape_html(label), escape_html(text))
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
