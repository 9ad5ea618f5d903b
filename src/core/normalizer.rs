//! Turns the loosely-shaped `result` of a recommendation response into
//! roadmap records.
//!
//! The backend relays LLM output, so `result` may be a structured object, a
//! bare array, or a string holding JSON wrapped in prose or a code fence.
//! [`classify`] picks exactly one [`SourceShape`]. Each shape then has its
//! own conversion. Nothing here fails: shapes that are not a list of
//! records degrade to a fallback HTML fragment.

use crate::core::markup::{escape_html, text_to_html};
use crate::domain::model::{ResponseEnvelope, RoadmapRecord, Timeline};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:[jJ][sS][oO][nN])?(.*?)```").expect("fenced block pattern is valid")
});

/// Keys tried, in order, when flattening a structured list item to one string.
pub const ITEM_KEY_PRIORITY: [&str; 8] = [
    "title",
    "name",
    "label",
    "course",
    "resource",
    "description",
    "url",
    "link",
];

/// How many key/value pairs an unrecognized item object contributes.
const COMPACT_PAIR_LIMIT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Title,
    Summary,
    Skills,
    Courses,
    Projects,
    Timeline,
    Certifications,
}

impl RecordField {
    pub const ALL: [RecordField; 7] = [
        RecordField::Title,
        RecordField::Summary,
        RecordField::Skills,
        RecordField::Courses,
        RecordField::Projects,
        RecordField::Timeline,
        RecordField::Certifications,
    ];

    /// Source keys for this field, first match wins.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            RecordField::Title => &["career_title", "title", "career", "name", "role"],
            RecordField::Summary => &[
                "summary",
                "description",
                "overview",
                "why_good_fit",
                "why_fit",
            ],
            RecordField::Skills => &[
                "required_skills",
                "skills",
                "skills_to_learn",
                "key_skills",
            ],
            RecordField::Courses => &[
                "recommended_courses",
                "courses",
                "courses_resources",
                "resources",
                "learning_resources",
            ],
            RecordField::Projects => &["suggested_projects", "projects", "project_ideas"],
            RecordField::Timeline => &[
                "timeline",
                "skill_acquisition_timeline",
                "learning_timeline",
                "duration",
            ],
            RecordField::Certifications => &[
                "certifications",
                "recommended_certifications",
                "certs",
            ],
        }
    }
}

/// The one interpretation chosen for a response's `result`.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceShape {
    /// `{"career_roadmaps": [...]}`
    RoadmapsArray(Vec<Value>),
    /// `{"roadmap": [...]}` or `{"roadmap": {"career_roadmaps": [...]}}`
    NestedRoadmap(Vec<Value>),
    /// `[{"career_title": ...}, ...]`
    ArrayOfRecords(Vec<Value>),
    /// Some other object; shown as a JSON dump.
    PlainObject(Value),
    /// A string that did not decode as JSON.
    OpaqueText(String),
    Empty,
}

impl SourceShape {
    pub fn kind(&self) -> &'static str {
        match self {
            SourceShape::RoadmapsArray(_) => "roadmaps_array",
            SourceShape::NestedRoadmap(_) => "nested_roadmap",
            SourceShape::ArrayOfRecords(_) => "array_of_records",
            SourceShape::PlainObject(_) => "plain_object",
            SourceShape::OpaqueText(_) => "opaque_text",
            SourceShape::Empty => "empty",
        }
    }
}

/// Normalizer output: either records to render as cards, or a ready-made
/// HTML fragment to show instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Records(Vec<RoadmapRecord>),
    Fallback(String),
}

pub fn normalize(envelope: &ResponseEnvelope) -> Normalized {
    normalize_result(&envelope.result)
}

pub fn normalize_result(result: &Value) -> Normalized {
    let shape = classify(result);
    tracing::debug!("Result classified as {}", shape.kind());

    match shape {
        SourceShape::RoadmapsArray(items)
        | SourceShape::NestedRoadmap(items)
        | SourceShape::ArrayOfRecords(items) => Normalized::Records(records_from(&items)),
        SourceShape::PlainObject(value) => Normalized::Fallback(render_json_dump(&value)),
        SourceShape::OpaqueText(text) => Normalized::Fallback(render_opaque_text(&text)),
        SourceShape::Empty => Normalized::Fallback(render_no_results()),
    }
}

pub fn classify(result: &Value) -> SourceShape {
    match result {
        Value::String(text) => match decode_embedded_json(text) {
            Some(decoded @ (Value::Object(_) | Value::Array(_))) => classify_structured(decoded),
            _ => SourceShape::OpaqueText(text.clone()),
        },
        other => classify_structured(other.clone()),
    }
}

fn classify_structured(value: Value) -> SourceShape {
    match value {
        Value::Object(mut map) => {
            if let Some(items) = take_array(&mut map, "career_roadmaps") {
                return SourceShape::RoadmapsArray(items);
            }
            match map.get_mut("roadmap") {
                Some(Value::Array(items)) => {
                    return SourceShape::NestedRoadmap(std::mem::take(items));
                }
                Some(Value::Object(inner)) => {
                    if let Some(items) = take_array(inner, "career_roadmaps") {
                        return SourceShape::NestedRoadmap(items);
                    }
                }
                _ => {}
            }
            SourceShape::PlainObject(Value::Object(map))
        }
        Value::Array(items) if items.first().is_some_and(looks_like_record) => {
            SourceShape::ArrayOfRecords(items)
        }
        _ => SourceShape::Empty,
    }
}

fn take_array(map: &mut Map<String, Value>, key: &str) -> Option<Vec<Value>> {
    match map.get_mut(key) {
        Some(Value::Array(items)) => Some(std::mem::take(items)),
        _ => None,
    }
}

fn looks_like_record(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.contains_key("career_title") || obj.contains_key("title"))
}

/// Finds the JSON payload inside LLM text and decodes it. A fenced block
/// wins over brace slicing. Text with neither is not decoded.
pub fn decode_embedded_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    let candidate = fenced_interior(trimmed).or_else(|| brace_slice(trimmed))?;
    serde_json::from_str(candidate.trim()).ok()
}

fn fenced_interior(text: &str) -> Option<&str> {
    FENCED_BLOCK
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn brace_slice(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn records_from(items: &[Value]) -> Vec<RoadmapRecord> {
    items.iter().map(to_record).collect()
}

/// Reads one raw record through the alias table. A bare string becomes the title.
pub fn to_record(raw: &Value) -> RoadmapRecord {
    let obj = match raw {
        Value::Object(obj) => obj,
        other => {
            return RoadmapRecord {
                title: flatten_item(other),
                ..RoadmapRecord::default()
            }
        }
    };

    let field = |f: RecordField| first_present(obj, f.aliases());

    RoadmapRecord {
        title: field(RecordField::Title).and_then(text_of),
        summary: field(RecordField::Summary).and_then(text_of),
        skills: field(RecordField::Skills).map(list_of).unwrap_or_default(),
        courses: field(RecordField::Courses).map(list_of).unwrap_or_default(),
        projects: field(RecordField::Projects).map(list_of).unwrap_or_default(),
        timeline: field(RecordField::Timeline).and_then(timeline_of),
        certifications: field(RecordField::Certifications)
            .map(list_of)
            .unwrap_or_default(),
    }
}

/// First alias holding a usable value. `null` and blank strings count as absent.
pub fn first_present<'a>(obj: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|alias| obj.get(*alias))
        .find(|value| match value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(flatten_item).collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        other => flatten_item(other),
    }
}

fn list_of(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(flatten_item).collect(),
        Value::String(text) => text
            .lines()
            .map(|line| line.trim().trim_start_matches(['-', '*', '•']).trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, value)| {
                flatten_item(value).map(|text| format!("{}: {}", key, text))
            })
            .collect(),
        other => flatten_item(other).into_iter().collect(),
    }
}

fn timeline_of(value: &Value) -> Option<Timeline> {
    match value {
        Value::String(text) => Some(Timeline::Text(text.trim().to_string())),
        Value::Number(n) => Some(Timeline::Text(n.to_string())),
        Value::Bool(b) => Some(Timeline::Text(b.to_string())),
        Value::Array(items) if !items.is_empty() => Some(Timeline::Steps(items.clone())),
        Value::Object(map) if !map.is_empty() => Some(Timeline::Phases(
            map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        )),
        _ => None,
    }
}

/// Collapses a list item of any shape into one readable string. Objects
/// use [`ITEM_KEY_PRIORITY`], then a compact dump of their first few pairs.
pub fn flatten_item(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(flatten_item).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Object(map) => {
            if let Some(text) = ITEM_KEY_PRIORITY
                .iter()
                .filter_map(|key| map.get(*key))
                .find_map(flatten_item)
            {
                return Some(text);
            }
            let pairs: Vec<String> = map
                .iter()
                .take(COMPACT_PAIR_LIMIT)
                .map(|(key, value)| format!("{}: {}", key, compact_scalar(value)))
                .collect();
            (!pairs.is_empty()).then(|| pairs.join(", "))
        }
    }
}

fn compact_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_json_dump(value: &Value) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    format!(
        r#"<div class="result-fallback"><pre class="json-dump">{}</pre></div>"#,
        escape_html(&pretty)
    )
}

fn render_opaque_text(text: &str) -> String {
    format!(
        r#"<div class="result-fallback"><div class="result-text">{}</div></div>"#,
        text_to_html(text)
    )
}

fn render_no_results() -> String {
    r#"<div class="no-results"><i class="fas fa-search"></i><p>No career recommendations were found. Try adding more detail to your profile.</p></div>"#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(result: Value) -> Vec<RoadmapRecord> {
        match normalize_result(&result) {
            Normalized::Records(records) => records,
            Normalized::Fallback(html) => panic!("expected records, got fallback {}", html),
        }
    }

    fn fallback(result: Value) -> String {
        match normalize_result(&result) {
            Normalized::Fallback(html) => html,
            Normalized::Records(records) => panic!("expected fallback, got {:?}", records),
        }
    }

    #[test]
    fn career_roadmaps_array_keeps_count_and_order() {
        let result = json!({"career_roadmaps": [
            {"career_title": "A"}, {"career_title": "B"}, {"career_title": "C"},
            {"career_title": "D"}, {"career_title": "E"}
        ]});
        let titles: Vec<_> = records(result)
            .into_iter()
            .map(|r| r.title.unwrap())
            .collect();
        assert_eq!(titles, ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn classify_picks_each_shape() {
        assert_eq!(
            classify(&json!({"career_roadmaps": []})),
            SourceShape::RoadmapsArray(vec![])
        );
        assert_eq!(
            classify(&json!({"roadmap": [{"title": "x"}]})).kind(),
            "nested_roadmap"
        );
        assert_eq!(
            classify(&json!({"roadmap": {"career_roadmaps": [{"title": "x"}]}})).kind(),
            "nested_roadmap"
        );
        assert_eq!(
            classify(&json!([{"career_title": "x"}])).kind(),
            "array_of_records"
        );
        assert_eq!(classify(&json!({"careers": []})).kind(), "plain_object");
        assert_eq!(classify(&json!("not json at all")).kind(), "opaque_text");
        assert_eq!(classify(&Value::Null), SourceShape::Empty);
        assert_eq!(classify(&json!([1, 2, 3])), SourceShape::Empty);
        assert_eq!(classify(&json!(42)), SourceShape::Empty);
    }

    #[test]
    fn career_roadmaps_must_be_an_array() {
        assert_eq!(
            classify(&json!({"career_roadmaps": "soon"})).kind(),
            "plain_object"
        );
        assert_eq!(
            classify(&json!({"roadmap": {"steps": []}})).kind(),
            "plain_object"
        );
    }

    #[test]
    fn fenced_block_is_decoded_ignoring_prose() {
        let text = "Here are your roadmaps:\n```json\n{\"career_roadmaps\":[{\"career_title\":\"SRE\"}]}\n```\nGood luck! {not json}";
        let recs = records(json!(text));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title.as_deref(), Some("SRE"));
    }

    #[test]
    fn untagged_fence_is_decoded() {
        let text = "```\n[{\"title\": \"Analyst\"}]\n```";
        assert_eq!(records(json!(text))[0].title.as_deref(), Some("Analyst"));
    }

    #[test]
    fn braces_are_sliced_out_of_prose() {
        let text = "Sure! {\"roadmap\": [{\"title\": \"DevOps\"}]} Hope this helps.";
        assert_eq!(records(json!(text))[0].title.as_deref(), Some("DevOps"));
    }

    #[test]
    fn unbalanced_or_missing_braces_fall_back_to_text() {
        for text in ["Become a <chef> & cook\nevery day", "} backwards {", "{ half open", ""] {
            let html = fallback(json!(text));
            assert!(html.contains("result-text"), "{}", html);
        }
        let html = fallback(json!("Become a <chef> & cook\nevery day"));
        assert!(html.contains("Become a &lt;chef&gt; &amp; cook<br>every day"));
    }

    #[test]
    fn brace_free_json_text_stays_text() {
        for text in [r#"["Python", "SQL"]"#, "[]", "[1,2,3]", "42", "null"] {
            assert_eq!(classify(&json!(text)).kind(), "opaque_text");
            assert_eq!(decode_embedded_json(text), None);
        }
        let html = fallback(json!(r#"["Python", "SQL"]"#));
        assert!(html.contains("result-text"), "{}", html);
        assert!(html.contains("[&quot;Python&quot;, &quot;SQL&quot;]"));
        assert!(!html.contains("no-results"));
        assert!(fallback(json!("42")).contains(">42<"));
    }

    #[test]
    fn plain_object_dumps_pretty_json() {
        let html = fallback(json!({"careers": [{"name": "<x>"}]}));
        assert!(html.contains(r#"<pre class="json-dump">"#));
        assert!(html.contains("&quot;careers&quot;"));
        assert!(html.contains("&lt;x&gt;"));
        assert!(html.contains('\n'));
    }

    #[test]
    fn nothing_matched_shows_no_results() {
        assert!(fallback(Value::Null).contains("no-results"));
        assert!(fallback(json!([])).contains("no-results"));
    }

    #[test]
    fn aliases_are_tried_in_order() {
        let record = to_record(&json!({
            "title": "Second",
            "career_title": "First",
            "description": "desc",
            "skills": ["a"],
            "required_skills": null,
            "resources": ["r1"],
            "project_ideas": ["p1"],
            "duration": "3 months",
            "recommended_certifications": ["c1"]
        }));
        assert_eq!(record.title.as_deref(), Some("First"));
        assert_eq!(record.summary.as_deref(), Some("desc"));
        assert_eq!(record.skills, ["a"]);
        assert_eq!(record.courses, ["r1"]);
        assert_eq!(record.projects, ["p1"]);
        assert_eq!(record.timeline, Some(Timeline::Text("3 months".into())));
        assert_eq!(record.certifications, ["c1"]);
    }

    #[test]
    fn blank_alias_is_skipped() {
        let obj = json!({"career_title": "  ", "title": "Fallback"});
        let found = first_present(obj.as_object().unwrap(), RecordField::Title.aliases());
        assert_eq!(found, Some(&json!("Fallback")));
    }

    #[test]
    fn every_field_has_aliases() {
        for field in RecordField::ALL {
            assert!(!field.aliases().is_empty());
        }
    }

    #[test]
    fn flatten_uses_key_priority_then_compact_pairs() {
        assert_eq!(
            flatten_item(&json!({"url": "u", "name": "Rust Book", "title": "The Book"})),
            Some("The Book".into())
        );
        assert_eq!(
            flatten_item(&json!({"link": "https://x", "provider": "y"})),
            Some("https://x".into())
        );
        assert_eq!(
            flatten_item(&json!({"a": 1, "b": "two", "c": true, "d": null, "e": 5})),
            Some("a: 1, b: two, c: true, d: null".into())
        );
        assert_eq!(flatten_item(&json!({})), None);
        assert_eq!(flatten_item(&json!(null)), None);
    }

    #[test]
    fn string_list_splits_bullets() {
        let record = to_record(&json!({"skills": "- Python\n- SQL\n\n* Statistics"}));
        assert_eq!(record.skills, ["Python", "SQL", "Statistics"]);
    }

    #[test]
    fn non_object_record_uses_text_as_title() {
        let recs = records(json!({"career_roadmaps": ["Cloud Architect", 7, null]}));
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].title.as_deref(), Some("Cloud Architect"));
        assert_eq!(recs[1].title.as_deref(), Some("7"));
        assert_eq!(recs[2].title, None);
    }

    #[test]
    fn timeline_mapping_keeps_source_order() {
        let record = to_record(&json!({"timeline": {"Month 3": "c", "Month 1": "a"}}));
        match record.timeline {
            Some(Timeline::Phases(phases)) => {
                let labels: Vec<_> = phases.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(labels, ["Month 3", "Month 1"]);
            }
            other => panic!("unexpected timeline {:?}", other),
        }
    }
}
