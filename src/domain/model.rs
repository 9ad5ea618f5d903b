use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Form field ids, in the order the form presents them. They double as the
/// request body keys.
pub const FIELD_IDS: [&str; 10] = [
    "skills",
    "interests",
    "strengths",
    "personality_traits",
    "work_style",
    "education",
    "salary_expectations",
    "tech_preference",
    "learning_ability",
    "past_projects",
];

/// Request body for `POST /api/recommend`. Every field is free text and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRequest {
    pub skills: String,
    pub interests: String,
    pub strengths: String,
    pub personality_traits: String,
    pub work_style: String,
    pub education: String,
    pub salary_expectations: String,
    pub tech_preference: String,
    pub learning_ability: String,
    pub past_projects: String,
}

impl ProfileRequest {
    /// Builds a request from `(field id, value)` pairs. Unknown ids are
    /// ignored and missing ids stay empty.
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut request = Self::default();
        for (id, value) in fields {
            if let Some(slot) = request.field_mut(id.as_ref()) {
                *slot = value.into();
            } else {
                tracing::debug!("Ignoring unknown profile field '{}'", id.as_ref());
            }
        }
        request
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut String> {
        let slot = match id {
            "skills" => &mut self.skills,
            "interests" => &mut self.interests,
            "strengths" => &mut self.strengths,
            "personality_traits" => &mut self.personality_traits,
            "work_style" => &mut self.work_style,
            "education" => &mut self.education,
            "salary_expectations" => &mut self.salary_expectations,
            "tech_preference" => &mut self.tech_preference,
            "learning_ability" => &mut self.learning_ability,
            "past_projects" => &mut self.past_projects,
            _ => return None,
        };
        Some(slot)
    }

    /// Overwrites fields with every non-empty value from `other`.
    pub fn merge_from(&mut self, other: &ProfileRequest) {
        for id in FIELD_IDS {
            let value = other.field(id);
            if !value.is_empty() {
                if let Some(slot) = self.field_mut(id) {
                    *slot = value.to_string();
                }
            }
        }
    }

    pub fn field(&self, id: &str) -> &str {
        match id {
            "skills" => &self.skills,
            "interests" => &self.interests,
            "strengths" => &self.strengths,
            "personality_traits" => &self.personality_traits,
            "work_style" => &self.work_style,
            "education" => &self.education,
            "salary_expectations" => &self.salary_expectations,
            "tech_preference" => &self.tech_preference,
            "learning_ability" => &self.learning_ability,
            "past_projects" => &self.past_projects,
            _ => "",
        }
    }

    pub fn is_blank(&self) -> bool {
        FIELD_IDS.iter().all(|id| self.field(id).trim().is_empty())
    }
}

/// Decoded body of a backend response. Only `result` drives rendering; the
/// rest is carried for display and error reporting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseEnvelope {
    pub status: Option<String>,
    pub result: Value,
    pub timestamp: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ResponseEnvelope {
    /// Lenient decode: a non-object body, or one whose known fields have
    /// unexpected types, still yields an envelope. Only `result` is kept then.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) => {
                let result = map.remove("result").unwrap_or(Value::Null);
                let text = |map: &serde_json::Map<String, Value>, key: &str| {
                    map.get(key).and_then(Value::as_str).map(str::to_string)
                };
                Self {
                    status: text(&map, "status"),
                    timestamp: text(&map, "timestamp"),
                    message: text(&map, "message"),
                    error: text(&map, "error"),
                    result,
                }
            }
            _ => Self::default(),
        }
    }

    /// Backend timestamps are naive UTC ISO-8601, with optional fractional seconds.
    pub fn generated_at(&self) -> Option<NaiveDateTime> {
        let raw = self.timestamp.as_deref()?.trim();
        let raw = raw.strip_suffix('Z').unwrap_or(raw);
        raw.parse::<NaiveDateTime>().ok()
    }

    /// The server-supplied failure text: `message` first, then `error`.
    pub fn failure_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.error.as_deref().filter(|m| !m.trim().is_empty()))
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    pub version: String,
}

impl HealthStatus {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

/// One suggested career path, normalized from whatever shape the backend sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoadmapRecord {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub skills: Vec<String>,
    pub courses: Vec<String>,
    pub projects: Vec<String>,
    pub timeline: Option<Timeline>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Timeline {
    Text(String),
    Steps(Vec<Value>),
    /// Label to description, in source order.
    Phases(Vec<(String, Value)>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_all_ten_keys() {
        let request = ProfileRequest::from_fields([("skills", "Rust"), ("education", "BSc")]);
        let body = serde_json::to_value(&request).unwrap();
        let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();

        assert_eq!(keys.len(), 10);
        for id in FIELD_IDS {
            assert!(keys.contains(&id), "missing key {}", id);
        }
        assert_eq!(body["skills"], "Rust");
        assert_eq!(body["interests"], "");
    }

    #[test]
    fn unknown_field_ids_are_ignored() {
        let request = ProfileRequest::from_fields([("favourite_colour", "blue")]);
        assert!(request.is_blank());
    }

    #[test]
    fn merge_keeps_existing_values_for_empty_fields() {
        let mut base = ProfileRequest::from_fields([("skills", "Go"), ("interests", "AI")]);
        let overrides = ProfileRequest::from_fields([("skills", "Rust")]);
        base.merge_from(&overrides);

        assert_eq!(base.skills, "Rust");
        assert_eq!(base.interests, "AI");
    }

    #[test]
    fn envelope_decodes_leniently() {
        let envelope = ResponseEnvelope::from_value(json!({
            "status": "success",
            "result": {"career_roadmaps": []},
            "timestamp": "2025-03-01T10:15:30.123456"
        }));
        assert_eq!(envelope.status.as_deref(), Some("success"));
        assert!(envelope.result.is_object());
        assert!(envelope.generated_at().is_some());

        let odd = ResponseEnvelope::from_value(json!({"status": 7, "result": "text"}));
        assert_eq!(odd.status, None);
        assert_eq!(odd.result, json!("text"));

        let not_object = ResponseEnvelope::from_value(json!([1, 2, 3]));
        assert!(not_object.result.is_null());
    }

    #[test]
    fn failure_message_prefers_message_over_error() {
        let both = ResponseEnvelope::from_value(json!({"message": "boom", "error": "bad"}));
        assert_eq!(both.failure_message(), Some("boom"));

        let only_error = ResponseEnvelope::from_value(json!({"error": "No input data provided"}));
        assert_eq!(only_error.failure_message(), Some("No input data provided"));

        let neither = ResponseEnvelope::from_value(json!({"status": "error"}));
        assert_eq!(neither.failure_message(), None);
    }
}
