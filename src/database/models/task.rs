use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

/// Wire names of the six user-editable fields, in form order.
pub const CONTENT_FIELDS: [&str; 6] = [
    "eventName",
    "startTime",
    "endTime",
    "location",
    "description",
    "category",
];

/// A stored task. `user` is the owning identity and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    #[sqlx(rename = "user_id")]
    pub user: Uuid,
    pub event_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn content(&self) -> TaskContent {
        TaskContent {
            event_name: self.event_name.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
        }
    }
}

/// Request body for create and update. Every field is optional on the wire;
/// the access layer and the store decide what is actually required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl TaskFields {
    /// Field values keyed by wire name. Empty strings count as absent.
    pub fn entries(&self) -> [(&'static str, Option<&str>); 6] {
        let values = [
            &self.event_name,
            &self.start_time,
            &self.end_time,
            &self.location,
            &self.description,
            &self.category,
        ];
        let mut entries = [("", None); 6];
        for (slot, (name, value)) in entries.iter_mut().zip(CONTENT_FIELDS.iter().zip(values)) {
            *slot = (*name, value.as_deref().filter(|v| !v.is_empty()));
        }
        entries
    }

    pub fn any_present(&self) -> bool {
        self.entries().iter().any(|(_, value)| value.is_some())
    }

    pub fn missing(&self) -> Vec<&'static str> {
        self.entries()
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect()
    }

    /// Schema check applied at the storage boundary: every field present,
    /// timestamps parseable. All violations are reported together.
    pub fn validate(&self) -> Result<TaskContent, HashMap<String, String>> {
        let mut field_errors = HashMap::new();

        let mut text = |name: &str, value: &Option<String>| -> String {
            match value.as_deref().filter(|v| !v.is_empty()) {
                Some(v) => v.to_string(),
                None => {
                    field_errors.insert(name.to_string(), "This field is required".to_string());
                    String::new()
                }
            }
        };

        let event_name = text("eventName", &self.event_name);
        let start_raw = text("startTime", &self.start_time);
        let end_raw = text("endTime", &self.end_time);
        let location = text("location", &self.location);
        let description = text("description", &self.description);
        let category = text("category", &self.category);

        let mut timestamp = |name: &str, raw: &str| -> Option<DateTime<Utc>> {
            if raw.is_empty() {
                return None;
            }
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                field_errors.insert(name.to_string(), format!("Invalid timestamp format: {}", raw));
            }
            parsed
        };

        let start_time = timestamp("startTime", &start_raw);
        let end_time = timestamp("endTime", &end_raw);

        match (start_time, end_time) {
            (Some(start_time), Some(end_time)) if field_errors.is_empty() => Ok(TaskContent {
                event_name,
                start_time,
                end_time,
                location,
                description,
                category,
            }),
            _ => Err(field_errors),
        }
    }
}

/// The six content fields after schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskContent {
    pub event_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub category: String,
}

/// Query string of `GET /api/tasks/filtered`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilterParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Parsed filter. Absent criteria do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskCriteria {
    /// Inclusive lower bound on `startTime`
    pub start_time: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `endTime`
    pub end_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub category: Option<String>,
}

impl TaskCriteria {
    pub fn from_params(params: &TaskFilterParams) -> Result<Self, HashMap<String, String>> {
        let mut field_errors = HashMap::new();
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

        let mut bound = |name: &str, value: &Option<String>| {
            let raw = non_empty(value)?;
            let parsed = parse_timestamp(&raw);
            if parsed.is_none() {
                field_errors.insert(name.to_string(), format!("Invalid timestamp format: {}", raw));
            }
            parsed
        };

        let criteria = Self {
            start_time: bound("startTime", &params.start_time),
            end_time: bound("endTime", &params.end_time),
            location: non_empty(&params.location),
            category: non_empty(&params.category),
        };

        if field_errors.is_empty() {
            Ok(criteria)
        } else {
            Err(field_errors)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_time.is_none()
            && self.end_time.is_none()
            && self.location.is_none()
            && self.category.is_none()
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.start_time.map_or(true, |bound| task.start_time >= bound)
            && self.end_time.map_or(true, |bound| task.end_time <= bound)
            && self.location.as_ref().map_or(true, |l| &task.location == l)
            && self.category.as_ref().map_or(true, |c| &task.category == c)
    }
}

/// Accepts RFC 3339 and the zone-less forms produced by `datetime-local`
/// inputs. Zone-less values are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Timestamp as it appears in JSON responses.
pub fn wire_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
