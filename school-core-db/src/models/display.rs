use school_core_api::EntityType;
use serde_json::Value;
use uuid::Uuid;

/// Fallback used when no source yields a display name.
pub const UNKNOWN_NAME: &str = "Unknown";

/// One candidate in a type's display-name priority list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    /// Name of the `user` row referenced by `userId`.
    LinkedUser,
    /// A single field of the document.
    Field(&'static str),
    /// Several fields joined by a space; absent parts are skipped.
    Joined(&'static [&'static str]),
}

/// Display-name priority list per entity type, highest priority first.
pub fn name_sources(entity_type: EntityType) -> &'static [NameSource] {
    use NameSource::{Field, Joined, LinkedUser};
    match entity_type {
        EntityType::User => &[Field("name"), Field("email")],
        EntityType::Admin => &[LinkedUser, Field("name"), Field("email")],
        EntityType::Student => &[
            LinkedUser,
            Joined(&["firstName", "lastName"]),
            Field("name"),
            Field("admissionNumber"),
        ],
        EntityType::Parent => &[
            LinkedUser,
            Joined(&["firstName", "lastName"]),
            Field("name"),
            Field("email"),
        ],
        EntityType::Teacher => &[
            LinkedUser,
            Joined(&["firstName", "lastName"]),
            Field("name"),
            Field("employeeId"),
        ],
        EntityType::Class => &[Joined(&["name", "section"]), Field("name")],
        EntityType::Subject => &[Field("name"), Field("code")],
        EntityType::Attendance => &[Field("date"), Field("studentId")],
        EntityType::Exam => &[Field("name"), Field("examType")],
        EntityType::Mark => &[Field("studentId"), Field("examId")],
        EntityType::Timetable => &[Field("day"), Field("classId")],
        EntityType::Fee => &[Field("feeType"), Field("title"), Field("studentId")],
        EntityType::Notification => &[Field("title"), Field("message")],
        EntityType::Feedback => &[Field("subject"), Field("message")],
    }
}

/// Document fields matched by the recycle-bin free-text search.
pub fn search_fields(entity_type: EntityType) -> &'static [&'static str] {
    match entity_type {
        EntityType::User | EntityType::Admin => &["name", "email"],
        EntityType::Student => &["firstName", "lastName", "name", "admissionNumber", "email"],
        EntityType::Parent => &["firstName", "lastName", "name", "email", "phone"],
        EntityType::Teacher => &["firstName", "lastName", "name", "employeeId", "email"],
        EntityType::Class => &["name", "section"],
        EntityType::Subject => &["name", "code"],
        EntityType::Attendance => &["date", "status"],
        EntityType::Exam => &["name", "examType"],
        EntityType::Mark => &["grade", "remarks"],
        EntityType::Timetable => &["day"],
        EntityType::Fee => &["feeType", "title", "status"],
        EntityType::Notification => &["title", "message"],
        EntityType::Feedback => &["subject", "message", "name"],
    }
}

/// Case-insensitive substring match over the type's search fields.
pub fn matches_search(entity_type: EntityType, data: &Value, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    search_fields(entity_type).iter().any(|field| {
        field_text(data, field).is_some_and(|text| text.to_lowercase().contains(&needle))
    })
}

/// The user id a profile document points at, whether stored as a plain id or
/// as a populated `{_id, name}` object.
pub fn linked_user_id(data: &Value) -> Option<Uuid> {
    let raw = match data.get("userId")? {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("_id").or_else(|| map.get("id"))?.as_str()?,
        _ => return None,
    };
    Uuid::parse_str(raw.trim()).ok()
}

/// Name embedded in a populated `userId` object, if the document carries one.
fn embedded_user_name(data: &Value) -> Option<String> {
    match data.get("userId")? {
        Value::Object(_) => field_text(data.get("userId")?, "name"),
        _ => None,
    }
}

/// Walk the priority list for `entity_type` and return the first non-empty
/// name. `linked_user_name` is the current name of the row `userId` points at.
pub fn resolve_display_name(
    entity_type: EntityType,
    data: &Value,
    linked_user_name: Option<&str>,
) -> String {
    for source in name_sources(entity_type) {
        let candidate = match source {
            NameSource::LinkedUser => linked_user_name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .or_else(|| embedded_user_name(data)),
            NameSource::Field(field) => field_text(data, field),
            NameSource::Joined(fields) => {
                let parts: Vec<String> = fields.iter().filter_map(|f| field_text(data, f)).collect();
                (!parts.is_empty()).then(|| parts.join(" "))
            }
        };
        if let Some(name) = candidate {
            return name;
        }
    }
    UNKNOWN_NAME.to_string()
}

fn field_text(data: &Value, field: &str) -> Option<String> {
    match data.get(field)? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
