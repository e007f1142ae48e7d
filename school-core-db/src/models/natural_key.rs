use school_core_api::EntityType;
use serde_json::Value;

/// Fields whose combined value must be unique among the *active* rows of a type.
///
/// Soft-deleted rows are outside the uniqueness scope, so any number of them
/// may share a key with each other and with one active row.
pub fn natural_key_fields(entity_type: EntityType) -> &'static [&'static str] {
    match entity_type {
        EntityType::User => &["email"],
        EntityType::Admin | EntityType::Student | EntityType::Parent | EntityType::Teacher => {
            &["userId"]
        }
        EntityType::Class => &["name", "section"],
        EntityType::Subject => &["code"],
        EntityType::Attendance => &["studentId", "date"],
        EntityType::Exam => &["name", "classId"],
        EntityType::Mark => &["studentId", "examId", "subjectId"],
        EntityType::Timetable => &["classId", "day"],
        EntityType::Fee | EntityType::Notification | EntityType::Feedback => &[],
    }
}

/// Derive the natural key of a document, or `None` when the type has no key
/// or a key field is missing.
pub fn derive_natural_key(entity_type: EntityType, data: &Value) -> Option<String> {
    let fields = natural_key_fields(entity_type);
    if fields.is_empty() {
        return None;
    }
    let mut parts = Vec::with_capacity(fields.len());
    for field in fields {
        parts.push(key_part(data.get(field)?)?);
    }
    Some(parts.join("|"))
}

fn key_part(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_lowercase())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        // populated references carry their id
        Value::Object(map) => map.get("_id").or_else(|| map.get("id")).and_then(key_part),
        Value::Null | Value::Array(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_email_is_case_insensitive() {
        let a = derive_natural_key(EntityType::User, &json!({"email": "Ada@School.org"}));
        let b = derive_natural_key(EntityType::User, &json!({"email": " ada@school.org "}));
        assert_eq!(a, Some("ada@school.org".to_string()));
        assert_eq!(a, b);
    }

    #[test]
    fn test_composite_keys_need_every_part() {
        let full = json!({"studentId": "s-1", "examId": "e-1", "subjectId": "m-1", "score": 80});
        assert_eq!(
            derive_natural_key(EntityType::Mark, &full),
            Some("s-1|e-1|m-1".to_string())
        );
        let partial = json!({"studentId": "s-1", "examId": "e-1"});
        assert_eq!(derive_natural_key(EntityType::Mark, &partial), None);
    }

    #[test]
    fn test_populated_reference_uses_its_id() {
        let data = json!({"userId": {"_id": "u-42", "name": "Ada"}});
        assert_eq!(
            derive_natural_key(EntityType::Student, &data),
            Some("u-42".to_string())
        );
    }

    #[test]
    fn test_keyless_types() {
        assert_eq!(derive_natural_key(EntityType::Fee, &json!({"amount": 10})), None);
    }
}
