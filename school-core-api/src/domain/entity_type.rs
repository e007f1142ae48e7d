use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ApiError;

/// Type tag of every soft-deletable collection.
///
/// The set is closed: anything else arriving over the wire is rejected with
/// [`ApiError::InvalidType`] before storage is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "entity_type", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    User,
    Admin,
    Student,
    Parent,
    Teacher,
    Class,
    Subject,
    Attendance,
    Exam,
    Mark,
    Timetable,
    Fee,
    Notification,
    Feedback,
}

impl EntityType {
    pub const ALL: [EntityType; 14] = [
        EntityType::User,
        EntityType::Admin,
        EntityType::Student,
        EntityType::Parent,
        EntityType::Teacher,
        EntityType::Class,
        EntityType::Subject,
        EntityType::Attendance,
        EntityType::Exam,
        EntityType::Mark,
        EntityType::Timetable,
        EntityType::Fee,
        EntityType::Notification,
        EntityType::Feedback,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::User => "user",
            EntityType::Admin => "admin",
            EntityType::Student => "student",
            EntityType::Parent => "parent",
            EntityType::Teacher => "teacher",
            EntityType::Class => "class",
            EntityType::Subject => "subject",
            EntityType::Attendance => "attendance",
            EntityType::Exam => "exam",
            EntityType::Mark => "mark",
            EntityType::Timetable => "timetable",
            EntityType::Fee => "fee",
            EntityType::Notification => "notification",
            EntityType::Feedback => "feedback",
        }
    }

    /// Profile types that point at a `user` row through their `userId` field.
    pub fn links_user(self) -> bool {
        matches!(
            self,
            EntityType::Admin | EntityType::Student | EntityType::Parent | EntityType::Teacher
        )
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        EntityType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ApiError::InvalidType(s.to_string()))
    }
}

/// Selector used by the history query: one type, or every type at once.
///
/// `history` is the aggregate view name used by the admin UI; it is a
/// selector only and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeSelector {
    #[default]
    All,
    Only(EntityType),
}

impl TypeSelector {
    pub const AGGREGATE: &'static str = "history";

    pub fn parse(raw: Option<&str>) -> Result<Self, ApiError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(TypeSelector::All),
            Some(s) if s.eq_ignore_ascii_case(Self::AGGREGATE) => Ok(TypeSelector::All),
            Some(s) => s.parse().map(TypeSelector::Only),
        }
    }

    pub fn matches(&self, entity_type: EntityType) -> bool {
        match self {
            TypeSelector::All => true,
            TypeSelector::Only(t) => *t == entity_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_type() {
        for t in EntityType::ALL {
            assert_eq!(t.as_str().parse::<EntityType>().unwrap(), t);
        }
        assert_eq!("Student".parse::<EntityType>().unwrap(), EntityType::Student);
    }

    #[test]
    fn test_unknown_type_is_invalid() {
        let err = "course".parse::<EntityType>().unwrap_err();
        assert_eq!(err, ApiError::InvalidType("course".to_string()));
        assert!("history".parse::<EntityType>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&EntityType::Timetable).unwrap();
        assert_eq!(json, "\"timetable\"");
        let parsed: EntityType = serde_json::from_str("\"feedback\"").unwrap();
        assert_eq!(parsed, EntityType::Feedback);
    }

    #[test]
    fn test_type_selector() {
        assert_eq!(TypeSelector::parse(None).unwrap(), TypeSelector::All);
        assert_eq!(TypeSelector::parse(Some("history")).unwrap(), TypeSelector::All);
        assert_eq!(TypeSelector::parse(Some("")).unwrap(), TypeSelector::All);
        assert_eq!(
            TypeSelector::parse(Some("fee")).unwrap(),
            TypeSelector::Only(EntityType::Fee)
        );
        assert!(TypeSelector::parse(Some("nope")).is_err());

        assert!(TypeSelector::All.matches(EntityType::Mark));
        assert!(!TypeSelector::Only(EntityType::Fee).matches(EntityType::Mark));
    }

    #[test]
    fn test_links_user() {
        let linked: Vec<EntityType> = EntityType::ALL.into_iter().filter(|t| t.links_user()).collect();
        assert_eq!(
            linked,
            vec![EntityType::Admin, EntityType::Student, EntityType::Parent, EntityType::Teacher]
        );
    }
}
