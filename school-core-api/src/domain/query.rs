use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity_type::{EntityType, TypeSelector};
use super::history_action::HistoryAction;
use super::pagination::PageParams;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

impl SortDirection {
    /// Parse `<field>_asc` / `<field>_desc`. Anything else is the default (newest first).
    pub fn parse(raw: Option<&str>, field: &str) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.strip_prefix(field) == Some("_asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

/// Inclusive time range. Date-only bounds cover the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn parse(from: Option<&str>, to: Option<&str>) -> ApiResult<Self> {
        let from = non_empty(from)
            .map(|s| parse_bound(s, NaiveTime::MIN))
            .transpose()?;
        let to = non_empty(to)
            .map(|s| parse_bound(s, end_of_day()))
            .transpose()?;
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(ApiError::ValidationError(
                    "fromDate must not be after toDate".to_string(),
                ));
            }
        }
        Ok(Self { from, to })
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.map_or(true, |f| at >= f) && self.to.map_or(true, |t| at <= t)
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap_or(NaiveTime::MIN)
}

fn parse_bound(raw: &str, day_time: NaiveTime) -> ApiResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| Utc.from_utc_datetime(&d.and_time(day_time)))
        .map_err(|_| ApiError::ValidationError(format!("Invalid date: {raw}")))
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn normalized_search(raw: Option<&str>) -> Option<String> {
    non_empty(raw).map(str::to_string)
}

/// Raw `GET /api/admin/recycle-bin` query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecycleBinQuery {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedListParams {
    pub entity_type: EntityType,
    pub page: PageParams,
    pub search: Option<String>,
    pub range: DateRange,
    pub sort: SortDirection,
}

impl RecycleBinQuery {
    pub fn parse(&self) -> ApiResult<DeletedListParams> {
        let raw_type = self
            .entity_type
            .as_deref()
            .ok_or_else(|| ApiError::InvalidType(String::new()))?;
        Ok(DeletedListParams {
            entity_type: raw_type.parse()?,
            page: PageParams::from_raw(self.page.as_deref(), self.limit.as_deref()),
            search: normalized_search(self.search.as_deref()),
            range: DateRange::parse(self.from_date.as_deref(), self.to_date.as_deref())?,
            sort: SortDirection::parse(self.sort_by.as_deref(), "deletedAt"),
        })
    }
}

/// Raw `GET /api/admin/recycle-history` query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
}

/// Exact-match filter on the affected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemFilter {
    Any,
    Id(Uuid),
    /// The caller asked for an id that cannot exist; the result is empty.
    Unmatchable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryParams {
    pub page: PageParams,
    pub types: TypeSelector,
    pub item: ItemFilter,
    pub action: Option<HistoryAction>,
    pub search: Option<String>,
    pub range: DateRange,
    pub sort: SortDirection,
}

impl HistoryQuery {
    pub fn parse(&self) -> ApiResult<HistoryParams> {
        let item = match non_empty(self.item_id.as_deref()) {
            None => ItemFilter::Any,
            Some(raw) => Uuid::parse_str(raw)
                .map(ItemFilter::Id)
                .unwrap_or(ItemFilter::Unmatchable),
        };
        Ok(HistoryParams {
            page: PageParams::from_raw(self.page.as_deref(), self.limit.as_deref()),
            types: TypeSelector::parse(self.entity_type.as_deref())?,
            item,
            action: non_empty(self.action.as_deref())
                .map(str::parse)
                .transpose()?,
            search: normalized_search(self.search.as_deref()),
            range: DateRange::parse(self.from_date.as_deref(), self.to_date.as_deref())?,
            sort: SortDirection::parse(self.sort_by.as_deref(), "timestamp"),
        })
    }
}

/// Raw `GET /api/admin/entities/{type}` query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_deleted: Option<String>,
}

impl EntityListQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams::from_raw(self.page.as_deref(), self.limit.as_deref())
    }

    pub fn include_deleted(&self) -> bool {
        matches!(
            self.include_deleted.as_deref().map(str::trim),
            Some("true") | Some("1")
        )
    }
}
