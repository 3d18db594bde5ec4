//! User-selected display configuration for the board.
//!
//! Every option enum tolerates unknown input when deserialized: the value
//! falls back to the enum's default instead of failing, so a stale or
//! hand-edited persisted entry still yields a usable board. `FromStr` stays
//! strict for callers that want to reject bad input.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::ViewError;

/// How cards are bucketed on the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum GroupBy {
    #[default]
    Column,
    Priority,
    Assignee,
    DueDate,
    None,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Column => "column",
            Self::Priority => "priority",
            Self::Assignee => "assignee",
            Self::DueDate => "dueDate",
            Self::None => "none",
        }
    }
}

impl FromStr for GroupBy {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "column" => Ok(Self::Column),
            "priority" => Ok(Self::Priority),
            "assignee" => Ok(Self::Assignee),
            "dueDate" => Ok(Self::DueDate),
            "none" => Ok(Self::None),
            _ => Err(ViewError::InvalidOption {
                option: "groupBy",
                value: s.to_string(),
            }),
        }
    }
}

/// Second-level grouping. Stored and round-tripped, not applied by the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum SubGroupBy {
    #[default]
    None,
    Priority,
    Assignee,
}

impl SubGroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Priority => "priority",
            Self::Assignee => "assignee",
        }
    }
}

impl FromStr for SubGroupBy {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "priority" => Ok(Self::Priority),
            "assignee" => Ok(Self::Assignee),
            _ => Err(ViewError::InvalidOption {
                option: "subGroupBy",
                value: s.to_string(),
            }),
        }
    }
}

/// Key cards are sorted by within a group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum OrderBy {
    #[default]
    Manual,
    Created,
    Updated,
    Priority,
    DueDate,
    Title,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Priority => "priority",
            Self::DueDate => "dueDate",
            Self::Title => "title",
        }
    }
}

impl FromStr for OrderBy {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(Self::Manual),
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "priority" => Ok(Self::Priority),
            "dueDate" => Ok(Self::DueDate),
            "title" => Ok(Self::Title),
            _ => Err(ViewError::InvalidOption {
                option: "orderBy",
                value: s.to_string(),
            }),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for OrderDirection {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ViewError::InvalidOption {
                option: "orderDirection",
                value: s.to_string(),
            }),
        }
    }
}

/// How dates are rendered on cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum DateFormat {
    #[default]
    Readable,
    Calendar,
}

impl DateFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Readable => "readable",
            Self::Calendar => "calendar",
        }
    }
}

impl FromStr for DateFormat {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "readable" => Ok(Self::Readable),
            "calendar" => Ok(Self::Calendar),
            _ => Err(ViewError::InvalidOption {
                option: "dateFormat",
                value: s.to_string(),
            }),
        }
    }
}

/// Due-date window a card must fall into to pass the filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum DueDateFilter {
    Overdue,
    Today,
    ThisWeek,
    ThisMonth,
    #[default]
    None,
}

impl DueDateFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::Today => "today",
            Self::ThisWeek => "thisWeek",
            Self::ThisMonth => "thisMonth",
            Self::None => "none",
        }
    }
}

impl FromStr for DueDateFilter {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overdue" => Ok(Self::Overdue),
            "today" => Ok(Self::Today),
            "thisWeek" => Ok(Self::ThisWeek),
            "thisMonth" => Ok(Self::ThisMonth),
            "none" => Ok(Self::None),
            _ => Err(ViewError::InvalidOption {
                option: "dueDate",
                value: s.to_string(),
            }),
        }
    }
}

impl From<String> for GroupBy {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl From<String> for SubGroupBy {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl From<String> for OrderBy {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl From<String> for OrderDirection {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl From<String> for DateFormat {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl From<String> for DueDateFilter {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which card fields the renderer shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayProperties {
    pub priority: bool,
    pub assignee: bool,
    pub due_date: bool,
    pub labels: bool,
    pub description: bool,
    pub attachments: bool,
    pub created_date: bool,
    pub updated_date: bool,
    pub milestone: bool,
    pub estimate: bool,
}

impl Default for DisplayProperties {
    fn default() -> Self {
        Self {
            priority: true,
            assignee: true,
            due_date: true,
            labels: true,
            description: false,
            attachments: true,
            created_date: false,
            updated_date: false,
            milestone: false,
            estimate: false,
        }
    }
}

impl DisplayProperties {
    /// Overrides only the keys present in `partial`
    pub fn merge(&mut self, partial: PartialDisplayProperties) {
        apply(&mut self.priority, partial.priority);
        apply(&mut self.assignee, partial.assignee);
        apply(&mut self.due_date, partial.due_date);
        apply(&mut self.labels, partial.labels);
        apply(&mut self.description, partial.description);
        apply(&mut self.attachments, partial.attachments);
        apply(&mut self.created_date, partial.created_date);
        apply(&mut self.updated_date, partial.updated_date);
        apply(&mut self.milestone, partial.milestone);
        apply(&mut self.estimate, partial.estimate);
    }
}

/// Filters narrowing which cards are shown
///
/// An empty list (or `DueDateFilter::None`) places no constraint on that
/// dimension. `labels` is kept for the panel but not applied by
/// [`filter_cards`](crate::domain::filtering::filter_cards).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActiveFilters {
    pub priority: Vec<String>,
    pub assignee: Vec<String>,
    pub labels: Vec<String>,
    pub due_date: DueDateFilter,
}

impl ActiveFilters {
    /// Overrides only the keys present in `partial`
    pub fn merge(&mut self, partial: PartialActiveFilters) {
        apply(&mut self.priority, partial.priority);
        apply(&mut self.assignee, partial.assignee);
        apply(&mut self.labels, partial.labels);
        apply(&mut self.due_date, partial.due_date);
    }

    /// Number of dimensions currently constraining the card set
    pub fn active_count(&self) -> usize {
        [
            !self.priority.is_empty(),
            !self.assignee.is_empty(),
            !self.labels.is_empty(),
            self.due_date != DueDateFilter::None,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// The user's complete display configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewOptions {
    pub group_by: GroupBy,
    pub sub_group_by: SubGroupBy,
    pub order_by: OrderBy,
    pub order_direction: OrderDirection,
    pub show_completed_cards: bool,
    pub show_empty_groups: bool,
    pub show_empty_columns: bool,
    pub show_card_ids: bool,
    pub date_format: DateFormat,
    pub display_properties: DisplayProperties,
    pub active_filters: ActiveFilters,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            group_by: GroupBy::Column,
            sub_group_by: SubGroupBy::None,
            order_by: OrderBy::Manual,
            order_direction: OrderDirection::Asc,
            show_completed_cards: true,
            show_empty_groups: true,
            show_empty_columns: true,
            show_card_ids: false,
            date_format: DateFormat::Readable,
            display_properties: DisplayProperties::default(),
            active_filters: ActiveFilters::default(),
        }
    }
}

impl ViewOptions {
    /// Applies a partial update.
    ///
    /// Scalars present in `partial` replace the current value. The nested
    /// `display_properties` and `active_filters` objects are merged key by
    /// key, so they always stay fully populated.
    pub fn merge(&mut self, partial: PartialViewOptions) {
        apply(&mut self.group_by, partial.group_by);
        apply(&mut self.sub_group_by, partial.sub_group_by);
        apply(&mut self.order_by, partial.order_by);
        apply(&mut self.order_direction, partial.order_direction);
        apply(&mut self.show_completed_cards, partial.show_completed_cards);
        apply(&mut self.show_empty_groups, partial.show_empty_groups);
        apply(&mut self.show_empty_columns, partial.show_empty_columns);
        apply(&mut self.show_card_ids, partial.show_card_ids);
        apply(&mut self.date_format, partial.date_format);

        if let Some(display_properties) = partial.display_properties {
            self.display_properties.merge(display_properties);
        }
        if let Some(active_filters) = partial.active_filters {
            self.active_filters.merge(active_filters);
        }
    }

    /// Whether grouping keeps buckets that end up with no cards.
    ///
    /// `show_empty_columns` is carried for the panel but folds into this one
    /// flag; the grouping code never reads it separately.
    pub fn keep_empty_groups(&self) -> bool {
        self.show_empty_groups
    }

    pub fn active_filter_count(&self) -> usize {
        self.active_filters.active_count()
    }

    pub fn has_active_filters(&self) -> bool {
        self.active_filter_count() > 0
    }
}

/// Partial update for [`DisplayProperties`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialDisplayProperties {
    pub priority: Option<bool>,
    pub assignee: Option<bool>,
    pub due_date: Option<bool>,
    pub labels: Option<bool>,
    pub description: Option<bool>,
    pub attachments: Option<bool>,
    pub created_date: Option<bool>,
    pub updated_date: Option<bool>,
    pub milestone: Option<bool>,
    pub estimate: Option<bool>,
}

/// Partial update for [`ActiveFilters`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialActiveFilters {
    pub priority: Option<Vec<String>>,
    pub assignee: Option<Vec<String>>,
    pub labels: Option<Vec<String>>,
    pub due_date: Option<DueDateFilter>,
}

/// Partial update for [`ViewOptions`], as sent by panel controls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialViewOptions {
    pub group_by: Option<GroupBy>,
    pub sub_group_by: Option<SubGroupBy>,
    pub order_by: Option<OrderBy>,
    pub order_direction: Option<OrderDirection>,
    pub show_completed_cards: Option<bool>,
    pub show_empty_groups: Option<bool>,
    pub show_empty_columns: Option<bool>,
    pub show_card_ids: Option<bool>,
    pub date_format: Option<DateFormat>,
    pub display_properties: Option<PartialDisplayProperties>,
    pub active_filters: Option<PartialActiveFilters>,
}

fn apply<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ViewOptions::default();

        assert_eq!(options.group_by, GroupBy::Column);
        assert_eq!(options.order_by, OrderBy::Manual);
        assert_eq!(options.order_direction, OrderDirection::Asc);
        assert_eq!(options.active_filters.due_date, DueDateFilter::None);
        assert!(!options.has_active_filters());
    }

    #[test]
    fn test_merge_replaces_scalars() {
        let mut options = ViewOptions::default();
        options.merge(PartialViewOptions {
            group_by: Some(GroupBy::Priority),
            order_direction: Some(OrderDirection::Desc),
            show_card_ids: Some(true),
            ..Default::default()
        });

        assert_eq!(options.group_by, GroupBy::Priority);
        assert_eq!(options.order_direction, OrderDirection::Desc);
        assert!(options.show_card_ids);
        assert_eq!(options.order_by, OrderBy::Manual);
    }

    #[test]
    fn test_merge_preserves_untouched_nested_keys() {
        let mut options = ViewOptions::default();
        options.active_filters.assignee = vec!["u-1".to_string()];
        let before = options.clone();

        options.merge(PartialViewOptions {
            display_properties: Some(PartialDisplayProperties {
                priority: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        });

        assert!(!options.display_properties.priority);
        assert_eq!(
            DisplayProperties {
                priority: before.display_properties.priority,
                ..options.display_properties
            },
            before.display_properties
        );
        assert_eq!(options.active_filters, before.active_filters);
    }

    #[test]
    fn test_merge_active_filters_per_key() {
        let mut options = ViewOptions::default();
        options.active_filters.priority = vec!["high".to_string()];

        options.merge(PartialViewOptions {
            active_filters: Some(PartialActiveFilters {
                due_date: Some(DueDateFilter::Overdue),
                ..Default::default()
            }),
            ..Default::default()
        });

        assert_eq!(options.active_filters.priority, vec!["high".to_string()]);
        assert_eq!(options.active_filters.due_date, DueDateFilter::Overdue);
        assert_eq!(options.active_filter_count(), 2);
    }

    #[test]
    fn test_partial_from_json() {
        let partial: PartialViewOptions =
            serde_json::from_str(r#"{"displayProperties": {"labels": false}}"#).unwrap();

        let mut options = ViewOptions::default();
        options.merge(partial);

        assert!(!options.display_properties.labels);
        assert!(options.display_properties.priority);
    }

    #[test]
    fn test_unknown_enum_values_fall_back() {
        let json = r#"{"groupBy": "swimlane", "orderBy": "random", "orderDirection": "sideways"}"#;
        let options: ViewOptions = serde_json::from_str(json).unwrap();

        assert_eq!(options.group_by, GroupBy::Column);
        assert_eq!(options.order_by, OrderBy::Manual);
        assert_eq!(options.order_direction, OrderDirection::Asc);
    }

    #[test]
    fn test_strict_parsing_rejects_unknown() {
        assert!("swimlane".parse::<GroupBy>().is_err());
        assert_eq!("dueDate".parse::<GroupBy>().unwrap(), GroupBy::DueDate);
        assert_eq!("thisWeek".parse::<DueDateFilter>().unwrap(), DueDateFilter::ThisWeek);
    }

    #[test]
    fn test_options_serialize_camel_case() {
        let options = ViewOptions {
            group_by: GroupBy::DueDate,
            ..Default::default()
        };
        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(json["groupBy"], "dueDate");
        assert_eq!(json["activeFilters"]["dueDate"], "none");
        assert_eq!(json["displayProperties"]["createdDate"], false);

        let back: ViewOptions = serde_json::from_value(json).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let options: ViewOptions = serde_json::from_str(r#"{"showCardIds": true}"#).unwrap();

        assert!(options.show_card_ids);
        assert_eq!(options.display_properties, DisplayProperties::default());
    }
}
