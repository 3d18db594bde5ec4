use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

use crate::domain::board::ColumnId;
use crate::error::ViewError;

/// Numeric identifier of a card, assigned by the board backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub i64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Priority of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
    None,
}

impl Priority {
    /// Every priority, most urgent first
    pub const ALL: [Priority; 5] = [
        Priority::Urgent,
        Priority::High,
        Priority::Medium,
        Priority::Low,
        Priority::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        }
    }

    /// Sort rank, higher is more urgent
    pub fn rank(&self) -> u8 {
        match self {
            Self::Urgent => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
            Self::None => 0,
        }
    }

    /// Group heading shown on the board
    pub fn label(&self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::None => "No Priority",
        }
    }
}

impl FromStr for Priority {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "urgent" => Ok(Self::Urgent),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            "none" => Ok(Self::None),
            _ => Err(ViewError::InvalidOption {
                option: "priority",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Unknown priority strings from the backend are read as "no priority".
fn deserialize_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawUserId {
    Text(String),
    Number(i64),
}

// User ids arrive as strings or numbers depending on the backend; filters
// compare them as strings.
fn deserialize_user_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawUserId> = Option::deserialize(deserializer)?;
    Ok(raw.map(|id| match id {
        RawUserId::Text(text) => text,
        RawUserId::Number(number) => number.to_string(),
    }))
}

/// A unit of work shown on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub order: i64,
    pub column_id: ColumnId,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "deserialize_priority")]
    pub priority: Option<Priority>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "deserialize_user_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_by: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_user_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub assignee_id: Option<String>,
}

impl Card {
    /// Creates a card in the given column with no priority, assignee or due date
    pub fn new(id: CardId, title: String, column_id: ColumnId) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description: None,
            order: 0,
            column_id,
            labels: Vec::new(),
            attachments: Vec::new(),
            priority: None,
            created_at: now,
            due_date: None,
            updated_at: now,
            created_by: None,
            assignee_id: None,
        }
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_assignee(mut self, assignee_id: impl Into<String>) -> Self {
        self.assignee_id = Some(assignee_id.into());
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sort rank of the card's priority; cards without one rank lowest
    pub fn priority_rank(&self) -> u8 {
        self.priority.map(|p| p.rank()).unwrap_or(0)
    }

    /// True when the card has no priority or an explicit `none`
    pub fn has_no_priority(&self) -> bool {
        matches!(self.priority, None | Some(Priority::None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_rank() {
        assert_eq!(Priority::Urgent.rank(), 4);
        assert_eq!(Priority::High.rank(), 3);
        assert_eq!(Priority::Medium.rank(), 2);
        assert_eq!(Priority::Low.rank(), 1);
        assert_eq!(Priority::None.rank(), 0);
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!("urgent".parse::<Priority>().unwrap(), Priority::Urgent);
        assert_eq!("none".parse::<Priority>().unwrap(), Priority::None);
        assert!("critical".parse::<Priority>().is_err());
    }

    #[test]
    fn test_card_priority_rank_without_priority() {
        let card = Card::new(CardId(1), "Card".to_string(), ColumnId(1));
        assert_eq!(card.priority_rank(), 0);
        assert!(card.has_no_priority());

        let card = card.with_priority(Priority::None);
        assert!(card.has_no_priority());
    }

    #[test]
    fn test_card_deserializes_camel_case() {
        let json = r#"{
            "id": 7,
            "title": "Write docs",
            "order": 3,
            "columnId": 2,
            "labels": ["docs"],
            "priority": "high",
            "createdAt": "2026-10-01T09:00:00Z",
            "dueDate": "2026-10-20T00:00:00Z",
            "updatedAt": "2026-10-02T09:00:00Z",
            "assigneeId": "u-42"
        }"#;

        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.id, CardId(7));
        assert_eq!(card.column_id, ColumnId(2));
        assert_eq!(card.priority, Some(Priority::High));
        assert_eq!(card.assignee_id.as_deref(), Some("u-42"));
        assert!(card.due_date.is_some());
        assert!(card.created_by.is_none());
    }

    #[test]
    fn test_card_numeric_user_ids_read_as_strings() {
        let json = r#"{
            "id": 3,
            "title": "Numeric ids",
            "order": 0,
            "columnId": 1,
            "createdAt": "2026-10-01T09:00:00Z",
            "updatedAt": "2026-10-01T09:00:00Z",
            "assigneeId": 5,
            "createdBy": 3
        }"#;

        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.assignee_id.as_deref(), Some("5"));
        assert_eq!(card.created_by.as_deref(), Some("3"));

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["assigneeId"], "5");
    }

    #[test]
    fn test_card_null_assignee_reads_as_none() {
        let json = r#"{
            "id": 4,
            "title": "Unassigned",
            "order": 0,
            "columnId": 1,
            "createdAt": "2026-10-01T09:00:00Z",
            "updatedAt": "2026-10-01T09:00:00Z",
            "assigneeId": null
        }"#;

        let card: Card = serde_json::from_str(json).unwrap();
        assert!(card.assignee_id.is_none());
    }

    #[test]
    fn test_card_unknown_priority_reads_as_none() {
        let json = r#"{
            "id": 1,
            "title": "Odd",
            "order": 0,
            "columnId": 1,
            "priority": "critical",
            "createdAt": "2026-10-01T09:00:00Z",
            "updatedAt": "2026-10-01T09:00:00Z"
        }"#;

        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.priority, None);
        assert_eq!(card.priority_rank(), 0);
    }
}
