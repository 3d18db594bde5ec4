use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::domain::{
    board::Column,
    card::{Card, Priority},
    due::{DueBucket, DueWindow},
    filtering::filter_cards_at,
    options::{GroupBy, ViewOptions},
    sorting::order_cards,
};

/// Label of the single group produced when grouping is off
pub const ALL_CARDS_LABEL: &str = "All Cards";
/// Label of the group holding cards without an assignee
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// One bucket of cards on the board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardGroup<'a> {
    pub id: i64,
    pub cards: Vec<&'a Card>,
}

impl<'a> CardGroup<'a> {
    pub fn new(id: i64, cards: Vec<&'a Card>) -> Self {
        Self { id, cards }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Ordered mapping of group label to group
///
/// Serializes as a JSON object whose keys follow board order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedCards<'a> {
    groups: Vec<(String, CardGroup<'a>)>,
}

impl<'a> GroupedCards<'a> {
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Inserts a group. A label seen before keeps its position and takes the new group.
    pub fn insert(&mut self, label: impl Into<String>, group: CardGroup<'a>) {
        let label = label.into();
        match self.groups.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, slot)) => *slot = group,
            None => self.groups.push((label, group)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&CardGroup<'a>> {
        self.groups
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, group)| group)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CardGroup<'a>)> {
        self.groups.iter().map(|(label, group)| (label.as_str(), group))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of cards across all groups
    pub fn card_count(&self) -> usize {
        self.groups.iter().map(|(_, group)| group.cards.len()).sum()
    }

    fn push_unless_empty(
        &mut self,
        label: impl Into<String>,
        group: CardGroup<'a>,
        keep_empty: bool,
    ) {
        if keep_empty || !group.is_empty() {
            self.insert(label, group);
        }
    }
}

impl Serialize for GroupedCards<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (label, group) in &self.groups {
            map.serialize_entry(label, group)?;
        }
        map.end()
    }
}

/// Filters, orders and groups cards for rendering
///
/// Runs [`filter_cards`](crate::domain::filtering::filter_cards) and
/// [`order_cards`] first, then buckets the result by `options.group_by`.
/// Cards keep their processed order inside each group.
///
/// # Examples
/// ```
/// use boardview_core::domain::{
///     group_cards, Card, CardId, ColumnId, GroupBy, Priority, ViewOptions,
/// };
///
/// let cards = vec![
///     Card::new(CardId(1), "Ship it".to_string(), ColumnId(1))
///         .with_priority(Priority::Urgent)
///         .with_order(2),
///     Card::new(CardId(2), "Polish".to_string(), ColumnId(1))
///         .with_priority(Priority::Low)
///         .with_order(1),
/// ];
/// let options = ViewOptions { group_by: GroupBy::None, ..Default::default() };
///
/// let groups = group_cards(&cards, &[], &options);
/// let all = groups.get("All Cards").unwrap();
/// assert_eq!(all.id, 0);
/// assert_eq!(all.cards[0].id, CardId(2));
/// ```
pub fn group_cards<'a>(
    cards: &'a [Card],
    columns: &[Column],
    options: &ViewOptions,
) -> GroupedCards<'a> {
    group_cards_at(cards, columns, options, &DueWindow::now())
}

/// [`group_cards`] measured against an explicit due-date window
pub fn group_cards_at<'a>(
    cards: &'a [Card],
    columns: &[Column],
    options: &ViewOptions,
    window: &DueWindow,
) -> GroupedCards<'a> {
    let processed = order_cards(filter_cards_at(cards, options, window), options);
    let keep_empty = options.keep_empty_groups();

    let grouped = match options.group_by {
        GroupBy::Column => by_column(&processed, columns, keep_empty),
        GroupBy::Priority => by_priority(&processed, keep_empty),
        GroupBy::Assignee => by_assignee(&processed, keep_empty),
        GroupBy::DueDate => by_due_date(&processed, window, keep_empty),
        GroupBy::None => {
            let mut grouped = GroupedCards::new();
            grouped.insert(ALL_CARDS_LABEL, CardGroup::new(0, processed.clone()));
            grouped
        }
    };

    tracing::debug!(
        group_by = %options.group_by,
        order_by = %options.order_by,
        direction = %options.order_direction,
        input = cards.len(),
        shown = processed.len(),
        groups = grouped.len(),
        "grouped cards"
    );

    grouped
}

fn by_column<'a>(
    processed: &[&'a Card],
    columns: &[Column],
    keep_empty: bool,
) -> GroupedCards<'a> {
    let mut grouped = GroupedCards::new();
    for column in columns {
        let cards = processed
            .iter()
            .copied()
            .filter(|card| card.column_id == column.id)
            .collect();
        let group = CardGroup::new(column.id.0, cards);
        grouped.push_unless_empty(column.title.clone(), group, keep_empty);
    }
    grouped
}

fn by_priority<'a>(processed: &[&'a Card], keep_empty: bool) -> GroupedCards<'a> {
    let mut grouped = GroupedCards::new();
    for (index, priority) in Priority::ALL.iter().enumerate() {
        let cards = processed
            .iter()
            .copied()
            .filter(|card| match priority {
                Priority::None => card.has_no_priority(),
                wanted => card.priority.as_ref() == Some(wanted),
            })
            .collect();
        let group = CardGroup::new(index as i64, cards);
        grouped.push_unless_empty(priority.label(), group, keep_empty);
    }
    grouped
}

fn by_assignee<'a>(processed: &[&'a Card], keep_empty: bool) -> GroupedCards<'a> {
    let mut assigned: Vec<(&'a str, Vec<&'a Card>)> = Vec::new();
    let mut unassigned = Vec::new();

    for card in processed.iter().copied() {
        match card.assignee_id.as_deref() {
            Some(assignee) => match assigned.iter_mut().find(|(id, _)| *id == assignee) {
                Some((_, cards)) => cards.push(card),
                None => assigned.push((assignee, vec![card])),
            },
            None => unassigned.push(card),
        }
    }

    let mut grouped = GroupedCards::new();
    let mut next_id = 0;
    for (assignee, cards) in assigned {
        let group = CardGroup::new(next_id, cards);
        grouped.push_unless_empty(format!("Assignee {}", assignee), group, keep_empty);
        next_id += 1;
    }
    let group = CardGroup::new(next_id, unassigned);
    grouped.push_unless_empty(UNASSIGNED_LABEL, group, keep_empty);
    grouped
}

fn by_due_date<'a>(
    processed: &[&'a Card],
    window: &DueWindow,
    keep_empty: bool,
) -> GroupedCards<'a> {
    let mut grouped = GroupedCards::new();
    for (index, bucket) in DueBucket::ALL.iter().enumerate() {
        let cards = processed
            .iter()
            .copied()
            .filter(|card| window.bucket(card.due_date) == *bucket)
            .collect();
        let group = CardGroup::new(index as i64, cards);
        grouped.push_unless_empty(bucket.label(), group, keep_empty);
    }
    grouped
}
