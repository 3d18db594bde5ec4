use crate::domain::{
    card::Card,
    options::{OrderBy, OrderDirection, ViewOptions},
};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Orders cards by the configured key and direction
///
/// The sort is stable: cards with equal keys keep their input order in both
/// directions. The input is left untouched; a new ordering of references is
/// returned.
///
/// # Examples
/// ```
/// use boardview_core::domain::{order_cards, Card, CardId, ColumnId, ViewOptions};
///
/// let cards = vec![
///     Card::new(CardId(1), "B".to_string(), ColumnId(1)).with_order(2),
///     Card::new(CardId(2), "A".to_string(), ColumnId(1)).with_order(1),
/// ];
///
/// let ordered = order_cards(&cards, &ViewOptions::default());
/// assert_eq!(ordered[0].id, CardId(2));
/// ```
pub fn order_cards<'a, I>(cards: I, options: &ViewOptions) -> Vec<&'a Card>
where
    I: IntoIterator<Item = &'a Card>,
{
    let mut ordered: Vec<&'a Card> = cards.into_iter().collect();
    let (field, direction) = (options.order_by, options.order_direction);

    ordered.sort_by(|a, b| {
        let cmp = compare_cards(a, b, field);

        match direction {
            OrderDirection::Asc => cmp,
            OrderDirection::Desc => cmp.reverse(),
        }
    });

    ordered
}

fn compare_cards(a: &Card, b: &Card, field: OrderBy) -> Ordering {
    match field {
        OrderBy::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        OrderBy::Created => a
            .created_at
            .timestamp_millis()
            .cmp(&b.created_at.timestamp_millis()),
        OrderBy::Updated => a
            .updated_at
            .timestamp_millis()
            .cmp(&b.updated_at.timestamp_millis()),
        OrderBy::Priority => a.priority_rank().cmp(&b.priority_rank()),
        OrderBy::DueDate => compare_due_dates(a.due_date, b.due_date),
        OrderBy::Manual => a.order.cmp(&b.order),
    }
}

/// Compare due dates with a missing date treated as the latest possible one
///
/// Ascending puts undated cards last; descending therefore puts them first.
fn compare_due_dates(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a_date), Some(b_date)) => a_date.timestamp_millis().cmp(&b_date.timestamp_millis()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
