use crate::domain::{
    card::Card,
    due::DueWindow,
    options::{DueDateFilter, ViewOptions},
};

/// Filters cards by the active priority, assignee and due-date filters
///
/// The three dimensions are AND-combined; an empty list (or a due-date
/// filter of `none`) places no constraint on its dimension. Due dates are
/// measured against the current local day.
///
/// # Examples
/// ```
/// use boardview_core::domain::{filter_cards, Card, CardId, ColumnId, Priority, ViewOptions};
///
/// let cards = vec![
///     Card::new(CardId(1), "Fix login".to_string(), ColumnId(1)).with_priority(Priority::Urgent),
///     Card::new(CardId(2), "Tidy CSS".to_string(), ColumnId(1)).with_priority(Priority::Low),
/// ];
/// let mut options = ViewOptions::default();
/// options.active_filters.priority = vec!["urgent".to_string()];
///
/// let kept = filter_cards(&cards, &options);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].id, CardId(1));
/// ```
pub fn filter_cards<'a, I>(cards: I, options: &ViewOptions) -> Vec<&'a Card>
where
    I: IntoIterator<Item = &'a Card>,
{
    filter_cards_at(cards, options, &DueWindow::now())
}

/// [`filter_cards`] measured against an explicit due-date window
pub fn filter_cards_at<'a, I>(cards: I, options: &ViewOptions, window: &DueWindow) -> Vec<&'a Card>
where
    I: IntoIterator<Item = &'a Card>,
{
    cards
        .into_iter()
        .filter(|card| matches_filters(card, options, window))
        .collect()
}

fn matches_filters(card: &Card, options: &ViewOptions, window: &DueWindow) -> bool {
    let filters = &options.active_filters;

    if !filters.priority.is_empty() {
        let listed = card
            .priority
            .map(|p| filters.priority.iter().any(|wanted| wanted == p.as_str()))
            .unwrap_or(false);
        if !listed {
            return false;
        }
    }

    if !filters.assignee.is_empty() {
        let listed = card
            .assignee_id
            .as_ref()
            .map(|id| filters.assignee.contains(id))
            .unwrap_or(false);
        if !listed {
            return false;
        }
    }

    if filters.due_date != DueDateFilter::None {
        return card
            .due_date
            .map(|due| window.matches(filters.due_date, due))
            .unwrap_or(false);
    }

    true
}
