pub mod board;
pub mod card;
pub mod display;
pub mod due;
pub mod filtering;
pub mod grouping;
pub mod options;
pub mod sorting;

pub use board::{Column, ColumnId};
pub use card::{Card, CardId, Priority};
pub use display::{card_heading, format_date};
pub use due::{DueBucket, DueWindow};
pub use filtering::{filter_cards, filter_cards_at};
pub use grouping::{group_cards, group_cards_at, CardGroup, GroupedCards};
pub use options::{
    ActiveFilters, DateFormat, DisplayProperties, DueDateFilter, GroupBy, OrderBy, OrderDirection,
    PartialActiveFilters, PartialDisplayProperties, PartialViewOptions, SubGroupBy, ViewOptions,
};
pub use sorting::order_cards;
