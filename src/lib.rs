//! # Boardview Core
//!
//! View options and the card view pipeline for kanban boards.
//!
//! This crate turns a flat list of cards into the filtered, ordered and
//! grouped structure a board or list view renders, and keeps the user's
//! view options in a store that persists them between sessions. It has no
//! dependency on a specific UI or backend: cards and columns come in as
//! plain data.

pub mod domain;
pub mod error;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use domain::{
    board::{Column, ColumnId},
    card::{Card, CardId, Priority},
    filtering::filter_cards,
    grouping::{group_cards, CardGroup, GroupedCards},
    options::{GroupBy, OrderBy, OrderDirection, PartialViewOptions, ViewOptions},
    sorting::order_cards,
};
pub use error::{Result, ViewError};
pub use storage::Storage;
pub use store::ViewOptionsStore;
