//! View options state owned by the board's composition root.
//!
//! The store keeps the current [`ViewOptions`] and whether the options panel
//! is open. Every change to the options is written through to [`Storage`];
//! panel state lives in memory only. Mutation takes `&mut self`, and the new
//! value is assigned before the write is awaited, so readers never observe a
//! half-merged state.

use crate::{
    domain::{
        group_cards, ActiveFilters, Card, Column, GroupedCards, PartialViewOptions, ViewOptions,
    },
    storage::Storage,
};

pub struct ViewOptionsStore<S: Storage> {
    storage: S,
    view_options: ViewOptions,
    is_panel_open: bool,
}

impl<S: Storage> ViewOptionsStore<S> {
    /// Creates a store with default options, ignoring anything persisted
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            view_options: ViewOptions::default(),
            is_panel_open: false,
        }
    }

    /// Creates a store from the persisted options, falling back to defaults
    pub async fn load(storage: S) -> Self {
        if let Err(err) = storage.initialize().await {
            tracing::warn!(error = %err, "could not initialize view options storage");
        }

        let view_options = match storage.load_view_options().await {
            Ok(Some(options)) => options,
            Ok(None) => ViewOptions::default(),
            Err(err) => {
                tracing::warn!(error = %err, "could not load view options, using defaults");
                ViewOptions::default()
            }
        };

        Self {
            storage,
            view_options,
            is_panel_open: false,
        }
    }

    pub fn view_options(&self) -> &ViewOptions {
        &self.view_options
    }

    pub fn is_panel_open(&self) -> bool {
        self.is_panel_open
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Merges a partial update into the current options and persists it
    pub async fn update_view_options(&mut self, partial: PartialViewOptions) {
        tracing::debug!(?partial, "updating view options");
        self.view_options.merge(partial);
        self.persist().await;
    }

    /// Restores the default options and persists them
    pub async fn reset_view_options(&mut self) {
        tracing::debug!("resetting view options");
        self.view_options = ViewOptions::default();
        self.persist().await;
    }

    /// Drops every active filter, keeping grouping, ordering and display settings
    pub async fn clear_filters(&mut self) {
        self.view_options.active_filters = ActiveFilters::default();
        self.persist().await;
    }

    pub fn open_panel(&mut self) {
        self.is_panel_open = true;
    }

    pub fn close_panel(&mut self) {
        self.is_panel_open = false;
    }

    pub fn toggle_panel(&mut self) {
        self.is_panel_open = !self.is_panel_open;
    }

    /// Groups cards with the current options
    pub fn group<'a>(&self, cards: &'a [Card], columns: &[Column]) -> GroupedCards<'a> {
        group_cards(cards, columns, &self.view_options)
    }

    // A failed write leaves the in-memory options authoritative.
    async fn persist(&self) {
        if let Err(err) = self.storage.save_view_options(&self.view_options).await {
            tracing::warn!(error = %err, "failed to persist view options");
        }
    }
}
