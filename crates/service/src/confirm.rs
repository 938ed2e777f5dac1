//! Destructive actions that need an explicit user confirmation.
//!
//! Instead of blocking on a dialog, the service hands back a [`Confirmation`]
//! describing what would happen. Passing it to
//! [`CatalogService::confirm`](crate::CatalogService::confirm) performs the
//! action; dropping it cancels.

use katalog_core::ProductId;
use katalog_products::Product;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Delete one record.
    Remove { id: ProductId, name: String },
    /// Wipe persisted storage and the in-memory collection.
    Reset { count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "dropping a confirmation cancels the action"]
pub struct Confirmation {
    action: PendingAction,
}

impl Confirmation {
    pub(crate) fn new(action: PendingAction) -> Self {
        Self { action }
    }

    pub fn action(&self) -> &PendingAction {
        &self.action
    }

    pub(crate) fn into_action(self) -> PendingAction {
        self.action
    }

    /// Question to show the user.
    pub fn prompt(&self) -> String {
        match &self.action {
            PendingAction::Remove { name, .. } => format!("Remove product \"{name}\"?"),
            PendingAction::Reset { count } => {
                format!("Delete all stored data ({count} products)?")
            }
        }
    }
}

/// Result of a confirmed action.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Removed(Product),
    Reset { cleared: usize },
}
