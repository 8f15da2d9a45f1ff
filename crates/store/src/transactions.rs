//! Transaction slice: the paginated list, the detail selection, and the
//! dashboard's recent items.

use api_types::transaction::{TransactionPage, TransactionView};
use uuid::Uuid;

use crate::lifecycle::{Lifecycle, Paging, Ticket};

#[derive(Debug, Default)]
pub struct TransactionSlice {
    pub items: Vec<TransactionView>,
    pub selected: Option<TransactionView>,
    pub recent: Vec<TransactionView>,
    pub paging: Paging,
    pub lifecycle: Lifecycle,
}

impl TransactionSlice {
    pub fn finish_list(&mut self, ticket: Ticket, page: TransactionPage) {
        if !self.lifecycle.settle(ticket) {
            return;
        }
        self.paging.apply(&page);
        self.items = page.items;
    }

    pub fn finish_detail(&mut self, ticket: Ticket, transaction: TransactionView) {
        if !self.lifecycle.settle(ticket) {
            return;
        }
        self.selected = Some(transaction);
    }

    pub fn finish_recent(&mut self, ticket: Ticket, items: Vec<TransactionView>) {
        if !self.lifecycle.settle(ticket) {
            return;
        }
        self.recent = items;
    }

    /// The created entity is not inserted into `items`; a list re-fetch is
    /// the only way to observe it with correct ordering and paging.
    pub fn finish_create(&mut self, ticket: Ticket) {
        self.lifecycle
            .succeed(ticket, "Transaction added successfully!");
    }

    /// Clears `selected` so the next detail view re-fetches fresh state.
    pub fn finish_update(&mut self, ticket: Ticket) {
        if self
            .lifecycle
            .succeed(ticket, "Transaction updated successfully!")
        {
            self.selected = None;
        }
    }

    pub fn finish_delete(&mut self, ticket: Ticket, id: Uuid) {
        if !self.lifecycle.settle(ticket) {
            return;
        }
        self.items.retain(|transaction| transaction.id != id);
        self.lifecycle.message = Some("Transaction deleted successfully!".to_string());
    }

    pub fn finish_export(&mut self, ticket: Ticket) {
        if !self.lifecycle.settle(ticket) {
            return;
        }
        self.lifecycle.message = Some("Transactions exported successfully!".to_string());
    }
}
