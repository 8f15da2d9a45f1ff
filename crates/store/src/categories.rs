//! Category slice.
//!
//! Only the canonical list is stored; the income/expense partitions are
//! derived on read, so a kind change on update relocates the category
//! without any manual list bookkeeping.

use api_types::{category::Category, transaction::TransactionKind};
use uuid::Uuid;

use crate::lifecycle::{Lifecycle, Ticket};

#[derive(Debug, Default)]
pub struct CategorySlice {
    pub items: Vec<Category>,
    pub selected: Option<Category>,
    pub lifecycle: Lifecycle,
}

impl CategorySlice {
    pub fn of_kind(&self, kind: TransactionKind) -> Vec<&Category> {
        self.items
            .iter()
            .filter(|category| category.kind == kind)
            .collect()
    }

    pub fn income(&self) -> Vec<&Category> {
        self.of_kind(TransactionKind::Income)
    }

    pub fn expense(&self) -> Vec<&Category> {
        self.of_kind(TransactionKind::Expense)
    }

    pub fn by_id(&self, id: Uuid) -> Option<&Category> {
        self.items.iter().find(|category| category.id == id)
    }

    pub fn finish_list(&mut self, ticket: Ticket, items: Vec<Category>) {
        if !self.lifecycle.settle(ticket) {
            return;
        }
        self.items = items;
    }

    pub fn finish_detail(&mut self, ticket: Ticket, category: Category) {
        if !self.lifecycle.settle(ticket) {
            return;
        }
        self.selected = Some(category);
    }

    /// The server returns the created entity, so it is appended to the
    /// canonical list directly; the partitions pick it up on read.
    pub fn finish_create(&mut self, ticket: Ticket, category: Category) {
        if self.lifecycle.succeed(ticket, "Category added successfully!") {
            self.items.push(category);
        }
    }

    pub fn finish_update(&mut self, ticket: Ticket, category: Category) {
        if !self
            .lifecycle
            .succeed(ticket, "Category updated successfully!")
        {
            return;
        }
        if let Some(existing) = self.items.iter_mut().find(|item| item.id == category.id) {
            *existing = category;
        } else {
            self.items.push(category);
        }
        self.selected = None;
    }

    pub fn finish_delete(&mut self, ticket: Ticket, id: Uuid) {
        if !self.lifecycle.settle(ticket) {
            return;
        }
        self.items.retain(|category| category.id != id);
        self.lifecycle.message = Some("Category deleted successfully!".to_string());
    }
}
