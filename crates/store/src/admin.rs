//! Admin slice: user management, cross-user transactions, and system
//! statistics.

use api_types::{
    stats::{DashboardStats, SystemStats},
    transaction::{TransactionPage, TransactionView},
    user::User,
};
use uuid::Uuid;

use crate::lifecycle::{Lifecycle, Paging, Ticket};

#[derive(Debug, Default)]
pub struct AdminSlice {
    pub users: Vec<User>,
    pub selected: Option<User>,
    pub transactions: Vec<TransactionView>,
    pub system_stats: SystemStats,
    pub user_statistics: Option<DashboardStats>,
    pub paging: Paging,
    pub lifecycle: Lifecycle,
}

impl AdminSlice {
    pub fn finish_users(&mut self, ticket: Ticket, page: api_types::admin::UserPage) {
        if !self.lifecycle.settle(ticket) {
            return;
        }
        self.paging.apply(&page);
        self.users = page.items;
    }

    pub fn finish_user(&mut self, ticket: Ticket, user: User) {
        if !self.lifecycle.settle(ticket) {
            return;
        }
        self.selected = Some(user);
    }

    /// Applies the toggled flag to the list entry and, when it is the same
    /// user, to the detail selection.
    pub fn finish_toggle(&mut self, ticket: Ticket, id: Uuid, is_active: bool) {
        let verb = if is_active { "activated" } else { "deactivated" };
        if !self
            .lifecycle
            .succeed(ticket, &format!("User {verb} successfully!"))
        {
            return;
        }
        if let Some(user) = self.users.iter_mut().find(|user| user.id == id) {
            user.is_active = is_active;
        }
        if let Some(selected) = self.selected.as_mut()
            && selected.id == id
        {
            selected.is_active = is_active;
        }
    }

    pub fn finish_delete_user(&mut self, ticket: Ticket, id: Uuid) {
        if !self.lifecycle.settle(ticket) {
            return;
        }
        self.users.retain(|user| user.id != id);
        if self.selected.as_ref().is_some_and(|user| user.id == id) {
            self.selected = None;
        }
        self.lifecycle.message = Some("User deleted successfully!".to_string());
    }

    pub fn finish_transactions(&mut self, ticket: Ticket, page: TransactionPage) {
        if !self.lifecycle.settle(ticket) {
            return;
        }
        self.paging.apply(&page);
        self.transactions = page.items;
    }

    pub fn finish_system_stats(&mut self, ticket: Ticket, stats: SystemStats) {
        if !self.lifecycle.settle(ticket) {
            return;
        }
        self.system_stats = stats;
    }

    pub fn finish_user_statistics(&mut self, ticket: Ticket, stats: DashboardStats) {
        if !self.lifecycle.settle(ticket) {
            return;
        }
        self.user_statistics = Some(stats);
    }
}
