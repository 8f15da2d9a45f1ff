//! Profile slice: the current user's own profile and dashboard stats.

use api_types::{stats::DashboardStats, user::User};

use crate::lifecycle::{Lifecycle, Ticket};

#[derive(Debug, Default)]
pub struct ProfileSlice {
    pub profile: Option<User>,
    pub stats: DashboardStats,
    /// Raised after a successful account deletion; the view routes back to
    /// the anonymous entry point.
    pub account_deleted: bool,
    pub lifecycle: Lifecycle,
}

impl ProfileSlice {
    pub fn finish_fetch(&mut self, ticket: Ticket, profile: User) {
        if !self.lifecycle.settle(ticket) {
            return;
        }
        self.profile = Some(profile);
    }

    pub fn finish_update(&mut self, ticket: Ticket, profile: User) {
        if self
            .lifecycle
            .succeed(ticket, "Profile updated successfully!")
        {
            self.profile = Some(profile);
        }
    }

    pub fn finish_password_change(&mut self, ticket: Ticket) {
        self.lifecycle
            .succeed(ticket, "Password changed successfully!");
    }

    pub fn finish_account_deletion(&mut self, ticket: Ticket) {
        if !self.lifecycle.settle(ticket) {
            return;
        }
        self.profile = None;
        self.account_deleted = true;
    }

    pub fn finish_stats(&mut self, ticket: Ticket, stats: DashboardStats) {
        if !self.lifecycle.settle(ticket) {
            return;
        }
        self.stats = stats;
    }
}
