//! Request-lifecycle bookkeeping shared by every resource slice.
//!
//! Each slice owns one [`Lifecycle`]. Starting an operation hands out a
//! [`Ticket`] tagged with a monotonically increasing sequence number; a
//! completion is only committed when its ticket is still the latest one
//! issued, so a superseded in-flight request can never overwrite a newer
//! response.

use api_types::Page;

/// Proof that an operation was started; required to commit its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct Lifecycle {
    pub loading: bool,
    pub error: Option<String>,
    pub success: bool,
    pub message: Option<String>,
    seq: u64,
}

impl Lifecycle {
    /// `pending` transition for read and delete operations: raise
    /// `loading`, clear `error`.
    pub fn begin(&mut self) -> Ticket {
        self.seq += 1;
        self.loading = true;
        self.error = None;
        Ticket(self.seq)
    }

    /// `pending` transition for create/update: additionally clears
    /// `success` so a form cannot observe a stale submit outcome.
    pub fn begin_submit(&mut self) -> Ticket {
        self.success = false;
        self.begin()
    }

    /// Lowers `loading` if the ticket is still current. Returns `false`
    /// when the completion is stale and must be ignored.
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        if ticket.0 != self.seq {
            tracing::debug!(ticket = ticket.0, latest = self.seq, "stale completion ignored");
            return false;
        }
        self.loading = false;
        true
    }

    /// `fulfilled` for mutations: settle, mark success, set the message.
    pub fn succeed(&mut self, ticket: Ticket, message: &str) -> bool {
        if !self.settle(ticket) {
            return false;
        }
        self.success = true;
        self.message = Some(message.to_string());
        true
    }

    /// `rejected`: settle and store the display message.
    pub fn fail(&mut self, ticket: Ticket, error: String) -> bool {
        if !self.settle(ticket) {
            return false;
        }
        self.error = Some(error);
        true
    }

    /// Stores an error without an in-flight operation (e.g. a gate
    /// rejection caught before dispatch).
    pub fn reject(&mut self, error: String) {
        self.loading = false;
        self.error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn clear_message(&mut self) {
        self.message = None;
        self.success = false;
    }
}

/// Pagination cursor mirrored from the last list response.
#[derive(Debug)]
pub struct Paging {
    pub total: u64,
    pub page: u64,
    pub pages: u64,
    pub per_page: u64,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            total: 0,
            page: 1,
            pages: 1,
            per_page: 10,
        }
    }
}

impl Paging {
    pub fn apply<T>(&mut self, page: &Page<T>) {
        self.total = page.total;
        self.page = page.page;
        self.pages = page.pages;
        self.per_page = page.per_page;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_clears_error_and_raises_loading() {
        let mut lifecycle = Lifecycle::default();
        lifecycle.error = Some("old".to_string());
        let ticket = lifecycle.begin();
        assert!(lifecycle.loading);
        assert!(lifecycle.error.is_none());
        assert!(lifecycle.settle(ticket));
        assert!(!lifecycle.loading);
    }

    #[test]
    fn begin_submit_clears_success() {
        let mut lifecycle = Lifecycle::default();
        lifecycle.success = true;
        lifecycle.begin_submit();
        assert!(!lifecycle.success);
    }

    #[test]
    fn clear_helpers_reset_transient_state() {
        let mut lifecycle = Lifecycle::default();
        let ticket = lifecycle.begin_submit();
        assert!(lifecycle.succeed(ticket, "done"));
        lifecycle.clear_message();
        assert!(lifecycle.message.is_none());
        assert!(!lifecycle.success);
        lifecycle.reject("denied".to_string());
        lifecycle.clear_error();
        assert!(lifecycle.error.is_none());
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut lifecycle = Lifecycle::default();
        let first = lifecycle.begin();
        let second = lifecycle.begin();
        assert!(!lifecycle.fail(first, "too late".to_string()));
        assert!(lifecycle.error.is_none());
        assert!(lifecycle.succeed(second, "done"));
        assert!(lifecycle.success);
    }
}
