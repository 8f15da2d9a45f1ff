//! Client-side resource store.
//!
//! One slice per resource type (transactions, categories, admin data, the
//! current profile) plus the authentication gate. Each slice holds the
//! last-known server state and its request lifecycle; the dispatch layer
//! in [`dispatch`] populates the slices through the service client.
//!
//! The store is a plain owned value, not a global: tests and alternative
//! front ends instantiate as many isolated stores as they need.

mod admin;
mod auth;
mod categories;
mod dispatch;
mod error;
mod lifecycle;
mod profile;
mod session;
mod transactions;

pub use admin::AdminSlice;
pub use auth::{AuthGate, AuthPhase, GateError};
pub use categories::CategorySlice;
pub use error::{Result, StoreError};
pub use lifecycle::{Lifecycle, Paging, Ticket};
pub use profile::ProfileSlice;
pub use session::{Session, SessionFile};
pub use transactions::TransactionSlice;

#[derive(Debug)]
pub struct Store {
    pub auth: AuthGate,
    pub transactions: TransactionSlice,
    pub categories: CategorySlice,
    pub admin: AdminSlice,
    pub profile: ProfileSlice,
    session_file: SessionFile,
}

impl Store {
    /// Opens the store, seeding the authentication gate from the persisted
    /// session if one exists.
    pub fn open(session_file: SessionFile) -> Result<Self> {
        let session = session_file.load()?;
        Ok(Self::with_session(session_file, session))
    }

    /// Builds a store with an explicit initial session. Used by `open` and
    /// by tests that want a pre-authenticated gate.
    pub fn with_session(session_file: SessionFile, session: Option<Session>) -> Self {
        Self {
            auth: AuthGate::from_session(session),
            transactions: TransactionSlice::default(),
            categories: CategorySlice::default(),
            admin: AdminSlice::default(),
            profile: ProfileSlice::default(),
            session_file,
        }
    }
}
