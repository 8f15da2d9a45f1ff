//! Action layer: each method issues exactly one service call and commits
//! the outcome to the owning slice.
//!
//! Failures never propagate out of a dispatch; they are stored on the
//! slice as display messages. Gate rejections are caught before the call
//! leaves the process.

use api_types::{
    admin::UserFilters,
    auth::{Credentials, RegisterRequest, ResetPassword, VerifyEmailOutcome},
    category::CategoryUpsert,
    export::ExportFormat,
    stats::StatsRange,
    transaction::{TransactionFilters, TransactionUpsert},
    user::{PasswordChange, ProfileUpdate},
};
use client::{Client, ExportPayload};
use uuid::Uuid;

use crate::{
    Store,
    auth::AuthGate,
    lifecycle::Lifecycle,
    session::Session,
};

fn require_token(auth: &AuthGate, lifecycle: &mut Lifecycle) -> Option<String> {
    match auth.require_auth() {
        Ok(token) => Some(token.to_string()),
        Err(err) => {
            lifecycle.reject(err.to_string());
            None
        }
    }
}

fn require_admin_token(auth: &AuthGate, lifecycle: &mut Lifecycle) -> Option<String> {
    match auth.require_admin() {
        Ok(token) => Some(token.to_string()),
        Err(err) => {
            lifecycle.reject(err.to_string());
            None
        }
    }
}

impl Store {
    // --- authentication gate ---

    pub async fn login(&mut self, client: &Client, credentials: &Credentials) {
        self.auth.begin_login(&credentials.username);
        match client.login(credentials).await {
            Ok(response) => {
                let session = Session {
                    token: response.token,
                    user: response.user,
                };
                if let Err(err) = self.session_file.save(&session) {
                    tracing::warn!("failed to persist session: {err}");
                }
                self.auth.login_succeeded(session);
            }
            Err(err) => self.auth.login_failed(&err),
        }
    }

    pub fn logout(&mut self) {
        if let Err(err) = self.session_file.clear() {
            tracing::warn!("failed to clear persisted session: {err}");
        }
        self.auth.logout();
    }

    pub async fn register(&mut self, client: &Client, payload: &RegisterRequest) {
        match client.register(payload).await {
            Ok(_) => {
                self.auth.message = Some("Registration successful! Please login.".to_string());
            }
            Err(err) => self.auth.error = Some(err.user_message()),
        }
    }

    pub async fn forgot_password(&mut self, client: &Client, email: &str) {
        match client.forgot_password(email).await {
            Ok(_) => {
                self.auth.message = Some("Password reset link sent to your email!".to_string());
            }
            Err(err) => self.auth.error = Some(err.user_message()),
        }
    }

    pub async fn reset_password(&mut self, client: &Client, payload: &ResetPassword) {
        match client.reset_password(payload).await {
            Ok(_) => {
                self.auth.message = Some("Password reset successful! Please login.".to_string());
            }
            Err(err) => self.auth.error = Some(err.user_message()),
        }
    }

    pub async fn verify_email(&mut self, client: &Client, token: &str) {
        match client.verify_email(token).await {
            Ok(VerifyEmailOutcome::Verified) => {
                self.auth.message = Some("Email verified successfully! Please login.".to_string());
            }
            Ok(VerifyEmailOutcome::AlreadyVerified) => {
                self.auth.message = Some("This email is already verified.".to_string());
            }
            Ok(VerifyEmailOutcome::TokenAlreadyUsed) => {
                self.auth.message = Some("This link has already been used.".to_string());
            }
            Err(err) => self.auth.error = Some(err.user_message()),
        }
    }

    pub async fn resend_verification(&mut self, client: &Client, email: &str) {
        match client.resend_verification(email).await {
            Ok(_) => self.auth.resend_succeeded(),
            Err(err) => self.auth.error = Some(err.user_message()),
        }
    }

    // --- transactions ---

    pub async fn fetch_transactions(&mut self, client: &Client, filters: &TransactionFilters) {
        let Some(token) = require_token(&self.auth, &mut self.transactions.lifecycle) else {
            return;
        };
        let ticket = self.transactions.lifecycle.begin();
        match client.transactions(&token, filters).await {
            Ok(page) => self.transactions.finish_list(ticket, page),
            Err(err) => {
                self.transactions.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    pub async fn fetch_transaction(&mut self, client: &Client, id: Uuid) {
        let Some(token) = require_token(&self.auth, &mut self.transactions.lifecycle) else {
            return;
        };
        let ticket = self.transactions.lifecycle.begin();
        match client.transaction(&token, id).await {
            Ok(transaction) => self.transactions.finish_detail(ticket, transaction),
            Err(err) => {
                self.transactions.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    /// Dashboard helper: first page with `per_page = limit`.
    pub async fn fetch_recent_transactions(&mut self, client: &Client, limit: u64) {
        let Some(token) = require_token(&self.auth, &mut self.transactions.lifecycle) else {
            return;
        };
        let filters = TransactionFilters {
            page: Some(1),
            per_page: Some(limit),
            ..Default::default()
        };
        let ticket = self.transactions.lifecycle.begin();
        match client.transactions(&token, &filters).await {
            Ok(page) => self.transactions.finish_recent(ticket, page.items),
            Err(err) => {
                self.transactions.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    pub async fn add_transaction(&mut self, client: &Client, payload: &TransactionUpsert) {
        let Some(token) = require_token(&self.auth, &mut self.transactions.lifecycle) else {
            return;
        };
        let ticket = self.transactions.lifecycle.begin_submit();
        match client.create_transaction(&token, payload).await {
            Ok(_) => self.transactions.finish_create(ticket),
            Err(err) => {
                self.transactions.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    pub async fn update_transaction(
        &mut self,
        client: &Client,
        id: Uuid,
        payload: &TransactionUpsert,
    ) {
        let Some(token) = require_token(&self.auth, &mut self.transactions.lifecycle) else {
            return;
        };
        let ticket = self.transactions.lifecycle.begin_submit();
        match client.update_transaction(&token, id, payload).await {
            Ok(_) => self.transactions.finish_update(ticket),
            Err(err) => {
                self.transactions.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    pub async fn delete_transaction(&mut self, client: &Client, id: Uuid) {
        let Some(token) = require_token(&self.auth, &mut self.transactions.lifecycle) else {
            return;
        };
        let ticket = self.transactions.lifecycle.begin();
        match client.delete_transaction(&token, id).await {
            Ok(()) => self.transactions.finish_delete(ticket, id),
            Err(err) => {
                self.transactions.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    /// Returns the payload so the view can save it; the CSV fallback for a
    /// failed csv export is composed by the view from list data.
    pub async fn export_transactions(
        &mut self,
        client: &Client,
        format: ExportFormat,
        filters: &TransactionFilters,
    ) -> Option<ExportPayload> {
        let Some(token) = require_token(&self.auth, &mut self.transactions.lifecycle) else {
            return None;
        };
        let ticket = self.transactions.lifecycle.begin();
        match client.export_transactions(&token, format, filters).await {
            Ok(payload) => {
                self.transactions.finish_export(ticket);
                Some(payload)
            }
            Err(err) => {
                self.transactions.lifecycle.fail(ticket, err.user_message());
                None
            }
        }
    }

    // --- categories ---

    pub async fn fetch_categories(&mut self, client: &Client) {
        let Some(token) = require_token(&self.auth, &mut self.categories.lifecycle) else {
            return;
        };
        let ticket = self.categories.lifecycle.begin();
        match client.categories(&token, None).await {
            Ok(items) => self.categories.finish_list(ticket, items),
            Err(err) => {
                self.categories.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    pub async fn fetch_category(&mut self, client: &Client, id: Uuid) {
        let Some(token) = require_token(&self.auth, &mut self.categories.lifecycle) else {
            return;
        };
        let ticket = self.categories.lifecycle.begin();
        match client.category(&token, id).await {
            Ok(category) => self.categories.finish_detail(ticket, category),
            Err(err) => {
                self.categories.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    pub async fn add_category(&mut self, client: &Client, payload: &CategoryUpsert) {
        let Some(token) = require_token(&self.auth, &mut self.categories.lifecycle) else {
            return;
        };
        let ticket = self.categories.lifecycle.begin_submit();
        match client.create_category(&token, payload).await {
            Ok(category) => self.categories.finish_create(ticket, category),
            Err(err) => {
                self.categories.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    pub async fn update_category(&mut self, client: &Client, id: Uuid, payload: &CategoryUpsert) {
        let Some(token) = require_token(&self.auth, &mut self.categories.lifecycle) else {
            return;
        };
        let ticket = self.categories.lifecycle.begin_submit();
        match client.update_category(&token, id, payload).await {
            Ok(category) => self.categories.finish_update(ticket, category),
            Err(err) => {
                self.categories.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    pub async fn delete_category(&mut self, client: &Client, id: Uuid) {
        let Some(token) = require_token(&self.auth, &mut self.categories.lifecycle) else {
            return;
        };
        let ticket = self.categories.lifecycle.begin();
        match client.delete_category(&token, id).await {
            Ok(()) => self.categories.finish_delete(ticket, id),
            Err(err) => {
                self.categories.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    // --- profile ---

    pub async fn fetch_profile(&mut self, client: &Client) {
        let Some(token) = require_token(&self.auth, &mut self.profile.lifecycle) else {
            return;
        };
        let ticket = self.profile.lifecycle.begin();
        match client.profile(&token).await {
            Ok(profile) => self.profile.finish_fetch(ticket, profile),
            Err(err) => {
                self.profile.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    pub async fn update_profile(&mut self, client: &Client, payload: &ProfileUpdate) {
        let Some(token) = require_token(&self.auth, &mut self.profile.lifecycle) else {
            return;
        };
        let ticket = self.profile.lifecycle.begin_submit();
        match client.update_profile(&token, payload).await {
            Ok(profile) => self.profile.finish_update(ticket, profile),
            Err(err) => {
                self.profile.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    pub async fn change_password(&mut self, client: &Client, payload: &PasswordChange) {
        let Some(token) = require_token(&self.auth, &mut self.profile.lifecycle) else {
            return;
        };
        let ticket = self.profile.lifecycle.begin_submit();
        match client.change_password(&token, payload).await {
            Ok(_) => self.profile.finish_password_change(ticket),
            Err(err) => {
                self.profile.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    /// A successful deletion also clears the persisted session and drops
    /// the gate back to anonymous.
    pub async fn delete_account(&mut self, client: &Client, password: &str) {
        let Some(token) = require_token(&self.auth, &mut self.profile.lifecycle) else {
            return;
        };
        let ticket = self.profile.lifecycle.begin();
        match client.delete_account(&token, password).await {
            Ok(_) => {
                self.profile.finish_account_deletion(ticket);
                if let Err(err) = self.session_file.clear() {
                    tracing::warn!("failed to clear persisted session: {err}");
                }
                self.auth.logout();
            }
            Err(err) => {
                self.profile.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    pub async fn fetch_dashboard_stats(&mut self, client: &Client, range: StatsRange) {
        let Some(token) = require_token(&self.auth, &mut self.profile.lifecycle) else {
            return;
        };
        let ticket = self.profile.lifecycle.begin();
        match client.dashboard_stats(&token, range).await {
            Ok(stats) => self.profile.finish_stats(ticket, stats),
            Err(err) => {
                self.profile.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    // --- admin ---

    pub async fn fetch_users(&mut self, client: &Client, filters: &UserFilters) {
        let Some(token) = require_admin_token(&self.auth, &mut self.admin.lifecycle) else {
            return;
        };
        let ticket = self.admin.lifecycle.begin();
        match client.users(&token, filters).await {
            Ok(page) => self.admin.finish_users(ticket, page),
            Err(err) => {
                self.admin.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    pub async fn fetch_user(&mut self, client: &Client, id: Uuid) {
        let Some(token) = require_admin_token(&self.auth, &mut self.admin.lifecycle) else {
            return;
        };
        let ticket = self.admin.lifecycle.begin();
        match client.user(&token, id).await {
            Ok(user) => self.admin.finish_user(ticket, user),
            Err(err) => {
                self.admin.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    pub async fn toggle_user_status(&mut self, client: &Client, id: Uuid) {
        let Some(token) = require_admin_token(&self.auth, &mut self.admin.lifecycle) else {
            return;
        };
        let ticket = self.admin.lifecycle.begin_submit();
        match client.toggle_user_status(&token, id).await {
            Ok(response) => self.admin.finish_toggle(ticket, id, response.is_active),
            Err(err) => {
                self.admin.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    pub async fn delete_user(&mut self, client: &Client, id: Uuid) {
        let Some(token) = require_admin_token(&self.auth, &mut self.admin.lifecycle) else {
            return;
        };
        let ticket = self.admin.lifecycle.begin();
        match client.delete_user(&token, id).await {
            Ok(()) => self.admin.finish_delete_user(ticket, id),
            Err(err) => {
                self.admin.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    pub async fn fetch_all_transactions(&mut self, client: &Client, filters: &TransactionFilters) {
        let Some(token) = require_admin_token(&self.auth, &mut self.admin.lifecycle) else {
            return;
        };
        let ticket = self.admin.lifecycle.begin();
        match client.all_transactions(&token, filters).await {
            Ok(page) => self.admin.finish_transactions(ticket, page),
            Err(err) => {
                self.admin.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    pub async fn fetch_system_stats(&mut self, client: &Client) {
        let Some(token) = require_admin_token(&self.auth, &mut self.admin.lifecycle) else {
            return;
        };
        let ticket = self.admin.lifecycle.begin();
        match client.system_stats(&token).await {
            Ok(stats) => self.admin.finish_system_stats(ticket, stats),
            Err(err) => {
                self.admin.lifecycle.fail(ticket, err.user_message());
            }
        }
    }

    pub async fn fetch_user_statistics(
        &mut self,
        client: &Client,
        id: Uuid,
        filters: &TransactionFilters,
    ) {
        let Some(token) = require_admin_token(&self.auth, &mut self.admin.lifecycle) else {
            return;
        };
        let ticket = self.admin.lifecycle.begin();
        match client.user_statistics(&token, id, filters).await {
            Ok(stats) => self.admin.finish_user_statistics(ticket, stats),
            Err(err) => {
                self.admin.lifecycle.fail(ticket, err.user_message());
            }
        }
    }
}
