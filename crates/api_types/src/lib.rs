use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generic paginated list envelope returned by every list endpoint.
///
/// Invariant (server-owned, mirrored here): `page * per_page` windows into
/// `total` and `items.len() <= per_page`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub pages: u64,
    pub per_page: u64,
}

/// Structured error body returned by the server on failures.
///
/// The `code` is the branching key; `message` is display-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: Option<ErrorCode>,
    pub message: Option<String>,
    /// Set when `code` is `email_verification_required`.
    pub email: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidCredentials,
    EmailVerificationRequired,
    DuplicateUsername,
    DuplicateEmail,
    TokenExpired,
    TokenAlreadyUsed,
    AlreadyVerified,
    DefaultCategory,
    NotFound,
    #[serde(other)]
    Unknown,
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    impl TransactionKind {
        /// Returns the canonical kind string used on the wire.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Income => "income",
                Self::Expense => "expense",
            }
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub user_id: Uuid,
        pub kind: TransactionKind,
        /// Positive amount in integer minor units (cents).
        pub amount_minor: i64,
        /// Dangling references are allowed: the category may have been
        /// deleted after the transaction was recorded.
        pub category_id: Option<Uuid>,
        pub category_name: Option<String>,
        pub date: NaiveDate,
        pub note: Option<String>,
    }

    /// Payload for create and full-replace update.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct TransactionUpsert {
        pub kind: TransactionKind,
        pub amount_minor: i64,
        pub category_id: Option<Uuid>,
        pub date: NaiveDate,
        pub note: Option<String>,
    }

    /// Query parameters accepted by the transaction list endpoints.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct TransactionFilters {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub search: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub kind: Option<TransactionKind>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub category_id: Option<Uuid>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub date_from: Option<NaiveDate>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub date_to: Option<NaiveDate>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub amount_min_minor: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub amount_max_minor: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub page: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub per_page: Option<u64>,
    }

    pub type TransactionPage = Page<TransactionView>;
}

pub mod category {
    use super::*;
    use transaction::TransactionKind;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Category {
        pub id: Uuid,
        /// 2..=50 characters.
        pub name: String,
        pub kind: TransactionKind,
        /// System-seeded categories cannot change kind and cannot be
        /// deleted.
        pub is_default: bool,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CategoryUpsert {
        pub name: String,
        pub kind: TransactionKind,
    }
}

pub mod user {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Role {
        User,
        Admin,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct User {
        pub id: Uuid,
        pub username: String,
        pub email: String,
        pub first_name: String,
        pub last_name: String,
        pub role: Role,
        pub is_active: bool,
        pub created_at: DateTime<Utc>,
    }

    impl User {
        pub fn is_admin(&self) -> bool {
            self.role == Role::Admin
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ProfileUpdate {
        pub email: String,
        pub first_name: String,
        pub last_name: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct PasswordChange {
        pub current_password: String,
        pub new_password: String,
    }
}

pub mod auth {
    use super::*;
    use user::User;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct RegisterRequest {
        pub username: String,
        pub email: String,
        pub password: String,
        pub first_name: String,
        pub last_name: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Credentials {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct LoginResponse {
        pub token: String,
        pub user: User,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct EmailRequest {
        pub email: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ResetPassword {
        pub token: String,
        pub password: String,
    }

    /// Outcome of the idempotent verify-email endpoint.
    ///
    /// Already-verified accounts and already-used tokens are distinct
    /// non-error outcomes, not failures.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case", tag = "status")]
    pub enum VerifyEmailOutcome {
        Verified,
        AlreadyVerified,
        TokenAlreadyUsed,
    }

    /// Generic `{message}` acknowledgement body.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct MessageResponse {
        pub message: String,
    }
}

pub mod stats {
    use super::*;

    /// Time range selector for dashboard statistics.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum StatsRange {
        Week,
        #[default]
        Month,
        Year,
    }

    impl StatsRange {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Week => "week",
                Self::Month => "month",
                Self::Year => "year",
            }
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CategoryAmount {
        pub label: String,
        pub total_minor: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct MonthAmount {
        /// `YYYY-MM` bucket key.
        pub month: String,
        pub income_minor: i64,
        pub expense_minor: i64,
    }

    /// Per-user dashboard statistics.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct DashboardStats {
        pub total_income_minor: i64,
        pub total_expense_minor: i64,
        pub balance_minor: i64,
        pub category_breakdown: Vec<CategoryAmount>,
        pub monthly_comparison: Vec<MonthAmount>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Spender {
        pub user_id: Uuid,
        pub username: String,
        pub email: String,
        pub total_expense_minor: i64,
    }

    /// System-wide statistics (admin only).
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct SystemStats {
        pub user_count: u64,
        pub transaction_count: u64,
        pub total_income_minor: i64,
        pub total_expense_minor: i64,
        pub balance_minor: i64,
        pub high_spenders: Vec<Spender>,
    }
}

pub mod admin {
    use super::*;

    /// Query parameters for the admin user list.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct UserFilters {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub search: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub page: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub per_page: Option<u64>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ToggleStatusResponse {
        pub is_active: bool,
    }

    pub type UserPage = Page<user::User>;
}

pub mod export {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ExportFormat {
        Pdf,
        Excel,
        Csv,
    }

    impl ExportFormat {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Pdf => "pdf",
                Self::Excel => "excel",
                Self::Csv => "csv",
            }
        }

        /// MIME type the caller must set when saving the payload.
        pub fn mime_type(self) -> &'static str {
            match self {
                Self::Pdf => "application/pdf",
                Self::Excel => {
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
                }
                Self::Csv => "text/csv",
            }
        }

        pub fn extension(self) -> &'static str {
            match self {
                Self::Pdf => "pdf",
                Self::Excel => "xlsx",
                Self::Csv => "csv",
            }
        }

        /// Timestamped download filename, e.g. `transactions_2024-05-01.csv`.
        pub fn filename(self, stem: &str, date: NaiveDate) -> String {
            format!("{stem}_{}.{}", date.format("%Y-%m-%d"), self.extension())
        }
    }
}

pub mod forms;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_unknown_variant_falls_back() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"code":"rate_limited","message":"slow down"}"#)
                .expect("valid body");
        assert_eq!(body.code, Some(ErrorCode::Unknown));
        assert_eq!(body.message.as_deref(), Some("slow down"));
    }

    #[test]
    fn verify_outcome_is_tagged_by_status() {
        let outcome: auth::VerifyEmailOutcome =
            serde_json::from_str(r#"{"status":"already_verified"}"#).expect("valid body");
        assert_eq!(outcome, auth::VerifyEmailOutcome::AlreadyVerified);
    }

    #[test]
    fn filters_skip_unset_fields() {
        let filters = transaction::TransactionFilters {
            page: Some(2),
            ..Default::default()
        };
        let encoded = serde_json::to_string(&filters).expect("serializable");
        assert_eq!(encoded, r#"{"page":2}"#);
    }
}
