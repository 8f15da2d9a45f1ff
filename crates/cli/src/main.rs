use chrono::{Local, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use api_types::{
    admin::UserFilters,
    auth::{Credentials, RegisterRequest, ResetPassword},
    category::CategoryUpsert,
    export::ExportFormat,
    forms,
    stats::StatsRange,
    transaction::{TransactionFilters, TransactionKind, TransactionUpsert},
    user::{PasswordChange, ProfileUpdate},
};
use client::Client;
use store::{AuthGate, AuthPhase, SessionFile, Store};

use crate::error::{AppError, Result};

mod config;
mod error;
mod money;
mod output;

const TOP_CATEGORY_LIMIT: usize = 5;

#[derive(Debug, Parser)]
#[command(name = "tally", about = "Command-line front end for the Tally finance service")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    config: Option<String>,
    /// Override the service base URL.
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and persist the session locally.
    Login {
        username: String,
        /// Read from `TALLY_PASSWORD` when omitted.
        #[arg(long, env = "TALLY_PASSWORD")]
        password: String,
    },
    /// Drop the persisted session.
    Logout,
    /// Create a new account.
    Register {
        username: String,
        email: String,
        #[arg(long, env = "TALLY_PASSWORD")]
        password: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
    },
    /// Request a password reset email.
    ForgotPassword { email: String },
    /// Set a new password with an emailed reset token.
    ResetPassword {
        token: String,
        #[arg(long, env = "TALLY_PASSWORD")]
        password: String,
    },
    /// Confirm an email address with an emailed token.
    VerifyEmail { token: String },
    /// Re-send the verification email.
    ResendVerification { email: String },
    /// Transaction operations.
    #[command(subcommand)]
    Tx(TxCommand),
    /// Category operations.
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Totals and breakdowns over the filtered transaction list.
    Summary {
        #[command(flatten)]
        filters: FilterArgs,
        /// Bucket the trend by day instead of month.
        #[arg(long)]
        daily: bool,
    },
    /// Dashboard statistics for the current user.
    Stats {
        #[arg(long, value_enum, default_value_t = RangeArg::Month)]
        range: RangeArg,
    },
    /// Profile operations.
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Administrator operations.
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Debug, Subcommand)]
enum TxCommand {
    /// List transactions.
    List(FilterArgs),
    /// Show one transaction.
    Show { id: Uuid },
    /// Show the most recent transactions.
    Recent {
        #[arg(long, default_value_t = 5)]
        limit: u64,
    },
    /// Record a new transaction.
    Add(UpsertArgs),
    /// Replace an existing transaction.
    Update {
        id: Uuid,
        #[command(flatten)]
        form: UpsertArgs,
    },
    /// Delete a transaction.
    Delete { id: Uuid },
    /// Download a server export; a failed csv export is rendered locally.
    Export {
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
        #[command(flatten)]
        filters: FilterArgs,
        /// Output path; defaults to a timestamped filename.
        #[arg(long)]
        out: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// List categories, optionally one kind only.
    List {
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
    /// Show one category.
    Show { id: Uuid },
    /// Create a category.
    Add {
        name: String,
        #[arg(long, value_enum)]
        kind: KindArg,
    },
    /// Rename a category or change its kind.
    Update {
        id: Uuid,
        name: String,
        #[arg(long, value_enum)]
        kind: KindArg,
    },
    /// Delete a category. Existing transactions keep their reference.
    Delete { id: Uuid },
}

#[derive(Debug, Subcommand)]
enum ProfileCommand {
    /// Show the current profile.
    Show,
    /// Update profile fields.
    Update {
        email: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
    },
    /// Change the account password.
    ChangePassword {
        #[arg(long, env = "TALLY_PASSWORD")]
        current: String,
        #[arg(long)]
        new: String,
    },
    /// Delete the account and the persisted session.
    DeleteAccount {
        #[arg(long, env = "TALLY_PASSWORD")]
        password: String,
    },
}

#[derive(Debug, Subcommand)]
enum AdminCommand {
    /// List users, with optional search.
    Users {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u64>,
        #[arg(long)]
        per_page: Option<u64>,
    },
    /// Show one user.
    User { id: Uuid },
    /// Flip a user's active flag.
    ToggleStatus { id: Uuid },
    /// Delete a user.
    DeleteUser { id: Uuid },
    /// List transactions across all users.
    Tx(FilterArgs),
    /// System-wide statistics.
    Stats,
    /// Per-user statistics.
    UserStats {
        id: Uuid,
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Income => Self::Income,
            KindArg::Expense => Self::Expense,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Pdf,
    Excel,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Pdf => Self::Pdf,
            FormatArg::Excel => Self::Excel,
            FormatArg::Csv => Self::Csv,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum RangeArg {
    Week,
    Month,
    Year,
}

impl From<RangeArg> for StatsRange {
    fn from(value: RangeArg) -> Self {
        match value {
            RangeArg::Week => Self::Week,
            RangeArg::Month => Self::Month,
            RangeArg::Year => Self::Year,
        }
    }
}

#[derive(Debug, Args)]
struct FilterArgs {
    /// Substring match on notes and category names.
    #[arg(long)]
    search: Option<String>,
    #[arg(long, value_enum)]
    kind: Option<KindArg>,
    #[arg(long)]
    category: Option<Uuid>,
    #[arg(long)]
    from: Option<NaiveDate>,
    #[arg(long)]
    to: Option<NaiveDate>,
    /// Minimum amount, e.g. 10.50.
    #[arg(long)]
    min: Option<String>,
    /// Maximum amount.
    #[arg(long)]
    max: Option<String>,
    #[arg(long)]
    page: Option<u64>,
    #[arg(long)]
    per_page: Option<u64>,
}

impl FilterArgs {
    fn to_filters(&self) -> Result<TransactionFilters> {
        Ok(TransactionFilters {
            search: self.search.clone(),
            kind: self.kind.map(Into::into),
            category_id: self.category,
            date_from: self.from,
            date_to: self.to,
            amount_min_minor: self.min.as_deref().map(money::parse_minor).transpose()?,
            amount_max_minor: self.max.as_deref().map(money::parse_minor).transpose()?,
            page: self.page,
            per_page: self.per_page,
        })
    }
}

#[derive(Debug, Args)]
struct UpsertArgs {
    #[arg(long, value_enum)]
    kind: KindArg,
    /// Decimal amount, e.g. 12.34.
    #[arg(long)]
    amount: String,
    #[arg(long)]
    category: Option<Uuid>,
    /// Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long)]
    note: Option<String>,
}

impl UpsertArgs {
    fn to_upsert(&self, today: NaiveDate) -> Result<TransactionUpsert> {
        Ok(TransactionUpsert {
            kind: self.kind.into(),
            amount_minor: money::parse_minor(&self.amount)?,
            category_id: self.category,
            date: self.date.unwrap_or(today),
            note: self.note.clone(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::load(cli.config.as_deref(), cli.base_url.clone())?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "tally={level},client={level},store={level}",
            level = settings.log_level
        ))
        .init();

    let client = Client::new(&settings.base_url)?;
    let mut store = Store::open(SessionFile::new(settings.session_path.clone()))?;

    run(cli.command, &client, &mut store).await
}

/// Prints the gate outcome and exits non-zero on a stored error.
fn finish_auth(auth: &AuthGate) {
    if let Some(message) = &auth.message {
        println!("{message}");
    }
    if auth.phase() == AuthPhase::VerificationRequired {
        if let Some(email) = &auth.unverified_email {
            eprintln!("email not verified: {email}");
            eprintln!("run `tally resend-verification {email}` to get a new link");
        }
        std::process::exit(1);
    }
    if let Some(error) = &auth.error {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

async fn run(command: Command, client: &Client, store: &mut Store) -> Result<()> {
    match command {
        Command::Login { username, password } => {
            store.login(client, &Credentials { username, password }).await;
            finish_auth(&store.auth);
        }
        Command::Logout => {
            store.logout();
            println!("logged out");
        }
        Command::Register {
            username,
            email,
            password,
            first_name,
            last_name,
        } => {
            forms::require("username", &username)?;
            forms::require("email", &email)?;
            forms::require("password", &password)?;
            store
                .register(
                    client,
                    &RegisterRequest {
                        username,
                        email,
                        password,
                        first_name,
                        last_name,
                    },
                )
                .await;
            finish_auth(&store.auth);
        }
        Command::ForgotPassword { email } => {
            store.forgot_password(client, &email).await;
            finish_auth(&store.auth);
        }
        Command::ResetPassword { token, password } => {
            store
                .reset_password(client, &ResetPassword { token, password })
                .await;
            finish_auth(&store.auth);
        }
        Command::VerifyEmail { token } => {
            store.verify_email(client, &token).await;
            finish_auth(&store.auth);
        }
        Command::ResendVerification { email } => {
            store.resend_verification(client, &email).await;
            finish_auth(&store.auth);
        }
        Command::Tx(command) => run_tx(command, client, store).await?,
        Command::Category(command) => run_category(command, client, store).await?,
        Command::Summary { filters, daily } => {
            let filters = filters.to_filters()?;
            store.fetch_transactions(client, &filters).await;
            output::finish(&store.transactions.lifecycle);

            let items = &store.transactions.items;
            let totals = reports::totals_by_kind(items);
            output::print_totals(&totals);
            let ranked = reports::rank_by(reports::by_category(items), TOP_CATEGORY_LIMIT, |entry| {
                entry.total_minor
            });
            output::print_category_breakdown(&ranked, totals.expense_minor);
            if daily {
                output::print_days(&reports::by_day(items));
            } else {
                output::print_months(&reports::by_month(items));
            }
        }
        Command::Stats { range } => {
            store.fetch_dashboard_stats(client, range.into()).await;
            output::finish(&store.profile.lifecycle);
            output::print_dashboard(&store.profile.stats);
        }
        Command::Profile(command) => run_profile(command, client, store).await?,
        Command::Admin(command) => run_admin(command, client, store).await?,
    }
    Ok(())
}

async fn run_tx(command: TxCommand, client: &Client, store: &mut Store) -> Result<()> {
    match command {
        TxCommand::List(args) => {
            let filters = args.to_filters()?;
            store.fetch_transactions(client, &filters).await;
            output::finish(&store.transactions.lifecycle);
            output::print_transactions(&store.transactions.items);
            output::print_paging(&store.transactions.paging);
        }
        TxCommand::Show { id } => {
            store.fetch_transaction(client, id).await;
            output::finish(&store.transactions.lifecycle);
            if let Some(transaction) = store.transactions.selected.clone() {
                output::print_transactions(&[transaction]);
            }
        }
        TxCommand::Recent { limit } => {
            store.fetch_recent_transactions(client, limit).await;
            output::finish(&store.transactions.lifecycle);
            output::print_transactions(&store.transactions.recent);
        }
        TxCommand::Add(form) => {
            let today = Local::now().date_naive();
            let payload = form.to_upsert(today)?;
            let category = resolve_category(client, store, payload.category_id).await?;
            forms::validate_transaction(&payload, category.as_ref(), today)?;
            store.add_transaction(client, &payload).await;
            output::finish(&store.transactions.lifecycle);
        }
        TxCommand::Update { id, form } => {
            let today = Local::now().date_naive();
            let payload = form.to_upsert(today)?;
            let category = resolve_category(client, store, payload.category_id).await?;
            forms::validate_transaction(&payload, category.as_ref(), today)?;
            store.update_transaction(client, id, &payload).await;
            output::finish(&store.transactions.lifecycle);
        }
        TxCommand::Delete { id } => {
            store.delete_transaction(client, id).await;
            output::finish(&store.transactions.lifecycle);
        }
        TxCommand::Export {
            format,
            filters,
            out,
        } => {
            let filters = filters.to_filters()?;
            let format: ExportFormat = format.into();
            let today = Local::now().date_naive();

            let payload = store.export_transactions(client, format, &filters).await;
            let (bytes, default_name) = if let Some(payload) = payload {
                let name = payload.filename(today);
                (payload.bytes, name)
            } else if format == ExportFormat::Csv {
                if let Some(error) = &store.transactions.lifecycle.error {
                    tracing::warn!("server export failed, rendering locally: {error}");
                }
                store.fetch_transactions(client, &filters).await;
                output::finish(&store.transactions.lifecycle);
                let bytes = reports::render_csv(&store.transactions.items, &filters, Utc::now())?;
                (bytes, format.filename("transactions", today))
            } else {
                output::finish(&store.transactions.lifecycle);
                return Ok(());
            };

            let path = out.unwrap_or(default_name);
            std::fs::write(&path, &bytes)?;
            println!("saved {path} ({})", format.mime_type());
        }
    }
    Ok(())
}

/// Loads the referenced category for form validation, if any.
async fn resolve_category(
    client: &Client,
    store: &mut Store,
    id: Option<Uuid>,
) -> Result<Option<api_types::category::Category>> {
    let Some(id) = id else {
        return Ok(None);
    };
    store.fetch_categories(client).await;
    output::finish(&store.categories.lifecycle);
    store
        .categories
        .by_id(id)
        .cloned()
        .map(Some)
        .ok_or_else(|| AppError::Command(format!("unknown category: {id}")))
}

async fn run_category(command: CategoryCommand, client: &Client, store: &mut Store) -> Result<()> {
    match command {
        CategoryCommand::List { kind } => {
            store.fetch_categories(client).await;
            output::finish(&store.categories.lifecycle);
            let items = match kind {
                Some(kind) => store.categories.of_kind(kind.into()),
                None => store.categories.items.iter().collect(),
            };
            output::print_categories(&items);
        }
        CategoryCommand::Show { id } => {
            store.fetch_category(client, id).await;
            output::finish(&store.categories.lifecycle);
            if let Some(category) = &store.categories.selected {
                output::print_categories(&[category]);
            }
        }
        CategoryCommand::Add { name, kind } => {
            forms::validate_category_name(&name)?;
            store
                .add_category(
                    client,
                    &CategoryUpsert {
                        name,
                        kind: kind.into(),
                    },
                )
                .await;
            output::finish(&store.categories.lifecycle);
        }
        CategoryCommand::Update { id, name, kind } => {
            store.fetch_category(client, id).await;
            output::finish(&store.categories.lifecycle);
            let existing = store
                .categories
                .selected
                .clone()
                .ok_or_else(|| AppError::Command(format!("unknown category: {id}")))?;
            forms::validate_category_update(&existing, &name, kind.into())?;
            store
                .update_category(
                    client,
                    id,
                    &CategoryUpsert {
                        name,
                        kind: kind.into(),
                    },
                )
                .await;
            output::finish(&store.categories.lifecycle);
        }
        CategoryCommand::Delete { id } => {
            store.fetch_category(client, id).await;
            output::finish(&store.categories.lifecycle);
            let existing = store
                .categories
                .selected
                .clone()
                .ok_or_else(|| AppError::Command(format!("unknown category: {id}")))?;
            forms::validate_category_delete(&existing)?;
            store.delete_category(client, id).await;
            output::finish(&store.categories.lifecycle);
        }
    }
    Ok(())
}

async fn run_profile(command: ProfileCommand, client: &Client, store: &mut Store) -> Result<()> {
    match command {
        ProfileCommand::Show => {
            store.fetch_profile(client).await;
            output::finish(&store.profile.lifecycle);
            if let Some(profile) = &store.profile.profile {
                output::print_user(profile);
            }
        }
        ProfileCommand::Update {
            email,
            first_name,
            last_name,
        } => {
            forms::require("email", &email)?;
            store
                .update_profile(
                    client,
                    &ProfileUpdate {
                        email,
                        first_name,
                        last_name,
                    },
                )
                .await;
            output::finish(&store.profile.lifecycle);
        }
        ProfileCommand::ChangePassword { current, new } => {
            forms::require("current password", &current)?;
            forms::require("new password", &new)?;
            store
                .change_password(
                    client,
                    &PasswordChange {
                        current_password: current,
                        new_password: new,
                    },
                )
                .await;
            output::finish(&store.profile.lifecycle);
        }
        ProfileCommand::DeleteAccount { password } => {
            store.delete_account(client, &password).await;
            output::finish(&store.profile.lifecycle);
            if store.profile.account_deleted {
                println!("account deleted");
            }
        }
    }
    Ok(())
}

async fn run_admin(command: AdminCommand, client: &Client, store: &mut Store) -> Result<()> {
    match command {
        AdminCommand::Users {
            search,
            page,
            per_page,
        } => {
            let filters = UserFilters {
                search,
                page,
                per_page,
            };
            store.fetch_users(client, &filters).await;
            output::finish(&store.admin.lifecycle);
            output::print_users(&store.admin.users);
            output::print_paging(&store.admin.paging);
        }
        AdminCommand::User { id } => {
            store.fetch_user(client, id).await;
            output::finish(&store.admin.lifecycle);
            if let Some(user) = &store.admin.selected {
                output::print_user(user);
            }
        }
        AdminCommand::ToggleStatus { id } => {
            store.toggle_user_status(client, id).await;
            output::finish(&store.admin.lifecycle);
        }
        AdminCommand::DeleteUser { id } => {
            store.delete_user(client, id).await;
            output::finish(&store.admin.lifecycle);
        }
        AdminCommand::Tx(args) => {
            let filters = args.to_filters()?;
            store.fetch_all_transactions(client, &filters).await;
            output::finish(&store.admin.lifecycle);
            output::print_transactions(&store.admin.transactions);
            output::print_paging(&store.admin.paging);
        }
        AdminCommand::Stats => {
            store.fetch_system_stats(client).await;
            output::finish(&store.admin.lifecycle);
            output::print_system_stats(&store.admin.system_stats);
        }
        AdminCommand::UserStats { id, filters } => {
            let filters = filters.to_filters()?;
            store.fetch_user_statistics(client, id, &filters).await;
            output::finish(&store.admin.lifecycle);
            if let Some(stats) = &store.admin.user_statistics {
                output::print_dashboard(stats);
            }
        }
    }
    Ok(())
}
