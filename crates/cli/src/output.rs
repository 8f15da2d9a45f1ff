//! Plain-text rendering of store state and derived views.

use api_types::{
    category::Category,
    stats::{DashboardStats, SystemStats},
    transaction::TransactionView,
    user::User,
};
use reports::{CategorySum, MonthBucket, Totals, category_label, format_minor, share_percent};
use store::{Lifecycle, Paging};

/// Prints the slice outcome and exits non-zero on a stored error.
pub fn finish(lifecycle: &Lifecycle) {
    if let Some(message) = &lifecycle.message {
        println!("{message}");
    }
    if let Some(error) = &lifecycle.error {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

pub fn print_transactions(items: &[TransactionView]) {
    if items.is_empty() {
        println!("no transactions");
        return;
    }
    println!(
        "{:<36}  {:<10}  {:<7}  {:>12}  {:<20}  note",
        "id", "date", "kind", "amount", "category"
    );
    for transaction in items {
        println!(
            "{:<36}  {:<10}  {:<7}  {:>12}  {:<20}  {}",
            transaction.id,
            transaction.date,
            transaction.kind.as_str(),
            format_minor(transaction.amount_minor),
            category_label(transaction),
            transaction.note.as_deref().unwrap_or("-"),
        );
    }
}

pub fn print_paging(paging: &Paging) {
    println!(
        "page {}/{} ({} total, {} per page)",
        paging.page, paging.pages, paging.total, paging.per_page
    );
}

pub fn print_categories(items: &[&Category]) {
    if items.is_empty() {
        println!("no categories");
        return;
    }
    println!("{:<36}  {:<7}  {:<9}  name", "id", "kind", "default");
    for category in items {
        println!(
            "{:<36}  {:<7}  {:<9}  {}",
            category.id,
            category.kind.as_str(),
            if category.is_default { "yes" } else { "no" },
            category.name,
        );
    }
}

pub fn print_totals(totals: &Totals) {
    println!("income:   {:>12}", format_minor(totals.income_minor));
    println!("expense:  {:>12}", format_minor(totals.expense_minor));
    println!("balance:  {:>12}", format_minor(totals.balance_minor));
    println!("count:    {:>12}", totals.count);
    println!("average:  {:>12}", format_minor(totals.average_minor()));
}

pub fn print_category_breakdown(entries: &[CategorySum], expense_total_minor: i64) {
    if entries.is_empty() {
        return;
    }
    println!("top expense categories:");
    for entry in entries {
        let percent = share_percent(entry.total_minor, expense_total_minor);
        println!(
            "  {:<24} {:>12}  {percent:5.1}%",
            entry.label,
            format_minor(entry.total_minor),
        );
    }
}

pub fn print_months(buckets: &[MonthBucket]) {
    if buckets.is_empty() {
        return;
    }
    println!("monthly trend:");
    for bucket in buckets {
        println!(
            "  {}  income {:>12}  expense {:>12}  net {:>12}",
            bucket.month,
            format_minor(bucket.income_minor),
            format_minor(bucket.expense_minor),
            format_minor(bucket.net_minor),
        );
    }
}

pub fn print_days(buckets: &[reports::DayBucket]) {
    if buckets.is_empty() {
        return;
    }
    println!("daily trend:");
    for bucket in buckets {
        println!(
            "  {}  income {:>12}  expense {:>12}  net {:>12}",
            bucket.date,
            format_minor(bucket.income_minor),
            format_minor(bucket.expense_minor),
            format_minor(bucket.net_minor),
        );
    }
}

pub fn print_user(user: &User) {
    println!("id:         {}", user.id);
    println!("username:   {}", user.username);
    println!("email:      {}", user.email);
    println!("name:       {} {}", user.first_name, user.last_name);
    println!("role:       {:?}", user.role);
    println!("active:     {}", user.is_active);
    println!("registered: {}", user.created_at.date_naive());
}

pub fn print_users(items: &[User]) {
    if items.is_empty() {
        println!("no users");
        return;
    }
    println!("{:<36}  {:<16}  {:<8}  {:<6}  email", "id", "username", "role", "active");
    for user in items {
        println!(
            "{:<36}  {:<16}  {:<8}  {:<6}  {}",
            user.id,
            user.username,
            if user.is_admin() { "admin" } else { "user" },
            user.is_active,
            user.email,
        );
    }
}

pub fn print_dashboard(stats: &DashboardStats) {
    println!("income:   {:>12}", format_minor(stats.total_income_minor));
    println!("expense:  {:>12}", format_minor(stats.total_expense_minor));
    println!("balance:  {:>12}", format_minor(stats.balance_minor));
    if !stats.category_breakdown.is_empty() {
        println!("by category:");
        for entry in &stats.category_breakdown {
            println!("  {:<24} {:>12}", entry.label, format_minor(entry.total_minor));
        }
    }
    if !stats.monthly_comparison.is_empty() {
        println!("by month:");
        for entry in &stats.monthly_comparison {
            println!(
                "  {}  income {:>12}  expense {:>12}",
                entry.month,
                format_minor(entry.income_minor),
                format_minor(entry.expense_minor),
            );
        }
    }
}

pub fn print_system_stats(stats: &SystemStats) {
    println!("users:        {}", stats.user_count);
    println!("transactions: {}", stats.transaction_count);
    println!("income:       {}", format_minor(stats.total_income_minor));
    println!("expense:      {}", format_minor(stats.total_expense_minor));
    println!("balance:      {}", format_minor(stats.balance_minor));
    if !stats.high_spenders.is_empty() {
        println!("high spenders:");
        for spender in &stats.high_spenders {
            println!(
                "  {:<16} {:>12}  {}",
                spender.username,
                format_minor(spender.total_expense_minor),
                spender.email,
            );
        }
    }
}
