use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use api_types::{
    Page,
    category::Category,
    transaction::{TransactionKind, TransactionView},
    user::{Role, User},
};
use client::ClientError;
use store::{AuthPhase, GateError, Session, SessionFile, Store};

fn user(role: Role) -> User {
    User {
        id: Uuid::new_v4(),
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        first_name: "Alice".to_string(),
        last_name: "Martin".to_string(),
        role,
        is_active: true,
        created_at: Utc::now(),
    }
}

fn category(name: &str, kind: TransactionKind) -> Category {
    Category {
        id: Uuid::new_v4(),
        name: name.to_string(),
        kind,
        is_default: false,
    }
}

fn transaction(kind: TransactionKind, amount_minor: i64, category: Option<&Category>) -> TransactionView {
    TransactionView {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        kind,
        amount_minor,
        category_id: category.map(|c| c.id),
        category_name: category.map(|c| c.name.clone()),
        date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        note: None,
    }
}

fn session_file(tag: &str) -> SessionFile {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_sessions");
    std::fs::create_dir_all(&root).unwrap();
    let path = root.join(format!("session_{tag}_{}.json", Uuid::new_v4()));
    SessionFile::new(path.to_string_lossy().into_owned())
}

fn authenticated_store(role: Role) -> Store {
    Store::with_session(
        session_file("mem"),
        Some(Session {
            token: "token-1".to_string(),
            user: user(role),
        }),
    )
}

#[test]
fn verification_required_login_retains_submitted_identifier() {
    let mut store = Store::with_session(session_file("gate"), None);
    store.auth.begin_login("alice@example.com");
    assert_eq!(store.auth.phase(), AuthPhase::Authenticating);

    store.auth.login_failed(&ClientError::VerificationRequired {
        email: String::new(),
        message: "Please verify your email first.".to_string(),
    });

    assert_eq!(store.auth.phase(), AuthPhase::VerificationRequired);
    assert!(!store.auth.is_authenticated());
    assert_eq!(
        store.auth.unverified_email.as_deref(),
        Some("alice@example.com")
    );
}

#[test]
fn resend_keeps_verification_required_until_reauth() {
    let mut store = Store::with_session(session_file("resend"), None);
    store.auth.begin_login("bob");
    store.auth.login_failed(&ClientError::VerificationRequired {
        email: "bob@example.com".to_string(),
        message: "verify first".to_string(),
    });

    store.auth.resend_succeeded();
    assert_eq!(store.auth.phase(), AuthPhase::VerificationRequired);
    assert_eq!(store.auth.unverified_email.as_deref(), Some("bob@example.com"));
    store.auth.clear_message();
    store.auth.clear_error();
    assert!(store.auth.message.is_none());
    assert!(store.auth.error.is_none());

    store.auth.login_succeeded(Session {
        token: "token-2".to_string(),
        user: user(Role::User),
    });
    assert_eq!(store.auth.phase(), AuthPhase::Authenticated);
    assert!(store.auth.unverified_email.is_none());
}

#[test]
fn plain_failure_falls_back_to_anonymous() {
    let mut store = Store::with_session(session_file("fail"), None);
    store.auth.begin_login("alice");
    store
        .auth
        .login_failed(&ClientError::Unauthorized("bad credentials".to_string()));
    assert_eq!(store.auth.phase(), AuthPhase::Anonymous);
    assert_eq!(store.auth.error.as_deref(), Some("bad credentials"));
}

#[test]
fn admin_gate_rejects_plain_users() {
    let store = authenticated_store(Role::User);
    assert!(store.auth.require_auth().is_ok());
    assert_eq!(store.auth.require_admin(), Err(GateError::AdminRequired));

    let admin = authenticated_store(Role::Admin);
    assert!(admin.auth.require_admin().is_ok());
}

#[test]
fn session_round_trips_through_file() {
    let file = session_file("roundtrip");
    file.save(&Session {
        token: "persisted-token".to_string(),
        user: user(Role::Admin),
    })
    .unwrap();

    let store = Store::open(file.clone()).unwrap();
    assert!(store.auth.is_authenticated());
    assert!(store.auth.is_admin());
    assert_eq!(store.auth.token(), Some("persisted-token"));

    file.clear().unwrap();
    let store = Store::open(file).unwrap();
    assert_eq!(store.auth.phase(), AuthPhase::Anonymous);
}

#[test]
fn logout_clears_the_persisted_session() {
    let file = session_file("logout");
    file.save(&Session {
        token: "t".to_string(),
        user: user(Role::User),
    })
    .unwrap();

    let mut store = Store::open(file.clone()).unwrap();
    store.logout();
    assert_eq!(store.auth.phase(), AuthPhase::Anonymous);
    assert!(file.load().unwrap().is_none());
}

#[test]
fn created_category_lands_in_its_kind_partition() {
    let mut store = authenticated_store(Role::User);
    let ticket = store.categories.lifecycle.begin();
    store.categories.finish_list(
        ticket,
        vec![category("Salary", TransactionKind::Income)],
    );

    let ticket = store.categories.lifecycle.begin_submit();
    let groceries = category("Groceries", TransactionKind::Expense);
    let groceries_id = groceries.id;
    store.categories.finish_create(ticket, groceries);

    assert!(store
        .categories
        .expense()
        .iter()
        .any(|c| c.id == groceries_id));
    assert!(!store
        .categories
        .income()
        .iter()
        .any(|c| c.id == groceries_id));
    assert!(store.categories.lifecycle.success);
}

#[test]
fn kind_change_relocates_category_between_partitions() {
    let mut store = authenticated_store(Role::User);
    let mut side = category("Side gigs", TransactionKind::Expense);
    let side_id = side.id;
    let ticket = store.categories.lifecycle.begin();
    store.categories.finish_list(ticket, vec![side.clone()]);

    side.kind = TransactionKind::Income;
    let ticket = store.categories.lifecycle.begin_submit();
    store.categories.finish_update(ticket, side);

    assert!(store.categories.income().iter().any(|c| c.id == side_id));
    assert!(!store.categories.expense().iter().any(|c| c.id == side_id));
    assert!(store.categories.selected.is_none());
}

#[test]
fn deleting_a_category_keeps_referencing_transactions() {
    let mut store = authenticated_store(Role::User);
    let food = category("Food", TransactionKind::Expense);
    let ticket = store.categories.lifecycle.begin();
    store.categories.finish_list(ticket, vec![food.clone()]);

    let ticket = store.transactions.lifecycle.begin();
    store.transactions.finish_list(
        ticket,
        Page {
            items: vec![transaction(TransactionKind::Expense, 1_500, Some(&food))],
            total: 1,
            page: 1,
            pages: 1,
            per_page: 10,
        },
    );

    let ticket = store.categories.lifecycle.begin();
    store.categories.finish_delete(ticket, food.id);

    assert!(store.categories.items.is_empty());
    assert_eq!(store.transactions.items.len(), 1);
    assert_eq!(store.transactions.items[0].category_id, Some(food.id));
}

#[test]
fn stale_list_response_does_not_overwrite_newer_one() {
    let mut store = authenticated_store(Role::User);
    let first = store.transactions.lifecycle.begin();
    let second = store.transactions.lifecycle.begin();

    store.transactions.finish_list(
        second,
        Page {
            items: vec![transaction(TransactionKind::Income, 2_000, None)],
            total: 1,
            page: 2,
            pages: 3,
            per_page: 1,
        },
    );
    // The superseded request resolves afterwards; it must be ignored.
    store.transactions.finish_list(
        first,
        Page {
            items: Vec::new(),
            total: 0,
            page: 1,
            pages: 1,
            per_page: 1,
        },
    );

    assert_eq!(store.transactions.items.len(), 1);
    assert_eq!(store.transactions.paging.page, 2);
}

#[test]
fn delete_removes_transaction_by_id() {
    let mut store = authenticated_store(Role::User);
    let keep = transaction(TransactionKind::Expense, 100, None);
    let drop = transaction(TransactionKind::Expense, 200, None);
    let drop_id = drop.id;

    let ticket = store.transactions.lifecycle.begin();
    store.transactions.finish_list(
        ticket,
        Page {
            items: vec![keep.clone(), drop],
            total: 2,
            page: 1,
            pages: 1,
            per_page: 10,
        },
    );

    let ticket = store.transactions.lifecycle.begin();
    store.transactions.finish_delete(ticket, drop_id);

    assert_eq!(store.transactions.items.len(), 1);
    assert_eq!(store.transactions.items[0].id, keep.id);
    assert_eq!(
        store.transactions.lifecycle.message.as_deref(),
        Some("Transaction deleted successfully!")
    );
}

#[test]
fn update_clears_selected_for_refetch() {
    let mut store = authenticated_store(Role::User);
    let ticket = store.transactions.lifecycle.begin();
    store
        .transactions
        .finish_detail(ticket, transaction(TransactionKind::Income, 900, None));
    assert!(store.transactions.selected.is_some());

    let ticket = store.transactions.lifecycle.begin_submit();
    store.transactions.finish_update(ticket);
    assert!(store.transactions.selected.is_none());
    assert!(store.transactions.lifecycle.success);
}

#[test]
fn toggle_status_updates_list_and_selection() {
    let mut store = authenticated_store(Role::Admin);
    let target = user(Role::User);
    let target_id = target.id;

    let ticket = store.admin.lifecycle.begin();
    store.admin.finish_users(
        ticket,
        Page {
            items: vec![target.clone()],
            total: 1,
            page: 1,
            pages: 1,
            per_page: 10,
        },
    );
    let ticket = store.admin.lifecycle.begin();
    store.admin.finish_user(ticket, target);

    let ticket = store.admin.lifecycle.begin_submit();
    store.admin.finish_toggle(ticket, target_id, false);

    assert!(!store.admin.users[0].is_active);
    assert!(!store.admin.selected.as_ref().unwrap().is_active);
    assert_eq!(
        store.admin.lifecycle.message.as_deref(),
        Some("User deactivated successfully!")
    );
}
