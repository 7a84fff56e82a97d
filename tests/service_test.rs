//! Service-level tests over the in-memory unit of work.

mod common;

use std::sync::Arc;

use tokio_test::{assert_err, assert_ok};

use bookshelf::domain::User;
use bookshelf::errors::{AppError, ConflictKind};
use bookshelf::services::{
    AuthorManager, AuthorService, BookManager, BookPatch, BookService, UserManager, UserPatch,
    UserService,
};
use bookshelf::types::PaginationParams;

use common::MemoryUnitOfWork;

fn services() -> (
    UserManager<MemoryUnitOfWork>,
    AuthorManager<MemoryUnitOfWork>,
    BookManager<MemoryUnitOfWork>,
    MemoryUnitOfWork,
) {
    let uow = Arc::new(MemoryUnitOfWork::new());
    (
        UserManager::new(uow.clone()),
        AuthorManager::new(uow.clone()),
        BookManager::new(uow.clone()),
        (*uow).clone(),
    )
}

async fn register(users: &UserManager<MemoryUnitOfWork>, username: &str, email: &str) -> User {
    assert_ok!(
        users
            .create_user(username.to_string(), email.to_string(), "secret".to_string())
            .await
    )
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_create_user_stores_hash_not_plaintext() {
    let (users, _, _, _) = services();
    let user = register(&users, "Test User", "test@example.com").await;

    assert_eq!(user.username, "test user");
    assert_ne!(user.password_hash, "secret");
    assert!(user.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_username_conflict_reported_before_email() {
    let (users, _, _, _) = services();
    register(&users, "taken", "taken@example.com").await;

    let err = assert_err!(
        users
            .create_user("TAKEN".into(), "taken@example.com".into(), "x".into())
            .await
    );
    assert!(matches!(err, AppError::Conflict(ConflictKind::Username)));
}

#[tokio::test]
async fn test_empty_password_rejected() {
    let (users, _, _, uow) = services();

    let err = assert_err!(
        users
            .create_user("someone".into(), "someone@example.com".into(), String::new())
            .await
    );
    assert_eq!(err.to_string(), "Empty field");
    assert_eq!(uow.store.user_count(), 0);
}

#[tokio::test]
async fn test_list_users_defaults_to_hundred() {
    let (users, _, _, uow) = services();
    for i in 0..105 {
        uow.store
            .seed_user(&format!("user{}", i), &format!("u{}@example.com", i), "hash");
    }

    let listed = assert_ok!(users.list_users(PaginationParams::default()).await);
    assert_eq!(listed.len(), 100);

    let listed = assert_ok!(users.list_users(PaginationParams::new(Some(100), None)).await);
    assert_eq!(listed.len(), 5);
}

#[tokio::test]
async fn test_patch_own_username_conflicts_with_self() {
    let (users, _, _, _) = services();
    let me = register(&users, "me", "me@example.com").await;

    let patch = UserPatch {
        username: Some("Me".into()),
        ..Default::default()
    };
    let err = assert_err!(users.patch_user(&me, me.id, patch).await);
    assert!(matches!(err, AppError::Conflict(ConflictKind::Username)));
}

#[tokio::test]
async fn test_patch_password_rehashes() {
    let (users, _, _, _) = services();
    let me = register(&users, "me", "me@example.com").await;

    let patch = UserPatch {
        password: Some("changed".into()),
        ..Default::default()
    };
    let updated = assert_ok!(users.patch_user(&me, me.id, patch).await);

    assert_eq!(updated.username, "me");
    assert_ne!(updated.password_hash, me.password_hash);
}

#[tokio::test]
async fn test_patch_ignores_empty_email_and_password() {
    let (users, _, _, _) = services();
    let me = register(&users, "me", "me@example.com").await;

    let patch = UserPatch {
        email: Some(String::new()),
        password: Some(String::new()),
        ..Default::default()
    };
    let updated = assert_ok!(users.patch_user(&me, me.id, patch).await);

    assert_eq!(updated.email, "me@example.com");
    assert_eq!(updated.password_hash, me.password_hash);
}

#[tokio::test]
async fn test_delete_other_user_denied() {
    let (users, _, _, uow) = services();
    let me = register(&users, "me", "me@example.com").await;
    let other = uow.store.seed_user("other", "other@example.com", "hash");

    let err = assert_err!(users.delete_user(&me, other.id).await);
    assert!(matches!(err, AppError::PermissionDenied));
    assert_eq!(uow.store.user_count(), 2);
}

// =============================================================================
// Authors
// =============================================================================

#[tokio::test]
async fn test_author_filter_is_sanitized() {
    let (_, authors, _, _) = services();
    assert_ok!(authors.create_author("Machado de Assis".into()).await);
    assert_ok!(authors.create_author("Clarice Lispector".into()).await);

    let found = assert_ok!(
        authors
            .list_authors(Some("  DE   assis?".into()), PaginationParams::default())
            .await
    );
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "machado de assis");

    // A filter that sanitizes to nothing does not filter
    let found = assert_ok!(
        authors
            .list_authors(Some("!!".into()), PaginationParams::default())
            .await
    );
    assert_eq!(found.len(), 2);
}

#[tokio::test]
async fn test_patch_author_without_name() {
    let (_, authors, _, _) = services();
    let author = assert_ok!(authors.create_author("someone".into()).await);

    let err = assert_err!(authors.patch_author(author.id, None).await);
    assert!(matches!(err, AppError::Validation(_)));
}

// =============================================================================
// Books
// =============================================================================

#[tokio::test]
async fn test_create_book_checks_conflict_before_author() {
    let (_, _, books, uow) = services();
    let author = uow.store.seed_author("author");
    uow.store.seed_book(2000, "title", author.id);

    let err = assert_err!(books.create_book(2001, "Title!".into(), author.id).await);
    assert!(matches!(err, AppError::Conflict(ConflictKind::Book)));

    let err = assert_err!(books.create_book(2001, "Title!".into(), author.id + 100).await);
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_move_book_to_author_with_same_title() {
    let (_, _, books, uow) = services();
    let first = uow.store.seed_author("first");
    let second = uow.store.seed_author("second");
    let book = uow.store.seed_book(2000, "shared", first.id);
    uow.store.seed_book(2000, "shared", second.id);

    let patch = BookPatch {
        author_id: Some(second.id),
        ..Default::default()
    };
    let err = assert_err!(books.patch_book(book.id, patch).await);
    assert!(matches!(err, AppError::Conflict(ConflictKind::Book)));
}

#[tokio::test]
async fn test_patch_year_only() {
    let (_, _, books, uow) = services();
    let author = uow.store.seed_author("author");
    let book = uow.store.seed_book(2000, "title", author.id);

    let patch = BookPatch {
        year: Some(1999),
        ..Default::default()
    };
    let updated = assert_ok!(books.patch_book(book.id, patch).await);

    assert_eq!(updated.year, 1999);
    assert_eq!(updated.title, "title");
}

#[tokio::test]
async fn test_delete_missing_book() {
    let (_, _, books, _) = services();

    let err = assert_err!(books.delete_book(12345).await);
    assert_eq!(err.to_string(), "Book not found.");
}
