//! # Remote contracts: the document store and the auth service
//!
//! The editor and the join form never talk to a backend directly; they go
//! through the two traits below. Implementations live in sibling modules
//! ([`crate::memory`] ships an in-memory backend used by tests and the bundled
//! web build).
//!
//! ## [`DocumentStore`]
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`subscribe`](DocumentStore::subscribe) | Live stream of snapshots for one record. The current state is delivered first, then one snapshot per committed write, in commit order. Errors arrive on the same stream. Dropping the stream cancels the subscription. |
//! | [`get`](DocumentStore::get) | One-shot read. |
//! | [`merge_write`](DocumentStore::merge_write) | Partial update; creates the record if it is missing. |
//! | [`delete`](DocumentStore::delete) | Removes the record; subscribers see a non-existent snapshot. |
//! | [`create`](DocumentStore::create) / [`list`](DocumentStore::list) | New record for an owner, and the owner's records. |
//!
//! ## [`AuthService`]
//!
//! Account creation, verification mail, sign-in/out, and
//! [`on_auth_state_changed`](AuthService::on_auth_state_changed), a stream
//! that yields the current account first and then every change.

use futures::channel::mpsc::UnboundedReceiver;

use crate::error::{AuthError, StoreError};
use crate::models::{Account, DocumentData, DocumentPatch, Snapshot};

/// Live snapshots of one record.
pub type Subscription = UnboundedReceiver<Result<Snapshot, StoreError>>;

/// Live auth state: `None` when signed out.
pub type AuthStateStream = UnboundedReceiver<Option<Account>>;

/// Async interface to the remote document store.
pub trait DocumentStore {
    fn subscribe(&self, id: &str) -> Subscription;
    fn get(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Snapshot, StoreError>>;
    fn merge_write(
        &self,
        id: &str,
        patch: DocumentPatch,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
    fn delete(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
    fn create(
        &self,
        owner: &str,
        title: &str,
    ) -> impl std::future::Future<Output = Result<String, StoreError>>;
    fn list(
        &self,
        owner: &str,
    ) -> impl std::future::Future<Output = Result<Vec<(String, DocumentData)>, StoreError>>;
}

/// Async interface to the remote auth service.
pub trait AuthService {
    /// Create an account and sign it in.
    fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<Account, AuthError>>;
    fn send_verification_email(
        &self,
        account: &Account,
    ) -> impl std::future::Future<Output = Result<(), AuthError>>;
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<Account, AuthError>>;
    fn sign_out(&self) -> impl std::future::Future<Output = ()>;
    fn on_auth_state_changed(&self) -> AuthStateStream;
}
