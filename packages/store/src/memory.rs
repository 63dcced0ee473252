use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use futures::channel::mpsc::{unbounded, UnboundedSender};

use crate::error::{AuthError, AuthErrorCode, StoreError};
use crate::models::{Account, DocumentData, DocumentPatch, Snapshot};
use crate::repo::{AuthService, AuthStateStream, DocumentStore, Subscription};

type SnapshotSender = UnboundedSender<Result<Snapshot, StoreError>>;

/// In-memory DocumentStore for testing and the bundled web build.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

#[derive(Debug, Default)]
struct StoreInner {
    documents: BTreeMap<String, DocumentData>,
    listeners: HashMap<String, Vec<SnapshotSender>>,
    writes: Vec<(String, DocumentPatch)>,
    next_id: u64,
    offline: bool,
}

impl StoreInner {
    fn snapshot(&self, id: &str) -> Snapshot {
        Snapshot {
            id: id.to_string(),
            data: self.documents.get(id).cloned(),
        }
    }

    fn notify(&mut self, id: &str) {
        let snapshot = self.snapshot(id);
        if let Some(senders) = self.listeners.get_mut(id) {
            senders.retain(|tx| tx.unbounded_send(Ok(snapshot.clone())).is_ok());
        }
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline {
            Err(StoreError::Unavailable("offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed a record without recording a write.
    pub fn insert(&self, id: &str, data: DocumentData) {
        let mut inner = self.lock();
        inner.documents.insert(id.to_string(), data);
        inner.notify(id);
    }

    pub fn document(&self, id: &str) -> Option<DocumentData> {
        self.lock().documents.get(id).cloned()
    }

    /// Every merge-write received so far, in order.
    pub fn writes(&self) -> Vec<(String, DocumentPatch)> {
        self.lock().writes.clone()
    }

    /// Number of live subscriptions on a record.
    pub fn subscriber_count(&self, id: &str) -> usize {
        self.lock()
            .listeners
            .get(id)
            .map_or(0, |senders| senders.iter().filter(|tx| !tx.is_closed()).count())
    }

    /// Reject every subscriber of `id`, as a security rule change would.
    pub fn revoke(&self, id: &str) {
        let mut inner = self.lock();
        if let Some(senders) = inner.listeners.remove(id) {
            for tx in senders {
                let _ = tx.unbounded_send(Err(StoreError::PermissionDenied(id.to_string())));
            }
        }
    }

    /// While offline every call fails with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }
}

impl DocumentStore for MemoryStore {
    fn subscribe(&self, id: &str) -> Subscription {
        let (tx, rx) = unbounded();
        let mut inner = self.lock();
        let first = match inner.check_online() {
            Ok(()) => Ok(inner.snapshot(id)),
            Err(e) => Err(e),
        };
        if tx.unbounded_send(first).is_ok() {
            inner.listeners.entry(id.to_string()).or_default().push(tx);
        }
        rx
    }

    async fn get(&self, id: &str) -> Result<Snapshot, StoreError> {
        let inner = self.lock();
        inner.check_online()?;
        Ok(inner.snapshot(id))
    }

    async fn merge_write(&self, id: &str, patch: DocumentPatch) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.check_online()?;
        inner
            .documents
            .entry(id.to_string())
            .or_default()
            .merge(&patch, Utc::now());
        inner.writes.push((id.to_string(), patch));
        inner.notify(id);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.check_online()?;
        if inner.documents.remove(id).is_some() {
            inner.notify(id);
        }
        Ok(())
    }

    async fn create(&self, owner: &str, title: &str) -> Result<String, StoreError> {
        let mut inner = self.lock();
        inner.check_online()?;
        inner.next_id += 1;
        let id = format!("d{:06}", inner.next_id);
        inner.documents.insert(
            id.clone(),
            DocumentData {
                title: Some(title.to_string()),
                body: Some(String::new()),
                shared: Some(false),
                updated: Some(Utc::now()),
                owner: Some(owner.to_string()),
            },
        );
        Ok(id)
    }

    async fn list(&self, owner: &str) -> Result<Vec<(String, DocumentData)>, StoreError> {
        let inner = self.lock();
        inner.check_online()?;
        let mut docs: Vec<_> = inner
            .documents
            .iter()
            .filter(|(_, data)| data.owner.as_deref() == Some(owner))
            .map(|(id, data)| (id.clone(), data.clone()))
            .collect();
        docs.sort_by(|a, b| b.1.updated.cmp(&a.1.updated));
        Ok(docs)
    }
}

/// In-memory AuthService for testing and the bundled web build.
#[derive(Clone, Debug, Default)]
pub struct MemoryAuth {
    inner: Arc<Mutex<AuthInner>>,
}

#[derive(Debug, Default)]
struct AuthInner {
    /// Keyed by lowercased email.
    accounts: HashMap<String, (Account, String)>,
    current: Option<Account>,
    listeners: Vec<UnboundedSender<Option<Account>>>,
    outbox: Vec<String>,
    next_uid: u64,
    offline: bool,
    fail_verification: bool,
}

impl AuthInner {
    fn set_current(&mut self, account: Option<Account>) {
        self.current = account;
        let current = self.current.clone();
        self.listeners
            .retain(|tx| tx.unbounded_send(current.clone()).is_ok());
    }

    fn check_online(&self) -> Result<(), AuthError> {
        if self.offline {
            Err(AuthError::new(
                AuthErrorCode::NetworkRequestFailed,
                "A network error has occurred",
            ))
        } else {
            Ok(())
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, AuthInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current_account(&self) -> Option<Account> {
        self.lock().current.clone()
    }

    /// Addresses verification mail has been sent to.
    pub fn verification_outbox(&self) -> Vec<String> {
        self.lock().outbox.clone()
    }

    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Make every verification mail fail to send.
    pub fn fail_verification_mail(&self, fail: bool) {
        self.lock().fail_verification = fail;
    }
}

impl AuthService for MemoryAuth {
    async fn create_account(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let mut inner = self.lock();
        inner.check_online()?;
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(AuthError::new(
                AuthErrorCode::InvalidEmail,
                "The email address is badly formatted",
            ));
        }
        let key = email.to_lowercase();
        if inner.accounts.contains_key(&key) {
            return Err(AuthError::new(
                AuthErrorCode::EmailAlreadyInUse,
                "The email address is already in use by another account",
            ));
        }
        if password.chars().count() < 6 {
            return Err(AuthError::new(
                AuthErrorCode::WeakPassword,
                "Password should be at least 6 characters",
            ));
        }

        inner.next_uid += 1;
        let account = Account {
            uid: format!("u{:06}", inner.next_uid),
            email: email.to_string(),
            email_verified: false,
        };
        inner
            .accounts
            .insert(key, (account.clone(), password.to_string()));
        inner.set_current(Some(account.clone()));
        tracing::debug!("Created account {}", account.uid);
        Ok(account)
    }

    async fn send_verification_email(&self, account: &Account) -> Result<(), AuthError> {
        let mut inner = self.lock();
        inner.check_online()?;
        if inner.fail_verification {
            return Err(AuthError::new(
                AuthErrorCode::TooManyRequests,
                "Unable to send verification email",
            ));
        }
        inner.outbox.push(account.email.clone());
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let mut inner = self.lock();
        inner.check_online()?;
        let key = email.trim().to_lowercase();
        let Some((account, stored)) = inner.accounts.get(&key).cloned() else {
            return Err(AuthError::new(
                AuthErrorCode::UserNotFound,
                "There is no user record corresponding to this identifier",
            ));
        };
        if stored != password {
            return Err(AuthError::new(
                AuthErrorCode::WrongPassword,
                "The password is invalid",
            ));
        }
        inner.set_current(Some(account.clone()));
        Ok(account)
    }

    async fn sign_out(&self) {
        self.lock().set_current(None);
    }

    fn on_auth_state_changed(&self) -> AuthStateStream {
        let (tx, rx) = unbounded();
        let mut inner = self.lock();
        if tx.unbounded_send(inner.current.clone()).is_ok() {
            inner.listeners.push(tx);
        }
        rx
    }
}
