//! Persistence for the election document.
//!
//! The document is one JSON value under one fixed key. Backends only know
//! how to read and overwrite that value; [`Store`] layers the
//! load-modify-save cycle on top.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use log::warn;
use rocket::{
    request::{self, FromRequest, Request},
    serde::json::serde_json,
    tokio::task::{self, JoinError},
    State,
};
use thiserror::Error;

use crate::model::election::ElectionDocument;

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Document in {0} is malformed: {1}")]
    Malformed(String, #[source] serde_json::Error),
    #[error("Store task failed: {0}")]
    Task(#[from] JoinError),
}

/// Raw access to the persisted text of the document.
pub trait DocumentStore: Send + Sync {
    /// The persisted text, or `None` if nothing has been written yet.
    fn read(&self) -> Result<Option<String>>;

    /// Replace the persisted text entirely.
    fn write(&self, contents: &str) -> Result<()>;

    /// Where the document lives, for log messages.
    fn describe(&self) -> String;
}

/// Handle on the election document.
///
/// Cloning is cheap and every clone shares the same backend and the same
/// write lock, so transactions from one process never interleave. Writers in
/// other processes are not coordinated with: the last write wins.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn DocumentStore>,
    lock: Arc<Mutex<()>>,
}

impl Store {
    pub fn new(backend: impl DocumentStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// A store backed by memory only.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }

    /// Read the document, seeding it with defaults on first use.
    ///
    /// A document that cannot be parsed is replaced with defaults as well;
    /// only I/O failures are errors.
    pub fn load(&self) -> Result<ElectionDocument> {
        let _guard = self.guard();
        self.load_unlocked()
    }

    /// Read the document without ever writing it.
    ///
    /// `None` if nothing has been written yet. Unlike [`Store::load`], a
    /// document that cannot be parsed is reported instead of replaced.
    pub fn peek(&self) -> Result<Option<ElectionDocument>> {
        let _guard = self.guard();
        self.backend
            .read()?
            .map(|contents| {
                serde_json::from_str(&contents)
                    .map_err(|e| StoreError::Malformed(self.backend.describe(), e))
            })
            .transpose()
    }

    /// Overwrite the whole document.
    pub fn save(&self, doc: &ElectionDocument) -> Result<()> {
        let _guard = self.guard();
        self.save_unlocked(doc)
    }

    /// Load the document, apply `op`, and write the result back if `op`
    /// succeeded. On failure nothing is written.
    pub fn transact<T, E, F>(&self, op: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut ElectionDocument) -> std::result::Result<T, E>,
        E: From<StoreError>,
    {
        let _guard = self.guard();
        let mut doc = self.load_unlocked()?;
        let value = op(&mut doc)?;
        self.save_unlocked(&doc)?;
        Ok(value)
    }

    /// Throw the document away and start again from defaults.
    pub fn reset(&self) -> Result<ElectionDocument> {
        let _guard = self.guard();
        let doc = ElectionDocument::default();
        self.save_unlocked(&doc)?;
        Ok(doc)
    }

    /// Run `op` on the blocking thread pool, so file I/O and waiting for the
    /// write lock never stall an async worker.
    pub async fn run<T, E, F>(&self, op: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&Store) -> std::result::Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<StoreError> + Send + 'static,
    {
        let store = self.clone();
        task::spawn_blocking(move || op(&store))
            .await
            .map_err(StoreError::from)?
    }

    pub fn describe(&self) -> String {
        self.backend.describe()
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The lock guards no data, so a panic while it was held leaves
        // nothing inconsistent behind.
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load_unlocked(&self) -> Result<ElectionDocument> {
        match self.backend.read()? {
            Some(contents) => match serde_json::from_str(&contents) {
                Ok(doc) => Ok(doc),
                Err(e) => {
                    warn!(
                        "Discarding unreadable document in {}: {e}",
                        self.backend.describe()
                    );
                    self.seed()
                }
            },
            None => self.seed(),
        }
    }

    fn save_unlocked(&self, doc: &ElectionDocument) -> Result<()> {
        let contents = serde_json::to_string(doc)?;
        self.backend.write(&contents)
    }

    fn seed(&self) -> Result<ElectionDocument> {
        let doc = ElectionDocument::default();
        self.save_unlocked(&doc)?;
        Ok(doc)
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Store {
    type Error = ();

    /// Get the store handle from the managed state.
    ///
    /// Panics iff the [`Store`] is not managed by [`rocket::Rocket`].
    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let store = req.guard::<&State<Store>>().await.unwrap();
        request::Outcome::Success(store.inner().clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::election::{self, ElectionError, Rejection};
    use crate::model::{party::PartySpec, voter::VoterRegistration};

    use super::*;

    #[derive(Debug)]
    enum TestError {
        Election(ElectionError),
        Store(StoreError),
    }

    impl From<StoreError> for TestError {
        fn from(err: StoreError) -> Self {
            Self::Store(err)
        }
    }

    impl From<ElectionError> for TestError {
        fn from(err: ElectionError) -> Self {
            Self::Election(err)
        }
    }

    #[test]
    fn first_load_seeds_defaults() {
        let backend = MemoryStore::default();
        let store = Store::new(backend.clone());
        assert_eq!(backend.read().unwrap(), None);

        assert_eq!(store.load().unwrap(), ElectionDocument::default());
        assert!(backend.read().unwrap().is_some());
    }

    #[test]
    fn malformed_document_replaced_by_defaults() {
        let backend = MemoryStore::with_contents("{ not json");
        let store = Store::new(backend.clone());

        assert_eq!(store.load().unwrap(), ElectionDocument::default());
        let persisted: ElectionDocument =
            serde_json::from_str(&backend.read().unwrap().unwrap()).unwrap();
        assert_eq!(persisted, ElectionDocument::default());
    }

    #[test]
    fn peek_never_writes() {
        let backend = MemoryStore::default();
        let store = Store::new(backend.clone());
        assert_eq!(store.peek().unwrap(), None);
        assert_eq!(backend.read().unwrap(), None);

        let backend = MemoryStore::with_contents("{ not json");
        let store = Store::new(backend.clone());
        assert!(matches!(store.peek(), Err(StoreError::Malformed(..))));
        assert_eq!(backend.read().unwrap().as_deref(), Some("{ not json"));

        store.save(&ElectionDocument::example()).unwrap();
        assert_eq!(store.peek().unwrap(), Some(ElectionDocument::example()));
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = Store::in_memory();
        let mut doc = ElectionDocument::example();
        election::cast_vote(&mut doc, "v1", "Alpha", "BOOTH-001", Utc::now()).unwrap();

        store.save(&doc).unwrap();
        assert_eq!(store.load().unwrap(), doc);
    }

    #[test]
    fn failed_transaction_writes_nothing() {
        let store = Store::in_memory();
        store
            .transact(|doc| {
                election::register_party(doc, PartySpec::example2())
                    .map(|_| ())
                    .map_err(TestError::from)
            })
            .unwrap();
        let before = store.load().unwrap();

        let result: std::result::Result<(), TestError> = store.transact(|doc| {
            // Mutate first, then fail: the mutation must not be persisted.
            doc.election_settings.is_active = true;
            Err(ElectionError::Rejected(Rejection::AlreadyVoted).into())
        });
        assert!(matches!(result, Err(TestError::Election(_))));
        assert_eq!(store.load().unwrap(), before);

        let result: std::result::Result<(), TestError> = store.transact(|doc| {
            election::register_party(doc, PartySpec::example2())?;
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(store.load().unwrap().parties.len(), 1);
    }

    #[test]
    fn clones_share_one_document() {
        let store = Store::in_memory();
        let other = store.clone();
        store
            .transact(|doc| {
                election::register_voter(doc, VoterRegistration::example())
                    .map(|_| ())
                    .map_err(TestError::from)
            })
            .unwrap();
        assert_eq!(other.load().unwrap().users.len(), 1);
    }

    #[test]
    fn concurrent_transactions_lose_no_updates() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(JsonFileStore::open(dir.path()).unwrap());

        let workers: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .transact(|doc| {
                            let spec = PartySpec {
                                name: format!("Party {i}"),
                                symbol: format!("P{i}"),
                                ..PartySpec::default()
                            };
                            election::register_party(doc, spec)
                                .map(|_| ())
                                .map_err(TestError::from)
                        })
                        .unwrap();
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let reopened = Store::new(JsonFileStore::open(dir.path()).unwrap());
        assert_eq!(reopened.load().unwrap().parties.len(), 16);
    }

    #[rocket::async_test]
    async fn blocking_runs_share_the_document() {
        let store = Store::in_memory();

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                rocket::tokio::spawn(async move {
                    store
                        .run(move |store| {
                            store.transact(|doc| {
                                election::register_voter(
                                    doc,
                                    VoterRegistration {
                                        username: format!("v{i}"),
                                        password: "pw".into(),
                                        voter_id: format!("VOTER{i:03}"),
                                    },
                                )
                                .map(|_| ())
                                .map_err(TestError::from)
                            })
                        })
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let doc = store.run(Store::load).await.unwrap();
        assert_eq!(doc.users.len(), 8);
    }

    #[test]
    fn reset_restores_defaults() {
        let store = Store::in_memory();
        store.save(&ElectionDocument::example()).unwrap();
        assert_eq!(store.reset().unwrap(), ElectionDocument::default());
        assert_eq!(store.load().unwrap(), ElectionDocument::default());
    }
}
