//! Single-writer actor for all database mutations.
//!
//! SQLite allows one writer at a time; instead of letting pool connections
//! race for the write lock, every mutation is sent to one background task
//! that owns a dedicated connection and executes jobs serially, each inside
//! an immediate transaction. Repositories rely on this for the lock guard:
//! a job that loads a row, runs the guard, and writes the result back is
//! atomic with respect to every other mutation.

use std::any::Any;

use diesel::result::Error as DieselError;
use diesel::SqliteConnection;
use ipdesk_core::errors::{DatabaseError, Error, Result};
use log::error;
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;

type ErasedResult = Result<Box<dyn Any + Send + 'static>>;
type Job = Box<dyn FnOnce(&mut SqliteConnection) -> ErasedResult + Send + 'static>;

/// Transaction-scoped error that keeps domain errors intact.
///
/// The transaction wrapper needs `From<diesel::result::Error>` for its own
/// commit/rollback failures, but a job error must come back to the caller
/// as the exact core error the job produced (a lock conflict must stay a
/// lock conflict, not a stringified internal error).
enum TxError {
    Job(Error),
    Storage(StorageError),
}

impl From<DieselError> for TxError {
    fn from(err: DieselError) -> Self {
        TxError::Storage(StorageError::QueryFailed(err))
    }
}

impl From<TxError> for Error {
    fn from(err: TxError) -> Self {
        match err {
            TxError::Job(e) => e,
            TxError::Storage(e) => e.into(),
        }
    }
}

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(Job, oneshot::Sender<ErasedResult>)>,
}

impl WriteHandle {
    /// Executes a database job on the writer's dedicated connection, inside
    /// an immediate transaction. A job error rolls the transaction back and
    /// is returned unchanged.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        let erased: Job = Box::new(move |conn| {
            job(conn).map(|value| Box::new(value) as Box<dyn Any + Send>)
        });

        self.tx.send((erased, reply_tx)).await.map_err(|_| {
            Error::Database(DatabaseError::Internal(
                "database writer is not running".to_string(),
            ))
        })?;

        let result = reply_rx.await.map_err(|_| {
            Error::Database(DatabaseError::Internal(
                "database writer dropped the reply".to_string(),
            ))
        })?;

        result.map(|boxed| {
            *boxed
                .downcast::<T>()
                .unwrap_or_else(|_| panic!("writer job returned an unexpected type"))
        })
    }
}

/// Spawns the writer actor on the tokio runtime and returns its handle.
pub fn spawn_writer(pool: DbPool) -> Result<WriteHandle> {
    let (tx, mut rx) = mpsc::channel::<(Job, oneshot::Sender<ErasedResult>)>(1024);

    let mut conn = pool.get().map_err(|e| {
        Error::Database(DatabaseError::ConnectionFailed(format!(
            "cannot reserve the writer connection: {}",
            e
        )))
    })?;

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result: ErasedResult = conn
                .immediate_transaction::<_, TxError, _>(|c| job(c).map_err(TxError::Job))
                .map_err(Error::from);

            if reply_tx.send(result).is_err() {
                // Receiver gone (request cancelled); the write already
                // committed or rolled back, nothing to undo here.
                error!("writer job finished but the caller went away");
            }
        }
    });

    Ok(WriteHandle { tx })
}
