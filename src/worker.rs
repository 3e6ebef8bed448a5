//! Single-writer front for a [`NavigationSession`].
//!
//! The session lives on its own thread and drains a bounded job queue, so game
//! events and user requests coming from different tasks are applied one at a
//! time, in arrival order.

use crate::models::Atlas;
use crate::state::session::{NavSnapshot, NavigationSession, Status};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

const QUEUE_DEPTH: usize = 64;

pub enum NavJob {
    /// Game variable update
    Signal {
        name: String,
        value: String,
        reply: oneshot::Sender<Option<Status>>,
    },
    Goto {
        target: String,
        reply: oneshot::Sender<Status>,
    },
    FindMe {
        reply: oneshot::Sender<Status>,
    },
    Where {
        reply: oneshot::Sender<Status>,
    },
    Snapshot {
        reply: oneshot::Sender<NavSnapshot>,
    },
    /// Swap the whole map
    Reload {
        atlas: Box<Atlas>,
        start: Option<String>,
        reply: oneshot::Sender<NavSnapshot>,
    },
}

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("navigation worker has stopped")]
    Stopped,
}

impl<T> From<mpsc::error::SendError<T>> for WorkerError {
    fn from(_: mpsc::error::SendError<T>) -> Self {
        WorkerError::Stopped
    }
}

impl From<oneshot::error::RecvError> for WorkerError {
    fn from(_: oneshot::error::RecvError) -> Self {
        WorkerError::Stopped
    }
}

/// Cheap to clone; every clone feeds the same session.
#[derive(Debug, Clone)]
pub struct NavHandle {
    tx: mpsc::Sender<NavJob>,
}

/// Moves `session` onto a dedicated thread. The thread exits once every
/// handle is dropped.
pub fn start_nav_worker(mut session: NavigationSession) -> NavHandle {
    let (tx, mut rx) = mpsc::channel::<NavJob>(QUEUE_DEPTH);

    std::thread::spawn(move || {
        while let Some(job) = rx.blocking_recv() {
            match job {
                NavJob::Signal { name, value, reply } => {
                    let _ = reply.send(session.signal(&name, &value));
                }
                NavJob::Goto { target, reply } => {
                    let _ = reply.send(session.goto(&target));
                }
                NavJob::FindMe { reply } => {
                    let _ = reply.send(session.find_me());
                }
                NavJob::Where { reply } => {
                    let _ = reply.send(session.where_am_i());
                }
                NavJob::Snapshot { reply } => {
                    let _ = reply.send(session.snapshot());
                }
                NavJob::Reload { atlas, start, reply } => {
                    session.load_atlas(*atlas, start.as_deref());
                    let _ = reply.send(session.snapshot());
                }
            }
        }
        debug!("navigation worker stopped");
    });

    NavHandle { tx }
}

impl NavHandle {
    async fn ask<T>(&self, job: impl FnOnce(oneshot::Sender<T>) -> NavJob) -> Result<T, WorkerError> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(job(reply)).await?;
        Ok(rx.await?)
    }

    pub async fn signal(&self, name: impl Into<String>, value: impl Into<String>) -> Result<Option<Status>, WorkerError> {
        let (name, value) = (name.into(), value.into());
        self.ask(|reply| NavJob::Signal { name, value, reply }).await
    }

    pub async fn goto(&self, target: impl Into<String>) -> Result<Status, WorkerError> {
        let target = target.into();
        self.ask(|reply| NavJob::Goto { target, reply }).await
    }

    pub async fn find_me(&self) -> Result<Status, WorkerError> {
        self.ask(|reply| NavJob::FindMe { reply }).await
    }

    pub async fn where_am_i(&self) -> Result<Status, WorkerError> {
        self.ask(|reply| NavJob::Where { reply }).await
    }

    pub async fn snapshot(&self) -> Result<NavSnapshot, WorkerError> {
        self.ask(|reply| NavJob::Snapshot { reply }).await
    }

    pub async fn reload(&self, atlas: Atlas, start: Option<String>) -> Result<NavSnapshot, WorkerError> {
        let atlas = Box::new(atlas);
        self.ask(|reply| NavJob::Reload { atlas, start, reply }).await
    }
}
