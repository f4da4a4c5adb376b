use rayon::{Scope, ThreadPool, ThreadPoolBuilder};

use super::{KeygenConfig, LocalError, Round1Announcement};
use crate::params::DlnParams;

/// A bounded pool of workers verifying DLN proofs.
///
/// The pool can be reused across rounds and sessions.
/// Jobs in excess of the number of workers wait in a queue.
#[derive(Debug)]
pub struct DlnProofVerifier {
    pool: ThreadPool,
}

impl DlnProofVerifier {
    /// Starts `config.concurrency` worker threads.
    pub fn new(config: &KeygenConfig) -> Result<Self, LocalError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.concurrency.get())
            .thread_name(|index| format!("dln-verifier-{index}"))
            .build()
            .map_err(|error| LocalError::ThreadPool(error.to_string()))?;
        tracing::debug!("Started DLN proof verifier with {} workers", pool.current_num_threads());
        Ok(Self { pool })
    }

    /// The number of worker threads.
    pub fn concurrency(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Calls `op` to submit verification jobs, and blocks until all of them are completed.
    ///
    /// Jobs are not cancelled or skipped if some of them fail.
    pub fn run_batch<'scope, OP, R>(&self, op: OP) -> R
    where
        OP: for<'s> FnOnce(&DlnBatch<'s, 'scope>) -> R + Send,
        R: Send,
    {
        self.pool.scope(move |scope| op(&DlnBatch { scope }))
    }
}

/// A set of verification jobs submitted to a [`DlnProofVerifier`].
#[derive(Clone, Copy)]
pub struct DlnBatch<'s, 'scope> {
    scope: &'s Scope<'scope>,
}

impl<'scope> DlnBatch<'_, 'scope> {
    /// Queues the verification of the proof of `h2 = h1^alpha` from `announcement`.
    /// `on_done` is called with the result once the job is finished.
    pub fn verify_dln_proof_1<P: DlnParams>(
        &self,
        announcement: &'scope Round1Announcement<P>,
        on_done: impl FnOnce(bool) + Send + 'scope,
    ) {
        self.scope.spawn(move |_| on_done(announcement.verify_dln_proof_1()));
    }

    /// Queues the verification of the proof of `h1 = h2^beta` from `announcement`.
    /// `on_done` is called with the result once the job is finished.
    pub fn verify_dln_proof_2<P: DlnParams>(
        &self,
        announcement: &'scope Round1Announcement<P>,
        on_done: impl FnOnce(bool) + Send + 'scope,
    ) {
        self.scope.spawn(move |_| on_done(announcement.verify_dln_proof_2()));
    }
}
