//! Background recomputation with latest-request-wins semantics.
//!
//! Each `submit` bumps a shared generation counter and runs `build_shape` on a
//! worker thread. Completions travel back over a channel tagged with their
//! generation; anything older than the newest request is dropped, so results
//! arriving out of order never overwrite newer state. In-flight solves are not
//! cancelled, they finish and are discarded.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::error::HypertileError;
use crate::hyperbolic::{build_shape, ReflectionGroupSignature, Shape, ShapeCfg};

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

/// Handle for one submitted request; only `ShapeSession::submit` makes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket {
    session: u64,
    generation: u64,
}

impl Ticket {
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a completed request.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Newest request succeeded; its shape is now current.
    Applied { generation: u64 },
    /// Newest request failed; the previous shape (if any) is kept.
    Failed {
        generation: u64,
        error: HypertileError,
    },
    /// Superseded by a newer request before it completed.
    Stale { generation: u64 },
    /// The ticket was not issued by this session.
    Unknown { generation: u64 },
}

/// Settled updates kept for `wait`, counted back from the latest generation.
const RETAINED: u64 = 64;

struct Completion {
    generation: u64,
    result: Result<Shape, HypertileError>,
}

/// Owns the last good shape and the generation counter.
pub struct ShapeSession {
    id: u64,
    cfg: ShapeCfg,
    generation: AtomicU64,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    current: Option<(u64, Shape)>,
    settled: BTreeMap<u64, Update>,
}

impl ShapeSession {
    pub fn new(cfg: ShapeCfg) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            id: NEXT_SESSION.fetch_add(1, Ordering::Relaxed),
            cfg,
            generation: AtomicU64::new(0),
            tx,
            rx,
            current: None,
            settled: BTreeMap::new(),
        }
    }

    /// Newest generation handed out so far (0 before the first submit).
    pub fn latest(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Last successfully applied shape.
    pub fn current(&self) -> Option<&Shape> {
        self.current.as_ref().map(|(_, s)| s)
    }

    /// Generation of the current shape.
    pub fn current_generation(&self) -> Option<u64> {
        self.current.as_ref().map(|(g, _)| *g)
    }

    /// Start building `signature` in the background.
    pub fn submit(&self, signature: ReflectionGroupSignature) -> Ticket {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let tx = self.tx.clone();
        let cfg = self.cfg;
        tracing::debug!(generation, %signature, "shape_submitted");
        thread::spawn(move || {
            let result = build_shape(&signature, &cfg);
            // receiver gone means the session was dropped; nothing to report to
            let _ = tx.send(Completion { generation, result });
        });
        Ticket {
            session: self.id,
            generation,
        }
    }

    /// Apply every completion that has already arrived, without blocking.
    pub fn poll(&mut self) -> Vec<Update> {
        let arrived: Vec<Completion> = self.rx.try_iter().collect();
        arrived.into_iter().map(|c| self.apply(c)).collect()
    }

    /// Block until `ticket` completes, applying everything that arrives first.
    ///
    /// Returns the update for `ticket` itself, also when it was already
    /// settled by an earlier `poll` or `wait`. Tickets more than 64
    /// generations behind the latest are reported stale without waiting, and
    /// tickets from another session are `Unknown`.
    pub fn wait(&mut self, ticket: Ticket) -> Update {
        if ticket.session != self.id || ticket.generation > self.latest() {
            return Update::Unknown {
                generation: ticket.generation,
            };
        }
        let stale = Update::Stale {
            generation: ticket.generation,
        };
        loop {
            if let Some(update) = self.settled.get(&ticket.generation) {
                return update.clone();
            }
            if ticket.generation + RETAINED <= self.latest() {
                return stale;
            }
            // self owns a sender, so the channel never disconnects here
            let Ok(completion) = self.rx.recv() else {
                return stale;
            };
            self.apply(completion);
        }
    }

    fn apply(&mut self, completion: Completion) -> Update {
        let Completion { generation, result } = completion;
        let latest = self.latest();
        let update = if generation != latest {
            tracing::debug!(generation, latest, "stale_shape_discarded");
            Update::Stale { generation }
        } else {
            match result {
                Ok(shape) => {
                    self.current = Some((generation, shape));
                    Update::Applied { generation }
                }
                Err(error) => {
                    tracing::warn!(generation, kind = error.kind(), %error, "shape_failed_keeping_previous");
                    Update::Failed { generation, error }
                }
            }
        };
        self.settled.insert(generation, update.clone());
        self.settled = self.settled.split_off(&latest.saturating_sub(RETAINED - 1));
        update
    }
}
