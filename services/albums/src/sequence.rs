//! Request bookkeeping shared by the stores

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Issues monotonically increasing tickets for full-replace fetches
///
/// A fetch response may only be applied while its ticket is still the latest
/// one issued, so an older fetch resolving last cannot overwrite a newer view.
#[derive(Debug, Default)]
pub(crate) struct Sequencer {
    issued: AtomicU64,
}

impl Sequencer {
    pub(crate) fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn is_latest(&self, ticket: u64) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket
    }
}

/// Counts operations currently awaiting the network
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    count: AtomicUsize,
}

impl InFlight {
    pub(crate) fn enter(&self) -> InFlightGuard<'_> {
        self.count.fetch_add(1, Ordering::SeqCst);
        InFlightGuard(&self.count)
    }

    pub(crate) fn is_active(&self) -> bool {
        self.count.load(Ordering::SeqCst) > 0
    }
}

/// Marks one operation as finished when dropped
pub(crate) struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
