//! Frame snapshot shared between tasks
//!
//! The polling task owns the [`Pixy`](crate::Pixy) and publishes each
//! finished frame here. Publishing copies the whole store under the lock,
//! so a reader sees either the previous frame or the new one, never a count
//! that covers half-written slots.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use pixy_protocol::FrameStore;

/// Latest decoded frame plus an update notification
pub struct SharedFrame<M: RawMutex> {
    frame: Mutex<M, RefCell<FrameStore>>,
    updated: Signal<M, usize>,
}

impl<M: RawMutex> Default for SharedFrame<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> SharedFrame<M> {
    /// Create an empty snapshot; usable in a `static`
    pub const fn new() -> Self {
        Self {
            frame: Mutex::new(RefCell::new(FrameStore::new())),
            updated: Signal::new(),
        }
    }

    /// Replace the snapshot and wake any waiter with the new block count
    pub fn publish(&self, frame: &FrameStore) {
        self.frame.lock(|cell| cell.borrow_mut().clone_from(frame));
        self.updated.signal(frame.count());
    }

    /// Copy of the latest frame
    pub fn snapshot(&self) -> FrameStore {
        self.frame.lock(|cell| cell.borrow().clone())
    }

    /// Inspect the latest frame without copying it
    ///
    /// Keep `f` short: the publisher blocks while it runs.
    pub fn with<R>(&self, f: impl FnOnce(&FrameStore) -> R) -> R {
        self.frame.lock(|cell| f(&*cell.borrow()))
    }

    /// Block count of the latest frame
    pub fn count(&self) -> usize {
        self.with(FrameStore::count)
    }

    /// Wait for the next publish; returns its block count
    pub async fn wait_update(&self) -> usize {
        self.updated.wait().await
    }
}
