//! Reference-counted background scroll lock.
//!
//! Every holder of a [`ScrollLockGuard`] keeps the page locked. The first
//! acquisition saves the scroll offset and locks the surface; the last
//! release unlocks it and restores that exact offset. Guards release on drop,
//! so an abruptly dropped viewer can never leave scrolling disabled.

use alloc::rc::Rc;
use core::cell::RefCell;

/// The scrollable document behind the viewer.
pub trait ScrollSurface {
    /// Current scroll offset.
    fn offset(&self) -> f64;
    /// Prevent the background from scrolling.
    fn lock(&mut self);
    /// Allow scrolling again and jump back to `restore_to`.
    fn unlock(&mut self, restore_to: f64);
}

#[derive(Debug)]
struct LockState<S> {
    surface: S,
    holders: usize,
    saved: f64,
}

/// Shared handle to a scroll surface. Clones share one holder count.
#[derive(Debug)]
pub struct ScrollLock<S: ScrollSurface> {
    inner: Rc<RefCell<LockState<S>>>,
}

impl<S: ScrollSurface> Clone for ScrollLock<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: ScrollSurface> ScrollLock<S> {
    /// Wrap a surface. Nothing is locked yet.
    pub fn new(surface: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(LockState {
                surface,
                holders: 0,
                saved: 0.0,
            })),
        }
    }

    /// Take a hold on the lock.
    pub fn acquire(&self) -> ScrollLockGuard<S> {
        let mut state = self.inner.borrow_mut();
        if state.holders == 0 {
            state.saved = state.surface.offset();
            state.surface.lock();
            tracing::trace!(offset = state.saved, "scroll locked");
        }
        state.holders += 1;
        drop(state);
        ScrollLockGuard {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Whether any guard is alive.
    pub fn is_locked(&self) -> bool {
        self.holders() > 0
    }

    /// Number of live guards.
    pub fn holders(&self) -> usize {
        self.inner.borrow().holders
    }

    /// Run `f` against the underlying surface.
    ///
    /// # Panics
    ///
    /// If `f` calls back into this lock (`acquire`, `holders`, `is_locked`,
    /// `with_surface`) or drops one of its guards. The surface stays
    /// mutably borrowed for the whole call.
    pub fn with_surface<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.inner.borrow_mut().surface)
    }
}

/// One hold on a [`ScrollLock`]. Releases on drop.
#[derive(Debug)]
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct ScrollLockGuard<S: ScrollSurface> {
    inner: Rc<RefCell<LockState<S>>>,
}

impl<S: ScrollSurface> Drop for ScrollLockGuard<S> {
    fn drop(&mut self) {
        let mut state = self.inner.borrow_mut();
        state.holders = state.holders.saturating_sub(1);
        if state.holders == 0 {
            let saved = state.saved;
            state.surface.unlock(saved);
            tracing::trace!(offset = saved, "scroll unlocked");
        }
    }
}
