// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Instrumented element types for container tests.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Tally {
    created: Cell<usize>,
    dropped: Cell<usize>,
}

/// Shared ledger of [`Tracked`] values.
///
/// Every `Tracked` created through [`track`](Self::track) or by cloning another one counts
/// as created; every drop counts as dropped. After a test, `live() == 0` means nothing
/// leaked, and a double drop shows up as `dropped() > created()`.
///
/// # Example
/// ```
/// use rampart_test_utils::DropCounter;
///
/// let counter = DropCounter::new();
/// let a = counter.track(1);
/// let b = a.clone();
/// assert_eq!(counter.live(), 2);
///
/// drop(a);
/// drop(b);
/// assert_eq!(counter.dropped(), 2);
/// assert_eq!(counter.live(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DropCounter {
    tally: Rc<Tally>,
}

impl DropCounter {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tracked value.
    pub fn track(&self, value: usize) -> Tracked {
        self.tally.created.set(self.tally.created.get() + 1);

        Tracked {
            value,
            counter: self.clone(),
        }
    }

    /// Number of values created so far.
    pub fn created(&self) -> usize {
        self.tally.created.get()
    }

    /// Number of values dropped so far.
    pub fn dropped(&self) -> usize {
        self.tally.dropped.get()
    }

    /// Number of values currently alive.
    ///
    /// # Panics
    ///
    /// If more values were dropped than created.
    pub fn live(&self) -> usize {
        self.created()
            .checked_sub(self.dropped())
            .expect("DropCounter: more drops than creations (double drop)")
    }
}

/// A value registered with a [`DropCounter`].
///
/// Equality and ordering look at `value` only.
#[derive(Debug)]
pub struct Tracked {
    /// Payload used for comparisons.
    pub value: usize,
    counter: DropCounter,
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.counter.track(self.value)
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Tracked {}

impl Drop for Tracked {
    fn drop(&mut self) {
        let tally = &self.counter.tally;
        tally.dropped.set(tally.dropped.get() + 1);
    }
}

/// Shared countdown that makes [`CloneBomb`] clones panic.
///
/// A fresh fuse is disarmed. [`arm(n)`](Self::arm) lets `n - 1` further clones succeed and
/// panics on the `n`-th; the fuse disarms itself when it fires.
#[derive(Debug, Clone, Default)]
pub struct Fuse {
    remaining: Rc<Cell<Option<usize>>>,
}

impl Fuse {
    /// Creates a disarmed fuse.
    pub fn new() -> Self {
        Self::default()
    }

    /// Panics on the `n`-th clone from now. `n == 0` is treated as `1`.
    pub fn arm(&self, n: usize) {
        self.remaining.set(Some(n.max(1)));
    }

    /// Stops any pending panic.
    pub fn disarm(&self) {
        self.remaining.set(None);
    }

    /// Returns `true` while a panic is pending.
    pub fn is_armed(&self) -> bool {
        self.remaining.get().is_some()
    }

    fn tick(&self) {
        match self.remaining.get() {
            None => {}
            Some(1) => {
                self.remaining.set(None);
                panic!("CloneBomb: fuse fired");
            }
            Some(n) => self.remaining.set(Some(n - 1)),
        }
    }
}

/// Element whose `Clone` panics when its [`Fuse`] fires.
///
/// Each bomb also carries a [`Tracked`] value, so tests can check that a rollback
/// destroyed every partial clone exactly once. Equality looks at the payload only.
///
/// # Example
/// ```
/// use std::panic::{catch_unwind, AssertUnwindSafe};
/// use rampart_test_utils::{CloneBomb, DropCounter, Fuse};
///
/// let counter = DropCounter::new();
/// let fuse = Fuse::new();
/// let bomb = CloneBomb::new(7, &fuse, &counter);
///
/// fuse.arm(2);
/// let first = bomb.clone();
/// let second = catch_unwind(AssertUnwindSafe(|| bomb.clone()));
///
/// assert_eq!(first.value(), 7);
/// assert!(second.is_err());
/// ```
#[derive(Debug)]
pub struct CloneBomb {
    inner: Tracked,
    fuse: Fuse,
}

impl CloneBomb {
    /// Creates a bomb holding `value`, tracked by `counter`.
    pub fn new(value: usize, fuse: &Fuse, counter: &DropCounter) -> Self {
        Self {
            inner: counter.track(value),
            fuse: fuse.clone(),
        }
    }

    /// Returns the payload.
    pub fn value(&self) -> usize {
        self.inner.value
    }
}

impl Clone for CloneBomb {
    fn clone(&self) -> Self {
        self.fuse.tick();

        Self {
            inner: self.inner.clone(),
            fuse: self.fuse.clone(),
        }
    }
}

impl PartialEq for CloneBomb {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for CloneBomb {}

/// Element whose destructor panics when built armed.
///
/// The inner [`Tracked`] is still destroyed while the panic unwinds, so the owning
/// [`DropCounter`] counts the panicking drop too.
///
/// # Example
/// ```
/// use std::panic::{catch_unwind, AssertUnwindSafe};
/// use rampart_test_utils::{DropCounter, PanicOnDrop};
///
/// let counter = DropCounter::new();
/// let armed = PanicOnDrop::new(counter.track(3), true);
///
/// assert!(catch_unwind(AssertUnwindSafe(move || drop(armed))).is_err());
/// assert_eq!(counter.dropped(), 1);
/// ```
#[derive(Debug)]
pub struct PanicOnDrop {
    inner: Tracked,
    armed: bool,
}

impl PanicOnDrop {
    /// Wraps `inner`; the destructor panics if `armed`.
    pub fn new(inner: Tracked, armed: bool) -> Self {
        Self { inner, armed }
    }

    /// Returns the payload.
    pub fn value(&self) -> usize {
        self.inner.value
    }
}

impl Drop for PanicOnDrop {
    fn drop(&mut self) {
        if self.armed {
            panic!("PanicOnDrop: destructor of {} panicked", self.inner.value);
        }
    }
}
