//! Interrupt-safe primitives shared between the control surface and the
//! scheduler.
//!
//! Both are built on `critical-section`, so they can be placed in a
//! `static` and touched from interrupt handlers or a network task.

use core::cell::{Cell, RefCell};

use critical_section::Mutex;
use heapless::Deque;

/// Bounded FIFO of `SIZE` values
///
/// Any number of producers may push; the scheduler is the only consumer.
pub struct Queue<T, const SIZE: usize> {
    slots: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Queue<T, SIZE> {
    pub const fn new() -> Self {
        Self {
            slots: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Append a value, handing it back if the queue is full
    pub fn push(&self, value: T) -> Result<(), T> {
        critical_section::with(|cs| self.slots.borrow_ref_mut(cs).push_back(value))
    }

    /// Take the oldest value
    pub fn pop(&self) -> Option<T> {
        critical_section::with(|cs| self.slots.borrow_ref_mut(cs).pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.slots.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == SIZE
    }
}

impl<T, const SIZE: usize> Default for Queue<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// A single boolean raised by one side and lowered by the other
pub struct Signal {
    raised: Mutex<Cell<bool>>,
}

impl Signal {
    pub const fn new() -> Self {
        Self {
            raised: Mutex::new(Cell::new(false)),
        }
    }

    pub fn raise(&self) {
        critical_section::with(|cs| self.raised.borrow(cs).set(true));
    }

    /// Lower the signal, returning whether it was raised
    pub fn take(&self) -> bool {
        critical_section::with(|cs| self.raised.borrow(cs).replace(false))
    }

    pub fn is_raised(&self) -> bool {
        critical_section::with(|cs| self.raised.borrow(cs).get())
    }
}

impl Default for Signal {
    fn default() -> Self {
        Self::new()
    }
}
