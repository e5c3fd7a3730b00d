//! Object pooling for meshing scratch resources.
//!
//! The visited tracker and the vertex scratch buffer are expensive to
//! allocate (six full-chunk grids, a worst-case vertex array), so they are
//! recycled through a bounded free-list instead of being rebuilt per pass.
//!
//! Acquisition never blocks: when the idle list is empty a fresh instance is
//! constructed, so meshing an entire map at startup can burst far past the
//! steady-state pool size. Releases above the burst threshold destroy the
//! instance instead of pooling it, bounding steady-state memory.

use std::sync::Mutex;

/// Steady-state cap on idle pooled instances; releases beyond it destroy the
/// instance instead of keeping it around forever.
pub const BURST_THRESHOLD: usize = 32;

/// A resource that can live in a `Pool`.
pub trait Pooled {
    /// Constructs a fresh instance for a burst acquisition.
    fn create() -> Self;

    /// Prepares a released instance for its next pass (tracker: generation
    /// increment; scratch buffer: cursor rewind).
    fn reset(&mut self);
}

/// A bounded concurrent free-list of reusable instances.
///
/// Safe to acquire from and release to concurrently; the idle list is the
/// only shared state and sits behind a mutex.
pub struct Pool<T: Pooled> {
    idle: Mutex<Vec<T>>,
}

impl<T: Pooled> Pool<T> {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Pool {
            idle: Mutex::new(Vec::new()),
        }
    }

    /// Takes an idle instance, constructing a fresh one when none is
    /// available.
    pub fn acquire(&self) -> T {
        let recycled = self.idle.lock().unwrap().pop();
        recycled.unwrap_or_else(T::create)
    }

    /// Returns an instance to the pool.
    ///
    /// When the idle list already holds `BURST_THRESHOLD` instances the
    /// returned one is dropped instead; otherwise it is reset and becomes
    /// available to the next `acquire`.
    pub fn release(&self, mut instance: T) {
        let mut idle = self.idle.lock().unwrap();

        if idle.len() >= BURST_THRESHOLD {
            return;
        }

        instance.reset();
        idle.push(instance);
    }

    /// Returns the number of idle instances currently pooled.
    pub fn idle_count(&self) -> usize {
        self.idle.lock().unwrap().len()
    }
}

impl<T: Pooled> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}
