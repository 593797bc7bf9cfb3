//! utility

use std::sync::{Arc, Mutex, PoisonError};

/// A thread-safe pool of reusable objects.
///
/// # Type Parameters
///
/// * `T` - The type of objects stored in the pool.
pub struct Pool<T>(Arc<Mutex<Vec<T>>>);

impl<T> Default for Pool<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Pool<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> std::fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool").finish_non_exhaustive()
    }
}

impl<T> Pool<T> {
    /// Creates a new, empty `Pool`.
    #[inline]
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(Vec::new())))
    }

    /// Gets an object from the pool, if available.
    #[inline]
    pub fn get(&self) -> Option<T> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).pop()
    }

    /// Gets an object from the pool, or creates one with `create`.
    #[inline]
    pub fn get_or_else<F: FnOnce() -> T>(&self, create: F) -> T {
        self.get().unwrap_or_else(create)
    }

    /// Stores an object in the pool.
    #[inline]
    pub fn store(&self, value: T) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_reuse() {
        let pool: Pool<Vec<u64>> = Pool::new();
        assert!(pool.get().is_none());
        pool.store(vec![1, 2, 3]);
        let shared = pool.clone();
        assert_eq!(shared.get_or_else(Vec::new), vec![1, 2, 3]);
        assert!(pool.get_or_else(Vec::new).is_empty());
        pool.store(vec![4]);
        pool.store(vec![5, 6]);
        assert_eq!(shared.get(), Some(vec![5, 6]));
        assert_eq!(pool.get(), Some(vec![4]));
        assert!(shared.get().is_none());
    }
}
