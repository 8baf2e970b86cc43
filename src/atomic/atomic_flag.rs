/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Flag
//!
//! Provides a lock-free boolean flag backed by a 32-bit atomic integer, which
//! reads and writes exactly like a plain `bool` in JSON.
//!
//! # Author
//!
//! Haixing Hu

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::AtomicI32;
use std::sync::atomic::Ordering;

use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};

use crate::atomic::error::FlagError;
use crate::atomic::traits::Atomic;

const FALSE: i32 = 0;
const TRUE: i32 = 1;

#[inline]
const fn encode(value: bool) -> i32 {
    if value {
        TRUE
    } else {
        FALSE
    }
}

/// Only the low bit is significant.
#[inline]
const fn decode(raw: i32) -> bool {
    raw & 1 == 1
}

fn parse(text: &[u8]) -> Result<bool, FlagError> {
    match serde_json::from_slice::<bool>(text) {
        Ok(value) => Ok(value),
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %err, len = text.len(), "rejected malformed flag text");
            Err(FlagError::Malformed(err))
        }
    }
}

/// Atomic boolean flag.
///
/// A drop-in replacement for a `Mutex<bool>`: every operation is a single
/// lock-free atomic step on one `i32` cell, and all methods take `&self`, so
/// the flag can be shared across threads through `&AtomicFlag` or
/// `Arc<AtomicFlag>`.
///
/// # Memory Ordering Strategy
///
/// Every load, store and compare-and-swap uses `SeqCst` ordering. All threads
/// therefore observe a single global order of updates to the flag, and a
/// read always returns a value written by some completed store or CAS.
///
/// # Representation
///
/// Stores write `0` for `false` and `1` for `true`. Reads look only at the
/// low bit of the cell, so a raw value written through [`inner`] (or reached
/// by wrapping past `i32::MAX` while toggling) is interpreted consistently
/// by every operation.
///
/// The type is intentionally neither `Clone` nor `Copy`: a copy would be an
/// independent cell and would no longer observe the original's updates.
///
/// # Example
///
/// ```rust
/// use prism3_flag::AtomicFlag;
/// use std::sync::Arc;
/// use std::thread;
///
/// let flag = Arc::new(AtomicFlag::default());
/// let flag_clone = flag.clone();
///
/// let handle = thread::spawn(move || {
///     flag_clone.set();
/// });
///
/// handle.join().unwrap();
/// assert!(flag.is_set());
/// ```
///
/// [`inner`]: AtomicFlag::inner
///
/// # Author
///
/// Haixing Hu
#[repr(transparent)]
pub struct AtomicFlag {
    inner: AtomicI32,
}

impl AtomicFlag {
    /// Creates a new flag.
    ///
    /// # Parameters
    ///
    /// * `value` - The initial value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_flag::AtomicFlag;
    ///
    /// let flag = AtomicFlag::new(true);
    /// assert!(flag.is_set());
    /// ```
    #[inline]
    pub const fn new(value: bool) -> Self {
        Self {
            inner: AtomicI32::new(encode(value)),
        }
    }

    /// Returns whether the flag is currently `true`.
    ///
    /// # Memory Ordering
    ///
    /// Uses `SeqCst` ordering.
    #[inline]
    pub fn is_set(&self) -> bool {
        decode(self.inner.load(Ordering::SeqCst))
    }

    /// Returns whether the flag is currently `false`.
    ///
    /// Equivalent to `!self.is_set()` evaluated at the time of the call.
    #[inline]
    pub fn is_clear(&self) -> bool {
        !self.is_set()
    }

    /// Sets the flag to `true`.
    #[inline]
    pub fn set(&self) {
        self.inner.store(TRUE, Ordering::SeqCst);
    }

    /// Sets the flag to `false`.
    #[inline]
    pub fn clear(&self) {
        self.inner.store(FALSE, Ordering::SeqCst);
    }

    /// Sets the flag to the given value.
    ///
    /// # Parameters
    ///
    /// * `value` - The new value.
    #[inline]
    pub fn set_to(&self, value: bool) {
        self.inner.store(encode(value), Ordering::SeqCst);
    }

    /// Gets the current value.
    ///
    /// Same as [`is_set`](AtomicFlag::is_set); provided so the flag reads
    /// like the other atomic wrappers.
    #[inline]
    pub fn load(&self) -> bool {
        self.is_set()
    }

    /// Sets a new value.
    ///
    /// Same as [`set_to`](AtomicFlag::set_to).
    #[inline]
    pub fn store(&self, value: bool) {
        self.set_to(value);
    }

    /// Swaps the current value with a new value, returning the old value.
    ///
    /// # Memory Ordering
    ///
    /// Uses `SeqCst` ordering.
    ///
    /// # Parameters
    ///
    /// * `value` - The new value to swap in.
    ///
    /// # Returns
    ///
    /// The old value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_flag::AtomicFlag;
    ///
    /// let flag = AtomicFlag::new(false);
    /// assert!(!flag.swap(true));
    /// assert!(flag.is_set());
    /// ```
    #[inline]
    pub fn swap(&self, value: bool) -> bool {
        decode(self.inner.swap(encode(value), Ordering::SeqCst))
    }

    /// Atomically sets the value to `true`, returning the old value.
    #[inline]
    pub fn fetch_set(&self) -> bool {
        self.swap(true)
    }

    /// Atomically sets the value to `false`, returning the old value.
    #[inline]
    pub fn fetch_clear(&self) -> bool {
        self.swap(false)
    }

    /// Compares and sets the value atomically.
    ///
    /// If the current value equals `current`, transitions it to `new` and
    /// returns `Ok(())`. Otherwise leaves the flag untouched and returns
    /// `Err(actual)` where `actual` is the value that was observed.
    ///
    /// The comparison is on the boolean value, not the raw cell: a cell
    /// holding any odd integer matches `current == true`.
    ///
    /// # Memory Ordering
    ///
    /// Uses `SeqCst` ordering on both success and failure.
    ///
    /// # Parameters
    ///
    /// * `current` - The expected current value.
    /// * `new` - The new value to set if current matches.
    ///
    /// # Returns
    ///
    /// `Ok(())` on success, or `Err(actual)` on failure.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_flag::AtomicFlag;
    ///
    /// let flag = AtomicFlag::new(false);
    /// assert!(flag.compare_set(false, true).is_ok());
    /// assert_eq!(flag.compare_set(false, true), Err(true));
    /// ```
    pub fn compare_set(&self, current: bool, new: bool) -> Result<(), bool> {
        let mut raw = self.inner.load(Ordering::SeqCst);
        loop {
            let actual = decode(raw);
            if actual != current {
                return Err(actual);
            }
            if actual == new {
                return Ok(());
            }
            // Advance by one so the low bit flips; wraps at i32::MAX.
            match self.inner.compare_exchange_weak(
                raw,
                raw.wrapping_add(1),
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return Ok(()),
                Err(observed) => raw = observed,
            }
        }
    }

    /// Compares and sets the value atomically, reporting only success.
    ///
    /// # Parameters
    ///
    /// * `expected` - The expected current value.
    /// * `new` - The new value to set if current matches.
    ///
    /// # Returns
    ///
    /// `true` if the flag held `expected` and now holds `new`, `false` if it
    /// held something else, in which case nothing was changed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_flag::AtomicFlag;
    ///
    /// let started = AtomicFlag::new(false);
    /// assert!(started.compare_and_set(false, true));
    /// assert!(!started.compare_and_set(false, true));
    /// ```
    #[inline]
    pub fn compare_and_set(&self, expected: bool, new: bool) -> bool {
        self.compare_set(expected, new).is_ok()
    }

    /// Conditionally sets the value if it is currently `false`.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the value was `false` and has been set to `new`,
    /// `Err(true)` if the value was already `true`.
    #[inline]
    pub fn set_if_false(&self, new: bool) -> Result<(), bool> {
        self.compare_set(false, new)
    }

    /// Conditionally sets the value if it is currently `true`.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the value was `true` and has been set to `new`,
    /// `Err(false)` if the value was already `false`.
    #[inline]
    pub fn set_if_true(&self, new: bool) -> Result<(), bool> {
        self.compare_set(true, new)
    }

    /// Inverts the flag, returning the value it held before.
    ///
    /// Reads the current value and retries `compare_and_set(old, !old)`
    /// until it succeeds. A failed attempt means another thread changed the
    /// flag in between, so concurrent togglers each win a distinct
    /// transition.
    ///
    /// # Returns
    ///
    /// The value before the inversion.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_flag::AtomicFlag;
    ///
    /// let flag = AtomicFlag::new(false);
    /// assert!(!flag.toggle());
    /// assert!(flag.is_set());
    /// assert!(flag.toggle());
    /// assert!(flag.is_clear());
    /// ```
    pub fn toggle(&self) -> bool {
        loop {
            let old = self.is_set();
            if self.compare_and_set(old, !old) {
                return old;
            }
        }
    }

    /// Updates the value using a function, returning the old value.
    ///
    /// `f` may be called more than once under contention.
    pub fn fetch_update<F>(&self, f: F) -> bool
    where
        F: Fn(bool) -> bool,
    {
        let mut current = self.is_set();
        loop {
            match self.compare_set(current, f(current)) {
                Ok(()) => return current,
                Err(actual) => current = actual,
            }
        }
    }

    /// Encodes the current value as JSON text.
    ///
    /// The output is exactly what `serde_json` produces for a plain `bool`:
    /// the bytes `true` or `false`. No lock is taken, so the result reflects
    /// the value at the moment of the read.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_flag::AtomicFlag;
    ///
    /// assert_eq!(AtomicFlag::new(true).to_text(), b"true");
    /// ```
    pub fn to_text(&self) -> Vec<u8> {
        serde_json::Value::Bool(self.is_set())
            .to_string()
            .into_bytes()
    }

    /// Decodes JSON text and stores the value into this flag.
    ///
    /// Accepts the same input as decoding a plain `bool` with `serde_json`,
    /// including surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Malformed`] if `text` is not a JSON boolean. The
    /// flag is not modified in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_flag::AtomicFlag;
    ///
    /// let flag = AtomicFlag::new(true);
    /// flag.from_text(b"false").unwrap();
    /// assert!(flag.is_clear());
    ///
    /// assert!(flag.from_text(b"invalid-json").is_err());
    /// assert!(flag.is_clear());
    /// ```
    #[allow(clippy::wrong_self_convention)]
    pub fn from_text(&self, text: &[u8]) -> Result<(), FlagError> {
        let value = parse(text)?;
        self.set_to(value);
        Ok(())
    }

    /// Gets a reference to the underlying atomic cell.
    ///
    /// Any value written here is read back through its low bit, so the flag
    /// stays well defined whatever the caller stores.
    ///
    /// # Returns
    ///
    /// A reference to the underlying `std::sync::atomic::AtomicI32`.
    #[inline]
    pub fn inner(&self) -> &AtomicI32 {
        &self.inner
    }
}

impl Atomic for AtomicFlag {
    type Value = bool;

    #[inline]
    fn load(&self) -> bool {
        self.is_set()
    }

    #[inline]
    fn store(&self, value: bool) {
        self.set_to(value);
    }

    #[inline]
    fn swap(&self, value: bool) -> bool {
        self.swap(value)
    }

    #[inline]
    fn compare_set(&self, current: bool, new: bool) -> Result<(), bool> {
        self.compare_set(current, new)
    }

    #[inline]
    fn fetch_update<F>(&self, f: F) -> bool
    where
        F: Fn(bool) -> bool,
    {
        self.fetch_update(f)
    }
}

impl Default for AtomicFlag {
    #[inline]
    fn default() -> Self {
        Self::new(false)
    }
}

impl From<bool> for AtomicFlag {
    #[inline]
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

impl FromStr for AtomicFlag {
    type Err = FlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s.as_bytes()).map(Self::new)
    }
}

impl Serialize for AtomicFlag {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bool(self.is_set())
    }
}

impl<'de> Deserialize<'de> for AtomicFlag {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        <bool as Deserialize<'de>>::deserialize(deserializer).map(Self::new)
    }
}

impl fmt::Debug for AtomicFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicFlag")
            .field("value", &self.is_set())
            .finish()
    }
}

impl fmt::Display for AtomicFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.is_set())
    }
}
