/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Types
//!
//! Provides a lock-free boolean flag with sequentially consistent ordering.
//! The flag replaces the `Mutex<bool>` pattern and serializes exactly like
//! a plain `bool`.
//!
//! # Author
//!
//! Haixing Hu

mod atomic_flag;
mod error;
mod traits;

pub use atomic_flag::AtomicFlag;
pub use error::FlagError;
pub use traits::Atomic;
