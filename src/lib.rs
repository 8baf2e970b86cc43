/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/
//! # prism3-rust-flag
//!
//! Lock-free atomic boolean flag.
//!
//! `AtomicFlag` replaces the "mutex + plain boolean" pattern with a single
//! atomic integer cell. Every operation is lock-free and sequentially
//! consistent, and the flag encodes to and decodes from JSON exactly like a
//! plain `bool`, so it can be embedded in serialized structures without
//! changing their format.
//!
//! ## Features
//!
//! - Set, clear, read and conditional compare-and-set
//! - `toggle` that returns the previous value
//! - JSON text round trip through `to_text` / `from_text`, plus `serde`
//!   `Serialize` and `Deserialize`
//! - Optional `tracing` feature for diagnostic events
//!
//! ## Example
//!
//! ```rust
//! use prism3_flag::AtomicFlag;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let shutdown = Arc::new(AtomicFlag::default());
//! let mut handles = vec![];
//!
//! for _ in 0..4 {
//!     let shutdown = shutdown.clone();
//!     handles.push(thread::spawn(move || {
//!         // only one thread wins the transition
//!         shutdown.compare_and_set(false, true)
//!     }));
//! }
//!
//! let winners = handles
//!     .into_iter()
//!     .map(|h| h.join().unwrap())
//!     .filter(|won| *won)
//!     .count();
//! assert_eq!(winners, 1);
//! assert_eq!(shutdown.to_text(), b"true");
//! ```
//!
//! ## Author
//!
//! Haixing Hu

#![deny(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod atomic;

pub use atomic::{
    Atomic,
    AtomicFlag,
    FlagError,
};
