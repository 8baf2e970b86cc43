/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Flag Errors
//!
//! Errors reported while decoding a flag from its text form.
//!
//! # Author
//!
//! Haixing Hu

use thiserror::Error;

/// Error returned when text cannot be decoded into a flag value.
///
/// Decoding is the only fallible operation on [`AtomicFlag`]; every other
/// operation is infallible.
///
/// [`AtomicFlag`]: crate::atomic::AtomicFlag
#[derive(Debug, Error)]
pub enum FlagError {
    /// The input is not a valid JSON boolean token.
    #[error("malformed boolean text: {0}")]
    Malformed(#[from] serde_json::Error),
}
