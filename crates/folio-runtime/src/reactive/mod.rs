#![forbid(unsafe_code)]

//! Change notification primitives.
//!
//! Schedulers are plain state holders; views learn about changes by
//! subscribing to an [`Observable`].

pub mod observable;

pub use observable::{Observable, Subscription};
