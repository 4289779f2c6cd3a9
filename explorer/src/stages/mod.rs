//! The four pipeline stages.
//!
//! Fetch and persist talk to the outside world through the
//! [`ProfileSource`] and [`RecordStore`](crate::stores::RecordStore) traits;
//! decode and annotate are pure functions of their input and configuration.

mod annotate;
mod decode;
mod fetch;
mod persist;

pub use annotate::{annotate, Annotator};
pub use decode::{decode, Decoder};
pub use fetch::{classify_response, HttpProfileSource, ProfileSource};
pub use persist::Persister;

#[cfg(test)]
pub use fetch::MockProfileSource;
