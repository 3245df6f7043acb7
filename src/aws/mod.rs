//! Typed builders for specific AWS resource types.
//!
//! The full resource library is generated from the CloudFormation resource
//! specification and lives outside this crate; this module carries a single
//! hand-written sample showing the shape generated builders take. Anything
//! not covered here can still be declared with [`crate::Resource`] directly.

pub mod sqs;
