#![warn(missing_docs)]

//! GENI publicid URNs.
//!
//! Every principal and resource in a GENI federation is named by a URN of the
//! form `urn:publicid:IDN+authority+type+name`. This crate provides the
//! [`Urn`] type along with the two derivations that authorization relies on:
//!
//! - [`project_urn_from_slice`] maps `urn:publicid:IDN+A:P+slice+S` to
//!   `urn:publicid:IDN+A+project+P`
//! - [`authority_urn_from_user`] maps `urn:publicid:IDN+A:U+user+N` to
//!   `urn:publicid:IDN+A+authority+ca`
//!
//! Both are pure and fail with [`UrnError::Malformed`] rather than produce a
//! partial URN.

mod error;
pub use error::*;

mod urn;
pub use urn::*;
