#![warn(missing_docs)]

//! Stitching topology extraction for GENI request RSpecs.
//!
//! A request that spans several aggregates carries a `<stitching>` section
//! describing, per link, the path of hops that must be connected across
//! aggregates. [`requested_stitch_points`] answers the question an aggregate
//! needs answered before it authorizes such a request: which hops is the
//! caller asking *this* aggregate to stitch?
//!
//! ```
//! use geni_rspec::requested_stitch_points;
//! use geni_urn::Urn;
//!
//! let me: Urn = "urn:publicid:IDN+example.org+authority+am".parse().unwrap();
//! let rspec = r#"
//! <rspec>
//!   <link client_id="lan0">
//!     <component_manager name="urn:publicid:IDN+example.org+authority+am"/>
//!   </link>
//!   <stitching>
//!     <path id="lan0"><hop><link id="L1"/></hop><hop><link id="L2"/></hop></path>
//!   </stitching>
//! </rspec>"#;
//!
//! let points = requested_stitch_points(rspec, &me).unwrap().unwrap();
//! assert_eq!(points.to_string(), "[L1, L2]");
//! ```

mod error;
pub use error::*;

mod document;
pub use document::*;

mod stitching;
pub use stitching::*;
