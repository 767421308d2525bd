//! Binary layout of the stripe format.
//!
//! This module contains:
//! - `consts`: Magic bytes, supported versions and fixed section sizes.
//! - `compression`: Compression kind codes and which of them this build supports.
//! - `header`: Stripe header and file tail codecs plus the payload checksum.

pub mod compression;
pub mod consts;
pub mod header;
