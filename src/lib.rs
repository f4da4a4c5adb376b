#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    missing_docs,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]
#![cfg_attr(not(test), warn(clippy::unwrap_used, clippy::indexing_slicing))]

/*!
## Features

`dev`: Non-secure development parameters with small integer sizes. See the [`dev`] module.
*/

pub mod keygen;
mod params;
mod tools;
mod uint;
mod zk;

#[cfg(any(test, feature = "dev"))]
pub use params::dev;

pub use params::{DlnParams, ProductionParams};
pub use tools::random::SamplingError;
pub use uint::BoxedEncoding;
pub use zk::{DlnProof, DlnProofDecodingError, DlnProofWire, GenerationError, ITERATIONS};
