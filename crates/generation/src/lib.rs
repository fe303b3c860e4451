// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The external generation collaborator.
//!
//! Schedule generation is delegated to a language model that is treated as
//! an opaque collaborator: a `PromptPayload` goes in, and either an
//! `UntrustedSchedule` or a typed `CollaboratorError` comes out. Nothing
//! returned from here is trusted until it passes the domain normalizer.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod collaborator;
mod error;
mod http;

#[cfg(test)]
mod tests;

pub use collaborator::{GenerationCollaborator, GenerationOutput};
pub use error::CollaboratorError;
pub use http::{GenerationConfig, HttpGenerationClient};
