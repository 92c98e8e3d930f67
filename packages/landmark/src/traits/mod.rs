//! Collaborator abstractions.
//!
//! The pipeline depends only on these traits; provider clients live in
//! [`crate::providers`] and test doubles in [`crate::testing`].

pub mod image_generator;
pub mod language_model;
