//! Renders names, arguments and manifests for deploying kube-janitor.
#![warn(missing_docs)]

/// Args module for building the janitor command line.
pub mod args;
mod error;
/// Labels module for standard chart labels.
pub mod labels;
/// Loader module for reading chart and values files.
pub mod loader;
/// Manifests module for building Kubernetes objects.
pub mod manifests;
/// Names module for deriving resource names.
pub mod names;
/// Values module for the configuration model.
pub mod values;

pub use error::{Error, Result};
pub use manifests::{render, Manifests};
