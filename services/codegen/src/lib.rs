//! nodedocs Codegen Service Crate
//!
//! Environment configuration for the docs build. The `nodedocs-generate`
//! binary loads a [`config::Config`], initialises logging and runs the core
//! generator.

pub mod config;
