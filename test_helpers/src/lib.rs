//! Test helpers shared across the workspace.
//!
//! Loader tests read the real process environment, so every mutation goes
//! through [`env`], which serialises access and restores prior values.

pub mod env;
