//! meshprobe-scenario -- controller private API scenario runner.
//!
//! Drives the fixed health -> exercise -> teardown lifecycle against the
//! controller's private gRPC surface and records every assertion as an
//! independent check. The sequence itself is data
//! ([`meshprobe_core::scenario::plan`]); this crate only executes it.

pub mod runner;

pub use runner::ScenarioRunner;
