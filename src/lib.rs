//! Stage gating for the pipelines of a FIDC manager.
//!
//! The [`pipeline`] module is the synchronous core: status and checklist
//! registries, the [`TransitionValidator`](pipeline::TransitionValidator)
//! and the [`PendingItemTracker`](pipeline::PendingItemTracker). Everything
//! that talks to the backend goes through [`workflow::PipelineWorkflow`].

pub mod api;
pub mod board;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod ui;
pub mod workflow;

pub use error::PipelineError;
