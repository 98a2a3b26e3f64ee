//! Background workflows
//!
//! - `activities` - Echo and intake activities
//! - `worker` - Queue-driven worker and its client handle

mod activities;
mod worker;

pub use activities::{ActivityError, IntakeInput, echo_activity, process_intake_activity};
pub use worker::{WorkflowClient, WorkflowError, WorkflowWorker};
