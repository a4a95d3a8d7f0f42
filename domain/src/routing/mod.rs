//! Routing subdomain
//!
//! Typed decisions consumed by the answer workflow state machine:
//!
//! - [`RoutingDecision`]: outcome of the assistant step (answer or retrieve)
//! - [`GradeDecision`]: sufficiency verdict on retrieved context
//! - [`IntentClassifier`]: lexical product-intent check
//! - [`WorkflowStep`]: the states of the workflow

mod decision;
mod intent;
mod step;

pub use decision::{GradeDecision, RoutingDecision};
pub use intent::{DEFAULT_INTENT_TERMS, IntentClassifier};
pub use step::WorkflowStep;
