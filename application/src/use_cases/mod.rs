//! Use cases
//!
//! Application-specific business rules orchestrating the domain and ports.

pub mod answer_query;
pub(crate) mod shared;
