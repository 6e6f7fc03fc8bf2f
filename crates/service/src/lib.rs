//! Service layer providing the task business operations on top of models.
//! - Separates business rules from data access.
//! - Reuses entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod store;
pub mod task_service;

#[cfg(test)]
pub mod test_support;
