//! Property-based tests for field rules, bounded lists, picture fitting and composition

mod composition;
mod fitting;
mod validation;
