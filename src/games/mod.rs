//! Game implementations of `RulesEngine`.

pub mod morris;
