//! Test modules for the crate

pub mod framework;

#[cfg(test)]
mod anonymizer_tests;
