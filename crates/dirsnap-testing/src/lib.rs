//! Testing infrastructure for dirsnap tests.
//!
//! This crate provides utilities for exercising the crawler without a network:
//! - `StubLister`: in-memory remote tree with failure injection and a call log
//! - `fixtures`: entry and leaf builders with fixed timestamps
//! - `assertions`: leaf-set checks shared by engine and runtime tests

pub mod assertions;
pub mod fixtures;
pub mod lister;

pub use lister::StubLister;
