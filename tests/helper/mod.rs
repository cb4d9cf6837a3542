//! Shared helpers for integration tests

#![allow(dead_code)]

mod source;

pub use source::{FakeReleaseSource, TOOL, TestEnv};
