//! Shared helpers for content-service integration tests
#![allow(dead_code)]

pub mod fixtures;
pub mod in_memory_repository;
