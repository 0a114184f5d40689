//! Kapoview - list-view selection and table option state
//!
//! This crate provides the selection model and per-table sort, column and
//! filter options behind Kapowarr's list views, with JSON persistence and
//! a small `kv` command line front end.

pub mod app;
pub mod core;
pub mod error;
pub mod handler;
