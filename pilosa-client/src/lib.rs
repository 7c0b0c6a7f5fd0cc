#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub mod client;
pub mod common;
pub mod config;
pub mod logging;
pub mod query;

pub use client::{Client, MAX_QUERIES};
pub use common::error::Error;
