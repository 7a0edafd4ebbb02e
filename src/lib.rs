//! Library exports for the URL shortener application
//!
//! This module exposes internal components for testing and potential library usage.

pub mod allocator;
pub mod database;
pub mod error;
pub mod handler;
pub mod model;
pub mod quota;
pub mod route;
pub mod shortid;
pub mod validate;
