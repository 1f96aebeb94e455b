#![forbid(unsafe_code)]

//! Backend for the folio portfolio site.
//!
//! Serves the bookmark feed proxy, relays contact-form submissions to
//! EmailJS, and publishes the static content feeds as JSON.

pub mod bookmarks;
pub mod cli;
pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod logging;
pub mod server;

pub use cli::{run, run_from_env};
pub use error::{Result, SiteError};
