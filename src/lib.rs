//! HO DevWeb diagnostic - terminal wizard, contact form and mail relay
//!
//! The core is pure: sanitizers and validators return values, the wizard
//! and contact form return effects. The terminal front-end and the relay
//! binary wire those effects to tokio, storage and the submission gateway.

pub mod app;
pub mod config;
pub mod gateway;
pub mod platform;
pub mod relay;
pub mod runtime;
pub mod sanitize;
pub mod state;
pub mod storage;
pub mod ui;
pub mod validate;
