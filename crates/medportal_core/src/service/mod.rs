//! Portal use-case services.
//!
//! # Responsibility
//! - Orchestrate model transitions and storage into use-case level APIs.
//! - Keep rendering and CLI layers decoupled from storage details.

pub mod dashboard_service;
pub mod login_service;
pub mod slot_service;
