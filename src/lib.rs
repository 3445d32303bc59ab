//! SROTS access - account gating and premium activation
//!
//! This crate decides who may sign in to the SROTS placement platform and
//! turns payments into time-boxed premium access: Razorpay webhook capture
//! with an idempotency guard, direct bank-transfer (UTR) activation, and the
//! administrative restriction and renewal operations around them.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
