//! Amara Core - Shared domain library.
//!
//! This crate provides the domain model used by the Amara Abayas storefront:
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and garment sizes
//! - [`product`] - The immutable catalog product record
//! - [`cart`] - The shopping-cart state container and its line-item rules
//! - [`custom`] - The custom-order intake form and its step machine
//!
//! # Architecture
//!
//! The core crate contains only types and state machines - no I/O, no HTTP,
//! no template rendering. Everything in here is synchronous, deterministic,
//! and unit-testable in isolation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod custom;
pub mod product;
pub mod types;

pub use cart::{Cart, CartLineItem};
pub use custom::{CustomOrderForm, Measurements, MissingFields, ReferenceFile, WizardStep};
pub use product::Product;
pub use types::*;
