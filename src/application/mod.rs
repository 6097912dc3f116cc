//! Application layer orchestrating checkout and callback handling.
//!
//! This module defines the `CoinbaseGateway`, the entry point the web layer
//! calls to obtain a checkout redirect and to verify provider notifications.

pub mod gateway;
