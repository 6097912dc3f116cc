//! Domain types: the payment record, request signing and callback payloads,
//! plus the ports the gateway talks to.

pub mod button;
pub mod callback;
pub mod payment;
pub mod ports;
pub mod signature;
