//! Quire
//!
//! Quire is the domain core of an online bookstore: catalog genres, cart and
//! order line arithmetic, checkout planning and request validation rules.
//!
//! Nothing in this crate performs I/O. Persistence lives in `quire-app` and the
//! HTTP surface in `quire-json`; both call into these types so that every total,
//! every cart merge and every checkout decision is computed in one place.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod lines;
pub mod orders;
pub mod pagination;
pub mod users;
pub mod validation;
