//! Order Handlers

pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod remove;
pub(crate) mod update_payment;
pub(crate) mod update_status;
