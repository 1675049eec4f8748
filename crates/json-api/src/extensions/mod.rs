//! Extension traits

mod depot;
mod pagination;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use pagination::PageExt as _;
pub(crate) use result::ResultExt as _;
