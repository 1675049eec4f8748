//! Book Handlers

pub(crate) mod best_selling;
pub(crate) mod by_genre;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod recently_ordered;
pub(crate) mod related;
pub(crate) mod search;
pub(crate) mod trending;
pub(crate) mod update;
pub(crate) mod user_books;
