pub mod app;
pub mod catalog;
pub mod config;
pub mod debounce;
pub mod error;
pub mod search;
pub mod storage;
pub mod view;
pub mod watchlist;

#[cfg(test)]
pub(crate) mod testing;
