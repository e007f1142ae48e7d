pub mod append_history;
pub mod load_history;
pub mod repo_impl;

pub use repo_impl::HistoryRepositoryImpl;
