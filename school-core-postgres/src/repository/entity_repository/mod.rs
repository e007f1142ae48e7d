pub mod create_batch;
pub mod find;
pub mod hard_delete;
pub mod load_batch;
pub mod repo_impl;
pub mod restore;
pub mod soft_delete;

#[cfg(test)]
pub mod test_utils;

pub use repo_impl::EntityRepositoryImpl;
