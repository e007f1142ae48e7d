use crate::models::DeletableModel;

use super::append_history::AppendHistory;
use super::create_batch::CreateBatch;
use super::find::Find;
use super::hard_delete::HardDelete;
use super::load_batch::LoadBatch;
use super::load_history::LoadHistory;
use super::restore::Restore;
use super::soft_delete::SoftDelete;

/// Everything the service needs from the entity collections.
pub trait EntityRepository:
    Find + LoadBatch<DeletableModel> + CreateBatch<DeletableModel> + SoftDelete + Restore + HardDelete
{
}

impl<T> EntityRepository for T where
    T: Find
        + LoadBatch<DeletableModel>
        + CreateBatch<DeletableModel>
        + SoftDelete
        + Restore
        + HardDelete
{
}

/// Everything the service needs from the history log.
pub trait HistoryRepository: AppendHistory + LoadHistory {}

impl<T> HistoryRepository for T where T: AppendHistory + LoadHistory {}
