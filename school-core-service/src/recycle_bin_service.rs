use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use school_core_api::{
    ActorRef, ApiError, ApiResult, BatchFailure, BatchKind, BatchOutcome, BatchRequest,
    EntityDocument, EntityListQuery, EntityType, FailureReason, HistoryAction, HistoryItem,
    HistoryQuery, ItemFilter, Paginated, RecycleBinItem, RecycleBinQuery, RecycleBinService,
};
use school_core_db::models::{DeletableModel, HistoryRecordModel, SoftDeletable};
use school_core_db::repository::{
    with_active_only, EntityRepository, FindOptions, HistoryFilter, HistoryRepository,
    PageRequest, RecordFilter, RecordOrder, TransitionOutcome,
};
use school_core_db::utils::now_utc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::config::ServiceConfig;
use crate::user_names::UserNameResolver;

/// [`RecycleBinService`] over any entity and history backend.
pub struct RecycleBinServiceImpl<E, H> {
    entities: Arc<E>,
    history: Arc<H>,
    config: ServiceConfig,
    user_names: UserNameResolver,
}

impl<E, H> RecycleBinServiceImpl<E, H>
where
    E: EntityRepository,
    H: HistoryRepository,
{
    pub fn new(entities: Arc<E>, history: Arc<H>, config: ServiceConfig) -> Self {
        let user_names = UserNameResolver::new(config.name_cache_ttl(), config.name_cache_capacity);
        Self {
            entities,
            history,
            config,
            user_names,
        }
    }

    /// Append the history record for a transition that is already persisted.
    async fn record_transition(
        &self,
        pre_state: &DeletableModel,
        action: HistoryAction,
        actor: &ActorRef,
    ) -> ApiResult<()> {
        let record = HistoryRecordModel::for_transition(pre_state, action, actor)
            .map_err(ApiError::InternalError)?;
        self.history.append_history(record).await?;
        Ok(())
    }

    /// The transition stands even if its history record is lost; the failure is logged.
    async fn record_after_commit(
        &self,
        pre_state: &DeletableModel,
        action: HistoryAction,
        actor: &ActorRef,
    ) {
        if let Err(e) = self.record_transition(pre_state, action, actor).await {
            error!(item_id = %pre_state.id, %action, code = e.code(), error = %e, "history append failed after commit");
        }
    }

    /// Ids of `user` rows, soft-deleted ones included, whose name or email matches `search`.
    async fn users_matching(
        &self,
        entity_type: EntityType,
        search: Option<&str>,
    ) -> ApiResult<Vec<Uuid>> {
        let Some(search) = search else {
            return Ok(Vec::new());
        };
        if !entity_type.links_user() {
            return Ok(Vec::new());
        }
        let filter = RecordFilter::new(EntityType::User).search(Some(search.to_string()));
        let users = self
            .entities
            .find(
                &filter,
                RecordOrder::default(),
                PageRequest::new(self.config.linked_user_search_limit, 0),
            )
            .await?;
        Ok(users.items.into_iter().map(|user| user.id).collect())
    }

    fn check_batch(&self, request: &BatchRequest) -> ApiResult<EntityType> {
        let entity_type: EntityType = request.entity_type.parse()?;
        request.validate()?;
        if request.ids.len() > self.config.max_batch_size {
            return Err(ApiError::ValidationError(format!(
                "at most {} ids per request, got {}",
                self.config.max_batch_size,
                request.ids.len()
            )));
        }
        Ok(entity_type)
    }

    async fn run_batch(
        &self,
        kind: BatchKind,
        request: &BatchRequest,
        actor: &ActorRef,
    ) -> ApiResult<BatchOutcome> {
        let entity_type = self.check_batch(request)?;

        let pending: Vec<_> = request
            .ids
            .iter()
            .map(|raw| self.apply_one(kind, entity_type, raw, actor))
            .collect();
        let results: Vec<Result<Uuid, BatchFailure>> = stream::iter(pending)
            .buffered(self.config.batch_concurrency.max(1))
            .collect()
            .await;

        let mut outcome = BatchOutcome::new(kind, request.ids.len());
        for result in results {
            match result {
                Ok(id) => outcome.succeeded.push(id),
                Err(failure) => outcome.failures.push(failure),
            }
        }

        info!(
            %entity_type,
            actor_id = %actor.id,
            succeeded = outcome.succeeded_count(),
            failed = outcome.failures.len(),
            "{}",
            outcome.summary()
        );
        Ok(outcome)
    }

    async fn apply_one(
        &self,
        kind: BatchKind,
        entity_type: EntityType,
        raw_id: &str,
        actor: &ActorRef,
    ) -> Result<Uuid, BatchFailure> {
        let Ok(id) = Uuid::parse_str(raw_id.trim()) else {
            return Err(BatchFailure::new(
                raw_id,
                FailureReason::NotFound,
                format!("'{raw_id}' is not a valid id"),
            ));
        };

        let transition = match kind {
            BatchKind::Restore => self.entities.restore(entity_type, id).await,
            BatchKind::HardDelete => self.entities.hard_delete(entity_type, id).await,
        };

        let error = match transition {
            Ok(TransitionOutcome::Applied(pre_state)) => {
                let action = match kind {
                    BatchKind::Restore => HistoryAction::Restored,
                    BatchKind::HardDelete => HistoryAction::PermanentlyDeleted,
                };
                self.record_after_commit(&pre_state, action, actor).await;
                if kind == BatchKind::HardDelete && entity_type == EntityType::User {
                    self.user_names.invalidate(&id).await;
                }
                info!(%entity_type, item_id = %id, actor_id = %actor.id, %action, "state transition applied");
                return Ok(id);
            }
            Ok(TransitionOutcome::NotFound) => {
                ApiError::NotFound(format!("no {entity_type} with id {id}"))
            }
            Ok(TransitionOutcome::NotDeleted) => {
                ApiError::NotDeleted(format!("{entity_type} {id} is not in the recycle bin"))
            }
            Ok(TransitionOutcome::Conflict) => ApiError::Conflict(format!(
                "an active {entity_type} already uses the same unique key"
            )),
            Err(e) => ApiError::from(e),
        };

        let failure = BatchFailure::from_error(raw_id, error);
        warn!(%entity_type, item_id = raw_id, reason = ?failure.reason, "{}", failure.message);
        Err(failure)
    }

    async fn project(&self, rows: Vec<DeletableModel>) -> ApiResult<Vec<RecycleBinItem>> {
        let linked: Vec<Uuid> = rows.iter().filter_map(DeletableModel::linked_user_id).collect();
        let names = if linked.is_empty() {
            Default::default()
        } else {
            self.user_names.resolve(self.entities.as_ref(), &linked).await?
        };

        Ok(rows
            .into_iter()
            .map(|row| {
                let linked_name = row
                    .linked_user_id()
                    .and_then(|id| names.get(&id))
                    .map(String::as_str);
                RecycleBinItem {
                    item_id: row.id,
                    entity_type: row.entity_type,
                    name: row.display_name(linked_name),
                    deleted_at: row.deleted_at.unwrap_or(row.updated_at),
                    deleted_by: row.deleted_by.clone(),
                    snapshot: row.snapshot(),
                }
            })
            .collect())
    }
}

#[async_trait]
impl<E, H> RecycleBinService for RecycleBinServiceImpl<E, H>
where
    E: EntityRepository + 'static,
    H: HistoryRepository + 'static,
{
    async fn get_entity(&self, entity_type: EntityType, id: Uuid) -> ApiResult<EntityDocument> {
        self.entities
            .find_by_id(entity_type, id, FindOptions::default())
            .await?
            .map(|row| row.to_document())
            .ok_or_else(|| ApiError::NotFound(format!("no {entity_type} with id {id}")))
    }

    async fn list_entities(
        &self,
        entity_type: EntityType,
        query: &EntityListQuery,
    ) -> ApiResult<Paginated<EntityDocument>> {
        let params = query.page_params();
        let opts = FindOptions {
            include_deleted: query.include_deleted(),
        };
        let filter = with_active_only(RecordFilter::new(entity_type), opts);
        debug!(?filter, "listing entities");

        let page = self
            .entities
            .find(&filter, RecordOrder::default(), PageRequest::from(params))
            .await?;
        Ok(page.map(|row| row.to_document()).into_paginated(params))
    }

    async fn soft_delete(
        &self,
        entity_type: EntityType,
        id: Uuid,
        actor: &ActorRef,
    ) -> ApiResult<EntityDocument> {
        let at = now_utc();
        let Some(pre_state) = self.entities.soft_delete(entity_type, id, actor, at).await? else {
            return Err(ApiError::NotFound(format!("no active {entity_type} with id {id}")));
        };

        self.record_after_commit(&pre_state, HistoryAction::Deleted, actor)
            .await;
        info!(%entity_type, item_id = %id, actor_id = %actor.id, "soft-deleted");

        let mut deleted = pre_state;
        deleted.mark_deleted(actor.clone(), at);
        Ok(deleted.to_document())
    }

    async fn list_deleted(&self, query: &RecycleBinQuery) -> ApiResult<Paginated<RecycleBinItem>> {
        let params = query.parse()?;
        let linked_users = self
            .users_matching(params.entity_type, params.search.as_deref())
            .await?;
        let filter = RecordFilter::new(params.entity_type)
            .deleted_only()
            .deleted_between(params.range)
            .search(params.search.clone())
            .search_linked_users(linked_users);
        debug!(?filter, sort = ?params.sort, "listing recycle bin");

        let page = self
            .entities
            .find(
                &filter,
                RecordOrder::DeletedAt(params.sort),
                PageRequest::from(params.page),
            )
            .await?;

        let total = page.total as u64;
        let items = self.project(page.items).await?;
        Ok(Paginated::new(items, params.page, total))
    }

    async fn restore(&self, request: &BatchRequest, actor: &ActorRef) -> ApiResult<BatchOutcome> {
        self.run_batch(BatchKind::Restore, request, actor).await
    }

    async fn hard_delete(
        &self,
        request: &BatchRequest,
        actor: &ActorRef,
    ) -> ApiResult<BatchOutcome> {
        self.run_batch(BatchKind::HardDelete, request, actor).await
    }

    async fn list_history(&self, query: &HistoryQuery) -> ApiResult<Paginated<HistoryItem>> {
        let params = query.parse()?;
        let item_id = match params.item {
            ItemFilter::Any => None,
            ItemFilter::Id(id) => Some(id),
            ItemFilter::Unmatchable => return Ok(Paginated::new(Vec::new(), params.page, 0)),
        };
        let filter = HistoryFilter {
            types: params.types,
            item_id,
            action: params.action,
            search: params.search,
            range: params.range,
        };
        debug!(?filter, sort = ?params.sort, "listing history");

        let page = self
            .history
            .load_history(&filter, params.sort, PageRequest::from(params.page))
            .await?;
        Ok(page.map(|record| record.to_item()).into_paginated(params.page))
    }
}
