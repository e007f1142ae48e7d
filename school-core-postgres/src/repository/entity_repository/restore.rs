use async_trait::async_trait;
use school_core_api::EntityType;
use school_core_db::models::DeletableModel;
use school_core_db::repository::{Restore, TransitionOutcome};
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{EntityRepositoryImpl, RowState};
use crate::utils::{is_unique_violation, TryFromRow};

impl EntityRepositoryImpl {
    pub(super) async fn restore_impl(
        repo: &EntityRepositoryImpl,
        entity_type: EntityType,
        id: Uuid,
    ) -> Result<TransitionOutcome, Box<dyn Error + Send + Sync>> {
        let result = sqlx::query(
            r#"
            WITH old AS (
                SELECT * FROM school_entity
                WHERE id = $1 AND entity_type = $2 AND is_deleted
                FOR UPDATE
            )
            UPDATE school_entity e
            SET is_deleted = FALSE, deleted_at = NULL, deleted_by = NULL
            FROM old
            WHERE e.id = old.id
            RETURNING old.*
            "#,
        )
        .bind(id)
        .bind(entity_type)
        .fetch_optional(&repo.pool)
        .await;

        match result {
            Ok(Some(row)) => Ok(TransitionOutcome::Applied(DeletableModel::try_from_row(&row)?)),
            Ok(None) => Ok(match repo.row_state(entity_type, id).await? {
                RowState::Missing => TransitionOutcome::NotFound,
                RowState::Active => TransitionOutcome::NotDeleted,
                // Restored and deleted again in between; the caller sees a plain miss.
                RowState::Deleted => TransitionOutcome::NotFound,
            }),
            Err(e) if is_unique_violation(&e) => Ok(TransitionOutcome::Conflict),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl Restore for EntityRepositoryImpl {
    async fn restore(
        &self,
        entity_type: EntityType,
        id: Uuid,
    ) -> Result<TransitionOutcome, Box<dyn Error + Send + Sync>> {
        Self::restore_impl(self, entity_type, id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::entity_repository::test_utils::{
        create_test_actor, create_test_student, create_test_teacher,
    };
    use crate::test_helper::{setup_shared_repos, setup_test_context};
    use school_core_api::EntityType;
    use school_core_db::repository::{CreateBatch, LoadBatch, Restore, SoftDelete, TransitionOutcome};
    use school_core_db::utils::now_utc;
    use uuid::Uuid;

    #[tokio::test]
    #[ignore]
    async fn test_restore_round_trip() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repo = &ctx.repos().entity_repository;

        let student = create_test_student();
        repo.create_batch(vec![student.clone()]).await?;
        assert_eq!(
            repo.restore(EntityType::Student, student.id).await?,
            TransitionOutcome::NotDeleted
        );

        repo.soft_delete(EntityType::Student, student.id, &create_test_actor(), now_utc())
            .await?;
        let outcome = repo.restore(EntityType::Student, student.id).await?;
        assert!(matches!(outcome, TransitionOutcome::Applied(ref pre) if pre.is_deleted));

        let loaded = repo.load_batch(&[student.id]).await?;
        assert_eq!(loaded[0].as_ref(), Some(&student));

        assert_eq!(
            repo.restore(EntityType::Student, Uuid::new_v4()).await?,
            TransitionOutcome::NotFound
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore]
    async fn test_restore_conflict_on_active_natural_key() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repo = &ctx.repos().entity_repository;

        let user_id = Uuid::new_v4();
        let first = create_test_teacher(user_id);
        repo.create_batch(vec![first.clone()]).await?;
        repo.soft_delete(EntityType::Teacher, first.id, &create_test_actor(), now_utc())
            .await?;

        // The partial index lets a second active profile in while the first is deleted.
        repo.create_batch(vec![create_test_teacher(user_id)]).await?;

        assert_eq!(
            repo.restore(EntityType::Teacher, first.id).await?,
            TransitionOutcome::Conflict
        );
        let still_deleted = repo.load_batch(&[first.id]).await?.remove(0);
        assert!(still_deleted.is_some_and(|row| row.is_deleted));

        Ok(())
    }

    #[tokio::test]
    #[ignore]
    async fn test_concurrent_restores_apply_once() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let postgres = setup_shared_repos().await?;
        let first = postgres.create_all_repositories().entity_repository;
        let second = postgres.create_all_repositories().entity_repository;

        let student = create_test_student();
        first.create_batch(vec![student.clone()]).await?;
        first
            .soft_delete(EntityType::Student, student.id, &create_test_actor(), now_utc())
            .await?;

        let (a, b) = tokio::join!(
            first.restore(EntityType::Student, student.id),
            second.restore(EntityType::Student, student.id)
        );
        let applied = [a?, b?].iter().filter(|o| o.is_applied()).count();
        assert_eq!(applied, 1);

        Ok(())
    }
}
