use school_core_api::{ActorRef, EntityType};
use school_core_db::models::DeletableModel;
use serde_json::json;
use uuid::Uuid;

/// A student with a unique admission number.
pub fn create_test_student() -> DeletableModel {
    let admission = format!("ADM-{}", Uuid::new_v4().simple());
    DeletableModel::new(
        EntityType::Student,
        json!({"firstName": "Test", "lastName": "Student", "admissionNumber": admission}),
    )
}

/// A teacher profile linked to `user_id`, which becomes its natural key.
pub fn create_test_teacher(user_id: Uuid) -> DeletableModel {
    DeletableModel::new(
        EntityType::Teacher,
        json!({"userId": user_id.to_string(), "employeeId": "T-1"}),
    )
}

pub fn create_test_actor() -> ActorRef {
    ActorRef::new(Uuid::new_v4(), "Test Admin")
        .with_email("test.admin@school.org")
        .with_role("admin")
}
