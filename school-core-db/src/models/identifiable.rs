use uuid::Uuid;

/// Rows addressable by a globally unique id, whatever their entity type.
pub trait Identifiable {
    fn get_id(&self) -> Uuid;
}

impl<T: Identifiable> Identifiable for &T {
    fn get_id(&self) -> Uuid {
        (**self).get_id()
    }
}
