#[cfg(test)]
pub mod test_utils {
    use autotrack_db::models::contact::{ContactModel, ContactType};
    use heapless::String as HeaplessString;
    use uuid::Uuid;

    pub fn create_test_contact(name: &str) -> ContactModel {
        ContactModel {
            id: Uuid::new_v4(),
            name: HeaplessString::try_from(name).unwrap(),
            title: Some(HeaplessString::try_from("Manager").unwrap()),
            phone: None,
            email: Some(HeaplessString::try_from("contact@example.com").unwrap()),
            contact_type: ContactType::Primary,
            note: None,
            created_date: None,
            modified_date: None,
            last_modified_by: None,
            is_inactive: false,
        }
    }
}
