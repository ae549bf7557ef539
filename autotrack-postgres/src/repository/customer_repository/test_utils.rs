#[cfg(test)]
pub mod test_utils {
    use autotrack_db::models::customer::CustomerModel;
    use heapless::String as HeaplessString;
    use uuid::Uuid;

    pub fn create_test_customer(name: &str) -> CustomerModel {
        CustomerModel {
            id: Uuid::new_v4(),
            account_number: Some(HeaplessString::try_from("ACC-0001").unwrap()),
            name: HeaplessString::try_from(name).unwrap(),
            created_date: None,
            modified_date: None,
            last_modified_by: None,
            is_inactive: false,
        }
    }
}
