//! URL mapping entity: the association between a short code and a long URL.

/// A short-code-to-URL association held in the durable store.
///
/// `user_id` is `None` only for rows that predate account ownership; every
/// mapping created through the API while authenticated carries its owner.
/// Guest mappings never reach this type: they live exclusively in the cache.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlMapping {
    pub user_id: Option<i64>,
    pub short_code: String,
    pub original_url: String,
    pub visit_count: i64,
}

/// Input data for persisting a new owned mapping.
#[derive(Debug, Clone)]
pub struct NewUrlMapping {
    pub user_id: i64,
    pub short_code: String,
    pub original_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_mapping_carries_owner() {
        let new = NewUrlMapping {
            user_id: 7,
            short_code: "Ab3dEf9h".to_string(),
            original_url: "https://example.com".to_string(),
        };

        assert_eq!(new.user_id, 7);
        assert_eq!(new.short_code.len(), 8);
    }

    #[test]
    fn test_mapping_starts_unvisited() {
        let mapping = UrlMapping {
            user_id: Some(1),
            short_code: "abcd1234".to_string(),
            original_url: "https://example.com".to_string(),
            visit_count: 0,
        };

        assert_eq!(mapping.visit_count, 0);
    }
}
