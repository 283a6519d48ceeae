//! Client-side search over a store snapshot.

use crate::entity::Entity;

/// Records where `query` is a case-insensitive substring of at least one
/// search field. An empty query returns every record. Order is preserved.
pub fn filter<'a, E: Entity>(records: &'a [E], query: &str) -> Vec<&'a E> {
    if query.is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// What the list area of a screen should show.
#[derive(Debug, PartialEq)]
pub enum ListView<'a, E> {
    Items(Vec<&'a E>),
    /// Nothing matched a non-empty query.
    NoMatches,
    /// The collection itself is empty and no query is active.
    Empty,
}

impl<'a, E: Entity> ListView<'a, E> {
    pub fn build(records: &'a [E], query: &str) -> Self {
        let visible = filter(records, query);
        match (visible.is_empty(), query.is_empty()) {
            (false, _) => ListView::Items(visible),
            (true, false) => ListView::NoMatches,
            (true, true) => ListView::Empty,
        }
    }

    pub fn items(&self) -> &[&'a E] {
        match self {
            ListView::Items(items) => items,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Administrator, MedicalCenter};

    fn admin(id: i64, name: &str, email: &str, center: &str) -> Administrator {
        Administrator {
            id,
            full_name: name.to_string(),
            email: email.to_string(),
            center_name: center.to_string(),
            password: "secret".to_string(),
            address: "Minsk".to_string(),
            med_center_id: 1,
        }
    }

    fn admins() -> Vec<Administrator> {
        vec![
            admin(1, "Ivanov Sergey", "ivanov@lode.by", "LODE"),
            admin(2, "Petrova Anna", "anna@nordin.by", "Nordin"),
            admin(3, "Sidorov Oleg", "oleg@lode.by", "LODE"),
        ]
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let records = admins();
        let ids: Vec<_> = filter(&records, "").iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn matching_ignores_case_across_fields() {
        let records = admins();
        let ids: Vec<_> = filter(&records, "lode").iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
        let ids: Vec<_> = filter(&records, "ANNA@").iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn non_search_fields_do_not_match() {
        let records = admins();
        assert!(filter(&records, "secret").is_empty());
        assert!(filter(&records, "minsk").is_empty());
    }

    #[test]
    fn cyrillic_is_case_folded() {
        let records = vec![admin(1, "Иванов Сергей", "", "ЛОДЭ")];
        assert_eq!(filter(&records, "лодэ").len(), 1);
        assert_eq!(filter(&records, "ИВАН").len(), 1);
    }

    #[test]
    fn every_result_contains_the_query() {
        let records = admins();
        for query in ["o", "by", "Pe", "zzz", "LoDe"] {
            let needle = query.to_lowercase();
            for record in filter(&records, query) {
                assert!(record
                    .search_fields()
                    .iter()
                    .any(|f| f.to_lowercase().contains(&needle)));
            }
        }
    }

    #[test]
    fn center_search_covers_phone_number() {
        let records = vec![MedicalCenter {
            id_center: 1,
            center_name: "LODE".to_string(),
            center_description: "Diagnostics".to_string(),
            center_address: "Lenina 1".to_string(),
            center_number: "+375 17 123".to_string(),
        }];
        assert_eq!(filter(&records, "17 12").len(), 1);
        assert_eq!(filter(&records, "diagn").len(), 1);
    }

    #[test]
    fn list_view_distinguishes_empty_states() {
        let records = admins();
        assert_eq!(ListView::build(&records, "nobody"), ListView::NoMatches);
        let none: Vec<Administrator> = Vec::new();
        assert_eq!(ListView::build(&none, ""), ListView::Empty);
        assert_eq!(ListView::build(&none, "x"), ListView::NoMatches);
        assert_eq!(ListView::build(&records, "Oleg").items().len(), 1);
    }
}
