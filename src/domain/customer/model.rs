//! Customer domain entity

use chrono::{DateTime, Utc};

/// A workshop customer
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// National identity/tax document, free-form
    pub document: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Case-insensitive match against the list-view search box.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self
                .phone
                .as_deref()
                .is_some_and(|p| p.to_lowercase().contains(&term))
            || self
                .email
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(&term))
            || self
                .document
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(name: &str, email: Option<&str>) -> Customer {
        Customer {
            id: 1,
            name: name.into(),
            phone: Some("555-0101".into()),
            email: email.map(Into::into),
            document: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let c = customer("Maria Souza", None);
        assert!(c.matches_search("maria"));
        assert!(c.matches_search("SOUZA"));
        assert!(!c.matches_search("joao"));
    }

    #[test]
    fn search_matches_phone_and_email() {
        let c = customer("Maria", Some("maria@example.com"));
        assert!(c.matches_search("555-01"));
        assert!(c.matches_search("example.com"));
    }
}
