//! Vehicle domain entity

use chrono::{DateTime, Utc};

/// A customer's motorcycle
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: i32,
    pub customer_id: i32,
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub odometer_km: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Case-insensitive match against the list-view search box.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.plate.to_lowercase().contains(&term)
            || self.brand.to_lowercase().contains(&term)
            || self.model.to_lowercase().contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_matches_plate_brand_and_model() {
        let v = Vehicle {
            id: 1,
            customer_id: 1,
            plate: "ABC-1234".into(),
            brand: "Honda".into(),
            model: "CG 160".into(),
            year: Some(2021),
            color: None,
            odometer_km: Some(12000),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(v.matches_search("abc-12"));
        assert!(v.matches_search("honda"));
        assert!(v.matches_search("cg 160"));
        assert!(!v.matches_search("yamaha"));
    }
}
