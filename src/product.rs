//! Product records as they appear in a daily feed snapshot (a JSON array of objects).

use serde::Deserialize;

/// One offer in the feed. Unknown keys are ignored; a missing or `null` optional field is absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub title: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub refurbished: bool,
    pub price: f64,
    pub currency_iso: String,
    pub url: String,
    pub source: String,
}

impl Product {
    /// True if title, brand or model contains `needle`. `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        let hit = |s: &str| s.to_lowercase().contains(needle);
        hit(self.title.as_str())
            || self.brand.as_deref().is_some_and(hit)
            || self.model.as_deref().is_some_and(hit)
    }
}

/// Decode a feed body into products, in feed order.
pub fn parse_feed(body: &str) -> serde_json::Result<Vec<Product>> {
    serde_json::from_str(body)
}

#[cfg(test)]
pub(crate) fn sample(title: &str, brand: Option<&str>, model: Option<&str>) -> Product {
    Product {
        title: title.to_string(),
        brand: brand.map(String::from),
        model: model.map(String::from),
        grade: None,
        refurbished: true,
        price: 299.0,
        currency_iso: "EUR".to_string(),
        url: "u".to_string(),
        source: "s".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_feed_accepts_missing_and_null_optionals() {
        let body = r#"[
  {"title":"iPhone 12","brand":"Apple","price":299,"currency_iso":"EUR","refurbished":true,"url":"u","source":"s"},
  {"title":"Pixel 7","brand":null,"model":"GVU6C","grade":"A","price":249.5,"currency_iso":"EUR","refurbished":false,"url":"v","source":"refurbed","extra":1}
]"#;
        let products = parse_feed(body).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].brand.as_deref(), Some("Apple"));
        assert!(products[0].model.is_none());
        assert!(products[0].grade.is_none());
        assert!(products[1].brand.is_none());
        assert_eq!(products[1].grade.as_deref(), Some("A"));
        assert_eq!(products[1].price, 249.5);
    }

    #[test]
    fn parse_feed_rejects_missing_title() {
        let body = r#"[{"price":1,"currency_iso":"EUR","url":"u","source":"s"}]"#;
        assert!(parse_feed(body).is_err());
    }

    #[test]
    fn parse_feed_rejects_non_array() {
        assert!(parse_feed(r#"{"title":"x"}"#).is_err());
        assert!(parse_feed("not json").is_err());
    }

    #[test]
    fn matches_is_case_insensitive_on_each_field() {
        let p = sample("iPhone 12", Some("Apple"), Some("A2403"));
        assert!(p.matches("iphone"));
        assert!(p.matches("apple"));
        assert!(p.matches("a2403"));
        assert!(p.matches(""));
        assert!(!p.matches("pixel"));
    }

    #[test]
    fn absent_fields_never_match() {
        let p = sample("Galaxy S21", None, None);
        assert!(!p.matches("samsung"));
        assert!(p.matches("galaxy"));
    }
}
