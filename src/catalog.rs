// Product catalog - the static list of products shown by the kiosk
//
// The catalog is fetched exactly once at startup, either from a local JSON
// file or from a static HTTP resource. A failed fetch never takes the kiosk
// down: the error is logged and the catalog stays empty.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Image shown for products that do not carry their own
pub const FALLBACK_PRODUCT_IMAGE: &str = "/product.webp";

/// Read-only catalog shared between screens
pub type SharedCatalog = Arc<Vec<Product>>;

/// A single product record as published in the catalog JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub product_name: String,
    pub product_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    /// Published as either `"250 kcal"` or `250`
    #[serde(
        default,
        deserialize_with = "deserialize_calories",
        skip_serializing_if = "Option::is_none"
    )]
    pub calories: Option<String>,
}

impl Product {
    /// Brand line for the product card
    pub fn brand_label(&self) -> &str {
        self.brand_name.as_deref().unwrap_or("N/A")
    }

    pub fn description_label(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or("No description available")
    }

    /// Image URI, falling back to the bundled placeholder
    pub fn image_uri(&self) -> &str {
        self.image
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(FALLBACK_PRODUCT_IMAGE)
    }
}

/// Format an amount the way price tags show it: "₹20", "₹149.5"
pub fn format_price(currency: &str, amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}{}", currency, rounded as i64)
    } else {
        let text = format!("{:.2}", rounded);
        format!("{}{}", currency, text.trim_end_matches('0'))
    }
}

fn deserialize_calories<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Calories {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Calories>::deserialize(deserializer)?.map(|c| match c {
        Calories::Text(s) => s,
        Calories::Number(n) => n.to_string(),
    }))
}

/// Where the catalog is fetched from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// Interpret a configured location: `http(s)://` is a URL, anything else a path
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Errors that can occur while fetching the catalog
#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Http(reqwest::Error),
    Status(u16),
    Parse(serde_json::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "could not read catalog file: {}", e),
            Self::Http(e) => write!(f, "catalog request failed: {}", e),
            Self::Status(code) => write!(f, "catalog request returned HTTP {}", code),
            Self::Parse(e) => write!(f, "catalog is not a list of products: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Http(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Status(_) => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Fetch and parse the catalog, surfacing the failure to the caller
pub async fn fetch(source: &CatalogSource) -> Result<Vec<Product>, CatalogError> {
    let body = match source {
        CatalogSource::File(path) => tokio::fs::read_to_string(path).await?,
        CatalogSource::Url(url) => {
            let response = reqwest::get(url).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(CatalogError::Status(status.as_u16()));
            }
            response.text().await?
        }
    };

    parse(&body)
}

/// Parse catalog JSON and drop records the kiosk cannot sell
pub fn parse(body: &str) -> Result<Vec<Product>, CatalogError> {
    let raw: Vec<Product> = serde_json::from_str(body)?;
    Ok(sanitize(raw))
}

fn sanitize(raw: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::new();
    let mut products = Vec::with_capacity(raw.len());

    for product in raw {
        if !product.product_price.is_finite() || product.product_price < 0.0 {
            tracing::warn!(
                "Skipping product {} with invalid price {}",
                product.product_id,
                product.product_price
            );
            continue;
        }
        if !seen.insert(product.product_id.clone()) {
            tracing::warn!("Skipping duplicate product id {}", product.product_id);
            continue;
        }
        products.push(product);
    }

    products
}

/// Load the catalog once; failures are logged and yield an empty catalog
pub async fn load(source: &CatalogSource) -> Vec<Product> {
    match fetch(source).await {
        Ok(products) => {
            tracing::info!("Loaded {} products from {}", products.len(), source);
            products
        }
        Err(e) => {
            tracing::error!("Error fetching catalog from {}: {}", source, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"product_id": "p1", "product_name": "Masala Chips", "product_price": 20,
         "brand_name": "Crunchy", "calories": "150 kcal"},
        {"product_id": "p2", "product_name": "Greek Salad", "product_price": 149.5,
         "description": "Feta, olives, cucumber", "calories": 320}
    ]"#;

    #[test]
    fn parses_optional_fields() {
        let products = parse(SAMPLE).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].brand_label(), "Crunchy");
        assert_eq!(products[0].calories.as_deref(), Some("150 kcal"));
        assert_eq!(products[1].brand_label(), "N/A");
        assert_eq!(products[1].calories.as_deref(), Some("320"));
        assert_eq!(products[1].image_uri(), FALLBACK_PRODUCT_IMAGE);
        assert_eq!(products[0].description_label(), "No description available");
    }

    #[test]
    fn drops_negative_prices_and_duplicate_ids() {
        let body = r#"[
            {"product_id": "a", "product_name": "A", "product_price": 10},
            {"product_id": "b", "product_name": "B", "product_price": -1},
            {"product_id": "a", "product_name": "A again", "product_price": 12}
        ]"#;
        let products = parse(body).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_name, "A");
    }

    #[test]
    fn rejects_non_list_payload() {
        assert!(matches!(
            parse(r#"{"products": []}"#),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn price_formatting() {
        assert_eq!(format_price("₹", 20.0), "₹20");
        assert_eq!(format_price("₹", 149.5), "₹149.5");
        assert_eq!(format_price("$", 0.125), "$0.13");
        assert_eq!(format_price("₹", 59.999), "₹60");
    }

    #[test]
    fn source_detection() {
        assert_eq!(
            CatalogSource::parse("https://kiosk.local/data.json"),
            CatalogSource::Url("https://kiosk.local/data.json".to_string())
        );
        assert_eq!(
            CatalogSource::parse("./data.json"),
            CatalogSource::File(PathBuf::from("./data.json"))
        );
    }

    #[tokio::test]
    async fn missing_file_yields_empty_catalog() {
        let source = CatalogSource::File(PathBuf::from("/nonexistent/wendor/data.json"));
        assert!(matches!(fetch(&source).await, Err(CatalogError::Io(_))));
        assert!(load(&source).await.is_empty());
    }

    #[tokio::test]
    async fn loads_from_file() {
        let path = std::env::temp_dir().join(format!(
            "wendor-catalog-test-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, SAMPLE).unwrap();

        let products = load(&CatalogSource::File(path.clone())).await;
        let _ = std::fs::remove_file(&path);

        assert_eq!(products.len(), 2);
        assert_eq!(products[1].product_price, 149.5);
    }
}
