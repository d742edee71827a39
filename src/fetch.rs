use tracing::{info, warn};

use crate::catalog::{Catalog, OfferingResponse};
use crate::error::CatalogError;

pub fn offering_url(api_base: &str, school: &str) -> String {
    format!("{}/skoler/{}/tilbud.json", api_base.trim_end_matches('/'), school)
}

/// Fetch a school's elective subjects once. No retry: callers surface the error.
pub async fn fetch_catalog(api_base: &str, school: &str) -> Result<Catalog, CatalogError> {
    let url = offering_url(api_base, school);
    let client = reqwest::Client::new();

    info!("Fetching subject offering: {}", url);
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|source| CatalogError::Http { url: url.clone(), source })?;

    let status = response.status();
    if !status.is_success() {
        warn!("Subject offering request for {} returned {}", school, status);
        return Err(CatalogError::Status {
            url,
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|source| CatalogError::Http { url: url.clone(), source })?;
    let parsed: OfferingResponse = serde_json::from_str(&body)?;
    let catalog = Catalog::from_response(school, parsed);

    info!(
        "Loaded {} subjects for {} (source: {})",
        catalog.subjects.len(),
        catalog.school,
        catalog.source.as_deref().unwrap_or("unknown")
    );
    Ok(catalog)
}
