//! Client for `/assets`: the paginated, filterable collection plus stats,
//! per-asset detail, and the spreadsheet export.

use chrono::{DateTime, Utc};
use inv_core::entities::{Asset, AssetDetail, AssetPage, AssetStats};
use inv_core::enums::AssetStatus;
use inv_core::filter::AssetFilter;
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::resource::{Mutation, deletion_message};

/// Form payload for creating an asset.
///
/// There is no acquisition-date field: the date is stamped at the moment the
/// record is created, never entered by hand.
#[derive(Debug, Clone)]
pub struct AssetDraft {
    pub name: String,
    pub serial_number: i64,
    pub type_id: i64,
    pub description: Option<String>,
    pub responsible_id: i64,
    pub location_id: i64,
    pub status: AssetStatus,
    pub cost: f64,
}

#[derive(Serialize)]
struct CreateAssetBody<'a> {
    name: &'a str,
    serial_number: i64,
    type_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    responsible_id: i64,
    location_id: i64,
    status: AssetStatus,
    cost: f64,
    acquisition_date: DateTime<Utc>,
}

impl<'a> CreateAssetBody<'a> {
    fn stamped_now(draft: &'a AssetDraft) -> Self {
        Self {
            name: &draft.name,
            serial_number: draft.serial_number,
            type_id: draft.type_id,
            description: draft.description.as_deref(),
            responsible_id: draft.responsible_id,
            location_id: draft.location_id,
            status: draft.status,
            cost: draft.cost,
            acquisition_date: Utc::now(),
        }
    }
}

/// Partial asset update; absent fields keep their server-side values.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

impl AssetPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.serial_number.is_none()
            && self.type_id.is_none()
            && self.description.is_none()
            && self.responsible_id.is_none()
            && self.location_id.is_none()
            && self.status.is_none()
            && self.cost.is_none()
    }

    /// Whether the patch touches anything besides location and status, the
    /// two fields with their own role gates.
    #[must_use]
    pub const fn touches_general_fields(&self) -> bool {
        self.name.is_some()
            || self.serial_number.is_some()
            || self.type_id.is_some()
            || self.description.is_some()
            || self.responsible_id.is_some()
            || self.cost.is_some()
    }
}

/// A finished export download.
#[derive(Debug, Clone)]
pub struct ExportFile {
    /// Name the server suggested, or the dated fallback.
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Client for the asset collection.
#[derive(Clone)]
pub struct AssetsClient {
    client: ApiClient,
}

impl AssetsClient {
    pub(crate) const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch one page of assets. Sentinel-valued filter fields are omitted
    /// from the query string entirely.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the page cannot be
    /// decoded.
    pub async fn list(
        &self,
        page: u32,
        limit: u32,
        filter: &AssetFilter,
    ) -> Result<AssetPage, ApiError> {
        let mut query: Vec<(&str, String)> =
            vec![("page", page.to_string()), ("limit", limit.to_string())];
        query.extend(filter.to_query_pairs());
        let resp = self
            .client
            .execute(self.client.get("assets").query(&query))
            .await?;
        Ok(resp.json().await?)
    }

    /// Fetch one asset together with its change history.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the detail cannot be
    /// decoded.
    pub async fn detail(&self, id: i64) -> Result<AssetDetail, ApiError> {
        let resp = self
            .client
            .execute(self.client.get(&format!("assets/{id}")))
            .await?;
        Ok(resp.json().await?)
    }

    /// Fetch the dashboard counters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the stats cannot be
    /// decoded.
    pub async fn stats(&self) -> Result<AssetStats, ApiError> {
        let resp = self.client.execute(self.client.get("assets/stats")).await?;
        Ok(resp.json().await?)
    }

    /// Create an asset, stamping the acquisition date.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the envelope is missing
    /// the record.
    pub async fn create(&self, draft: &AssetDraft) -> Result<Mutation<Asset>, ApiError> {
        let body = CreateAssetBody::stamped_now(draft);
        let resp = self
            .client
            .execute(self.client.post("assets").json(&body))
            .await?;
        Mutation::from_response(resp, "asset").await
    }

    /// Partially update an asset.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the envelope is missing
    /// the record.
    pub async fn update(&self, id: i64, patch: &AssetPatch) -> Result<Mutation<Asset>, ApiError> {
        let resp = self
            .client
            .execute(self.client.patch(&format!("assets/{id}")).json(patch))
            .await?;
        Mutation::from_response(resp, "asset").await
    }

    /// Delete an asset, returning the server's confirmation message.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn delete(&self, id: i64) -> Result<String, ApiError> {
        let resp = self
            .client
            .execute(self.client.delete(&format!("assets/{id}")))
            .await?;
        deletion_message(resp).await
    }

    /// Download the spreadsheet export of the filtered inventory.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn export(&self, filter: &AssetFilter) -> Result<ExportFile, ApiError> {
        let query = filter.to_query_pairs();
        let resp = self
            .client
            .execute(self.client.get("assets/export").query(&query))
            .await?;
        let filename =
            filename_from_headers(resp.headers()).unwrap_or_else(default_export_filename);
        let bytes = resp.bytes().await?.to_vec();
        Ok(ExportFile { filename, bytes })
    }
}

fn filename_from_headers(headers: &reqwest::header::HeaderMap) -> Option<String> {
    let disposition = headers
        .get(reqwest::header::CONTENT_DISPOSITION)?
        .to_str()
        .ok()?;
    parse_disposition_filename(disposition)
}

/// Everything after `filename=` up to the next `;`, quotes stripped.
fn parse_disposition_filename(value: &str) -> Option<String> {
    let (_, rest) = value.split_once("filename=")?;
    let name = rest.split(';').next().unwrap_or(rest).trim().replace('"', "");
    (!name.is_empty()).then_some(name)
}

fn default_export_filename() -> String {
    format!("Inventario_Activos_{}.xlsx", Utc::now().timestamp_millis())
}
