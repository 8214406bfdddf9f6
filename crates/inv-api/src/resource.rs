//! Generic client for the flat REST collections.
//!
//! Locations, types, and users share the same surface: `GET` the whole
//! collection as a bare array, mutate one record at a time, and read the
//! mutated record back from a `{message, <record>}` envelope. One generic
//! client covers all three; the [`Resource`] impls only pin down paths and
//! envelope keys.

use std::marker::PhantomData;

use inv_core::entities::{AssetType, Location, User};
use inv_core::enums::Role;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Wiring for one REST collection.
pub trait Resource {
    /// Entity type the API returns for this collection.
    type Entity: DeserializeOwned + Clone + Send + Sync + 'static;
    /// Path segment under the API root, e.g. `"locations"`.
    const PATH: &'static str;
    /// Key mutation responses nest the record under, e.g. `"location"`.
    const RECORD_KEY: &'static str;
}

/// Marker for `/locations`.
pub struct Locations;

impl Resource for Locations {
    type Entity = Location;
    const PATH: &'static str = "locations";
    const RECORD_KEY: &'static str = "location";
}

/// Marker for `/types`.
pub struct Types;

impl Resource for Types {
    type Entity = AssetType;
    const PATH: &'static str = "types";
    const RECORD_KEY: &'static str = "type";
}

/// Marker for `/users`.
pub struct Users;

impl Resource for Users {
    type Entity = User;
    const PATH: &'static str = "users";
    const RECORD_KEY: &'static str = "user";
}

// ---------------------------------------------------------------------------
// Mutation envelope
// ---------------------------------------------------------------------------

/// A successful mutation: the server's confirmation message plus the record
/// as the API now sees it.
#[derive(Debug, Clone)]
pub struct Mutation<T> {
    pub message: String,
    pub record: T,
}

impl<T: DeserializeOwned> Mutation<T> {
    pub(crate) async fn from_response(
        resp: reqwest::Response,
        record_key: &'static str,
    ) -> Result<Self, ApiError> {
        let value: serde_json::Value = resp.json().await?;
        Self::from_value(value, record_key)
    }

    fn from_value(mut value: serde_json::Value, record_key: &'static str) -> Result<Self, ApiError> {
        let message = value
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or_default()
            .to_owned();
        let record = value
            .get_mut(record_key)
            .map(serde_json::Value::take)
            .ok_or_else(|| ApiError::Decode(format!("missing `{record_key}` record")))?;
        let record = serde_json::from_value(record)
            .map_err(|e| ApiError::Decode(format!("`{record_key}` record: {e}")))?;
        Ok(Self { message, record })
    }
}

/// Deleted-record response; only the message comes back.
pub(crate) async fn deletion_message(resp: reqwest::Response) -> Result<String, ApiError> {
    let value: serde_json::Value = resp.json().await?;
    Ok(value
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or_default()
        .to_owned())
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// REST client for one flat collection.
pub struct ResourceClient<R: Resource> {
    client: ApiClient,
    _resource: PhantomData<R>,
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    pub(crate) const fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    /// Fetch the whole collection.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the response cannot be
    /// decoded.
    pub async fn list(&self) -> Result<Vec<R::Entity>, ApiError> {
        let resp = self.client.execute(self.client.get(R::PATH)).await?;
        Ok(resp.json().await?)
    }

    /// Create a record and read it back from the mutation envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the envelope is missing
    /// the record.
    pub async fn create<B: Serialize + Sync>(
        &self,
        payload: &B,
    ) -> Result<Mutation<R::Entity>, ApiError> {
        let resp = self
            .client
            .execute(self.client.post(R::PATH).json(payload))
            .await?;
        Mutation::from_response(resp, R::RECORD_KEY).await
    }

    /// Partially update a record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the envelope is missing
    /// the record.
    pub async fn update<B: Serialize + Sync>(
        &self,
        id: i64,
        payload: &B,
    ) -> Result<Mutation<R::Entity>, ApiError> {
        let path = format!("{}/{id}", R::PATH);
        let resp = self
            .client
            .execute(self.client.patch(&path).json(payload))
            .await?;
        Mutation::from_response(resp, R::RECORD_KEY).await
    }

    /// Delete a record, returning the server's confirmation message.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    pub async fn delete(&self, id: i64) -> Result<String, ApiError> {
        let path = format!("{}/{id}", R::PATH);
        let resp = self.client.execute(self.client.delete(&path)).await?;
        deletion_message(resp).await
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Form payload for creating or renaming a location.
#[derive(Debug, Clone, Serialize)]
pub struct LocationDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Form payload for creating or editing an asset type.
#[derive(Debug, Clone, Serialize)]
pub struct TypeDraft {
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Form payload for creating a user. The role travels as the server's
/// numeric `role_id`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "role_id", serialize_with = "role_id")]
    pub role: Role,
}

/// Partial user update; absent fields keep their server-side values.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(
        rename = "role_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "opt_role_id"
    )]
    pub role: Option<Role>,
}

impl UserPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.role.is_none()
    }
}

fn role_id<S: Serializer>(role: &Role, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_i64(role.server_id())
}

fn opt_role_id<S: Serializer>(role: &Option<Role>, ser: S) -> Result<S::Ok, S::Error> {
    match role {
        Some(role) => ser.serialize_i64(role.server_id()),
        None => ser.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn mutation_unwraps_the_record_envelope() {
        let value = serde_json::json!({
            "message": "Ubicación creada exitosamente",
            "location": {"id": 5, "name": "Depósito Norte", "description": null},
        });
        let mutation = Mutation::<Location>::from_value(value, "location").unwrap();
        assert_eq!(mutation.message, "Ubicación creada exitosamente");
        assert_eq!(mutation.record.id, 5);
        assert_eq!(mutation.record.name, "Depósito Norte");
    }

    #[test]
    fn mutation_without_the_record_is_a_decode_error() {
        let value = serde_json::json!({"message": "ok"});
        let err = Mutation::<Location>::from_value(value, "location").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn mutation_tolerates_a_missing_message() {
        let value = serde_json::json!({
            "type": {"id": 2, "name": "Laptop", "category": "IT"},
        });
        let mutation = Mutation::<AssetType>::from_value(value, "type").unwrap();
        assert_eq!(mutation.message, "");
        assert_eq!(mutation.record.category, "IT");
    }

    #[test]
    fn new_user_serializes_the_numeric_role_id() {
        let body = serde_json::to_value(NewUser {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            username: "jdoe".into(),
            email: "jdoe@example.com".into(),
            password: "secret".into(),
            role: Role::Manager,
        })
        .unwrap();

        assert_eq!(body["role_id"], serde_json::json!(2));
        assert!(body.get("role").is_none());
    }

    #[test]
    fn user_patch_skips_absent_fields() {
        let patch = UserPatch {
            email: Some("new@example.com".into()),
            role: Some(Role::Inventory),
            ..UserPatch::default()
        };
        let body = serde_json::to_value(&patch).unwrap();

        assert_eq!(
            body,
            serde_json::json!({"email": "new@example.com", "role_id": 3})
        );
        assert!(!patch.is_empty());
        assert!(UserPatch::default().is_empty());
    }

    #[test]
    fn location_draft_omits_empty_description() {
        let body = serde_json::to_value(LocationDraft {
            name: "Planta Baja".into(),
            description: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"name": "Planta Baja"}));
    }
}
