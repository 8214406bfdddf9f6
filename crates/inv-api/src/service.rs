//! The shared inventory service.
//!
//! One service instance owns the API clients and the collection snapshots,
//! and every surface (one-shot commands, the browse loop) talks to the same
//! instance. Behavior rules live here:
//!
//! - Collection fetches silently no-op when no session is established.
//! - Capability-gated mutations are refused locally with the action's denial
//!   message before any request is sent.
//! - Mutation responses are spliced into the held snapshots; asset creation
//!   refetches the current page instead, because server-side ordering and
//!   counters make a local splice wrong.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use inv_auth::{AuthError, SessionStore};
use inv_config::InvConfig;
use inv_core::capability::Capabilities;
use inv_core::entities::{
    Asset, AssetDetail, AssetPage, AssetStats, AssetType, ChangelogEntry, Location, User,
};
use inv_core::filter::AssetFilter;
use inv_core::identity::SessionIdentity;
use tokio::sync::RwLock;

use crate::assets::{AssetDraft, AssetPatch, AssetsClient, ExportFile};
use crate::changelog::ChangelogClient;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::resource::{
    LocationDraft, Locations, Mutation, NewUser, ResourceClient, TypeDraft, Types, UserPatch,
    Users,
};
use crate::store::CollectionStore;

const CREATE_ASSETS_DENIED: &str = "creating assets requires the admin or manager role";
const EDIT_ASSETS_DENIED: &str = "editing assets requires the admin or manager role";
const CHANGE_LOCATION_DENIED: &str = "relocating assets requires the admin or manager role";
const CHANGE_STATUS_DENIED: &str = "changing asset status requires the admin role";
const DELETE_ASSETS_DENIED: &str = "deleting assets requires the admin role";
const VIEW_HISTORY_DENIED: &str = "viewing asset history requires the admin role";
const MANAGE_LOCATIONS_DENIED: &str = "managing locations requires the admin or manager role";
const MANAGE_TYPES_DENIED: &str = "managing asset types requires the admin or manager role";
const MANAGE_USERS_DENIED: &str = "managing users requires the admin role";

/// One asset-list query: page, page size, and the active filters.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetQuery {
    pub page: u32,
    pub limit: u32,
    pub filter: AssetFilter,
}

impl Default for AssetQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            filter: AssetFilter::default(),
        }
    }
}

/// The most recent asset page together with the query that produced it.
#[derive(Debug, Clone, Default)]
pub struct AssetView {
    pub page: AssetPage,
    pub query: AssetQuery,
}

#[derive(Debug, Default)]
struct ServiceState {
    assets: RwLock<AssetView>,
    locations: RwLock<CollectionStore<Location>>,
    types: RwLock<CollectionStore<AssetType>>,
    users: RwLock<CollectionStore<User>>,
    exporting: AtomicBool,
}

/// Shared client-state layer over the inventory API.
#[derive(Clone)]
pub struct InventoryService {
    client: ApiClient,
    session: Arc<SessionStore>,
    assets: AssetsClient,
    changelog: ChangelogClient,
    locations: ResourceClient<Locations>,
    types: ResourceClient<Types>,
    users: ResourceClient<Users>,
    state: Arc<ServiceState>,
}

impl InventoryService {
    #[must_use]
    pub fn new(config: &InvConfig, session: Arc<SessionStore>) -> Self {
        let client = ApiClient::new(config.api.clone(), Arc::clone(&session));
        Self {
            assets: AssetsClient::new(client.clone()),
            changelog: ChangelogClient::new(client.clone()),
            locations: ResourceClient::new(client.clone()),
            types: ResourceClient::new(client.clone()),
            users: ResourceClient::new(client.clone()),
            client,
            session,
            state: Arc::new(ServiceState::default()),
        }
    }

    /// Log in and persist the session.
    ///
    /// # Errors
    ///
    /// See [`SessionStore::login`].
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionIdentity, AuthError> {
        self.client.login(username, password).await
    }

    // -----------------------------------------------------------------------
    // Collection fetches (session-gated, silent no-op when logged out)
    // -----------------------------------------------------------------------

    /// Fetch one page of assets and hold it as the current view.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails; `Ok(None)` when no session
    /// is established.
    pub async fn fetch_assets(&self, query: AssetQuery) -> Result<Option<AssetPage>, ApiError> {
        if !self.session.is_authenticated() {
            return Ok(None);
        }
        let page = self
            .assets
            .list(query.page, query.limit, &query.filter)
            .await?;
        let mut view = self.state.assets.write().await;
        *view = AssetView {
            page: page.clone(),
            query,
        };
        Ok(Some(page))
    }

    /// Fetch the location collection and hold the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails; `Ok(None)` when logged out.
    pub async fn fetch_locations(&self) -> Result<Option<Vec<Location>>, ApiError> {
        if !self.session.is_authenticated() {
            return Ok(None);
        }
        let items = self.locations.list().await?;
        self.state.locations.write().await.replace_all(items.clone());
        Ok(Some(items))
    }

    /// Fetch the asset-type collection and hold the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails; `Ok(None)` when logged out.
    pub async fn fetch_types(&self) -> Result<Option<Vec<AssetType>>, ApiError> {
        if !self.session.is_authenticated() {
            return Ok(None);
        }
        let items = self.types.list().await?;
        self.state.types.write().await.replace_all(items.clone());
        Ok(Some(items))
    }

    /// Fetch the user collection and hold the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails; `Ok(None)` when logged out.
    pub async fn fetch_users(&self) -> Result<Option<Vec<User>>, ApiError> {
        if !self.session.is_authenticated() {
            return Ok(None);
        }
        let items = self.users.list().await?;
        self.state.users.write().await.replace_all(items.clone());
        Ok(Some(items))
    }

    /// Fetch the dashboard counters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails; `Ok(None)` when logged out.
    pub async fn fetch_stats(&self) -> Result<Option<AssetStats>, ApiError> {
        if !self.session.is_authenticated() {
            return Ok(None);
        }
        Ok(Some(self.assets.stats().await?))
    }

    /// Fetch the inventory-wide change feed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails; `Ok(None)` when logged out.
    pub async fn fetch_changelog(&self) -> Result<Option<Vec<ChangelogEntry>>, ApiError> {
        if !self.session.is_authenticated() {
            return Ok(None);
        }
        Ok(Some(self.changelog.list().await?))
    }

    /// Fetch one asset with its change history.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails; `Ok(None)` when logged out.
    pub async fn asset_detail(&self, id: i64) -> Result<Option<AssetDetail>, ApiError> {
        if !self.session.is_authenticated() {
            return Ok(None);
        }
        Ok(Some(self.assets.detail(id).await?))
    }

    /// Fetch one asset with its change history for the history view. Admin
    /// only. The live asset comes along because reconciling the newest
    /// entry's diffs needs it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] for non-admin roles, otherwise any
    /// request failure.
    pub async fn asset_history(&self, id: i64) -> Result<AssetDetail, ApiError> {
        check(
            self.session.capabilities(),
            |c| c.can_view_history,
            VIEW_HISTORY_DENIED,
        )?;
        self.assets.detail(id).await
    }

    // -----------------------------------------------------------------------
    // Asset mutations
    // -----------------------------------------------------------------------

    /// Create an asset and refetch the current page.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] when the role may not create assets,
    /// otherwise any request failure.
    pub async fn create_asset(&self, draft: AssetDraft) -> Result<Mutation<Asset>, ApiError> {
        check(
            self.session.capabilities(),
            |c| c.can_create_assets,
            CREATE_ASSETS_DENIED,
        )?;
        let mutation = self.assets.create(&draft).await?;

        // The new record lands wherever the server sorts it, and every
        // counter shifts: refetch the page we are holding.
        let query = self.state.assets.read().await.query.clone();
        if let Err(error) = self.fetch_assets(query).await {
            tracing::warn!(%error, "asset list refresh after create failed");
        }
        Ok(mutation)
    }

    /// Partially update an asset and splice the response into the held page.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] when the role may not touch one of the
    /// patched fields, otherwise any request failure.
    pub async fn update_asset(
        &self,
        id: i64,
        patch: AssetPatch,
    ) -> Result<Mutation<Asset>, ApiError> {
        let caps = self
            .session
            .capabilities()
            .ok_or(AuthError::NotAuthenticated)?;
        patch_gates(&patch, caps)?;

        let mutation = self.assets.update(id, &patch).await?;
        let mut view = self.state.assets.write().await;
        replace_asset(&mut view.page, mutation.record.clone());
        Ok(mutation)
    }

    /// Delete an asset and drop it from the held page. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] for non-admin roles, otherwise any
    /// request failure.
    pub async fn delete_asset(&self, id: i64) -> Result<String, ApiError> {
        check(
            self.session.capabilities(),
            |c| c.can_delete_assets,
            DELETE_ASSETS_DENIED,
        )?;
        let message = self.assets.delete(id).await?;
        let mut view = self.state.assets.write().await;
        remove_asset(&mut view.page, id);
        Ok(message)
    }

    /// Download the spreadsheet export of the filtered inventory. `Ok(None)`
    /// when another export is already in flight.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] when logged out, otherwise any
    /// request failure.
    pub async fn export_assets(
        &self,
        filter: &AssetFilter,
    ) -> Result<Option<ExportFile>, ApiError> {
        if !self.session.is_authenticated() {
            return Err(AuthError::NotAuthenticated.into());
        }
        if self.state.exporting.swap(true, Ordering::SeqCst) {
            return Ok(None);
        }
        let result = self.assets.export(filter).await;
        self.state.exporting.store(false, Ordering::SeqCst);
        result.map(Some)
    }

    // -----------------------------------------------------------------------
    // Location mutations
    // -----------------------------------------------------------------------

    /// Create a location and append it to the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] when the role may not manage
    /// locations, otherwise any request failure.
    pub async fn create_location(
        &self,
        draft: &LocationDraft,
    ) -> Result<Mutation<Location>, ApiError> {
        check(
            self.session.capabilities(),
            |c| c.can_manage_locations,
            MANAGE_LOCATIONS_DENIED,
        )?;
        let mutation = self.locations.create(draft).await?;
        self.state
            .locations
            .write()
            .await
            .push(mutation.record.clone());
        Ok(mutation)
    }

    /// Update a location in place.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] when the role may not manage
    /// locations, otherwise any request failure.
    pub async fn update_location(
        &self,
        id: i64,
        draft: &LocationDraft,
    ) -> Result<Mutation<Location>, ApiError> {
        check(
            self.session.capabilities(),
            |c| c.can_manage_locations,
            MANAGE_LOCATIONS_DENIED,
        )?;
        let mutation = self.locations.update(id, draft).await?;
        self.state
            .locations
            .write()
            .await
            .replace(mutation.record.clone());
        Ok(mutation)
    }

    /// Delete a location and drop it from the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] when the role may not manage
    /// locations, otherwise any request failure.
    pub async fn delete_location(&self, id: i64) -> Result<String, ApiError> {
        check(
            self.session.capabilities(),
            |c| c.can_manage_locations,
            MANAGE_LOCATIONS_DENIED,
        )?;
        let message = self.locations.delete(id).await?;
        self.state.locations.write().await.remove(id);
        Ok(message)
    }

    // -----------------------------------------------------------------------
    // Type mutations
    // -----------------------------------------------------------------------

    /// Create an asset type and append it to the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] when the role may not manage types,
    /// otherwise any request failure.
    pub async fn create_type(&self, draft: &TypeDraft) -> Result<Mutation<AssetType>, ApiError> {
        check(
            self.session.capabilities(),
            |c| c.can_manage_types,
            MANAGE_TYPES_DENIED,
        )?;
        let mutation = self.types.create(draft).await?;
        self.state.types.write().await.push(mutation.record.clone());
        Ok(mutation)
    }

    /// Update an asset type in place.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] when the role may not manage types,
    /// otherwise any request failure.
    pub async fn update_type(
        &self,
        id: i64,
        draft: &TypeDraft,
    ) -> Result<Mutation<AssetType>, ApiError> {
        check(
            self.session.capabilities(),
            |c| c.can_manage_types,
            MANAGE_TYPES_DENIED,
        )?;
        let mutation = self.types.update(id, draft).await?;
        self.state.types.write().await.replace(mutation.record.clone());
        Ok(mutation)
    }

    /// Delete an asset type and drop it from the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] when the role may not manage types,
    /// otherwise any request failure.
    pub async fn delete_type(&self, id: i64) -> Result<String, ApiError> {
        check(
            self.session.capabilities(),
            |c| c.can_manage_types,
            MANAGE_TYPES_DENIED,
        )?;
        let message = self.types.delete(id).await?;
        self.state.types.write().await.remove(id);
        Ok(message)
    }

    // -----------------------------------------------------------------------
    // User mutations (admin only)
    // -----------------------------------------------------------------------

    /// Create a user and append it to the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] for non-admin roles, otherwise any
    /// request failure.
    pub async fn create_user(&self, form: &NewUser) -> Result<Mutation<User>, ApiError> {
        check(
            self.session.capabilities(),
            |c| c.can_manage_users,
            MANAGE_USERS_DENIED,
        )?;
        let mutation = self.users.create(form).await?;
        self.state.users.write().await.push(mutation.record.clone());
        Ok(mutation)
    }

    /// Partially update a user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] for non-admin roles, otherwise any
    /// request failure.
    pub async fn update_user(&self, id: i64, patch: &UserPatch) -> Result<Mutation<User>, ApiError> {
        check(
            self.session.capabilities(),
            |c| c.can_manage_users,
            MANAGE_USERS_DENIED,
        )?;
        let mutation = self.users.update(id, patch).await?;
        self.state.users.write().await.replace(mutation.record.clone());
        Ok(mutation)
    }

    /// Delete a user and drop it from the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Forbidden`] for non-admin roles, otherwise any
    /// request failure.
    pub async fn delete_user(&self, id: i64) -> Result<String, ApiError> {
        check(
            self.session.capabilities(),
            |c| c.can_manage_users,
            MANAGE_USERS_DENIED,
        )?;
        let message = self.users.delete(id).await?;
        self.state.users.write().await.remove(id);
        Ok(message)
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// The asset page as of the last fetch, with its query.
    pub async fn asset_view(&self) -> AssetView {
        self.state.assets.read().await.clone()
    }

    pub async fn cached_locations(&self) -> Vec<Location> {
        self.state.locations.read().await.items().to_vec()
    }

    pub async fn cached_types(&self) -> Vec<AssetType> {
        self.state.types.read().await.items().to_vec()
    }

    pub async fn cached_users(&self) -> Vec<User> {
        self.state.users.read().await.items().to_vec()
    }

    /// Best-effort asset name lookup against the held page.
    pub async fn asset_name(&self, id: i64) -> Option<String> {
        self.state
            .assets
            .read()
            .await
            .page
            .assets
            .iter()
            .find(|asset| asset.id == id)
            .map(|asset| asset.name.clone())
    }
}

fn check(
    caps: Option<Capabilities>,
    allowed: impl FnOnce(Capabilities) -> bool,
    denial: &str,
) -> Result<(), ApiError> {
    let caps = caps.ok_or(AuthError::NotAuthenticated)?;
    if allowed(caps) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(denial.to_owned()))
    }
}

/// Field-level gates for a partial asset update. Location and status carry
/// their own roles; everything else falls under general editing.
fn patch_gates(patch: &AssetPatch, caps: Capabilities) -> Result<(), ApiError> {
    if patch.location_id.is_some() && !caps.can_change_location {
        return Err(ApiError::Forbidden(CHANGE_LOCATION_DENIED.to_owned()));
    }
    if patch.status.is_some() && !caps.can_change_status {
        return Err(ApiError::Forbidden(CHANGE_STATUS_DENIED.to_owned()));
    }
    if patch.touches_general_fields() && !caps.can_edit_assets {
        return Err(ApiError::Forbidden(EDIT_ASSETS_DENIED.to_owned()));
    }
    Ok(())
}

fn replace_asset(page: &mut AssetPage, updated: Asset) {
    if let Some(slot) = page.assets.iter_mut().find(|a| a.id == updated.id) {
        *slot = updated;
    }
}

fn remove_asset(page: &mut AssetPage, id: i64) -> bool {
    let before = page.assets.len();
    page.assets.retain(|a| a.id != id);
    let removed = page.assets.len() != before;
    if removed {
        page.total = page.total.saturating_sub(1);
    }
    removed
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use inv_core::enums::{AssetStatus, Role};
    use pretty_assertions::assert_eq;

    use super::*;

    fn asset(id: i64, name: &str) -> Asset {
        Asset {
            id,
            name: name.into(),
            serial_number: 1000 + id,
            type_id: 1,
            description: None,
            responsible_id: 1,
            location_id: 1,
            status: AssetStatus::Active,
            cost: 100.0,
            acquisition_date: Utc::now(),
            created_by: None,
            location: None,
            type_ref: None,
            responsible: None,
        }
    }

    fn page_of(assets: Vec<Asset>, total: u32) -> AssetPage {
        AssetPage {
            assets,
            total,
            active_assets: total,
            inactive_assets: 0,
            decommissioned_assets: 0,
            page: 1,
            limit: 9,
        }
    }

    #[test]
    fn check_requires_a_session() {
        let err = check(None, |c| c.can_create_assets, CREATE_ASSETS_DENIED).unwrap_err();
        assert!(matches!(err, ApiError::Auth(AuthError::NotAuthenticated)));
    }

    #[test]
    fn check_denies_with_the_action_message() {
        let caps = Capabilities::for_role(Role::Manager);
        let err = check(Some(caps), |c| c.can_delete_assets, DELETE_ASSETS_DENIED).unwrap_err();
        match err {
            ApiError::Forbidden(message) => assert_eq!(message, DELETE_ASSETS_DENIED),
            other => panic!("expected Forbidden, got {other:?}"),
        }

        assert!(check(Some(caps), |c| c.can_create_assets, CREATE_ASSETS_DENIED).is_ok());
    }

    #[test]
    fn manager_may_relocate_but_not_change_status() {
        let caps = Capabilities::for_role(Role::Manager);

        let relocate = AssetPatch {
            location_id: Some(4),
            ..AssetPatch::default()
        };
        assert!(patch_gates(&relocate, caps).is_ok());

        let decommission = AssetPatch {
            status: Some(AssetStatus::Decommissioned),
            ..AssetPatch::default()
        };
        let err = patch_gates(&decommission, caps).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn inventory_role_may_not_edit_at_all() {
        let caps = Capabilities::for_role(Role::Inventory);
        let rename = AssetPatch {
            name: Some("Nuevo nombre".into()),
            ..AssetPatch::default()
        };
        let err = patch_gates(&rename, caps).unwrap_err();
        match err {
            ApiError::Forbidden(message) => assert_eq!(message, EDIT_ASSETS_DENIED),
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[test]
    fn admin_passes_every_patch_gate() {
        let caps = Capabilities::for_role(Role::Admin);
        let patch = AssetPatch {
            name: Some("Servidor".into()),
            location_id: Some(2),
            status: Some(AssetStatus::Inactive),
            ..AssetPatch::default()
        };
        assert!(patch_gates(&patch, caps).is_ok());
    }

    #[test]
    fn replace_asset_swaps_in_place_when_present() {
        let mut page = page_of(vec![asset(1, "A"), asset(2, "B")], 2);

        replace_asset(&mut page, asset(2, "B actualizado"));
        assert_eq!(page.assets[1].name, "B actualizado");
        assert_eq!(page.assets.len(), 2);

        replace_asset(&mut page, asset(9, "fuera de página"));
        assert_eq!(page.assets.len(), 2);
    }

    #[test]
    fn remove_asset_decrements_total_only_on_a_hit() {
        let mut page = page_of(vec![asset(1, "A"), asset(2, "B")], 12);

        assert!(remove_asset(&mut page, 1));
        assert_eq!(page.assets.len(), 1);
        assert_eq!(page.total, 11);

        assert!(!remove_asset(&mut page, 1));
        assert_eq!(page.total, 11);
    }

    #[test]
    fn default_query_is_the_first_unfiltered_page() {
        let query = AssetQuery::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert!(!query.filter.has_active());
    }

    #[tokio::test]
    #[ignore] // requires a running API plus INVENTRA_TEST_USERNAME / INVENTRA_TEST_PASSWORD
    async fn live_login_fetch_and_logout() {
        let config = InvConfig::load().expect("config");
        let session = Arc::new(SessionStore::new());
        let service = InventoryService::new(&config, Arc::clone(&session));

        let username = std::env::var("INVENTRA_TEST_USERNAME").expect("INVENTRA_TEST_USERNAME");
        let password = std::env::var("INVENTRA_TEST_PASSWORD").expect("INVENTRA_TEST_PASSWORD");
        let identity = service.login(&username, &password).await.expect("login");
        println!("logged in as {} ({})", identity.display_name(), identity.role);

        let page = service
            .fetch_assets(AssetQuery::default())
            .await
            .expect("fetch assets")
            .expect("authenticated");
        println!("page 1: {} of {} assets", page.assets.len(), page.total);

        let stats = service.fetch_stats().await.expect("stats").expect("authenticated");
        println!(
            "stats: {} active, {} inactive, ${} total",
            stats.active, stats.inactive, stats.cost
        );

        session.logout().expect("logout");
    }
}
