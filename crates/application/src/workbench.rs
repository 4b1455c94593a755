//! Workbench: tabs, saved requests and dispatch wired together.
//!
//! Dispatch completions address tabs by id. The tab store lock is held
//! only for synchronous mutations, never across the network call, so
//! several tabs can have requests in flight at once.

use std::sync::Arc;

use parking_lot::Mutex;
use restlab_domain::response::ResponseEnvelope;
use restlab_domain::{GroupTarget, RequestSnapshot, SaveOutcome, SavedGroups, Tab, TabEdit, TabId};

use crate::catalog::SavedRequestCatalog;
use crate::dispatch::DispatchRequest;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{HttpClient, KeyValueStore};
use crate::settings::ThemeSettings;
use crate::tab_store::TabStore;

/// Everything a presentation layer needs to drive the client.
pub struct Workbench<S: KeyValueStore, C: HttpClient> {
    tabs: Mutex<TabStore<S>>,
    catalog: SavedRequestCatalog<S>,
    theme: ThemeSettings<S>,
    dispatcher: DispatchRequest<C>,
}

impl<S: KeyValueStore, C: HttpClient> Workbench<S, C> {
    /// Loads persisted state from `store` and dispatches through `client`.
    pub fn load(store: Arc<S>, client: Arc<C>) -> Self {
        Self {
            tabs: Mutex::new(TabStore::load(Arc::clone(&store))),
            catalog: SavedRequestCatalog::new(Arc::clone(&store)),
            theme: ThemeSettings::new(store),
            dispatcher: DispatchRequest::new(client),
        }
    }

    /// Returns a copy of all tabs.
    #[must_use]
    pub fn tabs(&self) -> Vec<Tab> {
        self.tabs.lock().tabs().to_vec()
    }

    /// Returns the active cursor.
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.tabs.lock().active_index()
    }

    /// Returns a copy of the active tab.
    #[must_use]
    pub fn active_tab(&self) -> Tab {
        self.tabs.lock().active_tab().clone()
    }

    /// Returns a copy of the tab with the given id.
    #[must_use]
    pub fn tab(&self, id: &TabId) -> Option<Tab> {
        self.tabs.lock().find(id).cloned()
    }

    /// Opens a new default tab and makes it active.
    pub fn create_tab(&self) -> TabId {
        self.tabs.lock().create()
    }

    /// Closes the tab at `index`; the last tab is never closed.
    pub fn remove_tab(&self, index: usize) -> bool {
        self.tabs.lock().remove(index)
    }

    /// Moves the active cursor.
    pub fn set_active(&self, index: usize) -> bool {
        self.tabs.lock().set_active(index)
    }

    /// Applies a single-field edit to the tab with the given id.
    pub fn edit_tab(&self, id: &TabId, edit: TabEdit) -> bool {
        self.tabs.lock().update_by_id(id, edit)
    }

    /// Sends the tab's request and stores the envelope on that tab.
    ///
    /// The tab is marked busy before the call and released when the
    /// envelope is stored, whatever the outcome. Dropping the returned
    /// future mid-flight also releases it. If the tab was closed in the
    /// meantime the envelope is returned but not stored anywhere.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] for an unknown tab and
    /// [`ApplicationError::Busy`] when the tab already has a request in
    /// flight.
    pub async fn send(&self, id: &TabId) -> ApplicationResult<ResponseEnvelope> {
        let tab = {
            let mut tabs = self.tabs.lock();
            let tab = tabs
                .find(id)
                .cloned()
                .ok_or_else(|| ApplicationError::NotFound(format!("tab {id}")))?;
            if tab.busy {
                return Err(ApplicationError::Busy(id.to_string()));
            }
            tabs.update_by_id(id, TabEdit::Busy(true));
            tab
        };
        let in_flight = InFlight {
            tabs: &self.tabs,
            id,
            armed: true,
        };

        let envelope = self.dispatcher.dispatch(&tab).await;

        in_flight.complete(envelope.clone());
        Ok(envelope)
    }

    /// Saves the tab's request-defining fields into the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] for an unknown tab, or a
    /// storage error if the catalog cannot be written.
    pub fn save_tab(&self, id: &TabId, target: &GroupTarget) -> ApplicationResult<SaveOutcome> {
        let snapshot = self
            .tab(id)
            .map(|tab| tab.snapshot())
            .ok_or_else(|| ApplicationError::NotFound(format!("tab {id}")))?;
        self.catalog.save(target, snapshot)
    }

    /// Returns true if the tab's current request is saved in any group.
    #[must_use]
    pub fn is_tab_saved(&self, id: &TabId) -> bool {
        self.tab(id)
            .is_some_and(|tab| self.catalog.is_saved(&tab.snapshot()))
    }

    /// Opens a saved request in a new active tab.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if there is no snapshot at
    /// that position.
    pub fn open_saved(&self, group: &str, index: usize) -> ApplicationResult<TabId> {
        let snapshot = self
            .catalog
            .get(group, index)
            .ok_or_else(|| ApplicationError::NotFound(format!("saved request {group}[{index}]")))?;
        Ok(self.tabs.lock().from_snapshot(&snapshot))
    }

    /// Deletes a saved request.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be written.
    pub fn remove_saved(
        &self,
        group: &str,
        index: usize,
    ) -> ApplicationResult<Option<RequestSnapshot>> {
        self.catalog.remove(group, index)
    }

    /// Returns all saved groups.
    #[must_use]
    pub fn saved_groups(&self) -> SavedGroups {
        self.catalog.list_groups()
    }

    /// Returns the theme settings.
    #[must_use]
    pub const fn theme(&self) -> &ThemeSettings<S> {
        &self.theme
    }
}

/// Busy marker for one dispatch; clears the flag if the dispatch is
/// abandoned before completing.
struct InFlight<'a, S: KeyValueStore> {
    tabs: &'a Mutex<TabStore<S>>,
    id: &'a TabId,
    armed: bool,
}

impl<S: KeyValueStore> InFlight<'_, S> {
    fn complete(mut self, envelope: ResponseEnvelope) {
        self.armed = false;
        self.tabs.lock().complete_dispatch(self.id, envelope);
    }
}

impl<S: KeyValueStore> Drop for InFlight<'_, S> {
    fn drop(&mut self) {
        if self.armed {
            tracing::debug!(id = %self.id, "dispatch abandoned, releasing tab");
            self.tabs.lock().update_by_id(self.id, TabEdit::Busy(false));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ports::HttpClientError;
    use crate::test_support::{MemoryStore, StubHttpClient};
    use pretty_assertions::assert_eq;
    use restlab_domain::request::OutboundRequest;
    use restlab_domain::response::TransportResponse;
    use serde_json::json;
    use std::future::Future;
    use std::time::Duration;
    use tokio::sync::Semaphore;

    /// Holds every request until a permit is released, then echoes the URL.
    struct GatedHttpClient {
        gate: Arc<Semaphore>,
    }

    impl HttpClient for GatedHttpClient {
        fn execute(
            &self,
            request: OutboundRequest,
        ) -> impl Future<Output = Result<TransportResponse, HttpClientError>> + Send {
            let gate = Arc::clone(&self.gate);
            async move {
                let _permit = gate
                    .acquire()
                    .await
                    .map_err(|e| HttpClientError::Other(e.to_string()))?;
                let body = serde_json::to_vec(&json!({ "url": request.url }))
                    .map_err(|e| HttpClientError::Other(e.to_string()))?;
                Ok(TransportResponse::new(
                    200,
                    vec![("content-type".to_string(), "application/json".to_string())],
                    body,
                    Duration::ZERO,
                ))
            }
        }
    }

    /// Never answers.
    struct StalledHttpClient;

    impl HttpClient for StalledHttpClient {
        fn execute(
            &self,
            _request: OutboundRequest,
        ) -> impl Future<Output = Result<TransportResponse, HttpClientError>> + Send {
            std::future::pending()
        }
    }

    fn workbench(
        client: StubHttpClient,
    ) -> Workbench<MemoryStore, StubHttpClient> {
        Workbench::load(Arc::new(MemoryStore::new()), Arc::new(client))
    }

    #[tokio::test]
    async fn test_send_stores_envelope_on_tab() {
        let workbench = workbench(StubHttpClient::respond(200, "application/json", r#"{"a":1}"#));
        let id = workbench.active_tab().id;
        workbench.edit_tab(&id, TabEdit::Url("https://api.example.com".to_string()));

        let envelope = workbench.send(&id).await.unwrap();
        assert_eq!(envelope, ResponseEnvelope::success(200, json!({"a": 1})));

        let tab = workbench.tab(&id).unwrap();
        assert_eq!(tab.response, Some(envelope));
        assert!(!tab.busy);
    }

    #[tokio::test]
    async fn test_send_releases_busy_on_validation_error() {
        let workbench = workbench(StubHttpClient::respond(200, "text/plain", "ok"));
        let id = workbench.active_tab().id;

        let envelope = workbench.send(&id).await.unwrap();
        assert_eq!(envelope.error_message(), Some("URL is required."));
        assert!(!workbench.tab(&id).unwrap().busy);
    }

    #[tokio::test]
    async fn test_new_envelope_replaces_previous() {
        let workbench = workbench(StubHttpClient::respond(500, "text/plain", ""));
        let id = workbench.active_tab().id;
        workbench.edit_tab(
            &id,
            TabEdit::Response(Some(ResponseEnvelope::success(200, json!({"old": true})))),
        );
        workbench.edit_tab(&id, TabEdit::Url("https://api.example.com".to_string()));

        workbench.send(&id).await.unwrap();
        assert_eq!(
            workbench.tab(&id).unwrap().response,
            Some(ResponseEnvelope::error("HTTP error! Status: 500"))
        );
    }

    #[tokio::test]
    async fn test_send_unknown_tab() {
        let workbench = workbench(StubHttpClient::respond(200, "text/plain", "ok"));
        let missing = TabId::parse("missing").unwrap();
        assert!(matches!(
            workbench.send(&missing).await,
            Err(ApplicationError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_send_refuses_tab_already_in_flight() {
        let workbench = workbench(StubHttpClient::respond(200, "text/plain", "ok"));
        let id = workbench.active_tab().id;
        workbench.edit_tab(&id, TabEdit::Busy(true));
        assert!(matches!(
            workbench.send(&id).await,
            Err(ApplicationError::Busy(_))
        ));
    }

    #[tokio::test]
    async fn test_late_response_never_lands_on_neighbour() {
        let gate = Arc::new(Semaphore::new(0));
        let workbench = Workbench::load(
            Arc::new(MemoryStore::new()),
            Arc::new(GatedHttpClient {
                gate: Arc::clone(&gate),
            }),
        );

        let first = workbench.active_tab().id;
        let second = workbench.create_tab();
        let third = workbench.create_tab();
        workbench.edit_tab(&second, TabEdit::Url("https://second.example".to_string()));
        workbench.edit_tab(&third, TabEdit::Url("https://third.example".to_string()));

        let scenario = async {
            tokio::task::yield_now().await;
            assert!(workbench.tab(&second).unwrap().busy);
            assert!(workbench.tab(&third).unwrap().busy);

            // Close the second tab while both requests are in flight; the
            // third tab slides into its position.
            assert!(workbench.remove_tab(1));
            gate.add_permits(2);
        };

        let (second_result, third_result, ()) =
            tokio::join!(workbench.send(&second), workbench.send(&third), scenario);

        assert_eq!(
            second_result.unwrap().payload,
            json!({"url": "https://second.example"})
        );
        assert!(third_result.is_ok());

        let tabs = workbench.tabs();
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[0].id, first);
        assert!(tabs[0].response.is_none());
        assert_eq!(tabs[1].id, third);
        assert_eq!(
            tabs[1].response,
            Some(ResponseEnvelope::success(
                200,
                json!({"url": "https://third.example"})
            ))
        );
        assert!(tabs.iter().all(|tab| !tab.busy));
    }

    #[tokio::test]
    async fn test_save_and_reopen() {
        let workbench = workbench(StubHttpClient::respond(200, "text/plain", "ok"));
        let id = workbench.active_tab().id;
        workbench.edit_tab(&id, TabEdit::Url("https://api.example.com/users".to_string()));
        assert!(!workbench.is_tab_saved(&id));

        let target = GroupTarget::CreateNew("users".to_string());
        assert!(workbench.save_tab(&id, &target).unwrap().is_saved());
        assert!(!workbench.save_tab(&id, &target).unwrap().is_saved());
        assert!(workbench.is_tab_saved(&id));

        let reopened = workbench.open_saved("users", 0).unwrap();
        assert_ne!(reopened, id);
        assert_eq!(workbench.active_tab().id, reopened);
        assert_eq!(workbench.active_tab().url, "https://api.example.com/users");

        assert!(workbench.open_saved("users", 4).is_err());

        workbench.remove_saved("users", 0).unwrap();
        assert!(workbench.saved_groups().is_empty());
        assert!(!workbench.is_tab_saved(&id));
    }

    #[tokio::test]
    async fn test_abandoned_send_releases_busy() {
        let workbench = Workbench::load(Arc::new(MemoryStore::new()), Arc::new(StalledHttpClient));
        let id = workbench.active_tab().id;
        workbench.edit_tab(&id, TabEdit::Url("https://slow.example".to_string()));

        let result = tokio::time::timeout(Duration::from_millis(20), workbench.send(&id)).await;
        assert!(result.is_err());

        let tab = workbench.tab(&id).unwrap();
        assert!(!tab.busy);
        assert!(tab.response.is_none());

        let retry = tokio::time::timeout(Duration::from_millis(20), workbench.send(&id)).await;
        assert!(retry.is_err(), "second send should reach the client again");
        assert!(!workbench.tab(&id).unwrap().busy);
    }
}
