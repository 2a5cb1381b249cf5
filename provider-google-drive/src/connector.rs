//! Google Drive connector implementation
//!
//! Implements the `RemoteStorageService` trait over the Drive v3 API,
//! scoped entirely to the application-private appDataFolder space.

use async_trait::async_trait;
use bridge_traits::browser::TabOpener;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bridge_traits::storage::{CredentialStore, LocalScript, ScriptStore};
use bytes::Bytes;
use core_runtime::events::{EventBus, SyncEvent};
use core_sync::{
    is_script_filename, item_filename, spawn_detached, uri_from_filename, RemoteFileRef,
    RemoteMeta, RemoteStorageService, Result, ScriptItem, ServiceError, SyncData, META_FILENAME,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;
use uuid::Uuid;

use crate::auth::{capture_redirect, consent_url, DriveConfig, RedirectCapture};
use crate::types::{DriveFile, FilesListResponse, TokenErrorBody};

/// Google Drive API base URL
const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Multipart upload endpoint base
const UPLOAD_API_BASE: &str = "https://www.googleapis.com/upload/drive/v3";

/// Token introspection endpoint
const TOKENINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/tokeninfo";

/// Application-private storage space
const APP_DATA_FOLDER: &str = "appDataFolder";

/// Fields to request from the listing endpoint
const FILE_FIELDS: &str = "files(id,name,size)";

/// Service identifier
const SERVICE_NAME: &str = "googledrive";

/// Credential key holding the access token
const TOKEN_KEY: &str = "googledrive/token";

/// Google Drive storage service
///
/// Lists, fetches, uploads, and deletes script files in the appDataFolder
/// space, and drives the OAuth implicit-flow handshake. Holds no state of
/// its own beyond injected collaborators; the stored access token in the
/// `CredentialStore` is the only value shared between concurrent calls.
pub struct GoogleDriveService {
    http: Arc<dyn HttpClient>,
    credentials: Arc<dyn CredentialStore>,
    tabs: Arc<dyn TabOpener>,
    scripts: Arc<dyn ScriptStore>,
    events: EventBus,
    config: DriveConfig,
}

impl GoogleDriveService {
    /// Create a service using the built-in OAuth application registration.
    pub fn new(
        http: Arc<dyn HttpClient>,
        credentials: Arc<dyn CredentialStore>,
        tabs: Arc<dyn TabOpener>,
        scripts: Arc<dyn ScriptStore>,
        events: EventBus,
    ) -> Self {
        Self::with_config(http, credentials, tabs, scripts, events, DriveConfig::default())
    }

    /// Create a service with a custom OAuth application registration.
    pub fn with_config(
        http: Arc<dyn HttpClient>,
        credentials: Arc<dyn CredentialStore>,
        tabs: Arc<dyn TabOpener>,
        scripts: Arc<dyn ScriptStore>,
        events: EventBus,
        config: DriveConfig,
    ) -> Self {
        Self {
            http,
            credentials,
            tabs,
            scripts,
            events,
            config,
        }
    }

    /// Read the stored access token.
    ///
    /// A missing token fails as `Unauthorized` before any network I/O; an
    /// expired or revoked one is only discovered at call time.
    async fn access_token(&self) -> Result<String> {
        self.credentials
            .get(TOKEN_KEY)
            .await?
            .ok_or(ServiceError::Unauthorized)
    }

    /// Execute a request and require a 2xx response.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let response = self.http.execute(request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(remote_error(&response))
        }
    }

    /// Fetch raw file content by id.
    async fn fetch_content(&self, id: &str) -> Result<Bytes> {
        let token = self.access_token().await?;
        let url = format!("{DRIVE_API_BASE}/files/{id}?alt=media");
        let request = HttpRequest::new(HttpMethod::Get, url).bearer_token(token.as_str());
        let response = self.execute(request).await?;
        Ok(response.body)
    }

    /// Fetch the local script collection.
    async fn fetch_local(&self) -> Result<Vec<LocalScript>> {
        Ok(self.scripts.local_scripts().await?)
    }

    /// Fetch and parse the metadata document described by `file`.
    ///
    /// Fetch and parse failures never block the sync; they are replaced by
    /// the [`handle_meta_error`](Self::handle_meta_error) fallback.
    async fn fetch_meta(&self, file: Option<DriveFile>) -> Result<RemoteMeta> {
        let (id, size) = match &file {
            Some(file) => (Some(file.id.clone()), file.size_bytes()),
            None => (None, 0),
        };

        let content = match &id {
            Some(id) => self.fetch_content(id).await.and_then(|body| {
                serde_json::from_slice(&body)
                    .map_err(|e| ServiceError::Parse(format!("metadata document: {e}")))
            }),
            None => Err(ServiceError::Validation("missing file id")),
        };

        let data = match content {
            Ok(value) => value,
            Err(error) => self.handle_meta_error(error),
        };

        Ok(RemoteMeta {
            id,
            size,
            name: META_FILENAME.to_string(),
            data,
        })
    }

    /// Fallback hook for unusable sync metadata: substitute an empty
    /// document so the rest of the sync can proceed.
    fn handle_meta_error(&self, error: ServiceError) -> Value {
        warn!(service = SERVICE_NAME, error = %error, "Falling back to empty sync metadata");
        json!({})
    }

    /// Schedule a best-effort deletion that is never joined.
    fn spawn_remove(&self, id: String) {
        let http = Arc::clone(&self.http);
        let credentials = Arc::clone(&self.credentials);

        spawn_detached("googledrive.remove", async move {
            let token = credentials
                .get(TOKEN_KEY)
                .await?
                .ok_or(ServiceError::Unauthorized)?;
            let url = format!("{DRIVE_API_BASE}/files/{id}");
            let request = HttpRequest::new(HttpMethod::Delete, url).bearer_token(token.as_str());
            let response = http.execute(request).await?;
            if response.is_success() {
                Ok(())
            } else {
                Err(remote_error(&response))
            }
        });
    }
}

#[async_trait]
impl RemoteStorageService for GoogleDriveService {
    fn name(&self) -> &'static str {
        SERVICE_NAME
    }

    fn display_name(&self) -> &'static str {
        "Google Drive"
    }

    async fn prepare(&self) -> Result<()> {
        let authorized = self.credentials.has(TOKEN_KEY).await?;
        debug!(service = SERVICE_NAME, authorized, "Prepared service");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn user(&self) -> Result<Value> {
        let token = self.access_token().await?;

        let mut url = Url::parse(TOKENINFO_URL)
            .map_err(|_| ServiceError::Validation("invalid tokeninfo endpoint"))?;
        url.query_pairs_mut().append_pair("access_token", &token);

        let request = HttpRequest::new(HttpMethod::Get, url.to_string());
        let response = self.http.execute(request).await?;

        if response.is_success() {
            return serde_json::from_slice(&response.body)
                .map_err(|e| ServiceError::Parse(format!("tokeninfo: {e}")));
        }

        if response.status == 400 {
            if let Ok(body) = serde_json::from_slice::<TokenErrorBody>(&response.body) {
                if body.is_invalid_token() {
                    info!(
                        service = SERVICE_NAME,
                        "Stored access token rejected by tokeninfo"
                    );
                    return Err(ServiceError::Unauthorized);
                }
            }
        }

        Err(remote_error(&response))
    }

    #[instrument(skip(self))]
    async fn sync_data(&self) -> Result<SyncData> {
        let token = self.access_token().await?;
        let url = format!("{DRIVE_API_BASE}/files?spaces={APP_DATA_FOLDER}&fields={FILE_FIELDS}");
        let request = HttpRequest::new(HttpMethod::Get, url).bearer_token(token.as_str());
        let response = self.execute(request).await?;

        let listing: FilesListResponse = serde_json::from_slice(&response.body)
            .map_err(|e| ServiceError::Parse(format!("files list: {e}")))?;

        let plan = partition_listing(listing.files);
        debug!(
            service = SERVICE_NAME,
            scripts = plan.scripts.len(),
            deletions = plan.delete.len(),
            has_meta = plan.meta.is_some(),
            "Partitioned appDataFolder listing"
        );

        for id in plan.delete {
            self.spawn_remove(id);
        }

        let (meta, local) = tokio::try_join!(self.fetch_meta(plan.meta), self.fetch_local())?;

        info!(
            service = SERVICE_NAME,
            remote = plan.scripts.len(),
            local = local.len(),
            "Collected sync data"
        );

        Ok(SyncData {
            meta,
            remote: plan.scripts,
            local,
        })
    }

    #[instrument(skip(self))]
    async fn authorize(&self) -> Result<()> {
        let url = consent_url(&self.config)?;
        info!(service = SERVICE_NAME, "Opening authorization consent screen");
        self.tabs.open_tab(&url).await?;
        Ok(())
    }

    async fn check_auth(&self, url: &str) -> Result<bool> {
        match capture_redirect(&self.config.redirect_uri, url) {
            RedirectCapture::NotMatched => Ok(false),
            RedirectCapture::Matched { access_token } => {
                if let Some(token) = access_token {
                    self.credentials.set(TOKEN_KEY, &token).await?;
                    info!(
                        service = SERVICE_NAME,
                        "Captured access token from authorization redirect"
                    );
                    self.events
                        .emit(SyncEvent::AuthorizationCaptured {
                            service: SERVICE_NAME.to_string(),
                        })
                        .ok();
                }
                self.events
                    .emit(SyncEvent::SyncCheckRequested {
                        service: SERVICE_NAME.to_string(),
                    })
                    .ok();
                Ok(true)
            }
        }
    }

    async fn revoke(&self) -> Result<()> {
        self.credentials.delete(TOKEN_KEY).await?;
        info!(service = SERVICE_NAME, "Cleared stored access token");
        self.events
            .emit(SyncEvent::AccessRevoked {
                service: SERVICE_NAME.to_string(),
            })
            .ok();
        self.prepare().await
    }

    async fn list(&self) -> Result<Vec<RemoteFileRef>> {
        Err(ServiceError::Unsupported("list"))
    }

    async fn get(&self, file: &RemoteFileRef) -> Result<Bytes> {
        let id = file
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(ServiceError::Validation("missing file id"))?;
        self.fetch_content(id).await
    }

    #[instrument(skip(self, data), fields(uri = %item.uri))]
    async fn put(&self, item: &ScriptItem, data: &str) -> Result<Value> {
        let token = self.access_token().await?;
        let name = item_filename(item);
        let boundary = format!("usc-{}", Uuid::new_v4().simple());

        // Files created in appDataFolder must name it as parent; updates
        // must not resend parents.
        let metadata = match &item.id {
            Some(_) => json!({ "name": name }),
            None => json!({ "name": name, "parents": [APP_DATA_FOLDER] }),
        };

        let body = [
            format!("--{boundary}"),
            "Content-Type: application/json; charset=UTF-8".to_string(),
            String::new(),
            metadata.to_string(),
            format!("--{boundary}"),
            "Content-Type: text/plain".to_string(),
            String::new(),
            data.to_string(),
            format!("--{boundary}--"),
            String::new(),
        ]
        .join("\r\n");

        let (method, url) = match &item.id {
            Some(id) => (
                HttpMethod::Patch,
                format!("{UPLOAD_API_BASE}/files/{id}?uploadType=multipart"),
            ),
            None => (
                HttpMethod::Post,
                format!("{UPLOAD_API_BASE}/files?uploadType=multipart"),
            ),
        };

        let request = HttpRequest::new(method, url)
            .bearer_token(token.as_str())
            .header(
                "Content-Type",
                format!("multipart/related; boundary={boundary}"),
            )
            .body(Bytes::from(body));

        let response = self.execute(request).await?;
        serde_json::from_slice(&response.body)
            .map_err(|e| ServiceError::Parse(format!("upload response: {e}")))
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let token = self.access_token().await?;
        let url = format!("{DRIVE_API_BASE}/files/{id}");
        let request = HttpRequest::new(HttpMethod::Delete, url).bearer_token(token.as_str());
        self.execute(request).await?;
        Ok(())
    }
}

/// Map a non-success response to the remote error tag, keeping the raw body.
fn remote_error(response: &HttpResponse) -> ServiceError {
    ServiceError::Remote {
        status: response.status,
        body: response.text().unwrap_or_default(),
    }
}

/// Outcome of partitioning a listing snapshot.
#[derive(Debug, Default)]
struct ListingPlan {
    /// Script files surviving normalization, in listing order.
    scripts: Vec<RemoteFileRef>,
    /// The authoritative metadata file; first occurrence wins.
    meta: Option<DriveFile>,
    /// Ids scheduled for best-effort deletion.
    delete: Vec<String>,
}

/// Partition one listing snapshot.
///
/// Script-named files with content are kept in listing order; the first
/// file bearing the reserved metadata name becomes authoritative; every
/// other entry (unrecognized names, duplicate metadata files, zero-size
/// scripts) is scheduled for deletion.
fn partition_listing(files: Vec<DriveFile>) -> ListingPlan {
    let mut plan = ListingPlan::default();

    for file in files {
        if is_script_filename(&file.name) {
            let size = file.size_bytes();
            if size == 0 {
                // Zero-size script files are corrupt or incomplete uploads.
                plan.delete.push(file.id);
                continue;
            }
            plan.scripts.push(RemoteFileRef {
                uri: uri_from_filename(&file.name),
                id: Some(file.id),
                size,
            });
        } else if plan.meta.is_none() && file.name == META_FILENAME {
            plan.meta = Some(file);
        } else {
            plan.delete.push(file.id);
        }
    }

    plan
}
