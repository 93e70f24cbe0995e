mod domain;
mod clients;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod user_actor;
mod analytics;
mod api;
mod directory;
mod fixtures;
mod session;

use axum::body::Body;
use axum::http::{Request, StatusCode, Uri};
use axum::Router;
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use tracing::{info, warn, Instrument};
use crate::app_system::{setup_tracing, AppError, PortalSettings, PortalSystem};
use crate::directory::{DirectoryController, StatusFilter};
use crate::domain::Status;
use crate::session::{DetailMode, FileSessionStore, LenientStore, Permissions, SessionContext};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let settings = PortalSettings::load()?;
    setup_tracing(&settings.log_filter);

    info!(users = settings.user_count, seed = settings.seed, "Starting school portal");

    // Seeds and starts the user store
    let system = PortalSystem::new(&settings, Utc::now());

    let session = SessionContext::load(LenientStore::new(FileSessionStore::new(&settings.session_dir)))?;
    let permissions = Permissions::for_user(session.user());

    let span = tracing::info_span!("directory");
    async {
        let mut directory = DirectoryController::new(system.user_client.clone(), permissions);
        let total = directory.load().await?;

        if let Err(e) = directory.set_page_size(settings.page_size) {
            warn!(error = %e, "Keeping default page size");
        }
        directory.set_status_filter(StatusFilter::Only(Status::Invited));

        let view = directory.view();
        info!(total, invited = view.total(), page = view.page(), pages = view.page_count(), "Directory loaded");
        for user in view.page_rows() {
            info!(user_id = %user.id, name = %user.full_name(), roles = %user.roles_label(), "Invited");
        }

        if permissions.can_edit() {
            directory.toggle_page(true);
            let outcome = directory.bulk_set_status(Status::Active).await?;
            info!(updated = outcome.updated, "Activated invited users on the first page");
        }

        Ok::<(), AppError>(())
    }
    .instrument(span)
    .await?;

    let uri = Uri::from_static("/api/users/1?mode=edit");
    let mode = DetailMode::from_uri(&uri, &permissions);
    let (status, _) = get_json(&system.api, uri).await?;
    info!(%status, ?mode, "Opened user detail");

    for path in ["/api/analytics/registrations", "/api/analytics/users-by-role"] {
        match get_json(&system.api, Uri::from_static(path)).await? {
            (status, Some(body)) if status.is_success() => info!(path, %body, "Analytics"),
            (status, _) => warn!(path, %status, "Analytics request failed"),
        }
    }

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

/// Sends a GET through the router and decodes the JSON body, if any.
async fn get_json(api: &Router, uri: Uri) -> Result<(StatusCode, Option<Value>), AppError> {
    let request = Request::get(uri).body(Body::empty())?;
    let response = api.clone().oneshot(request).await.unwrap_or_else(|e| match e {});
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { None } else { Some(serde_json::from_slice(&bytes)?) };
    Ok((status, body))
}
