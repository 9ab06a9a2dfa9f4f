//! Static single-page frontend.
//!
//! Files are served from a capability-scoped directory so requests cannot
//! escape it. Any GET that does not match a file falls back to `index.html`
//! so client-side routes resolve. Unknown `/api` paths never fall back; they
//! get the JSON not-found envelope instead.

use std::path::Path;
use std::sync::Arc;

use actix_web::http::{Method, header};
use actix_web::{HttpRequest, HttpResponse, web};
use cap_std::{ambient_authority, fs::Dir};
use tracing::{debug, warn};

use crate::domain::Error;
use crate::inbound::http::ApiResult;

const INDEX_FILE: &str = "index.html";

/// Message returned for unknown API paths and missing assets.
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// Handle to the built frontend directory.
#[derive(Clone, Default)]
pub struct FrontendAssets {
    root: Option<Arc<Dir>>,
}

impl FrontendAssets {
    /// Open `path`, logging a warning and serving nothing if it is absent.
    pub fn open(path: &Path) -> Self {
        match Dir::open_ambient_dir(path, ambient_authority()) {
            Ok(dir) => {
                if !dir.exists(INDEX_FILE) {
                    warn!(
                        static_dir = %path.display(),
                        "frontend directory has no {INDEX_FILE}; client routes will return 404"
                    );
                }
                Self::from_dir(dir)
            }
            Err(error) => {
                warn!(
                    static_dir = %path.display(),
                    %error,
                    "frontend directory unavailable; non-API paths will return 404"
                );
                Self::default()
            }
        }
    }

    /// Serve from an already-opened directory.
    pub fn from_dir(dir: Dir) -> Self {
        Self {
            root: Some(Arc::new(dir)),
        }
    }

    /// `true` when a frontend directory was opened.
    pub fn is_available(&self) -> bool {
        self.root.is_some()
    }
}

struct Asset {
    body: Vec<u8>,
    content_type: String,
}

fn read_asset(dir: &Dir, relative: &str) -> Option<Asset> {
    let is_file = dir
        .metadata(relative)
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !is_file {
        return None;
    }
    let body = dir.read(relative).ok()?;
    let content_type = mime_guess::from_path(relative)
        .first_or_octet_stream()
        .essence_str()
        .to_owned();
    Some(Asset { body, content_type })
}

fn resolve(dir: &Dir, request_path: &str) -> Option<Asset> {
    let relative = request_path.trim_start_matches('/');
    let traverses = relative.split('/').any(|segment| segment == "..");
    if !relative.is_empty() && !traverses {
        if let Some(asset) = read_asset(dir, relative) {
            return Some(asset);
        }
    }
    read_asset(dir, INDEX_FILE)
}

fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

/// Default service: static files, SPA fallback, and JSON 404s for `/api`.
pub async fn serve_frontend(
    req: HttpRequest,
    assets: web::Data<FrontendAssets>,
) -> ApiResult<HttpResponse> {
    let path = req.path().to_owned();
    if is_api_path(&path) {
        return Err(Error::not_found(NOT_FOUND_MESSAGE));
    }
    if !matches!(*req.method(), Method::GET | Method::HEAD) {
        return Err(Error::not_found(NOT_FOUND_MESSAGE));
    }
    let Some(dir) = assets.root.clone() else {
        return Err(Error::not_found(NOT_FOUND_MESSAGE));
    };

    let lookup_path = path.clone();
    let asset = web::block(move || resolve(&dir, &lookup_path))
        .await
        .map_err(|err| {
            Error::internal("Failed to read frontend asset").with_internal_detail(err.to_string())
        })?;

    match asset {
        Some(asset) => {
            debug!(path = %path, content_type = %asset.content_type, "serving frontend asset");
            let mut response = HttpResponse::Ok();
            response.insert_header((header::CONTENT_TYPE, asset.content_type));
            if *req.method() == Method::HEAD {
                Ok(response.finish())
            } else {
                Ok(response.body(asset.body))
            }
        }
        None => Err(Error::not_found(NOT_FOUND_MESSAGE)),
    }
}
