//! Server harness and shared world for HTTP behaviour tests.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` ensures the server
//! is stopped even if a test panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::{HttpServer, web};
use cap_std::{ambient_authority, fs::Dir};
use goloyal::inbound::http::frontend::FrontendAssets;
use goloyal::inbound::http::health::HealthState;
use goloyal::outbound::memory::InMemoryStore;
use goloyal::server::{AppDependencies, RuntimeMode, build_app, build_http_state};
use rstest::fixture;
use serde_json::Value;
use tempfile::TempDir;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

pub(crate) const INDEX_HTML: &str = "<!doctype html><title>GoLoyal</title>";

/// Last HTTP exchange observed by a step.
#[derive(Debug, Default)]
pub(crate) struct LastResponse {
    pub(crate) status: u16,
    pub(crate) body: Option<Value>,
    pub(crate) text: String,
    pub(crate) content_type: Option<String>,
    pub(crate) trace_id: Option<String>,
}

pub(crate) struct HttpWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) _site: TempDir,
    pub(crate) last: Option<LastResponse>,
    pub(crate) submitted_ids: Vec<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<HttpWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

pub(crate) fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we hold the
    // world borrow while calling `block_on`. The future must not borrow it.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

fn write_site() -> TempDir {
    let site = TempDir::new().expect("temp site dir");
    let dir = Dir::open_ambient_dir(site.path(), ambient_authority()).expect("open site dir");
    dir.write("index.html", INDEX_HTML).expect("write index");
    dir.create_dir("assets").expect("create assets dir");
    dir.write("assets/site.css", "body { margin: 0; }")
        .expect("write stylesheet");
    site
}

async fn spawn_server(site: &TempDir) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let store = Arc::new(InMemoryStore::default());
    let frontend = FrontendAssets::open(site.path());
    let health_state = web::Data::new(HealthState::new(store.clone(), frontend.is_available()));
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: web::Data::new(build_http_state(store)),
        frontend: web::Data::new(frontend),
        runtime_mode: RuntimeMode::Production,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .disable_signals()
        .workers(1)
        .listen(listener)
        .map_err(|err| err.to_string())?
        .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);
    health_state.mark_listening();

    Ok((format!("http://{addr}"), handle))
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();
    let site = write_site();

    let (base_url, server) = local
        .block_on(&runtime, spawn_server(&site))
        .expect("server starts");

    WorldFixture {
        world: Rc::new(RefCell::new(HttpWorld {
            runtime,
            local,
            base_url,
            server,
            _site: site,
            last: None,
            submitted_ids: Vec::new(),
        })),
    }
}
