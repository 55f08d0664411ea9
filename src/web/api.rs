//! Defines the Axum routes and handlers for the client portal and admin pages.

use crate::config::Config;
use crate::hardware::GpioPin;
use crate::web::models::{AdminStatusResponse, LoginForm, VoucherForm};
use crate::web::pages;
use crate::web::sessions::{SessionStore, SESSION_COOKIE};
use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use piso_shared::board_config::BoardConfig;
use piso_shared::hardware_traits::PinController;
use piso_shared::{AuthBackend, InMemoryAuthBackend};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

fn text_error(message: &'static str, status: StatusCode) -> Response {
    (status, message).into_response()
}

/// 302 Found to `location`.
fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

pub struct AppStateInner {
    pub board: &'static BoardConfig,
    pub gpio: Arc<dyn PinController>,
    /// Single writer for the relay line. The guard travels with the blocking
    /// write so a dropped request cannot release it early.
    pub relay_lock: Arc<Mutex<()>>,
    pub auth_backend: Box<dyn AuthBackend>,
    pub sessions: SessionStore,
    pub template_dir: PathBuf,
}
pub type AppState = Arc<AppStateInner>;

impl AppStateInner {
    pub fn new(
        board: &'static BoardConfig,
        gpio: Arc<dyn PinController>,
        auth_backend: Box<dyn AuthBackend>,
        sessions: SessionStore,
        template_dir: PathBuf,
    ) -> Self {
        Self {
            board,
            gpio,
            relay_lock: Arc::new(Mutex::new(())),
            auth_backend,
            sessions,
            template_dir,
        }
    }

    /// State for a detected board, with operator credentials and paths from `config`.
    pub fn from_config(config: &Config, board: &'static BoardConfig, gpio: Arc<dyn PinController>) -> Self {
        let ttl = config
            .admin
            .session_ttl_secs
            .and_then(|secs| chrono::TimeDelta::try_seconds(i64::try_from(secs).ok()?));
        Self::new(
            board,
            gpio,
            Box::new(InMemoryAuthBackend::single(
                config.admin.username.clone(),
                config.admin.password.clone(),
            )),
            SessionStore::new(ttl),
            config.web.template_dir.clone(),
        )
    }

    fn is_admin(&self, jar: &CookieJar) -> bool {
        jar.get(SESSION_COOKIE)
            .is_some_and(|cookie| self.sessions.is_active(cookie.value()))
    }

    async fn page_or(&self, template: &str, fallback: impl FnOnce() -> String) -> Html<String> {
        match pages::load_template(&self.template_dir, template).await {
            Some(body) => Html(body),
            None => Html(fallback()),
        }
    }
}

/// Creates the Axum router with the portal and admin endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(client_portal))
        .route("/voucher", post(submit_voucher))
        .route("/insert-coin", post(insert_coin))
        .route("/admin", get(admin_portal))
        .route("/admin/login", get(admin_login_form).post(admin_login))
        .route("/admin/logout", get(admin_logout).post(admin_logout))
        .route("/admin/status", get(admin_status))
        .with_state(state)
}

/// GET /
async fn client_portal(State(state): State<AppState>) -> Html<String> {
    let board = state.board;
    state
        .page_or(pages::CLIENT_PORTAL_TEMPLATE, || pages::client_portal(board))
        .await
}

/// POST /voucher
async fn submit_voucher(form: Result<Form<VoucherForm>, FormRejection>) -> Response {
    let Ok(Form(form)) = form else {
        return text_error("invalid form", StatusCode::BAD_REQUEST);
    };
    tracing::info!("Voucher submitted ({} chars)", form.code.len());
    Html(pages::voucher_submitted(&form.code)).into_response()
}

/// POST /insert-coin - energize the relay for a coin event.
async fn insert_coin(State(state): State<AppState>) -> Response {
    let pin = GpioPin::relay(state.board);
    let relay = Arc::clone(&state.relay_lock).lock_owned().await;
    let gpio = Arc::clone(&state.gpio);
    let write = tokio::task::spawn_blocking(move || {
        let _relay = relay;
        pin.write(gpio.as_ref(), true)
    });
    match write.await {
        Ok(Ok(())) => {
            tracing::info!("Coin registered on {}; relay pin {} active", state.board.id, pin.number);
            Html(pages::coin_registered(state.board)).into_response()
        }
        Ok(Err(e)) => {
            tracing::error!("Relay write failed: {}", e);
            text_error("relay unavailable", StatusCode::INTERNAL_SERVER_ERROR)
        }
        Err(e) => {
            tracing::error!("Relay task failed: {}", e);
            text_error("relay unavailable", StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /admin
async fn admin_portal(State(state): State<AppState>, jar: CookieJar) -> Response {
    if !state.is_admin(&jar) {
        return found("/admin/login");
    }
    let board = state.board;
    state
        .page_or(pages::ADMIN_TEMPLATE, || pages::admin_portal(board))
        .await
        .into_response()
}

/// GET /admin/status
async fn admin_status(State(state): State<AppState>, jar: CookieJar) -> Response {
    if !state.is_admin(&jar) {
        return text_error("unauthorized", StatusCode::UNAUTHORIZED);
    }
    Json(AdminStatusResponse { board: state.board }).into_response()
}

/// GET /admin/login
async fn admin_login_form(State(state): State<AppState>) -> Html<String> {
    state
        .page_or(pages::ADMIN_LOGIN_TEMPLATE, pages::admin_login)
        .await
}

/// POST /admin/login
async fn admin_login(
    State(state): State<AppState>,
    jar: CookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Response {
    let Ok(Form(form)) = form else {
        return text_error("invalid form", StatusCode::BAD_REQUEST);
    };
    if !state.auth_backend.validate(&form.username, &form.password).await {
        tracing::warn!("Rejected admin login for '{}'", form.username);
        return text_error("unauthorized", StatusCode::UNAUTHORIZED);
    }
    let token = state.sessions.create();
    tracing::info!("Admin '{}' signed in", form.username);
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), found("/admin")).into_response()
}

/// GET|POST /admin/logout
async fn admin_logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if state.sessions.revoke(cookie.value()) {
            tracing::info!("Admin signed out");
        }
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, found("/admin/login")).into_response()
}
