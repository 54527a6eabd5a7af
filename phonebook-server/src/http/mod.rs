use crate::config::Config;
use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use hyper::{Request, body::Incoming};
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server,
};
use log::{error, info};
use tower_http::cors::CorsLayer;
use tower_service::Service;

mod admin;
mod change_password;
mod contacts;
mod extract;
mod failure;
mod groups;
mod login;
mod logout;
mod middleware;
mod pages;
mod password_reset;
mod profile;
mod register;
mod sessions;
mod state;

pub use failure::Failure;
pub use sessions::Sessions;
pub use state::AppState;

/// Every page and API route, without CORS
pub fn router(state: AppState) -> Router {
    let authentication =
        from_fn_with_state(state.clone(), middleware::authentication::authentication);

    let public_routes = Router::new()
        .route("/register", post(register::register))
        .route("/login", post(login::login))
        .route("/admin/login", post(login::admin_login))
        .route("/security-question", get(password_reset::security_question))
        .route(
            "/verify-security-answer",
            post(password_reset::verify_security_answer),
        )
        .route("/reset-password", post(password_reset::reset_password));

    let owner_routes = Router::new()
        .route("/logout", post(logout::logout))
        .route(
            "/profile",
            get(profile::profile).put(profile::update_profile),
        )
        .route("/change-password", post(change_password::change_password))
        .route(
            "/contacts",
            get(contacts::list)
                .post(contacts::add)
                .delete(contacts::delete_all),
        )
        .route("/contacts/groups", get(contacts::groups))
        .route("/contacts/stats", get(contacts::stats))
        .route("/contacts/sort", post(contacts::sort))
        .route(
            "/contacts/{id}",
            get(contacts::get)
                .put(contacts::update)
                .patch(contacts::update_partial)
                .delete(contacts::delete),
        )
        .route("/contacts/{id}/group", post(contacts::assign_group))
        .route(
            "/groups",
            get(groups::list).post(groups::add).delete(groups::delete_all),
        )
        .route("/groups/names", get(groups::names))
        .route("/groups/stats", get(groups::stats))
        .route(
            "/groups/{id}",
            get(groups::get).put(groups::update).delete(groups::delete),
        )
        .route_layer(authentication.clone());

    let admin_routes = Router::new()
        .route("/admin/users", get(admin::users))
        .route(
            "/admin/users/{username}",
            get(admin::user).delete(admin::delete_user),
        )
        .route(
            "/admin/users/{username}/password",
            post(admin::update_user_password),
        )
        .route("/admin/stats", get(admin::stats))
        .route("/admin/admins", get(admin::admins))
        .route("/admin/register", post(admin::register))
        .route_layer(from_fn(middleware::authentication::admin_only))
        .route_layer(authentication);

    let api_routes = public_routes.merge(owner_routes).merge(admin_routes);

    Router::new()
        .route("/", get(pages::index))
        .route("/contacts", get(pages::contacts))
        .route("/admin", get(pages::admin))
        .nest("/api", api_routes)
        .with_state(state)
}

fn cors(frontend_url: &str) -> Option<CorsLayer> {
    let origin = match frontend_url.parse::<HeaderValue>() {
        Ok(origin) => origin,
        Err(error) => {
            error!("Could not convert FRONTEND_URL to header, CORS disabled: {error}");
            return None;
        }
    };

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
            .allow_credentials(true),
    )
}

/// Serves [`router`] with hyper until the process ends
pub async fn listen(state: AppState, config: &Config) {
    let mut app = router(state);
    if let Some(cors) = config.frontend_url.as_deref().and_then(cors) {
        app = app.layer(cors);
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Could not bind HTTP server");

    info!("HTTP server listening on {}", config.bind_addr);

    loop {
        let (socket, _remote_addr) = match listener.accept().await {
            Ok(listener) => listener,
            Err(error) => {
                error!("Could not get socket from accepted HTTP connection: {error}");
                continue;
            }
        };

        let tower_service = app.clone();
        tokio::spawn(async move {
            let socket = TokioIo::new(socket);
            let hyper_service = hyper::service::service_fn(move |request: Request<Incoming>| {
                tower_service.clone().call(request)
            });

            let builder = server::conn::auto::Builder::new(TokioExecutor::new());
            if let Err(err) = builder
                .serve_connection_with_upgrades(socket, hyper_service)
                .await
            {
                error!("Failed to serve connection: {err:#}");
            }
        });
    }
}
