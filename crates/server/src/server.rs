use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use std::sync::Arc;

use crate::{Notifier, bills, cart, items, reserve, users, weddings};
use engine::{Actor, Engine};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub notifier: Notifier,
}

/// Resolves the bearer token to an [`Actor`] for the handlers.
async fn auth(
    auth_header: Option<TypedHeader<Authorization<Bearer>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(TypedHeader(Authorization(bearer))) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    if bearer.token().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user = state
        .engine
        .user_by_token(bearer.token())
        .await
        .map_err(|err| {
            tracing::error!("token lookup failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let actor = Actor {
        user_id: user.id,
        privileged: user.is_admin,
    };
    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/cart",
            post(cart::add_item).get(cart::get).delete(cart::clear),
        )
        .route(
            "/cart/{line_item_id}",
            axum::routing::patch(cart::remove_item).delete(cart::remove_item),
        )
        .route("/bills", post(bills::freeze).get(bills::list))
        .route(
            "/bills/{id}",
            get(bills::get)
                .delete(bills::delete)
                .patch(bills::restore),
        )
        .route("/reserve", post(reserve::add))
        .route("/reserve/{id}", get(reserve::get).delete(reserve::remove))
        .route("/items", post(items::item_new).get(items::list))
        .route("/items/{id}", get(items::get))
        .route("/users", get(users::list))
        .route("/weddings", post(weddings::wedding_new).get(weddings::list))
        .route(
            "/weddings/{id}",
            get(weddings::get)
                .patch(weddings::update)
                .delete(weddings::delete),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

/// The full application router, authentication included.
pub fn app(engine: Engine, notifier: Notifier) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
        notifier,
    })
}

pub async fn run(engine: Engine, notifier: Notifier, addr: &str) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, notifier, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    notifier: Notifier,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine, notifier)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    notifier: Notifier,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, notifier, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
