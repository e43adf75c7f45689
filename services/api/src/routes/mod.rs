//! API service routes
//!
//! Public routes cover registration, login, email verification, user
//! search, and read-only views of a user's public content. Everything
//! else sits behind the token middleware.

use axum::{
    Json, Router, middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;

use crate::{middleware::auth_middleware, state::AppState};

pub mod auth;
pub mod cards;
pub mod decks;
pub mod friends;
pub mod study_sets;
pub mod users;
pub mod xp;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/decks", post(decks::create_deck))
        .route("/decks/:deck_uuid", get(decks::get_deck))
        .route("/decks/:deck_uuid", delete(decks::delete_deck))
        .route("/decks/:deck_uuid/cards", post(cards::create_card))
        .route("/decks/:deck_uuid/cards", get(cards::get_deck_cards))
        .route("/decks/:deck_uuid/labels", post(decks::add_deck_label))
        .route("/cards/:card_uuid", put(cards::update_card))
        .route("/cards/:card_uuid", delete(cards::delete_card))
        .route("/study_sets", post(study_sets::create_study_set))
        .route(
            "/study_sets/:study_set_uuid",
            delete(study_sets::delete_study_set),
        )
        .route(
            "/study_sets/:study_set_uuid/decks",
            post(study_sets::add_study_set_deck),
        )
        .route(
            "/study_sets/:study_set_uuid/labels",
            post(study_sets::add_study_set_label),
        )
        .route(
            "/study_sets/:study_set_uuid/invites",
            post(study_sets::invite_to_study_set),
        )
        .route(
            "/study_sets/:study_set_uuid/invites/:user_uuid",
            delete(study_sets::remove_study_set_invite),
        )
        .route("/friend_requests", post(friends::send_friend_request))
        .route("/friend_requests", get(friends::get_friend_requests))
        .route(
            "/friend_requests/:friend_request_uuid/accept",
            post(friends::accept_friend_request),
        )
        .route(
            "/friend_requests/:friend_request_uuid",
            delete(friends::delete_friend_request),
        )
        .route("/xp", post(xp::submit_xp))
        .route("/xp", get(xp::get_own_xp))
        .route("/leaderboard", get(xp::get_leaderboard))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/verify_email/:user_uuid", get(auth::verify_email))
        .route("/users/search", get(users::search_users))
        .route("/users/:user_uuid/decks", get(users::get_user_decks))
        .route(
            "/users/:user_uuid/study_sets",
            get(users::get_user_study_sets),
        )
        .route("/users/:user_uuid/xp", get(users::get_user_xp))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "api-service"
    }))
}
