use super::GameEngine;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use gfl_auth::Auth;
use gfl_board::Faction;
use gfl_engine::GameError;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct JoinRequest {
    pub faction: Faction,
}

fn rejected(e: GameError) -> HttpResponse {
    match e {
        GameError::OutOfBounds(_) | GameError::ColumnDisabled(_) | GameError::ColumnFull(_) => {
            HttpResponse::BadRequest().body(e.to_string())
        }
        GameError::AlreadyQueued | GameError::NotPlaying | GameError::Unbalanced(_) => {
            HttpResponse::Conflict().body(e.to_string())
        }
        GameError::UnknownUser(_) => HttpResponse::Unauthorized().body(e.to_string()),
        GameError::Storage(_) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

/// Joins the caller to a faction and marks them active.
pub async fn join(
    engine: web::Data<GameEngine>,
    auth: Auth,
    req: web::Json<JoinRequest>,
) -> impl Responder {
    match engine.start_playing(auth.user(), req.faction) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "playing",
            "faction": req.faction,
        })),
        Err(e) => rejected(e),
    }
}

/// Removes the caller from the active-player registry.
pub async fn leave(engine: web::Data<GameEngine>, auth: Auth) -> impl Responder {
    engine.stop_playing(auth.user());
    HttpResponse::Ok().json(serde_json::json!({ "status": "left" }))
}

/// Queues a placement into the given column.
pub async fn place(
    engine: web::Data<GameEngine>,
    auth: Auth,
    path: web::Path<usize>,
) -> impl Responder {
    let column = path.into_inner();
    match engine.place_piece(auth.user(), column) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "queued",
            "column": column,
        })),
        Err(e) => rejected(e),
    }
}
