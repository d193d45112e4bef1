use crate::models::*;
use crate::services::TournamentService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/events/{event_id}/rounds",
    tag = "tournament",
    params(
        ("event_id" = i64, Path, description = "Event id")
    ),
    request_body = CreateRoundRequest,
    responses(
        (status = 201, description = "Round created", body = RoundResponse),
        (status = 400, description = "Invalid round", body = ApiError)
    )
)]
pub async fn create_round(
    tournament_service: web::Data<TournamentService>,
    path: web::Path<i64>,
    request: web::Json<CreateRoundRequest>,
) -> Result<HttpResponse> {
    match tournament_service
        .create_round(path.into_inner(), request.into_inner())
        .await
    {
        Ok(round) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": round
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/rounds/{id}",
    tag = "tournament",
    params(
        ("id" = i64, Path, description = "Round id")
    ),
    responses(
        (status = 200, description = "Round with matches and points", body = RoundSummaryResponse),
        (status = 404, description = "Round not found", body = ApiError)
    )
)]
pub async fn get_round(
    tournament_service: web::Data<TournamentService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match tournament_service.get_round_summary(path.into_inner()).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": summary
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/rounds/{id}/status",
    tag = "tournament",
    params(
        ("id" = i64, Path, description = "Round id")
    ),
    request_body = UpdateRoundStatusRequest,
    responses(
        (status = 200, description = "Round status updated", body = RoundResponse),
        (status = 404, description = "Round not found", body = ApiError)
    )
)]
pub async fn update_round_status(
    tournament_service: web::Data<TournamentService>,
    path: web::Path<i64>,
    request: web::Json<UpdateRoundStatusRequest>,
) -> Result<HttpResponse> {
    match tournament_service
        .set_round_status(path.into_inner(), request.status)
        .await
    {
        Ok(round) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": round
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/rounds/{id}/matches",
    tag = "tournament",
    params(
        ("id" = i64, Path, description = "Round id")
    ),
    request_body = CreateMatchRequest,
    responses(
        (status = 201, description = "Match created", body = MatchResponse),
        (status = 400, description = "Invalid pairing", body = ApiError),
        (status = 404, description = "Round not found", body = ApiError)
    )
)]
pub async fn create_match(
    tournament_service: web::Data<TournamentService>,
    path: web::Path<i64>,
    request: web::Json<CreateMatchRequest>,
) -> Result<HttpResponse> {
    match tournament_service
        .create_match(path.into_inner(), request.into_inner())
        .await
    {
        Ok(game) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": game
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/matches/{id}",
    tag = "tournament",
    params(
        ("id" = i64, Path, description = "Match id")
    ),
    responses(
        (status = 200, description = "Match with derived points", body = MatchResponse),
        (status = 404, description = "Match not found", body = ApiError)
    )
)]
pub async fn get_match(
    tournament_service: web::Data<TournamentService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match tournament_service.get_match(path.into_inner()).await {
        Ok(game) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": game
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/matches/{id}/status",
    tag = "tournament",
    params(
        ("id" = i64, Path, description = "Match id")
    ),
    request_body = UpdateMatchStatusRequest,
    responses(
        (status = 200, description = "Match status updated", body = MatchResponse),
        (status = 404, description = "Match not found", body = ApiError),
        (status = 409, description = "Result must be cleared first", body = ApiError)
    )
)]
pub async fn update_match_status(
    tournament_service: web::Data<TournamentService>,
    path: web::Path<i64>,
    request: web::Json<UpdateMatchStatusRequest>,
) -> Result<HttpResponse> {
    match tournament_service
        .set_match_status(path.into_inner(), request.status)
        .await
    {
        Ok(game) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": game
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/matches/{id}/result",
    tag = "tournament",
    params(
        ("id" = i64, Path, description = "Match id")
    ),
    request_body = SetMatchResultRequest,
    responses(
        (status = 200, description = "Result recorded", body = MatchResponse),
        (status = 404, description = "Match not found", body = ApiError),
        (status = 409, description = "Match is not completed", body = ApiError)
    )
)]
pub async fn set_match_result(
    tournament_service: web::Data<TournamentService>,
    path: web::Path<i64>,
    request: web::Json<SetMatchResultRequest>,
) -> Result<HttpResponse> {
    match tournament_service
        .set_match_result(path.into_inner(), request.result)
        .await
    {
        Ok(game) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": game
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/matches/{id}/result",
    tag = "tournament",
    params(
        ("id" = i64, Path, description = "Match id")
    ),
    responses(
        (status = 200, description = "Result cleared", body = MatchResponse),
        (status = 404, description = "Match not found", body = ApiError)
    )
)]
pub async fn clear_match_result(
    tournament_service: web::Data<TournamentService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match tournament_service
        .clear_match_result(path.into_inner())
        .await
    {
        Ok(game) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": game
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn tournament_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/events/{event_id}/rounds", web::post().to(create_round))
        .service(
            web::scope("/rounds")
                .route("/{id}", web::get().to(get_round))
                .route("/{id}/status", web::put().to(update_round_status))
                .route("/{id}/matches", web::post().to(create_match)),
        )
        .service(
            web::scope("/matches")
                .route("/{id}", web::get().to(get_match))
                .route("/{id}/status", web::put().to(update_match_status))
                .service(
                    web::resource("/{id}/result")
                        .route(web::put().to(set_match_result))
                        .route(web::delete().to(clear_match_result)),
                ),
        );
}
