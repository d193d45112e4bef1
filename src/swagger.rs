use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{CouponScope, CouponType, MatchResult, MatchStatus, RoundStatus};
use crate::handlers;
use crate::models::*;
use crate::rules::{CouponRejection, CouponVerdict, Side};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::coupon::create_coupon,
        handlers::coupon::get_coupon,
        handlers::coupon::quote_coupon,
        handlers::checkout::checkout,
        handlers::tournament::create_round,
        handlers::tournament::get_round,
        handlers::tournament::update_round_status,
        handlers::tournament::create_match,
        handlers::tournament::get_match,
        handlers::tournament::update_match_status,
        handlers::tournament::set_match_result,
        handlers::tournament::clear_match_result,
    ),
    components(
        schemas(
            CreateCouponRequest,
            CouponResponse,
            CouponQuoteRequest,
            CouponQuoteResponse,
            CouponType,
            CouponScope,
            CouponVerdict,
            CouponRejection,
            CheckoutRequest,
            PaymentResponse,
            CreateRoundRequest,
            UpdateRoundStatusRequest,
            RoundResponse,
            RoundSummaryResponse,
            RoundStatus,
            CreateMatchRequest,
            UpdateMatchStatusRequest,
            SetMatchResultRequest,
            MatchResponse,
            MatchStatus,
            MatchResult,
            Side,
            ApiError,
        )
    ),
    tags(
        (name = "coupon", description = "Coupon administration and quotes"),
        (name = "checkout", description = "Course checkout with coupon redemption"),
        (name = "tournament", description = "Tournament rounds, matches and scoring"),
    ),
    info(
        title = "Chess Club Backend API",
        version = "1.0.0",
        description = "Coupon evaluation and tournament scoring REST API"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
