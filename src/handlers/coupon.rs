use crate::models::*;
use crate::services::CouponService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/coupons",
    tag = "coupon",
    request_body = CreateCouponRequest,
    responses(
        (status = 201, description = "Coupon created", body = CouponResponse),
        (status = 400, description = "Invalid coupon data", body = ApiError)
    )
)]
pub async fn create_coupon(
    coupon_service: web::Data<CouponService>,
    request: web::Json<CreateCouponRequest>,
) -> Result<HttpResponse> {
    match coupon_service.create_coupon(request.into_inner()).await {
        Ok(coupon) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": coupon
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/coupons/{id}",
    tag = "coupon",
    params(
        ("id" = i64, Path, description = "Coupon id")
    ),
    responses(
        (status = 200, description = "Coupon found", body = CouponResponse),
        (status = 404, description = "Coupon not found", body = ApiError)
    )
)]
pub async fn get_coupon(
    coupon_service: web::Data<CouponService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match coupon_service.get_coupon(path.into_inner()).await {
        Ok(coupon) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": coupon
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// A rejected coupon is still a 200; the verdict carries the reason
#[utoipa::path(
    post,
    path = "/coupons/quote",
    tag = "coupon",
    request_body = CouponQuoteRequest,
    responses(
        (status = 200, description = "Quote computed", body = CouponQuoteResponse),
        (status = 400, description = "Invalid purchase amount", body = ApiError),
        (status = 404, description = "Unknown coupon code", body = ApiError)
    )
)]
pub async fn quote_coupon(
    coupon_service: web::Data<CouponService>,
    request: web::Json<CouponQuoteRequest>,
) -> Result<HttpResponse> {
    match coupon_service.quote(request.into_inner()).await {
        Ok(quote) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": quote
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn coupon_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/coupons")
            .route("", web::post().to(create_coupon))
            .route("/quote", web::post().to(quote_coupon))
            .route("/{id}", web::get().to(get_coupon)),
    );
}
