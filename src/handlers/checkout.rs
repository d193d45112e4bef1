use crate::models::*;
use crate::services::CheckoutService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/checkout",
    tag = "checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 404, description = "Unknown coupon code", body = ApiError),
        (status = 422, description = "Coupon rejected", body = ApiError)
    )
)]
pub async fn checkout(
    checkout_service: web::Data<CheckoutService>,
    request: web::Json<CheckoutRequest>,
) -> Result<HttpResponse> {
    match checkout_service.checkout(request.into_inner()).await {
        Ok(payment) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "data": payment
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn checkout_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/checkout", web::post().to(checkout));
}
