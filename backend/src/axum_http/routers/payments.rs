use crate::auth::AuthUser;
use crate::axum_http::api_response;
use crate::config::config_model::DotEnvyConfig;
use crate::usecases::payments::{
    PaymentUseCase, PaymentWorkflowConfig, TossGateway,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
};
use chanolja::{
    domain::{
        repositories::{
            branches::BranchRepository, payments::PaymentRepository,
            reservations::ReservationRepository, vehicles::VehicleRepository,
        },
        value_objects::{
            enums::payment_methods::PaymentMethod, split::SplitRatio, webhook::TossWebhookEvent,
        },
    },
    infra::supabase::{
        repositories::{
            branches::BranchSupabase, payments::PaymentSupabase,
            reservations::ReservationSupabase, vehicles::VehicleSupabase,
        },
        rest_client::SupabaseRestClient,
    },
    payments::toss_client::TossClient,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct RequestPaymentBody {
    pub reservation_id: Uuid,
    pub payment_method: PaymentMethod,
    pub bank: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmPaymentBody {
    #[serde(rename = "paymentKey")]
    pub payment_key: String,
    #[serde(rename = "orderId")]
    pub order_id: String,
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
pub struct RefundBody {
    pub payment_id: Uuid,
    pub refund_amount: Option<i64>,
    pub refund_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VirtualAccountBody {
    pub payment_id: Uuid,
    pub bank: String,
}

#[derive(Debug, Deserialize)]
pub struct VirtualAccountQuery {
    pub payment_id: Uuid,
}

pub fn routes(supabase: Arc<SupabaseRestClient>, config: Arc<DotEnvyConfig>) -> Router {
    let split_ratio = SplitRatio::new(config.settlement.branch_split_percent).unwrap_or_else(|err| {
        warn!(
            branch_split_percent = config.settlement.branch_split_percent,
            error = %err,
            "payments: invalid split percent in config, using the default"
        );
        SplitRatio::default()
    });

    let workflow_config = PaymentWorkflowConfig {
        split_ratio,
        default_submerchant_id: config.settlement.default_submerchant_id.clone(),
        hq_submerchant_id: config.settlement.hq_submerchant_id.clone(),
        webhook_secret: config.toss.webhook_secret.clone(),
        public_base_url: config.site.public_base_url.clone(),
    };

    let payments_usecase = PaymentUseCase::new(
        Arc::new(PaymentSupabase::new(Arc::clone(&supabase))),
        Arc::new(ReservationSupabase::new(Arc::clone(&supabase))),
        Arc::new(VehicleSupabase::new(Arc::clone(&supabase))),
        Arc::new(BranchSupabase::new(Arc::clone(&supabase))),
        Arc::new(TossClient::new(config.toss.secret_key.clone())),
        workflow_config,
    );

    Router::new()
        .route("/request", post(request_payment))
        .route("/confirm", post(confirm_payment))
        .route("/refund", post(refund_payment))
        .route("/webhook", post(handle_webhook))
        .route(
            "/virtual-account",
            get(get_virtual_account).post(issue_virtual_account),
        )
        .route("/:id", get(get_payment))
        .with_state(Arc::new(payments_usecase))
}

pub async fn request_payment<Pay, Res, Veh, Br, Toss>(
    State(payments_usecase): State<Arc<PaymentUseCase<Pay, Res, Veh, Br, Toss>>>,
    Json(body): Json<RequestPaymentBody>,
) -> impl IntoResponse
where
    Pay: PaymentRepository + Send + Sync + 'static,
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
    Br: BranchRepository + Send + Sync + 'static,
    Toss: TossGateway + Send + Sync + 'static,
{
    let order = match payments_usecase
        .request_payment(body.reservation_id, body.payment_method)
        .await
    {
        Ok(order) => order,
        Err(err) => return api_response::error(err.status_code(), err.to_string()),
    };

    // A virtual-account request carrying a bank gets its deposit account
    // in the same call. Issuance failure is not fatal: the order already
    // exists and the client can retry through /virtual-account.
    if body.payment_method == PaymentMethod::VirtualAccount {
        if let Some(bank) = body.bank.as_deref() {
            if let Err(err) = payments_usecase
                .issue_virtual_account(order.payment_id, bank)
                .await
            {
                warn!(
                    payment_id = %order.payment_id,
                    error = %err,
                    "payments: virtual account issue during request failed"
                );
            }
        }
    }

    api_response::ok(order).into_response()
}

pub async fn confirm_payment<Pay, Res, Veh, Br, Toss>(
    State(payments_usecase): State<Arc<PaymentUseCase<Pay, Res, Veh, Br, Toss>>>,
    Json(body): Json<ConfirmPaymentBody>,
) -> impl IntoResponse
where
    Pay: PaymentRepository + Send + Sync + 'static,
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
    Br: BranchRepository + Send + Sync + 'static,
    Toss: TossGateway + Send + Sync + 'static,
{
    match payments_usecase
        .confirm_payment(&body.payment_key, &body.order_id, body.amount)
        .await
    {
        Ok(payment) => api_response::ok_with_message(payment, "결제가 완료되었습니다").into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

pub async fn get_payment<Pay, Res, Veh, Br, Toss>(
    State(payments_usecase): State<Arc<PaymentUseCase<Pay, Res, Veh, Br, Toss>>>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse
where
    Pay: PaymentRepository + Send + Sync + 'static,
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
    Br: BranchRepository + Send + Sync + 'static,
    Toss: TossGateway + Send + Sync + 'static,
{
    match payments_usecase.get_payment(id).await {
        Ok(payment) => api_response::ok(payment).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

pub async fn refund_payment<Pay, Res, Veh, Br, Toss>(
    State(payments_usecase): State<Arc<PaymentUseCase<Pay, Res, Veh, Br, Toss>>>,
    _auth: AuthUser,
    Json(body): Json<RefundBody>,
) -> impl IntoResponse
where
    Pay: PaymentRepository + Send + Sync + 'static,
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
    Br: BranchRepository + Send + Sync + 'static,
    Toss: TossGateway + Send + Sync + 'static,
{
    let reason = body.refund_reason.as_deref().unwrap_or("고객 요청");
    match payments_usecase
        .refund_payment(body.payment_id, reason, body.refund_amount)
        .await
    {
        Ok(payment) => api_response::ok_with_message(payment, "환불이 처리되었습니다").into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

pub async fn issue_virtual_account<Pay, Res, Veh, Br, Toss>(
    State(payments_usecase): State<Arc<PaymentUseCase<Pay, Res, Veh, Br, Toss>>>,
    Json(body): Json<VirtualAccountBody>,
) -> impl IntoResponse
where
    Pay: PaymentRepository + Send + Sync + 'static,
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
    Br: BranchRepository + Send + Sync + 'static,
    Toss: TossGateway + Send + Sync + 'static,
{
    match payments_usecase
        .issue_virtual_account(body.payment_id, &body.bank)
        .await
    {
        Ok(account) => api_response::ok(account).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

pub async fn get_virtual_account<Pay, Res, Veh, Br, Toss>(
    State(payments_usecase): State<Arc<PaymentUseCase<Pay, Res, Veh, Br, Toss>>>,
    Query(query): Query<VirtualAccountQuery>,
) -> impl IntoResponse
where
    Pay: PaymentRepository + Send + Sync + 'static,
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
    Br: BranchRepository + Send + Sync + 'static,
    Toss: TossGateway + Send + Sync + 'static,
{
    match payments_usecase.get_virtual_account(query.payment_id).await {
        Ok(account) => api_response::ok(account).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

pub async fn handle_webhook<Pay, Res, Veh, Br, Toss>(
    State(payments_usecase): State<Arc<PaymentUseCase<Pay, Res, Veh, Br, Toss>>>,
    Json(event): Json<TossWebhookEvent>,
) -> impl IntoResponse
where
    Pay: PaymentRepository + Send + Sync + 'static,
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
    Br: BranchRepository + Send + Sync + 'static,
    Toss: TossGateway + Send + Sync + 'static,
{
    match payments_usecase.handle_webhook(event).await {
        Ok(()) => api_response::ok(serde_json::json!({ "received": true })).into_response(),
        Err(err) => api_response::error(err.status_code(), err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_uses_gateway_method_names() {
        let body: RequestPaymentBody = serde_json::from_value(json!({
            "reservation_id": "7b0f4a8e-3f34-4f05-9a57-2b8f0a3c9d11",
            "payment_method": "virtualAccount",
            "bank": "신한"
        }))
        .unwrap();
        assert_eq!(body.payment_method, PaymentMethod::VirtualAccount);
        assert_eq!(body.bank.as_deref(), Some("신한"));

        let card: RequestPaymentBody = serde_json::from_value(json!({
            "reservation_id": "7b0f4a8e-3f34-4f05-9a57-2b8f0a3c9d11",
            "payment_method": "card"
        }))
        .unwrap();
        assert_eq!(card.payment_method, PaymentMethod::Card);
        assert!(card.bank.is_none());
    }

    #[test]
    fn refund_body_takes_payment_id_with_optional_amount_and_reason() {
        let body: RefundBody = serde_json::from_value(json!({
            "payment_id": "7b0f4a8e-3f34-4f05-9a57-2b8f0a3c9d11"
        }))
        .unwrap();
        assert!(body.refund_amount.is_none());
        assert!(body.refund_reason.is_none());

        let partial: RefundBody = serde_json::from_value(json!({
            "payment_id": "7b0f4a8e-3f34-4f05-9a57-2b8f0a3c9d11",
            "refund_amount": 30_000,
            "refund_reason": "부분 환불"
        }))
        .unwrap();
        assert_eq!(partial.refund_amount, Some(30_000));
        assert_eq!(partial.refund_reason.as_deref(), Some("부분 환불"));
    }

    #[test]
    fn virtual_account_body_and_query_carry_payment_id() {
        let body: VirtualAccountBody = serde_json::from_value(json!({
            "payment_id": "7b0f4a8e-3f34-4f05-9a57-2b8f0a3c9d11",
            "bank": "국민"
        }))
        .unwrap();
        assert_eq!(body.bank, "국민");

        let query: VirtualAccountQuery = serde_json::from_value(json!({
            "payment_id": "7b0f4a8e-3f34-4f05-9a57-2b8f0a3c9d11"
        }))
        .unwrap();
        assert_eq!(query.payment_id, body.payment_id);
    }
}
