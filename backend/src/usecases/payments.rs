use std::sync::Arc;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chanolja::{
    domain::{
        entities::{
            payments::{InsertPaymentEntity, PaymentEntity, UpdatePaymentEntity},
            reservations::UpdateReservationEntity,
            vehicles::UpdateVehicleEntity,
        },
        repositories::{
            branches::BranchRepository, payments::PaymentRepository,
            reservations::ReservationRepository, vehicles::VehicleRepository,
        },
        value_objects::{
            enums::{
                payment_methods::PaymentMethod, payment_statuses::PaymentStatus,
                reservation_payment_statuses::ReservationPaymentStatus,
                reservation_statuses::ReservationStatus, settlement_statuses::SettlementStatus,
                vehicle_statuses::VehicleStatus,
            },
            payments::{PaymentOrderDto, VirtualAccountDto},
            split::SplitRatio,
            webhook::{
                EVENT_PAYMENT_STATUS_CHANGED, EVENT_SETTLEMENT_COMPLETED, EVENT_SETTLEMENT_FAILED,
                PaymentStatusChangedData, SettlementEventData, TossWebhookEvent,
            },
        },
    },
    payments::toss_client::{IssueVirtualAccountRequest, TossClient, TossPayment},
};
use rand::{Rng, distributions::Alphanumeric};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TossGateway: Send + Sync {
    async fn confirm_payment(
        &self,
        payment_key: &str,
        order_id: &str,
        amount: i64,
    ) -> AnyResult<TossPayment>;

    async fn cancel_payment(
        &self,
        payment_key: &str,
        cancel_reason: &str,
        cancel_amount: Option<i64>,
    ) -> AnyResult<TossPayment>;

    async fn issue_virtual_account(
        &self,
        request: IssueVirtualAccountRequest,
    ) -> AnyResult<TossPayment>;
}

#[async_trait]
impl TossGateway for TossClient {
    async fn confirm_payment(
        &self,
        payment_key: &str,
        order_id: &str,
        amount: i64,
    ) -> AnyResult<TossPayment> {
        self.confirm_payment(payment_key, order_id, amount).await
    }

    async fn cancel_payment(
        &self,
        payment_key: &str,
        cancel_reason: &str,
        cancel_amount: Option<i64>,
    ) -> AnyResult<TossPayment> {
        self.cancel_payment(payment_key, cancel_reason, cancel_amount)
            .await
    }

    async fn issue_virtual_account(
        &self,
        request: IssueVirtualAccountRequest,
    ) -> AnyResult<TossPayment> {
        self.issue_virtual_account(request).await
    }
}

/// Client-facing messages stay in Korean; everything else goes to the logs.
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("결제 정보를 찾을 수 없습니다")]
    PaymentNotFound,
    #[error("예약 정보를 찾을 수 없습니다")]
    ReservationNotFound,
    #[error("결제 금액이 일치하지 않습니다")]
    AmountMismatch,
    #[error("완료된 결제만 환불 가능합니다")]
    NotRefundable,
    #[error("환불 금액이 올바르지 않습니다")]
    InvalidRefundAmount,
    #[error("가상계좌 결제가 아닙니다")]
    NotVirtualAccount,
    #[error("가상계좌가 아직 발급되지 않았습니다")]
    VirtualAccountNotIssued,
    #[error("웹훅 인증에 실패했습니다")]
    WebhookSecretMismatch,
    #[error("유효하지 않은 웹훅 요청입니다")]
    InvalidWebhook(String),
    #[error("{0}")]
    Gateway(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PaymentError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PaymentError::PaymentNotFound | PaymentError::ReservationNotFound => {
                StatusCode::NOT_FOUND
            }
            PaymentError::AmountMismatch
            | PaymentError::NotRefundable
            | PaymentError::InvalidRefundAmount
            | PaymentError::NotVirtualAccount
            | PaymentError::VirtualAccountNotIssued
            | PaymentError::InvalidWebhook(_)
            | PaymentError::Gateway(_) => StatusCode::BAD_REQUEST,
            PaymentError::WebhookSecretMismatch => StatusCode::UNAUTHORIZED,
            PaymentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, PaymentError>;

/// Settlement and checkout parameters resolved once at startup.
#[derive(Debug, Clone)]
pub struct PaymentWorkflowConfig {
    pub split_ratio: SplitRatio,
    pub default_submerchant_id: String,
    pub hq_submerchant_id: String,
    pub webhook_secret: String,
    pub public_base_url: String,
}

pub struct PaymentUseCase<Pay, Res, Veh, Br, Toss>
where
    Pay: PaymentRepository + Send + Sync + 'static,
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
    Br: BranchRepository + Send + Sync + 'static,
    Toss: TossGateway + Send + Sync + 'static,
{
    payment_repo: Arc<Pay>,
    reservation_repo: Arc<Res>,
    vehicle_repo: Arc<Veh>,
    branch_repo: Arc<Br>,
    toss_client: Arc<Toss>,
    config: PaymentWorkflowConfig,
}

impl<Pay, Res, Veh, Br, Toss> PaymentUseCase<Pay, Res, Veh, Br, Toss>
where
    Pay: PaymentRepository + Send + Sync + 'static,
    Res: ReservationRepository + Send + Sync + 'static,
    Veh: VehicleRepository + Send + Sync + 'static,
    Br: BranchRepository + Send + Sync + 'static,
    Toss: TossGateway + Send + Sync + 'static,
{
    pub fn new(
        payment_repo: Arc<Pay>,
        reservation_repo: Arc<Res>,
        vehicle_repo: Arc<Veh>,
        branch_repo: Arc<Br>,
        toss_client: Arc<Toss>,
        config: PaymentWorkflowConfig,
    ) -> Self {
        Self {
            payment_repo,
            reservation_repo,
            vehicle_repo,
            branch_repo,
            toss_client,
            config,
        }
    }

    /// Creates a pending payment row for a reservation and returns the
    /// order parameters the checkout widget needs.
    pub async fn request_payment(
        &self,
        reservation_id: Uuid,
        method: PaymentMethod,
    ) -> UseCaseResult<PaymentOrderDto> {
        info!(%reservation_id, method = %method, "payments: payment requested");

        let reservation = self
            .reservation_repo
            .find_reservation_by_id(reservation_id)
            .await
            .map_err(|err| {
                error!(%reservation_id, db_error = ?err, "payments: failed to load reservation");
                PaymentError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = PaymentError::ReservationNotFound;
                warn!(
                    %reservation_id,
                    status = err.status_code().as_u16(),
                    "payments: reservation not found for payment request"
                );
                err
            })?;

        let branch = self
            .branch_repo
            .find_branch_by_id(reservation.branch_id)
            .await
            .map_err(|err| {
                error!(
                    %reservation_id,
                    branch_id = %reservation.branch_id,
                    db_error = ?err,
                    "payments: failed to load branch for payment request"
                );
                PaymentError::Internal(err)
            })?;

        // Branches without a registered sub-merchant settle through the
        // default account until onboarding finishes.
        let branch_submerchant_id = branch
            .and_then(|b| b.submerchant_id)
            .unwrap_or_else(|| self.config.default_submerchant_id.clone());

        let split = self
            .config
            .split_ratio
            .split(reservation.total_price)
            .map_err(|err| {
                warn!(
                    %reservation_id,
                    total_price = reservation.total_price,
                    error = %err,
                    "payments: reservation amount cannot be split"
                );
                PaymentError::Internal(anyhow::anyhow!(err.to_string()))
            })?;

        let order_id = generate_order_id();
        let order_name = match self
            .vehicle_repo
            .find_vehicle_by_id(reservation.vehicle_id)
            .await
        {
            Ok(Some(vehicle)) => format!("{} 대여", vehicle.name),
            _ => "차량 대여".to_string(),
        };

        let payment = self
            .payment_repo
            .create_payment(InsertPaymentEntity {
                reservation_id,
                order_id: order_id.clone(),
                amount: reservation.total_price,
                method,
                status: PaymentStatus::Pending,
                branch_amount: split.branch_amount,
                hq_amount: split.hq_amount,
                branch_submerchant_id,
                hq_submerchant_id: self.config.hq_submerchant_id.clone(),
                branch_settlement_status: SettlementStatus::Pending,
                hq_settlement_status: SettlementStatus::Pending,
                settlement_status: SettlementStatus::Pending,
            })
            .await
            .map_err(|err| {
                error!(%reservation_id, db_error = ?err, "payments: failed to create payment row");
                PaymentError::Internal(err)
            })?;

        self.reservation_repo
            .update_reservation(
                reservation_id,
                UpdateReservationEntity {
                    payment_status: Some(ReservationPaymentStatus::Awaiting),
                    updated_at: Some(Utc::now()),
                    ..Default::default()
                },
            )
            .await
            .map_err(|err| {
                error!(
                    %reservation_id,
                    payment_id = %payment.id,
                    db_error = ?err,
                    "payments: failed to mark reservation awaiting payment"
                );
                PaymentError::Internal(err)
            })?;

        info!(
            %reservation_id,
            payment_id = %payment.id,
            order_id = %order_id,
            amount = payment.amount,
            branch_amount = payment.branch_amount,
            hq_amount = payment.hq_amount,
            "payments: payment row created"
        );

        Ok(PaymentOrderDto {
            payment_id: payment.id,
            order_id,
            order_name,
            amount: payment.amount,
            customer_name: reservation.customer_name,
            success_url: format!("{}/payment/success", self.config.public_base_url),
            fail_url: format!("{}/payment/fail", self.config.public_base_url),
        })
    }

    /// Confirms an authorized payment at the gateway. Safe to retry: a
    /// payment that is already completed is returned unchanged.
    pub async fn confirm_payment(
        &self,
        payment_key: &str,
        order_id: &str,
        amount: i64,
    ) -> UseCaseResult<PaymentEntity> {
        info!(order_id, amount, "payments: confirm requested");

        let payment = self.find_by_order_id(order_id).await?;

        // Amount is checked before anything else, including the replay
        // short-circuit, so a tampered request is always rejected.
        if amount != payment.amount {
            let err = PaymentError::AmountMismatch;
            warn!(
                payment_id = %payment.id,
                order_id,
                expected = payment.amount,
                got = amount,
                status = err.status_code().as_u16(),
                "payments: confirm amount does not match payment row"
            );
            return Err(err);
        }

        if payment.status == PaymentStatus::Completed {
            info!(
                payment_id = %payment.id,
                order_id,
                "payments: confirm replay on completed payment, no-op"
            );
            return Ok(payment);
        }

        let toss_payment = match self
            .toss_client
            .confirm_payment(payment_key, order_id, amount)
            .await
        {
            Ok(toss_payment) => toss_payment,
            Err(err) => {
                let message = err.to_string();
                error!(
                    payment_id = %payment.id,
                    order_id,
                    error = %message,
                    "payments: gateway declined confirm"
                );
                self.payment_repo
                    .update_payment(
                        payment.id,
                        UpdatePaymentEntity {
                            status: Some(PaymentStatus::Failed),
                            error_message: Some(message.clone()),
                            updated_at: Some(Utc::now()),
                            ..Default::default()
                        },
                    )
                    .await
                    .map_err(PaymentError::Internal)?;
                return Err(PaymentError::Gateway(message));
            }
        };

        self.apply_completion(&payment, Some(payment_key), Some(&toss_payment))
            .await
    }

    /// Issues a one-time deposit account for a virtual-account payment.
    /// Re-issuing returns the account already on file.
    pub async fn issue_virtual_account(
        &self,
        payment_id: Uuid,
        bank: &str,
    ) -> UseCaseResult<VirtualAccountDto> {
        info!(%payment_id, bank, "payments: virtual account issue requested");

        let payment = self.find_by_id(payment_id).await?;

        if payment.method != PaymentMethod::VirtualAccount {
            let err = PaymentError::NotVirtualAccount;
            warn!(
                %payment_id,
                method = %payment.method,
                status = err.status_code().as_u16(),
                "payments: virtual account requested for non-va payment"
            );
            return Err(err);
        }

        if let Some(account_number) = payment.va_account_number.clone() {
            info!(%payment_id, "payments: virtual account already issued, returning it");
            return Ok(VirtualAccountDto {
                payment_id,
                bank: payment.va_bank.unwrap_or_default(),
                account_number,
                due_date: payment.va_due_date,
                amount: payment.amount,
            });
        }

        let reservation = self
            .reservation_repo
            .find_reservation_by_id(payment.reservation_id)
            .await
            .map_err(PaymentError::Internal)?
            .ok_or(PaymentError::ReservationNotFound)?;

        let toss_payment = self
            .toss_client
            .issue_virtual_account(IssueVirtualAccountRequest {
                order_id: payment.order_id.clone(),
                order_name: "차량 대여".to_string(),
                amount: payment.amount,
                bank: bank.to_string(),
                customer_name: reservation.customer_name,
            })
            .await
            .map_err(|err| {
                error!(
                    %payment_id,
                    error = %err,
                    "payments: gateway failed to issue virtual account"
                );
                PaymentError::Gateway(err.to_string())
            })?;

        let account = toss_payment.virtual_account.ok_or_else(|| {
            warn!(%payment_id, "payments: gateway response missing virtual account");
            PaymentError::Gateway("가상계좌 발급에 실패했습니다".to_string())
        })?;

        let due_date = account.due_date.as_deref().and_then(parse_gateway_time);
        let updated = self
            .payment_repo
            .update_payment(
                payment_id,
                UpdatePaymentEntity {
                    status: Some(PaymentStatus::AwaitingDeposit),
                    payment_key: Some(toss_payment.payment_key),
                    va_bank: account.bank.clone(),
                    va_account_number: Some(account.account_number.clone()),
                    va_due_date: due_date,
                    updated_at: Some(Utc::now()),
                    ..Default::default()
                },
            )
            .await
            .map_err(|err| {
                error!(%payment_id, db_error = ?err, "payments: failed to store virtual account");
                PaymentError::Internal(err)
            })?;

        info!(%payment_id, "payments: virtual account issued");

        Ok(VirtualAccountDto {
            payment_id,
            bank: updated.va_bank.unwrap_or_default(),
            account_number: account.account_number,
            due_date: updated.va_due_date,
            amount: updated.amount,
        })
    }

    pub async fn get_virtual_account(&self, payment_id: Uuid) -> UseCaseResult<VirtualAccountDto> {
        let payment = self.find_by_id(payment_id).await?;

        if payment.method != PaymentMethod::VirtualAccount {
            return Err(PaymentError::NotVirtualAccount);
        }

        let account_number = payment.va_account_number.ok_or_else(|| {
            let err = PaymentError::VirtualAccountNotIssued;
            warn!(
                %payment_id,
                status = err.status_code().as_u16(),
                "payments: virtual account not yet issued"
            );
            err
        })?;

        Ok(VirtualAccountDto {
            payment_id,
            bank: payment.va_bank.unwrap_or_default(),
            account_number,
            due_date: payment.va_due_date,
            amount: payment.amount,
        })
    }

    /// Refunds a completed payment. A full refund cancels the reservation
    /// and releases the vehicle; a partial refund only moves money.
    pub async fn refund_payment(
        &self,
        payment_id: Uuid,
        reason: &str,
        amount: Option<i64>,
    ) -> UseCaseResult<PaymentEntity> {
        info!(%payment_id, ?amount, "payments: refund requested");

        let payment = self.find_by_id(payment_id).await?;

        if !matches!(
            payment.status,
            PaymentStatus::Completed | PaymentStatus::PartialRefund
        ) {
            let err = PaymentError::NotRefundable;
            warn!(
                %payment_id,
                payment_status = %payment.status,
                status = err.status_code().as_u16(),
                "payments: refund rejected for non-completed payment"
            );
            return Err(err);
        }

        let payment_key = payment.payment_key.clone().ok_or_else(|| {
            error!(%payment_id, "payments: completed payment has no payment key");
            PaymentError::Internal(anyhow::anyhow!("completed payment missing payment key"))
        })?;

        let already_refunded = payment.refunded_amount.unwrap_or(0);
        let remaining = payment.amount - already_refunded;
        let requested = amount.unwrap_or(remaining);

        if requested <= 0 || requested > remaining {
            let err = PaymentError::InvalidRefundAmount;
            warn!(
                %payment_id,
                requested,
                remaining,
                status = err.status_code().as_u16(),
                "payments: refund amount out of range"
            );
            return Err(err);
        }

        let full_refund = requested == remaining;
        // The gateway treats a missing cancelAmount as "cancel everything",
        // which is only safe when nothing was refunded before.
        let cancel_amount = if full_refund && already_refunded == 0 {
            None
        } else {
            Some(requested)
        };

        self.toss_client
            .cancel_payment(&payment_key, reason, cancel_amount)
            .await
            .map_err(|err| {
                error!(%payment_id, error = %err, "payments: gateway refused cancel");
                PaymentError::Gateway(err.to_string())
            })?;

        let now = Utc::now();
        let updated = self
            .payment_repo
            .update_payment(
                payment_id,
                UpdatePaymentEntity {
                    status: Some(if full_refund {
                        PaymentStatus::Refunded
                    } else {
                        PaymentStatus::PartialRefund
                    }),
                    refunded_amount: Some(already_refunded + requested),
                    refund_reason: Some(reason.to_string()),
                    refunded_at: Some(now),
                    cancelled_at: full_refund.then_some(now),
                    updated_at: Some(now),
                    ..Default::default()
                },
            )
            .await
            .map_err(|err| {
                error!(%payment_id, db_error = ?err, "payments: failed to record refund");
                PaymentError::Internal(err)
            })?;

        if full_refund {
            self.release_reservation(
                payment.reservation_id,
                ReservationPaymentStatus::Refunded,
            )
            .await?;
        }

        info!(
            %payment_id,
            full_refund,
            refunded = already_refunded + requested,
            "payments: refund recorded"
        );

        Ok(updated)
    }

    /// Applies a gateway webhook. Unknown event tags are acknowledged and
    /// dropped; everything else fails loudly so the gateway retries.
    pub async fn handle_webhook(&self, event: TossWebhookEvent) -> UseCaseResult<()> {
        if event.secret.as_deref() != Some(self.config.webhook_secret.as_str()) {
            let err = PaymentError::WebhookSecretMismatch;
            warn!(
                event_type = %event.event_type,
                status = err.status_code().as_u16(),
                "payments: webhook secret mismatch"
            );
            return Err(err);
        }

        info!(event_type = %event.event_type, "payments: webhook received");

        match event.event_type.as_str() {
            EVENT_PAYMENT_STATUS_CHANGED => {
                let data: PaymentStatusChangedData = serde_json::from_value(event.data)
                    .map_err(|err| {
                        warn!(error = %err, "payments: malformed status-changed payload");
                        PaymentError::InvalidWebhook(err.to_string())
                    })?;
                self.handle_payment_status_changed(data).await
            }
            EVENT_SETTLEMENT_COMPLETED => {
                let data: SettlementEventData =
                    serde_json::from_value(event.data).map_err(|err| {
                        warn!(error = %err, "payments: malformed settlement payload");
                        PaymentError::InvalidWebhook(err.to_string())
                    })?;
                self.handle_settlement(data, true).await
            }
            EVENT_SETTLEMENT_FAILED => {
                let data: SettlementEventData =
                    serde_json::from_value(event.data).map_err(|err| {
                        warn!(error = %err, "payments: malformed settlement payload");
                        PaymentError::InvalidWebhook(err.to_string())
                    })?;
                self.handle_settlement(data, false).await
            }
            other => {
                debug!(event_type = %other, "payments: unhandled webhook event type");
                Ok(())
            }
        }
    }

    async fn handle_payment_status_changed(
        &self,
        data: PaymentStatusChangedData,
    ) -> UseCaseResult<()> {
        let payment = self.find_by_order_id(&data.order_id).await?;

        match data.status.as_str() {
            "DONE" => {
                if payment.status == PaymentStatus::Completed {
                    info!(
                        payment_id = %payment.id,
                        "payments: DONE webhook replay on completed payment, no-op"
                    );
                    return Ok(());
                }
                if !payment.status.can_transition_to(PaymentStatus::Completed) {
                    warn!(
                        payment_id = %payment.id,
                        payment_status = %payment.status,
                        terminal = payment.status.is_terminal(),
                        "payments: stale DONE webhook cannot complete this payment, dropped"
                    );
                    return Ok(());
                }
                self.apply_completion(&payment, data.payment_key.as_deref(), None)
                    .await?;
                Ok(())
            }
            "CANCELED" => {
                if !payment.status.can_transition_to(PaymentStatus::Cancelled) {
                    warn!(
                        payment_id = %payment.id,
                        payment_status = %payment.status,
                        terminal = payment.status.is_terminal(),
                        "payments: stale CANCELED webhook cannot cancel this payment, dropped"
                    );
                    return Ok(());
                }
                let now = Utc::now();
                self.payment_repo
                    .update_payment(
                        payment.id,
                        UpdatePaymentEntity {
                            status: Some(PaymentStatus::Cancelled),
                            cancelled_at: Some(now),
                            updated_at: Some(now),
                            ..Default::default()
                        },
                    )
                    .await
                    .map_err(PaymentError::Internal)?;
                self.release_reservation(
                    payment.reservation_id,
                    ReservationPaymentStatus::Refunded,
                )
                .await?;
                info!(payment_id = %payment.id, "payments: payment cancelled via webhook");
                Ok(())
            }
            "EXPIRED" => {
                if !payment.status.can_transition_to(PaymentStatus::Failed) {
                    warn!(
                        payment_id = %payment.id,
                        payment_status = %payment.status,
                        terminal = payment.status.is_terminal(),
                        "payments: stale EXPIRED webhook cannot fail this payment, dropped"
                    );
                    return Ok(());
                }
                self.payment_repo
                    .update_payment(
                        payment.id,
                        UpdatePaymentEntity {
                            status: Some(PaymentStatus::Failed),
                            error_message: Some("가상계좌 입금 기한이 만료되었습니다".to_string()),
                            updated_at: Some(Utc::now()),
                            ..Default::default()
                        },
                    )
                    .await
                    .map_err(PaymentError::Internal)?;
                self.release_reservation(
                    payment.reservation_id,
                    ReservationPaymentStatus::Expired,
                )
                .await?;
                info!(payment_id = %payment.id, "payments: deposit window expired");
                Ok(())
            }
            other => {
                debug!(
                    payment_id = %payment.id,
                    gateway_status = %other,
                    "payments: unhandled gateway payment status"
                );
                Ok(())
            }
        }
    }

    async fn handle_settlement(
        &self,
        data: SettlementEventData,
        completed: bool,
    ) -> UseCaseResult<()> {
        let payment = self.find_by_order_id(&data.order_id).await?;
        let side_status = if completed {
            SettlementStatus::Completed
        } else {
            SettlementStatus::Failed
        };
        let now = Utc::now();

        let mut update = UpdatePaymentEntity {
            updated_at: Some(now),
            ..Default::default()
        };

        // The branch sub-merchant is matched first; HQ only when the ids
        // differ, so a shared id credits the branch side.
        let (branch_side, other_side_status) = if data.sub_merchant_id
            == payment.branch_submerchant_id
        {
            update.branch_settlement_status = Some(side_status);
            if completed {
                update.branch_settled_amount = Some(data.amount.unwrap_or(payment.branch_amount));
                update.branch_settled_at = Some(now);
            }
            (true, payment.hq_settlement_status)
        } else if data.sub_merchant_id == payment.hq_submerchant_id {
            update.hq_settlement_status = Some(side_status);
            if completed {
                update.hq_settled_amount = Some(data.amount.unwrap_or(payment.hq_amount));
                update.hq_settled_at = Some(now);
            }
            (false, payment.branch_settlement_status)
        } else {
            let err = PaymentError::InvalidWebhook(format!(
                "unknown sub-merchant {}",
                data.sub_merchant_id
            ));
            warn!(
                payment_id = %payment.id,
                sub_merchant_id = %data.sub_merchant_id,
                status = err.status_code().as_u16(),
                "payments: settlement webhook for unknown sub-merchant"
            );
            return Err(err);
        };

        if !completed {
            update.settlement_status = Some(SettlementStatus::Failed);
            update.settlement_error = Some(
                data.reason
                    .unwrap_or_else(|| "settlement failed".to_string()),
            );
        } else if other_side_status == SettlementStatus::Completed {
            // Both legs are done, the payment is fully settled.
            update.settlement_status = Some(SettlementStatus::Completed);
        }

        self.payment_repo
            .update_payment(payment.id, update)
            .await
            .map_err(|err| {
                error!(
                    payment_id = %payment.id,
                    db_error = ?err,
                    "payments: failed to record settlement"
                );
                PaymentError::Internal(err)
            })?;

        info!(
            payment_id = %payment.id,
            branch_side,
            completed,
            "payments: settlement recorded"
        );
        Ok(())
    }

    /// Marks the payment completed and projects the result onto the
    /// reservation. Shared by the confirm endpoint and the DONE webhook.
    async fn apply_completion(
        &self,
        payment: &PaymentEntity,
        payment_key: Option<&str>,
        toss_payment: Option<&TossPayment>,
    ) -> UseCaseResult<PaymentEntity> {
        let approved_at = toss_payment
            .and_then(|p| p.approved_at.as_deref())
            .and_then(parse_gateway_time)
            .unwrap_or_else(Utc::now);

        let updated = self
            .payment_repo
            .update_payment(
                payment.id,
                UpdatePaymentEntity {
                    status: Some(PaymentStatus::Completed),
                    payment_key: payment_key.map(str::to_string),
                    approved_at: Some(approved_at),
                    card_company: toss_payment
                        .and_then(|p| p.card.as_ref())
                        .and_then(|c| c.company.clone()),
                    card_number: toss_payment
                        .and_then(|p| p.card.as_ref())
                        .and_then(|c| c.number.clone()),
                    branch_settlement_status: Some(SettlementStatus::Processing),
                    hq_settlement_status: Some(SettlementStatus::Processing),
                    settlement_status: Some(SettlementStatus::Processing),
                    updated_at: Some(Utc::now()),
                    ..Default::default()
                },
            )
            .await
            .map_err(|err| {
                error!(
                    payment_id = %payment.id,
                    db_error = ?err,
                    "payments: failed to mark payment completed"
                );
                PaymentError::Internal(err)
            })?;

        let reservation = self
            .reservation_repo
            .find_reservation_by_id(payment.reservation_id)
            .await
            .map_err(PaymentError::Internal)?;

        if let Some(reservation) = reservation {
            let next_status = reservation
                .status
                .can_transition_to(ReservationStatus::Confirmed)
                .then_some(ReservationStatus::Confirmed);
            self.reservation_repo
                .update_reservation(
                    reservation.id,
                    UpdateReservationEntity {
                        status: next_status,
                        payment_status: Some(ReservationPaymentStatus::Paid),
                        updated_at: Some(Utc::now()),
                        ..Default::default()
                    },
                )
                .await
                .map_err(|err| {
                    error!(
                        payment_id = %payment.id,
                        reservation_id = %reservation.id,
                        db_error = ?err,
                        "payments: failed to confirm reservation after payment"
                    );
                    PaymentError::Internal(err)
                })?;
        }

        info!(payment_id = %payment.id, "payments: payment completed");
        Ok(updated)
    }

    /// Cancels the reservation behind a dead payment and puts the vehicle
    /// back on the lot.
    async fn release_reservation(
        &self,
        reservation_id: Uuid,
        payment_status: ReservationPaymentStatus,
    ) -> UseCaseResult<()> {
        let reservation = match self
            .reservation_repo
            .find_reservation_by_id(reservation_id)
            .await
            .map_err(PaymentError::Internal)?
        {
            Some(reservation) => reservation,
            None => {
                warn!(%reservation_id, "payments: reservation missing during release");
                return Ok(());
            }
        };

        let next_status = reservation
            .status
            .can_transition_to(ReservationStatus::Cancelled)
            .then_some(ReservationStatus::Cancelled);

        self.reservation_repo
            .update_reservation(
                reservation_id,
                UpdateReservationEntity {
                    status: next_status,
                    payment_status: Some(payment_status),
                    updated_at: Some(Utc::now()),
                    ..Default::default()
                },
            )
            .await
            .map_err(PaymentError::Internal)?;

        if payment_status == ReservationPaymentStatus::Refunded {
            self.vehicle_repo
                .update_vehicle(
                    reservation.vehicle_id,
                    UpdateVehicleEntity {
                        status: Some(VehicleStatus::Available),
                        updated_at: Some(Utc::now()),
                        ..Default::default()
                    },
                )
                .await
                .map_err(PaymentError::Internal)?;
        }

        Ok(())
    }

    pub async fn get_payment(&self, payment_id: Uuid) -> UseCaseResult<PaymentEntity> {
        self.find_by_id(payment_id).await
    }

    async fn find_by_id(&self, payment_id: Uuid) -> UseCaseResult<PaymentEntity> {
        self.payment_repo
            .find_payment_by_id(payment_id)
            .await
            .map_err(|err| {
                error!(%payment_id, db_error = ?err, "payments: failed to load payment");
                PaymentError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = PaymentError::PaymentNotFound;
                warn!(
                    %payment_id,
                    status = err.status_code().as_u16(),
                    "payments: payment not found"
                );
                err
            })
    }

    async fn find_by_order_id(&self, order_id: &str) -> UseCaseResult<PaymentEntity> {
        self.payment_repo
            .find_payment_by_order_id(order_id)
            .await
            .map_err(|err| {
                error!(order_id, db_error = ?err, "payments: failed to load payment by order");
                PaymentError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = PaymentError::PaymentNotFound;
                warn!(
                    order_id,
                    status = err.status_code().as_u16(),
                    "payments: no payment for order id"
                );
                err
            })
    }
}

fn generate_order_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("CHNLJ-{}-{}", Utc::now().format("%Y%m%d%H%M%S"), suffix)
}

fn parse_gateway_time(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests;
