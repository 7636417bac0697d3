use super::*;
use chanolja::domain::{
    entities::{branches::BranchEntity, reservations::ReservationEntity, vehicles::VehicleEntity},
    repositories::{
        branches::MockBranchRepository, payments::MockPaymentRepository,
        reservations::MockReservationRepository, vehicles::MockVehicleRepository,
    },
};
use serde_json::json;

const BRANCH_SUBMERCHANT: &str = "branch_gangnam";
const HQ_SUBMERCHANT: &str = "chanolja_hq";
const WEBHOOK_SECRET: &str = "webhook-secret";

fn workflow_config() -> PaymentWorkflowConfig {
    PaymentWorkflowConfig {
        split_ratio: SplitRatio::default(),
        default_submerchant_id: "default_sub".to_string(),
        hq_submerchant_id: HQ_SUBMERCHANT.to_string(),
        webhook_secret: WEBHOOK_SECRET.to_string(),
        public_base_url: "https://chanolja.example".to_string(),
    }
}

fn sample_payment(status: PaymentStatus) -> PaymentEntity {
    let now = Utc::now();
    PaymentEntity {
        id: Uuid::new_v4(),
        reservation_id: Uuid::new_v4(),
        order_id: "CHNLJ-20260826120000-AB12CD".to_string(),
        payment_key: Some("pay_key_123".to_string()),
        amount: 100_000,
        method: PaymentMethod::Card,
        status,
        branch_amount: 90_000,
        hq_amount: 10_000,
        branch_submerchant_id: BRANCH_SUBMERCHANT.to_string(),
        hq_submerchant_id: HQ_SUBMERCHANT.to_string(),
        branch_settlement_status: SettlementStatus::Pending,
        hq_settlement_status: SettlementStatus::Pending,
        settlement_status: SettlementStatus::Pending,
        branch_settled_amount: None,
        hq_settled_amount: None,
        branch_settled_at: None,
        hq_settled_at: None,
        settlement_error: None,
        card_company: None,
        card_number: None,
        va_bank: None,
        va_account_number: None,
        va_due_date: None,
        refunded_amount: None,
        refund_reason: None,
        refunded_at: None,
        error_message: None,
        approved_at: None,
        cancelled_at: None,
        created_at: now,
        updated_at: now,
    }
}

fn sample_reservation(id: Uuid, status: ReservationStatus) -> ReservationEntity {
    let now = Utc::now();
    ReservationEntity {
        id,
        branch_id: Uuid::new_v4(),
        vehicle_id: Uuid::new_v4(),
        customer_name: "김민수".to_string(),
        customer_phone: "010-1234-5678".to_string(),
        customer_email: None,
        start_at: now,
        end_at: now + chrono::Duration::days(2),
        pickup_location: None,
        return_location: None,
        rental_price: 90_000,
        insurance_id: None,
        insurance_price: 10_000,
        total_price: 100_000,
        status,
        payment_status: ReservationPaymentStatus::Awaiting,
        created_at: now,
        updated_at: now,
    }
}

fn sample_vehicle(id: Uuid) -> VehicleEntity {
    let now = Utc::now();
    VehicleEntity {
        id,
        branch_id: Uuid::new_v4(),
        name: "아반떼 CN7".to_string(),
        model: "Avante".to_string(),
        year: 2024,
        plate_number: "12가3456".to_string(),
        fuel_type: Some("gasoline".to_string()),
        seats: Some(5),
        daily_price: 45_000,
        image_url: None,
        status: VehicleStatus::Available,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn sample_branch(id: Uuid) -> BranchEntity {
    let now = Utc::now();
    BranchEntity {
        id,
        name: "강남점".to_string(),
        subdomain: "gangnam".to_string(),
        phone: None,
        address: None,
        submerchant_id: Some(BRANCH_SUBMERCHANT.to_string()),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn toss_done_payment(order_id: &str) -> TossPayment {
    TossPayment {
        payment_key: "pay_key_123".to_string(),
        order_id: order_id.to_string(),
        status: "DONE".to_string(),
        total_amount: Some(100_000),
        approved_at: Some("2026-08-26T12:00:00+09:00".to_string()),
        card: Some(chanolja::payments::toss_client::TossCard {
            company: Some("신한".to_string()),
            number: Some("1234-****-****-5678".to_string()),
        }),
        virtual_account: None,
    }
}

type TestUseCase = PaymentUseCase<
    MockPaymentRepository,
    MockReservationRepository,
    MockVehicleRepository,
    MockBranchRepository,
    MockTossGateway,
>;

fn use_case(
    payments: MockPaymentRepository,
    reservations: MockReservationRepository,
    vehicles: MockVehicleRepository,
    branches: MockBranchRepository,
    gateway: MockTossGateway,
) -> TestUseCase {
    PaymentUseCase::new(
        Arc::new(payments),
        Arc::new(reservations),
        Arc::new(vehicles),
        Arc::new(branches),
        Arc::new(gateway),
        workflow_config(),
    )
}

#[tokio::test]
async fn request_payment_splits_amount_and_marks_reservation_awaiting() {
    let reservation = sample_reservation(Uuid::new_v4(), ReservationStatus::Pending);
    let reservation_id = reservation.id;
    let branch = sample_branch(reservation.branch_id);
    let vehicle = sample_vehicle(reservation.vehicle_id);

    let mut reservations = MockReservationRepository::new();
    let lookup = reservation.clone();
    reservations
        .expect_find_reservation_by_id()
        .returning(move |_| Ok(Some(lookup.clone())));
    reservations
        .expect_update_reservation()
        .withf(|_, update| {
            update.payment_status == Some(ReservationPaymentStatus::Awaiting)
        })
        .returning(move |_, _| Ok(reservation.clone()));

    let mut branches = MockBranchRepository::new();
    branches
        .expect_find_branch_by_id()
        .returning(move |_| Ok(Some(branch.clone())));

    let mut vehicles = MockVehicleRepository::new();
    vehicles
        .expect_find_vehicle_by_id()
        .returning(move |_| Ok(Some(vehicle.clone())));

    let mut payments = MockPaymentRepository::new();
    payments
        .expect_create_payment()
        .withf(|insert| {
            insert.amount == 100_000
                && insert.branch_amount == 90_000
                && insert.hq_amount == 10_000
                && insert.branch_submerchant_id == BRANCH_SUBMERCHANT
                && insert.hq_submerchant_id == HQ_SUBMERCHANT
                && insert.status == PaymentStatus::Pending
        })
        .returning(|insert| {
            let mut payment = sample_payment(PaymentStatus::Pending);
            payment.order_id = insert.order_id;
            payment.amount = insert.amount;
            Ok(payment)
        });

    let use_case = use_case(
        payments,
        reservations,
        vehicles,
        branches,
        MockTossGateway::new(),
    );

    let order = use_case
        .request_payment(reservation_id, PaymentMethod::Card)
        .await
        .unwrap();

    assert_eq!(order.amount, 100_000);
    assert!(order.order_id.starts_with("CHNLJ-"));
    assert_eq!(order.customer_name, "김민수");
    assert_eq!(order.success_url, "https://chanolja.example/payment/success");
}

#[tokio::test]
async fn confirm_completes_payment_and_reservation() {
    let payment = sample_payment(PaymentStatus::Pending);
    let order_id = payment.order_id.clone();
    let reservation = sample_reservation(payment.reservation_id, ReservationStatus::Pending);

    let mut payments = MockPaymentRepository::new();
    let lookup = payment.clone();
    payments
        .expect_find_payment_by_order_id()
        .returning(move |_| Ok(Some(lookup.clone())));
    let stored = payment.clone();
    payments
        .expect_update_payment()
        .withf(|_, update| {
            update.status == Some(PaymentStatus::Completed)
                && update.settlement_status == Some(SettlementStatus::Processing)
                && update.card_company.as_deref() == Some("신한")
        })
        .returning(move |_, update| {
            let mut updated = stored.clone();
            updated.status = update.status.unwrap();
            Ok(updated)
        });

    let mut reservations = MockReservationRepository::new();
    let lookup = reservation.clone();
    reservations
        .expect_find_reservation_by_id()
        .returning(move |_| Ok(Some(lookup.clone())));
    reservations
        .expect_update_reservation()
        .withf(|_, update| {
            update.status == Some(ReservationStatus::Confirmed)
                && update.payment_status == Some(ReservationPaymentStatus::Paid)
        })
        .returning(move |_, _| Ok(reservation.clone()));

    let mut gateway = MockTossGateway::new();
    let done = toss_done_payment(&order_id);
    gateway
        .expect_confirm_payment()
        .returning(move |_, _, _| Ok(done.clone()));

    let use_case = use_case(
        payments,
        reservations,
        MockVehicleRepository::new(),
        MockBranchRepository::new(),
        gateway,
    );

    let confirmed = use_case
        .confirm_payment("pay_key_123", &order_id, 100_000)
        .await
        .unwrap();
    assert_eq!(confirmed.status, PaymentStatus::Completed);
}

#[tokio::test]
async fn confirm_with_wrong_amount_changes_nothing() {
    let payment = sample_payment(PaymentStatus::Pending);
    let order_id = payment.order_id.clone();

    let mut payments = MockPaymentRepository::new();
    payments
        .expect_find_payment_by_order_id()
        .returning(move |_| Ok(Some(payment.clone())));
    // No update expectation: any write would panic the mock.

    let use_case = use_case(
        payments,
        MockReservationRepository::new(),
        MockVehicleRepository::new(),
        MockBranchRepository::new(),
        MockTossGateway::new(),
    );

    let err = use_case
        .confirm_payment("pay_key_123", &order_id, 99_999)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::AmountMismatch));
    assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(err.to_string(), "결제 금액이 일치하지 않습니다");
}

#[tokio::test]
async fn replayed_confirm_with_tampered_amount_is_rejected() {
    let payment = sample_payment(PaymentStatus::Completed);
    let order_id = payment.order_id.clone();

    let mut payments = MockPaymentRepository::new();
    payments
        .expect_find_payment_by_order_id()
        .returning(move |_| Ok(Some(payment.clone())));
    // No update or gateway expectations: the mismatch must win over the
    // completed-replay short-circuit.

    let use_case = use_case(
        payments,
        MockReservationRepository::new(),
        MockVehicleRepository::new(),
        MockBranchRepository::new(),
        MockTossGateway::new(),
    );

    let err = use_case
        .confirm_payment("pay_key_123", &order_id, 50_000)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::AmountMismatch));
    assert_eq!(err.to_string(), "결제 금액이 일치하지 않습니다");
}

#[tokio::test]
async fn confirm_replay_on_completed_payment_is_a_no_op() {
    let payment = sample_payment(PaymentStatus::Completed);
    let order_id = payment.order_id.clone();

    let mut payments = MockPaymentRepository::new();
    payments
        .expect_find_payment_by_order_id()
        .returning(move |_| Ok(Some(payment.clone())));

    // Gateway mock has no expectations; a confirm call would panic.
    let use_case = use_case(
        payments,
        MockReservationRepository::new(),
        MockVehicleRepository::new(),
        MockBranchRepository::new(),
        MockTossGateway::new(),
    );

    let confirmed = use_case
        .confirm_payment("pay_key_123", &order_id, 100_000)
        .await
        .unwrap();
    assert_eq!(confirmed.status, PaymentStatus::Completed);
}

#[tokio::test]
async fn gateway_decline_marks_payment_failed_and_surfaces_message() {
    let payment = sample_payment(PaymentStatus::Pending);
    let order_id = payment.order_id.clone();

    let mut payments = MockPaymentRepository::new();
    let lookup = payment.clone();
    payments
        .expect_find_payment_by_order_id()
        .returning(move |_| Ok(Some(lookup.clone())));
    payments
        .expect_update_payment()
        .withf(|_, update| {
            update.status == Some(PaymentStatus::Failed)
                && update.error_message.as_deref() == Some("카드 한도를 초과했습니다")
        })
        .returning(move |_, _| Ok(payment.clone()));

    let mut gateway = MockTossGateway::new();
    gateway
        .expect_confirm_payment()
        .returning(|_, _, _| Err(anyhow::anyhow!("카드 한도를 초과했습니다")));

    let use_case = use_case(
        payments,
        MockReservationRepository::new(),
        MockVehicleRepository::new(),
        MockBranchRepository::new(),
        gateway,
    );

    let err = use_case
        .confirm_payment("pay_key_123", &order_id, 100_000)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "카드 한도를 초과했습니다");
    assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn refund_of_pending_payment_is_rejected() {
    let payment = sample_payment(PaymentStatus::Pending);
    let payment_id = payment.id;

    let mut payments = MockPaymentRepository::new();
    payments
        .expect_find_payment_by_id()
        .returning(move |_| Ok(Some(payment.clone())));

    let use_case = use_case(
        payments,
        MockReservationRepository::new(),
        MockVehicleRepository::new(),
        MockBranchRepository::new(),
        MockTossGateway::new(),
    );

    let err = use_case
        .refund_payment(payment_id, "고객 변심", None)
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::NotRefundable));
    assert_eq!(err.to_string(), "완료된 결제만 환불 가능합니다");
}

#[tokio::test]
async fn full_refund_cancels_reservation_and_releases_vehicle() {
    let payment = sample_payment(PaymentStatus::Completed);
    let payment_id = payment.id;
    let reservation = sample_reservation(payment.reservation_id, ReservationStatus::Confirmed);
    let vehicle_id = reservation.vehicle_id;

    let mut payments = MockPaymentRepository::new();
    let lookup = payment.clone();
    payments
        .expect_find_payment_by_id()
        .returning(move |_| Ok(Some(lookup.clone())));
    payments
        .expect_update_payment()
        .withf(|_, update| {
            update.status == Some(PaymentStatus::Refunded)
                && update.refunded_amount == Some(100_000)
                && update.cancelled_at.is_some()
        })
        .returning(move |_, _| Ok(payment.clone()));

    let mut reservations = MockReservationRepository::new();
    let lookup = reservation.clone();
    reservations
        .expect_find_reservation_by_id()
        .returning(move |_| Ok(Some(lookup.clone())));
    reservations
        .expect_update_reservation()
        .withf(|_, update| {
            update.status == Some(ReservationStatus::Cancelled)
                && update.payment_status == Some(ReservationPaymentStatus::Refunded)
        })
        .returning(move |_, _| Ok(reservation.clone()));

    let mut vehicles = MockVehicleRepository::new();
    vehicles
        .expect_update_vehicle()
        .withf(move |id, update| {
            *id == vehicle_id && update.status == Some(VehicleStatus::Available)
        })
        .returning(|id, _| Ok(sample_vehicle(id)));

    let mut gateway = MockTossGateway::new();
    gateway
        .expect_cancel_payment()
        .withf(|key, _, amount| key == "pay_key_123" && amount.is_none())
        .returning(|_, _, _| Ok(toss_done_payment("CHNLJ-20260826120000-AB12CD")));

    let use_case = use_case(
        payments,
        reservations,
        vehicles,
        MockBranchRepository::new(),
        gateway,
    );

    use_case
        .refund_payment(payment_id, "고객 변심", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn partial_refund_keeps_reservation_alive() {
    let payment = sample_payment(PaymentStatus::Completed);
    let payment_id = payment.id;

    let mut payments = MockPaymentRepository::new();
    let lookup = payment.clone();
    payments
        .expect_find_payment_by_id()
        .returning(move |_| Ok(Some(lookup.clone())));
    payments
        .expect_update_payment()
        .withf(|_, update| {
            update.status == Some(PaymentStatus::PartialRefund)
                && update.refunded_amount == Some(30_000)
                && update.cancelled_at.is_none()
        })
        .returning(move |_, _| Ok(payment.clone()));

    let mut gateway = MockTossGateway::new();
    gateway
        .expect_cancel_payment()
        .withf(|_, _, amount| *amount == Some(30_000))
        .returning(|_, _, _| Ok(toss_done_payment("CHNLJ-20260826120000-AB12CD")));

    // Reservation and vehicle mocks have no expectations: a partial
    // refund must not touch either.
    let use_case = use_case(
        payments,
        MockReservationRepository::new(),
        MockVehicleRepository::new(),
        MockBranchRepository::new(),
        gateway,
    );

    use_case
        .refund_payment(payment_id, "부분 환불", Some(30_000))
        .await
        .unwrap();
}

#[tokio::test]
async fn refund_above_remaining_amount_is_rejected() {
    let payment = sample_payment(PaymentStatus::Completed);
    let payment_id = payment.id;

    let mut payments = MockPaymentRepository::new();
    payments
        .expect_find_payment_by_id()
        .returning(move |_| Ok(Some(payment.clone())));

    let use_case = use_case(
        payments,
        MockReservationRepository::new(),
        MockVehicleRepository::new(),
        MockBranchRepository::new(),
        MockTossGateway::new(),
    );

    let err = use_case
        .refund_payment(payment_id, "환불", Some(100_001))
        .await
        .unwrap_err();
    assert!(matches!(err, PaymentError::InvalidRefundAmount));
}

fn webhook_event(event_type: &str, data: serde_json::Value) -> TossWebhookEvent {
    TossWebhookEvent {
        secret: Some(WEBHOOK_SECRET.to_string()),
        event_type: event_type.to_string(),
        data,
    }
}

#[tokio::test]
async fn webhook_with_wrong_secret_is_unauthorized() {
    let use_case = use_case(
        MockPaymentRepository::new(),
        MockReservationRepository::new(),
        MockVehicleRepository::new(),
        MockBranchRepository::new(),
        MockTossGateway::new(),
    );

    let mut event = webhook_event(EVENT_PAYMENT_STATUS_CHANGED, json!({}));
    event.secret = Some("wrong".to_string());

    let err = use_case.handle_webhook(event).await.unwrap_err();
    assert!(matches!(err, PaymentError::WebhookSecretMismatch));
    assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn done_webhook_replay_is_idempotent() {
    let payment = sample_payment(PaymentStatus::Completed);
    let order_id = payment.order_id.clone();

    let mut payments = MockPaymentRepository::new();
    payments
        .expect_find_payment_by_order_id()
        .returning(move |_| Ok(Some(payment.clone())));
    // No update expectation: the replay must write nothing.

    let use_case = use_case(
        payments,
        MockReservationRepository::new(),
        MockVehicleRepository::new(),
        MockBranchRepository::new(),
        MockTossGateway::new(),
    );

    use_case
        .handle_webhook(webhook_event(
            EVENT_PAYMENT_STATUS_CHANGED,
            json!({ "orderId": order_id, "status": "DONE", "paymentKey": "pay_key_123" }),
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn done_webhook_does_not_resurrect_refunded_payment() {
    let payment = sample_payment(PaymentStatus::Refunded);
    let order_id = payment.order_id.clone();

    let mut payments = MockPaymentRepository::new();
    payments
        .expect_find_payment_by_order_id()
        .returning(move |_| Ok(Some(payment.clone())));
    // No update expectation: refunded is terminal and must stay so.

    let use_case = use_case(
        payments,
        MockReservationRepository::new(),
        MockVehicleRepository::new(),
        MockBranchRepository::new(),
        MockTossGateway::new(),
    );

    use_case
        .handle_webhook(webhook_event(
            EVENT_PAYMENT_STATUS_CHANGED,
            json!({ "orderId": order_id, "status": "DONE", "paymentKey": "pay_key_123" }),
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn canceled_webhook_leaves_refunded_payment_alone() {
    let payment = sample_payment(PaymentStatus::Refunded);
    let order_id = payment.order_id.clone();

    let mut payments = MockPaymentRepository::new();
    payments
        .expect_find_payment_by_order_id()
        .returning(move |_| Ok(Some(payment.clone())));

    // Reservation and vehicle mocks have no expectations: a late cancel
    // notice must not rewrite a refunded payment or release anything.
    let use_case = use_case(
        payments,
        MockReservationRepository::new(),
        MockVehicleRepository::new(),
        MockBranchRepository::new(),
        MockTossGateway::new(),
    );

    use_case
        .handle_webhook(webhook_event(
            EVENT_PAYMENT_STATUS_CHANGED,
            json!({ "orderId": order_id, "status": "CANCELED", "paymentKey": null }),
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn expired_webhook_fails_payment_and_expires_reservation() {
    let payment = sample_payment(PaymentStatus::AwaitingDeposit);
    let order_id = payment.order_id.clone();
    let reservation = sample_reservation(payment.reservation_id, ReservationStatus::Pending);

    let mut payments = MockPaymentRepository::new();
    let lookup = payment.clone();
    payments
        .expect_find_payment_by_order_id()
        .returning(move |_| Ok(Some(lookup.clone())));
    payments
        .expect_update_payment()
        .withf(|_, update| {
            update.status == Some(PaymentStatus::Failed) && update.error_message.is_some()
        })
        .returning(move |_, _| Ok(payment.clone()));

    let mut reservations = MockReservationRepository::new();
    let lookup = reservation.clone();
    reservations
        .expect_find_reservation_by_id()
        .returning(move |_| Ok(Some(lookup.clone())));
    reservations
        .expect_update_reservation()
        .withf(|_, update| {
            update.status == Some(ReservationStatus::Cancelled)
                && update.payment_status == Some(ReservationPaymentStatus::Expired)
        })
        .returning(move |_, _| Ok(reservation.clone()));

    // Vehicle mock untouched: an expired deposit never rented the car out.
    let use_case = use_case(
        payments,
        reservations,
        MockVehicleRepository::new(),
        MockBranchRepository::new(),
        MockTossGateway::new(),
    );

    use_case
        .handle_webhook(webhook_event(
            EVENT_PAYMENT_STATUS_CHANGED,
            json!({ "orderId": order_id, "status": "EXPIRED", "paymentKey": null }),
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn settlement_completes_overall_once_both_sides_land() {
    let mut payment = sample_payment(PaymentStatus::Completed);
    payment.branch_settlement_status = SettlementStatus::Completed;
    payment.hq_settlement_status = SettlementStatus::Processing;
    let order_id = payment.order_id.clone();

    let mut payments = MockPaymentRepository::new();
    let lookup = payment.clone();
    payments
        .expect_find_payment_by_order_id()
        .returning(move |_| Ok(Some(lookup.clone())));
    payments
        .expect_update_payment()
        .withf(|_, update| {
            update.hq_settlement_status == Some(SettlementStatus::Completed)
                && update.hq_settled_amount == Some(10_000)
                && update.settlement_status == Some(SettlementStatus::Completed)
        })
        .returning(move |_, _| Ok(payment.clone()));

    let use_case = use_case(
        payments,
        MockReservationRepository::new(),
        MockVehicleRepository::new(),
        MockBranchRepository::new(),
        MockTossGateway::new(),
    );

    use_case
        .handle_webhook(webhook_event(
            EVENT_SETTLEMENT_COMPLETED,
            json!({ "orderId": order_id, "subMerchantId": HQ_SUBMERCHANT, "amount": 10_000 }),
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn settlement_failure_records_the_reason() {
    let payment = sample_payment(PaymentStatus::Completed);
    let order_id = payment.order_id.clone();

    let mut payments = MockPaymentRepository::new();
    let lookup = payment.clone();
    payments
        .expect_find_payment_by_order_id()
        .returning(move |_| Ok(Some(lookup.clone())));
    payments
        .expect_update_payment()
        .withf(|_, update| {
            update.branch_settlement_status == Some(SettlementStatus::Failed)
                && update.settlement_status == Some(SettlementStatus::Failed)
                && update.settlement_error.as_deref() == Some("정산 계좌 오류")
        })
        .returning(move |_, _| Ok(payment.clone()));

    let use_case = use_case(
        payments,
        MockReservationRepository::new(),
        MockVehicleRepository::new(),
        MockBranchRepository::new(),
        MockTossGateway::new(),
    );

    use_case
        .handle_webhook(webhook_event(
            EVENT_SETTLEMENT_FAILED,
            json!({
                "orderId": order_id,
                "subMerchantId": BRANCH_SUBMERCHANT,
                "reason": "정산 계좌 오류"
            }),
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn unknown_webhook_event_is_acknowledged_and_dropped() {
    let use_case = use_case(
        MockPaymentRepository::new(),
        MockReservationRepository::new(),
        MockVehicleRepository::new(),
        MockBranchRepository::new(),
        MockTossGateway::new(),
    );

    use_case
        .handle_webhook(webhook_event("DEPOSIT_CALLBACK_V2", json!({})))
        .await
        .unwrap();
}

#[tokio::test]
async fn virtual_account_lookup_before_issue_is_a_client_error() {
    let payment = PaymentEntity {
        method: PaymentMethod::VirtualAccount,
        ..sample_payment(PaymentStatus::Pending)
    };
    let payment_id = payment.id;

    let mut payments = MockPaymentRepository::new();
    payments
        .expect_find_payment_by_id()
        .returning(move |_| Ok(Some(payment.clone())));

    let use_case = use_case(
        payments,
        MockReservationRepository::new(),
        MockVehicleRepository::new(),
        MockBranchRepository::new(),
        MockTossGateway::new(),
    );

    let err = use_case.get_virtual_account(payment_id).await.unwrap_err();
    assert!(matches!(err, PaymentError::VirtualAccountNotIssued));
}

#[tokio::test]
async fn order_ids_carry_prefix_timestamp_and_suffix() {
    let order_id = generate_order_id();
    let parts: Vec<&str> = order_id.split('-').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "CHNLJ");
    assert_eq!(parts[1].len(), 14);
    assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(parts[2].len(), 6);
    assert!(parts[2].chars().all(|c| c.is_ascii_alphanumeric()));
}
