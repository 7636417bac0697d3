use anyhow::Result;
use base64::Engine;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

const TOSS_API_BASE: &str = "https://api.tosspayments.com";

/// Minimal Toss Payments client built on reqwest.
pub struct TossClient {
    http: reqwest::Client,
    secret_key: String,
}

/// Payment object returned by the confirm / cancel / virtual-account
/// endpoints. Only the fields the workflow reads are modeled.
#[derive(Debug, Clone, Deserialize)]
pub struct TossPayment {
    #[serde(rename = "paymentKey")]
    pub payment_key: String,
    #[serde(rename = "orderId")]
    pub order_id: String,
    pub status: String,
    #[serde(rename = "totalAmount")]
    pub total_amount: Option<i64>,
    #[serde(rename = "approvedAt")]
    pub approved_at: Option<String>,
    pub card: Option<TossCard>,
    #[serde(rename = "virtualAccount")]
    pub virtual_account: Option<TossVirtualAccount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TossCard {
    pub company: Option<String>,
    pub number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TossVirtualAccount {
    #[serde(rename = "accountNumber")]
    pub account_number: String,
    pub bank: Option<String>,
    #[serde(rename = "bankCode")]
    pub bank_code: Option<String>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IssueVirtualAccountRequest {
    pub order_id: String,
    pub order_name: String,
    pub amount: i64,
    pub bank: String,
    pub customer_name: String,
}

#[derive(Debug, Deserialize)]
struct TossErrorEnvelope {
    code: Option<String>,
    message: Option<String>,
}

impl TossClient {
    pub fn new(secret_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key,
        }
    }

    /// Toss API uses HTTP basic auth with the secret key as username and
    /// an empty password. https://docs.tosspayments.com/reference/using-api/authorization
    fn authorization(&self) -> String {
        let encoded =
            base64::engine::general_purpose::STANDARD.encode(format!("{}:", self.secret_key));
        format!("Basic {}", encoded)
    }

    async fn ensure_success(resp: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let (toss_error_code, toss_error_message) =
            match serde_json::from_str::<TossErrorEnvelope>(&body) {
                Ok(envelope) => (envelope.code, envelope.message),
                Err(_) => (None, None),
            };

        error!(
            status = %status,
            toss_error_code = ?toss_error_code,
            toss_error_message = ?toss_error_message,
            response_body = %body,
            context = %context,
            "toss api request failed"
        );

        // The gateway message is surfaced to the caller as-is.
        match toss_error_message {
            Some(message) => anyhow::bail!("{}", message),
            None => anyhow::bail!(
                "Toss API request failed: {} (status {})",
                context,
                status
            ),
        }
    }

    /// Confirms an authorized payment.
    /// https://docs.tosspayments.com/reference#confirm
    pub async fn confirm_payment(
        &self,
        payment_key: &str,
        order_id: &str,
        amount: i64,
    ) -> Result<TossPayment> {
        let resp = self
            .http
            .post(format!("{}/v1/payments/confirm", TOSS_API_BASE))
            .header(AUTHORIZATION, self.authorization())
            .header(CONTENT_TYPE, "application/json")
            .json(&json!({
                "paymentKey": payment_key,
                "orderId": order_id,
                "amount": amount,
            }))
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "confirm payment").await?;

        let payment: TossPayment = resp.json().await?;
        Ok(payment)
    }

    /// Cancels a confirmed payment, fully when `cancel_amount` is None.
    /// https://docs.tosspayments.com/reference#cancel
    pub async fn cancel_payment(
        &self,
        payment_key: &str,
        cancel_reason: &str,
        cancel_amount: Option<i64>,
    ) -> Result<TossPayment> {
        let mut body = json!({ "cancelReason": cancel_reason });
        if let Some(amount) = cancel_amount {
            body["cancelAmount"] = json!(amount);
        }

        let resp = self
            .http
            .post(format!(
                "{}/v1/payments/{}/cancel",
                TOSS_API_BASE, payment_key
            ))
            .header(AUTHORIZATION, self.authorization())
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "cancel payment").await?;

        let payment: TossPayment = resp.json().await?;
        Ok(payment)
    }

    /// Issues a one-time bank account number for a deposit payment.
    /// https://docs.tosspayments.com/reference#virtual-account
    pub async fn issue_virtual_account(
        &self,
        request: IssueVirtualAccountRequest,
    ) -> Result<TossPayment> {
        let resp = self
            .http
            .post(format!("{}/v1/virtual-accounts", TOSS_API_BASE))
            .header(AUTHORIZATION, self.authorization())
            .header(CONTENT_TYPE, "application/json")
            .json(&json!({
                "amount": request.amount,
                "orderId": request.order_id,
                "orderName": request.order_name,
                "customerName": request.customer_name,
                "bank": request.bank,
            }))
            .send()
            .await?;
        let resp = Self::ensure_success(resp, "issue virtual account").await?;

        let payment: TossPayment = resp.json().await?;
        Ok(payment)
    }
}
