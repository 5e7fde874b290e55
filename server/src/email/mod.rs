//! Outbound email
//!
//! Order confirmations are fire-and-forget: callers spawn the send after the
//! order transaction commits, and a delivery failure is logged, never
//! surfaced to the customer.

use async_trait::async_trait;
use aws_sdk_sesv2::Client as SesClient;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use shared::models::OrderReceipt;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_order_confirmation(
        &self,
        to: &str,
        display_name: &str,
        receipt: &OrderReceipt,
    ) -> Result<(), BoxError>;
}

/// Amazon SES delivery
pub struct SesMailer {
    client: SesClient,
    from: String,
}

impl SesMailer {
    pub fn new(client: SesClient, from: String) -> Self {
        Self { client, from }
    }
}

#[async_trait]
impl Mailer for SesMailer {
    async fn send_order_confirmation(
        &self,
        to: &str,
        display_name: &str,
        receipt: &OrderReceipt,
    ) -> Result<(), BoxError> {
        let subject = Content::builder()
            .data(format!("Order confirmed — claim code {}", receipt.claim_code))
            .build()?;

        let body_text = format!(
            "Hi {display_name},\n\n\
             Thanks for your order! Bring this claim code to the pickup desk:\n\n\
             \t{}\n\n\
             Order total: ${:.2} (discount applied: ${:.2})\n\n\
             Your books are reserved and waiting for you.",
            receipt.claim_code, receipt.total_amount, receipt.discount_applied,
        );

        let body = Body::builder()
            .text(Content::builder().data(body_text).build()?)
            .build();

        let message = Message::builder().subject(subject).body(body).build();

        self.client
            .send_email()
            .from_email_address(&self.from)
            .destination(Destination::builder().to_addresses(to).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await?;

        tracing::info!(to = to, order_id = receipt.order_id, "Order confirmation sent");
        Ok(())
    }
}

/// Log-only delivery, used when no sender address is configured
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_order_confirmation(
        &self,
        to: &str,
        _display_name: &str,
        receipt: &OrderReceipt,
    ) -> Result<(), BoxError> {
        tracing::info!(
            to = to,
            order_id = receipt.order_id,
            claim_code = %receipt.claim_code,
            "Email delivery disabled; order confirmation logged only"
        );
        Ok(())
    }
}
