//! Checkout flow state machine.

use crate::cart::Cart;
use crate::checkout::{ContactDetails, OrderSubmitter, OrderSummary, SubmitError};
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutStep {
    /// Menu and cart pages; no form open.
    #[default]
    Browsing,
    /// Order form open, waiting for contact details.
    OrderForm,
    /// Order delivered; confirmation shown until acknowledged.
    Confirmed,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Browsing => "browsing",
            CheckoutStep::OrderForm => "order_form",
            CheckoutStep::Confirmed => "confirmed",
        }
    }
}

/// Errors from checkout operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    /// Action not allowed in the current step.
    #[error("Cannot {action} while {from}")]
    InvalidTransition { from: &'static str, action: &'static str },
}

/// What was sent for a confirmed order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OrderReceipt {
    /// The exact text handed to the submitter.
    pub text: String,
    /// Grand total at submission time.
    pub total: Money,
    /// Item count at submission time.
    pub item_count: i64,
}

/// Drives a cart from browsing through the order form to confirmation.
///
/// The flow never owns the cart. It only clears it on `acknowledge`, after
/// a confirmed submission.
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    summary: OrderSummary,
    receipt: Option<OrderReceipt>,
}

impl CheckoutFlow {
    /// Create a flow formatting amounts with the default currency symbol.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a flow with a specific summary formatter.
    pub fn with_summary(summary: OrderSummary) -> Self {
        Self {
            summary,
            ..Self::default()
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Receipt of the confirmed order, if any.
    pub fn receipt(&self) -> Option<&OrderReceipt> {
        self.receipt.as_ref()
    }

    /// Open the order form. Needs a non-empty cart.
    pub fn begin(&mut self, cart: &Cart) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::Browsing, "open the order form")?;
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart.into());
        }
        self.step = CheckoutStep::OrderForm;
        Ok(())
    }

    /// Close the order form without submitting.
    pub fn cancel(&mut self) -> Result<(), CheckoutError> {
        self.expect_step(CheckoutStep::OrderForm, "cancel the order form")?;
        self.step = CheckoutStep::Browsing;
        Ok(())
    }

    /// Validate, format and submit the order once.
    ///
    /// On any error the flow stays on the order form and the cart is left
    /// as it was, so the user can retry.
    pub async fn submit(
        &mut self,
        cart: &Cart,
        contact: &ContactDetails,
        submitter: &dyn OrderSubmitter,
    ) -> Result<&OrderReceipt, CheckoutError> {
        self.expect_step(CheckoutStep::OrderForm, "submit an order")?;
        contact.validate()?;
        let text = self.summary.format_cart(cart, contact)?;

        if let Err(e) = submitter.submit_order(&text).await {
            warn!(submitter = submitter.name(), error = %e, "order submission failed");
            return Err(e.into());
        }

        info!(
            submitter = submitter.name(),
            items = cart.item_count(),
            total = %cart.grand_total(),
            "order submitted"
        );
        self.step = CheckoutStep::Confirmed;
        Ok(self.receipt.insert(OrderReceipt {
            text,
            total: cart.grand_total(),
            item_count: cart.item_count(),
        }))
    }

    /// Dismiss the confirmation: clears the cart and returns to browsing.
    pub fn acknowledge(&mut self, cart: &mut Cart) -> Result<OrderReceipt, CheckoutError> {
        self.expect_step(CheckoutStep::Confirmed, "acknowledge a confirmation")?;
        let receipt = self.receipt.take().ok_or(CheckoutError::InvalidTransition {
            from: CheckoutStep::Confirmed.as_str(),
            action: "acknowledge a confirmation",
        })?;
        cart.clear();
        self.step = CheckoutStep::Browsing;
        Ok(receipt)
    }

    fn expect_step(&self, expected: CheckoutStep, action: &'static str) -> Result<(), CheckoutError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(CheckoutError::InvalidTransition {
                from: self.step.as_str(),
                action,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ItemId;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSubmitter {
        sent: Mutex<Vec<String>>,
        fail_with: Option<SubmitError>,
    }

    #[async_trait]
    impl OrderSubmitter for RecordingSubmitter {
        async fn submit_order(&self, text: &str) -> Result<(), SubmitError> {
            self.sent.lock().unwrap().push(text.to_string());
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }
    }

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_line(ItemId::new("soup"), "Soup", Money::new(150), 2, Vec::new(), "")
            .unwrap();
        cart
    }

    fn contact() -> ContactDetails {
        ContactDetails::new("Anna", "+7 900", "Lenina 1")
    }

    #[test]
    fn test_begin_requires_items() {
        let mut flow = CheckoutFlow::new();
        assert_eq!(
            flow.begin(&Cart::new()).unwrap_err(),
            CheckoutError::Commerce(CommerceError::EmptyCart)
        );
        assert_eq!(flow.step(), CheckoutStep::Browsing);

        flow.begin(&cart()).unwrap();
        assert_eq!(flow.step(), CheckoutStep::OrderForm);
    }

    #[test]
    fn test_cancel_returns_to_browsing() {
        let mut flow = CheckoutFlow::new();
        assert!(flow.cancel().is_err());
        flow.begin(&cart()).unwrap();
        flow.cancel().unwrap();
        assert_eq!(flow.step(), CheckoutStep::Browsing);
    }

    #[tokio::test]
    async fn test_submit_and_acknowledge_clears_cart() {
        let mut cart = cart();
        let submitter = RecordingSubmitter::default();
        let mut flow = CheckoutFlow::new();

        flow.begin(&cart).unwrap();
        let receipt = flow.submit(&cart, &contact(), &submitter).await.unwrap();
        assert_eq!(receipt.total, Money::new(300));
        assert_eq!(receipt.item_count, 2);
        assert_eq!(flow.step(), CheckoutStep::Confirmed);
        assert_eq!(cart.item_count(), 2);

        let sent = submitter.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("1. Soup - 2 шт. - 300"));

        let receipt = flow.acknowledge(&mut cart).unwrap();
        assert_eq!(receipt.text, sent[0]);
        assert!(cart.is_empty());
        assert_eq!(flow.step(), CheckoutStep::Browsing);
        assert!(flow.receipt().is_none());
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_cart_and_form() {
        let cart = cart();
        let submitter = RecordingSubmitter {
            fail_with: Some(SubmitError::Transport("connection refused".to_string())),
            ..Default::default()
        };
        let mut flow = CheckoutFlow::new();
        flow.begin(&cart).unwrap();

        let err = flow.submit(&cart, &contact(), &submitter).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Submit(SubmitError::Transport(_))));
        assert_eq!(flow.step(), CheckoutStep::OrderForm);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(submitter.sent.lock().unwrap().len(), 1);

        // Manual retry once the submitter recovers.
        let healthy = RecordingSubmitter::default();
        flow.submit(&cart, &contact(), &healthy).await.unwrap();
        assert_eq!(flow.step(), CheckoutStep::Confirmed);
    }

    #[tokio::test]
    async fn test_submit_validates_contact_before_sending() {
        let cart = cart();
        let submitter = RecordingSubmitter::default();
        let mut flow = CheckoutFlow::new();
        flow.begin(&cart).unwrap();

        let contact = ContactDetails::new("Anna", "", "Lenina 1");
        let err = flow.submit(&cart, &contact, &submitter).await.unwrap_err();
        assert_eq!(
            err,
            CheckoutError::Commerce(CommerceError::MissingField("phone"))
        );
        assert!(submitter.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_outside_order_form() {
        let cart = cart();
        let submitter = RecordingSubmitter::default();
        let mut flow = CheckoutFlow::new();

        let err = flow.submit(&cart, &contact(), &submitter).await.unwrap_err();
        assert_eq!(
            err,
            CheckoutError::InvalidTransition {
                from: "browsing",
                action: "submit an order",
            }
        );
    }
}
