/// Payment lifecycle: submission, verification checks, admin review.
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{timestamp_id, Payment, PaymentStatus};
use crate::realtime::{Broadcaster, RealtimeEvent};
use crate::store::{MediaStore, Stores};

#[derive(Clone)]
pub struct PaymentService {
    stores: Arc<Stores>,
    proofs: MediaStore,
    broadcaster: Broadcaster,
}

/// Verification status derived from the most recently submitted payment.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentCheck {
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,
}

/// Payment enriched with the submitting user's contact details.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPayment {
    #[serde(flatten)]
    pub payment: Payment,
    pub user_first_name: String,
    pub user_phone: String,
}

impl PaymentService {
    pub fn new(stores: Arc<Stores>, proofs: MediaStore, broadcaster: Broadcaster) -> Self {
        Self {
            stores,
            proofs,
            broadcaster,
        }
    }

    pub async fn submit(
        &self,
        username: &str,
        proof_bytes: &[u8],
        proof_original_name: &str,
    ) -> Result<Payment> {
        let proof_filename = self.proofs.store(proof_bytes, proof_original_name).await?;
        let payment = Payment {
            id: timestamp_id(),
            username: username.to_string(),
            proof_filename,
            status: PaymentStatus::Pending,
            date: Utc::now(),
        };

        let submitted = payment.clone();
        self.stores
            .payments
            .mutate(move |doc| {
                doc.payments.insert(0, payment);
                Ok(())
            })
            .await?;

        tracing::info!(id = %submitted.id, %username, "payment proof submitted");
        self.broadcaster
            .publish(&RealtimeEvent::PaymentAdded(submitted.clone()))
            .await;
        Ok(submitted)
    }

    /// "Most recent" is the first match in insertion order (payments are
    /// prepended on submit), not the one with the latest date field.
    pub async fn check(&self, username: &str) -> Result<PaymentCheck> {
        let doc = self.stores.payments.read().await?;
        let latest = doc
            .payments
            .iter()
            .find(|p| p.username == username)
            .cloned();

        Ok(match latest {
            Some(payment) => PaymentCheck {
                verified: payment.status == PaymentStatus::Approved,
                payment: Some(payment),
            },
            None => PaymentCheck {
                verified: false,
                payment: None,
            },
        })
    }

    pub async fn list_for_admin(&self) -> Result<Vec<AdminPayment>> {
        let payments = self.stores.payments.read().await?.payments;
        let users = self.stores.users.read().await?.users;

        Ok(payments
            .into_iter()
            .map(|payment| {
                let user = users.iter().find(|u| u.username == payment.username);
                AdminPayment {
                    user_first_name: user
                        .map(|u| u.firstname.clone())
                        .unwrap_or_else(|| "Unknown".to_string()),
                    user_phone: user
                        .map(|u| u.phone.clone())
                        .unwrap_or_else(|| "Unknown".to_string()),
                    payment,
                }
            })
            .collect())
    }

    /// Approve a pending payment: the record leaves the collection and its
    /// proof file is deleted.
    pub async fn approve(&self, id: &str) -> Result<()> {
        let (proof_filename, username) = self
            .stores
            .payments
            .mutate(|doc| {
                let idx = doc
                    .payments
                    .iter()
                    .position(|p| p.id == id)
                    .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))?;
                if doc.payments[idx].status != PaymentStatus::Pending {
                    return Err(AppError::InvalidState(
                        "Payment already resolved".to_string(),
                    ));
                }
                let payment = doc.payments.remove(idx);
                Ok((payment.proof_filename, payment.username))
            })
            .await?;

        self.proofs.delete(&proof_filename).await;

        tracing::info!(%id, %username, "payment approved");
        self.broadcaster
            .publish(&RealtimeEvent::PaymentApproved {
                payment_id: id.to_string(),
                username,
            })
            .await;
        Ok(())
    }

    /// Reject a pending payment: the record is kept with status `rejected`
    /// and its proof file is deleted.
    pub async fn reject(&self, id: &str) -> Result<()> {
        let proof_filename = self
            .stores
            .payments
            .mutate(|doc| {
                let payment = doc
                    .payments
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))?;
                if payment.status != PaymentStatus::Pending {
                    return Err(AppError::InvalidState(
                        "Payment already resolved".to_string(),
                    ));
                }
                payment.status = PaymentStatus::Rejected;
                Ok(payment.proof_filename.clone())
            })
            .await?;

        self.proofs.delete(&proof_filename).await;

        tracing::info!(%id, "payment rejected");
        self.broadcaster
            .publish(&RealtimeEvent::PaymentRejected {
                payment_id: id.to_string(),
            })
            .await;
        Ok(())
    }
}
