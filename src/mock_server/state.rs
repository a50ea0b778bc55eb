//! Mock server state management.
//!
//! Provides the in-memory data store for the mock QuickBooks API server.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use tokio::sync::RwLock;

use crate::{Fault, FaultError, MetaData, Purchase};

/// A request the server has seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub minor_version: Option<String>,
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug)]
pub struct MockState {
    /// Purchases indexed by id.
    pub purchases: HashMap<String, Purchase>,

    /// If set, requests for any other realm are rejected.
    pub realm_id: Option<String>,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,

    /// Every request received, in order.
    pub requests: Vec<RecordedRequest>,

    next_id: u64,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            purchases: HashMap::new(),
            realm_id: None,
            required_token: None,
            requests: Vec::new(),
            next_id: 1,
        }
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a stored purchase. It must carry an id.
    pub fn with_purchase(mut self, purchase: Purchase) -> Self {
        self.insert_purchase(purchase);
        self
    }

    /// Only accept requests for this realm.
    pub fn with_realm(mut self, realm_id: &str) -> Self {
        self.realm_id = Some(realm_id.to_string());
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Store a purchase under its id, keeping generated ids unique.
    pub fn insert_purchase(&mut self, purchase: Purchase) {
        let Some(id) = purchase.id.clone() else {
            return;
        };
        if let Ok(numeric) = id.parse::<u64>() {
            self.next_id = self.next_id.max(numeric.saturating_add(1));
        }
        self.purchases.insert(id, purchase);
    }

    /// Get a purchase by id.
    pub fn get_purchase(&self, id: &str) -> Option<&Purchase> {
        self.purchases.get(id)
    }

    /// Whether requests for `realm_id` are served.
    pub fn accepts_realm(&self, realm_id: &str) -> bool {
        self.realm_id.as_deref().map_or(true, |r| r == realm_id)
    }

    /// Validate and store a new purchase, assigning server-side fields.
    ///
    /// Every call creates a new purchase, even for identical input.
    pub fn create_purchase(&mut self, mut purchase: Purchase) -> Result<Purchase, Fault> {
        validate_purchase(&purchase)?;

        let id = self.next_id.to_string();
        self.next_id = self.next_id.saturating_add(1);

        let now: DateTime<FixedOffset> = Utc::now().into();
        purchase.id = Some(id.clone());
        purchase.sync_token = Some("0".to_string());
        purchase.meta_data = Some(MetaData {
            create_time: Some(now),
            last_updated_time: Some(now),
        });
        if purchase.total_amt.is_none() {
            purchase.total_amt = Some(purchase.line.iter().filter_map(|l| l.amount).sum());
        }
        if purchase.txn_date.is_none() {
            purchase.txn_date = Some(now.date_naive());
        }

        self.purchases.insert(id, purchase.clone());
        Ok(purchase)
    }
}

fn validate_purchase(purchase: &Purchase) -> Result<(), Fault> {
    let missing = if purchase.account_ref.is_none() {
        Some("AccountRef")
    } else if purchase.payment_type.is_none() {
        Some("PaymentType")
    } else if purchase.line.is_empty() {
        Some("Line")
    } else {
        None
    };

    match missing {
        Some(element) => Err(Fault {
            kind: Some("ValidationFault".to_string()),
            errors: vec![FaultError {
                message: Some(
                    "Required param missing, need to supply the required value for the API"
                        .to_string(),
                ),
                detail: Some(format!(
                    "Required parameter {element} is missing in the request"
                )),
                code: Some("2020".to_string()),
                element: Some(element.to_string()),
            }],
        }),
        None => Ok(()),
    }
}
