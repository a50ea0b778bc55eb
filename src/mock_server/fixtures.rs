//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::NaiveDate;

use crate::{Line, PaymentType, Purchase, ReferenceType};

/// Realm id used by the default scenario.
pub const DEFAULT_REALM_ID: &str = "123145";

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Purchase Fixtures
    // =========================================================================

    /// A purchase with just the fields the server requires: a paying account,
    /// a payment type and one expense line.
    pub fn minimal_purchase(amount: f64) -> Purchase {
        Purchase::new(PaymentType::Cash, ReferenceType::named("35", "Checking"))
            .with_line(Line::account_expense(amount, ReferenceType::new("7")))
    }

    /// A credit card purchase from a vendor, as the server would return it.
    pub fn stored_purchase(id: &str, amount: f64) -> Purchase {
        let mut purchase = Self::minimal_purchase(amount);
        purchase.id = Some(id.to_string());
        purchase.sync_token = Some("0".to_string());
        purchase.payment_type = Some(PaymentType::CreditCard);
        purchase.account_ref = Some(ReferenceType::named("42", "Visa"));
        purchase.entity_ref = Some(ReferenceType::named("56", "Bob's Burger Joint"));
        purchase.total_amt = Some(amount);
        purchase.txn_date = NaiveDate::from_ymd_opt(2015, 7, 27);
        purchase
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// Create a default set of test data for common scenarios.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario.
pub struct DefaultScenario {
    pub realm_id: String,
    pub purchases: Vec<Purchase>,
}

impl DefaultScenario {
    fn new() -> Self {
        Self {
            realm_id: DEFAULT_REALM_ID.to_string(),
            purchases: vec![
                Fixtures::stored_purchase("252", 10.0),
                Fixtures::stored_purchase("253", 337.5),
            ],
        }
    }
}
