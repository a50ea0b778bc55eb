//! Transaction line items.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;

use super::reference::ReferenceType;

/// `DetailType` of an account-based expense line.
pub const ACCOUNT_BASED_EXPENSE_LINE_DETAIL: &str = "AccountBasedExpenseLineDetail";

/// Wire keys owned by the typed fields of [`Line`].
const MODELED_KEYS: [&str; 6] = [
    "Id",
    "LineNum",
    "Description",
    "Amount",
    "DetailType",
    ACCOUNT_BASED_EXPENSE_LINE_DETAIL,
];

/// A line on a transaction.
///
/// Only the account-based expense detail is modeled. Any other detail object
/// (e.g. `ItemBasedExpenseLineDetail`) is kept in [`Line::other`] and sent
/// back unchanged.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Line {
    pub id: Option<String>,

    pub line_num: Option<u32>,

    pub description: Option<String>,

    pub amount: Option<f64>,

    /// Names which detail object the line carries.
    pub detail_type: Option<String>,

    pub account_based_expense_line_detail: Option<AccountBasedExpenseLineDetail>,

    /// Fields this crate does not model. Entries under a modeled key are
    /// never sent; the typed field owns that key.
    #[serde(flatten, serialize_with = "serialize_unmodeled")]
    pub other: Map<String, Value>,
}

fn serialize_unmodeled<S>(other: &Map<String, Value>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(
        other
            .iter()
            .filter(|(key, _)| !MODELED_KEYS.contains(&key.as_str())),
    )
}

impl Line {
    /// An expense line booked against an account.
    pub fn account_expense(amount: f64, account_ref: ReferenceType) -> Self {
        Self {
            amount: Some(amount),
            detail_type: Some(ACCOUNT_BASED_EXPENSE_LINE_DETAIL.to_string()),
            account_based_expense_line_detail: Some(AccountBasedExpenseLineDetail {
                account_ref: Some(account_ref),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// Set the line description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Detail of an expense line booked directly to an account.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountBasedExpenseLineDetail {
    pub account_ref: Option<ReferenceType>,

    pub billable_status: Option<BillableStatus>,

    pub tax_code_ref: Option<ReferenceType>,

    pub customer_ref: Option<ReferenceType>,

    pub tax_amount: Option<f64>,
}

/// Whether an expense can be passed on to a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillableStatus {
    Billable,
    NotBillable,
    HasBeenBilled,
}
