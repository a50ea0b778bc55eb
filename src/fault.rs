//! Structured QuickBooks error bodies.
//!
//! A rejected request comes back with a non-200 status and a body like:
//!
//! ```json
//! {
//!   "Fault": {
//!     "Error": [{
//!       "Message": "Required param missing, need to supply the required value for the API",
//!       "Detail": "Required parameter Line is missing in the request",
//!       "code": "2020",
//!       "element": "Line"
//!     }],
//!     "type": "ValidationFault"
//!   },
//!   "time": "2015-07-29T09:29:56.229-07:00"
//! }
//! ```
//!
//! The authentication gateway sends the same shape with lowercase keys.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A remote rejection, decoded from the response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fault {
    /// Fault category (e.g. "ValidationFault", "AuthenticationFault").
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Individual errors reported by the server.
    #[serde(rename = "Error", alias = "error", default)]
    pub errors: Vec<FaultError>,
}

/// A single error entry inside a [`Fault`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaultError {
    #[serde(rename = "Message", alias = "message", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(rename = "Detail", alias = "detail", skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Machine-readable error code (e.g. "2020", "6240").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// The request element the error refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
}

impl Fault {
    /// Wrap the body of a response that is not a fault envelope.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            kind: None,
            errors: vec![FaultError {
                message: Some(message.into()),
                ..Default::default()
            }],
        }
    }

    /// Code of the first reported error.
    pub fn code(&self) -> Option<&str> {
        self.errors.iter().find_map(|e| e.code.as_deref())
    }

    /// Message of the first reported error.
    pub fn message(&self) -> Option<&str> {
        self.errors.iter().find_map(|e| e.message.as_deref())
    }

    /// Detail of the first reported error.
    pub fn detail(&self) -> Option<&str> {
        self.errors.iter().find_map(|e| e.detail.as_deref())
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.errors.first() else {
            return match &self.kind {
                Some(kind) => write!(f, "{kind}"),
                None => write!(f, "request rejected without error detail"),
            };
        };

        if let Some(kind) = &self.kind {
            write!(f, "{kind}: ")?;
        }
        if let Some(code) = &first.code {
            write!(f, "[{code}] ")?;
        }
        write!(f, "{}", first.message.as_deref().unwrap_or("unknown error"))?;
        if let Some(detail) = &first.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

/// Decode a rejected response body into a [`Fault`].
///
/// Never fails. JSON bodies are scanned for recognizable fields with
/// case-insensitive keys, so envelopes that deviate from the documented
/// casing or types keep every field they carry. A non-JSON body becomes the
/// message verbatim.
pub fn parse_failure(body: &[u8]) -> Fault {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        if let Some(fault) = loose_fault(&value) {
            return fault;
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        Fault::default()
    } else {
        Fault::from_message(text)
    }
}

/// Pull whatever fault information a JSON value carries, tolerating wrong
/// field types and missing wrappers.
fn loose_fault(value: &Value) -> Option<Fault> {
    let root = value.as_object()?;
    let fault_obj = get_ci(root, "fault").and_then(Value::as_object);

    if let Some(obj) = fault_obj {
        let errors = match get_ci(obj, "error") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_object)
                .map(loose_error)
                .collect(),
            Some(Value::Object(single)) => vec![loose_error(single)],
            Some(other) => scalar_string(other)
                .map(|message| Fault::from_message(message).errors)
                .unwrap_or_default(),
            None => Vec::new(),
        };
        return Some(Fault {
            kind: get_ci(obj, "type").and_then(scalar_string),
            errors,
        });
    }

    let error = loose_error(root);
    if error == FaultError::default() {
        // Plain `{"error": "..."}` bodies from intermediaries.
        return get_ci(root, "error")
            .and_then(scalar_string)
            .map(Fault::from_message);
    }
    Some(Fault {
        kind: None,
        errors: vec![error],
    })
}

fn loose_error(obj: &Map<String, Value>) -> FaultError {
    FaultError {
        message: get_ci(obj, "message").and_then(scalar_string),
        detail: get_ci(obj, "detail").and_then(scalar_string),
        code: get_ci(obj, "code").and_then(scalar_string),
        element: get_ci(obj, "element").and_then(scalar_string),
    }
}

fn get_ci<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validation_fault() {
        let body = br#"{
            "Fault": {
                "Error": [{
                    "Message": "Required param missing, need to supply the required value for the API",
                    "Detail": "Required parameter Line is missing in the request",
                    "code": "2020",
                    "element": "Line"
                }],
                "type": "ValidationFault"
            },
            "time": "2015-07-29T09:29:56.229-07:00"
        }"#;

        let fault = parse_failure(body);
        assert_eq!(fault.kind.as_deref(), Some("ValidationFault"));
        assert_eq!(fault.code(), Some("2020"));
        assert_eq!(fault.errors[0].element.as_deref(), Some("Line"));
        assert!(fault.message().unwrap().starts_with("Required param missing"));
    }

    #[test]
    fn test_parse_lowercase_auth_fault() {
        let body = br#"{"fault":{"error":[{"message":"message=AuthenticationFailed","detail":"Token expired","code":"3200"}],"type":"SERVICE"},"requestId":"abc"}"#;

        let fault = parse_failure(body);
        assert_eq!(fault.kind.as_deref(), Some("SERVICE"));
        assert_eq!(fault.code(), Some("3200"));
        assert_eq!(fault.detail(), Some("Token expired"));
    }

    #[test]
    fn test_parse_numeric_code_is_tolerated() {
        let body = br#"{"Fault":{"Error":[{"Message":"Stale object","code":5010}],"type":"ValidationFault"}}"#;

        let fault = parse_failure(body);
        assert_eq!(fault.code(), Some("5010"));
        assert_eq!(fault.message(), Some("Stale object"));
    }

    #[test]
    fn test_parse_capitalized_code() {
        let body = br#"{"Fault":{"Error":[{"Message":"Duplicate Document Number Error","Code":"6140"}],"type":"ValidationFault"}}"#;

        let fault = parse_failure(body);
        assert_eq!(fault.code(), Some("6140"));
        assert_eq!(
            fault.to_string(),
            "ValidationFault: [6140] Duplicate Document Number Error"
        );
    }

    #[test]
    fn test_parse_scalar_error_keeps_message() {
        let body = br#"{"Fault":{"Error":"Token expired","type":"AUTHENTICATION"}}"#;

        let fault = parse_failure(body);
        assert_eq!(fault.kind.as_deref(), Some("AUTHENTICATION"));
        assert_eq!(fault.message(), Some("Token expired"));
        assert_eq!(fault.to_string(), "AUTHENTICATION: Token expired");
    }

    #[test]
    fn test_parse_flat_error_object() {
        let fault = parse_failure(br#"{"error": "invalid_grant"}"#);
        assert_eq!(fault.message(), Some("invalid_grant"));
        assert!(fault.kind.is_none());
    }

    #[test]
    fn test_parse_non_json_body() {
        let fault = parse_failure(b"<html>Bad Gateway</html>");
        assert_eq!(fault.message(), Some("<html>Bad Gateway</html>"));
    }

    #[test]
    fn test_parse_empty_body() {
        let fault = parse_failure(b"");
        assert!(fault.errors.is_empty());
        assert_eq!(fault.to_string(), "request rejected without error detail");
    }

    #[test]
    fn test_parse_truncated_json() {
        let fault = parse_failure(br#"{"Fault":{"Error":[{"Message":"cut"#);
        assert!(fault.message().unwrap().contains("cut"));
    }

    #[test]
    fn test_display() {
        let fault = Fault {
            kind: Some("ValidationFault".to_string()),
            errors: vec![FaultError {
                message: Some("Invalid Reference Id".to_string()),
                detail: Some("Account assigned to this transaction has been deleted".to_string()),
                code: Some("610".to_string()),
                element: None,
            }],
        };
        assert_eq!(
            fault.to_string(),
            "ValidationFault: [610] Invalid Reference Id (Account assigned to this transaction has been deleted)"
        );
    }
}
