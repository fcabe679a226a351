//! Customer records

use serde::{Deserialize, Serialize};

/// A customer as returned by `GET /customers/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub full_name: String,
    pub mobile: String,
    /// Whether the customer consented to data use
    #[serde(default)]
    pub consent_flag: bool,
    /// Owning agent
    #[serde(default)]
    pub agent_id: Option<String>,
    /// When consent was recorded (server timestamp, kept verbatim)
    #[serde(default)]
    pub consent_time: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Customer {
    /// Human-readable consent status
    pub fn consent_label(&self) -> &'static str {
        if self.consent_flag {
            "Consent Given"
        } else {
            "Pending Consent"
        }
    }
}

/// Body for `POST /customers/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCustomer {
    pub full_name: String,
    pub mobile: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_minimal_body() {
        let json = r#"{"customer_id":"c-1","full_name":"Asha Devi","mobile":"9000000001"}"#;
        let customer: Customer = serde_json::from_str(json).unwrap();

        assert!(!customer.consent_flag);
        assert_eq!(customer.consent_label(), "Pending Consent");
        assert!(customer.created_at.is_none());
    }

    #[test]
    fn test_customer_full_body() {
        let json = r#"{
            "customer_id": "c-2",
            "full_name": "Mohan Lal",
            "mobile": "9000000002",
            "consent_flag": true,
            "agent_id": "a-1",
            "consent_time": "2024-03-01T10:00:00",
            "created_at": "2024-02-01T09:30:00.123456"
        }"#;
        let customer: Customer = serde_json::from_str(json).unwrap();

        assert_eq!(customer.consent_label(), "Consent Given");
        assert_eq!(customer.agent_id.as_deref(), Some("a-1"));
    }
}
