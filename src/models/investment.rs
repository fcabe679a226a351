//! Investment records and scheme types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Fixed-term savings scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemeType {
    /// National Savings Certificate
    Nsc,
    /// Monthly Income Scheme
    Mis,
    /// Fixed deposit
    Fd,
    /// Kisan Vikas Patra
    Kvp,
}

impl SchemeType {
    /// All schemes, in form display order
    pub fn all() -> &'static [SchemeType] {
        &[SchemeType::Nsc, SchemeType::Mis, SchemeType::Fd, SchemeType::Kvp]
    }

    /// Wire code ("NSC", "MIS", ...)
    pub fn code(&self) -> &'static str {
        match self {
            SchemeType::Nsc => "NSC",
            SchemeType::Mis => "MIS",
            SchemeType::Fd => "FD",
            SchemeType::Kvp => "KVP",
        }
    }

    /// Conventional term in months, used for the suggested maturity date
    pub fn term_months(&self) -> u32 {
        match self {
            // KVP doubles the principal in roughly 9 years 7 months
            SchemeType::Kvp => 115,
            SchemeType::Nsc | SchemeType::Mis => 5 * 12,
            SchemeType::Fd => 12,
        }
    }
}

impl std::fmt::Display for SchemeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SchemeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NSC" => Ok(SchemeType::Nsc),
            "MIS" => Ok(SchemeType::Mis),
            "FD" => Ok(SchemeType::Fd),
            "KVP" => Ok(SchemeType::Kvp),
            other => Err(format!("Unknown scheme type: {}. Use NSC, MIS, FD or KVP", other)),
        }
    }
}

/// Lifecycle status of an investment
///
/// Statuses the server may add later are kept as [`InvestmentStatus::Other`]
/// instead of failing the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InvestmentStatus {
    Active,
    Matured,
    Followup,
    Reinvested,
    Closed,
    Other(String),
}

impl InvestmentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            InvestmentStatus::Active => "ACTIVE",
            InvestmentStatus::Matured => "MATURED",
            InvestmentStatus::Followup => "FOLLOWUP",
            InvestmentStatus::Reinvested => "REINVESTED",
            InvestmentStatus::Closed => "CLOSED",
            InvestmentStatus::Other(s) => s,
        }
    }
}

impl Default for InvestmentStatus {
    fn default() -> Self {
        InvestmentStatus::Active
    }
}

impl From<String> for InvestmentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "ACTIVE" => InvestmentStatus::Active,
            "MATURED" => InvestmentStatus::Matured,
            "FOLLOWUP" => InvestmentStatus::Followup,
            "REINVESTED" => InvestmentStatus::Reinvested,
            "CLOSED" => InvestmentStatus::Closed,
            _ => InvestmentStatus::Other(s),
        }
    }
}

impl From<InvestmentStatus> for String {
    fn from(status: InvestmentStatus) -> Self {
        match status {
            InvestmentStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for InvestmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An investment as returned by `GET /investments/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub investment_id: String,
    pub customer_id: String,
    pub scheme_type: SchemeType,
    pub principal: f64,
    pub start_date: NaiveDate,
    pub maturity_date: NaiveDate,
    #[serde(default)]
    pub status: InvestmentStatus,
    /// Follow-up stage (F10, F5, ... P30) tracked by the server
    #[serde(default)]
    pub current_stage: Option<String>,
}

impl Investment {
    /// First eight characters of the id, for compact tables
    pub fn short_id(&self) -> String {
        let prefix: String = self.investment_id.chars().take(8).collect();
        format!("{}...", prefix)
    }
}

/// Body for `POST /investments/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewInvestment {
    pub customer_id: String,
    pub scheme_type: SchemeType,
    pub principal: f64,
    pub start_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub status: InvestmentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_investment_deserialize() {
        let json = r#"{
            "investment_id": "0f8e2a9c-1111-2222-3333-444455556666",
            "customer_id": "c-1",
            "scheme_type": "KVP",
            "principal": 50000.0,
            "start_date": "2024-01-15",
            "maturity_date": "2033-08-15",
            "status": "ACTIVE",
            "current_stage": null
        }"#;
        let inv: Investment = serde_json::from_str(json).unwrap();

        assert_eq!(inv.scheme_type, SchemeType::Kvp);
        assert_eq!(inv.status, InvestmentStatus::Active);
        assert_eq!(inv.start_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(inv.short_id(), "0f8e2a9c...");
    }

    #[test]
    fn test_unknown_status_preserved() {
        let status: InvestmentStatus = serde_json::from_str(r#""ON_HOLD""#).unwrap();
        assert_eq!(status, InvestmentStatus::Other("ON_HOLD".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""ON_HOLD""#);
    }

    #[test]
    fn test_new_investment_wire_format() {
        let body = NewInvestment {
            customer_id: "c-1".to_string(),
            scheme_type: SchemeType::Fd,
            principal: 10000.0,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            maturity_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            status: InvestmentStatus::Active,
        };
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["scheme_type"], "FD");
        assert_eq!(value["start_date"], "2024-01-15");
        assert_eq!(value["status"], "ACTIVE");
    }

    #[test]
    fn test_scheme_from_str() {
        assert_eq!("kvp".parse::<SchemeType>().unwrap(), SchemeType::Kvp);
        assert_eq!(" NSC ".parse::<SchemeType>().unwrap(), SchemeType::Nsc);
        assert!("PPF".parse::<SchemeType>().is_err());
    }
}
