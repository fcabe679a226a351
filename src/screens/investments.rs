//! Investment list and add form

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::api::DeskApi;
use crate::fetch::Loadable;
use crate::maturity::{default_maturity, format_date, parse_date};
use crate::models::{Customer, Investment, InvestmentStatus, NewInvestment, SchemeType};

use super::{format_rupees, FormError};

/// Name shown when an investment's customer is not in the customer list
pub const UNKNOWN_CUSTOMER: &str = "Unknown";

/// Badge colour class for a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// ACTIVE
    Positive,
    /// MATURED
    Attention,
    Neutral,
}

impl StatusTone {
    pub fn of(status: &InvestmentStatus) -> Self {
        match status {
            InvestmentStatus::Active => StatusTone::Positive,
            InvestmentStatus::Matured => StatusTone::Attention,
            _ => StatusTone::Neutral,
        }
    }

    /// CSS class used by the dashboard stylesheet
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusTone::Positive => "badge badge-active",
            StatusTone::Attention => "badge badge-matured",
            StatusTone::Neutral => "badge",
        }
    }
}

/// customer_id -> full_name
pub fn customer_names(customers: &[Customer]) -> HashMap<String, String> {
    customers
        .iter()
        .map(|c| (c.customer_id.clone(), c.full_name.clone()))
        .collect()
}

/// One row of the investment table
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentRow {
    pub investment: Investment,
    pub customer_name: String,
}

impl InvestmentRow {
    pub fn principal_display(&self) -> String {
        format_rupees(self.investment.principal)
    }

    pub fn tone(&self) -> StatusTone {
        StatusTone::of(&self.investment.status)
    }
}

/// Join investments with customer names
pub fn investment_rows(investments: Vec<Investment>, customers: &[Customer]) -> Vec<InvestmentRow> {
    let names = customer_names(customers);
    investments
        .into_iter()
        .map(|investment| {
            let customer_name = names
                .get(&investment.customer_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string());
            InvestmentRow {
                investment,
                customer_name,
            }
        })
        .collect()
}

/// Load investments and customers together and join them
pub async fn load_investment_list<D: DeskApi + ?Sized>(api: &D) -> Loadable<Vec<InvestmentRow>> {
    let result = futures_util::try_join!(api.list_investments(None), api.list_customers());
    match result {
        Ok((investments, customers)) => Loadable::Ready(investment_rows(investments, &customers)),
        Err(e) => {
            tracing::warn!("Failed to fetch investments: {}", e);
            Loadable::Failed(e.user_message("Failed to load investments"))
        }
    }
}

/// Input of the add-investment form
///
/// Dates are kept as entered. Changing the start date or the scheme
/// refills the maturity date; editing the maturity date directly keeps the
/// entered value until the next such change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestmentForm {
    pub customer_id: String,
    pub scheme: SchemeType,
    pub principal: String,
    pub start_date: String,
    pub maturity_date: String,
}

impl Default for InvestmentForm {
    fn default() -> Self {
        Self {
            customer_id: String::new(),
            scheme: SchemeType::Kvp,
            principal: String::new(),
            start_date: String::new(),
            maturity_date: String::new(),
        }
    }
}

impl InvestmentForm {
    /// Empty form with the first customer preselected
    pub fn for_customers(customers: &[Customer]) -> Self {
        Self {
            customer_id: customers
                .first()
                .map(|c| c.customer_id.clone())
                .unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn set_start_date(&mut self, value: impl Into<String>) {
        self.start_date = value.into();
        self.refill_maturity();
    }

    pub fn set_scheme(&mut self, scheme: SchemeType) {
        self.scheme = scheme;
        self.refill_maturity();
    }

    pub fn set_maturity_date(&mut self, value: impl Into<String>) {
        self.maturity_date = value.into();
    }

    fn refill_maturity(&mut self) {
        let suggested = parse_date(&self.start_date).and_then(|d| default_maturity(d, self.scheme));
        if let Some(maturity) = suggested {
            self.maturity_date = format_date(maturity);
        }
    }

    pub fn validate(&self) -> Result<NewInvestment, FormError> {
        let customer_id = self.customer_id.trim();
        if customer_id.is_empty() {
            return Err(FormError::Missing("Customer"));
        }

        let principal: f64 = self
            .principal
            .trim()
            .parse()
            .map_err(|_| FormError::InvalidPrincipal)?;
        if !principal.is_finite() || principal <= 0.0 {
            return Err(FormError::InvalidPrincipal);
        }

        let start_date = required_date("start date", &self.start_date)?;
        let maturity_date = required_date("maturity date", &self.maturity_date)?;

        Ok(NewInvestment {
            customer_id: customer_id.to_string(),
            scheme_type: self.scheme,
            principal,
            start_date,
            maturity_date,
            status: InvestmentStatus::Active,
        })
    }

    /// Validate and `POST /investments/`
    pub async fn submit<D: DeskApi + ?Sized>(&self, api: &D) -> Result<Investment, FormError> {
        let body = self.validate()?;
        let created = api.create_investment(&body).await.map_err(|e| {
            tracing::warn!("Failed to create investment: {}", e);
            FormError::from_api(&e, "Failed to create investment")
        })?;
        tracing::info!(
            investment_id = %created.investment_id,
            scheme = %created.scheme_type,
            "Investment created"
        );
        Ok(created)
    }
}

fn required_date(field: &'static str, value: &str) -> Result<NaiveDate, FormError> {
    if value.trim().is_empty() {
        return Err(FormError::Missing(field));
    }
    parse_date(value).ok_or_else(|| FormError::InvalidDate {
        field,
        value: value.trim().to_string(),
    })
}
