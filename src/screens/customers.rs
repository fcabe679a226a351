//! Customer list, detail and add form

use crate::api::DeskApi;
use crate::error::ApiError;
use crate::fetch::Loadable;
use crate::models::{Customer, Investment, NewCustomer};

use super::FormError;

pub const EMPTY_PORTFOLIO: &str = "No investments found for this customer.";

/// Input of the add-customer form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub full_name: String,
    pub mobile: String,
}

impl CustomerForm {
    pub fn new(full_name: impl Into<String>, mobile: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            mobile: mobile.into(),
        }
    }

    /// Trim and check required fields
    pub fn validate(&self) -> Result<NewCustomer, FormError> {
        let full_name = self.full_name.trim();
        let mobile = self.mobile.trim();
        if full_name.is_empty() {
            return Err(FormError::Missing("Full name"));
        }
        if mobile.is_empty() {
            return Err(FormError::Missing("Mobile number"));
        }
        Ok(NewCustomer {
            full_name: full_name.to_string(),
            mobile: mobile.to_string(),
        })
    }

    /// Validate and `POST /customers/`
    pub async fn submit<D: DeskApi + ?Sized>(&self, api: &D) -> Result<Customer, FormError> {
        let body = self.validate()?;
        let created = api.create_customer(&body).await.map_err(|e| {
            tracing::warn!("Failed to create customer: {}", e);
            FormError::from_api(&e, "Failed to create customer")
        })?;
        tracing::info!(customer_id = %created.customer_id, "Customer created");
        Ok(created)
    }
}

/// A customer together with their investments
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDetail {
    pub customer: Customer,
    pub investments: Vec<Investment>,
}

/// Load one customer and their portfolio
///
/// A 404 reads "Customer not found"; any other failure gets the generic
/// message. Both requests go out together.
pub async fn load_customer_detail<D: DeskApi + ?Sized>(
    api: &D,
    customer_id: &str,
) -> Loadable<CustomerDetail> {
    let result = futures_util::try_join!(
        api.get_customer(customer_id),
        api.list_investments(Some(customer_id))
    );
    match result {
        Ok((customer, investments)) => Loadable::Ready(CustomerDetail {
            customer,
            investments,
        }),
        Err(e) => {
            tracing::warn!(customer_id, "Failed to load customer: {}", e);
            Loadable::Failed(detail_error(&e))
        }
    }
}

fn detail_error(err: &ApiError) -> String {
    if err.is_not_found() {
        "Customer not found".to_string()
    } else {
        "Failed to load customer details.".to_string()
    }
}

/// `GET /customers/` as a list screen value
pub async fn load_customers<D: DeskApi + ?Sized>(api: &D) -> Loadable<Vec<Customer>> {
    Loadable::from_result(api.list_customers().await, "Failed to load customers")
}
