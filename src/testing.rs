//! In-memory API double for unit tests

use async_trait::async_trait;
use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tokio::sync::Notify;

use crate::api::{AuthApi, DeskApi};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    AgentProfile, BulkUploadSummary, Customer, Investment, InvestmentStatus, NewCustomer,
    NewInvestment, SchemeType, Stats, UploadFile,
};

pub fn profile() -> AgentProfile {
    AgentProfile {
        agent_id: "agent-1".to_string(),
        name: "Ravi Kumar".to_string(),
        mobile: "9876543210".to_string(),
    }
}

pub fn customer(id: &str, name: &str) -> Customer {
    Customer {
        customer_id: id.to_string(),
        full_name: name.to_string(),
        mobile: "9000000001".to_string(),
        consent_flag: false,
        agent_id: Some("agent-1".to_string()),
        consent_time: None,
        created_at: None,
    }
}

pub fn investment(id: &str, customer_id: &str, scheme: SchemeType) -> Investment {
    Investment {
        investment_id: id.to_string(),
        customer_id: customer_id.to_string(),
        scheme_type: scheme,
        principal: 25000.0,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        maturity_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        status: InvestmentStatus::Active,
        current_stage: None,
    }
}

struct Responses {
    me: ApiResult<AgentProfile>,
    login: ApiResult<()>,
    logout: ApiResult<()>,
    signup: ApiResult<Option<String>>,
    verify: ApiResult<Option<String>>,
    resend: ApiResult<Option<String>>,
    admin_login: ApiResult<()>,
    admin_stats: ApiResult<Stats>,
    dashboard_stats: ApiResult<Stats>,
    customers: ApiResult<Vec<Customer>>,
    customer: ApiResult<Customer>,
    investments: ApiResult<Vec<Investment>>,
    upload: ApiResult<BulkUploadSummary>,
    create: Option<ApiError>,
}

#[derive(Default)]
struct Recorded {
    calls: HashMap<&'static str, usize>,
    investment_filters: Vec<Option<String>>,
    created_customers: Vec<NewCustomer>,
    created_investments: Vec<NewInvestment>,
    uploads: Vec<UploadFile>,
}

/// Scriptable API double; clones share state
#[derive(Clone)]
pub struct MockApi {
    responses: Rc<RefCell<Responses>>,
    recorded: Rc<RefCell<Recorded>>,
    me_gate: Rc<RefCell<Option<Rc<Notify>>>>,
}

impl MockApi {
    pub fn new() -> Self {
        let responses = Responses {
            me: Err(ApiError::Unauthorized {
                detail: Some("Could not validate credentials".to_string()),
            }),
            login: Ok(()),
            logout: Ok(()),
            signup: Ok(Some(
                "Signup successful. Please verify OTP sent to your mobile.".to_string(),
            )),
            verify: Ok(Some("Verification successful.".to_string())),
            resend: Ok(Some("OTP resent successfully.".to_string())),
            admin_login: Ok(()),
            admin_stats: Ok(Stats::default()),
            dashboard_stats: Ok(Stats::default()),
            customers: Ok(Vec::new()),
            customer: Err(ApiError::from_status(404, r#"{"detail":"Customer not found"}"#)),
            investments: Ok(Vec::new()),
            upload: Ok(BulkUploadSummary::default()),
            create: None,
        };
        Self {
            responses: Rc::new(RefCell::new(responses)),
            recorded: Rc::new(RefCell::new(Recorded::default())),
            me_gate: Rc::new(RefCell::new(None)),
        }
    }

    /// The next `me()` answers with the current response, but only after
    /// `gate` is notified
    pub fn hold_next_me(&self, gate: Rc<Notify>) {
        *self.me_gate.borrow_mut() = Some(gate);
    }

    pub fn set_me(&self, r: ApiResult<AgentProfile>) {
        self.responses.borrow_mut().me = r;
    }
    pub fn set_login(&self, r: ApiResult<()>) {
        self.responses.borrow_mut().login = r;
    }
    pub fn set_logout(&self, r: ApiResult<()>) {
        self.responses.borrow_mut().logout = r;
    }
    pub fn set_signup(&self, r: ApiResult<Option<String>>) {
        self.responses.borrow_mut().signup = r;
    }
    pub fn set_verify(&self, r: ApiResult<Option<String>>) {
        self.responses.borrow_mut().verify = r;
    }
    pub fn set_resend(&self, r: ApiResult<Option<String>>) {
        self.responses.borrow_mut().resend = r;
    }
    pub fn set_admin_login(&self, r: ApiResult<()>) {
        self.responses.borrow_mut().admin_login = r;
    }
    pub fn set_admin_stats(&self, r: ApiResult<Stats>) {
        self.responses.borrow_mut().admin_stats = r;
    }
    pub fn set_dashboard_stats(&self, r: ApiResult<Stats>) {
        self.responses.borrow_mut().dashboard_stats = r;
    }
    pub fn set_customers(&self, r: ApiResult<Vec<Customer>>) {
        self.responses.borrow_mut().customers = r;
    }
    pub fn set_customer(&self, r: ApiResult<Customer>) {
        self.responses.borrow_mut().customer = r;
    }
    pub fn set_investments(&self, r: ApiResult<Vec<Investment>>) {
        self.responses.borrow_mut().investments = r;
    }
    pub fn set_upload(&self, r: ApiResult<BulkUploadSummary>) {
        self.responses.borrow_mut().upload = r;
    }
    /// Make create calls fail with this error
    pub fn fail_creates(&self, err: ApiError) {
        self.responses.borrow_mut().create = Some(err);
    }

    pub fn calls(&self, name: &str) -> usize {
        self.recorded.borrow().calls.get(name).copied().unwrap_or(0)
    }
    pub fn investment_filters(&self) -> Vec<Option<String>> {
        self.recorded.borrow().investment_filters.clone()
    }
    pub fn created_customers(&self) -> Vec<NewCustomer> {
        self.recorded.borrow().created_customers.clone()
    }
    pub fn created_investments(&self) -> Vec<NewInvestment> {
        self.recorded.borrow().created_investments.clone()
    }
    pub fn uploads(&self) -> Vec<UploadFile> {
        self.recorded.borrow().uploads.clone()
    }

    fn hit(&self, name: &'static str) {
        *self.recorded.borrow_mut().calls.entry(name).or_insert(0) += 1;
    }

    fn create_error(&self) -> Option<ApiError> {
        self.responses.borrow().create.clone()
    }
}

#[async_trait(?Send)]
impl AuthApi for MockApi {
    async fn me(&self) -> ApiResult<AgentProfile> {
        self.hit("me");
        let response = self.responses.borrow().me.clone();
        let gate = self.me_gate.borrow_mut().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        response
    }
    async fn login(&self, _mobile: &str, _password: &str) -> ApiResult<()> {
        self.hit("login");
        self.responses.borrow().login.clone()
    }
    async fn logout(&self) -> ApiResult<()> {
        self.hit("logout");
        self.responses.borrow().logout.clone()
    }
    async fn signup(&self, _name: &str, _mobile: &str, _password: &str) -> ApiResult<Option<String>> {
        self.hit("signup");
        self.responses.borrow().signup.clone()
    }
    async fn verify(&self, _mobile: &str, _otp: &str) -> ApiResult<Option<String>> {
        self.hit("verify");
        self.responses.borrow().verify.clone()
    }
    async fn resend_otp(&self, _mobile: &str) -> ApiResult<Option<String>> {
        self.hit("resend_otp");
        self.responses.borrow().resend.clone()
    }
    async fn admin_login(&self, _secret_key: &str) -> ApiResult<()> {
        self.hit("admin_login");
        self.responses.borrow().admin_login.clone()
    }
    async fn admin_stats(&self) -> ApiResult<Stats> {
        self.hit("admin_stats");
        self.responses.borrow().admin_stats.clone()
    }
}

#[async_trait(?Send)]
impl DeskApi for MockApi {
    async fn dashboard_stats(&self) -> ApiResult<Stats> {
        self.hit("dashboard_stats");
        self.responses.borrow().dashboard_stats.clone()
    }
    async fn list_customers(&self) -> ApiResult<Vec<Customer>> {
        self.hit("list_customers");
        self.responses.borrow().customers.clone()
    }
    async fn get_customer(&self, _customer_id: &str) -> ApiResult<Customer> {
        self.hit("get_customer");
        self.responses.borrow().customer.clone()
    }
    async fn create_customer(&self, new: &NewCustomer) -> ApiResult<Customer> {
        self.hit("create_customer");
        if let Some(err) = self.create_error() {
            return Err(err);
        }
        self.recorded.borrow_mut().created_customers.push(new.clone());
        let mut created = customer("c-new", &new.full_name);
        created.mobile = new.mobile.clone();
        Ok(created)
    }
    async fn list_investments(&self, customer_id: Option<&str>) -> ApiResult<Vec<Investment>> {
        self.hit("list_investments");
        self.recorded
            .borrow_mut()
            .investment_filters
            .push(customer_id.map(|s| s.to_string()));
        self.responses.borrow().investments.clone()
    }
    async fn create_investment(&self, new: &NewInvestment) -> ApiResult<Investment> {
        self.hit("create_investment");
        if let Some(err) = self.create_error() {
            return Err(err);
        }
        self.recorded.borrow_mut().created_investments.push(new.clone());
        Ok(Investment {
            investment_id: "inv-new".to_string(),
            customer_id: new.customer_id.clone(),
            scheme_type: new.scheme_type,
            principal: new.principal,
            start_date: new.start_date,
            maturity_date: new.maturity_date,
            status: new.status.clone(),
            current_stage: None,
        })
    }
    async fn bulk_upload(&self, file: UploadFile) -> ApiResult<BulkUploadSummary> {
        self.hit("bulk_upload");
        self.recorded.borrow_mut().uploads.push(file);
        self.responses.borrow().upload.clone()
    }
}
