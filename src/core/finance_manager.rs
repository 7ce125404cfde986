use chrono::NaiveDate;

use crate::{
    config::Config,
    core::{
        load_cycle::{LoadTicket, ScreenState},
        services::{
            AmountPolicy, DashboardService, DashboardView, MonthSelector, ResumeService,
            ResumeView, ServiceResult,
        },
    },
    currency::LocaleFormatter,
    domain::{CategoryCatalog, DateZone, Session, TransactionRecord, YearMonth},
    errors::FinanceError,
    storage::{self, KeyValueStore},
};

/// Facade that owns the store, the session, and the state of both screens.
pub struct FinanceManager {
    storage: Box<dyn KeyValueStore>,
    session: Session,
    catalog: CategoryCatalog,
    formatter: LocaleFormatter,
    policy: AmountPolicy,
    zone: DateZone,
    month: MonthSelector,
    dashboard: ScreenState<DashboardView>,
    resume: ScreenState<ResumeView>,
}

impl FinanceManager {
    pub fn new(
        storage: Box<dyn KeyValueStore>,
        session: Session,
        config: &Config,
        today: NaiveDate,
    ) -> Result<Self, FinanceError> {
        Ok(Self {
            storage,
            session,
            catalog: CategoryCatalog::default(),
            formatter: config.formatter()?,
            policy: config.amount_policy,
            zone: config.date_zone()?,
            month: MonthSelector::starting_at(today),
            dashboard: ScreenState::new(),
            resume: ScreenState::new(),
        })
    }

    pub fn with_catalog(mut self, catalog: CategoryCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn selected_month(&self) -> YearMonth {
        self.month.selected()
    }

    pub fn dashboard(&self) -> &ScreenState<DashboardView> {
        &self.dashboard
    }

    pub fn resume(&self) -> &ScreenState<ResumeView> {
        &self.resume
    }

    /// Runs a full dashboard load cycle, as triggered when the screen gains focus.
    pub fn refresh_dashboard(&mut self) -> bool {
        let ticket = self.dashboard.begin_load();
        let outcome = self.load_dashboard();
        self.dashboard.complete(ticket, outcome)
    }

    /// Runs a full summary load cycle for the selected month.
    pub fn refresh_resume(&mut self) -> bool {
        let ticket = self.resume.begin_load();
        let outcome = self.load_resume(self.month.selected());
        self.resume.complete(ticket, outcome)
    }

    /// Split-phase variant for hosts that await the store read themselves.
    pub fn begin_resume_load(&mut self) -> (LoadTicket, YearMonth) {
        (self.resume.begin_load(), self.month.selected())
    }

    pub fn finish_resume_load(
        &mut self,
        ticket: LoadTicket,
        outcome: ServiceResult<ResumeView>,
    ) -> bool {
        self.resume.complete(ticket, outcome)
    }

    pub fn next_month(&mut self) -> bool {
        let month = self.month.next();
        tracing::debug!(%month, "summary month advanced");
        self.refresh_resume()
    }

    pub fn previous_month(&mut self) -> bool {
        let month = self.month.previous();
        tracing::debug!(%month, "summary month moved back");
        self.refresh_resume()
    }

    pub fn load_dashboard(&self) -> ServiceResult<DashboardView> {
        DashboardService::load(
            self.storage.as_ref(),
            &self.session,
            self.zone,
            &self.formatter,
            self.policy,
        )
    }

    pub fn load_resume(&self, month: YearMonth) -> ServiceResult<ResumeView> {
        ResumeService::load(
            self.storage.as_ref(),
            &self.session,
            self.zone,
            &self.catalog,
            month,
            &self.formatter,
            self.policy,
        )
    }

    /// Stores a new transaction for the session user. Returns the new record count.
    pub fn register_transaction(&mut self, record: TransactionRecord) -> Result<usize, FinanceError> {
        record.parsed_amount()?;
        if !self.catalog.contains(&record.category) {
            return Err(FinanceError::InvalidInput(format!(
                "unknown category `{}`",
                record.category
            )));
        }
        let key = self.session.transactions_key();
        let count = storage::append_transaction(self.storage.as_ref(), &key, record)?;
        tracing::info!(key = %key, count, "transaction registered");
        Ok(count)
    }
}
