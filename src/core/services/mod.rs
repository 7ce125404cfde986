pub mod dashboard_service;
pub mod resume_service;
pub mod summary_service;

pub use dashboard_service::{DashboardService, DashboardView, HighlightCard, HighlightKind};
pub use resume_service::{CategoryRow, MonthSelector, ResumeService, ResumeView};
pub use summary_service::{
    AmountPolicy, CategoryBreakdown, CategorySummary, Highlights, SummaryService,
};

use crate::errors::FinanceError;

pub type ServiceResult<T> = Result<T, FinanceError>;
