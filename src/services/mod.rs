pub mod activity_logs;
pub mod dashboard;
pub mod evaluations;
pub mod kpis;

pub use activity_logs::ActivityLogService;
pub use dashboard::DashboardService;
pub use evaluations::EvaluationService;
pub use kpis::KpiService;
