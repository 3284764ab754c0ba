use crate::models::users::entities::{CallerContext, UserRole};

/// 仪表盘数据范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardScope {
    /// 管理员：全局统计，操作记录来自系统日志
    Global,
    /// 经理：仅统计其管理的团队
    Manager(i64),
}

impl DashboardScope {
    /// 根据调用方角色选择范围，员工无权访问仪表盘
    pub fn for_caller(caller: &CallerContext) -> Option<Self> {
        match caller.role {
            UserRole::Admin => Some(DashboardScope::Global),
            UserRole::Manager => Some(DashboardScope::Manager(caller.user_id)),
            UserRole::Employee => None,
        }
    }
}
