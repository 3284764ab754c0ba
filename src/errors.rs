//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_kpi_system_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum KpiSystemError {
            $($variant(String),)*
        }

        impl KpiSystemError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(KpiSystemError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(KpiSystemError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(KpiSystemError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl KpiSystemError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        KpiSystemError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_kpi_system_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Transaction("E004", "Transaction Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Forbidden("E007", "Forbidden"),
    Authentication("E008", "Authentication Error"),
    Serialization("E009", "Serialization Error"),
}

impl KpiSystemError {
    /// 是否为客户端可见的错误（4xx）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            KpiSystemError::Validation(_)
                | KpiSystemError::NotFound(_)
                | KpiSystemError::Forbidden(_)
                | KpiSystemError::Authentication(_)
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for KpiSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for KpiSystemError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for KpiSystemError {
    fn from(err: sea_orm::DbErr) -> Self {
        KpiSystemError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for KpiSystemError {
    fn from(err: std::io::Error) -> Self {
        KpiSystemError::DatabaseConfig(err.to_string())
    }
}

impl From<serde_json::Error> for KpiSystemError {
    fn from(err: serde_json::Error) -> Self {
        KpiSystemError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, KpiSystemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(KpiSystemError::database_config("test").code(), "E001");
        assert_eq!(KpiSystemError::transaction("test").code(), "E004");
        assert_eq!(KpiSystemError::validation("test").code(), "E005");
        assert_eq!(KpiSystemError::forbidden("test").code(), "E007");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            KpiSystemError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            KpiSystemError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_client_errors() {
        assert!(KpiSystemError::not_found("x").is_client_error());
        assert!(KpiSystemError::forbidden("x").is_client_error());
        assert!(!KpiSystemError::transaction("x").is_client_error());
        assert!(!KpiSystemError::database_operation("x").is_client_error());
    }

    #[test]
    fn test_format_simple() {
        let err = KpiSystemError::validation("score out of range");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("score out of range"));
    }
}
