use std::fmt::Debug;
use std::net::IpAddr;
use thiserror::Error;

/// 配置驗證錯誤
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("缺少必要配置項: {0}")]
    MissingField(String),

    #[error("無效的配置值: {0}")]
    InvalidValue(String),

    #[error("配置範圍錯誤: {field} 的值 {value} 不在範圍 {min}..{max} 內")]
    RangeError {
        field: String,
        value: String,
        min: String,
        max: String,
    },
}

/// 配置驗證器trait
pub trait Validator {
    /// 驗證配置
    fn validate(&self) -> Result<(), ValidationError>;
}

/// 驗證配置區段
pub fn validate_config<T>(config: &T) -> Result<(), ValidationError>
where
    T: Validator
{
    config.validate()
}

/// 驗證工具函數
pub struct ValidationUtils;

impl ValidationUtils {
    /// 驗證配置值是否在指定範圍內（含兩端）
    pub fn in_range<T>(
        value: T,
        min: T,
        max: T,
        field_name: &str
    ) -> Result<(), ValidationError>
    where
        T: PartialOrd + ToString
    {
        if value < min || value > max {
            return Err(ValidationError::RangeError {
                field: field_name.to_string(),
                value: value.to_string(),
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(())
    }

    /// 驗證一個選項是否為某些值中的一個
    pub fn one_of<T>(
        value: &T,
        options: &[T],
        field_name: &str
    ) -> Result<(), ValidationError>
    where
        T: PartialEq + Debug
    {
        if !options.contains(value) {
            return Err(ValidationError::InvalidValue(format!(
                "{} 的值 {:?} 不是有效選項: {:?}",
                field_name,
                value,
                options
            )));
        }
        Ok(())
    }

    /// 檢查必要的字串欄位是否有值
    pub fn not_empty(
        value: &str,
        field_name: &str
    ) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field_name.to_string()));
        }
        Ok(())
    }

    /// 解析 IP 地址
    pub fn ip_addr(value: &str, field_name: &str) -> Result<IpAddr, ValidationError> {
        value.trim().parse::<IpAddr>().map_err(|e| {
            ValidationError::InvalidValue(format!("{} 的值 {} 不是有效的 IP 地址: {}", field_name, value, e))
        })
    }

    /// 路由前綴必須以 `/` 開頭；除根路徑外不得以 `/` 結尾，
    /// 且每一段都必須是非空的靜態路徑（不含 `:`、`*` 開頭或 `{`、`}`）
    pub fn path_prefix(value: &str, field_name: &str) -> Result<(), ValidationError> {
        if !value.starts_with('/') || (value.len() > 1 && value.ends_with('/')) {
            return Err(ValidationError::InvalidValue(format!(
                "{} 的值 {} 必須以 / 開頭且不以 / 結尾",
                field_name, value
            )));
        }

        if value == "/" {
            return Ok(());
        }

        let dynamic = value[1..].split('/').find(|segment| {
            segment.is_empty()
                || segment.starts_with(':')
                || segment.starts_with('*')
                || segment.contains('{')
                || segment.contains('}')
        });
        if let Some(segment) = dynamic {
            return Err(ValidationError::InvalidValue(format!(
                "{} 的值 {} 含有空白或動態路徑段: {:?}",
                field_name, value, segment
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_in_range() {
        assert!(ValidationUtils::in_range(5, 1, 10, "test_field").is_ok());

        let err = ValidationUtils::in_range(15, 1, 10, "test_field").unwrap_err();
        match err {
            ValidationError::RangeError { field, value, min, max } => {
                assert_eq!(field, "test_field");
                assert_eq!(value, "15");
                assert_eq!(min, "1");
                assert_eq!(max, "10");
            },
            _ => panic!("Expected RangeError"),
        }
    }

    #[test]
    fn test_one_of() {
        assert!(ValidationUtils::one_of(&"json", &["pretty", "json"], "log.format").is_ok());
        assert!(ValidationUtils::one_of(&"xml", &["pretty", "json"], "log.format").is_err());
    }

    #[test]
    fn test_not_empty() {
        assert!(ValidationUtils::not_empty("test", "test_field").is_ok());
        assert!(ValidationUtils::not_empty("", "test_field").is_err());
        assert!(ValidationUtils::not_empty("   ", "test_field").is_err());
    }

    #[rstest]
    #[case("127.0.0.1", true)]
    #[case("0.0.0.0", true)]
    #[case("::1", true)]
    #[case("localhost", false)]
    #[case("", false)]
    fn test_ip_addr(#[case] host: &str, #[case] valid: bool) {
        assert_eq!(ValidationUtils::ip_addr(host, "server.host").is_ok(), valid);
    }

    #[rstest]
    #[case("/api", true)]
    #[case("/", true)]
    #[case("/api/v1", true)]
    #[case("api", false)]
    #[case("/api/", false)]
    #[case("/:v1", false)]
    #[case("/*rest", false)]
    #[case("/api/{version}", false)]
    #[case("/api//v1", false)]
    #[case("/api/v1}", false)]
    #[case("/api-v1.0", true)]
    fn test_path_prefix(#[case] path: &str, #[case] valid: bool) {
        assert_eq!(ValidationUtils::path_prefix(path, "rest_api.base_path").is_ok(), valid);
    }
}
