use crate::database::enums::db_value::DbValue;

impl From<i32> for DbValue {
    fn from(value: i32) -> Self {
        DbValue::Integer(i64::from(value))
    }
}

impl From<i64> for DbValue {
    fn from(value: i64) -> Self {
        DbValue::Integer(value)
    }
}

impl From<u32> for DbValue {
    fn from(value: u32) -> Self {
        DbValue::Integer(i64::from(value))
    }
}

impl From<f64> for DbValue {
    fn from(value: f64) -> Self {
        DbValue::Real(value)
    }
}

impl From<bool> for DbValue {
    fn from(value: bool) -> Self {
        DbValue::Boolean(value)
    }
}

impl From<String> for DbValue {
    fn from(value: String) -> Self {
        DbValue::Text(value)
    }
}

impl From<&str> for DbValue {
    fn from(value: &str) -> Self {
        DbValue::Text(value.to_string())
    }
}

impl From<Vec<u8>> for DbValue {
    fn from(value: Vec<u8>) -> Self {
        DbValue::Blob(value)
    }
}

impl<T: Into<DbValue>> From<Option<T>> for DbValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DbValue::Null, Into::into)
    }
}

impl DbValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DbValue::Null)
    }
}
