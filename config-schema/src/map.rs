use serde_yaml::{Mapping, Value};

use crate::error::{Result, ValidationError};
use crate::validation::describe;

/// Cursor over one configuration dictionary.
///
/// Options are removed as they are read, so anything left over when
/// [`ConfigMap::finish`] runs was not recognised by any schema fragment.
#[derive(Debug, Clone)]
pub struct ConfigMap {
    entries: Mapping,
    component: String,
}

impl ConfigMap {
    /// `null` is treated as an empty dictionary.
    ///
    /// # Errors
    ///
    /// The value is neither a dictionary nor `null`.
    pub fn from_value(value: &Value, component: &str) -> Result<Self> {
        let entries = match value {
            Value::Mapping(m) => m.clone(),
            Value::Null => Mapping::new(),
            other => {
                return Err(ValidationError::new(format!(
                    "expected a dictionary for [{component}], got {}",
                    describe(other)
                )))
            }
        };
        Ok(Self {
            entries,
            component: component.to_string(),
        })
    }

    /// # Errors
    ///
    /// Fails when the option is missing or `validate` rejects it.
    pub fn required<T>(&mut self, key: &str, validate: impl FnOnce(&Value) -> Result<T>) -> Result<T> {
        match self.entries.remove(key) {
            Some(value) => validate(&value).map_err(|e| e.at(key)),
            None => Err(ValidationError::new(format!(
                "'{key}' is a required option for [{}]",
                self.component
            ))),
        }
    }

    /// # Errors
    ///
    /// Fails when the option is present and `validate` rejects it.
    pub fn optional<T>(
        &mut self,
        key: &str,
        validate: impl FnOnce(&Value) -> Result<T>,
    ) -> Result<Option<T>> {
        self.entries
            .remove(key)
            .map(|value| validate(&value).map_err(|e| e.at(key)))
            .transpose()
    }

    /// # Errors
    ///
    /// Fails when the option is present and `validate` rejects it.
    pub fn optional_or<T>(
        &mut self,
        key: &str,
        default: T,
        validate: impl FnOnce(&Value) -> Result<T>,
    ) -> Result<T> {
        Ok(self.optional(key, validate)?.unwrap_or(default))
    }

    /// # Errors
    ///
    /// Fails on the first option no fragment consumed.
    pub fn finish(self) -> Result<()> {
        match self.entries.into_iter().next() {
            Some((key, _)) => Err(ValidationError::new(format!(
                "[{}] is an invalid option for [{}]. Please check the indentation.",
                describe(&key),
                self.component
            ))
            .at(describe(&key))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{boolean, int_range};

    fn map(src: &str) -> ConfigMap {
        ConfigMap::from_value(&serde_yaml::from_str(src).unwrap(), "test").unwrap()
    }

    #[test]
    fn test_required_and_optional() {
        let mut m = map("{count: 3, flag: yes}");
        assert_eq!(m.required("count", |v| int_range(v, 0, 5)).unwrap(), 3);
        assert_eq!(m.optional("flag", boolean).unwrap(), Some(true));
        assert_eq!(m.optional("missing", boolean).unwrap(), None);
        assert!(m.optional_or("other", false, boolean).is_ok());
        assert!(m.finish().is_ok());
    }

    #[test]
    fn test_missing_required_option() {
        let mut m = map("{}");
        let err = m.required("count", |v| int_range(v, 0, 5)).unwrap_err();
        assert_eq!(err.message(), "'count' is a required option for [test]");
    }

    #[test]
    fn test_errors_carry_option_key() {
        let mut m = map("{count: 9}");
        let err = m.required("count", |v| int_range(v, 0, 5)).unwrap_err();
        assert_eq!(err.path(), ["count"]);
    }

    #[test]
    fn test_leftover_option_is_rejected() {
        let mut m = map("{count: 1, colour: red}");
        m.required("count", |v| int_range(v, 0, 5)).unwrap();
        let err = m.finish().unwrap_err();
        assert_eq!(
            err.message(),
            "[colour] is an invalid option for [test]. Please check the indentation."
        );
    }

    #[test]
    fn test_non_mapping_is_rejected() {
        let value: Value = serde_yaml::from_str("[1, 2]").unwrap();
        assert!(ConfigMap::from_value(&value, "test").is_err());
        assert!(ConfigMap::from_value(&Value::Null, "test").is_ok());
    }
}
