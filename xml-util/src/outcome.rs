//! Result of a best-effort operation

use xml_engine_traits::Error;

/// Value produced by an operation that logs failures instead of returning them.
///
/// When the operation failed, the value is the degraded default (an empty
/// string, or `()`) and the logged error is kept alongside it.
#[derive(Debug)]
#[must_use]
pub struct Logged<T> {
    value: T,
    error: Option<Error>,
}

impl<T> Logged<T> {
    pub fn ok(value: T) -> Self {
        Self { value, error: None }
    }

    /// Degraded value together with the error that was already logged
    pub fn degraded(value: T, error: Error) -> Self {
        Self {
            value,
            error: Some(error),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// The value, degraded or not
    pub fn into_value(self) -> T {
        self.value
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }

    /// Recover the error for callers that want to handle it themselves
    pub fn into_result(self) -> Result<T, Error> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.value),
        }
    }
}

impl<T: Default> Logged<T> {
    pub(crate) fn failed(error: Error) -> Self {
        Self::degraded(T::default(), error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_uses_default_value() {
        let logged: Logged<String> = Logged::failed(Error::transform("boom"));
        assert!(logged.is_degraded());
        assert_eq!(logged.value(), "");
        assert!(matches!(logged.into_result(), Err(Error::Transform(_))));
    }

    #[test]
    fn ok_into_result() {
        let logged = Logged::ok(3);
        assert!(logged.error().is_none());
        assert_eq!(logged.into_result().unwrap(), 3);
    }
}
