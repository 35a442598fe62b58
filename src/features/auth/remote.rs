//! Tri-state holder for data fetched after login.

/// A value fetched from the backend. `Failed` keeps the user-facing reason.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RemoteData<T> {
    #[default]
    NotLoaded,
    Loaded(T),
    Failed(String),
}

impl<T> RemoteData<T> {
    #[must_use]
    pub fn loaded(&self) -> Option<&T> {
        match self {
            RemoteData::Loaded(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, RemoteData::Loaded(_))
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            RemoteData::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RemoteData<U> {
        match self {
            RemoteData::NotLoaded => RemoteData::NotLoaded,
            RemoteData::Loaded(value) => RemoteData::Loaded(f(value)),
            RemoteData::Failed(reason) => RemoteData::Failed(reason),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for RemoteData<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => RemoteData::Loaded(value),
            Err(err) => RemoteData::Failed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RemoteData;
    use crate::app_lib::AppError;

    #[test]
    fn result_conversion_keeps_error_message() {
        let failed: RemoteData<u8> = Err::<u8, _>(AppError::Unauthenticated).into();
        assert_eq!(failed.error(), Some("User is not authenticated."));
        assert!(!failed.is_loaded());

        let loaded: RemoteData<u8> = Ok::<u8, AppError>(3).into();
        assert_eq!(loaded.loaded(), Some(&3));
    }

    #[test]
    fn map_preserves_state() {
        assert_eq!(RemoteData::Loaded(2).map(|v| v * 2), RemoteData::Loaded(4));
        assert_eq!(
            RemoteData::<u8>::NotLoaded.map(|v| v * 2),
            RemoteData::NotLoaded
        );
    }
}
