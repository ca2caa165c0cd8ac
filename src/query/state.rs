use crate::error::AppResult;

/// Result cell for one named query.
///
/// Keeps the last good value while a refetch is in flight, so only the very
/// first load is reported as pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState<T> {
    pub loading: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            loading: false,
            data: None,
            error: None,
        }
    }
}

impl<T> QueryState<T> {
    pub fn pending() -> Self {
        let mut state = Self::default();
        state.begin_fetch();
        state
    }

    pub fn resolved(data: T) -> Self {
        Self {
            loading: false,
            data: Some(data),
            error: None,
        }
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    pub fn resolve(&mut self, result: AppResult<T>) {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
    }

    pub fn is_initial_load(&self) -> bool {
        self.loading && self.data.is_none() && self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::QueryState;
    use crate::error::AppError;

    #[test]
    fn first_fetch_is_initial_load_but_refetch_is_not() {
        let mut state = QueryState::<Vec<u8>>::pending();
        assert!(state.is_initial_load());

        state.resolve(Ok(vec![1]));
        assert!(!state.loading);

        state.begin_fetch();
        assert!(state.loading);
        assert!(!state.is_initial_load());
        assert_eq!(state.data.as_deref(), Some(&[1][..]));
    }

    #[test]
    fn failed_refetch_keeps_previous_data() {
        let mut state = QueryState::resolved(vec![7_u8]);
        state.begin_fetch();
        state.resolve(Err(AppError::query("allFiles", "timeout")));

        assert_eq!(state.data.as_deref(), Some(&[7][..]));
        assert_eq!(
            state.error.as_deref(),
            Some("query allFiles failed: timeout")
        );
    }
}
