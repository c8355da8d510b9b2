use std::collections::HashSet;

/// Error returned when a request names a dataset outside the allowlist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Dataset '{dataset}' is not allowed")]
pub struct DatasetNotAllowed {
    pub dataset: String,
}

/// Immutable set of datasets the server may access.
///
/// Membership is an exact, case-sensitive string comparison. An empty
/// allowlist rejects every dataset.
#[derive(Debug, Clone, Default)]
pub struct AllowlistGuard {
    /// Configured order, duplicates removed.
    ordered: Vec<String>,
    members: HashSet<String>,
}

impl AllowlistGuard {
    /// Build a guard from configured dataset identifiers.
    ///
    /// Configured order is kept for listing; repeated identifiers keep their
    /// first position.
    pub fn new<I, S>(datasets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut members = HashSet::new();

        for dataset in datasets {
            let dataset = dataset.into();
            if members.insert(dataset.clone()) {
                ordered.push(dataset);
            }
        }

        Self { ordered, members }
    }

    /// Check whether `dataset` is allowed.
    pub fn is_allowed(&self, dataset: &str) -> bool {
        self.members.contains(dataset)
    }

    /// Fail with [`DatasetNotAllowed`] unless `dataset` is allowed.
    pub fn enforce(&self, dataset: &str) -> Result<(), DatasetNotAllowed> {
        if self.is_allowed(dataset) {
            Ok(())
        } else {
            Err(DatasetNotAllowed {
                dataset: dataset.to_string(),
            })
        }
    }

    /// Allowed datasets in configured order.
    pub fn datasets(&self) -> &[String] {
        &self.ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_configured_dataset() {
        let guard = AllowlistGuard::new(["sales", "marketing"]);
        assert!(guard.is_allowed("sales"));
        assert!(guard.enforce("marketing").is_ok());
    }

    #[test]
    fn test_rejects_unknown_dataset() {
        let guard = AllowlistGuard::new(["sales"]);
        let err = guard.enforce("finance").unwrap_err();
        assert_eq!(err.dataset, "finance");
        assert_eq!(err.to_string(), "Dataset 'finance' is not allowed");
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let guard = AllowlistGuard::new(["sales"]);
        assert!(!guard.is_allowed("Sales"));
        assert!(!guard.is_allowed("SALES"));
        assert!(!guard.is_allowed(" sales"));
    }

    #[test]
    fn test_empty_allowlist_rejects_everything() {
        let guard = AllowlistGuard::new(Vec::<String>::new());
        assert!(guard.datasets().is_empty());
        assert!(!guard.is_allowed(""));
        assert!(guard.enforce("sales").is_err());
    }

    #[test]
    fn test_keeps_configured_order_without_duplicates() {
        let guard = AllowlistGuard::new(["b", "a", "b", "c"]);
        assert_eq!(guard.datasets(), ["b", "a", "c"]);
    }
}
