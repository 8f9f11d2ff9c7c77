//! Select option lists.

/// An option in a select list.
///
/// `value` is the key reported upward on selection and must be unique
/// within its list; `label` is what the user sees. List order is
/// display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Unique value/identifier
    pub value: String,
    /// Display label
    pub label: String,
}

impl SelectOption {
    /// Create a new option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Filter options by a case-insensitive substring match on the label.
///
/// Returns indices into `options` so the source list is never mutated
/// and display order is preserved. An empty query matches everything.
pub fn filter_options(options: &[SelectOption], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..options.len()).collect();
    }
    let query = query.to_lowercase();
    options
        .iter()
        .enumerate()
        .filter(|(_, opt)| opt.label.to_lowercase().contains(&query))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn science() -> Vec<SelectOption> {
        vec![
            SelectOption::new("science", "Science"),
            SelectOption::new("art", "Art"),
        ]
    }

    #[test]
    fn filter_matches_substring_case_insensitive() {
        let options = science();
        assert_eq!(filter_options(&options, "sci"), vec![0]);
        assert_eq!(filter_options(&options, "SCI"), vec![0]);
        assert_eq!(filter_options(&options, "zzz"), Vec::<usize>::new());
    }

    #[test]
    fn clearing_query_restores_full_list_in_order() {
        let options = science();
        assert_eq!(filter_options(&options, ""), vec![0, 1]);
    }
}
