//! Free-text, status and date-range filtering of list records.

use shared::dates::DateRange;

use crate::models::{ListRecord, StatusFilter};

/// Criteria applied to a list screen's collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter<S> {
    /// Case-insensitive substring; empty matches everything.
    pub query: String,
    pub status: StatusFilter<S>,
    /// Inclusive calendar range, or `None` for no date constraint.
    pub date_range: Option<DateRange>,
}

impl<S> Default for ListFilter<S> {
    fn default() -> Self {
        Self {
            query: String::new(),
            status: StatusFilter::All,
            date_range: None,
        }
    }
}

impl<S: Copy + PartialEq> ListFilter<S> {
    /// Whether `record` satisfies every criterion.
    pub fn matches<R>(&self, record: &R) -> bool
    where
        R: ListRecord<Status = S>,
    {
        self.matches_query(record, &self.query.to_lowercase())
            && self.status.matches(&record.status())
            && self.matches_date(record)
    }

    /// Stable filter: the output keeps the input order.
    pub fn apply<'a, R>(&self, records: &'a [R]) -> Vec<&'a R>
    where
        R: ListRecord<Status = S>,
    {
        let needle = self.query.to_lowercase();
        records
            .iter()
            .filter(|record| {
                self.matches_query(*record, &needle)
                    && self.status.matches(&record.status())
                    && self.matches_date(*record)
            })
            .collect()
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
            || self.status != StatusFilter::All
            || self.date_range.is_some()
    }

    fn matches_query<R>(&self, record: &R, needle: &str) -> bool
    where
        R: ListRecord<Status = S>,
    {
        needle.is_empty()
            || record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle))
    }

    fn matches_date<R>(&self, record: &R) -> bool
    where
        R: ListRecord<Status = S>,
    {
        match self.date_range {
            None => true,
            Some(range) => record.record_date().is_some_and(|date| range.contains(date)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Detail, Expense, ExpenseStatus, ExpenseType};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(id: &str, employee: &str, status: ExpenseStatus, day: Option<NaiveDate>) -> Expense {
        Expense {
            id: id.to_string(),
            employee: employee.to_string(),
            title: format!("Claim {id}"),
            expense_type: ExpenseType::Travel,
            amount: 100.0,
            date: day,
            display_date: shared::dates::display_or_missing(day),
            status,
            remarks: Detail::Missing("No remarks"),
            submitted_to: Detail::Missing("Not submitted yet"),
            approved_by: Detail::Missing("Not processed yet"),
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense("1", "John", ExpenseStatus::Approved, Some(date(2024, 1, 1))),
            expense("2", "Jane", ExpenseStatus::Pending, Some(date(2024, 1, 15))),
            expense("3", "Janet", ExpenseStatus::Approved, Some(date(2024, 1, 31))),
            expense("4", "Bob", ExpenseStatus::Rejected, None),
        ]
    }

    fn ids(records: &[&Expense]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let records = sample();
        let filter = ListFilter::default();
        assert_eq!(filter.apply(&records).len(), 4);
        assert!(!filter.is_active());
    }

    #[test]
    fn test_query_is_case_insensitive_substring() {
        let records = vec![
            expense("1", "John", ExpenseStatus::Approved, None),
            expense("2", "Jane", ExpenseStatus::Pending, None),
        ];

        for query in ["jane", "JANE", "JaNe"] {
            let filter = ListFilter {
                query: query.to_string(),
                ..ListFilter::default()
            };
            assert_eq!(ids(&filter.apply(&records)), vec!["2"]);
        }
    }

    #[test]
    fn test_query_matches_title_and_present_remarks_only() {
        let mut records = sample();
        records[3].remarks = Detail::Provided("Duplicate receipt".to_string());

        let by_title = ListFilter::<ExpenseStatus> {
            query: "claim 2".to_string(),
            ..ListFilter::default()
        };
        assert_eq!(ids(&by_title.apply(&records)), vec!["2"]);

        let by_remarks = ListFilter::<ExpenseStatus> {
            query: "duplicate".to_string(),
            ..ListFilter::default()
        };
        assert_eq!(ids(&by_remarks.apply(&records)), vec!["4"]);

        let by_placeholder = ListFilter::<ExpenseStatus> {
            query: "no remarks".to_string(),
            ..ListFilter::default()
        };
        assert!(by_placeholder.apply(&records).is_empty());
    }

    #[test]
    fn test_status_filter_exact() {
        let records = sample();
        let filter = ListFilter {
            status: StatusFilter::Only(ExpenseStatus::Approved),
            ..ListFilter::default()
        };
        assert_eq!(ids(&filter.apply(&records)), vec!["1", "3"]);
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let records = sample();
        let filter = ListFilter {
            query: "jan".to_string(),
            status: StatusFilter::Only(ExpenseStatus::Approved),
            date_range: None,
        };
        assert_eq!(ids(&filter.apply(&records)), vec!["3"]);
    }

    #[test]
    fn test_date_range_inclusive_and_excludes_undated() {
        let records = sample();
        let filter = ListFilter::<ExpenseStatus> {
            date_range: Some(DateRange::new(date(2024, 1, 1), date(2024, 1, 15)).unwrap()),
            ..ListFilter::default()
        };
        assert_eq!(ids(&filter.apply(&records)), vec!["1", "2"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = sample();
        let filter = ListFilter {
            query: "j".to_string(),
            status: StatusFilter::Only(ExpenseStatus::Approved),
            date_range: Some(DateRange::last_month(date(2024, 2, 10))),
        };

        let once: Vec<Expense> = filter.apply(&records).into_iter().cloned().collect();
        let twice: Vec<Expense> = filter.apply(&once).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_matches_agrees_with_apply() {
        let records = sample();
        let filter = ListFilter {
            query: "JA".to_string(),
            status: StatusFilter::All,
            date_range: None,
        };
        let via_matches: Vec<&Expense> = records.iter().filter(|r| filter.matches(*r)).collect();
        assert_eq!(via_matches, filter.apply(&records));
        assert_eq!(ids(&via_matches), vec!["2", "3"]);
        assert!(filter.is_active());
    }

    #[test]
    fn test_query_whitespace_is_significant() {
        let mut taxi = expense("1", "Jane", ExpenseStatus::Pending, None);
        taxi.title = "Taxi".to_string();
        let records = vec![taxi];

        let trailing = ListFilter::<ExpenseStatus> {
            query: "jane ".to_string(),
            ..ListFilter::default()
        };
        assert!(trailing.apply(&records).is_empty());
        assert!(!trailing.matches(&records[0]));

        let spaces_only = ListFilter::<ExpenseStatus> {
            query: "   ".to_string(),
            ..ListFilter::default()
        };
        assert!(spaces_only.apply(&records).is_empty());
        assert!(spaces_only.is_active());
    }
}
