use std::collections::HashSet;

use crate::model::course_record::CourseRecord;

/// Accumulates records across pages; [`finalize`](Self::finalize) consumes it.
#[derive(Debug, Default)]
pub struct CourseCollector {
    records: Vec<CourseRecord>,
}

/// True for the text forms of NaN and the two infinities (`NaN`, `inf`, `-Infinity`, ...).
fn is_non_finite(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|v| !v.is_finite())
        .unwrap_or(false)
}

fn normalize(mut record: CourseRecord) -> CourseRecord {
    for field in record.optional_fields_mut() {
        if field.as_deref().is_some_and(is_non_finite) {
            *field = None;
        }
    }
    record.course_learning_outcomes.retain(|outcome| !is_non_finite(outcome));
    record
}

impl CourseCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: CourseRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Deduplicates by course code keeping the first occurrence, then nulls non-finite values.
    pub fn finalize(self) -> Vec<CourseRecord> {
        let mut seen = HashSet::with_capacity(self.records.len());
        self.records
            .into_iter()
            .filter(|record| seen.insert(record.course_code.clone()))
            .map(normalize)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_wins() {
        let mut collector = CourseCollector::new();
        collector.add(CourseRecord::new("CISC124", "A"));
        collector.add(CourseRecord::new("MATH110", "Linear Algebra"));
        collector.add(CourseRecord::new("CISC124", "B"));
        assert_eq!(collector.len(), 3);

        let records = collector.finalize();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].course_code, "CISC124");
        assert_eq!(records[0].course_name, "A");
        assert_eq!(records[1].course_code, "MATH110");
    }

    #[test]
    fn non_finite_values_become_null() {
        let mut record = CourseRecord::new("CHEE210", "Thermodynamics");
        record.course_units = Some("NaN".into());
        record.learning_hours = Some("inf".into());
        record.course_requirements = Some("-Infinity".into());
        record.course_equivalencies = Some("3.50".into());
        record.course_learning_outcomes = vec!["nan".into(), "Solve energy balances.".into()];

        let mut collector = CourseCollector::new();
        collector.add(record);
        let record = collector.finalize().remove(0);

        assert_eq!(record.course_units, None);
        assert_eq!(record.learning_hours, None);
        assert_eq!(record.course_requirements, None);
        assert_eq!(record.course_equivalencies.as_deref(), Some("3.50"));
        assert_eq!(record.course_learning_outcomes, ["Solve energy balances."]);
    }

    #[test]
    fn ordinary_text_is_kept() {
        assert!(!is_non_finite("Information Technology"));
        assert!(!is_non_finite("120 (36L;36T;48P)"));
        assert!(is_non_finite(" Infinity "));
    }

    #[test]
    fn empty_collector_finalizes_to_nothing() {
        assert!(CourseCollector::new().finalize().is_empty());
    }
}
