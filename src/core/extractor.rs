use scraper::{ElementRef, Selector};

use crate::core::html_parser::{CourseBlock, element_text, selector};
use crate::error::ScrapeError;
use crate::model::course_record::CourseRecord;
use crate::model::faculty::FeedCapabilities;

const OUTCOMES_MARKER: &str = "span.detail-cim_los";
const OUTCOME_ITEM_MARKER: &str = "li";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    CourseCode,
    CourseName,
    CourseUnits,
    CourseDescription,
    CourseRequirements,
    LearningHours,
    CourseEquivalencies,
    OfferingFaculty,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::CourseCode => "course_code",
            Field::CourseName => "course_name",
            Field::CourseUnits => "course_units",
            Field::CourseDescription => "course_description",
            Field::CourseRequirements => "course_requirements",
            Field::LearningHours => "learning_hours",
            Field::CourseEquivalencies => "course_equivalencies",
            Field::OfferingFaculty => "offering_faculty",
        }
    }
}

/// How one text field is found inside a course block.
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub field: Field,
    pub marker: &'static str,
    /// Literal label removed from the start of the text, e.g. `Units:`.
    pub label: Option<&'static str>,
    pub required: bool,
}

const fn rule(field: Field, marker: &'static str, label: Option<&'static str>, required: bool) -> FieldRule {
    FieldRule { field, marker, label, required }
}

pub const FIELD_RULES: [FieldRule; 8] = [
    rule(Field::CourseCode, "span.detail-code", None, true),
    rule(Field::CourseName, "span.detail-title", None, true),
    rule(Field::CourseUnits, "span.detail-hours_html", Some("Units:"), false),
    rule(Field::CourseDescription, "div.courseblockextra", None, false),
    rule(Field::CourseRequirements, "span.detail-requirements", Some("Requirements:"), false),
    rule(Field::LearningHours, "span.detail-learning_hours", Some("Learning Hours:"), false),
    rule(Field::CourseEquivalencies, "span.detail-course_equivalencies", Some("Course Equivalencies:"), false),
    rule(Field::OfferingFaculty, "span.detail-offering_faculty", Some("Offering Faculty:"), false),
];

fn strip_label(text: &str, label: Option<&str>) -> String {
    let text = text.trim();
    match label.and_then(|label| text.strip_prefix(label)) {
        Some(rest) => rest.trim().to_string(),
        None => text.to_string(),
    }
}

/// Turns course blocks into [`CourseRecord`]s using [`FIELD_RULES`].
pub struct CourseExtractor {
    rules: Vec<(FieldRule, Selector)>,
    outcomes: Selector,
    outcome_item: Selector,
}

impl CourseExtractor {
    pub fn new() -> Result<Self, ScrapeError> {
        let rules = FIELD_RULES
            .iter()
            .map(|rule| -> Result<_, ScrapeError> { Ok((*rule, selector(rule.marker)?)) })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CourseExtractor {
            rules,
            outcomes: selector(OUTCOMES_MARKER)?,
            outcome_item: selector(OUTCOME_ITEM_MARKER)?,
        })
    }

    fn field_text(&self, block: ElementRef<'_>, rule: &FieldRule, selector: &Selector) -> Option<String> {
        let element = block.select(selector).next()?;
        let text = strip_label(&element_text(element), rule.label);
        (!text.is_empty()).then_some(text)
    }

    /// Learning outcomes in document order; empty when the block has no outcomes marker.
    fn learning_outcomes(&self, block: ElementRef<'_>) -> Vec<String> {
        let Some(section) = block.select(&self.outcomes).next() else {
            return Vec::new();
        };
        section
            .select(&self.outcome_item)
            .map(element_text)
            .collect()
    }

    pub fn extract(&self, block: &CourseBlock<'_>, capabilities: FeedCapabilities) -> Result<CourseRecord, ScrapeError> {
        let element = block.element();
        let mut code = None;
        let mut name = None;
        let mut record = CourseRecord::default();

        for (rule, selector) in &self.rules {
            if rule.field == Field::LearningHours && !capabilities.learning_hours {
                continue;
            }
            let value = self.field_text(element, rule, selector);
            match rule.field {
                Field::CourseCode => code = value,
                Field::CourseName => name = value,
                Field::CourseUnits => record.course_units = value,
                Field::CourseDescription => record.course_description = value,
                Field::CourseRequirements => record.course_requirements = value,
                Field::LearningHours => record.learning_hours = value,
                Field::CourseEquivalencies => record.course_equivalencies = value,
                Field::OfferingFaculty => record.offering_faculty = value,
            }
        }

        match (code, name) {
            (Some(code), Some(name)) => {
                record.course_code = code;
                record.course_name = name;
            }
            (None, name) => {
                return Err(ScrapeError::MalformedBlock {
                    field: Field::CourseCode.name(),
                    context: name,
                });
            }
            (Some(code), None) => {
                return Err(ScrapeError::MalformedBlock {
                    field: Field::CourseName.name(),
                    context: Some(code),
                });
            }
        }

        record.course_learning_outcomes = self.learning_outcomes(element);
        Ok(record)
    }
}
