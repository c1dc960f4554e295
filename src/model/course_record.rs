use serde::{Deserialize, Serialize};

/// One course as extracted from a catalog course block.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct CourseRecord {
    pub course_code: String,
    pub course_name: String,
    pub course_description: Option<String>,
    pub offering_faculty: Option<String>,
    pub learning_hours: Option<String>,
    pub course_learning_outcomes: Vec<String>,
    pub course_requirements: Option<String>,
    pub course_equivalencies: Option<String>,
    pub course_units: Option<String>,
}

impl CourseRecord {
    /// Column order shared by every sink.
    pub const COLUMNS: [&'static str; 9] = [
        "course_code",
        "course_name",
        "course_description",
        "offering_faculty",
        "learning_hours",
        "course_learning_outcomes",
        "course_requirements",
        "course_equivalencies",
        "course_units",
    ];

    pub fn new(course_code: impl Into<String>, course_name: impl Into<String>) -> Self {
        CourseRecord {
            course_code: course_code.into(),
            course_name: course_name.into(),
            ..Default::default()
        }
    }

    /// Mutable handles to every nullable text field.
    pub(crate) fn optional_fields_mut(&mut self) -> [&mut Option<String>; 6] {
        [
            &mut self.course_description,
            &mut self.offering_faculty,
            &mut self.learning_hours,
            &mut self.course_requirements,
            &mut self.course_equivalencies,
            &mut self.course_units,
        ]
    }
}

/// Row shape of the hosted `courses` table.
#[derive(Serialize, Debug)]
pub struct CourseRow<'a> {
    #[serde(flatten)]
    pub record: &'a CourseRecord,

    /// Filled in later by a separate job
    pub average_gpa: Option<f64>,

    pub average_enrollment: Option<f64>,
}

impl<'a> From<&'a CourseRecord> for CourseRow<'a> {
    fn from(record: &'a CourseRecord) -> Self {
        CourseRow {
            record,
            average_gpa: None,
            average_enrollment: None,
        }
    }
}
