use crate::model::faculty::Faculty;

const ARTS_SCIENCE_URL: &str = "https://www.queensu.ca/academic-calendar/arts-science/course-descriptions/";
const EDUCATION_URL: &str = "https://www.queensu.ca/academic-calendar/education/course-descriptions/";
const HEALTH_SCIENCES_URL: &str = "https://www.queensu.ca/academic-calendar/health-sciences/bhsc/courses-instruction/";
const NURSING_URL: &str = "https://www.queensu.ca/academic-calendar/nursing/bachelor-nursing-science-course-descriptions/";
const COMMERCE_URL: &str = "https://www.queensu.ca/academic-calendar/business/bachelor-commerce/courses-of-instruction/by20number/#onezerozeroleveltext";

const ENGINEERING_BASE: &str = "https://www.queensu.ca/academic-calendar/engineering-applied-sciences/courses-instruction/";
const ENGINEERING_PROGRAMS: [&str; 14] = [
    "apsc", "chee", "civl", "cmpe", "elec", "ench", "enph", "geoe", "mthe", "mech", "mren", "mine", "mntc", "soft",
];

/// The Queen's University academic calendar, faculty by faculty.
pub fn queens_catalog() -> Vec<Faculty> {
    let engineering: Vec<String> = ENGINEERING_PROGRAMS
        .iter()
        .map(|program| format!("{}{}/", ENGINEERING_BASE, program))
        .collect();
    let engineering: Vec<&str> = engineering.iter().map(String::as_str).collect();

    vec![
        Faculty::index("Arts & Science", ARTS_SCIENCE_URL),
        Faculty::pages("Education", &[EDUCATION_URL]),
        Faculty::pages("Health Sciences", &[HEALTH_SCIENCES_URL]),
        Faculty::pages("Nursing", &[NURSING_URL]).without_learning_hours(),
        Faculty::pages("Engineering", &engineering).without_learning_hours(),
        Faculty::pages("Commerce", &[COMMERCE_URL]).without_learning_hours(),
    ]
}

/// Keeps the faculties whose names match one of `names`, ignoring case. An empty filter keeps all.
pub fn select_faculties(catalog: Vec<Faculty>, names: &[String]) -> Vec<Faculty> {
    if names.is_empty() {
        return catalog;
    }
    catalog
        .into_iter()
        .filter(|faculty| names.iter().any(|name| name.trim().eq_ignore_ascii_case(&faculty.name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::faculty::FacultyFeed;

    #[test]
    fn learning_hours_only_where_exposed() {
        let with_hours: Vec<_> = queens_catalog()
            .into_iter()
            .filter(|f| f.capabilities.learning_hours)
            .map(|f| f.name)
            .collect();
        assert_eq!(with_hours, ["Arts & Science", "Education", "Health Sciences"]);
    }

    #[test]
    fn engineering_lists_every_program() {
        let catalog = queens_catalog();
        let engineering = catalog.iter().find(|f| f.name == "Engineering").unwrap();
        let FacultyFeed::Pages(urls) = &engineering.feed else {
            panic!("engineering should list pages directly");
        };
        assert_eq!(urls.len(), 14);
        assert!(urls[0].ends_with("/courses-instruction/apsc/"));
        assert!(urls[13].ends_with("/courses-instruction/soft/"));
    }

    #[test]
    fn filter_is_case_insensitive() {
        let picked = select_faculties(queens_catalog(), &["nursing".into(), " COMMERCE ".into()]);
        let names: Vec<_> = picked.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Nursing", "Commerce"]);
        assert_eq!(select_faculties(queens_catalog(), &[]).len(), 6);
    }
}
