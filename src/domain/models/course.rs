use serde_derive::Deserialize;
use serde_derive::Serialize;

/// One class line from a cart or enrolled schedule table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRow {
    pub title: String,
    pub session: String,
    pub instructor: String,
    pub location: String,
    pub time: String,
    pub day: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseTerm {
    pub cart_name: String,
    pub cart_classes: Vec<CourseRow>,
    pub enrolled_courses: Vec<CourseRow>,
}

impl CourseTerm {
    /// Short human readable listing, used when pushing scrape results into
    /// the chat transcript.
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("{}:", self.cart_name)];
        if self.cart_classes.is_empty() && self.enrolled_courses.is_empty() {
            lines.push("  (no courses)".to_string());
        }
        for row in &self.cart_classes {
            lines.push(format!("  [cart] {}", row.summary()));
        }
        for row in &self.enrolled_courses {
            lines.push(format!("  [enrolled] {}", row.summary()));
        }

        return lines.join("\n");
    }
}

impl CourseRow {
    pub fn summary(&self) -> String {
        let mut res = self.title.to_string();
        let when = [self.day.as_str(), self.time.as_str()]
            .iter()
            .filter(|part| return !part.is_empty())
            .copied()
            .collect::<Vec<&str>>()
            .join(" ");
        if !when.is_empty() {
            res = format!("{res}, {when}");
        }
        if !self.instructor.is_empty() {
            res = format!("{res}, {}", self.instructor);
        }

        return res;
    }
}
