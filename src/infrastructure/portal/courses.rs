#[cfg(test)]
#[path = "courses_test.rs"]
mod tests;

use scraper::ElementRef;
use scraper::Html;
use scraper::Selector;

use super::selector;
use super::PortalError;
use crate::domain::models::CourseRow;
use crate::domain::models::CourseTerm;

const CART_TERM_SELECTOR: &str = ".isSSS_ShCtTermWrp:not(.huSSS_EnrollmentEvents)";
const ENROLLED_TERM_SELECTOR: &str = ".isSSS_ShCtSchWrp";
const NON_PRIMARY_ROW_CLASS: &str = "isSSS_ShCtNonPrim";
const TERM_NAME_DELIMITER: &str = " - ";

/// Cart and enrolled tables name their cells `tbl{prefix}_{column}` in the
/// `headers` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TableKind {
    Cart,
    Enrolled,
}

impl TableKind {
    fn prefix(&self) -> &'static str {
        match self {
            TableKind::Cart => return "Cart",
            TableKind::Enrolled => return "",
        }
    }
}

/// Collapses every run of whitespace, including non-breaking spaces and the
/// `Â ` left behind when they are decoded as Latin-1, into one space.
pub fn normalize_text(text: &str) -> String {
    return text
        .replace("\u{c2}\u{a0}", " ")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ");
}

fn element_text(element: ElementRef) -> String {
    return normalize_text(&element.text().collect::<String>());
}

/// Selectors for one table variant, built once per page.
struct RowSelectors {
    row: Selector,
    course: Selector,
    session: Selector,
    instructor: Selector,
    location: Selector,
    time: Selector,
    day: Selector,
}

impl RowSelectors {
    fn new(kind: TableKind) -> Result<RowSelectors, PortalError> {
        let cell = |column: &str| -> Result<Selector, PortalError> {
            return selector(&format!("[headers=\"tbl{}_{column}\"]", kind.prefix()));
        };

        return Ok(RowSelectors {
            row: selector("tr")?,
            course: cell("Course")?,
            session: cell("Session")?,
            instructor: cell("Instructor")?,
            location: cell("Location")?,
            time: cell("Time")?,
            day: cell("Day")?,
        });
    }
}

fn cell_text(row: ElementRef, cell: &Selector) -> Option<String> {
    return row.select(cell).next().map(element_text);
}

fn extract_rows(container: ElementRef, selectors: &RowSelectors) -> Vec<CourseRow> {
    let mut rows = vec![];

    for row in container.select(&selectors.row).skip(1) {
        if row
            .value()
            .classes()
            .any(|class| return class == NON_PRIMARY_ROW_CLASS)
        {
            continue;
        }

        let title = match cell_text(row, &selectors.course) {
            Some(title) if !title.is_empty() => title,
            _ => continue,
        };

        let cell = |column: &Selector| -> String {
            return cell_text(row, column).unwrap_or_default();
        };

        rows.push(CourseRow {
            title,
            session: cell(&selectors.session),
            instructor: cell(&selectors.instructor),
            location: cell(&selectors.location),
            time: cell(&selectors.time),
            day: cell(&selectors.day),
        });
    }

    return rows;
}

/// Headings read like `Fall 2024 - Shopping Cart`. The name is everything
/// after the first delimiter, or the whole heading when there is none.
fn term_name(container: ElementRef, heading_selector: &Selector) -> String {
    let heading = match container.select(heading_selector).next() {
        Some(heading) => element_text(heading),
        None => return "".to_string(),
    };

    let name = match heading.split_once(TERM_NAME_DELIMITER) {
        Some((_, name)) => name,
        None => heading.as_str(),
    };

    return name.trim().to_string();
}

/// Projects the shopping cart summary page into one entry per cart term.
///
/// Enrolled schedules are attached by position: the n-th enrolled section
/// goes to the n-th cart term. The page lists both in term order, but
/// nothing on the page ties them together, so a mismatch is only logged.
pub fn parse_course_info(html: &str) -> Result<Vec<CourseTerm>, PortalError> {
    let doc = Html::parse_document(html);

    let heading = selector("h2")?;
    let cart_rows = RowSelectors::new(TableKind::Cart)?;
    let enrolled_rows = RowSelectors::new(TableKind::Enrolled)?;

    let mut terms = vec![];
    for container in doc.select(&selector(CART_TERM_SELECTOR)?) {
        terms.push(CourseTerm {
            cart_name: term_name(container, &heading),
            cart_classes: extract_rows(container, &cart_rows),
            enrolled_courses: vec![],
        });
    }

    let mut enrolled = vec![];
    for container in doc.select(&selector(ENROLLED_TERM_SELECTOR)?) {
        enrolled.push(extract_rows(container, &enrolled_rows));
    }

    if enrolled.len() != terms.len() {
        tracing::warn!(
            cart_terms = terms.len(),
            enrolled_terms = enrolled.len(),
            "Cart and enrolled term counts differ"
        );
    }

    let mut enrolled = enrolled.into_iter();
    for term in terms.iter_mut() {
        term.enrolled_courses = enrolled.next().unwrap_or_default();
    }

    tracing::debug!(terms = terms.len(), "Parsed course info");

    return Ok(terms);
}
