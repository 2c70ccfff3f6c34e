#[cfg(test)]
#[path = "requirements_test.rs"]
mod tests;

use scraper::Html;

use super::selector;
use super::PortalError;
use crate::domain::models::AcademicRecord;

const CONTAINER_CLASS: &str = ".ptprtlcontainer";

/// The requirements page ships its data as a JSON document inside a single
/// container element.
pub fn parse_requirements(html: &str) -> Result<AcademicRecord, PortalError> {
    let doc = Html::parse_document(html);
    let container = doc
        .select(&selector(CONTAINER_CLASS)?)
        .next()
        .ok_or(PortalError::MissingElement(CONTAINER_CLASS))?;

    let payload = container.text().collect::<String>();
    let record = serde_json::from_str::<AcademicRecord>(payload.trim())?;

    return Ok(record);
}
