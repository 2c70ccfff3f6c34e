#[cfg(test)]
#[path = "portal_test.rs"]
mod tests;

mod courses;
mod error;
mod requirements;

pub use courses::*;
pub use error::*;
pub use requirements::*;
use reqwest::header;
use scraper::Selector;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AcademicRecord;
use crate::domain::models::CourseTerm;

fn selector(css: &str) -> Result<Selector, PortalError> {
    return Selector::parse(css).map_err(|err| {
        return PortalError::Selector {
            selector: css.to_string(),
            reason: format!("{err:?}"),
        };
    });
}

/// Client for the two registration portal pages the assistant reads. The
/// portal only answers authenticated sessions, so the browser's session
/// cookie is passed along when one is configured.
pub struct Portal {
    course_info_url: String,
    requirements_url: String,
    cookie: String,
}

impl Default for Portal {
    fn default() -> Portal {
        return Portal {
            course_info_url: Config::get(ConfigKey::PortalCourseInfoURL),
            requirements_url: Config::get(ConfigKey::PortalRequirementsURL),
            cookie: Config::get(ConfigKey::PortalCookie),
        };
    }
}

impl Portal {
    pub async fn fetch_course_info(&self) -> Result<Vec<CourseTerm>, PortalError> {
        let html = self.fetch_html(&self.course_info_url).await?;
        return parse_course_info(&html);
    }

    pub async fn fetch_requirements(&self) -> Result<AcademicRecord, PortalError> {
        let html = self.fetch_html(&self.requirements_url).await?;
        return parse_requirements(&html);
    }

    async fn fetch_html(&self, url: &str) -> Result<String, PortalError> {
        let mut req = reqwest::Client::new().get(url);
        if !self.cookie.is_empty() {
            req = req.header(header::COOKIE, &self.cookie);
        }

        let res = req.send().await?;
        if !res.status().is_success() {
            let status = res.status().as_u16();
            tracing::error!(url = url, status = status, "Portal request failed");
            return Err(PortalError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = res.text().await?;
        tracing::debug!(url = url, bytes = body.len(), "Fetched portal page");

        return Ok(body);
    }
}
