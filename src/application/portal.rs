use anyhow::Result;

use crate::infrastructure::portal::Portal;
use crate::infrastructure::portal::PortalError;

fn describe_failure(what: &str, err: &PortalError) -> String {
    if err.is_network() {
        return format!("I couldn't reach the portal to load your {what}. Are you signed in? ({err})");
    }

    return format!("The portal page for your {what} didn't look like I expected. ({err})");
}

pub async fn print_courses() -> Result<()> {
    let terms = Portal::default().fetch_course_info().await?;
    println!("{}", serde_json::to_string_pretty(&terms)?);

    return Ok(());
}

pub async fn print_requirements() -> Result<()> {
    let record = Portal::default().fetch_requirements().await?;
    println!("{}", serde_json::to_string_pretty(&record)?);

    return Ok(());
}

/// Chat friendly listing of the cart. Failures are reported in the text
/// rather than ending the chat.
pub async fn courses_message(portal: &Portal) -> String {
    match portal.fetch_course_info().await {
        Ok(terms) => {
            if terms.is_empty() {
                return "Your shopping cart is empty.".to_string();
            }

            return terms
                .iter()
                .map(|term| return term.summary())
                .collect::<Vec<String>>()
                .join("\n\n");
        }
        Err(err) => {
            tracing::error!(error = ?err, "Failed to load course info");
            return describe_failure("courses", &err);
        }
    }
}

pub async fn requirements_message(portal: &Portal) -> String {
    match portal.fetch_requirements().await {
        Ok(record) => return record.summary(),
        Err(err) => {
            tracing::error!(error = ?err, "Failed to load requirements");
            return describe_failure("degree requirements", &err);
        }
    }
}
