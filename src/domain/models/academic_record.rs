use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Map;
use serde_json::Value;

/// Degree progress payload embedded in the portal's requirements page. The
/// portal owns this schema, so only the nesting the assistant relies on is
/// typed and everything else is carried through untouched. The three top
/// level fields are required, anything else is not a degree progress record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AcademicRecord {
    pub config: Value,
    pub results: Vec<RequirementGroup>,
    pub debug: Value,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequirementGroup {
    #[serde(default)]
    pub requirements: Vec<RequirementDetail>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementDetail {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

fn describe(fields: &Map<String, Value>) -> String {
    let description = fields
        .get("Description")
        .and_then(|val| return val.as_str())
        .unwrap_or("(unnamed)");

    if let Some(status) = fields.get("Status").and_then(|val| return val.as_str()) {
        return format!("{description} [{status}]");
    }

    return description.to_string();
}

impl AcademicRecord {
    pub fn summary(&self) -> String {
        if self.results.is_empty() {
            return "No requirement groups found.".to_string();
        }

        let mut lines = vec![];
        for group in &self.results {
            lines.push(format!("{}:", describe(&group.fields)));
            for requirement in &group.requirements {
                lines.push(format!("  - {}", describe(&requirement.fields)));
            }
        }

        return lines.join("\n");
    }
}
