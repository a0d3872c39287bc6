use serde::Serialize;

use crate::predict::TrackError;

/// A two-line orbital element set, split but not yet checked field by field.
///
/// Checksums and numeric fields are validated by the propagator, not here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementSet {
    pub name: Option<String>,
    pub line1: String,
    pub line2: String,
}

impl ElementSet {
    /// Parse free text holding exactly two non-empty lines.
    pub fn parse(name: Option<&str>, text: &str) -> Result<Self, TrackError> {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from);

        let lines: Vec<&str> = text.trim().lines().map(|l| l.trim()).collect();

        match lines.as_slice() {
            [line1, line2] if !line1.is_empty() && !line2.is_empty() => Ok(Self {
                name,
                line1: line1.to_string(),
                line2: line2.to_string(),
            }),
            _ => Err(TrackError::InvalidElementFormat {
                satellite: label_for(name.as_deref(), lines.first().copied()),
                lines: lines.iter().filter(|l| !l.is_empty()).count(),
            }),
        }
    }

    /// Catalog number from columns 3-7 of line 1, if present.
    pub fn norad_id(&self) -> Option<u32> {
        norad_id(&self.line1)
    }

    /// Display name: the given name, else the catalog number.
    pub fn label(&self) -> String {
        label_for(self.name.as_deref(), Some(&self.line1))
    }
}

fn norad_id(line1: &str) -> Option<u32> {
    if !line1.starts_with("1 ") {
        return None;
    }
    line1.get(2..7)?.trim().parse().ok()
}

fn label_for(name: Option<&str>, line1: Option<&str>) -> String {
    match (name, line1.and_then(norad_id)) {
        (Some(name), _) => name.to_string(),
        (None, Some(id)) => format!("NORAD {}", id),
        (None, None) => "unnamed".to_string(),
    }
}
