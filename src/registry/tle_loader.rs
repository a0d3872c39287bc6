use std::fs;
use std::path::Path;

use crate::predict::ElementSet;
use crate::registry::{InMemoryRegistry, RegistryError};

/// Register every satellite found in the `.tle`/`.txt` files of `dir`.
///
/// Unreadable files are logged and skipped. Returns how many were added.
pub fn load_tle_folder(registry: &InMemoryRegistry, dir: &Path) -> Result<usize, RegistryError> {
    if !dir.exists() {
        return Err(RegistryError::DirectoryNotFound(dir.display().to_string()));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_tle = path
            .extension()
            .is_some_and(|ext| ext == "tle" || ext == "txt");
        if path.is_file() && is_tle {
            paths.push(path);
        }
    }
    // read_dir order is platform dependent
    paths.sort();

    let mut added = 0;
    for path in paths {
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Failed to read TLE file {}: {}", path.display(), e);
                continue;
            }
        };

        for (name, line1, line2) in parse_multi_tle(&content) {
            let text = format!("{}\n{}", line1, line2);
            let name = name.unwrap_or_else(|| {
                ElementSet::parse(None, &text)
                    .map(|set| set.label())
                    .unwrap_or_else(|_| "unnamed".to_string())
            });
            registry.add(&name, &text);
            added += 1;
        }
    }

    log::info!("Loaded {} satellites from {}", added, dir.display());
    Ok(added)
}

/// Split multi-satellite TLE content into (name, line1, line2) records.
///
/// Accepts both 2-line and named 3-line records; unrecognised lines are skipped.
pub fn parse_multi_tle(content: &str) -> Vec<(Option<String>, String, String)> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            result.push((None, lines[i].to_string(), lines[i + 1].to_string()));
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            result.push((
                Some(lines[i].to_string()),
                lines[i + 1].to_string(),
                lines[i + 2].to_string(),
            ));
            i += 3;
        } else {
            i += 1;
        }
    }

    result
}
