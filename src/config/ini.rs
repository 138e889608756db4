//! INI-style file parsing.
//!
//! Both the snapcraft credential file and Python `setup.cfg` metadata use
//! the same sectioned `key = value` layout. Only the subset those files use
//! is supported.

use anyhow::{bail, Result};
use std::collections::HashMap;
use std::path::Path;

/// A parsed INI document.
///
/// # Supported Formats
///
/// - Sections: `[login.ubuntu.com]`
/// - Entries: `key = value` or `key: value`; keys are case-insensitive
/// - Comments: lines starting with `#` or `;`
/// - Continuation: indented lines extend the previous value
///
/// # Example
///
/// ```
/// use release_status::config::IniFile;
///
/// let content = r#"
/// [metadata]
/// name = maas
/// version = 3.1.0b3
/// "#;
///
/// let ini = IniFile::parse(content).unwrap();
/// assert_eq!(ini.get("metadata", "version"), Some("3.1.0b3"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IniFile {
    sections: HashMap<String, HashMap<String, String>>,
}

impl IniFile {
    /// Parse INI content.
    pub fn parse(content: &str) -> Result<Self> {
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current: Option<String> = None;
        let mut last_key: Option<String> = None;

        for (index, raw) in content.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            // Indented line continues the previous value
            if raw.starts_with(char::is_whitespace) {
                if let (Some(section), Some(key)) = (&current, &last_key) {
                    if let Some(value) = sections
                        .get_mut(section)
                        .and_then(|entries| entries.get_mut(key))
                    {
                        if !value.is_empty() {
                            value.push('\n');
                        }
                        value.push_str(trimmed);
                        continue;
                    }
                }
            }

            if let Some(name) = trimmed.strip_prefix('[') {
                let Some(name) = name.strip_suffix(']') else {
                    bail!("line {}: unterminated section header", line_no);
                };
                let name = name.trim().to_string();
                sections.entry(name.clone()).or_default();
                current = Some(name);
                last_key = None;
                continue;
            }

            let Some((key, value)) = Self::parse_entry(trimmed) else {
                bail!("line {}: expected 'key = value'", line_no);
            };

            let Some(section) = &current else {
                bail!("line {}: entry '{}' outside of any section", line_no, key);
            };

            sections
                .entry(section.clone())
                .or_default()
                .insert(key.clone(), value);
            last_key = Some(key);
        }

        Ok(Self { sections })
    }

    /// Split an entry at the first `=` or `:`. Keys are lowercased.
    fn parse_entry(line: &str) -> Option<(String, String)> {
        let pos = line.find(['=', ':'])?;
        let key = line[..pos].trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_ascii_lowercase(), line[pos + 1..].trim().to_string()))
    }

    /// Load and parse an INI file from a path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Whether a section is present.
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// All entries of a section.
    pub fn section(&self, section: &str) -> Option<&HashMap<String, String>> {
        self.sections.get(section)
    }

    /// Value of a key in a section. The key is matched case-insensitively.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|entries| entries.get(&key.to_ascii_lowercase()))
            .map(String::as_str)
    }
}
