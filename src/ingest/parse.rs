//! Case-preserving INI parser.
//!
//! Produces ordered sections of raw `key -> value` strings. Unlike most INI
//! readers, key letter-case is kept exactly as written: `KeyName` stays
//! `KeyName`.
//!
//! Accepted syntax:
//! - `[name]` section headers (name trimmed, case kept)
//! - `key = value` or `key: value`, split at the first delimiter
//! - indented lines directly after a key continue its value (joined by `\n`)
//! - blank lines, and full-line comments starting with `#` or `;`
//!
//! Entries of a `[DEFAULT]` section are visible through every other section
//! unless that section defines the same key.

use crate::error::ParseError;

/// Name of the section whose entries back every other section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// One `[name]` block and its entries in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn new(name: String) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries defined directly in this section, in source order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }
}

/// Parsed INI document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    defaults: Section,
    sections: Vec<Section>,
}

impl Default for Section {
    fn default() -> Self {
        Section::new(DEFAULT_SECTION.to_string())
    }
}

/// Value currently open for continuation lines.
struct OpenValue {
    indent: usize,
}

impl IniDocument {
    /// Parse `text` into sections. The whole text is validated before anything
    /// is returned; there is no partial result on error.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut doc = IniDocument::default();
        // None until the first header; Some(None) while inside [DEFAULT].
        let mut current: Option<Option<usize>> = None;
        let mut open: Option<OpenValue> = None;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                open = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indent = raw.len() - raw.trim_start().len();
            if let (Some(value), Some(section)) = (&open, current) {
                if indent > value.indent {
                    let entry = doc.section_slot(section).entries.last_mut();
                    if let Some((_, existing)) = entry {
                        existing.push('\n');
                        existing.push_str(trimmed);
                    }
                    continue;
                }
            }
            open = None;

            if trimmed.starts_with('[') {
                let name = parse_header(trimmed, line_no)?;
                current = Some(doc.open_section(name, line_no)?);
                continue;
            }

            let section = match current {
                Some(section) => section,
                None => {
                    return Err(ParseError::MissingSectionHeader {
                        line: line_no,
                        content: trimmed.to_string(),
                    })
                }
            };

            let (key, value) = split_entry(trimmed, line_no)?;
            let slot = doc.section_slot(section);
            if slot.contains_key(key) {
                return Err(ParseError::DuplicateKey {
                    line: line_no,
                    section: slot.name.clone(),
                    key: key.to_string(),
                });
            }
            slot.entries.push((key.to_string(), value.to_string()));
            open = Some(OpenValue { indent });
        }

        Ok(doc)
    }

    /// Names of the regular sections in source order. `[DEFAULT]` is not listed.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.iter().any(|s| s.name == name)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn defaults(&self) -> &Section {
        &self.defaults
    }

    /// Effective entries of a section: its own entries in source order, then
    /// any `[DEFAULT]` entries it does not override.
    pub fn items(&self, name: &str) -> Option<Vec<(&str, &str)>> {
        let section = self.section(name)?;
        let mut items: Vec<(&str, &str)> = section.entries().collect();
        items.extend(
            self.defaults
                .entries()
                .filter(|(key, _)| !section.contains_key(key)),
        );
        Some(items)
    }

    /// Effective value of `key` in `section`, falling back to `[DEFAULT]`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let section = self.section(section)?;
        section.get(key).or_else(|| self.defaults.get(key))
    }

    fn open_section(&mut self, name: String, line: usize) -> Result<Option<usize>, ParseError> {
        if name == DEFAULT_SECTION {
            return Ok(None);
        }
        if self.has_section(&name) {
            return Err(ParseError::DuplicateSection { line, name });
        }
        self.sections.push(Section::new(name));
        Ok(Some(self.sections.len() - 1))
    }

    fn section_slot(&mut self, slot: Option<usize>) -> &mut Section {
        match slot {
            Some(index) => &mut self.sections[index],
            None => &mut self.defaults,
        }
    }
}

fn parse_header(line: &str, line_no: usize) -> Result<String, ParseError> {
    let close = line
        .rfind(']')
        .ok_or_else(|| ParseError::UnterminatedSectionHeader {
            line: line_no,
            content: line.to_string(),
        })?;
    let name = line[1..close].trim();
    if name.is_empty() {
        return Err(ParseError::EmptySectionName { line: line_no });
    }
    Ok(name.to_string())
}

fn split_entry(line: &str, line_no: usize) -> Result<(&str, &str), ParseError> {
    let at = line
        .find(|c: char| c == '=' || c == ':')
        .ok_or_else(|| ParseError::MissingDelimiter {
            line: line_no,
            content: line.to_string(),
        })?;
    let key = line[..at].trim();
    if key.is_empty() {
        return Err(ParseError::EmptyKey { line: line_no });
    }
    Ok((key, line[at + 1..].trim()))
}
