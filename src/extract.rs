// src/extract.rs
use regex::Regex;
use serde::Serialize;

/// Keywords that mark a posting as remote-friendly in Italian listings.
const REMOTE_KEYWORDS: [&str; 3] = ["remote", "smart working", "da remoto"];

/// Raw salary text found in a search snippet plus the parsed yearly amount.
/// `eur` stays `None` when the digits cannot be read back as a number.
#[derive(Debug, Clone, Serialize)]
pub struct PostedSalary {
    pub raw: String,
    pub eur: Option<i64>,
}

impl PostedSalary {
    /// Human-readable amount, Italian thousands grouping when parsed.
    pub fn display(&self) -> String {
        match self.eur {
            Some(value) => format_eur(value),
            None => self.raw.clone(),
        }
    }
}

/// Pulls structured signals out of free-text search snippets.
///
/// Search snippets are truncated prose, not structured data, so all of
/// this is best-effort pattern matching. Callers must treat every result
/// as optional.
pub struct SignalExtractor {
    salary_re: Regex,
    company_re: Regex,
    location_re: Regex,
}

impl SignalExtractor {
    pub fn new() -> Self {
        Self {
            salary_re: Regex::new(r"€\s?([\d.,]+)").expect("invalid salary pattern"),
            company_re: Regex::new(r"presso\s+([\w\s&.]+)").expect("invalid company pattern"),
            location_re: Regex::new(r"\ba\s+([\w\s]+)").expect("invalid location pattern"),
        }
    }

    /// First euro amount in the text, e.g. `RAL € 52.000` or `€85.000 - €95.000`.
    pub fn salary(&self, text: &str) -> Option<PostedSalary> {
        let caps = self.salary_re.captures(text)?;
        let raw = caps.get(0)?.as_str().trim().to_string();
        let digits: String = caps
            .get(1)?
            .as_str()
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        if digits.is_empty() {
            return None;
        }
        Some(PostedSalary {
            raw,
            eur: digits.parse::<i64>().ok(),
        })
    }

    /// Company name following `presso`, as in `presso Reply S.p.A., Torino`.
    pub fn company(&self, text: &str) -> Option<String> {
        let caps = self.company_re.captures(text)?;
        let company = caps.get(1)?.as_str().trim();
        if company.is_empty() {
            None
        } else {
            Some(company.to_string())
        }
    }

    /// Location after a standalone `a`, as in `sede a Milano`. The word
    /// boundary keeps trailing vowels of other words from matching.
    pub fn location(&self, text: &str) -> Option<String> {
        let caps = self.location_re.captures(text)?;
        let location = caps.get(1)?.as_str().trim();
        if location.is_empty() {
            None
        } else {
            Some(location.to_string())
        }
    }

    pub fn is_remote(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        REMOTE_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
    }
}

impl Default for SignalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapses runs of whitespace so snippets with hard wraps read as one line.
pub fn clean_snippet(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Formats an amount with Italian thousands separators: 52000 -> "52.000".
pub fn format_eur(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
