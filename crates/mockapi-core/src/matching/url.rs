//! URL pattern matching with path parameters.

use regex::Regex;
use std::collections::HashMap;

/// Path parameters captured by a matching pattern.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlMatch {
    params: HashMap<String, String>,
}

impl UrlMatch {
    /// Captured value for `name`, or an empty string when the pattern has no
    /// such parameter.
    pub fn param(&self, name: &str) -> &str {
        self.params.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }
}

/// Compiled route pattern.
///
/// Templates are literal paths with `{name}` placeholders. Each placeholder
/// compiles to a lazy `(.+?)` capture and the whole pattern is anchored, so a
/// placeholder may span several segments. Route order decides between
/// overlapping patterns.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    template: String,
    regex: Regex,
    param_names: Vec<String>,
}

impl UrlPattern {
    pub fn new(template: &str) -> Self {
        let template = normalize_url(template);
        let mut param_names = Vec::new();
        let mut regex_str = String::from("^");
        let mut literal = String::new();
        let mut chars = template.chars();

        while let Some(c) = chars.next() {
            if c == '{' {
                regex_str.push_str(&regex::escape(&literal));
                literal.clear();
                let name: String = chars.by_ref().take_while(|&c| c != '}').collect();
                param_names.push(name);
                regex_str.push_str("(.+?)");
            } else {
                literal.push(c);
            }
        }
        regex_str.push_str(&regex::escape(&literal));
        regex_str.push('$');

        // Literal parts are escaped, so the expression is always valid
        let regex = Regex::new(&regex_str).expect("valid regex");
        Self {
            template,
            regex,
            param_names,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Match a URL against this pattern. The URL is normalized first and
    /// captured parameters are percent-decoded.
    pub fn matches(&self, url: &str) -> Option<UrlMatch> {
        let url = normalize_url(url);
        let caps = self.regex.captures(&url)?;

        let params = self
            .param_names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| {
                caps.get(i + 1)
                    .map(|m| (name.clone(), decode_param(m.as_str())))
            })
            .collect();

        Some(UrlMatch { params })
    }
}

/// Drop the query string and trailing slashes.
pub fn normalize_url(url: &str) -> String {
    let without_query = url.split('?').next().unwrap_or("");
    let trimmed = without_query.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".into()
    } else {
        trimmed.into()
    }
}

fn decode_param(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_owned())
}
