// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML target extraction
//!
//! Locates the watched element with a CSS selector and returns its visible
//! text with whitespace collapsed.

use std::fmt;

use scraper::{ElementRef, Html, Selector};

use super::config::ConfigError;
use super::types::MonitorError;

/// Elements whose text never renders
const INVISIBLE: [&str; 4] = ["script", "style", "noscript", "template"];

/// Elements that start a new line when rendered
const BLOCK: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "nav", "ol", "p", "pre", "section", "table", "tbody", "td", "tfoot", "th",
    "thead", "tr", "ul",
];

/// A parsed CSS selector together with its source text
#[derive(Debug, Clone)]
pub struct TargetSelector {
    raw: String,
    selector: Selector,
}

impl TargetSelector {
    /// Parse a CSS selector such as `div#home`
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        let selector = Selector::parse(raw).map_err(|e| ConfigError::InvalidSelector {
            selector: raw.to_string(),
            reason: format!("{:?}", e),
        })?;
        Ok(Self {
            raw: raw.to_string(),
            selector,
        })
    }

    /// Selector source text
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for TargetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Extract the visible text of the first element matching `target`
///
/// # Returns
/// The element text, whitespace collapsed and trimmed, or
/// `MonitorError::ContentNotFound` when nothing matches.
pub fn extract_target_text(html: &str, target: &TargetSelector) -> Result<String, MonitorError> {
    let document = Html::parse_document(html);

    let element = document
        .select(&target.selector)
        .next()
        .ok_or_else(|| MonitorError::ContentNotFound {
            selector: target.raw.clone(),
        })?;

    Ok(clean_text(&visible_text(&element)))
}

/// Concatenate text nodes under `element`, skipping non-rendered subtrees
///
/// Inline markup joins its text directly; block-level elements are padded
/// with a space so adjacent blocks never run together.
fn visible_text(element: &ElementRef) -> String {
    let mut out = String::new();
    collect_visible(*element, &mut out);
    out
}

fn collect_visible(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            continue;
        }
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child.value().name();
        if INVISIBLE.contains(&name) {
            continue;
        }
        let block = BLOCK.contains(&name);
        if block {
            out.push(' ');
        }
        collect_visible(child, out);
        if block {
            out.push(' ');
        }
    }
}

/// Clean text: collapse whitespace runs to one space and trim
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
