//! Top-level command listing grouped by category

use crate::config::DEFAULT_CATEGORY;
use std::fmt::Write;

/// One command as it appears in the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingItem<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub summary: Option<&'a str>,
}

/// Group commands by category
///
/// The default category comes first, then the other categories in order of
/// first appearance. Commands keep their registration order.
pub fn group_by_category<'a>(items: &[ListingItem<'a>]) -> Vec<(&'a str, Vec<ListingItem<'a>>)> {
    let mut groups: Vec<(&'a str, Vec<ListingItem<'a>>)> = Vec::new();

    if items.iter().any(|item| item.category == DEFAULT_CATEGORY) {
        groups.push((DEFAULT_CATEGORY, Vec::new()));
    }

    for item in items {
        match groups.iter_mut().find(|(category, _)| *category == item.category) {
            Some((_, members)) => members.push(*item),
            None => groups.push((item.category, vec![*item])),
        }
    }

    groups
}

/// Render the listing shown when no command, or an unknown one, is given
pub fn render_listing(items: &[ListingItem<'_>]) -> String {
    let width = items.iter().map(|item| item.name.len()).max().unwrap_or(0) + 2;
    let mut out = String::new();

    for (category, members) in group_by_category(items) {
        let _ = writeln!(out, "{} Commands:", category);
        for item in members {
            match item.summary {
                Some(summary) => {
                    let _ = writeln!(out, "  {:<width$}{}", item.name, summary, width = width);
                }
                None => {
                    let _ = writeln!(out, "  {}", item.name);
                }
            }
        }
    }

    out
}
