//! Terminal rendering for user records.
//!
//! Everything here is a pure function returning a `String`. Printing is
//! left to the caller.

use std::borrow::Cow;

use chrono::{DateTime, Local, Utc};
use console::{measure_text_width, pad_str, Alignment};

use crate::user::User;

/// Column width that labels are aligned against.
const LABEL_COLUMN: usize = 24;

/// Separator between the items of a list value.
const LIST_SEPARATOR: &str = "\n\t\t\t";

/// Named text styles used by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Bold,
    Yellow,
    Cyan,
}

impl Style {
    /// Applies the style. Styling is dropped when the terminal has colors
    /// disabled.
    pub fn paint(self, text: &str) -> String {
        let style = match self {
            Style::Bold => console::Style::new().bold(),
            Style::Yellow => console::Style::new().yellow(),
            Style::Cyan => console::Style::new().cyan(),
        };
        style.apply_to(text).to_string()
    }
}

/// A value handed to [`render_field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Absent,
    Text(Cow<'a, str>),
    List(&'a [String]),
}

impl<'a> From<Option<&'a str>> for FieldValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(FieldValue::Absent, |v| FieldValue::Text(Cow::Borrowed(v)))
    }
}

impl<'a> From<&'a [String]> for FieldValue<'a> {
    fn from(values: &'a [String]) -> Self {
        FieldValue::List(values)
    }
}

impl From<Option<&DateTime<Utc>>> for FieldValue<'static> {
    fn from(value: Option<&DateTime<Utc>>) -> Self {
        value.map_or(FieldValue::Absent, |dt| {
            FieldValue::Text(Cow::Owned(format_timestamp(dt)))
        })
    }
}

/// Tabs placed between a label and its value.
///
/// One tab, plus one if `24 - len > 8`, plus one more if `24 - len > 16`.
pub fn label_padding(label: &str) -> &'static str {
    let remaining = LABEL_COLUMN as isize - label.chars().count() as isize;
    if remaining > 16 {
        "\t\t\t"
    } else if remaining > 8 {
        "\t\t"
    } else {
        "\t"
    }
}

/// Renders one `label<tabs>value` line, or nothing for an absent value or
/// an empty list.
pub fn render_field(label: &str, value: FieldValue<'_>, style: Option<Style>) -> Option<String> {
    let paint = |text: &str| match style {
        Some(style) => style.paint(text),
        None => text.to_string(),
    };

    let rendered = match value {
        FieldValue::Absent => return None,
        FieldValue::List([]) => return None,
        FieldValue::List(items) => items
            .iter()
            .map(|item| paint(item.as_str()))
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        FieldValue::Text(text) => paint(text.as_ref()),
    };

    Some(format!("{}{}{}", label, label_padding(label), rendered))
}

/// Formats a timestamp as a local date for display.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local)
        .format("%a %b %d %Y %H:%M:%S GMT%z")
        .to_string()
}

/// Renders the full record view: a blank separator line followed by the
/// known attributes in fixed order.
pub fn render_user(user: &User) -> String {
    let fields = [
        render_field("Name", user.name.as_deref().into(), Some(Style::Bold)),
        render_field("User ID", user.id.as_deref().into(), Some(Style::Yellow)),
        render_field("Given name", user.given_name.as_deref().into(), None),
        render_field("Middle name", user.middle_name.as_deref().into(), None),
        render_field("Family name", user.family_name.as_deref().into(), None),
        render_field("Nickname", user.nickname.as_deref().into(), None),
        render_field(
            "Preferred Username",
            user.preferred_username.as_deref().into(),
            None,
        ),
        render_field("Profile", user.profile.as_deref().into(), None),
        render_field("Picture", user.picture.as_deref().into(), None),
        render_field("Website", user.website.as_deref().into(), None),
        render_field("Email", user.email.as_deref().into(), None),
        render_field("Created", user.created.as_ref().into(), None),
        render_field("Modified", user.modified.as_ref().into(), None),
    ];

    std::iter::once(String::new())
        .chain(fields.into_iter().flatten())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the listing table: Name, Client ID, URI (which carries the email).
pub fn render_user_table(users: &[User]) -> String {
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|user| {
            vec![
                Style::Bold.paint(&user.display_name()),
                Style::Yellow.paint(user.id_str()),
                user.email
                    .as_deref()
                    .map(|email| Style::Cyan.paint(email))
                    .unwrap_or_default(),
            ]
        })
        .collect();

    render_table(&["Name", "Client ID", "URI"], &rows)
}

/// Label for a user in the selection menu.
pub fn select_label(user: &User) -> String {
    format!(
        "{} – {}",
        user.display_name(),
        Style::Yellow.paint(user.id_str())
    )
}

/// Draws a box table. Column widths ignore ANSI escape sequences.
pub fn render_table(head: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = head.iter().map(|h| measure_text_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(measure_text_width(cell));
        }
    }

    let border = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(mid), right)
    };
    let line = |cells: &[&str]| {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).copied().unwrap_or_default();
                format!(" {} ", pad_str(cell, *w, Alignment::Left, None))
            })
            .collect();
        format!("│{}│", padded.join("│"))
    };

    let mut output = vec![border("┌", "┬", "┐"), line(head), border("├", "┼", "┤")];
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        output.push(line(&cells));
    }
    output.push(border("└", "┴", "┘"));
    output.join("\n")
}
