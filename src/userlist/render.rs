//! Terminal rendering of the user table and the detail sheet.

use super::{theme::Theme, types::User};
use owo_colors::{OwoColorize, Style};
use std::fmt::Write;

const HEADERS: [&str; 6] = ["ID", "NAME", "EMAIL", "CITY", "STATUS", "PHONE"];
const CAPTION: &str = "User list";

/// Colors for one theme; plain output when color is off.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    theme: Theme,
    color: bool,
}

impl Palette {
    #[must_use]
    pub fn new(theme: Theme, color: bool) -> Self {
        Self { theme, color }
    }

    #[must_use]
    pub fn plain() -> Self {
        Self::new(Theme::Dark, false)
    }

    fn header(self) -> Style {
        match self.theme {
            Theme::Dark => Style::new().bright_white().bold(),
            Theme::Light => Style::new().bold(),
        }
    }

    fn active(self) -> Style {
        match self.theme {
            Theme::Dark => Style::new().bright_green(),
            Theme::Light => Style::new().green(),
        }
    }

    fn inactive(self) -> Style {
        match self.theme {
            Theme::Dark => Style::new().bright_black(),
            Theme::Light => Style::new().dimmed(),
        }
    }

    fn muted(self) -> Style {
        match self.theme {
            Theme::Dark => Style::new().white(),
            Theme::Light => Style::new().dimmed(),
        }
    }

    fn paint(self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

#[must_use]
pub fn status_label(user: &User) -> &'static str {
    if user.status { "ACTIVE" } else { "INACTIVE" }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Render the filtered rows as an aligned table.
#[must_use]
pub fn table(users: &[&User], palette: Palette) -> String {
    let mut out = String::new();

    if users.is_empty() {
        let _ = writeln!(out, "{}", palette.paint("No users found.", palette.muted()));
        return out;
    }

    let rows: Vec<[&str; 6]> = users
        .iter()
        .map(|user| {
            [
                user.id.as_str(),
                user.name.as_str(),
                user.email.as_str(),
                user.city.as_str(),
                status_label(user),
                user.phone.as_str(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_line = HEADERS
        .iter()
        .zip(widths)
        .map(|(header, width)| pad(header, width))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(
        out,
        "{}",
        palette.paint(header_line.trim_end(), palette.header())
    );

    for (row, user) in rows.iter().zip(users) {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(index, (cell, width))| {
                let padded = pad(cell, width);
                match index {
                    2 => palette.paint(&padded, palette.muted()),
                    4 if user.status => palette.paint(&padded, palette.active()),
                    4 => palette.paint(&padded, palette.inactive()),
                    _ => padded,
                }
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join("  ").trim_end());
    }

    let _ = writeln!(
        out,
        "{}",
        palette.paint(&format!("{CAPTION} ({})", users.len()), palette.muted())
    );

    out
}

/// Render the profile sheet of a single record.
#[must_use]
pub fn detail(user: &User, palette: Palette) -> String {
    let mut out = String::new();
    let rule = "-".repeat(32);
    let status = if user.status {
        palette.paint(status_label(user), palette.active())
    } else {
        palette.paint(status_label(user), palette.inactive())
    };

    let _ = writeln!(out, "{}", palette.paint("User Info", palette.header()));
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{}", palette.paint(&user.name, palette.header()));
    let _ = writeln!(out, "id:     {}", user.id);
    let _ = writeln!(out, "avatar: {}", user.avatar);
    let _ = writeln!(out, "email:  {}", user.email);
    let _ = writeln!(out, "city:   {}", user.city);
    let _ = writeln!(out, "phone:  {}", user.phone);
    let _ = writeln!(out, "status: {status}");
    let _ = writeln!(out, "{rule}");

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str, city: &str, status: bool) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            city: city.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0100".to_string(),
            status,
            avatar: format!("https://example.com/{id}.png"),
        }
    }

    #[test]
    fn empty_table() {
        assert_eq!(table(&[], Palette::plain()), "No users found.\n");
    }

    #[test]
    fn table_aligns_columns() {
        let ana = user("1", "Ana", "Lima", true);
        let bob = user("2", "Bob", "Oslo", false);
        let rendered = table(&[&ana, &bob], Palette::plain());

        let expected = "\
ID  NAME  EMAIL            CITY  STATUS    PHONE
1   Ana   ana@example.com  Lima  ACTIVE    555-0100
2   Bob   bob@example.com  Oslo  INACTIVE  555-0100
User list (2)
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn colored_table_contains_escape_codes() {
        let ana = user("1", "Ana", "Lima", true);
        let rendered = table(&[&ana], Palette::new(Theme::Light, true));
        assert!(rendered.contains("\u{1b}["));
        assert!(rendered.contains("ACTIVE"));
    }

    #[test]
    fn detail_lists_all_fields() {
        let ana = user("1", "Ana", "Lima", true);
        let rendered = detail(&ana, Palette::plain());

        assert!(rendered.starts_with("User Info\n"));
        assert!(rendered.contains("Ana\n"));
        assert!(rendered.contains("avatar: https://example.com/1.png\n"));
        assert!(rendered.contains("email:  ana@example.com\n"));
        assert!(rendered.contains("city:   Lima\n"));
        assert!(rendered.contains("phone:  555-0100\n"));
        assert!(rendered.contains("status: ACTIVE\n"));
    }
}
