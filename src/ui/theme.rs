use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Styles for lookup output
#[derive(Debug, Clone)]
pub struct Theme {
    /// The query a result belongs to
    pub query: Style,
    /// Table names, in results and listings
    pub table: Style,
    /// Column names in record output
    pub column: Style,
    pub not_found: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub label: Style,
    pub muted: Style,
}

impl Theme {
    /// Colored only on a terminal that accepts colors (`NO_COLOR` and
    /// `CLICOLOR` are honored by `console`)
    pub fn detect() -> Self {
        if console::Term::stdout().is_term() && console::colors_enabled() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn colored() -> Self {
        Self {
            query: Style::new().cyan().bold(),
            table: Style::new().magenta().bold(),
            column: Style::new().blue().bold(),
            not_found: Style::new().white().dimmed(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warn: Style::new().yellow().bold(),
            label: Style::new().white().dimmed(),
            muted: Style::new().bright_black(),
        }
    }

    pub fn plain() -> Self {
        Self {
            query: Style::new(),
            table: Style::new(),
            column: Style::new(),
            not_found: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warn: Style::new(),
            label: Style::new(),
            muted: Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use owo_colors::OwoColorize;

    #[test]
    fn test_plain_theme_leaves_text_alone() {
        let plain = Theme::plain();
        assert_eq!("PM660".style(plain.query).to_string(), "PM660");
        assert_eq!("pmic".style(plain.table).to_string(), "pmic");
    }

    #[test]
    fn test_colored_theme_styles_tables() {
        let colored = Theme::colored();
        assert_ne!("pmic".style(colored.table).to_string(), "pmic");
    }
}
