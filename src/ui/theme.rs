use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Styles for CLI banners and status lines
#[derive(Debug, Clone)]
pub struct Theme {
    pub banner: Style,
    pub ok: Style,
    pub caution: Style,
    pub accent: Style,
    pub label: Style,
}

impl Theme {
    pub fn detect() -> Self {
        if console::Term::stdout().is_term() {
            Self::ansi()
        } else {
            Self::monochrome()
        }
    }

    pub fn ansi() -> Self {
        Self {
            banner: Style::new().bright_blue().bold(),
            ok: Style::new().green(),
            caution: Style::new().yellow(),
            accent: Style::new().bright_cyan(),
            label: Style::new().bright_black(),
        }
    }

    pub fn monochrome() -> Self {
        let none = Style::new();
        Self {
            banner: none,
            ok: none,
            caution: none,
            accent: none,
            label: none,
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
