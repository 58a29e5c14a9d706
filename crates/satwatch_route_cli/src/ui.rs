use owo_colors::OwoColorize;

#[derive(Clone, Copy, Debug)]
pub enum Level {
    Info,
    Success,
    Warning,
}

#[derive(Clone, Copy, Debug)]
pub struct Style {
    pub emoji: bool,
    pub color: bool,
}

impl Default for Style {
    fn default() -> Self {
        // Colors only when stdout is a TTY; emojis always on by default.
        let color = atty::is(atty::Stream::Stdout);
        Self { emoji: true, color }
    }
}

impl Style {
    pub fn plain() -> Self {
        Self {
            emoji: false,
            color: false,
        }
    }

    pub fn for_flags(plain: bool) -> Self {
        if plain { Self::plain() } else { Self::default() }
    }
}

pub fn info(msg: impl AsRef<str>) {
    print_line(Level::Info, msg.as_ref(), Style::default());
}

pub fn warning(msg: impl AsRef<str>) {
    print_line(Level::Warning, msg.as_ref(), Style::default());
}

/// Builds the decorated line without printing it.
pub fn format_line(level: Level, msg: &str, style: Style) -> String {
    let emoji = match level {
        Level::Info => "ℹ️ ",
        Level::Success => "✅ ",
        Level::Warning => "⚠️ ",
    };

    let prefix = if style.emoji { emoji } else { "" };
    let line = format!("{}{}", prefix, msg);

    if !style.color {
        return line;
    }
    match level {
        Level::Info => line,
        Level::Success => line.green().to_string(),
        Level::Warning => line.yellow().to_string(),
    }
}

/// Lower-level API if you need custom style (e.g., disable emoji/colors).
pub fn print_line(level: Level, msg: &str, style: Style) {
    println!("{}", format_line(level, msg, style));
}
