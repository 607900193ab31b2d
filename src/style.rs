use std::sync::{Arc, Mutex};

use inksac::prelude::*;

/// Foreground attribute selected with the `color` builtin. It is applied
/// to the shell's own informational output, not to child process output.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub foreground: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
        }
    }
}

/// Palette of the `color` builtin: codes 1 through 7.
pub fn color_from_code(code: i32) -> Option<Color> {
    match code {
        1 => Some(Color::Blue),
        2 => Some(Color::Green),
        3 => Some(Color::Cyan),
        4 => Some(Color::Red),
        5 => Some(Color::Magenta),
        6 => Some(Color::Yellow),
        7 => Some(Color::White),
        _ => None,
    }
}

#[derive(Clone)]
pub struct Styler {
    color_support: ColorSupport,
    theme: Arc<Mutex<Theme>>,
}

impl Styler {
    pub fn new(theme: Arc<Mutex<Theme>>) -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
            theme,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    fn current_foreground(&self) -> Color {
        match self.theme.lock() {
            Ok(theme) => theme.foreground,
            Err(poisoned) => poisoned.into_inner().foreground,
        }
    }

    /// Render text in the theme foreground chosen with `color`.
    pub fn paint(&self, text: &str) -> String {
        if !self.enabled() {
            return text.to_string();
        }

        let style = Style::builder()
            .foreground(self.current_foreground())
            .build();
        text.style(style).to_string()
    }

    pub fn prompt(&self, text: &str) -> String {
        if !self.enabled() {
            return text.to_string();
        }

        let prompt_style = Style::builder().foreground(Color::Green).bold().build();
        text.style(prompt_style).to_string()
    }

    pub fn header(&self, text: &str) -> String {
        if !self.enabled() {
            return text.to_string();
        }

        let header_style = Style::builder().foreground(Color::Blue).bold().build();
        text.style(header_style).to_string()
    }

    pub fn error(&self, text: &str) -> String {
        if !self.enabled() {
            return text.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        text.style(error_style).to_string()
    }

    pub fn success(&self, text: &str) -> String {
        if !self.enabled() {
            return text.to_string();
        }

        let success_style = Style::builder().foreground(Color::Green).build();
        text.style(success_style).to_string()
    }

    /// Highlight an input line: command name in cyan, flags in yellow.
    pub fn highlight_line(&self, input: &str) -> String {
        if !self.enabled() {
            return input.to_string();
        }

        let mut parts: Vec<String> = input.split_whitespace().map(String::from).collect();
        if parts.is_empty() {
            return input.to_string();
        }

        let command_style = Style::builder().foreground(Color::Cyan).bold().build();
        parts[0] = parts[0].clone().style(command_style).to_string();

        for part in parts.iter_mut().skip(1) {
            if part.starts_with('-') {
                let flag_style = Style::builder().foreground(Color::Yellow).build();
                *part = part.clone().style(flag_style).to_string();
            }
        }

        parts.join(" ")
    }
}
