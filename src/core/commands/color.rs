use std::sync::{Arc, Mutex};

use super::{Command, CommandError, Flow};
use crate::style::{color_from_code, Styler, Theme};

#[derive(Clone)]
pub struct ColorCommand {
    theme: Arc<Mutex<Theme>>,
    styler: Styler,
}

impl ColorCommand {
    pub fn new(theme: Arc<Mutex<Theme>>, styler: Styler) -> Self {
        Self { theme, styler }
    }

    fn print_usage(&self) {
        println!("Usage: color <number>");
        println!("Colors: 1=Blue, 2=Green, 3=Cyan, 4=Red, 5=Purple, 6=Yellow, 7=White");
    }
}

impl Command for ColorCommand {
    fn execute(&self, args: &[String]) -> Result<Flow, CommandError> {
        let Some(code_str) = args.first() else {
            self.print_usage();
            return Ok(Flow::Continue);
        };

        // Anything that is not an integer in 1..=7 gets the same report.
        let selected = code_str.parse::<i32>().ok().and_then(color_from_code);
        let Some(color) = selected else {
            println!("Invalid color code. Use 1-7.");
            return Ok(Flow::Continue);
        };

        {
            let mut theme = self.theme.lock().map_err(|e| {
                CommandError::ExecutionError(format!("Failed to access theme: {}", e))
            })?;
            theme.foreground = color;
        }

        println!("{}", self.styler.paint("Color changed!"));
        Ok(Flow::Continue)
    }
}
