use canteen_core::interact::{Confirm, LocationPicker, MapSession, Pick};
use canteen_core::{Error, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Line-edited terminal input shared by prompts, confirmations and the
/// coordinate picker.
pub struct Console {
    editor: DefaultEditor,
}

impl Console {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self { editor: DefaultEditor::new()? })
    }

    /// Read one trimmed line. `None` means the user closed input
    /// (Ctrl-D or Ctrl-C).
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim().to_string();
                if !line.is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(Error::Interaction(err.to_string())),
        }
    }
}

/// Closed input or a terminal error declines the offer.
impl Confirm for Console {
    fn confirm(&mut self, question: &str) -> bool {
        let prompt = format!("{question} (y/n): ");
        loop {
            match self.read_line(&prompt) {
                Ok(Some(answer)) if answer.eq_ignore_ascii_case("y") => return true,
                Ok(Some(answer)) if answer.eq_ignore_ascii_case("n") => return false,
                Ok(Some(_)) => println!("Please input 'y' for yes, or 'n' for no."),
                Ok(None) => return false,
                Err(err) => {
                    tracing::warn!(error = %err, "confirmation failed; treating as declined");
                    return false;
                }
            }
        }
    }
}

/// Typed stand-in for clicking on the map: the user enters `x,y`. A blank
/// line, `q`, or closing input cancels.
impl LocationPicker for Console {
    fn pick(&mut self, session: &mut MapSession) -> Result<Pick> {
        println!(
            "Please select your current location on the map ({}, {}x{}).",
            session.image().display(),
            session.width(),
            session.height()
        );
        loop {
            let line = match self.read_line("Your location as x,y (blank to cancel): ")? {
                Some(line) if !line.is_empty() && !line.eq_ignore_ascii_case("q") => line,
                _ => return Ok(Pick::Cancelled),
            };
            let Some((x, y)) = parse_coordinates(&line) else {
                println!("Please enter two whole numbers separated by a comma, e.g. 310,375.");
                continue;
            };
            match session.check_point(x, y) {
                Ok(point) => {
                    println!("Your location is entered at (x,y): {}, {}", point.x, point.y);
                    return Ok(Pick::Selected(point));
                }
                Err(err) => println!("{err}. Please try again."),
            }
        }
    }
}

pub fn parse_coordinates(line: &str) -> Option<(i64, i64)> {
    let (x, y) = line.split_once(',')?;
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_need_two_numbers() {
        assert_eq!(parse_coordinates("310, 375"), Some((310, 375)));
        assert_eq!(parse_coordinates("-5,2"), Some((-5, 2)));
        assert_eq!(parse_coordinates("310"), None);
        assert_eq!(parse_coordinates("x,y"), None);
    }
}
