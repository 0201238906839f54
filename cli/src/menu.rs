use crate::commands::{self, report_failure};
use crate::console::Console;
use canteen_core::config::Settings;
use canteen_core::validate::{validate_keyword, validate_price};
use canteen_core::Result;

const MENU: &str = "=======================
F&B Recommendation Menu
1 -- Display Data
2 -- Keyword-based Search
3 -- Price-based Search
4 -- Location-based Search
5 -- Exit Program
=======================";

/// Interactive menu. Runs until option 5 or end of input.
pub fn run(settings: &Settings) -> anyhow::Result<()> {
    let mut console = Console::new()?;
    loop {
        println!("{MENU}");
        let Some(line) = console.read_line("Please enter option [1-5]: ")? else {
            break;
        };
        let outcome = match line.parse::<u8>() {
            Ok(1) => {
                println!("Display Data\n");
                commands::show(settings)
            }
            Ok(2) => keyword_search(settings, &mut console),
            Ok(3) => price_search(settings, &mut console),
            Ok(4) => {
                println!("Location-based Search");
                commands::nearest_interactive(settings, &mut console)
            }
            Ok(5) => break,
            _ => {
                println!("Please input a number from 1-5 only. Please try again.");
                continue;
            }
        };
        if let Err(err) = outcome {
            report_failure(err)?;
        }
    }
    println!("Exiting F&B Recommendation");
    Ok(())
}

fn keyword_search(settings: &Settings, console: &mut Console) -> Result<()> {
    println!("Keyword-based Search");
    loop {
        let Some(input) = console.read_line("Enter type of food: ")? else {
            return Ok(());
        };
        match validate_keyword(&input) {
            Ok(term) => return commands::keyword(settings, term, console),
            Err(err) => println!("{err}. Please try again."),
        }
    }
}

fn price_search(settings: &Settings, console: &mut Console) -> Result<()> {
    println!("Price-based Search");
    loop {
        let Some(min) = console.read_line("Enter minimum price: ")? else {
            return Ok(());
        };
        let Some(max) = console.read_line("Enter maximum price: ")? else {
            return Ok(());
        };
        match validate_price(&min, &max, console) {
            Ok(range) => return commands::price(settings, range),
            Err(err) => println!("{err}. Please try again."),
        }
    }
}
