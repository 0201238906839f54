use crate::console::Console;
use crate::svg::SvgRenderer;
use canteen_core::config::Settings;
use canteen_core::dataset::load_dataset;
use canteen_core::interact::{Confirm, MapPin, MapSession};
use canteen_core::keyword::KeywordIndex;
use canteen_core::nearest::{locate_nearest, nearest_canteens};
use canteen_core::price::{search_by_price, PriceRange};
use canteen_core::report::{dataset_report, keyword_report, nearest_report, price_report};
use canteen_core::validate::validate_count;
use canteen_core::{Dataset, Error, NearbyCanteen, Point, Result, SearchError};

/// Every action reads the dataset afresh.
fn load(settings: &Settings) -> Result<Dataset> {
    Ok(load_dataset(&settings.dataset)?)
}

pub fn show(settings: &Settings) -> Result<()> {
    let data = load(settings)?;
    println!("{}", dataset_report(&data));
    Ok(())
}

pub fn keyword<C>(settings: &Settings, term: &str, confirm: &mut C) -> Result<()>
where
    C: Confirm + ?Sized,
{
    let data = load(settings)?;
    let index = KeywordIndex::build(&data);
    println!("Searching...");
    let found = index.search_with_suggestions(term, settings.suggest.threshold, settings.suggest.max_rounds, confirm)?;
    println!("{}", keyword_report(&found));
    Ok(())
}

pub fn price(settings: &Settings, range: PriceRange) -> Result<()> {
    let data = load(settings)?;
    println!("Searching...");
    let results = search_by_price(&data, range)?;
    println!("{}", price_report(range, &results));
    Ok(())
}

/// One-shot nearest search from a known point.
pub fn nearest_at(settings: &Settings, x: i64, y: i64, count: &str, render: bool) -> Result<()> {
    let data = load(settings)?;
    let mut session = MapSession::open(&settings.map);
    let outcome = rank_and_show(&data, &mut session, (x, y), count, render);
    session.close();
    outcome
}

fn rank_and_show(data: &Dataset, session: &mut MapSession, (x, y): (i64, i64), count: &str, render: bool) -> Result<()> {
    let user = session.check_point(x, y)?;
    let count = validate_count(count, data.canteen_count())?;
    if let Some(warning) = count.warning() {
        println!("{warning}");
    }
    let results = nearest_canteens(data, user, count.value);
    println!("{}", nearest_report(&results));
    if render {
        session.render_with(&mut SvgRenderer, user, &MapPin::for_canteens(&results))?;
    }
    Ok(())
}

/// Menu flow: pick on the map, ask for a count, rank, then offer the overlay.
pub fn nearest_interactive(settings: &Settings, console: &mut Console) -> Result<()> {
    let data = load(settings)?;
    let mut session = MapSession::open(&settings.map);
    let outcome = locate_and_show(&data, &mut session, console);
    session.close();
    outcome
}

fn locate_and_show(data: &Dataset, session: &mut MapSession, console: &mut Console) -> Result<()> {
    let (user, results) = locate_nearest(data, session, console, |console: &mut Console, total: usize| loop {
        let Some(line) = console.read_line("Please enter the number of canteens to search for around you: ")? else {
            return Ok(None);
        };
        match validate_count(&line, total) {
            Ok(count) => {
                if let Some(warning) = count.warning() {
                    println!("{warning}");
                }
                return Ok(Some(count.value));
            }
            Err(err) => println!("{err}. Please try again."),
        }
    })?;
    println!("Searching...");
    println!("{}", nearest_report(&results));
    offer_map(session, console, user, &results)
}

fn offer_map(session: &mut MapSession, console: &mut Console, user: Point, results: &[NearbyCanteen]) -> Result<()> {
    if console.confirm("View results on the map?") {
        session.render_with(&mut SvgRenderer, user, &MapPin::for_canteens(results))
    } else {
        println!("Alright. Hope you enjoy the food!");
        Ok(())
    }
}

/// Print a recoverable failure for the user. Terminal failures are handed back.
pub fn report_failure(err: Error) -> anyhow::Result<()> {
    match err {
        Error::Search(SearchError::NoKeywordMatch { term }) => println!(
            "No food stall(s) found with input keyword '{term}'. No keyword suggestions match your search term."
        ),
        Error::Search(SearchError::SuggestionDeclined { .. }) => println!("Exiting search by keyword..."),
        Error::Search(SearchError::NoPriceMatch { .. }) => println!("No food stall(s) found within specified price range."),
        Error::Search(SearchError::Cancelled) => {
            println!("You did not select your current location. Aborting location based search...")
        }
        Error::Search(SearchError::NoCount) => println!("Aborting location based search..."),
        Error::Validation(e) => println!("{e}. Please try again."),
        Error::Load(e) => {
            tracing::error!(error = %e, "dataset unavailable");
            println!("Could not load the stall data: {e}");
        }
        Error::Interaction(msg) => anyhow::bail!("terminal interaction failed: {msg}"),
    }
    Ok(())
}
