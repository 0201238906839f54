//! Seams to the interactive collaborators: yes/no confirmation, the
//! coordinate picker and the map renderer, plus the map session they share.

use crate::config::MapSettings;
use crate::error::{Result, ValidationError};
use crate::model::{NearbyCanteen, Point};
use std::path::Path;

/// Answers a yes/no question put to the user.
///
/// Implementations that cannot get an answer (closed or failed input)
/// return `false`: the offer counts as declined and the caller's declined
/// outcome is reported.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, question: &str) -> bool {
        self(question)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Selected(Point),
    /// The user closed the picker without choosing.
    Cancelled,
}

pub trait LocationPicker {
    fn pick(&mut self, session: &mut MapSession) -> Result<Pick>;
}

/// A labeled marker drawn over the reference image.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPin {
    pub label: String,
    pub point: Point,
    pub distance: f64,
}

impl MapPin {
    pub fn for_canteens(results: &[NearbyCanteen]) -> Vec<MapPin> {
        results
            .iter()
            .map(|r| MapPin {
                label: format!("{} ({:.0}m)", r.canteen, r.distance.trunc()),
                point: r.point,
                distance: r.distance,
            })
            .collect()
    }
}

pub trait MapRenderer {
    fn render(&mut self, session: &mut MapSession, user: Point, pins: &[MapPin]) -> Result<()>;
}

/// Display state shared by the picker and the renderer. Owned by the caller,
/// which closes it once the location search finishes or is cancelled.
#[derive(Debug)]
pub struct MapSession {
    settings: MapSettings,
    picks: usize,
    renders: usize,
    closed: bool,
}

impl MapSession {
    pub fn open(settings: &MapSettings) -> Self {
        tracing::debug!(width = settings.width, height = settings.height, image = %settings.image.display(), "map session opened");
        Self { settings: settings.clone(), picks: 0, renders: 0, closed: false }
    }

    pub fn width(&self) -> u32 {
        self.settings.width
    }

    pub fn height(&self) -> u32 {
        self.settings.height
    }

    pub fn image(&self) -> &Path {
        &self.settings.image
    }

    pub fn output(&self) -> &Path {
        &self.settings.output
    }

    pub fn picks(&self) -> usize {
        self.picks
    }

    pub fn renders(&self) -> usize {
        self.renders
    }

    /// Accept a point only if it lies on the reference image.
    pub fn check_point(&self, x: i64, y: i64) -> std::result::Result<Point, ValidationError> {
        let inside = (0..i64::from(self.settings.width)).contains(&x)
            && (0..i64::from(self.settings.height)).contains(&y);
        match (inside, i32::try_from(x), i32::try_from(y)) {
            (true, Ok(x), Ok(y)) => Ok(Point::new(x, y)),
            _ => Err(ValidationError::PointOutOfBounds {
                x,
                y,
                width: self.settings.width,
                height: self.settings.height,
            }),
        }
    }

    pub fn pick_with<P: LocationPicker + ?Sized>(&mut self, picker: &mut P) -> Result<Pick> {
        let pick = picker.pick(self)?;
        self.picks += 1;
        Ok(pick)
    }

    pub fn render_with<R: MapRenderer + ?Sized>(&mut self, renderer: &mut R, user: Point, pins: &[MapPin]) -> Result<()> {
        renderer.render(self, user, pins)?;
        self.renders += 1;
        Ok(())
    }

    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.closed {
            self.closed = true;
            tracing::debug!(picks = self.picks, renders = self.renders, "map session closed");
        }
    }
}

impl Drop for MapSession {
    fn drop(&mut self) {
        self.release();
    }
}
