use crate::error::{Result, SearchError};
use crate::interact::{LocationPicker, MapSession, Pick};
use crate::model::{CanteenLocation, Dataset, NearbyCanteen, Point};
use std::cmp::Ordering;

/// Rank `locations` by straight-line distance from `from` and keep the
/// closest `k`. Equal distances keep their input order.
pub fn rank_by_distance<'a, I>(locations: I, from: Point, k: usize) -> Vec<NearbyCanteen>
where
    I: IntoIterator<Item = &'a CanteenLocation>,
{
    let mut ranked: Vec<NearbyCanteen> = locations
        .into_iter()
        .map(|loc| NearbyCanteen {
            canteen: loc.canteen.clone(),
            point: loc.point,
            distance: from.distance_to(loc.point),
        })
        .collect();
    ranked.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
    ranked.truncate(k);
    ranked
}

pub fn nearest_canteens(dataset: &Dataset, from: Point, k: usize) -> Vec<NearbyCanteen> {
    let ranked = rank_by_distance(dataset.locations(), from, k);
    tracing::info!(x = from.x, y = from.y, k, found = ranked.len(), "nearest canteen search");
    ranked
}

/// Ask `picker` for the user's position, then `choose_count` (handed the
/// picker back along with the number of canteens) for how many results to
/// return, then rank.
///
/// A cancelled pick ends the search before a count is asked for. A chooser
/// that returns `None` ends it with [`SearchError::NoCount`].
pub fn locate_nearest<P, F>(
    dataset: &Dataset,
    session: &mut MapSession,
    picker: &mut P,
    choose_count: F,
) -> Result<(Point, Vec<NearbyCanteen>)>
where
    P: LocationPicker + ?Sized,
    F: FnOnce(&mut P, usize) -> Result<Option<usize>>,
{
    let user = match session.pick_with(picker)? {
        Pick::Selected(point) => point,
        Pick::Cancelled => {
            tracing::info!("location selection cancelled");
            return Err(SearchError::Cancelled.into());
        }
    };
    let Some(k) = choose_count(picker, dataset.canteen_count())? else {
        tracing::info!("canteen count not given");
        return Err(SearchError::NoCount.into());
    };
    Ok((user, nearest_canteens(dataset, user, k)))
}
