//! JSON payloads of the seat booking API and their conversion into domain types.

use chrono::{DateTime, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use serde_json::Value;

use seatwatch_core::{Area, AvailableSeat, Facility, SeatWatchError, WindowResult};

#[derive(Debug, Deserialize)]
pub struct AccountInfo {
    pub settings: Settings,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub menus: Menus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menus {
    #[serde(default)]
    pub branch_menus: Vec<BranchMenu>,
}

#[derive(Debug, Deserialize)]
pub struct BranchMenu {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub areas: Vec<BranchArea>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchArea {
    pub name: String,
    pub opening_time: String,
    pub closing_time: String,
    #[serde(default)]
    pub floor: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub areas: Vec<SearchArea>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchArea {
    pub area_name: String,
    #[serde(default)]
    pub floor: Option<Value>,
    #[serde(default)]
    pub available_seats: Vec<SeatEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SeatEntry {
    pub name: String,
}

/// Floors come back as strings or numbers depending on the branch.
fn floor_label(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Time-of-day of an ISO 8601 timestamp, in the timestamp's own local time.
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime, SeatWatchError> {
    let raw = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.time());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local().time());
    }
    NaiveTime::parse_from_str(raw, "%H:%M:%S%.f")
        .map_err(|_| SeatWatchError::Data(format!("unrecognized timestamp '{raw}'")))
}

impl AccountInfo {
    /// Branches that expose at least one bookable area.
    pub fn into_facilities(self) -> Result<Vec<Facility>, SeatWatchError> {
        self.settings
            .menus
            .branch_menus
            .into_iter()
            .filter(|b| !b.areas.is_empty())
            .map(|b| {
                let areas = b
                    .areas
                    .into_iter()
                    .map(|a| {
                        Ok(Area {
                            floor: floor_label(a.floor.as_ref()),
                            opening: parse_time_of_day(&a.opening_time)?,
                            closing: parse_time_of_day(&a.closing_time)?,
                            name: a.name,
                        })
                    })
                    .collect::<Result<Vec<_>, SeatWatchError>>()?;
                Ok(Facility {
                    id: b.id,
                    name: b.name,
                    areas,
                })
            })
            .collect()
    }
}

impl From<SearchResponse> for WindowResult {
    fn from(resp: SearchResponse) -> Self {
        Self::new(resp.areas.into_iter().flat_map(|a| {
            let floor = floor_label(a.floor.as_ref());
            let area = a.area_name;
            a.available_seats.into_iter().map(move |s| AvailableSeat {
                area: area.clone(),
                floor: floor.clone(),
                seat: s.name,
            })
        }))
    }
}
