use chrono::{Datelike, Local, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} label: {value}")]
pub struct LabelError {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    Christmas,
    Summer,
    Graduation,
    Kadayawan,
    #[default]
    Regular,
}

impl Season {
    pub const ALL: [Season; 5] = [
        Season::Christmas,
        Season::Summer,
        Season::Graduation,
        Season::Kadayawan,
        Season::Regular,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Season::Christmas => "Christmas",
            Season::Summer => "Summer",
            Season::Graduation => "Graduation",
            Season::Kadayawan => "Kadayawan",
            Season::Regular => "Regular",
        }
    }

    pub const fn from_month(month: u32) -> Self {
        match month {
            12 => Season::Christmas,
            6 | 7 => Season::Summer,
            3 | 4 => Season::Graduation,
            8 => Season::Kadayawan,
            _ => Season::Regular,
        }
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Season::ALL
            .into_iter()
            .find(|season| season.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(LabelError {
                kind: "season",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Event {
    NewYear,
    #[default]
    Regular,
}

impl Event {
    pub const ALL: [Event; 2] = [Event::NewYear, Event::Regular];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Event::NewYear => "NewYear",
            Event::Regular => "Regular",
        }
    }

    pub const fn from_month_day(month: u32, day: u32) -> Self {
        match (month, day) {
            (12, 31) | (1, 1) => Event::NewYear,
            _ => Event::Regular,
        }
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Event {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Event::ALL
            .into_iter()
            .find(|event| event.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(LabelError {
                kind: "event",
                value: s.to_string(),
            })
    }
}

/// Maps a calendar date to its season and event labels.
pub fn classify<D: Datelike>(date: &D) -> (Season, Event) {
    (
        Season::from_month(date.month()),
        Event::from_month_day(date.month(), date.day()),
    )
}

pub const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Accepts full or abbreviated weekday names in any case.
pub fn parse_weekday(value: &str) -> Result<Weekday, LabelError> {
    Weekday::from_str(value.trim()).map_err(|_| LabelError {
        kind: "weekday",
        value: value.to_string(),
    })
}

/// A single calendar reading shared by every prediction of one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    pub weekday: Weekday,
    pub hour: u8,
    pub season: Season,
    pub event: Event,
}

impl Moment {
    pub fn now() -> Self {
        Self::at(&Local::now().naive_local())
    }

    pub fn at(date_time: &NaiveDateTime) -> Self {
        let (season, event) = classify(date_time);
        Self {
            weekday: date_time.weekday(),
            hour: date_time.hour() as u8,
            season,
            event,
        }
    }

    pub const fn day_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

#[test]
fn season_label_roundtrip_test() {
    for season in Season::ALL {
        assert_eq!(season.as_str().parse::<Season>().unwrap(), season);
    }
    assert!("Monsoon".parse::<Season>().is_err());
}

#[test]
fn event_label_case_test() {
    assert_eq!("newyear".parse::<Event>().unwrap(), Event::NewYear);
    assert!("Fiesta".parse::<Event>().is_err());
}

#[test]
fn weekday_parse_test() {
    assert_eq!(parse_weekday("Monday").unwrap(), Weekday::Mon);
    assert_eq!(parse_weekday("sun").unwrap(), Weekday::Sun);
    assert!(parse_weekday("Funday").is_err());
}
