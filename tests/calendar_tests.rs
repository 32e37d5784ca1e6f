use chrono::{NaiveDate, Weekday};
use jeepcast::shared::{Event, Moment, Season, classify};

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap()
}

#[test]
fn december_is_christmas() {
    for day in 1..=30 {
        assert_eq!(classify(&date(12, day)), (Season::Christmas, Event::Regular));
    }
    assert_eq!(classify(&date(12, 31)), (Season::Christmas, Event::NewYear));
}

#[test]
fn new_year_boundaries() {
    assert_eq!(classify(&date(1, 1)).1, Event::NewYear);
    assert_eq!(classify(&date(1, 2)).1, Event::Regular);
    assert_eq!(classify(&date(12, 30)).1, Event::Regular);
}

#[test]
fn seasons_by_month() {
    let expected = [
        (1, Season::Regular),
        (2, Season::Regular),
        (3, Season::Graduation),
        (4, Season::Graduation),
        (5, Season::Regular),
        (6, Season::Summer),
        (7, Season::Summer),
        (8, Season::Kadayawan),
        (9, Season::Regular),
        (10, Season::Regular),
        (11, Season::Regular),
        (12, Season::Christmas),
    ];
    for (month, season) in expected {
        assert_eq!(classify(&date(month, 15)).0, season, "month {month}");
    }
}

#[test]
fn moment_snapshot() {
    let at = NaiveDate::from_ymd_opt(2025, 8, 18)
        .unwrap()
        .and_hms_opt(8, 45, 0)
        .unwrap();
    let moment = Moment::at(&at);
    assert_eq!(moment.weekday, Weekday::Mon);
    assert_eq!(moment.day_name(), "Monday");
    assert_eq!(moment.hour, 8);
    assert_eq!(moment.season, Season::Kadayawan);
    assert_eq!(moment.event, Event::Regular);
}
