use std::fmt::Display;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl Coordinate {
    /// Bit-exact key so catalog rows deduplicate on exact values.
    pub(crate) fn key(&self) -> (u64, u64) {
        (self.latitude.to_bits(), self.longitude.to_bits())
    }
}

#[test]
fn coordinate_key_test() {
    let coordinate = Coordinate {
        latitude: 7.07,
        longitude: 125.61,
    };
    let nudged = Coordinate {
        latitude: 7.0700001,
        ..coordinate
    };
    let copy = coordinate;
    assert_eq!(coordinate.key(), copy.key());
    assert_ne!(coordinate.key(), nudged.key());
    assert_eq!(coordinate.to_string(), "7.07, 125.61");
}
