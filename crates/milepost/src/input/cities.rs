use std::io::BufRead;

use geograph::point::GeoPoint;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{ParseError, parse_number, syntax};

/// One `city,state,lat,lon` row of the gazetteer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub state: String,
    pub lat: f64,
    pub lon: f64,
}

impl City {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// City-name lookup over a flat row list.
///
/// Lookups scan the rows; the table is a few thousand rows and each run
/// resolves two endpoints, so nothing is indexed.
#[derive(Debug, Clone, Default)]
pub struct CityIndex {
    cities: Vec<City>,
}

impl CityIndex {
    pub fn read_from<R: BufRead>(reader: R) -> Result<CityIndex, ParseError> {
        let mut cities = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            cities.push(parse_city(&line, index + 1)?);
        }

        debug!("Read {} city rows", cities.len());

        Ok(CityIndex { cities })
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// First row matching `name` and `state`, compared case-insensitively.
    pub fn find(&self, name: &str, state: &str) -> Option<&City> {
        self.cities.iter().find(|city| {
            city.name.eq_ignore_ascii_case(name) && city.state.eq_ignore_ascii_case(state)
        })
    }

    /// Resolve a combined `"<city...> <state>"` query. The state is the
    /// last whitespace token, the city name everything before it, so
    /// multi-word names like `"New York NY"` work.
    pub fn resolve(&self, query: &str) -> Option<&City> {
        let (name, state) = query.trim().rsplit_once(char::is_whitespace)?;

        self.find(name.trim(), state)
    }
}

fn parse_city(text: &str, line: usize) -> Result<City, ParseError> {
    let fields: Vec<&str> = text.split(',').collect();
    let &[name, state, lat, lon] = fields.as_slice() else {
        return Err(syntax(
            line,
            format!("expected 'city,state,lat,lon', found {} fields", fields.len()),
        ));
    };

    Ok(City {
        name: name.trim().to_string(),
        state: state.trim().to_string(),
        lat: parse_number(lat, line, "latitude")?,
        lon: parse_number(lon, line, "longitude")?,
    })
}
