use chrono::{DateTime, NaiveDateTime};
use std::io::{self, BufRead};
use std::{fs::File, path::Path};

use crate::{error::EntropyError, structs::LocationRecord};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

struct Columns {
    uid: usize,
    lat: usize,
    lng: usize,
    datetime: usize,
    width: usize,
}

impl Columns {
    fn from_header(header: &str) -> Result<Self, EntropyError> {
        let names = header
            .split(',')
            .map(|name| name.trim().to_ascii_lowercase())
            .collect::<Vec<_>>();
        let find = |aliases: &[&str], column: &'static str| {
            names
                .iter()
                .position(|name| aliases.contains(&name.as_str()))
                .ok_or(EntropyError::MissingColumn(column))
        };

        let uid = find(&["uid", "user", "user_id"], "uid")?;
        let lat = find(&["lat", "latitude"], "lat")?;
        let lng = find(&["lng", "lon", "longitude"], "lng")?;
        let datetime = find(&["datetime", "time", "timestamp"], "datetime")?;
        let width = [uid, lat, lng, datetime].into_iter().max().unwrap_or(0) + 1;

        Ok(Self {
            uid,
            lat,
            lng,
            datetime,
            width,
        })
    }
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.naive_utc()))
}

fn parse_record(
    columns: &Columns,
    line: &str,
    line_no: usize,
) -> Result<LocationRecord, EntropyError> {
    let malformed = |reason: String| EntropyError::MalformedRecord {
        line: line_no,
        reason,
    };

    if line.contains('"') {
        return Err(malformed("quoted fields are not supported".to_string()));
    }

    let fields = line.split(',').map(str::trim).collect::<Vec<_>>();
    if fields.len() < columns.width {
        return Err(malformed(format!(
            "expected at least {} fields, found {}",
            columns.width,
            fields.len()
        )));
    }

    let coordinate = |i: usize| {
        fields[i]
            .parse::<f64>()
            .map_err(|e| malformed(format!("coordinate \"{}\": {e}", fields[i])))
    };
    let lat = coordinate(columns.lat)?;
    let lng = coordinate(columns.lng)?;
    let datetime = parse_datetime(fields[columns.datetime])
        .ok_or_else(|| malformed(format!("timestamp \"{}\"", fields[columns.datetime])))?;

    LocationRecord::new(fields[columns.uid], lat, lng, datetime)
}

/// Parses comma separated records. The first non-empty line is the header.
///
/// Fields are split on every comma; a record containing a quote is rejected.
pub fn parse_records<'a, I>(lines: I) -> Result<Vec<LocationRecord>, EntropyError>
where
    I: Iterator<Item = &'a str>,
{
    let mut lines = lines
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty());

    let columns = match lines.next() {
        Some((_, header)) => Columns::from_header(header)?,
        None => return Ok(vec![]),
    };

    lines
        .map(|(line_no, line)| parse_record(&columns, line, line_no))
        .collect()
}

pub fn load_records<P>(filename: P) -> Result<Vec<LocationRecord>, EntropyError>
where
    P: AsRef<Path>,
{
    let file = File::open(filename)?;
    let lines = io::BufReader::new(file)
        .lines()
        .collect::<io::Result<Vec<_>>>()?;

    let records = parse_records(lines.iter().map(String::as_str))?;
    log::info!("loaded {} records", records.len());

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::LocationSymbol;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[test]
    fn header_order_is_free() {
        let input = "datetime,lng,uid,lat,extra\n\
                     2008-10-23 13:53:05,116.32,1,39.98,x\n\
                     \n\
                     2008-10-23T13:58:05Z,116.31,2,40.01,y\n";
        let records = parse_records(input.lines()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].uid, "1");
        assert_eq!(
            records[0].location,
            LocationSymbol::new(39.98, 116.32).unwrap()
        );
        assert_eq!(
            records[1].datetime,
            NaiveDate::from_ymd_opt(2008, 10, 23)
                .and_then(|d| d.and_hms_opt(13, 58, 5))
                .unwrap()
        );
    }

    #[test]
    fn missing_column_is_reported() {
        let input = "uid,lat,datetime\n1,2,2008-10-23 13:53:05";
        assert!(matches!(
            parse_records(input.lines()),
            Err(EntropyError::MissingColumn("lng"))
        ));
    }

    #[rstest]
    #[case("1,abc,116.3,2008-10-23 13:53:05")]
    #[case("1,39.9,116.3,yesterday")]
    #[case("1,39.9")]
    #[case("1,NaN,116.3,2008-10-23 13:53:05")]
    fn malformed_line_is_reported(#[case] line: &str) {
        let input = format!("uid,lat,lng,datetime\n{line}");
        assert!(matches!(
            parse_records(input.lines()),
            Err(EntropyError::MalformedRecord { line: 2, .. })
                | Err(EntropyError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn quoted_field_is_rejected() {
        let input = "uid,lat,lng,datetime,note\n\
                     1,39.9,116.3,2008-10-23 13:53:05,\"home, again\"";
        match parse_records(input.lines()) {
            Err(EntropyError::MalformedRecord { line: 2, reason }) => {
                assert!(reason.contains("quoted"))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_input_has_no_records() {
        assert!(parse_records("".lines()).unwrap().is_empty());
    }
}
