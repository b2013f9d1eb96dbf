use crate::types::{CountryCodeRow, RawRestaurantRow, Restaurant};
use crate::util::{parse_f64_safe, parse_u64_safe, parse_u8_safe, parse_yes_no};
use csv::ReaderBuilder;
use once_cell::sync::OnceCell;
use std::collections::{HashMap, HashSet};
use std::error::Error;

/// Fixed input paths, resolved against the working directory.
pub const RESTAURANTS_CSV: &str = "zomato.csv";
pub const COUNTRY_CODES_CSV: &str = "country_codes.csv";

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub parse_errors: usize,
    pub duplicate_rows: usize,
    pub unknown_countries: usize,
    pub clean_rows: usize,
}

/// The cleaned base dataset plus its load diagnostics.
#[derive(Debug)]
pub struct Dataset {
    pub restaurants: Vec<Restaurant>,
    pub report: LoadReport,
}

// Built at most once per process; read-only afterward. Repeated
// interactions reuse the same reference instead of re-reading the files.
static DATASET: OnceCell<Dataset> = OnceCell::new();

/// The memoized base dataset, loaded from the fixed input paths on first
/// use. A failed load is not cached, so the next call retries.
pub fn dataset() -> Result<&'static Dataset, Box<dyn Error>> {
    DATASET.get_or_try_init(|| {
        let (restaurants, report) = load_and_clean(RESTAURANTS_CSV, COUNTRY_CODES_CSV)?;
        Ok(Dataset {
            restaurants,
            report,
        })
    })
}

fn require_column(headers: &csv::StringRecord, name: &str, path: &str) -> Result<(), Box<dyn Error>> {
    if headers.iter().any(|h| h == name) {
        Ok(())
    } else {
        Err(format!("{}: missing required column `{}`", path, name).into())
    }
}

/// Load the country-code lookup into a code -> name map.
fn load_country_codes(path: &str) -> Result<HashMap<String, String>, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    require_column(rdr.headers()?, "Country Code", path)?;
    let mut map = HashMap::new();
    for result in rdr.deserialize::<CountryCodeRow>() {
        let row = match result {
            Ok(r) => r,
            Err(_) => continue,
        };
        if let (Some(code), Some(name)) = (row.country_code, row.country) {
            map.insert(code.trim().to_string(), name.trim().to_string());
        }
    }
    Ok(map)
}

/// Read both source tables and produce the cleaned in-memory dataset.
///
/// Rows stream through in file order: each is joined to its country name,
/// missing cuisine text is replaced with the "Unspecified" sentinel,
/// duplicates on (name, city, longitude, latitude, cuisines) are dropped
/// keeping the first occurrence, and the two derived columns are appended.
/// Rows with unparseable required fields are counted and skipped; a
/// missing file or join column fails the whole load.
pub fn load_and_clean(
    restaurants_path: &str,
    countries_path: &str,
) -> Result<(Vec<Restaurant>, LoadReport), Box<dyn Error>> {
    let countries = load_country_codes(countries_path)?;

    let mut rdr = ReaderBuilder::new().flexible(true).from_path(restaurants_path)?;
    require_column(rdr.headers()?, "Country Code", restaurants_path)?;

    let mut total_rows = 0usize;
    let mut parse_errors = 0usize;
    let mut duplicate_rows = 0usize;
    let mut unknown_countries = 0usize;
    // Identity tuple per listing; f64 coordinates hash by bit pattern.
    let mut seen: HashSet<(String, String, u64, u64, String)> = HashSet::new();
    let mut clean: Vec<Restaurant> = Vec::new();

    for result in rdr.deserialize::<RawRestaurantRow>() {
        total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(_) => { parse_errors += 1; continue; }
        };

        let name = match row.restaurant_name {
            Some(n) if !n.trim().is_empty() => n.trim().to_string(),
            _ => { parse_errors += 1; continue; }
        };
        let longitude = match parse_f64_safe(row.longitude.as_deref()) { Some(v) => v, None => { parse_errors += 1; continue; } };
        let latitude = match parse_f64_safe(row.latitude.as_deref()) { Some(v) => v, None => { parse_errors += 1; continue; } };
        let average_cost_for_two = match parse_f64_safe(row.average_cost_for_two.as_deref()) { Some(v) => v, None => { parse_errors += 1; continue; } };
        let rating = match parse_f64_safe(row.aggregate_rating.as_deref()) { Some(v) => v, None => { parse_errors += 1; continue; } };
        let votes = match parse_u64_safe(row.votes.as_deref()) { Some(v) => v, None => { parse_errors += 1; continue; } };
        let price_range = match parse_u8_safe(row.price_range.as_deref()) { Some(v) => v, None => { parse_errors += 1; continue; } };

        let city = row.city.unwrap_or_else(|| "Unknown".to_string()).trim().to_string();
        let currency = row.currency.unwrap_or_default().trim().to_string();
        let has_online_delivery = parse_yes_no(row.has_online_delivery.as_deref());
        let cuisines = match row.cuisines {
            Some(c) if !c.trim().is_empty() => c.trim().to_string(),
            _ => "Unspecified".to_string(),
        };

        // Left join to the country name; unmatched codes keep a sentinel
        // so the country selector never sees a blank.
        let country = match row
            .country_code
            .as_deref()
            .map(str::trim)
            .and_then(|code| countries.get(code))
        {
            Some(n) => n.clone(),
            None => { unknown_countries += 1; "Unknown".to_string() }
        };

        let key = (
            name.clone(),
            city.clone(),
            longitude.to_bits(),
            latitude.to_bits(),
            cuisines.clone(),
        );
        if !seen.insert(key) {
            duplicate_rows += 1;
            continue;
        }

        // Raw comma-split count, so the sentinel still counts as one.
        let cuisine_count = cuisines.split(',').count();
        let average_cost_per_person = average_cost_for_two / 2.0;

        clean.push(Restaurant {
            name,
            country,
            city,
            longitude,
            latitude,
            cuisines,
            average_cost_for_two,
            currency,
            has_online_delivery,
            price_range,
            rating,
            votes,
            cuisine_count,
            average_cost_per_person,
        });
    }

    let report = LoadReport {
        total_rows,
        parse_errors,
        duplicate_rows,
        unknown_countries,
        clean_rows: clean.len(),
    };
    Ok((clean, report))
}
