// Pure selection helpers: selector options and subset views. Nothing here
// mutates the base dataset; `apply` returns borrowed rows recomputed per
// interaction.
use crate::types::{CityChoice, Restaurant};
use std::collections::BTreeSet;

/// Sorted unique country names for the country selector.
pub fn countries(data: &[Restaurant]) -> Vec<String> {
    let set: BTreeSet<&str> = data.iter().map(|r| r.country.as_str()).collect();
    set.into_iter().map(str::to_string).collect()
}

/// Sorted unique cities among records already restricted to `country`,
/// so the two selectors can never be mutually inconsistent.
pub fn cities_in(data: &[Restaurant], country: &str) -> Vec<String> {
    let set: BTreeSet<&str> = data
        .iter()
        .filter(|r| r.country == country)
        .map(|r| r.city.as_str())
        .collect();
    set.into_iter().map(str::to_string).collect()
}

/// Records of `country`, further narrowed by city unless the choice is
/// the "All" sentinel.
pub fn apply<'a>(data: &'a [Restaurant], country: &str, city: &CityChoice) -> Vec<&'a Restaurant> {
    data.iter()
        .filter(|r| r.country == country)
        .filter(|r| match city {
            CityChoice::All => true,
            CityChoice::Named(name) => r.city == *name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant(name: &str, country: &str, city: &str) -> Restaurant {
        Restaurant {
            name: name.to_string(),
            country: country.to_string(),
            city: city.to_string(),
            longitude: 0.0,
            latitude: 0.0,
            cuisines: "Italian".to_string(),
            average_cost_for_two: 100.0,
            currency: "INR".to_string(),
            has_online_delivery: false,
            price_range: 1,
            rating: 4.0,
            votes: 10,
            cuisine_count: 1,
            average_cost_per_person: 50.0,
        }
    }

    fn sample() -> Vec<Restaurant> {
        vec![
            restaurant("A", "India", "Delhi"),
            restaurant("B", "India", "Agra"),
            restaurant("C", "India", "Delhi"),
            restaurant("D", "Brazil", "Brasilia"),
        ]
    }

    #[test]
    fn countries_are_sorted_and_unique() {
        assert_eq!(countries(&sample()), vec!["Brazil", "India"]);
    }

    #[test]
    fn cities_come_from_the_selected_country_only() {
        let data = sample();
        assert_eq!(cities_in(&data, "India"), vec!["Agra", "Delhi"]);
        assert_eq!(cities_in(&data, "Brazil"), vec!["Brasilia"]);
        assert!(cities_in(&data, "Qatar").is_empty());
    }

    #[test]
    fn all_cities_keeps_every_row_of_the_country() {
        let data = sample();
        let subset = apply(&data, "India", &CityChoice::All);
        assert_eq!(subset.len(), 3);
        assert!(subset.iter().all(|r| r.country == "India"));
    }

    #[test]
    fn named_city_narrows_to_the_intersection() {
        let data = sample();
        let subset = apply(&data, "India", &CityChoice::Named("Delhi".to_string()));
        let names: Vec<&str> = subset.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }
}
