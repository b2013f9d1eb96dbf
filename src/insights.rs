use crate::filter;
use crate::types::{
    AnalystView, CostRatingRow, CountryCountRow, CuisineRankRow, DeliveryRatingRow, DeliveryView,
    GeoPointRow, OwnerView, PriceRangeRow, RatingBinRow, Restaurant, Selection, SelectionSummary,
    Stakeholder, ViewModel,
};
use crate::util::{average, bar, format_number, mode};
use std::collections::HashMap;

// The ratings histogram always spans the 0..5 rating scale with a fixed
// bin count so bucket labels stay stable across subsets.
const RATING_BINS: usize = 20;
const RATING_SCALE_MAX: f64 = 5.0;
const TOP_CUISINES: usize = 10;
const BAR_WIDTH: usize = 30;

/// Build the view model for one render pass: apply the filter layer, then
/// run exactly one of the three stakeholder builders. Pure function of
/// (dataset, selection).
pub fn render(data: &[Restaurant], selection: &Selection) -> ViewModel {
    let subset = filter::apply(data, &selection.country, &selection.city);
    match selection.stakeholder {
        Stakeholder::RestaurantOwner => ViewModel::Owner(owner_view(&subset)),
        Stakeholder::DeliveryPlatform => ViewModel::Delivery(delivery_view(&subset)),
        Stakeholder::MarketAnalyst => ViewModel::Analyst(analyst_view(&subset, data)),
    }
}

/// Headline stats for the current selection, exported as JSON after each
/// render pass.
pub fn selection_summary(data: &[Restaurant], selection: &Selection) -> SelectionSummary {
    let subset = filter::apply(data, &selection.country, &selection.city);
    let ratings: Vec<f64> = subset.iter().map(|r| r.rating).collect();
    SelectionSummary {
        country: selection.country.clone(),
        city: selection.city.label().to_string(),
        stakeholder: selection.stakeholder.label().to_string(),
        restaurants: subset.len(),
        avg_rating: average(&ratings),
        total_votes: subset.iter().map(|r| r.votes).sum(),
    }
}

fn owner_view(subset: &[&Restaurant]) -> OwnerView {
    let ratings: Vec<f64> = subset.iter().map(|r| r.rating).collect();
    let costs: Vec<f64> = subset.iter().map(|r| r.average_cost_for_two).collect();
    let currency = mode(subset.iter().map(|r| r.currency.as_str()))
        .unwrap_or_else(|| "N/A".to_string());
    OwnerView {
        avg_rating: average(&ratings),
        avg_cost_for_two: average(&costs),
        currency,
        total_votes: subset.iter().map(|r| r.votes).sum(),
        rating_histogram: rating_histogram(subset),
        top_cuisines: top_cuisines(subset),
    }
}

fn rating_histogram(subset: &[&Restaurant]) -> Vec<RatingBinRow> {
    let width = RATING_SCALE_MAX / RATING_BINS as f64;
    let mut counts = vec![0usize; RATING_BINS];
    for r in subset {
        let mut idx = (r.rating / width).floor() as usize;
        // A rating at the top of the scale lands in the last bucket.
        if idx >= RATING_BINS {
            idx = RATING_BINS - 1;
        }
        counts[idx] += 1;
    }
    let max = counts.iter().copied().max().unwrap_or(0) as f64;
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| RatingBinRow {
            bucket: format!("{:.2} - {:.2}", i as f64 * width, (i + 1) as f64 * width),
            restaurants: count,
            bar: bar(count as f64, max, BAR_WIDTH),
        })
        .collect()
}

/// Explode the comma-separated cuisine text into a token multiset and
/// rank the ten most frequent. Ties keep first-seen order.
fn top_cuisines(subset: &[&Restaurant]) -> Vec<CuisineRankRow> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut order = 0usize;
    for r in subset {
        for token in r.cuisines.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let e = counts.entry(token.to_string()).or_insert_with(|| {
                order += 1;
                (0, order)
            });
            e.0 += 1;
        }
    }
    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(cuisine, (count, first_seen))| (cuisine, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    let max = ranked.first().map(|r| r.1).unwrap_or(0) as f64;
    ranked
        .into_iter()
        .take(TOP_CUISINES)
        .enumerate()
        .map(|(idx, (cuisine, count, _))| CuisineRankRow {
            rank: idx + 1,
            cuisine,
            restaurants: count,
            bar: bar(count as f64, max, BAR_WIDTH),
        })
        .collect()
}

fn delivery_view(subset: &[&Restaurant]) -> DeliveryView {
    let mut groups: HashMap<bool, Vec<f64>> = HashMap::new();
    for r in subset {
        groups.entry(r.has_online_delivery).or_default().push(r.rating);
    }
    let mut rating_by_delivery: Vec<DeliveryRatingRow> = groups
        .into_iter()
        .map(|(flag, ratings)| DeliveryRatingRow {
            online_delivery: if flag { "Yes" } else { "No" }.to_string(),
            avg_rating: format_number(average(&ratings), 2),
            restaurants: ratings.len(),
        })
        .collect();
    rating_by_delivery.sort_by(|a, b| a.online_delivery.cmp(&b.online_delivery));

    // Delivery-enabled listings only; an empty vector is the empty-state
    // signal for the presentation layer.
    let delivery_cost_rating: Vec<CostRatingRow> = subset
        .iter()
        .filter(|r| r.has_online_delivery)
        .map(|r| CostRatingRow {
            name: r.name.clone(),
            cuisines: r.cuisines.clone(),
            average_cost_per_person: format_number(r.average_cost_per_person, 2),
            rating: format_number(r.rating, 2),
            votes: r.votes,
        })
        .collect();

    DeliveryView {
        rating_by_delivery,
        delivery_cost_rating,
    }
}

fn analyst_view(subset: &[&Restaurant], full: &[Restaurant]) -> AnalystView {
    // The map deliberately covers the whole dataset, not the subset.
    let map_points: Vec<GeoPointRow> = full
        .iter()
        .map(|r| GeoPointRow {
            name: r.name.clone(),
            city: r.city.clone(),
            country: r.country.clone(),
            latitude: format!("{:.6}", r.latitude),
            longitude: format!("{:.6}", r.longitude),
            rating: format_number(r.rating, 2),
        })
        .collect();

    let mut by_range: HashMap<u8, usize> = HashMap::new();
    for r in subset {
        *by_range.entry(r.price_range).or_default() += 1;
    }
    let mut ranges: Vec<(u8, usize)> = by_range.into_iter().collect();
    ranges.sort_by_key(|(range, _)| *range);
    let range_max = ranges.iter().map(|(_, n)| *n).max().unwrap_or(0) as f64;
    let price_ranges: Vec<PriceRangeRow> = ranges
        .into_iter()
        .map(|(range, count)| PriceRangeRow {
            price_range: range,
            restaurants: count,
            bar: bar(count as f64, range_max, BAR_WIDTH),
        })
        .collect();

    let mut by_country: HashMap<&str, usize> = HashMap::new();
    for r in full {
        *by_country.entry(r.country.as_str()).or_default() += 1;
    }
    let mut ranked: Vec<(&str, usize)> = by_country.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    let country_max = ranked.first().map(|c| c.1).unwrap_or(0) as f64;
    let country_counts: Vec<CountryCountRow> = ranked
        .into_iter()
        .map(|(country, count)| CountryCountRow {
            country: country.to_string(),
            restaurants: count,
            bar: bar(count as f64, country_max, BAR_WIDTH),
        })
        .collect();

    AnalystView {
        map_points,
        price_ranges,
        country_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CityChoice;

    struct Fixture<'a> {
        name: &'a str,
        country: &'a str,
        city: &'a str,
        cuisines: &'a str,
        rating: f64,
        votes: u64,
        delivery: bool,
        price_range: u8,
    }

    fn restaurant(fx: Fixture) -> Restaurant {
        Restaurant {
            name: fx.name.to_string(),
            country: fx.country.to_string(),
            city: fx.city.to_string(),
            longitude: 77.0,
            latitude: 28.0,
            cuisines: fx.cuisines.to_string(),
            average_cost_for_two: 400.0,
            currency: "INR".to_string(),
            has_online_delivery: fx.delivery,
            price_range: fx.price_range,
            rating: fx.rating,
            votes: fx.votes,
            cuisine_count: fx.cuisines.split(',').count(),
            average_cost_per_person: 200.0,
        }
    }

    fn sample() -> Vec<Restaurant> {
        vec![
            restaurant(Fixture { name: "A", country: "India", city: "Delhi", cuisines: "Chinese, Italian", rating: 3.0, votes: 10, delivery: true, price_range: 2 }),
            restaurant(Fixture { name: "B", country: "India", city: "Delhi", cuisines: "Italian", rating: 4.0, votes: 20, delivery: false, price_range: 2 }),
            restaurant(Fixture { name: "C", country: "India", city: "Agra", cuisines: "North Indian", rating: 5.0, votes: 30, delivery: false, price_range: 3 }),
            restaurant(Fixture { name: "D", country: "Brazil", city: "Brasilia", cuisines: "Brazilian", rating: 4.5, votes: 40, delivery: false, price_range: 4 }),
        ]
    }

    fn selection(stakeholder: Stakeholder, city: CityChoice) -> Selection {
        Selection {
            country: "India".to_string(),
            city,
            stakeholder,
        }
    }

    #[test]
    fn owner_metrics_use_the_filtered_subset() {
        let data = sample();
        let view = render(&data, &selection(Stakeholder::RestaurantOwner, CityChoice::All));
        let ViewModel::Owner(owner) = view else {
            panic!("expected owner view");
        };
        // Ratings {3.0, 4.0, 5.0} over the India subset.
        assert_eq!(format_number(owner.avg_rating, 2), "4.00");
        assert_eq!(owner.total_votes, 60);
        assert_eq!(owner.currency, "INR");
    }

    #[test]
    fn cuisines_are_exploded_trimmed_and_ranked() {
        let data = sample();
        let view = render(&data, &selection(Stakeholder::RestaurantOwner, CityChoice::All));
        let ViewModel::Owner(owner) = view else {
            panic!("expected owner view");
        };
        assert_eq!(owner.top_cuisines[0].cuisine, "Italian");
        assert_eq!(owner.top_cuisines[0].restaurants, 2);
        assert_eq!(owner.top_cuisines[0].rank, 1);
        // Count ties keep first-seen order: Chinese before North Indian.
        assert_eq!(owner.top_cuisines[1].cuisine, "Chinese");
        assert_eq!(owner.top_cuisines[2].cuisine, "North Indian");
    }

    #[test]
    fn rating_histogram_has_fixed_bins() {
        let data = sample();
        let view = render(&data, &selection(Stakeholder::RestaurantOwner, CityChoice::All));
        let ViewModel::Owner(owner) = view else {
            panic!("expected owner view");
        };
        assert_eq!(owner.rating_histogram.len(), RATING_BINS);
        let total: usize = owner.rating_histogram.iter().map(|b| b.restaurants).sum();
        assert_eq!(total, 3);
        // A rating of 5.0 lands in the last bucket, not out of range.
        assert_eq!(owner.rating_histogram[RATING_BINS - 1].restaurants, 1);
    }

    #[test]
    fn delivery_groups_sort_no_before_yes() {
        let data = sample();
        let view = render(&data, &selection(Stakeholder::DeliveryPlatform, CityChoice::All));
        let ViewModel::Delivery(delivery) = view else {
            panic!("expected delivery view");
        };
        assert_eq!(delivery.rating_by_delivery[0].online_delivery, "No");
        assert_eq!(delivery.rating_by_delivery[0].restaurants, 2);
        assert_eq!(delivery.rating_by_delivery[1].online_delivery, "Yes");
        assert_eq!(delivery.rating_by_delivery[1].avg_rating, "3.00");
        assert_eq!(delivery.delivery_cost_rating.len(), 1);
        assert_eq!(delivery.delivery_cost_rating[0].name, "A");
    }

    #[test]
    fn empty_delivery_subset_yields_empty_state_not_error() {
        let data = sample();
        // Agra has no delivery-enabled restaurants.
        let view = render(
            &data,
            &selection(Stakeholder::DeliveryPlatform, CityChoice::Named("Agra".to_string())),
        );
        let ViewModel::Delivery(delivery) = view else {
            panic!("expected delivery view");
        };
        assert!(delivery.delivery_cost_rating.is_empty());
        assert_eq!(delivery.rating_by_delivery.len(), 1);
    }

    #[test]
    fn analyst_map_and_country_counts_cover_the_full_dataset() {
        let data = sample();
        let view = render(
            &data,
            &selection(Stakeholder::MarketAnalyst, CityChoice::Named("Delhi".to_string())),
        );
        let ViewModel::Analyst(analyst) = view else {
            panic!("expected analyst view");
        };
        assert_eq!(analyst.map_points.len(), 4);
        assert_eq!(analyst.country_counts[0].country, "India");
        assert_eq!(analyst.country_counts[0].restaurants, 3);
        assert_eq!(analyst.country_counts[1].country, "Brazil");
        // The price-range distribution covers only the Delhi subset.
        assert_eq!(analyst.price_ranges.len(), 1);
        assert_eq!(analyst.price_ranges[0].price_range, 2);
        assert_eq!(analyst.price_ranges[0].restaurants, 2);
    }

    #[test]
    fn summary_reflects_the_selection() {
        let data = sample();
        let sel = selection(Stakeholder::RestaurantOwner, CityChoice::Named("Delhi".to_string()));
        let summary = selection_summary(&data, &sel);
        assert_eq!(summary.restaurants, 2);
        assert_eq!(summary.total_votes, 30);
        assert_eq!(summary.city, "Delhi");
        assert_eq!(summary.stakeholder, "Restaurant Owner");
    }
}
