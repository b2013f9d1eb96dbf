use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One raw row of the restaurant CSV, deserialized by header name.
///
/// Only the columns the analysis needs are mapped; everything else in the
/// source file (restaurant id, address, locality fields, booking flags,
/// rating color/text) is dropped by construction.
#[derive(Debug, Deserialize)]
pub struct RawRestaurantRow {
    #[serde(rename = "Restaurant Name")]
    pub restaurant_name: Option<String>,
    #[serde(rename = "Country Code")]
    pub country_code: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<String>,
    #[serde(rename = "Latitude")]
    pub latitude: Option<String>,
    #[serde(rename = "Cuisines")]
    pub cuisines: Option<String>,
    #[serde(rename = "Average Cost for two")]
    pub average_cost_for_two: Option<String>,
    #[serde(rename = "Currency")]
    pub currency: Option<String>,
    #[serde(rename = "Has Online delivery")]
    pub has_online_delivery: Option<String>,
    #[serde(rename = "Price range")]
    pub price_range: Option<String>,
    #[serde(rename = "Aggregate rating")]
    pub aggregate_rating: Option<String>,
    #[serde(rename = "Votes")]
    pub votes: Option<String>,
}

/// One raw row of the country-code lookup table.
#[derive(Debug, Deserialize)]
pub struct CountryCodeRow {
    #[serde(rename = "Country Code")]
    pub country_code: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
}

/// A cleaned restaurant listing after the join, sentinel fills,
/// deduplication, and feature derivation.
#[derive(Debug, Clone)]
pub struct Restaurant {
    pub name: String,
    pub country: String,
    pub city: String,
    pub longitude: f64,
    pub latitude: f64,
    pub cuisines: String,
    pub average_cost_for_two: f64,
    pub currency: String,
    pub has_online_delivery: bool,
    pub price_range: u8,
    pub rating: f64,
    pub votes: u64,
    pub cuisine_count: usize,
    pub average_cost_per_person: f64,
}

/// The three-way stakeholder selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stakeholder {
    RestaurantOwner,
    DeliveryPlatform,
    MarketAnalyst,
}

impl Stakeholder {
    pub fn label(&self) -> &'static str {
        match self {
            Stakeholder::RestaurantOwner => "Restaurant Owner",
            Stakeholder::DeliveryPlatform => "Food Delivery Platform",
            Stakeholder::MarketAnalyst => "Market Analyst",
        }
    }
}

/// City selector state. `All` keeps every city of the selected country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityChoice {
    All,
    Named(String),
}

impl CityChoice {
    pub fn label(&self) -> &str {
        match self {
            CityChoice::All => "All Cities",
            CityChoice::Named(city) => city,
        }
    }
}

/// The full selection state driving one render pass.
#[derive(Debug, Clone)]
pub struct Selection {
    pub country: String,
    pub city: CityChoice,
    pub stakeholder: Stakeholder,
}

/// One bucket of the ratings histogram.
///
/// The `bar` column is console-only; CSV exports carry the plain counts.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RatingBinRow {
    #[serde(rename = "Rating")]
    #[tabled(rename = "Rating")]
    pub bucket: String,
    #[serde(rename = "Restaurants")]
    #[tabled(rename = "Restaurants")]
    pub restaurants: usize,
    #[serde(skip_serializing)]
    #[tabled(rename = "Bar")]
    pub bar: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CuisineRankRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Cuisine")]
    #[tabled(rename = "Cuisine")]
    pub cuisine: String,
    #[serde(rename = "Restaurants")]
    #[tabled(rename = "Restaurants")]
    pub restaurants: usize,
    #[serde(skip_serializing)]
    #[tabled(rename = "Bar")]
    pub bar: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct DeliveryRatingRow {
    #[serde(rename = "OnlineDelivery")]
    #[tabled(rename = "OnlineDelivery")]
    pub online_delivery: String,
    #[serde(rename = "AvgRating")]
    #[tabled(rename = "AvgRating")]
    pub avg_rating: String,
    #[serde(rename = "Restaurants")]
    #[tabled(rename = "Restaurants")]
    pub restaurants: usize,
}

/// One point of the delivery cost-vs-rating chart, votes as the size
/// channel and name/cuisines as the hover data.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CostRatingRow {
    #[serde(rename = "Restaurant")]
    #[tabled(rename = "Restaurant")]
    pub name: String,
    #[serde(rename = "Cuisines")]
    #[tabled(rename = "Cuisines")]
    pub cuisines: String,
    #[serde(rename = "AvgCostPerPerson")]
    #[tabled(rename = "AvgCostPerPerson")]
    pub average_cost_per_person: String,
    #[serde(rename = "Rating")]
    #[tabled(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Votes")]
    #[tabled(rename = "Votes")]
    pub votes: u64,
}

/// One point of the analyst map chart, rating as the color channel.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct GeoPointRow {
    #[serde(rename = "Restaurant")]
    #[tabled(rename = "Restaurant")]
    pub name: String,
    #[serde(rename = "City")]
    #[tabled(rename = "City")]
    pub city: String,
    #[serde(rename = "Country")]
    #[tabled(rename = "Country")]
    pub country: String,
    #[serde(rename = "Latitude")]
    #[tabled(rename = "Latitude")]
    pub latitude: String,
    #[serde(rename = "Longitude")]
    #[tabled(rename = "Longitude")]
    pub longitude: String,
    #[serde(rename = "Rating")]
    #[tabled(rename = "Rating")]
    pub rating: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct PriceRangeRow {
    #[serde(rename = "PriceRange")]
    #[tabled(rename = "PriceRange")]
    pub price_range: u8,
    #[serde(rename = "Restaurants")]
    #[tabled(rename = "Restaurants")]
    pub restaurants: usize,
    #[serde(skip_serializing)]
    #[tabled(rename = "Bar")]
    pub bar: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CountryCountRow {
    #[serde(rename = "Country")]
    #[tabled(rename = "Country")]
    pub country: String,
    #[serde(rename = "Restaurants")]
    #[tabled(rename = "Restaurants")]
    pub restaurants: usize,
    #[serde(skip_serializing)]
    #[tabled(rename = "Bar")]
    pub bar: String,
}

/// Insights for restaurant owners: headline metrics plus two charts.
#[derive(Debug, Clone)]
pub struct OwnerView {
    pub avg_rating: f64,
    pub avg_cost_for_two: f64,
    pub currency: String,
    pub total_votes: u64,
    pub rating_histogram: Vec<RatingBinRow>,
    pub top_cuisines: Vec<CuisineRankRow>,
}

/// Insights for delivery platforms. An empty `delivery_cost_rating`
/// means no delivery-enabled restaurants matched the selection; the
/// presentation layer shows the empty-state notice instead of a chart.
#[derive(Debug, Clone)]
pub struct DeliveryView {
    pub rating_by_delivery: Vec<DeliveryRatingRow>,
    pub delivery_cost_rating: Vec<CostRatingRow>,
}

/// Insights for market analysts. The map and the country ranking cover
/// the full dataset; the price-range distribution covers the filtered
/// subset.
#[derive(Debug, Clone)]
pub struct AnalystView {
    pub map_points: Vec<GeoPointRow>,
    pub price_ranges: Vec<PriceRangeRow>,
    pub country_counts: Vec<CountryCountRow>,
}

/// Exactly one of the three stakeholder views per render pass.
#[derive(Debug, Clone)]
pub enum ViewModel {
    Owner(OwnerView),
    Delivery(DeliveryView),
    Analyst(AnalystView),
}

/// Headline stats written to `selection_summary.json` after each render.
#[derive(Debug, Serialize)]
pub struct SelectionSummary {
    pub country: String,
    pub city: String,
    pub stakeholder: String,
    pub restaurants: usize,
    pub avg_rating: f64,
    pub total_votes: u64,
}
