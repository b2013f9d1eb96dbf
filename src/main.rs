// Entry point and high-level CLI flow.
//
// - Option [1] loads and cleans the two source tables, printing diagnostics.
// - Option [2] walks the three selection prompts (country, city,
//   stakeholder) and renders the chosen insight view, exporting each
//   chart's data alongside the console tables.
// - After a render pass, the user can go back to the selection prompts
//   or exit.
mod filter;
mod insights;
mod loader;
mod output;
mod types;
mod util;

use std::io::{self, Write};
use types::{AnalystView, CityChoice, DeliveryView, OwnerView, Selection, Stakeholder, ViewModel};

/// Read a single line of input after printing the common "Enter choice:" prompt.
///
/// The prompt is reused for the main menu and all numbered selections.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask the user whether to go back to the filter selection after a
/// render pass.
///
/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_selection() -> bool {
    loop {
        print!("Back to Filter Selection (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        io::stdin().read_line(&mut buf).ok();
        let resp = buf.trim().to_uppercase();
        match resp.as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Print a numbered option list and loop until a valid pick comes back.
/// Returns the 0-based index of the chosen option.
fn prompt_pick(title: &str, options: &[String]) -> usize {
    loop {
        println!("{}", title);
        for (idx, option) in options.iter().enumerate() {
            println!("[{}] {}", idx + 1, option);
        }
        println!("");
        match read_choice().parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return n - 1,
            _ => println!("Invalid choice.\n"),
        }
    }
}

/// City prompt: the same numbered list with a leading `[0] All Cities`
/// sentinel option.
fn prompt_city(cities: &[String]) -> CityChoice {
    loop {
        println!("Select City:");
        println!("[0] All Cities");
        for (idx, city) in cities.iter().enumerate() {
            println!("[{}] {}", idx + 1, city);
        }
        println!("");
        match read_choice().parse::<usize>() {
            Ok(0) => return CityChoice::All,
            Ok(n) if (1..=cities.len()).contains(&n) => return CityChoice::Named(cities[n - 1].clone()),
            _ => println!("Invalid choice.\n"),
        }
    }
}

/// Handle option [1]: load and clean both source tables.
///
/// The dataset is memoized, so exploring afterward reuses this load.
fn handle_load() {
    match loader::dataset() {
        Ok(ds) => {
            println!(
                "Processing dataset... ({} rows read, {} unique restaurants kept)",
                util::format_int(ds.report.total_rows as i64),
                util::format_int(ds.report.clean_rows as i64)
            );
            println!(
                "Note: {} rows skipped due to parse/validation errors.",
                util::format_int(ds.report.parse_errors as i64)
            );
            if ds.report.duplicate_rows > 0 {
                println!(
                    "Info: Removed {} duplicate listings.",
                    util::format_int(ds.report.duplicate_rows as i64)
                );
            }
            if ds.report.unknown_countries > 0 {
                println!(
                    "Info: {} rows had unmatched country codes.",
                    util::format_int(ds.report.unknown_countries as i64)
                );
            }
            println!("");
        }
        Err(e) => {
            eprintln!("Failed to load dataset: {}\n", e);
        }
    }
}

/// Handle option [2]: selection prompts plus one render pass.
fn handle_explore() {
    let data = match loader::dataset() {
        Ok(ds) => &ds.restaurants,
        Err(e) => {
            eprintln!("Failed to load dataset: {}\n", e);
            return;
        }
    };

    let countries = filter::countries(data);
    if countries.is_empty() {
        println!("No restaurants in the dataset. Nothing to explore.\n");
        return;
    }
    let country = countries[prompt_pick("Select Country:", &countries)].clone();
    println!("");

    let cities = filter::cities_in(data, &country);
    let city = prompt_city(&cities);
    println!("");

    let stakeholders = [
        Stakeholder::RestaurantOwner,
        Stakeholder::DeliveryPlatform,
        Stakeholder::MarketAnalyst,
    ];
    let labels: Vec<String> = stakeholders.iter().map(|s| s.label().to_string()).collect();
    let stakeholder = stakeholders[prompt_pick("I am a...", &labels)];
    println!("");

    let selection = Selection {
        country,
        city,
        stakeholder,
    };

    match insights::render(data, &selection) {
        ViewModel::Owner(view) => show_owner_view(&selection, &view),
        ViewModel::Delivery(view) => show_delivery_view(&selection, &view),
        ViewModel::Analyst(view) => show_analyst_view(&selection, &view),
    }

    let summary = insights::selection_summary(data, &selection);
    if let Err(e) = output::write_json("selection_summary.json", &summary) {
        eprintln!("Write error: {}", e);
    }
    println!(
        "Selection summary ({} restaurants, avg rating {}) saved to selection_summary.json\n",
        util::format_int(summary.restaurants as i64),
        util::format_number(summary.avg_rating, 2)
    );
}

fn show_owner_view(selection: &Selection, view: &OwnerView) {
    println!("Insights for Restaurant Owners");
    println!("({} / {})\n", selection.country, selection.city.label());

    println!("Average Rating: {}", util::format_number(view.avg_rating, 2));
    println!(
        "Average Cost for Two: {} {}",
        util::format_number(view.avg_cost_for_two, 0),
        view.currency
    );
    println!("Total Votes: {}\n", util::format_int(view.total_votes));

    println!("Ratings Distribution\n");
    output::print_table(&view.rating_histogram);
    let file = "owner_rating_distribution.csv";
    if let Err(e) = output::write_csv(file, &view.rating_histogram) {
        eprintln!("Write error: {}", e);
    }
    println!("(Chart data exported to {})\n", file);

    println!("Top 10 Most Common Cuisines\n");
    output::print_table(&view.top_cuisines);
    let file = "owner_top_cuisines.csv";
    if let Err(e) = output::write_csv(file, &view.top_cuisines) {
        eprintln!("Write error: {}", e);
    }
    println!("(Chart data exported to {})\n", file);
}

fn show_delivery_view(selection: &Selection, view: &DeliveryView) {
    println!("Insights for Food Delivery Platforms");
    println!("({} / {})\n", selection.country, selection.city.label());

    println!("Online Delivery vs. Dine-in (Average Rating)\n");
    output::print_table(&view.rating_by_delivery);
    let file = "delivery_rating_comparison.csv";
    if let Err(e) = output::write_csv(file, &view.rating_by_delivery) {
        eprintln!("Write error: {}", e);
    }
    println!("(Chart data exported to {})\n", file);

    println!("Cost vs. Rating (Online Delivery Restaurants)\n");
    if view.delivery_cost_rating.is_empty() {
        println!("No restaurants with online delivery in this selection.\n");
        return;
    }
    output::preview_table_rows(&view.delivery_cost_rating, 10);
    let file = "delivery_cost_vs_rating.csv";
    if let Err(e) = output::write_csv(file, &view.delivery_cost_rating) {
        eprintln!("Write error: {}", e);
    }
    println!("(Full table exported to {})\n", file);
}

fn show_analyst_view(selection: &Selection, view: &AnalystView) {
    println!("Insights for Market Analysts");
    println!("({} / {})\n", selection.country, selection.city.label());

    println!("Restaurant Locations and Ratings (all countries)\n");
    output::preview_table_rows(&view.map_points, 3);
    let file = "analyst_restaurant_map.csv";
    if let Err(e) = output::write_csv(file, &view.map_points) {
        eprintln!("Write error: {}", e);
    }
    println!("(Full table exported to {})\n", file);

    println!("Price Range Distribution\n");
    output::print_table(&view.price_ranges);
    let file = "analyst_price_range.csv";
    if let Err(e) = output::write_csv(file, &view.price_ranges) {
        eprintln!("Write error: {}", e);
    }
    println!("(Chart data exported to {})\n", file);

    println!("Restaurant Count by Country\n");
    output::print_table(&view.country_counts);
    let file = "analyst_country_counts.csv";
    if let Err(e) = output::write_csv(file, &view.country_counts) {
        eprintln!("Write error: {}", e);
    }
    println!("(Chart data exported to {})\n", file);
}

fn main() {
    loop {
        println!("Restaurant Insights Dashboard");
        println!("[1] Load the dataset");
        println!("[2] Explore insights\n");
        match read_choice().as_str() {
            "1" => {
                handle_load();
            }
            "2" => {
                println!("");
                loop {
                    handle_explore();
                    if !prompt_back_to_selection() {
                        println!("Exiting the program.");
                        return;
                    }
                    println!("");
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1 or 2.\n");
            }
        }
    }
}
