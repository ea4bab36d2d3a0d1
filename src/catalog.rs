//! Fixed selection domains offered by the input form.

use crate::engine::overs::valid_overs;
use serde::Serialize;

/// International sides the model was trained on.
pub const TEAMS: [&str; 20] = [
    "Pakistan",
    "India",
    "New Zealand",
    "Sri Lanka",
    "South Africa",
    "West Indies",
    "England",
    "Bangladesh",
    "Zimbabwe",
    "Australia",
    "Ireland",
    "Hong Kong",
    "Netherlands",
    "United Arab Emirates",
    "Malaysia",
    "Nigeria",
    "Uganda",
    "Bahrain",
    "Scotland",
    "Nepal",
];

/// Venue cities seen in the training data.
pub const CITIES: [&str; 80] = [
    "Dubai",
    "Wellington",
    "Cape Town",
    "Kuala Lumpur",
    "Hamilton",
    "Christchurch",
    "St George's",
    "Pallekele",
    "Edinburgh",
    "Melbourne",
    "Chattogram",
    "Harare",
    "Dhaka",
    "Bangalore",
    "Colombo",
    "Basseterre",
    "Cardiff",
    "Johannesburg",
    "Kigali City",
    "Rajkot",
    "Sydney",
    "Napier",
    "Auckland",
    "Kandy",
    "Canberra",
    "Manchester",
    "Bridgetown",
    "Adelaide",
    "Perth",
    "Mumbai",
    "Hambantota",
    "Al Amarat",
    "Hobart",
    "Abu Dhabi",
    "Chester-le-Street",
    "Trinidad",
    "Guyana",
    "Nottingham",
    "Sharjah",
    "Tarouba",
    "Southampton",
    "St Lucia",
    "Mirpur",
    "Glasgow",
    "London",
    "Lahore",
    "Brisbane",
    "Mount Maunganui",
    "Barbados",
    "Karachi",
    "Kolkata",
    "Sylhet",
    "Delhi",
    "Chandigarh",
    "Rawalpindi",
    "Birmingham",
    "Centurion",
    "Gros Islet",
    "Kingston",
    "Mong Kok",
    "Dambulla",
    "Dharamsala",
    "The Hague",
    "Ahmedabad",
    "Kirtipur",
    "Lauderhill",
    "Kathmandu",
    "Kingstown",
    "Pune",
    "Dublin",
    "Nagpur",
    "Durban",
    "Bristol",
    "Entebbe",
    "Providence",
    "Chittagong",
    "Belfast",
    "Rotterdam",
    "Bulawayo",
    "Visakhapatnam",
];

pub fn is_known_team(name: &str) -> bool {
    TEAMS.contains(&name)
}

pub fn is_known_city(name: &str) -> bool {
    CITIES.contains(&name)
}

/// Sorted option lists, as presented in the form's drop-downs.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub teams: Vec<&'static str>,
    pub cities: Vec<&'static str>,
    pub overs: Vec<f64>,
}

impl Catalog {
    pub fn build() -> Self {
        let mut teams = TEAMS.to_vec();
        teams.sort_unstable();
        let mut cities = CITIES.to_vec();
        cities.sort_unstable();
        Catalog {
            teams,
            cities,
            overs: valid_overs(),
        }
    }
}
