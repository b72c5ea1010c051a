//! Built-in offline dataset.
//!
//! Used when no configured source can deliver countries and the load policy
//! allows a fallback. Flags point at flagcdn.com by ISO code.

use crate::core::{Country, Region};

const COUNTRIES: [(&str, &str, Region, &str); 20] = [
    ("Russia", "ru", Region::Europe, "Moscow"),
    ("United States", "us", Region::NorthAmerica, "Washington, D.C."),
    ("China", "cn", Region::Asia, "Beijing"),
    ("Germany", "de", Region::Europe, "Berlin"),
    ("France", "fr", Region::Europe, "Paris"),
    ("United Kingdom", "gb", Region::Europe, "London"),
    ("Japan", "jp", Region::Asia, "Tokyo"),
    ("Brazil", "br", Region::SouthAmerica, "Brasília"),
    ("India", "in", Region::Asia, "New Delhi"),
    ("Canada", "ca", Region::NorthAmerica, "Ottawa"),
    ("Australia", "au", Region::Oceania, "Canberra"),
    ("Italy", "it", Region::Europe, "Rome"),
    ("Spain", "es", Region::Europe, "Madrid"),
    ("South Korea", "kr", Region::Asia, "Seoul"),
    ("Mexico", "mx", Region::NorthAmerica, "Mexico City"),
    ("Netherlands", "nl", Region::Europe, "Amsterdam"),
    ("Sweden", "se", Region::Europe, "Stockholm"),
    ("Norway", "no", Region::Europe, "Oslo"),
    ("Switzerland", "ch", Region::Europe, "Bern"),
    ("Poland", "pl", Region::Europe, "Warsaw"),
];

/// The offline dataset, in a fixed order.
#[must_use]
pub fn countries() -> Vec<Country> {
    COUNTRIES
        .iter()
        .map(|&(name, code, region, capital)| {
            Country::new(name)
                .with_flags(
                    format!("https://flagcdn.com/w320/{code}.png"),
                    format!("https://flagcdn.com/{code}.svg"),
                )
                .with_region(region)
                .with_capital(capital)
        })
        .collect()
}
