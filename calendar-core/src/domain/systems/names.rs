//! English month names keyed by calendar month codes.
//!
//! Codes follow the `M01`..`M13` scheme with an `L` suffix for leap months.
//! Locale-aware month formatting belongs to the rendering layer; these names
//! only feed the default header title and time label.

use super::CalendarIdentifier;

const GREGORIAN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const ISLAMIC: [&str; 12] = [
    "Muharram", "Safar", "Rabi' I", "Rabi' II", "Jumada I", "Jumada II",
    "Rajab", "Sha'ban", "Ramadan", "Shawwal", "Dhu al-Qi'dah", "Dhu al-Hijjah",
];

const PERSIAN: [&str; 12] = [
    "Farvardin", "Ordibehesht", "Khordad", "Tir", "Mordad", "Shahrivar",
    "Mehr", "Aban", "Azar", "Dey", "Bahman", "Esfand",
];

const INDIAN: [&str; 12] = [
    "Chaitra", "Vaishakha", "Jyeshtha", "Ashadha", "Shravana", "Bhadra",
    "Ashvin", "Kartika", "Agrahayana", "Pausha", "Magha", "Phalguna",
];

const COPTIC: [&str; 13] = [
    "Thout", "Paopi", "Hathor", "Koiak", "Tobi", "Meshir", "Paremhat",
    "Parmouti", "Pashons", "Paoni", "Epip", "Mesori", "Pi Kogi Enavot",
];

const ETHIOPIC: [&str; 13] = [
    "Meskerem", "Tekemt", "Hedar", "Tahsas", "Ter", "Yekatit", "Megabit",
    "Miazia", "Genbot", "Sene", "Hamle", "Nehasse", "Pagumen",
];

const HEBREW: [&str; 12] = [
    "Tishri", "Heshvan", "Kislev", "Tevet", "Shevat", "Adar",
    "Nisan", "Iyar", "Sivan", "Tamuz", "Av", "Elul",
];

/// Split `M05L` into `(5, true)`
fn parse_code(code: &str) -> Option<(usize, bool)> {
    let rest = code.strip_prefix('M')?;
    let (number, leap) = match rest.strip_suffix('L') {
        Some(number) => (number, true),
        None => (rest, false),
    };
    Some((number.parse().ok()?, leap))
}

fn lookup(table: &[&'static str], number: usize) -> Option<String> {
    table.get(number.checked_sub(1)?).map(|name| name.to_string())
}

/// Name of the month with `code`; `months_in_year` tells Adar from Adar II
pub fn month_name(calendar: CalendarIdentifier, code: &str, months_in_year: u32) -> String {
    let Some((number, leap)) = parse_code(code) else {
        return code.to_string();
    };

    use CalendarIdentifier::*;
    let name = match calendar {
        Hebrew => match (number, leap) {
            (5, true) => Some("Adar I".to_string()),
            (6, false) if months_in_year == 13 => Some("Adar II".to_string()),
            _ => lookup(&HEBREW, number),
        },
        Chinese | Dangi if leap => Some(format!("Leap Month {}", number)),
        Chinese | Dangi => Some(format!("Month {}", number)),
        Gregorian | Iso8601 | Buddhist | Japanese | Roc => lookup(&GREGORIAN, number),
        IslamicCivil | IslamicTabular | IslamicUmmAlQura => lookup(&ISLAMIC, number),
        Persian => lookup(&PERSIAN, number),
        Indian => lookup(&INDIAN, number),
        Coptic => lookup(&COPTIC, number),
        Ethiopic | EthiopicAmeteAlem => lookup(&ETHIOPIC, number),
    };
    name.unwrap_or_else(|| code.to_string())
}
