// file: src/extractor/patterns.rs
// description: compiled regex patterns for entity extraction
// reference: https://docs.rs/regex

use crate::models::EntityKind;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Contact
    pub static ref EMAIL: Regex = Regex::new(
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}\b"
    ).expect("EMAIL regex is valid");

    pub static ref PHONE_NUMBER: Regex = Regex::new(concat!(
        r"\([0-9]{3}\)\s?[0-9]{3}-[0-9]{4}",
        r"|\([0-9]{3}\)[A-Za-z-]{4,}",
        r"|\(\+[0-9]{1,3}\)[0-9]{10}",
        r"|(?:\+1-|\b)[0-9]{3}-[0-9]{3}-[0-9]{4}\b",
        r"|\b[0-9]{3}\.[0-9]{3}\.[0-9]{4}\b",
    )).expect("PHONE_NUMBER regex is valid");

    // Dates
    pub static ref DATE: Regex = Regex::new(concat!(
        r"\b(?:[0-9]{4}-[0-9]{2}-[0-9]{2}|[0-9]{2}/[0-9]{2}/[0-9]{4})\b",
        r"|\b(?:January|February|March|April|May|June|July|August|September|October|November|December)",
        r"\s+(?:[0-9]{1,2}(?:st|nd|rd|th)?,?\s+)?[0-9]{4}\b",
    )).expect("DATE regex is valid");

    // Locations; parentheses inside a URL must balance
    pub static ref URL: Regex = Regex::new(concat!(
        r"\b(?:https?|ftp)://[^\s/$.?#]",
        r"(?:(?:[^\s()]|\([^\s()]*\))*",
        r#"(?:[^\s.,;:!?()\]'"]|\([^\s()]*\)))?"#,
    )).expect("URL regex is valid");

    // Identifiers
    pub static ref REFERENCE: Regex = Regex::new(
        r"#(?:INV|TK|ORD)-[A-Z0-9]+(?:-[A-Z0-9]+)*"
    ).expect("REFERENCE regex is valid");

    pub static ref ACCOUNT_NUMBER: Regex = Regex::new(
        r"\b[0-9]{3}-[0-9]{3}-[0-9]{4}\b"
    ).expect("ACCOUNT_NUMBER regex is valid");

    pub static ref SOCIAL_SECURITY_NUMBER: Regex = Regex::new(
        r"\b[0-9]{3}-[0-9]{2}-[0-9]{4}\b"
    ).expect("SOCIAL_SECURITY_NUMBER regex is valid");

    pub static ref IP_ADDRESS: Regex = Regex::new(
        r"\b(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b"
    ).expect("IP_ADDRESS regex is valid");

    // Financial
    pub static ref CURRENCY: Regex = Regex::new(
        r"[$£](?:[0-9]{1,3}(?:,[0-9]{3})+|[0-9]+)(?:\.[0-9]{2})?\b"
    ).expect("CURRENCY regex is valid");

    pub static ref CREDIT_CARD: Regex = Regex::new(
        r"\b[0-9]{4}(?:[- ][0-9]{4}){3}\b"
    ).expect("CREDIT_CARD regex is valid");

    // People; the name itself is capture group 1
    pub static ref PERSON_NAME: Regex = Regex::new(
        r"(?:\bContact:?|\bcontact:)\s+([A-Z][a-z]+[ \t]+[A-Z][a-z]+)"
    ).expect("PERSON_NAME regex is valid");
}

const US_TRUNK_PREFIX: &str = "+1-";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Compiled pattern for a kind, and the capture group holding the entity.
pub struct EntityPattern {
    pub regex: &'static Regex,
    pub group: usize,
}

pub fn pattern_for(kind: EntityKind) -> EntityPattern {
    let (regex, group): (&'static Regex, usize) = match kind {
        EntityKind::Email => (&*EMAIL, 0),
        EntityKind::PhoneNumber => (&*PHONE_NUMBER, 0),
        EntityKind::Date => (&*DATE, 0),
        EntityKind::Url => (&*URL, 0),
        EntityKind::Reference => (&*REFERENCE, 0),
        EntityKind::Currency => (&*CURRENCY, 0),
        EntityKind::CreditCard => (&*CREDIT_CARD, 0),
        EntityKind::AccountNumber => (&*ACCOUNT_NUMBER, 0),
        EntityKind::SocialSecurityNumber => (&*SOCIAL_SECURITY_NUMBER, 0),
        EntityKind::IpAddress => (&*IP_ADDRESS, 0),
        EntityKind::PersonName => (&*PERSON_NAME, 1),
    };
    EntityPattern { regex, group }
}

/// Forces compilation of every pattern so a bad definition fails at startup.
pub fn compile_all() {
    for kind in EntityKind::ALL {
        let _ = pattern_for(kind).regex.as_str();
    }
}

/// Account numbers share their shape with US phone numbers; the `+1-` trunk
/// prefix marks the phone form.
pub fn is_account_number(text: &str, start: usize) -> bool {
    !text[..start].ends_with(US_TRUNK_PREFIX)
}

pub fn is_valid_date(date: &str) -> bool {
    if let Some((year, rest)) = date.split_once('-') {
        let mut parts = rest.splitn(2, '-');
        return match (year.parse::<i32>(), parse_u32(parts.next()), parse_u32(parts.next())) {
            (Ok(year), Some(month), Some(day)) => NaiveDate::from_ymd_opt(year, month, day).is_some(),
            _ => false,
        };
    }

    if date.contains('/') {
        let parts: Vec<&str> = date.split('/').collect();
        if parts.len() != 3 {
            return false;
        }
        let (Some(a), Some(b), Ok(year)) = (
            parse_u32(Some(parts[0])),
            parse_u32(Some(parts[1])),
            parts[2].parse::<i32>(),
        ) else {
            return false;
        };
        // Day-first or month-first, whichever is a real date
        return NaiveDate::from_ymd_opt(year, b, a).is_some()
            || NaiveDate::from_ymd_opt(year, a, b).is_some();
    }

    let tokens: Vec<&str> = date
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();
    let Some(month) = tokens.first().and_then(|m| month_to_number(m)) else {
        return false;
    };
    let Some(Ok(year)) = tokens.last().map(|y| y.parse::<i32>()) else {
        return false;
    };
    match tokens.len() {
        2 => NaiveDate::from_ymd_opt(year, month, 1).is_some(),
        3 => {
            let day = tokens[1].trim_end_matches(|c: char| c.is_ascii_alphabetic());
            parse_u32(Some(day))
                .and_then(|day| NaiveDate::from_ymd_opt(year, month, day))
                .is_some()
        }
        _ => false,
    }
}

pub fn month_to_number(month: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| *m == month)
        .map(|idx| idx as u32 + 1)
}

fn parse_u32(value: Option<&str>) -> Option<u32> {
    value?.parse().ok()
}
