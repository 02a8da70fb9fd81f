// file: src/models/entity.rs
// description: entity kind taxonomy and located entity match model
// reference: named entity recognition conventions

use crate::error::ExtractError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of entity the extractor recognises.
///
/// Declaration order doubles as priority when matches of different kinds are
/// resolved exclusively: earlier kinds claim their spans first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Email,
    PhoneNumber,
    Date,
    Url,
    Reference,
    Currency,
    CreditCard,
    AccountNumber,
    SocialSecurityNumber,
    IpAddress,
    PersonName,
}

/// Coarse grouping of entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Contact,
    Temporal,
    Location,
    Identifier,
    Financial,
    Person,
}

impl EntityKind {
    pub const ALL: [EntityKind; 11] = [
        EntityKind::Email,
        EntityKind::PhoneNumber,
        EntityKind::Date,
        EntityKind::Url,
        EntityKind::Reference,
        EntityKind::Currency,
        EntityKind::CreditCard,
        EntityKind::AccountNumber,
        EntityKind::SocialSecurityNumber,
        EntityKind::IpAddress,
        EntityKind::PersonName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Email => "email",
            EntityKind::PhoneNumber => "phone_number",
            EntityKind::Date => "date",
            EntityKind::Url => "url",
            EntityKind::Reference => "reference",
            EntityKind::Currency => "currency",
            EntityKind::CreditCard => "credit_card",
            EntityKind::AccountNumber => "account_number",
            EntityKind::SocialSecurityNumber => "social_security_number",
            EntityKind::IpAddress => "ip_address",
            EntityKind::PersonName => "person_name",
        }
    }

    pub fn category(&self) -> EntityCategory {
        match self {
            EntityKind::Email | EntityKind::PhoneNumber => EntityCategory::Contact,
            EntityKind::Date => EntityCategory::Temporal,
            EntityKind::Url => EntityCategory::Location,
            EntityKind::Reference
            | EntityKind::AccountNumber
            | EntityKind::SocialSecurityNumber
            | EntityKind::IpAddress => EntityCategory::Identifier,
            EntityKind::Currency | EntityKind::CreditCard => EntityCategory::Financial,
            EntityKind::PersonName => EntityCategory::Person,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "email" | "emails" => Ok(EntityKind::Email),
            "phone" | "phones" | "phone_number" => Ok(EntityKind::PhoneNumber),
            "date" | "dates" => Ok(EntityKind::Date),
            "url" | "urls" => Ok(EntityKind::Url),
            "reference" | "invoice" | "invoices" => Ok(EntityKind::Reference),
            "currency" | "currency_amount" => Ok(EntityKind::Currency),
            "credit_card" | "credit_card_number" => Ok(EntityKind::CreditCard),
            "account_number" | "account" => Ok(EntityKind::AccountNumber),
            "social_security_number" | "ssn" => Ok(EntityKind::SocialSecurityNumber),
            "ip_address" | "ip" => Ok(EntityKind::IpAddress),
            "person_name" | "name" | "names" => Ok(EntityKind::PersonName),
            _ => Err(ExtractError::UnknownKind(s.to_string())),
        }
    }
}

impl EntityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityCategory::Contact => "contact",
            EntityCategory::Temporal => "temporal",
            EntityCategory::Location => "location",
            EntityCategory::Identifier => "identifier",
            EntityCategory::Financial => "financial",
            EntityCategory::Person => "person",
        }
    }
}

/// A single located entity. Offsets are UTF-8 byte offsets into the scanned
/// text, half-open, so `&text[start_offset..end_offset] == raw_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMatch {
    pub kind: EntityKind,
    pub raw_text: String,
    pub start_offset: usize,
    pub end_offset: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl EntityMatch {
    pub fn new(kind: EntityKind, raw_text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind,
            raw_text: raw_text.into(),
            start_offset: start,
            end_offset: end,
            context: None,
        }
    }

    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }

    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    pub fn is_empty(&self) -> bool {
        self.start_offset == self.end_offset
    }

    pub fn overlaps(&self, other: &EntityMatch) -> bool {
        self.start_offset < other.end_offset && other.start_offset < self.end_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_name() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.as_str().parse::<EntityKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_aliases() {
        assert_eq!("SSN".parse::<EntityKind>().unwrap(), EntityKind::SocialSecurityNumber);
        assert_eq!("phone-number".parse::<EntityKind>().unwrap(), EntityKind::PhoneNumber);
        assert!("zipcode".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&EntityKind::IpAddress).unwrap();
        assert_eq!(json, "\"ip_address\"");
    }

    #[test]
    fn test_category() {
        assert_eq!(EntityKind::Email.category(), EntityCategory::Contact);
        assert_eq!(EntityKind::Date.category(), EntityCategory::Temporal);
        assert_eq!(EntityKind::CreditCard.category(), EntityCategory::Financial);
    }

    #[test]
    fn test_match_overlap() {
        let a = EntityMatch::new(EntityKind::PhoneNumber, "555-123-4567", 5, 17);
        let b = EntityMatch::new(EntityKind::AccountNumber, "555-123-4567", 5, 17);
        let c = EntityMatch::new(EntityKind::Date, "x", 17, 18);

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert_eq!(a.len(), 12);
    }

    #[test]
    fn test_context_skipped_when_absent() {
        let m = EntityMatch::new(EntityKind::Email, "a@b.com", 0, 7);
        let json = serde_json::to_string(&m).unwrap();
        assert!(!json.contains("context"));
    }
}
