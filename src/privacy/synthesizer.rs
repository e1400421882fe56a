//! Synthetic replacement values, one generator per PII category.
//!
//! A [`ValueSynthesizer`] owns its RNG. Two instances built from the same seed
//! and policy produce the same sequence of values, which keeps fixtures built
//! from an anonymized snapshot repeatable.

use std::fmt;

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use uuid::Uuid;

use super::corpus;
use crate::config::SynthesisPolicy;

/// String-valued PII categories.
///
/// Addresses are multi-part and come from [`ValueSynthesizer::address`]
/// instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    PersonName,
    OrganizationName,
    Email,
    Phone,
    AuthToken,
    CardToken,
    DeviceToken,
    Filename,
}

impl Category {
    /// Categories whose values must never repeat within a run
    pub fn requires_unique(self) -> bool {
        matches!(
            self,
            Self::PersonName | Self::OrganizationName | Self::Email
        )
    }

    /// Append a disambiguating number without breaking the value's syntax.
    pub fn with_suffix(self, value: &str, suffix: u32) -> String {
        let split = match self {
            Self::Email => value.find('@'),
            Self::Filename => value.rfind('.'),
            // Keep a generational suffix last so the name still parses.
            Self::PersonName => value
                .rsplit_once(' ')
                .filter(|(_, last)| corpus::NAME_SUFFIXES.contains(last))
                .map(|(head, _)| head.len()),
            _ => None,
        };
        match split {
            Some(at) => format!("{}{}{}", &value[..at], suffix, &value[at..]),
            None => format!("{value}{suffix}"),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PersonName => "person name",
            Self::OrganizationName => "organization name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::AuthToken => "auth token",
            Self::CardToken => "card token",
            Self::DeviceToken => "device token",
            Self::Filename => "filename",
        };
        f.write_str(name)
    }
}

/// Source of string values for a category.
pub trait Synthesize {
    fn synthesize(&mut self, category: Category) -> String;
}

/// A person's name split into the parts the users table stores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    pub first: String,
    pub last: String,
    pub display: String,
}

impl PersonName {
    /// Split a composed display name back into first and last name, ignoring
    /// honorifics, middle initials and generational suffixes.
    pub fn parse(display: &str) -> Self {
        let parts: Vec<&str> = display
            .split_whitespace()
            .filter(|p| !corpus::NAME_PREFIXES.contains(p))
            .collect();
        let core: Vec<&str> = match parts.split_last() {
            Some((last, rest)) if corpus::NAME_SUFFIXES.contains(last) && !rest.is_empty() => {
                rest.to_vec()
            }
            _ => parts,
        };
        Self {
            first: core.first().copied().unwrap_or_default().to_string(),
            last: core.last().copied().unwrap_or_default().to_string(),
            display: display.to_string(),
        }
    }
}

/// A synthetic postal address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalAddress {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub subdivision_code: String,
    pub postal_code: String,
    pub country_code: String,
}

#[derive(Debug)]
pub struct ValueSynthesizer {
    rng: StdRng,
    policy: SynthesisPolicy,
}

impl ValueSynthesizer {
    pub fn new(seed: u64, policy: SynthesisPolicy) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            policy,
        }
    }

    /// Full name with a randomized composition, e.g. "Dr. Lena K. Novak" or
    /// "Omar Sato Jr.".
    pub fn person_name(&mut self) -> String {
        let mut parts = Vec::with_capacity(5);
        if self.rng.gen_bool(0.1) {
            parts.push(self.pick(corpus::NAME_PREFIXES).to_string());
        }
        parts.push(self.pick(corpus::FIRST_NAMES).to_string());
        if self.rng.gen_bool(0.25) {
            let initial = char::from(b'A' + self.rng.gen_range(0..26u8));
            parts.push(format!("{initial}."));
        }
        parts.push(self.pick(corpus::LAST_NAMES).to_string());
        if self.rng.gen_bool(0.05) {
            parts.push(self.pick(corpus::NAME_SUFFIXES).to_string());
        }
        parts.join(" ")
    }

    pub fn organization_name(&mut self) -> String {
        format!(
            "{} {} {}",
            capitalize(self.pick(corpus::ADJECTIVES)),
            capitalize(self.pick(corpus::NOUNS)),
            self.pick(corpus::COMPANY_SUFFIXES)
        )
    }

    /// `{adjective}{noun}{digits}@{domain}`
    pub fn email(&mut self) -> String {
        let adjective = self.pick(corpus::ADJECTIVES);
        let noun = self.pick(corpus::NOUNS);
        let digits = self.digits(self.policy.email_digits);
        format!("{}{}{}@{}", adjective, noun, digits, self.policy.email_domain)
    }

    pub fn phone(&mut self) -> String {
        let digits = self.digits(self.policy.phone_digits);
        format!("{}{}", self.policy.phone_prefix, digits)
    }

    pub fn auth_token(&mut self) -> String {
        let uuid = self.uuid();
        format!("{}{}", self.policy.auth_token_prefix, uuid)
    }

    pub fn card_token(&mut self) -> String {
        let uuid = self.uuid();
        format!("{}{}", self.policy.card_token_prefix, uuid)
    }

    pub fn device_token(&mut self) -> String {
        self.alphanumeric(self.policy.device_token_len)
    }

    pub fn filename(&mut self) -> String {
        let stem = self.alphanumeric(self.policy.filename_len);
        format!("{}.{}", stem, self.policy.filename_extension)
    }

    pub fn address(&mut self) -> PostalAddress {
        let number = self.rng.gen_range(1..10_000);
        let line1 = format!(
            "{} {} {}",
            number,
            self.pick(corpus::STREET_NAMES),
            self.pick(corpus::STREET_SUFFIXES)
        );
        let unit = self.rng.gen_range(1..1_000);
        let line2 = format!("{} {}", self.pick(corpus::SECONDARY_UNITS), unit);
        let subdivision_code = self.pick(corpus::SUBDIVISION_CODES).to_string();
        let country_code = subdivision_code
            .split('-')
            .next()
            .unwrap_or_default()
            .to_string();

        PostalAddress {
            line1,
            line2,
            city: self.pick(corpus::CITIES).to_string(),
            subdivision_code,
            postal_code: self.digits(5),
            country_code,
        }
    }

    fn pick(&mut self, list: &'static [&'static str]) -> &'static str {
        list[self.rng.gen_range(0..list.len())]
    }

    fn digits(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(b'0' + self.rng.gen_range(0..10u8)))
            .collect()
    }

    fn alphanumeric(&mut self, len: usize) -> String {
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }

    // Built from the seeded RNG rather than `Uuid::new_v4` so tokens are
    // reproducible too.
    fn uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }
}

impl Synthesize for ValueSynthesizer {
    fn synthesize(&mut self, category: Category) -> String {
        match category {
            Category::PersonName => self.person_name(),
            Category::OrganizationName => self.organization_name(),
            Category::Email => self.email(),
            Category::Phone => self.phone(),
            Category::AuthToken => self.auth_token(),
            Category::CardToken => self.card_token(),
            Category::DeviceToken => self.device_token(),
            Category::Filename => self.filename(),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
