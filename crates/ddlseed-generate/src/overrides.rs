//! Column overrides applied on top of generated rows.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::RngExt;
use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::value::Value;
use crate::words;

/// A named source of fake values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// City name.
    City,
    /// Two-letter US state code.
    State,
    /// Company name.
    Company,
    /// Job title.
    Job,
    /// Website URL.
    Url,
    /// Email address.
    Email,
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Phone number.
    Phone,
    /// Street address.
    Address,
    /// Five-digit postal code.
    Zip,
}

impl Provider {
    /// Every provider, in the order they are listed to users.
    pub const ALL: [Self; 11] = [
        Self::City,
        Self::State,
        Self::Company,
        Self::Job,
        Self::Url,
        Self::Email,
        Self::FirstName,
        Self::LastName,
        Self::Phone,
        Self::Address,
        Self::Zip,
    ];

    /// Short name used in instructions.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::State => "state",
            Self::Company => "company",
            Self::Job => "job",
            Self::Url => "url",
            Self::Email => "email",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Zip => "zip",
        }
    }

    /// Produces one value. `index` is the row index, used to keep emails
    /// distinct within a column.
    pub fn generate(self, rng: &mut StdRng, index: usize) -> Value {
        let text = match self {
            Self::City => words::city(rng),
            Self::State => words::state(rng),
            Self::Company => words::company(rng),
            Self::Job => words::job(rng),
            Self::Url => words::url(rng),
            Self::Email => words::email(rng, index),
            Self::FirstName => words::first_name(rng),
            Self::LastName => words::last_name(rng),
            Self::Phone => words::phone(rng),
            Self::Address => words::address(rng),
            Self::Zip => words::zip(rng),
        };
        Value::Text(text)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = GenerateError;

    /// Accepts the short name, optionally written as `faker:name`,
    /// `faker.name` or `name()`, plus the aliases `phone_number` and
    /// `zipcode`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let name = lower
            .strip_prefix("faker:")
            .or_else(|| lower.strip_prefix("faker."))
            .unwrap_or(lower.as_str());
        let name = name.strip_suffix("()").unwrap_or(name).trim();

        match name {
            "phone_number" => Ok(Self::Phone),
            "zipcode" => Ok(Self::Zip),
            _ => Self::ALL
                .into_iter()
                .find(|p| p.name() == name)
                .ok_or_else(|| GenerateError::UnknownProvider(s.trim().to_string())),
        }
    }
}

/// How an overridden column gets its values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Override {
    /// The same value in every row.
    Fixed(Value),
    /// A random choice per row.
    List(Vec<Value>),
    /// A fresh fake value per row.
    Faker(Provider),
    /// A random integer per row, bounds inclusive.
    Range {
        /// Lower bound.
        min: i64,
        /// Upper bound.
        max: i64,
    },
}

impl Override {
    /// Produces the value for row `index`.
    pub fn value(&self, rng: &mut StdRng, index: usize) -> Value {
        match self {
            Self::Fixed(value) => value.clone(),
            Self::List(choices) if choices.is_empty() => Value::Null,
            Self::List(choices) => choices[rng.random_range(0..choices.len())].clone(),
            Self::Faker(provider) => provider.generate(rng, index),
            Self::Range { min, max } => {
                let (lo, hi) = if min <= max { (*min, *max) } else { (*max, *min) };
                Value::Integer(rng.random_range(lo..=hi))
            }
        }
    }
}

impl fmt::Display for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(value) => write!(f, "'{value}'"),
            Self::List(choices) => {
                let items: Vec<String> = choices.iter().map(ToString::to_string).collect();
                write!(f, "list [{}]", items.join(", "))
            }
            Self::Faker(provider) => write!(f, "faker provider {provider}"),
            Self::Range { min, max } => write!(f, "range {min}..={max}"),
        }
    }
}
