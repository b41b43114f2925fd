use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{PriceSeries, Ticker, ValidationError};

/// Opaque security identifier, unique within one screening run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SecurityId(String);

impl SecurityId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySecurityId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SecurityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for SecurityId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SecurityId> for String {
    fn from(value: SecurityId) -> Self {
        value.0
    }
}

/// One security under screening: identity, descriptive metadata, and its
/// OHLC history. Constructed by the caller per run; never mutated by the
/// engine. Deserialization routes through [`Security::new`] so metadata
/// validation holds on every input path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SecurityRecord")]
pub struct Security {
    pub id: SecurityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<Ticker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub bars: PriceSeries,
}

/// Unvalidated wire shape of a [`Security`].
#[derive(Deserialize)]
struct SecurityRecord {
    id: SecurityId,
    name: String,
    #[serde(default)]
    ticker: Option<Ticker>,
    #[serde(default)]
    isin: Option<String>,
    #[serde(default)]
    currency: Option<String>,
    bars: PriceSeries,
}

impl Security {
    pub fn new(
        id: SecurityId,
        name: impl Into<String>,
        ticker: Option<Ticker>,
        isin: Option<String>,
        currency: Option<String>,
        bars: PriceSeries,
    ) -> Result<Self, ValidationError> {
        let isin = match isin {
            Some(code) => Some(validate_isin(&code)?),
            None => None,
        };
        let currency = match currency {
            Some(code) => Some(validate_currency_code(&code)?),
            None => None,
        };

        Ok(Self {
            id,
            name: name.into(),
            ticker,
            isin,
            currency,
            bars,
        })
    }
}

impl TryFrom<SecurityRecord> for Security {
    type Error = ValidationError;

    fn try_from(record: SecurityRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.id,
            record.name,
            record.ticker,
            record.isin,
            record.currency,
            record.bars,
        )
    }
}

/// ISIN layout per ISO 6166: a 2-letter country prefix, a 9-character
/// alphanumeric body, and a trailing check digit.
fn validate_isin(code: &str) -> Result<String, ValidationError> {
    let invalid = || ValidationError::InvalidIsin {
        value: code.to_owned(),
    };

    let chars: Vec<char> = code.chars().collect();
    if chars.len() != 12 {
        return Err(invalid());
    }
    if !chars[..2].iter().all(char::is_ascii_uppercase) {
        return Err(invalid());
    }
    if !chars[2..11]
        .iter()
        .all(|ch| ch.is_ascii_digit() || ch.is_ascii_uppercase())
    {
        return Err(invalid());
    }
    if !chars[11].is_ascii_digit() {
        return Err(invalid());
    }

    Ok(code.to_owned())
}

fn validate_currency_code(code: &str) -> Result<String, ValidationError> {
    let valid = code.len() == 3 && code.chars().all(|ch| ch.is_ascii_uppercase());
    if !valid {
        return Err(ValidationError::InvalidCurrency {
            value: code.to_owned(),
        });
    }
    Ok(code.to_owned())
}
