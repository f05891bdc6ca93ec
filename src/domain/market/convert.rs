//! Conversion: CoinMarketResponse → RawMarketRecord (TryFrom + validation),
//! RawMarketRecord → MarketEntity (total).

use super::wire;
use super::{MarketEntity, RawMarketRecord, ValidationError};
use crate::shared::CurrencyCode;

impl TryFrom<wire::CoinMarketResponse> for RawMarketRecord {
    type Error = ValidationError;

    fn try_from(source: wire::CoinMarketResponse) -> Result<Self, Self::Error> {
        let mut errors: Vec<ValidationError> = Vec::new();
        let label = source
            .id
            .clone()
            .or_else(|| source.name.clone())
            .unwrap_or_else(|| "<unknown>".to_string());

        let id = source.id.unwrap_or_else(|| {
            errors.push(ValidationError::MissingId);
            String::new()
        });
        let name = source.name.unwrap_or_else(|| {
            errors.push(ValidationError::MissingName);
            String::new()
        });
        let image = source.image.unwrap_or_else(|| {
            errors.push(ValidationError::MissingImage);
            String::new()
        });
        let current_price = source.current_price.unwrap_or_else(|| {
            errors.push(ValidationError::MissingCurrentPrice);
            0.0
        });
        let circulating_supply = source.circulating_supply.unwrap_or_else(|| {
            errors.push(ValidationError::MissingCirculatingSupply);
            0.0
        });
        let sparkline = source
            .sparkline_in_7d
            .and_then(|s| s.price)
            .unwrap_or_else(|| {
                errors.push(ValidationError::MissingSparkline);
                Vec::new()
            });

        if !current_price.is_finite() {
            errors.push(ValidationError::NonFinite("current price"));
        }
        if !circulating_supply.is_finite() {
            errors.push(ValidationError::NonFinite("circulating supply"));
        }

        if !errors.is_empty() {
            return Err(ValidationError::Multiple(label, errors));
        }

        Ok(RawMarketRecord {
            id: id.into(),
            name,
            image,
            current_price,
            circulating_supply,
            sparkline: sparkline.into(),
        })
    }
}

impl MarketEntity {
    /// Tags a record with the currency its request was made in.
    ///
    /// The upstream record does not say which currency its prices are in, so
    /// the caller passes the one it asked for. The raw series is carried over
    /// untouched; windowing happens when a chart is drawn.
    pub fn from_raw(raw: RawMarketRecord, currency: CurrencyCode) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            image: raw.image,
            currency,
            current_price: raw.current_price,
            circulating_supply: raw.circulating_supply,
            time_series: raw.sparkline,
        }
    }
}

/// Validates a whole page. The first bad record fails the page, since a
/// partial page would no longer match the requested sort and size.
pub(crate) fn validate_page(
    page: Vec<wire::CoinMarketResponse>,
) -> Result<Vec<RawMarketRecord>, ValidationError> {
    page.into_iter().map(RawMarketRecord::try_from).collect()
}
