//! Wire types for coin market responses (REST).

use crate::shared::SortOrder;
use serde::{Deserialize, Serialize};

/// Query string of `GET /coins/markets`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketsQuery {
    pub vs_currency: &'static str,
    pub order: SortOrder,
    pub per_page: u32,
    pub page: u32,
    /// Asks the upstream to inline the 7-day hourly price series.
    pub sparkline: bool,
}

/// Raw 7-day sparkline block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SparklineResponse {
    #[serde(default)]
    pub price: Option<Vec<f64>>,
}

/// One element of the `/coins/markets` array.
///
/// Every field the dashboard needs is optional here so a single bad record
/// produces a validation error naming what is missing, rather than an opaque
/// decode failure. Fields the dashboard does not use are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoinMarketResponse {
    pub id: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub current_price: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub sparkline_in_7d: Option<SparklineResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_encodes_upstream_tokens() {
        let query = MarketsQuery {
            vs_currency: "usd",
            order: SortOrder::MarketCapDesc,
            per_page: 10,
            page: 1,
            sparkline: true,
        };
        let qs = serde_urlencoded::to_string(&query).unwrap();
        assert_eq!(
            qs,
            "vs_currency=usd&order=market_cap_desc&per_page=10&page=1&sparkline=true"
        );
    }

    #[test]
    fn test_coin_market_deserialize_ignores_extra_fields() {
        let json = r#"{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
            "current_price": 64012.5,
            "market_cap": 1261000000000,
            "market_cap_rank": 1,
            "total_volume": 31000000000,
            "ath_date": "2024-03-14T07:10:36.635Z",
            "roi": null,
            "circulating_supply": 19700000.0,
            "sparkline_in_7d": { "price": [63000.1, 63500.2, 64012.5] }
        }"#;
        let coin: CoinMarketResponse = serde_json::from_str(json).unwrap();
        assert_eq!(coin.id.as_deref(), Some("bitcoin"));
        assert_eq!(coin.current_price, Some(64012.5));
        assert_eq!(
            coin.sparkline_in_7d.unwrap().price.unwrap(),
            vec![63000.1, 63500.2, 64012.5]
        );
    }

    #[test]
    fn test_coin_market_missing_fields_deserialize_as_none() {
        let coin: CoinMarketResponse = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert!(coin.name.is_none());
        assert!(coin.current_price.is_none());
        assert!(coin.sparkline_in_7d.is_none());
    }

    #[test]
    fn test_unused_fields_with_odd_types_are_ignored() {
        let json = r#"{
            "id": "weird",
            "symbol": 42,
            "market_cap": "n/a",
            "market_cap_rank": -1,
            "name": "Weird",
            "image": "https://example.com/w.png",
            "current_price": 1.0,
            "circulating_supply": 2.0,
            "sparkline_in_7d": { "price": [] }
        }"#;
        let coin: CoinMarketResponse = serde_json::from_str(json).unwrap();
        assert_eq!(coin.name.as_deref(), Some("Weird"));
    }

    #[test]
    fn test_coin_market_wrong_type_fails() {
        let result = serde_json::from_str::<CoinMarketResponse>(r#"{"id": "x", "current_price": "cheap"}"#);
        assert!(result.is_err());
    }
}
