//! Markets sub-client: fetch one page of the listing.

use crate::client::CoinboardClient;
use crate::domain::dashboard::SessionParameters;
use crate::domain::market::{convert, MarketEntity, RawMarketRecord};
use crate::error::{FetchError, SdkError};
use futures_util::future::{AbortRegistration, Abortable};

/// Sub-client for market listing operations.
pub struct Markets<'a> {
    pub(crate) client: &'a CoinboardClient,
}

impl<'a> Markets<'a> {
    /// Fetch and validate one page, without tagging a currency.
    pub async fn fetch_raw(
        &self,
        params: &SessionParameters,
    ) -> Result<Vec<RawMarketRecord>, SdkError> {
        let page = self
            .client
            .http
            .get_coin_markets(&params.query(), &self.client.markets_retry)
            .await?;
        convert::validate_page(page).map_err(|e| SdkError::Validation(e.to_string()))
    }

    /// Fetch the page described by `params` and turn it into table rows.
    ///
    /// Resolves to `FetchError::Cancelled` as soon as the paired
    /// `AbortHandle` fires, without waiting for the response. Row order is
    /// the upstream order.
    pub async fn fetch(
        &self,
        params: &SessionParameters,
        cancel: AbortRegistration,
    ) -> Result<Vec<MarketEntity>, FetchError> {
        match Abortable::new(self.fetch_entities(params), cancel).await {
            Ok(result) => result,
            Err(_aborted) => Err(FetchError::Cancelled),
        }
    }

    async fn fetch_entities(
        &self,
        params: &SessionParameters,
    ) -> Result<Vec<MarketEntity>, FetchError> {
        let page = self
            .client
            .http
            .get_coin_markets(&params.query(), &self.client.markets_retry)
            .await?;

        let records = convert::validate_page(page).map_err(|e| {
            tracing::warn!(error = %e, "Discarding malformed markets page");
            FetchError::Malformed(e.to_string())
        })?;

        tracing::debug!(
            currency = %params.currency,
            sort = %params.sort,
            page = params.page.get(),
            per_page = params.page_size.get(),
            rows = records.len(),
            "Markets page fetched"
        );

        Ok(records
            .into_iter()
            .map(|raw| MarketEntity::from_raw(raw, params.currency))
            .collect())
    }
}
