//! Static option tables the dashboard selectors are built from.
//!
//! Loaded once with the binary; nothing here changes at runtime.

use super::{CurrencyCode, PageSize, SortOrder};

/// One entry of the currency selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyOption {
    pub value: CurrencyCode,
    pub label: &'static str,
    pub locale: &'static str,
}

/// One entry of the sort selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption {
    pub value: SortOrder,
    pub label: &'static str,
}

pub const CURRENCY_OPTIONS: [CurrencyOption; 3] = [
    CurrencyOption {
        value: CurrencyCode::Usd,
        label: "USD",
        locale: "en-US",
    },
    CurrencyOption {
        value: CurrencyCode::Eur,
        label: "EUR",
        locale: "en-EU",
    },
    CurrencyOption {
        value: CurrencyCode::Brl,
        label: "BRL",
        locale: "pt-BR",
    },
];

pub const SORT_OPTIONS: [SortOption; 2] = [
    SortOption {
        value: SortOrder::MarketCapAsc,
        label: "Market cap ascending",
    },
    SortOption {
        value: SortOrder::MarketCapDesc,
        label: "Market cap descending",
    },
];

pub const PAGE_SIZE_OPTIONS: [PageSize; 5] = [
    PageSize::Five,
    PageSize::Ten,
    PageSize::Twenty,
    PageSize::Fifty,
    PageSize::Hundred,
];

/// Row count the pagination control is sized for. The upstream does not
/// report a total, so the table advertises a fixed one.
pub const TOTAL_RESULTS: u32 = 1000;

/// Looks up the selector entry for a currency.
pub fn currency_option(currency: CurrencyCode) -> CurrencyOption {
    match currency {
        CurrencyCode::Usd => CURRENCY_OPTIONS[0],
        CurrencyCode::Eur => CURRENCY_OPTIONS[1],
        CurrencyCode::Brl => CURRENCY_OPTIONS[2],
    }
}

/// Last page reachable with the given page size.
pub fn last_page(size: PageSize) -> u32 {
    TOTAL_RESULTS.div_ceil(size.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_options_match_formatter_locales() {
        for option in CURRENCY_OPTIONS {
            assert_eq!(currency_option(option.value), option);
            assert_eq!(option.value.locale_tag(), option.locale);
            assert_eq!(option.value.as_str(), option.label);
        }
    }

    #[test]
    fn test_page_size_options_are_sorted_and_unique() {
        let sizes: Vec<u32> = PAGE_SIZE_OPTIONS.iter().map(|s| s.get()).collect();
        assert_eq!(sizes, [5, 10, 20, 50, 100]);
    }

    #[test]
    fn test_last_page() {
        assert_eq!(last_page(PageSize::Ten), 100);
        assert_eq!(last_page(PageSize::Hundred), 10);
        assert_eq!(last_page(PageSize::Fifty), 20);
    }
}
