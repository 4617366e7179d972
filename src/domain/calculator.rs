//! Crypto property investment calculator.
//!
//! Prices are a static snapshot; nothing here talks to an exchange.

pub const MIN_YEARS: u32 = 1;
pub const MAX_YEARS: u32 = 20;
pub const MIN_RATE_PERCENT: f64 = 5.0;
pub const MAX_RATE_PERCENT: f64 = 25.0;
/// Monthly rent as a fraction of the property value (6% a year, split over 12 months).
pub const MONTHLY_RENTAL_YIELD: f64 = 0.006;
pub const PROPERTY_VALUE_PRESETS: [f64; 4] = [2_000_000.0, 5_000_000.0, 10_000_000.0, 25_000_000.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CryptoAsset {
    #[default]
    Btc,
    Eth,
    Usdt,
    Xrp,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetQuote {
    pub price: f64,
    pub change_24h_percent: f64,
}

impl CryptoAsset {
    pub const ALL: [CryptoAsset; 4] = [Self::Btc, Self::Eth, Self::Usdt, Self::Xrp];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Btc => "BTC",
            Self::Eth => "ETH",
            Self::Usdt => "USDT",
            Self::Xrp => "XRP",
        }
    }

    pub fn quote(self) -> AssetQuote {
        match self {
            Self::Btc => AssetQuote {
                price: 97_500.0,
                change_24h_percent: 2.4,
            },
            Self::Eth => AssetQuote {
                price: 3_250.0,
                change_24h_percent: 1.8,
            },
            Self::Usdt => AssetQuote {
                price: 1.0,
                change_24h_percent: 0.01,
            },
            Self::Xrp => AssetQuote {
                price: 2.45,
                change_24h_percent: -0.5,
            },
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|asset| asset.symbol().eq_ignore_ascii_case(symbol))
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|asset| *asset == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationInput {
    pub principal: f64,
    pub years: u32,
    pub annual_rate_percent: f64,
    pub asset: CryptoAsset,
}

impl Default for CalculationInput {
    fn default() -> Self {
        Self {
            principal: 5_000_000.0,
            years: 5,
            annual_rate_percent: 12.0,
            asset: CryptoAsset::Btc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationResult {
    pub future_value: f64,
    pub total_return: f64,
    pub monthly_rental: f64,
    pub roi_percent: f64,
    pub units_of_crypto: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearPoint {
    pub year: u32,
    pub value: f64,
    /// Share of the final value, in percent, for bar heights.
    pub relative_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub asset: CryptoAsset,
    pub units: f64,
}

fn future_value(principal: f64, annual_rate_percent: f64, years: u32) -> f64 {
    principal * (1.0 + annual_rate_percent / 100.0).powi(years as i32)
}

pub fn calculate(input: &CalculationInput) -> CalculationResult {
    let future_value = future_value(input.principal, input.annual_rate_percent, input.years);
    let total_return = future_value - input.principal;
    let roi_percent = if input.principal == 0.0 {
        0.0
    } else {
        total_return / input.principal * 100.0
    };

    CalculationResult {
        future_value,
        total_return,
        monthly_rental: input.principal * MONTHLY_RENTAL_YIELD,
        roi_percent,
        units_of_crypto: input.principal / input.asset.quote().price,
    }
}

pub fn yearly_projection(input: &CalculationInput) -> Vec<YearPoint> {
    let final_value = future_value(input.principal, input.annual_rate_percent, input.years);

    (1..=input.years)
        .map(|year| {
            let value = future_value(input.principal, input.annual_rate_percent, year);
            let relative_height = if final_value == 0.0 {
                0.0
            } else {
                value / final_value * 100.0
            };
            YearPoint {
                year,
                value,
                relative_height,
            }
        })
        .collect()
}

pub fn conversion_table(principal: f64) -> Vec<Conversion> {
    CryptoAsset::ALL
        .into_iter()
        .map(|asset| Conversion {
            asset,
            units: principal / asset.quote().price,
        })
        .collect()
}

pub fn clamp_years(years: u32) -> u32 {
    years.clamp(MIN_YEARS, MAX_YEARS)
}

pub fn clamp_rate(rate_percent: f64) -> f64 {
    rate_percent.clamp(MIN_RATE_PERCENT, MAX_RATE_PERCENT)
}

/// "AED 8.81M" style label.
pub fn format_millions(value: f64) -> String {
    format!("AED {:.2}M", value / 1_000_000.0)
}
