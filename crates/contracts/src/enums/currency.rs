use serde::{Deserialize, Serialize};

/// Supported transaction currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    UAH,
    USD,
    EUR,
}

impl Currency {
    /// Three-letter wire code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::UAH => "UAH",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Currency symbol for compact display
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::UAH => "₴",
            Currency::USD => "$",
            Currency::EUR => "€",
        }
    }

    /// Human-readable name for selects and labels
    pub fn label(&self) -> &'static str {
        match self {
            Currency::UAH => "Гривня (₴)",
            Currency::USD => "Долар США ($)",
            Currency::EUR => "Євро (€)",
        }
    }

    pub fn all() -> Vec<Currency> {
        vec![Currency::UAH, Currency::USD, Currency::EUR]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "UAH" => Some(Currency::UAH),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }
}

impl ToString for Currency {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}
