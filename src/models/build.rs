use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum CaseColor {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceComparison {
    Cheaper,
    MoreExpensive,
    Equal,
}

impl PriceComparison {
    pub fn relative_to(price: i64, baseline: i64) -> Self {
        if price < baseline {
            PriceComparison::Cheaper
        } else if price > baseline {
            PriceComparison::MoreExpensive
        } else {
            PriceComparison::Equal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, sqlx::FromRow)]
pub struct Build {
    #[validate(min_length = 1)]
    pub id: String,
    pub company: String,
    pub title: String,
    pub description: String,
    #[validate(minimum = 0)]
    pub price: i64,
    #[sqlx(skip)]
    #[serde(default)]
    pub price_formatted: String,
    pub cpu: String,
    pub gpu: String,
    pub ram: String,
    pub case_color: Option<CaseColor>,
    pub photo_url: Option<String>,
    pub vk_url: String,
    pub is_our_build: bool,
    pub parsed_at: DateTime<Utc>,
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_comparison: Option<PriceComparison>,
}

impl Build {
    pub fn with_formatted_price(mut self) -> Self {
        self.price_formatted = format_price(self.price);
        self
    }

    /// Attach the price tag relative to a baseline price.
    pub fn tag_against(mut self, baseline_price: i64) -> Self {
        self.price_comparison = Some(PriceComparison::relative_to(self.price, baseline_price));
        self
    }
}

// "189990" -> "189 990 руб."
pub fn format_price(price: i64) -> String {
    let digits = price.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if price < 0 {
        format!("-{} руб.", grouped)
    } else {
        format!("{} руб.", grouped)
    }
}
