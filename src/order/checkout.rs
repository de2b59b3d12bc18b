use super::basket::{Basket, LineOrder};
use crate::menu::models::Price;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every unit costs this much under [`PricingMode::Flat`].
pub const FLAT_UNIT_PRICE: Price = Price(1000);

pub const DELIVERY_ADDRESS: &str = "123 Test Address\nSivas, Türkiye";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// Ignores item prices and charges [`FLAT_UNIT_PRICE`] per unit.
    #[default]
    Flat,
    PerItem,
}

impl PricingMode {
    pub fn line_total(&self, order: &LineOrder) -> Price {
        match self {
            Self::Flat => FLAT_UNIT_PRICE.times(order.quantity),
            Self::PerItem => order.item.price.times(order.quantity),
        }
    }
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "flat"),
            Self::PerItem => write!(f, "per_item"),
        }
    }
}

impl FromStr for PricingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(Self::Flat),
            "per_item" => Ok(Self::PerItem),
            other => Err(format!(
                "unknown pricing mode '{}', expected 'flat' or 'per_item'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasketSummary {
    pub item_count: u32,
    pub total: Price,
}

impl BasketSummary {
    pub fn of(basket: &Basket, pricing: PricingMode) -> Self {
        Self {
            item_count: basket.count(),
            total: basket.orders().iter().map(|order| pricing.line_total(order)).sum(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    CashOnDelivery,
    MealCard,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::CreditCard,
        PaymentMethod::CashOnDelivery,
        PaymentMethod::MealCard,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CreditCard => "Kredi Kartı",
            Self::CashOnDelivery => "Kapıda Ödeme",
            Self::MealCard => "Yemek Kartı",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::CreditCard => Self::CashOnDelivery,
            Self::CashOnDelivery => Self::MealCard,
            Self::MealCard => Self::CreditCard,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::CreditCard => Self::MealCard,
            Self::CashOnDelivery => Self::CreditCard,
            Self::MealCard => Self::CashOnDelivery,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("the basket is empty")]
    EmptyBasket,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub summary: BasketSummary,
    pub payment_method: PaymentMethod,
    pub delivery_address: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct Checkout {
    pub payment_method: PaymentMethod,
    pub pricing: PricingMode,
}

impl Checkout {
    pub fn new(pricing: PricingMode) -> Self {
        Self {
            payment_method: PaymentMethod::default(),
            pricing,
        }
    }

    pub fn summary(&self, basket: &Basket) -> BasketSummary {
        BasketSummary::of(basket, self.pricing)
    }

    /// Mock payment: always succeeds for a non-empty basket, which is emptied.
    pub fn confirm(&self, basket: &mut Basket) -> Result<Receipt, CheckoutError> {
        if basket.is_empty() {
            return Err(CheckoutError::EmptyBasket);
        }

        let receipt = Receipt {
            summary: self.summary(basket),
            payment_method: self.payment_method,
            delivery_address: DELIVERY_ADDRESS,
        };
        basket.clear();

        tracing::info!(
            items = receipt.summary.item_count,
            total = %receipt.summary.total,
            method = receipt.payment_method.display_name(),
            "checkout confirmed"
        );
        Ok(receipt)
    }
}
