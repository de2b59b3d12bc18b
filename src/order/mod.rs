pub mod basket;
pub mod checkout;
