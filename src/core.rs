pub mod dimensioning;
pub mod load;
pub mod pricing;
pub mod selection;
pub mod system;
pub mod tariff;
