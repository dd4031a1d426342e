//! Gateway constants for the Buckaroo Klarna method.

/// Klarna rejects carts with more article groups than this; items beyond
/// the cap are dropped from the payload.
pub const KLARNA_MAX_ARTICLE_COUNT: u32 = 99;

pub const KLARNA_PAYMENT_METHOD_NAME: &str = "klarna";

/// Protocol version sent in the service envelope.
pub const SERVICE_VERSION: u8 = 0;

/// Store config key: catalog prices are entered tax-inclusive.
pub const TAX_CALCULATION_INCLUDES_TAX: &str = "tax/calculation/price_includes_tax";
/// Store config key: shipping prices are entered tax-inclusive.
pub const TAX_CALCULATION_SHIPPING_INCLUDES_TAX: &str = "tax/calculation/shipping_includes_tax";
/// Store config key: tax class applied to shipping.
pub const SHIPPING_TAX_CLASS: &str = "tax/classes/shipping_tax_class";

pub const SHIPPING_LINE_DESCRIPTION: &str = "Shipping fee";
/// Discount line description shown on the Klarna invoice.
pub const DISCOUNT_LINE_DESCRIPTION: &str = "Korting";
/// Payment-fee line description shown on the Klarna invoice.
pub const PAYMENT_FEE_LINE_DESCRIPTION: &str = "Servicekosten";

pub const BUSINESS_CATEGORY_B2C: &str = "B2C";
