use hyperswitch_masking::Secret;
use rust_decimal::Decimal;

/// One cart row as the store exposes it. `row_total` is the net row amount,
/// `row_total_incl_tax` the gross one; which of the two drives the unit
/// price depends on the store's tax-inclusive pricing flag.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub name: String,
    pub sku: String,
    pub quantity: Decimal,
    pub row_total: Decimal,
    pub row_total_incl_tax: Decimal,
    pub tax_percent: Option<Decimal>,
    /// Child rows of bundled/configurable parents are priced through their
    /// parent and never encoded on their own.
    pub has_parent: bool,
}

/// Checkout-form data the payment method stores on the payment.
#[derive(Debug, Clone, Default)]
pub struct PaymentAdditionalData {
    pub terms_accepted: bool,
    /// Raw gender flag from the checkout form; `"1"` means male.
    pub gender_flag: Option<String>,
    pub billing_name: Option<String>,
    pub identification_number: Option<Secret<String>>,
    /// Raw `dd/mm/yyyy` birth date as entered.
    pub birth_date: Option<String>,
    pub telephone: Option<Secret<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// `"1"` marks a male customer; every other value, including an absent
    /// one, maps to female.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("1") => Self::Male,
            _ => Self::Female,
        }
    }
}

/// Shipping-method codes with dedicated pickup-point handling.
#[derive(Debug, Clone, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum ShippingMethod {
    #[strum(serialize = "dpdpickup_dpdpickup")]
    DpdPickup,
    #[strum(serialize = "dhlparcel_servicepoint")]
    DhlServicePoint,
    #[strum(serialize = "sendcloud_sendcloud")]
    Sendcloud,
    #[strum(default)]
    Other(String),
}

/// Credit-memo snapshot used for refund assembly.
#[derive(Debug, Clone)]
pub struct CreditMemo {
    pub items: Vec<CartItem>,
    pub invoice_increment_id: Option<String>,
}
