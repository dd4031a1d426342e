//! Transformation of store order snapshots into Buckaroo parameter records.

use std::str::FromStr;

use domain_types::{
    address::{split_street, OrderAddress, PickupLocation, StreetDecomposition},
    errors::{ConnectorError, CustomResult},
    order::{CartItem, CreditMemo, Gender, PaymentAdditionalData, ShippingMethod},
    records::{ParameterRecord, ParameterValue, RecordGroup, RecordSet},
    sources::{CarrierAddressSource, CartSource, ConfigSource, OrderSource, ServicePointCarrier, TaxRateProvider},
    utils::{missing_field_err, normalize_birth_date},
};
use hyperswitch_masking::{PeekInterface, Secret};
use rust_decimal::{Decimal, RoundingStrategy};

use super::constants;

/// Which customer group a party encodes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyRole {
    Billing,
    Shipping,
}

impl PartyRole {
    fn group(self) -> RecordGroup {
        match self {
            Self::Billing => RecordGroup::BillingCustomer,
            Self::Shipping => RecordGroup::ShippingCustomer,
        }
    }
}

/// Person + address aggregate feeding the party encoder.
#[derive(Debug, Clone)]
pub struct Party {
    pub first_name: Secret<String>,
    pub last_name: Secret<String>,
    pub gender: Gender,
    pub street: Secret<StreetDecomposition>,
    pub postal_code: Secret<String>,
    pub city: String,
    pub country_code: String,
    pub email: Secret<String>,
    pub phone: Option<Secret<String>>,
    pub identification_number: Option<Secret<String>>,
    pub birth_date: Option<String>,
}

impl Party {
    /// Billing party: carries the checkout-form identification and birth
    /// data in addition to the address.
    pub fn billing(address: &OrderAddress, additional: &PaymentAdditionalData) -> Self {
        let phone = additional
            .telephone
            .clone()
            .filter(|phone| !phone.peek().is_empty())
            .or_else(|| address.telephone.clone());

        Self {
            first_name: address.first_name.clone(),
            last_name: address.last_name.clone(),
            gender: Gender::from_flag(additional.gender_flag.as_deref()),
            street: Secret::new(split_street(address.street.peek())),
            postal_code: address.postal_code.clone(),
            city: address.city.clone(),
            country_code: address.country_code.clone(),
            email: address.email.clone(),
            phone: phone.filter(|phone| !phone.peek().is_empty()),
            identification_number: additional.identification_number.clone(),
            birth_date: additional
                .birth_date
                .as_deref()
                .filter(|raw| !raw.is_empty())
                .map(normalize_birth_date),
        }
    }

    /// Shipping party: same address handling, but identification and birth
    /// data stay on the billing group only.
    pub fn shipping(address: &OrderAddress, additional: &PaymentAdditionalData) -> Self {
        Self {
            identification_number: None,
            birth_date: None,
            ..Self::billing(address, additional)
        }
    }
}

/// Encodes one party into its customer record group.
///
/// The core field order is part of the wire contract; conditional fields
/// follow in the order the gateway documents them. Party groups carry an
/// empty group index, a transaction has at most one of each.
pub fn build_party_records(role: PartyRole, party: &Party) -> Vec<ParameterRecord> {
    let group = role.group();
    let street = party.street.peek();

    let mut records = vec![
        party_record(group, "Category", constants::BUSINESS_CATEGORY_B2C),
        party_record(group, "FirstName", party.first_name.peek().clone()),
        party_record(group, "LastName", party.last_name.peek().clone()),
        party_record(group, "Gender", party.gender.to_string()),
        party_record(group, "Street", street.street.clone()),
        party_record(group, "PostalCode", party.postal_code.peek().clone()),
        party_record(group, "City", party.city.clone()),
        party_record(group, "Country", party.country_code.clone()),
        party_record(group, "Email", party.email.peek().clone()),
    ];

    if let Some(phone) = &party.phone {
        records.push(party_record(group, "Phone", phone.peek().clone()));
    }
    if let Some(number) = &street.house_number {
        records.push(party_record(group, "StreetNumber", number.clone()));
    }
    if let Some(suffix) = &street.number_suffix {
        records.push(party_record(group, "StreetNumberAdditional", suffix.clone()));
    }
    if party.country_code == "FI" {
        if let Some(identification) = &party.identification_number {
            records.push(party_record(
                group,
                "IdentificationNumber",
                identification.peek().clone(),
            ));
        }
    }
    if let Some(birth_date) = &party.birth_date {
        records.push(party_record(group, "BirthDate", birth_date.clone()));
    }

    records
}

fn party_record(
    group: RecordGroup,
    name: &str,
    value: impl Into<ParameterValue>,
) -> ParameterRecord {
    ParameterRecord {
        value: value.into(),
        name: name.to_string(),
        group,
        group_index: None,
    }
}

/// One merchandise, fee, or discount entry of the article list.
#[derive(Debug, Clone)]
pub struct ArticleLine {
    pub description: String,
    pub identifier: String,
    pub quantity: Decimal,
    pub gross_unit_price: Decimal,
    pub vat_percent: Option<Decimal>,
}

/// Encodes one article line as its fixed five-record group. An absent VAT
/// percentage goes out as an empty value, not as zero.
pub fn build_article_records(group_index: u32, line: &ArticleLine) -> Vec<ParameterRecord> {
    let vat = line
        .vat_percent
        .map(ParameterValue::Amount)
        .unwrap_or_else(|| ParameterValue::Text(String::new()));

    vec![
        article_record(group_index, "Description", line.description.clone().into()),
        article_record(group_index, "Identifier", line.identifier.clone().into()),
        article_record(group_index, "Quantity", line.quantity.into()),
        article_record(group_index, "GrossUnitPrice", line.gross_unit_price.into()),
        article_record(group_index, "VatPercentage", vat),
    ]
}

fn article_record(group_index: u32, name: &str, value: ParameterValue) -> ParameterRecord {
    ParameterRecord {
        value,
        name: name.to_string(),
        group: RecordGroup::Article,
        group_index: Some(group_index),
    }
}

fn merchandise_line(item: &CartItem, includes_tax: bool) -> ArticleLine {
    ArticleLine {
        description: item.name.clone(),
        identifier: item.sku.clone(),
        quantity: item.quantity,
        gross_unit_price: gross_unit_price(item, includes_tax),
        vat_percent: Some(item.tax_percent.unwrap_or(Decimal::ZERO)),
    }
}

/// Gross unit price of a cart row. Tax-inclusive stores already carry the
/// gross row total; tax-exclusive stores need the net row grossed up by the
/// item VAT first.
fn gross_unit_price(item: &CartItem, includes_tax: bool) -> Decimal {
    let gross_row = if includes_tax {
        item.row_total_incl_tax
    } else {
        let vat = item.tax_percent.unwrap_or(Decimal::ZERO);
        item.row_total * (Decimal::ONE + vat / Decimal::ONE_HUNDRED)
    };

    if item.quantity.is_zero() {
        return Decimal::ZERO;
    }
    round_money(gross_row / item.quantity)
}

/// Two-decimal rounding with the midpoint away from zero, matching how the
/// store rounds the amounts it displays.
fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Builds the complete article section: merchandise first, then the
/// synthetic payment-fee, shipping and discount lines, each on a fresh
/// sequential group index.
pub fn assemble_article_records<O, C, K, T>(
    order: &O,
    cart: &C,
    config: &K,
    tax_rates: &T,
) -> CustomResult<RecordSet, ConnectorError>
where
    O: OrderSource,
    C: CartSource,
    K: ConfigSource,
    T: TaxRateProvider,
{
    let includes_tax = config.get_flag(constants::TAX_CALCULATION_INCLUDES_TAX);
    let items = cart.items()?;

    let mut records = RecordSet::new();
    let mut next_key: u32 = 0;

    for item in &items {
        if item.has_parent || item.row_total_incl_tax <= Decimal::ZERO {
            continue;
        }
        if next_key >= constants::KLARNA_MAX_ARTICLE_COUNT {
            tracing::debug!(
                cap = constants::KLARNA_MAX_ARTICLE_COUNT,
                "article cap reached, dropping remaining cart items"
            );
            break;
        }
        next_key += 1;
        records.append(build_article_records(
            next_key,
            &merchandise_line(item, includes_tax),
        ));
    }

    let payment_fee = order.payment_fee();
    if payment_fee > Decimal::ZERO {
        next_key += 1;
        records.append(build_article_records(
            next_key,
            &ArticleLine {
                description: constants::PAYMENT_FEE_LINE_DESCRIPTION.to_string(),
                identifier: "1".to_string(),
                quantity: Decimal::ONE,
                gross_unit_price: round_money(payment_fee),
                vat_percent: Some(order.payment_fee_tax_percent().unwrap_or(Decimal::ZERO)),
            },
        ));
    }

    let shipping_amount = order.shipping_amount();
    if shipping_amount > Decimal::ZERO {
        let tax_class = config
            .get_value(constants::SHIPPING_TAX_CLASS)
            .ok_or_else(missing_field_err(constants::SHIPPING_TAX_CLASS))?;
        let shipping_rate = tax_rates.rate_for(&tax_class)?;
        next_key += 1;
        records.append(build_article_records(
            next_key,
            &ArticleLine {
                description: constants::SHIPPING_LINE_DESCRIPTION.to_string(),
                identifier: "1".to_string(),
                quantity: Decimal::ONE,
                gross_unit_price: shipping_amount,
                vat_percent: Some(shipping_rate),
            },
        ));
    }

    let discount = order.discount_amount();
    if discount < Decimal::ZERO {
        next_key += 1;
        records.append(build_article_records(
            next_key,
            &ArticleLine {
                description: constants::DISCOUNT_LINE_DESCRIPTION.to_string(),
                identifier: "1".to_string(),
                quantity: Decimal::ONE,
                gross_unit_price: round_money(discount),
                vat_percent: Some(Decimal::ZERO),
            },
        ));
    }

    Ok(records)
}

/// Article records for a credit memo's refundable lines. Child rows and
/// zero rows are excluded and the merchandise cap applies, as on the order
/// side.
pub fn assemble_refund_parameters<K>(credit_memo: Option<&CreditMemo>, config: &K) -> RecordSet
where
    K: ConfigSource,
{
    let mut records = RecordSet::new();
    let Some(memo) = credit_memo else {
        return records;
    };

    let includes_tax = config.get_flag(constants::TAX_CALCULATION_INCLUDES_TAX);
    let mut next_key: u32 = 0;

    for item in &memo.items {
        if item.has_parent || item.row_total_incl_tax <= Decimal::ZERO {
            continue;
        }
        if next_key >= constants::KLARNA_MAX_ARTICLE_COUNT {
            break;
        }
        next_key += 1;
        records.append(build_article_records(
            next_key,
            &merchandise_line(item, includes_tax),
        ));
    }

    records
}

/// Field patch for an already-encoded shipping customer group.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressFieldPatch {
    pub name: &'static str,
    pub value: ParameterValue,
}

/// Replacement shipping address, resolved before the party encoder runs. A
/// pickup address attached to the quote wins over the order's own shipping
/// address; a missing shipping address falls back to billing.
pub fn resolve_shipping_address<O, C>(
    order: &O,
    cart: &C,
) -> CustomResult<OrderAddress, ConnectorError>
where
    O: OrderSource,
    C: CartSource,
{
    if let Some(pickup) = cart.pickup_address()? {
        if !pickup.street.peek().is_empty() {
            return Ok(pickup);
        }
    }
    match order.shipping_address() {
        Some(address) => Ok(address),
        None => order.billing_address(),
    }
}

/// Patch list for carrier-managed pickup points, applied after encoding.
/// Carriers are checked independently; each match patches the shipping
/// group field-by-field.
pub fn resolve_shipping_patches<O, C, A>(
    order: &O,
    cart: &C,
    carriers: &A,
) -> CustomResult<Vec<AddressFieldPatch>, ConnectorError>
where
    O: OrderSource,
    C: CartSource,
    A: CarrierAddressSource,
{
    let method = order
        .shipping_method()
        .map(|code| ShippingMethod::from_str(&code).unwrap_or(ShippingMethod::Other(code)));

    let mut patches = Vec::new();

    match method {
        Some(ShippingMethod::DpdPickup) => {
            if let Some(reference) = cart.parcel_locker_reference() {
                if let Some(location) = carriers.parcel_locker_address(&reference)? {
                    patches.extend(pickup_location_patches(&location));
                }
            }
        }
        Some(ShippingMethod::DhlServicePoint) => {
            if let Some(service_point_id) = order.dhl_service_point_id() {
                if let Some(location) = carriers
                    .service_point_address(ServicePointCarrier::DhlParcel, &service_point_id)?
                {
                    patches.extend(pickup_location_patches(&location));
                }
            }
        }
        Some(ShippingMethod::Sendcloud) => {
            if let Some(service_point_id) = order.sendcloud_service_point_id() {
                if let Some(location) = carriers
                    .service_point_address(ServicePointCarrier::Sendcloud, &service_point_id)?
                {
                    patches.extend(pickup_location_patches(&location));
                }
            }
        }
        _ => {}
    }

    // MyParcel stores its pickup selection on the order independently of the
    // shipping-method code.
    if let Some(location) = order.myparcel_pickup_location() {
        patches.extend(pickup_location_patches(&location));
    }

    Ok(patches)
}

/// Maps a pickup location onto shipping-group field patches. Empty source
/// fields are skipped so they never blank out an encoded value.
fn pickup_location_patches(location: &PickupLocation) -> Vec<AddressFieldPatch> {
    let mut mapping: Vec<(&'static str, String)> = vec![
        ("Street", location.street.peek().clone()),
        ("PostalCode", location.postal_code.peek().clone()),
        ("City", location.city.clone()),
        ("Country", location.country_code.clone()),
    ];
    if let Some(number) = &location.house_number {
        mapping.push(("StreetNumber", number.peek().clone()));
    }
    if let Some(suffix) = &location.number_suffix {
        mapping.push(("StreetNumberAdditional", suffix.peek().clone()));
    }

    mapping
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| AddressFieldPatch {
            name,
            value: ParameterValue::Text(value),
        })
        .collect()
}

pub fn apply_shipping_patches(records: &mut RecordSet, patches: Vec<AddressFieldPatch>) {
    for patch in patches {
        records.patch(RecordGroup::ShippingCustomer, patch.name, patch.value);
    }
}

fn addresses_differ(billing: &OrderAddress, shipping: &OrderAddress) -> bool {
    billing.first_name.peek() != shipping.first_name.peek()
        || billing.last_name.peek() != shipping.last_name.peek()
        || billing.street.peek() != shipping.street.peek()
        || billing.postal_code.peek() != shipping.postal_code.peek()
        || billing.city != shipping.city
        || billing.country_code != shipping.country_code
}

/// Full parameter list for an order transaction: billing group, the
/// shipping group when it is distinct, carrier patches, article groups.
pub fn assemble_order_parameters<O, C, K, T, A>(
    order: &O,
    cart: &C,
    config: &K,
    tax_rates: &T,
    carriers: &A,
) -> CustomResult<RecordSet, ConnectorError>
where
    O: OrderSource,
    C: CartSource,
    K: ConfigSource,
    T: TaxRateProvider,
    A: CarrierAddressSource,
{
    tracing::debug!(shipping_method = ?order.shipping_method(), "assembling order parameters");

    let additional = order.additional_information();
    let billing = order.billing_address()?;

    let mut records = RecordSet::new();
    records.append(build_party_records(
        PartyRole::Billing,
        &Party::billing(&billing, &additional),
    ));

    let needs_shipping_group = match order.shipping_address() {
        Some(shipping) => addresses_differ(&billing, &shipping),
        None => true,
    };
    if needs_shipping_group {
        let resolved = resolve_shipping_address(order, cart)?;
        records.append(build_party_records(
            PartyRole::Shipping,
            &Party::shipping(&resolved, &additional),
        ));
    }

    let patches = resolve_shipping_patches(order, cart, carriers)?;
    apply_shipping_patches(&mut records, patches);

    let articles = assemble_article_records(order, cart, config, tax_rates)?;
    records.append(articles.into_records());

    Ok(records)
}
