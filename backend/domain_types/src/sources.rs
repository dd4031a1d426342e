use rust_decimal::Decimal;

use crate::{
    address::{OrderAddress, PickupLocation},
    errors::{ConnectorError, CustomResult},
    order::{CartItem, PaymentAdditionalData},
    records::TransactionRequest,
};

/// Scalar store-configuration lookup.
pub trait ConfigSource {
    fn get_value(&self, key: &str) -> Option<String>;

    fn get_flag(&self, key: &str) -> bool {
        matches!(self.get_value(key).as_deref(), Some("1") | Some("true"))
    }
}

/// Read-only view of the order under assembly.
///
/// Accessors for carrier selections and refund references default to "not
/// set" so sources only implement what their store actually records.
pub trait OrderSource {
    fn increment_id(&self) -> String;
    fn billing_address(&self) -> CustomResult<OrderAddress, ConnectorError>;
    fn shipping_address(&self) -> Option<OrderAddress>;
    fn shipping_method(&self) -> Option<String>;
    /// Gross shipping amount charged on the order.
    fn shipping_amount(&self) -> Decimal;
    /// Gross gateway payment fee charged on the order.
    fn payment_fee(&self) -> Decimal {
        Decimal::ZERO
    }
    fn payment_fee_tax_percent(&self) -> Option<Decimal> {
        None
    }
    /// Sum of applied discounts; negative when a discount applies.
    fn discount_amount(&self) -> Decimal;
    fn dhl_service_point_id(&self) -> Option<String> {
        None
    }
    fn sendcloud_service_point_id(&self) -> Option<String> {
        None
    }
    /// Pickup location selected through MyParcel delivery options.
    fn myparcel_pickup_location(&self) -> Option<PickupLocation> {
        None
    }
    fn parent_transaction_id(&self) -> Option<String> {
        None
    }
    /// Original gateway transaction key stored on the payment.
    fn original_transaction_key(&self) -> Option<String> {
        None
    }
    fn additional_information(&self) -> PaymentAdditionalData;
}

/// Read-only view of the quote/cart the order was placed from.
pub trait CartSource {
    /// Line items in catalog order.
    fn items(&self) -> CustomResult<Vec<CartItem>, ConnectorError>;
    /// Pickup address attached to the quote by the carrier-agnostic pickup
    /// flow.
    fn pickup_address(&self) -> CustomResult<Option<OrderAddress>, ConnectorError>;
    /// Parcel reference set on the quote by a parcel-locker carrier.
    fn parcel_locker_reference(&self) -> Option<String> {
        None
    }
}

pub trait TaxRateProvider {
    fn rate_for(&self, tax_class_id: &str) -> CustomResult<Decimal, ConnectorError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ServicePointCarrier {
    DhlParcel,
    Sendcloud,
}

/// Carrier-specific pickup address lookups.
pub trait CarrierAddressSource {
    fn parcel_locker_address(
        &self,
        parcel_reference: &str,
    ) -> CustomResult<Option<PickupLocation>, ConnectorError>;

    fn service_point_address(
        &self,
        carrier: ServicePointCarrier,
        service_point_id: &str,
    ) -> CustomResult<Option<PickupLocation>, ConnectorError>;
}

/// Gateway acknowledgement for a submitted transaction.
#[derive(Debug, Clone)]
pub struct TransactionResult {
    pub transaction_key: Option<String>,
    pub status_code: u16,
}

/// Transport collaborator the finished request is handed to. Signing,
/// retries and response parsing all live behind this seam.
pub trait GatewaySubmitter {
    fn submit(
        &self,
        request: TransactionRequest,
    ) -> CustomResult<TransactionResult, ConnectorError>;
}
