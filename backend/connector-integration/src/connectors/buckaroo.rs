pub mod constants;
pub mod transformers;

use domain_types::{
    errors::{ConnectorError, CustomResult},
    order::CreditMemo,
    records::{Channel, RequestMethod, ServiceAction, ServiceEnvelope, TransactionRequest},
    sources::{
        CarrierAddressSource, CartSource, ConfigSource, GatewaySubmitter, OrderSource,
        TaxRateProvider, TransactionResult,
    },
};
use error_stack::report;

/// Klarna order flavors offered by the gateway: `Pay` settles immediately,
/// `Reserve` authorizes for later capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KlarnaFlow {
    Pay,
    Reserve,
}

/// Hooks a payment method exposes to the transaction builders.
pub trait RequestParameterProvider {
    fn payment_method_name(&self) -> &'static str;
    fn order_action(&self) -> ServiceAction;

    fn refund_action(&self) -> ServiceAction {
        ServiceAction::Refund
    }

    fn can_refund_partial_per_invoice(&self) -> bool {
        false
    }
}

/// The Klarna pay-later method.
#[derive(Debug, Clone, Copy)]
pub struct Klarna {
    flow: KlarnaFlow,
}

impl Klarna {
    pub fn new(flow: KlarnaFlow) -> Self {
        Self { flow }
    }
}

impl Default for Klarna {
    fn default() -> Self {
        Self::new(KlarnaFlow::Pay)
    }
}

impl RequestParameterProvider for Klarna {
    fn payment_method_name(&self) -> &'static str {
        constants::KLARNA_PAYMENT_METHOD_NAME
    }

    fn order_action(&self) -> ServiceAction {
        match self.flow {
            KlarnaFlow::Pay => ServiceAction::Pay,
            KlarnaFlow::Reserve => ServiceAction::Reserve,
        }
    }

    fn can_refund_partial_per_invoice(&self) -> bool {
        true
    }
}

/// Assembles the one-shot order transaction request.
#[tracing::instrument(skip_all, fields(order_id = %order.increment_id()))]
pub fn build_order_transaction<M, O, C, K, T, A>(
    method: &M,
    order: &O,
    cart: &C,
    config: &K,
    tax_rates: &T,
    carriers: &A,
) -> CustomResult<TransactionRequest, ConnectorError>
where
    M: RequestParameterProvider,
    O: OrderSource,
    C: CartSource,
    K: ConfigSource,
    T: TaxRateProvider,
    A: CarrierAddressSource,
{
    if order.increment_id().is_empty() {
        return Err(report!(ConnectorError::InvalidTransactionContext));
    }

    let records = transformers::assemble_order_parameters(order, cart, config, tax_rates, carriers)?;

    Ok(TransactionRequest {
        services: ServiceEnvelope {
            name: method.payment_method_name().to_string(),
            action: method.order_action(),
            version: constants::SERVICE_VERSION,
            request_parameter: records,
        },
        method: RequestMethod::TransactionRequest,
        original_transaction_key: None,
        invoice_id: None,
        channel: None,
    })
}

/// Assembles the refund transaction request for a credit memo. The refund
/// carries article records only; billing and shipping parties are not
/// re-derived.
#[tracing::instrument(skip_all, fields(order_id = %order.increment_id()))]
pub fn build_refund_transaction<M, O, K>(
    method: &M,
    order: &O,
    credit_memo: Option<&CreditMemo>,
    config: &K,
) -> CustomResult<TransactionRequest, ConnectorError>
where
    M: RequestParameterProvider,
    O: OrderSource,
    K: ConfigSource,
{
    if order.increment_id().is_empty() {
        return Err(report!(ConnectorError::InvalidTransactionContext));
    }

    let records = transformers::assemble_refund_parameters(credit_memo, config);

    let mut invoice_id = None;
    let mut original_transaction_key = order.original_transaction_key();

    if method.can_refund_partial_per_invoice() {
        if let Some(invoice) = credit_memo.and_then(|memo| memo.invoice_increment_id.clone()) {
            invoice_id = Some(invoice);
            original_transaction_key = order.parent_transaction_id();
        }
    }

    let original_transaction_key = original_transaction_key
        .filter(|key| !key.is_empty())
        .ok_or_else(|| report!(ConnectorError::MissingOriginalTransaction))?;

    Ok(TransactionRequest {
        services: ServiceEnvelope {
            name: method.payment_method_name().to_string(),
            action: method.refund_action(),
            version: constants::SERVICE_VERSION,
            request_parameter: records,
        },
        method: RequestMethod::TransactionRequest,
        original_transaction_key: Some(original_transaction_key),
        invoice_id,
        channel: Some(Channel::Web),
    })
}

/// Builds and submits an order transaction in one step.
pub fn submit_order_transaction<M, O, C, K, T, A, S>(
    method: &M,
    order: &O,
    cart: &C,
    config: &K,
    tax_rates: &T,
    carriers: &A,
    submitter: &S,
) -> CustomResult<TransactionResult, ConnectorError>
where
    M: RequestParameterProvider,
    O: OrderSource,
    C: CartSource,
    K: ConfigSource,
    T: TaxRateProvider,
    A: CarrierAddressSource,
    S: GatewaySubmitter,
{
    let request = build_order_transaction(method, order, cart, config, tax_rates, carriers)?;
    submitter.submit(request)
}
