//! Transaction processing
//!
//! Applies value coercion across every operation of a transaction envelope,
//! producing display/sign-ready payloads shaped by each operation's schema.

use crate::coerce::coerce_field;
use crate::error::WasmSteemError;
use crate::registry::OperationRegistry;
use crate::types::{ConversionContext, Operation, ProcessedOperation, Transaction, TransactionEnvelope};
use indexmap::IndexMap;

/// Coerce a single operation against its schema
///
/// The output carries exactly the schema's fields; payload keys the schema
/// does not declare are dropped.
pub fn process_operation(
    registry: &OperationRegistry,
    operation: &Operation,
    ctx: &ConversionContext,
) -> Result<ProcessedOperation, WasmSteemError> {
    let Operation(name, payload) = operation;
    let schema = &registry.require(name)?.schema;

    let processed: IndexMap<_, _> = schema
        .iter()
        .map(|(key, spec)| (key.clone(), coerce_field(spec, payload.get(key), ctx)))
        .collect();

    Ok(ProcessedOperation(name.clone(), processed))
}

/// Coerce every operation of `envelope`
///
/// Fails on the first operation that is not in the registry.
pub fn process_transaction(
    registry: &OperationRegistry,
    envelope: &TransactionEnvelope,
    ctx: &ConversionContext,
) -> Result<TransactionEnvelope<ProcessedOperation>, WasmSteemError> {
    let operations = envelope
        .tx
        .operations
        .iter()
        .map(|op| process_operation(registry, op, ctx))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TransactionEnvelope {
        tx: Transaction {
            operations,
            extra: envelope.tx.extra.clone(),
        },
        extra: envelope.extra.clone(),
    })
}
