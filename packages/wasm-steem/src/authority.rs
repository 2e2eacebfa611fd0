//! Required signing authority for a transaction

use crate::registry::OperationRegistry;
use crate::types::{Authority, NamedOperation, Transaction};

/// Minimum authority needed to sign `tx`
///
/// Active is sticky: once any operation needs it, later posting operations
/// do not lower the result. Operations that are unknown to the registry or
/// declare no authority are ignored. `None` means no constraint.
pub fn resolve_authority<O: NamedOperation>(
    registry: &OperationRegistry,
    tx: &Transaction<O>,
) -> Option<Authority> {
    let mut resolved = None;
    for op in &tx.operations {
        match registry.authority_of(op.name()) {
            Some(Authority::Active) => resolved = Some(Authority::Active),
            Some(Authority::Posting) if resolved != Some(Authority::Active) => {
                resolved = Some(Authority::Posting)
            }
            _ => {}
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Operation, Payload};

    fn registry() -> OperationRegistry {
        OperationRegistry::from_json(
            r#"{
                "vote": { "authority": "posting", "schema": {} },
                "transfer": { "authority": "active", "schema": {} },
                "custom": { "schema": {} }
            }"#,
        )
        .unwrap()
    }

    fn tx(names: &[&str]) -> Transaction {
        Transaction::new(
            names
                .iter()
                .map(|name| Operation::new(*name, Payload::new()))
                .collect(),
        )
    }

    #[test]
    fn test_active_wins_regardless_of_order() {
        let registry = registry();
        assert_eq!(
            resolve_authority(&registry, &tx(&["vote", "transfer"])),
            Some(Authority::Active)
        );
        assert_eq!(
            resolve_authority(&registry, &tx(&["transfer", "vote"])),
            Some(Authority::Active)
        );
    }

    #[test]
    fn test_posting_only() {
        assert_eq!(
            resolve_authority(&registry(), &tx(&["vote", "custom", "vote"])),
            Some(Authority::Posting)
        );
    }

    #[test]
    fn test_neutral_operations_resolve_to_none() {
        let registry = registry();
        assert_eq!(resolve_authority(&registry, &tx(&["custom"])), None);
        assert_eq!(resolve_authority(&registry, &tx(&["unknown_op"])), None);
        assert_eq!(resolve_authority(&registry, &tx(&[])), None);
    }
}
