//! Transaction intents.

use crate::{
    constants::{ESCROW_GAS_LIMIT, FN_CREATE_ESCROW},
    types::{address::Address, escrow::EscrowStatus},
};
use serde::{Deserialize, Serialize};

/// A fully specified, not-yet-submitted request to mutate on-chain state.
///
/// Constructed fresh per user action and consumed exactly once by the wallet
/// session provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionIntent {
    /// Contract the call is addressed to.
    pub receiver: Address,
    /// Native value attached, in smallest-denomination units.
    pub value: String,
    /// Contract endpoint to invoke.
    pub payload_function: String,
    /// Endpoint arguments, in call order.
    pub payload_args: Vec<String>,
    /// Gas limit for the call.
    pub gas_limit: u64,
}

impl TransactionIntent {
    /// Intent funding a new escrow between `seller` and `buyer`.
    ///
    /// `value` is the escrowed amount in smallest-denomination units.
    pub fn create_escrow(
        receiver: Address,
        value: String,
        seller: &Address,
        buyer: &Address,
    ) -> Self {
        Self {
            receiver,
            value,
            payload_function: FN_CREATE_ESCROW.to_owned(),
            payload_args: vec![seller.to_string(), buyer.to_string()],
            gas_limit: ESCROW_GAS_LIMIT,
        }
    }

    /// Intent moving escrow `id` into `target`.
    ///
    /// Returns `None` for targets no endpoint transitions into.
    pub fn update_status(receiver: Address, id: u64, target: EscrowStatus) -> Option<Self> {
        let endpoint = target.update_endpoint()?;
        Some(Self {
            receiver,
            value: "0".to_owned(),
            payload_function: endpoint.to_owned(),
            payload_args: vec![id.to_string()],
            gas_limit: ESCROW_GAS_LIMIT,
        })
    }

    /// Renders the wire payload, `function@arg@...@arg`.
    pub fn data(&self) -> String {
        let mut data = self.payload_function.clone();
        for arg in &self.payload_args {
            data.push('@');
            data.push_str(arg);
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::address::ADDRESS_LEN;

    fn addr(fill: u8) -> Address {
        Address::from_bytes([fill; ADDRESS_LEN]).unwrap()
    }

    #[test]
    fn builds_create_intent() {
        let contract = addr(9);
        let seller = addr(1);
        let buyer = addr(2);
        let intent = TransactionIntent::create_escrow(
            contract.clone(),
            "500000000000000000".to_owned(),
            &seller,
            &buyer,
        );
        assert_eq!(intent.receiver, contract);
        assert_eq!(intent.payload_function, "createEscrow");
        assert_eq!(intent.payload_args, vec![seller.to_string(), buyer.to_string()]);
        assert_eq!(intent.gas_limit, 60_000_000);
        assert_eq!(intent.data(), format!("createEscrow@{seller}@{buyer}"));
    }

    #[test]
    fn builds_status_update_intents() {
        let released = TransactionIntent::update_status(addr(9), 3, EscrowStatus::Released).unwrap();
        assert_eq!(released.payload_function, "releaseEscrow");
        assert_eq!(released.payload_args, vec!["3".to_owned()]);
        assert_eq!(released.value, "0");
        assert_eq!(released.data(), "releaseEscrow@3");

        let cancelled =
            TransactionIntent::update_status(addr(9), 12, EscrowStatus::Cancelled).unwrap();
        assert_eq!(cancelled.payload_function, "cancelEscrow");
        assert_eq!(cancelled.data(), "cancelEscrow@12");

        assert!(TransactionIntent::update_status(addr(9), 1, EscrowStatus::Active).is_none());
    }
}
