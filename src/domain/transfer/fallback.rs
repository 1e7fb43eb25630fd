//! Fixed demo data returned when the indexer cannot be reached.

use super::wire::{RawContract, RawTransfer, TransferCategory};
use super::{Direction, TaggedTransfer};
use crate::shared::Address;

pub const DEMO_SENT_HASH: &str =
    "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";
pub const DEMO_RECEIVED_HASH: &str =
    "0xabcdef1234567890abcdef1234567890abcdef1234567890abcdef1234567890";

/// One sent native transfer and one received stablecoin transfer, newest first.
pub fn demo_transfers(address: &Address) -> Vec<TaggedTransfer> {
    let sent = RawTransfer {
        hash: DEMO_SENT_HASH.to_string(),
        block_num: "0x1000".to_string(),
        unique_id: None,
        from: address.to_string(),
        to: Some("0xRecipientAddressExample".to_string()),
        value: Some(0.5),
        asset: Some("ETH".to_string()),
        category: TransferCategory::External,
        erc721_token_id: None,
        erc1155_metadata: None,
        token_id: None,
        raw_contract: RawContract::default(),
        metadata: None,
    };
    let received = RawTransfer {
        hash: DEMO_RECEIVED_HASH.to_string(),
        block_num: "0x0FFF".to_string(),
        from: "0xSenderAddressExample".to_string(),
        to: Some(address.to_string()),
        value: Some(100.0),
        asset: Some("USDC".to_string()),
        category: TransferCategory::Erc20,
        ..sent.clone()
    };

    vec![
        TaggedTransfer {
            raw: sent,
            direction: Direction::Sent,
            synthetic: true,
        },
        TaggedTransfer {
            raw: received,
            direction: Direction::Received,
            synthetic: true,
        },
    ]
}
