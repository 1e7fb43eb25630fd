//! Wire types for `alchemy_getAssetTransfers`.

use crate::domain::chain::Chain;
use crate::shared::Address;
use serde::{Deserialize, Serialize};

/// Indexer JSON-RPC method.
pub const GET_ASSET_TRANSFERS: &str = "alchemy_getAssetTransfers";

/// Most recent transfers requested per direction, and kept after merging.
pub const MAX_TRANSFERS: usize = 10;

/// Transfer category tag assigned by the indexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferCategory {
    /// Native asset moved by an EOA-initiated transaction.
    External,
    /// Native asset moved by a contract call.
    Internal,
    Erc20,
    Erc721,
    Erc1155,
    Specialnft,
    #[serde(other)]
    Unknown,
}

impl TransferCategory {
    /// Native, fungible-token and both NFT standards.
    pub const QUERIED: [TransferCategory; 4] = [
        TransferCategory::External,
        TransferCategory::Erc20,
        TransferCategory::Erc721,
        TransferCategory::Erc1155,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Query object for `alchemy_getAssetTransfers`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransfersParams {
    pub from_block: String,
    pub to_block: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_address: Option<String>,
    pub category: Vec<TransferCategory>,
    pub with_metadata: bool,
    pub exclude_zero_value: bool,
    /// Hex quantity, e.g. `"0xa"`.
    pub max_count: String,
    pub order: SortOrder,
}

impl AssetTransfersParams {
    fn recent() -> Self {
        Self {
            from_block: "0x0".to_string(),
            to_block: "latest".to_string(),
            from_address: None,
            to_address: None,
            category: TransferCategory::QUERIED.to_vec(),
            with_metadata: true,
            exclude_zero_value: true,
            max_count: crate::shared::to_quantity(MAX_TRANSFERS as u64),
            order: SortOrder::Desc,
        }
    }

    /// Most recent transfers sent by `address`.
    pub fn sent_by(address: &Address) -> Self {
        Self {
            from_address: Some(address.to_string()),
            ..Self::recent()
        }
    }

    /// Most recent transfers received by `address`.
    pub fn received_by(address: &Address) -> Self {
        Self {
            to_address: Some(address.to_string()),
            ..Self::recent()
        }
    }
}

/// `result` member of the response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransfersResult {
    #[serde(default)]
    pub transfers: Vec<RawTransfer>,
    #[serde(default)]
    pub page_key: Option<String>,
}

/// A single transfer as reported by the indexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransfer {
    pub hash: String,
    /// Hex block number.
    pub block_num: String,
    #[serde(default)]
    pub unique_id: Option<String>,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    /// Human-unit value (already divided by decimals); absent for NFTs.
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub asset: Option<String>,
    pub category: TransferCategory,
    #[serde(default)]
    pub erc721_token_id: Option<String>,
    #[serde(default)]
    pub erc1155_metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub token_id: Option<String>,
    #[serde(default)]
    pub raw_contract: RawContract,
    #[serde(default)]
    pub metadata: Option<TransferMetadata>,
}

impl RawTransfer {
    /// Numeric block number; unparseable values count as block 0.
    pub fn block_number(&self) -> u64 {
        crate::shared::parse_quantity(&self.block_num).unwrap_or(0)
    }

    /// Asset symbol, or the chain's native symbol when the indexer leaves it blank.
    pub fn currency(&self, chain: Chain) -> &str {
        self.asset
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(chain.info().native_symbol)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawContract {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub decimal: Option<String>,
}

/// Present when the query sets `withMetadata`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferMetadata {
    #[serde(
        default,
        rename = "blockTimestamp",
        deserialize_with = "crate::shared::serde_util::rfc3339_ms_opt::deserialize",
        skip_serializing
    )]
    pub block_timestamp_ms: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Address {
        Address::parse("0x71c7656ec7ab88b098defb751b7401b5f6d8976f").unwrap()
    }

    #[test]
    fn test_sent_params_shape() {
        let json = serde_json::to_value(AssetTransfersParams::sent_by(&address())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "fromBlock": "0x0",
                "toBlock": "latest",
                "fromAddress": "0x71c7656ec7ab88b098defb751b7401b5f6d8976f",
                "category": ["external", "erc20", "erc721", "erc1155"],
                "withMetadata": true,
                "excludeZeroValue": true,
                "maxCount": "0xa",
                "order": "desc"
            })
        );
    }

    #[test]
    fn test_received_params_omit_from_address() {
        let json = serde_json::to_value(AssetTransfersParams::received_by(&address())).unwrap();
        assert!(json.get("fromAddress").is_none());
        assert_eq!(json["toAddress"], "0x71c7656ec7ab88b098defb751b7401b5f6d8976f");
    }

    #[test]
    fn test_raw_transfer_deserialize() {
        let json = r#"{
            "blockNum": "0x12a05f2",
            "uniqueId": "0xabc:external",
            "hash": "0xabc",
            "from": "0x71c7656ec7ab88b098defb751b7401b5f6d8976f",
            "to": "0x0000000000000000000000000000000000000001",
            "value": 0.25,
            "erc721TokenId": null,
            "erc1155Metadata": null,
            "tokenId": null,
            "asset": "ETH",
            "category": "external",
            "rawContract": {"value": "0x3782dace9d90000", "address": null, "decimal": "0x12"},
            "metadata": {"blockTimestamp": "2024-01-15T10:30:00.000Z"}
        }"#;
        let t: RawTransfer = serde_json::from_str(json).unwrap();
        assert_eq!(t.block_number(), 0x12a05f2);
        assert_eq!(t.value, Some(0.25));
        assert_eq!(t.category, TransferCategory::External);
        assert_eq!(
            t.metadata.unwrap().block_timestamp_ms,
            Some(1_705_314_600_000)
        );
    }

    #[test]
    fn test_unknown_category_tolerated() {
        let t: RawTransfer = serde_json::from_str(
            r#"{"hash":"0x1","blockNum":"0x1","from":"0x","category":"somethingnew"}"#,
        )
        .unwrap();
        assert_eq!(t.category, TransferCategory::Unknown);
        assert!(t.value.is_none());
    }

    #[test]
    fn test_unparseable_block_number_is_zero() {
        let t: RawTransfer = serde_json::from_str(
            r#"{"hash":"0x1","blockNum":"pending","from":"0x","category":"erc20"}"#,
        )
        .unwrap();
        assert_eq!(t.block_number(), 0);
    }
}
