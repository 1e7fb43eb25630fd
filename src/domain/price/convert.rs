//! Conversion from the price service response to a [`PriceTable`].

use super::wire::SimplePriceResponse;
use super::{PriceTable, TrackedAsset};

impl TryFrom<SimplePriceResponse> for PriceTable {
    type Error = String;

    /// Every tracked asset must carry a finite, non-negative USD price.
    fn try_from(resp: SimplePriceResponse) -> Result<Self, Self::Error> {
        let mut table = PriceTable::zeroed();
        for asset in TrackedAsset::ALL {
            let usd = resp
                .get(asset.price_id())
                .and_then(|q| q.usd)
                .ok_or_else(|| format!("missing usd price for {}", asset.price_id()))?;
            if !usd.is_finite() || usd < 0.0 {
                return Err(format!("invalid usd price for {}: {}", asset.price_id(), usd));
            }
            table.prices.insert(asset, usd);
        }
        Ok(table)
    }
}
