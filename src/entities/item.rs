use rust_decimal::Decimal;

use crate::model::EntityKind;

pub static KIND: EntityKind = EntityKind::collection(
    "Items",
    "Item",
    "ItemID",
    &[
        "Code",
        "InventoryAssetAccountCode",
        "Name",
        "IsSold",
        "IsPurchased",
        "Description",
        "PurchaseDescription",
        "PurchaseDetails",
        "SalesDetails",
        "IsTrackedAsInventory",
        "TotalCostPool",
        "QuantityOnHand",
        "UpdatedDateUTC",
    ],
);

entity! {
    /// A product or service that can be used on lines.
    Item => KIND
}

impl Item {
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.str("Code")
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str("Name")
    }

    #[must_use]
    pub fn quantity_on_hand(&self) -> Option<Decimal> {
        self.decimal("QuantityOnHand")
    }

    /// The sale price, read from the nested `SalesDetails` map.
    #[must_use]
    pub fn sales_unit_price(&self) -> Option<Decimal> {
        let price = self.attribute("SalesDetails")?.get("UnitPrice")?;
        match price {
            serde_json::Value::String(text) => text.parse().ok(),
            serde_json::Value::Number(number) => number.to_string().parse().ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Entity;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn untyped_nested_maps_stay_attributes() {
        let item = Item::from_attributes(json!({
            "Code": "BOOK",
            "SalesDetails": { "UnitPrice": "19.9500", "AccountCode": "200" }
        }));
        assert_eq!(item.code(), Some("BOOK"));
        assert_eq!(item.sales_unit_price(), Some(dec!(19.95)));
        assert!(item.relationships().is_empty());
    }
}
