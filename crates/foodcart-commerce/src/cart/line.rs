//! Cart line and add-on types.

use crate::error::CommerceError;
use crate::ids::{ItemId, LineId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// An optional extra attached to a line, priced per unit of the line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddOn {
    /// Display name (e.g., "Cheese").
    pub name: String,
    /// What the add-on is made of, shown next to the name.
    #[serde(default)]
    pub composition: String,
    /// Price per unit of the line it is attached to.
    #[serde(alias = "price")]
    pub unit_price: Money,
}

impl AddOn {
    /// Create a new add-on.
    pub fn new(name: impl Into<String>, composition: impl Into<String>, unit_price: Money) -> Self {
        Self {
            name: name.into(),
            composition: composition.into(),
            unit_price,
        }
    }

    /// "<name> (<composition>)" as shown in the cart.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.composition)
    }
}

/// One customized selection of a menu item.
///
/// Fields are read-only from outside the crate: quantity changes go through
/// [`Cart`](crate::cart::Cart) so `line_total` is always
/// `(base_unit_price + Σ add-on prices) * quantity`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CartLine {
    id: LineId,
    item_id: ItemId,
    name: String,
    base_unit_price: Money,
    quantity: i64,
    add_ons: Vec<AddOn>,
    line_total: Money,
    image: String,
}

impl CartLine {
    pub(crate) fn new(
        id: LineId,
        item_id: ItemId,
        name: String,
        base_unit_price: Money,
        quantity: i64,
        add_ons: Vec<AddOn>,
        image: String,
    ) -> Result<Self, CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        let line_total = price_line(base_unit_price, &add_ons, quantity)?;
        Ok(Self {
            id,
            item_id,
            name,
            base_unit_price,
            quantity,
            add_ons,
            line_total,
            image,
        })
    }

    /// Set a new quantity and recompute the total.
    ///
    /// Nothing is written unless the new total could be computed.
    pub(crate) fn set_quantity(&mut self, quantity: i64) -> Result<(), CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        let line_total = price_line(self.base_unit_price, &self.add_ons, quantity)?;
        self.quantity = quantity;
        self.line_total = line_total;
        Ok(())
    }

    /// Cart-unique line id.
    pub fn id(&self) -> &LineId {
        &self.id
    }

    /// Menu item this line was made from.
    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    /// Display name of the dish.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price of one portion without add-ons.
    pub fn base_unit_price(&self) -> Money {
        self.base_unit_price
    }

    /// Number of portions, at least 1.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Add-ons in selection order.
    pub fn add_ons(&self) -> &[AddOn] {
        &self.add_ons
    }

    /// `(base_unit_price + add-ons) * quantity`.
    pub fn line_total(&self) -> Money {
        self.line_total
    }

    /// Image reference or URL.
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Price of a single unit including add-ons.
    pub fn unit_price(&self) -> Money {
        // Already validated when the line was priced.
        unit_price(self.base_unit_price, &self.add_ons).unwrap_or(self.base_unit_price)
    }
}

/// Base price plus every add-on price.
pub fn unit_price(base: Money, add_ons: &[AddOn]) -> Result<Money, CommerceError> {
    add_ons.iter().try_fold(base, |acc, add_on| {
        acc.checked_add(add_on.unit_price)
            .ok_or(CommerceError::Overflow)
    })
}

/// `(base + Σ add-ons) * quantity`.
pub fn price_line(base: Money, add_ons: &[AddOn], quantity: i64) -> Result<Money, CommerceError> {
    unit_price(base, add_ons)?
        .checked_mul(quantity)
        .ok_or(CommerceError::Overflow)
}
