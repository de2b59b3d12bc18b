use crate::menu::models::{Ingredient, MenuItem};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOrder {
    pub id: Uuid,
    pub item: MenuItem,
    pub selected_ingredients: Vec<Ingredient>,
    pub quantity: u32,
}

impl LineOrder {
    fn new(item: MenuItem, selected_ingredients: Vec<Ingredient>, quantity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            item,
            selected_ingredients,
            quantity,
        }
    }

    /// Same item with the same ingredient list, compared element by element
    /// so that a different pick order is a different slot.
    fn is_same_slot(&self, item: &MenuItem, selected_ingredients: &[Ingredient]) -> bool {
        self.item.id == item.id && self.selected_ingredients == selected_ingredients
    }
}

#[derive(Debug, Clone, Default)]
pub struct Basket {
    orders: Vec<LineOrder>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> &[LineOrder] {
        &self.orders
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Total number of units across all line orders.
    pub fn count(&self) -> u32 {
        self.orders
            .iter()
            .fold(0, |total, order| total.saturating_add(order.quantity))
    }

    /// Adds `quantity` units, merging into an existing line order when one
    /// matches. A quantity of zero is treated as one.
    pub fn add(
        &mut self,
        item: &MenuItem,
        selected_ingredients: Vec<Ingredient>,
        quantity: u32,
    ) -> Uuid {
        let quantity = quantity.max(1);

        if let Some(order) = self
            .orders
            .iter_mut()
            .find(|order| order.is_same_slot(item, &selected_ingredients))
        {
            order.quantity = order.quantity.saturating_add(quantity);
            tracing::debug!(
                item = %item.name,
                quantity = order.quantity,
                "merged into line order"
            );
            return order.id;
        }

        let order = LineOrder::new(item.clone(), selected_ingredients, quantity);
        let id = order.id;
        tracing::debug!(item = %item.name, quantity, "new line order");
        self.orders.push(order);
        id
    }

    pub fn remove(&mut self, order_id: Uuid) {
        self.orders.retain(|order| order.id != order_id);
    }

    pub fn clear(&mut self) {
        self.orders.clear();
    }
}
