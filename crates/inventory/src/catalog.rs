use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use retaildesk_core::{Aggregate, AggregateRoot, DomainError, DomainResult, ItemId};
use retaildesk_events::{ActivityKind, ActivityLog, ActivityNote, ActivitySource, Event};

use crate::alerts::{StockAlert, derive_alerts};
use crate::item::{InventoryItem, ItemFields};
use crate::search::{CatalogQuery, categories};
use crate::summary::CatalogSummary;

/// Aggregate root: the in-memory catalog.
///
/// Items are kept most-recently-added first. Items are never removed, so an
/// identifier can never be handed out twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<InventoryItem>,
    version: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from existing items, keeping their order.
    pub fn with_items(items: Vec<InventoryItem>) -> Self {
        Self { items, version: 0 }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Exact, case-sensitive barcode match.
    pub fn find_by_barcode(&self, code: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.fields.barcode == code)
    }

    /// Items matching `query`, in catalog order.
    pub fn search(&self, query: &CatalogQuery) -> Vec<&InventoryItem> {
        self.items.iter().filter(|item| query.matches(item)).collect()
    }

    /// Low-stock alerts, in catalog order.
    pub fn alerts(&self) -> Vec<StockAlert> {
        derive_alerts(&self.items)
    }

    pub fn categories(&self) -> Vec<String> {
        categories(&self.items)
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary::of(&self.items)
    }

    /// Add an item under a fresh identifier.
    pub fn add(&mut self, fields: ItemFields, at: DateTime<Utc>) -> DomainResult<CatalogChange> {
        let item_id = ItemId::new();
        let events = self.execute(&CatalogCommand::AddItem(AddItem {
            item_id,
            fields: fields.clone(),
            occurred_at: at,
        }))?;
        Ok(CatalogChange {
            item: InventoryItem::new(item_id, fields),
            events,
        })
    }

    /// Replace every field of an existing item except its identifier.
    pub fn update(
        &mut self,
        id: ItemId,
        fields: ItemFields,
        at: DateTime<Utc>,
    ) -> DomainResult<CatalogChange> {
        let events = self.execute(&CatalogCommand::UpdateItem(UpdateItem {
            item_id: id,
            fields: fields.clone(),
            occurred_at: at,
        }))?;
        Ok(CatalogChange {
            item: InventoryItem::new(id, fields),
            events,
        })
    }
}

/// A successful catalog write: the stored item and the events it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogChange {
    pub item: InventoryItem,
    pub events: Vec<CatalogEvent>,
}

impl CatalogChange {
    /// Append this change's notes (inventory, and alert when it went low) to `log`.
    pub fn record_into(&self, log: &mut ActivityLog) {
        for event in &self.events {
            log.record_event(event);
        }
    }
}

impl AggregateRoot for Catalog {
    type Id = ();

    fn id(&self) -> &Self::Id {
        &()
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub item_id: ItemId,
    pub fields: ItemFields,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateItem (full replace of all fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateItem {
    pub item_id: ItemId,
    pub fields: ItemFields,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogCommand {
    AddItem(AddItem),
    UpdateItem(UpdateItem),
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub item: InventoryItem,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdated {
    pub item: InventoryItem,
    /// The update moved the item from healthy stock to at/below its reorder point.
    pub entered_low_stock: bool,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogEvent {
    ItemAdded(ItemAdded),
    ItemUpdated(ItemUpdated),
}

impl Event for CatalogEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CatalogEvent::ItemAdded(_) => "inventory.item.added",
            CatalogEvent::ItemUpdated(_) => "inventory.item.updated",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CatalogEvent::ItemAdded(e) => e.occurred_at,
            CatalogEvent::ItemUpdated(e) => e.occurred_at,
        }
    }
}

impl ActivitySource for CatalogEvent {
    fn activity(&self) -> Vec<ActivityNote> {
        let (item, mut notes, low) = match self {
            CatalogEvent::ItemAdded(e) => (
                &e.item,
                vec![ActivityNote::new(
                    ActivityKind::Inventory,
                    format!("Added new item {} ({}) to inventory.", e.item.name(), e.item.sku()),
                )],
                e.item.is_low_stock(),
            ),
            CatalogEvent::ItemUpdated(e) => (
                &e.item,
                vec![ActivityNote::new(
                    ActivityKind::Inventory,
                    format!(
                        "Updated {} ({}) with current stock {}.",
                        e.item.name(),
                        e.item.sku(),
                        e.item.stock()
                    ),
                )],
                e.entered_low_stock,
            ),
        };
        if low {
            notes.push(ActivityNote::new(
                ActivityKind::Alert,
                format!(
                    "{} is running low: {} units left. Reorder point: {}",
                    item.name(),
                    item.stock(),
                    item.reorder_point()
                ),
            ));
        }
        notes
    }
}

impl Aggregate for Catalog {
    type Command = CatalogCommand;
    type Event = CatalogEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CatalogEvent::ItemAdded(e) => {
                self.items.insert(0, e.item.clone());
            }
            CatalogEvent::ItemUpdated(e) => {
                if let Some(slot) = self.items.iter_mut().find(|i| i.id == e.item.id) {
                    *slot = e.item.clone();
                }
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CatalogCommand::AddItem(cmd) => self.handle_add(cmd),
            CatalogCommand::UpdateItem(cmd) => self.handle_update(cmd),
        }
    }
}

impl Catalog {
    fn ensure_barcode_free(&self, barcode: &str, owner: ItemId) -> Result<(), DomainError> {
        match self.find_by_barcode(barcode) {
            Some(existing) if existing.id != owner => Err(DomainError::validation(format!(
                "barcode {barcode} is already assigned to {}",
                existing.name()
            ))),
            _ => Ok(()),
        }
    }

    fn handle_add(&self, cmd: &AddItem) -> Result<Vec<CatalogEvent>, DomainError> {
        if self.get(cmd.item_id).is_some() {
            return Err(DomainError::conflict("item id already in use"));
        }
        cmd.fields.validate()?;
        self.ensure_barcode_free(&cmd.fields.barcode, cmd.item_id)?;

        Ok(vec![CatalogEvent::ItemAdded(ItemAdded {
            item: InventoryItem::new(cmd.item_id, cmd.fields.clone()),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update(&self, cmd: &UpdateItem) -> Result<Vec<CatalogEvent>, DomainError> {
        let Some(current) = self.get(cmd.item_id) else {
            return Err(DomainError::not_found(format!("no catalog item with id {}", cmd.item_id)));
        };
        cmd.fields.validate()?;
        self.ensure_barcode_free(&cmd.fields.barcode, cmd.item_id)?;

        Ok(vec![CatalogEvent::ItemUpdated(ItemUpdated {
            item: InventoryItem::new(cmd.item_id, cmd.fields.clone()),
            entered_low_stock: !current.is_low_stock() && cmd.fields.is_low_stock(),
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn fields(name: &str, barcode: &str, stock: u32, reorder_point: u32) -> ItemFields {
        ItemFields {
            name: name.to_string(),
            sku: format!("SKU-{barcode}"),
            barcode: barcode.to_string(),
            category: "Groceries".to_string(),
            stock,
            reorder_point,
            price: dec!(349),
            ..ItemFields::blank(NaiveDate::from_ymd_opt(2024, 3, 12).unwrap())
        }
    }

    #[test]
    fn add_item_emits_item_added_event() {
        let catalog = Catalog::new();
        let item_id = ItemId::new();
        let cmd = AddItem {
            item_id,
            fields: fields("Tulsi Honey", "111", 42, 20),
            occurred_at: test_time(),
        };

        let events = catalog.handle(&CatalogCommand::AddItem(cmd)).unwrap();
        assert_eq!(events.len(), 1);
        match &events[0] {
            CatalogEvent::ItemAdded(e) => {
                assert_eq!(e.item.id, item_id);
                assert_eq!(e.item.name(), "Tulsi Honey");
            }
            _ => panic!("Expected ItemAdded event"),
        }
    }

    #[test]
    fn add_prepends_to_catalog() {
        let mut catalog = Catalog::new();
        let first = catalog.add(fields("First", "1", 5, 1), test_time()).unwrap().item;
        let second = catalog.add(fields("Second", "2", 5, 1), test_time()).unwrap().item;

        let ids: Vec<ItemId> = catalog.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert_ne!(first.id, second.id);
        assert_eq!(catalog.version(), 2);
    }

    #[test]
    fn add_rejects_missing_required_fields() {
        let mut catalog = Catalog::new();
        let mut f = fields("", "1", 5, 1);
        f.name.clear();

        let err = catalog.add(f, test_time()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(catalog.is_empty());
        assert_eq!(catalog.version(), 0);
    }

    #[test]
    fn add_rejects_duplicate_barcode() {
        let mut catalog = Catalog::new();
        catalog.add(fields("First", "dup", 5, 1), test_time()).unwrap();

        let err = catalog.add(fields("Second", "dup", 5, 1), test_time()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m.contains("already assigned")));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn add_rejects_reused_identifier() {
        let mut catalog = Catalog::new();
        let item = catalog.add(fields("First", "1", 5, 1), test_time()).unwrap().item;

        let err = catalog
            .handle(&CatalogCommand::AddItem(AddItem {
                item_id: item.id,
                fields: fields("Again", "2", 5, 1),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn update_replaces_fields_but_keeps_identity_and_position() {
        let mut catalog = Catalog::new();
        let a = catalog.add(fields("A", "1", 5, 1), test_time()).unwrap().item;
        let b = catalog.add(fields("B", "2", 5, 1), test_time()).unwrap().item;

        let updated = catalog.update(a.id, fields("A2", "1", 50, 10), test_time()).unwrap().item;
        assert_eq!(updated.id, a.id);
        assert_eq!(catalog.get(a.id).unwrap().name(), "A2");
        assert_eq!(catalog.get(a.id).unwrap().stock(), 50);
        assert_eq!(catalog.items()[0].id, b.id);
        assert_eq!(catalog.items()[1].id, a.id);
    }

    #[test]
    fn update_allows_keeping_own_barcode_but_not_anothers() {
        let mut catalog = Catalog::new();
        let a = catalog.add(fields("A", "1", 5, 1), test_time()).unwrap().item;
        catalog.add(fields("B", "2", 5, 1), test_time()).unwrap();

        assert!(catalog.update(a.id, fields("A", "1", 6, 1), test_time()).is_ok());
        let err = catalog.update(a.id, fields("A", "2", 6, 1), test_time()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn update_of_unknown_item_fails_loudly() {
        let mut catalog = Catalog::new();
        catalog.add(fields("A", "1", 5, 1), test_time()).unwrap();
        let before = catalog.clone();

        let err = catalog.update(ItemId::new(), fields("X", "9", 1, 1), test_time()).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
        assert_eq!(catalog, before);
    }

    #[test]
    fn find_by_barcode_is_exact_and_case_sensitive() {
        let mut catalog = Catalog::new();
        let item = catalog.add(fields("A", "AbC-1", 5, 1), test_time()).unwrap().item;

        assert_eq!(catalog.find_by_barcode("AbC-1").map(|i| i.id), Some(item.id));
        assert!(catalog.find_by_barcode("abc-1").is_none());
        assert!(catalog.find_by_barcode("AbC").is_none());
    }

    #[test]
    fn update_into_low_stock_records_alert_note() {
        let mut catalog = Catalog::new();
        let a = catalog.add(fields("Candle", "1", 20, 8), test_time()).unwrap().item;

        let events = catalog
            .execute(&CatalogCommand::UpdateItem(UpdateItem {
                item_id: a.id,
                fields: fields("Candle", "1", 4, 8),
                occurred_at: test_time(),
            }))
            .unwrap();
        let notes = events[0].activity();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].kind, ActivityKind::Inventory);
        assert_eq!(notes[0].message, "Updated Candle (SKU-1) with current stock 4.");
        assert_eq!(notes[1].kind, ActivityKind::Alert);

        // Already low: a further update does not raise a second alert.
        let events = catalog
            .execute(&CatalogCommand::UpdateItem(UpdateItem {
                item_id: a.id,
                fields: fields("Candle", "1", 3, 8),
                occurred_at: test_time(),
            }))
            .unwrap();
        assert_eq!(events[0].activity().len(), 1);
    }

    #[test]
    fn store_writes_feed_the_activity_log() {
        let mut catalog = Catalog::new();
        let mut log = ActivityLog::new();

        let added = catalog.add(fields("Candle", "1", 20, 8), test_time()).unwrap();
        added.record_into(&mut log);
        assert_eq!(log.len(), 1);
        assert_eq!(log.latest().unwrap().kind, ActivityKind::Inventory);
        assert_eq!(log.latest().unwrap().message, "Added new item Candle (SKU-1) to inventory.");

        let updated = catalog
            .update(added.item.id, fields("Candle", "1", 4, 8), test_time())
            .unwrap();
        assert_eq!(updated.events.len(), 1);
        updated.record_into(&mut log);
        let kinds: Vec<ActivityKind> = log.entries().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![ActivityKind::Alert, ActivityKind::Inventory, ActivityKind::Inventory]
        );
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let mut catalog = Catalog::new();
        catalog.add(fields("A", "1", 5, 1), test_time()).unwrap();
        let before = catalog.clone();

        let cmd = CatalogCommand::AddItem(AddItem {
            item_id: ItemId::new(),
            fields: fields("B", "2", 5, 1),
            occurred_at: test_time(),
        });
        let _ = catalog.handle(&cmd).unwrap();
        assert_eq!(catalog, before);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 200,
                ..ProptestConfig::default()
            })]

            /// Property: identifiers stay unique however many items are added.
            #[test]
            fn identifiers_are_never_reused(n in 1usize..40) {
                let mut catalog = Catalog::new();
                for i in 0..n {
                    catalog.add(fields(&format!("Item {i}"), &i.to_string(), 1, 0), test_time()).unwrap();
                }
                let mut ids: Vec<ItemId> = catalog.items().iter().map(|i| i.id).collect();
                ids.sort_by_key(|id| *id.as_uuid());
                ids.dedup();
                prop_assert_eq!(ids.len(), n);
            }
        }
    }
}
