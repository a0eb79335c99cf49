//! In-memory transaction collection plus the draft/edit state that feeds it.
//!
//! The store is owned by exactly one screen and mutated only through `&mut self`;
//! nothing is persisted. Operations that target an id report `Lookup::NotFound`
//! instead of silently doing nothing.

use log::{debug, info, warn};

use crate::models::{Brand, Draft, Transaction, TransactionId, TxnType};

/// Result of an operation addressed at a specific record.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::NotFound => None,
        }
    }
}

/// Transient message raised after a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Added,
    Updated,
    Deleted,
}

impl Notification {
    pub fn message(&self) -> &'static str {
        match self {
            Notification::Added => "Transaction added successfully!",
            Notification::Updated => "Transaction updated successfully!",
            Notification::Deleted => "Transaction deleted successfully!",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub net: f64,
    /// Records whose amount text is not a number.
    pub unparsed: usize,
}

#[derive(Debug, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    draft: Draft,
    editing: Option<TransactionId>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the two sample records shown on first launch.
    pub fn with_sample_data() -> Self {
        let mut store = Self::new();
        for draft in sample_drafts() {
            store
                .transactions
                .push(Transaction::from_draft(TransactionId::new(), draft));
        }
        store
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn editing(&self) -> Option<TransactionId> {
        self.editing
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update Transaction"
        } else {
            "Add Transaction"
        }
    }

    /// Append a new record built from `draft`. Always succeeds.
    pub fn add(&mut self, draft: Draft) -> Notification {
        let id = TransactionId::new();
        self.transactions.push(Transaction::from_draft(id, draft));
        self.draft = Draft::default();
        info!("event=txn_added id={id} count={}", self.transactions.len());
        Notification::Added
    }

    /// Overwrite the fields of record `id` with `draft`, keeping its id and position.
    pub fn update(&mut self, id: TransactionId, draft: Draft) -> Lookup<Notification> {
        let Some(slot) = self.transactions.iter_mut().find(|t| t.id == id) else {
            debug!("event=txn_update status=not_found id={id}");
            return Lookup::NotFound;
        };
        *slot = Transaction::from_draft(id, draft);
        self.draft = Draft::default();
        self.editing = None;
        info!("event=txn_updated id={id}");
        Lookup::Found(Notification::Updated)
    }

    pub fn delete(&mut self, id: TransactionId) -> Lookup<Notification> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() == before {
            debug!("event=txn_delete status=not_found id={id}");
            return Lookup::NotFound;
        }
        // The draft survives as a new entry once its target is gone.
        if self.editing == Some(id) {
            self.editing = None;
        }
        info!("event=txn_deleted id={id} count={}", self.transactions.len());
        Lookup::Found(Notification::Deleted)
    }

    /// Load record `id` into the draft and enter edit mode.
    ///
    /// Any unsaved draft is overwritten without confirmation; when that loses
    /// user input the discarded draft is returned as `Found(Some(_))`.
    pub fn begin_edit(&mut self, id: TransactionId) -> Lookup<Option<Draft>> {
        let Some(target) = self.get(id) else {
            debug!("event=txn_begin_edit status=not_found id={id}");
            return Lookup::NotFound;
        };
        let incoming = target.to_draft();
        let discarded = if self.has_unsaved_changes() {
            warn!(
                "event=draft_discarded editing={} replaced_by={id}",
                self.editing
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "new".to_string())
            );
            Some(std::mem::replace(&mut self.draft, incoming))
        } else {
            self.draft = incoming;
            None
        };
        self.editing = Some(id);
        Lookup::Found(discarded)
    }

    /// Commit the current draft: add when creating, update when editing.
    pub fn submit(&mut self) -> Lookup<Notification> {
        let draft = self.draft.clone();
        match self.editing {
            Some(id) => self.update(id, draft),
            None => Lookup::Found(self.add(draft)),
        }
    }

    /// Leave edit mode and clear the draft.
    ///
    /// Returns the draft when it held changes that are now lost.
    pub fn cancel_edit(&mut self) -> Option<Draft> {
        let discarded = if self.has_unsaved_changes() {
            warn!(
                "event=draft_discarded editing={} reason=cancel",
                self.editing
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "new".to_string())
            );
            Some(std::mem::take(&mut self.draft))
        } else {
            self.draft = Draft::default();
            None
        };
        self.editing = None;
        discarded
    }

    /// True when the draft holds input that would be lost if replaced.
    pub fn has_unsaved_changes(&self) -> bool {
        match self.editing.and_then(|id| self.get(id)) {
            Some(original) => original.to_draft() != self.draft,
            None => !self.draft.is_empty(),
        }
    }

    pub fn totals(&self) -> Totals {
        let mut totals = Totals::default();
        for txn in &self.transactions {
            let Some(value) = txn.amount_value() else {
                totals.unparsed += 1;
                continue;
            };
            match txn.kind {
                Some(TxnType::Income) => totals.income += value,
                Some(TxnType::Expense) => totals.expense += value,
                None => {}
            }
        }
        totals.net = totals.income - totals.expense;
        totals
    }
}

fn sample_drafts() -> Vec<Draft> {
    vec![
        Draft::new("2023-01-01", "200", TxnType::Income, Brand::Nike),
        Draft::new("2023-02-15", "150", TxnType::Expense, Brand::Adidas),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn puma_draft() -> Draft {
        Draft::new("2023-03-01", "300", TxnType::Income, Brand::Puma)
    }

    fn id_of(store: &TransactionStore, brand: Brand) -> TransactionId {
        store
            .transactions()
            .iter()
            .find(|t| t.brand == Some(brand))
            .unwrap()
            .id
    }

    #[test]
    fn test_sample_data_seeded() {
        let store = TransactionStore::with_sample_data();
        assert_eq!(store.len(), 2);
        let first = &store.transactions()[0];
        assert_eq!(first.brand, Some(Brand::Nike));
        assert_eq!(first.kind, Some(TxnType::Income));
        assert_eq!(first.amount, "200");
        assert_eq!(first.date, "2023-01-01");
        let second = &store.transactions()[1];
        assert_eq!(second.brand, Some(Brand::Adidas));
        assert_eq!(second.kind, Some(TxnType::Expense));
        assert_eq!(second.amount, "150");
        assert_eq!(second.date, "2023-02-15");
        assert!(!store.is_editing());
        assert!(store.draft().is_empty());
    }

    #[test]
    fn test_adds_grow_collection_with_distinct_ids() {
        let mut store = TransactionStore::new();
        for i in 0..25 {
            let draft = Draft::new("2024-01-01", &i.to_string(), TxnType::Expense, Brand::Puma);
            let note = store.add(draft);
            assert_eq!(note, Notification::Added);
        }
        assert_eq!(store.len(), 25);
        let ids: HashSet<_> = store.transactions().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 25);
    }

    #[test]
    fn test_add_accepts_malformed_draft() {
        let mut store = TransactionStore::new();
        let draft = Draft {
            date: String::new(),
            amount: "twelve".to_string(),
            kind: None,
            brand: None,
        };
        store.add(draft);
        assert_eq!(store.len(), 1);
        assert_eq!(store.transactions()[0].amount, "twelve");
        assert_eq!(store.transactions()[0].kind, None);
    }

    #[test]
    fn test_add_appends_and_clears_draft() {
        let mut store = TransactionStore::with_sample_data();
        *store.draft_mut() = puma_draft();
        let result = store.submit();
        assert_eq!(result, Lookup::Found(Notification::Added));
        assert_eq!(store.len(), 3);
        assert_eq!(store.transactions()[2].brand, Some(Brand::Puma));
        assert!(store.draft().is_empty());
    }

    #[test]
    fn test_update_preserves_id_size_and_other_records() {
        let mut store = TransactionStore::with_sample_data();
        let before = store.transactions().to_vec();
        let nike = before[0].id;

        let draft = Draft::new("2023-01-09", "999", TxnType::Expense, Brand::Puma);
        let result = store.update(nike, draft);
        assert_eq!(result, Lookup::Found(Notification::Updated));
        assert_eq!(store.len(), 2);

        let updated = &store.transactions()[0];
        assert_eq!(updated.id, nike);
        assert_eq!(updated.amount, "999");
        assert_eq!(updated.brand, Some(Brand::Puma));
        assert_eq!(store.transactions()[1], before[1]);
    }

    #[test]
    fn test_update_unknown_id_changes_nothing() {
        let mut store = TransactionStore::with_sample_data();
        *store.draft_mut() = puma_draft();
        let before = store.transactions().to_vec();
        let result = store.update(TransactionId::new(), puma_draft());
        assert_eq!(result, Lookup::NotFound);
        assert_eq!(store.transactions(), before.as_slice());
        assert_eq!(store.draft(), &puma_draft());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut store = TransactionStore::with_sample_data();
        let adidas = id_of(&store, Brand::Adidas);

        assert_eq!(store.delete(adidas), Lookup::Found(Notification::Deleted));
        assert_eq!(store.len(), 1);

        assert_eq!(store.delete(adidas), Lookup::NotFound);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_edit_target_leaves_edit_mode() {
        let mut store = TransactionStore::with_sample_data();
        let nike = id_of(&store, Brand::Nike);
        let _ = store.begin_edit(nike);
        store.draft_mut().amount = "210".to_string();

        assert!(store.delete(nike).is_found());
        assert!(!store.is_editing());
        assert_eq!(store.draft().amount, "210");

        assert_eq!(store.submit(), Lookup::Found(Notification::Added));
        assert_eq!(store.len(), 2);
        assert_eq!(store.transactions()[1].amount, "210");
    }

    #[test]
    fn test_begin_edit_then_submit_is_identity() {
        let mut store = TransactionStore::with_sample_data();
        let before = store.transactions().to_vec();
        let adidas = id_of(&store, Brand::Adidas);

        assert_eq!(store.begin_edit(adidas), Lookup::Found(None));
        assert!(store.is_editing());
        assert_eq!(store.submit_label(), "Update Transaction");

        assert_eq!(store.submit(), Lookup::Found(Notification::Updated));
        assert_eq!(store.transactions(), before.as_slice());
        assert!(!store.is_editing());
        assert_eq!(store.submit_label(), "Add Transaction");
    }

    #[test]
    fn test_begin_edit_unknown_id_is_reported() {
        let mut store = TransactionStore::with_sample_data();
        *store.draft_mut() = puma_draft();
        assert_eq!(store.begin_edit(TransactionId::new()), Lookup::NotFound);
        assert!(!store.is_editing());
        assert_eq!(store.draft(), &puma_draft());
    }

    #[test]
    fn test_begin_edit_returns_discarded_draft() {
        let mut store = TransactionStore::with_sample_data();
        let nike = id_of(&store, Brand::Nike);
        let adidas = id_of(&store, Brand::Adidas);

        *store.draft_mut() = puma_draft();
        assert_eq!(store.begin_edit(nike), Lookup::Found(Some(puma_draft())));
        assert_eq!(store.draft().amount, "200");

        // Switching targets without touching the form loses nothing.
        assert_eq!(store.begin_edit(adidas), Lookup::Found(None));

        store.draft_mut().amount = "175".to_string();
        let discarded = store.begin_edit(nike).found().flatten().unwrap();
        assert_eq!(discarded.amount, "175");
        assert_eq!(store.editing(), Some(nike));
    }

    #[test]
    fn test_cancel_edit_resets_state() {
        let mut store = TransactionStore::with_sample_data();
        let nike = id_of(&store, Brand::Nike);
        let _ = store.begin_edit(nike);
        assert_eq!(store.cancel_edit(), None);
        assert!(!store.is_editing());
        assert!(store.draft().is_empty());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_cancel_edit_returns_lost_changes() {
        let mut store = TransactionStore::with_sample_data();
        let nike = id_of(&store, Brand::Nike);
        let _ = store.begin_edit(nike);
        store.draft_mut().amount = "260".to_string();
        let lost = store.cancel_edit().unwrap();
        assert_eq!(lost.amount, "260");
        assert_eq!(store.get(nike).unwrap().amount, "200");

        *store.draft_mut() = puma_draft();
        assert_eq!(store.cancel_edit(), Some(puma_draft()));
        assert!(store.draft().is_empty());
    }

    #[test]
    fn test_resale_scenario() {
        let mut store = TransactionStore::with_sample_data();

        store.add(puma_draft());
        assert_eq!(store.len(), 3);
        let last = store.transactions().last().unwrap();
        assert_eq!(last.brand, Some(Brand::Puma));
        assert_eq!(last.kind, Some(TxnType::Income));
        assert_eq!(last.amount, "300");

        let adidas = id_of(&store, Brand::Adidas);
        assert!(store.delete(adidas).is_found());
        let brands: Vec<_> = store.transactions().iter().map(|t| t.brand).collect();
        assert_eq!(brands, vec![Some(Brand::Nike), Some(Brand::Puma)]);

        let nike = id_of(&store, Brand::Nike);
        assert!(store.begin_edit(nike).is_found());
        store.draft_mut().amount = "250".to_string();
        assert_eq!(store.submit(), Lookup::Found(Notification::Updated));

        assert_eq!(store.len(), 2);
        let edited = store.get(nike).unwrap();
        assert_eq!(edited.amount, "250");
        assert_eq!(edited.date, "2023-01-01");
        assert_eq!(edited.id, nike);
    }

    #[test]
    fn test_totals_split_by_type() {
        let mut store = TransactionStore::with_sample_data();
        store.add(puma_draft());
        store.add(Draft {
            amount: "n/a".to_string(),
            ..Draft::default()
        });
        store.add(Draft {
            amount: "40".to_string(),
            ..Draft::default()
        });

        let totals = store.totals();
        assert_eq!(totals.income, 500.0);
        assert_eq!(totals.expense, 150.0);
        assert_eq!(totals.net, 350.0);
        assert_eq!(totals.unparsed, 1);
    }

    #[test]
    fn test_notification_messages() {
        assert_eq!(Notification::Added.message(), "Transaction added successfully!");
        assert_eq!(Notification::Updated.message(), "Transaction updated successfully!");
        assert_eq!(Notification::Deleted.message(), "Transaction deleted successfully!");
    }
}
