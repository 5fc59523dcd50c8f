use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::{Arc, RwLock};

use synloan_core::{Clock, Criteria, Criterion, Persistable, RecordId, SystemClock};

use super::query::{Page, Pagination};
use super::r#trait::{RecordStore, StoreError};

#[derive(Debug)]
struct Table<R: Persistable> {
    rows: BTreeMap<R::Id, R>,
    last_id: u64,
}

/// In-memory versioned record store.
///
/// Intended for tests/dev. The version check and the write happen under one
/// write guard, which gives the same compare-and-swap guarantee a relational
/// `UPDATE ... WHERE id = $1 AND version = $2` would.
pub struct InMemoryRecordStore<R: Persistable, C> {
    table: RwLock<Table<R>>,
    clock: Arc<dyn Clock>,
    _criterion: PhantomData<fn() -> C>,
}

impl<R: Persistable, C> InMemoryRecordStore<R, C> {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
            clock,
            _criterion: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.table.read().map(|t| t.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R: Persistable, C> Default for InMemoryRecordStore<R, C> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned(kind: &str) -> StoreError {
    StoreError::Unavailable(format!("{kind} table lock poisoned"))
}

impl<R, C> RecordStore<R, C> for InMemoryRecordStore<R, C>
where
    R: Persistable,
    C: Criterion<R>,
{
    fn find_by_id(&self, id: R::Id) -> Result<Option<R>, StoreError> {
        let table = self.table.read().map_err(|_| poisoned(R::KIND))?;
        Ok(table.rows.get(&id).cloned())
    }

    fn exists_by_id(&self, id: R::Id) -> Result<bool, StoreError> {
        let table = self.table.read().map_err(|_| poisoned(R::KIND))?;
        Ok(table.rows.contains_key(&id))
    }

    fn save(&self, mut record: R) -> Result<R, StoreError> {
        let mut table = self.table.write().map_err(|_| poisoned(R::KIND))?;

        match record.id() {
            None => {
                table.last_id += 1;
                let id = <R::Id as From<RecordId>>::from(RecordId::from_raw(table.last_id));
                record.assign_id(id);
                let created_at = record.created_at();
                record.record_write(0, created_at);
                table.rows.insert(id, record.clone());
                Ok(record)
            }
            Some(id) => {
                let current = table
                    .rows
                    .get(&id)
                    .map(|r| r.version())
                    .ok_or_else(|| StoreError::NotFound(format!("{} not found with ID: {id}", R::KIND)))?;

                if record.version() != current {
                    return Err(StoreError::Concurrency(format!(
                        "{} {id} was modified by another transaction (expected version {}, current version {current})",
                        R::KIND,
                        record.version()
                    )));
                }

                record.record_write(current + 1, self.clock.now());
                table.rows.insert(id, record.clone());
                Ok(record)
            }
        }
    }

    fn delete_by_id(&self, id: R::Id) -> Result<bool, StoreError> {
        let mut table = self.table.write().map_err(|_| poisoned(R::KIND))?;
        Ok(table.rows.remove(&id).is_some())
    }

    fn find_all(&self, criteria: &Criteria<C>, pagination: Pagination) -> Result<Page<R>, StoreError> {
        let table = self.table.read().map_err(|_| poisoned(R::KIND))?;
        let matching = table.rows.values().filter(|r| criteria.matches(*r));
        Ok(Page::from_ordered(matching, pagination).map(R::clone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use synloan_core::{AggregateRoot, FixedClock};
    use synloan_parties::{Company, CompanyCriterion, CompanyDetails, CompanyId, Industry};

    type CompanyStore = InMemoryRecordStore<Company, CompanyCriterion>;

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()))
    }

    fn company(name: &str, industry: Industry, clock: &FixedClock) -> Company {
        Company::new(
            CompanyDetails {
                company_name: name.to_string(),
                registration_number: None,
                industry: Some(industry),
                address: None,
                country: None,
            },
            clock.now(),
        )
        .unwrap()
    }

    #[test]
    fn insert_assigns_monotonic_ids_and_initial_version() {
        let clock = clock();
        let store = CompanyStore::with_clock(clock.clone());

        let a = store.save(company("A", Industry::Tech, &clock)).unwrap();
        let b = store.save(company("B", Industry::Tech, &clock)).unwrap();

        assert_eq!(a.id(), Some(CompanyId::new(1)));
        assert_eq!(b.id(), Some(CompanyId::new(2)));
        assert_eq!(a.version(), 0);
        assert_eq!(a.created_at(), a.updated_at());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn update_with_current_version_increments_and_restamps() {
        let clock = clock();
        let store = CompanyStore::with_clock(clock.clone());
        let saved = store.save(company("A", Industry::Tech, &clock)).unwrap();

        clock.advance(Duration::minutes(10));
        let updated = store.save(saved.clone()).unwrap();

        assert_eq!(updated.version(), 1);
        assert_eq!(updated.created_at(), saved.created_at());
        assert_eq!(updated.updated_at(), saved.created_at() + Duration::minutes(10));
    }

    #[test]
    fn stale_version_is_rejected_and_row_left_untouched() {
        let clock = clock();
        let store = CompanyStore::with_clock(clock.clone());
        let saved = store.save(company("A", Industry::Tech, &clock)).unwrap();
        store.save(saved.clone()).unwrap();

        let err = store.save(saved.clone()).unwrap_err();
        assert!(matches!(err, StoreError::Concurrency(_)));

        let stored = store.find_by_id(CompanyId::new(1)).unwrap().unwrap();
        assert_eq!(stored.version(), 1);
    }

    #[test]
    fn update_of_missing_row_is_not_found() {
        let clock = clock();
        let store = CompanyStore::with_clock(clock.clone());
        let saved = store.save(company("A", Industry::Tech, &clock)).unwrap();
        assert!(store.delete_by_id(CompanyId::new(1)).unwrap());

        assert!(matches!(store.save(saved), Err(StoreError::NotFound(_))));
        assert!(!store.delete_by_id(CompanyId::new(1)).unwrap());
    }

    #[test]
    fn find_all_filters_orders_and_pages() {
        let clock = clock();
        let store = CompanyStore::with_clock(clock.clone());
        for (name, industry) in [
            ("Acme One", Industry::Tech),
            ("Globex", Industry::Tech),
            ("acme two", Industry::Tech),
            ("Acme Three", Industry::Energy),
        ] {
            store.save(company(name, industry, &clock)).unwrap();
        }

        let criteria = Criteria::all()
            .and(CompanyCriterion::name_contains("ACME"))
            .and(CompanyCriterion::Industry(Industry::Tech));
        let page = store.find_all(&criteria, Pagination::default()).unwrap();
        let names: Vec<&str> = page.items.iter().map(|c| c.company_name()).collect();
        assert_eq!(names, vec!["Acme One", "acme two"]);
        assert_eq!(page.total, 2);

        let everything = store.find_all(&Criteria::all(), Pagination::new(Some(3), None)).unwrap();
        assert_eq!(everything.total, 4);
        assert_eq!(everything.len(), 3);
        assert!(everything.has_more);
    }

    #[test]
    fn find_all_returns_only_the_requested_window() {
        let clock = clock();
        let store = CompanyStore::with_clock(clock.clone());
        for n in 1..=6 {
            store.save(company(&format!("Co {n}"), Industry::Retail, &clock)).unwrap();
        }

        let page = store.find_all(&Criteria::all(), Pagination::new(Some(2), Some(3))).unwrap();
        let ids: Vec<_> = page.items.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![Some(CompanyId::new(4)), Some(CompanyId::new(5))]);
        assert_eq!(page.total, 6);
        assert!(page.has_more);
    }
}
