//! Generic list/get/create/update/delete over any stored collection.

use tracing::debug;

use super::{Store, Stored};
use crate::pagination::{matches_search, paginate, Page, PageRequest};
use crate::record::{CreateContext, Resource};
use crate::repo::{RepoError, RepoResult};
use crate::{CoreError, CoreResult};

impl Store {
    /// One page of a collection, filtered by the request's search term.
    pub fn list<R: Stored>(&self, request: &PageRequest) -> CoreResult<Page<R>> {
        let records = R::repository(self).list()?;
        Ok(paginate(records, request, R::search_text))
    }

    /// The whole collection in insertion order, optionally search-filtered.
    pub fn all<R: Stored>(&self, search: Option<&str>) -> CoreResult<Vec<R>> {
        let mut records = R::repository(self).list()?;
        if let Some(needle) = search {
            records.retain(|r| matches_search(r.search_text(), needle));
        }
        Ok(records)
    }

    /// Look a record up by the id as it appeared in the request path.
    pub fn get<R: Stored>(&self, raw_id: &str) -> CoreResult<R> {
        self.find::<R>(raw_id)?.ok_or(CoreError::NotFound(R::LABEL))
    }

    /// Like [`Store::get`] but a miss is `None` rather than an error.
    pub fn find<R: Stored>(&self, raw_id: &str) -> CoreResult<Option<R>> {
        match R::normalize_key(raw_id) {
            Some(key) => Ok(R::repository(self).find(&key)?),
            None => Ok(None),
        }
    }

    /// Validate `input`, assign an id and timestamps, and append the record.
    pub fn create<R: Resource + Stored>(&self, input: R::Input) -> CoreResult<R> {
        let repo = R::repository(self);
        let sequence = || -> RepoResult<u64> { repo.next_sequence() };
        let ctx = CreateContext::new(self.clock.now(), &self.clock, &sequence);

        let record = R::create(input, &ctx)?;
        self.insert(&record)?;
        debug!(kind = R::KIND, id = %record.key(), "created record");
        Ok(record)
    }

    /// Shallow-merge the allow-listed fields of `patch` into a record.
    /// A missing record is reported before the patch is validated.
    pub fn update<R: Resource + Stored>(&self, raw_id: &str, patch: &R::Patch) -> CoreResult<R> {
        let key = R::normalize_key(raw_id).ok_or(CoreError::NotFound(R::LABEL))?;
        let repo = R::repository(self);
        if repo.find(&key)?.is_none() {
            return Err(CoreError::NotFound(R::LABEL));
        }
        R::validate_patch(patch)?;
        let now = self.clock.now();

        let updated = repo
            .update_with(&key, &mut |record| record.apply_patch(patch, now))?
            .ok_or(CoreError::NotFound(R::LABEL))?;
        debug!(kind = R::KIND, id = %key, "updated record");
        Ok(updated)
    }

    /// Remove a record and return it.
    pub fn delete<R: Stored>(&self, raw_id: &str) -> CoreResult<R> {
        let key = R::normalize_key(raw_id).ok_or(CoreError::NotFound(R::LABEL))?;
        let removed = R::repository(self)
            .remove(&key)?
            .ok_or(CoreError::NotFound(R::LABEL))?;
        debug!(kind = R::KIND, id = %key, "deleted record");
        Ok(removed)
    }

    /// Append an already-built record. A taken id is a validation error.
    pub(crate) fn insert<R: Stored>(&self, record: &R) -> CoreResult<()> {
        R::repository(self).insert(record).map_err(|e| match e {
            RepoError::Duplicate(key) => {
                CoreError::Validation(format!("{} {} already exists", R::LABEL, key))
            }
            other => other.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Customer, CustomerPatch, NewCustomer, NewProduct, Product, Shop};
    use crate::pagination::PageRequest;
    use crate::store::Store;
    use crate::CoreError;

    fn customer(name: &str) -> NewCustomer {
        NewCustomer {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let store = Store::in_memory();
        let a = store.create::<Customer>(customer("Ann")).unwrap();
        let b = store.create::<Customer>(customer("Ben")).unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn test_rejected_create_leaves_collection_unchanged() {
        let store = Store::in_memory();
        let err = store.create::<Customer>(NewCustomer::default()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(store.all::<Customer>(None).unwrap().is_empty());
    }

    #[test]
    fn test_get_normalizes_numeric_ids() {
        let store = Store::in_memory();
        let created = store.create::<Customer>(customer("Ann")).unwrap();

        let padded = format!("00{}", created.id);
        assert_eq!(store.get::<Customer>(&padded).unwrap().id, created.id);
        assert!(matches!(
            store.get::<Customer>("abc"),
            Err(CoreError::NotFound("Customer"))
        ));
    }

    #[test]
    fn test_update_merges_and_restamps() {
        let store = Store::in_memory();
        let created = store
            .create::<Customer>(NewCustomer {
                name: Some("Ann".into()),
                phone: Some("555".into()),
                ..Default::default()
            })
            .unwrap();

        let patch = CustomerPatch {
            address: Some("1 High St".into()),
            ..Default::default()
        };
        let updated = store
            .update::<Customer>(&created.id.to_string(), &patch)
            .unwrap();

        assert_eq!(updated.name, "Ann");
        assert_eq!(updated.phone, "555");
        assert_eq!(updated.address, "1 High St");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[test]
    fn test_update_rejects_blank_required_field() {
        let store = Store::in_memory();
        let created = store.create::<Customer>(customer("Ann")).unwrap();
        let patch = CustomerPatch {
            name: Some("  ".into()),
            ..Default::default()
        };
        assert!(matches!(
            store.update::<Customer>(&created.id.to_string(), &patch),
            Err(CoreError::Validation(_))
        ));
        assert_eq!(store.get::<Customer>("1").unwrap().name, "Ann");
    }

    #[test]
    fn test_update_of_missing_record_is_not_found_even_with_bad_patch() {
        let store = Store::in_memory();
        let patch = CustomerPatch {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            store.update::<Customer>("999", &patch),
            Err(CoreError::NotFound("Customer"))
        ));
    }

    #[test]
    fn test_delete_then_get_is_not_found() {
        let store = Store::in_memory();
        let created = store.create::<Customer>(customer("Ann")).unwrap();
        let id = created.id.to_string();

        assert_eq!(store.delete::<Customer>(&id).unwrap().id, created.id);
        assert!(matches!(store.get::<Customer>(&id), Err(CoreError::NotFound(_))));
        assert!(matches!(store.delete::<Customer>(&id), Err(CoreError::NotFound(_))));
    }

    #[test]
    fn test_duplicate_product_id_is_a_validation_error() {
        let store = Store::in_memory();
        let input = || NewProduct {
            id: Some("8901".into()),
            name: Some("Frame".into()),
            price: Some(10.0),
            ..Default::default()
        };
        store.create::<Product>(input()).unwrap();
        let err = store.create::<Product>(input()).unwrap_err();
        assert_eq!(err.to_string(), "Product 8901 already exists");
    }

    #[test]
    fn test_list_and_search() {
        let store = Store::in_memory();
        for name in ["Jane Smith", "John Doe", "Janet Roe"] {
            store.create::<Customer>(customer(name)).unwrap();
        }

        let request = PageRequest {
            search: Some("jan".into()),
            ..Default::default()
        };
        let page = store.list::<Customer>(&request).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 1);

        assert_eq!(store.all::<Customer>(Some("DOE")).unwrap().len(), 1);
        assert!(store.all::<Shop>(None).unwrap().is_empty());
    }
}
