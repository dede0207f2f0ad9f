use petcat_core::{
    ChangeNotifier, Filter, Gender, Pet, PetColumn, PetPath, PetProvider, PetRow, PetStore,
    PetValidationError, PetValues, ProviderError, SqlitePetStore, StoreResult,
};
use rusqlite::types::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Records every published change path for later assertions.
#[derive(Clone, Default)]
struct RecordingNotifier {
    changes: Rc<RefCell<Vec<PetPath>>>,
}

impl RecordingNotifier {
    fn paths(&self) -> Vec<PetPath> {
        self.changes.borrow().clone()
    }
}

impl ChangeNotifier for RecordingNotifier {
    fn notify_change(&self, path: &PetPath) {
        self.changes.borrow_mut().push(*path);
    }
}

/// Store decorator counting update calls through a shared handle.
struct CountingStore<S: PetStore> {
    inner: S,
    updates: Rc<Cell<usize>>,
}

impl<S: PetStore> CountingStore<S> {
    fn new(inner: S) -> (Self, Rc<Cell<usize>>) {
        let updates = Rc::new(Cell::new(0));
        let store = Self {
            inner,
            updates: Rc::clone(&updates),
        };
        (store, updates)
    }
}

impl<S: PetStore> PetStore for CountingStore<S> {
    fn query(
        &self,
        projection: &[PetColumn],
        filter: Option<&Filter>,
        order: Option<&str>,
    ) -> StoreResult<Vec<PetRow>> {
        self.inner.query(projection, filter, order)
    }

    fn insert(&self, values: &PetValues) -> StoreResult<Option<i64>> {
        self.inner.insert(values)
    }

    fn update(&self, values: &PetValues, filter: Option<&Filter>) -> StoreResult<usize> {
        self.updates.set(self.updates.get() + 1);
        self.inner.update(values, filter)
    }

    fn delete(&self, filter: Option<&Filter>) -> StoreResult<usize> {
        self.inner.delete(filter)
    }
}

/// Store double whose insert always reports the backend rejection sentinel.
struct RejectingStore;

impl PetStore for RejectingStore {
    fn query(
        &self,
        _projection: &[PetColumn],
        _filter: Option<&Filter>,
        _order: Option<&str>,
    ) -> StoreResult<Vec<PetRow>> {
        Ok(Vec::new())
    }

    fn insert(&self, _values: &PetValues) -> StoreResult<Option<i64>> {
        Ok(None)
    }

    fn update(&self, _values: &PetValues, _filter: Option<&Filter>) -> StoreResult<usize> {
        Ok(0)
    }

    fn delete(&self, _filter: Option<&Filter>) -> StoreResult<usize> {
        Ok(0)
    }
}

fn provider() -> (
    PetProvider<SqlitePetStore, RecordingNotifier>,
    RecordingNotifier,
) {
    let notifier = RecordingNotifier::default();
    let provider = PetProvider::new(SqlitePetStore::in_memory(), notifier.clone());
    (provider, notifier)
}

fn toto() -> PetValues {
    PetValues::new()
        .name("Toto")
        .breed("Terrier")
        .gender(Gender::Male)
        .weight(7)
}

#[test]
fn all_operations_reject_unrecognized_paths() {
    let (provider, notifier) = provider();

    for path in ["cats", "pets/abc", "pets/1/2", "petstore", ""] {
        assert!(matches!(
            provider.query(path, &[], None, None).unwrap_err(),
            ProviderError::UnsupportedResource(_)
        ));
        assert!(matches!(
            provider.insert(path, &toto()).unwrap_err(),
            ProviderError::UnsupportedResource(_)
        ));
        assert!(matches!(
            provider.delete(path, None).unwrap_err(),
            ProviderError::UnsupportedResource(_)
        ));
        assert!(matches!(
            provider.update(path, &toto(), None).unwrap_err(),
            ProviderError::UnsupportedResource(_)
        ));
    }

    assert!(notifier.paths().is_empty());
}

#[test]
fn insert_is_unsupported_on_item_paths() {
    let (provider, notifier) = provider();

    let err = provider.insert("pets/3", &toto()).unwrap_err();
    assert!(matches!(err, ProviderError::UnsupportedResource(_)));
    assert!(notifier.paths().is_empty());
}

#[test]
fn insert_returns_item_path_and_notifies_collection_once() {
    let (provider, notifier) = provider();

    let created = provider.insert("pets", &toto()).unwrap();
    let id = created.item_id().expect("insert returns an item path");
    assert_eq!(created.to_string(), format!("pets/{id}"));

    assert_eq!(notifier.paths(), vec![PetPath::Collection]);
}

#[test]
fn insert_validation_failure_touches_nothing() {
    let (provider, notifier) = provider();

    let err = provider
        .insert("pets", &toto().raw_gender(9))
        .unwrap_err();
    assert!(matches!(
        err,
        ProviderError::Validation(PetValidationError::InvalidGender(9))
    ));

    assert!(notifier.paths().is_empty());
    assert!(provider.query("pets", &[], None, None).unwrap().is_empty());
}

#[test]
fn insert_backend_rejection_fails_without_notification() {
    let notifier = RecordingNotifier::default();
    let provider = PetProvider::new(RejectingStore, notifier.clone());

    let err = provider.insert("pets", &toto()).unwrap_err();
    assert!(matches!(err, ProviderError::WriteFailed(path) if path == "pets"));
    assert!(notifier.paths().is_empty());
}

#[test]
fn query_on_item_path_ignores_caller_filter() {
    let (provider, _) = provider();

    let toto_path = provider.insert("pets", &toto()).unwrap();
    provider
        .insert("pets", &toto().name("Rex").breed("Boxer"))
        .unwrap();

    // A caller filter matching the other row must be discarded.
    let rex_filter = Filter::new("name = ?", vec![Value::Text("Rex".to_string())]);
    let rows = provider
        .query(&toto_path.to_string(), &[], Some(&rex_filter), None)
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name.as_deref(), Some("Toto"));
}

#[test]
fn update_on_item_path_rewrites_filter_to_id_equality() {
    let (provider, notifier) = provider();

    let toto_path = provider.insert("pets", &toto()).unwrap();
    let rex_path = provider
        .insert("pets", &toto().name("Rex").breed("Boxer"))
        .unwrap();

    let rex_filter = Filter::new("name = ?", vec![Value::Text("Rex".to_string())]);
    let changed = provider
        .update(
            &toto_path.to_string(),
            &PetValues::new().weight(9),
            Some(&rex_filter),
        )
        .unwrap();
    assert_eq!(changed, 1);

    let toto_rows = provider
        .query(&toto_path.to_string(), &[], None, None)
        .unwrap();
    assert_eq!(toto_rows[0].weight, Some(9));

    let rex_rows = provider
        .query(&rex_path.to_string(), &[], None, None)
        .unwrap();
    assert_eq!(rex_rows[0].weight, Some(7));

    assert_eq!(
        notifier.paths(),
        vec![PetPath::Collection, PetPath::Collection, toto_path]
    );
}

#[test]
fn update_with_empty_payload_skips_storage_and_notification() {
    let notifier = RecordingNotifier::default();
    let (store, update_calls) = CountingStore::new(SqlitePetStore::in_memory());
    let provider = PetProvider::new(store, notifier.clone());

    provider.insert("pets", &toto()).unwrap();
    let before = notifier.paths().len();

    let changed = provider.update("pets", &PetValues::new(), None).unwrap();
    assert_eq!(changed, 0);
    assert_eq!(update_calls.get(), 0);
    assert_eq!(notifier.paths().len(), before);
}

#[test]
fn update_validation_failure_reports_before_storage() {
    let notifier = RecordingNotifier::default();
    let (store, update_calls) = CountingStore::new(SqlitePetStore::in_memory());
    let provider = PetProvider::new(store, notifier.clone());
    provider.insert("pets", &toto()).unwrap();

    let err = provider
        .update("pets", &PetValues::new().weight(-3), None)
        .unwrap_err();
    assert!(matches!(
        err,
        ProviderError::Validation(PetValidationError::NegativeWeight(-3))
    ));
    assert_eq!(update_calls.get(), 0);
    assert_eq!(notifier.paths(), vec![PetPath::Collection]);
}

#[test]
fn delete_notifies_request_path_only_when_rows_were_removed() {
    let (provider, notifier) = provider();

    let created = provider.insert("pets", &toto()).unwrap();

    // Item path matching no row: count 0, no notification.
    let missing = provider.delete("pets/999", None).unwrap();
    assert_eq!(missing, 0);
    assert_eq!(notifier.paths(), vec![PetPath::Collection]);

    let removed = provider.delete(&created.to_string(), None).unwrap();
    assert_eq!(removed, 1);
    assert_eq!(notifier.paths(), vec![PetPath::Collection, created]);
}

#[test]
fn delete_on_item_path_discards_caller_filter() {
    let (provider, _) = provider();

    let toto_path = provider.insert("pets", &toto()).unwrap();
    provider
        .insert("pets", &toto().name("Rex").breed("Boxer"))
        .unwrap();

    let rex_filter = Filter::new("name = ?", vec![Value::Text("Rex".to_string())]);
    let removed = provider
        .delete(&toto_path.to_string(), Some(&rex_filter))
        .unwrap();
    assert_eq!(removed, 1);

    let names: Vec<_> = provider
        .query("pets", &[PetColumn::Name], None, None)
        .unwrap()
        .into_iter()
        .map(|row| row.name.unwrap())
        .collect();
    assert_eq!(names, ["Rex"]);
}

#[test]
fn end_to_end_insert_query_delete() {
    let (provider, notifier) = provider();

    let created = provider.insert("pets", &toto()).unwrap();
    let id = created.item_id().unwrap();
    assert_eq!(created.to_string(), format!("pets/{id}"));

    let rows = provider
        .query(&created.to_string(), &[], None, None)
        .unwrap();
    assert_eq!(rows.len(), 1);
    let pet = Pet::try_from(rows[0].clone()).unwrap();
    assert_eq!(pet.id, id);
    assert_eq!(pet.name, "Toto");
    assert_eq!(pet.breed, "Terrier");
    assert_eq!(pet.gender, Gender::Male);
    assert_eq!(pet.weight, 7);

    provider
        .insert("pets", &toto().name("Rex").breed("Boxer"))
        .unwrap();

    let removed = provider.delete("pets", None).unwrap();
    assert_eq!(removed, 2);
    assert!(provider.query("pets", &[], None, None).unwrap().is_empty());

    assert_eq!(
        notifier.paths(),
        vec![
            PetPath::Collection,
            PetPath::Collection,
            PetPath::Collection
        ]
    );
}
