//! Buffered writes through transactions.

use tripod_core::{CoreError, TransactionState, WriteTarget};
use tripod_store::{StoreError, Term};
use tripod_testkit::prelude::*;

#[test]
fn only_saves_on_commit() {
    init_tracing();
    let repo = TestRepository::memory();
    let mut unsaved = unsaved_person();
    let mut saved = saved_person(&repo);
    let mut txn = repo.begin();

    assert!(repo.save(&mut unsaved, WriteTarget::Buffered(&mut txn)).unwrap());
    saved.set("http://pred2", "blah");
    assert!(repo.save(&mut saved, WriteTarget::Buffered(&mut txn)).unwrap());

    // nothing should have changed yet
    assert!(repo.find(UNSAVED_URI).unwrap_err().is_not_found());
    assert_eq!(
        repo.find(SAVED_URI).unwrap()["http://pred2"],
        Term::iri("http://obj2")
    );

    repo.commit(&mut txn).unwrap();

    assert!(repo.find(UNSAVED_URI).is_ok());
    assert_eq!(repo.find(SAVED_URI).unwrap()["http://pred2"].as_str(), "blah");
}

#[test]
fn invalid_saves_are_silently_ignored() {
    let repo = TestRepository::memory();
    let mut unsaved = unsaved_person();
    let mut saved = saved_person(&repo);
    let mut txn = repo.begin();

    unsaved.set_uri("");
    assert!(!repo.save(&mut unsaved, WriteTarget::Buffered(&mut txn)).unwrap());

    saved.set("http://pred2", "blah");
    assert!(repo.save(&mut saved, WriteTarget::Buffered(&mut txn)).unwrap());
    assert_eq!(txn.len(), 1);

    repo.commit(&mut txn).unwrap();

    assert!(repo.find(unsaved.uri()).unwrap_err().is_not_found());
    assert!(repo.find(UNSAVED_URI).unwrap_err().is_not_found());
    assert_eq!(repo.find(SAVED_URI).unwrap()["http://pred2"].as_str(), "blah");
}

#[test]
fn can_be_aborted() {
    let repo = TestRepository::memory();
    let mut unsaved = unsaved_person();
    let mut txn = repo.begin();

    repo.save(&mut unsaved, WriteTarget::Buffered(&mut txn)).unwrap();
    assert!(!txn.query().is_empty());

    repo.abort(&mut txn).unwrap();

    assert!(txn.query().trim().is_empty());
    assert_eq!(txn.state(), TransactionState::Aborted);
    assert!(repo.find(UNSAVED_URI).unwrap_err().is_not_found());
}

#[test]
fn destroy_is_buffered_until_commit() {
    let repo = TestRepository::memory();
    let saved = saved_person(&repo);
    let mut txn = repo.begin();

    assert!(repo.destroy(&saved, WriteTarget::Buffered(&mut txn)).unwrap());
    assert!(repo.find(SAVED_URI).is_ok());

    repo.commit(&mut txn).unwrap();
    assert!(repo.find(SAVED_URI).unwrap_err().is_not_found());
}

#[test]
fn later_units_supersede_earlier_ones() {
    let repo = TestRepository::memory();
    let mut person = unsaved_person();
    let mut txn = repo.begin();

    repo.save(&mut person, WriteTarget::Buffered(&mut txn)).unwrap();
    repo.destroy(&person, WriteTarget::Buffered(&mut txn)).unwrap();
    person.set("http://pred", "final");
    repo.save(&mut person, WriteTarget::Buffered(&mut txn)).unwrap();

    repo.commit(&mut txn).unwrap();

    let found = repo.find(UNSAVED_URI).unwrap();
    let values: Vec<_> = found.get("http://pred").into_iter().map(Term::as_str).collect();
    assert_eq!(values, vec!["final"]);
}

#[test]
fn commit_is_one_batch() {
    let store = FaultyStore::new();
    let repo = TestRepository::with_store(store.clone());
    let mut a = unsaved_person();
    let mut b = unsaved_person();
    b.set_uri("http://uri3");
    let mut txn = repo.begin();

    repo.save(&mut a, WriteTarget::Buffered(&mut txn)).unwrap();
    repo.save(&mut b, WriteTarget::Buffered(&mut txn)).unwrap();
    let receipt = repo.commit(&mut txn).unwrap();

    assert_eq!(receipt.mutations, 2);
    assert_eq!(receipt.transaction, txn.id());
    assert_eq!(store.batch_sizes(), vec![2]);
}

#[test]
fn failed_commit_applies_nothing_and_stays_open() {
    let store = FaultyStore::new();
    let repo = TestRepository::with_store(store.clone());
    let mut person = unsaved_person();
    let mut txn = repo.begin();
    repo.save(&mut person, WriteTarget::Buffered(&mut txn)).unwrap();

    store.set_failing(true);
    let err = repo.commit(&mut txn).unwrap_err();

    assert!(matches!(err, CoreError::Store(StoreError::Unavailable(_))));
    assert!(txn.is_open());
    assert_eq!(txn.len(), 1);
    assert!(repo.find(UNSAVED_URI).unwrap_err().is_not_found());

    // A retry after the store recovers applies the same buffer.
    store.set_failing(false);
    repo.commit(&mut txn).unwrap();
    assert!(repo.find(UNSAVED_URI).is_ok());
}

#[test]
fn immediate_store_failure_propagates() {
    let store = FaultyStore::new();
    let repo = TestRepository::with_store(store.clone());
    store.set_failing(true);

    let mut person = unsaved_person();
    let err = repo.save(&mut person, WriteTarget::Immediate).unwrap_err();
    assert!(matches!(err, CoreError::Store(_)));
}

#[test]
fn commit_keeps_applied_query() {
    let repo = TestRepository::memory();
    let mut person = unsaved_person();
    let mut txn = repo.begin();
    repo.save(&mut person, WriteTarget::Buffered(&mut txn)).unwrap();
    let pending = txn.query();

    repo.commit(&mut txn).unwrap();

    assert!(txn.query().is_empty());
    assert_eq!(txn.applied_query(), Some(pending.as_str()));
}

#[test]
fn reuse_after_commit_fails_fast() {
    let repo = TestRepository::memory();
    let mut txn = repo.begin();
    repo.commit(&mut txn).unwrap();

    let mut person = unsaved_person();
    let err = repo
        .save(&mut person, WriteTarget::Buffered(&mut txn))
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::TransactionClosed {
            state: TransactionState::Committed,
            ..
        }
    ));
    assert!(repo.commit(&mut txn).is_err());
    assert!(repo.abort(&mut txn).is_err());
    assert!(repo.find(UNSAVED_URI).unwrap_err().is_not_found());
}
