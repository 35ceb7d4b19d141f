mod common;

use common::{Person, ScriptedSession};
use std::collections::VecDeque;
use tabula::prelude::*;

#[test]
fn transaction_runs_on_one_connection() {
    let session = ScriptedSession::default();
    session.connection.borrow_mut().results =
        VecDeque::from([Ok(vec![Person::new(1, "Ann", None).row()])]);

    let entity = Person::entity().unwrap();
    let people = session
        .transaction(&select(entity).r#where(Person::ID.eq(1)))
        .unwrap();

    assert_eq!(people, vec![Person::new(1, "Ann", None)]);
    assert_eq!(session.acquired.get(), 1);
    assert_eq!(session.released.get(), 1);
}

#[test]
fn connection_is_released_on_failure() {
    let session = ScriptedSession::default();
    session.connection.borrow_mut().results =
        VecDeque::from([Err(std::io::Error::other("boom"))]);

    let entity = Person::entity().unwrap();
    let result = session.transaction(&delete(entity));

    assert!(matches!(result, Err(Error::StatementExecution { .. })));
    assert_eq!(session.acquired.get(), 1);
    assert_eq!(session.released.get(), 1);
}

#[test]
fn each_transaction_acquires_its_own_connection() {
    let session = ScriptedSession::default();
    session.connection.borrow_mut().affected = 1;
    let entity = Person::entity().unwrap();

    for id in 1..=3 {
        let inserted = session
            .transaction(&insert(entity).values(&Person::new(id, "x", None)).unwrap())
            .unwrap();
        assert_eq!(inserted, 1);
    }
    assert_eq!(session.acquired.get(), 3);
    assert_eq!(session.released.get(), 3);
}
