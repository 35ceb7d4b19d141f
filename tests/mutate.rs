mod common;

use common::{Person, ScriptedConnection};
use tabula::prelude::*;

fn ann() -> Person {
    Person::new(1, "Ann", None)
}

#[test]
fn insert_record() {
    let entity = Person::entity().unwrap();
    assert_eq!(
        insert(entity).values(&ann()).unwrap().render().unwrap(),
        "insert into persontable(id, name, age) values(1, 'Ann', NULL)"
    );
}

#[test]
fn insert_partial_values() {
    let entity = Person::entity().unwrap();
    let statement = insert(entity).values_from([
        Person::AGE.eq(41),
        Person::ID.eq(7),
    ]);
    assert_eq!(
        statement.render().unwrap(),
        "insert into persontable(id, name, age) values(7, NULL, 41)"
    );
}

#[test]
fn upsert() {
    let entity = Person::entity().unwrap();
    let action = conflicting_update(entity).set_values([
        Person::NAME.eq(String::from("Ann")),
        Person::AGE.eq(31),
    ]);
    let statement = insert(entity)
        .values(&ann())
        .unwrap()
        .on_conflict(&[&Person::ID], action);
    assert_eq!(
        statement.render().unwrap(),
        "insert into persontable(id, name, age) values(1, 'Ann', NULL) \
         on conflict (id) do update set name = 'Ann', age = 31"
    );
}

#[test]
fn update_with_where() {
    let entity = Person::entity().unwrap();
    let statement = update(entity)
        .set_values([Person::AGE.eq(31)])
        .r#where(Person::ID.eq(1));
    assert_eq!(
        statement.render().unwrap(),
        "update persontable set age = 31 where id = 1"
    );
}

#[test]
fn update_from_record() {
    let entity = Person::entity().unwrap();
    assert_eq!(
        update(entity).set(&ann()).unwrap().render().unwrap(),
        "update persontable set id = 1, name = 'Ann', age = NULL"
    );
}

#[test]
fn delete_statements() {
    let entity = Person::entity().unwrap();
    assert_eq!(delete(entity).render().unwrap(), "delete from persontable");
    assert_eq!(
        delete(entity).r#where(Person::ID.eq(1)).render().unwrap(),
        "delete from persontable where id = 1"
    );
    assert_eq!(
        delete(entity)
            .where_matches(&Person::new(2, "Bo", Some(40)))
            .unwrap()
            .render()
            .unwrap(),
        "delete from persontable where id = 2 and name = 'Bo' and age = 40"
    );
}

#[test]
fn mutations_return_affected_rows() {
    let entity = Person::entity().unwrap();
    let mut conn = ScriptedConnection::affecting(3);

    let inserted = insert(entity).values(&ann()).unwrap().execute(&mut conn).unwrap();
    let updated = update(entity)
        .set_values([Person::AGE.eq(None::<i32>)])
        .r#where(Person::NAME.eq(String::from("Ann")))
        .execute(&mut conn)
        .unwrap();
    let deleted = delete(entity).execute(&mut conn).unwrap();

    assert_eq!((inserted, updated, deleted), (3, 3, 3));
    assert_eq!(
        conn.statements,
        [
            "insert into persontable(id, name, age) values(1, 'Ann', NULL)",
            "update persontable set age = NULL where name = 'Ann'",
            "delete from persontable",
        ]
    );
}

#[test]
fn failed_mutation_carries_the_statement() {
    let entity = Person::entity().unwrap();
    let mut conn = ScriptedConnection::failing("relation does not exist");
    let err = delete(entity)
        .r#where(Person::ID.eq(1))
        .execute(&mut conn)
        .unwrap_err();
    match err {
        Error::StatementExecution { statement, source } => {
            assert_eq!(statement, "delete from persontable where id = 1");
            assert_eq!(source.to_string(), "relation does not exist");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
