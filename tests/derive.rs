//! Integration test for the Properties derive macro.

use prospect::{Error, IntrospectorExt, Properties, StandardIntrospector};

#[derive(Properties, Debug, Clone, PartialEq)]
struct Account {
    owner: String,
    #[property(read_only)]
    id: u64,
    #[property(rename = "displayName")]
    display_name: String,
    #[property(write_only)]
    password: String,
    #[property(skip)]
    #[allow(dead_code)]
    cache: Vec<u8>,
}

#[derive(Properties)]
struct Empty {}

fn account() -> Account {
    Account {
        owner: "ada".into(),
        id: 7,
        display_name: "Ada".into(),
        password: "secret".into(),
        cache: vec![1, 2, 3],
    }
}

fn introspector() -> StandardIntrospector {
    let introspector = StandardIntrospector::new();
    introspector.registry().register::<Account>().unwrap();
    introspector.registry().register::<Empty>().unwrap();
    introspector
}

#[test]
fn test_derived_descriptors() {
    let properties = Account::properties();
    let names: Vec<_> = properties.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["owner", "id", "displayName", "password"]);

    let id = &properties[1];
    assert!(id.is_readable() && !id.is_writable());
    let password = &properties[3];
    assert!(!password.is_readable() && password.is_writable());
}

#[test]
fn test_derived_accessors() {
    let accessors = introspector().introspect_type::<Account>().unwrap();
    let names: Vec<_> = accessors.iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["owner", "id", "displayName"]);
}

#[test]
fn test_derived_read_write() {
    let accessors = introspector().introspect_type::<Account>().unwrap();
    let mut account = account();

    let owner = &accessors[0];
    owner.write_as(&mut account, String::from("grace")).unwrap();
    assert_eq!(owner.read_as::<String>(&account).unwrap(), "grace");

    let display_name = &accessors[2];
    assert_eq!(display_name.read_as::<String>(&account).unwrap(), "Ada");
    assert_eq!(account.password, "secret");
}

#[test]
fn test_derived_read_only_field() {
    let accessors = introspector().introspect_type::<Account>().unwrap();
    let mut account = account();

    let id = &accessors[1];
    assert!(!id.is_writable());
    assert!(matches!(
        id.write_as(&mut account, 8_u64),
        Err(Error::UnsupportedOperation { .. })
    ));
    assert_eq!(id.read_as::<u64>(&account).unwrap(), 7);
}

#[test]
fn test_derived_empty_struct() {
    assert!(Empty::properties().is_empty());
    assert!(introspector().introspect_type::<Empty>().unwrap().is_empty());
}
