#![allow(missing_docs)]

use fieldwise::{serialize, Fieldwise, JsonArchive, PropertyList, Serializable};
use serde_json::json;

#[derive(Debug, Default, Clone, PartialEq, Serializable)]
struct Account {
    #[fieldwise(rename = "user_name")]
    name: String,
    balance: i64,
    #[fieldwise(skip)]
    session: Option<std::time::Duration>,
}

#[derive(Debug, Default, Clone, PartialEq, Serializable)]
struct Tagged<T: Default> {
    tag: String,
    value: T,
}

#[derive(Debug, Default, Clone, PartialEq, Serializable)]
struct Pixel {
    r: u8,
    g: u8,
    b: u8,
}

#[derive(Debug, Default, PartialEq, Serializable)]
struct Marker;

#[test]
fn test_rename_and_skip() -> fieldwise::Result<()> {
    let account = Account {
        name: "ada".into(),
        balance: -20,
        session: Some(std::time::Duration::from_secs(5)),
    };

    assert_eq!(Account::PROPERTIES.names(), vec!["user_name", "balance"]);

    let archive: JsonArchive = serialize(&account)?;
    assert_eq!(archive.storage(), &json!({ "user_name": "ada", "balance": -20 }));
    Ok(())
}

#[test]
fn test_skipped_fields_are_left_untouched() -> fieldwise::Result<()> {
    let session = Some(std::time::Duration::from_millis(250));
    let mut account = Account {
        name: "old".into(),
        balance: 0,
        session,
    };

    fieldwise::deserialize(
        &JsonArchive::from_json_str(r#"{"user_name":"new","balance":9}"#)?,
        &mut account,
    )?;

    assert_eq!(account.name, "new");
    assert_eq!(account.balance, 9);
    assert_eq!(account.session, session);
    Ok(())
}

#[test]
fn test_generic_composites() -> fieldwise::Result<()> {
    let scalar = Tagged {
        tag: "answer".into(),
        value: 42_u64,
    };
    let nested = Tagged {
        tag: "teal".into(),
        value: Pixel { r: 0, g: 128, b: 128 },
    };

    assert_eq!(
        Fieldwise::to_string(&nested)?,
        r#"{"tag":"teal","value":{"b":128,"g":128,"r":0}}"#
    );

    let scalar_back: Tagged<u64> = Fieldwise::from_str(&Fieldwise::to_string(&scalar)?)?;
    let nested_back: Tagged<Pixel> = Fieldwise::from_str(&Fieldwise::to_string(&nested)?)?;
    assert_eq!(scalar_back, scalar);
    assert_eq!(nested_back, nested);
    Ok(())
}

#[test]
fn test_unit_struct_is_an_empty_object() -> fieldwise::Result<()> {
    assert_eq!(Fieldwise::to_string(&Marker)?, "{}");
    assert_eq!(Fieldwise::from_str::<Marker>("{}")?, Marker);
    Ok(())
}
