//! Record collection tests

use data_record_sdk::{CollectionError, Record, RecordCollection};
use serde_json::json;

fn record(entries: &[(&str, serde_json::Value)]) -> Record {
    let mut record = Record::new();
    for (key, value) in entries {
        record.set(*key, value.clone());
    }
    record
}

mod membership_tests {
    use super::*;

    #[test]
    fn test_add_keyed_then_get_returns_the_member() {
        let mut collection = RecordCollection::new();
        collection
            .add_keyed("first", record(&[("id", json!(1))]))
            .unwrap();
        collection
            .add_keyed("second", record(&[("id", json!(2))]))
            .unwrap();

        assert_eq!(collection.get("first").unwrap(), &record(&[("id", json!(1))]));
        assert_eq!(collection.get("second").unwrap(), &record(&[("id", json!(2))]));
    }

    #[test]
    fn test_duplicate_key_fails_and_leaves_collection_unchanged() {
        let mut collection = RecordCollection::new();
        collection
            .add_keyed("dup", record(&[("id", json!(1))]))
            .unwrap();

        let err = collection
            .add_keyed("dup", record(&[("id", json!(2))]))
            .unwrap_err();
        assert!(matches!(err, CollectionError::DuplicateKey(key) if key == "dup"));

        assert_eq!(collection.len(), 1);
        assert_eq!(
            collection.get("dup").unwrap().get("id"),
            Some(&json!(1))
        );
    }

    #[test]
    fn test_get_unused_key_fails() {
        let collection = RecordCollection::new();
        let err = collection.get("nope").unwrap_err();
        assert!(matches!(err, CollectionError::KeyNotFound(key) if key == "nope"));
    }

    #[test]
    fn test_positional_members_are_not_addressable_by_key() {
        let mut collection = RecordCollection::new();
        collection.add(record(&[("id", json!(1))]));
        assert_eq!(collection.len(), 1);
        assert!(collection.get("0").is_err());
    }

    #[test]
    fn test_delete_removes_keyed_entry_and_is_a_noop_otherwise() {
        let mut collection = RecordCollection::new();
        collection.add(record(&[("id", json!(0))]));
        collection
            .add_keyed("middle", record(&[("id", json!(1))]))
            .unwrap();
        collection.add(record(&[("id", json!(2))]));

        collection.delete("middle");
        assert_eq!(collection.len(), 2);
        assert!(collection.get("middle").is_err());

        // no-op on an unused key
        collection.delete("middle");
        assert_eq!(collection.len(), 2);

        // remaining members keep their order
        let ids: Vec<_> = collection
            .items()
            .map(|r| r.get("id").cloned().unwrap())
            .collect();
        assert_eq!(ids, vec![json!(0), json!(2)]);
    }

    #[test]
    fn test_items_iterates_in_insertion_order() {
        let mut collection = RecordCollection::new();
        collection.add(record(&[("id", json!(1))]));
        collection
            .add_keyed("k", record(&[("id", json!(2))]))
            .unwrap();
        collection.add(record(&[("id", json!(3))]));

        let ids: Vec<_> = collection
            .items()
            .map(|r| r.get("id").cloned().unwrap())
            .collect();
        assert_eq!(ids, vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_get_mut_allows_member_mutation() {
        let mut collection = RecordCollection::new();
        collection
            .add_keyed("k", record(&[("id", json!(1))]))
            .unwrap();

        collection.get_mut("k").unwrap().set("id", 9);
        assert_eq!(collection.get("k").unwrap().get("id"), Some(&json!(9)));
    }
}

mod export_tests {
    use super::*;

    #[test]
    fn test_to_json_batches_member_views() {
        let mut collection = RecordCollection::new();
        collection.add(record(&[("id", json!(1)), ("name", json!("a"))]));
        collection.add(record(&[("id", json!(2)), ("name", json!("b"))]));

        let json = collection.to_json(&[], &[], false).unwrap();
        assert_eq!(json, r#"[{"id":1,"name":"a"},{"id":2,"name":"b"}]"#);
    }

    #[test]
    fn test_to_json_with_projection_and_strip() {
        let mut collection = RecordCollection::new();
        collection.add(record(&[("id", json!(1)), ("name", json!("a"))]));
        collection.add(record(&[("id", json!(2)), ("name", json!("b"))]));

        assert_eq!(
            collection.to_json(&["name"], &[], false).unwrap(),
            r#"[{"name":"a"},{"name":"b"}]"#
        );
        assert_eq!(
            collection.to_json(&["name"], &[], true).unwrap(),
            r#"[["a"],["b"]]"#
        );
    }

    #[test]
    fn test_empty_collection_exports_empty_array() {
        let collection = RecordCollection::new();
        assert_eq!(collection.to_json(&[], &[], false).unwrap(), "[]");
    }

    #[test]
    fn test_to_csv_one_line_per_member() {
        let mut collection = RecordCollection::new();
        collection.add(record(&[("a", json!(1)), ("b", json!(2))]));
        collection.add(record(&[("a", json!(3)), ("b", json!(4))]));

        let csv = collection.to_csv(&[], &[]).unwrap();
        assert_eq!(csv, "a,b\n1,2\n3,4\n");
    }

    #[test]
    fn test_to_csv_missing_member_keys_render_empty() {
        let mut collection = RecordCollection::new();
        collection.add(record(&[("a", json!(1)), ("b", json!(2))]));
        collection.add(record(&[("a", json!(3))]));

        let csv = collection.to_csv(&["a", "b"], &[]).unwrap();
        assert_eq!(csv, "a,b\n1,2\n3,\n");
    }

    #[test]
    fn test_to_xml_wraps_members_in_item_elements() {
        let mut collection = RecordCollection::new();
        collection.add(record(&[("id", json!(1))]));
        collection.add(record(&[("id", json!(2))]));

        let xml = collection.to_xml(&[], &[], false).unwrap();
        assert!(xml.starts_with("<root>"));
        assert!(xml.contains("<item>"));
        assert!(xml.contains("<id>1</id>"));
        assert!(xml.contains("<id>2</id>"));
        assert!(xml.ends_with("</root>"));
    }
}
