//! Common test documents and snapshot builders

use bson::oid::ObjectId;
use bson::spec::BinarySubtype;
use bson::{bson, doc, Binary, Bson, Document};

/// Common test database names
pub mod databases {
    pub const SHOP: &str = "shop";
    pub const TARGET: &str = "restored";
}

/// A user document with the shapes the snapshot codec must preserve:
/// an ObjectId identifier, a nested document and a nested array.
pub fn user_doc(oid_hex: &str, name: &str) -> Document {
    doc! {
        "_id": ObjectId::parse_str(oid_hex).expect("valid ObjectId hex"),
        "name": name,
        "address": {
            "city": "Reykjavik",
            "zip": "101",
        },
        "tags": ["admin", "beta"],
    }
}

/// A document with a driver-generated identifier, a timestamp and a binary
/// field, exercising the tagged extended-JSON encodings.
pub fn event_doc(kind: &str, at_millis: i64) -> Document {
    doc! {
        "_id": ObjectId::new(),
        "kind": kind,
        "at": bson::DateTime::from_millis(at_millis),
        "payload": bson!({ "seq": [1, 2, 3] }),
        "digest": Bson::Binary(Binary {
            subtype: BinarySubtype::Generic,
            bytes: vec![0xde, 0xad, 0xbe, 0xef],
        }),
    }
}

/// A document with a plain string identifier
pub fn keyed_doc(id: &str, value: i32) -> Document {
    doc! { "_id": id, "value": value }
}

/// n keyed documents, ids `{prefix}-0` .. `{prefix}-{n-1}`
pub fn keyed_docs(prefix: &str, n: usize) -> Vec<Document> {
    (0..n)
        .map(|i| keyed_doc(&format!("{}-{}", prefix, i), i as i32))
        .collect()
}

pub mod oids {
    pub const ALICE: &str = "507f1f77bcf86cd799439011";
    pub const BOB: &str = "507f1f77bcf86cd799439012";
    pub const CAROL: &str = "507f191e810c19729de860ea";
}
