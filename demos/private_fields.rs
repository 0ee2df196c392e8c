mod inventory {
    #[derive(Debug, Default, PartialEq)]
    pub struct Item {
        sku: u64,
        name: String,
        stock: Option<u32>,
    }

    impl Item {
        pub fn new(sku: u64, name: &str, stock: Option<u32>) -> Self {
            Self {
                sku,
                name: name.into(),
                stock,
            }
        }
    }

    bytearc::members! {
        Item { sku: u64, name: String, stock: Option<u32> }
    }
}

use bytearc::{Reader, Writer};
use inventory::Item;

fn main() {
    let items = vec![
        Item::new(1001, "bolt", Some(250)),
        Item::new(1002, "washer", None),
    ];

    let mut buf: Vec<u8> = Vec::new();
    Writer::new(&mut buf).write(&items).unwrap();
    println!("serialized: {buf:?} ({} bytes)", buf.len());

    let decoded: Vec<Item> = Reader::new(&buf).read().unwrap();
    println!("deserialized: {decoded:?}");

    assert_eq!(items, decoded);
}
