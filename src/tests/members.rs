use alloc::vec;
use alloc::vec::Vec;

use crate::members::{self, Members};
use crate::{Error, Reader, Writer, from_slice, to_vec};

mod ledger {
    use alloc::string::String;
    use alloc::vec::Vec;

    #[derive(Debug, Default, PartialEq)]
    pub struct Entry {
        id: u32,
        memo: String,
        amounts: Vec<i64>,
    }

    impl Entry {
        pub fn new(id: u32, memo: &str, amounts: &[i64]) -> Self {
            Self {
                id,
                memo: memo.into(),
                amounts: amounts.into(),
            }
        }

        pub fn memo(&self) -> &str {
            &self.memo
        }
    }

    crate::members! {
        Entry { id: u32, memo: String, amounts: Vec<i64> }
    }
}

use ledger::Entry;

#[derive(Debug, Default, PartialEq)]
struct Outer {
    tag: u8,
    entry: Entry,
}

crate::members! {
    Outer { tag: u8, entry: Entry, }
}

#[derive(Debug, Default, PartialEq)]
struct Empty {}

crate::members! { Empty {} }

#[test]
fn test_member_count() {
    assert_eq!(<Entry as Members>::COUNT, 3);
    assert_eq!(<Outer as Members>::COUNT, 2);
    assert_eq!(<Empty as Members>::COUNT, 0);
}

#[test]
fn test_private_fields_in_order() {
    let entry = Entry::new(5, "rent", &[-100, 20]);
    let bytes = to_vec(&entry).unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(&5u32.to_le_bytes());
    expected.extend_from_slice(&to_vec("rent").unwrap());
    expected.extend_from_slice(&to_vec(&vec![-100i64, 20]).unwrap());
    assert_eq!(bytes, expected);

    let back: Entry = from_slice(&bytes).unwrap();
    assert_eq!(back, entry);
    assert_eq!(back.memo(), "rent");
}

#[test]
fn test_members_encode_like_field_tuple() {
    let entry = Entry::new(1, "x", &[]);
    let mut buf: Vec<u8> = Vec::new();
    let mut w = Writer::new(&mut buf);
    members::encode_members(&entry, &mut w).unwrap();
    assert_eq!(w.written(), to_vec(&(1u32, "x", Vec::<i64>::new())).unwrap());
}

#[test]
fn test_nested_members() {
    let value = Outer {
        tag: 9,
        entry: Entry::new(2, "fee", &[3]),
    };
    let bytes = to_vec(&value).unwrap();
    assert_eq!(bytes[0], 9);
    assert_eq!(from_slice::<Outer>(&bytes).unwrap(), value);
}

#[test]
fn test_empty_members() {
    assert!(to_vec(&Empty {}).unwrap().is_empty());
    assert_eq!(from_slice::<Empty>(&[]).unwrap(), Empty {});
}

#[test]
fn test_decode_members_in_place() {
    let bytes = to_vec(&Entry::new(7, "new", &[1, 2, 3])).unwrap();

    let mut dest = Entry::new(0, "old memo", &[9; 8]);
    members::decode_members_in_place(&mut dest, &mut Reader::new(&bytes)).unwrap();
    assert_eq!(dest, Entry::new(7, "new", &[1, 2, 3]));
}

#[test]
fn test_truncated_members() {
    let bytes = to_vec(&Entry::new(7, "abc", &[])).unwrap();
    let result = from_slice::<Entry>(&bytes[..6]);
    assert!(matches!(result, Err(Error::OutOfRange { .. })));
}

#[test]
fn test_members_refs_are_nested_pairs() {
    let value = Outer {
        tag: 4,
        entry: Entry::default(),
    };
    let (tag, (entry, ())) = value.members();
    assert_eq!(*tag, 4);
    assert_eq!(entry, &Entry::default());

    let mut value = value;
    let (tag, _) = value.members_mut();
    *tag = 5;
    assert_eq!(value.tag, 5);
}
