use bytearc::{Decode, Encode, Reader, Writer};

#[derive(Encode, Decode, Debug, PartialEq)]
struct Node {
    name: String,
    weight: u32,
    children: Vec<Node>,
}

fn leaf(name: &str, weight: u32) -> Node {
    Node {
        name: name.into(),
        weight,
        children: Vec::new(),
    }
}

fn main() {
    let tree = Node {
        name: "root".into(),
        weight: 0,
        children: vec![
            Node {
                name: "left".into(),
                weight: 1,
                children: vec![leaf("a", 2), leaf("b", 3)],
            },
            Node {
                name: "right".into(),
                weight: 4,
                children: vec![leaf("c", 5), leaf("d", 6)],
            },
        ],
    };

    let mut buf: Vec<u8> = Vec::new();
    Writer::new(&mut buf).write(&tree).unwrap();
    println!("serialized: {} bytes", buf.len());

    let decoded: Node = Reader::new(&buf).read().unwrap();
    println!("deserialized: {decoded:?}");

    assert_eq!(tree, decoded);
}
