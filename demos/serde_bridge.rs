use bytearc::{ArchiveSerde, Decode, Encode};

#[derive(Encode, Decode, Debug, PartialEq)]
struct Message {
    id: u32,
    text: String,
}

fn main() {
    let msg = Message {
        id: 42,
        text: String::from("hello bytearc"),
    };

    let wrapped = ArchiveSerde(msg);
    let json = serde_json::to_string(&wrapped).unwrap();
    println!("json: {json}");

    let decoded: ArchiveSerde<Message> = serde_json::from_str(&json).unwrap();
    println!("deserialized: {:?}", decoded.0);

    assert_eq!(wrapped.0, decoded.0);
}
