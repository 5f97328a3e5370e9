use mem_sqlite::{
    DatabaseError, EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ROW_SIZE, Record, USERNAME_OFFSET,
    USERNAME_SIZE, layout,
};

fn create_test_record() -> Record {
    Record::new(1, "alice", "alice@example.com").expect("valid record")
}

#[test]
fn test_layout_matches_column_sizes() {
    let layout = layout();

    assert_eq!(layout.id_offset, 0);
    assert_eq!(layout.username_offset, 4);
    assert_eq!(layout.email_offset, 36);
    assert_eq!(layout.row_size, 291);
    assert_eq!(layout.row_size, ROW_SIZE);
}

#[test]
fn test_round_trip() {
    let record = create_test_record();

    let bytes = record.to_bytes();
    let decoded = Record::decode(&bytes);

    assert_eq!(decoded, record);
    assert_eq!(decoded.id, 1);
    assert_eq!(decoded.username(), "alice");
    assert_eq!(decoded.email(), "alice@example.com");
}

#[test]
fn test_encoded_size_is_fixed() {
    let short = Record::new(0, "", "").unwrap();
    let long = Record::new(u32::MAX, &"u".repeat(USERNAME_SIZE), &"e".repeat(EMAIL_SIZE)).unwrap();

    assert_eq!(short.to_bytes().len(), ROW_SIZE);
    assert_eq!(long.to_bytes().len(), ROW_SIZE);
}

#[test]
fn test_byte_layout() {
    let record = create_test_record();
    let bytes = record.to_bytes();

    assert_eq!(&bytes[ID_OFFSET..ID_OFFSET + 4], &1u32.to_le_bytes());
    assert_eq!(&bytes[USERNAME_OFFSET..USERNAME_OFFSET + 5], b"alice");
    assert!(bytes[USERNAME_OFFSET + 5..EMAIL_OFFSET].iter().all(|&b| b == 0));
    assert_eq!(&bytes[EMAIL_OFFSET..EMAIL_OFFSET + 17], b"alice@example.com");
    assert!(bytes[EMAIL_OFFSET + 17..].iter().all(|&b| b == 0));
}

#[test]
fn test_encode_overwrites_previous_slot_contents() {
    let mut slot = [0xFFu8; ROW_SIZE];
    let record = create_test_record();

    record.encode(&mut slot);

    assert_eq!(slot, record.to_bytes());
    assert_eq!(Record::decode(&slot), record);
}

#[test]
fn test_username_at_capacity_does_not_touch_id() {
    let username = "a".repeat(USERNAME_SIZE);
    let record = Record::new(7, &username, "x@y.z").unwrap();
    let bytes = record.to_bytes();

    assert_eq!(&bytes[ID_OFFSET..USERNAME_OFFSET], &7u32.to_le_bytes());
    assert_eq!(&bytes[EMAIL_OFFSET..EMAIL_OFFSET + 5], b"x@y.z");

    let decoded = Record::decode(&bytes);
    assert_eq!(decoded.id, 7);
    assert_eq!(decoded.username(), username);
    assert_eq!(decoded.email(), "x@y.z");
}

#[test]
fn test_username_too_long() {
    let result = Record::new(1, &"a".repeat(USERNAME_SIZE + 1), "a@b.c");

    assert_eq!(
        result,
        Err(DatabaseError::FieldTooLong {
            field: "username",
            len: USERNAME_SIZE + 1,
            max: USERNAME_SIZE,
        })
    );
}

#[test]
fn test_email_too_long() {
    let result = Record::new(1, "a", &"e".repeat(EMAIL_SIZE + 1));

    assert!(matches!(
        result,
        Err(DatabaseError::FieldTooLong { field: "email", .. })
    ));
}

#[test]
fn test_capacity_counts_bytes_not_chars() {
    // 11 three-byte chars = 33 bytes
    let username = "€".repeat(11);

    assert!(Record::new(1, &username, "a@b.c").is_err());
    assert!(Record::new(1, &"€".repeat(10), "a@b.c").is_ok());
}

#[test]
fn test_unused_capacity_is_zero_filled() {
    let record = create_test_record();

    assert_eq!(&record.username_bytes()[..5], b"alice");
    assert!(record.username_bytes()[5..].iter().all(|&b| b == 0));
    assert_eq!(&record.email_bytes()[..17], b"alice@example.com");
    assert!(record.email_bytes()[17..].iter().all(|&b| b == 0));
}

#[test]
fn test_display() {
    let record = create_test_record();

    assert_eq!(record.to_string(), "(1, alice, alice@example.com)");
}
