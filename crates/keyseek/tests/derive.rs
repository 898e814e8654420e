//! Integration tests for `#[derive(Record)]`.

#![cfg(feature = "macros")]
#![allow(dead_code)] // skipped fields are never read

use keyseek::{
    FieldEnum, FindOptions, Finder, MemoryTable, Number, Record, Timestamp, Value,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Draft,
    Review,
    Published,
}

impl FieldEnum for Status {
    fn discriminant(&self) -> u32 {
        match self {
            Status::Draft => 0,
            Status::Review => 1,
            Status::Published => 2,
        }
    }
}

#[derive(Debug, Record)]
struct Post {
    id: u64,
    #[column(rename = "author_id")]
    author: u32,
    title: String,
    #[column(skip)]
    body: String,
    #[column(Enum)]
    status: Status,
    #[column(Timestamp)]
    published_at: i64,
    pinned: bool,
    score: Option<f64>,
    tags: Vec<String>,
}

fn post(id: u64, status: Status, score: Option<f64>) -> Post {
    Post {
        id,
        author: 7,
        title: format!("post {id}"),
        body: "...".into(),
        status,
        published_at: 1_700_000_000_000 + id as i64,
        pinned: id % 2 == 0,
        score,
        tags: vec!["rust".into()],
    }
}

// =============================================================================
// Field reads
// =============================================================================

#[test]
fn reads_annotated_and_inferred_columns() {
    let p = post(4, Status::Review, Some(2.5));

    assert_eq!(p.field_value("id"), Value::Number(Number::U64(4)));
    assert_eq!(p.field_value("author_id"), Value::Number(Number::U64(7)));
    assert_eq!(p.field_value("title"), Value::String("post 4"));
    assert_eq!(p.field_value("status"), Value::Enum(1));
    assert_eq!(
        p.field_value("published_at"),
        Value::Timestamp(Timestamp::from_millis(1_700_000_000_004))
    );
    assert_eq!(p.field_value("pinned"), Value::Bool(true));
    assert_eq!(p.field_value("score"), Value::Number(Number::F64(2.5)));
}

#[test]
fn skipped_renamed_and_unknown_columns_read_as_none() {
    let p = post(1, Status::Draft, None);

    assert!(p.field_value("body").is_none());
    assert!(p.field_value("author").is_none());
    assert!(p.field_value("tags").is_none());
    assert!(p.field_value("nope").is_none());
    assert!(p.field_value("score").is_none());
}

#[test]
fn column_constants() {
    assert_eq!(Post::ID, "id");
    assert_eq!(Post::AUTHOR_ID, "author_id");
    assert_eq!(Post::TITLE, "title");
    assert_eq!(Post::STATUS, "status");
    assert_eq!(Post::PUBLISHED_AT, "published_at");
    assert_eq!(Post::PINNED, "pinned");
    assert_eq!(Post::SCORE, "score");
}

#[test]
fn borrowed_string_columns() {
    #[derive(Record)]
    struct Tag<'a> {
        #[column(String)]
        name: &'a str,
        id: u64,
    }

    let tag = Tag { name: "rust", id: 1 };
    assert_eq!(tag.field_value("name"), Value::String("rust"));
    assert_eq!(Tag::NAME, "name");
}

// =============================================================================
// Derived records in lookups
// =============================================================================

#[test]
fn enum_columns_order_by_discriminant() {
    let posts = vec![
        post(1, Status::Published, None),
        post(2, Status::Draft, None),
        post(3, Status::Review, None),
        post(4, Status::Draft, None),
    ];
    // status ASC, id ASC: 2 4 3 1
    let order = format!("{} ASC", Post::STATUS);
    let finder = Finder::new(MemoryTable::new(&posts))
        .with_context(FindOptions::new().order(order.as_str()));

    let (next, prev) = finder.find_next_and_prev(&posts[3]).unwrap();
    assert_eq!(next.map(|p| p.id), Some(3));
    assert_eq!(prev.map(|p| p.id), Some(2));
}

#[test]
fn missing_optional_values_sort_last() {
    let posts = vec![
        post(1, Status::Draft, Some(3.0)),
        post(2, Status::Draft, None),
        post(3, Status::Draft, Some(1.0)),
    ];
    let table = MemoryTable::new(&posts);
    let request = keyseek::QueryRequest {
        predicate: None,
        order: keyseek::OrderSpec::parse("score", &Default::default()).unwrap(),
        limit: usize::MAX,
    };

    let ids: Vec<u64> = table.select(&request).unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}
