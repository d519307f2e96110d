use api_types::{Amount, expense::Expense, expense_group::ExpenseGroup};
use chrono::{TimeZone, Utc};
use sea_orm::Database;
use serde_json::json;

use engine::{
    Engine, EngineError, ExpenseGroupFilter, MutationStatus,
    query::{LinkBuilder, LinkParams, ListOptions, PageRequest, RouteName},
};
use migration::MigratorTrait;

struct TestLinks;

impl LinkBuilder for TestLinks {
    fn link(&self, route: RouteName, params: &LinkParams) -> String {
        let query: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("/{}?{}", route.as_str(), query.join("&"))
    }
}

async fn engine() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

fn group(title: &str, status: i32, user_id: &str) -> ExpenseGroup {
    ExpenseGroup {
        id: 0,
        title: title.to_string(),
        description: None,
        expense_group_status_id: status,
        user_id: user_id.to_string(),
        expenses: Vec::new(),
    }
}

fn expense(amount_minor: i64, day: u32) -> Expense {
    Expense {
        id: 0,
        amount: Amount::from_minor(amount_minor),
        date: Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap(),
        description: None,
        expense_group_id: 0,
    }
}

async fn insert(engine: &Engine, group: ExpenseGroup) -> ExpenseGroup {
    let result = engine.insert_expense_group(&group).await;
    assert_eq!(result.status, MutationStatus::Created);
    result.entity.unwrap()
}

fn options(sort: &str, fields: &str, page: u64, page_size: u64) -> ListOptions {
    ListOptions {
        sort: Some(sort.to_string()),
        fields: fields.to_string(),
        page: PageRequest::new(page, page_size),
    }
}

#[tokio::test]
async fn insert_assigns_ids_to_group_and_expenses() {
    let engine = engine().await;
    let mut trip = group("Trip", 1, "alice");
    trip.expenses = vec![expense(1250, 1), expense(300, 2)];

    let created = insert(&engine, trip).await;
    assert!(created.id > 0);
    assert_eq!(created.expenses.len(), 2);
    assert!(created.expenses.iter().all(|e| e.expense_group_id == created.id));
    assert_ne!(created.expenses[0].id, created.expenses[1].id);

    let fetched = engine.expense_group(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn list_pages_and_links() {
    let engine = engine().await;
    for n in 0..7 {
        insert(&engine, group(&format!("G{n}"), 1, "alice")).await;
    }

    let filter = ExpenseGroupFilter {
        status: Some("open".to_string()),
        user_id: None,
    };
    let first = engine
        .list_expense_groups(&filter, &options("id", "", 0, 5), &TestLinks)
        .await
        .unwrap();
    assert_eq!(first.items.len(), 5);
    assert_eq!(first.descriptor.total_count, 7);
    assert_eq!(first.descriptor.total_pages, 2);
    assert_eq!(first.descriptor.previous_page_link, "");
    assert_eq!(
        first.descriptor.next_page_link,
        "/ExpenseGroupsList?page=1&pageSize=5&sort=id&status=open"
    );

    let second = engine
        .list_expense_groups(&filter, &options("id", "", 1, 5), &TestLinks)
        .await
        .unwrap();
    assert_eq!(second.items.len(), 2);
    assert_eq!(second.descriptor.next_page_link, "");
    assert_eq!(
        second.descriptor.previous_page_link,
        "/ExpenseGroupsList?page=0&pageSize=5&sort=id&status=open"
    );
}

#[tokio::test]
async fn page_size_is_capped_at_ten() {
    let engine = engine().await;
    for n in 0..12 {
        insert(&engine, group(&format!("G{n}"), 1, "alice")).await;
    }

    let page = engine
        .list_expense_groups(
            &ExpenseGroupFilter::default(),
            &options("id", "", 0, 50),
            &TestLinks,
        )
        .await
        .unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.descriptor.page_size, 10);
    assert_eq!(page.descriptor.total_pages, 2);
}

#[tokio::test]
async fn page_far_past_the_end_is_empty() {
    let engine = engine().await;
    insert(&engine, group("Only", 1, "alice")).await;

    let page = engine
        .list_expense_groups(
            &ExpenseGroupFilter::default(),
            &options("id", "", u64::MAX / 2, 10),
            &TestLinks,
        )
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.descriptor.total_count, 1);
    assert_eq!(page.descriptor.current_page, u64::MAX / 2);
    assert_eq!(page.descriptor.next_page_link, "");
}

#[tokio::test]
async fn unknown_status_is_no_filter() {
    let engine = engine().await;
    insert(&engine, group("A", 1, "alice")).await;
    insert(&engine, group("B", 2, "alice")).await;
    insert(&engine, group("C", 3, "bob")).await;

    let list = |status: Option<&str>| {
        let filter = ExpenseGroupFilter {
            status: status.map(str::to_string),
            user_id: None,
        };
        let engine = &engine;
        async move {
            engine
                .list_expense_groups(&filter, &options("id", "", 0, 10), &TestLinks)
                .await
                .unwrap()
        }
    };

    let unfiltered = list(None).await;
    let unknown = list(Some("archived")).await;
    assert_eq!(unknown.items, unfiltered.items);
    assert_eq!(unknown.descriptor.total_count, 3);

    let confirmed = list(Some("Confirmed")).await;
    assert_eq!(confirmed.descriptor.total_count, 1);
    assert_eq!(confirmed.items[0].as_full().unwrap().title, "B");
}

#[tokio::test]
async fn user_filter_applies() {
    let engine = engine().await;
    insert(&engine, group("A", 1, "alice")).await;
    insert(&engine, group("B", 1, "bob")).await;

    let filter = ExpenseGroupFilter {
        status: None,
        user_id: Some("bob".to_string()),
    };
    let page = engine
        .list_expense_groups(&filter, &options("id", "", 0, 5), &TestLinks)
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].as_full().unwrap().user_id, "bob");
}

#[tokio::test]
async fn sort_is_stable_across_keys() {
    let engine = engine().await;
    let a = insert(&engine, group("same", 1, "alice")).await;
    let b = insert(&engine, group("same", 2, "alice")).await;
    let c = insert(&engine, group("same", 1, "alice")).await;
    let d = insert(&engine, group("other", 2, "alice")).await;

    let page = engine
        .list_expense_groups(
            &ExpenseGroupFilter::default(),
            &options("-expenseGroupStatusId,title", "id", 0, 10),
            &TestLinks,
        )
        .await
        .unwrap();
    let ids: Vec<i32> = serde_json::to_value(&page.items)
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap() as i32)
        .collect();
    assert_eq!(ids, [d.id, b.id, a.id, c.id]);
}

#[tokio::test]
async fn unknown_sort_field_fails_before_querying() {
    let engine = engine().await;
    let err = engine
        .list_expense_groups(
            &ExpenseGroupFilter::default(),
            &options("title,colour", "", 0, 5),
            &TestLinks,
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidSort("unknown sort field 'colour'".to_string())
    );
}

#[tokio::test]
async fn shaping_loads_expenses_only_when_asked() {
    let engine = engine().await;
    let mut trip = group("Trip", 1, "alice");
    trip.expenses = vec![expense(1250, 1), expense(300, 2)];
    insert(&engine, trip).await;

    let full = engine
        .list_expense_groups(
            &ExpenseGroupFilter::default(),
            &options("id", "", 0, 5),
            &TestLinks,
        )
        .await
        .unwrap();
    assert!(full.items[0].as_full().unwrap().expenses.is_empty());

    let partial = engine
        .list_expense_groups(
            &ExpenseGroupFilter::default(),
            &options("id", "title,expenses.amount", 0, 5),
            &TestLinks,
        )
        .await
        .unwrap();
    assert_eq!(
        serde_json::to_value(&partial.items).unwrap(),
        json!([{ "title": "Trip", "expenses": [{ "amount": "12.50" }, { "amount": "3.00" }] }])
    );
    assert_eq!(
        partial.descriptor.previous_page_link,
        "",
        "single page has no previous link"
    );

    let whole = engine
        .list_expense_groups(
            &ExpenseGroupFilter::default(),
            &options("id", "title,expenses", 0, 5),
            &TestLinks,
        )
        .await
        .unwrap();
    let json = serde_json::to_value(&whole.items).unwrap();
    assert_eq!(json[0]["expenses"][1]["amount"], "3.00");
    assert_eq!(json[0]["expenses"][1]["date"], "2024-03-02T09:00:00Z");
}

#[tokio::test]
async fn update_of_missing_group_is_not_found() {
    let engine = engine().await;
    let result = engine
        .update_expense_group(99, &group("Ghost", 1, "alice"))
        .await;
    assert_eq!(result.status, MutationStatus::NotFound);
    assert_eq!(result.entity, None);
}

#[tokio::test]
async fn update_replaces_scalar_fields() {
    let engine = engine().await;
    let mut trip = group("Trip", 1, "alice");
    trip.expenses = vec![expense(500, 3)];
    let created = insert(&engine, trip).await;

    let mut changed = created.clone();
    changed.title = "Holiday".to_string();
    changed.expense_group_status_id = 3;
    let result = engine.update_expense_group(created.id, &changed).await;
    assert_eq!(result.status, MutationStatus::Updated);

    let updated = result.entity.unwrap();
    assert_eq!(updated.title, "Holiday");
    assert_eq!(updated.expense_group_status_id, 3);
    assert_eq!(updated.expenses, created.expenses);
}

#[tokio::test]
async fn update_with_unknown_status_is_an_error() {
    let engine = engine().await;
    let created = insert(&engine, group("Trip", 1, "alice")).await;

    let mut changed = created.clone();
    changed.expense_group_status_id = 42;
    let result = engine.update_expense_group(created.id, &changed).await;
    assert_eq!(result.status, MutationStatus::Error);

    let unchanged = engine.expense_group(created.id).await.unwrap();
    assert_eq!(unchanged.expense_group_status_id, 1);
}

#[tokio::test]
async fn delete_twice_is_deleted_then_not_found() {
    let engine = engine().await;
    let mut trip = group("Trip", 1, "alice");
    trip.expenses = vec![expense(100, 1)];
    let created = insert(&engine, trip).await;
    let expense_id = created.expenses[0].id;

    let first = engine.delete_expense_group(created.id).await;
    assert_eq!(first.status, MutationStatus::Deleted);
    assert_eq!(first.entity, Some(created.clone()));

    let second = engine.delete_expense_group(created.id).await;
    assert_eq!(second.status, MutationStatus::NotFound);

    assert!(matches!(
        engine.expense(expense_id).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn missing_group_is_key_not_found() {
    let engine = engine().await;
    assert_eq!(
        engine.expense_group(5).await,
        Err(EngineError::KeyNotFound("expense group 5".to_string()))
    );
}
