//! # Basic Paging Example
//!
//! This example demonstrates count-then-fetch paging with DbHelper:
//! - Connecting from a `DatabaseConfig`
//! - Seeding a table with `batch`
//! - Walking every page of a query as text rows
//! - Inspecting the SQL a paged statement generates for each dialect

use dbhelper::prelude::*;
use serde_json::{json, Value};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("📄 DbHelper Basic Paging Example");
    println!("================================");

    let config = DatabaseConfig::new(
        "localhost".to_string(),
        3306,
        "dbhelper".to_string(),
        "root".to_string(),
        "password".to_string(),
        1,    // min_connections
        5,    // max_connections
        30,   // connection_timeout_seconds
        600,  // idle_timeout_seconds
        3600, // max_lifetime_seconds
    );

    let db = DbHelper::new(config).await?;
    db.health_check().await?;
    println!("✅ Connected to MySQL, paging dialect: {}", db.dialect());

    db.execute("DROP TABLE IF EXISTS demo_orders", &[]).await?;
    db.execute(
        "CREATE TABLE demo_orders (ORDER_ID BIGINT PRIMARY KEY, CUSTOMER VARCHAR(64), TOTAL DECIMAL(10,2))",
        &[],
    )
    .await?;

    let rows: Vec<Vec<Value>> = (1..=45)
        .map(|id| vec![json!(id), json!(format!("customer-{}", id % 7)), json!(id as f64 * 9.5)])
        .collect();
    db.batch(
        "INSERT INTO demo_orders (ORDER_ID, CUSTOMER, TOTAL) VALUES (?, ?, ?)",
        &rows,
    )
    .await?;
    println!("✅ Inserted {} orders", rows.len());

    let sql = "SELECT ORDER_ID, CUSTOMER, TOTAL FROM demo_orders WHERE TOTAL > ? ORDER BY ORDER_ID";
    let mut page_no = 1;
    loop {
        let page = db.get_array_page(sql, page_no, 20, &[json!(10)]).await?;
        println!(
            "\n📑 Page {}/{}: rows {}-{} of {}",
            page.current_page(),
            page.page_count(),
            page.start(),
            page.end(),
            page.total_count()
        );
        for row in page.iter().take(3) {
            println!("   {}", row.join(" | "));
        }

        if !page.has_next_page() {
            break;
        }
        page_no += 1;
    }

    println!("\n🔍 Generated SQL");
    for dialect in [Dialect::Offset, Dialect::Rownum] {
        let statement = PagedQuery::new("SELECT * FROM demo_orders")
            .dialect(dialect)
            .page(3)
            .page_size(20)
            .build()?;
        println!("   [{}] count: {}", dialect, statement.count_sql());
        println!("   [{}] page:  {}", dialect, statement.page_sql());
        println!("   [{}] params: {:?}", dialect, statement.page_params());
    }

    db.execute("DROP TABLE demo_orders", &[]).await?;
    println!("\n✅ Done");
    Ok(())
}
