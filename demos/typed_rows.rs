//! # Typed Rows Example
//!
//! This example demonstrates mapping rows onto structs:
//! - Loading configuration from `dbhelper.toml`
//! - `get_bean` and `get_bean_list` for single rows and lists
//! - `get_page` for a typed page
//! - A custom `RowMapper` used through `DbHelper::page`

use dbhelper::prelude::*;
use serde::Deserialize;
use serde_json::json;

/// Column names like `PRODUCT_NAME` bind to `productName`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: i64,
    pub product_name: String,
    pub price: Option<String>,
}

/// Renders each row as a single label
struct LabelMapper;

impl RowMapper for LabelMapper {
    type Output = String;

    fn map_row(&self, row: &RawRow) -> Result<String, MappingError> {
        let id = row.get(0)?;
        let name = row.get(1)?;
        Ok(format!("#{} {}", id, name.as_str().unwrap_or_default()))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧩 DbHelper Typed Rows Example");
    println!("==============================");

    let config = AppConfig::load()?;
    let db = DbHelper::from_config(config).await?;
    println!("✅ Connected, default page size {}", db.default_page_size().get());

    db.execute("DROP TABLE IF EXISTS demo_products", &[]).await?;
    db.execute(
        "CREATE TABLE demo_products (PRODUCT_ID BIGINT PRIMARY KEY, PRODUCT_NAME VARCHAR(64), PRICE DECIMAL(8,2) NULL)",
        &[],
    )
    .await?;
    let rows = (1..=12)
        .map(|id| vec![json!(id), json!(format!("product {}", id)), json!(id * 3)])
        .collect::<Vec<_>>();
    db.batch(
        "INSERT INTO demo_products (PRODUCT_ID, PRODUCT_NAME, PRICE) VALUES (?, ?, ?)",
        &rows,
    )
    .await?;

    let one = db
        .get_bean::<Product>("SELECT * FROM demo_products WHERE PRODUCT_ID = ?", &[json!(7)])
        .await?;
    println!("\n🔎 Single row: {:?}", one);

    let cheap = db
        .get_bean_list::<Product>("SELECT * FROM demo_products WHERE PRICE < ?", &[json!(10)])
        .await?;
    println!("💰 {} products under 10", cheap.len());

    let page = db
        .get_page::<Product>("SELECT * FROM demo_products ORDER BY PRODUCT_ID", 2, 5, &[])
        .await?;
    println!(
        "\n📑 Typed page {}/{} ({} rows)",
        page.current_page(),
        page.page_count(),
        page.available_count()
    );
    for product in &page {
        println!("   {} {}", product.product_id, product.product_name);
    }

    let query = db
        .paged("SELECT PRODUCT_ID, PRODUCT_NAME FROM demo_products ORDER BY PRODUCT_ID")
        .page(3)
        .page_size(5);
    let labels = db.page(query, &LabelMapper).await?;
    println!("\n🏷️  Custom mapper: {:?}", labels.rows());

    db.execute("DROP TABLE demo_products", &[]).await?;
    println!("\n✅ Done");
    Ok(())
}
