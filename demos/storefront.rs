//! Storefront Demo
//!
//! Runs the list-query helpers over the demo catalog: search, category
//! filter, sort and pagination, rendered as a table.
//!
//! Use `-s` to search titles and brands
//! Use `-c` to filter by category (`all` for everything)
//! Use `-p`/`--page-size` to page through the results

use anyhow::Result;
use clap::Parser;
use tabled::{Table, Tabled};

use shopfront::{
    catalog::Product,
    fixtures,
    money::format_usd,
    query::{self, FieldAccessor, SortDirection},
};

/// Arguments for the storefront demo.
#[derive(Debug, Parser)]
struct Args {
    /// Search term matched against title and brand
    #[clap(short, long, default_value = "")]
    search: String,

    /// Category filter
    #[clap(short, long, default_value = query::ALL)]
    category: String,

    /// 1-indexed page number
    #[clap(short, long, default_value_t = 1)]
    page: usize,

    /// Page size
    #[clap(long, default_value_t = 12)]
    page_size: usize,
}

#[derive(Debug, Tabled)]
struct ProductRow {
    #[tabled(rename = "Id")]
    id: u64,

    #[tabled(rename = "Title")]
    title: String,

    #[tabled(rename = "Brand")]
    brand: String,

    #[tabled(rename = "Category")]
    category: String,

    #[tabled(rename = "Price")]
    price: String,

    #[tabled(rename = "Stock")]
    stock: u32,
}

const SEARCH_FIELDS: &[FieldAccessor<Product>] = &[
    |product| Some(product.title.as_str()),
    |product| Some(product.brand.as_str()),
];

/// Storefront Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = Args::parse();

    let catalog = fixtures::demo_catalog()?;

    let searched = query::filter_by_search(catalog.products(), &args.search, SEARCH_FIELDS);

    let mut filtered: Vec<&Product> = query::filter_by_field(
        &searched,
        |product| Some(product.category.as_str()),
        &args.category,
    )
    .into_iter()
    .copied()
    .collect();

    query::sort_by_key(&mut filtered, |product| product.price, SortDirection::Ascending);

    let page = query::paginate(&filtered, args.page, args.page_size);

    let rows: Vec<ProductRow> = page
        .iter()
        .map(|product| ProductRow {
            id: product.id,
            title: product.title.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            price: format_usd(product.price),
            stock: product.stock,
        })
        .collect();

    println!("{}", Table::new(rows));
    println!(
        "Page {} of {} ({} matching products)",
        args.page,
        query::total_pages(filtered.len(), args.page_size),
        filtered.len()
    );

    Ok(())
}
