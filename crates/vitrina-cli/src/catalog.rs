//! Public catalog command handlers for the CLI.

use clap::{Args, Subcommand};
use vitrina_client::ApiClient;
use vitrina_core::{categories_in, total_pages, AppConfig, CatalogFilter, Product};

/// Sub-commands available under `catalog`.
#[derive(Debug, Subcommand)]
pub enum CatalogCommands {
    /// List products matching the given filters
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show a single product
    Show {
        /// Product id
        id: String,
    },
    /// List categories, optionally scoped to one collection
    Categories {
        /// Collection slug
        #[arg(long)]
        collection: Option<String>,
    },
    /// List collections
    Collections,
}

/// Product filters shared by `catalog list` and `admin products list`.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Free-text search over name and description
    #[arg(long)]
    pub search: Option<String>,
    /// Category slug
    #[arg(long)]
    pub category: Option<String>,
    /// Collection slug
    #[arg(long)]
    pub collection: Option<String>,
    /// Only show products that are in stock
    #[arg(long)]
    pub in_stock: bool,
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,
}

impl FilterArgs {
    /// Builds a [`CatalogFilter`]. The page is applied last because every
    /// other setter resets it.
    pub(crate) fn to_filter(&self) -> CatalogFilter {
        let mut filter = CatalogFilter::default();
        if let Some(search) = &self.search {
            filter.set_search(search.as_str());
        }
        filter.set_collection(self.collection.clone());
        filter.set_category(self.category.clone());
        filter.set_in_stock_only(self.in_stock);
        filter.set_page(self.page);
        filter
    }
}

pub(crate) async fn run(config: &AppConfig, command: CatalogCommands) -> anyhow::Result<()> {
    let api = ApiClient::from_config(config)?;
    match command {
        CatalogCommands::List { filter } => run_catalog_list(&api, config, &filter).await,
        CatalogCommands::Show { id } => run_catalog_show(&api, &id).await,
        CatalogCommands::Categories { collection } => {
            run_catalog_categories(&api, collection.as_deref()).await
        }
        CatalogCommands::Collections => run_catalog_collections(&api).await,
    }
}

async fn run_catalog_list(
    api: &ApiClient,
    config: &AppConfig,
    args: &FilterArgs,
) -> anyhow::Result<()> {
    let filter = args.to_filter();
    let page = api.list_products(&filter, config.page_size).await?;
    let pages = total_pages(page.total, config.page_size);

    if page.items.is_empty() {
        println!("no products match");
    }
    for product in &page.items {
        println!("{}", product_row(product));
    }
    println!(
        "page {} of {pages} ({} products)",
        filter.page(),
        page.total
    );
    Ok(())
}

async fn run_catalog_show(api: &ApiClient, id: &str) -> anyhow::Result<()> {
    let product = api.get_product(id).await?;
    println!("{}", product_row(&product));
    if let Some(description) = &product.description {
        println!();
        println!("{description}");
    }
    if let Some(image) = &product.image {
        println!("image: {image}");
    }
    Ok(())
}

async fn run_catalog_categories(api: &ApiClient, collection: Option<&str>) -> anyhow::Result<()> {
    let (categories, collections) =
        futures::try_join!(api.list_categories(), api.list_collections())?;

    for category in categories_in(&categories, collection) {
        let owner = category
            .collection
            .as_deref()
            .and_then(|slug| collections.iter().find(|c| c.slug == slug))
            .map_or("-", |c| c.name.as_str());
        println!("{:<24} {:<32} {owner}", category.slug, category.name);
    }
    Ok(())
}

async fn run_catalog_collections(api: &ApiClient) -> anyhow::Result<()> {
    for collection in api.list_collections().await? {
        println!("{:<24} {}", collection.slug, collection.name);
    }
    Ok(())
}

/// One-line summary used by every product listing.
pub(crate) fn product_row(product: &Product) -> String {
    let stock = if product.in_stock { "in stock" } else { "sold out" };
    let price = product
        .price
        .map_or_else(|| "-".to_owned(), |p| p.to_string());
    format!(
        "{:<16} {:<40} {:>10}  {stock}",
        product.id, product.name, price
    )
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn filter_args_keep_requested_page() {
        let args = FilterArgs {
            search: Some("goku".to_owned()),
            category: Some("anime".to_owned()),
            collection: Some("figures".to_owned()),
            in_stock: true,
            page: 3,
        };
        let filter = args.to_filter();

        assert_eq!(filter.search(), "goku");
        assert_eq!(filter.collection(), Some("figures"));
        assert_eq!(filter.category(), Some("anime"));
        assert!(filter.in_stock_only());
        assert_eq!(filter.page(), 3);
    }

    #[test]
    fn product_row_shows_price_and_stock() {
        let product = Product {
            id: "p-1".to_owned(),
            name: "Goku figure".to_owned(),
            description: None,
            category: None,
            collection: None,
            in_stock: false,
            image: None,
            price: Some(Decimal::new(1999, 2)),
        };
        let row = product_row(&product);
        assert!(row.contains("19.99"));
        assert!(row.ends_with("sold out"));
    }
}
