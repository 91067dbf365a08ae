//! Catalog administration command handlers for the CLI.
//!
//! All commands talk to `/v1/admin/...` with the bearer token from
//! `VITRINA_ADMIN_TOKEN`; the client refuses to send anything without it.

use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use vitrina_client::{ApiClient, ProductInput, TaxonomyInput};
use vitrina_core::{filter_products, paginate, total_pages, AppConfig};

use crate::catalog::{product_row, FilterArgs};

/// Sub-commands available under `admin`.
#[derive(Debug, Subcommand)]
pub enum AdminCommands {
    /// Manage products
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Manage categories
    Categories {
        #[command(subcommand)]
        command: TaxonomyCommands,
    },
    /// Manage collections
    Collections {
        #[command(subcommand)]
        command: TaxonomyCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    /// List all products, filtered and paginated locally
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    Create {
        #[command(flatten)]
        product: ProductArgs,
    },
    Update {
        /// Product id
        id: String,
        #[command(flatten)]
        product: ProductArgs,
    },
    Delete {
        /// Product id
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum TaxonomyCommands {
    Create {
        #[command(flatten)]
        taxonomy: TaxonomyArgs,
    },
    Update {
        /// Record id
        id: String,
        #[command(flatten)]
        taxonomy: TaxonomyArgs,
    },
    Delete {
        /// Record id
        id: String,
    },
}

/// Full product record for create and update. Updates replace every field.
#[derive(Debug, Clone, Args)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    /// Category slug
    #[arg(long)]
    pub category: Option<String>,
    /// Collection slug
    #[arg(long)]
    pub collection: Option<String>,
    #[arg(long)]
    pub in_stock: bool,
    /// Image URL
    #[arg(long)]
    pub image: Option<String>,
    /// Display price, e.g. 19.99
    #[arg(long)]
    pub price: Option<Decimal>,
}

impl From<ProductArgs> for ProductInput {
    fn from(args: ProductArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            category: args.category,
            collection: args.collection,
            in_stock: args.in_stock,
            image: args.image,
            price: args.price,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct TaxonomyArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub slug: String,
    /// Owning collection slug (categories only)
    #[arg(long)]
    pub collection: Option<String>,
}

impl From<TaxonomyArgs> for TaxonomyInput {
    fn from(args: TaxonomyArgs) -> Self {
        Self {
            name: args.name,
            slug: args.slug,
            collection: args.collection,
        }
    }
}

pub(crate) async fn run(config: &AppConfig, command: AdminCommands) -> anyhow::Result<()> {
    if config.admin_token.is_none() {
        anyhow::bail!("admin commands require VITRINA_ADMIN_TOKEN to be set");
    }
    let api = ApiClient::from_config(config)?;

    match command {
        AdminCommands::Products { command } => run_products(&api, config, command).await,
        AdminCommands::Categories { command } => run_categories(&api, command).await,
        AdminCommands::Collections { command } => run_collections(&api, command).await,
    }
}

async fn run_products(
    api: &ApiClient,
    config: &AppConfig,
    command: ProductCommands,
) -> anyhow::Result<()> {
    match command {
        ProductCommands::List { filter } => {
            let filter = filter.to_filter();
            let all = api.admin_list_products().await?;
            let matching = filter_products(&all, &filter);
            let pages = total_pages(matching.len() as u64, config.page_size);

            for product in paginate(&matching, filter.page(), config.page_size) {
                println!("{}", product_row(product));
            }
            println!(
                "page {} of {pages} ({} of {} products match)",
                filter.page(),
                matching.len(),
                all.len()
            );
        }
        ProductCommands::Create { product } => {
            let created = api.create_product(&product.into()).await?;
            tracing::info!(id = %created.id, "product created");
            println!("{}", product_row(&created));
        }
        ProductCommands::Update { id, product } => {
            let updated = api.update_product(&id, &product.into()).await?;
            tracing::info!(id = %updated.id, "product updated");
            println!("{}", product_row(&updated));
        }
        ProductCommands::Delete { id } => {
            api.delete_product(&id).await?;
            tracing::info!(id = %id, "product deleted");
            println!("deleted product {id}");
        }
    }
    Ok(())
}

async fn run_categories(api: &ApiClient, command: TaxonomyCommands) -> anyhow::Result<()> {
    match command {
        TaxonomyCommands::Create { taxonomy } => {
            let category = api.create_category(&taxonomy.into()).await?;
            println!("created category {} ({})", category.slug, category.id);
        }
        TaxonomyCommands::Update { id, taxonomy } => {
            let category = api.update_category(&id, &taxonomy.into()).await?;
            println!("updated category {} ({})", category.slug, category.id);
        }
        TaxonomyCommands::Delete { id } => {
            api.delete_category(&id).await?;
            println!("deleted category {id}");
        }
    }
    Ok(())
}

// Collections are top level; an owning collection makes no sense here.
fn collection_input(args: TaxonomyArgs) -> TaxonomyInput {
    if args.collection.is_some() {
        tracing::warn!("--collection is ignored for collections");
    }
    TaxonomyInput {
        collection: None,
        ..TaxonomyInput::from(args)
    }
}

async fn run_collections(api: &ApiClient, command: TaxonomyCommands) -> anyhow::Result<()> {
    match command {
        TaxonomyCommands::Create { taxonomy } => {
            let collection = api.create_collection(&collection_input(taxonomy)).await?;
            println!("created collection {} ({})", collection.slug, collection.id);
        }
        TaxonomyCommands::Update { id, taxonomy } => {
            let collection = api
                .update_collection(&id, &collection_input(taxonomy))
                .await?;
            println!("updated collection {} ({})", collection.slug, collection.id);
        }
        TaxonomyCommands::Delete { id } => {
            api.delete_collection(&id).await?;
            println!("deleted collection {id}");
        }
    }
    Ok(())
}
