//! Cart command handlers for the CLI.
//!
//! Every command loads the session's cart from disk, applies one mutation,
//! and writes it back only if the cart changed.

use std::num::NonZeroU32;

use clap::Subcommand;
use vitrina_client::{ApiClient, ConsultationRequestBuilder};
use vitrina_core::{AppConfig, CartStore, HandoffMode};

use crate::catalog::product_row;
use crate::opener::{capability_for, SystemOpener};
use crate::session::CartSessions;

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Add a product (quantity 1); no-op if already in the cart
    Add {
        /// Product id
        id: String,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: String,
    },
    /// Set the quantity of a product already in the cart
    Qty {
        /// Product id
        id: String,
        /// New quantity (at least 1)
        quantity: NonZeroU32,
    },
    /// Show the cart contents
    List,
    /// Empty the cart
    Clear,
    /// Send the cart as a consultation and hand off the messaging link
    Checkout {
        /// Launch the link with the system opener instead of printing it
        #[arg(long)]
        open: bool,
    },
}

pub(crate) async fn run(
    config: &AppConfig,
    session: Option<&str>,
    command: CartCommands,
) -> anyhow::Result<()> {
    let sessions = CartSessions::new(&config.cart_dir);
    let id = CartSessions::resolve_id(session)?;
    if session.is_none() {
        eprintln!("session: {id}");
    }
    let mut cart = sessions.load(&id)?;

    let changed = match command {
        CartCommands::Add { id: product_id } => {
            let api = ApiClient::from_config(config)?;
            let product = api.get_product(&product_id).await?;
            let added = cart.add(&product);
            if added {
                println!("added {}", product.name);
            } else if !product.in_stock {
                println!("{} is out of stock", product.name);
            } else {
                println!("{} is already in the cart", product.name);
            }
            added
        }
        CartCommands::Remove { id: product_id } => {
            let removed = cart.remove(&product_id);
            if !removed {
                println!("{product_id} is not in the cart");
            }
            removed
        }
        CartCommands::Qty {
            id: product_id,
            quantity,
        } => {
            let updated = cart.set_quantity(&product_id, quantity);
            if !updated && !cart.contains(&product_id) {
                anyhow::bail!("{product_id} is not in the cart");
            }
            updated
        }
        CartCommands::List => {
            print_cart(&cart);
            false
        }
        CartCommands::Clear => {
            let had_items = !cart.is_empty();
            cart.clear();
            had_items
        }
        CartCommands::Checkout { open } => {
            run_checkout(config, &mut cart, open).await?;
            true
        }
    };

    if changed {
        sessions.save(&id, &cart)?;
    }
    Ok(())
}

fn print_cart(cart: &CartStore) {
    if cart.is_empty() {
        println!("cart is empty");
        return;
    }
    for item in cart.list() {
        println!("{:>4} x {}", item.quantity, product_row(&item.product));
    }
}

/// Submits the cart and hands off the resulting link.
///
/// # Errors
///
/// Returns an error if the cart is empty, no destination phone is
/// configured, or the consultation request fails. The cart is left intact in
/// every error case.
async fn run_checkout(config: &AppConfig, cart: &mut CartStore, open: bool) -> anyhow::Result<()> {
    let api = ApiClient::from_config(config)?;
    let detector = capability_for(open);
    let opener = SystemOpener::default();
    let builder = ConsultationRequestBuilder::new(
        &api,
        config.whatsapp_phone.as_deref(),
        &detector,
        &opener,
    );

    let outcome = builder.submit(cart).await?;
    tracing::info!(items = outcome.items, mode = ?outcome.mode, "consultation handed off");

    match outcome.mode {
        HandoffMode::OpenedNewContext => println!("opened {}", outcome.link),
        HandoffMode::FellBackToInPlace => eprintln!("could not launch an opener; link printed above"),
        HandoffMode::NavigatedInPlace => {}
    }
    Ok(())
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
