//! # Product Commands
//!
//! Catalog browsing for everyone logged in, edits for admins.
//!
//! ```text
//! tally product list
//! tally product show P101
//! tally product search --keyword lamp --max-price 30
//! tally --role admin product add --id P101 --name "Desk Lamp" --price 25.99 \
//!       --quantity 12 --category Lighting --description "LED, warm white"
//! tally --role admin product update P101 --price 23.50
//! tally --role admin product delete P101
//! ```

use clap::{Args, Subcommand};
use serde::Serialize;
use tally_core::{Bounds, Money, Product, ProductFilter, ProductUpdate};
use tracing::debug;

use super::{to_json, CommandResult, Context};

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// List every product in catalog order
    List,

    /// Show one product
    Show { id: String },

    /// Add a product (admin)
    Add(AddArgs),

    /// Change some fields of a product (admin)
    Update(UpdateArgs),

    /// Remove a product (admin)
    Delete { id: String },

    /// Filter the catalog; all given criteria must match
    Search(SearchArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub id: String,

    #[arg(long)]
    pub name: String,

    /// Unit price, e.g. 19.99
    #[arg(long)]
    pub price: Money,

    #[arg(long, allow_negative_numbers = true)]
    pub quantity: i64,

    #[arg(long)]
    pub category: String,

    /// Image path (optional)
    #[arg(long, default_value = "")]
    pub image: String,

    #[arg(long)]
    pub description: String,
}

impl From<AddArgs> for Product {
    fn from(args: AddArgs) -> Self {
        Product {
            id: args.id,
            name: args.name,
            price: args.price,
            quantity: args.quantity,
            category: args.category,
            image_path: args.image,
            description: args.description,
        }
    }
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub price: Option<Money>,

    #[arg(long, allow_negative_numbers = true)]
    pub quantity: Option<i64>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub image: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

impl UpdateArgs {
    fn into_update(self) -> (String, ProductUpdate) {
        let update = ProductUpdate {
            name: self.name,
            price: self.price,
            quantity: self.quantity,
            category: self.category,
            image_path: self.image,
            description: self.description,
        };
        (self.id, update)
    }
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Exact product id
    #[arg(long)]
    pub id: Option<String>,

    /// Case-insensitive substring of name, category or description
    #[arg(long)]
    pub keyword: Option<String>,

    #[arg(long)]
    pub min_price: Option<Money>,

    #[arg(long)]
    pub max_price: Option<Money>,

    #[arg(long, allow_negative_numbers = true)]
    pub min_qty: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    pub max_qty: Option<i64>,
}

impl From<SearchArgs> for ProductFilter {
    fn from(args: SearchArgs) -> Self {
        ProductFilter {
            id: args.id,
            keyword: args.keyword,
            price: Bounds::new(args.min_price, args.max_price),
            quantity: Bounds::new(args.min_qty, args.max_qty),
        }
    }
}

/// Product as printed to stdout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    pub quantity: i64,
    pub category: String,
    pub image_path: String,
    pub description: String,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            id: p.id,
            name: p.name,
            price_cents: p.price.cents(),
            quantity: p.quantity,
            category: p.category,
            image_path: p.image_path,
            description: p.description,
        }
    }
}

fn dtos(products: Vec<Product>) -> Vec<ProductDto> {
    products.into_iter().map(ProductDto::from).collect()
}

pub fn run(ctx: &Context<'_>, command: ProductCommand) -> CommandResult {
    let catalog = ctx.inventory.catalog();

    match command {
        ProductCommand::List => to_json(dtos(catalog.list(ctx.session)?)),
        ProductCommand::Show { id } => to_json(ProductDto::from(catalog.get(ctx.session, &id)?)),
        ProductCommand::Add(args) => {
            let product = catalog.add(ctx.session, Product::from(args))?;
            to_json(ProductDto::from(product))
        }
        ProductCommand::Update(args) => {
            let (id, update) = args.into_update();
            to_json(ProductDto::from(catalog.update(ctx.session, &id, &update)?))
        }
        ProductCommand::Delete { id } => to_json(ProductDto::from(catalog.delete(ctx.session, &id)?)),
        ProductCommand::Search(args) => {
            let filter = ProductFilter::from(args);
            let found = catalog.search(ctx.session, &filter)?;
            debug!(matches = found.len(), "Search finished");
            to_json(dtos(found))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::inventory;
    use crate::error::ErrorCode;
    use tally_core::Session;

    fn ctx<'a>(inventory: &'a tally_service::Inventory, session: &'a Session) -> Context<'a> {
        Context {
            inventory,
            session,
            low_stock_threshold: 5,
        }
    }

    #[test]
    fn test_show_prints_cents() {
        let (_dir, inventory) = inventory();
        let sam = Session::employee("sam");

        let out = run(&ctx(&inventory, &sam), ProductCommand::Show { id: "P101".into() }).unwrap();
        assert_eq!(out["priceCents"], 2599);
        assert_eq!(out["name"], "Desk Lamp");
    }

    #[test]
    fn test_employee_cannot_delete() {
        let (_dir, inventory) = inventory();
        let sam = Session::employee("sam");

        let err = run(&ctx(&inventory, &sam), ProductCommand::Delete { id: "P101".into() })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[test]
    fn test_update_and_search() {
        let (_dir, inventory) = inventory();
        let ada = Session::admin("ada");
        let ctx = ctx(&inventory, &ada);

        let update = UpdateArgs {
            id: "P101".into(),
            name: None,
            price: Some(Money::from_cents(2350)),
            quantity: None,
            category: None,
            image: None,
            description: None,
        };
        let out = run(&ctx, ProductCommand::Update(update)).unwrap();
        assert_eq!(out["priceCents"], 2350);

        let search = SearchArgs {
            id: None,
            keyword: Some("LAMP".into()),
            min_price: None,
            max_price: Some(Money::from_cents(2400)),
            min_qty: None,
            max_qty: None,
        };
        let out = run(&ctx, ProductCommand::Search(search)).unwrap();
        assert_eq!(out.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_empty_update_is_a_validation_error() {
        let (_dir, inventory) = inventory();
        let ada = Session::admin("ada");

        let update = UpdateArgs {
            id: "P101".into(),
            name: None,
            price: None,
            quantity: None,
            category: None,
            image: None,
            description: None,
        };
        let err = run(&ctx(&inventory, &ada), ProductCommand::Update(update)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
