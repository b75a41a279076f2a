use clap::Args;
use gazalla::Category;
use gazalla_app::domain::products::models::Product;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

#[derive(Debug, Args)]
pub(crate) struct ListProductsArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Only list products in this category (men or women)
    #[arg(long)]
    category: Option<Category>,
}

pub(crate) async fn run(args: ListProductsArgs) -> Result<(), String> {
    let context = super::super::connect(&args.database_url).await?;

    let products = context
        .products
        .list_products(args.category)
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    if products.is_empty() {
        println!("no products found");
        return Ok(());
    }

    println!("{}", render(&products));

    Ok(())
}

fn render(products: &[Product]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["UUID", "Name", "Category", "Price", "Stock"]);

    for product in products {
        builder.push_record([
            product.uuid.to_string(),
            product.name.clone(),
            product.category.to_string(),
            format!("{:.2}", product.price),
            product.stock.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..5), Alignment::right());

    table.to_string()
}
