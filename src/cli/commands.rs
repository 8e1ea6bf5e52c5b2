use std::path::Path;
use std::sync::Arc;
use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{Confirm, Editor, Input, Select, theme::ColorfulTheme};

use tracing::{error, info, warn};

use crate::{
    cli::args::*,
    models::cart::Cart,
    services::{catalog_source_for, QuoteService, Selection},
    utils::{
        config::Config,
        formatting::{format_catalog_table, format_currency, format_quote, product_label},
        validation::{parse_selection, validate_quantity_input},
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static FLOWER: Emoji<'_, '_> = Emoji("🌷 ", "");
static MONEY: Emoji<'_, '_> = Emoji("💰 ", "");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionAction {
    SetQuantity,
    Remove,
    Clear,
    Promotions,
    Summary,
    Finish,
}

const SESSION_ACTIONS: [(SessionAction, &str); 6] = [
    (SessionAction::SetQuantity, "Choose flowers"),
    (SessionAction::Remove, "Remove a flower"),
    (SessionAction::Clear, "Clear order"),
    (SessionAction::Promotions, "Edit promotions & bundles"),
    (SessionAction::Summary, "Show order summary"),
    (SessionAction::Finish, "Finish"),
];

/// State of one interactive quoting session.
struct Session {
    cart: Cart,
    promotions: String,
    last_product: usize,
}

pub struct CliApp {
    quote_service: Arc<QuoteService>,
    config: Config,
}

impl CliApp {
    pub fn new(config: Config) -> Result<Self> {
        let source = catalog_source_for(config.catalog_path.as_deref());
        let catalog = source
            .load()
            .with_context(|| format!("Failed to load {}", source.describe()))?;
        info!("Using {} ({} products)", source.describe(), catalog.len());

        let quote_service = Arc::new(QuoteService::new(Arc::new(catalog), config.currency.clone()));

        Ok(Self {
            quote_service,
            config,
        })
    }

    pub fn run(&self, command: Option<Commands>) -> Result<()> {
        match command {
            Some(Commands::Catalog) => self.handle_catalog(),
            Some(Commands::Quote) | None => self.handle_quote_session(),
            Some(Commands::Total { items, promotions, json }) => {
                self.handle_total(items, promotions, json)
            }
        }
    }

    fn handle_catalog(&self) -> Result<()> {
        let catalog = self.quote_service.catalog();
        if catalog.is_empty() {
            println!("{} {}", INFO, style("The catalog is empty").yellow());
            return Ok(());
        }

        println!("{} {}", FLOWER, style("Flower catalog").bold().cyan());
        println!("{}", format_catalog_table(catalog.list(), self.quote_service.currency()));
        Ok(())
    }

    fn handle_total(&self, items: Vec<String>, promotions: Option<String>, json: bool) -> Result<()> {
        let selections = items
            .iter()
            .map(|item| parse_selection(item))
            .collect::<Result<Vec<Selection>, _>>()
            .context("Invalid --item argument")?;

        let mut cart = self.quote_service.open_cart();
        self.quote_service
            .apply_selections(&mut cart, &selections)
            .context("Could not build quote")?;

        let summary = self.quote_service.summarize(&cart, promotions.as_deref());
        if json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print!("{}", format_quote(&summary));
        }
        Ok(())
    }

    fn handle_quote_session(&self) -> Result<()> {
        self.print_banner();
        println!("{} {}", FLOWER, style("Artemisa Florería").bold().magenta());
        println!("Choose the flowers and quantities you want quoted.");
        println!("Your order summary and total are shown as you go.\n");

        let theme = ColorfulTheme::default();
        let labels: Vec<&str> = SESSION_ACTIONS.iter().map(|(_, label)| *label).collect();
        let mut session = Session {
            cart: self.quote_service.open_cart(),
            promotions: String::new(),
            last_product: 0,
        };

        loop {
            let choice = Select::with_theme(&theme)
                .with_prompt("What would you like to do?")
                .items(&labels)
                .default(0)
                .interact()?;

            match SESSION_ACTIONS[choice].0 {
                SessionAction::SetQuantity => self.handle_set_quantity(&theme, &mut session)?,
                SessionAction::Remove => self.handle_remove(&theme, &mut session)?,
                SessionAction::Clear => self.handle_clear(&theme, &mut session)?,
                SessionAction::Promotions => self.handle_promotions(&mut session)?,
                SessionAction::Summary => self.print_summary(&session),
                SessionAction::Finish => {
                    self.print_summary(&session);
                    break;
                }
            }
        }

        info!("Quote session finished with {} lines", session.cart.len());
        Ok(())
    }

    fn handle_set_quantity(&self, theme: &ColorfulTheme, session: &mut Session) -> Result<()> {
        let currency = self.quote_service.currency();
        let products = self.quote_service.catalog().list();
        if products.is_empty() {
            println!("{} {}", INFO, style("The catalog is empty").yellow());
            return Ok(());
        }

        let labels: Vec<String> = products
            .iter()
            .map(|product| product_label(product, currency))
            .collect();

        let index = Select::with_theme(theme)
            .with_prompt("Flower")
            .items(&labels)
            .default(session.last_product.min(products.len() - 1))
            .max_length(12)
            .interact()?;
        session.last_product = index;

        let product = &products[index];
        let quantity: i64 = Input::with_theme(theme)
            .with_prompt(format!("Quantity of {}", product.name))
            .default(i64::from(session.cart.quantity_of(&product.name)))
            .validate_with(validate_quantity_input)
            .interact_text()?;

        match self
            .quote_service
            .set_quantity(&mut session.cart, &product.name, quantity)
        {
            Ok(()) => {
                if quantity == 0 {
                    println!("{} {} removed from the order", CHECKMARK, style(&product.name).green());
                } else {
                    println!(
                        "{} {} x {} = {}",
                        CHECKMARK,
                        quantity,
                        style(&product.name).green(),
                        format_currency(
                            session
                                .cart
                                .get(&product.name)
                                .map(|line| line.subtotal())
                                .unwrap_or_default()
                        )
                    );
                }
                self.print_running_total(&session.cart);
            }
            Err(e) => {
                println!("{} Could not update {}: {}", CROSS, product.name, style(&e).red());
                error!("Failed to set quantity: {}", e);
            }
        }

        Ok(())
    }

    fn handle_remove(&self, theme: &ColorfulTheme, session: &mut Session) -> Result<()> {
        if session.cart.is_empty() {
            println!("{} {}", INFO, style("No flowers selected yet.").dim());
            return Ok(());
        }

        let names: Vec<String> = session
            .cart
            .items()
            .map(|line| line.product_name.clone())
            .collect();

        let index = Select::with_theme(theme)
            .with_prompt("Remove which flower?")
            .items(&names)
            .default(0)
            .interact()?;

        session.cart.remove(&names[index]);
        info!("Removed '{}' from cart", names[index]);
        println!("{} {} removed from the order", CHECKMARK, style(&names[index]).green());
        self.print_running_total(&session.cart);
        Ok(())
    }

    fn handle_clear(&self, theme: &ColorfulTheme, session: &mut Session) -> Result<()> {
        if session.cart.is_empty() {
            println!("{} {}", INFO, style("The order is already empty.").dim());
            return Ok(());
        }

        let confirmed = Confirm::with_theme(theme)
            .with_prompt("Clear the whole order?")
            .default(false)
            .interact()?;

        if confirmed {
            self.quote_service.clear(&mut session.cart);
            println!("{} Order cleared", CHECKMARK);
        } else {
            println!("{} Order kept", INFO);
        }
        Ok(())
    }

    fn handle_promotions(&self, session: &mut Session) -> Result<()> {
        let template = if session.promotions.trim().is_empty() {
            "- Ramo de 12 rosas por $300\n- Combo margaritas + gerberas $150\n".to_string()
        } else {
            session.promotions.clone()
        };

        match Editor::new().edit(&template) {
            Ok(Some(text)) => {
                session.promotions = text;
                println!("{} Promotions updated", CHECKMARK);
            }
            Ok(None) => println!("{} Promotions unchanged", INFO),
            Err(e) => {
                println!("{} Could not open an editor: {}", CROSS, style(&e).red());
                warn!("Editor failed: {}", e);
            }
        }
        Ok(())
    }

    fn print_summary(&self, session: &Session) {
        let summary = self
            .quote_service
            .summarize(&session.cart, Some(&session.promotions));
        println!();
        print!("{}", format_quote(&summary));
        println!();
    }

    fn print_running_total(&self, cart: &Cart) {
        println!(
            "{} Total: {} {}",
            MONEY,
            style(format_currency(cart.total())).bold(),
            self.quote_service.currency()
        );
    }

    fn print_banner(&self) {
        println!("{}", banner_message(&self.config.banner_path));
    }
}

/// Banner text, or a visible warning when the file cannot be used.
fn banner_message(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(banner) => style(banner.trim_end()).magenta().to_string(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => format!(
            "{} Banner file '{}' not found",
            WARNING,
            style(path.display()).yellow()
        ),
        Err(e) => {
            warn!("Could not read banner {}: {}", path.display(), e);
            format!(
                "{} Banner file '{}' could not be read: {}",
                WARNING,
                style(path.display()).yellow(),
                e
            )
        }
    }
}
