use anyhow::Context;
use cardvault::adapters::{scryfall::ScryfallClient, store};
use cardvault::domain::model::{AddCardArgs, CollectionFilter};
use cardvault::utils::logger;
use cardvault::{App, AppConfig, Cli, Command, FileConfig};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let file = FileConfig::load(&cli.config).context("loading config file")?;
    let currency_given = cli.currency.is_some()
        || file.as_ref().is_some_and(|f| f.currency.is_some());
    let config = AppConfig::resolve(file, cli.db.clone(), cli.currency.clone())
        .context("resolving configuration")?;

    let conn = store::open(&config.db_path)
        .with_context(|| format!("opening database {}", config.db_path))?;
    let scryfall = match &config.scryfall_base_url {
        Some(base) => ScryfallClient::with_base_url(base.clone()),
        None => ScryfallClient::new(),
    };
    let app = App::new(conn, scryfall);

    if currency_given {
        app.set_currency(config.currency)?;
    }
    let currency = app.currency()?;

    match cli.command {
        Command::Search { query, page } => {
            let results = app.search_scryfall(&query, page).await?;
            print_json(&results)?;
        }
        Command::Add {
            scryfall_id,
            condition,
            price,
            quantity,
            foil,
            language,
            finish,
            tags,
        } => {
            let args = AddCardArgs {
                scryfall_id,
                condition,
                purchase_price: price,
                quantity,
                is_foil: foil,
                language,
                finish,
                tags: if tags.is_empty() { None } else { Some(tags) },
            };
            let id = app.add_card(args).await?;
            println!("Added card {}", id);
        }
        Command::List {
            name,
            set,
            condition,
        } => {
            let filter = CollectionFilter {
                name,
                set_code: set,
                condition,
                tag_id: None,
            };
            let cards = app.get_collection(filter).await?;
            print_json(&cards)?;
        }
        Command::Remove { id } => {
            app.remove_card(&id).await?;
            println!("Removed card {}", id);
        }
        Command::UpdatePrices => {
            let progress = watch_progress(&app);
            let message = app.update_prices(currency).await?;
            progress.abort();
            println!("{}", message);
        }
        Command::Stats => {
            let stats = app.get_collection_stats().await?;
            println!(
                "Investment: {}  Value: {}  Gain: {} ({:.1}%)",
                currency.format_amount(stats.total_investment),
                currency.format_amount(stats.total_value),
                currency.format_amount(stats.total_gain),
                stats.total_roi_percentage
            );
            print_json(&stats)?;
        }
        Command::History { card_id } => {
            let points = app.get_card_price_history(&card_id).await?;
            print_json(&points)?;
        }
        Command::Portfolio => {
            let points = app.get_portfolio_history().await?;
            print_json(&points)?;
        }
        Command::Sets => {
            let sets = app.get_sets().await?;
            print_json(&sets)?;
        }
        Command::ImportSets => {
            let progress = watch_progress(&app);
            let message = app.import_sets().await?;
            progress.abort();
            println!("{}", message);
        }
        Command::Export { output } => {
            let csv = app.export_collection().await?;
            match output {
                Some(path) => {
                    std::fs::write(&path, csv).with_context(|| format!("writing {}", path))?;
                    println!("Exported collection to {}", path);
                }
                None => print!("{}", csv),
            }
        }
        Command::Import { file } => {
            let content =
                std::fs::read_to_string(&file).with_context(|| format!("reading {}", file))?;
            let progress = watch_progress(&app);
            let message = app.import_collection(&content).await?;
            progress.abort();
            println!("{}", message);
        }
        Command::Trends => {
            let trends = app.get_market_trends().await?;
            print_json(&trends)?;
        }
        Command::Wishlist => {
            let wishlist = app.get_wishlist().await?;
            print_json(&wishlist)?;
        }
        Command::Invoke { command, args } => {
            let args: serde_json::Value =
                serde_json::from_str(&args).context("parsing JSON arguments")?;
            let result = cardvault::dispatch(&app, &command, args).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Mirror progress events to stderr while a long command runs.
fn watch_progress(app: &App) -> tokio::task::JoinHandle<()> {
    let mut rx = app.subscribe_progress();
    tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            eprintln!("[{}/{}] {}", event.current, event.total, event.message);
        }
    })
}
