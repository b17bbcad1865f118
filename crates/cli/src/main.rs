//! GameStore CLI - shop from the terminal.
//!
//! Works directly on the storefront's data directory and catalog, so a cart
//! built here is the same cart the server shows (and vice versa).
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! gs-cli catalog list --sort price_asc --genre rpg
//! gs-cli catalog show starfall-odyssey
//!
//! # Cart
//! gs-cli cart add starfall-odyssey
//! gs-cli cart update 1 3
//! gs-cli cart show
//!
//! # Auth
//! gs-cli auth login -e user@example.com -p password123
//!
//! # Checkout
//! gs-cli checkout -e user@example.com -n "Demo User" -a "1 Main Street" \
//!     --card "4242 4242 4242 4242" --expiry 12/29 --cvc 123
//! ```
//!
//! Configuration comes from the same `GAMESTORE_*` environment variables as
//! the server. Output is JSON on stdout.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use game_store_storefront::catalog::views::SortOrder;
use game_store_storefront::config::StorefrontConfig;
use game_store_storefront::state::AppState;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "gs-cli")]
#[command(author, version, about = "GameStore CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the game catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Inspect and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Sign in and out
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Place an order for the current cart
    Checkout(commands::checkout::CheckoutArgs),
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List games
    List {
        /// Search term (title or genre)
        #[arg(short, long)]
        query: Option<String>,

        /// Genre tag
        #[arg(short, long)]
        genre: Option<String>,

        /// Sort order (`popularity`, `price_asc`, `price_desc`)
        #[arg(short, long, default_value = "popularity", value_parser = parse_sort)]
        sort: SortOrder,
    },
    /// Show one game
    Show {
        /// Game slug
        slug: String,
    },
    /// List discounted games
    Deals,
    /// List free-to-play games
    Free,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add one copy of a game
    Add {
        /// Game slug
        slug: String,
    },
    /// Set a line's quantity (0 removes it)
    Update {
        /// Game id
        game_id: String,
        /// New quantity
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove {
        /// Game id
        game_id: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Log in with the demo account
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and log in
    Signup {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log out
    Logout,
    /// Show the current identity
    Whoami,
}

fn parse_sort(value: &str) -> Result<SortOrder, String> {
    serde_json::from_value(serde_json::Value::String(value.to_owned()))
        .map_err(|_| format!("unknown sort order: {value}"))
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = StorefrontConfig::from_env()?;
    let state = AppState::from_config(config)?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                query,
                genre,
                sort,
            } => commands::catalog::list(&state, query, genre, sort).await,
            CatalogAction::Show { slug } => commands::catalog::show(&state, &slug).await,
            CatalogAction::Deals => commands::catalog::deals(&state).await,
            CatalogAction::Free => commands::catalog::free(&state).await,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add { slug } => commands::cart::add(&state, &slug).await,
            CartAction::Update { game_id, quantity } => {
                commands::cart::update(&state, &game_id, quantity)
            }
            CartAction::Remove { game_id } => commands::cart::remove(&state, &game_id),
            CartAction::Clear => commands::cart::clear(&state),
        },
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(&state, email, password)
            }
            AuthAction::Signup {
                name,
                email,
                password,
            } => commands::auth::signup(&state, name, email, password),
            AuthAction::Logout => commands::auth::logout(&state),
            AuthAction::Whoami => commands::auth::whoami(&state),
        },
        Commands::Checkout(args) => commands::checkout::run(&state, args).await,
    }
}
