//! Command line front end of the customer list.

use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use customer_panel::domain::customer::Customer;
use customer_panel::models::config::ClientConfig;
use customer_panel::repository::HttpRepository;
use customer_panel::services::customer::load_customer;
use customer_panel::services::list_query::FetchOutcome;
use customer_panel::services::list_screen::{AddressBar, ListScreen, MemoryAddressBar};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Configuration file without extension.
    #[arg(long, default_value = "config/default")]
    config: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prints one page of customers.
    List {
        /// Address-bar query, e.g. `current_page=2&per_page=20&first_name=ann`.
        #[arg(default_value = "")]
        query: String,
    },
    /// Prints a single customer.
    Show { id: i64 },
}

fn print_customer(index: u64, customer: &Customer) {
    println!(
        "{index:>4}  #{:<6} {:<30} {:<30} {:<14} {}",
        customer.id,
        customer.full_name(),
        customer.email.as_deref().unwrap_or("-"),
        customer.phone.as_deref().unwrap_or("-"),
        if customer.is_activated { "active" } else { "inactive" },
    );
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    let config = match ClientConfig::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading client config: {err}");
            std::process::exit(1);
        }
    };

    let repo = match HttpRepository::new(&config) {
        Ok(repo) => repo,
        Err(err) => {
            log::error!("Error creating http client: {err}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Command::List { query } => {
            let mut screen = ListScreen::new(repo, MemoryAddressBar::new(query), config.per_page());
            if screen.mount().await == FetchOutcome::Failed {
                log::error!(
                    "Error loading customers: {}",
                    screen.controller().error().unwrap_or_default()
                );
                std::process::exit(1);
            }

            let controller = screen.controller();
            for (index, customer) in controller.numbered_rows() {
                print_customer(index, customer);
            }
            let pagination = controller.pagination();
            println!(
                "{} (page {} of {})",
                pagination.summary(),
                pagination.current_page(),
                pagination.last_page()
            );
            println!("?{}", screen.address_bar().current_query());
        }
        Command::Show { id } => match load_customer(&repo, id).await {
            Ok(customer) => print_customer(1, &customer),
            Err(err) => {
                log::error!("{err}");
                std::process::exit(1);
            }
        },
    }
}
