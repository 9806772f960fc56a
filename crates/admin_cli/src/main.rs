use std::error::Error;

use clap::{Args, Parser, Subcommand};
use engine::{Actor, Engine, EngineError, Money, NewItemCmd};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "banquet_admin")]
#[command(about = "Admin utilities for Banquet (bootstrap users and the menu catalog)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./banquet.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Item(Item),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Create a user and print its API token.
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    username: String,
    /// Grant privileged access (reserves, weddings, catalog, user list).
    #[arg(long)]
    admin: bool,
}

#[derive(Args, Debug)]
struct Item {
    #[command(subcommand)]
    command: ItemCommand,
}

#[derive(Subcommand, Debug)]
enum ItemCommand {
    Create(ItemCreateArgs),
}

#[derive(Args, Debug)]
struct ItemCreateArgs {
    /// Business number, unique across the catalog.
    #[arg(long)]
    no: i64,
    #[arg(long)]
    name: String,
    #[arg(long)]
    category: String,
    #[arg(long)]
    tier: String,
    #[arg(long)]
    unit: String,
    /// Unit price, e.g. `45000` or `45,000`.
    #[arg(long)]
    price: Money,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => match engine.new_user(&args.username, args.admin).await {
            Ok((user, token)) => {
                println!("created user: {} ({})", user.username, user.id);
                println!("token: {token}");
            }
            Err(EngineError::ExistingKey(_)) => {
                eprintln!("user already exists: {}", args.username);
                std::process::exit(1);
            }
            Err(err) => return Err(err.into()),
        },
        Command::Item(Item {
            command: ItemCommand::Create(args),
        }) => {
            let operator = Actor::admin("banquet_admin");
            let item = engine
                .new_item(
                    NewItemCmd {
                        no: args.no,
                        name: args.name,
                        category: args.category,
                        tier: args.tier,
                        unit: args.unit,
                        price: args.price,
                    },
                    &operator,
                )
                .await?;
            println!("created item #{}: {} at {} ({})", item.no, item.name, item.price, item.id);
        }
    }

    Ok(())
}
