//! Ampera Application CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use sqlx::query;
use uuid::Uuid;

use ampera_app::{auth::hash_token, database};

#[derive(Debug, Parser)]
#[command(name = "ampera-app", about = "Ampera CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(DbCommand),
    Account(AccountCommand),
}

#[derive(Debug, Args)]
struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply the schema to the database. Idempotent.
    Migrate(MigrateArgs),
}

#[derive(Debug, Args)]
struct MigrateArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct AccountCommand {
    #[command(subcommand)]
    command: AccountSubcommand,
}

#[derive(Debug, Subcommand)]
enum AccountSubcommand {
    Create(CreateAccountArgs),
}

#[derive(Debug, Args)]
struct CreateAccountArgs {
    /// Login name, unique per account
    #[arg(long)]
    username: String,

    /// Display name
    #[arg(long)]
    fullname: String,

    /// Contact phone number
    #[arg(long)]
    phone: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Optional raw API token; generated when omitted
    #[arg(long)]
    token: Option<String>,
}

const INSERT_USER_SQL: &str =
    "INSERT INTO users (username, fullname, phone) VALUES ($1, $2, $3)";
const INSERT_TOKEN_SQL: &str = "INSERT INTO api_tokens (username, token_hash) VALUES ($1, $2)";

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Db(DbCommand {
            command: DbSubcommand::Migrate(args),
        }) => migrate(args).await,
        Commands::Account(AccountCommand {
            command: AccountSubcommand::Create(args),
        }) => create_account(args).await,
    }
}

async fn migrate(args: MigrateArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply schema: {error}"))?;

    println!("schema applied");

    Ok(())
}

async fn create_account(args: CreateAccountArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let raw_token = args.token.unwrap_or_else(generate_token);

    if raw_token.trim().is_empty() {
        return Err("token cannot be empty".to_string());
    }

    query(INSERT_USER_SQL)
        .bind(&args.username)
        .bind(&args.fullname)
        .bind(&args.phone)
        .execute(&pool)
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    query(INSERT_TOKEN_SQL)
        .bind(&args.username)
        .bind(hash_token(&raw_token))
        .execute(&pool)
        .await
        .map_err(|error| format!("failed to store api token: {error}"))?;

    println!("username: {}", args.username);
    println!("api_token: {raw_token}");
    println!("store this token now; it is only shown once");

    Ok(())
}

fn generate_token() -> String {
    format!("am_{}{}", Uuid::now_v7().simple(), Uuid::now_v7().simple())
}
