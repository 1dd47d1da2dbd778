use clap::Subcommand;

use super::output::{fmt_ms, print_json, print_table};
use crate::api::databases;
use crate::client::{ApiClient, ApiError};
use crate::models::database::{DatabaseEngine, NewDatabaseConnection};

#[derive(Subcommand, Debug)]
pub enum DbCommand {
    /// List saved connections
    Ls,
    /// Show one connection
    Show { id: i64 },
    /// Save a new connection
    Add {
        name: String,
        /// postgresql, mysql or sqlite
        #[arg(long)]
        engine: String,
        #[arg(long)]
        host: String,
        #[arg(long)]
        port: u16,
        #[arg(long)]
        database: String,
        #[arg(long)]
        username: String,
        /// Write-only; the backend never returns it
        #[arg(long)]
        password: String,
    },
    /// Delete a connection
    Rm { id: i64 },
    /// Run a query through a saved connection
    Query { id: i64, sql: String },
}

fn parse_engine(value: &str) -> Result<DatabaseEngine, ApiError> {
    match value {
        "postgresql" => Ok(DatabaseEngine::Postgresql),
        "mysql" => Ok(DatabaseEngine::Mysql),
        "sqlite" => Ok(DatabaseEngine::Sqlite),
        other => Err(ApiError::Config(format!(
            "unknown engine '{other}' (expected postgresql, mysql or sqlite)"
        ))),
    }
}

fn connection_row(c: &crate::models::database::DatabaseConnection) -> Vec<String> {
    vec![
        c.id.to_string(),
        c.name.clone(),
        c.engine.as_str().to_string(),
        format!("{}:{}", c.host, c.port),
        c.database.clone(),
        c.username.clone(),
    ]
}

pub async fn run(client: &ApiClient, command: DbCommand, json: bool) -> Result<(), ApiError> {
    match command {
        DbCommand::Ls => {
            let connections = databases::list_connections(client).await?;
            if json {
                return print_json(&connections);
            }
            let rows: Vec<Vec<String>> = connections.iter().map(connection_row).collect();
            print_table(&["id", "name", "engine", "host", "database", "user"], &rows);
        }
        DbCommand::Show { id } => {
            let connection = databases::get_connection(client, id).await?;
            if json {
                return print_json(&connection);
            }
            print_table(
                &["id", "name", "engine", "host", "database", "user"],
                &[connection_row(&connection)],
            );
        }
        DbCommand::Add {
            name,
            engine,
            host,
            port,
            database,
            username,
            password,
        } => {
            let connection = databases::create_connection(
                client,
                &NewDatabaseConnection {
                    name,
                    engine: parse_engine(&engine)?,
                    host,
                    port,
                    database,
                    username,
                    password,
                },
            )
            .await?;
            if json {
                return print_json(&connection);
            }
            println!("Saved connection {} ({}).", connection.id, connection.name);
        }
        DbCommand::Rm { id } => {
            databases::delete_connection(client, id).await?;
            println!("Deleted connection {id}.");
        }
        DbCommand::Query { id, sql } => {
            let result = databases::run_query(client, id, &sql).await?;
            if json {
                return print_json(&result);
            }
            let headers: Vec<&str> = result.columns.iter().map(String::as_str).collect();
            let rows: Vec<Vec<String>> = result
                .rows
                .iter()
                .map(|row| row.iter().map(render_cell).collect())
                .collect();
            print_table(&headers, &rows);
            println!(
                "{} row(s) in {}",
                result.row_count,
                fmt_ms(result.duration_ms)
            );
        }
    }
    Ok(())
}

fn render_cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "NULL".to_string(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
