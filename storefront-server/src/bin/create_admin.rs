//! Bootstrap an administrator account.
//!
//! Usage: `create-admin [email] [password] [name]`

use shared::models::UserCreate;
use storefront_server::Config;
use storefront_server::db::DbService;
use storefront_server::db::repository::{RepoError, user};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let mut args = std::env::args().skip(1);
    let email = args
        .next()
        .unwrap_or_else(|| "admin@ferreteria.com".to_string());
    let password = args.next().unwrap_or_else(|| "admin123".to_string());
    let name = args.next().unwrap_or_else(|| "Administrador".to_string());

    let config = Config::from_env();
    let db = DbService::new(&config.db_path).await?;

    match user::create(
        &db.pool,
        UserCreate {
            email,
            password,
            name,
            role: Some("admin".to_string()),
        },
    )
    .await
    {
        Ok(admin) => {
            println!("Administrator account created:");
            println!("  Email: {}", admin.email);
            println!("  Name:  {}", admin.name);
            println!("  Role:  {}", admin.role);
        }
        Err(RepoError::Duplicate(_)) => {
            println!("User already exists");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
